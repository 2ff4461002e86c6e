//! Example: Scan recent messages for one-time passcodes.
//!
//! Fetches inbound messages from the last 15 minutes and prints every
//! detected passcode with its sender and receive time.
//!
//! # Usage
//!
//! ```bash
//! # Optional: override the store path (defaults to ~/Library/Messages/chat.db)
//! export SMS_OTP_DB="/path/to/chat.db"
//! cargo run --example scan_recent
//! ```

use sms_otp::present::list_entry;
use sms_otp::{SearchConfig, SmsOtpClient};
use std::env;

#[tokio::main]
async fn main() -> sms_otp::Result<()> {
    let mut builder = SearchConfig::builder();
    if let Ok(path) = env::var("SMS_OTP_DB") {
        builder = builder.db_path(path);
    }
    let config = builder.build()?;

    println!("Scanning {} ...\n", config.db_path.display());

    let client = SmsOtpClient::new(config);

    let entries = match client.search().await {
        Ok(entries) => entries,
        Err(e) if e.is_permission_denied() => {
            eprintln!("Cannot read the message store: {}", e);
            eprintln!("Grant Full Disk Access to your terminal and retry.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if entries.is_empty() {
        println!("No passcodes in the last 15 minutes.");
        return Ok(());
    }

    for entry in &entries {
        let row = list_entry(entry);
        let when = row
            .accessory
            .map_or_else(|| "unknown time".to_string(), |t| t.to_string());
        println!("{}  from {}  at {}", row.detail.code, row.detail.sender, when);
        println!("    {}", row.title);
    }

    println!("\n{} passcode(s) found.", entries.len());
    Ok(())
}
