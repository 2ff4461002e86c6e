//! Example: Copy the most recent passcode to the clipboard.
//!
//! Searches the last 15 minutes of messages and copies the newest detected
//! code using the system clipboard sink, printing the notifications a
//! frontend would show as toasts.
//!
//! # Usage
//!
//! ```bash
//! export SMS_OTP_DB="/path/to/chat.db"   # optional
//! cargo run --example copy_latest
//! ```

use sms_otp::present::{copy_otp, Notification, NotificationSink, SystemClipboard};
use sms_otp::{SearchConfig, SmsOtpClient};
use std::env;

/// Prints notifications to stdout instead of showing toasts.
struct StdoutNotifier;

impl NotificationSink for StdoutNotifier {
    fn notify(&mut self, notification: Notification) {
        println!("[{:?}] {}: {}", notification.style, notification.title, notification.message);
    }
}

#[tokio::main]
async fn main() -> sms_otp::Result<()> {
    let mut builder = SearchConfig::builder();
    if let Ok(path) = env::var("SMS_OTP_DB") {
        builder = builder.db_path(path);
    }
    let config = builder.build()?;
    let client = SmsOtpClient::new(config);

    let entries = client.search().await?;

    let Some(newest) = entries.first() else {
        println!("No passcodes in the last 15 minutes; nothing to copy.");
        return Ok(());
    };

    let mut clipboard = SystemClipboard::new();
    let mut notifier = StdoutNotifier;

    let code = copy_otp(
        &newest.message,
        &client.config().patterns,
        &mut clipboard,
        &mut notifier,
    )?;

    println!("\nCopied {} (from {}).", code, newest.message.sender);
    Ok(())
}
