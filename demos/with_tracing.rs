//! Example: Using tracing for observability.
//!
//! Enables structured logging via the `tracing` ecosystem. All major
//! operations in sms-otp emit spans and events: the search span carries the
//! window and generation, the fetch span the store path and row count.
//!
//! # Usage
//!
//! ```bash
//! export SMS_OTP_DB="/path/to/chat.db"   # optional
//! # Set log level (trace, debug, info, warn, error)
//! export RUST_LOG=sms_otp=debug
//!
//! cargo run --example with_tracing
//! ```

use sms_otp::{SearchConfig, SmsOtpClient};
use std::env;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> sms_otp::Result<()> {
    // Initialize tracing subscriber with environment filter
    // Use RUST_LOG environment variable to control log levels
    // Example: RUST_LOG=sms_otp=debug,info
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sms_otp=info")),
        )
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let mut builder = SearchConfig::builder();
    if let Ok(path) = env::var("SMS_OTP_DB") {
        builder = builder.db_path(path);
    }
    let config = builder.build()?;

    tracing::info!(db_path = %config.db_path.display(), "Starting sms-otp example");

    let client = SmsOtpClient::new(config);

    // Search - this emits spans for the search pass and the store fetch
    match client.search().await {
        Ok(entries) => {
            tracing::info!(matched = entries.len(), "Search complete");
            for entry in &entries {
                println!("{}: {}", entry.message.sender, entry.classification.code);
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, category = %e.category(), "Search failed");
            println!("Search failed: {}", e);
        }
    }

    Ok(())
}
