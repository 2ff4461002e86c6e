//! # sms-otp
//!
//! Scan a local SMS message store for one-time passcodes.
//!
//! This crate reads recent inbound messages from the macOS Messages database
//! (`chat.db`), detects OTP codes in their free-form text with an ordered
//! pattern table, and produces a deduplicated, recency-sorted list ready for
//! a presentation layer, plus a copy-to-clipboard action.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sms_otp::{SearchConfig, SmsOtpClient};
//!
//! # async fn example() -> sms_otp::Result<()> {
//! // Default store path (~/Library/Messages/chat.db), 15 minute window
//! let config = SearchConfig::builder().build()?;
//! let client = SmsOtpClient::new(config);
//!
//! for entry in client.search().await? {
//!     println!(
//!         "{} → {}",
//!         entry.message.sender,
//!         entry.classification.code
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Classifying a single string
//!
//! The detector itself is a pure function and usable standalone:
//!
//! ```
//! use sms_otp::classifier::classify;
//!
//! let result = classify("Your code is 1234, see http://example.com/x?y=1");
//! assert_eq!(result.code, "1234");
//! ```
//!
//! ## Custom patterns
//!
//! ```
//! use sms_otp::classifier::{OtpPattern, PatternSet};
//! use sms_otp::SearchConfig;
//!
//! let mut patterns = PatternSet::with_defaults();
//! patterns.register(
//!     OtpPattern::new(10, r"^.*access key (\d+).*$", "access key NNNN").unwrap(),
//! );
//!
//! let config = SearchConfig::builder()
//!     .db_path("/tmp/chat.db")
//!     .patterns(patterns)
//!     .build()
//!     .expect("valid config");
//! ```
//!
//! ## Error Handling
//!
//! All errors implement `std::error::Error`. The one kind that needs special
//! UI treatment is the store permission failure:
//!
//! ```
//! use sms_otp::Error;
//!
//! fn handle_error(error: &Error) {
//!     if error.is_permission_denied() {
//!         println!("Grant Full Disk Access and retry");
//!     } else {
//!         println!("Search failed: {}", error);
//!     }
//! }
//! ```
//!
//! ## Observability
//!
//! The crate uses `tracing` for instrumentation. Major operations emit spans
//! with structured fields:
//!
//! - `SmsOtpClient::search` - One search pass (`lookback_minutes`,
//!   `generation`)
//! - `SmsSource::fetch_recent` - The store fetch (`db_path`, `row_count`)
//!
//! No subscriber is installed by the library.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Public modules
pub mod classifier;
pub mod config;
pub mod error;
pub mod message;
pub mod pipeline;
pub mod present;
pub mod source;

// Internal modules
mod client;

// Re-exports for ergonomic API
pub use classifier::{classify, Classification, OtpPattern, PatternSet};
pub use client::SmsOtpClient;
pub use config::{SearchConfig, SearchConfigBuilder};
pub use error::{Error, ErrorCategory, Result};
pub use message::{Message, ReadState};
pub use pipeline::{classify_messages, ClassifiedMessage};
pub use source::SmsSource;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // Ensure all public types are accessible
        let _ = SearchConfig::builder();
        let _ = PatternSet::with_defaults();
        let _ = classify("code: 1234");
    }
}
