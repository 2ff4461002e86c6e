//! Search client tying the source adapter, classifier and pipeline together.
//!
//! The [`SmsOtpClient`] is the main entry point for this crate. One client
//! corresponds to one logical search session: a query-parameter change (new
//! lookback window) means building a new config and a new search, and a fetch
//! that completes after a newer one has started is discarded instead of
//! overwriting fresher results.
//!
//! # Example
//!
//! ```no_run
//! use sms_otp::{SearchConfig, SmsOtpClient};
//!
//! # async fn example() -> sms_otp::Result<()> {
//! let config = SearchConfig::builder().build()?;
//! let client = SmsOtpClient::new(config);
//!
//! for entry in client.search().await? {
//!     println!("{}: {}", entry.message.sender, entry.classification.code);
//! }
//! # Ok(())
//! # }
//! ```

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::message::Message;
use crate::pipeline::{self, ClassifiedMessage};
use crate::source::SmsSource;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};

/// Async client for OTP search over the local message store.
///
/// Create with [`SmsOtpClient::new`]; the store is only opened when
/// [`search`](Self::search) runs. The client is cheap and holds no open
/// handle between searches.
pub struct SmsOtpClient {
    config: SearchConfig,
    source: SmsSource,
    /// Generation counter for request supersession. Each search takes a
    /// ticket; only the holder of the latest ticket may publish results.
    generation: AtomicU64,
}

impl SmsOtpClient {
    /// Creates a client for the configured store.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        let source = SmsSource::new(&config.db_path);
        Self {
            config,
            source,
            generation: AtomicU64::new(0),
        }
    }

    /// Fetches recent messages and runs one classification pipeline pass.
    ///
    /// Returns only messages with a detected code, deduplicated by id and
    /// ordered most recent first.
    ///
    /// # Errors
    ///
    /// Returns store errors from the fetch, or [`Error::Superseded`] when a
    /// newer search started while this one's fetch was in flight — the stale
    /// results are dropped, never returned.
    #[instrument(name = "SmsOtpClient::search", skip(self), fields(
        lookback_minutes = self.config.lookback_minutes,
        generation = tracing::field::Empty,
    ))]
    pub async fn search(&self) -> Result<Vec<ClassifiedMessage>> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::Span::current().record("generation", ticket);

        let messages = self
            .source
            .fetch_recent(self.config.lookback_minutes, self.config.max_messages)
            .await?;

        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "discarding superseded fetch result");
            return Err(Error::Superseded { generation: ticket });
        }

        let entries = pipeline::classify_messages(messages, &self.config.patterns);
        debug!(matched = entries.len(), "search complete");
        Ok(entries)
    }

    /// Extracts the passcode from one message on demand (the copy action).
    ///
    /// Classification is recomputed here rather than cached from the list
    /// pass; it is pure and cheap, so both paths always agree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoCode`] when the message has no detectable code.
    pub fn extract_code(&self, message: &Message) -> Result<String> {
        let classification = self.config.patterns.classify(&message.body);
        if classification.found {
            Ok(classification.code)
        } else {
            Err(Error::NoCode)
        }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl std::fmt::Debug for SmsOtpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsOtpClient")
            .field("db_path", &self.config.db_path)
            .field("lookback_minutes", &self.config.lookback_minutes)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
