//! Configuration for message store searches.
//!
//! Use [`SearchConfigBuilder`] to create a configuration with sensible
//! defaults:
//!
//! ```
//! use sms_otp::SearchConfig;
//!
//! let config = SearchConfig::builder()
//!     .db_path("/tmp/chat.db")
//!     .lookback_minutes(30)
//!     .build()
//!     .expect("valid config");
//! ```

use crate::classifier::PatternSet;
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Default lookback window in minutes.
pub const DEFAULT_LOOKBACK_MINUTES: u32 = 15;

/// Maximum (and default) number of messages one fetch may return.
pub const MAX_MESSAGES: u32 = 100;

/// Configuration for searching the message store.
///
/// Create using [`SearchConfig::builder()`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Path to the SQLite message store.
    pub db_path: PathBuf,
    /// How far back to fetch messages, in minutes.
    pub lookback_minutes: u32,
    /// Upper bound on messages returned per fetch (at most [`MAX_MESSAGES`]).
    pub max_messages: u32,
    /// The pattern table used for classification.
    pub patterns: PatternSet,
}

impl SearchConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

/// Returns the platform default message store location,
/// `~/Library/Messages/chat.db`.
#[must_use]
pub fn default_db_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Library/Messages/chat.db"))
}

/// Builder for [`SearchConfig`].
#[derive(Debug, Default)]
pub struct SearchConfigBuilder {
    db_path: Option<PathBuf>,
    lookback_minutes: Option<u32>,
    max_messages: Option<u32>,
    patterns: Option<PatternSet>,
}

impl SearchConfigBuilder {
    /// Sets the message store path.
    ///
    /// If not set, the platform default (`~/Library/Messages/chat.db`) is
    /// used.
    #[must_use]
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    /// Sets the lookback window in minutes. Default is 15; must be nonzero.
    #[must_use]
    pub fn lookback_minutes(mut self, minutes: u32) -> Self {
        self.lookback_minutes = Some(minutes);
        self
    }

    /// Sets the per-fetch message cap. Default is 100, which is also the
    /// maximum the source contract allows.
    #[must_use]
    pub fn max_messages(mut self, max: u32) -> Self {
        self.max_messages = Some(max);
        self
    }

    /// Replaces the built-in pattern table.
    #[must_use]
    pub fn patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = Some(patterns);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the lookback window is zero, the
    /// message cap is zero or above 100, or no store path was given and the
    /// home directory cannot be determined.
    pub fn build(self) -> Result<SearchConfig> {
        let db_path = match self.db_path {
            Some(path) => path,
            None => default_db_path().ok_or_else(|| Error::InvalidConfig {
                message: "no db_path given and home directory could not be determined".into(),
            })?,
        };

        let lookback_minutes = self.lookback_minutes.unwrap_or(DEFAULT_LOOKBACK_MINUTES);
        if lookback_minutes == 0 {
            return Err(Error::InvalidConfig {
                message: "lookback window must be at least one minute".into(),
            });
        }

        let max_messages = self.max_messages.unwrap_or(MAX_MESSAGES);
        if max_messages == 0 || max_messages > MAX_MESSAGES {
            return Err(Error::InvalidConfig {
                message: format!("max_messages must be between 1 and {MAX_MESSAGES}"),
            });
        }

        Ok(SearchConfig {
            db_path,
            lookback_minutes,
            max_messages,
            patterns: self.patterns.unwrap_or_default(),
        })
    }
}
