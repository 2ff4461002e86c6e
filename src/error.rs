//! Error types for the sms-otp crate.
//!
//! All I/O failures are caught at the message-source boundary and turned into
//! a typed error; the classifier itself never raises — absence of a match is
//! data, not an error. [`Error::is_permission_denied`] identifies the one
//! error kind that needs a dedicated remediation screen (macOS Full Disk
//! Access).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while searching the message store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Configuration / validation errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Invalid configuration provided.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Message store errors
    // ─────────────────────────────────────────────────────────────────────────
    /// The message store cannot be opened due to OS-level permission
    /// restrictions. The user must be directed to a remediation screen; no
    /// automatic recovery exists.
    #[error("access to message store denied: {path}")]
    AccessDenied {
        /// The store path that could not be accessed.
        path: PathBuf,
    },

    /// Any other failure opening the message store.
    #[error("failed to open message store at {path}")]
    OpenStore {
        /// The store path that failed.
        path: PathBuf,
        /// The underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },

    /// The message query failed.
    #[error("message query failed")]
    Query {
        /// The underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },

    /// The blocking fetch task panicked or was cancelled.
    #[error("message fetch task failed")]
    FetchTask {
        /// The underlying join error.
        #[source]
        source: tokio::task::JoinError,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Session errors
    // ─────────────────────────────────────────────────────────────────────────
    /// A fetch completed after a newer request was issued; its results were
    /// discarded rather than overwriting fresher state.
    #[error("search superseded by a newer request (generation {generation})")]
    Superseded {
        /// The generation of the stale request.
        generation: u64,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Extraction errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Explicit code extraction was requested on a message with no detectable
    /// passcode. A normal classifier outcome, surfaced as an error only at
    /// the copy-action boundary.
    #[error("no passcode found in message")]
    NoCode,

    // ─────────────────────────────────────────────────────────────────────────
    // Side-effect sink errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to write the extracted code to the system clipboard.
    #[error("failed to write passcode to clipboard")]
    Clipboard {
        /// The underlying clipboard error.
        #[source]
        source: arboard::Error,
    },
}

impl Error {
    /// Returns `true` for the store-access error that requires the dedicated
    /// permission remediation screen rather than a generic failure
    /// notification.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::AccessDenied { .. })
    }

    /// Returns the error category for logging purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidConfig { .. } => ErrorCategory::Configuration,
            Error::AccessDenied { .. } => ErrorCategory::Permission,
            Error::OpenStore { .. } | Error::Query { .. } | Error::FetchTask { .. } => {
                ErrorCategory::Store
            }
            Error::Superseded { .. } => ErrorCategory::Stale,
            Error::NoCode => ErrorCategory::NotFound,
            Error::Clipboard { .. } => ErrorCategory::Sink,
        }
    }

    /// Classifies a SQLite open failure, sniffing for OS permission errors
    /// that SQLite reports only through its message text.
    pub(crate) fn from_open_failure(path: PathBuf, source: rusqlite::Error) -> Self {
        let text = source.to_string().to_lowercase();
        if text.contains("not permitted") || text.contains("permission denied") {
            Error::AccessDenied { path }
        } else {
            Error::OpenStore { path, source }
        }
    }
}

/// Error categories for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Configuration or validation errors.
    Configuration,
    /// OS-level permission restrictions on the message store.
    Permission,
    /// Message store open/query failures.
    Store,
    /// Results discarded in favor of a newer request.
    Stale,
    /// No matching content found.
    NotFound,
    /// Side-effect sink (clipboard) failures.
    Sink,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Configuration => write!(f, "configuration"),
            ErrorCategory::Permission => write!(f, "permission"),
            ErrorCategory::Store => write!(f, "store"),
            ErrorCategory::Stale => write!(f, "stale"),
            ErrorCategory::NotFound => write!(f, "not_found"),
            ErrorCategory::Sink => write!(f, "sink"),
        }
    }
}
