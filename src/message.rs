//! Message record types.
//!
//! A [`Message`] is one inbound text message as returned by the message
//! store. The body is raw, untrusted, arbitrary Unicode; the store's query
//! pre-filters for digit-bearing text, but nothing here relies on that.

use chrono::NaiveDateTime;

/// One inbound text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Opaque, stable identifier; used for de-duplication and keying.
    pub id: String,
    /// Display string identifying the originator (phone number or chat id).
    pub sender: String,
    /// Transport label, e.g. `"SMS"` or `"iMessage"`.
    pub service: String,
    /// Local receive time; `None` when the store value is missing or
    /// unparseable. Messages without a timestamp sort after all timestamped
    /// ones.
    pub received_at: Option<NaiveDateTime>,
    /// Raw message text.
    pub body: String,
    /// Tri-state read flag.
    pub read: ReadState,
}

/// Read status of a message as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    /// The message has been read.
    Read,
    /// The message has not been read.
    Unread,
    /// The store did not report a usable read flag.
    Unknown,
}

impl ReadState {
    /// Derives the read state from the store's `is_read` flag and
    /// `date_read` timestamp columns.
    ///
    /// A nonzero `is_read` or a recorded read date means read; an explicit
    /// zero flag with no read date means unread; anything else is unknown.
    #[must_use]
    pub fn from_store(is_read: Option<i64>, date_read: Option<i64>) -> Self {
        match (is_read, date_read) {
            (Some(flag), _) if flag != 0 => Self::Read,
            (_, Some(date)) if date != 0 => Self::Read,
            (Some(0), _) => Self::Unread,
            _ => Self::Unknown,
        }
    }

    /// Whether this message is known to be unread.
    #[must_use]
    pub fn is_unread(self) -> bool {
        matches!(self, Self::Unread)
    }
}

impl std::fmt::Display for ReadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Unread => write!(f, "unread"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
