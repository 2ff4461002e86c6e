//! Message source adapter over the local SQLite message store.
//!
//! The store is the macOS Messages database (`chat.db`), opened read-only for
//! the duration of a single fetch and released when the query completes, so
//! no long-lived handle contends with the owning application. The query
//! applies a coarse recall pre-filter (inbound, non-empty, digit-bearing
//! text) before the classifier sees anything; the classifier re-validates and
//! must not rely on it.

use crate::error::{Error, Result};
use crate::message::{Message, ReadState};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Seconds between the Unix epoch and the store's 2001-01-01 reference date.
const APPLE_EPOCH_OFFSET_SECS: i64 = 978_307_200;

/// Windowed query over the store.
///
/// The digit pre-filter accepts any run of 3-8 consecutive digits plus the
/// hyphenated 3-3 shape; it is a recall filter, not a substitute for
/// classification. The receive-time bound is a parameter computed by the
/// caller, compared strictly, so a message exactly one window old falls
/// outside it.
const RECENT_MESSAGES_QUERY: &str = "\
select
    message.ROWID,
    message.date_read,
    message.is_read,
    ifnull(handle.uncanonicalized_id, chat.chat_identifier) as sender,
    message.service,
    datetime(message.date / 1000000000 + 978307200, 'unixepoch', 'localtime') as message_date,
    message.text
from
    message
        left join chat_message_join
                on chat_message_join.message_id = message.ROWID
        left join chat
                on chat.ROWID = chat_message_join.chat_id
        left join handle
                on message.handle_id = handle.ROWID
where
    message.is_from_me = 0
    and message.text is not null
    and length(message.text) > 0
    and (
        message.text glob '*[0-9][0-9][0-9]*'
        or message.text glob '*[0-9][0-9][0-9][0-9]*'
        or message.text glob '*[0-9][0-9][0-9][0-9][0-9]*'
        or message.text glob '*[0-9][0-9][0-9][0-9][0-9][0-9]*'
        or message.text glob '*[0-9][0-9][0-9]-[0-9][0-9][0-9]*'
        or message.text glob '*[0-9][0-9][0-9][0-9][0-9][0-9][0-9]*'
        or message.text glob '*[0-9][0-9][0-9][0-9][0-9][0-9][0-9][0-9]*'
    )
    and message.date > ?1
order by
    message.date desc
limit ?2";

/// Read-only adapter over the message store.
///
/// # Example
///
/// ```no_run
/// use sms_otp::source::SmsSource;
///
/// # async fn example() -> sms_otp::Result<()> {
/// let source = SmsSource::new("/Users/me/Library/Messages/chat.db");
/// let messages = source.fetch_recent(15, 100).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SmsSource {
    db_path: PathBuf,
}

impl SmsSource {
    /// Creates an adapter for the store at `db_path`. Nothing is opened until
    /// the first fetch.
    #[must_use]
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// The configured store path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Fetches recent inbound, digit-bearing messages, newest first.
    ///
    /// This is the pipeline's only suspension point; the SQLite work runs on
    /// the blocking thread pool and the connection is dropped before the
    /// future resolves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccessDenied`] when the store cannot be opened due to
    /// OS permission restrictions, and store/query variants for any other
    /// failure.
    #[instrument(
        name = "SmsSource::fetch_recent",
        skip(self),
        fields(db_path = %self.db_path.display())
    )]
    pub async fn fetch_recent(&self, lookback_minutes: u32, limit: u32) -> Result<Vec<Message>> {
        let path = self.db_path.clone();
        let cutoff = cutoff_apple_ns(Utc::now(), lookback_minutes);

        let messages =
            tokio::task::spawn_blocking(move || fetch_blocking(&path, cutoff, limit))
                .await
                .map_err(|source| Error::FetchTask { source })??;

        debug!(row_count = messages.len(), "fetched recent messages");
        Ok(messages)
    }
}

/// Converts the window start to the store's nanoseconds-since-2001 scale.
///
/// Used with a strict greater-than comparison: a message timestamped exactly
/// at the cutoff is excluded.
fn cutoff_apple_ns(now: DateTime<Utc>, lookback_minutes: u32) -> i64 {
    let window_start = now - chrono::Duration::minutes(i64::from(lookback_minutes));
    (window_start.timestamp() - APPLE_EPOCH_OFFSET_SECS).saturating_mul(1_000_000_000)
}

/// Opens the store read-only and runs the windowed query.
fn fetch_blocking(path: &Path, cutoff_ns: i64, limit: u32) -> Result<Vec<Message>> {
    probe_readable(path)?;

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|source| Error::from_open_failure(path.to_path_buf(), source))?;

    let mut statement = conn
        .prepare(RECENT_MESSAGES_QUERY)
        .map_err(|source| Error::Query { source })?;

    let rows = statement
        .query_map((cutoff_ns, i64::from(limit)), map_row)
        .map_err(|source| Error::Query { source })?;

    let mut messages = Vec::new();
    for row in rows {
        match row {
            Ok(message) => messages.push(message),
            // Malformed rows are logged and skipped rather than failing the
            // whole fetch.
            Err(e) => warn!(error = %e, "failed to read message row, skipping"),
        }
    }

    Ok(messages)
}

/// Maps one query row to a [`Message`].
fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Message> {
    let rowid: i64 = row.get(0)?;
    let date_read: Option<i64> = row.get(1)?;
    let is_read: Option<i64> = row.get(2)?;
    let sender: Option<String> = row.get(3)?;
    let service: Option<String> = row.get(4)?;
    let message_date: Option<String> = row.get(5)?;
    let body: String = row.get(6)?;

    Ok(Message {
        id: rowid.to_string(),
        sender: sender.unwrap_or_default(),
        service: service.unwrap_or_default(),
        received_at: message_date.as_deref().and_then(parse_local_timestamp),
        body,
        read: ReadState::from_store(is_read, date_read),
    })
}

/// Parses the store's local-time `YYYY-MM-DD HH:MM:SS` string; anything else
/// yields `None` and the message sorts as older than any timestamped one.
fn parse_local_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").ok()
}

/// Distinguishes OS permission failures from other open errors before SQLite
/// gets involved, since SQLite folds both into a generic cannot-open code.
fn probe_readable(path: &Path) -> Result<()> {
    match std::fs::File::open(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => Err(Error::AccessDenied {
            path: path.to_path_buf(),
        }),
        // Missing files and the rest fall through to the SQLite open, which
        // reports them with more context.
        Err(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cutoff_boundary_is_exclusive() {
        let now = Utc.with_ymd_and_hms(2022, 8, 2, 22, 15, 0).unwrap();
        let cutoff = cutoff_apple_ns(now, 15);

        // A message exactly 15 minutes old carries this store timestamp and
        // must fail the strict comparison.
        let exactly_window_old =
            (now.timestamp() - 15 * 60 - APPLE_EPOCH_OFFSET_SECS) * 1_000_000_000;
        assert!(!(exactly_window_old > cutoff));

        // One second newer passes.
        let just_inside = exactly_window_old + 1_000_000_000;
        assert!(just_inside > cutoff);
    }

    #[test]
    fn test_cutoff_scales_with_window() {
        let now = Utc.with_ymd_and_hms(2022, 8, 2, 22, 0, 0).unwrap();
        let narrow = cutoff_apple_ns(now, 15);
        let wide = cutoff_apple_ns(now, 60);
        assert!(wide < narrow);
        assert_eq!(narrow - wide, 45 * 60 * 1_000_000_000);
    }

    #[test]
    fn test_parse_local_timestamp() {
        let parsed = parse_local_timestamp("2022-08-02 22:51:48").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M:%S").to_string(), "2022-08-02 22:51:48");

        assert!(parse_local_timestamp("not a date").is_none());
        assert!(parse_local_timestamp("").is_none());
    }

    #[test]
    fn test_probe_missing_file_defers_to_sqlite() {
        // A missing file is not a permission problem; the probe passes and
        // the SQLite open reports it.
        assert!(probe_readable(Path::new("/nonexistent/chat.db")).is_ok());
    }
}
