//! Presentation contract: list projections and user actions.
//!
//! The actual list rendering, search box and toast display belong to an
//! external presentation layer; this module defines what that layer consumes
//! (a [`ListEntry`] per classified message) and the two actions it can invoke
//! (copy the passcode, mark a message unread). Clipboard and notifications
//! are side-effect sinks behind traits so tests and alternative frontends can
//! substitute their own.

use crate::classifier::PatternSet;
use crate::error::{Error, Result};
use crate::message::{Message, ReadState};
use crate::pipeline::ClassifiedMessage;
use chrono::NaiveDateTime;
use tracing::debug;

// ─────────────────────────────────────────────────────────────────────────────
// List projection
// ─────────────────────────────────────────────────────────────────────────────

/// Icon slot of a list row, derived from read state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryIcon {
    /// Unread message.
    ClosedEnvelope,
    /// Read message.
    OpenEnvelope,
}

impl From<ReadState> for EntryIcon {
    fn from(state: ReadState) -> Self {
        if state.is_unread() {
            Self::ClosedEnvelope
        } else {
            Self::OpenEnvelope
        }
    }
}

/// Detail pane fields for one classified message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDetail {
    /// Originator display string.
    pub sender: String,
    /// Receive time, if known.
    pub received_at: Option<NaiveDateTime>,
    /// Read status.
    pub read_status: ReadState,
    /// The detected passcode.
    pub code: String,
}

/// One renderable list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Row title: the message body.
    pub title: String,
    /// Row icon, from read state.
    pub icon: EntryIcon,
    /// Row accessory: the receive timestamp.
    pub accessory: Option<NaiveDateTime>,
    /// Detail pane fields.
    pub detail: EntryDetail,
}

/// Projects a pipeline entry into its list row.
#[must_use]
pub fn list_entry(entry: &ClassifiedMessage) -> ListEntry {
    ListEntry {
        title: entry.message.body.clone(),
        icon: entry.message.read.into(),
        accessory: entry.message.received_at,
        detail: EntryDetail {
            sender: entry.message.sender.clone(),
            received_at: entry.message.received_at,
            read_status: entry.message.read,
            code: entry.classification.code.clone(),
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Side-effect sinks
// ─────────────────────────────────────────────────────────────────────────────

/// Destination for extracted passcodes.
pub trait ClipboardSink {
    /// Writes `text` to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error when the clipboard is unavailable or the write fails.
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard, backed by `arboard`.
///
/// On Linux, clipboard contents persist only while the process is running.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// Creates a system clipboard sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|source| Error::Clipboard { source })?;
        clipboard
            .set_text(text)
            .map_err(|source| Error::Clipboard { source })?;
        Ok(())
    }
}

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStyle {
    /// The action succeeded.
    Success,
    /// The action failed.
    Failure,
}

/// One user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub style: NotificationStyle,
    /// Short headline.
    pub title: String,
    /// Longer explanation.
    pub message: String,
}

impl Notification {
    /// A success notification.
    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: NotificationStyle::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    /// A failure notification.
    #[must_use]
    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: NotificationStyle::Failure,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Destination for user notifications (toasts).
pub trait NotificationSink {
    /// Delivers one notification.
    fn notify(&mut self, notification: Notification);
}

// ─────────────────────────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────────────────────────

/// The copy-OTP action.
///
/// Classifies the message on demand, writes the extracted code to the
/// clipboard sink and notifies the user either way. Returns the copied code
/// on success.
///
/// # Errors
///
/// Returns [`Error::NoCode`] when the message carries no detectable code, or
/// a clipboard error when the write fails; both paths also emit a failure
/// notification.
pub fn copy_otp(
    message: &Message,
    patterns: &PatternSet,
    clipboard: &mut dyn ClipboardSink,
    notifier: &mut dyn NotificationSink,
) -> Result<String> {
    let classification = patterns.classify(&message.body);

    let Some(code) = classification.as_code() else {
        notifier.notify(Notification::failure(
            "No passcode found",
            "No OTP was detected in this message.",
        ));
        return Err(Error::NoCode);
    };

    match clipboard.copy_text(code) {
        Ok(()) => {
            notifier.notify(Notification::success(
                "Copied",
                format!("Copied code {code} to the clipboard."),
            ));
            Ok(code.to_string())
        }
        Err(e) => {
            notifier.notify(Notification::failure(
                "Copy failed",
                "The passcode could not be written to the clipboard.",
            ));
            Err(e)
        }
    }
}

/// The mark-unread action.
///
/// The store is read-only from this system's perspective, so this only
/// acknowledges the request; no message state is mutated.
pub fn mark_unread(message: &Message, notifier: &mut dyn NotificationSink) {
    debug!(id = %message.id, "mark-unread requested");
    notifier.notify(Notification::success(
        "Marked unread",
        format!("Message {} marked as unread.", message.id),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classification;
    use chrono::NaiveDate;

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Option<String>,
        fail: bool,
    }

    impl ClipboardSink for MemoryClipboard {
        fn copy_text(&mut self, text: &str) -> Result<()> {
            if self.fail {
                return Err(Error::Clipboard {
                    source: arboard::Error::ClipboardNotSupported,
                });
            }
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notifications: Vec<Notification>,
    }

    impl NotificationSink for RecordingNotifier {
        fn notify(&mut self, notification: Notification) {
            self.notifications.push(notification);
        }
    }

    fn test_message(body: &str) -> Message {
        Message {
            id: "10739".to_string(),
            sender: "242226".to_string(),
            service: "SMS".to_string(),
            received_at: NaiveDate::from_ymd_opt(2022, 8, 2)
                .unwrap()
                .and_hms_opt(22, 51, 48),
            body: body.to_string(),
            read: ReadState::Unread,
        }
    }

    #[test]
    fn test_copy_otp_success() {
        let patterns = PatternSet::with_defaults();
        let mut clipboard = MemoryClipboard::default();
        let mut notifier = RecordingNotifier::default();

        let code = copy_otp(
            &test_message("Dipak, Your OTP code is 3245."),
            &patterns,
            &mut clipboard,
            &mut notifier,
        )
        .unwrap();

        assert_eq!(code, "3245");
        assert_eq!(clipboard.contents.as_deref(), Some("3245"));
        assert_eq!(notifier.notifications.len(), 1);
        assert_eq!(
            notifier.notifications[0].style,
            NotificationStyle::Success
        );
    }

    #[test]
    fn test_copy_otp_no_code() {
        let patterns = PatternSet::with_defaults();
        let mut clipboard = MemoryClipboard::default();
        let mut notifier = RecordingNotifier::default();

        let err = copy_otp(
            &test_message("Hello, how are you?"),
            &patterns,
            &mut clipboard,
            &mut notifier,
        )
        .unwrap_err();

        assert!(matches!(err, Error::NoCode));
        assert!(clipboard.contents.is_none());
        assert_eq!(
            notifier.notifications[0].style,
            NotificationStyle::Failure
        );
    }

    #[test]
    fn test_copy_otp_clipboard_failure_notifies() {
        let patterns = PatternSet::with_defaults();
        let mut clipboard = MemoryClipboard {
            fail: true,
            ..MemoryClipboard::default()
        };
        let mut notifier = RecordingNotifier::default();

        let result = copy_otp(
            &test_message("code: 7777"),
            &patterns,
            &mut clipboard,
            &mut notifier,
        );

        assert!(result.is_err());
        assert_eq!(
            notifier.notifications[0].style,
            NotificationStyle::Failure
        );
    }

    #[test]
    fn test_mark_unread_is_notification_only() {
        let message = test_message("code: 1234");
        let mut notifier = RecordingNotifier::default();

        mark_unread(&message, &mut notifier);

        assert_eq!(notifier.notifications.len(), 1);
        assert!(notifier.notifications[0].message.contains("10739"));
    }

    #[test]
    fn test_list_entry_projection() {
        let message = test_message("Your code is 9999.");
        let entry = ClassifiedMessage {
            classification: Classification::with_code("9999"),
            message,
        };

        let row = list_entry(&entry);
        assert_eq!(row.title, "Your code is 9999.");
        assert_eq!(row.icon, EntryIcon::ClosedEnvelope);
        assert!(row.accessory.is_some());
        assert_eq!(row.detail.sender, "242226");
        assert_eq!(row.detail.code, "9999");
        assert_eq!(row.detail.read_status, ReadState::Unread);
    }

    #[test]
    fn test_icon_from_read_state() {
        assert_eq!(EntryIcon::from(ReadState::Unread), EntryIcon::ClosedEnvelope);
        assert_eq!(EntryIcon::from(ReadState::Read), EntryIcon::OpenEnvelope);
        assert_eq!(EntryIcon::from(ReadState::Unknown), EntryIcon::OpenEnvelope);
    }
}
