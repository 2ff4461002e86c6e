//! OTP detection over free-form message text.
//!
//! The classifier is a pure function: message body in, [`Classification`] out.
//! Detection runs an ordered table of named patterns against the text and the
//! first pattern that matches wins. Several patterns key on overlapping
//! surface ("code is ", "code is:", "code: "), so priority order is part of
//! the contract, not an implementation detail.
//!
//! # Example
//!
//! ```
//! use sms_otp::classifier::classify;
//!
//! let result = classify("Your code is 1234, see http://example.com/x?y=1");
//! assert!(result.found);
//! assert_eq!(result.code, "1234");
//!
//! let result = classify("Hello, how are you?");
//! assert!(!result.found);
//! assert!(result.code.is_empty());
//! ```

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// URL-shaped substring remover, applied once before pattern evaluation.
///
/// Only the first URL in the body is stripped; multiple URLs in one message
/// are an accepted limitation of the detector, not a correctness requirement.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b((https?|ftp|file)://|www\.)[-A-Z0-9+&@#/%?=~_|$!:,.;]*[A-Z0-9+&@#/%=~_|$]")
        .expect("valid URL regex")
});

/// The built-in pattern table, compiled once at first use.
static DEFAULT_PATTERNS: LazyLock<PatternSet> = LazyLock::new(PatternSet::with_defaults);

/// Outcome of classifying one message body.
///
/// `code` holds the extracted digits when `found` is true and is empty
/// otherwise. Classification is cheap, side-effect-free and idempotent, so
/// callers may recompute it on demand (the list pass and the copy action both
/// do).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Whether a usable passcode was detected.
    pub found: bool,
    /// The extracted digits; empty when `found` is false.
    pub code: String,
}

impl Classification {
    /// A negative result: nothing detected, empty code.
    #[must_use]
    pub fn none() -> Self {
        Self {
            found: false,
            code: String::new(),
        }
    }

    /// A positive result carrying the extracted code.
    #[must_use]
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            found: true,
            code: code.into(),
        }
    }

    /// Returns the code as `Some(&str)` when found, `None` otherwise.
    #[must_use]
    pub fn as_code(&self) -> Option<&str> {
        self.found.then_some(self.code.as_str())
    }
}

/// One entry of the pattern table.
///
/// A pattern with a capture group extracts group 1 as the code. A pattern
/// without one (e.g. the bare `G-<digits>` sender format) can detect the
/// shape but yields no code; see [`PatternSet::classify`] for how that case
/// terminates the scan.
#[derive(Debug, Clone)]
pub struct OtpPattern {
    id: u8,
    regex: Regex,
    description: String,
}

impl OtpPattern {
    /// Compiles a new pattern table entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn new(
        id: u8,
        pattern: &str,
        description: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        Ok(Self {
            id,
            regex,
            description: description.into(),
        })
    }

    /// The priority id of this pattern within its table.
    #[must_use]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Human-readable description, used in logging.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// An ordered, immutable-after-setup table of OTP patterns.
///
/// The default table covers the common "your code is NNNN" phrasings plus a
/// French variant; it is deliberately a flat, linearly-scanned list rather
/// than a compiled trie, since a scan handles at most 100 messages per
/// invocation and the flat table stays auditable and extensible.
///
/// # Example
///
/// ```
/// use sms_otp::classifier::{OtpPattern, PatternSet};
///
/// let mut patterns = PatternSet::with_defaults();
/// patterns.register(
///     OtpPattern::new(10, r"^.*PIN (\d+).*$", "PIN NNNN").unwrap(),
/// );
///
/// assert!(patterns.classify("Your PIN 5566 expires soon").found);
/// ```
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<OtpPattern>,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl PatternSet {
    /// Creates an empty pattern table.
    ///
    /// An empty table classifies everything as not found. Use
    /// [`Self::with_defaults`] for the built-in patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Creates the built-in table, in priority order.
    ///
    /// # Panics
    ///
    /// Panics if a built-in pattern fails to compile, which would be a bug.
    #[must_use]
    pub fn with_defaults() -> Self {
        let table = [
            (1, r"^.*code is (\d+).*$", "Your code is NNNN"),
            (2, r"^.*code is:(\d+).*$", "Your code is:NNNN"),
            (3, r"^G-\d+$", "G-NNNN"),
            (4, r"^.*code:(\d+).*$", "code:NNNN"),
            (5, r"^.*verification code (\d+).*$", "verification code NNNN"),
            (
                6,
                r"^.*One time password to access your account is (\d+).*$",
                "One time password to access your account is NNNN",
            ),
            (7, r"^.*code: (\d+).*$", "code: NNNN"),
            (
                8,
                r"^.*?(\d+) is your Microsoft account verification.*$",
                "NNNN is your Microsoft account verification code",
            ),
            (
                9,
                r"^.*code de vérification est (\d+).*$",
                "code de vérification est NNNN",
            ),
        ];

        let patterns = table
            .into_iter()
            .map(|(id, pattern, description)| {
                OtpPattern::new(id, pattern, description).expect("valid built-in pattern")
            })
            .collect();

        Self { patterns }
    }

    /// Appends a pattern at the end of the table (lowest priority).
    pub fn register(&mut self, pattern: OtpPattern) {
        self.patterns.push(pattern);
    }

    /// Returns the patterns in priority order.
    #[must_use]
    pub fn patterns(&self) -> &[OtpPattern] {
        &self.patterns
    }

    /// Classifies a message body against this table.
    ///
    /// Steps: strip the first URL-shaped substring, trim whitespace, then
    /// evaluate patterns in order. The first matching pattern wins. Never
    /// fails: malformed or empty input yields a negative result.
    #[must_use]
    pub fn classify(&self, body: &str) -> Classification {
        let stripped = URL_RE.replace(body, "");
        let text = stripped.trim();

        if text.is_empty() {
            debug!("skipping empty message body");
            return Classification::none();
        }

        for pattern in &self.patterns {
            let Some(captures) = pattern.regex.captures(text) else {
                continue;
            };

            debug!(
                pattern_id = pattern.id,
                description = %pattern.description,
                "pattern matched"
            );

            return match captures.get(1) {
                Some(code) => Classification::with_code(code.as_str()),
                // A capture-less pattern recognizes the shape but carries no
                // extractable digits. Terminal: lower-priority patterns are
                // not consulted and the message reports no code.
                None => Classification::none(),
            };
        }

        Classification::none()
    }
}

/// Classifies a message body against the built-in pattern table.
///
/// Convenience wrapper over [`PatternSet::classify`] using a process-wide
/// table compiled once at first use.
#[must_use]
pub fn classify(body: &str) -> Classification {
    DEFAULT_PATTERNS.classify(body)
}
