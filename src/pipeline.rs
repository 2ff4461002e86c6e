//! Record pipeline: filter, de-duplicate and order classified messages.
//!
//! One pipeline pass takes the raw fetch result and produces the list the
//! presentation layer renders: only messages with a detected code, each id at
//! most once, most recent first. Classification results are cached in a
//! pass-scoped map so the classifier runs once per message and the filter and
//! display steps cannot disagree; the map is dropped with the pass, never
//! shared across fetches.

use crate::classifier::{Classification, PatternSet};
use crate::message::Message;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// A message paired with its classification for one rendering pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedMessage {
    /// The source message.
    pub message: Message,
    /// The classification computed for this pass; `found` is always true for
    /// pipeline output.
    pub classification: Classification,
}

/// Runs one pipeline pass over a fetch result.
///
/// Duplicated ids keep their first occurrence; messages without a detected
/// code are dropped; output is ordered by receive time descending with
/// missing timestamps last. The sort is stable, so ties preserve relative
/// input order.
#[must_use]
pub fn classify_messages(messages: Vec<Message>, patterns: &PatternSet) -> Vec<ClassifiedMessage> {
    // Pass-scoped classification cache, keyed by message id.
    let mut cache: HashMap<String, Classification> = HashMap::with_capacity(messages.len());
    let mut entries = Vec::new();

    for message in messages {
        if cache.contains_key(&message.id) {
            debug!(id = %message.id, "duplicate message id skipped");
            continue;
        }

        let classification = patterns.classify(&message.body);
        debug!(
            id = %message.id,
            found = classification.found,
            code = %classification.code,
            "classified message"
        );
        cache.insert(message.id.clone(), classification.clone());

        if classification.found {
            entries.push(ClassifiedMessage {
                message,
                classification,
            });
        }
    }

    entries.sort_by(|a, b| compare_recency(&a.message, &b.message));
    entries
}

/// Total-order comparator for descending recency.
///
/// Missing timestamps always sort last, never interleaved, so the ordering is
/// transitive regardless of input arrangement.
fn compare_recency(a: &Message, b: &Message) -> Ordering {
    match (a.received_at, b.received_at) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
