//! Request lifecycle shared by both controllers.
//!
//! Each controller owns one [`RequestSlot`]: a request may only begin while the
//! slot is idle, and only the response carrying the pending id can end it.
//! Responses for any other id (a cleared conversation, a superseded job) are
//! dropped by the caller without touching state.

use crate::RequestFailure;

pub type ExchangeId = u64;
pub type JobId = u64;

pub const QUESTION_FAILURE_TEXT: &str =
    "❌ Sorry, there was an error processing your request. Please try again.";
pub const INDEXING_IN_PROGRESS_TEXT: &str = "⏳ Indexing in progress...";
pub const INDEXING_FAILURE_TEXT: &str = "❌ Indexing failed. Please check the URL and try again.";
pub const INDEXING_SUCCESS_PREFIX: &str = "✅ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSlot<Id> {
    Idle,
    Pending(Id),
}

impl<Id> Default for RequestSlot<Id> {
    fn default() -> Self {
        RequestSlot::Idle
    }
}

impl<Id: Copy + PartialEq> RequestSlot<Id> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestSlot::Pending(_))
    }

    pub fn pending_id(&self) -> Option<Id> {
        match self {
            RequestSlot::Pending(id) => Some(*id),
            RequestSlot::Idle => None,
        }
    }

    /// Occupies the slot. Returns `false` and leaves the slot alone if a
    /// request is already pending.
    pub fn begin(&mut self, id: Id) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = RequestSlot::Pending(id);
        true
    }

    /// Frees the slot if `id` is the pending request.
    pub fn complete(&mut self, id: Id) -> bool {
        match self {
            RequestSlot::Pending(current) if *current == id => {
                *self = RequestSlot::Idle;
                true
            }
            _ => false,
        }
    }

    /// Frees the slot unconditionally; the in-flight response becomes stale.
    pub fn release(&mut self) {
        *self = RequestSlot::Idle;
    }
}

/// Monotonic id source. The first id handed out is 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub fn next_id(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    pub fn last(&self) -> u64 {
        self.last
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

/// Terminal state of one request: the user-facing text and, on success, the
/// reply it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled<T> {
    pub outcome: Outcome,
    pub text: String,
    pub value: Option<T>,
}

/// Folds a request result into its single terminal transition.
///
/// Failure detail is never shown to the user; `failure_text` replaces it.
pub fn settle<T>(
    result: Result<T, RequestFailure>,
    success_text: impl FnOnce(&T) -> String,
    failure_text: &str,
) -> Settled<T> {
    match result {
        Ok(value) => Settled {
            outcome: Outcome::Succeeded,
            text: success_text(&value),
            value: Some(value),
        },
        Err(_) => Settled {
            outcome: Outcome::Failed,
            text: failure_text.to_string(),
            value: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_rejects_second_begin() {
        let mut slot = RequestSlot::default();
        assert!(slot.begin(1));
        assert!(!slot.begin(2));
        assert_eq!(slot.pending_id(), Some(1));
    }

    #[test]
    fn slot_completes_only_matching_id() {
        let mut slot = RequestSlot::default();
        slot.begin(4);
        assert!(!slot.complete(3));
        assert!(slot.is_pending());
        assert!(slot.complete(4));
        assert!(!slot.is_pending());
        assert!(!slot.complete(4));
    }

    #[test]
    fn released_slot_ignores_late_completion() {
        let mut slot = RequestSlot::default();
        slot.begin(1);
        slot.release();
        assert!(!slot.complete(1));
        assert!(slot.begin(2));
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut ids = IdSequence::default();
        assert_eq!(ids.last(), 0);
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
    }

    #[test]
    fn settle_hides_failure_detail() {
        let settled: Settled<String> = settle(
            Err(RequestFailure::new("connection refused")),
            |value| value.clone(),
            "failed",
        );
        assert_eq!(settled.outcome, Outcome::Failed);
        assert_eq!(settled.text, "failed");
        assert!(settled.value.is_none());
    }

    #[test]
    fn settle_derives_success_text() {
        let settled = settle(Ok(2_u32), |value| format!("got {value}"), "failed");
        assert_eq!(settled.outcome, Outcome::Succeeded);
        assert_eq!(settled.text, "got 2");
        assert_eq!(settled.value, Some(2));
    }
}
