//! View actions: what each screen does when the user acts, minus rendering.
//!
//! The yew components in `ui` own the state handles and call into these
//! functions; everything here runs (and is tested) off-browser.

pub mod auth;
pub mod detail;
pub mod expense_form;
pub mod goals;
pub mod summary;

use std::cell::Cell;

/// Identifies one load issued by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Per-view request sequence. A response is applied only if its ticket is
/// still the latest one issued, so a slow older response cannot overwrite a
/// newer one.
#[derive(Debug, Default)]
pub struct RequestSeq {
    latest: Cell<u64>,
}

impl RequestSeq {
    pub fn issue(&self) -> Ticket {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }

    /// Hands `value` to `apply` only when `ticket` is current. Returns whether
    /// it was applied.
    pub fn apply_if_current<V>(&self, ticket: Ticket, value: V, apply: impl FnOnce(V)) -> bool {
        if self.is_current(ticket) {
            apply(value);
            true
        } else {
            log::debug!("dropping stale response for ticket {}", ticket.0);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let seq = RequestSeq::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn stale_response_is_not_applied() {
        let seq = RequestSeq::default();
        let mut shown = Vec::new();
        let older = seq.issue();
        let newer = seq.issue();

        assert!(seq.apply_if_current(newer, "march", |v| shown.push(v)));
        assert!(!seq.apply_if_current(older, "february", |v| shown.push(v)));
        assert_eq!(shown, vec!["march"]);
    }
}
