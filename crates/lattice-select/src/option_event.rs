//! Outbound events an option raises for its ancestors.
//!
//! Every event bubbles and crosses component boundaries. The parent select
//! (or menu) observes them and owns the actual selection policy.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::events::Key;
use crate::intent::SelectionIntent;

/// A process-unique identifier for an option, used as the event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionId(u64);

impl OptionId {
    /// Allocate a fresh identifier.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "option#{}", self.0)
    }
}

/// Why an option asked its menu to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// The option was clicked.
    ClickSelection,
    /// The option was activated from the keyboard with the given key.
    KeydownSelection(Key),
}

/// The kind of an [`OptionEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionEventKind {
    /// `request-selection`: select this option.
    RequestSelection,
    /// `request-deselection`: deselect this option.
    RequestDeselection,
    /// `close-menu`: close the enclosing menu.
    CloseMenu {
        /// What triggered the close.
        reason: CloseReason,
    },
}

impl OptionEventKind {
    /// The event name as dispatched on the host.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RequestSelection => "request-selection",
            Self::RequestDeselection => "request-deselection",
            Self::CloseMenu { .. } => "close-menu",
        }
    }

    /// Translate an intent, using `reason` for close requests.
    pub fn from_intent(intent: SelectionIntent, reason: CloseReason) -> Self {
        match intent {
            SelectionIntent::RequestSelection => Self::RequestSelection,
            SelectionIntent::RequestDeselection => Self::RequestDeselection,
            SelectionIntent::RequestClose => Self::CloseMenu { reason },
        }
    }
}

/// An event raised by an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionEvent {
    /// What is being requested.
    pub kind: OptionEventKind,
    /// The option that raised the event.
    pub source: OptionId,
}

impl OptionEvent {
    /// Create an event.
    pub fn new(kind: OptionEventKind, source: OptionId) -> Self {
        Self { kind, source }
    }

    /// The event name as dispatched on the host.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Option events always propagate to ancestors.
    pub fn bubbles(&self) -> bool {
        true
    }

    /// Option events always cross component boundaries.
    pub fn composed(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let id = OptionId::next();
        let close = OptionEventKind::CloseMenu {
            reason: CloseReason::ClickSelection,
        };
        assert_eq!(OptionEvent::new(close, id).name(), "close-menu");
        assert_eq!(OptionEventKind::RequestSelection.name(), "request-selection");
        assert_eq!(OptionEventKind::RequestDeselection.name(), "request-deselection");
    }

    #[test]
    fn test_from_intent_carries_reason() {
        let reason = CloseReason::KeydownSelection(Key::Enter);
        assert_eq!(
            OptionEventKind::from_intent(SelectionIntent::RequestClose, reason),
            OptionEventKind::CloseMenu { reason }
        );
        assert_eq!(
            OptionEventKind::from_intent(SelectionIntent::RequestSelection, reason),
            OptionEventKind::RequestSelection
        );
    }

    #[test]
    fn test_option_ids_are_unique() {
        let a = OptionId::next();
        let b = OptionId::next();
        assert_ne!(a, b);
        assert!(b > a);
        assert_eq!(a.to_string(), format!("option#{}", a.0));
    }
}
