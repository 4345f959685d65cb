//! Mapping of raw input onto selection intents.
//!
//! [`InputIntentMapper`] decides, for one click or key press, whether the
//! option activates, swallows the input, or leaves it for an ancestor. It
//! never looks at the current selection: re-activating a selected option
//! still asks the parent to select it and the menu to close.

use crate::events::Key;

/// A semantic request produced by user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionIntent {
    /// Ask the parent to select this option.
    RequestSelection,
    /// Ask the parent to deselect this option.
    RequestDeselection,
    /// Ask the enclosing menu to close.
    RequestClose,
}

const ACTIVATION: [SelectionIntent; 2] = [
    SelectionIntent::RequestSelection,
    SelectionIntent::RequestClose,
];

/// What an option does with one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    /// The option was activated; emit [`intents`](Self::intents) in order.
    Activate,
    /// The option is disabled; emit nothing and stop propagation.
    Suppress,
    /// Not ours; emit nothing and let the event propagate.
    Ignore,
}

impl InputDisposition {
    /// The intents to emit, in order.
    pub fn intents(self) -> &'static [SelectionIntent] {
        match self {
            Self::Activate => &ACTIVATION,
            Self::Suppress | Self::Ignore => &[],
        }
    }

    /// Whether the event must be accepted so ancestors do not see it.
    pub fn stops_propagation(self) -> bool {
        matches!(self, Self::Activate | Self::Suppress)
    }
}

/// Converts pointer and keyboard input into selection intents.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputIntentMapper;

impl InputIntentMapper {
    /// A primary-button click on the option.
    pub fn on_click(disabled: bool) -> InputDisposition {
        if disabled {
            InputDisposition::Suppress
        } else {
            InputDisposition::Activate
        }
    }

    /// A key press while the option has focus.
    ///
    /// Only the activation keys act. Navigation, Escape and typeahead
    /// characters are left to the parent list.
    pub fn on_keydown(key: Key, disabled: bool) -> InputDisposition {
        if disabled {
            InputDisposition::Suppress
        } else if key.is_activation() {
            InputDisposition::Activate
        } else {
            InputDisposition::Ignore
        }
    }
}
