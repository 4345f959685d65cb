//! Input event types delivered to an option by its host.
//!
//! Only the two inputs an option reacts to are modelled: a primary-button
//! click on the rendered item and a key press while the item has focus.
//! Both carry an [`EventBase`] whose accepted flag doubles as the
//! "stop propagation" bit: an accepted event must not be re-interpreted by
//! an ancestor.

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };
}

/// Common data for all input events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    /// Whether the event has been accepted (handled).
    accepted: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, preventing further propagation.
    pub fn accept(&mut self) {
        self.accepted = true;
    }
}

/// Keyboard key codes.
///
/// A subset of the physical/logical keys on a keyboard, following the
/// structure of web `KeyboardEvent` values. Keys an option never cares about
/// collapse into [`Key::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete,
    Enter, NumpadEnter, Tab,

    // Whitespace
    Space,

    // Control
    Escape,

    // Unknown/unmapped key
    Unknown(u16),
}

#[rustfmt::skip]
const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

#[rustfmt::skip]
const DIGITS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

impl Key {
    /// Map a DOM `KeyboardEvent.key` string to a key.
    ///
    /// Both `" "` and the legacy `"Spacebar"` / `"Space"` spellings map to
    /// [`Key::Space`]. Single ASCII letters map case-insensitively. Anything
    /// unrecognized becomes `Key::Unknown(0)`.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::Space,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            "Backspace" => Key::Backspace,
            "Delete" | "Del" => Key::Delete,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => {
                        LETTERS[usize::from(c.to_ascii_lowercase() as u8 - b'a')]
                    }
                    (Some(c), None) if c.is_ascii_digit() => DIGITS[usize::from(c as u8 - b'0')],
                    _ => Key::Unknown(0),
                }
            }
        }
    }

    /// Check if this key activates the focused item (Enter or Space).
    ///
    /// The numpad Enter key reports `"Enter"` as its DOM key value, so it
    /// activates as well.
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::NumpadEnter | Key::Space)
    }
}

/// Key press event, sent to the focused option when a key is pressed.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// The text input from this key press (if any).
    pub text: String,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(
        key: Key,
        modifiers: KeyboardModifiers,
        text: impl Into<String>,
        is_repeat: bool,
    ) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
            text: text.into(),
            is_repeat,
        }
    }

    /// Create an unmodified, non-repeat press of `key`.
    pub fn from_key(key: Key) -> Self {
        let text = match key {
            Key::Space => " ".to_string(),
            _ => String::new(),
        };
        Self::new(key, KeyboardModifiers::NONE, text, false)
    }

    /// Create a press from a DOM `KeyboardEvent.key` string.
    pub fn from_dom_key(key: &str) -> Self {
        let mut event = Self::from_key(Key::from_dom_key(key));
        if key.chars().count() == 1 {
            event.text = key.to_string();
        }
        event
    }
}

/// Click event, sent when the rendered item is activated with the primary
/// pointer button.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickEvent {
    /// Base event data.
    pub base: EventBase,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}
