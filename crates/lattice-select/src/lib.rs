//! Lattice Select - a headless select option.
//!
//! This crate implements the behavior of one selectable entry in a
//! dropdown/listbox, independent of any rendering:
//!
//! - **Text resolution**: display and typeahead text, from explicit
//!   overrides or from the content projected into the `headline` slot
//! - **Accessibility**: role, `aria-selected`, `aria-disabled` and tab
//!   reachability, plus an AccessKit node
//! - **Input intents**: clicks and Enter/Space become `request-selection`
//!   followed by `close-menu`; disabled options swallow all input
//!
//! The parent select owns the selection policy. It listens to each option's
//! [`events`](SelectOption::events) and confirms with
//! [`set_selected`](SelectOption::set_selected).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use lattice_select::{ClickEvent, ContentNode, SelectOption};
//!
//! let option = SelectOption::new().with_headline([ContentNode::text("Apple")]);
//! assert_eq!(option.display_text(), "Apple");
//!
//! let names = Arc::new(Mutex::new(Vec::new()));
//! let names_clone = names.clone();
//! option.events().connect(move |event| names_clone.lock().push(event.name()));
//!
//! option.handle_click(&mut ClickEvent::default());
//! assert_eq!(*names.lock(), ["request-selection", "close-menu"]);
//! ```

pub mod accessibility;
mod attributes;
pub mod content;
mod controller;
mod error;
pub mod events;
pub mod intent;
mod option;
mod option_event;
pub mod text;

pub use accessibility::{AccessibleRole, AriaAttributes, AriaState, RoleContext, compute_aria};
pub use attributes::{AttributeName, OptionAttributes};
pub use content::{ContentNode, HeadlineSlot, SlotContentProvider, SlotContentSnapshot};
pub use controller::{SelectOptionConfig, SelectOptionController};
pub use error::{OptionError, Result};
pub use events::{ClickEvent, EventBase, Key, KeyPressEvent, KeyboardModifiers};
pub use intent::{InputDisposition, InputIntentMapper, SelectionIntent};
pub use option::SelectOption;
pub use option_event::{CloseReason, OptionEvent, OptionEventKind, OptionId};
pub use text::{ResolvedText, TextChannel, TextResolver};

pub use lattice_select_core::{ConnectionGuard, ConnectionId, Property, Signal};
