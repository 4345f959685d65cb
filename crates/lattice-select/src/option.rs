//! The select option host element.
//!
//! [`SelectOption`] is the thin element around a [`SelectOptionController`]:
//! it owns the `headline` slot, reflects string attributes onto the
//! controller, wires input to it and exposes the outbound events for the
//! parent to observe.
//!
//! # Example
//!
//! ```
//! use lattice_select::{ContentNode, KeyPressEvent, SelectOption};
//!
//! let option = SelectOption::new()
//!     .with_headline([ContentNode::text("Apple")])
//!     .with_value("apple");
//!
//! option.events().connect(|event| println!("{} from {}", event.name(), event.source));
//! option.handle_key_press(&mut KeyPressEvent::from_dom_key("Enter"));
//!
//! option.set_attribute("display-text", "Green apple").unwrap();
//! assert_eq!(option.display_text(), "Green apple");
//! ```

use lattice_select_core::Signal;
use lattice_select_core::logging::targets;

use crate::accessibility::{AriaAttributes, RoleContext};
use crate::attributes::{AttributeName, OptionAttributes};
use crate::content::{ContentNode, HeadlineSlot};
use crate::controller::{SelectOptionConfig, SelectOptionController};
use crate::error::{OptionError, Result};
use crate::events::{ClickEvent, KeyPressEvent};
use crate::option_event::{OptionEvent, OptionId};

/// A selectable entry in a select's popup list.
///
/// Attributes:
///
/// | Attribute        | Kind    | Effect                                            |
/// |------------------|---------|---------------------------------------------------|
/// | `disabled`       | boolean | non-interactive, out of the tab order             |
/// | `selected`       | boolean | parent-confirmed selection (owned by the parent)  |
/// | `value`          | string  | opaque form value                                 |
/// | `typeahead-text` | string  | overrides the typeahead text                      |
/// | `display-text`   | string  | overrides the display text                        |
/// | `md-menu-item`   | boolean | read-only; identifies the element as a menu item  |
#[derive(Debug)]
pub struct SelectOption {
    headline: HeadlineSlot,
    controller: SelectOptionController,
}

impl Default for SelectOption {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectOption {
    /// Create an enabled, unselected option with an empty headline.
    pub fn new() -> Self {
        Self::build(OptionAttributes::default(), RoleContext::default())
    }

    /// Create an option from declared attributes.
    pub fn from_attributes(attributes: OptionAttributes) -> Self {
        Self::build(attributes, RoleContext::default())
    }

    /// Create an option with an explicit role context.
    pub fn build(attributes: OptionAttributes, role_context: RoleContext) -> Self {
        let headline = HeadlineSlot::new();
        let config = SelectOptionConfig::new(headline.provider()).with_role_context(role_context);
        let mut controller = SelectOptionController::new(config, attributes);
        controller.observe_slot(headline.changed());
        Self {
            headline,
            controller,
        }
    }

    /// Set the headline content.
    pub fn with_headline(self, nodes: impl IntoIterator<Item = ContentNode>) -> Self {
        self.headline.assign(nodes);
        self
    }

    /// Set the form value.
    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.controller.set_value(value);
        self
    }

    /// Set the disabled state.
    pub fn with_disabled(self, disabled: bool) -> Self {
        self.controller.set_disabled(disabled);
        self
    }

    /// The identity carried by this option's events.
    pub fn id(&self) -> OptionId {
        self.controller.id()
    }

    /// The behavior controller.
    pub fn controller(&self) -> &SelectOptionController {
        &self.controller
    }

    /// The `headline` slot.
    pub fn headline(&self) -> &HeadlineSlot {
        &self.headline
    }

    /// Outbound events for the parent.
    pub fn events(&self) -> &Signal<OptionEvent> {
        &self.controller.events
    }

    /// This element always identifies itself to its parent list as a menu
    /// item, whatever accessible role it presents.
    pub fn is_menu_item(&self) -> bool {
        true
    }

    /// Detach from the document: release the slot observation.
    pub fn disconnect(&mut self) {
        self.controller.disconnect();
    }

    // =========================================================================
    // Convenience accessors
    // =========================================================================

    /// The resolved display text.
    pub fn display_text(&self) -> String {
        self.controller.display_text()
    }

    /// The resolved typeahead text.
    pub fn typeahead_text(&self) -> String {
        self.controller.typeahead_text()
    }

    /// Whether the option is disabled.
    pub fn is_disabled(&self) -> bool {
        self.controller.is_disabled()
    }

    /// The parent-confirmed selection.
    pub fn is_selected(&self) -> bool {
        self.controller.is_selected()
    }

    /// Record the parent's selection decision.
    pub fn set_selected(&self, selected: bool) {
        self.controller.set_selected(selected);
    }

    /// The opaque form value.
    pub fn value(&self) -> String {
        self.controller.value()
    }

    /// The current accessibility attributes.
    pub fn aria(&self) -> AriaAttributes {
        self.controller.aria()
    }

    // =========================================================================
    // Attribute reflection
    // =========================================================================

    /// Set an attribute from its string form.
    ///
    /// Boolean attributes become `true` by presence, whatever `value` holds.
    pub fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        let attr = parse_attribute(name)?;
        match attr {
            AttributeName::Disabled => self.controller.set_disabled(true),
            AttributeName::Selected => self.controller.set_selected(true),
            AttributeName::Value => self.controller.set_value(value),
            AttributeName::TypeaheadText => self.controller.set_typeahead_text(value),
            AttributeName::DisplayText => self.controller.set_display_text(value),
            AttributeName::MenuItem => return Err(read_only(attr)),
        }
        Ok(())
    }

    /// Remove an attribute.
    ///
    /// Booleans become `false`, overrides are cleared so the text follows the
    /// slot again, and `value` resets to the empty string.
    pub fn remove_attribute(&self, name: &str) -> Result<()> {
        let attr = parse_attribute(name)?;
        match attr {
            AttributeName::Disabled => self.controller.set_disabled(false),
            AttributeName::Selected => self.controller.set_selected(false),
            AttributeName::Value => self.controller.set_value(String::new()),
            AttributeName::TypeaheadText => self.controller.clear_typeahead_text(),
            AttributeName::DisplayText => self.controller.clear_display_text(),
            AttributeName::MenuItem => return Err(read_only(attr)),
        }
        Ok(())
    }

    /// Read an attribute's reflected value.
    ///
    /// Present booleans read as the empty string. Unknown names and absent
    /// attributes read as `None`.
    pub fn attribute(&self, name: &str) -> Option<String> {
        let present = |on: bool| on.then(String::new);
        match name.parse::<AttributeName>().ok()? {
            AttributeName::Disabled => present(self.controller.is_disabled()),
            AttributeName::Selected => present(self.controller.is_selected()),
            AttributeName::Value => Some(self.controller.value()),
            AttributeName::TypeaheadText => self.controller.typeahead_text_override(),
            AttributeName::DisplayText => self.controller.display_text_override(),
            AttributeName::MenuItem => present(self.is_menu_item()),
        }
    }

    /// The current attribute set.
    pub fn attributes(&self) -> OptionAttributes {
        OptionAttributes {
            disabled: self.controller.is_disabled(),
            selected: self.controller.is_selected(),
            value: self.controller.value(),
            typeahead_text: self.controller.typeahead_text_override(),
            display_text: self.controller.display_text_override(),
        }
    }

    // =========================================================================
    // Input and accessibility
    // =========================================================================

    /// Forward a click on the rendered item.
    pub fn handle_click(&self, event: &mut ClickEvent) {
        self.controller.on_click(event);
    }

    /// Forward a key press on the rendered item.
    pub fn handle_key_press(&self, event: &mut KeyPressEvent) {
        self.controller.on_keydown(event);
    }

    /// Build the AccessKit node for this option, labelled by its display text.
    pub fn accessible_node(&self) -> accesskit::Node {
        self.aria().to_accesskit_node(&self.display_text())
    }
}

fn parse_attribute(name: &str) -> Result<AttributeName> {
    name.parse::<AttributeName>().inspect_err(|err| {
        tracing::warn!(target: targets::OPTION, %err, "attribute rejected");
    })
}

fn read_only(attr: AttributeName) -> OptionError {
    let err = OptionError::ReadOnlyAttribute(attr.as_str());
    tracing::warn!(target: targets::OPTION, %err, "attribute rejected");
    err
}

static_assertions::assert_impl_all!(SelectOption: Send, Sync);
