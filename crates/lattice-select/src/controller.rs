//! The select option behavior controller.
//!
//! [`SelectOptionController`] ties together text resolution, accessibility
//! state and input mapping for one option. The host element owns it, forwards
//! attribute changes and input to it, and re-dispatches whatever it emits on
//! [`events`](SelectOptionController::events).
//!
//! # Selection ownership
//!
//! The controller never selects itself. Activation only *requests*
//! selection; the parent decides (single- or multi-select) and confirms by
//! calling [`set_selected`](SelectOptionController::set_selected). The local
//! `selected` flag is a cache of that confirmation.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use lattice_select::{
//!     ClickEvent, ContentNode, OptionAttributes, SelectOptionConfig, SelectOptionController,
//! };
//!
//! let controller = SelectOptionController::new(
//!     SelectOptionConfig::new(|| vec![ContentNode::text("Apple")]),
//!     OptionAttributes::default(),
//! );
//! assert_eq!(controller.display_text(), "Apple");
//!
//! let names = Arc::new(Mutex::new(Vec::new()));
//! let names_clone = names.clone();
//! controller.events.connect(move |event| names_clone.lock().push(event.name()));
//!
//! controller.on_click(&mut ClickEvent::default());
//! assert_eq!(*names.lock(), ["request-selection", "close-menu"]);
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use lattice_select_core::logging::{span_names, targets};
use lattice_select_core::{ConnectionGuard, Property, Signal};
use parking_lot::Mutex;

use crate::accessibility::{AccessibleRole, AriaAttributes, AriaState, RoleContext, compute_aria};
use crate::attributes::OptionAttributes;
use crate::content::SlotContentProvider;
use crate::events::{ClickEvent, EventBase, KeyPressEvent};
use crate::intent::{InputDisposition, InputIntentMapper, SelectionIntent};
use crate::option_event::{CloseReason, OptionEvent, OptionEventKind, OptionId};
use crate::text::{ResolvedText, TextChannel};

// ============================================================================
// Configuration
// ============================================================================

/// Construction-time configuration for a [`SelectOptionController`].
pub struct SelectOptionConfig {
    slot_content: Box<dyn SlotContentProvider>,
    role_context: RoleContext,
}

impl SelectOptionConfig {
    /// Configure with the capability to read the `headline` slot.
    pub fn new(slot_content: impl SlotContentProvider + 'static) -> Self {
        Self {
            slot_content: Box::new(slot_content),
            role_context: RoleContext::default(),
        }
    }

    /// Set the accessible role context.
    pub fn with_role_context(mut self, role_context: RoleContext) -> Self {
        self.role_context = role_context;
        self
    }
}

impl fmt::Debug for SelectOptionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectOptionConfig")
            .field("role_context", &self.role_context)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Text state
// ============================================================================

/// Text channels plus the provider they fall back to.
///
/// Shared with the slot subscription, which only holds a weak reference.
struct TextState {
    slot_content: Box<dyn SlotContentProvider>,
    display: Mutex<ResolvedText>,
    typeahead: Mutex<ResolvedText>,
    display_text_changed: Signal<String>,
    typeahead_text_changed: Signal<String>,
}

impl TextState {
    fn new(slot_content: Box<dyn SlotContentProvider>) -> Self {
        let snapshot = slot_content.slot_content();
        Self {
            display: Mutex::new(ResolvedText::new(TextChannel::Display, &snapshot)),
            typeahead: Mutex::new(ResolvedText::new(TextChannel::Typeahead, &snapshot)),
            slot_content,
            display_text_changed: Signal::new(),
            typeahead_text_changed: Signal::new(),
        }
    }

    fn channel(&self, channel: TextChannel) -> (&Mutex<ResolvedText>, &Signal<String>) {
        match channel {
            TextChannel::Display => (&self.display, &self.display_text_changed),
            TextChannel::Typeahead => (&self.typeahead, &self.typeahead_text_changed),
        }
    }

    fn get(&self, channel: TextChannel) -> String {
        self.channel(channel).0.lock().get().to_owned()
    }

    /// Apply `update` to one channel and emit its change signal afterwards,
    /// outside the lock.
    fn update<F>(&self, channel: TextChannel, update: F)
    where
        F: FnOnce(&mut ResolvedText) -> bool,
    {
        let (text, changed) = self.channel(channel);
        let resolved = {
            let mut text = text.lock();
            update(&mut *text).then(|| text.get().to_owned())
        };
        if let Some(resolved) = resolved {
            changed.emit(resolved);
        }
    }

    /// Re-derive both channels from the slot.
    ///
    /// Idempotent: any number of calls between reads yields the same text.
    /// The slot is read while the channel is locked, so concurrent refreshes
    /// apply in the order they read and an older snapshot never wins.
    fn refresh_from_slot(&self) {
        let _span = tracing::trace_span!(span_names::TEXT).entered();
        for channel in [TextChannel::Display, TextChannel::Typeahead] {
            self.update(channel, |text| text.refresh(&self.slot_content.slot_content()));
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Selection and text-resolution behavior for one option.
///
/// # Signals
///
/// - [`events`](Self::events): outbound `request-selection`,
///   `request-deselection` and `close-menu` events, in emission order
/// - [`selected_changed`](Self::selected_changed) /
///   [`disabled_changed`](Self::disabled_changed): attribute changes
/// - [`display_text_changed`](Self::display_text_changed) /
///   [`typeahead_text_changed`](Self::typeahead_text_changed): resolved
///   text changes
pub struct SelectOptionController {
    id: OptionId,
    role_context: RoleContext,
    disabled: Property<bool>,
    selected: Property<bool>,
    value: Property<String>,
    text: Arc<TextState>,
    slot_subscription: Option<ConnectionGuard>,

    /// Outbound events for the parent select / menu.
    pub events: Signal<OptionEvent>,
    /// Emitted when the cached selection changes.
    pub selected_changed: Signal<bool>,
    /// Emitted when the disabled state changes.
    pub disabled_changed: Signal<bool>,
}

impl SelectOptionController {
    /// Create a controller from its configuration and initial attributes.
    ///
    /// Initial attributes never emit events: an option created selected does
    /// not request anything.
    pub fn new(config: SelectOptionConfig, attributes: OptionAttributes) -> Self {
        let text = TextState::new(config.slot_content);
        if let Some(explicit) = attributes.display_text {
            text.display.lock().set_override(explicit);
        }
        if let Some(explicit) = attributes.typeahead_text {
            text.typeahead.lock().set_override(explicit);
        }

        let controller = Self {
            id: OptionId::next(),
            role_context: config.role_context,
            disabled: Property::new(attributes.disabled),
            selected: Property::new(attributes.selected),
            value: Property::new(attributes.value),
            text: Arc::new(text),
            slot_subscription: None,
            events: Signal::new(),
            selected_changed: Signal::new(),
            disabled_changed: Signal::new(),
        };
        tracing::debug!(target: targets::OPTION, id = %controller.id, "option controller created");
        controller
    }

    /// The identity carried by every outbound event.
    pub fn id(&self) -> OptionId {
        self.id
    }

    // =========================================================================
    // Slot observation
    // =========================================================================

    /// Subscribe to the host's slot-change notification.
    ///
    /// Replaces any earlier subscription. The subscription is released by
    /// [`disconnect`](Self::disconnect) or when the controller is dropped.
    pub fn observe_slot(&mut self, changed: &Signal<()>) {
        let text: Weak<TextState> = Arc::downgrade(&self.text);
        self.slot_subscription = Some(changed.connect_scoped(move |_| {
            if let Some(text) = text.upgrade() {
                text.refresh_from_slot();
            }
        }));
        self.text.refresh_from_slot();
    }

    /// Whether a slot subscription is currently held.
    pub fn is_observing_slot(&self) -> bool {
        self.slot_subscription
            .as_ref()
            .is_some_and(ConnectionGuard::is_connected)
    }

    /// Re-read the slot now, for hosts that notify by direct call instead
    /// of through a signal.
    pub fn slot_content_changed(&self) {
        self.text.refresh_from_slot();
    }

    /// Release the slot subscription (host detached).
    pub fn disconnect(&mut self) {
        if let Some(mut subscription) = self.slot_subscription.take() {
            subscription.disconnect();
            tracing::debug!(target: targets::OPTION, id = %self.id, "slot observation released");
        }
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// The resolved display text.
    pub fn display_text(&self) -> String {
        self.text.get(TextChannel::Display)
    }

    /// Override the display text. Slot changes no longer affect it until
    /// [`clear_display_text`](Self::clear_display_text).
    pub fn set_display_text(&self, text: impl Into<String>) {
        self.set_text_override(TextChannel::Display, text.into());
    }

    /// Drop the display text override and fall back to the slot.
    pub fn clear_display_text(&self) {
        self.clear_text_override(TextChannel::Display);
    }

    /// The explicit display text, if set.
    pub fn display_text_override(&self) -> Option<String> {
        self.text.display.lock().explicit().map(str::to_owned)
    }

    /// Signal emitted with the new display text when it changes.
    pub fn display_text_changed(&self) -> &Signal<String> {
        &self.text.display_text_changed
    }

    /// The resolved typeahead text.
    pub fn typeahead_text(&self) -> String {
        self.text.get(TextChannel::Typeahead)
    }

    /// Override the typeahead text.
    pub fn set_typeahead_text(&self, text: impl Into<String>) {
        self.set_text_override(TextChannel::Typeahead, text.into());
    }

    /// Drop the typeahead text override and fall back to the slot.
    pub fn clear_typeahead_text(&self) {
        self.clear_text_override(TextChannel::Typeahead);
    }

    /// The explicit typeahead text, if set.
    pub fn typeahead_text_override(&self) -> Option<String> {
        self.text.typeahead.lock().explicit().map(str::to_owned)
    }

    /// Signal emitted with the new typeahead text when it changes.
    pub fn typeahead_text_changed(&self) -> &Signal<String> {
        &self.text.typeahead_text_changed
    }

    fn set_text_override(&self, channel: TextChannel, text: String) {
        self.text.update(channel, |resolved| resolved.set_override(text));
    }

    fn clear_text_override(&self, channel: TextChannel) {
        let text = &self.text;
        text.update(channel, |resolved| {
            resolved.clear_override(&text.slot_content.slot_content())
        });
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Whether the option is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// Enable or disable the option.
    pub fn set_disabled(&self, disabled: bool) {
        if self.disabled.set(disabled) {
            self.disabled_changed.emit(disabled);
        }
    }

    /// The parent-confirmed selection.
    pub fn is_selected(&self) -> bool {
        self.selected.get()
    }

    /// Record the parent's selection decision.
    ///
    /// Going from selected to unselected emits `request-deselection` so the
    /// parent can reconcile its bookkeeping. Becoming selected is itself the
    /// parent's confirmation and emits nothing outbound.
    pub fn set_selected(&self, selected: bool) {
        let Some(was_selected) = self.selected.replace(selected) else {
            return;
        };
        self.selected_changed.emit(selected);
        if was_selected {
            self.emit_event(OptionEventKind::RequestDeselection);
        }
    }

    /// The opaque form value.
    pub fn value(&self) -> String {
        self.value.get()
    }

    /// Set the form value. No validation is performed.
    pub fn set_value(&self, value: impl Into<String>) {
        self.value.set(value.into());
    }

    // =========================================================================
    // Accessibility
    // =========================================================================

    /// The current accessible role.
    pub fn role(&self) -> AccessibleRole {
        self.aria().role
    }

    /// The current accessibility attributes.
    pub fn aria(&self) -> AriaAttributes {
        compute_aria(AriaState {
            selected: self.is_selected(),
            disabled: self.is_disabled(),
            role_context: self.role_context,
        })
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle a click on the rendered item.
    pub fn on_click(&self, event: &mut ClickEvent) {
        if event.base.is_accepted() {
            return;
        }
        let _span = tracing::trace_span!(span_names::INPUT, input = "click").entered();
        let disposition = InputIntentMapper::on_click(self.is_disabled());
        self.apply(disposition, &mut event.base, CloseReason::ClickSelection);
    }

    /// Handle a key press on the rendered item.
    pub fn on_keydown(&self, event: &mut KeyPressEvent) {
        if event.base.is_accepted() {
            return;
        }
        let _span = tracing::trace_span!(span_names::INPUT, input = "keydown").entered();
        let disposition = InputIntentMapper::on_keydown(event.key, self.is_disabled());
        self.apply(
            disposition,
            &mut event.base,
            CloseReason::KeydownSelection(event.key),
        );
    }

    fn apply(&self, disposition: InputDisposition, base: &mut EventBase, reason: CloseReason) {
        match disposition {
            InputDisposition::Activate => {
                tracing::debug!(target: targets::INPUT, id = %self.id, ?reason, "option activated");
            }
            InputDisposition::Suppress => {
                tracing::trace!(target: targets::INPUT, id = %self.id, "input swallowed by disabled option");
            }
            InputDisposition::Ignore => {
                tracing::trace!(target: targets::INPUT, id = %self.id, "input left for parent");
            }
        }
        if disposition.stops_propagation() {
            base.accept();
        }
        self.dispatch(disposition.intents(), reason);
    }

    /// Emit one event per intent, in order.
    fn dispatch(&self, intents: &[SelectionIntent], reason: CloseReason) {
        for &intent in intents {
            self.emit_event(OptionEventKind::from_intent(intent, reason));
        }
    }

    fn emit_event(&self, kind: OptionEventKind) {
        let event = OptionEvent::new(kind, self.id);
        tracing::debug!(target: targets::OPTION, id = %self.id, event = event.name(), "dispatching");
        self.events.emit(event);
    }
}

impl fmt::Debug for SelectOptionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectOptionController")
            .field("id", &self.id)
            .field("role_context", &self.role_context)
            .field("disabled", &self.is_disabled())
            .field("selected", &self.is_selected())
            .field("value", &self.value())
            .field("display_text", &self.display_text())
            .field("typeahead_text", &self.typeahead_text())
            .field("observing_slot", &self.is_observing_slot())
            .finish()
    }
}

static_assertions::assert_impl_all!(SelectOptionController: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentNode, HeadlineSlot};
    use crate::events::Key;

    fn recorder(controller: &SelectOptionController) -> Arc<Mutex<Vec<OptionEventKind>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        controller.events.connect(move |event| seen_clone.lock().push(event.kind));
        seen
    }

    fn apple() -> SelectOptionController {
        SelectOptionController::new(
            SelectOptionConfig::new(|| vec![ContentNode::text("Apple")]),
            OptionAttributes::default(),
        )
    }

    #[test]
    fn test_display_text_from_slot() {
        let controller = apple();
        assert_eq!(controller.display_text(), "Apple");
        assert_eq!(controller.typeahead_text(), "Apple");
    }

    #[test]
    fn test_click_requests_selection_then_close() {
        let controller = apple();
        let seen = recorder(&controller);

        let mut event = ClickEvent::default();
        controller.on_click(&mut event);

        assert!(event.base.is_accepted());
        assert_eq!(
            *seen.lock(),
            vec![
                OptionEventKind::RequestSelection,
                OptionEventKind::CloseMenu {
                    reason: CloseReason::ClickSelection
                },
            ]
        );
        // Requesting is not selecting.
        assert!(!controller.is_selected());
    }

    #[test]
    fn test_keydown_close_reason_carries_key() {
        let controller = apple();
        let seen = recorder(&controller);

        controller.on_keydown(&mut KeyPressEvent::from_dom_key(" "));
        assert_eq!(
            seen.lock()[1],
            OptionEventKind::CloseMenu {
                reason: CloseReason::KeydownSelection(Key::Space)
            }
        );
    }

    #[test]
    fn test_disabled_swallows_input() {
        let controller = apple();
        controller.set_disabled(true);
        let seen = recorder(&controller);

        let mut click = ClickEvent::default();
        controller.on_click(&mut click);
        let mut key = KeyPressEvent::from_dom_key("a");
        controller.on_keydown(&mut key);

        assert!(seen.lock().is_empty());
        assert!(click.base.is_accepted());
        assert!(key.base.is_accepted());
    }

    #[test]
    fn test_other_keys_propagate() {
        let controller = apple();
        let seen = recorder(&controller);

        let mut event = KeyPressEvent::from_dom_key("ArrowDown");
        controller.on_keydown(&mut event);

        assert!(seen.lock().is_empty());
        assert!(!event.base.is_accepted());
    }

    #[test]
    fn test_already_accepted_event_is_ignored() {
        let controller = apple();
        let seen = recorder(&controller);

        let mut event = KeyPressEvent::from_dom_key("Enter");
        event.base.accept();
        controller.on_keydown(&mut event);
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_deselection_only_on_true_to_false() {
        let controller = apple();
        let seen = recorder(&controller);

        controller.set_selected(false);
        controller.set_selected(true);
        assert!(seen.lock().is_empty());

        controller.set_selected(true);
        controller.set_selected(false);
        assert_eq!(*seen.lock(), vec![OptionEventKind::RequestDeselection]);
    }

    #[test]
    fn test_initially_selected_emits_nothing() {
        let controller = SelectOptionController::new(
            SelectOptionConfig::new(Vec::<ContentNode>::new),
            OptionAttributes {
                selected: true,
                ..Default::default()
            },
        );
        let seen = recorder(&controller);
        assert!(controller.is_selected());
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_initial_overrides_applied() {
        let controller = SelectOptionController::new(
            SelectOptionConfig::new(|| vec![ContentNode::text("Apple")]),
            OptionAttributes {
                display_text: Some("Custom".to_string()),
                typeahead_text: Some("cust".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(controller.display_text(), "Custom");
        assert_eq!(controller.typeahead_text(), "cust");
        assert_eq!(controller.display_text_override().as_deref(), Some("Custom"));
    }

    #[test]
    fn test_slot_subscription_tracks_and_releases() {
        let slot = HeadlineSlot::new();
        slot.push("Apple");
        let mut controller = SelectOptionController::new(
            SelectOptionConfig::new(slot.provider()),
            OptionAttributes::default(),
        );
        controller.observe_slot(slot.changed());
        assert!(controller.is_observing_slot());
        assert_eq!(slot.changed().connection_count(), 1);

        slot.assign([ContentNode::text("Banana")]);
        assert_eq!(controller.display_text(), "Banana");

        controller.disconnect();
        assert!(!controller.is_observing_slot());
        assert_eq!(slot.changed().connection_count(), 0);

        // Stale until the host notifies again.
        slot.assign([ContentNode::text("Cherry")]);
        assert_eq!(controller.display_text(), "Banana");
        controller.slot_content_changed();
        assert_eq!(controller.display_text(), "Cherry");
    }

    #[test]
    fn test_drop_releases_subscription() {
        let slot = HeadlineSlot::new();
        {
            let mut controller = SelectOptionController::new(
                SelectOptionConfig::new(slot.provider()),
                OptionAttributes::default(),
            );
            controller.observe_slot(slot.changed());
            assert_eq!(slot.changed().connection_count(), 1);
        }
        assert_eq!(slot.changed().connection_count(), 0);
    }

    #[test]
    fn test_text_changed_signal() {
        let slot = HeadlineSlot::new();
        let mut controller = SelectOptionController::new(
            SelectOptionConfig::new(slot.provider()),
            OptionAttributes::default(),
        );
        controller.observe_slot(slot.changed());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        controller
            .display_text_changed()
            .connect(move |text| seen_clone.lock().push(text.clone()));

        slot.push("Ap");
        slot.push("ple");
        slot.batch(|_| {}); // no content change, no signal
        controller.set_display_text("Custom");
        slot.push("!"); // pinned
        controller.clear_display_text();

        assert_eq!(*seen.lock(), vec!["Ap", "Apple", "Custom", "Apple!"]);
    }

    #[test]
    fn test_change_signals_fire_on_actual_change() {
        let controller = apple();
        let selected = Arc::new(Mutex::new(Vec::new()));
        let disabled = Arc::new(Mutex::new(Vec::new()));
        let typeahead = Arc::new(Mutex::new(Vec::new()));

        let selected_clone = selected.clone();
        controller
            .selected_changed
            .connect(move |&value| selected_clone.lock().push(value));
        let disabled_clone = disabled.clone();
        controller
            .disabled_changed
            .connect(move |&value| disabled_clone.lock().push(value));
        let typeahead_clone = typeahead.clone();
        controller
            .typeahead_text_changed()
            .connect(move |text| typeahead_clone.lock().push(text.clone()));

        controller.set_selected(true);
        controller.set_selected(true);
        controller.set_selected(false);
        controller.set_selected(false);
        controller.set_disabled(true);
        controller.set_disabled(true);
        controller.set_disabled(false);
        controller.set_typeahead_text("ap");
        controller.set_typeahead_text("ap");
        controller.slot_content_changed();
        controller.clear_typeahead_text();
        controller.clear_typeahead_text();

        assert_eq!(*selected.lock(), vec![true, false]);
        assert_eq!(*disabled.lock(), vec![true, false]);
        assert_eq!(*typeahead.lock(), vec!["ap", "Apple"]);
    }

    #[test]
    fn test_every_event_bubbles_and_is_composed() {
        let controller = apple();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        controller
            .events
            .connect(move |event: &OptionEvent| events_clone.lock().push(*event));

        controller.on_click(&mut ClickEvent::default());
        controller.on_keydown(&mut KeyPressEvent::from_dom_key("Enter"));
        controller.set_selected(true);
        controller.set_selected(false);

        let events = events.lock();
        assert_eq!(events.len(), 5);
        for event in events.iter() {
            assert!(event.bubbles(), "{}", event.name());
            assert!(event.composed(), "{}", event.name());
            assert_eq!(event.source, controller.id());
        }
    }

    #[test]
    fn test_concurrent_refreshes_keep_latest_text() {
        let slot = Arc::new(HeadlineSlot::new());
        let controller = Arc::new(SelectOptionController::new(
            SelectOptionConfig::new(slot.provider()),
            OptionAttributes::default(),
        ));

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let slot = slot.clone();
                let controller = controller.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        slot.push("x");
                        controller.slot_content_changed();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(controller.display_text(), "x".repeat(200));
        assert_eq!(controller.typeahead_text(), "x".repeat(200));
    }

    #[test]
    fn test_role_follows_context() {
        let controller = SelectOptionController::new(
            SelectOptionConfig::new(Vec::<ContentNode>::new)
                .with_role_context(RoleContext::MenuItem),
            OptionAttributes::default(),
        );
        assert_eq!(controller.role(), AccessibleRole::MenuItem);
        assert_eq!(controller.aria().aria_selected, None);
        assert_eq!(apple().role().as_str(), "option");
    }

    #[test]
    fn test_reentrant_parent_confirmation() {
        let controller = Arc::new(apple());
        let weak = Arc::downgrade(&controller);
        controller.events.connect(move |event| {
            if event.kind == OptionEventKind::RequestSelection
                && let Some(controller) = weak.upgrade()
            {
                controller.set_selected(true);
            }
        });

        controller.on_click(&mut ClickEvent::default());
        assert!(controller.is_selected());
        assert_eq!(controller.aria().aria_selected, Some(true));
    }
}
