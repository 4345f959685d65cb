//! Display and typeahead text resolution.
//!
//! Each option exposes two text channels:
//!
//! - **Display text**: shown in the owning select field once the option is
//!   selected. Falls back to the full text content of the headline slot.
//! - **Typeahead text**: matched by the list's search-as-you-type logic.
//!   Falls back to the rendered (visible) text of the headline slot.
//!
//! An explicit override on a channel wins verbatim and pins the channel: slot
//! mutations are ignored until the override is cleared. Text is never
//! trimmed or case-folded here; normalization belongs to the matcher.

use std::fmt;

use lattice_select_core::logging::targets;

use crate::content::SlotContentSnapshot;

/// One of the two text channels an option resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextChannel {
    /// Text shown in the select field when selected.
    Display,
    /// Text matched by typeahead search.
    Typeahead,
}

impl TextChannel {
    /// The attribute name that overrides this channel.
    pub fn attribute_name(self) -> &'static str {
        match self {
            Self::Display => "display-text",
            Self::Typeahead => "typeahead-text",
        }
    }

    fn fallback(self, snapshot: &SlotContentSnapshot) -> String {
        match self {
            Self::Display => snapshot.text_content(),
            Self::Typeahead => snapshot.rendered_text(),
        }
    }
}

impl fmt::Display for TextChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_name())
    }
}

/// Stateless text resolution rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextResolver;

impl TextResolver {
    /// Resolve `channel` from an optional explicit value and the slot.
    pub fn resolve(
        channel: TextChannel,
        explicit: Option<&str>,
        snapshot: &SlotContentSnapshot,
    ) -> String {
        match explicit {
            Some(text) => text.to_owned(),
            None => channel.fallback(snapshot),
        }
    }

    /// Resolve display text.
    pub fn resolve_display_text(explicit: Option<&str>, snapshot: &SlotContentSnapshot) -> String {
        Self::resolve(TextChannel::Display, explicit, snapshot)
    }

    /// Resolve typeahead text.
    pub fn resolve_typeahead_text(
        explicit: Option<&str>,
        snapshot: &SlotContentSnapshot,
    ) -> String {
        Self::resolve(TextChannel::Typeahead, explicit, snapshot)
    }
}

/// The resolved state of one text channel.
///
/// Mutators return `true` when the resolved value changed so the owner can
/// emit its change signal.
#[derive(Debug, Clone)]
pub struct ResolvedText {
    channel: TextChannel,
    explicit: Option<String>,
    resolved: String,
}

impl ResolvedText {
    /// Create a channel resolved against `snapshot` with no override.
    pub fn new(channel: TextChannel, snapshot: &SlotContentSnapshot) -> Self {
        Self {
            channel,
            explicit: None,
            resolved: TextResolver::resolve(channel, None, snapshot),
        }
    }

    /// The current resolved text.
    pub fn get(&self) -> &str {
        &self.resolved
    }

    /// The explicit override, if one is set.
    pub fn explicit(&self) -> Option<&str> {
        self.explicit.as_deref()
    }

    /// Whether an explicit override pins this channel.
    pub fn is_overridden(&self) -> bool {
        self.explicit.is_some()
    }

    /// Pin the channel to `text`.
    pub fn set_override(&mut self, text: String) -> bool {
        tracing::debug!(target: targets::TEXT, channel = %self.channel, "text override set");
        self.resolved_changed(|this| {
            this.resolved.clone_from(&text);
            this.explicit = Some(text);
        })
    }

    /// Drop the override and fall back to `snapshot`.
    pub fn clear_override(&mut self, snapshot: &SlotContentSnapshot) -> bool {
        if self.explicit.is_none() {
            return false;
        }
        tracing::debug!(target: targets::TEXT, channel = %self.channel, "text override cleared");
        self.resolved_changed(|this| {
            this.explicit = None;
            this.resolved = this.channel.fallback(snapshot);
        })
    }

    /// Re-derive from the slot. Does nothing while overridden.
    pub fn refresh(&mut self, snapshot: &SlotContentSnapshot) -> bool {
        if self.is_overridden() {
            return false;
        }
        let fallback = self.channel.fallback(snapshot);
        if fallback == self.resolved {
            return false;
        }
        tracing::trace!(target: targets::TEXT, channel = %self.channel, "text re-resolved from slot");
        self.resolved = fallback;
        true
    }

    fn resolved_changed(&mut self, update: impl FnOnce(&mut Self)) -> bool {
        let before = self.resolved.clone();
        update(self);
        self.resolved != before
    }
}
