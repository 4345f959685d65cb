//! Slotted content model.
//!
//! An option does not own its label. The host projects a sequence of content
//! nodes into the option's `headline` slot, and the option derives its
//! display and typeahead text from whatever is there. This module provides:
//!
//! - [`ContentNode`]: a minimal text/element tree
//! - [`SlotContentSnapshot`]: the ordered nodes in a slot at one instant
//! - [`SlotContentProvider`]: the single capability the controller is given
//!   to read the slot
//! - [`HeadlineSlot`]: a host-side slot that stores nodes and announces
//!   mutations through a [`Signal`]

use std::sync::Arc;

use lattice_select_core::Signal;
use parking_lot::RwLock;

/// A node projected into a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// A run of text.
    Text(String),
    /// An element with child nodes.
    Element {
        /// Whether the element is excluded from rendering.
        hidden: bool,
        /// Child nodes in document order.
        children: Vec<ContentNode>,
    },
}

impl ContentNode {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a visible element.
    pub fn element(children: impl IntoIterator<Item = ContentNode>) -> Self {
        Self::Element {
            hidden: false,
            children: children.into_iter().collect(),
        }
    }

    /// Create an element that is not rendered.
    pub fn hidden(children: impl IntoIterator<Item = ContentNode>) -> Self {
        Self::Element {
            hidden: true,
            children: children.into_iter().collect(),
        }
    }

    /// All descendant text, hidden or not, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out, true);
        out
    }

    /// Descendant text a user can actually see, in document order.
    pub fn rendered_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out, false);
        out
    }

    fn write_text(&self, out: &mut String, include_hidden: bool) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element { hidden, children } => {
                if *hidden && !include_hidden {
                    return;
                }
                for child in children {
                    child.write_text(out, include_hidden);
                }
            }
        }
    }
}

impl From<&str> for ContentNode {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for ContentNode {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// The ordered sequence of nodes currently projected into a slot.
///
/// Snapshots are taken on demand and discarded once text has been derived
/// from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotContentSnapshot {
    nodes: Vec<ContentNode>,
}

impl SlotContentSnapshot {
    /// Create a snapshot from nodes in document order.
    pub fn new(nodes: Vec<ContentNode>) -> Self {
        Self { nodes }
    }

    /// An empty slot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether nothing is projected into the slot.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Concatenated text content of every node.
    pub fn text_content(&self) -> String {
        self.nodes.iter().map(ContentNode::text_content).collect()
    }

    /// Concatenated rendered text of every node, skipping hidden subtrees.
    pub fn rendered_text(&self) -> String {
        self.nodes.iter().map(ContentNode::rendered_text).collect()
    }
}

impl From<Vec<ContentNode>> for SlotContentSnapshot {
    fn from(nodes: Vec<ContentNode>) -> Self {
        Self::new(nodes)
    }
}

/// Read access to an option's headline slot.
///
/// This is the only capability the controller receives from its host, so a
/// test can substitute any closure returning nodes.
///
/// # Example
///
/// ```
/// use lattice_select::{ContentNode, SlotContentProvider};
///
/// let provider = || vec![ContentNode::text("Apple")];
/// assert_eq!(provider.slot_content().text_content(), "Apple");
/// ```
pub trait SlotContentProvider: Send + Sync {
    /// Snapshot the slot's current content.
    fn slot_content(&self) -> SlotContentSnapshot;
}

impl<F> SlotContentProvider for F
where
    F: Fn() -> Vec<ContentNode> + Send + Sync,
{
    fn slot_content(&self) -> SlotContentSnapshot {
        SlotContentSnapshot::new(self())
    }
}

/// A host-side `headline` slot.
///
/// Stores the projected nodes and emits [`changed`](Self::changed) once per
/// logical mutation. Use [`batch`](Self::batch) to coalesce several edits
/// into a single notification.
pub struct HeadlineSlot {
    nodes: Arc<RwLock<Vec<ContentNode>>>,
    changed: Signal<()>,
}

impl Default for HeadlineSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlineSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            nodes: Arc::new(RwLock::new(Vec::new())),
            changed: Signal::new(),
        }
    }

    /// Signal emitted after the slot's content changes.
    pub fn changed(&self) -> &Signal<()> {
        &self.changed
    }

    /// A provider reading this slot's live content.
    pub fn provider(&self) -> impl SlotContentProvider + 'static {
        let nodes = Arc::clone(&self.nodes);
        move || nodes.read().clone()
    }

    /// Snapshot the current content.
    pub fn snapshot(&self) -> SlotContentSnapshot {
        SlotContentSnapshot::new(self.nodes.read().clone())
    }

    /// Replace all projected nodes.
    pub fn assign(&self, nodes: impl IntoIterator<Item = ContentNode>) {
        self.batch(|current| {
            current.clear();
            current.extend(nodes);
        });
    }

    /// Append a node.
    pub fn push(&self, node: impl Into<ContentNode>) {
        let node = node.into();
        self.batch(|current| current.push(node));
    }

    /// Remove every node.
    pub fn clear(&self) {
        self.batch(Vec::clear);
    }

    /// Apply several edits and notify once.
    ///
    /// The write lock is released before observers run, so they may read
    /// the slot.
    pub fn batch<F>(&self, edit: F)
    where
        F: FnOnce(&mut Vec<ContentNode>),
    {
        edit(&mut *self.nodes.write());
        self.changed.emit(());
    }
}

impl std::fmt::Debug for HeadlineSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlineSlot")
            .field("nodes", &*self.nodes.read())
            .field("changed", &self.changed)
            .finish()
    }
}
