//! UI binding seam
//!
//! The minimal set of document operations the validator needs. The browser
//! implementation lives in `claim-form-wasm`; [`MemoryDocument`](crate::MemoryDocument)
//! implements it for headless tests.

use std::fmt::Debug;

/// Where a node goes relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Immediately before the anchor, as a sibling
    BeforeBegin,
    /// Immediately after the anchor, as a sibling
    AfterEnd,
}

impl Position {
    /// The `insertAdjacentElement` keyword for this position
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::BeforeBegin => "beforebegin",
            Position::AfterEnd => "afterend",
        }
    }
}

/// Document operations used by the claim form flow.
///
/// Lookups return `None` when nothing matches; mutations against detached
/// or missing nodes are expected to be no-ops, never panics.
pub trait UiBinding {
    /// Handle to an element in the document
    type Node: Clone + PartialEq + Debug;

    /// First element matching `selector`
    fn query(&self, selector: &str) -> Option<Self::Node>;

    /// Every element carrying `class`
    fn query_class(&self, class: &str) -> Vec<Self::Node>;

    /// Current value of an input control
    fn value(&self, node: &Self::Node) -> Option<String>;

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> Option<Self::Node>;

    fn set_id(&mut self, node: &Self::Node, id: &str);

    /// Append text to `node`, wrapped in a `wrapper` child element when given
    fn append_text(&mut self, node: &Self::Node, wrapper: Option<&str>, text: &str);

    fn add_class(&mut self, node: &Self::Node, class: &str);

    /// Insert `node` next to `anchor`
    fn insert_adjacent(&mut self, anchor: &Self::Node, position: Position, node: &Self::Node);

    /// Detach `node` from the document
    fn remove(&mut self, node: &Self::Node);

    /// Show or hide `node` without removing it
    fn set_visible(&mut self, node: &Self::Node, visible: bool);
}
