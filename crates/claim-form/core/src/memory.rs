//! In-memory document for running the claim form flow headlessly
//!
//! The document is a flat list of sibling elements (the form body) backed by
//! an arena, so removed elements keep their state and can still be touched
//! by a late hide task. Selectors cover the compound forms the claim form
//! uses: `tag`, `.class`, `#id`, `[attr]` and `[attr=|*=|^=|$="value"]`.
//! Combinators are not supported and match nothing.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

use crate::binding::{Position, UiBinding};

/// Handle to an element in a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Inline {
    wrapper: Option<String>,
    text: String,
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    value: Option<String>,
    content: Vec<Inline>,
    visible: bool,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            value: None,
            content: Vec::new(),
            visible: true,
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            _ => self
                .attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryDocument {
    arena: Vec<Element>,
    body: Vec<NodeId>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element to the end of the body
    pub fn add_element(&mut self, tag: &str, classes: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut element = Element::new(tag);
        element.classes = classes.split_whitespace().map(str::to_string).collect();
        element.attrs = attrs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        let id = self.alloc(element);
        self.body.push(id);
        id
    }

    /// Append an `<input>` with the given classes, placeholder and value
    pub fn add_input(&mut self, classes: &str, placeholder: &str, value: &str) -> NodeId {
        let id = self.add_element("input", classes, &[("placeholder", placeholder)]);
        self.arena[id.0].value = Some(value.to_string());
        id
    }

    /// Append a `<button>` with a text label
    pub fn add_button(&mut self, label: &str) -> NodeId {
        let id = self.add_element("button", "", &[]);
        self.append_text(&id, None, label);
        id
    }

    /// The standard claim form: four inputs followed by the submit button
    pub fn claim_form(first: &str, last: &str, email: &str, password: &str) -> Self {
        let mut doc = Self::new();
        doc.add_input("input", "First Name", first);
        doc.add_input("input", "Last Name", last);
        doc.add_input("input email", "Email Address", email);
        doc.add_input("input", "Password", password);
        doc.add_button("Claim your free trial");
        doc
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(element) = self.arena.get_mut(node.0) {
            element.value = Some(value.to_string());
        }
    }

    /// Attached elements in document order
    pub fn body(&self) -> &[NodeId] {
        &self.body
    }

    pub fn position_of(&self, node: NodeId) -> Option<usize> {
        self.body.iter().position(|&n| n == node)
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.position_of(node).is_some()
    }

    pub fn is_visible(&self, node: NodeId) -> bool {
        self.arena.get(node.0).is_some_and(|e| e.visible)
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.arena.get(node.0).map(|e| e.tag.as_str())
    }

    pub fn element_id(&self, node: NodeId) -> Option<&str> {
        self.arena.get(node.0).and_then(|e| e.id.as_deref())
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.arena
            .get(node.0)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    /// Concatenated text content
    pub fn text(&self, node: NodeId) -> String {
        self.arena
            .get(node.0)
            .map(|e| e.content.iter().map(|i| i.text.as_str()).collect())
            .unwrap_or_default()
    }

    /// Text of the first child wrapped in `tag`
    pub fn wrapped_text(&self, node: NodeId, tag: &str) -> Option<&str> {
        self.arena.get(node.0).and_then(|e| {
            e.content
                .iter()
                .find(|i| i.wrapper.as_deref() == Some(tag))
                .map(|i| i.text.as_str())
        })
    }

    fn alloc(&mut self, element: Element) -> NodeId {
        self.arena.push(element);
        NodeId(self.arena.len() - 1)
    }

    fn detach(&mut self, node: NodeId) {
        self.body.retain(|&n| n != node);
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        let Some(element) = self.arena.get(node.0) else {
            return false;
        };

        if let Some(tag) = &selector.tag {
            if !tag.eq_ignore_ascii_case(&element.tag) {
                return false;
            }
        }

        if let Some(id) = &selector.id {
            if element.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }

        if !selector
            .classes
            .iter()
            .all(|class| element.classes.contains(class))
        {
            return false;
        }

        selector.attrs.iter().all(|cond| {
            element
                .attr(&cond.name)
                .is_some_and(|value| cond.op.test(value, &cond.value))
        })
    }
}

impl UiBinding for MemoryDocument {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        let Some(parsed) = Selector::parse(selector) else {
            trace!(selector, "unsupported selector");
            return None;
        };
        self.body.iter().copied().find(|&n| self.matches(n, &parsed))
    }

    fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.body
            .iter()
            .copied()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    fn value(&self, node: &NodeId) -> Option<String> {
        self.arena.get(node.0).and_then(|e| e.value.clone())
    }

    fn create_element(&mut self, tag: &str) -> Option<NodeId> {
        Some(self.alloc(Element::new(tag)))
    }

    fn set_id(&mut self, node: &NodeId, id: &str) {
        if let Some(element) = self.arena.get_mut(node.0) {
            element.id = Some(id.to_string());
        }
    }

    fn append_text(&mut self, node: &NodeId, wrapper: Option<&str>, text: &str) {
        if let Some(element) = self.arena.get_mut(node.0) {
            element.content.push(Inline {
                wrapper: wrapper.map(str::to_string),
                text: text.to_string(),
            });
        }
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if let Some(element) = self.arena.get_mut(node.0) {
            if !element.classes.iter().any(|c| c == class) {
                element.classes.push(class.to_string());
            }
        }
    }

    fn insert_adjacent(&mut self, anchor: &NodeId, position: Position, node: &NodeId) {
        if anchor == node || node.0 >= self.arena.len() {
            return;
        }
        self.detach(*node);
        let Some(index) = self.position_of(*anchor) else {
            return;
        };
        let index = match position {
            Position::BeforeBegin => index,
            Position::AfterEnd => index + 1,
        };
        self.body.insert(index, *node);
    }

    fn remove(&mut self, node: &NodeId) {
        self.detach(*node);
    }

    fn set_visible(&mut self, node: &NodeId, visible: bool) {
        if let Some(element) = self.arena.get_mut(node.0) {
            element.visible = visible;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals,
    Contains,
    Prefix,
    Suffix,
}

impl AttrOp {
    fn test(self, actual: &str, expected: &str) -> bool {
        match self {
            AttrOp::Exists => true,
            AttrOp::Equals => actual == expected,
            AttrOp::Contains => actual.contains(expected),
            AttrOp::Prefix => actual.starts_with(expected),
            AttrOp::Suffix => actual.ends_with(expected),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrCondition {
    name: String,
    op: AttrOp,
    value: String,
}

/// A single compound selector
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
}

static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(?P<tag>[A-Za-z0-9_-]+)|\*)?").unwrap());

static SEGMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\.(?P<class>[A-Za-z0-9_-]+)",
        r"|#(?P<id>[A-Za-z0-9_-]+)",
        r#"|\[\s*(?P<name>[A-Za-z0-9_-]+)\s*(?:(?P<op>[*^$]?)=\s*"#,
        r#"(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\]\s"']*)))?\s*\]"#,
    ))
    .unwrap()
});

impl Selector {
    /// Parse a compound selector; `None` unless the segments cover the whole input
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let mut selector = Selector::default();
        let head = TAG_REGEX.captures(input)?;
        selector.tag = head.name("tag").map(|m| m.as_str().to_string());

        let rest = &input[head.get(0).map_or(0, |m| m.end())..];
        let mut covered = 0;
        for cap in SEGMENT_REGEX.captures_iter(rest) {
            let whole = cap.get(0)?;
            if whole.start() != covered {
                return None;
            }
            covered = whole.end();

            if let Some(class) = cap.name("class") {
                selector.classes.push(class.as_str().to_string());
            } else if let Some(id) = cap.name("id") {
                selector.id = Some(id.as_str().to_string());
            } else if let Some(name) = cap.name("name") {
                selector.attrs.push(attr_condition(&cap, name.as_str()));
            }
        }

        (covered == rest.len()).then_some(selector)
    }
}

fn attr_condition(cap: &Captures<'_>, name: &str) -> AttrCondition {
    let op = match cap.name("op").map(|m| m.as_str()) {
        None => AttrOp::Exists,
        Some("*") => AttrOp::Contains,
        Some("^") => AttrOp::Prefix,
        Some("$") => AttrOp::Suffix,
        Some(_) => AttrOp::Equals,
    };
    let value = ["dq", "sq", "bare"]
        .iter()
        .find_map(|group| cap.name(group))
        .map_or("", |m| m.as_str());

    AttrCondition {
        name: name.to_string(),
        op,
        value: value.to_string(),
    }
}
