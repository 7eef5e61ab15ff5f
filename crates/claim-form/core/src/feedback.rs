//! Feedback nodes: creation, placement and the idempotent clear

use tracing::debug;

use crate::binding::{Position, UiBinding};
use crate::checks::Outcome;
use crate::config::ValidationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Error,
    Success,
}

impl FeedbackKind {
    /// Class tag attached to nodes of this kind
    pub fn class<'a>(&self, config: &'a ValidationConfig) -> &'a str {
        match self {
            FeedbackKind::Error => &config.classes.error,
            FeedbackKind::Success => &config.classes.success,
        }
    }
}

/// What to show for an outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMessage {
    pub kind: FeedbackKind,
    pub glyph: String,
    pub text: String,
}

impl FeedbackMessage {
    pub fn for_outcome(outcome: Outcome, config: &ValidationConfig) -> Self {
        let messages = &config.messages;
        let (kind, glyph, text) = match outcome {
            Outcome::EmptyFields => (
                FeedbackKind::Error,
                &messages.warning_glyph,
                &messages.empty_fields,
            ),
            Outcome::InvalidEmail => (
                FeedbackKind::Error,
                &messages.warning_glyph,
                &messages.invalid_email,
            ),
            Outcome::Success => (
                FeedbackKind::Success,
                &messages.success_glyph,
                &messages.success,
            ),
        };

        Self {
            kind,
            glyph: glyph.clone(),
            text: text.clone(),
        }
    }
}

/// Remove every error and success node currently in the document
///
/// Returns how many nodes were removed.
pub fn clear_feedback<U: UiBinding>(ui: &mut U, config: &ValidationConfig) -> usize {
    let mut stale = ui.query_class(&config.classes.error);
    for node in ui.query_class(&config.classes.success) {
        if !stale.contains(&node) {
            stale.push(node);
        }
    }

    for node in &stale {
        ui.remove(node);
    }
    stale.len()
}

/// Build a `<p>` for `message` and insert it next to `anchor`
pub fn render<U: UiBinding>(
    ui: &mut U,
    message: &FeedbackMessage,
    anchor: &U::Node,
    position: Position,
    config: &ValidationConfig,
) -> Option<U::Node> {
    let node = ui.create_element("p")?;

    if message.kind == FeedbackKind::Error {
        ui.set_id(&node, &config.classes.error_id);
    }
    ui.append_text(&node, Some("span"), &message.glyph);
    ui.append_text(&node, None, &message.text);
    ui.add_class(&node, message.kind.class(config));
    ui.set_visible(&node, true);
    ui.insert_adjacent(anchor, position, &node);

    debug!(kind = ?message.kind, position = position.as_str(), "feedback rendered");
    Some(node)
}
