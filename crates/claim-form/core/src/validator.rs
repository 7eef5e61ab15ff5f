// File: src/validator.rs
// Purpose: Submission handler tying the checks, feedback and hide scheduling together

use std::sync::Arc;

use tracing::debug;

use crate::binding::{Position, UiBinding};
use crate::checks::{evaluate, Outcome};
use crate::config::ValidationConfig;
use crate::feedback::{clear_feedback, render, FeedbackMessage};
use crate::fields::FieldSet;
use crate::scheduler::HideScheduler;

/// The claim form validator.
///
/// Owns the controls bound at startup and the handle of the pending success
/// hide, if any. Every submission is evaluated independently.
#[derive(Debug)]
pub struct FormValidator<N, H> {
    config: Arc<ValidationConfig>,
    fields: FieldSet<N>,
    pending_hide: Option<H>,
}

impl<N: Clone, H> FormValidator<N, H> {
    pub fn new(fields: FieldSet<N>, config: Arc<ValidationConfig>) -> Self {
        Self {
            config,
            fields,
            pending_hide: None,
        }
    }

    /// Look up the controls with the configured selectors
    pub fn bind<U>(ui: &U, config: Arc<ValidationConfig>) -> Self
    where
        U: UiBinding<Node = N>,
    {
        let fields = FieldSet::bind(ui, &config.selectors);
        Self::new(fields, config)
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn fields(&self) -> &FieldSet<N> {
        &self.fields
    }

    /// Whether a submit handler can be attached at all
    pub fn has_submit(&self) -> bool {
        self.fields.submit.is_some()
    }

    /// True while the validator holds the handle of the last scheduled hide
    ///
    /// The handle is kept after the hide fires and is only replaced or dropped by the
    /// next render, so this does not report whether the node is still shown.
    pub fn has_hide_handle(&self) -> bool {
        self.pending_hide.is_some()
    }

    /// Handle one submission: evaluate the form and render the outcome
    pub fn handle_submit<U, S>(&mut self, ui: &mut U, scheduler: &mut S) -> Outcome
    where
        U: UiBinding<Node = N>,
        S: HideScheduler<N, Handle = H>,
    {
        let values = self.fields.read(ui);
        let outcome = evaluate(&values, &self.config);
        debug!(outcome = outcome.as_str(), "claim form submitted");

        self.show(ui, scheduler, outcome);
        outcome
    }

    /// Replace whatever feedback is showing with the feedback for `outcome`
    pub fn show<U, S>(&mut self, ui: &mut U, scheduler: &mut S, outcome: Outcome) -> Option<N>
    where
        U: UiBinding<Node = N>,
        S: HideScheduler<N, Handle = H>,
    {
        if let Some(handle) = self.pending_hide.take() {
            scheduler.cancel(handle);
        }
        let cleared = clear_feedback(ui, &self.config);
        if cleared > 0 {
            debug!(cleared, "previous feedback removed");
        }

        let (anchor, position) = match outcome {
            Outcome::EmptyFields | Outcome::Success => (&self.fields.submit, Position::BeforeBegin),
            Outcome::InvalidEmail => (&self.fields.email, Position::AfterEnd),
        };
        let Some(anchor) = anchor else {
            debug!(outcome = outcome.as_str(), "feedback anchor missing, nothing rendered");
            return None;
        };

        let message = FeedbackMessage::for_outcome(outcome, &self.config);
        let node = render(ui, &message, anchor, position, &self.config)?;

        if outcome == Outcome::Success {
            let handle = scheduler.schedule_hide(node.clone(), self.config.success_display);
            self.pending_hide = Some(handle);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDocument, NodeId};
    use crate::scheduler::{ManualScheduler, TaskId};
    use std::time::Duration;

    type Validator = FormValidator<NodeId, TaskId>;

    #[test]
    fn test_bind_uses_configured_selectors() {
        let doc = MemoryDocument::claim_form("Jo", "Doe", "jo@example.com", "pw");
        let validator = Validator::bind(&doc, Arc::new(ValidationConfig::default()));
        assert!(validator.has_submit());
        assert!(validator.fields().email.is_some());
    }

    #[test]
    fn test_success_schedules_hide() {
        let mut doc = MemoryDocument::claim_form("Jo", "Doe", "jo@example.com", "pw");
        let mut scheduler = ManualScheduler::new();
        let mut validator = Validator::bind(&doc, Arc::new(ValidationConfig::default()));

        assert_eq!(validator.handle_submit(&mut doc, &mut scheduler), Outcome::Success);
        assert!(validator.has_hide_handle());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_hide_handle_outlives_fired_hide() {
        let mut doc = MemoryDocument::claim_form("Jo", "Doe", "jo@example.com", "pw");
        let mut scheduler = ManualScheduler::new();
        let mut validator = Validator::bind(&doc, Arc::new(ValidationConfig::default()));

        validator.handle_submit(&mut doc, &mut scheduler);
        assert_eq!(scheduler.advance(&mut doc, Duration::from_millis(3000)).len(), 1);
        assert!(validator.has_hide_handle());

        let email = validator.fields().email.unwrap();
        doc.set_value(email, "nope");
        validator.handle_submit(&mut doc, &mut scheduler);
        assert!(!validator.has_hide_handle());
    }

    #[test]
    fn test_error_cancels_pending_hide() {
        let mut doc = MemoryDocument::claim_form("Jo", "Doe", "jo@example.com", "pw");
        let mut scheduler = ManualScheduler::new();
        let mut validator = Validator::bind(&doc, Arc::new(ValidationConfig::default()));

        validator.handle_submit(&mut doc, &mut scheduler);
        let email = validator.fields().email.unwrap();
        doc.set_value(email, "nope");

        assert_eq!(validator.handle_submit(&mut doc, &mut scheduler), Outcome::InvalidEmail);
        assert!(!validator.has_hide_handle());
        assert_eq!(scheduler.pending(), 0);
        assert!(scheduler.advance(&mut doc, Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_missing_anchor_still_clears() {
        let mut doc = MemoryDocument::claim_form("Jo", "Doe", "jo@example.com", "pw");
        let mut scheduler = ManualScheduler::new();
        let mut validator = Validator::bind(&doc, Arc::new(ValidationConfig::default()));
        validator.handle_submit(&mut doc, &mut scheduler);
        assert_eq!(doc.query_class("success-validation").len(), 1);

        let mut fields = validator.fields().clone();
        fields.submit = None;
        let mut orphan = Validator::new(fields, Arc::new(ValidationConfig::default()));

        assert_eq!(orphan.show(&mut doc, &mut scheduler, Outcome::EmptyFields), None);
        assert!(doc.query_class("success-validation").is_empty());
        assert!(doc.query_class("error").is_empty());
    }
}
