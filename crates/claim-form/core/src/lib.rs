//! Claim Form Validation Core
//!
//! Headless implementation of the claim form flow: bind the four inputs and
//! the submit control, check completeness and email format on submit, then
//! render an inline error or a self-hiding success message.
//!
//! Every DOM operation goes through [`UiBinding`] and the delayed hide goes
//! through [`HideScheduler`], so the same flow runs in the browser (see the
//! `claim-form-wasm` crate) and against [`MemoryDocument`] in tests.

pub mod binding;
pub mod checks;
pub mod config;
pub mod error;
pub mod feedback;
pub mod fields;
pub mod memory;
pub mod scheduler;
pub mod validator;

pub use binding::{Position, UiBinding};
pub use checks::{evaluate, is_complete, is_valid_email, Outcome};
pub use config::{
    ClassConfig, FormConfig, MessageConfig, SelectorConfig, ValidationConfig, ValidationSettings,
};
pub use error::{Error, Result};
pub use feedback::{FeedbackKind, FeedbackMessage};
pub use fields::{FieldSet, FormValues};
pub use memory::{MemoryDocument, NodeId};
pub use scheduler::{HideScheduler, ManualScheduler, TaskId};
pub use validator::FormValidator;
