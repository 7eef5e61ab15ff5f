//! Bound controls and the values read from them

use tracing::warn;

use crate::binding::UiBinding;
use crate::config::SelectorConfig;

/// References to the four inputs and the submit control.
///
/// Looked up once by [`FieldSet::bind`] and reused for every submission.
/// A slot is `None` when its selector matched nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet<N> {
    pub first_name: Option<N>,
    pub last_name: Option<N>,
    pub email: Option<N>,
    pub password: Option<N>,
    pub submit: Option<N>,
}

impl<N: Clone> FieldSet<N> {
    /// Locate every control through `ui`
    pub fn bind<U>(ui: &U, selectors: &SelectorConfig) -> Self
    where
        U: UiBinding<Node = N>,
    {
        let lookup = |name: &str, selector: &str| {
            let node = ui.query(selector);
            if node.is_none() {
                warn!(control = name, selector, "claim form control not found");
            }
            node
        };

        Self {
            first_name: lookup("first_name", &selectors.first_name),
            last_name: lookup("last_name", &selectors.last_name),
            email: lookup("email", &selectors.email),
            password: lookup("password", &selectors.password),
            submit: lookup("submit", &selectors.submit),
        }
    }

    /// Input controls in form order
    pub fn inputs(&self) -> [Option<&N>; 4] {
        [
            self.first_name.as_ref(),
            self.last_name.as_ref(),
            self.email.as_ref(),
            self.password.as_ref(),
        ]
    }

    /// Snapshot the current values of the bound inputs
    pub fn read<U>(&self, ui: &U) -> FormValues
    where
        U: UiBinding<Node = N>,
    {
        let read = |node: Option<&N>| node.and_then(|n| ui.value(n));

        FormValues {
            first_name: read(self.first_name.as_ref()),
            last_name: read(self.last_name.as_ref()),
            email: read(self.email.as_ref()),
            password: read(self.password.as_ref()),
        }
    }
}

/// Field values at submission time; `None` for a control that is not bound
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl FormValues {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    pub fn all(&self) -> [Option<&str>; 4] {
        [
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.email.as_deref(),
            self.password.as_deref(),
        ]
    }
}
