//! Claim Form Validation WASM
//!
//! Browser adapter for `claim-form-core`: binds the claim form controls in
//! the page, intercepts clicks on the submit control and renders feedback
//! through the real DOM.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use claim_form_core::{self as core, FormConfig, FormValidator, FormValues, ValidationConfig};
use gloo_timers::callback::Timeout;
use once_cell::sync::Lazy;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};

pub mod dom;
pub mod timer;

pub use dom::DomBinding;
pub use timer::BrowserScheduler;

static DEFAULT_CONFIG: Lazy<ValidationConfig> = Lazy::new(ValidationConfig::default);

thread_local! {
    static MOUNTED: Cell<bool> = const { Cell::new(false) };
}

/// Everything the click handler needs, owned by the handler closure
struct MountedForm {
    validator: FormValidator<Element, Timeout>,
    dom: DomBinding,
    scheduler: BrowserScheduler,
}

/// Install the panic hook and logger, then mount once the DOM is ready
#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));

    #[cfg(feature = "autostart")]
    on_dom_ready(|| {
        if let Err(err) = mount_with(ValidationConfig::default()) {
            warn!(?err, "claim form auto-mount failed");
        }
    })?;

    Ok(())
}

/// Run `f` on `DOMContentLoaded`, or right away if that already happened
#[cfg(feature = "autostart")]
fn on_dom_ready(f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        warn!("no document available, claim form not mounted");
        return Ok(());
    };

    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }

    let callback = Closure::once_into_js(f);
    document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
}

/// Bind the claim form in the current page.
///
/// `config_toml` overrides the default messages, selectors and timing.
/// Returns `false` when the submit control is missing and no handler was
/// attached.
///
/// # Example (JavaScript)
/// ```javascript
/// mount(`
/// [messages]
/// success = "You're in!"
/// `);
/// ```
#[wasm_bindgen]
pub fn mount(config_toml: Option<String>) -> Result<bool, JsValue> {
    let raw = FormConfig::from_toml_str(config_toml.as_deref().unwrap_or_default())
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
    let config =
        ValidationConfig::from_config(&raw).map_err(|e| JsValue::from_str(&e.to_string()))?;
    mount_with(config)
}

/// Bind the claim form with an already compiled configuration
pub fn mount_with(config: ValidationConfig) -> Result<bool, JsValue> {
    if MOUNTED.with(Cell::get) {
        return Err(JsValue::from_str("claim form is already mounted"));
    }

    let dom = DomBinding::from_window().ok_or_else(|| JsValue::from_str("no document available"))?;
    let validator = FormValidator::bind(&dom, Arc::new(config));
    let Some(submit) = validator.fields().submit.clone() else {
        warn!("submit control not found, claim form handler not attached");
        return Ok(false);
    };

    attach(&submit, MountedForm {
        validator,
        dom,
        scheduler: BrowserScheduler,
    })?;
    MOUNTED.with(|mounted| mounted.set(true));

    info!("claim form mounted");
    Ok(true)
}

/// Attach the click handler for the lifetime of the page
fn attach(submit: &Element, form: MountedForm) -> Result<(), JsValue> {
    let form = Rc::new(RefCell::new(form));
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();

        let mut form = form.borrow_mut();
        let MountedForm {
            validator,
            dom,
            scheduler,
        } = &mut *form;
        validator.handle_submit(dom, scheduler);
    });

    submit.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

/// Quick email format check with the built-in pattern
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    core::is_valid_email(email, &DEFAULT_CONFIG)
}

/// Evaluate a claim form without touching the DOM
///
/// Returns `"emptyFields"`, `"invalidEmail"` or `"success"`.
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form_js(first_name: &str, last_name: &str, email: &str, password: &str) -> String {
    let values = FormValues::new(first_name, last_name, email, password);
    core::evaluate(&values, &DEFAULT_CONFIG).as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_email_validation() {
        assert!(is_valid_email_js("jo@example.com"));
        assert!(!is_valid_email_js("a@b.c"));
        assert!(!is_valid_email_js("not-an-email"));
    }

    #[wasm_bindgen_test]
    fn test_validate_form() {
        assert_eq!(validate_form_js("", "Doe", "a@b.co", "pw"), "emptyFields");
        assert_eq!(validate_form_js("Jo", "Doe", "not-an-email", "pw"), "invalidEmail");
        assert_eq!(validate_form_js("Jo", "Doe", "jo@example.com", "pw"), "success");
    }
}
