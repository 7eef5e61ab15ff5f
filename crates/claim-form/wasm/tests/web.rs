//! Browser tests: the claim form flow against a real DOM
//!
//! Each test builds its own form inside its own container and
//! scopes the binding to it, so tests sharing the page do not see each
//! other's feedback nodes.

use std::sync::Arc;

use claim_form_core::{FormValidator, Outcome, UiBinding, ValidationConfig};
use claim_form_wasm::{BrowserScheduler, DomBinding};
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

struct Page {
    root: Element,
    dom: DomBinding,
}

impl Page {
    fn claim_form(first: &str, last: &str, email: &str, password: &str) -> Self {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(
            r#"
            <input class="input" placeholder="First Name">
            <input class="input" placeholder="Last Name">
            <input class="input email" placeholder="Email Address">
            <input class="input" placeholder="Password">
            <button>Claim your free trial</button>
            "#,
        );
        document.body().unwrap().append_child(&root).unwrap();

        let page = Self {
            dom: DomBinding::scoped(document, root.clone()),
            root,
        };
        for (placeholder, value) in [
            ("First Name", first),
            ("Last Name", last),
            ("Email Address", email),
            ("Password", password),
        ] {
            page.input(placeholder).set_value(value);
        }
        page
    }

    fn input(&self, placeholder: &str) -> HtmlInputElement {
        self.root
            .query_selector(&format!(r#"input[placeholder="{placeholder}"]"#))
            .unwrap()
            .unwrap()
            .unchecked_into()
    }

    fn validator(&self) -> FormValidator<Element, Timeout> {
        FormValidator::bind(&self.dom, Arc::new(ValidationConfig::default()))
    }

    fn feedback(&self) -> Vec<Element> {
        let mut nodes = self.dom.query_class("error");
        nodes.extend(self.dom.query_class("success-validation"));
        nodes
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.root.remove();
    }
}

fn display(node: &Element) -> String {
    node.dyn_ref::<HtmlElement>()
        .unwrap()
        .style()
        .get_property_value("display")
        .unwrap()
}

#[wasm_bindgen_test]
fn test_empty_field_error_before_button() {
    let mut page = Page::claim_form("", "Doe", "a@b.co", "pw");
    let mut validator = page.validator();

    let outcome = validator.handle_submit(&mut page.dom, &mut BrowserScheduler);
    assert_eq!(outcome, Outcome::EmptyFields);

    let feedback = page.feedback();
    assert_eq!(feedback.len(), 1);
    let node = &feedback[0];
    assert_eq!(node.tag_name(), "P");
    assert_eq!(node.id(), "error");
    assert_eq!(node.inner_html(), "<span>⚠</span>Please fill in all fields.");
    assert_eq!(
        node.next_element_sibling().unwrap().tag_name(),
        "BUTTON"
    );
}

#[wasm_bindgen_test]
fn test_invalid_email_error_after_email_field() {
    let mut page = Page::claim_form("Jo", "Doe", "not-an-email", "pw");
    let mut validator = page.validator();

    let outcome = validator.handle_submit(&mut page.dom, &mut BrowserScheduler);
    assert_eq!(outcome, Outcome::InvalidEmail);

    let email: Element = page.input("Email Address").unchecked_into();
    let next = email.next_element_sibling().unwrap();
    assert!(next.class_list().contains("error"));
    assert_eq!(next.text_content().unwrap(), "⚠Invalid email! Please check your data.");
}

#[wasm_bindgen_test]
fn test_text_is_not_parsed_as_markup() {
    let page = Page::claim_form("", "", "", "");
    let mut dom = page.dom.clone();
    let node = dom.create_element("p").unwrap();
    dom.append_text(&node, None, "<b>plain</b>");
    assert_eq!(node.children().length(), 0);
    assert_eq!(node.text_content().unwrap(), "<b>plain</b>");
}

#[wasm_bindgen_test]
async fn test_success_hides_after_delay() {
    let mut page = Page::claim_form("Jo", "Doe", "jo@example.com", "pw");
    let mut config = ValidationConfig::default();
    config.success_display = std::time::Duration::from_millis(50);
    let mut validator: FormValidator<Element, Timeout> =
        FormValidator::bind(&page.dom, Arc::new(config));

    let outcome = validator.handle_submit(&mut page.dom, &mut BrowserScheduler);
    assert_eq!(outcome, Outcome::Success);

    let node = page.feedback().remove(0);
    assert_eq!(node.text_content().unwrap(), "✅Data Has Been Submitted Successfully!");
    assert_eq!(display(&node), "block");

    TimeoutFuture::new(150).await;
    assert_eq!(display(&node), "none");
    assert!(page.root.contains(Some(node.as_ref())), "hidden, not removed");
}

#[wasm_bindgen_test]
async fn test_resubmit_replaces_feedback_and_cancels_hide() {
    let mut page = Page::claim_form("Jo", "Doe", "jo@example.com", "pw");
    let mut config = ValidationConfig::default();
    config.success_display = std::time::Duration::from_millis(100);
    let mut validator: FormValidator<Element, Timeout> =
        FormValidator::bind(&page.dom, Arc::new(config));

    validator.handle_submit(&mut page.dom, &mut BrowserScheduler);
    let stale = page.feedback().remove(0);

    page.input("Email Address").set_value("broken");
    assert_eq!(
        validator.handle_submit(&mut page.dom, &mut BrowserScheduler),
        Outcome::InvalidEmail
    );
    assert!(!validator.has_hide_handle());
    assert_eq!(page.feedback().len(), 1);
    assert!(!page.root.contains(Some(stale.as_ref())));

    TimeoutFuture::new(200).await;
    assert_eq!(display(&stale), "block", "cancelled hide never ran");
}
