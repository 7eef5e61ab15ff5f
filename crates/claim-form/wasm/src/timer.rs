//! Browser hide scheduling on top of `setTimeout`

use std::time::Duration;

use claim_form_core::HideScheduler;
use gloo_timers::callback::Timeout;
use tracing::trace;
use web_sys::Element;

use crate::dom::set_display;

/// Schedules hides with `gloo_timers::callback::Timeout`.
///
/// The returned handle owns the timer: dropping or cancelling it clears the
/// pending `setTimeout`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserScheduler;

impl HideScheduler<Element> for BrowserScheduler {
    type Handle = Timeout;

    fn schedule_hide(&mut self, node: Element, after: Duration) -> Timeout {
        let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
        trace!(millis, "scheduling feedback hide");
        Timeout::new(millis, move || set_display(&node, false))
    }

    fn cancel(&mut self, handle: Timeout) {
        // clearTimeout on an expired id is a no-op
        let _ = handle.cancel();
    }
}
