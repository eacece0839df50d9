//! Deferred browser work: timed callbacks and scroll-to-top.
//!
//! Requires a browser environment; without the `csr` feature callbacks
//! run immediately and scrolling is a no-op.

use std::time::Duration;

use extras::Effect;

/// Run `f` once after `delay`. The timer cannot be cancelled.
#[cfg(feature = "csr")]
pub fn after_delay(delay: Duration, f: impl FnOnce() + 'static) {
    let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::callback::Timeout::new(millis, f).forget();
}

/// Without a browser there is nothing to wait on: run `f` now.
#[cfg(not(feature = "csr"))]
pub fn after_delay(_delay: Duration, f: impl FnOnce() + 'static) {
    f();
}

/// Scroll the window back to the top.
pub fn scroll_to_top() {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }
}

/// Carry out the effects returned by a command.
pub fn run_effects(effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::ScrollToTop { after } => after_delay(after, scroll_to_top),
        }
    }
}
