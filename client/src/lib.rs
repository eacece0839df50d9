//! # client
//!
//! Leptos + WASM front end for the profile extras editor.
//!
//! The editing model lives in the `extras` crate; this crate only renders
//! it. Components read one shared [`state::extras::ExtrasState`] signal and
//! send every user action through it as an `extras::Command`, then carry out
//! the returned effects (timed scroll, finishing view transitions).

pub mod app;
pub mod components;
pub mod state;
pub mod util;

/// WASM entry point: mount the app on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already initialised");
    }
    leptos::mount::mount_to_body(app::App);
}
