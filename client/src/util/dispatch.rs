//! Sending commands from components.

use std::time::Duration;

use extras::Command;
use leptos::prelude::*;

use crate::state::extras::ExtrasState;
use crate::util::schedule;

/// Length of the gallery/editor exit animation.
pub const VIEW_TRANSITION: Duration = Duration::from_millis(200);

/// Apply `command`, schedule its effects, and finish any view transition it
/// started once the exit animation has played.
pub fn send(extras: RwSignal<ExtrasState>, command: Command) {
    let mut effects = Vec::new();
    let mut pending = None;
    extras.update(|state| {
        effects = state.dispatch(command);
        pending = state.pending_transition();
    });

    schedule::run_effects(effects);
    if let Some(next) = pending {
        schedule::after_delay(VIEW_TRANSITION, move || send(extras, next));
    }
}
