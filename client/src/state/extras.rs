//! Extras editor state shared by every component.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `RwSignal<ExtrasState>` is provided at the app root. Components
//! never touch the form directly: they send `extras::Command`s through
//! [`ExtrasState::dispatch`] and render from the read helpers below.

#[cfg(test)]
#[path = "extras_test.rs"]
mod extras_test;

use extras::{Catalog, Command, Effect, Form, FormHandle, Orchestrator, Outcome, Stage};
use serde_json::{Value, json};

#[derive(Clone, Debug)]
pub struct ExtrasState {
    pub form: Form,
    pub orchestrator: Orchestrator,
    /// Message of the last refused save; cleared by the next command.
    pub notice: Option<String>,
    /// Last command the editor rejected.
    pub error: Option<String>,
}

impl Default for ExtrasState {
    fn default() -> Self {
        Self::new(Catalog::builtin(), "extras", json!({}))
    }
}

impl ExtrasState {
    pub fn new(catalog: Catalog, parent: &str, values: Value) -> Self {
        let form = Form::new(values).with_validation(parent, catalog.clone());
        Self { form, orchestrator: Orchestrator::new(catalog, parent), notice: None, error: None }
    }

    /// Apply `command` and return the effects the view must schedule.
    pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        match self.orchestrator.apply(&mut self.form, command) {
            Ok(dispatch) => {
                self.error = None;
                self.notice = match &dispatch.outcome {
                    Outcome::Blocked(notice) => Some(notice.message()),
                    Outcome::Stay | Outcome::Exit(_) => None,
                };
                dispatch.effects
            }
            Err(e) => {
                leptos::logging::warn!("extras command rejected: {e}");
                self.error = Some(e.to_string());
                Vec::new()
            }
        }
    }

    /// Command that completes the view transition now playing, if any.
    pub fn pending_transition(&self) -> Option<Command> {
        match self.orchestrator.stage() {
            Stage::TransitioningOut { .. } => Some(Command::GalleryExited),
            Stage::TransitioningBack { .. } => Some(Command::EditorExited),
            Stage::Gallery | Stage::Editor(_) => None,
        }
    }

    pub fn values(&self) -> &Value {
        self.form.values()
    }

    /// Records of the kind open in the editor, in storage order.
    pub fn records(&self) -> Vec<Value> {
        self.orchestrator
            .editor()
            .and_then(|editor| self.form.value_at(editor.kind_path()))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// Value of `field` on the record under edit.
    pub fn field_value(&self, field: &str) -> Option<Value> {
        let Ok(path) = self.orchestrator.editor()?.field_path(field) else {
            return None;
        };
        self.form.value_at(&path).cloned()
    }

    /// Error of `field` on the record under edit, once it has been touched.
    pub fn field_error(&self, field: &str) -> Option<String> {
        let Ok(path) = self.orchestrator.editor()?.field_path(field) else {
            return None;
        };
        if !self.form.is_touched(&path) {
            return None;
        }
        self.form.errors_at(&path).and_then(Value::as_str).map(str::to_owned)
    }
}
