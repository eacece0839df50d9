//! Focused editor for the selected kind: record list or record form.

use extras::{Command, EditorMode, KindDescriptor};
use leptos::prelude::*;

use crate::components::field_input::FieldInput;
use crate::components::record_list::RecordList;
use crate::state::extras::ExtrasState;
use crate::util::dispatch::send;

/// Editor pane for the kind the orchestrator has open.
#[component]
pub fn FocusedEditor() -> impl IntoView {
    let extras = expect_context::<RwSignal<ExtrasState>>();
    let Some(kind) = extras.with_untracked(|state| state.orchestrator.editor().map(|editor| editor.kind().clone())) else {
        return view! { <div class="focused-editor"></div> }.into_any();
    };

    let mode = Memo::new(move |_| extras.with(|state| state.orchestrator.editor().map(extras::FocusedEditor::mode)));

    let title = kind.label.clone();
    let icon_class = format!("focused-editor__icon extras-tile__icon--{}", kind.icon);

    view! {
        <div class="focused-editor">
            <header class="focused-editor__header">
                <span class=icon_class></span>
                <h2 class="focused-editor__title">{title}</h2>
                <button class="btn focused-editor__close" on:click=move |_| send(extras, Command::Close)>
                    "Close"
                </button>
            </header>
            {move || match mode.get() {
                Some(EditorMode::List) => view! { <RecordList kind=kind.clone()/> }.into_any(),
                Some(EditorMode::Editing { .. }) => view! { <RecordForm kind=kind.clone()/> }.into_any(),
                Some(EditorMode::Closed(_)) | None => ().into_any(),
            }}
        </div>
    }
    .into_any()
}

/// Inputs for every field of the record under edit, plus save/cancel.
#[component]
fn RecordForm(kind: KindDescriptor) -> impl IntoView {
    let extras = expect_context::<RwSignal<ExtrasState>>();
    let cancel_label = if kind.single { "Cancel" } else { "Back" };

    view! {
        <div class="record-form">
            {kind.fields.into_iter().map(|field| view! { <FieldInput field/> }).collect_view()}
            <div class="record-form__actions">
                <button class="btn" on:click=move |_| send(extras, Command::Cancel { dismount: false })>
                    {cancel_label}
                </button>
                <button class="btn btn--primary" on:click=move |_| send(extras, Command::Done)>
                    "Done"
                </button>
            </div>
        </div>
    }
}
