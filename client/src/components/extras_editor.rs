//! Top-level extras view: gallery or focused editor, never both.

use extras::Stage;
use leptos::prelude::*;

use crate::components::focused_editor::FocusedEditor;
use crate::components::gallery::Gallery;
use crate::state::extras::ExtrasState;

/// Which pane is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pane {
    Gallery { leaving: bool },
    Editor,
    EditorLeaving,
}

/// Gallery/editor host driven by the orchestrator stage.
#[component]
pub fn ExtrasEditor() -> impl IntoView {
    let extras = expect_context::<RwSignal<ExtrasState>>();

    let pane = Memo::new(move |_| {
        extras.with(|state| match state.orchestrator.stage() {
            Stage::Gallery => Pane::Gallery { leaving: false },
            Stage::TransitioningOut { .. } => Pane::Gallery { leaving: true },
            Stage::Editor(_) => Pane::Editor,
            Stage::TransitioningBack { .. } => Pane::EditorLeaving,
        })
    });

    let notice = move || extras.with(|state| state.notice.clone());
    let error = move || extras.with(|state| state.error.clone());

    view! {
        <section class="extras">
            {move || {
                notice()
                    .map(|message| {
                        view! { <div class="extras__notice" role="alert">{message}</div> }
                    })
            }}
            {move || error().map(|message| view! { <div class="extras__error">{message}</div> })}
            {move || match pane.get() {
                Pane::Gallery { leaving } => view! { <Gallery leaving/> }.into_any(),
                Pane::Editor => view! { <FocusedEditor/> }.into_any(),
                Pane::EditorLeaving => {
                    view! { <div class="focused-editor focused-editor--leaving"></div> }.into_any()
                }
            }}
        </section>
    }
}
