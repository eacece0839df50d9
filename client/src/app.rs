//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};

use crate::components::extras_editor::ExtrasEditor;
use crate::state::extras::ExtrasState;

/// Root application component.
///
/// Provides the extras editor state to every child component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let extras = RwSignal::new(ExtrasState::default());
    provide_context(extras);

    view! {
        <Stylesheet id="leptos" href="/pkg/extras.css"/>
        <Title text="Profile extras"/>

        <main class="profile-extras">
            <h1 class="profile-extras__title">"Extras"</h1>
            <ExtrasEditor/>
        </main>
    }
}
