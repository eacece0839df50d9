//! Tile gallery listing every extra kind.

use leptos::prelude::*;

use crate::components::summary_tile::SummaryTile;
use crate::state::extras::ExtrasState;

/// Grid of summary tiles. `leaving` plays the exit animation.
#[component]
pub fn Gallery(leaving: bool) -> impl IntoView {
    let extras = expect_context::<RwSignal<ExtrasState>>();
    let kinds = extras.with_untracked(|state| state.orchestrator.catalog().kinds().to_vec());

    view! {
        <div class="extras-gallery" class:extras-gallery--leaving=leaving>
            {kinds.into_iter().map(|kind| view! { <SummaryTile kind/> }).collect_view()}
        </div>
    }
}
