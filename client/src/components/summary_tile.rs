//! One gallery tile with its data indicator.

use extras::tile::{Indicator, Tile};
use extras::{Command, KindDescriptor};
use leptos::prelude::*;

use crate::state::extras::ExtrasState;
use crate::util::dispatch::send;

/// Clickable tile for `kind`.
///
/// Clicking the tile selects the kind. The indicator of a single-valued
/// kind deletes its record instead; on a multi-valued kind it drills in.
#[component]
pub fn SummaryTile(kind: KindDescriptor) -> impl IntoView {
    let extras = expect_context::<RwSignal<ExtrasState>>();

    let name = kind.name.clone();
    let label = kind.label.clone();
    let icon_class = format!("extras-tile__icon extras-tile__icon--{}", kind.icon);

    let status = move || {
        extras.with(|state| {
            let tile = Tile::new(&kind, state.values(), state.orchestrator.parent());
            (tile.indicator(), tile.count())
        })
    };

    let select_name = name.clone();
    let on_select = move |_| send(extras, Command::Select { kind: select_name.clone() });

    let indicator = move || {
        let (indicator, count) = status();
        indicator.map(|indicator| {
            let kind = name.clone();
            let (text, title) = match indicator {
                Indicator::Delete => ("×".to_owned(), "Remove"),
                Indicator::Drill => (count.map_or_else(String::new, |n| n.to_string()), "Open list"),
            };
            view! {
                <button
                    class="extras-tile__indicator"
                    class:extras-tile__indicator--delete={indicator == Indicator::Delete}
                    title=title
                    on:click=move |ev| {
                        ev.stop_propagation();
                        send(extras, Command::ClearKind { kind: kind.clone() });
                    }
                >
                    {text}
                </button>
            }
        })
    };

    view! {
        <div class="extras-tile" on:click=on_select>
            <span class=icon_class></span>
            <span class="extras-tile__label">{label}</span>
            {indicator}
        </div>
    }
}
