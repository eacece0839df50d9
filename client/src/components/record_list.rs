//! Record list of a multi-valued kind.

use extras::item::ItemSummary;
use extras::list::ListView;
use extras::{Command, KindDescriptor};
use leptos::prelude::*;
use serde_json::Value;

use crate::components::item_card::ItemCard;
use crate::state::extras::ExtrasState;
use crate::util::dispatch::send;

/// Records in reverse storage order with an add button, or the empty
/// placeholder. Newly created records are stored first, so they show last.
#[component]
pub fn RecordList(kind: KindDescriptor) -> impl IntoView {
    let extras = expect_context::<RwSignal<ExtrasState>>();
    let Some(class) = kind.class else {
        return view! { <div class="record-list"></div> }.into_any();
    };
    let add_label = format!("Add {}", kind.item_label());

    // (storage index, id at render time, summary)
    let rows = move || {
        extras.with(|state| {
            let records = state.records();
            let list = ListView::new(class, &records);
            let placeholder = list.placeholder();
            let entries = list
                .entries()
                .into_iter()
                .map(|entry| (entry.index, entry.record.get("id").cloned(), entry.summary))
                .collect::<Vec<_>>();
            (placeholder, entries)
        })
    };

    view! {
        <div class="record-list">
            <button class="btn btn--primary record-list__add" on:click=move |_| send(extras, Command::StartCreate)>
                {add_label}
            </button>
            {move || {
                let (placeholder, entries) = rows();
                if let Some(text) = placeholder {
                    return view! { <p class="record-list__empty">{text}</p> }.into_any();
                }
                view! {
                    <ul class="record-list__items">
                        {entries
                            .into_iter()
                            .map(|(index, id, summary)| view! { <RecordRow index id summary/> })
                            .collect_view()}
                    </ul>
                }
                    .into_any()
            }}
        </div>
    }
    .into_any()
}

/// One row: the rendered item plus its delete button.
#[component]
fn RecordRow(index: usize, id: Option<Value>, summary: ItemSummary) -> impl IntoView {
    let extras = expect_context::<RwSignal<ExtrasState>>();
    let edit_id = id.clone();

    view! {
        <li class="record-list__row">
            <div
                class="record-list__item"
                on:click=move |_| send(extras, Command::StartEdit { index, id: edit_id.clone() })
            >
                <ItemCard summary/>
            </div>
            <button
                class="record-list__delete"
                title="Delete"
                on:click=move |_| send(extras, Command::DeleteItem { index, id: id.clone() })
            >
                "×"
            </button>
        </li>
    }
}
