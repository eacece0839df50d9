//! Read-only rendering of one record, by item class.

use extras::{ItemClass, ItemSummary};
use leptos::prelude::*;

/// Card for one list entry.
#[component]
pub fn ItemCard(summary: ItemSummary) -> impl IntoView {
    let class = format!("item-card item-card--{}", summary.class.as_str());
    let detail_class = match summary.class {
        ItemClass::Blog => "item-card__excerpt",
        ItemClass::Offer | ItemClass::Wanted => "item-card__price",
    };
    let images = (summary.image_count > 1).then(|| format!("{} images", summary.image_count));

    view! {
        <article class=class>
            {summary.thumbnail.map(|src| view! { <img class="item-card__thumb" src=src alt=""/> })}
            <div class="item-card__body">
                <h3 class="item-card__title">{summary.title}</h3>
                {summary.detail.map(|detail| view! { <p class=detail_class>{detail}</p> })}
                {images.map(|text| view! { <span class="item-card__images">{text}</span> })}
            </div>
        </article>
    }
}
