//! Schema-driven input for one field of the record under edit.

use extras::{Command, FieldDescriptor, FieldType};
use leptos::prelude::*;

use crate::state::extras::ExtrasState;
use crate::util::dispatch::send;
use crate::util::field_value;
use crate::util::markdown::render_markdown_html;

/// Labelled control for `field`. Every keystroke is written to the form.
#[component]
pub fn FieldInput(field: FieldDescriptor) -> impl IntoView {
    let extras = expect_context::<RwSignal<ExtrasState>>();
    let field_type = field.field_type;
    let label = field.display_label().to_owned();
    let required = field.required;

    let value_name = field.name.clone();
    let current = move || extras.with(|state| field_value::display(field_type, state.field_value(&value_name).as_ref()));

    let error_name = field.name.clone();
    let error = move || extras.with(|state| state.field_error(&error_name));

    let input_name = field.name.clone();
    let on_input = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        send(extras, Command::SetField { field: input_name.clone(), value: field_value::parse(field_type, &raw) });
    };

    let preview = (field_type == FieldType::Markdown).then(|| {
        let preview_name = field.name.clone();
        move || {
            extras.with(|state| {
                state
                    .field_value(&preview_name)
                    .and_then(|value| value.as_str().map(render_markdown_html))
                    .unwrap_or_default()
            })
        }
    });

    let control = match field_type {
        FieldType::Text => {
            view! { <input class="field-input__control" type="text" prop:value=current on:input=on_input/> }
                .into_any()
        }
        FieldType::Number => {
            view! { <input class="field-input__control" type="number" prop:value=current on:input=on_input/> }
                .into_any()
        }
        FieldType::Textarea | FieldType::Markdown => {
            view! { <textarea class="field-input__control" rows="6" prop:value=current on:input=on_input></textarea> }
                .into_any()
        }
        FieldType::Gallery => {
            view! {
                <textarea
                    class="field-input__control field-input__control--gallery"
                    rows="3"
                    placeholder="One image URL per line"
                    prop:value=current
                    on:input=on_input
                ></textarea>
            }
                .into_any()
        }
    };

    view! {
        <label class="field-input" class:field-input--invalid=move || error().is_some()>
            <span class="field-input__label">
                {label}
                {required.then_some(" *")}
            </span>
            {control}
            {preview.map(|html| view! { <div class="field-input__preview" inner_html=html></div> })}
            {move || error().map(|message| view! { <span class="field-input__error">{message}</span> })}
        </label>
    }
}
