//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the extras gallery and editor while reading shared
//! state from the `RwSignal<ExtrasState>` context and sending commands back
//! through `util::dispatch::send`.

pub mod extras_editor;
pub mod field_input;
pub mod focused_editor;
pub mod gallery;
pub mod item_card;
pub mod record_list;
pub mod summary_tile;
