//! The record list of a multi-valued kind.
//!
//! DESIGN
//! ======
//! Rows are rendered in reverse storage order, but every action refers back to the
//! storage index. Because the sequence can change between render and click,
//! a record that carries an `id` is re-located by that id at action time;
//! the rendered index is only trusted for records without one. Deleting
//! commits straight to the form; it is not part of any edit session.

#[cfg(test)]
#[path = "list_test.rs"]
mod list_test;

use serde_json::Value;

use crate::form::{FormHandle, ListShift};
use crate::item::{self, ItemClass, ItemSummary};
use crate::path::{FieldPath, PathError};

/// Text shown in place of the list when a kind holds no records.
pub const EMPTY_LIST_PLACEHOLDER: &str = "List is empty";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("record index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("value at `{0}` is not a list")]
    NotASequence(String),
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Authoritative storage index for `record`, which was rendered at `index`.
///
/// An `id` on the record wins over the rendered position. Records without
/// an id, and ids no longer present, fall back to `index`.
#[must_use]
pub fn resolve_index(records: &[Value], record: &Value, index: usize) -> usize {
    let Some(id) = record.get("id").filter(|id| !id.is_null()) else {
        return index;
    };
    if let Some(found) = records.iter().position(|r| r.get("id") == Some(id)) {
        return found;
    }
    tracing::debug!(%id, index, "record id not found; using rendered index");
    index
}

/// Records stored at `path`; an absent value is an empty list.
///
/// # Errors
///
/// Returns [`ListError::NotASequence`] when the value is present but is not
/// an array.
pub fn records_at<F: FormHandle + ?Sized>(form: &F, path: &FieldPath) -> Result<Vec<Value>, ListError> {
    match form.value_at(path) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(_) => Err(ListError::NotASequence(path.to_string())),
    }
}

/// Remove `record` (rendered at `index`) from the list at `path` and write
/// the shortened list back. Returns the removed record.
///
/// # Errors
///
/// Returns [`ListError::IndexOutOfRange`] when the resolved index is not in
/// the list, [`ListError::NotASequence`] for a non-list value, and
/// [`ListError::Path`] when the form rejects the write. The form is left
/// untouched on error.
pub fn delete_item<F: FormHandle + ?Sized>(
    form: &mut F,
    path: &FieldPath,
    record: &Value,
    index: usize,
) -> Result<Value, ListError> {
    let mut records = records_at(form, path)?;
    let resolved = resolve_index(&records, record, index);
    if resolved >= records.len() {
        return Err(ListError::IndexOutOfRange { index: resolved, len: records.len() });
    }
    let removed = records.remove(resolved);
    form.set_value(path, Some(Value::Array(records)))?;
    form.shift_touched(path, ListShift::Removed(resolved))?;
    tracing::info!(%path, index = resolved, "list item deleted");
    Ok(removed)
}

/// One display row.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry<'a> {
    /// Storage index at render time.
    pub index: usize,
    pub record: &'a Value,
    pub summary: ItemSummary,
}

/// Read-only view over the records of one kind.
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
    class: ItemClass,
    records: &'a [Value],
}

impl<'a> ListView<'a> {
    #[must_use]
    pub fn new(class: ItemClass, records: &'a [Value]) -> Self {
        Self { class, records }
    }

    #[must_use]
    pub fn class(&self) -> ItemClass {
        self.class
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// [`EMPTY_LIST_PLACEHOLDER`] when there is nothing to list.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_LIST_PLACEHOLDER)
    }

    /// Rows in display order: reverse storage order, so the last stored
    /// record comes first. Records added with
    /// [`FocusedEditor::start_create`](crate::editor::FocusedEditor::start_create)
    /// are prepended and therefore render last.
    #[must_use]
    pub fn entries(&self) -> Vec<ListEntry<'a>> {
        self.records
            .iter()
            .enumerate()
            .rev()
            .map(|(index, record)| ListEntry { index, record, summary: item::summarize(self.class, record) })
            .collect()
    }
}
