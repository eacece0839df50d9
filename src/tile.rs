//! Gallery tiles, one per kind.
//!
//! A tile only ever asks the orchestrator to select its kind. The one
//! exception is the data indicator of a single-valued kind, which deletes the
//! kind's record directly without opening the editor.

#[cfg(test)]
#[path = "tile_test.rs"]
mod tile_test;

use serde_json::Value;

use crate::form::FormHandle;
use crate::path::{FieldPath, PathError};
use crate::schema::KindDescriptor;

/// What the data indicator does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Remove the single record of the kind.
    Delete,
    /// Open the editor on the kind's list.
    Drill,
}

/// Request a tile hands back to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileAction {
    /// Open the editor for this kind.
    Select(String),
    /// The kind's value was removed.
    Deleted(String),
}

/// Whether a kind value counts as holding data: a non-empty list, or a
/// record with at least one key.
#[must_use]
pub fn has_data(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        _ => false,
    }
}

/// A tile bound to the current form values.
#[derive(Debug, Clone, Copy)]
pub struct Tile<'a> {
    kind: &'a KindDescriptor,
    value: Option<&'a Value>,
}

impl<'a> Tile<'a> {
    #[must_use]
    pub fn new(kind: &'a KindDescriptor, values: &'a Value, parent: &str) -> Self {
        let value = FieldPath::for_kind(parent, &kind.name)
            .get(values)
            .filter(|v| !v.is_null());
        Self { kind, value }
    }

    #[must_use]
    pub fn kind(&self) -> &'a KindDescriptor {
        self.kind
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        has_data(self.value)
    }

    /// Number of records for multi-valued kinds with data.
    #[must_use]
    pub fn count(&self) -> Option<usize> {
        if self.kind.single {
            return None;
        }
        self.value.and_then(Value::as_array).map(Vec::len).filter(|n| *n > 0)
    }

    /// The indicator to show, if the kind holds data.
    #[must_use]
    pub fn indicator(&self) -> Option<Indicator> {
        if !self.has_data() {
            return None;
        }
        Some(if self.kind.single { Indicator::Delete } else { Indicator::Drill })
    }

    #[must_use]
    pub fn click(&self) -> TileAction {
        TileAction::Select(self.kind.name.clone())
    }
}

/// Handle a click on a tile's data indicator.
///
/// Single-valued kinds with data lose their value; every other case selects
/// the kind.
///
/// # Errors
///
/// Returns a [`PathError`] when the form rejects the removal.
pub fn click_indicator<F: FormHandle + ?Sized>(
    form: &mut F,
    kind: &KindDescriptor,
    parent: &str,
) -> Result<TileAction, PathError> {
    let path = FieldPath::for_kind(parent, &kind.name);
    if kind.single && has_data(form.value_at(&path)) {
        form.set_value(&path, None)?;
        tracing::info!(kind = %kind.name, "single-valued extra removed from tile");
        return Ok(TileAction::Deleted(kind.name.clone()));
    }
    Ok(TileAction::Select(kind.name.clone()))
}
