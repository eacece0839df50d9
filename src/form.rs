//! The form the editor writes into.
//!
//! ARCHITECTURE
//! ============
//! The editor never holds the form itself. Every component that mutates form
//! state receives a [`FormHandle`], a small command interface of
//! `set_value`/`set_touched` plus read access to values and errors. [`Form`]
//! is the in-memory implementation used by the CLI, the client, and tests.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use serde_json::{Map, Value};

use crate::path::{FieldPath, PathError, Segment};
use crate::schema::Catalog;
use crate::validate;

/// Command interface the editor uses to read and mutate form state.
pub trait FormHandle {
    /// Current values.
    fn values(&self) -> &Value;

    /// Values the form was populated with.
    fn initial_values(&self) -> &Value;

    /// Error tree mirroring the shape of `values`.
    fn errors(&self) -> &Value;

    /// Write `value` at `path`; `None` removes the entry (undefined).
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] when the path cannot be written.
    fn set_value(&mut self, path: &FieldPath, value: Option<Value>) -> Result<(), PathError>;

    /// Mark or unmark `path` as touched.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] when the path cannot be written.
    fn set_touched(&mut self, path: &FieldPath, touched: bool) -> Result<(), PathError>;

    /// Move the touched flags of the list at `path` to follow an element
    /// inserted or removed there.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] when the touched tree cannot be written.
    fn shift_touched(&mut self, path: &FieldPath, shift: ListShift) -> Result<(), PathError>;

    fn value_at(&self, path: &FieldPath) -> Option<&Value> {
        path.get(self.values()).filter(|v| !v.is_null())
    }

    fn errors_at(&self, path: &FieldPath) -> Option<&Value> {
        path.get(self.errors())
    }
}

/// A change in the positions of a list's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShift {
    Inserted(usize),
    Removed(usize),
}

/// In-memory form state.
#[derive(Debug, Clone)]
pub struct Form {
    values: Value,
    initial_values: Value,
    errors: Value,
    touched: Value,
    validation: Option<(String, Catalog)>,
}

impl Form {
    /// Populate a form. The values also become the initial values.
    #[must_use]
    pub fn new(values: Value) -> Self {
        let values = if values.is_object() { values } else { Value::Object(Map::new()) };
        Self {
            initial_values: values.clone(),
            values,
            errors: Value::Object(Map::new()),
            touched: Value::Object(Map::new()),
            validation: None,
        }
    }

    /// Recompute errors from `catalog` for the kinds under `parent` after
    /// every write.
    #[must_use]
    pub fn with_validation(mut self, parent: &str, catalog: Catalog) -> Self {
        self.validation = Some((parent.to_owned(), catalog));
        self.revalidate();
        self
    }

    #[must_use]
    pub fn touched(&self) -> &Value {
        &self.touched
    }

    #[must_use]
    pub fn is_touched(&self, path: &FieldPath) -> bool {
        path.get(&self.touched).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Whether the values differ from the initial values.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.values != self.initial_values
    }

    /// Record an error reported by an external field layer.
    ///
    /// Errors set this way are replaced on the next write when the form
    /// validates against a catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] when the path cannot be written.
    pub fn set_error(&mut self, path: &FieldPath, message: Option<&str>) -> Result<(), PathError> {
        match message {
            Some(message) => path.set(&mut self.errors, Value::String(message.to_owned())),
            None => {
                path.remove(&mut self.errors);
                Ok(())
            }
        }
    }

    /// Restore the initial values and clear touched state.
    pub fn reset(&mut self) {
        self.values = self.initial_values.clone();
        self.touched = Value::Object(Map::new());
        self.errors = Value::Object(Map::new());
        self.revalidate();
    }

    #[must_use]
    pub fn into_values(self) -> Value {
        self.values
    }

    fn revalidate(&mut self) {
        if let Some((parent, catalog)) = &self.validation {
            self.errors = validate::form_errors(parent, catalog, &self.values);
        }
    }
}

impl FormHandle for Form {
    fn values(&self) -> &Value {
        &self.values
    }

    fn initial_values(&self) -> &Value {
        &self.initial_values
    }

    fn errors(&self) -> &Value {
        &self.errors
    }

    fn set_value(&mut self, path: &FieldPath, value: Option<Value>) -> Result<(), PathError> {
        match value {
            Some(value) => path.set(&mut self.values, value)?,
            None => {
                path.remove(&mut self.values);
            }
        }
        tracing::debug!(%path, "form value set");
        self.revalidate();
        Ok(())
    }

    fn set_touched(&mut self, path: &FieldPath, touched: bool) -> Result<(), PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if touched {
            place(&mut self.touched, path.segments(), Value::Bool(true));
        } else {
            path.remove(&mut self.touched);
        }
        Ok(())
    }

    fn shift_touched(&mut self, path: &FieldPath, shift: ListShift) -> Result<(), PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let Some(Value::Array(mut flags)) = path.get(&self.touched).cloned() else {
            return Ok(());
        };
        match shift {
            ListShift::Inserted(index) if index <= flags.len() => flags.insert(index, Value::Null),
            ListShift::Removed(index) if index < flags.len() => {
                flags.remove(index);
            }
            ListShift::Inserted(_) | ListShift::Removed(_) => {}
        }
        place(&mut self.touched, path.segments(), Value::Array(flags));
        Ok(())
    }
}

/// Write `leaf` at `segments` below `node`.
///
/// The touched tree only mirrors the values, so missing array slots are
/// padded with `null` and scalars on the way are replaced by containers.
fn place(node: &mut Value, segments: &[Segment], leaf: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *node = leaf;
        return;
    };
    match first {
        Segment::Key(key) => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            if let Value::Object(map) = node {
                place(map.entry(key.clone()).or_insert(Value::Null), rest, leaf);
            }
        }
        Segment::Index(index) => {
            if !node.is_array() {
                *node = Value::Array(Vec::new());
            }
            if let Value::Array(items) = node {
                if items.len() <= *index {
                    items.resize(index + 1, Value::Null);
                }
                if let Some(slot) = items.get_mut(*index) {
                    place(slot, rest, leaf);
                }
            }
        }
    }
}
