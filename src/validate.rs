//! Schema-driven field errors.
//!
//! The error tree mirrors the value tree: a single-valued kind gets an object
//! of `field -> message`, a multi-valued kind gets an array aligned with its
//! records where clean records are `null`. Kinds without errors are left
//! out entirely, so an empty object means the whole form is valid.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use serde_json::{Map, Value};

use crate::schema::{Catalog, FieldDescriptor, FieldType, KindDescriptor};

/// Whether an error node reports at least one problem.
///
/// Arrays, objects, and strings count when non-empty; `null` and a missing
/// node never do.
#[must_use]
pub fn has_errors(errors: Option<&Value>) -> bool {
    match errors {
        None | Some(Value::Null) => false,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(_)) => true,
    }
}

/// Error message for one field value, if it is invalid.
#[must_use]
pub fn field_error(field: &FieldDescriptor, value: Option<&Value>) -> Option<String> {
    let label = field.display_label();
    let value = value.filter(|v| !v.is_null());

    if field.required && value.is_none_or(is_blank_value) {
        return Some(format!("{label} is required"));
    }
    let value = value?;

    match field.field_type {
        FieldType::Number => {
            let Some(n) = value.as_f64().filter(|n| n.is_finite()) else {
                return Some(format!("{label} must be a number"));
            };
            match field.min {
                Some(min) if n < min => Some(format!("{label} must be at least {min}")),
                _ => None,
            }
        }
        FieldType::Gallery => {
            let valid = value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string));
            (!valid).then(|| format!("{label} must be a list of image URLs"))
        }
        FieldType::Text | FieldType::Textarea | FieldType::Markdown => {
            (!value.is_string()).then(|| format!("{label} must be text"))
        }
    }
}

/// Errors for one record as an object of `field -> message`.
#[must_use]
pub fn record_errors(kind: &KindDescriptor, record: &Value) -> Map<String, Value> {
    kind.fields
        .iter()
        .filter_map(|field| {
            field_error(field, record.get(field.name.as_str())).map(|msg| (field.name.clone(), Value::String(msg)))
        })
        .collect()
}

/// Error node for one kind value, or `None` when it is valid.
#[must_use]
pub fn kind_errors(kind: &KindDescriptor, value: Option<&Value>) -> Option<Value> {
    let value = value.filter(|v| !v.is_null())?;
    if kind.single {
        let errors = record_errors(kind, value);
        return (!errors.is_empty()).then_some(Value::Object(errors));
    }

    let records = value.as_array()?;
    let mut any = false;
    let per_record = records
        .iter()
        .map(|record| {
            let errors = record_errors(kind, record);
            if errors.is_empty() {
                Value::Null
            } else {
                any = true;
                Value::Object(errors)
            }
        })
        .collect::<Vec<_>>();
    any.then_some(Value::Array(per_record))
}

/// Error tree for every catalog kind stored under `values[parent]`.
#[must_use]
pub fn form_errors(parent: &str, catalog: &Catalog, values: &Value) -> Value {
    let Some(extras) = values.get(parent) else {
        return Value::Object(Map::new());
    };
    let kinds = catalog
        .kinds()
        .iter()
        .filter_map(|kind| kind_errors(kind, extras.get(kind.name.as_str())).map(|e| (kind.name.clone(), e)))
        .collect::<Map<String, Value>>();

    let mut root = Map::new();
    if !kinds.is_empty() {
        root.insert(parent.to_owned(), Value::Object(kinds));
    }
    Value::Object(root)
}

fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
