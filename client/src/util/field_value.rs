//! Conversion between form values and the text shown in input controls.

#[cfg(test)]
#[path = "field_value_test.rs"]
mod field_value_test;

use extras::FieldType;
use serde_json::{Number, Value};

/// Value to store for the raw text of an input of `field_type`.
///
/// Numbers that do not parse are kept as text so validation can flag them.
/// Galleries take one image URL per line.
pub fn parse(field_type: FieldType, raw: &str) -> Value {
    match field_type {
        FieldType::Number => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Value::Null;
            }
            if let Ok(n) = trimmed.parse::<i64>() {
                return Value::from(n);
            }
            match trimmed.parse::<f64>().map(Number::from_f64) {
                Ok(Some(n)) => Value::Number(n),
                Ok(None) | Err(_) => Value::String(raw.to_owned()),
            }
        }
        FieldType::Gallery => {
            if raw.is_empty() {
                return Value::Array(Vec::new());
            }
            Value::Array(raw.split('\n').map(|line| Value::String(line.trim_end().to_owned())).collect())
        }
        FieldType::Text | FieldType::Textarea | FieldType::Markdown => Value::String(raw.to_owned()),
    }
}

/// Text to show in an input of `field_type` holding `value`.
pub fn display(field_type: FieldType, value: Option<&Value>) -> String {
    match (field_type, value) {
        (_, None | Some(Value::Null)) => String::new(),
        (FieldType::Gallery, Some(Value::Array(items))) => {
            items.iter().filter_map(Value::as_str).collect::<Vec<_>>().join("\n")
        }
        (_, Some(Value::String(s))) => s.clone(),
        (_, Some(other)) => other.to_string(),
    }
}
