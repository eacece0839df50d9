//! Kind and field descriptors, and the catalog of kinds a profile can carry.
//!
//! DESIGN
//! ======
//! Descriptors are static configuration. The editor never mutates them; a
//! session clones the descriptor of the kind it edits. A catalog is either
//! the built-in one or loaded from YAML/JSON text, and is checked once on
//! construction so the rest of the crate can rely on its shape: unique kind
//! names, at least one field per kind, and an item class on every
//! multi-valued kind.

#[cfg(test)]
#[path = "schema_test.rs"]
mod schema_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::item::ItemClass;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate kind `{0}`")]
    DuplicateKind(String),
    #[error("kind `{0}` declares no fields")]
    NoFields(String),
    #[error("multi-valued kind `{0}` has no item class")]
    MissingClass(String),
    #[error("kind `{kind}` declares field `{field}` twice")]
    DuplicateField { kind: String, field: String },
}

// =============================================================================
// FIELDS
// =============================================================================

/// Input type of a field, which also decides its blank value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Markdown,
    Number,
    /// Ordered list of image URLs.
    Gallery,
}

impl FieldType {
    /// Value a freshly created record holds for a field of this type.
    #[must_use]
    pub fn default_value(self) -> Value {
        match self {
            Self::Number => Value::from(0),
            Self::Gallery => Value::Array(Vec::new()),
            Self::Text | Self::Textarea | Self::Markdown => Value::String(String::new()),
        }
    }
}

/// One editable property of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Blank values are reported as errors.
    #[serde(default)]
    pub required: bool,
    /// Lower bound for number fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self { name: name.to_owned(), label: None, field_type, required: false, min: None }
    }

    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_owned());
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Display label, falling back to the field name.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

// =============================================================================
// KINDS
// =============================================================================

/// Schema of one extra kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindDescriptor {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub icon: String,
    /// One record instead of an ordered list of records.
    #[serde(default)]
    pub single: bool,
    /// Noun for one record ("Post", "Offer"); falls back to `label`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_label: Option<String>,
    /// Renderer tag for list items. Required for multi-valued kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<ItemClass>,
    pub fields: Vec<FieldDescriptor>,
}

impl KindDescriptor {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn first_field(&self) -> Option<&FieldDescriptor> {
        self.fields.first()
    }

    #[must_use]
    pub fn item_label(&self) -> &str {
        self.item_label.as_deref().unwrap_or(&self.label)
    }

    /// A record with every schema field at its type default.
    #[must_use]
    pub fn blank_record(&self) -> Value {
        let map = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.field_type.default_value()))
            .collect::<Map<String, Value>>();
        Value::Object(map)
    }

    /// Whether every schema field of `record` is absent or at its default.
    /// Keys outside the schema (such as `id`) are ignored.
    #[must_use]
    pub fn is_blank(&self, record: &Value) -> bool {
        self.fields.iter().all(|f| match record.get(f.name.as_str()) {
            None | Some(Value::Null) => true,
            Some(value) => is_default_for(f.field_type, value),
        })
    }
}

fn is_default_for(field_type: FieldType, value: &Value) -> bool {
    match field_type {
        FieldType::Number => value.as_f64() == Some(0.0),
        FieldType::Gallery => value.as_array().is_some_and(Vec::is_empty),
        FieldType::Text | FieldType::Textarea | FieldType::Markdown => {
            value.as_str().is_some_and(|s| s.trim().is_empty())
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// The ordered set of kinds offered in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    kinds: Vec<KindDescriptor>,
}

#[derive(Deserialize)]
struct CatalogFile {
    kinds: Vec<KindDescriptor>,
}

impl Catalog {
    /// Build a catalog, checking descriptor consistency.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found among duplicate kinds,
    /// duplicate fields, kinds without fields, and multi-valued kinds
    /// without an item class.
    pub fn new(kinds: Vec<KindDescriptor>) -> Result<Self, CatalogError> {
        let mut names = HashSet::new();
        for kind in &kinds {
            if !names.insert(kind.name.as_str()) {
                return Err(CatalogError::DuplicateKind(kind.name.clone()));
            }
            if kind.fields.is_empty() {
                return Err(CatalogError::NoFields(kind.name.clone()));
            }
            if !kind.single && kind.class.is_none() {
                return Err(CatalogError::MissingClass(kind.name.clone()));
            }
            let mut fields = HashSet::new();
            for field in &kind.fields {
                if !fields.insert(field.name.as_str()) {
                    return Err(CatalogError::DuplicateField { kind: kind.name.clone(), field: field.name.clone() });
                }
            }
        }
        Ok(Self { kinds })
    }

    /// Parse a catalog document of the form `kinds: [...]`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] for unparseable input, or a consistency
    /// error from [`Catalog::new`].
    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(text)?;
        Self::new(file.kinds)
    }

    /// Parse a catalog document of the form `{"kinds": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] for unparseable input, or a consistency
    /// error from [`Catalog::new`].
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(text)?;
        Self::new(file.kinds)
    }

    /// The kinds a profile offers out of the box.
    #[must_use]
    pub fn builtin() -> Self {
        let priced_fields = |price_label: &str| {
            vec![
                FieldDescriptor::new("title", FieldType::Text).label("Title").required(),
                FieldDescriptor::new("price", FieldType::Number).label(price_label).min(0.0),
                FieldDescriptor::new("description", FieldType::Textarea).label("Description"),
                FieldDescriptor::new("gallery", FieldType::Gallery).label("Images"),
            ]
        };

        Self {
            kinds: vec![
                KindDescriptor {
                    name: "twitter".to_owned(),
                    label: "Twitter".to_owned(),
                    icon: "twitter".to_owned(),
                    single: true,
                    item_label: None,
                    class: None,
                    fields: vec![FieldDescriptor::new("handle", FieldType::Text).label("Handle")],
                },
                KindDescriptor {
                    name: "blog".to_owned(),
                    label: "Blog".to_owned(),
                    icon: "blog".to_owned(),
                    single: false,
                    item_label: Some("Post".to_owned()),
                    class: Some(ItemClass::Blog),
                    fields: vec![
                        FieldDescriptor::new("title", FieldType::Text).label("Title").required(),
                        FieldDescriptor::new("markdown", FieldType::Markdown).label("Body"),
                        FieldDescriptor::new("gallery", FieldType::Gallery).label("Images"),
                    ],
                },
                KindDescriptor {
                    name: "offers".to_owned(),
                    label: "Offers".to_owned(),
                    icon: "offer".to_owned(),
                    single: false,
                    item_label: Some("Offer".to_owned()),
                    class: Some(ItemClass::Offer),
                    fields: priced_fields("Price"),
                },
                KindDescriptor {
                    name: "wanted".to_owned(),
                    label: "Wanted".to_owned(),
                    icon: "wanted".to_owned(),
                    single: false,
                    item_label: Some("Request".to_owned()),
                    class: Some(ItemClass::Wanted),
                    fields: priced_fields("Budget"),
                },
            ],
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&KindDescriptor> {
        self.kinds.iter().find(|k| k.name == name)
    }

    #[must_use]
    pub fn kinds(&self) -> &[KindDescriptor] {
        &self.kinds
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
