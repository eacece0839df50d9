//! Focused editor for one extra kind.
//!
//! DESIGN
//! ======
//! Edits are not buffered. Every field change goes straight into the form at
//! the record's path, so the form always shows the draft. Rolling back is
//! possible because the editor keeps `prev_state`, the kind value as it was
//! when the current session started.
//!
//! States:
//!
//! ```text
//!            start_create / start_edit
//!   List ───────────────────────────────▶ Editing
//!    ▲  ◀─────────────────────────────────  │
//!    │     done / cancel (multi-valued)     │ done / cancel (single-valued)
//!    │                                      ▼
//!    └──── cancel(dismount) ───────────▶ Closed
//! ```
//!
//! Single-valued kinds have no list: they open directly in `Editing` and
//! leave through `Closed`.
//!
//! Cancel rule, for every state the editor can be in:
//!
//! | State | Origin | Dismount | Effect |
//! |-------|--------|----------|--------|
//! | Editing, single-valued | any | any | restore `prev_state`, close |
//! | Editing, multi-valued | create | no | restore `prev_state`, back to list |
//! | Editing, multi-valued | create | yes | restore `prev_state`, close |
//! | Editing, multi-valued | edit | no | keep the live list, back to list |
//! | Editing, multi-valued | edit | yes | restore `prev_state`, close |
//! | List | - | no | nothing |
//! | List | - | yes | close, nothing restored |

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use serde_json::Value;
use uuid::Uuid;

use crate::form::{FormHandle, ListShift};
use crate::list::{self, ListError};
use crate::path::{FieldPath, PathError};
use crate::schema::KindDescriptor;
use crate::validate;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    List(#[from] ListError),
    #[error("unknown kind `{0}`")]
    UnknownKind(String),
    #[error("kind `{kind}` has no field `{field}`")]
    UnknownField { kind: String, field: String },
    #[error("`{op}` is not allowed while {state}")]
    InvalidTransition { op: &'static str, state: &'static str },
    #[error("record index {index} out of range for `{kind}` (len {len})")]
    IndexOutOfRange { kind: String, index: usize, len: usize },
    #[error("kind `{kind}` holds {found}, expected {expected}")]
    ShapeMismatch { kind: String, expected: &'static str, found: &'static str },
}

/// How the record under edit came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A blank record was added by this session.
    Create,
    /// An existing record was opened.
    Edit,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Saved,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Showing the record list of a multi-valued kind.
    List,
    /// Editing one record. `index` is `None` for single-valued kinds.
    Editing { index: Option<usize>, origin: Origin },
    /// The session is over.
    Closed(ExitReason),
}

impl EditorMode {
    fn describe(self) -> &'static str {
        match self {
            Self::List => "showing the list",
            Self::Editing { .. } => "editing a record",
            Self::Closed(_) => "closed",
        }
    }
}

/// Blocking notice surfaced when save is refused.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationNotice {
    /// Path of the record that failed validation.
    pub path: FieldPath,
    /// Error node of that record.
    pub errors: Value,
}

impl ValidationNotice {
    /// One-line message listing the failing fields.
    #[must_use]
    pub fn message(&self) -> String {
        let details = match &self.errors {
            Value::Object(map) => map
                .values()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; "),
            Value::String(s) => s.clone(),
            _ => String::new(),
        };
        if details.is_empty() {
            "Fix the highlighted fields before saving".to_owned()
        } else {
            format!("Fix the highlighted fields before saving: {details}")
        }
    }
}

/// Result of a `done`/`cancel` request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The editor is still open.
    Stay,
    /// Save refused; nothing changed.
    Blocked(ValidationNotice),
    /// The session ended.
    Exit(ExitReason),
}

// =============================================================================
// EDITOR
// =============================================================================

/// Edit session for one kind.
#[derive(Debug, Clone)]
pub struct FocusedEditor {
    kind: KindDescriptor,
    kind_path: FieldPath,
    mode: EditorMode,
    prev_state: Option<Value>,
}

impl FocusedEditor {
    /// Open a session on `kind`, stored at `<parent>.<kind>`.
    ///
    /// Multi-valued kinds open on the list. Single-valued kinds open straight
    /// into editing, with the first field seeded from its type default when
    /// it has no value yet.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ShapeMismatch`] when the stored value does not
    /// match the kind's cardinality, or a path error when seeding fails.
    pub fn open<F: FormHandle + ?Sized>(kind: KindDescriptor, parent: &str, form: &mut F) -> Result<Self, EditorError> {
        let kind_path = FieldPath::for_kind(parent, &kind.name);
        let prev_state = form.value_at(&kind_path).cloned();
        check_shape(&kind, prev_state.as_ref())?;

        let mode = if kind.single {
            let origin = if prev_state.is_some() { Origin::Edit } else { Origin::Create };
            EditorMode::Editing { index: None, origin }
        } else {
            EditorMode::List
        };
        let editor = Self { kind, kind_path, mode, prev_state };
        if editor.kind.single {
            editor.seed_first_field(form)?;
        }

        tracing::info!(kind = %editor.kind.name, single = editor.kind.single, "extras editor opened");
        Ok(editor)
    }

    #[must_use]
    pub fn kind(&self) -> &KindDescriptor {
        &self.kind
    }

    #[must_use]
    pub fn kind_path(&self) -> &FieldPath {
        &self.kind_path
    }

    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Index of the record under edit; `None` on the list (and always for
    /// single-valued kinds).
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        match self.mode {
            EditorMode::Editing { index, .. } => index,
            EditorMode::List | EditorMode::Closed(_) => None,
        }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Editing { .. })
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.mode, EditorMode::Closed(_))
    }

    /// Rollback point of the current session (`None` = undefined).
    #[must_use]
    pub fn prev_state(&self) -> Option<&Value> {
        self.prev_state.as_ref()
    }

    /// Path of the record under edit, if any.
    #[must_use]
    pub fn record_path(&self) -> Option<FieldPath> {
        match self.mode {
            EditorMode::Editing { index, .. } => Some(self.path_for(index)),
            EditorMode::List | EditorMode::Closed(_) => None,
        }
    }

    /// Path of `field` on the record under edit.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownField`] for fields outside the schema and
    /// [`EditorError::InvalidTransition`] when no record is being edited.
    pub fn field_path(&self, field: &str) -> Result<FieldPath, EditorError> {
        if self.kind.field(field).is_none() {
            return Err(EditorError::UnknownField { kind: self.kind.name.clone(), field: field.to_owned() });
        }
        let record = self.record_path().ok_or(EditorError::InvalidTransition {
            op: "field_path",
            state: self.mode.describe(),
        })?;
        Ok(record.key(field))
    }

    /// Add a blank record at the front of the list and start editing it.
    ///
    /// For single-valued kinds there is nothing to add: the first field is
    /// marked touched instead.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTransition`] outside the list, or a
    /// shape/path error from the form.
    pub fn start_create<F: FormHandle + ?Sized>(&mut self, form: &mut F) -> Result<(), EditorError> {
        if self.kind.single {
            self.require_editing("start_create")?;
            if let Some(field) = self.kind.first_field() {
                let path = self.path_for(None).key(field.name.as_str());
                form.set_touched(&path, true)?;
            }
            return Ok(());
        }
        self.require_list("start_create")?;

        let current = form.value_at(&self.kind_path).cloned();
        check_shape(&self.kind, current.as_ref())?;
        let mut records = current.as_ref().and_then(Value::as_array).cloned().unwrap_or_default();

        let mut blank = self.kind.blank_record();
        if let Value::Object(map) = &mut blank {
            map.insert("id".to_owned(), Value::String(Uuid::new_v4().to_string()));
        }
        records.insert(0, blank);

        form.set_value(&self.kind_path, Some(Value::Array(records)))?;
        form.shift_touched(&self.kind_path, ListShift::Inserted(0))?;
        self.prev_state = current;
        self.mode = EditorMode::Editing { index: Some(0), origin: Origin::Create };
        tracing::debug!(kind = %self.kind.name, "blank record created");
        Ok(())
    }

    /// Start editing `record`, rendered at `index` in the list.
    ///
    /// The index is re-resolved by the record's `id` when it has one.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTransition`] outside the list and
    /// [`EditorError::IndexOutOfRange`] when the resolved index is not in the
    /// current list.
    pub fn start_edit<F: FormHandle + ?Sized>(
        &mut self,
        form: &mut F,
        record: &Value,
        index: usize,
    ) -> Result<(), EditorError> {
        self.require_list("start_edit")?;
        let records = list::records_at(form, &self.kind_path)?;
        let resolved = list::resolve_index(&records, record, index);
        if resolved >= records.len() {
            return Err(EditorError::IndexOutOfRange {
                kind: self.kind.name.clone(),
                index: resolved,
                len: records.len(),
            });
        }

        self.prev_state = form.value_at(&self.kind_path).cloned();
        self.mode = EditorMode::Editing { index: Some(resolved), origin: Origin::Edit };
        tracing::debug!(kind = %self.kind.name, index = resolved, "record opened for edit");
        Ok(())
    }

    /// Write one field of the record under edit and mark it touched.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTransition`] when no record is being
    /// edited, [`EditorError::UnknownField`] for fields outside the schema,
    /// or a path error from the form.
    pub fn set_field<F: FormHandle + ?Sized>(&mut self, form: &mut F, field: &str, value: Value) -> Result<(), EditorError> {
        self.require_editing("set_field")?;
        let path = self.field_path(field)?;
        form.set_touched(&path, true)?;
        form.set_value(&path, Some(value))?;
        Ok(())
    }

    /// Delete a record from the list. Commits immediately.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTransition`] outside the list, or the
    /// list error from [`list::delete_item`].
    pub fn delete_item<F: FormHandle + ?Sized>(
        &mut self,
        form: &mut F,
        record: &Value,
        index: usize,
    ) -> Result<Value, EditorError> {
        self.require_list("delete_item")?;
        Ok(list::delete_item(form, &self.kind_path, record, index)?)
    }

    /// Save the record under edit.
    ///
    /// Refused with [`Outcome::Blocked`] while the record has validation
    /// errors; the fields with errors are marked touched. On success a
    /// multi-valued kind returns to the list and a single-valued kind closes.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTransition`] when no record is being
    /// edited, or a path error from the form.
    pub fn done<F: FormHandle + ?Sized>(&mut self, form: &mut F) -> Result<Outcome, EditorError> {
        let EditorMode::Editing { index, .. } = self.mode else {
            return Err(EditorError::InvalidTransition { op: "done", state: self.mode.describe() });
        };
        let record_path = self.path_for(index);

        let errors = form.errors_at(&record_path).cloned();
        if validate::has_errors(errors.as_ref()) {
            let notice = ValidationNotice { path: record_path.clone(), errors: errors.unwrap_or(Value::Null) };
            if let Value::Object(fields) = &notice.errors {
                for field in fields.keys() {
                    form.set_touched(&record_path.clone().key(field.as_str()), true)?;
                }
            }
            tracing::warn!(path = %record_path, message = %notice.message(), "save blocked by validation errors");
            return Ok(Outcome::Blocked(notice));
        }

        if self.kind.single {
            let blank = form.value_at(&self.kind_path).is_some_and(|record| self.kind.is_blank(record));
            if blank {
                form.set_value(&self.kind_path, None)?;
            }
            self.prev_state = form.value_at(&self.kind_path).cloned();
            self.mode = EditorMode::Closed(ExitReason::Saved);
            tracing::info!(kind = %self.kind.name, cleared = blank, "extra saved");
            return Ok(Outcome::Exit(ExitReason::Saved));
        }

        self.prev_state = form.value_at(&self.kind_path).cloned();
        self.mode = EditorMode::List;
        tracing::info!(kind = %self.kind.name, index = ?index, "record saved");
        Ok(Outcome::Stay)
    }

    /// Leave the record under edit, or the editor itself when `dismount`.
    /// See the module docs for which cases restore `prev_state`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTransition`] once closed, or a path
    /// error when restoring fails.
    pub fn cancel<F: FormHandle + ?Sized>(&mut self, form: &mut F, dismount: bool) -> Result<Outcome, EditorError> {
        match self.mode {
            EditorMode::Closed(_) => Err(EditorError::InvalidTransition { op: "cancel", state: self.mode.describe() }),
            EditorMode::List => {
                if !dismount {
                    return Ok(Outcome::Stay);
                }
                self.mode = EditorMode::Closed(ExitReason::Cancelled);
                tracing::debug!(kind = %self.kind.name, "extras editor dismissed from list");
                Ok(Outcome::Exit(ExitReason::Cancelled))
            }
            EditorMode::Editing { origin, .. } => {
                let restore = self.kind.single || dismount || origin == Origin::Create;
                if restore {
                    form.set_value(&self.kind_path, self.prev_state.clone())?;
                    if origin == Origin::Create && !self.kind.single {
                        form.shift_touched(&self.kind_path, ListShift::Removed(0))?;
                    }
                } else {
                    self.prev_state = form.value_at(&self.kind_path).cloned();
                }

                if self.kind.single || dismount {
                    self.mode = EditorMode::Closed(ExitReason::Cancelled);
                    tracing::info!(kind = %self.kind.name, restored = restore, "extras edit cancelled");
                    Ok(Outcome::Exit(ExitReason::Cancelled))
                } else {
                    self.mode = EditorMode::List;
                    tracing::debug!(kind = %self.kind.name, restored = restore, "back to list");
                    Ok(Outcome::Stay)
                }
            }
        }
    }

    fn path_for(&self, index: Option<usize>) -> FieldPath {
        match index {
            Some(i) => self.kind_path.clone().index(i),
            None => self.kind_path.clone(),
        }
    }

    /// Make sure the first field of a single-valued kind has a value.
    fn seed_first_field<F: FormHandle + ?Sized>(&self, form: &mut F) -> Result<(), EditorError> {
        let Some(field) = self.kind.first_field() else {
            return Ok(());
        };
        let path = self.kind_path.clone().key(field.name.as_str());
        if form.value_at(&path).is_none() {
            form.set_value(&path, Some(field.field_type.default_value()))?;
        }
        Ok(())
    }

    fn require_list(&self, op: &'static str) -> Result<(), EditorError> {
        if self.kind.single {
            return Err(EditorError::InvalidTransition { op, state: "editing a single-valued kind" });
        }
        match self.mode {
            EditorMode::List => Ok(()),
            other => Err(EditorError::InvalidTransition { op, state: other.describe() }),
        }
    }

    fn require_editing(&self, op: &'static str) -> Result<(), EditorError> {
        match self.mode {
            EditorMode::Editing { .. } => Ok(()),
            other => Err(EditorError::InvalidTransition { op, state: other.describe() }),
        }
    }
}

/// Reject stored values whose cardinality disagrees with the kind.
fn check_shape(kind: &KindDescriptor, value: Option<&Value>) -> Result<(), EditorError> {
    let (ok, expected) = match value {
        None => return Ok(()),
        Some(v) if kind.single => (v.is_object(), "a record"),
        Some(v) => (v.is_array(), "a list of records"),
    };
    if ok {
        return Ok(());
    }
    Err(EditorError::ShapeMismatch {
        kind: kind.name.clone(),
        expected,
        found: value.map_or("nothing", crate::path::value_type_name),
    })
}
