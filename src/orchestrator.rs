//! Top-level stage machine: tile gallery and focused editor.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gallery and the editor never show at the same time. Selecting a kind
//! first lets the gallery leave, and only once its exit has finished does the
//! editor open. Leaving the editor works the same way in reverse:
//!
//! ```text
//!   Gallery ──select──▶ TransitioningOut ──gallery_exited──▶ Editor
//!      ▲                                                       │
//!      └──────editor_exited────── TransitioningBack ◀──exit────┘
//! ```
//!
//! Every step that changes the visible view asks the host to scroll to the
//! top once the layout has settled ([`Effect::ScrollToTop`]). The core never
//! sleeps; the host owns the timer.
//!
//! All editor operations are also available as serializable [`Command`]s so
//! the CLI script runner and the UI drive the same code path.

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod orchestrator_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::editor::{EditorError, ExitReason, FocusedEditor, Outcome};
use crate::form::FormHandle;
use crate::schema::{Catalog, KindDescriptor};
use crate::tile::{self, Tile, TileAction};

/// Delay before the scroll-to-top effect fires after a view change.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Side effect the host performs after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Scroll the page to the top once `after` has elapsed.
    ScrollToTop { after: Duration },
}

impl Effect {
    fn scroll() -> Self {
        Self::ScrollToTop { after: SCROLL_SETTLE_DELAY }
    }
}

/// Where the orchestrator is.
#[derive(Debug, Clone)]
pub enum Stage {
    /// Tiles are shown.
    Gallery,
    /// A kind was picked; the gallery is playing its exit.
    TransitioningOut { kind: String },
    /// The focused editor is open.
    Editor(Box<FocusedEditor>),
    /// The editor finished; it is playing its exit.
    TransitioningBack { reason: ExitReason },
}

impl Stage {
    fn describe(&self) -> &'static str {
        match self {
            Self::Gallery => "showing the gallery",
            Self::TransitioningOut { .. } => "leaving the gallery",
            Self::Editor(_) => "in the editor",
            Self::TransitioningBack { .. } => "leaving the editor",
        }
    }
}

/// One operation on the extras subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Tile click.
    Select { kind: String },
    /// The gallery's exit transition finished.
    GalleryExited,
    StartCreate,
    /// Row click; `id` is the record's id at render time, if any.
    StartEdit {
        index: usize,
        #[serde(default)]
        id: Option<Value>,
    },
    SetField { field: String, value: Value },
    Done,
    Cancel {
        #[serde(default)]
        dismount: bool,
    },
    /// Row delete button.
    DeleteItem {
        index: usize,
        #[serde(default)]
        id: Option<Value>,
    },
    /// Click on a tile's data indicator.
    ClearKind { kind: String },
    /// Close the editor, discarding the open session.
    Close,
    /// The editor's exit transition finished.
    EditorExited,
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub outcome: Outcome,
    pub effects: Vec<Effect>,
}

impl Dispatch {
    fn stay(effects: Vec<Effect>) -> Self {
        Self { outcome: Outcome::Stay, effects }
    }
}

/// Owns the selected kind and the gallery/editor handshake.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    catalog: Catalog,
    parent: String,
    stage: Stage,
}

impl Orchestrator {
    #[must_use]
    pub fn new(catalog: Catalog, parent: &str) -> Self {
        Self { catalog, parent: parent.to_owned(), stage: Stage::Gallery }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn parent(&self) -> &str {
        &self.parent
    }

    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Kind picked from the gallery, while one is picked.
    #[must_use]
    pub fn selected(&self) -> Option<&KindDescriptor> {
        match &self.stage {
            Stage::TransitioningOut { kind } => self.catalog.get(kind),
            Stage::Editor(editor) => Some(editor.kind()),
            Stage::Gallery | Stage::TransitioningBack { .. } => None,
        }
    }

    /// Whether the tile gallery is mounted.
    #[must_use]
    pub fn show_gallery(&self) -> bool {
        matches!(self.stage, Stage::Gallery)
    }

    /// Whether the focused editor is mounted.
    #[must_use]
    pub fn show_focused(&self) -> bool {
        matches!(self.stage, Stage::Editor(_))
    }

    #[must_use]
    pub fn editor(&self) -> Option<&FocusedEditor> {
        match &self.stage {
            Stage::Editor(editor) => Some(&**editor),
            _ => None,
        }
    }

    /// One tile per catalog kind, in catalog order.
    #[must_use]
    pub fn tiles<'a>(&'a self, values: &'a Value) -> Vec<Tile<'a>> {
        self.catalog.kinds().iter().map(|kind| Tile::new(kind, values, &self.parent)).collect()
    }

    /// Pick `kind` from the gallery.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTransition`] outside the gallery and
    /// [`EditorError::UnknownKind`] for kinds missing from the catalog.
    pub fn select(&mut self, kind: &str) -> Result<Vec<Effect>, EditorError> {
        self.require_gallery("select")?;
        if self.catalog.get(kind).is_none() {
            return Err(EditorError::UnknownKind(kind.to_owned()));
        }
        self.stage = Stage::TransitioningOut { kind: kind.to_owned() };
        tracing::info!(kind, "extra kind selected");
        Ok(vec![Effect::scroll()])
    }

    /// The gallery has left; open the editor on the selected kind.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTransition`] unless a kind is selected,
    /// or whatever [`FocusedEditor::open`] reports. A failed open puts the
    /// gallery back.
    pub fn gallery_exited<F: FormHandle + ?Sized>(&mut self, form: &mut F) -> Result<Vec<Effect>, EditorError> {
        let Stage::TransitioningOut { kind } = &self.stage else {
            return Err(self.invalid("gallery_exited"));
        };
        let kind = kind.clone();
        let opened = self
            .catalog
            .get(&kind)
            .cloned()
            .ok_or_else(|| EditorError::UnknownKind(kind.clone()))
            .and_then(|descriptor| FocusedEditor::open(descriptor, &self.parent, form));
        match opened {
            Ok(editor) => {
                self.stage = Stage::Editor(Box::new(editor));
                Ok(vec![Effect::scroll()])
            }
            Err(e) => {
                tracing::warn!(kind = %kind, error = %e, "extras editor failed to open");
                self.stage = Stage::Gallery;
                Err(e)
            }
        }
    }

    /// The editor has left; show the gallery again.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTransition`] unless the editor is leaving.
    pub fn editor_exited(&mut self) -> Result<(), EditorError> {
        let Stage::TransitioningBack { reason } = self.stage else {
            return Err(self.invalid("editor_exited"));
        };
        self.stage = Stage::Gallery;
        tracing::debug!(?reason, "back to gallery");
        Ok(())
    }

    /// Close the editor as if the host dismounted it.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTransition`] outside the editor, or the
    /// editor's own error.
    pub fn close<F: FormHandle + ?Sized>(&mut self, form: &mut F) -> Result<Dispatch, EditorError> {
        let outcome = self.editor_mut("close")?.cancel(form, true)?;
        Ok(self.settle(outcome))
    }

    /// Click on the data indicator of `kind`'s tile.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTransition`] outside the gallery,
    /// [`EditorError::UnknownKind`] for unknown kinds, or a path error.
    pub fn click_indicator<F: FormHandle + ?Sized>(
        &mut self,
        form: &mut F,
        kind: &str,
    ) -> Result<(TileAction, Vec<Effect>), EditorError> {
        self.require_gallery("click_indicator")?;
        let descriptor = self.catalog.get(kind).ok_or_else(|| EditorError::UnknownKind(kind.to_owned()))?;
        let action = tile::click_indicator(form, descriptor, &self.parent)?;
        let effects = match &action {
            TileAction::Select(name) => self.select(name)?,
            TileAction::Deleted(_) => Vec::new(),
        };
        Ok((action, effects))
    }

    /// Run one command.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTransition`] when the command does not
    /// fit the current stage, or the error of the operation it maps to.
    pub fn apply<F: FormHandle + ?Sized>(&mut self, form: &mut F, command: Command) -> Result<Dispatch, EditorError> {
        tracing::debug!(?command, stage = self.stage.describe(), "apply command");
        match command {
            Command::Select { kind } => Ok(Dispatch::stay(self.select(&kind)?)),
            Command::GalleryExited => Ok(Dispatch::stay(self.gallery_exited(form)?)),
            Command::EditorExited => {
                self.editor_exited()?;
                Ok(Dispatch::stay(Vec::new()))
            }
            Command::ClearKind { kind } => {
                let (_, effects) = self.click_indicator(form, &kind)?;
                Ok(Dispatch::stay(effects))
            }
            Command::Close => self.close(form),
            Command::StartCreate => {
                self.editor_mut("start_create")?.start_create(form)?;
                Ok(Dispatch::stay(Vec::new()))
            }
            Command::StartEdit { index, id } => {
                self.editor_mut("start_edit")?.start_edit(form, &rendered_record(id), index)?;
                Ok(Dispatch::stay(Vec::new()))
            }
            Command::SetField { field, value } => {
                self.editor_mut("set_field")?.set_field(form, &field, value)?;
                Ok(Dispatch::stay(Vec::new()))
            }
            Command::DeleteItem { index, id } => {
                self.editor_mut("delete_item")?.delete_item(form, &rendered_record(id), index)?;
                Ok(Dispatch::stay(Vec::new()))
            }
            Command::Done => {
                let outcome = self.editor_mut("done")?.done(form)?;
                Ok(self.settle(outcome))
            }
            Command::Cancel { dismount } => {
                let outcome = self.editor_mut("cancel")?.cancel(form, dismount)?;
                Ok(self.settle(outcome))
            }
        }
    }

    /// Move to `TransitioningBack` when the editor reported an exit.
    fn settle(&mut self, outcome: Outcome) -> Dispatch {
        let Outcome::Exit(reason) = outcome else {
            return Dispatch { outcome, effects: Vec::new() };
        };
        self.stage = Stage::TransitioningBack { reason };
        tracing::info!(?reason, "extras editor closing");
        Dispatch { outcome, effects: vec![Effect::scroll()] }
    }

    fn editor_mut(&mut self, op: &'static str) -> Result<&mut FocusedEditor, EditorError> {
        match &mut self.stage {
            Stage::Editor(editor) => Ok(&mut **editor),
            other => Err(EditorError::InvalidTransition { op, state: other.describe() }),
        }
    }

    fn require_gallery(&self, op: &'static str) -> Result<(), EditorError> {
        if self.show_gallery() { Ok(()) } else { Err(self.invalid(op)) }
    }

    fn invalid(&self, op: &'static str) -> EditorError {
        EditorError::InvalidTransition { op, state: self.stage.describe() }
    }
}

/// The record a row click refers to; only its id matters for resolution.
fn rendered_record(id: Option<Value>) -> Value {
    id.map_or(Value::Null, |id| json!({ "id": id }))
}
