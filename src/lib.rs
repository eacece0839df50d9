//! Schema-driven editor for profile "extras".
//!
//! A profile carries a handful of extra kinds (a Twitter handle, blog posts,
//! offers, wanted ads). This crate owns the in-memory editing model for them:
//! picking a kind from a tile gallery, creating and editing records of that
//! kind, and committing or rolling back the result inside the enclosing form.
//! It never talks to the network and never persists anything; the host reads
//! the form values when the session is over.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`path`] | Dotted field paths (`extras.blog[0].title`) into a JSON value tree |
//! | [`form`] | The [`form::FormHandle`] command interface and the in-memory [`form::Form`] |
//! | [`schema`] | Kind and field descriptors plus the kind [`schema::Catalog`] |
//! | [`validate`] | Field-error computation driven by the schema |
//! | [`item`] | Read-only summaries of a single record, dispatched by item class |
//! | [`list`] | The ordered record list for a multi-valued kind |
//! | [`tile`] | Gallery tiles and the "has data" indicator |
//! | [`editor`] | The focused editor state machine for one kind |
//! | [`orchestrator`] | Gallery/editor stage machine and command dispatch |

pub mod editor;
pub mod form;
pub mod item;
pub mod list;
pub mod orchestrator;
pub mod path;
pub mod schema;
pub mod tile;
pub mod validate;

pub use editor::{EditorError, EditorMode, ExitReason, FocusedEditor, Origin, Outcome, ValidationNotice};
pub use form::{Form, FormHandle, ListShift};
pub use item::{ItemClass, ItemSummary};
pub use orchestrator::{Command, Dispatch, Effect, Orchestrator, Stage};
pub use path::{FieldPath, PathError};
pub use schema::{Catalog, CatalogError, FieldDescriptor, FieldType, KindDescriptor};
