//! Core logic for the project board.
//! This crate owns project state and the drag-and-drop protocol that moves
//! projects between the active and finished lists.

pub mod dnd;
pub mod logging;
pub mod model;
pub mod state;
pub mod validation;
pub mod view;

pub use dnd::{
    DataTransfer, DragAction, DragError, DragEvent, DragGesture, DragPhase, DragTarget, Draggable,
    DropEffect, TEXT_PLAIN,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::project::{Project, ProjectId, ProjectStatus};
pub use state::observer::{Listener, NotifyReport, ObserverRegistry};
pub use state::project_state::{project_state, MoveOutcome, ProjectState, StateError, StateResult};
pub use validation::{validate, FieldValue, Validatable};
pub use view::component::{attach, Element, Host, InsertPosition, Renderable};
pub use view::project_input::{InputError, InputFields, ProjectInput};
pub use view::project_item::{ItemContent, ProjectItem};
pub use view::project_list::{ListKind, ProjectList};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
