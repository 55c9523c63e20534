//! Drag-and-drop transition protocol.
//!
//! # Responsibility
//! - Model the drag signals exchanged between a source and a drop target.
//! - Carry exactly one `text/plain` project ID from source to target.
//!
//! # Invariants
//! - The protocol never touches the store except on drop.
//! - The status assigned on drop is fixed by the receiving target.

pub mod gesture;
pub mod transfer;

pub use gesture::{DragAction, DragError, DragGesture, DragPhase};
pub use transfer::{DataTransfer, DragEvent, DropEffect, TEXT_PLAIN};

/// Source side of a drag gesture.
pub trait Draggable {
    /// Attaches the payload. Must be a no-op without a transfer channel.
    fn drag_start(&self, event: &mut DragEvent);

    /// Runs after drop or cancel. Never mutates the store.
    fn drag_end(&self, event: &DragEvent);
}

/// Target side of a drag gesture.
pub trait DragTarget {
    /// Stable identity of the drop zone. Gestures compare targets by it.
    fn target_id(&self) -> &str;

    /// Accepts the drag by calling `event.prevent_default()` when the payload
    /// type is recognized.
    fn drag_over(&self, event: &mut DragEvent);

    /// Consumes the payload of an accepted drag.
    fn drop(&self, event: &DragEvent);

    /// Reverts eligibility marking. Idempotent.
    fn drag_leave(&self, event: &DragEvent);
}
