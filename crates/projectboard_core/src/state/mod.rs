//! Project state and change notification.
//!
//! # Responsibility
//! - Hold the single authoritative project collection.
//! - Notify views of every change with a full snapshot.

pub mod observer;
pub mod project_state;
