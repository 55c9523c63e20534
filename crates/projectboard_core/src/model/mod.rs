//! Domain model for board projects.
//!
//! # Responsibility
//! - Define the project record and its status lifecycle.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Projects are never removed; only `status` changes after creation.

pub mod project;
