//! Headless board views.
//!
//! # Responsibility
//! - Hold what the board would display: the input form, two status lists
//!   and their project cards.
//! - Translate form submissions and drag signals into store mutations.
//!
//! # Invariants
//! - Views never keep a live reference to store state; they re-derive from
//!   each notification snapshot.

pub mod component;
pub mod project_input;
pub mod project_item;
pub mod project_list;
