//! Project domain model.
//!
//! # Responsibility
//! - Define the canonical project record shown by both board lists.
//! - Generate stable identifiers at creation time.
//!
//! # Invariants
//! - `id` is generated once and never reused for another project.
//! - `status` is the only field that changes after creation.
//! - Construction performs no validation; callers validate form input first.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a project.
///
/// Carried as plain text across the drag payload, so it wraps a `String`
/// rather than a parsed UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Generates a fresh identifier from a random v4 UUID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ProjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Board column a project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Work not yet finished. Every new project starts here.
    Active,
    /// Work completed.
    Finished,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable ID, also the drag payload value.
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Number of people assigned. Positive once validated by the input form.
    pub people: u32,
    pub status: ProjectStatus,
}

impl Project {
    /// Creates a project with a freshly generated ID.
    ///
    /// Only the state store creates projects, so that ID generation and
    /// insertion happen together.
    pub(crate) fn create(
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
        status: ProjectStatus,
    ) -> Self {
        Self {
            id: ProjectId::generate(),
            title: title.into(),
            description: description.into(),
            people,
            status,
        }
    }

    /// Human-readable head count, e.g. `1 person` or `3 persons`.
    pub fn persons_label(&self) -> String {
        if self.people == 1 {
            "1 person".to_string()
        } else {
            format!("{} persons", self.people)
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }
}
