//! Shared project state store.
//!
//! # Responsibility
//! - Own the authoritative, insertion-ordered project sequence.
//! - Apply add/move mutations and notify every listener afterwards.
//!
//! # Invariants
//! - Project IDs are unique within one store.
//! - `add_project` only appends; `move_project` only rewrites `status`.
//! - Every listener receives the full post-mutation sequence, never a diff.
//! - A lookup miss on move mutates nothing and notifies nobody.
//! - Mutations issued from a listener of the same store are rejected.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use crate::state::observer::{Listener, ObserverRegistry};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);
static PROJECT_STATE: Lazy<Arc<ProjectState>> = Lazy::new(|| Arc::new(ProjectState::new()));

thread_local! {
    // Stores currently dispatching notifications on this thread.
    static DISPATCHING: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
}

/// Returns the process-wide store, creating it on first access.
pub fn project_state() -> Arc<ProjectState> {
    Arc::clone(&PROJECT_STATE)
}

/// State store errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A listener tried to mutate the store that is notifying it.
    ReentrantMutation(&'static str),
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReentrantMutation(operation) => write!(
                f,
                "`{operation}` called from a listener while the store is notifying"
            ),
        }
    }
}

impl Error for StateError {}

pub type StateResult<T> = Result<T, StateError>;

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Status was written and listeners were notified.
    Moved,
    /// No project carries the requested ID.
    NotFound,
}

/// Project container with listener notification.
pub struct ProjectState {
    instance: u64,
    // Held across mutate + notify so notifications are never interleaved.
    write: Mutex<()>,
    projects: Mutex<Vec<Project>>,
    listeners: Mutex<ObserverRegistry<Project>>,
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectState {
    /// Creates an empty, independent store.
    ///
    /// Applications normally use [`project_state`]; tests build their own.
    pub fn new() -> Self {
        Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            write: Mutex::new(()),
            projects: Mutex::new(Vec::new()),
            listeners: Mutex::new(ObserverRegistry::new()),
        }
    }

    /// Registers a listener invoked after every mutation.
    ///
    /// A listener added while a notification is running joins from the next
    /// mutation on.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&[Project]) + Send + Sync + 'static,
    {
        self.subscribe_shared(Arc::new(listener));
    }

    /// Registers an already shared listener. Registering the same handle
    /// twice invokes it twice per mutation.
    pub fn subscribe_shared(&self, listener: Listener<Project>) {
        lock(&self.listeners).subscribe(listener);
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    /// Appends a new active project and notifies every listener.
    ///
    /// # Errors
    /// - `StateError::ReentrantMutation` when called from one of this
    ///   store's listeners during notification.
    pub fn add_project(
        &self,
        title: &str,
        description: &str,
        people: u32,
    ) -> StateResult<ProjectId> {
        let _dispatch = DispatchGuard::enter(self.instance, "add_project")?;
        let _write = lock(&self.write);

        let project = Project::create(title, description, people, ProjectStatus::Active);
        let id = project.id.clone();
        let snapshot = {
            let mut projects = lock(&self.projects);
            projects.push(project);
            projects.clone()
        };
        info!(
            "event=project_added module=state status=ok id={} people={} total={}",
            id,
            people,
            snapshot.len()
        );

        self.publish(&snapshot);
        Ok(id)
    }

    /// Sets the status of the first project matching `id`.
    ///
    /// Unknown IDs are expected when a drop races a list change; they return
    /// `MoveOutcome::NotFound` without notifying.
    ///
    /// # Errors
    /// - `StateError::ReentrantMutation` when called from one of this
    ///   store's listeners during notification.
    pub fn move_project(
        &self,
        id: impl AsRef<str>,
        new_status: ProjectStatus,
    ) -> StateResult<MoveOutcome> {
        let id = id.as_ref();
        let _dispatch = DispatchGuard::enter(self.instance, "move_project")?;
        let _write = lock(&self.write);

        let snapshot = {
            let mut projects = lock(&self.projects);
            let Some(project) = projects.iter_mut().find(|project| project.id.as_str() == id)
            else {
                debug!("event=project_move_miss module=state status=ok id={id}");
                return Ok(MoveOutcome::NotFound);
            };
            project.status = new_status;
            projects.clone()
        };
        info!("event=project_moved module=state status=ok id={id} to={new_status}");

        self.publish(&snapshot);
        Ok(MoveOutcome::Moved)
    }

    /// Returns a copy of the current sequence.
    pub fn projects(&self) -> Vec<Project> {
        lock(&self.projects).clone()
    }

    pub fn project(&self, id: impl AsRef<str>) -> Option<Project> {
        let id = id.as_ref();
        lock(&self.projects)
            .iter()
            .find(|project| project.id.as_str() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.projects).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.projects).is_empty()
    }

    fn publish(&self, snapshot: &[Project]) {
        // Listeners run without the registry lock so they may subscribe or read.
        let registry = lock(&self.listeners).clone();
        let report = registry.notify_all(snapshot);
        if report.failed > 0 {
            warn!(
                "event=notify module=state status=error delivered={} failed={}",
                report.delivered, report.failed
            );
        } else {
            debug!(
                "event=notify module=state status=ok delivered={}",
                report.delivered
            );
        }
    }
}

impl std::fmt::Debug for ProjectState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectState")
            .field("instance", &self.instance)
            .field("projects", &self.len())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

struct DispatchGuard {
    instance: u64,
}

impl DispatchGuard {
    fn enter(instance: u64, operation: &'static str) -> StateResult<Self> {
        let reentrant = DISPATCHING.with(|active| {
            let mut active = active.borrow_mut();
            if active.contains(&instance) {
                return true;
            }
            active.push(instance);
            false
        });
        if reentrant {
            warn!("event=reentrant_mutation module=state status=error operation={operation}");
            return Err(StateError::ReentrantMutation(operation));
        }
        Ok(Self { instance })
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        DISPATCHING.with(|active| active.borrow_mut().retain(|id| *id != self.instance));
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Listener panics are caught before they can poison a guard.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
