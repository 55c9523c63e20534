//! Status column of the board; the drop target side of the protocol.
//!
//! # Invariants
//! - A list only shows projects whose status matches its kind.
//! - A drop always moves the project to the list's own status.
//! - The list re-derives its projects from the full snapshot on every change.

use crate::dnd::{DragEvent, DragTarget, TEXT_PLAIN};
use crate::model::project::{Project, ProjectStatus};
use crate::state::project_state::{MoveOutcome, ProjectState};
use crate::view::component::{attach, Element, Host, InsertPosition, Renderable};
use crate::view::project_item::ProjectItem;
use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const LIST_TEMPLATE: &str = "project-list";

/// Which board column a list renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Active,
    Finished,
}

impl ListKind {
    /// Status assigned to projects dropped on this list.
    pub fn target_status(self) -> ProjectStatus {
        match self {
            Self::Active => ProjectStatus::Active,
            Self::Finished => ProjectStatus::Finished,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }

    pub fn element_id(self) -> String {
        format!("{}-projects", self.as_str())
    }

    pub fn list_id(self) -> String {
        format!("{}-projects-list", self.as_str())
    }

    pub fn heading(self) -> String {
        format!("{} PROJECTS", self.as_str().to_uppercase())
    }
}

#[derive(Debug)]
struct ListModel {
    assigned: Vec<Project>,
    items: Vec<ProjectItem>,
    list_host: Host,
    droppable: bool,
}

impl ListModel {
    fn assign(&mut self, kind: ListKind, projects: &[Project]) {
        let status = kind.target_status();
        self.assigned = projects
            .iter()
            .filter(|project| project.status == status)
            .cloned()
            .collect();
        self.render_projects();
    }

    fn render_projects(&mut self) {
        self.list_host.clear();
        self.items = self.assigned.iter().cloned().map(ProjectItem::new).collect();
        for item in &self.items {
            attach(&mut self.list_host, item.element().clone(), InsertPosition::BeforeEnd);
        }
    }
}

/// One of the two board columns.
#[derive(Debug)]
pub struct ProjectList {
    kind: ListKind,
    state: Arc<ProjectState>,
    element: Element,
    heading: String,
    model: Arc<Mutex<ListModel>>,
    configured: bool,
}

impl ProjectList {
    /// Creates the list and subscribes it to `state`.
    pub fn new(kind: ListKind, state: Arc<ProjectState>) -> Self {
        let model = ListModel {
            assigned: Vec::new(),
            items: Vec::new(),
            list_host: Host::new(kind.list_id()),
            droppable: false,
        };
        let mut list = Self {
            kind,
            state,
            element: Element::new(LIST_TEMPLATE, kind.element_id()),
            heading: String::new(),
            model: Arc::new(Mutex::new(model)),
            configured: false,
        };
        list.configure();
        list.render_content();
        list
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Projects currently shown, in store order.
    pub fn assigned_projects(&self) -> Vec<Project> {
        lock(&self.model).assigned.clone()
    }

    pub fn items(&self) -> Vec<ProjectItem> {
        lock(&self.model).items.clone()
    }

    /// Element IDs of the rendered cards, in display order.
    pub fn item_ids(&self) -> Vec<String> {
        lock(&self.model)
            .list_host
            .element_ids()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Whether the list is currently highlighted as a drop zone.
    pub fn is_droppable(&self) -> bool {
        lock(&self.model).droppable
    }

    fn set_droppable(&self, droppable: bool) {
        lock(&self.model).droppable = droppable;
    }
}

impl Renderable for ProjectList {
    fn configure(&mut self) {
        if self.configured {
            return;
        }
        let model = Arc::clone(&self.model);
        let kind = self.kind;
        self.state.subscribe(move |projects: &[Project]| {
            lock(&model).assign(kind, projects);
        });
        self.configured = true;
    }

    fn render_content(&mut self) {
        self.heading = self.kind.heading();
    }
}

impl DragTarget for ProjectList {
    fn target_id(&self) -> &str {
        &self.element.id
    }

    fn drag_over(&self, event: &mut DragEvent) {
        let accepts = event
            .data_transfer()
            .and_then(|transfer| transfer.first_type())
            == Some(TEXT_PLAIN);
        if accepts {
            event.prevent_default();
            self.set_droppable(true);
        }
    }

    fn drop(&self, event: &DragEvent) {
        self.set_droppable(false);
        let Some(id) = event
            .data_transfer()
            .and_then(|transfer| transfer.get_data(TEXT_PLAIN))
        else {
            return;
        };

        match self.state.move_project(id, self.kind.target_status()) {
            Ok(MoveOutcome::Moved) => {}
            Ok(MoveOutcome::NotFound) => {
                debug!(
                    "event=drop_miss module=view status=ok list={} id={id}",
                    self.kind.as_str()
                );
            }
            Err(err) => {
                warn!(
                    "event=drop module=view status=error list={} error={err}",
                    self.kind.as_str()
                );
            }
        }
    }

    fn drag_leave(&self, _event: &DragEvent) {
        self.set_droppable(false);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
