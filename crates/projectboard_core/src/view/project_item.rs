//! Single project card; the drag source of the board.

use crate::dnd::{DragEvent, Draggable, DropEffect, TEXT_PLAIN};
use crate::model::project::Project;
use crate::view::component::{Element, Renderable};
use log::debug;

const ITEM_TEMPLATE: &str = "single-project";

/// Text shown on one project card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemContent {
    pub title: String,
    /// e.g. `3 persons assigned`.
    pub assigned: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    project: Project,
    element: Element,
    content: ItemContent,
}

impl ProjectItem {
    pub fn new(project: Project) -> Self {
        let element = Element::new(ITEM_TEMPLATE, project.id.as_str());
        let mut item = Self {
            project,
            element,
            content: ItemContent::default(),
        };
        item.configure();
        item.render_content();
        item
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn content(&self) -> &ItemContent {
        &self.content
    }
}

impl Renderable for ProjectItem {
    // Drag handlers are the `Draggable` impl; nothing to bind.
    fn configure(&mut self) {}

    fn render_content(&mut self) {
        self.content = ItemContent {
            title: self.project.title.clone(),
            assigned: format!("{} assigned", self.project.persons_label()),
            description: self.project.description.clone(),
        };
    }
}

impl Draggable for ProjectItem {
    fn drag_start(&self, event: &mut DragEvent) {
        let Some(transfer) = event.data_transfer_mut() else {
            return;
        };
        transfer.set_data(TEXT_PLAIN, self.project.id.as_str());
        transfer.set_effect_allowed(DropEffect::Move);
        debug!(
            "event=drag_start module=view status=ok id={}",
            self.project.id
        );
    }

    fn drag_end(&self, _event: &DragEvent) {
        debug!("event=drag_end module=view status=ok id={}", self.project.id);
    }
}
