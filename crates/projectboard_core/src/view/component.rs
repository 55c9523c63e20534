//! View capability and host attachment.

/// View that wires its handlers once and renders its static content.
pub trait Renderable {
    fn configure(&mut self);
    fn render_content(&mut self);
}

/// Rendered node created from a named template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub template: &'static str,
}

impl Element {
    pub fn new(template: &'static str, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            template,
        }
    }
}

/// Where an element lands inside its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    AfterBegin,
    BeforeEnd,
}

/// Container that views attach their elements to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Host {
    id: String,
    children: Vec<Element>,
}

impl Host {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn elements(&self) -> &[Element] {
        &self.children
    }

    pub fn element_ids(&self) -> Vec<&str> {
        self.children.iter().map(|element| element.id.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }
}

/// Inserts `element` at the start or end of `host`.
pub fn attach(host: &mut Host, element: Element, position: InsertPosition) {
    match position {
        InsertPosition::AfterBegin => host.children.insert(0, element),
        InsertPosition::BeforeEnd => host.children.push(element),
    }
}
