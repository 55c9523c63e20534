//! Project submission form.
//!
//! # Invariants
//! - Invalid input never reaches the store and keeps the entered fields.
//! - Successful submission clears every field.

use crate::model::project::ProjectId;
use crate::state::project_state::{ProjectState, StateError};
use crate::validation::{validate, Validatable};
use crate::view::component::{Element, Renderable};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

const INPUT_TEMPLATE: &str = "project-input";
const INPUT_ELEMENT_ID: &str = "user-input";
const DESCRIPTION_MIN_LENGTH: usize = 5;
const PEOPLE_MIN: f64 = 1.0;

/// Form submission errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Names of the fields that failed validation.
    Validation(Vec<&'static str>),
    State(StateError),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(fields) => {
                write!(f, "invalid input, please try again: {}", fields.join(", "))
            }
            Self::State(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::State(err) => Some(err),
            Self::Validation(_) => None,
        }
    }
}

impl From<StateError> for InputError {
    fn from(value: StateError) -> Self {
        Self::State(value)
    }
}

/// Raw text of the three form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFields {
    pub title: String,
    pub description: String,
    pub people: String,
}

#[derive(Debug)]
pub struct ProjectInput {
    state: Arc<ProjectState>,
    element: Element,
    fields: InputFields,
}

impl ProjectInput {
    pub fn new(state: Arc<ProjectState>) -> Self {
        let mut input = Self {
            state,
            element: Element::new(INPUT_TEMPLATE, INPUT_ELEMENT_ID),
            fields: InputFields::default(),
        };
        input.configure();
        input
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn fields(&self) -> &InputFields {
        &self.fields
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.fields.title = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.fields.description = value.into();
    }

    pub fn set_people(&mut self, value: impl Into<String>) {
        self.fields.people = value.into();
    }

    /// Validates the fields and adds the project on success.
    ///
    /// # Errors
    /// - `InputError::Validation` when any field is rejected; fields are kept.
    /// - `InputError::State` when the store refuses the mutation.
    pub fn submit(&mut self) -> Result<ProjectId, InputError> {
        let (title, description, people) = self.gather_user_input()?;
        let id = self
            .state
            .add_project(title.as_str(), description.as_str(), people)?;
        info!("event=project_submitted module=view status=ok id={id}");
        self.clear_inputs();
        Ok(id)
    }

    fn gather_user_input(&self) -> Result<(String, String, u32), InputError> {
        let people = self.fields.people.trim().parse::<f64>().unwrap_or(f64::NAN);

        let checks = [
            ("title", Validatable::text(self.fields.title.as_str()).required()),
            (
                "description",
                Validatable::text(self.fields.description.as_str())
                    .required()
                    .min_length(DESCRIPTION_MIN_LENGTH),
            ),
            ("people", Validatable::number(people).required().min(PEOPLE_MIN)),
        ];
        let mut failed: Vec<&'static str> = checks
            .iter()
            .filter(|(_, check)| !validate(check))
            .map(|(field, _)| *field)
            .collect();
        // The store counts whole people.
        let whole = people.fract() == 0.0 && people <= f64::from(u32::MAX);
        if !whole && !failed.contains(&"people") {
            failed.push("people");
        }

        if !failed.is_empty() {
            warn!(
                "event=project_submitted module=view status=error invalid_fields={}",
                failed.join(",")
            );
            return Err(InputError::Validation(failed));
        }

        Ok((
            self.fields.title.clone(),
            self.fields.description.clone(),
            people as u32,
        ))
    }

    fn clear_inputs(&mut self) {
        self.fields = InputFields::default();
    }
}

impl Renderable for ProjectInput {
    // Submission is driven by `submit`; no handlers to bind.
    fn configure(&mut self) {}

    fn render_content(&mut self) {}
}
