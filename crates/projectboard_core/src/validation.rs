//! Form input validation rules.
//!
//! # Invariants
//! - Length rules only apply to text values; range rules only to numbers.
//! - An unset rule never rejects.

/// Raw field value gathered from the input form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

/// One value plus the rules it must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct Validatable {
    pub value: FieldValue,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Validatable {
    pub fn text(value: impl Into<String>) -> Self {
        Self::from_value(FieldValue::Text(value.into()))
    }

    pub fn number(value: f64) -> Self {
        Self::from_value(FieldValue::Number(value))
    }

    fn from_value(value: FieldValue) -> Self {
        Self {
            value,
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, value: usize) -> Self {
        self.min_length = Some(value);
        self
    }

    pub fn max_length(mut self, value: usize) -> Self {
        self.max_length = Some(value);
        self
    }

    pub fn min(mut self, value: f64) -> Self {
        self.min = Some(value);
        self
    }

    pub fn max(mut self, value: f64) -> Self {
        self.max = Some(value);
        self
    }
}

/// Returns whether `input` satisfies every rule it declares.
pub fn validate(input: &Validatable) -> bool {
    let mut is_valid = true;
    if input.required {
        is_valid &= match &input.value {
            FieldValue::Text(text) => !text.trim().is_empty(),
            // NaN is what a non-numeric people field parses to.
            FieldValue::Number(number) => !number.is_nan(),
        };
    }
    if let FieldValue::Text(text) = &input.value {
        let length = text.chars().count();
        if let Some(min_length) = input.min_length {
            is_valid &= length >= min_length;
        }
        if let Some(max_length) = input.max_length {
            is_valid &= length <= max_length;
        }
    }
    if let FieldValue::Number(number) = input.value {
        if let Some(min) = input.min {
            is_valid &= number >= min;
        }
        if let Some(max) = input.max {
            is_valid &= number <= max;
        }
    }
    is_valid
}

#[cfg(test)]
mod tests {
    use super::{validate, Validatable};

    #[test]
    fn required_rejects_blank_text() {
        assert!(!validate(&Validatable::text("   ").required()));
        assert!(validate(&Validatable::text("x").required()));
        assert!(validate(&Validatable::text("").min_length(0)));
    }

    #[test]
    fn length_bounds_are_inclusive() {
        assert!(validate(&Validatable::text("abcde").min_length(5)));
        assert!(!validate(&Validatable::text("abcd").min_length(5)));
        assert!(validate(&Validatable::text("abc").max_length(3)));
        assert!(!validate(&Validatable::text("abcd").max_length(3)));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(validate(&Validatable::number(1.0).min(1.0)));
        assert!(!validate(&Validatable::number(0.0).min(1.0)));
        assert!(validate(&Validatable::number(5.0).max(5.0)));
        assert!(!validate(&Validatable::number(6.0).max(5.0)));
    }

    #[test]
    fn rules_ignore_mismatched_value_kinds() {
        assert!(validate(&Validatable::number(2.0).min_length(10)));
        assert!(validate(&Validatable::text("short").min(100.0)));
    }

    #[test]
    fn nan_fails_required_number() {
        assert!(!validate(&Validatable::number(f64::NAN).required()));
    }
}
