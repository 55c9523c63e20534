//! Drag event and transfer payload model.
//!
//! # Invariants
//! - A payload holds at most one value per media type.
//! - `types()` reports media types in the order they were first set.

/// Media type of the project ID payload.
pub const TEXT_PLAIN: &str = "text/plain";

/// Operations a drag source allows on drop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
    All,
}

/// Key/value payload attached to one drag gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    effect_allowed: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `format`, replacing an earlier value of that type.
    pub fn set_data(&mut self, format: &str, data: impl Into<String>) {
        let data = data.into();
        match self.entries.iter_mut().find(|(key, _)| key == format) {
            Some((_, value)) => *value = data,
            None => self.entries.push((format.to_string(), data)),
        }
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == format)
            .map(|(_, value)| value.as_str())
    }

    pub fn types(&self) -> Vec<&str> {
        self.entries.iter().map(|(key, _)| key.as_str()).collect()
    }

    /// First declared media type; the one drop targets inspect.
    pub fn first_type(&self) -> Option<&str> {
        self.entries.first().map(|(key, _)| key.as_str())
    }

    pub fn clear_data(&mut self) {
        self.entries.clear();
    }

    pub fn effect_allowed(&self) -> DropEffect {
        self.effect_allowed
    }

    pub fn set_effect_allowed(&mut self, effect: DropEffect) {
        self.effect_allowed = effect;
    }
}

/// One drag signal as seen by a source or target handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragEvent {
    data_transfer: Option<DataTransfer>,
    default_prevented: bool,
}

impl DragEvent {
    /// Event with an empty transfer channel.
    pub fn new() -> Self {
        Self::with_transfer(DataTransfer::new())
    }

    pub fn with_transfer(data_transfer: DataTransfer) -> Self {
        Self {
            data_transfer: Some(data_transfer),
            default_prevented: false,
        }
    }

    /// Event from a platform that offers no drag data channel.
    pub fn without_transfer() -> Self {
        Self {
            data_transfer: None,
            default_prevented: false,
        }
    }

    pub fn data_transfer(&self) -> Option<&DataTransfer> {
        self.data_transfer.as_ref()
    }

    pub fn data_transfer_mut(&mut self) -> Option<&mut DataTransfer> {
        self.data_transfer.as_mut()
    }

    /// Suppresses the platform's default "reject drop" handling.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub(crate) fn reset_default(&mut self) {
        self.default_prevented = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{DataTransfer, DragEvent, DropEffect, TEXT_PLAIN};

    #[test]
    fn set_data_replaces_same_type() {
        let mut transfer = DataTransfer::new();
        transfer.set_data(TEXT_PLAIN, "first");
        transfer.set_data("text/uri-list", "https://example.com");
        transfer.set_data(TEXT_PLAIN, "second");

        assert_eq!(transfer.get_data(TEXT_PLAIN), Some("second"));
        assert_eq!(transfer.types(), vec![TEXT_PLAIN, "text/uri-list"]);
        assert_eq!(transfer.first_type(), Some(TEXT_PLAIN));
    }

    #[test]
    fn clear_data_empties_payload() {
        let mut transfer = DataTransfer::new();
        transfer.set_data(TEXT_PLAIN, "id");
        transfer.clear_data();
        assert!(transfer.types().is_empty());
        assert_eq!(transfer.get_data(TEXT_PLAIN), None);
    }

    #[test]
    fn effect_defaults_to_none() {
        let mut transfer = DataTransfer::new();
        assert_eq!(transfer.effect_allowed(), DropEffect::None);
        transfer.set_effect_allowed(DropEffect::Move);
        assert_eq!(transfer.effect_allowed(), DropEffect::Move);
    }

    #[test]
    fn prevent_default_marks_event() {
        let mut event = DragEvent::without_transfer();
        assert!(event.data_transfer().is_none());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
