//! Visual-parameter sink.
//!
//! The animation core writes its output as named string properties on
//! elements (`--rotX = "1.25deg"`, `background-position = "40.00% 50.00%"`).
//! [`VisualSink`] is the only channel to the view layer. [`RecordingSink`]
//! keeps the latest value per element and property, for the headless host
//! and for tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::components::element::ElementId;

/// Receiver of visual property writes.
pub trait VisualSink {
    fn set_property(&self, element: ElementId, name: &str, value: &str);
}

/// Shared sink handle given to behaviors.
pub type SharedSink = Rc<dyn VisualSink>;

/// Sink that remembers the last value written per `(element, property)`.
#[derive(Default)]
pub struct RecordingSink {
    values: RefCell<FxHashMap<ElementId, FxHashMap<String, String>>>,
    writes: Cell<u64>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written to `name` on `element`.
    pub fn get(&self, element: ElementId, name: &str) -> Option<String> {
        self.values
            .borrow()
            .get(&element)
            .and_then(|props| props.get(name).cloned())
    }

    /// Leading numeric part of a property value (`"12.50deg"` -> `12.5`).
    pub fn get_number(&self, element: ElementId, name: &str) -> Option<f32> {
        let value = self.get(element, name)?;
        let end = value
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (c == '-' && i == 0)))
            .map(|(i, _)| i)
            .unwrap_or(value.len());
        value[..end].parse().ok()
    }

    /// All properties currently recorded for `element`, sorted by name.
    pub fn properties(&self, element: ElementId) -> Vec<(String, String)> {
        let mut props: Vec<(String, String)> = self
            .values
            .borrow()
            .get(&element)
            .map(|p| p.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        props.sort();
        props
    }

    /// Whether anything was ever written to `element`.
    pub fn has_element(&self, element: ElementId) -> bool {
        self.values.borrow().contains_key(&element)
    }

    /// Total number of writes received.
    pub fn write_count(&self) -> u64 {
        self.writes.get()
    }

    pub fn clear(&self) {
        self.values.borrow_mut().clear();
        self.writes.set(0);
    }
}

impl VisualSink for RecordingSink {
    fn set_property(&self, element: ElementId, name: &str, value: &str) {
        self.writes.set(self.writes.get() + 1);
        self.values
            .borrow_mut()
            .entry(element)
            .or_default()
            .insert(name.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let sink = RecordingSink::new();
        sink.set_property(ElementId(1), "--rotX", "1.00deg");
        sink.set_property(ElementId(1), "--rotX", "2.00deg");
        assert_eq!(sink.get(ElementId(1), "--rotX").as_deref(), Some("2.00deg"));
        assert_eq!(sink.write_count(), 2);
    }

    #[test]
    fn test_get_number_strips_units() {
        let sink = RecordingSink::new();
        sink.set_property(ElementId(3), "--rotY", "-12.50deg");
        sink.set_property(ElementId(3), "background-position", "40.00% 50.00%");
        assert_eq!(sink.get_number(ElementId(3), "--rotY"), Some(-12.5));
        assert_eq!(
            sink.get_number(ElementId(3), "background-position"),
            Some(40.0)
        );
        assert_eq!(sink.get_number(ElementId(3), "missing"), None);
    }

    #[test]
    fn test_properties_are_sorted_per_element() {
        let sink = RecordingSink::new();
        sink.set_property(ElementId(7), "b", "2");
        sink.set_property(ElementId(7), "a", "1");
        sink.set_property(ElementId(8), "c", "3");
        assert_eq!(
            sink.properties(ElementId(7)),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
        assert!(sink.has_element(ElementId(8)));
        sink.clear();
        assert!(!sink.has_element(ElementId(8)));
        assert_eq!(sink.write_count(), 0);
    }
}
