//! Slider to display-target association
//!
//! Each slider id `X` maps to two optional text targets, `X_value` and
//! `X_change`. The association is resolved once per slider and cached.

use std::collections::HashMap;
use std::rc::Rc;

/// Something whose visible text can be replaced
pub trait TextTarget {
    fn set_text(&self, text: &str);
}

pub fn value_target_id(vital: &str) -> String {
    format!("{vital}_value")
}

pub fn change_target_id(vital: &str) -> String {
    format!("{vital}_change")
}

/// A slider and the two elements it writes to
#[derive(Debug)]
pub struct VitalBinding<T> {
    id: String,
    value_target: Option<T>,
    change_target: Option<T>,
}

impl<T: TextTarget> VitalBinding<T> {
    pub fn new(id: impl Into<String>, value_target: Option<T>, change_target: Option<T>) -> Self {
        Self {
            id: id.into(),
            value_target,
            change_target,
        }
    }

    /// Look up both targets for `id`
    pub fn resolve(id: &str, lookup: impl Fn(&str) -> Option<T>) -> Self {
        Self::new(
            id,
            lookup(&value_target_id(id)),
            lookup(&change_target_id(id)),
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn show_value(&self, value: &str) {
        if let Some(target) = &self.value_target {
            target.set_text(value);
        }
    }

    pub fn show_change(&self, change: &str) {
        if let Some(target) = &self.change_target {
            target.set_text(change);
        }
    }
}

/// Bindings keyed by slider id
pub struct BindingRegistry<T> {
    bindings: HashMap<String, Rc<VitalBinding<T>>>,
}

impl<T> Default for BindingRegistry<T> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<T: TextTarget> BindingRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Rc<VitalBinding<T>>> {
        self.bindings.get(id).cloned()
    }

    /// Cached binding for `id`, resolving it on first use
    pub fn get_or_resolve(&mut self, id: &str, lookup: impl Fn(&str) -> Option<T>) -> Rc<VitalBinding<T>> {
        if let Some(binding) = self.get(id) {
            return binding;
        }
        let binding = Rc::new(VitalBinding::resolve(id, lookup));
        self.bindings.insert(id.to_string(), Rc::clone(&binding));
        binding
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// In-memory stand-in for a DOM text node
    #[derive(Clone, Default)]
    pub struct FakeText {
        text: Rc<RefCell<Option<String>>>,
        writes: Rc<Cell<usize>>,
    }

    impl FakeText {
        pub fn text(&self) -> Option<String> {
            self.text.borrow().clone()
        }

        pub fn writes(&self) -> usize {
            self.writes.get()
        }
    }

    impl TextTarget for FakeText {
        fn set_text(&self, text: &str) {
            *self.text.borrow_mut() = Some(text.to_string());
            self.writes.set(self.writes.get() + 1);
        }
    }

    /// A page made of named text targets
    #[derive(Default)]
    pub struct FakePage {
        elements: HashMap<String, FakeText>,
    }

    impl FakePage {
        pub fn with(ids: &[&str]) -> Self {
            Self {
                elements: ids
                    .iter()
                    .map(|id| ((*id).to_string(), FakeText::default()))
                    .collect(),
            }
        }

        pub fn element(&self, id: &str) -> &FakeText {
            &self.elements[id]
        }

        pub fn lookup(&self, id: &str) -> Option<FakeText> {
            self.elements.get(id).cloned()
        }
    }

    #[test]
    fn test_target_ids() {
        assert_eq!(value_target_id("heart_rate"), "heart_rate_value");
        assert_eq!(change_target_id("heart_rate"), "heart_rate_change");
    }

    #[test]
    fn test_resolve_writes_own_targets() {
        let page = FakePage::with(&["A_value", "A_change", "B_value", "B_change"]);
        let binding = VitalBinding::resolve("A", |id| page.lookup(id));

        binding.show_value("7");
        binding.show_change("+1");

        assert_eq!(page.element("A_value").text().as_deref(), Some("7"));
        assert_eq!(page.element("A_change").text().as_deref(), Some("+1"));
        assert_eq!(page.element("B_value").writes(), 0);
        assert_eq!(page.element("B_change").writes(), 0);
    }

    #[test]
    fn test_missing_targets_are_skipped() {
        let page = FakePage::with(&["A_value"]);
        let binding = VitalBinding::resolve("A", |id| page.lookup(id));
        binding.show_change("+1");
        binding.show_value("3");
        assert_eq!(page.element("A_value").text().as_deref(), Some("3"));
    }

    #[test]
    fn test_registry_resolves_once() {
        let page = FakePage::with(&["A_value", "A_change"]);
        let lookups = Cell::new(0);
        let mut registry = BindingRegistry::new();

        let first = registry.get_or_resolve("A", |id| {
            lookups.set(lookups.get() + 1);
            page.lookup(id)
        });
        let second = registry.get_or_resolve("A", |id| {
            lookups.set(lookups.get() + 1);
            page.lookup(id)
        });

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(lookups.get(), 2);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("B").is_none());
    }
}
