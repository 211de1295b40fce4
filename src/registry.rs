//! Name-to-workload lookup.

use std::collections::BTreeMap;

use crate::case::Case;
use crate::cases;

/// Registry of available workloads, keyed by case name.
#[derive(Default)]
pub struct Registry {
    cases: BTreeMap<String, Box<dyn Case>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in demo workloads.
    pub fn with_builtin_cases() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(cases::Memset::default()));
        registry.register(Box::new(cases::MemLat::default()));
        registry
    }

    /// A later registration under the same name replaces the earlier one.
    pub fn register(&mut self, case: Box<dyn Case>) {
        self.cases.insert(case.name().to_owned(), case);
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut (dyn Case + 'static)> {
        self.cases.get_mut(name).map(|c| c.as_mut())
    }

    /// Case names in sorted order, with descriptions, for help output.
    pub fn list(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cases
            .values()
            .map(|c| (c.name(), c.description()))
    }
}

#[cfg(test)]
mod test {
    use super::Registry;

    #[test]
    fn test_builtin_cases_are_listed() {
        let registry = Registry::with_builtin_cases();
        let names: Vec<_> = registry.list().map(|(name, _)| name.to_owned()).collect();
        assert!(names.contains(&"memset".to_owned()));
        assert!(names.contains(&"memlat".to_owned()));
    }

    #[test]
    fn test_find_unknown_case() {
        let mut registry = Registry::with_builtin_cases();
        assert!(registry.find_mut("nonesuch").is_none());
        assert!(registry.find_mut("memset").is_some());
    }
}
