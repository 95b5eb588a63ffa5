//! Bidirectional mapping between native fully-qualified names and the names
//! the compiled module exposes them under.

use std::collections::HashMap;

/// Built once from the snapshot's class registry plus the identity entry for
/// the module's own name, then read-only. Both directions resolve to exactly
/// one counterpart; a miss means the class has no structured documentation
/// and callers fall back to docstring parsing.
#[derive(Clone, Debug, Default)]
pub struct NameRegistry {
    to_exposed: HashMap<String, String>,
    to_native: HashMap<String, String>,
}

impl NameRegistry {
    pub fn build(module: &str, classes: &HashMap<String, String>) -> Self {
        let mut registry = Self::default();
        registry.insert(module, module);
        for (native, exposed) in classes {
            registry.insert(native, exposed);
        }
        registry
    }

    fn insert(&mut self, native: &str, exposed: &str) {
        self.to_exposed.insert(native.to_string(), exposed.to_string());
        self.to_native.insert(exposed.to_string(), native.to_string());
    }

    pub fn native_to_exposed(&self, native: &str) -> Option<&str> {
        self.to_exposed.get(native).map(String::as_str)
    }

    pub fn exposed_to_native(&self, exposed: &str) -> Option<&str> {
        self.to_native.get(exposed).map(String::as_str)
    }
}
