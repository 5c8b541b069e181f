use std::collections::BTreeMap;

use tracing::debug;

use super::types::{ObjectDef, ResponseDef};

/// Registry of object and response type definitions.
///
/// Built once at startup and treated as read-only afterwards; callers share
/// it via `Arc`. Iteration order is name-sorted so offline consumers produce
/// deterministic output across runs.
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    objects: BTreeMap<String, ObjectDef>,
    responses: BTreeMap<String, ResponseDef>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object type. Re-registering a name replaces the previous
    /// definition.
    pub fn register_object(&mut self, def: ObjectDef) {
        debug!(type_name = %def.name, kind = ?def.kind, "Object type registered");
        self.objects.insert(def.name.clone(), def);
    }

    /// Register a response variant. Re-registering a name replaces the
    /// previous definition.
    pub fn register_response(&mut self, def: ResponseDef) {
        debug!(response_name = %def.name, status = def.status, "Response variant registered");
        self.responses.insert(def.name.clone(), def);
    }

    #[must_use]
    pub fn object(&self, name: &str) -> Option<&ObjectDef> {
        self.objects.get(name)
    }

    #[must_use]
    pub fn response(&self, name: &str) -> Option<&ResponseDef> {
        self.responses.get(name)
    }

    pub fn objects(&self) -> impl Iterator<Item = &ObjectDef> {
        self.objects.values()
    }

    pub fn responses(&self) -> impl Iterator<Item = &ResponseDef> {
        self.responses.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ObjectKind, ScalarKind};

    #[test]
    fn lookup_by_name() {
        let mut registry = TypeRegistry::new();
        registry.register_object(ObjectDef::new(
            "StringArray",
            ObjectKind::Container(ScalarKind::Str),
        ));
        registry.register_response(ResponseDef::new("Ok", 200, "fine"));

        assert!(registry.object("StringArray").is_some());
        assert!(registry.object("IntArray").is_none());
        assert_eq!(registry.response("Ok").map(|r| r.status), Some(200));
    }

    #[test]
    fn iteration_is_name_sorted() {
        let mut registry = TypeRegistry::new();
        registry.register_object(ObjectDef::new("Zeta", ObjectKind::Data));
        registry.register_object(ObjectDef::new("Alpha", ObjectKind::Data));

        let names: Vec<_> = registry.objects().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }
}
