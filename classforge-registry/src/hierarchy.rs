//! Hierarchy and type identification queries
//!
//! Single-level only: a concrete type has at most one registered superclass.

use crate::model::ClassModel;
use indexmap::IndexMap;

/// Returned by type identification when no registered type matches
pub const UNKNOWN_TYPE_NAME: &str = "unknown";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HierarchyIndex {
    subclasses: IndexMap<String, Vec<String>>,
    superclass: IndexMap<String, String>,
}

impl HierarchyIndex {
    pub fn build(model: &ClassModel) -> Self {
        let mut subclasses = IndexMap::new();
        let mut superclass = IndexMap::new();

        for hierarchy in model.hierarchies() {
            let names: Vec<String> = hierarchy.concretes.iter().map(|c| c.name.clone()).collect();
            for name in &names {
                superclass
                    .entry(name.clone())
                    .or_insert_with(|| hierarchy.base.name.clone());
            }
            subclasses.insert(hierarchy.base.name.clone(), names);
        }

        Self {
            subclasses,
            superclass,
        }
    }

    /// Concrete types of `base` in discovery order; empty for unknown bases
    pub fn get_subclasses(&self, base: &str) -> &[String] {
        self.subclasses
            .get(base)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The registered base of `concrete`, if any
    pub fn get_superclasses(&self, concrete: &str) -> Vec<&str> {
        self.superclass
            .get(concrete)
            .map(|base| vec![base.as_str()])
            .unwrap_or_default()
    }

    /// Map a runtime type name seen through a `base` handle back to its
    /// registered name. Candidates are tried in discovery order; the base
    /// itself comes last.
    pub fn identify<'a>(&'a self, base: &str, runtime_type: &str) -> &'a str {
        if let Some(name) = self
            .get_subclasses(base)
            .iter()
            .find(|name| name.as_str() == runtime_type)
        {
            return name;
        }
        match self.subclasses.get_key_value(base) {
            Some((base_name, _)) if base_name == runtime_type => base_name,
            _ => UNKNOWN_TYPE_NAME,
        }
    }

    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.subclasses.keys().map(String::as_str)
    }
}
