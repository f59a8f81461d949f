//! Registry facade
//!
//! Validates a class model once and derives every lookup structure from it.
//! All queries are pure.

use crate::catalog::{ConstructorCatalog, OverloadEntry};
use crate::config::GeneratorConfig;
use crate::diagnostics;
use crate::dispatch::{DispatchPlan, TypeDispatch};
use crate::error::RegistryResult;
use crate::hierarchy::HierarchyIndex;
use crate::model::ClassModel;
use crate::resolution::NameRegistry;
use crate::validate::validate;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Registry {
    model: ClassModel,
    hierarchy: HierarchyIndex,
    plan: DispatchPlan,
}

impl Registry {
    /// Validate strictly and derive everything
    pub fn build(model: ClassModel) -> RegistryResult<Self> {
        Self::build_with(model, &GeneratorConfig::default())
    }

    pub fn build_with(model: ClassModel, config: &GeneratorConfig) -> RegistryResult<Self> {
        let model = validate(model, config.generic_arity_strict)?;
        let names = NameRegistry::build(&model);
        let hierarchy = HierarchyIndex::build(&model);
        let plan = DispatchPlan::build(&model, &names);

        info!(
            bases = model.len(),
            types = model.hierarchies().map(|h| h.concretes.len()).sum::<usize>(),
            "registry built"
        );

        Ok(Self {
            model,
            hierarchy,
            plan,
        })
    }

    pub fn model(&self) -> &ClassModel {
        &self.model
    }

    pub fn names(&self) -> &NameRegistry {
        self.plan.names()
    }

    pub fn hierarchy(&self) -> &HierarchyIndex {
        &self.hierarchy
    }

    pub fn plan(&self) -> &DispatchPlan {
        &self.plan
    }

    /// Constructor catalog of one base
    pub fn catalog(&self, base: &str) -> Option<ConstructorCatalog> {
        self.model.hierarchy(base).map(ConstructorCatalog::build)
    }

    pub fn resolve<'a>(&'a self, category: &str, token: &'a str) -> &'a str {
        self.names().resolve(category, token)
    }

    pub fn resolve_class_name<'a>(&'a self, token: &'a str) -> &'a str {
        self.names().resolve_any(token)
    }

    pub fn resolve_category_to_base<'a>(&'a self, category: &'a str) -> &'a str {
        self.names().category_to_base(category)
    }

    pub fn get_subclasses(&self, base: &str) -> &[String] {
        self.hierarchy.get_subclasses(base)
    }

    pub fn get_superclasses(&self, concrete: &str) -> Vec<&str> {
        self.hierarchy.get_superclasses(concrete)
    }

    pub fn get_type_name<'a>(&'a self, base: &str, runtime_type: &str) -> &'a str {
        self.hierarchy.identify(base, runtime_type)
    }

    pub fn get_constructor_signatures(&self, name: &str) -> Vec<String> {
        diagnostics::get_constructor_signatures(&self.plan, name)
    }

    pub fn get_constructor_dependencies(&self, name: &str) -> Vec<(String, String)> {
        diagnostics::get_constructor_dependencies(&self.plan, name)
    }

    pub fn help_lines(&self) -> Vec<String> {
        diagnostics::registry_help(&self.plan)
    }

    pub fn match_positional(
        &self,
        base: &str,
        class_name: &str,
        len: usize,
    ) -> Option<(&TypeDispatch, &OverloadEntry)> {
        self.plan.match_positional(base, class_name, len)
    }

    pub fn match_named(
        &self,
        base: &str,
        class_name: &str,
        keys: &[&str],
    ) -> Option<(&TypeDispatch, &OverloadEntry)> {
        self.plan.match_named(base, class_name, keys)
    }
}
