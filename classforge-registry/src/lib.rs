//! classforge Registry
//!
//! Runtime object-construction registries for C++ single-inheritance hierarchies.
//!
//! ## Architecture
//!
//! Headers are parsed by `classforge-parser` and folded into a [`ClassModel`]. Everything
//! else is derived from that model exactly once:
//!
//! - **Constructor Catalog**: every concrete type's constructors with their arity ranges
//! - **Name Registry**: registry names and aliases per category, resolved totally
//! - **Dispatch Plan**: name dispatch then overload dispatch, for both calling conventions
//! - **Hierarchy Index**: single-level subclass/superclass queries and type identification
//! - **Diagnostics**: constructor signatures and dependency hints
//!
//! The [`emit`] module renders the plan as a C++ header; `classforge-runtime` executes the
//! same plan in process.

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod dispatch;
pub mod emit;
pub mod error;
pub mod extract;
pub mod hierarchy;
pub mod model;
pub mod registry;
pub mod resolution;
pub mod validate;

pub use catalog::{catalog, ConstructorCatalog, OverloadEntry};
pub use config::GeneratorConfig;
pub use dispatch::{BaseDispatch, DispatchOutcome, DispatchPlan, TypeDispatch};
pub use error::{RegistryError, RegistryResult};
pub use extract::{extract_model, ModelExtractor};
pub use hierarchy::{HierarchyIndex, UNKNOWN_TYPE_NAME};
pub use model::{
    BaseType, ClassModel, ConcreteType, Constructor, GenericParam, Hierarchy, Parameter,
    PrimitiveKind, TypeDescriptor,
};
pub use registry::Registry;
pub use resolution::{CategoryTable, NameRegistry};

use std::path::Path;
use tracing::info;

#[cfg(test)]
mod tests;

/// Parse the inputs, build the registry and render the C++ artifact
pub fn generate<P: AsRef<Path>>(
    bases: &[String],
    inputs: &[P],
    config: &GeneratorConfig,
) -> RegistryResult<String> {
    let model = extract_model(bases, inputs, config)?;
    let registry = Registry::build_with(model, config)?;
    let artifact = emit::emit(&registry, config)?;
    info!(bases = bases.len(), inputs = inputs.len(), "registry generated");
    Ok(artifact)
}

/// Split a comma-separated base list, trimming whitespace and dropping empties
pub fn split_base_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
