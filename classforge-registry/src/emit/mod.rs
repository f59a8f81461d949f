//! C++ registry artifact emitter
//!
//! Writes a single C++17 header. Sections always appear in the same order:
//!
//! 1. pragma, banner and includes
//! 2. per-category name resolvers
//! 3. the combined resolver
//! 4. category to base lookup
//! 5. constructor dependencies
//! 6. constructor signatures
//! 7. the help printer
//! 8. subclass and superclass queries
//! 9. runtime type identification
//! 10. the parameter cell casting helper
//! 11. the factory pair of every base
//!
//! Output depends only on the registry and the configuration.

mod cpp;
mod factory;
mod includes;
mod introspection;
mod lookup;

use crate::config::GeneratorConfig;
use crate::error::RegistryResult;
use crate::registry::Registry;
use std::fmt::{self, Write};
use tracing::debug;

/// Write the whole artifact into `out`
pub fn write_artifact<W: Write>(
    out: &mut W,
    registry: &Registry,
    config: &GeneratorConfig,
) -> fmt::Result {
    let plan = registry.plan();
    let names = registry.names();

    includes::write_preamble(out, plan, config)?;
    lookup::write_category_resolvers(out, names)?;
    lookup::write_combined_resolver(out, names)?;
    lookup::write_category_to_base(out, names)?;
    introspection::write_dependencies(out, plan)?;
    introspection::write_signatures(out, plan)?;
    introspection::write_help(out, plan)?;
    introspection::write_hierarchy(out, plan, registry.hierarchy())?;
    introspection::write_type_names(out, plan)?;
    factory::write_cast_helper(out)?;
    factory::write_factories(out, plan)?;

    Ok(())
}

/// Render the artifact to a string
pub fn emit(registry: &Registry, config: &GeneratorConfig) -> RegistryResult<String> {
    let mut out = String::new();
    write_artifact(&mut out, registry, config)?;
    debug!(bytes = out.len(), "artifact rendered");
    Ok(out)
}
