//! Artifact preamble: pragma, banner, standard and per-hierarchy includes

use crate::config::GeneratorConfig;
use crate::dispatch::DispatchPlan;
use std::fmt::{self, Write};

const STD_INCLUDES: &[&str] = &[
    "string",
    "vector",
    "unordered_map",
    "utility",
    "stdexcept",
    "typeinfo",
    "type_traits",
    "ostream",
];

pub(super) fn write_preamble<W: Write>(
    out: &mut W,
    plan: &DispatchPlan,
    config: &GeneratorConfig,
) -> fmt::Result {
    writeln!(out, "#pragma once")?;
    writeln!(out)?;

    if let Some(banner) = &config.header_comment {
        for line in banner.lines() {
            if line.is_empty() {
                writeln!(out, "//")?;
            } else {
                writeln!(out, "// {}", line)?;
            }
        }
        writeln!(out)?;
    }

    for header in STD_INCLUDES {
        writeln!(out, "#include <{}>", header)?;
    }
    writeln!(out)?;

    for base in plan.bases() {
        write_include(out, config, &base.source_file, &base.base)?;
    }

    for base in plan.bases() {
        writeln!(out)?;
        writeln!(out, "// Includes for subclasses of {}", base.base)?;
        for ty in &base.types {
            write_include(out, config, &ty.source_file, &ty.concrete)?;
        }
    }
    writeln!(out)?;

    Ok(())
}

fn write_include<W: Write>(
    out: &mut W,
    config: &GeneratorConfig,
    source_file: &str,
    class_name: &str,
) -> fmt::Result {
    // Programmatic models may carry no provenance
    if source_file.is_empty() {
        return Ok(());
    }
    writeln!(
        out,
        "#include \"{}\" // {}",
        config.include_path(source_file),
        class_name
    )
}
