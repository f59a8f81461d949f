//! Diagnostic, hierarchy and type identification sections

use super::cpp::{string_list, string_literal, template_head};
use crate::diagnostics::{self, format_signature};
use crate::dispatch::{BaseDispatch, DispatchPlan};
use crate::hierarchy::{HierarchyIndex, UNKNOWN_TYPE_NAME};
use indexmap::IndexSet;
use std::fmt::{self, Write};

/// Every concrete type once, in base order then discovery order
fn concretes(plan: &DispatchPlan) -> impl Iterator<Item = &str> {
    let names: IndexSet<&str> = plan
        .bases()
        .flat_map(|base| base.types.iter().map(|ty| ty.concrete.as_str()))
        .collect();
    names.into_iter()
}

pub(super) fn write_dependencies<W: Write>(out: &mut W, plan: &DispatchPlan) -> fmt::Result {
    writeln!(
        out,
        "inline std::vector<std::pair<std::string, std::string>> get_constructor_dependencies(const std::string& name) {{"
    )?;
    writeln!(out, "    const std::string resolved = resolve_class_name(name);")?;
    for concrete in concretes(plan) {
        let deps = diagnostics::get_constructor_dependencies(plan, concrete);
        if deps.is_empty() {
            continue;
        }
        let pairs: Vec<String> = deps
            .iter()
            .map(|(base, param)| format!("{{{}, {}}}", string_literal(base), string_literal(param)))
            .collect();
        writeln!(out, "    if (resolved == {}) {{", string_literal(concrete))?;
        writeln!(out, "        return {{{}}};", pairs.join(", "))?;
        writeln!(out, "    }}")?;
    }
    writeln!(out, "    return {{}};")?;
    writeln!(out, "}}")?;
    writeln!(out)
}

pub(super) fn write_signatures<W: Write>(out: &mut W, plan: &DispatchPlan) -> fmt::Result {
    writeln!(
        out,
        "inline std::vector<std::string> get_constructor_signatures(const std::string& name) {{"
    )?;
    writeln!(out, "    const std::string resolved = resolve_class_name(name);")?;
    for concrete in concretes(plan) {
        let Some((_, ty)) = plan.find_concrete(concrete) else {
            continue;
        };
        let signatures: Vec<String> = ty
            .overloads
            .iter()
            .map(|overload| format_signature(&ty.concrete, overload))
            .collect();
        let refs: Vec<&str> = signatures.iter().map(String::as_str).collect();
        writeln!(out, "    if (resolved == {}) {{", string_literal(concrete))?;
        writeln!(out, "        return {};", string_list(&refs))?;
        writeln!(out, "    }}")?;
    }
    writeln!(out, "    return {{}};")?;
    writeln!(out, "}}")?;
    writeln!(out)
}

pub(super) fn write_help<W: Write>(out: &mut W, plan: &DispatchPlan) -> fmt::Result {
    writeln!(out, "inline void print_registry_help(std::ostream& os) {{")?;
    for line in diagnostics::registry_help(plan) {
        writeln!(out, "    os << {} << '\\n';", string_literal(&line))?;
    }
    writeln!(out, "}}")?;
    writeln!(out)
}

pub(super) fn write_hierarchy<W: Write>(
    out: &mut W,
    plan: &DispatchPlan,
    index: &HierarchyIndex,
) -> fmt::Result {
    writeln!(
        out,
        "inline std::vector<std::string> get_subclasses(const std::string& name) {{"
    )?;
    for base in index.bases() {
        let subclasses: Vec<&str> = index.get_subclasses(base).iter().map(String::as_str).collect();
        writeln!(out, "    if (name == {}) {{", string_literal(base))?;
        writeln!(out, "        return {};", string_list(&subclasses))?;
        writeln!(out, "    }}")?;
    }
    writeln!(out, "    return {{}};")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(
        out,
        "inline std::vector<std::string> get_superclasses(const std::string& name) {{"
    )?;
    for concrete in concretes(plan) {
        let supers = index.get_superclasses(concrete);
        writeln!(out, "    if (name == {}) {{", string_literal(concrete))?;
        writeln!(out, "        return {};", string_list(&supers))?;
        writeln!(out, "    }}")?;
    }
    writeln!(out, "    return {{}};")?;
    writeln!(out, "}}")?;
    writeln!(out)
}

pub(super) fn write_type_names<W: Write>(out: &mut W, plan: &DispatchPlan) -> fmt::Result {
    for base in plan.bases() {
        write_type_name(out, base)?;
    }
    Ok(())
}

fn write_type_name<W: Write>(out: &mut W, base: &BaseDispatch) -> fmt::Result {
    let head = template_head(&base.generic_params);
    let handle = base.generic_spelling();
    let args = base.generic_names();
    let unknown = string_literal(UNKNOWN_TYPE_NAME);

    match &head {
        Some(head) => writeln!(out, "{}", head)?,
        None => write!(out, "inline ")?,
    }
    writeln!(out, "std::string get_type_name(const {}* instance) {{", handle)?;
    writeln!(out, "    if (instance == nullptr) {{")?;
    writeln!(out, "        return {};", unknown)?;
    writeln!(out, "    }}")?;
    for ty in &base.types {
        let Some(instantiation) = ty.instantiation(&args) else {
            continue;
        };
        let check = format!(
            "if (typeid(*instance) == typeid({})) {{ return {}; }}",
            instantiation,
            string_literal(&ty.concrete)
        );
        if base.is_generic() {
            writeln!(
                out,
                "    if constexpr (std::is_base_of_v<{}, {}>) {{",
                handle, instantiation
            )?;
            writeln!(out, "        {}", check)?;
            writeln!(out, "    }}")?;
        } else {
            writeln!(out, "    {}", check)?;
        }
    }
    writeln!(
        out,
        "    if (typeid(*instance) == typeid({})) {{ return {}; }}",
        handle,
        string_literal(&base.base)
    )?;
    writeln!(out, "    return {};", unknown)?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    match &head {
        Some(head) => writeln!(out, "{}", head)?,
        None => write!(out, "inline ")?,
    }
    writeln!(out, "std::string get_type_name(const {}& instance) {{", handle)?;
    writeln!(out, "    return get_type_name(&instance);")?;
    writeln!(out, "}}")?;
    writeln!(out)
}
