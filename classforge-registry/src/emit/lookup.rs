//! Name resolution sections: per-category resolvers, the combined resolver
//! and the category to base lookup

use super::cpp::{identifier, string_literal};
use crate::resolution::NameRegistry;
use std::fmt::{self, Write};

pub(super) fn resolver_name(category: &str) -> String {
    format!("resolve_{}_class_name", identifier(category))
}

fn write_lookup_body<'a, W, I>(out: &mut W, entries: I) -> fmt::Result
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let entries: Vec<(&str, &str)> = entries.into_iter().collect();
    if entries.is_empty() {
        writeln!(
            out,
            "    static const std::unordered_map<std::string, std::string> table = {{}};"
        )?;
    } else {
        writeln!(
            out,
            "    static const std::unordered_map<std::string, std::string> table = {{"
        )?;
        for (key, value) in entries {
            writeln!(out, "        {{{}, {}}},", string_literal(key), string_literal(value))?;
        }
        writeln!(out, "    }};")?;
    }
    writeln!(out, "    auto it = table.find(name);")?;
    writeln!(out, "    return it == table.end() ? name : it->second;")
}

pub(super) fn write_category_resolvers<W: Write>(out: &mut W, names: &NameRegistry) -> fmt::Result {
    for table in names.tables() {
        writeln!(out, "// Registry names and aliases of category {}", table.category)?;
        writeln!(
            out,
            "inline std::string {}(const std::string& name) {{",
            resolver_name(&table.category)
        )?;
        write_lookup_body(
            out,
            table
                .entries
                .iter()
                .map(|(token, canonical)| (token.as_str(), canonical.as_str())),
        )?;
        writeln!(out, "}}")?;
        writeln!(out)?;
    }
    Ok(())
}

pub(super) fn write_combined_resolver<W: Write>(out: &mut W, names: &NameRegistry) -> fmt::Result {
    writeln!(out, "inline std::string resolve_class_name(const std::string& name) {{")?;
    for category in names.categories() {
        writeln!(out, "    {{")?;
        writeln!(out, "        std::string resolved = {}(name);", resolver_name(category))?;
        writeln!(out, "        if (resolved != name) {{")?;
        writeln!(out, "            return resolved;")?;
        writeln!(out, "        }}")?;
        writeln!(out, "    }}")?;
    }
    writeln!(out, "    return name;")?;
    writeln!(out, "}}")?;
    writeln!(out)
}

pub(super) fn write_category_to_base<W: Write>(out: &mut W, names: &NameRegistry) -> fmt::Result {
    writeln!(
        out,
        "inline std::string resolve_category_to_base_class(const std::string& name) {{"
    )?;
    write_lookup_body(
        out,
        names
            .tables()
            .map(|table| (table.category.as_str(), table.base.as_str())),
    )?;
    writeln!(out, "}}")?;
    writeln!(out)
}
