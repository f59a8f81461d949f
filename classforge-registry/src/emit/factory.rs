//! Parameter cell casting helper and the per-base factory pairs
//!
//! Each factory walks the dispatch plan: one block per concrete type in
//! discovery order, one guarded attempt per constructor in declaration order.
//! A matched name always ends its block with `return nullptr`, so later types
//! are never tried.

use super::cpp::{string_literal, template_head};
use super::lookup::resolver_name;
use crate::catalog::OverloadEntry;
use crate::diagnostics::format_signature;
use crate::dispatch::{BaseDispatch, DispatchPlan, TypeDispatch};
use crate::model::Parameter;
use std::fmt::{self, Write};

const CAST_HELPER: &str = r#"enum class ParamTag : int {
    Passthrough = 0,
    Integer = 1,
    Floating = 2,
    String = 3,
    Boolean = 4,
};

inline void check_param_tag(int tag) {
    if (tag < static_cast<int>(ParamTag::Passthrough) || tag > static_cast<int>(ParamTag::Boolean)) {
        throw std::invalid_argument("unsupported parameter tag " + std::to_string(tag));
    }
}

template<typename T>
T cast_param(void* value, int tag) {
    check_param_tag(tag);
    switch (static_cast<ParamTag>(tag)) {
    case ParamTag::Passthrough:
        return *reinterpret_cast<T*>(value);
    case ParamTag::Integer:
        if constexpr (std::is_arithmetic_v<T>) {
            return static_cast<T>(*reinterpret_cast<long long*>(value));
        }
        break;
    case ParamTag::Floating:
        if constexpr (std::is_arithmetic_v<T>) {
            return static_cast<T>(*reinterpret_cast<double*>(value));
        }
        break;
    case ParamTag::Boolean:
        if constexpr (std::is_arithmetic_v<T>) {
            return static_cast<T>(*reinterpret_cast<bool*>(value));
        }
        break;
    case ParamTag::String:
        break;
    }
    throw std::invalid_argument("parameter tag " + std::to_string(tag) + " does not match the parameter type");
}

template<>
inline std::string cast_param<std::string>(void* value, int tag) {
    check_param_tag(tag);
    switch (static_cast<ParamTag>(tag)) {
    case ParamTag::Passthrough:
    case ParamTag::String:
        return *reinterpret_cast<std::string*>(value);
    default:
        break;
    }
    throw std::invalid_argument("parameter tag " + std::to_string(tag) + " does not match a string parameter");
}

template<typename T>
T& param_ref(const std::pair<void*, int>& cell) {
    check_param_tag(cell.second);
    if (cell.second != static_cast<int>(ParamTag::Passthrough)) {
        throw std::invalid_argument("parameter tag " + std::to_string(cell.second) + " cannot bind a class-typed parameter");
    }
    return *reinterpret_cast<T*>(cell.first);
}
"#;

const POSITIONAL_BUNDLE: &str = "const std::vector<void*>&";
const NAMED_BUNDLE: &str = "const std::unordered_map<std::string, std::pair<void*, int>>&";

pub(super) fn write_cast_helper<W: Write>(out: &mut W) -> fmt::Result {
    writeln!(out, "{}", CAST_HELPER)
}

pub(super) fn write_factories<W: Write>(out: &mut W, plan: &DispatchPlan) -> fmt::Result {
    for base in plan.bases() {
        write_positional(out, base)?;
        write_named(out, base)?;
    }
    Ok(())
}

fn factory_name(base: &BaseDispatch) -> String {
    format!("create_instance_{}", base.fn_suffix)
}

fn write_signature<W: Write>(out: &mut W, base: &BaseDispatch, bundle: &str) -> fmt::Result {
    match template_head(&base.generic_params) {
        Some(head) => writeln!(out, "{}", head)?,
        None => write!(out, "inline ")?,
    }
    writeln!(
        out,
        "{}* {}(const std::string& class_name, {} parameter) {{",
        base.generic_spelling(),
        factory_name(base),
        bundle
    )
}

/// Open the block for one concrete type. Under a generic base the block is
/// compiled only for instantiations that really derive from the handle type.
fn open_type_block<W: Write>(
    out: &mut W,
    base: &BaseDispatch,
    ty: &TypeDispatch,
    instantiation: &str,
    subject: &str,
) -> fmt::Result {
    if base.is_generic() {
        writeln!(
            out,
            "    if constexpr (std::is_base_of_v<{}, {}>) {{",
            base.generic_spelling(),
            instantiation
        )?;
        writeln!(out, "    if ({} == {}) {{", subject, string_literal(&ty.concrete))
    } else {
        writeln!(out, "    if ({} == {}) {{", subject, string_literal(&ty.concrete))
    }
}

fn close_type_block<W: Write>(out: &mut W, base: &BaseDispatch) -> fmt::Result {
    writeln!(out, "        return nullptr;")?;
    writeln!(out, "    }}")?;
    if base.is_generic() {
        writeln!(out, "    }}")?;
    }
    Ok(())
}

fn write_empty_body<W: Write>(out: &mut W, base: &BaseDispatch) -> fmt::Result {
    if base.types.is_empty() {
        writeln!(out, "    (void)class_name;")?;
        writeln!(out, "    (void)parameter;")?;
    }
    Ok(())
}

fn write_attempt_comment<W: Write>(
    out: &mut W,
    ty: &TypeDispatch,
    overload: &OverloadEntry,
) -> fmt::Result {
    writeln!(out, "        // {}", format_signature(&ty.concrete, overload))
}

fn write_construct<W: Write>(out: &mut W, instantiation: &str, args: &[String]) -> fmt::Result {
    writeln!(out, "                return new {}({});", instantiation, args.join(", "))
}

fn write_catch<W: Write>(out: &mut W) -> fmt::Result {
    writeln!(out, "            }} catch (...) {{")?;
    writeln!(out, "            }}")?;
    writeln!(out, "        }}")
}

fn forward(param: &Parameter, value: String) -> String {
    if param.ty.as_str().ends_with("&&") {
        format!("std::move({})", value)
    } else {
        value
    }
}

fn write_positional<W: Write>(out: &mut W, base: &BaseDispatch) -> fmt::Result {
    let args = base.generic_names();
    write_signature(out, base, POSITIONAL_BUNDLE)?;
    write_empty_body(out, base)?;

    for ty in &base.types {
        let Some(instantiation) = ty.instantiation(&args) else {
            continue;
        };
        open_type_block(out, base, ty, &instantiation, "class_name")?;
        for overload in &ty.overloads {
            write_attempt_comment(out, ty, overload)?;
            writeln!(out, "        if (parameter.size() == {}) {{", overload.total_count)?;
            writeln!(out, "            try {{")?;
            let values: Vec<String> = overload
                .params
                .iter()
                .enumerate()
                .map(|(i, param)| {
                    forward(
                        param,
                        format!("*reinterpret_cast<{}*>(parameter[{}])", param.ty.value_type(), i),
                    )
                })
                .collect();
            write_construct(out, &instantiation, &values)?;
            write_catch(out)?;
        }
        close_type_block(out, base)?;
    }

    writeln!(out, "    return nullptr;")?;
    writeln!(out, "}}")?;
    writeln!(out)
}

fn write_named<W: Write>(out: &mut W, base: &BaseDispatch) -> fmt::Result {
    let args = base.generic_names();
    write_signature(out, base, NAMED_BUNDLE)?;
    write_empty_body(out, base)?;
    if !base.types.is_empty() {
        writeln!(
            out,
            "    const std::string resolved = {}(class_name);",
            resolver_name(&base.category)
        )?;
    }

    for ty in &base.types {
        let Some(instantiation) = ty.instantiation(&args) else {
            continue;
        };
        open_type_block(out, base, ty, &instantiation, "resolved")?;
        for overload in &ty.overloads {
            write_attempt_comment(out, ty, overload)?;

            let mut condition = Vec::new();
            if overload.required_count > 0 {
                condition.push(format!("parameter.size() >= {}", overload.required_count));
            }
            condition.push(format!("parameter.size() <= {}", overload.total_count));
            condition.extend(
                overload
                    .params
                    .iter()
                    .filter(|p| p.is_required())
                    .map(|p| format!("parameter.count({}) > 0", string_literal(&p.name))),
            );
            writeln!(out, "        if ({}) {{", condition.join(" && "))?;
            writeln!(out, "            try {{")?;

            for (index, param) in overload.params.iter().enumerate() {
                write_named_local(out, index, param)?;
            }
            let values: Vec<String> = overload
                .params
                .iter()
                .enumerate()
                .map(|(index, param)| named_argument(index, param))
                .collect();
            write_construct(out, &instantiation, &values)?;
            write_catch(out)?;
        }
        close_type_block(out, base)?;
    }

    writeln!(out, "    return nullptr;")?;
    writeln!(out, "}}")?;
    writeln!(out)
}

/// Locals are numbered so constructor parameter names never shadow the
/// factory's own `class_name`, `parameter` and `resolved`.
fn local_name(index: usize) -> String {
    format!("arg{}", index)
}

fn default_value(value_type: &str, default: &str) -> String {
    if default.starts_with('{') {
        format!("{}{}", value_type, default)
    } else {
        default.to_string()
    }
}

/// Primitive parameters are converted from their tagged cell into a local.
/// Every other parameter binds to the caller's storage, so abstract bases
/// taken by reference are neither copied nor sliced.
fn write_named_local<W: Write>(out: &mut W, index: usize, param: &Parameter) -> fmt::Result {
    let value_type = param.ty.value_type();
    let key = string_literal(&param.name);
    let local = local_name(index);

    if param.ty.primitive_kind().is_none() {
        return match &param.default {
            None => writeln!(
                out,
                "                {vt}& {local} = param_ref<{vt}>(parameter.at({key}));",
                vt = value_type,
                local = local,
                key = key
            ),
            Some(_) => writeln!(
                out,
                "                {vt}* {local} = parameter.count({key}) > 0 ? &param_ref<{vt}>(parameter.at({key})) : nullptr;",
                vt = value_type,
                local = local,
                key = key
            ),
        };
    }

    let lookup = format!(
        "cast_param<{vt}>(parameter.at({key}).first, parameter.at({key}).second)",
        vt = value_type,
        key = key
    );
    match &param.default {
        None => writeln!(out, "                {} {} = {};", value_type, local, lookup),
        Some(default) if default.starts_with('{') => writeln!(
            out,
            "                {vt} {local} = parameter.count({key}) > 0 ? {lookup} : {default};",
            vt = value_type,
            local = local,
            key = key,
            lookup = lookup,
            default = default_value(&value_type, default)
        ),
        Some(default) => writeln!(
            out,
            "                {vt} {local} = parameter.count({key}) > 0 ? {lookup} : static_cast<{vt}>({default});",
            vt = value_type,
            local = local,
            key = key,
            lookup = lookup,
            default = default
        ),
    }
}

/// A defaulted class-typed argument is chosen inside the `new` expression,
/// where a temporary default outlives the constructor call.
fn named_argument(index: usize, param: &Parameter) -> String {
    let local = local_name(index);
    match &param.default {
        Some(default) if param.ty.primitive_kind().is_none() => {
            let value_type = param.ty.value_type();
            format!(
                "({local} ? static_cast<{vt} const&>(*{local}) : static_cast<{vt} const&>({default}))",
                local = local,
                vt = value_type,
                default = default_value(&value_type, default)
            )
        }
        _ => forward(param, local),
    }
}
