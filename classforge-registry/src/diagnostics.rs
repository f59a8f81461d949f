//! Constructor signatures and dependency hints for human readers

use crate::catalog::OverloadEntry;
use crate::dispatch::DispatchPlan;

/// `Circle(double radius)`, `Square(double side = 1.0)`
pub fn format_signature(class_name: &str, overload: &OverloadEntry) -> String {
    let params: Vec<String> = overload.params.iter().map(|p| p.to_string()).collect();
    format!("{}({})", class_name, params.join(", "))
}

/// One formatted signature per constructor, in declaration order. Accepts
/// canonical names, registry names and aliases; unknown names give nothing.
pub fn get_constructor_signatures(plan: &DispatchPlan, name: &str) -> Vec<String> {
    let resolved = plan.names().resolve_any(name);
    match plan.find_concrete(resolved) {
        Some((_, ty)) => ty
            .overloads
            .iter()
            .map(|overload| format_signature(&ty.concrete, overload))
            .collect(),
        None => Vec::new(),
    }
}

/// `(base, parameter)` pairs for parameters of the first non-empty constructor
/// whose type names a registered base
pub fn get_constructor_dependencies(plan: &DispatchPlan, name: &str) -> Vec<(String, String)> {
    let resolved = plan.names().resolve_any(name);
    let Some((_, ty)) = plan.find_concrete(resolved) else {
        return Vec::new();
    };
    let Some(overload) = ty
        .overloads
        .iter()
        .find(|o| !o.is_empty())
        .or_else(|| ty.overloads.first())
    else {
        return Vec::new();
    };

    overload
        .params
        .iter()
        .filter_map(|param| {
            let core = param.ty.core_name();
            plan.base(&core)
                .map(|base| (base.base.clone(), param.name.clone()))
        })
        .collect()
}

/// Lines printed by the registry help printer: each base with its category,
/// then every concrete type with its names and signatures
pub fn registry_help(plan: &DispatchPlan) -> Vec<String> {
    let mut lines = Vec::new();
    for base in plan.bases() {
        lines.push(format!("{} (category: {})", base.generic_spelling(), base.category));
        if base.types.is_empty() {
            lines.push("  (no registered types)".to_string());
        }
        for ty in &base.types {
            let mut line = format!("  {}", ty.concrete);
            if let Some(name) = &ty.registry_name {
                line.push_str(&format!(" [name: {}]", name));
            }
            if !ty.aliases.is_empty() {
                line.push_str(&format!(" [aliases: {}]", ty.aliases.join(", ")));
            }
            lines.push(line);
            for overload in &ty.overloads {
                lines.push(format!("    {}", format_signature(&ty.concrete, overload)));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BaseType, ClassModel, ConcreteType, Parameter};
    use crate::resolution::NameRegistry;
    use pretty_assertions::assert_eq;

    fn plan() -> DispatchPlan {
        let mut model = ClassModel::new();
        model.add_base(BaseType::new("Shape"));
        model.add_base(BaseType::new("Brush").with_namespace(["art"]));
        model
            .add_concrete(
                ConcreteType::new("Outline", "Shape")
                    .with_alias("border")
                    .with_constructor(vec![])
                    .with_constructor(vec![
                        Parameter::new("const art::Brush *", "brush"),
                        Parameter::new("std::vector<Shape *>", "parts"),
                        Parameter::new("Shape &", "inner"),
                        Parameter::new("double", "width").with_default("0.5"),
                    ]),
            )
            .unwrap();
        model
            .add_concrete(ConcreteType::new("Dot", "Shape"))
            .unwrap();
        let names = NameRegistry::build(&model);
        DispatchPlan::build(&model, &names)
    }

    #[test]
    fn test_signatures_render_types_names_and_defaults() {
        let plan = plan();
        assert_eq!(
            get_constructor_signatures(&plan, "Outline"),
            vec![
                "Outline()".to_string(),
                "Outline(const art::Brush * brush, std::vector<Shape *> parts, Shape & inner, double width = 0.5)"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_signatures_accept_aliases() {
        let plan = plan();
        assert_eq!(get_constructor_signatures(&plan, "border").len(), 2);
        assert!(get_constructor_signatures(&plan, "Nothing").is_empty());
    }

    #[test]
    fn test_dependencies_use_first_non_empty_constructor() {
        let plan = plan();
        assert_eq!(
            get_constructor_dependencies(&plan, "Outline"),
            vec![
                ("Brush".to_string(), "brush".to_string()),
                ("Shape".to_string(), "inner".to_string()),
            ]
        );
    }

    #[test]
    fn test_registry_help_lines() {
        let plan = plan();
        let lines = registry_help(&plan);

        assert_eq!(lines[0], "Shape (category: shape)");
        assert_eq!(lines[1], "  Outline [aliases: border]");
        assert_eq!(lines[2], "    Outline()");
        assert_eq!(lines[4], "  Dot");
        assert_eq!(lines[5], "    Dot()");
        assert_eq!(lines[6], "art::Brush (category: brush)");
        assert_eq!(lines[7], "  (no registered types)");
    }

    #[test]
    fn test_dependencies_of_empty_constructors() {
        let plan = plan();
        assert!(get_constructor_dependencies(&plan, "Dot").is_empty());
        assert!(get_constructor_dependencies(&plan, "Nothing").is_empty());
    }
}
