//! Model validation
//!
//! Runs once between extraction and every derived component. Collisions that
//! would make a name resolve to two types are rejected here rather than
//! silently shadowed in the generated lookup tables.

use crate::error::{RegistryError, RegistryResult};
use crate::model::{ClassModel, ConcreteType, Hierarchy};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

/// Validate and normalize a model. Aliases that repeat or equal their own
/// type's name are dropped; with `generic_arity_strict` off, generic types
/// that do not fit their base are dropped too.
pub fn validate(model: ClassModel, generic_arity_strict: bool) -> RegistryResult<ClassModel> {
    let mut hierarchies = model.into_hierarchies();

    check_categories(&hierarchies)?;

    for hierarchy in hierarchies.values_mut() {
        check_generics(hierarchy, generic_arity_strict)?;
        for concrete in &mut hierarchy.concretes {
            dedupe_aliases(concrete);
        }
        check_names(hierarchy)?;
    }

    Ok(ClassModel::from_hierarchies(hierarchies))
}

fn check_categories(hierarchies: &IndexMap<String, Hierarchy>) -> RegistryResult<()> {
    let mut seen: IndexMap<String, &str> = IndexMap::new();
    for hierarchy in hierarchies.values() {
        let category = hierarchy.base.category();
        if let Some(first) = seen.get(&category) {
            return Err(RegistryError::CategoryCollision {
                category,
                first: first.to_string(),
                second: hierarchy.base.name.clone(),
            });
        }
        seen.insert(category, &hierarchy.base.name);
    }
    Ok(())
}

/// A generic concrete type is instantiated with the leading arguments of its
/// base, so its own parameters must open the base specifier's argument list.
fn generic_fault(hierarchy: &Hierarchy, concrete: &ConcreteType) -> Option<RegistryError> {
    let base_arity = hierarchy.base.generic_params.len();
    let concrete_arity = concrete.generic_params.len();
    if concrete_arity > base_arity {
        return Some(RegistryError::GenericMismatch {
            base: hierarchy.base.name.clone(),
            concrete: concrete.name.clone(),
            base_arity,
            concrete_arity,
        });
    }

    if concrete.base_args.is_empty() {
        return None;
    }
    let leading = concrete.base_args.get(..concrete_arity);
    if leading == Some(concrete.generic_params.as_slice()) {
        return None;
    }
    Some(RegistryError::GenericNotPrefix {
        base: hierarchy.base.name.clone(),
        concrete: concrete.name.clone(),
        params: concrete.generic_params.join(", "),
        written: concrete.base_args.join(", "),
    })
}

fn check_generics(hierarchy: &mut Hierarchy, strict: bool) -> RegistryResult<()> {
    let mut kept = Vec::with_capacity(hierarchy.concretes.len());

    for concrete in std::mem::take(&mut hierarchy.concretes) {
        let Some(fault) = generic_fault(hierarchy, &concrete) else {
            kept.push(concrete);
            continue;
        };

        if strict {
            return Err(fault);
        }
        warn!(
            base = %hierarchy.base.name,
            concrete = %concrete.name,
            reason = %fault,
            "skipping generic type that is not a prefix of its base"
        );
    }

    hierarchy.concretes = kept;
    Ok(())
}

fn dedupe_aliases(concrete: &mut ConcreteType) {
    let mut seen = IndexSet::new();
    let before = concrete.aliases.len();
    let name = concrete.name.clone();
    let registry_name = concrete.registry_name.clone();

    concrete.aliases.retain(|alias| {
        alias != &name && Some(alias) != registry_name.as_ref() && seen.insert(alias.clone())
    });

    if concrete.aliases.len() != before {
        debug!(concrete = %concrete.name, "dropped redundant aliases");
    }
}

fn check_names(hierarchy: &Hierarchy) -> RegistryResult<()> {
    let base = &hierarchy.base.name;
    let mut owners: IndexMap<&str, &str> = IndexMap::new();

    for concrete in &hierarchy.concretes {
        if owners.get(concrete.name.as_str()) == Some(&concrete.name.as_str()) {
            return Err(RegistryError::DuplicateConcreteType {
                base: base.clone(),
                name: concrete.name.clone(),
            });
        }

        let tokens = std::iter::once(concrete.name.as_str()).chain(concrete.lookup_tokens());
        for token in tokens {
            match owners.get(token) {
                Some(owner) if *owner != concrete.name => {
                    return Err(RegistryError::NameCollision {
                        base: base.clone(),
                        token: token.to_string(),
                        first: owner.to_string(),
                        second: concrete.name.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    owners.insert(token, &concrete.name);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BaseType;

    fn model_with(concretes: Vec<ConcreteType>) -> ClassModel {
        let mut model = ClassModel::new();
        model.add_base(BaseType::new("Shape").with_generics(["T"]));
        for concrete in concretes {
            model.add_concrete(concrete).unwrap();
        }
        model
    }

    #[test]
    fn test_clean_model_passes() {
        let model = model_with(vec![
            ConcreteType::new("Circle", "Shape").with_registry_name("circle"),
            ConcreteType::new("Square", "Shape").with_alias("box"),
        ]);
        assert!(validate(model, true).is_ok());
    }

    #[test]
    fn test_duplicate_concrete_type() {
        let model = model_with(vec![
            ConcreteType::new("Circle", "Shape"),
            ConcreteType::new("Circle", "Shape"),
        ]);
        assert!(matches!(
            validate(model, true),
            Err(RegistryError::DuplicateConcreteType { name, .. }) if name == "Circle"
        ));
    }

    #[test]
    fn test_alias_colliding_with_other_type() {
        let model = model_with(vec![
            ConcreteType::new("Circle", "Shape").with_alias("round"),
            ConcreteType::new("Oval", "Shape").with_registry_name("round"),
        ]);
        match validate(model, true) {
            Err(RegistryError::NameCollision { token, first, second, .. }) => {
                assert_eq!(token, "round");
                assert_eq!(first, "Circle");
                assert_eq!(second, "Oval");
            }
            other => panic!("expected a name collision, got {:?}", other),
        }
    }

    #[test]
    fn test_alias_colliding_with_later_primary_name() {
        let model = model_with(vec![
            ConcreteType::new("Circle", "Shape").with_alias("Square"),
            ConcreteType::new("Square", "Shape"),
        ]);
        assert!(matches!(
            validate(model, true),
            Err(RegistryError::NameCollision { .. })
        ));
    }

    #[test]
    fn test_redundant_aliases_are_dropped() {
        let model = model_with(vec![ConcreteType::new("Circle", "Shape")
            .with_registry_name("circle")
            .with_alias("Circle")
            .with_alias("circle")
            .with_alias("round")
            .with_alias("round")]);

        let model = validate(model, true).unwrap();
        let circle = model.find_concrete("Circle").unwrap();
        assert_eq!(circle.aliases, vec!["round".to_string()]);
    }

    #[test]
    fn test_generic_mismatch_strict_and_lenient() {
        let wide = || ConcreteType::new("Wide", "Shape").with_generics(["T", "U"]);

        assert!(matches!(
            validate(model_with(vec![wide()]), true),
            Err(RegistryError::GenericMismatch { base_arity: 1, concrete_arity: 2, .. })
        ));

        let model = validate(model_with(vec![wide()]), false).unwrap();
        assert!(model.find_concrete("Wide").is_none());
    }

    #[test]
    fn test_generic_parameters_must_lead_the_base_arguments() {
        let mut model = ClassModel::new();
        model.add_base(BaseType::new("Base").with_generics(["A", "B"]));
        model
            .add_concrete(
                ConcreteType::new("Tagged", "Base")
                    .with_generics(["T"])
                    .with_base_args(["std::vector<T>", "int"]),
            )
            .unwrap();
        model
            .add_concrete(
                ConcreteType::new("Swapped", "Base")
                    .with_generics(["T"])
                    .with_base_args(["int", "T"]),
            )
            .unwrap();
        model
            .add_concrete(
                ConcreteType::new("Leading", "Base")
                    .with_generics(["T"])
                    .with_base_args(["T", "int"]),
            )
            .unwrap();

        match validate(model.clone(), true) {
            Err(RegistryError::GenericNotPrefix { concrete, params, written, .. }) => {
                assert_eq!(concrete, "Tagged");
                assert_eq!(params, "T");
                assert_eq!(written, "std::vector<T>, int");
            }
            other => panic!("expected a prefix mismatch, got {:?}", other),
        }

        let model = validate(model, false).unwrap();
        assert!(model.find_concrete("Tagged").is_none());
        assert!(model.find_concrete("Swapped").is_none());
        assert!(model.find_concrete("Leading").is_some());
    }

    #[test]
    fn test_category_collision() {
        let mut model = ClassModel::new();
        model.add_base(BaseType::new("Shape"));
        model.add_base(BaseType::new("Outline").with_category("shape"));
        assert!(matches!(
            validate(model, true),
            Err(RegistryError::CategoryCollision { category, .. }) if category == "shape"
        ));
    }
}
