//! Factory dispatch plan
//!
//! The data form of the generated factories. For every base type, an ordered
//! list of concrete types (the name dispatch) and, within each, the ordered
//! constructor overloads (the overload dispatch). The artifact emitter and the
//! in-process executor both walk this one plan.
//!
//! Dispatch is two-stage and first-match-wins:
//!
//! - name dispatch compares the requested class name against each concrete
//!   type in discovery order;
//! - overload dispatch tries each constructor in declaration order and takes
//!   the first whose arity admits the bundle.
//!
//! Once a name matches, its overloads are final: an unmatched overload never
//! falls back to a later type.

use crate::catalog::{ConstructorCatalog, OverloadEntry};
use crate::model::{ClassModel, GenericParam, Hierarchy};
use crate::resolution::NameRegistry;
use indexmap::IndexMap;

/// One concrete type inside a base's name dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDispatch {
    pub concrete: String,
    /// Namespace-qualified spelling for emitted code
    pub qualified_name: String,
    pub generic_params: Vec<String>,
    /// Arguments the type passes to its base (`Container<int>` gives `["int"]`)
    pub base_args: Vec<String>,
    pub source_file: String,
    pub registry_name: Option<String>,
    pub aliases: Vec<String>,
    pub overloads: Vec<OverloadEntry>,
}

impl TypeDispatch {
    pub fn is_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }

    /// Instantiate against the caller's type arguments. A generic type takes
    /// the prefix of `base_args` matching its own arity; a non-generic type is
    /// used as-is. `None` when there are too few arguments.
    pub fn instantiation(&self, base_args: &[String]) -> Option<String> {
        if !self.is_generic() {
            return Some(self.qualified_name.clone());
        }
        let prefix = base_args.get(..self.generic_params.len())?;
        Some(format!("{}<{}>", self.qualified_name, prefix.join(", ")))
    }

    /// Whether this type, instantiated for `type_args`, derives from
    /// `Base<type_args...>`. The base specifier's arguments are compared after
    /// substituting the type's own parameters; a specifier without arguments
    /// is taken on trust.
    pub fn accepts_type_args(&self, type_args: &[String]) -> bool {
        if self.base_args.is_empty() {
            return true;
        }
        let Some(own_args) = type_args.get(..self.generic_params.len()) else {
            return false;
        };
        self.base_args.len() == type_args.len()
            && self
                .base_args
                .iter()
                .zip(type_args)
                .all(|(written, given)| {
                    substitute(written, &self.generic_params, own_args) == given.as_str()
                })
    }
}

/// Replace whole identifiers naming a template parameter with its argument
fn substitute(spelling: &str, params: &[String], args: &[String]) -> String {
    let mut out = String::with_capacity(spelling.len());
    let mut ident = String::new();

    let flush = |ident: &mut String, out: &mut String| {
        if !ident.is_empty() {
            match params.iter().position(|p| p.as_str() == ident.as_str()) {
                Some(i) => out.push_str(&args[i]),
                None => out.push_str(ident),
            }
            ident.clear();
        }
    };

    for ch in spelling.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            ident.push(ch);
        } else {
            flush(&mut ident, &mut out);
            out.push(ch);
        }
    }
    flush(&mut ident, &mut out);
    out
}

/// The name dispatch of one base type
#[derive(Debug, Clone, PartialEq)]
pub struct BaseDispatch {
    pub base: String,
    pub qualified_base: String,
    pub category: String,
    /// Lowercased base name used in generated function names
    pub fn_suffix: String,
    pub generic_params: Vec<GenericParam>,
    pub source_file: String,
    pub types: Vec<TypeDispatch>,
}

impl BaseDispatch {
    fn build(hierarchy: &Hierarchy, catalog: &ConstructorCatalog) -> Self {
        let types = hierarchy
            .concretes
            .iter()
            .map(|concrete| TypeDispatch {
                concrete: concrete.name.clone(),
                qualified_name: concrete.qualified_name(),
                generic_params: concrete.generic_params.clone(),
                base_args: concrete.base_args.clone(),
                source_file: concrete.source_file.clone(),
                registry_name: concrete.registry_name.clone(),
                aliases: concrete.aliases.clone(),
                overloads: catalog
                    .overloads(&concrete.name)
                    .map(<[OverloadEntry]>::to_vec)
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            base: hierarchy.base.name.clone(),
            qualified_base: hierarchy.base.qualified_name(),
            category: hierarchy.base.category(),
            fn_suffix: hierarchy.base.fn_suffix(),
            generic_params: hierarchy.base.generic_params.clone(),
            source_file: hierarchy.base.source_file.clone(),
            types,
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }

    /// Sequential name dispatch over canonical names
    pub fn find_type(&self, name: &str) -> Option<&TypeDispatch> {
        self.types.iter().find(|ty| ty.concrete == name)
    }

    pub fn generic_names(&self) -> Vec<String> {
        self.generic_params.iter().map(|p| p.name.clone()).collect()
    }

    /// `Base` or `Base<T, U>` spelled with the base's own parameter names
    pub fn generic_spelling(&self) -> String {
        if self.is_generic() {
            format!("{}<{}>", self.qualified_base, self.generic_names().join(", "))
        } else {
            self.qualified_base.clone()
        }
    }
}

/// Result of one dispatch attempt. Callers of a generated factory only see
/// matched or absent; the split is kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchOutcome<'p> {
    Matched {
        ty: &'p TypeDispatch,
        overload: &'p OverloadEntry,
    },
    UnknownType,
    NoMatchingConstructor,
}

impl<'p> DispatchOutcome<'p> {
    pub fn matched(self) -> Option<(&'p TypeDispatch, &'p OverloadEntry)> {
        match self {
            DispatchOutcome::Matched { ty, overload } => Some((ty, overload)),
            _ => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, DispatchOutcome::Matched { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchPlan {
    bases: IndexMap<String, BaseDispatch>,
    names: NameRegistry,
}

impl DispatchPlan {
    pub fn build(model: &ClassModel, names: &NameRegistry) -> Self {
        let bases = model
            .hierarchies()
            .map(|hierarchy| {
                let catalog = ConstructorCatalog::build(hierarchy);
                (
                    hierarchy.base.name.clone(),
                    BaseDispatch::build(hierarchy, &catalog),
                )
            })
            .collect();

        Self {
            bases,
            names: names.clone(),
        }
    }

    pub fn base(&self, name: &str) -> Option<&BaseDispatch> {
        self.bases.get(name)
    }

    pub fn bases(&self) -> impl Iterator<Item = &BaseDispatch> {
        self.bases.values()
    }

    pub fn names(&self) -> &NameRegistry {
        &self.names
    }

    /// Positional convention: canonical names only, exact arity
    pub fn dispatch_positional<'p>(
        &'p self,
        base: &str,
        class_name: &str,
        len: usize,
    ) -> DispatchOutcome<'p> {
        let Some(ty) = self.base(base).and_then(|b| b.find_type(class_name)) else {
            return DispatchOutcome::UnknownType;
        };

        match ty.overloads.iter().find(|o| o.admits_positional(len)) {
            Some(overload) => DispatchOutcome::Matched { ty, overload },
            None => DispatchOutcome::NoMatchingConstructor,
        }
    }

    /// Named convention: the class name goes through the base's category
    /// resolver first, then the first overload whose range admits the bundle
    /// and whose required names are all present is taken
    pub fn dispatch_named<'p>(
        &'p self,
        base: &str,
        class_name: &str,
        keys: &[&str],
    ) -> DispatchOutcome<'p> {
        let Some(base) = self.base(base) else {
            return DispatchOutcome::UnknownType;
        };
        let resolved = self.names.resolve(&base.category, class_name);
        let Some(ty) = base.find_type(resolved) else {
            return DispatchOutcome::UnknownType;
        };

        match ty
            .overloads
            .iter()
            .find(|o| o.admits_named(keys.len(), |name| keys.contains(&name)))
        {
            Some(overload) => DispatchOutcome::Matched { ty, overload },
            None => DispatchOutcome::NoMatchingConstructor,
        }
    }

    pub fn match_positional(
        &self,
        base: &str,
        class_name: &str,
        len: usize,
    ) -> Option<(&TypeDispatch, &OverloadEntry)> {
        self.dispatch_positional(base, class_name, len).matched()
    }

    pub fn match_named(
        &self,
        base: &str,
        class_name: &str,
        keys: &[&str],
    ) -> Option<(&TypeDispatch, &OverloadEntry)> {
        self.dispatch_named(base, class_name, keys).matched()
    }

    /// Instantiate `concrete` (under any base) for the given base arguments
    pub fn instantiation(&self, concrete: &str, base_args: &[String]) -> Option<String> {
        self.bases()
            .find_map(|base| base.find_type(concrete))
            .and_then(|ty| ty.instantiation(base_args))
    }

    /// Find a concrete type under any base, with its base
    pub fn find_concrete(&self, name: &str) -> Option<(&BaseDispatch, &TypeDispatch)> {
        self.bases()
            .find_map(|base| base.find_type(name).map(|ty| (base, ty)))
    }
}
