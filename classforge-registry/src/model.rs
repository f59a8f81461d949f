//! Class model
//!
//! The structured form of a set of class hierarchies: requested base types, the
//! concrete types that derive from them, and every constructor's parameters.
//! The model is plain data; everything else in the crate is derived from it.

use indexmap::IndexMap;
use std::fmt;

/// A parameter or member type, spelled the way it was declared
/// (`const std::string &`, `std::vector<In *>`, `double`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor(String);

/// The closed set of parameter types the registry knows how to marshal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Integer,
    Floating,
    Boolean,
    String,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Integer => write!(f, "integer"),
            PrimitiveKind::Floating => write!(f, "floating"),
            PrimitiveKind::Boolean => write!(f, "boolean"),
            PrimitiveKind::String => write!(f, "string"),
        }
    }
}

const INTEGER_TYPES: &[&str] = &[
    "int",
    "signed",
    "signed int",
    "unsigned",
    "unsigned int",
    "short",
    "short int",
    "unsigned short",
    "unsigned short int",
    "long",
    "long int",
    "unsigned long",
    "unsigned long int",
    "long long",
    "long long int",
    "unsigned long long",
    "unsigned long long int",
    "char",
    "signed char",
    "unsigned char",
    "size_t",
    "ptrdiff_t",
    "int8_t",
    "int16_t",
    "int32_t",
    "int64_t",
    "uint8_t",
    "uint16_t",
    "uint32_t",
    "uint64_t",
];

const FLOATING_TYPES: &[&str] = &["float", "double", "long double"];

impl TypeDescriptor {
    pub fn new(spelling: impl Into<String>) -> Self {
        let spelling: String = spelling.into();
        Self(spelling.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the outermost declarator is a reference (`&` or `&&`)
    pub fn is_reference(&self) -> bool {
        self.0.ends_with('&')
    }

    /// Whether the type, after dropping a reference, is a pointer
    pub fn is_pointer(&self) -> bool {
        self.value_type().ends_with('*')
    }

    /// The type a parameter cell holds: reference and top-level `const`
    /// removed. `const std::string &` becomes `std::string`; `const In *`
    /// keeps its pointee qualifier.
    pub fn value_type(&self) -> String {
        let mut spelling = self.0.trim();
        if let Some(stripped) = spelling.strip_suffix("&&") {
            spelling = stripped.trim_end();
        } else if let Some(stripped) = spelling.strip_suffix('&') {
            spelling = stripped.trim_end();
        }

        if let Some(stripped) = spelling.strip_suffix("*const") {
            return format!("{}*", stripped);
        }
        if !spelling.ends_with('*') {
            if let Some(stripped) = spelling.strip_prefix("const ") {
                spelling = stripped.trim_start();
            }
        }
        spelling.to_string()
    }

    /// The innermost unqualified name: cv-qualifiers, declarators, template
    /// arguments and namespace qualification stripped. `const geo::Shape<T> *`
    /// becomes `Shape`.
    pub fn core_name(&self) -> String {
        let head = match self.0.find('<') {
            Some(pos) => &self.0[..pos],
            None => &self.0,
        };
        let cleaned = head.replace(['*', '&'], " ");
        let words: Vec<&str> = cleaned
            .split_whitespace()
            .filter(|word| !matches!(*word, "const" | "volatile" | "typename" | "struct" | "class"))
            .collect();
        let joined = words.join(" ");
        match joined.rsplit("::").next() {
            Some(last) => last.trim().to_string(),
            None => joined,
        }
    }

    /// The primitive kind of a by-value or by-reference parameter, if any.
    /// Pointers are never primitive.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        let value = self.value_type();
        if value.contains('*') {
            return None;
        }
        let value = value.strip_prefix("::").unwrap_or(&value);
        let value = value.strip_prefix("std::").unwrap_or(value);

        if INTEGER_TYPES.contains(&value) {
            Some(PrimitiveKind::Integer)
        } else if FLOATING_TYPES.contains(&value) {
            Some(PrimitiveKind::Floating)
        } else if value == "bool" {
            Some(PrimitiveKind::Boolean)
        } else if value == "string" {
            Some(PrimitiveKind::String)
        } else {
            None
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeDescriptor {
    fn from(spelling: &str) -> Self {
        Self::new(spelling)
    }
}

/// One constructor parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: TypeDescriptor,
    pub name: String,
    /// Literal default, already rendered as source tokens
    pub default: Option<String>,
}

impl Parameter {
    pub fn new(ty: impl Into<TypeDescriptor>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)?;
        if let Some(default) = &self.default {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

/// An ordered parameter list belonging to one concrete type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constructor {
    pub params: Vec<Parameter>,
}

impl Constructor {
    pub fn new(params: Vec<Parameter>) -> Self {
        Self { params }
    }

    /// Parameters lacking a default
    pub fn required_count(&self) -> usize {
        self.params.iter().filter(|p| p.is_required()).count()
    }

    pub fn total_count(&self) -> usize {
        self.params.len()
    }
}

/// One template parameter of a base type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericParam {
    pub name: String,
    /// `None` for type parameters, the value type for non-type ones
    pub value_type: Option<TypeDescriptor>,
}

impl GenericParam {
    pub fn type_param(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: None,
        }
    }

    pub fn value_param(name: impl Into<String>, value_type: impl Into<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            value_type: Some(value_type.into()),
        }
    }

    /// `typename T` or `int N`
    pub fn declaration(&self) -> String {
        match &self.value_type {
            Some(ty) => format!("{} {}", ty, self.name),
            None => format!("typename {}", self.name),
        }
    }
}

impl From<&str> for GenericParam {
    fn from(name: &str) -> Self {
        Self::type_param(name)
    }
}

impl From<String> for GenericParam {
    fn from(name: String) -> Self {
        Self::type_param(name)
    }
}

/// A registered hierarchy root
#[derive(Debug, Clone, PartialEq)]
pub struct BaseType {
    pub name: String,
    /// Template parameters, in declaration order
    pub generic_params: Vec<GenericParam>,
    /// Category tag; `None` means the lowercased name
    pub category: Option<String>,
    pub namespace: Vec<String>,
    pub source_file: String,
    pub metadata: IndexMap<String, String>,
}

impl BaseType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_params: Vec::new(),
            category: None,
            namespace: Vec::new(),
            source_file: String::new(),
            metadata: IndexMap::new(),
        }
    }

    pub fn with_generics<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<GenericParam>,
    {
        self.generic_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_source(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = source_file.into();
        self
    }

    pub fn with_namespace<I, S>(mut self, namespace: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespace = namespace.into_iter().map(Into::into).collect();
        self
    }

    pub fn category(&self) -> String {
        self.category
            .clone()
            .unwrap_or_else(|| self.name.to_lowercase())
    }

    /// Suffix of every generated function for this base
    pub fn fn_suffix(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn is_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }

    pub fn generic_names(&self) -> Vec<&str> {
        self.generic_params.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }
}

/// A constructible type directly derived from one base
#[derive(Debug, Clone, PartialEq)]
pub struct ConcreteType {
    pub name: String,
    /// Name of the owning base type
    pub base: String,
    /// Arguments written in the base specifier (`Container<T>` gives `["T"]`)
    pub base_args: Vec<String>,
    pub generic_params: Vec<String>,
    pub namespace: Vec<String>,
    pub source_file: String,
    pub registry_name: Option<String>,
    pub aliases: Vec<String>,
    /// Free-form category override; carried as metadata only
    pub category: Option<String>,
    pub constructors: Vec<Constructor>,
    pub metadata: IndexMap<String, String>,
}

impl ConcreteType {
    pub fn new(name: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
            base_args: Vec::new(),
            generic_params: Vec::new(),
            namespace: Vec::new(),
            source_file: String::new(),
            registry_name: None,
            aliases: Vec::new(),
            category: None,
            constructors: Vec::new(),
            metadata: IndexMap::new(),
        }
    }

    pub fn with_generics<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generic_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_base_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_source(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = source_file.into();
        self
    }

    pub fn with_registry_name(mut self, registry_name: impl Into<String>) -> Self {
        self.registry_name = Some(registry_name.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_constructor(mut self, params: Vec<Parameter>) -> Self {
        self.constructors.push(Constructor::new(params));
        self
    }

    pub fn is_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }

    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }

    /// Registry name followed by aliases: every token besides the type name
    /// that resolves to this type
    pub fn lookup_tokens(&self) -> impl Iterator<Item = &str> {
        self.registry_name
            .iter()
            .chain(self.aliases.iter())
            .map(String::as_str)
    }
}

/// A base type and the concrete types discovered for it, in discovery order
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    pub base: BaseType,
    pub concretes: Vec<ConcreteType>,
}

impl Hierarchy {
    pub fn new(base: BaseType) -> Self {
        Self {
            base,
            concretes: Vec::new(),
        }
    }

    pub fn concrete(&self, name: &str) -> Option<&ConcreteType> {
        self.concretes.iter().find(|c| c.name == name)
    }
}

/// Every requested hierarchy, keyed by base name in request order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassModel {
    hierarchies: IndexMap<String, Hierarchy>,
}

impl ClassModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a base type. A base registered twice keeps its first position
    /// and takes the latest declaration.
    pub fn add_base(&mut self, base: BaseType) -> &mut Hierarchy {
        let name = base.name.clone();
        let hierarchy = self
            .hierarchies
            .entry(name)
            .or_insert_with(|| Hierarchy::new(base.clone()));
        hierarchy.base = base;
        hierarchy
    }

    /// Attach a concrete type to its base. Returns the concrete back when the
    /// base is not registered.
    pub fn add_concrete(&mut self, concrete: ConcreteType) -> Result<(), ConcreteType> {
        match self.hierarchies.get_mut(&concrete.base) {
            Some(hierarchy) => {
                hierarchy.concretes.push(concrete);
                Ok(())
            }
            None => Err(concrete),
        }
    }

    pub fn hierarchy(&self, base: &str) -> Option<&Hierarchy> {
        self.hierarchies.get(base)
    }

    pub fn hierarchy_mut(&mut self, base: &str) -> Option<&mut Hierarchy> {
        self.hierarchies.get_mut(base)
    }

    pub fn hierarchies(&self) -> impl Iterator<Item = &Hierarchy> {
        self.hierarchies.values()
    }

    pub fn base_names(&self) -> impl Iterator<Item = &str> {
        self.hierarchies.keys().map(String::as_str)
    }

    pub fn is_base(&self, name: &str) -> bool {
        self.hierarchies.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.hierarchies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hierarchies.is_empty()
    }

    /// Find a concrete type by canonical name under any base
    pub fn find_concrete(&self, name: &str) -> Option<&ConcreteType> {
        self.hierarchies().find_map(|h| h.concrete(name))
    }

    pub(crate) fn into_hierarchies(self) -> IndexMap<String, Hierarchy> {
        self.hierarchies
    }

    pub(crate) fn from_hierarchies(hierarchies: IndexMap<String, Hierarchy>) -> Self {
        Self { hierarchies }
    }
}

pub(crate) fn qualify(namespace: &[String], name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}::{}", namespace.join("::"), name)
    }
}
