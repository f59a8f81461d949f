// classforge Header AST
// Declaration-level syntax tree for C++ headers with source positions

use std::fmt;

/// Source position information for AST nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub start_line_col: Option<(usize, usize)>,
    pub end_line_col: Option<(usize, usize)>,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            start_line_col: None,
            end_line_col: None,
        }
    }

    pub fn with_line_col(
        start: usize,
        end: usize,
        start_line_col: (usize, usize),
        end_line_col: (usize, usize),
    ) -> Self {
        Self {
            start,
            end,
            start_line_col: Some(start_line_col),
            end_line_col: Some(end_line_col),
        }
    }

    /// 1-based line the span starts on (0 when unknown)
    pub fn start_line(&self) -> usize {
        self.start_line_col.map(|(line, _)| line).unwrap_or(0)
    }

    /// 1-based line the span ends on (0 when unknown)
    pub fn end_line(&self) -> usize {
        self.end_line_col.map(|(line, _)| line).unwrap_or(0)
    }
}

/// A parsed header file: every class definition found, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFile {
    pub classes: Vec<ClassDecl>,
    pub source_file: Option<String>,
    pub span: Span,
}

impl HeaderFile {
    /// Find the first class with the given simple name
    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.iter().find(|class| class.name == name)
    }
}

/// `class` or `struct`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKey {
    Class,
    Struct,
}

impl ClassKey {
    /// Member access before the first access label
    pub fn default_access(self) -> Access {
        match self {
            ClassKey::Class => Access::Private,
            ClassKey::Struct => Access::Public,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
    Private,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Public => write!(f, "public"),
            Access::Protected => write!(f, "protected"),
            Access::Private => write!(f, "private"),
        }
    }
}

/// A class or struct definition (forward declarations are not recorded)
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub key: ClassKey,
    pub name: String,
    /// Enclosing namespaces, outermost first
    pub namespace: Vec<String>,
    /// `Some` for class templates, even when the parameter list is empty
    pub template_params: Option<Vec<TemplateParam>>,
    /// Template arguments after the class name (`class Foo<int>`)
    pub specialization_args: Option<Vec<TemplateArg>>,
    pub is_final: bool,
    pub bases: Vec<BaseSpecifier>,
    pub constructors: Vec<ConstructorDecl>,
    /// Declares at least one pure virtual member
    pub is_abstract: bool,
    pub span: Span,
}

impl ClassDecl {
    pub fn is_template(&self) -> bool {
        self.template_params.is_some()
    }

    pub fn is_specialization(&self) -> bool {
        self.specialization_args.is_some()
    }

    /// Namespace-qualified spelling (`ns::inner::Name`)
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace.join("::"), self.name)
        }
    }

    /// Whether one of the base specifiers names `base` (simple-name comparison)
    pub fn derives_from(&self, base: &str) -> bool {
        self.bases.iter().any(|spec| spec.ty.simple_name() == base)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateParam {
    pub kind: TemplateParamKind,
    pub name: Option<String>,
    pub is_pack: bool,
    pub default: Option<TemplateArg>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateParamKind {
    /// `typename T` / `class T`
    Type,
    /// `int N`
    NonType(TypeSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaseSpecifier {
    pub access: Option<Access>,
    pub is_virtual: bool,
    pub ty: TypeSpec,
}

/// Any `Name(params) ...` member declaration whose name matched the class
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub access: Access,
    pub is_explicit: bool,
    pub is_deleted: bool,
    pub params: Vec<ParamDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub ty: TypeSpec,
    pub name: Option<String>,
    /// Default argument as written, whitespace-normalized
    pub default: Option<String>,
    pub span: Span,
}

/// A type as written in a declaration
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub is_const: bool,
    pub is_volatile: bool,
    pub path: TypePath,
    pub indirections: Vec<Indirection>,
}

impl TypeSpec {
    /// Unqualified, unparameterized name of the innermost segment
    pub fn simple_name(&self) -> &str {
        self.path
            .segments
            .last()
            .map(|segment| segment.name.as_str())
            .unwrap_or("")
    }

    pub fn is_void(&self) -> bool {
        !self.is_const
            && self.indirections.is_empty()
            && self.path.segments.len() == 1
            && self.path.segments[0].name == "void"
            && self.path.segments[0].args.is_none()
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            write!(f, "const ")?;
        }
        if self.is_volatile {
            write!(f, "volatile ")?;
        }
        write!(f, "{}", self.path)?;
        if !self.indirections.is_empty() {
            let rendered: String = self.indirections.iter().map(|i| i.to_string()).collect();
            write!(f, " {}", rendered.trim_end())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypePath {
    pub global: bool,
    pub segments: Vec<PathSegment>,
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.global {
            write!(f, "::")?;
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "::")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub name: String,
    pub args: Option<Vec<TemplateArg>>,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(args) = &self.args {
            let rendered: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
            write!(f, "<{}>", rendered.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateArg {
    Type(TypeSpec),
    Value(String),
}

impl fmt::Display for TemplateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateArg::Type(ty) => write!(f, "{}", ty),
            TemplateArg::Value(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indirection {
    Pointer { is_const: bool },
    LValueRef,
    RValueRef,
}

impl fmt::Display for Indirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indirection::Pointer { is_const: false } => write!(f, "*"),
            Indirection::Pointer { is_const: true } => write!(f, "*const "),
            Indirection::LValueRef => write!(f, "&"),
            Indirection::RValueRef => write!(f, "&&"),
        }
    }
}

/// A `// @key: value` metadata line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub key: String,
    pub value: String,
}
