//! Error types for the registry generator
//!
//! Following the parser's miette patterns so every failure renders the same way.

use classforge_parser::ParseError;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Every way registry generation can fail. Generation stops at the first one.
#[derive(Error, Diagnostic, Debug)]
pub enum RegistryError {
    #[error("Could not read {}", path.display())]
    #[diagnostic(
        code(classforge::registry::unreadable_input),
        help("Check that the header exists and is readable")
    )]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {file}")]
    #[diagnostic(code(classforge::registry::parse_failed))]
    Parse {
        file: String,
        #[source]
        #[diagnostic_source]
        source: ParseError,
    },

    #[error("Base type {name} was not found in any input")]
    #[diagnostic(
        code(classforge::registry::base_not_found),
        help("Add the header declaring {name} to the inputs, or check the spelling")
    )]
    BaseNotFound { name: String },

    #[error("Base type {name} is declared in both {first} and {second}")]
    #[diagnostic(
        code(classforge::registry::duplicate_base),
        help("Pass each header only once and keep one definition of {name}")
    )]
    DuplicateBase {
        name: String,
        first: String,
        second: String,
    },

    #[error("Concrete type {name} is registered twice under {base}")]
    #[diagnostic(
        code(classforge::registry::duplicate_concrete_type),
        help("Concrete type names must be unique within a base type")
    )]
    DuplicateConcreteType { base: String, name: String },

    #[error("Name {token} of {second} collides with {first} under {base}")]
    #[diagnostic(
        code(classforge::registry::name_collision),
        help("Registry names and aliases must resolve to exactly one concrete type")
    )]
    NameCollision {
        base: String,
        token: String,
        first: String,
        second: String,
    },

    #[error("Base types {first} and {second} share the category {category}")]
    #[diagnostic(
        code(classforge::registry::category_collision),
        help("Give one of them a distinct `// @category:` annotation")
    )]
    CategoryCollision {
        category: String,
        first: String,
        second: String,
    },

    #[error(
        "{concrete} has {concrete_arity} template parameters but its base {base} has {base_arity}"
    )]
    #[diagnostic(
        code(classforge::registry::generic_mismatch),
        help("A generic concrete type is instantiated with a prefix of its base's type arguments")
    )]
    GenericMismatch {
        base: String,
        concrete: String,
        base_arity: usize,
        concrete_arity: usize,
    },

    #[error("{concrete} passes <{written}> to its base {base}, which does not start with <{params}>")]
    #[diagnostic(
        code(classforge::registry::generic_not_prefix),
        help("Write the derived type's own parameters first and in order, as in `class D<T> : public Base<T, int>`")
    )]
    GenericNotPrefix {
        base: String,
        concrete: String,
        params: String,
        written: String,
    },

    #[error("Could not read configuration file {}", path.display())]
    #[diagnostic(code(classforge::config::unreadable))]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration")]
    #[diagnostic(
        code(classforge::config::invalid),
        help("Known keys: include_root, annotation_lookback, generic_arity_strict, header_comment")
    )]
    ConfigInvalid {
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to render the registry")]
    #[diagnostic(code(classforge::emit::format))]
    Format(#[from] std::fmt::Error),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
