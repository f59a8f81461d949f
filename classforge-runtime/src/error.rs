//! Runtime error types for the dispatch executor.
//!
//! None of these reach the caller of a factory: every one of them collapses to
//! the absent result. They exist for logging and for the `try_` entry points.

use crate::cell::ParamTag;
use miette::Diagnostic;
use thiserror::Error;

/// A parameter cell that cannot be read as the parameter's type
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CastError {
    #[error("unsupported parameter tag {tag}")]
    #[diagnostic(
        code(classforge::runtime::unsupported_tag),
        help("Tags are 0 (passthrough), 1 (integer), 2 (floating), 3 (string) and 4 (boolean)")
    )]
    UnsupportedTag { tag: u8 },

    #[error("{tag} cell holds a {found} value")]
    #[diagnostic(
        code(classforge::runtime::malformed_cell),
        help("The cell's value must have the representation its tag names")
    )]
    MalformedCell { tag: ParamTag, found: &'static str },

    #[error("parameter tag {tag} does not match the parameter type {expected}")]
    #[diagnostic(
        code(classforge::runtime::type_mismatch),
        help("Arithmetic tags convert to arithmetic parameters only; string cells to string parameters only")
    )]
    TypeMismatch { tag: ParamTag, expected: String },
}

/// Why a construction attempt produced no instance
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("{name} is not a registered type of {base}")]
    #[diagnostic(code(classforge::runtime::unknown_type))]
    UnknownType { base: String, name: String },

    #[error("no constructor of {name} accepts the supplied parameters")]
    #[diagnostic(
        code(classforge::runtime::no_matching_constructor),
        help("Positional bundles must match a constructor's parameter count exactly")
    )]
    NoMatchingConstructor { base: String, name: String },

    #[error("{base} takes {expected} type arguments, {found} were supplied")]
    #[diagnostic(code(classforge::runtime::type_argument_arity))]
    TypeArgumentArity {
        base: String,
        expected: usize,
        found: usize,
    },

    #[error("{concrete} does not derive from {base}<{args}>")]
    #[diagnostic(code(classforge::runtime::type_argument_mismatch))]
    TypeArgumentMismatch {
        base: String,
        concrete: String,
        args: String,
    },

    #[error("cannot pass parameter {parameter}")]
    #[diagnostic(code(classforge::runtime::cast))]
    Cast {
        parameter: String,
        #[source]
        #[diagnostic_source]
        source: CastError,
    },

    #[error("constructor of {concrete} failed: {message}")]
    #[diagnostic(code(classforge::runtime::constructor_fault))]
    ConstructorFault { concrete: String, message: String },

    #[error("constructor of {concrete} panicked")]
    #[diagnostic(code(classforge::runtime::constructor_panic))]
    ConstructorPanic { concrete: String },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
