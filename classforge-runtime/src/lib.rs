//! classforge Runtime
//!
//! Executes a registry's dispatch plan in process. Tagged parameter cells, positional
//! and named bundles, and construction into reflective [`Instance`] values stand in for
//! the generated C++ factories, so registry behaviour can be exercised without a C++
//! toolchain.

#![allow(clippy::uninlined_format_args)]

pub mod cell;
pub mod error;
pub mod factory;
pub mod value;

#[cfg(test)]
mod tests;

pub use cell::{NamedBundle, ParamCell, ParamTag};
pub use error::{CastError, Result, RuntimeError};
pub use factory::{ConstructorHook, Factory};
pub use value::{Instance, Value};
