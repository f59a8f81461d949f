//! Tagged parameter cells and bundles.
//!
//! A cell carries a value and a tag saying how to read it. The five tags and
//! their conversions are the same as the generated `cast_param` helper:
//!
//! - passthrough: the value is taken as-is and must already fit the parameter
//! - integer, floating, boolean: converted to any arithmetic parameter
//! - string: accepted by string parameters only

use crate::error::CastError;
use crate::value::Value;
use classforge_registry::{PrimitiveKind, TypeDescriptor};
use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParamTag {
    Passthrough = 0,
    Integer = 1,
    Floating = 2,
    String = 3,
    Boolean = 4,
}

impl TryFrom<u8> for ParamTag {
    type Error = CastError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(ParamTag::Passthrough),
            1 => Ok(ParamTag::Integer),
            2 => Ok(ParamTag::Floating),
            3 => Ok(ParamTag::String),
            4 => Ok(ParamTag::Boolean),
            tag => Err(CastError::UnsupportedTag { tag }),
        }
    }
}

impl fmt::Display for ParamTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamTag::Passthrough => write!(f, "passthrough"),
            ParamTag::Integer => write!(f, "integer"),
            ParamTag::Floating => write!(f, "floating"),
            ParamTag::String => write!(f, "string"),
            ParamTag::Boolean => write!(f, "boolean"),
        }
    }
}

/// A tagged value in a named bundle
#[derive(Debug, Clone, PartialEq)]
pub struct ParamCell {
    pub tag: ParamTag,
    pub value: Value,
}

impl ParamCell {
    pub fn new(tag: ParamTag, value: Value) -> Self {
        Self { tag, value }
    }

    /// Build a cell from a raw wire tag
    pub fn from_raw(tag: u8, value: Value) -> Result<Self, CastError> {
        Ok(Self::new(ParamTag::try_from(tag)?, value))
    }

    pub fn passthrough(value: Value) -> Self {
        Self::new(ParamTag::Passthrough, value)
    }

    pub fn integer(value: i64) -> Self {
        Self::new(ParamTag::Integer, Value::Integer(value))
    }

    pub fn floating(value: f64) -> Self {
        Self::new(ParamTag::Floating, Value::Float(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ParamTag::String, Value::String(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(ParamTag::Boolean, Value::Boolean(value))
    }

    /// Read the cell as a value of parameter type `ty`
    pub fn cast(&self, ty: &TypeDescriptor) -> Result<Value, CastError> {
        let target = ty.primitive_kind();
        let mismatch = || CastError::TypeMismatch {
            tag: self.tag,
            expected: ty.to_string(),
        };

        match self.tag {
            ParamTag::Passthrough => {
                if fits(&self.value, target) {
                    Ok(self.value.clone())
                } else {
                    Err(mismatch())
                }
            }
            ParamTag::Integer => {
                let n = self.expect(Value::as_integer)?;
                convert_arithmetic(n as f64, Some(n), target).ok_or_else(mismatch)
            }
            ParamTag::Floating => {
                let x = self.expect(Value::as_float)?;
                convert_arithmetic(x, None, target).ok_or_else(mismatch)
            }
            ParamTag::Boolean => {
                let b = self.expect(Value::as_bool)?;
                convert_arithmetic(b as i64 as f64, Some(b as i64), target).ok_or_else(mismatch)
            }
            ParamTag::String => {
                let s = self.expect(|v| v.as_str().map(String::from))?;
                match target {
                    Some(PrimitiveKind::String) => Ok(Value::String(s)),
                    _ => Err(mismatch()),
                }
            }
        }
    }

    /// The cell's value in the representation its tag names
    fn expect<T>(&self, read: impl Fn(&Value) -> Option<T>) -> Result<T, CastError> {
        read(&self.value).ok_or(CastError::MalformedCell {
            tag: self.tag,
            found: self.value.type_name(),
        })
    }
}

/// Passthrough takes the value verbatim: primitives must already have the
/// parameter's kind; anything else is opaque to the executor
fn fits(value: &Value, target: Option<PrimitiveKind>) -> bool {
    match target {
        Some(kind) => value.primitive_kind() == Some(kind),
        None => matches!(value, Value::Object(_) | Value::Literal(_)),
    }
}

/// `static_cast` into an arithmetic parameter. Floating to integer truncates.
fn convert_arithmetic(x: f64, exact: Option<i64>, target: Option<PrimitiveKind>) -> Option<Value> {
    match target? {
        PrimitiveKind::Integer => Some(Value::Integer(exact.unwrap_or(x.trunc() as i64))),
        PrimitiveKind::Floating => Some(Value::Float(x)),
        PrimitiveKind::Boolean => Some(Value::Boolean(x != 0.0)),
        PrimitiveKind::String => None,
    }
}

/// Parameter name to tagged cell, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedBundle {
    cells: IndexMap<String, ParamCell>,
}

impl NamedBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, cell: ParamCell) -> Self {
        self.insert(name, cell);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, cell: ParamCell) {
        self.cells.insert(name.into(), cell);
    }

    pub fn get(&self, name: &str) -> Option<&ParamCell> {
        self.cells.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, ParamCell)> for NamedBundle {
    fn from_iter<I: IntoIterator<Item = (S, ParamCell)>>(iter: I) -> Self {
        let mut bundle = NamedBundle::new();
        for (name, cell) in iter {
            bundle.insert(name, cell);
        }
        bundle
    }
}
