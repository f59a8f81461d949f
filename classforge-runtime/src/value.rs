//! Runtime values and constructed instances.

use classforge_registry::PrimitiveKind;
use indexmap::IndexMap;
use std::fmt;

/// A value passed to, or stored by, a constructor
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point number
    Float(f64),
    Boolean(bool),
    String(String),
    /// Another constructed instance, passed by handle
    Object(Box<Instance>),
    /// A default token that is not a primitive literal (`nullptr`, `Foo{}`)
    Literal(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "floating",
            Value::Boolean(_) => "boolean",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Literal(_) => "literal",
        }
    }

    /// The primitive kind this value already has, if any
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Value::Integer(_) => Some(PrimitiveKind::Integer),
            Value::Float(_) => Some(PrimitiveKind::Floating),
            Value::Boolean(_) => Some(PrimitiveKind::Boolean),
            Value::String(_) => Some(PrimitiveKind::String),
            Value::Object(_) | Value::Literal(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    /// Evaluate a default token against the parameter's primitive kind.
    /// Anything that does not read as that kind is kept as a literal.
    pub fn from_default(token: &str, kind: Option<PrimitiveKind>) -> Value {
        let token = token.trim();
        let parsed = match kind {
            Some(PrimitiveKind::Integer) => parse_integer(token).map(Value::Integer),
            Some(PrimitiveKind::Floating) => parse_float(token).map(Value::Float),
            Some(PrimitiveKind::Boolean) => match token {
                "true" => Some(Value::Boolean(true)),
                "false" => Some(Value::Boolean(false)),
                _ => None,
            },
            Some(PrimitiveKind::String) => parse_string(token).map(Value::String),
            None => None,
        };
        parsed.unwrap_or_else(|| Value::Literal(token.to_string()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Object(instance) => write!(f, "{}", instance),
            Value::Literal(token) => write!(f, "{}", token),
        }
    }
}

fn parse_integer(token: &str) -> Option<i64> {
    let digits = token.trim_end_matches(['u', 'U', 'l', 'L']);
    let (negative, digits) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, digits.strip_prefix('+').unwrap_or(digits)),
    };
    let digits = digits.replace('\'', "");
    let magnitude = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_float(token: &str) -> Option<f64> {
    let digits = token.trim_end_matches(['f', 'F', 'l', 'L']);
    let digits = digits.replace('\'', "");
    digits
        .parse::<f64>()
        .ok()
        .or_else(|| parse_integer(token).map(|n| n as f64))
}

/// `"text"` or `std::string("text")`
fn parse_string(token: &str) -> Option<String> {
    let token = token
        .strip_prefix("std::string(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(token)
        .trim();
    let inner = token.strip_prefix('"')?.strip_suffix('"')?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            other => out.push(other),
        }
    }
    Some(out)
}

/// A constructed object: the concrete type, its instantiation and the values
/// its constructor received, keyed by parameter name in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Canonical concrete type name
    pub concrete: String,
    /// Base the instance was constructed through
    pub base: String,
    /// `ListContainer<int>` for generic types, otherwise the qualified name
    pub instantiation: String,
    pub type_args: Vec<String>,
    /// Index of the constructor that built the instance
    pub constructor: usize,
    pub fields: IndexMap<String, Value>,
}

impl Instance {
    pub fn new(concrete: impl Into<String>, base: impl Into<String>) -> Self {
        let concrete = concrete.into();
        Self {
            instantiation: concrete.clone(),
            concrete,
            base: base.into(),
            type_args: Vec::new(),
            constructor: 0,
            fields: IndexMap::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// `Container<int>` style handle spelling
    pub fn handle_type(&self) -> String {
        if self.type_args.is_empty() {
            self.base.clone()
        } else {
            format!("{}<{}>", self.base, self.type_args.join(", "))
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.instantiation)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_literals() {
        let int = Some(PrimitiveKind::Integer);
        let float = Some(PrimitiveKind::Floating);

        assert_eq!(Value::from_default("-3", int), Value::Integer(-3));
        assert_eq!(Value::from_default("10UL", int), Value::Integer(10));
        assert_eq!(Value::from_default("0x1F", int), Value::Integer(31));
        assert_eq!(Value::from_default("1.0", float), Value::Float(1.0));
        assert_eq!(Value::from_default("2.5f", float), Value::Float(2.5));
        assert_eq!(Value::from_default("4", float), Value::Float(4.0));
        assert_eq!(
            Value::from_default("true", Some(PrimitiveKind::Boolean)),
            Value::Boolean(true)
        );
    }

    #[test]
    fn test_string_defaults() {
        let string = Some(PrimitiveKind::String);
        assert_eq!(
            Value::from_default("\"a \\\"b\\\"\"", string),
            Value::String("a \"b\"".to_string())
        );
        assert_eq!(
            Value::from_default("std::string(\"x\")", string),
            Value::String("x".to_string())
        );
    }

    #[test]
    fn test_unrecognized_defaults_stay_literal() {
        assert_eq!(
            Value::from_default("nullptr", None),
            Value::Literal("nullptr".to_string())
        );
        assert_eq!(
            Value::from_default("kDefaultSize", Some(PrimitiveKind::Integer)),
            Value::Literal("kDefaultSize".to_string())
        );
    }

    #[test]
    fn test_instance_display() {
        let mut circle = Instance::new("Circle", "Shape");
        circle.fields.insert("radius".to_string(), Value::Float(5.0));
        assert_eq!(circle.to_string(), "Circle(radius: 5.0)");
        assert_eq!(circle.handle_type(), "Shape");
    }
}
