// Type parsing for the classforge header parser
// Handles qualified names, template arguments, cv-qualifiers and declarators

use super::{HeaderParser, Rule};
use crate::ast::*;
use crate::error::*;
use pest::iterators::Pair;

impl HeaderParser {
    /// Parse a `type_spec` pair
    pub(crate) fn parse_type_spec(pair: Pair<Rule>) -> ParseResult<TypeSpec> {
        if pair.as_rule() != Rule::type_spec {
            return Err(Self::unexpected(&pair, "type"));
        }

        let mut is_const = false;
        let mut is_volatile = false;
        let mut path = None;
        let mut indirections = Vec::new();

        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::cv_qualifier => match item.as_str().trim() {
                    "const" => is_const = true,
                    _ => is_volatile = true,
                },
                Rule::type_core => {
                    let core = Self::expect_next(&mut item.into_inner(), "type name")?;
                    path = Some(match core.as_rule() {
                        Rule::builtin_type => TypePath {
                            global: false,
                            segments: vec![PathSegment {
                                name: Self::normalize_whitespace(core.as_str()),
                                args: None,
                            }],
                        },
                        Rule::named_type => Self::parse_named_type(core)?,
                        _ => return Err(Self::unexpected(&core, "type name")),
                    });
                }
                Rule::ptr_op => indirections.push(Self::parse_ptr_op(item)?),
                _ => {}
            }
        }

        let path = path.ok_or_else(|| ParseError::EmptyParse {
            expected: "type name".to_string(),
        })?;

        Ok(TypeSpec {
            is_const,
            is_volatile,
            path,
            indirections,
        })
    }

    fn parse_ptr_op(pair: Pair<Rule>) -> ParseResult<Indirection> {
        let op = Self::expect_next(&mut pair.into_inner(), "declarator")?;
        match op.as_rule() {
            Rule::pointer_op => {
                let is_const = op
                    .into_inner()
                    .any(|cv| cv.as_rule() == Rule::cv_qualifier && cv.as_str().trim() == "const");
                Ok(Indirection::Pointer { is_const })
            }
            Rule::lvalue_ref => Ok(Indirection::LValueRef),
            Rule::rvalue_ref => Ok(Indirection::RValueRef),
            _ => Err(Self::unexpected(&op, "'*', '&' or '&&'")),
        }
    }

    /// Parse a possibly qualified, possibly templated name
    pub(crate) fn parse_named_type(pair: Pair<Rule>) -> ParseResult<TypePath> {
        let mut global = false;
        let mut segments = Vec::new();

        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::global_scope => global = true,
                Rule::name_segment => {
                    let mut name = String::new();
                    let mut args = None;
                    for part in item.into_inner() {
                        match part.as_rule() {
                            Rule::identifier => name = part.as_str().to_string(),
                            Rule::template_args => args = Some(Self::parse_template_args(part)?),
                            _ => {}
                        }
                    }
                    segments.push(PathSegment { name, args });
                }
                _ => {}
            }
        }

        Ok(TypePath { global, segments })
    }

    pub(crate) fn parse_template_args(pair: Pair<Rule>) -> ParseResult<Vec<TemplateArg>> {
        pair.into_inner()
            .filter(|p| p.as_rule() == Rule::template_arg)
            .map(|arg| {
                let value = Self::expect_next(&mut arg.into_inner(), "template argument")?;
                Self::parse_template_arg_value(value)
            })
            .collect()
    }

    /// A template argument or template default: a type or a number
    pub(crate) fn parse_template_arg_value(pair: Pair<Rule>) -> ParseResult<TemplateArg> {
        match pair.as_rule() {
            Rule::type_spec => Ok(TemplateArg::Type(Self::parse_type_spec(pair)?)),
            Rule::number_lit => Ok(TemplateArg::Value(pair.as_str().to_string())),
            _ => Err(Self::unexpected(&pair, "template argument")),
        }
    }
}
