// Class-level parsing for the classforge header parser
// Handles class/struct heads, template heads, base clauses and constructor declarations

use super::{HeaderParser, Rule};
use crate::ast::*;
use crate::error::*;
use pest::iterators::Pair;

impl HeaderParser {
    /// Parse `template<...> class Name ... { ... };`
    pub(super) fn parse_template_class(
        pair: Pair<Rule>,
        namespace: &[String],
    ) -> ParseResult<ClassDecl> {
        let mut inner = pair.into_inner();
        let head = Self::expect_next(&mut inner, "template head")?;
        let params = Self::parse_template_head(head)?;
        let class = Self::expect_next(&mut inner, "class definition")?;
        Self::parse_class_decl(class, namespace, Some(params))
    }

    fn parse_template_head(pair: Pair<Rule>) -> ParseResult<Vec<TemplateParam>> {
        pair.into_inner()
            .filter(|p| p.as_rule() == Rule::template_param)
            .map(Self::parse_template_param)
            .collect()
    }

    fn parse_template_param(pair: Pair<Rule>) -> ParseResult<TemplateParam> {
        let param = Self::expect_next(&mut pair.into_inner(), "template parameter")?;
        let is_type = match param.as_rule() {
            Rule::type_template_param => true,
            Rule::non_type_template_param => false,
            _ => return Err(Self::unexpected(&param, "template parameter")),
        };

        let mut kind = TemplateParamKind::Type;
        let mut name = None;
        let mut is_pack = false;
        let mut default = None;

        for item in param.into_inner() {
            match item.as_rule() {
                Rule::type_spec if !is_type => {
                    kind = TemplateParamKind::NonType(Self::parse_type_spec(item)?);
                }
                Rule::pack_marker => is_pack = true,
                Rule::identifier => name = Some(item.as_str().to_string()),
                Rule::template_default => {
                    let value = Self::expect_next(&mut item.into_inner(), "template default")?;
                    default = Some(Self::parse_template_arg_value(value)?);
                }
                _ => {}
            }
        }

        Ok(TemplateParam {
            kind,
            name,
            is_pack,
            default,
        })
    }

    /// Parse a class or struct definition
    pub(super) fn parse_class_decl(
        pair: Pair<Rule>,
        namespace: &[String],
        template_params: Option<Vec<TemplateParam>>,
    ) -> ParseResult<ClassDecl> {
        let span = Self::extract_span(&pair);

        let mut key = ClassKey::Class;
        let mut name = String::new();
        let mut specialization_args = None;
        let mut is_final = false;
        let mut bases = Vec::new();
        let mut body = None;

        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::class_key => {
                    key = if item.as_str().trim() == "struct" {
                        ClassKey::Struct
                    } else {
                        ClassKey::Class
                    };
                }
                Rule::class_head_name => {
                    for part in item.into_inner() {
                        match part.as_rule() {
                            Rule::identifier => name = part.as_str().to_string(),
                            Rule::template_args => {
                                specialization_args = Some(Self::parse_template_args(part)?)
                            }
                            _ => {}
                        }
                    }
                }
                Rule::kw_final => is_final = true,
                Rule::base_clause => {
                    for base in item.into_inner() {
                        bases.push(Self::parse_base_specifier(base)?);
                    }
                }
                Rule::class_body => body = Some(item),
                _ => {}
            }
        }

        let (constructors, is_abstract) = match body {
            Some(body) => Self::parse_class_body(body, &name, key)?,
            None => (Vec::new(), false),
        };

        Ok(ClassDecl {
            key,
            name,
            namespace: namespace.to_vec(),
            template_params,
            specialization_args,
            is_final,
            bases,
            constructors,
            is_abstract,
            span,
        })
    }

    fn parse_base_specifier(pair: Pair<Rule>) -> ParseResult<BaseSpecifier> {
        let mut access = None;
        let mut is_virtual = false;
        let mut ty = None;

        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::access_specifier => access = Some(Self::parse_access(&item)),
                Rule::kw_virtual => is_virtual = true,
                Rule::named_type => {
                    ty = Some(TypeSpec {
                        is_const: false,
                        is_volatile: false,
                        path: Self::parse_named_type(item)?,
                        indirections: Vec::new(),
                    })
                }
                _ => {}
            }
        }

        let ty = ty.ok_or_else(|| ParseError::EmptyParse {
            expected: "base class name".to_string(),
        })?;

        Ok(BaseSpecifier {
            access,
            is_virtual,
            ty,
        })
    }

    fn parse_access(pair: &Pair<Rule>) -> Access {
        match pair.as_str().trim() {
            "public" => Access::Public,
            "protected" => Access::Protected,
            _ => Access::Private,
        }
    }

    /// Walk the member list tracking the current access level. Returns the
    /// constructors of `class_name` and whether any member is pure virtual.
    fn parse_class_body(
        pair: Pair<Rule>,
        class_name: &str,
        key: ClassKey,
    ) -> ParseResult<(Vec<ConstructorDecl>, bool)> {
        let mut access = key.default_access();
        let mut constructors = Vec::new();
        let mut is_abstract = false;

        for member in pair.into_inner() {
            match member.as_rule() {
                Rule::access_label => {
                    if let Some(specifier) = member
                        .into_inner()
                        .find(|p| p.as_rule() == Rule::access_specifier)
                    {
                        access = Self::parse_access(&specifier);
                    }
                }
                Rule::constructor_decl => {
                    if let Some(ctor) = Self::parse_constructor(member, class_name, access)? {
                        constructors.push(ctor);
                    }
                }
                Rule::pure_virtual_marker => is_abstract = true,
                _ => {}
            }
        }

        Ok((constructors, is_abstract))
    }

    /// Parse a `Name(params) tail` member; `None` when `Name` is not the class
    fn parse_constructor(
        pair: Pair<Rule>,
        class_name: &str,
        access: Access,
    ) -> ParseResult<Option<ConstructorDecl>> {
        let span = Self::extract_span(&pair);

        let mut is_explicit = false;
        let mut is_deleted = false;
        let mut name = None;
        let mut params = Vec::new();

        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::kw_explicit => is_explicit = true,
                Rule::identifier if name.is_none() => name = Some(item.as_str()),
                Rule::parameter_list => {
                    for param in item.into_inner() {
                        params.push(Self::parse_parameter(param)?);
                    }
                }
                Rule::ctor_deleted => is_deleted = true,
                _ => {}
            }
        }

        if name != Some(class_name) {
            return Ok(None);
        }

        // `Name(void)` declares no parameters
        if params.len() == 1 && params[0].name.is_none() && params[0].ty.is_void() {
            params.clear();
        }

        Ok(Some(ConstructorDecl {
            access,
            is_explicit,
            is_deleted,
            params,
            span,
        }))
    }

    fn parse_parameter(pair: Pair<Rule>) -> ParseResult<ParamDecl> {
        let span = Self::extract_span(&pair);
        let mut inner = pair.into_inner();
        let ty = Self::parse_type_spec(Self::expect_next(&mut inner, "parameter type")?)?;

        let mut name = None;
        let mut default = None;
        for item in inner {
            match item.as_rule() {
                Rule::param_name => name = Some(item.as_str().trim().to_string()),
                Rule::default_arg => {
                    if let Some(value) = item
                        .into_inner()
                        .find(|p| p.as_rule() == Rule::default_value)
                    {
                        default = Some(Self::normalize_whitespace(value.as_str()));
                    }
                }
                _ => {}
            }
        }

        Ok(ParamDecl {
            ty,
            name,
            default,
            span,
        })
    }
}
