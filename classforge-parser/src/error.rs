// classforge Parser Error Handling
// Error reporting with miette integration

use crate::parser::Rule;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main parse error type with miette integration
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("Parse error")]
    #[diagnostic(
        code(classforge::parse::pest_error),
        help("Check the declaration syntax near the highlighted location")
    )]
    PestError {
        #[source_code]
        src: String,
        #[label("error occurred here")]
        span: SourceSpan,
        message: String,
    },

    #[error("Unexpected grammar rule")]
    #[diagnostic(
        code(classforge::parse::unexpected_rule),
        help("Expected rule: {expected}")
    )]
    UnexpectedRule {
        expected: String,
        found: crate::parser::Rule,
        span: crate::ast::Span,
    },

    #[error("Empty parse result")]
    #[diagnostic(
        code(classforge::parse::empty),
        help("The grammar produced no {expected} node; this is a parser bug")
    )]
    EmptyParse { expected: String },
}

impl ParseError {
    /// Create a parse error from a Pest parsing error
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: String) -> Self {
        let span = match error.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new(pos.into(), 1),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new(start.into(), end - start)
            }
        };

        let message = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } => {
                let mut message_parts = vec![format!("{}", error)];

                if !positives.is_empty() {
                    let expected: Vec<String> = positives
                        .iter()
                        .map(rule_to_user_friendly_description)
                        .collect();
                    if expected.len() == 1 {
                        message_parts.push(format!("\nexpected {}", expected[0]));
                    } else {
                        message_parts.push("\nexpected one of:".to_string());
                        for desc in expected {
                            message_parts.push(format!("\n  - {}", desc));
                        }
                    }
                }

                let location_context = get_parsing_context(&src, &error.location);
                if !location_context.is_empty() {
                    message_parts.push(format!("\nnear {}", location_context));
                }

                message_parts.concat()
            }
            _ => format!("{}", error),
        };

        ParseError::PestError { src, span, message }
    }

    /// The detailed message for pest failures, or the display text otherwise
    pub fn detail(&self) -> String {
        match self {
            ParseError::PestError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convert a parser rule to a user-friendly description
fn rule_to_user_friendly_description(rule: &Rule) -> String {
    match rule {
        Rule::identifier => "an identifier".to_string(),
        Rule::number_lit => "a number".to_string(),
        Rule::string_lit => "a string literal".to_string(),
        Rule::char_lit => "a character literal".to_string(),

        Rule::class_decl => "a class definition (class Name { ... };)".to_string(),
        Rule::class_key => "'class' or 'struct'".to_string(),
        Rule::class_head_name => "a class name".to_string(),
        Rule::class_body => "a class body ({ ... })".to_string(),
        Rule::base_clause => "a base clause (: public Base)".to_string(),
        Rule::base_specifier => "a base class".to_string(),
        Rule::access_specifier => "'public', 'protected' or 'private'".to_string(),
        Rule::access_label => "an access label (public:)".to_string(),

        Rule::template_class => "a class template".to_string(),
        Rule::template_head => "a template head (template<typename T>)".to_string(),
        Rule::template_param => "a template parameter".to_string(),
        Rule::template_args => "template arguments (<T, U>)".to_string(),
        Rule::template_arg => "a template argument".to_string(),

        Rule::constructor_decl => "a constructor declaration".to_string(),
        Rule::parameter_list => "a parameter list".to_string(),
        Rule::parameter => "a parameter (Type name = default)".to_string(),
        Rule::default_value => "a default value".to_string(),

        Rule::type_spec => "a type".to_string(),
        Rule::named_type => "a type name".to_string(),
        Rule::builtin_type => "a fundamental type (unsigned int, long long)".to_string(),
        Rule::ptr_op => "'*', '&' or '&&'".to_string(),

        Rule::namespace_decl => "a namespace block".to_string(),
        Rule::qualified_name => "a qualified name (a::b)".to_string(),

        Rule::annotation => "an annotation line (// @key: value)".to_string(),
        Rule::annotation_key => "an annotation key".to_string(),

        Rule::header => "a header".to_string(),
        Rule::EOI => "end of input".to_string(),

        _ => format!("a {:?}", rule).replace('_', " "),
    }
}

/// Describe the line an error points at. Positions at or past the end of
/// the input are reported as such, with the line they fall on.
pub(crate) fn get_parsing_context(source: &str, location: &pest::error::InputLocation) -> String {
    let position = match location {
        pest::error::InputLocation::Pos(pos) => *pos,
        pest::error::InputLocation::Span((start, _)) => *start,
    };

    let before = source.get(..position).unwrap_or(source);
    let line_num = before.matches('\n').count() + 1;

    if position >= source.len() {
        return format!("line {}, at the end of input", line_num);
    }

    let line = source.lines().nth(line_num - 1).unwrap_or_default();
    let content = if line.trim().is_empty() {
        "an empty line".to_string()
    } else {
        format!("'{}'", line.trim())
    };
    format!("line {}, in {}", line_num, content)
}
