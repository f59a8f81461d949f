// classforge Header Parser
// Pest-based reader for the declaration-level structure of C++ headers

use crate::ast::*;
use crate::error::*;
use pest::Parser;
use pest::iterators::{Pair, Pairs};
use pest_derive::Parser;

mod annotations;
mod classes;
mod types;

#[derive(Parser)]
#[grammar = "header.pest"]
pub struct HeaderParser;

impl HeaderParser {
    /// Parse a complete header
    pub fn parse_header(input: &str) -> ParseResult<HeaderFile> {
        Self::parse_header_with_source(input, None)
    }

    /// Parse a complete header, remembering which file it came from
    pub fn parse_header_with_source(
        input: &str,
        source_file: Option<String>,
    ) -> ParseResult<HeaderFile> {
        let mut pairs = Self::parse(Rule::header, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;

        let header = pairs.next().ok_or_else(|| ParseError::EmptyParse {
            expected: "header".to_string(),
        })?;
        let span = Self::extract_span(&header);

        let mut classes = Vec::new();
        let mut namespace = Vec::new();
        Self::collect_items(header.into_inner(), &mut namespace, &mut classes)?;

        Ok(HeaderFile {
            classes,
            source_file,
            span,
        })
    }

    /// Walk top-level items, descending into namespaces and linkage blocks.
    /// Anything that is not a class definition is skipped.
    fn collect_items(
        pairs: Pairs<Rule>,
        namespace: &mut Vec<String>,
        classes: &mut Vec<ClassDecl>,
    ) -> ParseResult<()> {
        for pair in pairs {
            match pair.as_rule() {
                Rule::namespace_decl => {
                    let depth = namespace.len();
                    let inner = pair.into_inner();
                    for name in inner.clone().filter(|p| p.as_rule() == Rule::qualified_name) {
                        namespace.extend(
                            name.into_inner()
                                .filter(|p| p.as_rule() == Rule::identifier)
                                .map(|p| p.as_str().to_string()),
                        );
                    }
                    Self::collect_items(inner, namespace, classes)?;
                    namespace.truncate(depth);
                }
                Rule::template_class => {
                    classes.push(Self::parse_template_class(pair, namespace)?);
                }
                Rule::class_decl => {
                    classes.push(Self::parse_class_decl(pair, namespace, None)?);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Extract span information from a Pest pair
    pub(crate) fn extract_span(pair: &Pair<Rule>) -> Span {
        let pest_span = pair.as_span();
        Span::with_line_col(
            pest_span.start(),
            pest_span.end(),
            pest_span.start_pos().line_col(),
            pest_span.end_pos().line_col(),
        )
    }

    /// Take the next inner pair, failing with the rule we expected to see
    pub(crate) fn expect_next<'i>(
        pairs: &mut Pairs<'i, Rule>,
        expected: &str,
    ) -> ParseResult<Pair<'i, Rule>> {
        pairs.next().ok_or_else(|| ParseError::EmptyParse {
            expected: expected.to_string(),
        })
    }

    pub(crate) fn unexpected(pair: &Pair<Rule>, expected: &str) -> ParseError {
        ParseError::UnexpectedRule {
            expected: expected.to_string(),
            found: pair.as_rule(),
            span: Self::extract_span(pair),
        }
    }

    /// Collapse every whitespace run to a single space
    pub(crate) fn normalize_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
