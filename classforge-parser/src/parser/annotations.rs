// Annotation comments for the classforge header parser
// `// @key: value` lines are parsed one line at a time

use super::{HeaderParser, Rule};
use crate::ast::Annotation;
use pest::Parser;

impl HeaderParser {
    /// Parse one source line as an annotation comment.
    /// Returns `None` for anything else, including ordinary comments.
    pub fn parse_annotation(line: &str) -> Option<Annotation> {
        let mut pairs = Self::parse(Rule::annotation, line.trim()).ok()?;
        let annotation = pairs.next()?;

        let mut key = None;
        let mut value = String::new();
        for item in annotation.into_inner() {
            match item.as_rule() {
                Rule::annotation_key => key = Some(item.as_str().to_string()),
                Rule::annotation_value => value = item.as_str().trim().to_string(),
                _ => {}
            }
        }

        Some(Annotation { key: key?, value })
    }

    /// Annotations on lines `first_line..=last_line` (1-based, inclusive), in
    /// source order
    pub fn annotations_in_lines(source: &str, first_line: usize, last_line: usize) -> Vec<Annotation> {
        if last_line < first_line || last_line == 0 {
            return Vec::new();
        }
        let skip = first_line.saturating_sub(1);
        source
            .lines()
            .skip(skip)
            .take(last_line - skip)
            .filter_map(Self::parse_annotation)
            .collect()
    }
}
