// classforge Parser Library
// Pest-based declaration parser for C++ class hierarchies

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::*;
pub use error::*;
pub use parser::*;

// Re-export parser rule for manual testing
pub use parser::Rule;

#[cfg(test)]
mod tests;

// Main parsing functions
pub fn parse_header(input: &str) -> Result<HeaderFile, ParseError> {
    parser::HeaderParser::parse_header(input)
}

pub fn parse_header_with_source(
    input: &str,
    source_file: Option<String>,
) -> Result<HeaderFile, ParseError> {
    parser::HeaderParser::parse_header_with_source(input, source_file)
}

pub fn parse_annotation(line: &str) -> Option<Annotation> {
    parser::HeaderParser::parse_annotation(line)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
