//! Small C++ spelling helpers shared by the section writers

use crate::model::GenericParam;

/// A double-quoted C++ string literal
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Turn a category tag into an identifier fragment
pub fn identifier(value: &str) -> String {
    let ident: String = value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", ident)
    } else {
        ident
    }
}

/// `template<typename T, int N>`, or nothing for a non-generic base
pub fn template_head(params: &[GenericParam]) -> Option<String> {
    if params.is_empty() {
        return None;
    }
    let decls: Vec<String> = params.iter().map(GenericParam::declaration).collect();
    Some(format!("template<{}>", decls.join(", ")))
}

/// `{"a", "b"}` as a braced initializer
pub fn string_list(values: &[&str]) -> String {
    let items: Vec<String> = values.iter().map(|v| string_literal(v)).collect();
    format!("{{{}}}", items.join(", "))
}
