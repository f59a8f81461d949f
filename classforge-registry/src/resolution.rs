//! Name resolution
//!
//! Per-category tables mapping registry names and aliases to canonical
//! concrete type names, plus the category to base table. Resolution is total:
//! a token that is not registered comes back unchanged.

use crate::model::ClassModel;
use indexmap::IndexMap;

/// One category's lookup table
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTable {
    pub category: String,
    pub base: String,
    /// Registry name or alias to canonical name, in emission order
    pub entries: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameRegistry {
    tables: IndexMap<String, CategoryTable>,
}

impl NameRegistry {
    /// Build the tables from a validated model. Tables keep base request
    /// order; entries keep discovery order with the registry name first.
    pub fn build(model: &ClassModel) -> Self {
        let mut tables = IndexMap::new();

        for hierarchy in model.hierarchies() {
            let category = hierarchy.base.category();
            let mut entries = IndexMap::new();
            for concrete in &hierarchy.concretes {
                for token in concrete.lookup_tokens() {
                    entries
                        .entry(token.to_string())
                        .or_insert_with(|| concrete.name.clone());
                }
            }

            tables.entry(category.clone()).or_insert(CategoryTable {
                category,
                base: hierarchy.base.name.clone(),
                entries,
            });
        }

        Self { tables }
    }

    /// Resolve a token within one category
    pub fn resolve<'a>(&'a self, category: &str, token: &'a str) -> &'a str {
        self.tables
            .get(category)
            .and_then(|table| table.entries.get(token))
            .map(String::as_str)
            .unwrap_or(token)
    }

    /// Try every category in declaration order; the first resolution that
    /// differs from the token wins
    pub fn resolve_any<'a>(&'a self, token: &'a str) -> &'a str {
        self.tables
            .values()
            .filter_map(|table| table.entries.get(token))
            .map(String::as_str)
            .find(|resolved| *resolved != token)
            .unwrap_or(token)
    }

    /// Category to base type name, falling back to the input
    pub fn category_to_base<'a>(&'a self, category: &'a str) -> &'a str {
        self.tables
            .get(category)
            .map(|table| table.base.as_str())
            .unwrap_or(category)
    }

    pub fn table(&self, category: &str) -> Option<&CategoryTable> {
        self.tables.get(category)
    }

    pub fn tables(&self) -> impl Iterator<Item = &CategoryTable> {
        self.tables.values()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BaseType, ConcreteType};

    fn registry() -> NameRegistry {
        let mut model = ClassModel::new();
        model.add_base(BaseType::new("Shape"));
        model.add_base(BaseType::new("Brush").with_category("tool"));
        model
            .add_concrete(
                ConcreteType::new("Circle", "Shape")
                    .with_registry_name("circle")
                    .with_alias("round"),
            )
            .unwrap();
        model.add_concrete(ConcreteType::new("Square", "Shape")).unwrap();
        model
            .add_concrete(ConcreteType::new("Pencil", "Brush").with_alias("round"))
            .unwrap();
        NameRegistry::build(&model)
    }

    #[test]
    fn test_canonical_names_resolve_to_themselves() {
        let names = registry();
        assert_eq!(names.resolve("shape", "Circle"), "Circle");
        assert_eq!(names.resolve("shape", "Square"), "Square");
    }

    #[test]
    fn test_registry_names_and_aliases_resolve() {
        let names = registry();
        assert_eq!(names.resolve("shape", "circle"), "Circle");
        assert_eq!(names.resolve("shape", "round"), "Circle");
        assert_eq!(names.resolve("tool", "round"), "Pencil");
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let names = registry();
        assert_eq!(names.resolve("shape", "hexagon"), "hexagon");
        assert_eq!(names.resolve("missing", "circle"), "circle");
        assert_eq!(names.resolve_any("hexagon"), "hexagon");
    }

    #[test]
    fn test_combined_resolver_uses_declaration_order() {
        let names = registry();
        assert_eq!(names.resolve_any("round"), "Circle");
        assert_eq!(names.resolve_any("circle"), "Circle");
    }

    #[test]
    fn test_category_to_base() {
        let names = registry();
        assert_eq!(names.category_to_base("shape"), "Shape");
        assert_eq!(names.category_to_base("tool"), "Brush");
        assert_eq!(names.category_to_base("brush"), "brush");
    }
}
