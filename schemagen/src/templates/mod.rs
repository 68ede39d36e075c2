//! Handlebars templates for generated classes and wiki pages
//!
//! Every template has a built-in version compiled into the binary. When a
//! template directory is configured, a file named `<template>.hbs` in that
//! directory replaces the built-in template of the same name, which is how the
//! output language is swapped without touching the emitters.

use crate::error::Result;
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Class body: properties, constructors and statement builders
pub const CLASS: &str = "class";

/// Whole class document: imports and optional namespace around the body
pub const DOCUMENT: &str = "document";

/// Line appended to the shared wiki index
pub const DOCS_INDEX_ENTRY: &str = "docs_index_entry";

/// Per-database wiki page
pub const DOCS_DATABASE: &str = "docs_database";

/// Per-table wiki page
pub const DOCS_TABLE: &str = "docs_table";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (CLASS, include_str!("../../templates/class.hbs")),
    (DOCUMENT, include_str!("../../templates/document.hbs")),
    (DOCS_INDEX_ENTRY, include_str!("../../templates/docs_index_entry.hbs")),
    (DOCS_DATABASE, include_str!("../../templates/docs_database.hbs")),
    (DOCS_TABLE, include_str!("../../templates/docs_table.hbs")),
];

handlebars_helper!(indent: |text: str| indent_lines(text));

/// Prefix every non-blank line with one tab
#[must_use]
pub fn indent_lines(text: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("\t{line}")
            }
        })
        .collect()
}

/// Registry of compiled templates
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl TemplateRegistry {
    /// Registry with the built-in templates only
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to compile.
    pub fn new() -> Result<Self> {
        Self::with_overrides(None)
    }

    /// Registry with built-in templates, replaced by any `<name>.hbs` in `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An override file cannot be read
    /// - A template fails to compile
    pub fn with_overrides(dir: Option<&Path>) -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Generated code, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("indent", Box::new(indent));

        for &(name, builtin) in BUILTIN_TEMPLATES {
            let override_path = dir.map(|dir| dir.join(format!("{name}.hbs")));

            match override_path {
                Some(path) if path.is_file() => {
                    tracing::info!(template = name, path = %path.display(), "using template override");
                    let source = fs::read_to_string(&path)?;
                    handlebars.register_template_string(name, source)?;
                }
                _ => handlebars.register_template_string(name, builtin)?,
            }
        }

        Ok(Self { handlebars })
    }

    /// Render template `name` with `context`
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unknown or rendering fails.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        Ok(self.handlebars.render(name, context)?)
    }

    /// Names of all registered templates
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlebars.get_templates().keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_templates_registered() {
        let registry = TemplateRegistry::new().unwrap();
        let mut names: Vec<_> = registry.names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![CLASS, DOCS_DATABASE, DOCS_INDEX_ENTRY, DOCS_TABLE, DOCUMENT]
        );
    }

    #[test]
    fn test_indent_lines() {
        assert_eq!(indent_lines("a\n\nb\n"), "\ta\n\n\tb\n");
        assert_eq!(indent_lines("\tnested"), "\t\tnested");
        assert_eq!(indent_lines(""), "");
    }

    #[test]
    fn test_no_html_escaping() {
        let registry = TemplateRegistry::new().unwrap();
        let rendered = registry
            .render(DOCS_INDEX_ENTRY, &json!({ "label": "a<b>&c" }))
            .unwrap();
        assert_eq!(rendered, "* [[a<b>&c|a<b>&c]]\n");
    }

    #[test]
    fn test_override_replaces_builtin() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("docs_index_entry.hbs"), "- {{label}}\n").unwrap();

        let registry = TemplateRegistry::with_overrides(Some(dir.path())).unwrap();
        let rendered = registry
            .render(DOCS_INDEX_ENTRY, &json!({ "label": "shop" }))
            .unwrap();
        assert_eq!(rendered, "- shop\n");

        // untouched templates keep their built-in source
        let table = registry
            .render(DOCS_TABLE, &json!({ "label": "shop", "table": "t", "columns": [] }))
            .unwrap();
        assert!(table.contains("Column | Type | Description"));
    }

    #[test]
    fn test_broken_override_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("class.hbs"), "{{#each columns}}x{{/if}}").unwrap();

        assert!(TemplateRegistry::with_overrides(Some(dir.path())).is_err());
    }
}
