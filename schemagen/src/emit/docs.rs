//! Wiki pages describing a schema
//!
//! Layout below the wiki directory:
//!
//! - `index.txt`: one link per generated database, appended on every run
//! - `<label>/<label>.txt`: links to every table page
//! - `<label>/tables/<table>.txt`: the column table of one table
//!
//! The `Description` column is left empty for manual editing.

use super::{GeneratedFile, WriteMode};
use crate::error::Result;
use crate::naming::capitalize_first;
use crate::schema::Schema;
use crate::templates::{TemplateRegistry, DOCS_DATABASE, DOCS_INDEX_ENTRY, DOCS_TABLE};
use serde_json::json;
use std::path::PathBuf;

/// Renders wiki pages for a schema
pub struct DocsEmitter<'a> {
    templates: &'a TemplateRegistry,
    directory: PathBuf,
}

impl<'a> DocsEmitter<'a> {
    /// Create an emitter writing below `directory` (usually `wiki`)
    pub fn new(templates: &'a TemplateRegistry, directory: impl Into<PathBuf>) -> Self {
        Self {
            templates,
            directory: directory.into(),
        }
    }

    /// Render the index entry, the database page and every table page
    ///
    /// # Errors
    ///
    /// Returns an error if a table or column name is empty or rendering fails.
    pub fn emit(&self, label: &str, schema: &Schema) -> Result<Vec<GeneratedFile>> {
        let mut files = Vec::with_capacity(schema.len() + 2);

        files.push(self.index_entry(label)?);
        files.push(self.database_page(label, schema)?);

        for table in schema.tables() {
            let columns = table
                .columns()
                .iter()
                .map(|column| {
                    Ok(json!({
                        "title": capitalize_first(&column.name)?,
                        "declared_type": column.declared_type,
                    }))
                })
                .collect::<Result<Vec<_>>>()?;

            let content = self.templates.render(
                DOCS_TABLE,
                &json!({
                    "label": label,
                    "table": table.name(),
                    "columns": columns,
                }),
            )?;

            files.push(GeneratedFile {
                path: self
                    .directory
                    .join(label)
                    .join("tables")
                    .join(format!("{}.txt", table.name())),
                content,
                description: format!("Wiki page for table {}", table.name()),
                mode: WriteMode::Overwrite,
            });
        }

        Ok(files)
    }

    fn index_entry(&self, label: &str) -> Result<GeneratedFile> {
        let content = self
            .templates
            .render(DOCS_INDEX_ENTRY, &json!({ "label": label }))?;

        Ok(GeneratedFile {
            path: self.directory.join("index.txt"),
            content,
            description: format!("Wiki index entry for {label}"),
            mode: WriteMode::Append,
        })
    }

    fn database_page(&self, label: &str, schema: &Schema) -> Result<GeneratedFile> {
        let tables = schema
            .tables()
            .map(|table| {
                Ok(json!({
                    "title": capitalize_first(table.name())?,
                    "slug": table.name().to_lowercase(),
                }))
            })
            .collect::<Result<Vec<_>>>()?;

        let content = self
            .templates
            .render(DOCS_DATABASE, &json!({ "label": label, "tables": tables }))?;

        Ok(GeneratedFile {
            path: self.directory.join(label).join(format!("{label}.txt")),
            content,
            description: format!("Wiki page for database {label}"),
            mode: WriteMode::Overwrite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, NativeType};

    fn schema() -> Schema {
        let mut schema = Schema::new();
        schema.push_column("users", Column::resolved("id", "int(11)", NativeType::Int32));
        schema.push_column(
            "users",
            Column::resolved("name", "varchar(255)", NativeType::String),
        );
        schema.push_column(
            "Order_Items",
            Column::resolved("sku", "varchar(32)", NativeType::String),
        );
        schema
    }

    #[test]
    fn test_file_layout() {
        let templates = TemplateRegistry::new().unwrap();
        let files = DocsEmitter::new(&templates, "wiki").emit("shop", &schema()).unwrap();

        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("wiki/index.txt"),
                PathBuf::from("wiki/shop/shop.txt"),
                PathBuf::from("wiki/shop/tables/users.txt"),
                PathBuf::from("wiki/shop/tables/Order_Items.txt"),
            ]
        );
        assert_eq!(files[0].mode, WriteMode::Append);
        assert!(files[1..].iter().all(|f| f.mode == WriteMode::Overwrite));
    }

    #[test]
    fn test_index_entry() {
        let templates = TemplateRegistry::new().unwrap();
        let files = DocsEmitter::new(&templates, "wiki").emit("shop", &schema()).unwrap();
        assert_eq!(files[0].content, "* [[shop|shop]]\n");
    }

    #[test]
    fn test_database_page() {
        let templates = TemplateRegistry::new().unwrap();
        let files = DocsEmitter::new(&templates, "wiki").emit("shop", &schema()).unwrap();
        let page = &files[1].content;

        assert!(page.starts_with("[[Database Structure|Database Structure]] > [[shop|shop]]\n"));
        assert!(page.contains("* [[Users|users]]\n"));
        assert!(page.contains("* [[Order_Items|order_items]]\n"));
        assert!(page.find("Users").unwrap() < page.find("Order_Items").unwrap());
    }

    #[test]
    fn test_table_page() {
        let templates = TemplateRegistry::new().unwrap();
        let files = DocsEmitter::new(&templates, "wiki").emit("shop", &schema()).unwrap();
        let page = &files[2].content;

        assert!(page.starts_with(
            "[[Database Structure|Database Structure]] > [[shop|shop]] > [[users|users]]\n"
        ));
        assert!(page.contains("\nColumn | Type | Description\n--- | --- | ---\n"));
        assert!(page.contains("Id | int(11) | \n"));
        assert!(page.contains("Name | varchar(255) | \n"));
        assert!(page.find("Id | int(11)").unwrap() < page.find("Name | varchar(255)").unwrap());
    }

    #[test]
    fn test_empty_schema_still_lists_database() {
        let templates = TemplateRegistry::new().unwrap();
        let files = DocsEmitter::new(&templates, "wiki")
            .emit("shop", &Schema::new())
            .unwrap();
        assert_eq!(files.len(), 2);
    }
}
