//! Model class generation
//!
//! One class document per table: an auto-property per column, an empty
//! default constructor and, on request, a constructor reading from a
//! `MySqlDataReader` plus `UpdateQuery`/`InsertQuery`/`DeleteQuery` builders.
//!
//! The statement builders key UPDATE and DELETE on a single column chosen by
//! [`KeyColumnStrategy`]. By default that is the first column in declaration
//! order; no primary-key constraint is consulted. Identifiers are inserted
//! into the statements verbatim.

use super::{GeneratedFile, WriteMode};
use crate::error::{CodegenError, Result};
use crate::naming::{to_class_name, to_property_name};
use crate::schema::{Column, Table};
use crate::templates::{TemplateRegistry, CLASS, DOCUMENT};
use serde_json::json;
use std::path::PathBuf;

/// Which column UPDATE and DELETE statements are keyed on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeyColumnStrategy {
    /// First column in declaration order
    #[default]
    FirstColumn,
    /// Named column; every table must have it
    Explicit(String),
}

impl KeyColumnStrategy {
    /// Pick the key column of `table`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The table has no columns
    /// - The explicit key column does not exist in the table
    pub fn key_column<'t>(&self, table: &'t Table) -> Result<&'t Column> {
        match self {
            Self::FirstColumn => table
                .columns()
                .first()
                .ok_or_else(|| CodegenError::EmptyTable(table.name().to_string())),
            Self::Explicit(name) => {
                table
                    .column(name)
                    .ok_or_else(|| CodegenError::KeyColumnNotFound {
                        table: table.name().to_string(),
                        column: name.clone(),
                    })
            }
        }
    }
}

/// Statement templates returned by the generated CRUD builders
///
/// Placeholders are `{Property}` interpolation holes of the target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrudQueries {
    /// `UPDATE ... SET ... WHERE key = {Key};`
    pub update: String,
    /// `INSERT INTO ... VALUES ( ... );`
    pub insert: String,
    /// `DELETE FROM ... WHERE key = {Key};`
    pub delete: String,
}

impl CrudQueries {
    /// Build the statements for `table`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The table has no columns
    /// - The key column cannot be found
    /// - A column name is empty
    pub fn for_table(table: &Table, key: &KeyColumnStrategy) -> Result<Self> {
        if table.columns().is_empty() {
            return Err(CodegenError::EmptyTable(table.name().to_string()));
        }

        let key_column = key.key_column(table)?;
        let key_clause = format!("{} = {{{}}}", key_column.name, to_property_name(&key_column.name)?);

        let mut assignments = Vec::with_capacity(table.columns().len());
        let mut values = Vec::with_capacity(table.columns().len());
        for column in table.columns() {
            let property = to_property_name(&column.name)?;
            assignments.push(format!("{} = {{{property}}}", column.name));
            values.push(format!(" {{{property}}}"));
        }

        let name = table.name();
        Ok(Self {
            update: format!(
                "UPDATE `{name}` SET {} WHERE {key_clause};",
                assignments.join(", ")
            ),
            insert: format!("INSERT INTO `{name}` VALUES ({});", values.join(",")),
            delete: format!("DELETE FROM `{name}` WHERE {key_clause};"),
        })
    }
}

/// Class generation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassOptions {
    /// Namespace wrapping the class; empty means none
    pub namespace: Option<String>,
    /// Emit the reading constructor and the statement builders
    pub generate_constructor_and_output: bool,
    /// Key column policy for the statement builders
    pub key_column: KeyColumnStrategy,
    /// Extension of generated files, without the dot
    pub extension: String,
}

impl Default for ClassOptions {
    fn default() -> Self {
        Self {
            namespace: None,
            generate_constructor_and_output: false,
            key_column: KeyColumnStrategy::FirstColumn,
            extension: "cs".to_string(),
        }
    }
}

/// Renders one class file per table
pub struct ClassEmitter<'a> {
    templates: &'a TemplateRegistry,
    database: String,
    options: ClassOptions,
}

impl<'a> ClassEmitter<'a> {
    /// Create an emitter writing below `<database>/`
    pub fn new(templates: &'a TemplateRegistry, database: impl Into<String>, options: ClassOptions) -> Self {
        Self {
            templates,
            database: database.into(),
            options,
        }
    }

    /// Render the class file for `table`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A column has no resolved native type
    /// - The statement builders cannot be built (see [`CrudQueries::for_table`])
    /// - Template rendering fails
    pub fn emit(&self, table: &Table) -> Result<GeneratedFile> {
        let class_name = to_class_name(table.name())?;
        let content = self.render(table)?;

        let extension = self.options.extension.trim_start_matches('.');
        let path = PathBuf::from(&self.database).join(format!("{class_name}.{extension}"));

        Ok(GeneratedFile {
            path,
            content,
            description: format!("Class {class_name} for table {}", table.name()),
            mode: WriteMode::Overwrite,
        })
    }

    /// Render the class document text for `table`
    ///
    /// # Errors
    ///
    /// See [`ClassEmitter::emit`].
    pub fn render(&self, table: &Table) -> Result<String> {
        let metadata = self.class_metadata(table)?;
        let body = self.templates.render(CLASS, &metadata)?;

        let namespace = self.options.namespace.as_deref().filter(|ns| !ns.is_empty());
        let document = json!({
            "with_reader": self.options.generate_constructor_and_output,
            "namespace": namespace,
            "body": body.trim_end(),
        });

        self.templates.render(DOCUMENT, &document)
    }

    /// Template variables for the class body
    fn class_metadata(&self, table: &Table) -> Result<serde_json::Value> {
        let columns = table
            .columns()
            .iter()
            .map(|column| {
                let native = column.native_type.ok_or_else(|| CodegenError::UnresolvedColumnType {
                    table: table.name().to_string(),
                    column: column.name.clone(),
                })?;

                Ok(json!({
                    "name": column.name,
                    "property": to_property_name(&column.name)?,
                    "declared_type": column.declared_type,
                    "native_type": native.type_name(),
                    "conversion": native.conversion(),
                    "is_string": native.is_string(),
                    "is_binary": native.is_binary(),
                }))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut metadata = json!({
            "table": table.name(),
            "class_name": to_class_name(table.name())?,
            "columns": columns,
            "with_reader": self.options.generate_constructor_and_output,
        });

        if self.options.generate_constructor_and_output {
            let queries = CrudQueries::for_table(table, &self.options.key_column)?;
            metadata["update_query"] = json!(queries.update);
            metadata["insert_query"] = json!(queries.insert);
            metadata["delete_query"] = json!(queries.delete);
        }

        Ok(metadata)
    }
}
