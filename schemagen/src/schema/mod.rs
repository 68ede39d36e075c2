//! In-memory model of an introspected database schema
//!
//! A [`Schema`] is an ordered mapping from table name to [`Table`], and each
//! table owns its [`Column`]s in declaration order. Sources build the schema
//! with [`Schema::push_column`] and then resolve native types with
//! [`Table::assign_native_types`]; emitters only ever see `&Schema`.

pub mod native_type;

pub use native_type::NativeType;

use crate::error::{CodegenError, Result};
use std::collections::HashMap;

/// One table column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Raw database identifier
    pub name: String,
    /// Type declaration as reported by the database (e.g. `varchar(255)`)
    pub declared_type: String,
    /// Resolved native type, `None` until type resolution has run
    pub native_type: Option<NativeType>,
}

impl Column {
    /// Create an unresolved column
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            native_type: None,
        }
    }

    /// Create a column with its native type already known
    #[must_use]
    pub fn resolved(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        native_type: NativeType,
    ) -> Self {
        Self {
            native_type: Some(native_type),
            ..Self::new(name, declared_type)
        }
    }
}

/// A table and its columns in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Table name as stored in the database
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in declaration order
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Whether every column has a native type
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.columns.iter().all(|column| column.native_type.is_some())
    }

    fn push(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Assign native types from live result-set metadata
    ///
    /// `live` lists `(column name, native type)` pairs as reported by the
    /// database for this table. Extra live columns are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::SchemaMismatch`] if a column of this table is
    /// not present in `live`.
    pub fn assign_native_types<'a, I>(&mut self, live: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, NativeType)>,
    {
        let live: HashMap<&str, NativeType> = live.into_iter().collect();

        for column in &mut self.columns {
            let native = live.get(column.name.as_str()).copied().ok_or_else(|| {
                CodegenError::SchemaMismatch {
                    table: self.name.clone(),
                    column: column.name.clone(),
                }
            })?;
            column.native_type = Some(native);
        }

        Ok(())
    }
}

/// Ordered mapping from table name to table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    tables: Vec<Table>,
    positions: HashMap<String, usize>,
}

impl Schema {
    /// Create an empty schema
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column to `table`, creating the table on first sight
    ///
    /// Tables keep the order in which they were first seen, columns the order
    /// in which they were pushed.
    pub fn push_column(&mut self, table: &str, column: Column) {
        let position = match self.positions.get(table) {
            Some(&position) => position,
            None => {
                self.tables.push(Table::new(table));
                let position = self.tables.len() - 1;
                self.positions.insert(table.to_string(), position);
                position
            }
        };

        self.tables[position].push(column);
    }

    /// Add a whole table, replacing any table with the same name
    pub fn insert_table(&mut self, table: Table) {
        if let Some(&position) = self.positions.get(table.name()) {
            self.tables[position] = table;
        } else {
            self.positions.insert(table.name().to_string(), self.tables.len());
            self.tables.push(table);
        }
    }

    /// Tables in first-seen order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    /// Mutable access for type resolution
    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.tables.iter_mut()
    }

    /// Look up a table by name
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.positions.get(name).map(|&position| &self.tables[position])
    }

    /// Number of tables
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table was discovered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Whether every column of every table has a native type
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.tables.iter().all(Table::is_resolved)
    }
}
