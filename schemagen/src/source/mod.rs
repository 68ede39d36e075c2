//! Schema sources
//!
//! A [`SchemaSource`] discovers tables and columns and resolves their native
//! types. Discovery and type resolution are two separate steps because they
//! come from two separate queries: the metadata catalog knows names and
//! declared types, a zero-row query against each table knows the native
//! types.

pub mod mysql;

pub use mysql::MySqlSchemaSource;

use crate::error::Result;
use crate::schema::Schema;
use async_trait::async_trait;

/// Capability to produce a resolved [`Schema`]
#[async_trait]
pub trait SchemaSource: Send {
    /// Discover tables and columns of `database`
    ///
    /// Restricted to `table_filter` when given. Returns `Ok(None)` when
    /// nothing was found.
    async fn load_schema(
        &mut self,
        database: &str,
        table_filter: Option<&str>,
    ) -> Result<Option<Schema>>;

    /// Assign the native type of every column in `schema`
    ///
    /// Fails with [`crate::CodegenError::SchemaMismatch`] when a column is
    /// missing from the live table.
    async fn resolve_column_types(&mut self, schema: &mut Schema) -> Result<()>;

    /// Discover and resolve in one go
    async fn fetch_schema(
        &mut self,
        database: &str,
        table_filter: Option<&str>,
    ) -> Result<Option<Schema>> {
        let Some(mut schema) = self.load_schema(database, table_filter).await? else {
            return Ok(None);
        };

        self.resolve_column_types(&mut schema).await?;
        Ok(Some(schema))
    }

    /// Release the underlying connection
    ///
    /// The source cannot be queried afterwards.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
