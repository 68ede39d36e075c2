//! MySQL schema source
//!
//! Discovery reads `INFORMATION_SCHEMA.COLUMNS`; type resolution prepares a
//! `SELECT * ... LIMIT 0` per table and reads the result-set metadata, so no
//! rows are ever transferred.

use super::SchemaSource;
use crate::config::ConnectionSettings;
use crate::error::{CodegenError, Result};
use crate::schema::{Column, NativeType, Schema};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{Column as _, Connection, Executor, Row, Statement, TypeInfo};
use tracing::{debug, info, warn};

// information_schema reports some columns as binary strings on MySQL 8
const DISCOVERY_QUERY: &str = "SELECT CAST(TABLE_NAME AS CHAR), CAST(COLUMN_NAME AS CHAR), \
     CAST(COLUMN_TYPE AS CHAR) FROM INFORMATION_SCHEMA.COLUMNS WHERE TABLE_SCHEMA = ?";

/// Discovery statement, optionally restricted to one table
fn discovery_query(filtered: bool) -> String {
    if filtered {
        format!("{DISCOVERY_QUERY} AND TABLE_NAME = ?")
    } else {
        DISCOVERY_QUERY.to_string()
    }
}

/// Zero-row statement exposing the column metadata of `table`
fn probe_query(table: &str) -> String {
    format!("SELECT * FROM `{table}` LIMIT 0")
}

/// Native type for a driver type name, falling back to `String`
fn native_type_for(table: &str, column: &str, type_name: &str) -> NativeType {
    NativeType::from_sql_type_name(type_name).unwrap_or_else(|| {
        warn!(table, column, type_name, "unknown column type, using String");
        NativeType::String
    })
}

/// Schema source backed by a single MySQL connection
#[derive(Debug)]
pub struct MySqlSchemaSource {
    connection: Option<MySqlConnection>,
}

impl MySqlSchemaSource {
    /// Open a connection described by `settings`
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached or rejects the login.
    pub async fn connect(settings: &ConnectionSettings) -> Result<Self> {
        let mut options = MySqlConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user);

        if !settings.password.is_empty() {
            options = options.password(&settings.password);
        }
        if let Some(database) = settings.database.as_deref() {
            options = options.database(database);
        }

        let connection = MySqlConnection::connect_with(&options).await?;
        info!(connection = %settings.redacted(), "connection opened");

        Ok(Self::from_connection(connection))
    }

    /// Wrap an already open connection
    #[must_use]
    pub const fn from_connection(connection: MySqlConnection) -> Self {
        Self {
            connection: Some(connection),
        }
    }

    fn connection(&mut self) -> Result<&mut MySqlConnection> {
        self.connection.as_mut().ok_or(CodegenError::SourceClosed)
    }
}

#[async_trait]
impl SchemaSource for MySqlSchemaSource {
    async fn load_schema(
        &mut self,
        database: &str,
        table_filter: Option<&str>,
    ) -> Result<Option<Schema>> {
        let sql = discovery_query(table_filter.is_some());
        let mut query = sqlx::query(&sql).bind(database);
        if let Some(table) = table_filter {
            query = query.bind(table);
        }

        let rows = query.fetch_all(self.connection()?).await?;
        if rows.is_empty() {
            info!(database, table = ?table_filter, "no columns found");
            return Ok(None);
        }

        let mut schema = Schema::new();
        for row in &rows {
            let table: String = row.try_get(0)?;
            let column: String = row.try_get(1)?;
            let declared_type: String = row.try_get(2)?;
            schema.push_column(&table, Column::new(column, declared_type));
        }

        info!(database, tables = schema.len(), columns = rows.len(), "retrieved table information");
        Ok(Some(schema))
    }

    async fn resolve_column_types(&mut self, schema: &mut Schema) -> Result<()> {
        for table in schema.tables_mut() {
            let sql = probe_query(table.name());
            let statement = self.connection()?.prepare(&sql).await?;

            let live: Vec<(String, NativeType)> = statement
                .columns()
                .iter()
                .map(|column| {
                    let native = native_type_for(table.name(), column.name(), column.type_info().name());
                    (column.name().to_string(), native)
                })
                .collect();

            debug!(table = table.name(), columns = live.len(), "resolved column types");
            table.assign_native_types(live.iter().map(|(name, native)| (name.as_str(), *native)))?;
        }

        info!(tables = schema.len(), "retrieved column types");
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(connection) = self.connection.take() {
            connection.close().await?;
            info!("connection closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_query() {
        let all = discovery_query(false);
        assert!(all.contains("FROM INFORMATION_SCHEMA.COLUMNS WHERE TABLE_SCHEMA = ?"));
        assert!(!all.contains("TABLE_NAME = ?"));

        let single = discovery_query(true);
        assert!(single.ends_with("TABLE_SCHEMA = ? AND TABLE_NAME = ?"));
    }

    #[test]
    fn test_probe_query() {
        assert_eq!(probe_query("users"), "SELECT * FROM `users` LIMIT 0");
    }

    #[test]
    fn test_native_type_fallback() {
        assert_eq!(native_type_for("t", "c", "INT"), NativeType::Int32);
        assert_eq!(native_type_for("t", "c", "NULL"), NativeType::String);
    }

    #[tokio::test]
    #[ignore = "requires a MySQL server, see SCHEMAGEN_TEST_* variables"]
    async fn test_live_introspection() {
        let settings = ConnectionSettings {
            host: std::env::var("SCHEMAGEN_TEST_HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            user: std::env::var("SCHEMAGEN_TEST_USER").unwrap_or_else(|_| "root".into()),
            password: std::env::var("SCHEMAGEN_TEST_PASSWORD").unwrap_or_default(),
            database: Some("information_schema".into()),
            ..ConnectionSettings::default()
        };

        let mut source = MySqlSchemaSource::connect(&settings).await.unwrap();
        let schema = source
            .fetch_schema("information_schema", Some("ENGINES"))
            .await
            .unwrap()
            .unwrap();
        source.close().await.unwrap();

        let engines = schema.table("ENGINES").unwrap();
        assert!(engines.is_resolved());
        assert!(engines.column("ENGINE").is_some());
        assert!(matches!(source.close().await, Ok(())));
        assert!(matches!(
            source.load_schema("information_schema", None).await,
            Err(CodegenError::SourceClosed)
        ));
    }
}
