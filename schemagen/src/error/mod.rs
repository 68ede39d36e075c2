//! Error types and error handling

use thiserror::Error;

/// Result alias used throughout the generator
pub type Result<T, E = CodegenError> = std::result::Result<T, E>;

/// Generator error type
#[derive(Debug, Error)]
pub enum CodegenError {
    /// An argument violated a precondition (e.g. an empty identifier)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A column known to the schema is missing from the live table metadata
    #[error("Schema mismatch: column `{column}` of table `{table}` is missing from the live table")]
    SchemaMismatch {
        /// Table name
        table: String,
        /// Column name
        column: String,
    },

    /// A column reached class emission without a native type
    #[error("Column `{column}` of table `{table}` has no resolved native type")]
    UnresolvedColumnType {
        /// Table name
        table: String,
        /// Column name
        column: String,
    },

    /// The configured key column does not exist on a table
    #[error("Key column `{column}` not found in table `{table}`")]
    KeyColumnNotFound {
        /// Table name
        table: String,
        /// Column name
        column: String,
    },

    /// Statement builders were requested for a table without columns
    #[error("Table `{0}` has no columns")]
    EmptyTable(String),

    /// The schema source was used after being closed
    #[error("Schema source is closed")]
    SourceClosed,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Template could not be parsed or registered
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Configuration defaults could not be serialized
    #[error("Configuration error: {0}")]
    ConfigDefaults(#[from] toml::ser::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<handlebars::TemplateError> for CodegenError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}

impl From<figment::Error> for CodegenError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
