//! schemagen: model classes and wiki pages from a live MySQL schema
//!
//! The generator connects to a database, reads which tables and columns
//! exist together with their declared and native types, and renders:
//!
//! - one class per table (properties, optionally a constructor reading a
//!   data reader and UPDATE/INSERT/DELETE statement builders)
//! - optionally, wiki pages: an index entry, a database page and one page per
//!   table
//!
//! All text is produced by handlebars templates, which can be overridden from
//! a directory to target another language.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use schemagen::config::GeneratorConfig;
//! use schemagen::generator::Generator;
//! use schemagen::source::MySqlSchemaSource;
//!
//! # async fn example() -> schemagen::Result<()> {
//! let config = GeneratorConfig::load(None)?;
//! let mut source = MySqlSchemaSource::connect(&config.connection).await?;
//!
//! let generator = Generator::new(config)?;
//! if let Some(files) = generator.run(&mut source).await? {
//!     generator.write(&files)?;
//! }
//! # Ok(())
//! # }
//! ```

#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod emit;
pub mod error;
pub mod generator;
pub mod naming;
pub mod observability;
pub mod schema;
pub mod source;
pub mod templates;

pub use error::{CodegenError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ConnectionSettings, DocsSettings, GeneratorConfig, OutputSettings};
    pub use crate::emit::{ClassEmitter, ClassOptions, DocsEmitter, GeneratedFile, KeyColumnStrategy, WriteMode};
    pub use crate::error::{CodegenError, Result};
    pub use crate::generator::Generator;
    pub use crate::schema::{Column, NativeType, Schema, Table};
    pub use crate::source::{MySqlSchemaSource, SchemaSource};
    pub use crate::templates::TemplateRegistry;
}
