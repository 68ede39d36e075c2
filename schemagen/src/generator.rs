//! Generation orchestrator
//!
//! Ties a [`SchemaSource`] to the emitters: fetch the schema, release the
//! connection, then render class files followed by documentation pages.

use crate::config::GeneratorConfig;
use crate::emit::{ClassEmitter, ClassOptions, DocsEmitter, GeneratedFile};
use crate::error::{CodegenError, Result};
use crate::schema::Schema;
use crate::source::SchemaSource;
use crate::templates::TemplateRegistry;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Schema-driven code generator
pub struct Generator {
    config: GeneratorConfig,
    templates: TemplateRegistry,
}

impl Generator {
    /// Create a generator, loading template overrides from the configured
    /// directory
    ///
    /// # Errors
    ///
    /// Returns an error if an override template cannot be read or parsed.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let templates = TemplateRegistry::with_overrides(config.output.template_dir.as_deref())?;
        Ok(Self { config, templates })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Root directory all generated paths are relative to
    #[must_use]
    pub fn output_root(&self) -> &Path {
        &self.config.output.root
    }

    /// Fetch the schema from `source` and render every file
    ///
    /// The source is closed before rendering starts. Returns `Ok(None)` when
    /// the source found no columns; nothing is rendered in that case.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No database name is configured
    /// - The source fails to load or resolve the schema
    /// - Rendering fails (see [`Generator::render`])
    pub async fn run<S>(&self, source: &mut S) -> Result<Option<Vec<GeneratedFile>>>
    where
        S: SchemaSource + ?Sized,
    {
        let database = self.database()?;
        let table_filter = self.config.connection.table_filter();

        let fetched = source.fetch_schema(database, table_filter).await;
        source.close().await?;

        let Some(schema) = fetched? else {
            info!(database, "nothing to generate");
            return Ok(None);
        };

        self.render(&schema).map(Some)
    }

    /// Render class files for every table, then documentation pages when
    /// enabled
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No database name is configured
    /// - A table or column name cannot be converted to an identifier
    /// - A column has no resolved native type
    /// - The key column is missing from a table
    /// - A template fails to render
    pub fn render(&self, schema: &Schema) -> Result<Vec<GeneratedFile>> {
        let database = self.database()?;
        let output = &self.config.output;

        let options = ClassOptions {
            namespace: output.namespace().map(str::to_string),
            generate_constructor_and_output: output.generate_constructor_and_output,
            key_column: output.key_strategy(),
            extension: output.extension.clone(),
        };
        let classes = ClassEmitter::new(&self.templates, database, options);

        let mut files = Vec::with_capacity(schema.len());
        for table in schema.tables() {
            let file = classes.emit(table)?;
            debug!(table = table.name(), path = %file.path.display(), "class rendered");
            files.push(file);
        }
        info!(classes = files.len(), "classes rendered");

        if self.config.docs.enabled {
            let label = self.config.docs_label().unwrap_or(database);
            let docs = DocsEmitter::new(&self.templates, &self.config.docs.directory);
            let pages = docs.emit(label, schema)?;
            info!(label, pages = pages.len(), "documentation rendered");
            files.extend(pages);
        }

        Ok(files)
    }

    /// Write `files` below the output root, in order
    ///
    /// Returns the written paths.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or a file cannot be
    /// written. Files written before the failure stay on disk.
    pub fn write(&self, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
        files
            .iter()
            .map(|file| file.write_to(self.output_root()))
            .collect()
    }

    fn database(&self) -> Result<&str> {
        self.config
            .connection
            .database
            .as_deref()
            .filter(|database| !database.is_empty())
            .ok_or_else(|| CodegenError::InvalidArgument("no database specified".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::WriteMode;
    use crate::schema::{Column, NativeType};

    fn config() -> GeneratorConfig {
        let mut config = GeneratorConfig::default();
        config.connection.database = Some("shop".to_string());
        config
    }

    fn schema() -> Schema {
        let mut schema = Schema::new();
        schema.push_column("users", Column::resolved("id", "int(11)", NativeType::Int32));
        schema.push_column("orders", Column::resolved("id", "int(11)", NativeType::Int32));
        schema
    }

    #[test]
    fn test_render_classes_only() {
        let generator = Generator::new(config()).unwrap();
        let files = generator.render(&schema()).unwrap();

        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("shop/Users.cs"), PathBuf::from("shop/Orders.cs")]
        );
    }

    #[test]
    fn test_render_with_docs_after_classes() {
        let mut config = config();
        config.docs.enabled = true;
        config.docs.label = Some("Shop DB".to_string());

        let files = Generator::new(config).unwrap().render(&schema()).unwrap();

        assert_eq!(files.len(), 2 + 2 + 2);
        assert_eq!(files[2].path, PathBuf::from("wiki/index.txt"));
        assert_eq!(files[2].mode, WriteMode::Append);
        assert_eq!(files[3].path, PathBuf::from("wiki/Shop DB/Shop DB.txt"));
    }

    #[test]
    fn test_docs_label_defaults_to_database() {
        let mut config = config();
        config.docs.enabled = true;

        let files = Generator::new(config).unwrap().render(&schema()).unwrap();
        assert_eq!(files[3].path, PathBuf::from("wiki/shop/shop.txt"));
    }

    #[test]
    fn test_missing_database() {
        let generator = Generator::new(GeneratorConfig::default()).unwrap();
        assert!(matches!(
            generator.render(&schema()),
            Err(CodegenError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unresolved_column_fails() {
        let mut schema = Schema::new();
        schema.push_column("users", Column::new("id", "int(11)"));

        let generator = Generator::new(config()).unwrap();
        assert!(matches!(
            generator.render(&schema),
            Err(CodegenError::UnresolvedColumnType { .. })
        ));
    }

    #[test]
    fn test_write_below_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config();
        config.output.root = dir.path().to_path_buf();

        let generator = Generator::new(config).unwrap();
        let files = generator.render(&schema()).unwrap();
        let written = generator.write(&files).unwrap();

        assert_eq!(written.len(), 2);
        assert!(dir.path().join("shop/Users.cs").is_file());
        assert!(dir.path().join("shop/Orders.cs").is_file());
    }
}
