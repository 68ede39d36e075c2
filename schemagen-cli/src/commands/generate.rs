//! Class and wiki page generation

use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::Password;
use indicatif::{ProgressBar, ProgressStyle};
use schemagen::config::GeneratorConfig;
use schemagen::emit::GeneratedFile;
use schemagen::generator::Generator;
use schemagen::source::MySqlSchemaSource;
use std::path::Path;
use tracing::debug;

use crate::cli::Cli;

static SUCCESS: Emoji = Emoji("✓ ", "√ ");

/// Message printed when no database name is configured anywhere
pub const MISSING_DATABASE: &str = "You didn't specify a database";

/// Generate classes (and optionally wiki pages) for one database
pub struct GenerateCommand {
    cli: Cli,
}

impl GenerateCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Resolve the effective configuration
    ///
    /// Configuration files and environment first, then command-line flags.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed, or
    /// the password prompt fails.
    pub fn configure(&self) -> Result<GeneratorConfig> {
        let mut config = GeneratorConfig::load(self.cli.config.as_deref())
            .context("Failed to load configuration")?;
        self.cli.apply_to(&mut config);

        if self.cli.ask_password {
            config.connection.password = Password::new()
                .with_prompt(format!("Password for {}", config.connection.user))
                .allow_empty_password(true)
                .interact()
                .context("Failed to read password")?;
        }

        debug!(?config, "effective configuration");
        Ok(config)
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration cannot be loaded
    /// - The database cannot be reached or queried
    /// - Templates cannot be loaded or rendered
    /// - A generated file cannot be written
    pub async fn execute(&self) -> Result<()> {
        let config = self.configure()?;

        let Some(database) = config.connection.database.clone().filter(|db| !db.is_empty()) else {
            println!("{}", style(MISSING_DATABASE).yellow());
            return Ok(());
        };

        println!(
            "{} {}",
            style("Connecting to").green().bold(),
            style(config.connection.redacted()).cyan()
        );

        let generator = Generator::new(config).context("Failed to load templates")?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));

        spinner.set_message(format!("Reading schema of {database}..."));
        let files = fetch(&generator).await;
        spinner.finish_and_clear();

        let Some(files) = files? else {
            return Ok(());
        };

        write_files(&files, generator.output_root())?;
        print_success(&database, files.len());

        Ok(())
    }
}

/// Connect, then fetch and render the schema
async fn fetch(generator: &Generator) -> Result<Option<Vec<GeneratedFile>>> {
    let connection = &generator.config().connection;
    let mut source = MySqlSchemaSource::connect(connection)
        .await
        .with_context(|| format!("Failed to connect to {}", connection.redacted()))?;

    generator
        .run(&mut source)
        .await
        .context("Failed to generate from schema")
}

/// Write every file below `root`, printing one line per file
fn write_files(files: &[GeneratedFile], root: &Path) -> Result<()> {
    println!();
    for file in files {
        let path = file
            .write_to(root)
            .with_context(|| format!("Failed to write {}", root.join(&file.path).display()))?;

        println!(
            "  {}{} {}",
            SUCCESS,
            file.description,
            style(path.display()).green()
        );
    }
    Ok(())
}

fn print_success(database: &str, count: usize) {
    println!();
    println!(
        "{}",
        style(format!("✓ Generated {count} files for {database}")).green().bold()
    );
}
