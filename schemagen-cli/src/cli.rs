//! Command-line arguments

use clap::{ArgAction, Parser};
use schemagen::config::GeneratorConfig;
use std::path::PathBuf;

/// Generate model classes and wiki pages from a MySQL schema
#[derive(Debug, Parser)]
#[command(name = "schemagen")]
#[command(version)]
#[command(about = "Generate C# model classes and wiki pages from a MySQL schema", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Print help
    #[arg(short = '?', long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,

    /// Database host
    #[arg(short = 'i', long = "ip", value_name = "HOST")]
    pub host: Option<String>,

    /// Database port
    #[arg(short = 'n', long)]
    pub port: Option<u16>,

    /// Username
    #[arg(short, long)]
    pub user: Option<String>,

    /// Password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Prompt for the password instead of passing it on the command line
    #[arg(long, conflicts_with = "password")]
    pub ask_password: bool,

    /// Database name
    #[arg(short, long)]
    pub database: Option<String>,

    /// Only generate for this table
    #[arg(short, long)]
    pub table: Option<String>,

    /// Namespace wrapping every generated class
    #[arg(short = 's', long)]
    pub namespace: Option<String>,

    /// Generate a constructor reading a data reader plus UPDATE/INSERT/DELETE builders
    #[arg(
        short = 'g',
        long = "generateconstructorandoutput",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub generate_constructor_and_output: Option<bool>,

    /// Generate wiki pages
    #[arg(
        short = 'm',
        long = "generatemarkuppages",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub generate_markup_pages: Option<bool>,

    /// Database label used in wiki pages (defaults to the database name)
    #[arg(short = 'r', long = "markupdatabasenamereplacement", value_name = "LABEL")]
    pub markup_label: Option<String>,

    /// Key column used by UPDATE and DELETE (defaults to the first column)
    #[arg(short = 'k', long = "keycolumn", value_name = "COLUMN")]
    pub key_column: Option<String>,

    /// Extension of generated class files
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Root directory for all output
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Directory with template overrides (`<name>.hbs`)
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Additional configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (repeatable)
    #[arg(short, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Overlay flags given on the command line onto `config`
    pub fn apply_to(&self, config: &mut GeneratorConfig) {
        let connection = &mut config.connection;
        if let Some(host) = &self.host {
            connection.host.clone_from(host);
        }
        if let Some(port) = self.port {
            connection.port = port;
        }
        if let Some(user) = &self.user {
            connection.user.clone_from(user);
        }
        if let Some(password) = &self.password {
            connection.password.clone_from(password);
        }
        if self.database.is_some() {
            connection.database.clone_from(&self.database);
        }
        if self.table.is_some() {
            connection.table.clone_from(&self.table);
        }

        let output = &mut config.output;
        if self.namespace.is_some() {
            output.namespace.clone_from(&self.namespace);
        }
        if let Some(enabled) = self.generate_constructor_and_output {
            output.generate_constructor_and_output = enabled;
        }
        if self.key_column.is_some() {
            output.key_column.clone_from(&self.key_column);
        }
        if let Some(extension) = &self.extension {
            output.extension.clone_from(extension);
        }
        if let Some(root) = &self.output {
            output.root.clone_from(root);
        }
        if self.templates.is_some() {
            output.template_dir.clone_from(&self.templates);
        }

        if let Some(enabled) = self.generate_markup_pages {
            config.docs.enabled = enabled;
        }
        if self.markup_label.is_some() {
            config.docs.label.clone_from(&self.markup_label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("schemagen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&[
            "-i", "db.local", "-n", "3307", "-u", "app", "-p", "secret", "-d", "shop", "-t",
            "users", "-s", "Shop.Models", "-k", "uid", "-e", "txt", "-o", "out", "-r", "Shop",
        ]);

        assert_eq!(cli.host.as_deref(), Some("db.local"));
        assert_eq!(cli.port, Some(3307));
        assert_eq!(cli.user.as_deref(), Some("app"));
        assert_eq!(cli.password.as_deref(), Some("secret"));
        assert_eq!(cli.database.as_deref(), Some("shop"));
        assert_eq!(cli.table.as_deref(), Some("users"));
        assert_eq!(cli.namespace.as_deref(), Some("Shop.Models"));
        assert_eq!(cli.key_column.as_deref(), Some("uid"));
        assert_eq!(cli.extension.as_deref(), Some("txt"));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert_eq!(cli.markup_label.as_deref(), Some("Shop"));
    }

    #[test]
    fn test_bool_flags_bare_and_explicit() {
        let cli = parse(&["-d", "shop", "-g", "-m"]);
        assert_eq!(cli.generate_constructor_and_output, Some(true));
        assert_eq!(cli.generate_markup_pages, Some(true));

        let cli = parse(&["-d", "shop", "-g", "false", "--generatemarkuppages", "true"]);
        assert_eq!(cli.generate_constructor_and_output, Some(false));
        assert_eq!(cli.generate_markup_pages, Some(true));

        let cli = parse(&["-d", "shop"]);
        assert_eq!(cli.generate_constructor_and_output, None);
        assert_eq!(cli.generate_markup_pages, None);
    }

    #[test]
    fn test_long_flags() {
        let cli = parse(&[
            "--ip",
            "h",
            "--port",
            "1",
            "--database",
            "shop",
            "--generateconstructorandoutput",
            "--keycolumn",
            "id",
            "--markupdatabasenamereplacement",
            "Label",
            "--templates",
            "tpl",
        ]);
        assert_eq!(cli.host.as_deref(), Some("h"));
        assert_eq!(cli.port, Some(1));
        assert_eq!(cli.generate_constructor_and_output, Some(true));
        assert_eq!(cli.key_column.as_deref(), Some("id"));
        assert_eq!(cli.markup_label.as_deref(), Some("Label"));
        assert_eq!(cli.templates, Some(PathBuf::from("tpl")));
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&[]).verbose, 0);
        assert_eq!(parse(&["-vv"]).verbose, 2);
    }

    #[test]
    fn test_question_mark_prints_help() {
        let err = Cli::try_parse_from(["schemagen", "-?"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["schemagen", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Cli::try_parse_from(["schemagen", "-n", "not-a-port"]).is_err());
        assert!(Cli::try_parse_from(["schemagen", "-g", "maybe"]).is_err());
        assert!(Cli::try_parse_from(["schemagen", "--unknown"]).is_err());
        assert!(Cli::try_parse_from(["schemagen", "-p", "x", "--ask-password"]).is_err());
    }

    #[test]
    fn test_apply_overrides_only_given_flags() {
        let mut config = GeneratorConfig::default();
        config.connection.database = Some("from_file".to_string());
        config.output.namespace = Some("FromFile".to_string());

        parse(&["-u", "app", "-g", "-m", "-r", "Label", "-o", "out"]).apply_to(&mut config);

        assert_eq!(config.connection.user, "app");
        assert_eq!(config.connection.host, "127.0.0.1");
        assert_eq!(config.connection.database.as_deref(), Some("from_file"));
        assert_eq!(config.output.namespace.as_deref(), Some("FromFile"));
        assert!(config.output.generate_constructor_and_output);
        assert!(config.docs.enabled);
        assert_eq!(config.docs.label.as_deref(), Some("Label"));
        assert_eq!(config.output.root, PathBuf::from("out"));
    }

    #[test]
    fn test_explicit_false_overrides_config() {
        let mut config = GeneratorConfig::default();
        config.docs.enabled = true;

        parse(&["-m", "false"]).apply_to(&mut config);
        assert!(!config.docs.enabled);
    }
}
