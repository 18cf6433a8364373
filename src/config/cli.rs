use crate::config::toml_config::TomlConfig;
use crate::config::ImportSettings;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "customer-import")]
#[command(about = "Batch import of customer records from CSV or JSON files")]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory that <SOURCE> is resolved against [default: var/import]
    #[arg(long, global = true)]
    pub import_dir: Option<String>,

    /// CSV field delimiter [default: ,]
    #[arg(long, global = true)]
    pub delimiter: Option<char>,

    /// Website scope for lookups and new customers [default: 1]
    #[arg(long, global = true)]
    pub website_id: Option<u32>,

    /// Store assigned to imported customers [default: 1]
    #[arg(long, global = true)]
    pub store_id: Option<u32>,

    /// JSON file holding the customer store [default: var/customers.json]
    #[arg(long, global = true)]
    pub customer_store: Option<String>,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Import customers from <SOURCE> using the format named by <PROFILE>
    #[command(name = "customer:import")]
    CustomerImport(ImportArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// Profile name, `<name>-<format>` with format csv, json or xml
    pub profile: String,

    /// Source file name inside the import directory
    pub source: String,

    /// Exit with status 2 when any record failed
    #[arg(long)]
    pub strict: bool,
}

impl Validate for ImportArgs {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("profile", &self.profile)?;
        validate_non_empty_string("source", &self.source)?;
        Ok(())
    }
}

impl Cli {
    /// Defaults, then the settings file, then command line flags.
    pub fn settings(&self) -> Result<ImportSettings> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_settings(),
            None => ImportSettings::default(),
        };

        if let Some(import_dir) = &self.import_dir {
            settings.import_dir = import_dir.clone();
        }
        if let Some(delimiter) = self.delimiter {
            settings.delimiter = delimiter;
        }
        if let Some(website_id) = self.website_id {
            settings.website_id = website_id;
        }
        if let Some(store_id) = self.store_id {
            settings.store_id = store_id;
        }
        if let Some(customer_store) = &self.customer_store {
            settings.customer_store = customer_store.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_import_command() {
        let cli = Cli::try_parse_from([
            "customer-import",
            "customer:import",
            "weekly-csv",
            "customers.csv",
        ])
        .unwrap();

        let Command::CustomerImport(args) = &cli.command;
        assert_eq!(args.profile, "weekly-csv");
        assert_eq!(args.source, "customers.csv");
        assert!(!args.strict);
        assert_eq!(cli.settings().unwrap(), ImportSettings::default());
    }

    #[test]
    fn test_profile_and_source_are_required() {
        assert!(Cli::try_parse_from(["customer-import", "customer:import", "weekly-csv"]).is_err());
    }

    #[test]
    fn test_flags_override_settings_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[import]\ndirectory = \"media/import\"\n[store]\nwebsite_id = 2\nstore_id = 2\n")
            .unwrap();

        let cli = Cli::try_parse_from([
            "customer-import",
            "--config",
            file.path().to_str().unwrap(),
            "customer:import",
            "weekly-json",
            "customers.json",
            "--store-id",
            "7",
            "--delimiter",
            ";",
            "--strict",
        ])
        .unwrap();

        let settings = cli.settings().unwrap();
        assert_eq!(settings.import_dir, "media/import");
        assert_eq!(settings.website_id, 2);
        assert_eq!(settings.store_id, 7);
        assert_eq!(settings.delimiter, ';');

        let Command::CustomerImport(args) = &cli.command;
        assert!(args.strict);
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let cli = Cli::try_parse_from([
            "customer-import",
            "customer:import",
            "weekly-csv",
            "customers.csv",
            "--import-dir",
            "",
        ])
        .unwrap();
        assert!(cli.settings().is_err());
    }
}
