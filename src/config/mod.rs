pub mod cli;
pub mod toml_config;

use crate::domain::model::RosterEntry;
use crate::domain::ports::ConfigProvider;
use clap::Parser;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "santa-o-matic")]
#[command(about = "Draws a secret santa assignment and writes one letter per giver")]
pub struct CliConfig {
    #[arg(long, default_value = "./santa.toml")]
    pub config: String,

    #[arg(long, help = "Override the output directory from the config file")]
    pub output_path: Option<String>,

    #[arg(long, help = "Seed for a reproducible draw")]
    pub seed: Option<u64>,

    #[arg(long, help = "Print the drawn pairs instead of writing letters")]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective configuration for one run: the loaded TOML config with CLI
/// overrides folded in.
#[derive(Debug, Clone)]
pub struct RunConfig {
    toml: TomlConfig,
    dry_run: bool,
}

impl RunConfig {
    pub fn new(mut toml: TomlConfig, cli: &CliConfig) -> Self {
        if let Some(path) = &cli.output_path {
            toml.output.path = path.clone();
        }
        if cli.seed.is_some() {
            toml.exchange.seed = cli.seed;
        }
        RunConfig {
            toml,
            dry_run: cli.dry_run,
        }
    }
}

impl ConfigProvider for RunConfig {
    fn exchange_name(&self) -> &str {
        &self.toml.exchange.name
    }

    fn entries(&self) -> Vec<RosterEntry> {
        self.toml
            .participants
            .iter()
            .map(|p| RosterEntry {
                name: p.name.clone(),
                excludes: p.excludes.clone().unwrap_or_default(),
            })
            .collect()
    }

    fn output_path(&self) -> &str {
        &self.toml.output.path
    }

    fn ascii_art_path(&self) -> Option<&str> {
        self.toml.output.ascii_art.as_deref()
    }

    fn max_tries(&self) -> usize {
        self.toml.max_tries()
    }

    fn seed(&self) -> Option<u64> {
        self.toml.exchange.seed
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}
