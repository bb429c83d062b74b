pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig, RunConfig};
pub use crate::core::{engine::ExchangeEngine, generator::Generator, pipeline::LetterPipeline};
pub use crate::domain::model::{Assignment, Letter, Participant, Roster, RosterEntry};
pub use crate::utils::error::{Result, SantaError};
