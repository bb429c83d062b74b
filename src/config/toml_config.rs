use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::core::generator::DEFAULT_MAX_TRIES;
use crate::utils::error::{Result, SantaError};
use crate::utils::validation::{
    validate_non_empty_string, validate_participant_name, validate_path,
    validate_positive_number, Validate,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub exchange: ExchangeConfig,
    pub output: OutputConfig,
    pub participants: Vec<ParticipantConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    pub name: String,
    pub max_tries: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub ascii_art: Option<String>,
}

/// One roster row. A missing `excludes` key and `excludes = []` both mean
/// "no exclusions".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantConfig {
    pub name: String,
    pub excludes: Option<Vec<String>>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SantaError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SantaError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    // Replaces ${VAR_NAME} with the environment value; unknown variables are
    // left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("exchange.name", &self.exchange.name)?;
        validate_path("output.path", &self.output.path)?;

        if let Some(max_tries) = self.exchange.max_tries {
            validate_positive_number("exchange.max_tries", max_tries, 1)?;
        }

        if self.participants.len() < 2 {
            return Err(SantaError::InvalidConfigValueError {
                field: "participants".to_string(),
                value: self.participants.len().to_string(),
                reason: "At least two participants are required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for participant in &self.participants {
            validate_participant_name("participants.name", &participant.name)?;
            if !seen.insert(participant.name.to_lowercase()) {
                return Err(SantaError::InvalidConfigValueError {
                    field: "participants.name".to_string(),
                    value: participant.name.clone(),
                    reason: "Duplicate participant name (names are compared ignoring case)"
                        .to_string(),
                });
            }
        }

        // Exclusion matching downstream is exact, so the reference check is
        // exact too.
        let names: HashSet<&str> = self.participants.iter().map(|p| p.name.as_str()).collect();
        for participant in &self.participants {
            for excluded in participant.excludes.iter().flatten() {
                if !names.contains(excluded.as_str()) {
                    return Err(SantaError::InvalidConfigValueError {
                        field: "participants.excludes".to_string(),
                        value: excluded.clone(),
                        reason: format!(
                            "'{}' excludes '{}', who is not a participant",
                            participant.name, excluded
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn max_tries(&self) -> usize {
        self.exchange.max_tries.unwrap_or(DEFAULT_MAX_TRIES)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[exchange]
name = "Family gift exchange"

[output]
path = "./letters"

[[participants]]
name = "Alice"
excludes = ["Bob"]

[[participants]]
name = "Bob"
excludes = []

[[participants]]
name = "Carol"
"#;

    #[test]
    fn test_parse_basic_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.exchange.name, "Family gift exchange");
        assert_eq!(config.output.path, "./letters");
        assert_eq!(config.participants.len(), 3);
        assert_eq!(config.max_tries(), DEFAULT_MAX_TRIES);
        assert_eq!(config.exchange.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_and_absent_excludes_both_parse_to_no_exclusions() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        let bob = &config.participants[1];
        let carol = &config.participants[2];
        assert_eq!(bob.excludes, Some(vec![]));
        assert_eq!(carol.excludes, None);
        // Downstream both become the same empty exclusion list.
        assert!(bob.excludes.clone().unwrap_or_default().is_empty());
        assert!(carol.excludes.clone().unwrap_or_default().is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SANTA_TEST_OUTPUT", "/tmp/santa-letters");

        let toml_content = r#"
[exchange]
name = "test"

[output]
path = "${SANTA_TEST_OUTPUT}"

[[participants]]
name = "Alice"

[[participants]]
name = "Bob"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output.path, "/tmp/santa-letters");

        std::env::remove_var("SANTA_TEST_OUTPUT");
    }

    #[test]
    fn test_validation_rejects_single_participant() {
        let toml_content = r#"
[exchange]
name = "test"

[output]
path = "./letters"

[[participants]]
name = "Alice"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_duplicate_names_ignoring_case() {
        let toml_content = r#"
[exchange]
name = "test"

[output]
path = "./letters"

[[participants]]
name = "Alice"

[[participants]]
name = "ALICE"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SantaError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_validation_rejects_unknown_excluded_name() {
        let toml_content = r#"
[exchange]
name = "test"

[output]
path = "./letters"

[[participants]]
name = "Alice"
excludes = ["Mallory"]

[[participants]]
name = "Bob"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_max_tries() {
        let toml_content = r#"
[exchange]
name = "test"
max_tries = 0

[output]
path = "./letters"

[[participants]]
name = "Alice"

[[participants]]
name = "Bob"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.exchange.name, "Family gift exchange");
    }

    #[test]
    fn test_unreadable_file_is_an_io_error() {
        let err = TomlConfig::from_file("/nonexistent/santa.toml").unwrap_err();
        assert!(matches!(err, SantaError::IoError(_)));
    }
}
