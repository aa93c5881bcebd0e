use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TracingConfig {
    /// Directives understood by [`EnvFilter`], e.g. `info,ballot_election=debug`.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_owned()
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

/// Ledger configuration, generic over the genesis config of the hosted module.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LedgerConfig<G> {
    /// Logging configuration.
    #[serde(default)]
    pub tracing: TracingConfig,
    /// Genesis configuration of the module.
    pub genesis: G,
}

/// Reads a TOML file and deserializes it into `R`.
pub fn from_toml_path<P: AsRef<Path>, R: DeserializeOwned>(path: P) -> anyhow::Result<R> {
    let mut contents = String::new();
    {
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;
    }

    let result: R = toml::from_str(&contents)?;

    Ok(result)
}

/// Installs a global `fmt` subscriber filtered by `config.filter`.
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_tracing(config: &TracingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.filter)?;
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde::Deserialize;
    use tempfile::NamedTempFile;

    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct TestGenesis {
        first_candidate_id: u8,
    }

    fn create_config_from(content: &str) -> NamedTempFile {
        let mut config_file = NamedTempFile::new().unwrap();
        config_file.write_all(content.as_bytes()).unwrap();
        config_file
    }

    #[test]
    fn test_correct_config() {
        let config = r#"
            [tracing]
            filter = "debug,ballot_ledger=trace"
            [genesis]
            first_candidate_id = 3
        "#;

        let config_file = create_config_from(config);

        let config: LedgerConfig<TestGenesis> = from_toml_path(config_file.path()).unwrap();
        let expected = LedgerConfig {
            tracing: TracingConfig {
                filter: "debug,ballot_ledger=trace".to_owned(),
            },
            genesis: TestGenesis {
                first_candidate_id: 3,
            },
        };
        assert_eq!(config, expected);
    }

    #[test]
    fn test_tracing_section_is_optional() {
        let config_file = create_config_from(
            r#"
            [genesis]
            first_candidate_id = 1
        "#,
        );

        let config: LedgerConfig<TestGenesis> = from_toml_path(config_file.path()).unwrap();
        assert_eq!(config.tracing, TracingConfig::default());
        assert_eq!(config.tracing.filter, "info");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: anyhow::Result<LedgerConfig<TestGenesis>> =
            from_toml_path(dir.path().join("missing.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = TracingConfig {
            filter: "ballot_ledger=loud".to_owned(),
        };
        assert!(init_tracing(&config).is_err());
    }
}
