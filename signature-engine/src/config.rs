//! Engine configuration
//!
//! Selects which cryptographic providers the registry brings up. A deployment
//! without post-quantum support simply leaves `post-quantum` out, and every
//! FALCON / DILITHIUM / SPHINCS+ request then fails with `ProviderUnavailable`.

use crate::error::{Result, SignerError};
use crate::types::ProviderKind;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Environment variable prefix, e.g. `SIGNATURE_ENGINE_ENABLED_PROVIDERS=classical,post-quantum`
pub const ENV_PREFIX: &str = "SIGNATURE_ENGINE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Providers registered at startup
    pub enabled_providers: Vec<ProviderKind>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled_providers: vec![ProviderKind::Classical, ProviderKind::PostQuantum],
        }
    }
}

/// Load engine configuration from a file
///
/// # Parameters
/// - `config_path`: configuration file path (TOML, JSON or YAML)
///
/// # Example
/// ```no_run
/// use signature_engine::config::load_config;
///
/// let config = load_config("signature-engine.toml").expect("Failed to load config");
/// println!("Providers: {:?}", config.enabled_providers);
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<EngineConfig> {
    let config = Config::builder()
        .add_source(File::from(config_path.as_ref()))
        .build()
        .map_err(|e| SignerError::Config(format!("Failed to load config file: {}", e)))?;

    let engine_config: EngineConfig = config
        .try_deserialize()
        .map_err(|e| SignerError::Config(format!("Failed to parse config: {}", e)))?;

    validate_config(&engine_config)?;

    Ok(engine_config)
}

/// Load configuration from environment variables (prefix `SIGNATURE_ENGINE_`)
///
/// Lists are comma separated. Unset variables fall back to [`EngineConfig::default`].
pub fn load_config_from_env() -> Result<EngineConfig> {
    let config = Config::builder()
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("enabled_providers"),
        )
        .build()
        .map_err(|e| SignerError::Config(format!("Failed to load env vars: {}", e)))?;

    let engine_config: EngineConfig = config
        .try_deserialize()
        .map_err(|e| SignerError::Config(format!("Failed to parse env config: {}", e)))?;

    validate_config(&engine_config)?;

    Ok(engine_config)
}

/// Check:
/// - at least one provider is enabled
/// - no provider is listed twice
pub fn validate_config(config: &EngineConfig) -> Result<()> {
    if config.enabled_providers.is_empty() {
        return Err(SignerError::Config(
            "enabled_providers must name at least one provider".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for provider in &config.enabled_providers {
        if !seen.insert(*provider) {
            return Err(SignerError::Config(format!(
                "Provider '{}' is listed more than once",
                provider
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.enabled_providers.len(), 2);
    }

    #[test]
    fn test_empty_provider_list() {
        let config = EngineConfig {
            enabled_providers: Vec::new(),
        };
        assert!(matches!(validate_config(&config), Err(SignerError::Config(_))));
    }

    #[test]
    fn test_duplicate_provider() {
        let config = EngineConfig {
            enabled_providers: vec![ProviderKind::Classical, ProviderKind::Classical],
        };
        match validate_config(&config) {
            Err(SignerError::Config(msg)) => assert!(msg.contains("classical")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_toml() {
        let file = write_config(".toml", "enabled_providers = [\"classical\"]\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.enabled_providers, vec![ProviderKind::Classical]);
    }

    #[test]
    fn test_load_json_with_defaults() {
        let file = write_config(".json", "{}");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_unknown_provider() {
        let file = write_config(".toml", "enabled_providers = [\"quantum-annealer\"]\n");
        assert!(matches!(load_config(file.path()), Err(SignerError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/signature-engine.toml"),
            Err(SignerError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_env() {
        std::env::set_var("SIGNATURE_ENGINE_ENABLED_PROVIDERS", "post-quantum,classical");
        let config = load_config_from_env();
        std::env::remove_var("SIGNATURE_ENGINE_ENABLED_PROVIDERS");

        assert_eq!(
            config.unwrap().enabled_providers,
            vec![ProviderKind::PostQuantum, ProviderKind::Classical]
        );
    }
}
