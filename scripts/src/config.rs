//! The deployment configuration: the network a deployment is recorded under,
//! the `TokenManager` threshold, and the signers it is initialized with

use std::{collections::HashSet, fs, path::Path};

use alloy::primitives::Address;
use itertools::Itertools;
use serde::Deserialize;

use crate::{
    constants::{PRESET_MIN_AUTHORIZATIONS, PRESET_NETWORK, PRESET_SIGNERS},
    errors::ScriptError,
};

/// The parameters of a `TokenManager` deployment
///
/// Loaded once at startup and never modified afterwards; the signer list is
/// passed to the initialization call exactly as configured.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeployConfig {
    /// The network the deployment is recorded under in the deployments file
    pub network: String,
    /// The number of signer approvals required for a privileged action,
    /// passed to the `TokenManager` constructor
    pub min_authorizations: u64,
    /// The ordered list of signers registered at initialization
    pub signers: Vec<Address>,
}

impl DeployConfig {
    /// The built-in configuration, used when no config file is given
    pub fn preset() -> Self {
        Self {
            network: PRESET_NETWORK.to_string(),
            min_authorizations: PRESET_MIN_AUTHORIZATIONS,
            signers: PRESET_SIGNERS.to_vec(),
        }
    }

    /// Load and validate the configuration at `path`, falling back to the
    /// preset when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ScriptError> {
        let config = match path {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|e| {
                    ScriptError::Config(format!("could not read {}: {e}", path.display()))
                })?;
                serde_json::from_str(&contents).map_err(|e| {
                    ScriptError::Config(format!("could not parse {}: {e}", path.display()))
                })?
            }
            None => Self::preset(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for defects
    ///
    /// Defects are reported, never repaired: a duplicated signer is rejected
    /// rather than deduplicated.
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.network.is_empty() {
            return Err(ScriptError::Config("network name is empty".to_string()));
        }

        if self.signers.is_empty() {
            return Err(ScriptError::Config("signer list is empty".to_string()));
        }

        if self.min_authorizations == 0 {
            return Err(ScriptError::Config("min_authorizations must be positive".to_string()));
        }

        if self.min_authorizations > self.signers.len() as u64 {
            return Err(ScriptError::Config(format!(
                "min_authorizations ({}) exceeds the number of signers ({})",
                self.min_authorizations,
                self.signers.len()
            )));
        }

        if self.signers.contains(&Address::ZERO) {
            return Err(ScriptError::Config("signer list contains the zero address".to_string()));
        }

        let mut seen = HashSet::with_capacity(self.signers.len());
        if let Some(dup) = self.signers.iter().find(|signer| !seen.insert(**signer)) {
            return Err(ScriptError::Config(format!("duplicate signer {dup}")));
        }

        Ok(())
    }

    /// A comma-separated rendering of the signer list, for logging
    pub fn signers_display(&self) -> String {
        self.signers.iter().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_preset_is_valid() {
        let config = DeployConfig::preset();
        config.validate().unwrap();

        assert_eq!(config.network, "canto");
        assert_eq!(config.min_authorizations, 3);
        assert_eq!(config.signers.len(), 3);
    }

    #[test]
    fn test_load_without_path_uses_preset() {
        assert_eq!(DeployConfig::load(None).unwrap(), DeployConfig::preset());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "network": "devnet",
                "min_authorizations": 2,
                "signers": [
                    "0x0000000000000000000000000000000000000002",
                    "0x0000000000000000000000000000000000000001"
                ]
            }}"#
        )
        .unwrap();

        let config = DeployConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.network, "devnet");
        assert_eq!(config.min_authorizations, 2);
        // Order is preserved as written
        assert_eq!(
            config.signers,
            vec![Address::with_last_byte(2), Address::with_last_byte(1)]
        );
    }

    #[test]
    fn test_shipped_config_matches_preset() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/canto.json");
        assert_eq!(DeployConfig::load(Some(&path)).unwrap(), DeployConfig::preset());
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"network": "devnet", "signers": "nope"}}"#).unwrap();

        assert!(matches!(
            DeployConfig::load(Some(file.path())),
            Err(ScriptError::Config(_))
        ));
    }

    #[test]
    fn test_duplicate_signer_rejected() {
        let config = DeployConfig {
            network: "devnet".to_string(),
            min_authorizations: 1,
            signers: vec![
                Address::with_last_byte(1),
                Address::with_last_byte(2),
                Address::with_last_byte(1),
            ],
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate signer"));
    }

    #[test]
    fn test_threshold_bounds() {
        let mut config = DeployConfig {
            network: "devnet".to_string(),
            min_authorizations: 0,
            signers: vec![Address::with_last_byte(1)],
        };
        assert!(config.validate().is_err());

        config.min_authorizations = 2;
        assert!(config.validate().is_err());

        config.min_authorizations = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_address_rejected() {
        let config = DeployConfig {
            network: "devnet".to_string(),
            min_authorizations: 1,
            signers: vec![Address::ZERO],
        };

        assert!(config.validate().is_err());
    }
}
