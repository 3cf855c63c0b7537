//! Reading and writing deployed contract addresses in the `deployments.json` file
//!
//! The file is scoped by network:
//! `{"deployments": {"<network>": {"<contract>": "0x..."}}}`

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::primitives::Address;
use json::JsonValue;
use tracing::info;

use crate::{constants::DEPLOYMENTS_KEY, errors::ScriptError};

/// The registry of deployed contract addresses consumed by downstream tooling
#[derive(Clone, Debug)]
pub struct DeploymentsRegistry {
    /// Path to the `deployments.json` file
    path: PathBuf,
}

impl DeploymentsRegistry {
    /// Constructor
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record the address of `contract_key` on `network`, overwriting any
    /// previous entry for the same contract
    ///
    /// Entries for other contracts and other networks are left untouched.
    pub fn record(
        &self,
        network: &str,
        contract_key: &str,
        address: Address,
    ) -> Result<(), ScriptError> {
        // If the file doesn't exist, create it
        if !self.path.exists() {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
            }
            fs::write(&self.path, "{}").map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        }

        let mut parsed_json =
            self.read_json().map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

        // Indexing into a non-object replaces it with an empty object, so every
        // level on the way down must already be an object or absent
        if !parsed_json.is_object() {
            return Err(self.malformed("top level"));
        }
        let deployments = &mut parsed_json[DEPLOYMENTS_KEY];
        if !is_object_or_absent(deployments) {
            return Err(self.malformed(DEPLOYMENTS_KEY));
        }
        let network_entries = &mut deployments[network];
        if !is_object_or_absent(network_entries) {
            return Err(self.malformed(&format!("{DEPLOYMENTS_KEY}.{network}")));
        }
        network_entries[contract_key] = JsonValue::String(format!("{address:#x}"));

        fs::write(&self.path, json::stringify_pretty(parsed_json, 4))
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

        info!(
            network,
            contract = contract_key,
            %address,
            path = %self.path.display(),
            "recorded deployment"
        );
        Ok(())
    }

    /// Read the recorded address of `contract_key` on `network`
    pub fn read(&self, network: &str, contract_key: &str) -> Result<Address, ScriptError> {
        let parsed_json = self.read_json()?;

        let addr_str = parsed_json[DEPLOYMENTS_KEY][network][contract_key]
            .as_str()
            .ok_or_else(|| {
                ScriptError::ReadDeployments(format!(
                    "no {contract_key} address recorded for network {network} in {}",
                    self.path.display()
                ))
            })?;

        Address::from_str(addr_str).map_err(|e| {
            ScriptError::ReadDeployments(format!("invalid address {addr_str}: {e}"))
        })
    }

    /// The error for a file whose layout would be clobbered by a write
    fn malformed(&self, location: &str) -> ScriptError {
        ScriptError::WriteDeployments(format!(
            "{}: expected an object at {location}",
            self.path.display()
        ))
    }

    /// Parse the file contents
    fn read_json(&self) -> Result<JsonValue, ScriptError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            ScriptError::ReadDeployments(format!("{}: {e}", self.path.display()))
        })?;

        json::parse(&contents).map_err(|e| {
            ScriptError::ReadDeployments(format!("{}: {e}", self.path.display()))
        })
    }
}

/// Whether `value` can be indexed into without discarding existing data
fn is_object_or_absent(value: &JsonValue) -> bool {
    value.is_object() || value.is_null()
}
