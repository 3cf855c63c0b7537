//! Utilities for the deploy scripts.

use std::{fs, path::Path, str::FromStr};

use alloy::{
    network::EthereumWallet,
    primitives::{Address, Bytes},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_sol_types::SolCall;
use serde_json::Value;
use tracing::info;

use crate::{
    constants::{ARTIFACT_BYTECODE_KEY, ARTIFACT_BYTECODE_OBJECT_KEY},
    errors::ScriptError,
    solidity::initializeCall,
    types::PendingCall,
};

/// Sets up a provider that signs transactions with the given private key,
/// sending them to the given RPC url.
///
/// Nonce, gas, and chain ID are filled in by the provider for every transaction.
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<DynProvider, ScriptError> {
    let url =
        Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    info!(deployer = %signer.address(), %url, "set up client");

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);

    Ok(provider.erased())
}

/// Read the creation bytecode from a compiled contract artifact
///
/// Accepts both the Hardhat layout (`"bytecode": "0x..."`) and the Foundry
/// layout (`"bytecode": {"object": "0x..."}`).
pub fn read_artifact_bytecode(artifact_path: &Path) -> Result<Bytes, ScriptError> {
    let contents = fs::read_to_string(artifact_path).map_err(|e| {
        ScriptError::ArtifactParsing(format!("{}: {e}", artifact_path.display()))
    })?;
    let artifact: Value = serde_json::from_str(&contents).map_err(|e| {
        ScriptError::ArtifactParsing(format!("{}: {e}", artifact_path.display()))
    })?;

    let bytecode_value = &artifact[ARTIFACT_BYTECODE_KEY];
    let bytecode_hex = bytecode_value
        .as_str()
        .or_else(|| bytecode_value[ARTIFACT_BYTECODE_OBJECT_KEY].as_str())
        .ok_or_else(|| {
            ScriptError::ArtifactParsing(format!(
                "{}: no bytecode found",
                artifact_path.display()
            ))
        })?;

    let bytecode = Bytes::from_str(bytecode_hex)
        .map_err(|e| ScriptError::ArtifactParsing(format!("invalid bytecode hex: {e}")))?;

    if bytecode.is_empty() {
        return Err(ScriptError::ArtifactParsing(format!(
            "{}: bytecode is empty, is the contract abstract?",
            artifact_path.display()
        )));
    }

    Ok(bytecode)
}

/// Prepare a call to the `TokenManager` contract's `initialize` method,
/// registering `signers` in the given order
pub fn initialize_call(token_manager: Address, signers: &[Address]) -> PendingCall {
    let calldata = initializeCall {
        _signers: signers.to_vec(),
    }
    .abi_encode();

    PendingCall {
        to: token_manager,
        calldata: calldata.into(),
    }
}

/// Prepare a view call with no side effects against `contract`
pub fn view_call<C: SolCall>(contract: Address, call: &C) -> PendingCall {
    PendingCall {
        to: contract,
        calldata: call.abi_encode().into(),
    }
}
