//! The chain-facing half of the scripts: deploying contracts, submitting
//! transactions, and reading contract state

use std::time::Duration;

use alloy::{
    contract::RawCallBuilder,
    primitives::Bytes,
    providers::DynProvider,
};
use tracing::info;

use crate::{
    errors::ScriptError,
    transactions::send_tx,
    types::{DeployedContract, DeploymentTarget, PendingCall, TransactionRecord},
};

/// A connection to a chain through which contracts are deployed and called
///
/// Every mutating method blocks until its transaction is confirmed, so a value
/// returned from one of them always reflects durable on-chain state.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// Deploy the given contract, returning a handle once the creation
    /// transaction is confirmed
    ///
    /// Fails with [`ScriptError::ContractDeployment`] if the creation transaction
    /// is rejected, reverts, or is not confirmed in time.
    async fn deploy(
        &self,
        target: &DeploymentTarget,
        label: &str,
    ) -> Result<DeployedContract, ScriptError>;

    /// Submit a call as a transaction and wait for its confirmation
    ///
    /// Fails with [`ScriptError::TransactionReverted`] if execution reverts and
    /// [`ScriptError::TransactionSubmission`] on any other failure.
    async fn submit(
        &self,
        call: PendingCall,
        description: &str,
    ) -> Result<TransactionRecord, ScriptError>;

    /// Execute a call against the latest block without sending a transaction
    async fn call(&self, call: PendingCall) -> Result<Bytes, ScriptError>;
}

/// A [`ChainClient`] backed by a JSON-RPC provider with a local signer attached
pub struct RpcChainClient {
    /// The signing provider
    provider: DynProvider,
    /// The number of confirmations to wait for on every transaction
    confirmations: u64,
    /// How long to wait for a transaction receipt
    timeout: Duration,
}

impl RpcChainClient {
    /// Constructor
    pub fn new(provider: DynProvider, confirmations: u64, timeout: Duration) -> Self {
        Self {
            provider,
            confirmations,
            timeout,
        }
    }
}

impl ChainClient for RpcChainClient {
    async fn deploy(
        &self,
        target: &DeploymentTarget,
        label: &str,
    ) -> Result<DeployedContract, ScriptError> {
        info!(label, contract = %target.contract_name, "deploying contract");

        let tx = RawCallBuilder::<(), _>::new_raw_deploy(&self.provider, target.creation_code());
        let receipt = send_tx(tx, label, self.confirmations, self.timeout)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        let address = receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "{label}: receipt for tx {} has no contract address",
                receipt.transaction_hash
            ))
        })?;

        info!(label, %address, tx_hash = %receipt.transaction_hash, "contract deployed");
        Ok(DeployedContract {
            name: target.contract_name.clone(),
            address,
            tx_hash: receipt.transaction_hash,
        })
    }

    async fn submit(
        &self,
        call: PendingCall,
        description: &str,
    ) -> Result<TransactionRecord, ScriptError> {
        let tx = RawCallBuilder::<(), _>::new_raw(&self.provider, call.calldata).to(call.to);
        let receipt = send_tx(tx, description, self.confirmations, self.timeout).await?;

        Ok(TransactionRecord {
            description: description.to_string(),
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        })
    }

    async fn call(&self, call: PendingCall) -> Result<Bytes, ScriptError> {
        let to = call.to;
        RawCallBuilder::<(), _>::new_raw(&self.provider, call.calldata)
            .to(to)
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(format!("call to {to} failed: {e}")))
    }
}
