//! An in-memory chain used to drive the deploy scripts in tests
//!
//! Deployed contracts behave like a minimal `TokenManager`: the constructor
//! stores the threshold, `initialize` stores the signer list, and the view
//! methods read them back.

#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy_sol_types::{SolCall, SolValue};
use scripts::{
    chain::ChainClient,
    errors::ScriptError,
    solidity::{initializeCall, minAuthorizationsCall, signersCall, signersLengthCall},
    types::{DeployedContract, DeploymentTarget, PendingCall, TransactionRecord},
};

/// A transaction observed by the mock chain
#[derive(Clone, Debug, PartialEq)]
pub enum ChainEvent {
    /// A contract creation
    Deploy {
        /// The label the deployment was issued under
        label: String,
        /// The full creation code
        creation_code: Bytes,
    },
    /// A call submitted as a transaction
    Submit {
        /// The description the call was issued under
        description: String,
        /// The call itself
        call: PendingCall,
    },
}

/// The state of a contract deployed on the mock chain
#[derive(Clone, Debug, Default)]
struct MockTokenManager {
    /// The threshold passed to the constructor
    min_authorizations: U256,
    /// The signers registered by `initialize`
    signers: Vec<Address>,
    /// Whether `initialize` has been called
    initialized: bool,
}

/// A [`ChainClient`] that confirms transactions instantly in memory
#[derive(Default)]
pub struct MockChain {
    /// Error returned by the next deployment, if set
    pub deploy_error: Option<ScriptError>,
    /// Error returned by the next submission, if set
    pub submit_error: Option<ScriptError>,
    /// Every transaction that reached the chain, in order
    events: Mutex<Vec<ChainEvent>>,
    /// Deployed contracts by address
    contracts: Mutex<HashMap<Address, MockTokenManager>>,
}

impl MockChain {
    /// A chain on which every transaction succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain on which contract creation fails
    pub fn failing_deploy() -> Self {
        Self {
            deploy_error: Some(ScriptError::ContractDeployment(
                "TokenManager: creation reverted".to_string(),
            )),
            ..Self::default()
        }
    }

    /// A chain on which every submitted call reverts
    pub fn reverting_submit() -> Self {
        Self {
            submit_error: Some(ScriptError::TransactionReverted(
                "tokenManager.initialize: TokenManager: forbidden".to_string(),
            )),
            ..Self::default()
        }
    }

    /// Every transaction observed so far
    pub fn events(&self) -> Vec<ChainEvent> {
        self.events.lock().unwrap().clone()
    }

    /// The submitted calls observed so far
    pub fn submitted_calls(&self) -> Vec<PendingCall> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ChainEvent::Submit { call, .. } => Some(call),
                ChainEvent::Deploy { .. } => None,
            })
            .collect()
    }

    /// The number of deployments observed so far
    pub fn num_deployments(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, ChainEvent::Deploy { .. }))
            .count()
    }

    /// Place an uninitialized contract at `address`, as if deployed by an earlier run
    pub fn insert_contract(&self, address: Address, min_authorizations: u64) {
        self.contracts.lock().unwrap().insert(
            address,
            MockTokenManager {
                min_authorizations: U256::from(min_authorizations),
                ..Default::default()
            },
        );
    }

    /// Whether the contract at `address` has been initialized
    pub fn is_initialized(&self, address: Address) -> bool {
        self.contracts
            .lock()
            .unwrap()
            .get(&address)
            .is_some_and(|contract| contract.initialized)
    }

    /// Sequential transaction hashes, starting at 1
    fn next_tx_hash(&self) -> TxHash {
        let num_events = self.events.lock().unwrap().len();
        TxHash::with_last_byte(num_events as u8)
    }
}

impl ChainClient for MockChain {
    async fn deploy(
        &self,
        target: &DeploymentTarget,
        label: &str,
    ) -> Result<DeployedContract, ScriptError> {
        if let Some(err) = &self.deploy_error {
            return Err(err.clone());
        }

        self.events.lock().unwrap().push(ChainEvent::Deploy {
            label: label.to_string(),
            creation_code: target.creation_code(),
        });

        let min_authorizations = target
            .constructor_args
            .first()
            .and_then(|arg| arg.as_uint())
            .map(|(value, _)| value)
            .unwrap_or_default();

        let mut contracts = self.contracts.lock().unwrap();
        let address = Address::with_last_byte(0xa0 + contracts.len() as u8);
        contracts.insert(
            address,
            MockTokenManager {
                min_authorizations,
                ..Default::default()
            },
        );
        drop(contracts);

        Ok(DeployedContract {
            name: target.contract_name.clone(),
            address,
            tx_hash: self.next_tx_hash(),
        })
    }

    async fn submit(
        &self,
        call: PendingCall,
        description: &str,
    ) -> Result<TransactionRecord, ScriptError> {
        self.events.lock().unwrap().push(ChainEvent::Submit {
            description: description.to_string(),
            call: call.clone(),
        });

        if let Some(err) = &self.submit_error {
            return Err(err.clone());
        }

        let mut contracts = self.contracts.lock().unwrap();
        let contract = contracts.get_mut(&call.to).ok_or_else(|| {
            ScriptError::TransactionReverted(format!("{description}: no contract at {}", call.to))
        })?;

        let init = initializeCall::abi_decode(&call.calldata, true)
            .map_err(|e| ScriptError::TransactionReverted(format!("{description}: {e}")))?;
        if contract.initialized {
            return Err(ScriptError::TransactionReverted(format!(
                "{description}: TokenManager: already initialized"
            )));
        }
        contract.signers = init._signers;
        contract.initialized = true;
        drop(contracts);

        Ok(TransactionRecord {
            description: description.to_string(),
            tx_hash: self.next_tx_hash(),
            block_number: Some(self.events.lock().unwrap().len() as u64),
        })
    }

    async fn call(&self, call: PendingCall) -> Result<Bytes, ScriptError> {
        let contracts = self.contracts.lock().unwrap();
        let contract = contracts.get(&call.to).ok_or_else(|| {
            ScriptError::ContractInteraction(format!("no contract at {}", call.to))
        })?;

        let selector = &call.calldata[..4];
        let output = if selector == minAuthorizationsCall::SELECTOR {
            contract.min_authorizations.abi_encode()
        } else if selector == signersLengthCall::SELECTOR {
            U256::from(contract.signers.len()).abi_encode()
        } else if selector == signersCall::SELECTOR {
            let index = signersCall::abi_decode(&call.calldata, true).unwrap().index;
            let signer = contract
                .signers
                .get(index.to::<usize>())
                .ok_or_else(|| ScriptError::ContractInteraction("index out of bounds".into()))?;
            signer.abi_encode()
        } else {
            return Err(ScriptError::ContractInteraction("unknown selector".to_string()));
        };

        Ok(output.into())
    }
}
