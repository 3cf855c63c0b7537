//! Type definitions used throughout the scripts

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, Bytes, TxHash},
};

/// A contract to be deployed: its name, creation bytecode, and the
/// ordered arguments passed to its constructor
#[derive(Clone, Debug, PartialEq)]
pub struct DeploymentTarget {
    /// The name of the contract
    pub contract_name: String,
    /// The contract's creation bytecode, without constructor arguments
    pub bytecode: Bytes,
    /// The constructor arguments, in declaration order
    pub constructor_args: Vec<DynSolValue>,
}

impl DeploymentTarget {
    /// The full creation code: the bytecode followed by the ABI-encoded
    /// constructor arguments
    pub fn creation_code(&self) -> Bytes {
        let encoded_args = DynSolValue::Tuple(self.constructor_args.clone()).abi_encode_params();
        [self.bytecode.as_ref(), encoded_args.as_slice()]
            .concat()
            .into()
    }
}

/// A handle on a contract whose creation transaction has been confirmed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedContract {
    /// The name of the contract
    pub name: String,
    /// The address at which the contract was deployed
    pub address: Address,
    /// The hash of the creation transaction
    pub tx_hash: TxHash,
}

/// A call against a deployed contract that has not yet been sent
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingCall {
    /// The contract being called
    pub to: Address,
    /// The ABI-encoded calldata
    pub calldata: Bytes,
}

/// A confirmed, successful transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Human-readable description of the step the transaction performed
    pub description: String,
    /// The transaction hash
    pub tx_hash: TxHash,
    /// The block in which the transaction was included
    pub block_number: Option<u64>,
}
