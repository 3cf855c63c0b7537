//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error loading or validating the deployment configuration
    Config(String),
    /// Error parsing a Solidity compilation artifact
    ArtifactParsing(String),
    /// Error deploying a contract: the creation transaction was rejected,
    /// reverted, or never confirmed
    ContractDeployment(String),
    /// Error signing, broadcasting, or confirming a transaction
    TransactionSubmission(String),
    /// A transaction was rejected by on-chain execution
    TransactionReverted(String),
    /// Error calling a contract view method
    ContractInteraction(String),
    /// Error reading the deployments file
    ReadDeployments(String),
    /// Error writing the deployments file
    WriteDeployments(String),
    /// On-chain state does not match the deployment configuration
    Verification(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::Config(s) => write!(f, "invalid deployment config: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::TransactionSubmission(s) => {
                write!(f, "error submitting transaction: {}", s)
            }
            ScriptError::TransactionReverted(s) => write!(f, "transaction reverted: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            ScriptError::Verification(s) => write!(f, "verification failed: {}", s),
        }
    }
}

impl Error for ScriptError {}
