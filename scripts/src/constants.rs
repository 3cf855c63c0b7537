//! Constants used in the deploy scripts

use alloy::primitives::{address, Address};

/// The name of the contract deployed by these scripts, as it appears in the
/// compiled artifact and in the `deployments.json` file
pub const TOKEN_MANAGER_CONTRACT_NAME: &str = "TokenManager";

/// The label under which the `TokenManager` deployment is logged
pub const TOKEN_MANAGER_LABEL: &str = "TokenManager";

/// The description attached to the `TokenManager` initialization transaction
pub const INITIALIZE_DESCRIPTION: &str = "tokenManager.initialize";

/// The deployments key in the `deployments.json` file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The default path of the `deployments.json` file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The default path of the compiled `TokenManager` artifact
pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/TokenManager.json";

/// The default RPC URL, pointing at a local devnet node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The bytecode key in a compiled contract artifact
pub const ARTIFACT_BYTECODE_KEY: &str = "bytecode";

/// The key nesting the bytecode hex string in Foundry artifacts
pub const ARTIFACT_BYTECODE_OBJECT_KEY: &str = "object";

/// The number of confirmations to wait for on every transaction
pub const NUM_CONFIRMATIONS: u64 = 1;

/// The number of seconds to wait for a transaction receipt before giving up
pub const TX_RECEIPT_TIMEOUT_SECS: u64 = 120;

/// Substring by which nodes flag an execution revert in JSON-RPC error messages
pub const REVERT_MESSAGE_MARKER: &str = "revert";

/// The network under which the preset deployment is recorded
pub const PRESET_NETWORK: &str = "canto";

/// The number of signer approvals the preset `TokenManager` requires
pub const PRESET_MIN_AUTHORIZATIONS: u64 = 3;

/// The signers registered by the preset `TokenManager` initialization
pub const PRESET_SIGNERS: [Address; 3] = [
    // CantoSpider
    address!("2beEcacFBBfaCd04BE3b9b463D7C097Cd922F4E3"),
    // CantoRaptor
    address!("Fc149d251fBdB3020a5B52c1660108e777C6061f"),
    // CantoSoldier
    address!("347A1B1eF81aCD74740F6e073577347a8d5Ff107"),
];
