//! Implementations of the deploy scripts

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, Bytes, U256},
};
use alloy_sol_types::SolCall;
use tracing::{info, warn};

use crate::{
    chain::ChainClient,
    config::DeployConfig,
    constants::{INITIALIZE_DESCRIPTION, TOKEN_MANAGER_CONTRACT_NAME, TOKEN_MANAGER_LABEL},
    deployments::DeploymentsRegistry,
    errors::ScriptError,
    solidity::{minAuthorizationsCall, signersCall, signersLengthCall},
    types::{DeployedContract, DeploymentTarget, TransactionRecord},
    utils::{initialize_call, view_call},
};

/// Deploy a fresh `TokenManager` and initialize it with the configured signers.
///
/// The steps run strictly in order, each one starting only after the previous
/// one's transaction is confirmed:
/// 1. Deploy the contract with the configured threshold
/// 2. Record its address in the deployments file
/// 3. Call `initialize` with the configured signer list
///
/// The first failure aborts the run. If initialization fails, the contract stays
/// deployed but uninitialized, and its address is already recorded; the
/// `initialize` command can then finish the job without redeploying.
pub async fn deploy_token_manager(
    client: &impl ChainClient,
    config: &DeployConfig,
    bytecode: Bytes,
    registry: &DeploymentsRegistry,
) -> Result<DeployedContract, ScriptError> {
    let target = DeploymentTarget {
        contract_name: TOKEN_MANAGER_CONTRACT_NAME.to_string(),
        bytecode,
        constructor_args: vec![DynSolValue::Uint(U256::from(config.min_authorizations), 256)],
    };

    info!(
        network = %config.network,
        min_authorizations = config.min_authorizations,
        signers = %config.signers_display(),
        "deploying token manager"
    );

    let token_manager = client.deploy(&target, TOKEN_MANAGER_LABEL).await?;
    registry.record(&config.network, &token_manager.name, token_manager.address)?;

    initialize_token_manager(client, config, token_manager.address).await?;

    info!(address = %token_manager.address, "token manager deployed and initialized");
    Ok(token_manager)
}

/// Initialize an already-deployed `TokenManager` with the configured signers
pub async fn initialize_token_manager(
    client: &impl ChainClient,
    config: &DeployConfig,
    token_manager: Address,
) -> Result<TransactionRecord, ScriptError> {
    let call = initialize_call(token_manager, &config.signers);
    client.submit(call, INITIALIZE_DESCRIPTION).await
}

/// Initialize the `TokenManager` recorded in the deployments file for the
/// configured network, without deploying a new one.
///
/// Intended for resuming a run whose initialization step failed.
pub async fn resume_initialize(
    client: &impl ChainClient,
    config: &DeployConfig,
    registry: &DeploymentsRegistry,
) -> Result<TransactionRecord, ScriptError> {
    let token_manager = registry.read(&config.network, TOKEN_MANAGER_CONTRACT_NAME)?;
    warn!(
        address = %token_manager,
        "initializing previously deployed token manager"
    );

    initialize_token_manager(client, config, token_manager).await
}

/// Check that the `TokenManager` recorded for the configured network carries
/// the configured threshold and exactly the configured signers, in order
pub async fn verify_token_manager(
    client: &impl ChainClient,
    config: &DeployConfig,
    registry: &DeploymentsRegistry,
) -> Result<(), ScriptError> {
    let token_manager = registry.read(&config.network, TOKEN_MANAGER_CONTRACT_NAME)?;

    let min_authorizations =
        view(client, token_manager, minAuthorizationsCall {}).await?._0;
    if min_authorizations != U256::from(config.min_authorizations) {
        return Err(ScriptError::Verification(format!(
            "expected min_authorizations {}, found {min_authorizations}",
            config.min_authorizations
        )));
    }

    let num_signers = view(client, token_manager, signersLengthCall {}).await?._0;
    let num_signers = u64::try_from(num_signers).map_err(|_| {
        ScriptError::Verification(format!("implausible signer count {num_signers}"))
    })?;

    let mut signers = Vec::with_capacity(config.signers.len());
    for index in 0..num_signers {
        let signer = view(
            client,
            token_manager,
            signersCall {
                index: U256::from(index),
            },
        )
        .await?
        ._0;
        signers.push(signer);
    }

    if signers != config.signers {
        return Err(ScriptError::Verification(format!(
            "expected signers [{}], found [{}]",
            config.signers_display(),
            itertools::join(&signers, ", ")
        )));
    }

    info!(
        address = %token_manager,
        %min_authorizations,
        signers = %config.signers_display(),
        "token manager verified"
    );
    Ok(())
}

/// Execute a view call against `contract` and decode its return value
async fn view<C: SolCall>(
    client: &impl ChainClient,
    contract: Address,
    call: C,
) -> Result<C::Return, ScriptError> {
    let output = client.call(view_call(contract, &call)).await?;
    C::abi_decode_returns(&output, true).map_err(|e| {
        ScriptError::ContractInteraction(format!("could not decode {}: {e}", C::SIGNATURE))
    })
}
