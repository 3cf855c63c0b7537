//! Definitions of CLI arguments and commands for the deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    chain::ChainClient,
    commands::{deploy_token_manager, resume_initialize, verify_token_manager},
    config::DeployConfig,
    constants::{
        DEFAULT_ARTIFACT_PATH, DEFAULT_DEPLOYMENTS_PATH, DEFAULT_RPC_URL, NUM_CONFIRMATIONS,
        TX_RECEIPT_TIMEOUT_SECS,
    },
    deployments::DeploymentsRegistry,
    errors::ScriptError,
    utils::read_artifact_bytecode,
};

/// Deploy and initialize the `TokenManager` governance contract
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PKEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Path to the file in which deployed addresses are recorded
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: PathBuf,

    /// Path to a JSON deployment config (network, threshold, signers).
    /// Uses the built-in preset if omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Network name under which deployments are recorded,
    /// overriding the one in the config
    #[arg(short, long)]
    pub network: Option<String>,

    /// Number of confirmations to wait for on every transaction
    #[arg(long, default_value_t = NUM_CONFIRMATIONS, value_parser = clap::value_parser!(u64).range(1..))]
    pub confirmations: u64,

    /// Seconds to wait for a transaction receipt before giving up
    #[arg(long, default_value_t = TX_RECEIPT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Load the deployment config, applying the network override if one was given
    pub fn deploy_config(&self) -> Result<DeployConfig, ScriptError> {
        let mut config = DeployConfig::load(self.config.as_deref())?;
        if let Some(network) = &self.network {
            config.network = network.clone();
            config.validate()?;
        }

        Ok(config)
    }
}

/// The deploy script commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy a new `TokenManager` and initialize it with the configured signers
    Deploy(DeployArgs),
    /// Initialize the `TokenManager` already recorded in the deployments file,
    /// without deploying a new one
    Initialize,
    /// Check the recorded `TokenManager`'s threshold and signers on chain
    Verify,
}

/// Arguments for the `deploy` command
#[derive(Args)]
pub struct DeployArgs {
    /// Path to the compiled `TokenManager` artifact
    #[arg(short, long, default_value = DEFAULT_ARTIFACT_PATH)]
    pub artifact: PathBuf,
}

impl Command {
    /// Run the command
    pub async fn run(
        self,
        client: &impl ChainClient,
        config: &DeployConfig,
        registry: &DeploymentsRegistry,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => {
                let bytecode = read_artifact_bytecode(&args.artifact)?;
                deploy_token_manager(client, config, bytecode, registry).await?;
            }
            Command::Initialize => {
                resume_initialize(client, config, registry).await?;
            }
            Command::Verify => verify_token_manager(client, config, registry).await?,
        }

        Ok(())
    }
}
