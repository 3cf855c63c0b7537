use std::time::Duration;

use clap::Parser;
use scripts::{
    chain::RpcChainClient, cli::Cli, deployments::DeploymentsRegistry, errors::ScriptError,
    utils::setup_client,
};
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let config = cli.deploy_config()?;
    let provider = setup_client(&cli.priv_key, &cli.rpc_url)?;
    let client = RpcChainClient::new(
        provider,
        cli.confirmations,
        Duration::from_secs(cli.timeout_secs),
    );
    let registry = DeploymentsRegistry::new(cli.deployments_path);

    cli.command
        .run(&client, &config, &registry)
        .await
        .inspect_err(|e| error!("{e}"))
}
