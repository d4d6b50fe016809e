use clap::Parser;
use dito_deploy::{cli::Cli, errors::ScriptError, utils::setup_client};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli {
        mnemonic,
        network,
        rpc_url,
        artifacts_path,
        deployments_path,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let rpc_url = match rpc_url {
        Some(url) => url,
        None => network.rpc_url()?,
    };

    let client = setup_client(&mnemonic, &rpc_url, network.chain_id()).await?;

    command
        .run(client, network, &artifacts_path, &deployments_path)
        .await
}
