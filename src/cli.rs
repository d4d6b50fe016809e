//! Definitions of CLI arguments and commands for the deploy scripts

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use ethers::providers::Middleware;

use crate::{
    commands::{create_communities, deploy_paymaster, deploy_registry, migrate},
    constants::{DEFAULT_ARTIFACTS_PATH, DEFAULT_DEPLOYMENTS_PATH, NUM_SEED_COMMUNITIES},
    errors::ScriptError,
    networks::Network,
};

/// Deploy and initialize the DiTo community contracts
#[derive(Parser)]
pub struct Cli {
    /// BIP-39 mnemonic phrase of the deployer account
    #[arg(short, long, env = "MNEMONIC", hide_env_values = true)]
    pub mnemonic: String,

    /// Target network for the migration run
    #[arg(short, long)]
    pub network: Network,

    /// RPC URL override; defaults to the network's configured endpoint
    #[arg(short, long)]
    pub rpc_url: Option<String>,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_PATH)]
    pub artifacts_path: String,

    /// Path of the file recording deployed contract addresses
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: String,

    /// The migration to run
    #[command(subcommand)]
    pub command: Command,
}

/// The migrations the deploy scripts can run
#[derive(Subcommand)]
pub enum Command {
    /// Run all migrations in order
    Migrate,
    /// Deploy the communities registry variant selected by the network
    DeployRegistry,
    /// Seed the deployed registry with an initial set of communities
    CreateCommunities(CreateCommunitiesArgs),
    /// Deploy and fund the whitelist paymaster, where the network has a relay hub
    DeployPaymaster,
}

impl Command {
    /// Runs the selected migration against the given network
    pub async fn run(
        self,
        client: Arc<impl Middleware>,
        network: Network,
        artifacts_path: &str,
        deployments_path: &str,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Migrate => migrate(network, client, artifacts_path, deployments_path).await,
            Command::DeployRegistry => {
                deploy_registry(network, client, artifacts_path, deployments_path).await
            }
            Command::CreateCommunities(args) => {
                create_communities(args, network, client, deployments_path).await
            }
            Command::DeployPaymaster => {
                deploy_paymaster(network, client, artifacts_path, deployments_path).await
            }
        }
    }
}

/// Seed the deployed communities registry with an initial set of communities
#[derive(Args)]
pub struct CreateCommunitiesArgs {
    /// Number of communities to create
    #[arg(short, long, default_value_t = NUM_SEED_COMMUNITIES)]
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
