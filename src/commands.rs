//! Implementations of the individual migrations

use std::{str::FromStr, sync::Arc};

use ethers::{
    abi::Address, middleware::contract::ContractFactory, providers::Middleware, types::U256,
};
use futures::future::try_join_all;
use tracing::log::info;

use crate::{
    cli::CreateCommunitiesArgs,
    constants::{
        COMMUNITIES_REGISTRY_CONTRACT_KEY, MATIC_RELAY_HUB, MATIC_TRUSTED_FORWARDER,
        NUM_DEPLOY_CONFIRMATIONS, NUM_SEED_COMMUNITIES, PAYMASTER_ARTIFACT,
        PAYMASTER_CONTRACT_KEY, PAYMASTER_DEPOSIT_WEI,
    },
    errors::ScriptError,
    networks::Network,
    solidity::{CommunitiesRegistryContract, RelayHubContract, WhitelistPaymasterContract},
    utils::{
        parse_addr_from_deployments_file, read_artifact, send_tx, write_deployed_address,
    },
};

/// Runs the full migration sequence for the given network,
/// aborting on the first failure
pub async fn migrate(
    network: Network,
    client: Arc<impl Middleware>,
    artifacts_path: &str,
    deployments_path: &str,
) -> Result<(), ScriptError> {
    deploy_registry(network, client.clone(), artifacts_path, deployments_path).await?;
    create_communities(
        CreateCommunitiesArgs {
            count: NUM_SEED_COMMUNITIES,
        },
        network,
        client.clone(),
        deployments_path,
    )
    .await?;
    deploy_paymaster(network, client, artifacts_path, deployments_path).await
}

/// Deploys the communities registry variant selected by the network
/// and records its address in the deployments file
pub async fn deploy_registry(
    network: Network,
    client: Arc<impl Middleware>,
    artifacts_path: &str,
    deployments_path: &str,
) -> Result<(), ScriptError> {
    let artifact_name = network.registry_variant().artifact_name();
    let registry_address = deploy_from_artifact(artifact_name, client, artifacts_path).await?;

    info!("{} deployed at {:#x}", artifact_name, registry_address);

    write_deployed_address(
        deployments_path,
        network.name(),
        COMMUNITIES_REGISTRY_CONTRACT_KEY,
        registry_address,
    )
}

/// Seeds the deployed registry with an initial batch of communities
/// and logs their addresses
pub async fn create_communities(
    args: CreateCommunitiesArgs,
    network: Network,
    client: Arc<impl Middleware>,
    deployments_path: &str,
) -> Result<(), ScriptError> {
    let registry_address = parse_addr_from_deployments_file(
        deployments_path,
        network.name(),
        COMMUNITIES_REGISTRY_CONTRACT_KEY,
    )?;
    let registry = CommunitiesRegistryContract::new(registry_address, client);

    // The creation calls are independent, issue them concurrently
    // and await them jointly
    try_join_all((0..args.count).map(|_| send_tx(registry.create_community()))).await?;

    let communities = try_join_all((0..args.count).map(|i| {
        let call = registry.communities(U256::from(i));
        async move {
            call.call()
                .await
                .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
        }
    }))
    .await?;

    for (i, community_address) in communities.iter().enumerate() {
        info!("Community {} registered at {:#x}", i, community_address);
    }

    Ok(())
}

/// Deploys the whitelist paymaster, wires it to the network's GSN relay hub
/// and trusted forwarder, and funds its relay hub deposit
///
/// Networks without a configured relay hub are skipped.
pub async fn deploy_paymaster(
    network: Network,
    client: Arc<impl Middleware>,
    artifacts_path: &str,
    deployments_path: &str,
) -> Result<(), ScriptError> {
    if !network.has_relay_hub() {
        info!(
            "No relay hub configured for {}, skipping paymaster deployment",
            network
        );
        return Ok(());
    }

    let paymaster_address =
        deploy_from_artifact(PAYMASTER_ARTIFACT, client.clone(), artifacts_path).await?;

    info!("{} deployed at {:#x}", PAYMASTER_ARTIFACT, paymaster_address);

    // Can `unwrap` here since the relay hub constants are known-valid addresses
    let relay_hub_address = Address::from_str(MATIC_RELAY_HUB).unwrap();
    let forwarder_address = Address::from_str(MATIC_TRUSTED_FORWARDER).unwrap();

    let paymaster = WhitelistPaymasterContract::new(paymaster_address, client.clone());
    tokio::try_join!(
        send_tx(paymaster.set_relay_hub(relay_hub_address)),
        send_tx(paymaster.set_trusted_forwarder(forwarder_address)),
    )?;

    // The deposit references the paymaster's address, so it must
    // come after the deployment has been mined
    let relay_hub = RelayHubContract::new(relay_hub_address, client);
    send_tx(
        relay_hub
            .deposit_for(paymaster_address)
            .value(PAYMASTER_DEPOSIT_WEI),
    )
    .await?;

    let balance = relay_hub
        .balance_of(paymaster_address)
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    info!("Paymaster relay hub balance: {} wei", balance);

    write_deployed_address(
        deployments_path,
        network.name(),
        PAYMASTER_CONTRACT_KEY,
        paymaster_address,
    )
}

/// Deploys a contract from its compiled artifact,
/// returning the deployed address
async fn deploy_from_artifact(
    artifact_name: &str,
    client: Arc<impl Middleware>,
    artifacts_path: &str,
) -> Result<Address, ScriptError> {
    let (abi, bytecode) = read_artifact(artifacts_path, artifact_name)?;
    let factory = ContractFactory::new(abi, bytecode, client);

    let contract = factory
        .deploy(())
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
        .confirmations(NUM_DEPLOY_CONFIRMATIONS)
        .send()
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

    Ok(contract.address())
}
