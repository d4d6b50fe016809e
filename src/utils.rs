//! Utilities for the deploy scripts

use std::{fs, path::PathBuf, str::FromStr, sync::Arc};

use ethers::{
    abi::{Address, Contract},
    contract::builders::ContractCall,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{coins_bip39::English, MnemonicBuilder, Signer},
    types::Bytes,
    utils::hex::FromHex,
};
use json::JsonValue;
use tracing::log::warn;

use crate::{
    constants::{ARTIFACT_ABI_KEY, ARTIFACT_BYTECODE_KEY, ARTIFACT_EXTENSION, DEPLOYMENTS_KEY},
    errors::ScriptError,
};

/// Sets up the client with which the migrations sign and send transactions,
/// deriving the deployer wallet from the given mnemonic phrase.
pub async fn setup_client(
    mnemonic: &str,
    rpc_url: &str,
    expected_chain_id: u64,
) -> Result<Arc<impl Middleware>, ScriptError> {
    let provider = Provider::<Http>::try_from(rpc_url)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let wallet = MnemonicBuilder::<English>::default()
        .phrase(mnemonic)
        .build()
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
        .as_u64();
    if chain_id != expected_chain_id {
        warn!(
            "Node at {} reports chain id {}, network is configured with {}",
            rpc_url, chain_id, expected_chain_id
        );
    }

    let client = Arc::new(SignerMiddleware::new(
        provider,
        wallet.with_chain_id(chain_id),
    ));

    Ok(client)
}

/// Sends a contract call and waits for it to be mined
pub async fn send_tx<M: Middleware>(call: ContractCall<M, ()>) -> Result<(), ScriptError> {
    call.send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    Ok(())
}

/// Reads the ABI and creation bytecode of a contract from its
/// compiled artifact file in the given artifacts directory
pub fn read_artifact(
    artifacts_path: &str,
    contract_name: &str,
) -> Result<(Contract, Bytes), ScriptError> {
    let file_path =
        PathBuf::from(artifacts_path).join(format!("{contract_name}.{ARTIFACT_EXTENSION}"));
    let file_contents = fs::read_to_string(&file_path)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", file_path.display(), e)))?;
    let parsed_json =
        json::parse(&file_contents).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    let abi: Contract = serde_json::from_str(&parsed_json[ARTIFACT_ABI_KEY].dump())
        .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    let bytecode_hex = parsed_json[ARTIFACT_BYTECODE_KEY].as_str().ok_or_else(|| {
        ScriptError::ArtifactParsing(format!("no bytecode in the {contract_name} artifact"))
    })?;
    let bytecode = Bytes::from_hex(bytecode_hex.strip_prefix("0x").unwrap_or(bytecode_hex))
        .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    Ok((abi, bytecode))
}

/// Reads the deployments file into a JSON value
fn get_json_from_file(file_path: &str) -> Result<JsonValue, ScriptError> {
    let file_contents =
        fs::read_to_string(file_path).map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;

    json::parse(&file_contents).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Looks up the address a contract was deployed at on the given
/// network from the deployments file
pub fn parse_addr_from_deployments_file(
    file_path: &str,
    network_name: &str,
    contract_key: &str,
) -> Result<Address, ScriptError> {
    let parsed_json = get_json_from_file(file_path)?;

    Address::from_str(
        parsed_json[DEPLOYMENTS_KEY][network_name][contract_key]
            .as_str()
            .ok_or_else(|| {
                ScriptError::ReadDeployments(format!(
                    "no {contract_key} deployment recorded for {network_name}"
                ))
            })?,
    )
    .map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Records the address a contract was deployed at on the given
/// network in the deployments file
pub fn write_deployed_address(
    file_path: &str,
    network_name: &str,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    // If the file doesn't exist, create it
    if !PathBuf::from(file_path).exists() {
        fs::write(file_path, "{}").map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    }
    let mut parsed_json = get_json_from_file(file_path)?;

    parsed_json[DEPLOYMENTS_KEY][network_name][contract_key] =
        JsonValue::String(format!("{address:#x}"));

    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::COMMUNITIES_REGISTRY_CONTRACT_KEY;
    use tempfile::tempdir;

    /// A minimal truffle-style artifact for the registry contract
    const REGISTRY_ARTIFACT: &str = r#"{
        "contractName": "CommunitiesRegistry",
        "abi": [
            {
                "type": "function",
                "name": "createCommunity",
                "inputs": [],
                "outputs": [],
                "stateMutability": "nonpayable"
            }
        ],
        "bytecode": "0x60806040"
    }"#;

    #[test]
    fn deployments_file_round_trips_per_network() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("deployments.json");
        let file_path = file_path.to_str().unwrap();

        let gsn_addr: Address = "0x9dA734b528FF72D4D0660403Bd85870f995dD7fC".parse().unwrap();
        let no_gsn_addr: Address = "0x7B65a57Bc5D46795006e8312DD7994eE1ECE21C6".parse().unwrap();

        write_deployed_address(file_path, "mumbai", COMMUNITIES_REGISTRY_CONTRACT_KEY, gsn_addr)
            .unwrap();
        write_deployed_address(
            file_path,
            "mumbaiNoGSN",
            COMMUNITIES_REGISTRY_CONTRACT_KEY,
            no_gsn_addr,
        )
        .unwrap();

        assert_eq!(
            parse_addr_from_deployments_file(
                file_path,
                "mumbai",
                COMMUNITIES_REGISTRY_CONTRACT_KEY
            )
            .unwrap(),
            gsn_addr,
        );
        assert_eq!(
            parse_addr_from_deployments_file(
                file_path,
                "mumbaiNoGSN",
                COMMUNITIES_REGISTRY_CONTRACT_KEY
            )
            .unwrap(),
            no_gsn_addr,
        );
    }

    #[test]
    fn missing_deployment_is_an_error() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("deployments.json");
        let file_path = file_path.to_str().unwrap();

        let addr: Address = "0x9dA734b528FF72D4D0660403Bd85870f995dD7fC".parse().unwrap();
        write_deployed_address(file_path, "ropsten", COMMUNITIES_REGISTRY_CONTRACT_KEY, addr)
            .unwrap();

        assert!(parse_addr_from_deployments_file(
            file_path,
            "ropstenNoGSN",
            COMMUNITIES_REGISTRY_CONTRACT_KEY
        )
        .is_err());
    }

    #[test]
    fn artifact_parsing_extracts_abi_and_bytecode() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("CommunitiesRegistry.json"), REGISTRY_ARTIFACT).unwrap();

        let (abi, bytecode) =
            read_artifact(dir.path().to_str().unwrap(), "CommunitiesRegistry").unwrap();

        assert!(abi.function("createCommunity").is_ok());
        assert_eq!(bytecode.to_vec(), vec![0x60, 0x80, 0x60, 0x40]);
    }

    #[test]
    fn missing_artifact_is_an_error() {
        let dir = tempdir().unwrap();

        assert!(read_artifact(dir.path().to_str().unwrap(), "DitoWhitelistPaymaster").is_err());
    }
}
