//! Constants used in the deploy scripts

/// The RPC endpoint of a local ganache-cli node
pub const GANACHE_RPC_URL: &str = "http://127.0.0.1:8545";

/// The RPC endpoint of the xDai chain
pub const XDAI_RPC_URL: &str = "https://rpc.xdaichain.com/";

/// The base URL of the Infura ropsten endpoint, completed by a project id
pub const ROPSTEN_RPC_URL_BASE: &str = "https://ropsten.infura.io/v3/";

/// The base URL of the MaticVigil mumbai endpoint, completed by a project id
pub const MUMBAI_RPC_URL_BASE: &str = "https://rpc-mumbai.maticvigil.com/v1/";

/// The base URL of the MaticVigil mainnet endpoint, completed by a project id
pub const MATIC_MAINNET_RPC_URL_BASE: &str = "https://rpc-mainnet.maticvigil.com/v1/";

/// The name of the environment variable holding the Infura project id
pub const INFURA_PROJECT_ID_ENV_VAR: &str = "INFURA_PROJECT_ID";

/// The name of the environment variable holding the MaticVigil project id
pub const MATICVIGIL_PROJECT_ID_ENV_VAR: &str = "MATICVIGIL_PROJECT_ID";

/// The marker in a network name denoting that GSN support is disabled
pub const NO_GSN_MARKER: &str = "NoGSN";

/// The artifact name of the GSN-enabled communities registry contract
pub const COMMUNITIES_REGISTRY_ARTIFACT: &str = "CommunitiesRegistry";

/// The artifact name of the communities registry contract without GSN support
pub const NO_GSN_COMMUNITIES_REGISTRY_ARTIFACT: &str = "NoGSNCommunitiesRegistry";

/// The artifact name of the whitelist paymaster contract
pub const PAYMASTER_ARTIFACT: &str = "DitoWhitelistPaymaster";

/// The extension of a compiled contract artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The key under which an artifact file stores the contract ABI
pub const ARTIFACT_ABI_KEY: &str = "abi";

/// The key under which an artifact file stores the creation bytecode
pub const ARTIFACT_BYTECODE_KEY: &str = "bytecode";

/// The deployments key in the `deployments.json` file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The communities registry contract key in the `deployments.json` file
pub const COMMUNITIES_REGISTRY_CONTRACT_KEY: &str = "communities_registry";

/// The whitelist paymaster contract key in the `deployments.json` file
pub const PAYMASTER_CONTRACT_KEY: &str = "dito_whitelist_paymaster";

/// The number of confirmations to wait for a contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: usize = 0;

/// The number of communities the registry is seeded with after deployment
pub const NUM_SEED_COMMUNITIES: usize = 3;

/// The address of the GSN relay hub on the Matic networks
pub const MATIC_RELAY_HUB: &str = "0x9dA734b528FF72D4D0660403Bd85870f995dD7fC";

/// The address of the GSN trusted forwarder on the Matic networks
pub const MATIC_TRUSTED_FORWARDER: &str = "0x7B65a57Bc5D46795006e8312DD7994eE1ECE21C6";

/// The amount, in wei, deposited into the relay hub for the paymaster (0.01 ether)
pub const PAYMASTER_DEPOSIT_WEI: u128 = 10_000_000_000_000_000;

/// The default directory containing the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_PATH: &str = "build/contracts";

/// The default path of the `deployments.json` file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";
