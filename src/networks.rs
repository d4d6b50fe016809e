//! Definitions of the networks the migrations can target
//!
//! This is the network table the external deployment tool used to carry as
//! configuration: per-network chain ids, RPC endpoints, and whether the GSN
//! meta-transaction machinery is available on the network.

use std::{
    env,
    fmt::{self, Display},
};

use clap::ValueEnum;

use crate::{
    constants::{
        COMMUNITIES_REGISTRY_ARTIFACT, GANACHE_RPC_URL, INFURA_PROJECT_ID_ENV_VAR,
        MATICVIGIL_PROJECT_ID_ENV_VAR, MATIC_MAINNET_RPC_URL_BASE, MUMBAI_RPC_URL_BASE,
        NO_GSN_COMMUNITIES_REGISTRY_ARTIFACT, ROPSTEN_RPC_URL_BASE, XDAI_RPC_URL,
    },
    errors::ScriptError,
};

/// The networks the migrations can be run against
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Network {
    /// A local ganache-cli node
    Ganachecli,
    /// The ropsten testnet, with GSN support
    Ropsten,
    /// The ropsten testnet, without GSN support
    RopstenNoGsn,
    /// The Matic mumbai testnet, with GSN support
    Mumbai,
    /// The Matic mumbai testnet, without GSN support
    MumbaiNoGsn,
    /// The Matic mainnet, without GSN support
    MaticMainnetNoGsn,
    /// The xDai chain, without GSN support
    XdaiNoGsn,
}

/// The variant of the communities registry contract deployed to a network
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegistryVariant {
    /// The GSN-enabled registry
    Gsn,
    /// The registry without GSN support
    NoGsn,
}

impl RegistryVariant {
    /// The name of the compiled artifact implementing this variant
    pub fn artifact_name(&self) -> &'static str {
        match self {
            RegistryVariant::Gsn => COMMUNITIES_REGISTRY_ARTIFACT,
            RegistryVariant::NoGsn => NO_GSN_COMMUNITIES_REGISTRY_ARTIFACT,
        }
    }
}

impl Network {
    /// The network name as the migration tooling spells it,
    /// used as the per-network key in the deployments file
    pub fn name(&self) -> &'static str {
        match self {
            Network::Ganachecli => "ganachecli",
            Network::Ropsten => "ropsten",
            Network::RopstenNoGsn => "ropstenNoGSN",
            Network::Mumbai => "mumbai",
            Network::MumbaiNoGsn => "mumbaiNoGSN",
            Network::MaticMainnetNoGsn => "maticMainnetNoGSN",
            Network::XdaiNoGsn => "xdaiNoGSN",
        }
    }

    /// The chain id the network is expected to report
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Ganachecli => 5777,
            Network::Ropsten | Network::RopstenNoGsn => 3,
            Network::Mumbai | Network::MumbaiNoGsn => 80001,
            Network::MaticMainnetNoGsn => 137,
            Network::XdaiNoGsn => 100,
        }
    }

    /// Whether the GSN meta-transaction machinery is enabled on this network
    pub fn gsn_enabled(&self) -> bool {
        match self {
            Network::Ganachecli | Network::Ropsten | Network::Mumbai => true,
            Network::RopstenNoGsn
            | Network::MumbaiNoGsn
            | Network::MaticMainnetNoGsn
            | Network::XdaiNoGsn => false,
        }
    }

    /// The registry variant deployed to this network
    pub fn registry_variant(&self) -> RegistryVariant {
        if self.gsn_enabled() {
            RegistryVariant::Gsn
        } else {
            RegistryVariant::NoGsn
        }
    }

    /// Whether a GSN relay hub is configured for this network,
    /// i.e. whether the paymaster migration applies to it
    pub fn has_relay_hub(&self) -> bool {
        matches!(self, Network::Mumbai)
    }

    /// The RPC endpoint of the network
    ///
    /// Hosted endpoints require a project id from the environment.
    pub fn rpc_url(&self) -> Result<String, ScriptError> {
        match self {
            Network::Ganachecli => Ok(GANACHE_RPC_URL.to_string()),
            Network::XdaiNoGsn => Ok(XDAI_RPC_URL.to_string()),
            Network::Ropsten | Network::RopstenNoGsn => {
                let project_id = project_id_from_env(INFURA_PROJECT_ID_ENV_VAR)?;
                Ok(format!("{ROPSTEN_RPC_URL_BASE}{project_id}"))
            }
            Network::Mumbai | Network::MumbaiNoGsn => {
                let project_id = project_id_from_env(MATICVIGIL_PROJECT_ID_ENV_VAR)?;
                Ok(format!("{MUMBAI_RPC_URL_BASE}{project_id}"))
            }
            Network::MaticMainnetNoGsn => {
                let project_id = project_id_from_env(MATICVIGIL_PROJECT_ID_ENV_VAR)?;
                Ok(format!("{MATIC_MAINNET_RPC_URL_BASE}{project_id}"))
            }
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Reads a hosted-endpoint project id from the environment
fn project_id_from_env(env_var: &str) -> Result<String, ScriptError> {
    env::var(env_var)
        .map_err(|_| ScriptError::RpcConfiguration(format!("{env_var} must be set")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NO_GSN_MARKER;

    #[test]
    fn gsn_flag_agrees_with_network_name() {
        for network in Network::value_variants() {
            assert_eq!(
                network.gsn_enabled(),
                !network.name().contains(NO_GSN_MARKER),
                "{} has an inconsistent GSN flag",
                network,
            );
        }
    }

    #[test]
    fn no_gsn_networks_select_the_no_gsn_registry() {
        assert_eq!(
            Network::Ropsten.registry_variant().artifact_name(),
            COMMUNITIES_REGISTRY_ARTIFACT,
        );
        assert_eq!(
            Network::RopstenNoGsn.registry_variant().artifact_name(),
            NO_GSN_COMMUNITIES_REGISTRY_ARTIFACT,
        );
        assert_eq!(
            Network::MaticMainnetNoGsn.registry_variant(),
            RegistryVariant::NoGsn,
        );
        assert_eq!(Network::Mumbai.registry_variant(), RegistryVariant::Gsn);
    }

    #[test]
    fn chain_ids_match_network_configuration() {
        assert_eq!(Network::Ganachecli.chain_id(), 5777);
        assert_eq!(Network::Ropsten.chain_id(), 3);
        assert_eq!(Network::RopstenNoGsn.chain_id(), 3);
        assert_eq!(Network::Mumbai.chain_id(), 80001);
        assert_eq!(Network::MaticMainnetNoGsn.chain_id(), 137);
        assert_eq!(Network::XdaiNoGsn.chain_id(), 100);
    }

    #[test]
    fn only_mumbai_has_a_relay_hub() {
        assert!(Network::Mumbai.has_relay_hub());
        assert!(!Network::MumbaiNoGsn.has_relay_hub());
        assert!(!Network::MaticMainnetNoGsn.has_relay_hub());
        assert!(!Network::Ganachecli.has_relay_hub());
    }

    #[test]
    fn static_endpoints_need_no_environment() {
        assert_eq!(Network::Ganachecli.rpc_url().unwrap(), GANACHE_RPC_URL);
        assert_eq!(Network::XdaiNoGsn.rpc_url().unwrap(), XDAI_RPC_URL);
    }
}
