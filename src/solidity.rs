//! Definitions of contract methods called after deployment

use ethers::contract::abigen;

abigen!(
    CommunitiesRegistryContract,
    r#"[
        function createCommunity() external
        function communities(uint256 index) external view returns (address)
    ]"#
);

abigen!(
    WhitelistPaymasterContract,
    r#"[
        function setRelayHub(address hub) external
        function setTrustedForwarder(address forwarder) external
    ]"#
);

abigen!(
    RelayHubContract,
    r#"[
        function depositFor(address target) external payable
        function balanceOf(address target) external view returns (uint256)
    ]"#
);
