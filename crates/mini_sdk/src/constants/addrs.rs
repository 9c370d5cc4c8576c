use super::ChainId;
use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContracts {
    /// Uniswap V3 `SwapRouter02`.
    pub swap_router: Address,
    /// Wrapped native currency, used as `tokenIn` for native swaps.
    pub weth: Address,
}

const BASE_CONTRACTS: DeployedContracts = DeployedContracts {
    swap_router: address!("2626664c2603336E57B271c5C0b26F421741e481"),
    weth: address!("4200000000000000000000000000000000000006"),
};

const BASE_SEPOLIA_CONTRACTS: DeployedContracts = DeployedContracts {
    swap_router: address!("94cC0AaC535CCDB3C01d6787D6413C739ae12bc4"),
    weth: address!("4200000000000000000000000000000000000006"),
};

// Chain-to-contract mapping
pub const fn get_deployed_contracts(chain_id: ChainId) -> DeployedContracts {
    match chain_id {
        ChainId::Base => BASE_CONTRACTS,
        ChainId::BaseSepolia => BASE_SEPOLIA_CONTRACTS,
    }
}

/// Sentinel address that aggregators and widgets use for the native currency.
pub const NATIVE_SENTINEL: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");
