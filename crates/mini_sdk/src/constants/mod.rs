use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod addrs;
pub mod tokens;

/// Basis-point denominator used for slippage.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Largest slippage the settings menu accepts (50%).
pub const MAX_SLIPPAGE_BPS: u16 = 5_000;

pub const DEFAULT_SLIPPAGE_BPS: u16 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainId {
    Base,
    BaseSepolia,
}

impl ChainId {
    pub const fn id(&self) -> u64 {
        match self {
            ChainId::Base => 8453,
            ChainId::BaseSepolia => 84532,
        }
    }

    /// Returns the corresponding `0x`-prefixed hex string, as wallets expect it.
    pub fn hex_id(&self) -> String {
        format!("{:#x}", self.id())
    }

    pub const fn name(&self) -> &'static str {
        match self {
            ChainId::Base => "Base",
            ChainId::BaseSepolia => "Base Sepolia",
        }
    }

    pub const fn rpc_url(&self) -> &'static str {
        match self {
            ChainId::Base => "https://mainnet.base.org",
            ChainId::BaseSepolia => "https://sepolia.base.org",
        }
    }

    pub const fn explorer_url(&self) -> &'static str {
        match self {
            ChainId::Base => "https://basescan.org",
            ChainId::BaseSepolia => "https://sepolia.basescan.org",
        }
    }

    /// Slug used by DexScreener and the Uniswap web app.
    pub const fn slug(&self) -> &'static str {
        match self {
            ChainId::Base => "base",
            ChainId::BaseSepolia => "base_sepolia",
        }
    }
}

impl FromStr for ChainId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "8453" | "0x2105" => Ok(ChainId::Base),
            "84532" | "0x14a34" => Ok(ChainId::BaseSepolia),
            _ => Err("Invalid chain ID"),
        }
    }
}

pub const CHAIN: ChainId = if cfg!(feature = "testnet") {
    ChainId::BaseSepolia
} else {
    ChainId::Base
};

/// Pool fee tiers, in hundredths of a basis point as the router expects them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeTier {
    Lowest,
    Low,
    Medium,
    Standard,
    #[default]
    High,
}

impl FeeTier {
    pub const ALL: [FeeTier; 5] = [
        FeeTier::Lowest,
        FeeTier::Low,
        FeeTier::Medium,
        FeeTier::Standard,
        FeeTier::High,
    ];

    pub const fn fee(&self) -> u32 {
        match self {
            FeeTier::Lowest => 100,
            FeeTier::Low => 500,
            FeeTier::Medium => 1_000,
            FeeTier::Standard => 3_000,
            FeeTier::High => 10_000,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            FeeTier::Lowest => "0.01%",
            FeeTier::Low => "0.05%",
            FeeTier::Medium => "0.1%",
            FeeTier::Standard => "0.3%",
            FeeTier::High => "1%",
        }
    }

    pub fn from_fee(fee: u32) -> Option<FeeTier> {
        FeeTier::ALL.into_iter().find(|tier| tier.fee() == fee)
    }
}

impl std::fmt::Display for FeeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
