use mini_sdk::constants::{tokens::MINI_TOKEN, CHAIN};
use std::sync::LazyLock;

pub const PRICE_REFRESH_INTERVAL_MS: u64 = 30_000;

pub const ESTIMATE_DEBOUNCE_MS: f64 = 250.0;

/// Shortcut amounts, in native currency.
pub const QUICK_AMOUNTS: [&str; 4] = ["0.01", "0.05", "0.1", "0.25"];

/// Share of the native balance the max button fills in. The rest is left for gas.
pub const MAX_BALANCE_PERCENT: u8 = 90;

/// Slippage presets offered in the settings menu, in basis points.
pub const SLIPPAGE_PRESETS: [u16; 3] = [500, 1_000, 1_500];

pub const NATIVE_BALANCE_DECIMALS: usize = 4;

pub const SLIPPAGE_STORAGE_KEY: &str = "swap_slippage";
pub const FEE_TIER_STORAGE_KEY: &str = "swap_fee_tier";
pub const WALLET_STORAGE_KEY: &str = "is_wallet_connected";

pub static DEXSCREENER_URL: LazyLock<String> =
    LazyLock::new(|| format!("https://dexscreener.com/{}/{}", CHAIN.slug(), MINI_TOKEN.address));

pub static CHART_EMBED_URL: LazyLock<String> =
    LazyLock::new(|| format!("{}?embed=1&theme=dark&trades=0&info=0", *DEXSCREENER_URL));

pub static EXPLORER_TOKEN_URL: LazyLock<String> =
    LazyLock::new(|| format!("{}/token/{}", CHAIN.explorer_url(), MINI_TOKEN.address));

pub static UNISWAP_URL: LazyLock<String> = LazyLock::new(|| {
    format!(
        "https://app.uniswap.org/swap?chain={}&outputCurrency={}",
        CHAIN.slug(),
        MINI_TOKEN.address
    )
});

pub static CLANKER_URL: LazyLock<String> =
    LazyLock::new(|| format!("https://www.clanker.world/clanker/{}", MINI_TOKEN.address));

pub fn explorer_tx_url(hash: impl std::fmt::Display) -> String {
    format!("{}/tx/{hash}", CHAIN.explorer_url())
}
