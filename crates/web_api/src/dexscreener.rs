//! DexScreener token endpoint, used as the price feed.

use crate::Error;
use alloy_primitives::Address;
use mini_sdk::quote::PriceQuote;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

pub const DEXSCREENER_API: &str = "https://api.dexscreener.com/latest/dex/tokens";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokensResponse {
    #[serde(default)]
    pub schema_version: Option<String>,
    /// `null` when the token has no pairs.
    #[serde(default)]
    pub pairs: Option<Vec<Pair>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub chain_id: String,
    pub dex_id: String,
    #[serde(default)]
    pub url: Option<String>,
    pub pair_address: String,
    pub base_token: PairToken,
    pub quote_token: PairToken,
    /// Price of the base token in the quote token.
    pub price_native: String,
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub liquidity: Option<Liquidity>,
    #[serde(default)]
    pub fdv: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PairToken {
    pub address: String,
    pub name: String,
    pub symbol: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Liquidity {
    #[serde(default)]
    pub usd: Option<f64>,
}

fn parse_price(price: &str) -> Result<Decimal, Error> {
    Decimal::from_str(price)
        .or_else(|_| Decimal::from_scientific(price))
        .map_err(|error| Error::Serde(format!("bad price '{price}': {error}")))
}

impl TokensResponse {
    /// The first pair's native price, stamped with `fetched_at`.
    pub fn price_quote(&self, fetched_at: u64) -> Result<PriceQuote, Error> {
        let pair = self
            .pairs
            .as_ref()
            .and_then(|pairs| pairs.first())
            .ok_or(Error::NoPairs)?;

        let price = parse_price(&pair.price_native)?;
        if price <= Decimal::ZERO {
            return Err(Error::NoPairs);
        }
        let price_usd = pair
            .price_usd
            .as_deref()
            .and_then(|price| parse_price(price).ok());

        Ok(PriceQuote::new(price, fetched_at).with_usd(price_usd))
    }
}

pub fn tokens_url(token: Address) -> String {
    format!("{DEXSCREENER_API}/{token}")
}

pub async fn fetch_tokens(client: &reqwest::Client, token: Address) -> Result<TokensResponse, Error> {
    client
        .get(tokens_url(token))
        .header("accept", "application/json")
        .send()
        .await?
        .error_for_status()?
        .json::<TokensResponse>()
        .await
        .map_err(Into::into)
}

pub async fn fetch_price_quote(
    client: &reqwest::Client,
    token: Address,
    now: u64,
) -> Result<PriceQuote, Error> {
    fetch_tokens(client, token)
        .await?
        .price_quote(now)
        .inspect(|quote| debug!("price: {} native", quote.price))
}
