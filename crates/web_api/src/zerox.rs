//! 0x Swap API (v2, allowance-holder flow) for the aggregator strategy.

use crate::Error;
use alloy_primitives::{Address, Bytes, U256};
use mini_sdk::{constants::ChainId, router::SwapTransaction};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const ZEROX_API: &str = "https://api.0x.org";
pub const QUOTE_PATH: &str = "/swap/allowance-holder/quote";

/// Read from the build environment.
pub const ZEROX_API_KEY: Option<&str> = option_env!("ZEROX_API_KEY");

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub chain_id: u64,
    pub sell_token: Address,
    pub buy_token: Address,
    /// Smallest units, decimal.
    pub sell_amount: String,
    pub taker: Address,
    pub slippage_bps: u16,
}

impl QuoteRequest {
    pub fn new(
        chain: ChainId,
        sell_token: Address,
        buy_token: Address,
        sell_amount: U256,
        taker: Address,
        slippage_bps: u16,
    ) -> Self {
        Self {
            chain_id: chain.id(),
            sell_token,
            buy_token,
            sell_amount: sell_amount.to_string(),
            taker,
            slippage_bps,
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("chainId", self.chain_id.to_string()),
            ("sellToken", self.sell_token.to_string()),
            ("buyToken", self.buy_token.to_string()),
            ("sellAmount", self.sell_amount.clone()),
            ("taker", self.taker.to_string()),
            ("slippageBps", self.slippage_bps.to_string()),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub liquidity_available: bool,
    #[serde(default)]
    pub buy_amount: Option<String>,
    #[serde(default)]
    pub min_buy_amount: Option<String>,
    #[serde(default)]
    pub sell_amount: Option<String>,
    #[serde(default)]
    pub transaction: Option<QuoteTransaction>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QuoteTransaction {
    pub to: Address,
    pub data: Bytes,
    /// Decimal string.
    pub value: String,
    #[serde(default)]
    pub gas: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorQuote {
    pub buy_amount: U256,
    pub min_buy_amount: U256,
    pub transaction: SwapTransaction,
}

fn parse_amount(field: &str, amount: Option<&str>) -> Result<U256, Error> {
    let amount = amount.ok_or_else(|| Error::Serde(format!("quote is missing `{field}`")))?;
    U256::from_str_radix(amount, 10)
        .map_err(|error| Error::Serde(format!("bad `{field}` '{amount}': {error}")))
}

impl QuoteResponse {
    /// Checks the route and that the transaction sends exactly `amount_in`.
    pub fn into_quote(self, amount_in: U256) -> Result<AggregatorQuote, Error> {
        if !self.liquidity_available {
            return Err(Error::RouteNotFound);
        }
        let transaction = self.transaction.ok_or(Error::RouteNotFound)?;

        let value = parse_amount("transaction.value", Some(&transaction.value))?;
        if value != amount_in {
            warn!("quote value {value} does not match the input {amount_in}");
            return Err(Error::generic("quoted transaction does not match the input amount"));
        }

        let buy_amount = parse_amount("buyAmount", self.buy_amount.as_deref())?;
        let min_buy_amount = parse_amount("minBuyAmount", self.min_buy_amount.as_deref())?;

        Ok(AggregatorQuote {
            buy_amount,
            min_buy_amount,
            transaction: SwapTransaction {
                to: transaction.to,
                data: transaction.data,
                value,
            },
        })
    }
}

pub async fn fetch_quote(
    client: &reqwest::Client,
    request: &QuoteRequest,
) -> Result<AggregatorQuote, Error> {
    let api_key = ZEROX_API_KEY.ok_or(Error::MissingApiKey)?;
    let amount_in = parse_amount("sellAmount", Some(&request.sell_amount))?;

    let response = client
        .get(format!("{ZEROX_API}{QUOTE_PATH}"))
        .query(&request.query())
        .header("0x-api-key", api_key)
        .header("0x-version", "v2")
        .send()
        .await?
        .error_for_status()?
        .json::<QuoteResponse>()
        .await?;

    debug!("{response:#?}");

    response.into_quote(amount_in)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use mini_sdk::constants::{addrs::NATIVE_SENTINEL, tokens::MINI_TOKEN};

    const TAKER: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

    const FIXTURE: &str = r#"{
        "blockNumber": "21000000",
        "buyAmount": "20000000000000000000000",
        "buyToken": "0x16a629c8f227c705893683dfdc0bd6f8f2717b07",
        "liquidityAvailable": true,
        "minBuyAmount": "18000000000000000000000",
        "sellAmount": "10000000000000000",
        "sellToken": "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
        "transaction": {
            "to": "0x0000000000001ff3684f28c67538d4d072c22734",
            "data": "0x2213bc0b",
            "gas": "288079",
            "gasPrice": "4000000",
            "value": "10000000000000000"
        }
    }"#;

    fn amount_in() -> U256 {
        U256::from(10_000_000_000_000_000u128)
    }

    #[test]
    fn quote_becomes_a_wallet_transaction() {
        let response: QuoteResponse = serde_json::from_str(FIXTURE).unwrap();
        let quote = response.into_quote(amount_in()).unwrap();

        assert_eq!(quote.transaction.value, amount_in());
        assert_eq!(
            quote.transaction.to,
            address!("0000000000001ff3684f28c67538d4d072c22734")
        );
        assert_eq!(quote.transaction.data.as_ref(), &[0x22, 0x13, 0xbc, 0x0b]);
        assert_eq!(quote.buy_amount, U256::from(20_000_000_000_000_000_000_000u128));
        assert!(quote.min_buy_amount <= quote.buy_amount);
    }

    #[test]
    fn missing_liquidity_is_route_not_found() {
        let response: QuoteResponse =
            serde_json::from_str(r#"{"liquidityAvailable":false,"zid":"0x1"}"#).unwrap();
        assert_eq!(response.into_quote(amount_in()), Err(Error::RouteNotFound));
        assert_eq!(
            mini_sdk::Error::from(Error::RouteNotFound),
            mini_sdk::Error::QuoteRouteNotFound
        );
    }

    #[test]
    fn mismatched_value_is_rejected() {
        let response: QuoteResponse = serde_json::from_str(FIXTURE).unwrap();
        assert!(matches!(
            response.into_quote(U256::from(1u8)),
            Err(Error::Generic(_))
        ));
    }

    #[test]
    fn request_query_parameters() {
        let request = QuoteRequest::new(
            ChainId::Base,
            NATIVE_SENTINEL,
            MINI_TOKEN.address,
            amount_in(),
            TAKER,
            1_000,
        );
        let query = request.query();

        assert!(query.contains(&("chainId", "8453".to_string())));
        assert!(query.contains(&("sellAmount", "10000000000000000".to_string())));
        assert!(query.contains(&("slippageBps", "1000".to_string())));
        assert!(query.contains(&("taker", TAKER.to_string())));
    }
}
