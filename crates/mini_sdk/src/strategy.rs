//! The ways a swap can be fulfilled. Exactly one is compiled in.

use crate::{
    constants::{addrs::NATIVE_SENTINEL, tokens::Token, ChainId},
    Error,
};
use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

pub const LIFI_WIDGET_URL: &str = "https://li.finance/widget";
pub const UNISWAP_SWAP_URL: &str = "https://app.uniswap.org/swap";

/// Amount pre-filled in the widget when the input is empty.
pub const DEFAULT_WIDGET_AMOUNT: &str = "0.01";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapStrategy {
    /// Calls the router contract directly through the wallet.
    #[default]
    Router,
    /// Embeds the LI.FI widget.
    Widget,
    /// Asks the 0x API for a route, then sends its transaction through the wallet.
    Aggregator,
    /// Sends the user to the Uniswap web app.
    Redirect,
}

pub const SWAP_STRATEGY: SwapStrategy = if cfg!(feature = "widget") {
    SwapStrategy::Widget
} else if cfg!(feature = "aggregator") {
    SwapStrategy::Aggregator
} else if cfg!(feature = "redirect") {
    SwapStrategy::Redirect
} else {
    SwapStrategy::Router
};

impl SwapStrategy {
    /// Whether submitting goes through the connected wallet.
    pub const fn needs_wallet(&self) -> bool {
        matches!(self, SwapStrategy::Router | SwapStrategy::Aggregator)
    }

    /// Only the direct router call lets the user pick a pool.
    pub const fn has_fee_tier(&self) -> bool {
        matches!(self, SwapStrategy::Router)
    }

    pub const fn button_label(&self) -> &'static str {
        match self {
            SwapStrategy::Router | SwapStrategy::Aggregator => "Swap",
            SwapStrategy::Widget => "Open Swap",
            SwapStrategy::Redirect => "Swap on Uniswap",
        }
    }

    /// What the submit button says, and whether it can be pressed.
    ///
    /// When the wallet is required but missing the button connects instead, so it stays
    /// enabled regardless of the amount.
    pub fn button_state(
        &self,
        connected: bool,
        input: Option<Decimal>,
        has_price: bool,
        busy: bool,
    ) -> ButtonState {
        let has_amount = input.is_some_and(|amount| amount > Decimal::ZERO);

        if self.needs_wallet() && !connected {
            return ButtonState::enabled("Connect Wallet");
        }
        if busy {
            return ButtonState::disabled("Swapping...");
        }

        match self {
            SwapStrategy::Router if !has_price => ButtonState::disabled("Loading price..."),
            SwapStrategy::Router | SwapStrategy::Aggregator if !has_amount => {
                ButtonState::disabled("Enter an amount")
            }
            _ => ButtonState::enabled(self.button_label()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub label: &'static str,
    pub disabled: bool,
}

impl ButtonState {
    const fn enabled(label: &'static str) -> Self {
        Self {
            label,
            disabled: false,
        }
    }

    const fn disabled(label: &'static str) -> Self {
        Self {
            label,
            disabled: true,
        }
    }
}

fn parse(base: &str) -> Result<Url, Error> {
    Url::parse(base).map_err(|error| Error::generic(format!("bad url {base}: {error}")))
}

fn amount_or_default(amount: &str) -> &str {
    match amount.trim() {
        "" => DEFAULT_WIDGET_AMOUNT,
        amount => amount,
    }
}

/// LI.FI widget selling the native currency for `token_out`.
pub fn widget_url(
    chain: ChainId,
    token_out: &Token,
    from_address: Option<Address>,
    amount: &str,
) -> Result<Url, Error> {
    let mut url = parse(LIFI_WIDGET_URL)?;
    let chain_id = chain.id().to_string();

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("fromChain", &chain_id)
            .append_pair("toChain", &chain_id)
            .append_pair("fromToken", &NATIVE_SENTINEL.to_string())
            .append_pair("toToken", &token_out.address.to_string());
        if let Some(from_address) = from_address {
            query.append_pair("fromAddress", &from_address.to_string());
        }
        query.append_pair("amount", amount_or_default(amount));
    }

    Ok(url)
}

/// Uniswap web app with the input side pre-filled.
pub fn redirect_url(chain: ChainId, token_out: &Token, amount: &str) -> Result<Url, Error> {
    let mut url = parse(UNISWAP_SWAP_URL)?;

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("chain", chain.slug())
            .append_pair("inputCurrency", "ETH")
            .append_pair("outputCurrency", &token_out.address.to_string());
        if !amount.trim().is_empty() {
            query
                .append_pair("exactAmount", amount.trim())
                .append_pair("exactField", "input");
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::tokens::MINI_TOKEN;
    use alloy_primitives::address;
    use std::collections::HashMap;

    fn query(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    fn amount(input: &str) -> Option<Decimal> {
        crate::quote::parse_amount(input)
    }

    #[test]
    fn zero_or_empty_amount_disables_submit() {
        for strategy in [SwapStrategy::Router, SwapStrategy::Aggregator] {
            for input in ["0", "", "0.000", "-1"] {
                let button = strategy.button_state(true, amount(input), true, false);
                assert!(button.disabled, "{strategy:?} with {input:?}");
                assert_eq!(button.label, "Enter an amount");
            }
        }

        let button = SwapStrategy::Router.button_state(true, amount("0.01"), true, false);
        assert_eq!(button, ButtonState::enabled("Swap"));
    }

    #[test]
    fn missing_wallet_asks_to_connect() {
        for strategy in [SwapStrategy::Router, SwapStrategy::Aggregator] {
            for input in ["", "0.05"] {
                let button = strategy.button_state(false, amount(input), true, false);
                assert_eq!(button.label, "Connect Wallet");
                assert!(!button.disabled);
            }
        }
    }

    #[test]
    fn router_waits_for_a_price_and_for_the_wallet() {
        assert_eq!(
            SwapStrategy::Router.button_state(true, amount("0.01"), false, false),
            ButtonState::disabled("Loading price...")
        );
        // the aggregator prices the route itself
        assert_eq!(
            SwapStrategy::Aggregator.button_state(true, amount("0.01"), false, false),
            ButtonState::enabled("Swap")
        );
        assert_eq!(
            SwapStrategy::Router.button_state(true, amount("0.01"), true, true),
            ButtonState::disabled("Swapping...")
        );
    }

    #[test]
    fn widget_and_redirect_never_need_an_amount() {
        assert_eq!(
            SwapStrategy::Widget.button_state(false, None, false, false),
            ButtonState::enabled("Open Swap")
        );
        assert_eq!(
            SwapStrategy::Redirect.button_state(false, amount("0"), false, false),
            ButtonState::enabled("Swap on Uniswap")
        );
    }

    #[test]
    fn router_is_the_default_strategy() {
        assert_eq!(SwapStrategy::default(), SwapStrategy::Router);
        assert!(SwapStrategy::Router.needs_wallet());
        assert!(SwapStrategy::Router.has_fee_tier());
        assert!(!SwapStrategy::Redirect.needs_wallet());
        assert!(!SwapStrategy::Aggregator.has_fee_tier());
    }

    #[test]
    fn widget_url_carries_the_swap() {
        let account = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        let url = widget_url(ChainId::Base, &MINI_TOKEN, Some(account), "0.05").unwrap();
        let params = query(&url);

        assert!(url.as_str().starts_with(LIFI_WIDGET_URL));
        assert_eq!(params["fromChain"], "8453");
        assert_eq!(params["toChain"], "8453");
        assert_eq!(
            params["fromToken"].to_lowercase(),
            "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"
        );
        assert_eq!(params["toToken"], MINI_TOKEN.address.to_string());
        assert_eq!(params["fromAddress"], account.to_string());
        assert_eq!(params["amount"], "0.05");
    }

    #[test]
    fn widget_url_defaults_the_amount_and_skips_a_missing_address() {
        let url = widget_url(ChainId::Base, &MINI_TOKEN, None, "  ").unwrap();
        let params = query(&url);
        assert_eq!(params["amount"], DEFAULT_WIDGET_AMOUNT);
        assert!(!params.contains_key("fromAddress"));
    }

    #[test]
    fn redirect_url_prefills_the_input() {
        let url = redirect_url(ChainId::Base, &MINI_TOKEN, "0.1").unwrap();
        let params = query(&url);

        assert!(url.as_str().starts_with(UNISWAP_SWAP_URL));
        assert_eq!(params["chain"], "base");
        assert_eq!(params["inputCurrency"], "ETH");
        assert_eq!(params["outputCurrency"], MINI_TOKEN.address.to_string());
        assert_eq!(params["exactAmount"], "0.1");
        assert_eq!(params["exactField"], "input");

        let url = redirect_url(ChainId::Base, &MINI_TOKEN, "").unwrap();
        assert!(!query(&url).contains_key("exactAmount"));
    }
}
