use crate::Error;
use alloy_primitives::Address;
use eip1193::Ethereum;
use ethnum::U256;
use leptos::prelude::*;
use mini_sdk::{
    constants::{tokens::MINI_TOKEN, CHAIN},
    quote::PriceQuote,
    router::from_abi_uint,
};
use rust_decimal::Decimal;
use std::ops::Deref;
use tracing::trace;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WalletSignals {
    pub address: RwSignal<Option<Address>>,
    pub chain_id: RwSignal<Option<u64>>,
}

impl WalletSignals {
    pub fn new() -> Self {
        Self {
            address: RwSignal::new(None),
            chain_id: RwSignal::new(None),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.address.get().is_some()
    }

    pub fn is_wrong_chain(&self) -> bool {
        self.chain_id
            .get()
            .is_some_and(|chain_id| chain_id != CHAIN.id())
    }

    pub fn disconnect(&self) {
        self.address.set(None);
        self.chain_id.set(None);
    }
}

impl Default for WalletSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatches the connect prompt. Resolves with the selected account.
#[derive(Copy, Clone)]
pub struct ConnectWallet(pub Action<(), Result<Address, Error>, LocalStorage>);

impl Deref for ConnectWallet {
    type Target = Action<(), Result<Address, Error>, LocalStorage>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Latest known token price. Failed refreshes leave it untouched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PriceFeed {
    pub quote: RwSignal<Option<PriceQuote>>,
}

impl PriceFeed {
    pub fn new() -> Self {
        Self {
            quote: RwSignal::new(None),
        }
    }

    pub fn latest(&self) -> Option<PriceQuote> {
        self.quote.get()
    }

    pub fn price(&self) -> Option<Decimal> {
        self.quote.get().map(|quote| quote.price)
    }

    pub fn price_usd(&self) -> Option<Decimal> {
        self.quote.get().and_then(|quote| quote.price_usd)
    }
}

impl Default for PriceFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Native and MINI balances of the connected account, in smallest units.
#[derive(Copy, Clone)]
pub struct BalanceSignals {
    pub refresh: RwSignal<u32>,
    pub native: AsyncDerived<Result<Option<U256>, Error>, LocalStorage>,
    pub mini: AsyncDerived<Result<Option<U256>, Error>, LocalStorage>,
}

impl BalanceSignals {
    pub fn new(wallet: WalletSignals) -> Self {
        let refresh = RwSignal::new(0u32);

        let native = AsyncDerived::new_unsync(move || {
            refresh.track();
            let address = wallet.address.get();
            async move {
                let Some(address) = address else {
                    return Ok(None);
                };
                trace!("Updating native balance (derived signal)");
                Ethereum::get_balance(address)
                    .await
                    .map(|balance| Some(from_abi_uint(balance)))
                    .map_err(Into::into)
            }
        });

        let mini = AsyncDerived::new_unsync(move || {
            refresh.track();
            let address = wallet.address.get();
            async move {
                let Some(address) = address else {
                    return Ok(None);
                };
                trace!("Updating {} balance (derived signal)", MINI_TOKEN.symbol);
                Ethereum::token_balance(MINI_TOKEN.address, address)
                    .await
                    .map(|balance| Some(from_abi_uint(balance)))
                    .map_err(Into::into)
            }
        });

        Self {
            refresh,
            native,
            mini,
        }
    }

    /// Re-runs both balance queries.
    pub fn refresh(&self) {
        self.refresh.update(|count| *count = count.wrapping_add(1));
    }
}
