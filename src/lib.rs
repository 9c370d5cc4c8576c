use codee::string::FromToStringCodec;
use eip1193::Ethereum;
use leptos::{ev::MouseEvent, prelude::*, task::spawn_local};
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router_macro::path;
use leptos_use::{
    storage::use_local_storage, use_interval_fn_with_options, UseIntervalFnOptions,
};
use lucide_leptos::{LogOut, TriangleAlert};
use mini_sdk::constants::{tokens::MINI_TOKEN, CHAIN};
use tracing::{debug, error, info, warn};
use web_api::dexscreener::fetch_price_quote;

mod components;
mod constants;
mod routes;
mod state;
mod swap;
mod utils;

pub use mini_sdk::Error;

use components::LoadingModal;
use constants::{PRICE_REFRESH_INTERVAL_MS, WALLET_STORAGE_KEY};
use routes::Home;
use state::{BalanceSignals, ConnectWallet, PriceFeed, WalletSignals};
use utils::{alert, now_ms, shorten_address};

#[component]
pub fn App() -> impl IntoView {
    info!("rendering <App/>");

    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Global Contexts

    let wallet = WalletSignals::new();
    let price_feed = PriceFeed::new();

    provide_context(wallet);
    provide_context(price_feed);
    provide_context(BalanceSignals::new(wallet));

    let (remember_wallet, set_remember_wallet, _) =
        use_local_storage::<bool, FromToStringCodec>(WALLET_STORAGE_KEY);

    Effect::new(move |_| debug!("Account: {:?}", wallet.address.get()));
    Effect::new(move |_| info!("Chain ID set to {:?}", wallet.chain_id.get()));

    // Actions

    let connect = ConnectWallet(Action::new_local(move |_: &()| async move {
        debug!("Requesting accounts...");
        let result = Ethereum::connect(CHAIN).await;

        match &result {
            Ok(address) => {
                wallet.address.set(Some(*address));
                wallet.chain_id.set(Some(CHAIN.id()));
                set_remember_wallet.set(true);
                debug!("Connected as {address}");
            }
            Err(eip1193::Error::WalletUnavailable) => {
                alert("No Ethereum wallet found. Install a browser wallet to swap.")
            }
            Err(error) => error!("{error}"),
        }

        result.map_err(Into::into)
    }));

    provide_context(connect);

    let fetch_price = Action::new_local(move |_: &()| async move {
        fetch_price_quote(&reqwest::Client::new(), MINI_TOKEN.address, now_ms()).await
    });

    // a failed refresh keeps the last known price
    Effect::new(move |_| match fetch_price.value().get() {
        Some(Ok(quote)) => price_feed.quote.set(Some(quote)),
        Some(Err(error)) => warn!("Price refresh failed: {error}"),
        None => {}
    });

    let _ = use_interval_fn_with_options(
        move || {
            fetch_price.dispatch(());
        },
        PRICE_REFRESH_INTERVAL_MS,
        UseIntervalFnOptions::default().immediate_callback(true),
    );

    // Restore a previous session without prompting.

    if remember_wallet.get_untracked() {
        spawn_local(async move {
            match Ethereum::accounts().await {
                Ok(accounts) => {
                    if let Some(address) = accounts.first() {
                        wallet.address.set(Some(*address));
                        wallet.chain_id.set(Ethereum::chain_id().await.ok());
                    } else {
                        set_remember_wallet.set(false);
                    }
                }
                Err(error) => debug!("Not reconnecting: {error}"),
            }
        });
    }

    // Event Listeners

    let listeners = [
        Ethereum::on_accounts_changed(move |account| {
            if wallet.address.get_untracked().is_none() {
                return;
            }
            warn!("Wallet account changed. Refetching balances.");
            wallet.address.set(account);
            if account.is_none() {
                set_remember_wallet.set(false);
            }
        }),
        Ethereum::on_chain_changed(move |chain_id| wallet.chain_id.set(chain_id)),
    ]
    .into_iter()
    .filter_map(|listener| {
        listener
            .inspect_err(|error| debug!("No wallet events: {error}"))
            .ok()
    })
    .collect::<Vec<_>>();

    on_cleanup(move || {
        info!("cleaning up <App/>");
        listeners.into_iter().for_each(|listener| listener.remove());
    });

    // on:click handlers

    let connect_wallet = move |_: MouseEvent| {
        connect.dispatch(());
    };

    let disconnect_wallet = move |_: MouseEvent| {
        wallet.disconnect();
        set_remember_wallet.set(false);
    };

    let switch_network = move |_: MouseEvent| {
        spawn_local(async move {
            match Ethereum::switch_chain(CHAIN).await {
                Ok(()) => wallet.chain_id.set(Some(CHAIN.id())),
                Err(error) => error!("{error}"),
            }
        });
    };

    view! {
        <Title text=format!("{} | Swap", MINI_TOKEN.symbol) />
        <Router>
            <header>
                <div class="flex justify-between items-center">
                    <div
                        id="mainTitle"
                        class="my-2 font-bold text-3xl line-clamp-1 transition-transform duration-300"
                    >
                        "$"
                        {MINI_TOKEN.symbol}
                    </div>
                    <div class="flex gap-1">
                        <Show
                            when=move || wallet.is_connected()
                            fallback=move || {
                                view! {
                                    <button
                                        on:click=connect_wallet
                                        disabled=connect.pending()
                                        class="min-w-24 text-sm font-semibold leading-none py-[5px] px-[12px] inline-flex justify-center items-center align-middle"
                                    >
                                        "Connect Wallet"
                                    </button>
                                }
                            }
                        >
                            <p class="m-0 text-sm font-semibold leading-none py-[5px] px-[12px] inline-flex items-center">
                                {move || wallet.address.get().map(shorten_address)}
                            </p>
                            <button
                                title="Disconnect"
                                on:click=disconnect_wallet
                                class="text-sm leading-none py-[5px] px-[8px] inline-flex justify-center items-center"
                            >
                                <LogOut size=16 />
                            </button>
                        </Show>
                    </div>
                </div>
                <Show when=move || wallet.is_wrong_chain()>
                    <div class="flex items-center justify-between gap-2 px-4 py-2 text-sm font-semibold text-white bg-red-500/90 rounded-md">
                        <div class="flex items-center gap-2">
                            <TriangleAlert size=16 />
                            {format!("Wrong network. Swaps run on {}.", CHAIN.name())}
                        </div>
                        <button on:click=switch_network class="text-xs py-1 px-2">
                            "Switch"
                        </button>
                    </div>
                </Show>
                <hr />
            </header>
            <main class="p-2 overflow-x-auto">
                <Routes transition=true fallback=|| "This page could not be found.">
                    <Route path=path!("/") view=Home />
                </Routes>
            </main>
            <LoadingModal when=connect.pending() message="Requesting Connection" />
        </Router>
    }
}
