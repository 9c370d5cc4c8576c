use crate::{
    components::{PriceChart, TokenInfo},
    constants::{CLANKER_URL, DEXSCREENER_URL, EXPLORER_TOKEN_URL, UNISWAP_URL},
    state::PriceFeed,
    swap::SwapPanel,
};
use leptos::prelude::*;
use lucide_leptos::ExternalLink;
use mini_sdk::{
    constants::{
        tokens::{MINI_TOKEN, NATIVE_SYMBOL},
        CHAIN,
    },
    quote::{display_estimate, estimate},
    strategy::SWAP_STRATEGY,
};
use rust_decimal::Decimal;
use tracing::info;

#[component]
pub fn Home() -> impl IntoView {
    info!("rendering <Home/>");

    on_cleanup(move || {
        info!("cleaning up <Home/>");
    });

    let price_feed = use_context::<PriceFeed>().expect("price feed context missing!");

    // tokens per 1 unit of native currency
    let tokens_per_native = move || {
        price_feed
            .price()
            .map(|price| estimate(Decimal::ONE, Some(price)))
            .filter(|tokens| !tokens.is_zero())
            .map(display_estimate)
    };

    let links = [
        ("DEXScreener", DEXSCREENER_URL.as_str()),
        ("Basescan", EXPLORER_TOKEN_URL.as_str()),
        ("Uniswap", UNISWAP_URL.as_str()),
        ("Clanker", CLANKER_URL.as_str()),
    ];

    view! {
        <div class="max-w-5xl mx-auto space-y-8">
            <section class="text-center space-y-3 py-6">
                <h1 class="m-0 text-4xl font-bold">{MINI_TOKEN.name}</h1>
                <p class="m-0 text-muted-foreground">
                    "$"{MINI_TOKEN.symbol}" on "{CHAIN.name()}
                </p>
                <Show when=move || tokens_per_native().is_some()>
                    <p class="m-0 text-sm">
                        "1 "{NATIVE_SYMBOL}" ≈ "{tokens_per_native}" "{MINI_TOKEN.symbol}
                    </p>
                </Show>
            </section>

            <div class="grid gap-6 md:grid-cols-2 items-start">
                <SwapPanel strategy=SWAP_STRATEGY />
                <TokenInfo />
            </div>

            <PriceChart />

            <section class="flex flex-wrap justify-center gap-4 text-sm">
                {links
                    .into_iter()
                    .map(|(label, href)| {
                        view! {
                            <a
                                href=href
                                target="_blank"
                                rel="noopener noreferrer"
                                class="inline-flex items-center gap-1"
                            >
                                {label}
                                <ExternalLink size=12 />
                            </a>
                        }
                    })
                    .collect_view()}
            </section>
        </div>
    }
}
