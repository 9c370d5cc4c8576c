use crate::{
    constants::{DEXSCREENER_URL, EXPLORER_TOKEN_URL},
    state::PriceFeed,
};
use leptos::{ev::MouseEvent, prelude::*};
use leptos_use::{use_clipboard, UseClipboardReturn};
use lucide_leptos::{Check, ClipboardCopy, ExternalLink};
use mini_sdk::constants::{
    tokens::{MINI_TOKEN, MINI_TOTAL_SUPPLY},
    CHAIN,
};
use tracing::info;

#[component]
pub fn TokenInfo() -> impl IntoView {
    info!("rendering <TokenInfo/>");

    on_cleanup(move || {
        info!("cleaning up <TokenInfo/>");
    });

    let price_feed = use_context::<PriceFeed>().expect("price feed context missing!");

    let UseClipboardReturn {
        is_supported,
        copy,
        copied,
        ..
    } = use_clipboard();

    let contract_address = MINI_TOKEN.address.to_string();
    let copy_address = {
        let contract_address = contract_address.clone();
        move |_: MouseEvent| copy(&contract_address)
    };

    let price_usd = move || {
        price_feed
            .price_usd()
            .map(|price| format!("${}", price.normalize()))
            .unwrap_or("-".to_string())
    };

    let row = |label: &'static str, value: AnyView| {
        view! {
            <div class="w-full flex flex-row justify-between items-center text-sm">
                <p class="m-0 text-muted-foreground">{label}</p>
                <div class="m-0 text-foreground font-semibold">{value}</div>
            </div>
        }
    };

    view! {
        <div class="rounded-lg shadow-sm bg-card text-card-foreground border border-solid border-border">
            <div class="p-6 pb-2">
                <h2 class="m-0">"Token Info"</h2>
            </div>
            <div class="px-6 pb-6 flex flex-col gap-2">
                {row("Name", MINI_TOKEN.name.into_any())}
                {row("Symbol", MINI_TOKEN.symbol.into_any())}
                {row("Network", CHAIN.name().into_any())}
                {row("Total Supply", MINI_TOTAL_SUPPLY.into_any())}
                {row("Price", (move || price_usd()).into_any())}
                <div class="flex flex-col gap-1 text-sm">
                    <p class="m-0 text-muted-foreground">"Contract"</p>
                    <div class="flex items-center justify-between gap-2 px-3 py-2 bg-muted rounded-md">
                        <code class="text-xs break-all">{contract_address}</code>
                        <Show when=move || is_supported.get()>
                            <button
                                title="Copy address"
                                on:click=copy_address.clone()
                                class="inline-flex items-center justify-center w-8 h-8 p-0 rounded-md border-0 bg-transparent"
                            >
                                <Show when=move || copied.get() fallback=|| view! { <ClipboardCopy size=16 /> }>
                                    <Check size=16 />
                                </Show>
                            </button>
                        </Show>
                    </div>
                </div>
                <div class="flex gap-4 pt-2 text-sm">
                    <a
                        href=DEXSCREENER_URL.as_str()
                        target="_blank"
                        rel="noopener noreferrer"
                        class="inline-flex items-center gap-1"
                    >
                        "DEXScreener"
                        <ExternalLink size=12 />
                    </a>
                    <a
                        href=EXPLORER_TOKEN_URL.as_str()
                        target="_blank"
                        rel="noopener noreferrer"
                        class="inline-flex items-center gap-1"
                    >
                        "Basescan"
                        <ExternalLink size=12 />
                    </a>
                </div>
            </div>
        </div>
    }
}
