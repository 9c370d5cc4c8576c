use crate::constants::{CHART_EMBED_URL, DEXSCREENER_URL};
use leptos::prelude::*;
use lucide_leptos::ExternalLink;
use mini_sdk::constants::tokens::MINI_TOKEN;
use tracing::info;

#[component]
pub fn PriceChart() -> impl IntoView {
    info!("rendering <PriceChart/>");

    on_cleanup(move || {
        info!("cleaning up <PriceChart/>");
    });

    view! {
        <div class="rounded-lg shadow-sm bg-card text-card-foreground border border-solid border-border overflow-hidden">
            <div class="p-4 flex justify-between items-center">
                <h2 class="m-0">{MINI_TOKEN.symbol}" Chart"</h2>
                <a
                    href=DEXSCREENER_URL.as_str()
                    target="_blank"
                    rel="noopener noreferrer"
                    class="inline-flex items-center gap-1 text-sm"
                >
                    "Open in DEXScreener"
                    <ExternalLink size=12 />
                </a>
            </div>
            <iframe
                src=CHART_EMBED_URL.as_str()
                title="Price chart"
                class="w-full h-[420px] border-0"
            ></iframe>
        </div>
    }
}
