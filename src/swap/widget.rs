use crate::state::WalletSignals;
use leptos::prelude::*;
use lucide_leptos::X;
use mini_sdk::{
    constants::{tokens::MINI_TOKEN, CHAIN},
    strategy::widget_url,
};
use tracing::{info, warn};

/// Embedded third-party swap widget, pre-filled from the panel.
#[component]
pub fn SwapWidget(
    #[prop(into)] amount: Signal<String>,
    on_close: impl Fn() + Send + Sync + 'static,
) -> impl IntoView {
    info!("rendering <SwapWidget/>");

    on_cleanup(move || {
        info!("cleaning up <SwapWidget/>");
    });

    let wallet = use_context::<WalletSignals>().expect("wallet signals context missing!");

    // only rebuilt when the panel is reopened, so typing doesn't reload the iframe
    let src = widget_url(CHAIN, &MINI_TOKEN, wallet.address.get_untracked(), &amount.get_untracked())
        .map(String::from)
        .inspect_err(|error| warn!("{error}"))
        .unwrap_or_default();

    view! {
        <div class="flex flex-col gap-2">
            <div class="flex justify-end">
                <button
                    title="Close"
                    on:click=move |_| on_close()
                    class="inline-flex items-center justify-center w-8 h-8 p-0 rounded-md border-0 bg-transparent"
                >
                    <X size=16 />
                </button>
            </div>
            <iframe
                src=src
                title="Swap widget"
                class="w-full h-[640px] border-0 rounded-md"
                allow="clipboard-write"
            ></iframe>
        </div>
    }
}
