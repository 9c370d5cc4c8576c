use crate::constants::explorer_tx_url;
use leptos::prelude::*;
use lucide_leptos::{CircleAlert, CircleCheck, ExternalLink};
use mini_sdk::submitter::{FailureReason, TransactionState};

fn failure_message(reason: FailureReason) -> &'static str {
    match reason {
        FailureReason::Cancelled => "Transaction cancelled in wallet",
        FailureReason::Reverted => "Swap reverted. Try another fee tier or a higher slippage.",
        FailureReason::Unknown => "Swap failed. Please try again.",
    }
}

/// Transient feedback under the swap button. Errors raised before submission show up while
/// the transaction state is still `Idle`.
#[component]
pub fn StatusBanner(
    #[prop(into)] state: Signal<TransactionState>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    let tx_link = move |hash: String| {
        view! {
            <a
                href=explorer_tx_url(&hash)
                target="_blank"
                rel="noopener noreferrer"
                class="inline-flex items-center gap-1 underline"
            >
                "View transaction"
                <ExternalLink size=12 />
            </a>
        }
    };

    move || match state.get() {
        TransactionState::Idle => error
            .get()
            .map(|message| {
                view! {
                    <div class="flex items-center gap-2 px-4 py-2 text-sm font-semibold text-white bg-red-500/90 rounded-md">
                        <CircleAlert size=16 />
                        <p class="m-0">{message}</p>
                    </div>
                }
            })
            .into_any(),
        TransactionState::Pending(None) => view! {
            <div class="px-4 py-2 text-sm text-muted-foreground bg-muted rounded-md">
                "Confirm the swap in your wallet..."
            </div>
        }
        .into_any(),
        TransactionState::Pending(Some(hash)) => view! {
            <div class="flex justify-between items-center px-4 py-2 text-sm text-muted-foreground bg-muted rounded-md">
                <p class="m-0">"Waiting for confirmation..."</p>
                {tx_link(hash.to_string())}
            </div>
        }
        .into_any(),
        TransactionState::Confirmed(hash) => view! {
            <div class="flex justify-between items-center px-4 py-2 text-sm font-semibold text-white bg-green-600/90 rounded-md">
                <div class="flex items-center gap-2">
                    <CircleCheck size=16 />
                    <p class="m-0">"Swap confirmed!"</p>
                </div>
                {tx_link(hash.to_string())}
            </div>
        }
        .into_any(),
        TransactionState::Failed(reason) => {
            let message = error.get().unwrap_or(failure_message(reason).to_string());
            view! {
                <div class="flex items-center gap-2 px-4 py-2 text-sm font-semibold text-white bg-red-500/90 rounded-md">
                    <CircleAlert size=16 />
                    <p class="m-0">{message}</p>
                </div>
            }
            .into_any()
        }
    }
}
