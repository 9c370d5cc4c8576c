use crate::constants::SLIPPAGE_PRESETS;
use leptos::{ev, html, prelude::*};
use lucide_leptos::{Info, X};
use mini_sdk::constants::{FeeTier, DEFAULT_SLIPPAGE_BPS, MAX_SLIPPAGE_BPS};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::str::FromStr;
use tracing::info;

/// `1000` -> `"10"`, `50` -> `"0.5"`
pub fn bps_to_percent(bps: u16) -> String {
    Decimal::new(bps as i64, 2).normalize().to_string()
}

/// Parses a percentage typed by the user into basis points, capped at the maximum.
pub fn percent_to_bps(percent: &str) -> Option<u16> {
    let percent = Decimal::from_str(percent.trim().replace(',', ".").as_str()).ok()?;
    if percent.is_sign_negative() {
        return None;
    }
    let bps = (percent * Decimal::ONE_HUNDRED).round().to_u32()?;
    Some(bps.min(MAX_SLIPPAGE_BPS as u32) as u16)
}

#[component]
pub fn SwapSettings(
    dialog_ref: NodeRef<html::Dialog>,
    toggle_menu: impl Fn(ev::MouseEvent) + 'static,
    slippage: (Signal<u16>, WriteSignal<u16>),
    fee_tier: (Signal<u32>, WriteSignal<u32>),
    show_fee_tier: bool,
) -> impl IntoView {
    info!("rendering <SwapSettings/>");

    let selected_tier = move || FeeTier::from_fee(fee_tier.0.get()).unwrap_or_default();

    view! {
        <div class="floating-menu">
            <dialog
                node_ref=dialog_ref
                class="z-40 mt-1.5 -mr-0 md:-mr-[124px] w-80 p-0 shadow-md bg-background text-foreground rounded-md border border-solid border-border"
            >
                <div class="relative flex flex-col z-auto">
                    <div class="flex justify-between items-center p-2 pl-3 text-popover-foreground border-0 border-b border-solid border-border">
                        <p class="m-0">"Settings"</p>
                        <button
                            autofocus
                            on:click=toggle_menu
                            class="appearance-none border-0
                            flex shrink-0 items-center justify-center w-6 h-6 p-1 box-border rounded-md
                            bg-transparent hover:bg-muted transition-colors duration-200 ease-standard
                            "
                        >
                            <X size=16 />
                        </button>
                    </div>
                    <div class="px-3 py-4 box-border">
                        <div class="flex flex-col items-start gap-4 w-full">
                            <div class="flex flex-col items-start gap-2 w-full">
                                <div class="flex flex-row items-center justify-between gap-2 w-full">
                                    <p class="text-muted-foreground text-sm m-0">
                                        "Slippage tolerance"
                                    </p>
                                    <div class="relative group focus-within:group">
                                        <div
                                            tabindex="0"
                                            class="text-foreground focus:outline-none"
                                        >
                                            <Info size=16 />
                                        </div>
                                        <div class="absolute w-[200px] z-50 bottom-full right-0 lg:right-1/2 translate-x-0 lg:translate-x-1/2
                                        bg-popover text-popover-foreground text-xs font-normal rounded-md border border-solid
                                        mb-1 p-2 invisible opacity-0 transition-opacity duration-100 ease-in
                                        group-hover:visible group-hover:opacity-100 group-focus-within:visible group-focus-within:opacity-100">
                                            "Your transaction will revert if you would receive less than this percentage below the estimate."
                                        </div>
                                    </div>
                                </div>
                                <div class="flex flex-row items-center gap-2">
                                    <div class="flex flex-row items-center gap-1">
                                        {SLIPPAGE_PRESETS
                                            .into_iter()
                                            .map(|bps| {
                                                view! {
                                                    <button
                                                        on:click=move |_| slippage.1.set(bps)
                                                        class="h-8 min-w-8 w-16 text-sm font-semibold bg-secondary text-secondary-foreground rounded-md"
                                                        class=("ring-1", move || slippage.0.get() == bps)
                                                    >
                                                        {bps_to_percent(bps)}
                                                        "%"
                                                    </button>
                                                }
                                            })
                                            .collect_view()}
                                    </div>
                                    <div class="w-full relative flex items-center isolate box-border">
                                        <input
                                            class="w-full box-border px-3 h-8 text-sm font-semibold bg-transparent text-popover-foreground rounded-md"
                                            inputmode="decimal"
                                            minlength="1"
                                            maxlength="79"
                                            type="text"
                                            pattern="^[0-9]*[.,]?[0-9]*$"
                                            prop:value=move || bps_to_percent(slippage.0.get())
                                            on:change=move |ev| {
                                                let value = percent_to_bps(&event_target_value(&ev))
                                                    .unwrap_or(DEFAULT_SLIPPAGE_BPS);
                                                slippage.1.set(value)
                                            }
                                        />
                                        <div class="absolute right-0 top-0 w-8 h-8 z-[2] flex items-center justify-center text-popover-foreground">
                                            "%"
                                        </div>
                                    </div>
                                </div>
                            </div>
                            <Show when=move || show_fee_tier>
                                <div class="flex flex-col items-start gap-2 w-full">
                                    <p class="text-muted-foreground text-sm m-0">"Pool fee tier"</p>
                                    <select
                                        class="w-full h-8 px-3 text-sm font-semibold bg-transparent text-popover-foreground rounded-md"
                                        prop:value=move || selected_tier().fee().to_string()
                                        on:change=move |ev| {
                                            let fee = event_target_value(&ev)
                                                .parse::<u32>()
                                                .ok()
                                                .and_then(FeeTier::from_fee)
                                                .unwrap_or_default();
                                            fee_tier.1.set(fee.fee())
                                        }
                                    >
                                        {FeeTier::ALL
                                            .into_iter()
                                            .map(|tier| {
                                                view! {
                                                    <option value=tier.fee().to_string()>
                                                        {tier.label()}
                                                    </option>
                                                }
                                            })
                                            .collect_view()}
                                    </select>
                                    <p class="text-muted-foreground text-xs m-0">
                                        "If a swap reverts, the pool may use a different fee tier."
                                    </p>
                                </div>
                            </Show>
                        </div>
                    </div>
                </div>
            </dialog>
        </div>
    }
}
