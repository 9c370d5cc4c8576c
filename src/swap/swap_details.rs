use super::swap_settings::bps_to_percent;
use leptos::prelude::*;
use lucide_leptos::{ChevronDown, TriangleAlert};
use mini_sdk::{
    constants::{tokens::MINI_TOKEN, FeeTier},
    quote::SwapQuote,
    units::{format_units, group_thousands},
};
use tracing::info;

/// Slippage above this gets a warning.
const HIGH_SLIPPAGE_BPS: u16 = 1_500;

pub fn display_token_amount(amount: ethnum::U256) -> String {
    group_thousands(&format_units(amount, MINI_TOKEN.decimals, 2))
}

#[component]
pub fn SwapDetails(
    #[prop(into)] quote: Signal<Option<SwapQuote>>,
    #[prop(into)] fee_tier: Signal<Option<FeeTier>>,
    #[prop(into)] slippage: Signal<u16>,
) -> impl IntoView {
    info!("rendering <SwapDetails/>");

    on_cleanup(move || {
        info!("cleaning up <SwapDetails/>");
    });

    let (expanded, set_expanded) = signal(false);

    let expected_output = move || quote.get().map(|quote| display_token_amount(quote.expected_out));
    let minimum_received =
        move || quote.get().map(|quote| display_token_amount(quote.amount_out_minimum));

    let detail = move |label: &'static str, value: AnyView| {
        view! {
            <div class="w-full flex flex-row justify-between text-sm">
                <p class="m-0 text-muted-foreground">{label}</p>
                <p class="m-0 text-foreground font-semibold">{value}</p>
            </div>
        }
    };

    view! {
        <div class="flex flex-col w-full rounded-md box-border border border-solid border-border">
            <div
                class="min-h-[40px] px-4 flex items-center justify-between cursor-pointer"
                on:click=move |_| set_expanded.update(|expanded| *expanded = !*expanded)
            >
                <p class="m-0 text-sm text-white font-semibold">
                    {move || expected_output().map(|amount| format!("≈ {amount} {}", MINI_TOKEN.symbol))}
                </p>
                <div
                    class="flex items-center justify-center transition-transform"
                    class=("rotate-180", move || expanded.get())
                >
                    <ChevronDown size=20 />
                </div>
            </div>

            <div
                class="transition-all ease-standard box-border overflow-hidden"
                class=(["opacity-0", "invisible", "h-0"], move || !expanded.get())
                class=(["opacity-100", "visible"], move || expanded.get())
            >
                <div class="w-full box-border p-4 pt-2 flex flex-col gap-2 items-center">
                    {detail("Expected Output:", (move || expected_output()).into_any())}
                    {detail("Minimum Received:", (move || minimum_received()).into_any())}
                    {detail(
                        "Slippage Tolerance:",
                        (move || format!("{}%", bps_to_percent(slippage.get()))).into_any(),
                    )}
                    <Show when=move || fee_tier.get().is_some()>
                        {detail(
                            "Fee Tier:",
                            (move || fee_tier.get().map(|tier| tier.label())).into_any(),
                        )}
                    </Show>
                </div>
            </div>

            <Show when=move || { slippage.get() > HIGH_SLIPPAGE_BPS }>
                <div class="flex flex-col items-center gap-2 m-2 mt-0">
                    <div class="flex items-center justify-between box-border w-full px-4 py-2 text-sm text-white font-semibold bg-red-500/90 rounded-md">
                        <div class="flex flex-row items-center gap-3">
                            <TriangleAlert size=20 />
                            <p class="m-0">"High Slippage"</p>
                        </div>
                        <p class="m-0">{move || bps_to_percent(slippage.get())}"%"</p>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mini_sdk::units::parse_units;

    #[test]
    fn token_amounts_are_grouped_and_truncated() {
        assert_eq!(display_token_amount(parse_units("18000", 18).unwrap()), "18,000");
        assert_eq!(
            display_token_amount(parse_units("1234.5678", 18).unwrap()),
            "1,234.56"
        );
    }
}
