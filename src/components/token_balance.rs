use crate::Error;
use ethnum::U256;
use leptos::{either::EitherOf3, prelude::*};
use mini_sdk::units::{format_units, format_units_fixed, group_thousands};

pub fn display_balance(balance: U256, decimals: u8, fraction_digits: Option<usize>) -> String {
    match fraction_digits {
        Some(digits) => format_units_fixed(balance, decimals, digits),
        None => group_thousands(&format_units(balance, decimals, 0)),
    }
}

#[component]
pub fn TokenBalance(
    balance: AsyncDerived<Result<Option<U256>, Error>, LocalStorage>,
    decimals: u8,
    symbol: &'static str,
    /// Fixed number of decimals shown. `None` shows a grouped whole number.
    #[prop(optional)]
    fraction_digits: Option<usize>,
    /// Makes the balance clickable.
    #[prop(optional)]
    on_click: Option<Callback<U256>>,
) -> impl IntoView {
    view! {
        <Suspense fallback=|| {
            view! { <div class="py-0 px-2 text-ellipsis text-sm">"Loading..."</div> }
        }>
            {move || Suspend::new(async move {
                match balance.await {
                    Ok(Some(amount)) => {
                        let clickable = on_click.is_some();
                        EitherOf3::A(
                            view! {
                                <div
                                    on:click=move |_| {
                                        if let Some(on_click) = on_click {
                                            on_click.run(amount);
                                        }
                                    }
                                    title=if clickable { "Use max" } else { "" }
                                    class="py-0 px-2 text-sm text-neutral-500 hover:text-neutral-400 rounded transition-all duration-200 ease-standard"
                                    class=("cursor-pointer", clickable)
                                    class=("cursor-default", !clickable)
                                >
                                    <span>"Balance: "</span>
                                    <span class="text-white font-medium">
                                        {display_balance(amount, decimals, fraction_digits)}
                                        " "
                                        {symbol}
                                    </span>
                                </div>
                            },
                        )
                    }
                    Ok(None) => {
                        EitherOf3::B(
                            view! {
                                <div class="py-0 px-2 cursor-default text-ellipsis text-sm">
                                    "Balance: 👀"
                                </div>
                            },
                        )
                    }
                    Err(error) => {
                        EitherOf3::C(
                            view! {
                                <div
                                    title=error.to_string()
                                    class="py-0 px-2 text-gold font-semibold text-sm cursor-default text-ellipsis"
                                >
                                    "Error 🛈"
                                </div>
                            },
                        )
                    }
                }
            })}
        </Suspense>
    }
}
