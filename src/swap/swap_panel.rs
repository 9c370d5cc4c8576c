use super::{SwapDetails, SwapSettings, SwapWidget};
use crate::{
    components::{Spinner, StatusBanner, TokenBalance},
    constants::{
        ESTIMATE_DEBOUNCE_MS, FEE_TIER_STORAGE_KEY, MAX_BALANCE_PERCENT,
        NATIVE_BALANCE_DECIMALS, QUICK_AMOUNTS, SLIPPAGE_STORAGE_KEY,
    },
    state::{BalanceSignals, ConnectWallet, PriceFeed, WalletSignals},
    utils::open_in_new_tab,
    Error,
};
use alloy_primitives::Address;
use codee::string::FromToStringCodec;
use eip1193::{sleep, InjectedWallet};
use ethnum::U256;
use leptos::{ev, html, prelude::*};
use leptos_use::{signal_debounced, storage::use_local_storage};
use lucide_leptos::{ArrowDown, Settings2};
use mini_sdk::{
    builder::{prepare, SwapContext, SwapRequest},
    constants::{
        addrs::NATIVE_SENTINEL,
        tokens::{MINI_TOKEN, NATIVE_DECIMALS, NATIVE_SYMBOL},
        FeeTier, CHAIN, DEFAULT_SLIPPAGE_BPS,
    },
    quote::{display_estimate, estimate_str, parse_amount, quote_exact_input},
    router::{to_abi_uint, SwapTransaction},
    strategy::{redirect_url, SwapStrategy},
    submitter::{
        execute, FailureReason, ReceiptPolling, TransactionEvent, TransactionState,
        DISPLAY_WINDOW,
    },
    units::{format_units, parse_units, percent_of},
};
use rust_decimal::Decimal;
use tracing::{debug, error, info};
use web_api::zerox::{fetch_quote, QuoteRequest};

async fn aggregator_transaction(
    request: SwapRequest,
    taker: Option<Address>,
) -> Result<SwapTransaction, Error> {
    if request.input_amount <= Decimal::ZERO {
        return Err(Error::invalid_input("enter an amount greater than zero"));
    }
    let taker = taker.ok_or_else(|| Error::invalid_input("wallet is not connected"))?;
    let amount_in = parse_units(request.input_amount.to_string(), NATIVE_DECIMALS)?;

    let quote_request = QuoteRequest::new(
        CHAIN,
        NATIVE_SENTINEL,
        MINI_TOKEN.address,
        to_abi_uint(amount_in),
        taker,
        request.slippage_bps,
    );
    let quote = fetch_quote(&reqwest::Client::new(), &quote_request).await?;

    debug!("aggregator quote: {} out", quote.buy_amount);

    Ok(quote.transaction)
}

#[component]
pub fn SwapPanel(strategy: SwapStrategy) -> impl IntoView {
    info!("rendering <SwapPanel/>");

    on_cleanup(move || {
        info!("cleaning up <SwapPanel/>");
    });

    let wallet = use_context::<WalletSignals>().expect("wallet signals context missing!");
    let connect = use_context::<ConnectWallet>().expect("connect wallet context missing!");
    let price_feed = use_context::<PriceFeed>().expect("price feed context missing!");
    let balances = use_context::<BalanceSignals>().expect("balance signals context missing!");

    let (amount, set_amount) = signal(String::default());
    let tx_state = RwSignal::new(TransactionState::Idle);
    let error_message = RwSignal::new(None::<String>);
    let show_widget = RwSignal::new(false);

    // slippage is in basis points
    let (slippage, set_slippage, _) =
        use_local_storage::<u16, FromToStringCodec>(SLIPPAGE_STORAGE_KEY);
    let (fee, set_fee, _) = use_local_storage::<u32, FromToStringCodec>(FEE_TIER_STORAGE_KEY);

    if slippage.get_untracked() == 0 {
        set_slippage.set(DEFAULT_SLIPPAGE_BPS);
    }
    if FeeTier::from_fee(fee.get_untracked()).is_none() {
        set_fee.set(FeeTier::default().fee());
    }

    let fee_tier = Signal::derive(move || FeeTier::from_fee(fee.get()).unwrap_or_default());

    let input_amount =
        Memo::new(move |_| parse_amount(&amount.get()).filter(|amount| *amount > Decimal::ZERO));

    // the estimate and details follow the input once typing pauses
    let settled_amount: Signal<String> = signal_debounced(amount, ESTIMATE_DEBOUNCE_MS);

    let estimate = Memo::new(move |_| estimate_str(&settled_amount.get(), price_feed.price()));

    let quote = Memo::new(move |_| {
        let input = parse_amount(&settled_amount.get()).filter(|amount| *amount > Decimal::ZERO)?;
        let amount_in = parse_units(input.to_string(), NATIVE_DECIMALS).ok()?;
        quote_exact_input(
            amount_in,
            price_feed.price()?,
            NATIVE_DECIMALS,
            MINI_TOKEN.decimals,
            slippage.get(),
        )
        .ok()
    });

    // -- settings menu

    let settings_dialog_ref = NodeRef::<html::Dialog>::new();

    let handle = window_event_listener(ev::keydown, move |ev| {
        if let Some(dialog) = settings_dialog_ref.get() {
            if ev.key() == "Escape" {
                dialog.close();
            }
        }
    });

    on_cleanup(move || handle.remove());

    let toggle_swap_settings = move |_: ev::MouseEvent| {
        if let Some(dialog) = settings_dialog_ref.get() {
            match dialog.open() {
                false => {
                    _ = dialog.show();
                }
                true => dialog.close(),
            }
        }
    };

    // -- terminal states go back to idle after the display window

    let reset_handle = StoredValue::new(None::<TimeoutHandle>);

    let schedule_reset = move || {
        if let Some(handle) = reset_handle.get_value() {
            handle.clear();
        }
        let handle = set_timeout_with_handle(
            move || {
                let previous = tx_state.get_untracked();
                if previous.clears_input() {
                    set_amount.set(String::default());
                }
                tx_state.set(previous.on(TransactionEvent::DisplayElapsed));
                error_message.set(None);
            },
            DISPLAY_WINDOW,
        )
        .ok();
        reset_handle.set_value(handle);
    };

    on_cleanup(move || {
        if let Some(Some(handle)) = reset_handle.try_get_value() {
            handle.clear();
        }
    });

    // -- swap

    let swap = Action::new_local(move |request: &SwapRequest| {
        let request = *request;
        let from = wallet.address.get_untracked();
        let context = SwapContext::new(from, price_feed.quote.get_untracked());

        async move {
            let transaction = match strategy {
                SwapStrategy::Aggregator => aggregator_transaction(request, from).await?,
                _ => prepare(&request, &context)?.transaction,
            };
            let from = from.ok_or_else(|| Error::invalid_input("wallet is not connected"))?;

            execute(
                &InjectedWallet,
                from,
                &transaction,
                ReceiptPolling::default(),
                sleep,
                move |state| tx_state.set(state),
            )
            .await
        }
    });

    Effect::new(move |_| {
        let Some(result) = swap.value().get() else {
            return;
        };

        match result {
            Ok(hash) => {
                info!("swap confirmed: {hash}");
                balances.refresh();
            }
            Err(error) => {
                error!("{error}");
                let explained = matches!(
                    tx_state.get_untracked(),
                    TransactionState::Failed(FailureReason::Cancelled | FailureReason::Reverted)
                );
                if !explained {
                    error_message.set(Some(error.to_string()));
                }
            }
        }

        schedule_reset();
    });

    let busy = move || tx_state.get().is_pending() || swap.pending().get();

    let handle_swap = move |_: ev::MouseEvent| {
        error_message.set(None);

        match strategy {
            SwapStrategy::Router | SwapStrategy::Aggregator => {
                if wallet.address.get_untracked().is_none() {
                    connect.dispatch(());
                    return;
                }
                let Some(input_amount) = input_amount.get_untracked() else {
                    return;
                };
                swap.dispatch(SwapRequest::new(
                    input_amount,
                    fee_tier.get_untracked(),
                    slippage.get_untracked(),
                ));
            }
            SwapStrategy::Widget => show_widget.set(true),
            SwapStrategy::Redirect => {
                match redirect_url(CHAIN, &MINI_TOKEN, &amount.get_untracked()) {
                    Ok(url) => open_in_new_tab(url),
                    Err(error) => error_message.set(Some(error.to_string())),
                }
            }
        }
    };

    let button = Memo::new(move |_| {
        strategy.button_state(
            wallet.is_connected(),
            input_amount.get(),
            price_feed.latest().is_some(),
            busy(),
        )
    });

    let button_disabled = move || {
        let connecting = strategy.needs_wallet() && connect.pending().get();
        button.get().disabled || connecting
    };
    let button_label = move || button.get().label;

    let use_max = Callback::new(move |balance: U256| {
        let max = percent_of(balance, MAX_BALANCE_PERCENT);
        set_amount.set(format_units(max, NATIVE_DECIMALS, NATIVE_DECIMALS as usize));
    });

    let estimate_text = move || match estimate.get() {
        estimate if estimate.is_zero() => String::default(),
        estimate => display_estimate(estimate),
    };

    view! {
        <div class="rounded-lg shadow-sm bg-card text-card-foreground border border-solid border-border">
            // card header
            <div class="p-6 flex justify-between items-center">
                <h2 class="m-0">"Buy "{MINI_TOKEN.symbol}</h2>
                <div class="relative">
                    <button
                        on:click=toggle_swap_settings
                        class="inline-flex items-center justify-center
                        ml-auto w-10 h-10 text-muted-foreground
                        rounded-md border border-solid border-border"
                    >
                        <Settings2 size=16 />
                    </button>
                    <SwapSettings
                        dialog_ref=settings_dialog_ref
                        toggle_menu=toggle_swap_settings
                        slippage=(slippage, set_slippage)
                        fee_tier=(fee, set_fee)
                        show_fee_tier=strategy.has_fee_tier()
                    />
                </div>
            </div>

            // card body
            <Show
                when=move || !show_widget.get()
                fallback=move || {
                    view! {
                        <div class="px-6 pb-6">
                            <SwapWidget amount=amount on_close=move || show_widget.set(false) />
                        </div>
                    }
                }
            >
                <div class="px-6 pb-6 space-y-4">
                    <div class="space-y-2">
                        <div class="flex items-center justify-between">
                            <label class="block text-sm font-medium" for="from-token">
                                "You pay"
                            </label>
                            <TokenBalance
                                balance=balances.native
                                decimals=NATIVE_DECIMALS
                                symbol=NATIVE_SYMBOL
                                fraction_digits=NATIVE_BALANCE_DECIMALS
                                on_click=use_max
                            />
                        </div>
                        <div class="flex justify-between items-center gap-4 h-9">
                            <input
                                id="from-token"
                                type="text"
                                pattern="^[0-9]*[.,]?[0-9]*$"
                                inputmode="decimal"
                                placeholder="0.0"
                                autocomplete="off"
                                class="px-3 py-1 w-full text-sm rounded-md font-normal"
                                prop:value=move || amount.get()
                                on:input=move |ev| set_amount.set(event_target_value(&ev))
                            />
                            <div class="w-[90px] font-medium text-center">{NATIVE_SYMBOL}</div>
                        </div>
                        <div class="flex gap-1">
                            {QUICK_AMOUNTS
                                .into_iter()
                                .map(|quick_amount| {
                                    view! {
                                        <button
                                            on:click=move |_| set_amount.set(quick_amount.to_string())
                                            class="h-7 px-2 text-xs font-semibold bg-secondary text-secondary-foreground rounded-md"
                                        >
                                            {quick_amount}
                                            " "
                                            {NATIVE_SYMBOL}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>

                    <div class="flex items-center gap-0.5 w-full">
                        <hr class="w-full" />
                        <ArrowDown size=15 />
                        <hr class="w-full" />
                    </div>

                    <div class="space-y-2">
                        <div class="flex justify-between leading-none">
                            <label class="block text-sm font-medium" for="to-token">
                                "You receive (estimated)"
                            </label>
                            <TokenBalance
                                balance=balances.mini
                                decimals=MINI_TOKEN.decimals
                                symbol=MINI_TOKEN.symbol
                            />
                        </div>
                        <div class="flex justify-between items-center gap-4 h-9">
                            <input
                                disabled
                                id="to-token"
                                type="text"
                                placeholder="0"
                                class="px-3 py-1 w-full text-sm font-normal rounded-md disabled:cursor-not-allowed"
                                prop:value=estimate_text
                            />
                            <div class="w-[90px] font-medium text-center">{MINI_TOKEN.symbol}</div>
                        </div>
                    </div>

                    <Show when=move || quote.get().is_some()>
                        <SwapDetails
                            quote=quote
                            fee_tier=Signal::derive(move || {
                                strategy.has_fee_tier().then(|| fee_tier.get())
                            })
                            slippage=slippage
                        />
                    </Show>
                </div>

                // card footer
                <div class="px-6 pb-6 space-y-3">
                    <button
                        class="w-full py-2 px-6 bg-primary active:brightness-90 text-primary-foreground text-sm font-medium rounded-md inline-flex items-center justify-center gap-2"
                        disabled=button_disabled
                        on:click=handle_swap
                    >
                        <Show when=busy>
                            <Spinner size="h-4 w-4" />
                        </Show>
                        {button_label}
                    </button>
                    <StatusBanner state=tx_state error=error_message />
                </div>
            </Show>
        </div>
    }
}
