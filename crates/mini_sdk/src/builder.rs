use crate::{
    constants::{
        addrs::{get_deployed_contracts, DeployedContracts},
        tokens::{Token, MINI_TOKEN, NATIVE_DECIMALS},
        FeeTier, CHAIN,
    },
    quote::{quote_exact_input, PriceQuote, SwapQuote},
    router::{encode_exact_input_single, to_abi_uint, ExactInputSingle, SwapTransaction},
    units::parse_units,
    Error,
};
use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the user asked for when pressing "Swap".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapRequest {
    /// Native currency to sell, in whole units.
    pub input_amount: Decimal,
    pub fee_tier: FeeTier,
    pub slippage_bps: u16,
}

impl SwapRequest {
    pub fn new(input_amount: Decimal, fee_tier: FeeTier, slippage_bps: u16) -> Self {
        Self {
            input_amount,
            fee_tier,
            slippage_bps,
        }
    }
}

/// Everything outside the request that building depends on: the connected account, the
/// cached price and the deployment being targeted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapContext {
    pub recipient: Option<Address>,
    pub price: Option<PriceQuote>,
    pub contracts: DeployedContracts,
    pub token_out: Token,
}

impl SwapContext {
    pub fn new(recipient: Option<Address>, price: Option<PriceQuote>) -> Self {
        Self {
            recipient,
            price,
            contracts: get_deployed_contracts(CHAIN),
            token_out: MINI_TOKEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSwap {
    pub transaction: SwapTransaction,
    pub quote: SwapQuote,
    pub fee_tier: FeeTier,
}

/// Builds the router transaction for `request`.
pub fn build(request: &SwapRequest, context: &SwapContext) -> Result<SwapTransaction, Error> {
    prepare(request, context).map(|prepared| prepared.transaction)
}

/// Same as [`build`], keeping the amounts it was derived from.
pub fn prepare(request: &SwapRequest, context: &SwapContext) -> Result<PreparedSwap, Error> {
    if request.input_amount <= Decimal::ZERO {
        return Err(Error::invalid_input("enter an amount greater than zero"));
    }
    let Some(recipient) = context.recipient else {
        return Err(Error::invalid_input("wallet is not connected"));
    };
    let Some(price) = context.price else {
        return Err(Error::invalid_input("price is not available yet"));
    };

    let amount_in = parse_units(request.input_amount.to_string(), NATIVE_DECIMALS)?;

    let quote = quote_exact_input(
        amount_in,
        price.price,
        NATIVE_DECIMALS,
        context.token_out.decimals,
        request.slippage_bps,
    )
    .map_err(|error| match error {
        Error::PriceUnavailable => Error::invalid_input("price is not available yet"),
        other => other,
    })?;

    let call = ExactInputSingle {
        token_in: context.contracts.weth,
        token_out: context.token_out.address,
        fee: request.fee_tier.fee(),
        recipient,
        amount_in: to_abi_uint(quote.amount_in),
        amount_out_minimum: to_abi_uint(quote.amount_out_minimum),
    };

    let transaction = SwapTransaction {
        to: context.contracts.swap_router,
        data: encode_exact_input_single(call),
        value: to_abi_uint(quote.amount_in),
    };

    debug!("{transaction:#?}");

    Ok(PreparedSwap {
        transaction,
        quote,
        fee_tier: request.fee_tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::decode_exact_input_single;
    use alloy_primitives::{address, U256};
    use std::str::FromStr;

    const ACCOUNT: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn context() -> SwapContext {
        SwapContext::new(
            Some(ACCOUNT),
            Some(PriceQuote::new(dec("0.0000005"), 1_700_000_000_000)),
        )
    }

    #[test]
    fn builds_a_payable_router_call() {
        let request = SwapRequest::new(dec("0.01"), FeeTier::High, 1_000);
        let tx = build(&request, &context()).unwrap();

        let contracts = get_deployed_contracts(CHAIN);
        assert_eq!(tx.to, contracts.swap_router);
        assert_eq!(tx.value, U256::from(10_000_000_000_000_000u128));

        let call = decode_exact_input_single(&tx.data).unwrap();
        assert_eq!(call.token_in, contracts.weth);
        assert_eq!(call.token_out, MINI_TOKEN.address);
        assert_eq!(call.fee, 10_000);
        assert_eq!(call.recipient, ACCOUNT);
        assert_eq!(call.amount_in, tx.value);
        assert_eq!(
            call.amount_out_minimum,
            U256::from(18_000_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn value_is_the_exact_smallest_unit_amount() {
        for amount in ["0.01", "0.05", "0.1", "0.25", "1.000000000000000001"] {
            let request = SwapRequest::new(dec(amount), FeeTier::Standard, 500);
            let prepared = prepare(&request, &context()).unwrap();
            let expected = to_abi_uint(parse_units(amount, 18).unwrap());
            assert_eq!(prepared.transaction.value, expected, "{amount}");
        }
    }

    #[test]
    fn fee_tier_is_encoded_as_chosen() {
        for tier in FeeTier::ALL {
            let request = SwapRequest::new(dec("0.1"), tier, 1_000);
            let tx = build(&request, &context()).unwrap();
            assert_eq!(decode_exact_input_single(&tx.data).unwrap().fee, tier.fee());
        }
    }

    #[test]
    fn zero_amount_is_invalid() {
        let request = SwapRequest::new(Decimal::ZERO, FeeTier::High, 1_000);
        assert!(matches!(build(&request, &context()), Err(Error::InvalidInput(_))));

        let request = SwapRequest::new(dec("-0.5"), FeeTier::High, 1_000);
        assert!(matches!(build(&request, &context()), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn disconnected_wallet_is_invalid() {
        let request = SwapRequest::new(dec("0.01"), FeeTier::High, 1_000);
        let context = SwapContext {
            recipient: None,
            ..context()
        };
        assert_eq!(
            build(&request, &context),
            Err(Error::invalid_input("wallet is not connected"))
        );
    }

    #[test]
    fn missing_price_is_invalid() {
        let request = SwapRequest::new(dec("0.01"), FeeTier::High, 1_000);
        let context = SwapContext {
            price: None,
            ..context()
        };
        assert!(matches!(build(&request, &context), Err(Error::InvalidInput(_))));

        let context = SwapContext {
            price: Some(PriceQuote::new(Decimal::ZERO, 0)),
            ..context
        };
        assert!(matches!(build(&request, &context), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn too_many_decimals_are_rejected_rather_than_rounded() {
        let request = SwapRequest::new(dec("0.0000000000000000001"), FeeTier::High, 1_000);
        assert!(matches!(build(&request, &context()), Err(Error::InvalidInput(_))));
    }
}
