use crate::{
    constants::BPS_DENOMINATOR,
    units::{group_thousands, pow10},
    Error,
};
use ethnum::U256;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Latest known price of the token, in units of the native currency per token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub price: Decimal,
    pub price_usd: Option<Decimal>,
    /// Unix time in milliseconds.
    pub fetched_at: u64,
}

impl PriceQuote {
    pub fn new(price: Decimal, fetched_at: u64) -> Self {
        Self {
            price,
            price_usd: None,
            fetched_at,
        }
    }

    pub fn with_usd(mut self, price_usd: Option<Decimal>) -> Self {
        self.price_usd = price_usd;
        self
    }
}

/// Parses what the user typed into the amount field. Empty or malformed input is `None`.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let input = input.trim().replace(',', ".");
    if input.is_empty() {
        return None;
    }
    Decimal::from_str(&input).ok()
}

/// Display-only estimate of the tokens received for `input` native currency.
///
/// Returns zero when the input is not positive or the price is unknown.
pub fn estimate(input: Decimal, price: Option<Decimal>) -> Decimal {
    let Some(price) = price.filter(|price| price.is_sign_positive() && !price.is_zero()) else {
        return Decimal::ZERO;
    };
    if input <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    input
        .checked_div(price)
        .map(|out| out.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .map(|out| out.normalize())
        .unwrap_or(Decimal::ZERO)
}

/// [`estimate`] over the raw text of the amount field.
pub fn estimate_str(input: &str, price: Option<Decimal>) -> Decimal {
    parse_amount(input)
        .map(|amount| estimate(amount, price))
        .unwrap_or(Decimal::ZERO)
}

/// "20,000" style rendering of an estimate.
pub fn display_estimate(estimate: Decimal) -> String {
    group_thousands(&estimate.normalize().to_string())
}

/// Amounts in smallest units that a swap is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub amount_in: U256,
    pub expected_out: U256,
    /// Floor enforced on-chain by the router.
    pub amount_out_minimum: U256,
}

/// `amount * (10000 - slippage_bps) / 10000`, floored.
pub fn apply_slippage(amount: U256, slippage_bps: u16) -> Result<U256, Error> {
    let slippage_bps = slippage_bps as u32;
    if slippage_bps > BPS_DENOMINATOR {
        return Err(Error::invalid_input("slippage cannot exceed 100%"));
    }

    let keep = U256::new((BPS_DENOMINATOR - slippage_bps) as u128);
    let denominator = U256::new(BPS_DENOMINATOR as u128);

    // split to avoid overflowing on very large amounts
    Ok(amount / denominator * keep + amount % denominator * keep / denominator)
}

/// Computes the exact expected output and the slippage-protected minimum for selling
/// `amount_in` (smallest units of the native currency) at `price` (native per token).
pub fn quote_exact_input(
    amount_in: U256,
    price: Decimal,
    in_decimals: u8,
    out_decimals: u8,
    slippage_bps: u16,
) -> Result<SwapQuote, Error> {
    if amount_in == U256::ZERO {
        return Err(Error::invalid_input("amount must be greater than zero"));
    }
    if price.is_sign_negative() || price.is_zero() {
        return Err(Error::PriceUnavailable);
    }

    // price = mantissa / 10^scale, so amount / price = amount * 10^scale / mantissa
    let mantissa = U256::new(price.mantissa().unsigned_abs());
    let scale = price.scale() as u8;

    let (numerator_shift, denominator_shift) = if out_decimals >= in_decimals {
        (out_decimals - in_decimals, 0)
    } else {
        (0, in_decimals - out_decimals)
    };

    let too_large = || Error::invalid_input("amount is too large");

    let numerator = amount_in
        .checked_mul(pow10(scale))
        .and_then(|n| n.checked_mul(pow10(numerator_shift)))
        .ok_or_else(too_large)?;
    let denominator = mantissa
        .checked_mul(pow10(denominator_shift))
        .ok_or_else(too_large)?;

    let expected_out = numerator / denominator;
    if expected_out == U256::ZERO {
        return Err(Error::invalid_input("amount is too small"));
    }

    let amount_out_minimum = apply_slippage(expected_out, slippage_bps)?;

    Ok(SwapQuote {
        amount_in,
        expected_out,
        amount_out_minimum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::parse_units;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn estimate_divides_by_price_and_rounds_to_whole_tokens() {
        assert_eq!(estimate(dec("0.01"), Some(dec("0.0000005"))), dec("20000"));
        assert_eq!(display_estimate(estimate_str("0.01", Some(dec("0.0000005")))), "20,000");
        assert_eq!(estimate(dec("1"), Some(dec("3"))), dec("0"));
        assert_eq!(estimate(dec("2"), Some(dec("3"))), dec("1"));
        assert_eq!(estimate(dec("5"), Some(dec("2"))), dec("3"));
    }

    #[test]
    fn estimate_is_zero_without_a_price_or_a_positive_amount() {
        assert_eq!(estimate(dec("1.5"), None), Decimal::ZERO);
        assert_eq!(estimate(Decimal::ZERO, Some(dec("0.1"))), Decimal::ZERO);
        assert_eq!(estimate(dec("-1"), Some(dec("0.1"))), Decimal::ZERO);
        assert_eq!(estimate(dec("1"), Some(Decimal::ZERO)), Decimal::ZERO);
        assert_eq!(estimate_str("", Some(dec("0.1"))), Decimal::ZERO);
        assert_eq!(estimate_str("abc", Some(dec("0.1"))), Decimal::ZERO);
        assert_eq!(display_estimate(Decimal::ZERO), "0");
    }

    #[test]
    fn estimate_matches_exact_division_within_rounding() {
        for (amount, price) in [("0.25", "0.0000013"), ("1", "0.000042"), ("0.05", "0.0071")] {
            let exact = dec(amount) / dec(price);
            let shown = estimate(dec(amount), Some(dec(price)));
            assert!((exact - shown).abs() <= dec("0.5"), "{amount} / {price}");
        }
    }

    #[test]
    fn quotes_exact_integer_output() {
        let amount_in = parse_units("0.01", 18).unwrap();
        let quote = quote_exact_input(amount_in, dec("0.0000005"), 18, 18, 1_000).unwrap();

        assert_eq!(quote.amount_in, amount_in);
        assert_eq!(quote.expected_out, parse_units("20000", 18).unwrap());
        assert_eq!(quote.amount_out_minimum, parse_units("18000", 18).unwrap());
    }

    #[test]
    fn quotes_across_different_decimals() {
        // 1 native (18 decimals) at 0.5 native per token, token has 6 decimals
        let quote =
            quote_exact_input(parse_units("1", 18).unwrap(), dec("0.5"), 18, 6, 0).unwrap();
        assert_eq!(quote.expected_out, U256::new(2_000_000));

        // 1 unit (6 decimals) at 2 per token, token has 18 decimals
        let quote = quote_exact_input(U256::new(1_000_000), dec("2"), 6, 18, 0).unwrap();
        assert_eq!(quote.expected_out, parse_units("0.5", 18).unwrap());
    }

    #[test]
    fn minimum_never_exceeds_expected_and_only_matches_without_slippage() {
        let prices = ["0.0000005", "0.00123", "1", "3.7"];
        let amounts = ["0.000001", "0.01", "0.25", "12.5"];
        let slippages = [0u16, 1, 50, 1_000, 1_500, 10_000];

        for price in prices {
            for amount in amounts {
                for bps in slippages {
                    let amount_in = parse_units(amount, 18).unwrap();
                    let quote = quote_exact_input(amount_in, dec(price), 18, 18, bps).unwrap();

                    assert!(quote.amount_out_minimum <= quote.expected_out);
                    assert_eq!(
                        quote.amount_out_minimum == quote.expected_out,
                        bps == 0,
                        "amount {amount} price {price} slippage {bps}"
                    );
                }
            }
        }
    }

    #[test]
    fn rejects_bad_quotes() {
        let one = parse_units("1", 18).unwrap();
        assert_eq!(
            quote_exact_input(one, Decimal::ZERO, 18, 18, 100),
            Err(Error::PriceUnavailable)
        );
        assert!(matches!(
            quote_exact_input(U256::ZERO, dec("1"), 18, 18, 100),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            quote_exact_input(one, dec("1"), 18, 18, 10_001),
            Err(Error::InvalidInput(_))
        ));
        // one wei at a price of a thousand rounds down to nothing
        assert!(matches!(
            quote_exact_input(U256::ONE, dec("1000"), 18, 18, 100),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn slippage_floors() {
        assert_eq!(apply_slippage(U256::new(10_000), 1_000).unwrap(), U256::new(9_000));
        assert_eq!(apply_slippage(U256::new(9_999), 1).unwrap(), U256::new(9_998));
        assert_eq!(apply_slippage(U256::new(7), 10_000).unwrap(), U256::ZERO);
        assert_eq!(apply_slippage(U256::MAX, 0).unwrap(), U256::MAX);
    }
}
