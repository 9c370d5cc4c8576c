//! Fixed-point conversion between human-readable amounts and smallest-unit integers.
//!
//! Nothing in here goes through floating point. Amounts that end up in a transaction are
//! always produced by [`parse_units`].

use crate::Error;
use ethnum::U256;

pub fn pow10(exponent: u8) -> U256 {
    U256::new(10).pow(exponent as u32)
}

/// Parses a decimal string such as `"0.01"` into its exact smallest-unit integer.
///
/// Accepts `,` as the decimal separator. Fails instead of rounding when the input has
/// more significant fractional digits than `decimals`.
pub fn parse_units(amount: impl AsRef<str>, decimals: u8) -> Result<U256, Error> {
    let amount = amount.as_ref().trim().replace(',', ".");

    let (whole_str, fraction_str) = amount.split_once('.').unwrap_or((amount.as_str(), ""));

    if whole_str.is_empty() && fraction_str.is_empty() {
        return Err(Error::invalid_input("amount is empty"));
    }
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole_str) || !is_digits(fraction_str) {
        return Err(Error::invalid_input(format!("'{amount}' is not a number")));
    }

    let mut fraction_str = fraction_str;
    if fraction_str.len() > decimals as usize {
        let (kept, dropped) = fraction_str.split_at(decimals as usize);
        if dropped.bytes().any(|b| b != b'0') {
            return Err(Error::invalid_input(format!(
                "amount has more than {decimals} decimal places"
            )));
        }
        fraction_str = kept;
    }

    let whole = match whole_str {
        "" => U256::ZERO,
        digits => U256::from_str_radix(digits, 10)
            .map_err(|_| Error::invalid_input("amount is too large"))?,
    };

    // Pad the fractional part to match the precision
    let fraction = if fraction_str.is_empty() {
        U256::ZERO
    } else {
        let padded = format!("{fraction_str:0<width$}", width = decimals as usize);
        U256::from_str_radix(&padded, 10).map_err(|_| Error::invalid_input("amount is too large"))?
    };

    whole
        .checked_mul(pow10(decimals))
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(|| Error::invalid_input("amount is too large"))
}

/// Formats a smallest-unit amount, truncating (never rounding up) to
/// `max_fraction_digits` and trimming trailing zeros.
pub fn format_units(amount: U256, decimals: u8, max_fraction_digits: usize) -> String {
    let factor = pow10(decimals);

    let integer_part = amount / factor;
    let fractional_part = amount % factor;

    if decimals == 0 || max_fraction_digits == 0 {
        return integer_part.to_string();
    }

    // Adjust the width dynamically based on decimals
    let fractional_str = format!("{:0>width$}", fractional_part.to_string(), width = decimals as usize);
    let shown = &fractional_str[..max_fraction_digits.min(decimals as usize)];
    let trimmed = shown.trim_end_matches('0');

    if trimmed.is_empty() {
        integer_part.to_string()
    } else {
        format!("{integer_part}.{trimmed}")
    }
}

/// Like [`format_units`], but always shows exactly `fraction_digits` digits ("0.0000").
pub fn format_units_fixed(amount: U256, decimals: u8, fraction_digits: usize) -> String {
    let factor = pow10(decimals);
    let integer_part = amount / factor;

    if fraction_digits == 0 {
        return integer_part.to_string();
    }

    let fractional_str = format!("{:0>width$}", (amount % factor).to_string(), width = decimals as usize);
    let mut shown = fractional_str[..fraction_digits.min(decimals as usize)].to_string();
    while shown.len() < fraction_digits {
        shown.push('0');
    }

    format!("{integer_part}.{shown}")
}

/// Inserts `,` between groups of three integer digits: `"20000"` becomes `"20,000"`.
pub fn group_thousands(number: &str) -> String {
    let (integer, rest) = match number.find('.') {
        Some(index) => number.split_at(index),
        None => (number, ""),
    };
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", integer),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}{rest}")
}

/// `amount * percent / 100`, floored.
pub fn percent_of(amount: U256, percent: u8) -> U256 {
    amount / U256::new(100) * U256::new(percent as u128)
        + amount % U256::new(100) * U256::new(percent as u128) / U256::new(100)
}
