//! Human-readable token amounts
//!
//! Conversion between decimal strings ("1.5") and fixed-point integers
//! scaled by `10^decimals`.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::errors::ProtocolError;

/// Upper bound the swap agent applies to the amount it was asked to swap.
///
/// Compared against the integer part of the human-entered string, before
/// scaling to token units.
pub const MAX_AGENT_AMOUNT: u128 = 1_000_000_000_000_000_000;

fn invalid(message: impl Into<String>) -> ProtocolError {
    ProtocolError::InvalidAmount {
        message: message.into(),
    }
}

/// Parse a decimal string into a fixed-point integer with `decimals` places.
pub fn parse_units(human: &str, decimals: u32) -> Result<BigUint, ProtocolError> {
    let human = human.trim();
    if human.is_empty() {
        return Err(invalid("amount is empty"));
    }

    let (whole, fraction) = match human.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (human, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid(format!("'{}' is not a number", human)));
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid(format!("'{}' is not a number", human)));
    }
    if fraction.len() > decimals as usize {
        return Err(invalid(format!(
            "'{}' has more than {} decimal places",
            human, decimals
        )));
    }

    let padded = format!("{}{:0<width$}", whole, fraction, width = decimals as usize);
    BigUint::parse_bytes(padded.as_bytes(), 10)
        .ok_or_else(|| invalid(format!("'{}' is not a number", human)))
}

/// Render a fixed-point integer as a decimal string, trimming trailing zeros.
pub fn format_units(amount: &BigUint, decimals: u32) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let unit = BigUint::from(10u32).pow(decimals);
    let whole = amount / &unit;
    let fraction = amount % &unit;
    if fraction.is_zero() {
        return whole.to_string();
    }

    let fraction = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

/// Guard applied to the amount a swap agent hands over before it is scaled.
///
/// Only the leading integer digits of the string are inspected. Input with
/// no leading digits, or with a minus sign, passes here and is left for
/// [`parse_units`] to reject.
pub fn check_agent_amount(human: &str) -> Result<(), ProtocolError> {
    let trimmed = human.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if negative || digits.is_empty() {
        return Ok(());
    }

    match BigUint::parse_bytes(digits.as_bytes(), 10) {
        Some(value) if value > BigUint::from(MAX_AGENT_AMOUNT) => Err(invalid(format!(
            "Amount in is too large: {}",
            human
        ))),
        _ => Ok(()),
    }
}
