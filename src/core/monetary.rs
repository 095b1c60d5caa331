//! Monetary units of the chain
//!
//! All amounts are unsigned big integers counted in `aer`, the smallest unit.
//!
//! ## Units
//! - **aer**: 1
//! - **gaer**: 10^9 aer
//! - **aergo**: 10^18 aer
//!
//! On the wire an amount is the minimal big-endian byte string of the value;
//! zero is the empty byte string.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use once_cell::sync::Lazy;

use crate::error::{CliError, Result};

/// Upper bound of any amount or gas price field (5 * 10^18 aer)
pub static MAX_AER: Lazy<BigUint> = Lazy::new(|| BigUint::from(5_000_000_000_000_000_000u64));

/// Minimum stake accepted by the system contract (10 000 aergo)
pub static STAKING_MINIMUM: Lazy<BigUint> =
    Lazy::new(|| Unit::Aergo.multiplier() * BigUint::from(10_000u32));

/// Minimum amount a name transaction must carry (1 aergo)
pub static NAME_MINIMUM: Lazy<BigUint> = Lazy::new(|| Unit::Aergo.multiplier());

/// Denominations understood by the parser and renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Aergo,
    Gaer,
    Aer,
}

impl Unit {
    /// Number of decimal places between this unit and `aer`
    pub const fn decimals(&self) -> u32 {
        match self {
            Unit::Aergo => 18,
            Unit::Gaer => 9,
            Unit::Aer => 0,
        }
    }

    pub fn multiplier(&self) -> BigUint {
        BigUint::from(10u32).pow(self.decimals())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Aergo => "aergo",
            Unit::Gaer => "gaer",
            Unit::Aer => "aer",
        }
    }
}

impl FromStr for Unit {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "aergo" => Ok(Unit::Aergo),
            "gaer" => Ok(Unit::Gaer),
            "aer" => Ok(Unit::Aer),
            _ => Err(CliError::Input(format!("unknown unit: {s}"))),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a denominated amount such as `1.01 aergo`, `.5gaer` or `1010`.
///
/// A bare integer is read as aer. A fractional part requires an explicit
/// unit and may not be longer than the unit's decimal width.
pub fn parse_amount(input: &str) -> Result<BigUint> {
    let invalid = || CliError::Input(format!("failed to parse amount: {input}"));

    let bytes = input.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let integer = &input[..pos];

    let mut fraction = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let start = pos + 1;
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end == start {
            return Err(invalid());
        }
        fraction = &input[start..end];
        pos = end;
    }
    if integer.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }

    let unit_start = pos + input[pos..].len() - input[pos..].trim_start().len();
    let unit_text = &input[unit_start..];
    let unit = if unit_text.is_empty() {
        // "1 " and "0.1" are both rejected: separators and fractions need a unit
        if unit_start != pos || !fraction.is_empty() {
            return Err(invalid());
        }
        Unit::Aer
    } else {
        unit_text.parse::<Unit>().map_err(|_| invalid())?
    };

    let decimals = unit.decimals() as usize;
    if fraction.len() > decimals {
        return Err(invalid());
    }

    let mut digits = String::with_capacity(integer.len() + decimals);
    digits.push_str(integer);
    digits.push_str(fraction);
    for _ in fraction.len()..decimals {
        digits.push('0');
    }
    if digits.is_empty() {
        return Err(invalid());
    }
    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)
}

/// Render an aer amount in the given unit, e.g. `0.000000001 gaer`.
///
/// Trailing zeros of the fraction are trimmed, then the dot if nothing is left.
pub fn format_amount(amount: &BigUint, unit: Unit) -> String {
    let decimals = unit.decimals() as usize;
    if decimals == 0 {
        return format!("{amount} {unit}");
    }
    let multiplier = unit.multiplier();
    let integer = amount / &multiplier;
    let remainder = amount % &multiplier;

    let fraction = format!("{:0>width$}", remainder.to_string(), width = decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{integer} {unit}")
    } else {
        format!("{integer}.{fraction} {unit}")
    }
}

/// Interpret a big-endian byte string as an amount
pub fn amount_from_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Minimal big-endian encoding; zero becomes the empty byte string
pub fn amount_to_bytes(amount: &BigUint) -> Vec<u8> {
    if amount.bits() == 0 {
        return Vec::new();
    }
    amount.to_bytes_be()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aer(s: &str) -> BigUint {
        BigUint::parse_bytes(s.as_bytes(), 10).unwrap()
    }

    #[test]
    fn test_parse_accepted_forms() {
        assert_eq!(parse_amount("1 aergo").unwrap(), aer("1000000000000000000"));
        assert_eq!(parse_amount("101 Aergo").unwrap(), aer("101000000000000000000"));
        assert_eq!(parse_amount("123 aer").unwrap(), aer("123"));
        assert_eq!(parse_amount("1010").unwrap(), aer("1010"));
        assert_eq!(
            parse_amount("1.01 aergo").unwrap(),
            aer("1010000000000000000")
        );
        assert_eq!(parse_amount(".21245gaer").unwrap(), aer("212450000"));
        assert_eq!(
            parse_amount("1000.00000000021245aergo").unwrap(),
            aer("1000000000000212450000")
        );
        assert_eq!(
            parse_amount("100000000000000000000").unwrap(),
            aer("100000000000000000000")
        );
        assert_eq!(parse_amount("0").unwrap(), BigUint::default());
    }

    #[test]
    fn test_parse_rejected_forms() {
        for input in [
            "0.0000000000000000001 aergo",
            "1 aergoa",
            "1 aerg",
            "1 aaergo",
            "1 aergo ",
            "1aergo.1aer",
            "0.1",
            "0.1.1",
            "1000.5aer",
            "100d0.321245",
            "",
            "aergo",
            " 1 aergo",
            "1.aergo",
        ] {
            assert!(parse_amount(input).is_err(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn test_format_trims_fraction() {
        assert_eq!(format_amount(&aer("1"), Unit::Gaer), "0.000000001 gaer");
        assert_eq!(format_amount(&aer("10"), Unit::Gaer), "0.00000001 gaer");
        assert_eq!(format_amount(&aer("0"), Unit::Gaer), "0 gaer");
        assert_eq!(format_amount(&aer("1"), Unit::Aer), "1 aer");
        assert_eq!(
            format_amount(&aer("1010000000000000000"), Unit::Aergo),
            "1.01 aergo"
        );
        assert_eq!(
            format_amount(&aer("2000000000000000000"), Unit::Aergo),
            "2 aergo"
        );
    }

    #[test]
    fn test_format_then_parse_keeps_value() {
        for value in ["1", "999999999", "1000000000000000001", "5000000000000000000"] {
            for unit in [Unit::Aergo, Unit::Gaer, Unit::Aer] {
                let rendered = format_amount(&aer(value), unit);
                assert_eq!(parse_amount(&rendered).unwrap(), aer(value), "{rendered}");
            }
        }
    }

    #[test]
    fn test_byte_encoding_of_zero_is_empty() {
        assert!(amount_to_bytes(&BigUint::default()).is_empty());
        assert_eq!(amount_to_bytes(&aer("256")), vec![1, 0]);
        assert_eq!(amount_from_bytes(&[]), BigUint::default());
    }

    #[test]
    fn test_limits() {
        assert_eq!(MAX_AER.to_string(), "5000000000000000000");
        assert_eq!(STAKING_MINIMUM.to_string(), "10000000000000000000000");
    }
}
