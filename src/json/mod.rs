//! JSON views of node messages
//!
//! Every `conv_*` function turns a protobuf message into an `InOut*` record
//! whose field names are the ones operators script against. Byte strings
//! never reach the output raw: hashes are base58, account addresses go
//! through the address codec and amounts are decimal strings of aer.
//!
//! Projectors take `impl Into<Option<&T>>` so both `&msg` and an absent
//! message can be passed; an absent message projects to the empty record.

mod account;
mod block;
mod chain;
mod peer;
mod receipt;
mod tx;

pub use account::*;
pub use block::*;
pub use chain::*;
pub use peer::*;
pub use receipt::*;
pub use tx::*;

use chrono::DateTime;
use num_bigint::BigUint;
use serde::Serialize;

use crate::error::Result;

/// How transaction payloads are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadEncoding {
    /// Payload bytes read as UTF-8 text
    Raw,
    /// Plain base58, no version byte and no checksum
    #[default]
    Base58,
}

/// Serialize with the one-space indentation used for all command output
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Decimal string of a big-endian amount
pub(crate) fn big_string(bytes: &[u8]) -> String {
    BigUint::from_bytes_be(bytes).to_string()
}

/// Decimal string of an amount, empty when the field is unset
pub(crate) fn opt_big_string(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        String::new()
    } else {
        big_string(bytes)
    }
}

pub(crate) fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}

pub(crate) fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

pub(crate) fn is_zero_i32(value: &i32) -> bool {
    *value == 0
}

pub(crate) fn is_zero_i64(value: &i64) -> bool {
    *value == 0
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// RFC 3339 rendering (UTC) of a unix timestamp in nanoseconds
///
/// The fraction keeps only its significant digits. Timestamps chrono cannot
/// represent fall back to the raw number.
pub fn format_unix_nanos(nanos: i64) -> String {
    let secs = nanos.div_euclid(1_000_000_000);
    let sub = nanos.rem_euclid(1_000_000_000) as u32;
    let Some(at) = DateTime::from_timestamp(secs, sub) else {
        return nanos.to_string();
    };
    let base = at.format("%Y-%m-%dT%H:%M:%S");
    if sub == 0 {
        format!("{base}Z")
    } else {
        let frac = format!("{sub:09}");
        format!("{base}.{}Z", frac.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_one_space_indent() {
        let out = to_json_string(&json!({"a": {"b": 1}})).unwrap();
        assert_eq!(out, "{\n \"a\": {\n  \"b\": 1\n }\n}");
    }

    #[test]
    fn test_amount_strings() {
        assert_eq!(big_string(&[]), "0");
        assert_eq!(opt_big_string(&[]), "");
        assert_eq!(opt_big_string(&[1, 0]), "256");
    }

    #[test]
    fn test_unix_nanos_rendering() {
        assert_eq!(format_unix_nanos(0), "1970-01-01T00:00:00Z");
        assert_eq!(
            format_unix_nanos(1_546_300_800_500_000_000),
            "2019-01-01T00:00:00.5Z"
        );
        assert_eq!(format_unix_nanos(951_782_400_000_000_000), "2000-02-29T00:00:00Z");
        assert_eq!(format_unix_nanos(-1), "1969-12-31T23:59:59.999999999Z");
        assert_eq!(
            format_unix_nanos(1_700_000_000_123_000_000),
            "2023-11-14T22:13:20.123Z"
        );
    }
}
