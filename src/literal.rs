use serde::{Deserialize, Serialize};
use std::fmt;

/// Which initializer a literal was read for; carried in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteralContext {
    Register,
    Memory,
}

impl fmt::Display for LiteralContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralContext::Register => f.write_str("register"),
            LiteralContext::Memory => f.write_str("memory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Base {
    Decimal,
    Hex,
    Binary,
}

impl Base {
    fn radix(self) -> u32 {
        match self {
            Base::Decimal => 10,
            Base::Hex => 16,
            Base::Binary => 2,
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Base::Decimal => f.write_str("decimal"),
            Base::Hex => f.write_str("hexadecimal"),
            Base::Binary => f.write_str("binary"),
        }
    }
}

/// Splits a literal into its base and digit run. Only decimal literals may carry a sign.
fn detect(s: &str) -> (Base, &str) {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (Base::Hex, hex)
    } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        (Base::Binary, bin)
    } else {
        (Base::Decimal, s)
    }
}

/// Accumulates digits mod 2^32, so arbitrarily long literals reduce without overflow.
fn fold_digits(digits: &str, radix: u32) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0u32, |acc, c| {
        let d = c.to_digit(radix)?;
        Some(acc.wrapping_mul(radix).wrapping_add(d))
    })
}

/// Parses a decimal, `0x` hexadecimal or `0b` binary literal into a 32-bit word.
///
/// On failure returns the base that was detected so callers can name it.
pub fn parse_literal(s: &str) -> Result<u32, Base> {
    let (base, body) = detect(s.trim());
    let value = match base {
        Base::Decimal => {
            let (neg, digits) = match body.as_bytes().first() {
                Some(b'-') => (true, &body[1..]),
                Some(b'+') => (false, &body[1..]),
                _ => (false, body),
            };
            fold_digits(digits, base.radix()).map(|v| if neg { v.wrapping_neg() } else { v })
        }
        Base::Hex | Base::Binary => fold_digits(body, base.radix()),
    };
    value.ok_or(base)
}

/// Parses a register index token: exactly one hex digit.
pub fn parse_hex_digit(s: &str) -> Option<u8> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_digit(16).map(|d| d as u8),
        _ => None,
    }
}
