// src/clamp.rs

//! Clamps numeric terminfo capabilities that overflow a signed 16-bit field
//!
//! The historical terminfo binary format stores numeric capabilities as
//! signed 16-bit values. Decoders built against that assumption wrap a
//! value such as 0x10000 around to zero, so any capability above 32767 is
//! rewritten to exactly 32767 before recompilation. Every byte outside a
//! rewritten value is preserved unchanged, including the base and
//! formatting of values that already fit.

use regex::bytes::{Captures, Regex};
use std::sync::LazyLock;

/// Largest value representable in a signed 16-bit capability field
const CAP_MAX: u32 = 32767;

/// A `name#value` capability assignment with a decimal, octal, or
/// hexadecimal value
static CAP_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \b
        ([A-Za-z_][A-Za-z0-9_]*)
        \#
        (
            0[Xx][0-9A-Fa-f]+
          | 0[0-7]+
          | [1-9][0-9]*
          | 0
        )
        ",
    )
    .unwrap()
});

/// Decode an integer literal in the base its prefix indicates
fn decode_literal(literal: &[u8]) -> Option<u128> {
    let text = std::str::from_utf8(literal).ok()?;
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u128::from_str_radix(hex, 16).ok()
    } else if text.len() > 1 && text.starts_with('0') {
        u128::from_str_radix(text, 8).ok()
    } else {
        text.parse().ok()
    }
}

/// Rewrite any capability assignment above the 16-bit maximum
///
/// Returns the patched source. Assignments at or below the maximum, and any
/// literal that fails to decode, keep their original bytes; the caller can
/// detect a no-op by comparing output to input.
pub fn clamp_capability_values(source: &[u8]) -> Vec<u8> {
    CAP_ASSIGNMENT
        .replace_all(source, |caps: &Captures<'_>| {
            match decode_literal(&caps[2]) {
                Some(value) if value > u128::from(CAP_MAX) => {
                    let mut replacement = caps[1].to_vec();
                    replacement.extend_from_slice(format!("#{CAP_MAX}").as_bytes());
                    replacement
                }
                _ => caps[0].to_vec(),
            }
        })
        .into_owned()
}
