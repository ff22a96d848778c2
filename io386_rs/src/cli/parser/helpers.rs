//! Token helpers for the argument compiler.
//!
//! - Width and base marks
//! - strtoul-style numbers with automatic base detection

use crate::types::{Base, Width};

/// Map a width mark to a [`Width`]. Anything but a single `b`, `w` or `l`
/// yields [`Width::Invalid`].
pub fn get_width(mark: &str) -> Width {
    match mark {
        "b" => Width::Byte,
        "w" => Width::Short,
        "l" => Width::Int,
        _ => Width::Invalid,
    }
}

/// Map a base mark to a [`Base`].
pub fn get_base(mark: &str) -> Option<Base> {
    match mark {
        "d" => Some(Base::Decimal),
        "8" => Some(Base::Octal),
        "x" => Some(Base::Hexadecimal),
        _ => None,
    }
}

/// Parse an unsigned integer the way `strtoul(s, NULL, 0)` picks its base
/// (`0x` hex, leading `0` octal, decimal otherwise), but reject anything the
/// whole string does not spell: signs, whitespace, stray characters, and
/// values that do not fit in 32 bits.
pub fn parse_number(raw: &str) -> Option<u32> {
    let (digits, radix) = if let Some(hex) = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
    {
        (hex, 16)
    } else if raw.len() > 1 && raw.starts_with('0') {
        (&raw[1..], 8)
    } else {
        (raw, 10)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}

// ============================================================================
// Tests
// ============================================================================
