//! Path-segment to id coercion.
//!
//! Lookups by id come in two flavours. A read compares by numeric value, so
//! `"01"`, `" 1 "` and `"1.0"` all address record 1. Writes take the leading
//! integer of the segment, so `"1abc"` addresses record 1 as well. Anything that
//! yields no non-negative integer addresses nothing.

use super::character::CharacterId;

/// Numeric-value coercion used by reads. Decimal spellings only.
pub fn coerce_loose(raw: &str) -> Option<CharacterId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(id) = trimmed.parse::<CharacterId>() {
        return Some(id);
    }

    let value = trimmed.parse::<f64>().ok()?;
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value > u64::MAX as f64 {
        return None;
    }
    Some(value as CharacterId)
}

/// Leading-integer coercion used by updates and deletes.
pub fn coerce_strict(raw: &str) -> Option<CharacterId> {
    let rest = raw.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let id = rest[..digits_len].parse::<CharacterId>().ok()?;
    if negative && id != 0 {
        return None;
    }
    Some(id)
}
