//! Canonical text forms for IEEE-754 doubles
//!
//! Hash representations must not depend on whatever a platform's float
//! formatter happens to print, so both forms here are pinned and tested:
//!
//! - [`to_decimal_string`]: shortest round-trip decimal laid out like
//!   ECMAScript `Number.prototype.toString` (used by hash version 1).
//! - [`to_hex_string`]: the 16 hex digits of the IEEE-754 bit pattern (used by
//!   hash version 2).

use std::cmp::Ordering;

/// Bit pattern every NaN is folded onto before encoding or comparing.
pub const CANONICAL_NAN_BITS: u64 = 0x7ff8_0000_0000_0000;

/// Largest decimal exponent written without exponent notation.
const MAX_PLAIN_DIGITS: i32 = 21;

/// Smallest decimal exponent written as `0.000ddd`.
const MIN_PLAIN_EXPONENT: i32 = -6;

/// IEEE-754 bits with all NaNs collapsed onto one pattern.
pub fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        CANONICAL_NAN_BITS
    } else {
        value.to_bits()
    }
}

/// Big-endian hex of the canonical bit pattern, always 16 lowercase digits.
///
/// `-0.0` and `0.0` produce different strings.
pub fn to_hex_string(value: f64) -> String {
    format!("{:016x}", canonical_bits(value))
}

/// Shortest round-trip decimal text.
///
/// Integral values carry no fraction (`1.0` → `"1"`), `-0.0` is written `"0"`,
/// magnitudes at or above `1e21` or below `1e-6` switch to exponent notation
/// (`"1e+21"`, `"1.5e-7"`), and non-finite values are `"NaN"`, `"Infinity"`
/// and `"-Infinity"`.
pub fn to_decimal_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // LowerExp yields the shortest digit string that round-trips, e.g. "3.14e0"
    let scientific = format!("{:e}", value.abs());
    let (digits, exponent) = match split_scientific(&scientific) {
        Some(parts) => parts,
        None => return value.to_string(),
    };

    let digit_count = digits.len() as i32;
    let point = exponent + 1;

    let mut out = String::with_capacity(digits.len() + 8);
    if value < 0.0 {
        out.push('-');
    }

    if digit_count <= point && point <= MAX_PLAIN_DIGITS {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((point - digit_count) as usize));
    } else if 0 < point && point <= MAX_PLAIN_DIGITS {
        let (int_part, frac_part) = digits.split_at(point as usize);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
    } else if MIN_PLAIN_EXPONENT < point && point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-point) as usize));
        out.push_str(&digits);
    } else {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        let shown = point - 1;
        out.push('e');
        out.push(if shown >= 0 { '+' } else { '-' });
        out.push_str(&shown.abs().to_string());
    }

    out
}

/// Split `d.ddde±x` into the bare digit string and the exponent.
fn split_scientific(text: &str) -> Option<(String, i32)> {
    let (mantissa, exponent) = text.split_once('e')?;
    let exponent = exponent.parse::<i32>().ok()?;
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    if digits.is_empty() {
        return None;
    }
    Some((digits, exponent))
}

/// Total order over doubles: NaN after everything (and equal to NaN),
/// `-0.0` before `0.0`.
pub fn compare_doubles(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}

/// Exact order between an integer and a double, consistent with
/// [`compare_doubles`]: NaN after everything and integer `0` after `-0.0`.
pub fn compare_long_double(long: i64, double: f64) -> Ordering {
    if double.is_nan() {
        return Ordering::Less;
    }
    // i64 range is [-2^63, 2^63); both bounds are exact doubles
    if double >= TWO_POW_63 {
        return Ordering::Less;
    }
    if double < -TWO_POW_63 {
        return Ordering::Greater;
    }
    let truncated = double.trunc();
    long.cmp(&(truncated as i64)).then_with(|| {
        if double > truncated {
            Ordering::Less
        } else if double < truncated || (double == 0.0 && double.is_sign_negative()) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
