//! Lenient numeric parsing for feed cells.
//!
//! Supplier exports carry prices like `"54.99"`, `"54.99 GBP"` or `" 12"`,
//! and quantities that are occasionally decimals. Each helper reads the
//! longest numeric prefix after leading whitespace and ignores the rest, so
//! `"7.9"` read as an integer is `7`. An input without a leading digit yields
//! `None`; callers substitute their own default.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Splits an optional sign and the digit run at the front of `s`.
/// Returns `(negative, digits, rest)`.
fn split_sign_and_digits(s: &str) -> (bool, &str, &str) {
    let s = s.trim_start();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = unsigned
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(unsigned.len());
    (negative, &unsigned[..end], &unsigned[end..])
}

/// Parses the leading decimal number of `s`, e.g. `"12.50abc"` → `12.50`.
pub(crate) fn parse_leading_decimal(s: &str) -> Option<Decimal> {
    let (negative, int_part, rest) = split_sign_and_digits(s);

    let frac_part = rest.strip_prefix('.').map_or("", |after| {
        let end = after
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(after.len());
        &after[..end]
    });

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut literal = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        literal.push('.');
        literal.push_str(frac_part);
    }

    Decimal::from_str(&literal).ok()
}

/// Parses the leading integer of `s`, e.g. `"7.9"` → `7`, `"-3 units"` → `-3`.
pub(crate) fn parse_leading_int(s: &str) -> Option<i64> {
    let (negative, digits, _) = split_sign_and_digits(s);
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}
