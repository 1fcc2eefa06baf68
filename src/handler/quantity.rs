//! Displayed quantity parsing.

/// Parse the integer a quantity element starts with.
///
/// Leading whitespace and a single sign are accepted, parsing stops at the
/// first non-digit, and at least one digit is required: `" 3"`, `"2 pcs"` and
/// `"+4"` parse, `"abc"`, `""` and `"-"` do not. Values past the `i64` range
/// saturate.
///
/// Digits are always decimal: a `0x` prefix is not read as hexadecimal, so
/// `"0x2"` parses as 0 where a browser's radix-less `parseInt` gives 2.
pub fn parse_displayed_quantity(text: &str) -> Option<i64> {
    let mut chars = text.trim_start().chars().peekable();

    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut value: Option<i64> = None;

    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();

        let current = value.unwrap_or(0);
        let signed = if negative {
            -i64::from(digit)
        } else {
            i64::from(digit)
        };

        value = Some(current.saturating_mul(10).saturating_add(signed));
    }

    value
}
