//! User-entered amount parsing.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a free-form amount string into a strictly positive `Decimal`.
///
/// Deliberately forgiving about notation:
/// - surrounding whitespace is stripped;
/// - `,` is accepted as a decimal separator and normalized to `.`;
/// - one leading `+` is allowed (a leading `-` is not);
/// - anything non-numeric, zero or negative yields `None`.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let mut s = text.trim().replace(',', ".");
    if let Some(rest) = s.strip_prefix('+') {
        s = rest.trim_start().to_string();
    }
    if s.starts_with('-') {
        return None;
    }
    if s.starts_with('.') {
        s.insert(0, '0');
    }
    let value = Decimal::from_str(&s).ok()?;
    if value <= Decimal::ZERO {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn accepts_comma_and_dot_separators() {
        assert_eq!(parse_amount("125,50"), Some(dec("125.50")));
        assert_eq!(parse_amount("125.50"), Some(dec("125.50")));
        assert_eq!(parse_amount("  200.0 "), Some(dec("200.0")));
    }

    #[test]
    fn accepts_leading_plus() {
        assert_eq!(parse_amount("+5"), Some(dec("5")));
        assert_eq!(parse_amount("+ 12,3"), Some(dec("12.3")));
    }

    #[test]
    fn rejects_negative_zero_and_garbage() {
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("0,00"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("12.3.4"), None);
    }

    #[test]
    fn parsed_values_match_normalized_input() {
        // Every accepted string equals its `,`->`.` normalized form with
        // any leading `+` stripped.
        for raw in ["125,50", "+7", "0.01", ",5", "1000"] {
            let parsed = parse_amount(raw).expect(raw);
            let mut normalized = raw.trim().replace(',', ".");
            if let Some(rest) = normalized.strip_prefix('+') {
                normalized = rest.trim_start().to_string();
            }
            if normalized.starts_with('.') {
                normalized.insert(0, '0');
            }
            assert_eq!(parsed, dec(&normalized));
            assert!(parsed > Decimal::ZERO);
        }
    }
}
