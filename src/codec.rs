//! Digit-string grammar shared by parsing and formatting.

use crate::consts::{MAX_RADIX, MIN_RADIX};
use crate::error::EngineError;
use regex::Regex;
use std::sync::LazyLock;

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?<sign>[+-])?(?<int>[0-9A-Za-z]*)(?:\.(?<frac>[0-9A-Za-z]*))?(?:@(?<exp>[+-]?[0-9A-Za-z]+))?$",
    )
    .expect("Invalid regex!")
});

// With radix <= 10 'e' cannot be a digit, so it may introduce the exponent.
static DECIMAL_EXP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?<mant>[^eE]*)[eE](?<exp>[+-]?[0-9]+)$").expect("Invalid regex!"));

/// A digit string split into its parts.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedDigits {
    pub negative: bool,
    /// Integer and fraction digits, most significant first
    pub digits: Vec<u8>,
    /// Power of the radix applied to the integer formed by `digits`
    pub exponent: i64,
    /// Number of digits typed after the point
    pub fraction_len: u32,
}

pub fn check_radix(radix: u32) -> Result<(), EngineError> {
    if (MIN_RADIX..=MAX_RADIX).contains(&radix) {
        Ok(())
    } else {
        Err(EngineError::InvalidRadix(radix))
    }
}

/// Value of a digit character, case-insensitive.
pub fn digit_value(c: char, radix: u32) -> Result<u8, EngineError> {
    match c.to_digit(36) {
        Some(d) if d < radix => Ok(d as u8),
        _ => Err(EngineError::Parse(format!(
            "digit '{}' not valid in radix {}",
            c, radix
        ))),
    }
}

/// Uppercase character for a digit value.
pub fn digit_char(d: u8) -> char {
    std::char::from_digit(d as u32, 36)
        .unwrap_or('?')
        .to_ascii_uppercase()
}

pub fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| digit_char(d)).collect()
}

/// An integer written in the given radix, `-` prefixed when negative.
pub fn int_to_string(n: i64, radix: u32) -> String {
    let mut m = n.unsigned_abs();
    if m == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while m > 0 {
        digits.push((m % radix as u64) as u8);
        m /= radix as u64;
    }
    digits.reverse();
    let body = digits_to_string(&digits);
    if n < 0 {
        format!("-{}", body)
    } else {
        body
    }
}

fn parse_exponent(text: &str, radix: u32) -> Result<i64, EngineError> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let mut value: i64 = 0;
    for c in body.chars() {
        let d = digit_value(c, radix)?;
        // saturates far beyond any representable exponent
        value = value.saturating_mul(radix as i64).saturating_add(d as i64);
    }
    Ok(if negative { -value } else { value })
}

/// Split a digit string: optional sign, digits valid for `radix`, optional
/// `.` fraction, optional exponent (`@` in any radix, `e`/`E` up to radix 10)
/// whose digits use the same radix.
pub fn parse_digits(text: &str, radix: u32) -> Result<ParsedDigits, EngineError> {
    check_radix(radix)?;
    let text = text.trim();

    let (mantissa_text, decimal_exp) = match DECIMAL_EXP_RE.captures(text) {
        Some(caps) if radix <= 10 => (
            caps.name("mant").map_or("", |m| m.as_str()),
            Some(parse_exponent(&caps["exp"], radix)?),
        ),
        _ => (text, None),
    };

    let caps = NUMBER_RE
        .captures(mantissa_text)
        .ok_or_else(|| EngineError::Parse(format!("'{}' is not a number", text)))?;
    let int = caps.name("int").map_or("", |m| m.as_str());
    let frac = caps.name("frac").map_or("", |m| m.as_str());
    if int.is_empty() && frac.is_empty() {
        return Err(EngineError::Parse(format!("'{}' has no digits", text)));
    }
    if decimal_exp.is_some() && caps.name("exp").is_some() {
        return Err(EngineError::Parse(format!("'{}' has two exponents", text)));
    }

    let mut digits = Vec::with_capacity(int.len() + frac.len());
    for c in int.chars().chain(frac.chars()) {
        digits.push(digit_value(c, radix)?);
    }
    let exp = match (caps.name("exp"), decimal_exp) {
        (Some(m), _) => parse_exponent(m.as_str(), radix)?,
        (None, Some(e)) => e,
        (None, None) => 0,
    };
    let fraction_len = frac.chars().count() as u32;

    Ok(ParsedDigits {
        negative: caps.name("sign").is_some_and(|m| m.as_str() == "-"),
        digits,
        exponent: exp.saturating_sub(fraction_len as i64),
        fraction_len,
    })
}

#[cfg(test)]
mod codec_tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let p = parse_digits("FF", 16).unwrap();
        assert_eq!(p.digits, vec![15, 15]);
        assert_eq!(p.exponent, 0);
        assert!(!p.negative);

        let p = parse_digits("-a.8", 16).unwrap();
        assert!(p.negative);
        assert_eq!(p.digits, vec![10, 8]);
        assert_eq!(p.exponent, -1);
        assert_eq!(p.fraction_len, 1);
    }

    #[test]
    fn test_parse_exponents() {
        let p = parse_digits("1.5e3", 10).unwrap();
        assert_eq!(p.digits, vec![1, 5]);
        assert_eq!(p.exponent, 2);

        let p = parse_digits("1.5@-A", 16).unwrap();
        assert_eq!(p.exponent, -11);

        // 'E' is a digit in radix 16
        let p = parse_digits("1E3", 16).unwrap();
        assert_eq!(p.digits, vec![1, 14, 3]);
        assert_eq!(p.exponent, 0);
    }

    #[test]
    fn test_parse_extreme_exponents() {
        let p = parse_digits("0.55e-9223372036854775807", 10).unwrap();
        assert_eq!(p.exponent, i64::MIN);

        let p = parse_digits("1e-99999999999999999999999", 10).unwrap();
        assert_eq!(p.exponent, -i64::MAX);

        let p = parse_digits("1.5@ZZZZZZZZZZZZZZZZ", 36).unwrap();
        assert_eq!(p.exponent, i64::MAX - 1);
    }

    #[test]
    fn test_parse_rejects() {
        assert!(matches!(parse_digits("12", 2), Err(EngineError::Parse(_))));
        assert!(matches!(parse_digits("", 10), Err(EngineError::Parse(_))));
        assert!(matches!(parse_digits(".", 10), Err(EngineError::Parse(_))));
        assert!(matches!(parse_digits("1.2.3", 10), Err(EngineError::Parse(_))));
        assert!(matches!(parse_digits("1 2", 10), Err(EngineError::Parse(_))));
        assert!(matches!(parse_digits("1", 37), Err(EngineError::InvalidRadix(37))));
    }

    #[test]
    fn test_digit_chars() {
        assert_eq!(digit_char(9), '9');
        assert_eq!(digit_char(10), 'A');
        assert_eq!(digit_char(35), 'Z');
        assert_eq!(int_to_string(-255, 16), "-FF");
        assert_eq!(int_to_string(0, 2), "0");
        assert_eq!(digit_value('z', 36).unwrap(), 35);
    }
}
