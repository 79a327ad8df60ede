//! Rendering of real and complex values as digit strings.
//!
//! Full-precision output (`Display`) is the inverse of parsing. The limited
//! form fits a display of a given width, switching to a separate exponent
//! field when the positional form does not fit.

use crate::codec;
use crate::complex::ComplexValue;
use crate::limbs;
use crate::real::RealValue;
use serde::{Deserialize, Serialize};
use std::fmt;

const ERROR_TEXT: &str = "Error";

/// Separators used when rendering for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRules {
    /// Character between the integer and fraction digits
    pub fraction_separator: char,
    /// Character between groups of integer digits, if any
    pub thousands_separator: Option<char>,
}

impl Default for FormatRules {
    fn default() -> Self {
        FormatRules {
            fraction_separator: '.',
            thousands_separator: None,
        }
    }
}

impl FormatRules {
    pub fn new(fraction_separator: char, thousands_separator: Option<char>) -> Self {
        FormatRules {
            fraction_separator,
            thousands_separator,
        }
    }

    /// Digits per group: three in radix 10, four in every other radix
    pub fn group_size(radix: u32) -> usize {
        if radix == 10 {
            3
        } else {
            4
        }
    }

    fn join(&self, negative: bool, int: &str, frac: &str, radix: u32) -> String {
        let mut out = String::with_capacity(int.len() * 2 + frac.len() + 2);
        if negative {
            out.push('-');
        }
        match self.thousands_separator {
            Some(sep) => {
                let group = FormatRules::group_size(radix);
                for (i, c) in int.chars().enumerate() {
                    if i > 0 && (int.len() - i) % group == 0 {
                        out.push(sep);
                    }
                    out.push(c);
                }
            }
            None => out.push_str(int),
        }
        if !frac.is_empty() {
            out.push(self.fraction_separator);
            out.push_str(frac);
        }
        out
    }
}

/// A real value fitted to a display width.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LimitedString {
    /// Signed mantissa with separators applied
    pub mantissa: String,
    /// Signed exponent digits, empty when the positional form fits
    pub exponent: String,
}

impl LimitedString {
    fn error() -> Self {
        LimitedString {
            mantissa: ERROR_TEXT.to_string(),
            exponent: String::new(),
        }
    }

    /// Characters counted against the length limit: digits, the radix
    /// point and the exponent with its sign.
    pub fn printable_len(&self, rules: &FormatRules) -> usize {
        let mantissa = self
            .mantissa
            .chars()
            .filter(|&c| c != '-' && Some(c) != rules.thousands_separator)
            .count();
        mantissa + self.exponent.chars().count()
    }
}

/// A complex value fitted to a display width, one field pair per part.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComplexLimitedString {
    pub mantissa: String,
    pub exponent: String,
    /// Empty when the value has no imaginary part
    pub imaginary_mantissa: String,
    pub imaginary_exponent: String,
}

/// Significant digits of a value: `0.d1d2d3... * radix^(sci + 1)`.
#[derive(Clone, Debug, PartialEq)]
struct Digits {
    negative: bool,
    radix: u32,
    digits: Vec<u8>,
    sci: i64,
}

impl Digits {
    fn of(value: &RealValue) -> Self {
        let mut digits = limbs::to_digits(value.mantissa(), &value.base());
        while digits.last() == Some(&0) {
            digits.pop();
        }
        Digits {
            negative: value.is_negative(),
            radix: value.radix(),
            sci: if digits.is_empty() { 0 } else { value.sci() },
            digits,
        }
    }

    fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Keep `keep` significant digits, rounding half-up on the first one
    /// dropped.
    fn round_to(&self, keep: i64) -> Digits {
        if keep >= self.digits.len() as i64 {
            return self.clone();
        }
        let mut out = Digits {
            digits: Vec::new(),
            ..self.clone()
        };
        if keep < 0 {
            return out;
        }
        let keep = keep as usize;
        let round_up = self.digits[keep] as u32 * 2 >= self.radix;
        let mut digits = self.digits[..keep].to_vec();
        if round_up {
            let mut carry = true;
            for d in digits.iter_mut().rev() {
                if *d as u32 + 1 == self.radix {
                    *d = 0;
                } else {
                    *d += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                digits.insert(0, 1);
                out.sci += 1;
            }
        }
        while digits.last() == Some(&0) {
            digits.pop();
        }
        out.digits = digits;
        if out.digits.is_empty() {
            out.sci = 0;
        }
        out
    }

    /// Integer digits needed positionally
    fn int_len(&self) -> usize {
        if self.is_zero() || self.sci < 0 {
            1
        } else {
            self.sci as usize + 1
        }
    }

    /// Integer and fraction digit strings, the fraction padded to `min_frac`
    fn positional(&self, min_frac: usize) -> (String, String) {
        let (int, mut frac) = if self.is_zero() {
            ("0".to_string(), String::new())
        } else if self.sci >= 0 {
            let n = self.sci as usize + 1;
            let mut int: String = codec::digits_to_string(&self.digits[..n.min(self.digits.len())]);
            while int.len() < n {
                int.push('0');
            }
            let frac = if self.digits.len() > n {
                codec::digits_to_string(&self.digits[n..])
            } else {
                String::new()
            };
            (int, frac)
        } else {
            let zeros = "0".repeat((-self.sci - 1) as usize);
            ("0".to_string(), zeros + &codec::digits_to_string(&self.digits))
        };
        while frac.len() < min_frac {
            frac.push('0');
        }
        (int, frac)
    }

    /// Leading digit, fraction digits and signed exponent of the scientific form
    fn scientific(&self, min_frac: usize) -> (String, String, String) {
        let lead = codec::digits_to_string(&self.digits[..1.min(self.digits.len())]);
        let lead = if lead.is_empty() { "0".to_string() } else { lead };
        let mut frac = if self.digits.len() > 1 {
            codec::digits_to_string(&self.digits[1..])
        } else {
            String::new()
        };
        while frac.len() < min_frac {
            frac.push('0');
        }
        (lead, frac, exponent_text(self.sci, self.radix))
    }
}

fn exponent_text(sci: i64, radix: u32) -> String {
    format!(
        "{}{}",
        if sci < 0 { '-' } else { '+' },
        codec::int_to_string(sci.abs(), radix)
    )
}

fn plain(negative: bool, int: &str, frac: &str) -> String {
    FormatRules::default().join(negative, int, frac, 10)
}

impl RealValue {
    /// Whether the positional form needs no more than the mantissa's digit
    /// count of padding zeros.
    fn fits_positionally(&self, sci: i64) -> bool {
        let width = self.digits() as i64;
        -width < sci && sci < width
    }

    fn render(&self, d: &Digits, min_frac: usize) -> String {
        if d.is_zero() || self.fits_positionally(d.sci) {
            let (int, frac) = d.positional(min_frac);
            plain(d.negative, &int, &frac)
        } else {
            let (lead, frac, exp) = d.scientific(0);
            format!("{}@{}", plain(d.negative, &lead, &frac), exp)
        }
    }

    /// Whether [`Display`](fmt::Display) output uses scientific form
    pub fn has_exponent(&self) -> bool {
        self.valid_nonzero() && !self.fits_positionally(self.sci())
    }

    fn valid_nonzero(&self) -> bool {
        self.is_valid() && !self.is_zero()
    }

    /// At most `precision` significant digits
    pub fn to_short_string(&self, precision: usize) -> String {
        if !self.is_valid() {
            return ERROR_TEXT.to_string();
        }
        let d = Digits::of(self).round_to(precision.max(1) as i64);
        self.render(&d, 0)
    }

    /// The [`Display`](fmt::Display) output before the exponent marker
    pub fn mantissa_string(&self) -> String {
        let s = self.to_string();
        match s.split_once('@') {
            Some((m, _)) => m.to_string(),
            None => s,
        }
    }

    /// Signed exponent of the [`Display`](fmt::Display) output, empty in
    /// positional form
    pub fn exponent_string(&self) -> String {
        self.to_string()
            .split_once('@')
            .map(|(_, e)| e.to_string())
            .unwrap_or_default()
    }

    /// Fit the value into `length_limit` printable characters.
    ///
    /// `fixed_places` rounds to exactly that many fraction digits and takes
    /// precedence over `fill_limit`, which pads trailing zeros to the limit.
    /// When the fixed places fit neither positionally nor beside an
    /// exponent, the mantissa reads `Error` rather than showing fewer.
    /// A positive `complement` shows negative integers as their unsigned
    /// pattern of that many bits. If even a one-digit mantissa with its
    /// exponent does not fit, the mantissa reads `Error`.
    pub fn limited_string(
        &self,
        length_limit: usize,
        fixed_places: usize,
        fill_limit: bool,
        complement: u32,
        rules: &FormatRules,
    ) -> LimitedString {
        if !self.is_valid() {
            return LimitedString::error();
        }
        let value = self.as_complement(complement);
        let d = Digits::of(&value);
        positional_limited(&d, length_limit, fixed_places, fill_limit, rules)
            .or_else(|| scientific_limited(&d, length_limit, fixed_places, fill_limit, rules))
            .unwrap_or_else(LimitedString::error)
    }
}

fn positional_limited(
    d: &Digits,
    limit: usize,
    fixed: usize,
    fill: bool,
    rules: &FormatRules,
) -> Option<LimitedString> {
    if d.int_len() > limit {
        return None;
    }
    let mut places = match limit - d.int_len() {
        0 => 0,
        room => room - 1,
    };
    if fixed > 0 {
        if fixed > places {
            return None;
        }
        places = fixed;
    }
    loop {
        let r = d.round_to(d.sci + 1 + places as i64);
        if !d.is_zero() && r.is_zero() {
            return None;
        }
        // a carry can add an integer digit
        let point = usize::from(places > 0);
        if r.int_len() + point + places > limit {
            if places == 0 || fixed > 0 {
                return None;
            }
            places -= 1;
            continue;
        }
        let min_frac = if fixed > 0 || fill { places } else { 0 };
        let (int, frac) = r.positional(min_frac);
        return Some(LimitedString {
            mantissa: rules.join(r.negative, &int, &frac, r.radix),
            exponent: String::new(),
        });
    }
}

/// Fraction digits that fit beside the exponent of `sci`, or exactly
/// `fixed` of them when set.
fn scientific_places(sci: i64, radix: u32, limit: usize, fixed: usize) -> Option<usize> {
    let exp_len = exponent_text(sci, radix).len();
    if exp_len >= limit {
        return None;
    }
    let room = (limit - exp_len).saturating_sub(2);
    match fixed {
        0 => Some(room),
        _ if fixed <= room => Some(fixed),
        _ => None,
    }
}

fn scientific_limited(
    d: &Digits,
    limit: usize,
    fixed: usize,
    fill: bool,
    rules: &FormatRules,
) -> Option<LimitedString> {
    let mut places = scientific_places(d.sci, d.radix, limit, fixed)?;
    let mut r = d.round_to(1 + places as i64);
    if r.sci != d.sci {
        // the carry leaves a lone leading one, exact at any place count
        let room = scientific_places(r.sci, r.radix, limit, fixed)?;
        if room < places {
            r = d.round_to(1 + room as i64);
        }
        places = room;
    }
    let min_frac = if fixed > 0 || fill { places } else { 0 };
    let (lead, frac, exp) = r.scientific(min_frac);
    Some(LimitedString {
        mantissa: rules.join(r.negative, &lead, &frac, r.radix),
        exponent: exp,
    })
}

impl fmt::Display for RealValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "{}", ERROR_TEXT);
        }
        let d = Digits::of(self);
        let min_frac = self.user_point().min(self.digits()) as usize;
        write!(f, "{}", self.render(&d, min_frac))
    }
}

impl ComplexValue {
    /// Fit each part into `length_limit`, see [`RealValue::limited_string`]
    pub fn limited_string(
        &self,
        length_limit: usize,
        fixed_places: usize,
        fill_limit: bool,
        complement: u32,
        rules: &FormatRules,
    ) -> ComplexLimitedString {
        if !self.is_valid() {
            return ComplexLimitedString {
                mantissa: ERROR_TEXT.to_string(),
                ..Default::default()
            };
        }
        let real =
            self.real_part()
                .limited_string(length_limit, fixed_places, fill_limit, complement, rules);
        let imaginary = match self.imaginary() {
            Some(im) => im.limited_string(length_limit, fixed_places, fill_limit, 0, rules),
            None => LimitedString::default(),
        };
        ComplexLimitedString {
            mantissa: real.mantissa,
            exponent: real.exponent,
            imaginary_mantissa: imaginary.mantissa,
            imaginary_exponent: imaginary.exponent,
        }
    }
}

#[cfg(test)]
mod format_tests {
    use super::*;
    use crate::consts::Precision;

    fn dec(text: &str) -> RealValue {
        RealValue::from_str_radix(text, 10)
    }

    fn limited(v: &RealValue, limit: usize, fixed: usize, fill: bool) -> LimitedString {
        v.limited_string(limit, fixed, fill, 0, &FormatRules::default())
    }

    #[test]
    fn test_to_string() {
        assert_eq!(dec("1.50").to_string(), "1.50");
        assert_eq!(dec("-0.00125").to_string(), "-0.00125");
        assert_eq!(dec("000120.0").to_string(), "120.0");
        assert_eq!(dec("0").to_string(), "0");
        assert_eq!(dec("1.5@100").to_string(), "1.5@+100");
        assert_eq!(dec("-2@-80").to_string(), "-2@-80");
        assert_eq!(RealValue::from_str_radix("z", 10).to_string(), "Error");
        assert_eq!(RealValue::from_str_radix("-ff.8", 16).to_string(), "-FF.8");
        assert_eq!(RealValue::from_str_radix("1@-5A", 16).to_string(), "1@-5A");
    }

    #[test]
    fn test_positional_threshold() {
        let p = Precision::new(2);
        let big = RealValue::from_str_with_precision("1@17", 10, p);
        assert_eq!(big.to_string(), "100000000000000000");
        assert!(!big.has_exponent());
        let bigger = RealValue::from_str_with_precision("1@18", 10, p);
        assert_eq!(bigger.to_string(), "1@+18");
        assert!(bigger.has_exponent());
        assert_eq!(bigger.mantissa_string(), "1");
        assert_eq!(bigger.exponent_string(), "+18");
        assert_eq!(big.exponent_string(), "");
    }

    #[test]
    fn test_short_string() {
        let third = dec("1") / dec("3");
        assert_eq!(third.to_short_string(5), "0.33333");
        assert_eq!(dec("2").to_short_string(5), "2");
        assert_eq!(dec("9.9999").to_short_string(3), "10");
        assert_eq!(dec("1@200").to_short_string(3), "1@+200");
    }

    #[test]
    fn test_limited_fixed_places() {
        let s = limited(&dec("1234.5"), 6, 1, false);
        assert_eq!(s.mantissa, "1234.5");
        assert_eq!(s.exponent, "");

        let s = limited(&dec("1234.56"), 10, 1, true);
        assert_eq!(s.mantissa, "1234.6");

        let s = limited(&dec("2"), 8, 3, false);
        assert_eq!(s.mantissa, "2.000");

        let s = limited(&dec("1234.5"), 8, 3, false);
        assert_eq!(s.mantissa, "1234.500");

        // too wide for the places positionally, so they go beside an exponent
        let s = limited(&dec("123456.5"), 8, 2, false);
        assert_eq!(s.mantissa, "1.23");
        assert_eq!(s.exponent, "+5");

        let s = limited(&dec("9.996"), 6, 2, false);
        assert_eq!(s.mantissa, "10.00");

        let s = limited(&dec("1234.5"), 6, 3, false);
        assert_eq!(s.mantissa, "Error");
        let s = limited(&dec("9.996"), 4, 2, true);
        assert_eq!(s.mantissa, "Error");
    }

    #[test]
    fn test_limited_fill_after_carry() {
        let rules = FormatRules::default();

        // the exponent loses a digit, leaving room for one more place
        let s = limited(&dec("9.96@-10"), 6, 0, true);
        assert_eq!(s.mantissa, "1.00");
        assert_eq!(s.exponent, "-9");
        assert_eq!(s.printable_len(&rules), 6);

        let s = limited(&dec("9.96@-10"), 6, 0, false);
        assert_eq!(s.mantissa, "1");
        assert_eq!(s.exponent, "-9");

        // the exponent gains a digit
        let s = limited(&dec("9.996@9"), 6, 0, true);
        assert_eq!(s.mantissa, "1.0");
        assert_eq!(s.exponent, "+10");
        assert_eq!(s.printable_len(&rules), 6);

        let s = limited(&dec("9.9996"), 5, 0, true);
        assert_eq!(s.mantissa, "10.00");
        assert_eq!(s.printable_len(&rules), 5);
    }

    #[test]
    fn test_limited_fits() {
        let third = dec("1") / dec("3");
        let s = limited(&third, 8, 0, false);
        assert_eq!(s.mantissa, "0.333333");
        assert_eq!(s.printable_len(&FormatRules::default()), 8);

        let s = limited(&dec("-12.5"), 8, 0, false);
        assert_eq!(s.mantissa, "-12.5");

        let s = limited(&dec("12.5"), 8, 0, true);
        assert_eq!(s.mantissa, "12.50000");

        let s = limited(&dec("99.96"), 4, 0, false);
        assert_eq!(s.mantissa, "100");

        let s = limited(&dec("123456789"), 8, 0, false);
        assert_eq!(s.mantissa, "1.2346");
        assert_eq!(s.exponent, "+8");

        let s = limited(&dec("0.000000001234"), 8, 0, false);
        assert_eq!(s.mantissa, "1.234");
        assert_eq!(s.exponent, "-9");
        assert!(s.printable_len(&FormatRules::default()) <= 8);

        let s = limited(&dec("1@500"), 3, 0, false);
        assert_eq!(s.mantissa, "Error");

        let s = limited(&RealValue::from_str_radix("?", 10), 8, 0, false);
        assert_eq!(s.mantissa, "Error");
        assert_eq!(s.exponent, "");
    }

    #[test]
    fn test_separators() {
        let rules = FormatRules::new(',', Some('.'));
        let s = dec("1234567.25").limited_string(12, 0, false, 0, &rules);
        assert_eq!(s.mantissa, "1.234.567,25");
        assert_eq!(s.printable_len(&rules), 10);

        let hex = RealValue::from_str_radix("ABCDEF", 16);
        let s = hex.limited_string(12, 0, false, 0, &FormatRules::new('.', Some(' ')));
        assert_eq!(s.mantissa, "AB CDEF");
    }

    #[test]
    fn test_complement_display() {
        let v = RealValue::from_i64(-1, 16);
        let s = v.limited_string(10, 0, false, 16, &FormatRules::default());
        assert_eq!(s.mantissa, "FFFF");
    }
}
