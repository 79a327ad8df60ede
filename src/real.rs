//! Arbitrary-radix, fixed-precision real numbers.
//!
//! A [`RealValue`] is `(-1)^negative * M * radix^exponent` where `M` is the
//! integer spelled by the mantissa limbs. Nonzero values are kept
//! left-justified, so `M` always has exactly `limbs * value_precision`
//! radix digits; zero is `M = 0, exponent = 0, negative = false`.
//!
//! Operations mutate the receiver in place and never fail: a result that
//! cannot be represented clears the `valid` flag, and an invalid operand
//! makes every later result invalid without doing any numeric work.

use crate::codec::{self, ParsedDigits};
use crate::consts::{self, Constant, Precision, EXPONENT_RANGE, MAX_RADIX, MIN_RADIX};
use crate::error::EngineError;
use crate::limbs::{self, Limb, LimbBase};
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

mod arith;
mod bitwise;
mod transcend;

/// A real number in a fixed radix with a fixed number of mantissa limbs
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RealParts", into = "RealParts")]
pub struct RealValue {
    negative: bool,
    radix: u32,
    exponent: i32,
    user_point: u32,
    valid: bool,
    mantissa: Vec<Limb>,
    value_precision: u32,
    value_limit: u64,
    exponent_precision: u32,
}

/// Every field of a [`RealValue`], as persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealParts {
    pub negative: bool,
    pub radix: u32,
    pub exponent: i32,
    pub user_point: u32,
    pub valid: bool,
    pub value_precision: u32,
    pub value_limit: u64,
    pub exponent_precision: u32,
    pub mantissa: Vec<u64>,
}

/// Digits allowed in a displayed exponent for a radix.
fn exponent_digits(radix: u32) -> u32 {
    let mut k = 0;
    let mut range = 1u64;
    while range * radix as u64 <= EXPONENT_RANGE {
        range *= radix as u64;
        k += 1;
    }
    k
}

impl RealValue {
    fn blank(radix: u32, precision: Precision) -> Self {
        assert!(
            (MIN_RADIX..=MAX_RADIX).contains(&radix),
            "radix {} outside 2..=36",
            radix
        );
        let base = LimbBase::new(radix);
        RealValue {
            negative: false,
            radix,
            exponent: 0,
            user_point: 0,
            valid: true,
            mantissa: vec![0; precision.limbs()],
            value_precision: base.digits,
            value_limit: base.limit,
            exponent_precision: exponent_digits(radix),
        }
    }

    /// Create zero in the given radix with the default precision
    pub fn zero(radix: u32) -> Self {
        Self::blank(radix, Precision::default())
    }

    /// Create zero in the given radix and precision
    pub fn zero_with_precision(radix: u32, precision: Precision) -> Self {
        Self::blank(radix, precision)
    }

    /// Create an invalid value in the given radix and precision
    pub fn invalid_with_precision(radix: u32, precision: Precision) -> Self {
        let mut v = Self::blank(radix, precision);
        v.valid = false;
        v
    }

    /// Create a new value from a machine integer
    pub fn from_i64(value: i64, radix: u32) -> Self {
        Self::from_i64_with_precision(value, radix, Precision::default())
    }

    /// Create a new value from a machine integer with a given precision
    pub fn from_i64_with_precision(value: i64, radix: u32, precision: Precision) -> Self {
        let mut v = Self::blank(radix, precision);
        let mag = limbs::from_u128(value.unsigned_abs() as u128, v.value_limit);
        v.pack(value < 0, mag, 0);
        v
    }

    /// Create a new value from an f64, using its shortest decimal spelling
    pub fn from_f64(value: f64, radix: u32) -> Self {
        Self::from_f64_with_precision(value, radix, Precision::default())
    }

    /// Create a new value from an f64 with a given precision
    pub fn from_f64_with_precision(value: f64, radix: u32, precision: Precision) -> Self {
        if !value.is_finite() {
            tracing::debug!(value, "non-finite f64 converted to invalid value");
            return Self::invalid_with_precision(radix, precision);
        }
        let mut v = Self::try_from_str_with_precision(&format!("{:e}", value), 10, precision)
            .unwrap_or_else(|_| Self::invalid_with_precision(10, precision));
        v.convert_to_radix(radix);
        v
    }

    /// Parse a digit string; malformed input gives an invalid zero value
    pub fn from_str_radix(text: &str, radix: u32) -> Self {
        Self::from_str_with_precision(text, radix, Precision::default())
    }

    /// Parse a digit string with a given precision
    pub fn from_str_with_precision(text: &str, radix: u32, precision: Precision) -> Self {
        match Self::try_from_str_with_precision(text, radix, precision) {
            Ok(v) => v,
            Err(err) => {
                tracing::debug!(%err, text, radix, "parse failed");
                let radix = radix.clamp(MIN_RADIX, MAX_RADIX);
                Self::invalid_with_precision(radix, precision)
            }
        }
    }

    /// Parse a digit string, reporting why it was rejected
    pub fn try_from_str_radix(text: &str, radix: u32) -> Result<Self, EngineError> {
        Self::try_from_str_with_precision(text, radix, Precision::default())
    }

    /// Parse a digit string with a given precision, reporting why it was rejected
    pub fn try_from_str_with_precision(
        text: &str,
        radix: u32,
        precision: Precision,
    ) -> Result<Self, EngineError> {
        let parsed = codec::parse_digits(text, radix)?;
        let v = Self::from_parsed(parsed, radix, precision);
        if v.valid {
            Ok(v)
        } else {
            Err(EngineError::PrecisionExhausted)
        }
    }

    fn from_parsed(parsed: ParsedDigits, radix: u32, precision: Precision) -> Self {
        let mut v = Self::blank(radix, precision);
        let start = parsed
            .digits
            .iter()
            .position(|&d| d != 0)
            .unwrap_or(parsed.digits.len());
        let mut digits = &parsed.digits[start..];
        let mut exponent = parsed.exponent;
        let keep = v.digits() as usize + 1;
        if digits.len() > keep {
            exponent = exponent.saturating_add((digits.len() - keep) as i64);
            digits = &digits[..keep];
        }
        let mag = limbs::from_digits(digits, &v.base());
        v.pack(parsed.negative, mag, exponent);
        v.user_point = parsed.fraction_len;
        v
    }

    /// Archimedes' constant in the given radix
    pub fn pi(radix: u32) -> Self {
        Self::pi_with_precision(radix, Precision::default())
    }

    /// Archimedes' constant in the given radix and precision
    pub fn pi_with_precision(radix: u32, precision: Precision) -> Self {
        consts::constant(Constant::Pi, radix, precision.guarded()).with_limbs(precision.limbs())
    }

    /// Euler's number in the given radix
    pub fn e(radix: u32) -> Self {
        Self::e_with_precision(radix, Precision::default())
    }

    /// Euler's number in the given radix and precision
    pub fn e_with_precision(radix: u32, precision: Precision) -> Self {
        consts::constant(Constant::E, radix, precision.guarded()).with_limbs(precision.limbs())
    }

    /// Canonical constructor: rebuild a value from its persisted fields
    pub fn from_parts(parts: RealParts) -> Result<Self, EngineError> {
        codec::check_radix(parts.radix)?;
        if parts.mantissa.len() < consts::MIN_LIMBS {
            return Err(EngineError::Deserialize(format!(
                "{} limbs is below the minimum of {}",
                parts.mantissa.len(),
                consts::MIN_LIMBS
            )));
        }
        let v = Self::blank(parts.radix, Precision::new(parts.mantissa.len()));
        if parts.value_precision != v.value_precision
            || parts.value_limit != v.value_limit
            || parts.exponent_precision != v.exponent_precision
        {
            return Err(EngineError::Deserialize(format!(
                "precision parameters do not match radix {}",
                parts.radix
            )));
        }
        if let Some(limb) = parts.mantissa.iter().find(|&&l| l >= v.value_limit) {
            return Err(EngineError::Deserialize(format!(
                "limb {} exceeds the limit {}",
                limb, v.value_limit
            )));
        }
        let v = RealValue {
            negative: parts.negative,
            exponent: parts.exponent,
            user_point: parts.user_point,
            valid: parts.valid,
            mantissa: parts.mantissa,
            ..v
        };
        if v.valid && !v.is_zero() {
            if limbs::digit_len(&v.mantissa, &v.base()) != v.digits() {
                return Err(EngineError::Deserialize(
                    "mantissa is not normalized".to_string(),
                ));
            }
            if v.sci().abs() > v.max_sci() {
                return Err(EngineError::PrecisionExhausted);
            }
        }
        Ok(v)
    }

    /// Snapshot every field for persistence
    pub fn to_parts(&self) -> RealParts {
        RealParts {
            negative: self.negative,
            radix: self.radix,
            exponent: self.exponent,
            user_point: self.user_point,
            valid: self.valid,
            value_precision: self.value_precision,
            value_limit: self.value_limit,
            exponent_precision: self.exponent_precision,
            mantissa: self.mantissa.clone(),
        }
    }

    /// Get an independent copy to keep while the original is mutated
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    pub fn precision(&self) -> Precision {
        Precision::new(self.mantissa.len())
    }

    /// Radix digits per limb
    pub fn value_precision(&self) -> u32 {
        self.value_precision
    }

    /// Limb base, `radix^value_precision`
    pub fn value_limit(&self) -> u64 {
        self.value_limit
    }

    /// Radix digits allowed in a displayed exponent
    pub fn exponent_precision(&self) -> u32 {
        self.exponent_precision
    }

    /// Power of the radix applied to the mantissa integer
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Raw mantissa limbs, least significant first
    pub fn mantissa(&self) -> &[Limb] {
        &self.mantissa
    }

    /// Total radix digits the mantissa holds
    pub fn mantissa_length(&self) -> u32 {
        self.digits()
    }

    /// Fraction digits kept on display
    pub fn user_point(&self) -> u32 {
        self.user_point
    }

    pub fn set_user_point(&mut self, places: u32) {
        self.user_point = places;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_zero(&self) -> bool {
        limbs::is_zero(&self.mantissa)
    }

    /// Whether the value equals an integer exactly
    pub fn is_integer(&self) -> bool {
        if !self.valid {
            return false;
        }
        if self.is_zero() || self.exponent >= 0 {
            return true;
        }
        let dropped = (-self.exponent) as u32;
        if dropped >= self.digits() {
            return false;
        }
        let base = self.base();
        (0..dropped).all(|k| limbs::digit_at(&self.mantissa, k, &base) == 0)
    }

    /// Get the value as f64, correctly rounded from the leading decimal digits
    pub fn to_f64(&self) -> f64 {
        if !self.valid {
            return f64::NAN;
        }
        if self.is_zero() {
            return 0.0;
        }
        let decimal = if self.radix == 10 {
            Cow::Borrowed(self)
        } else {
            let mut d = self.clone();
            d.convert_to_radix(10);
            Cow::Owned(d)
        };
        let sign = if self.negative { -1.0 } else { 1.0 };
        if !decimal.valid {
            return f64::INFINITY.copysign(sign);
        }
        if decimal.is_zero() {
            return 0.0f64.copysign(sign);
        }
        let digits = limbs::to_digits(&decimal.mantissa, &decimal.base());
        let lead = codec::digits_to_string(&digits[..digits.len().min(25)]);
        format!(
            "{}{}.{}e{}",
            if self.negative { "-" } else { "" },
            &lead[..1],
            &lead[1..],
            decimal.sci()
        )
        .parse()
        .unwrap_or(f64::NAN)
    }

    /// Get the value as i64 if it is an integer in range
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        if self.is_zero() {
            return Some(0);
        }
        if self.sci() > 40 {
            return None;
        }
        let base = self.base();
        let mag = if self.exponent >= 0 {
            limbs::shl_digits(&self.mantissa, self.exponent as u32, &base)
        } else {
            limbs::shr_digits(&self.mantissa, (-self.exponent) as u32, &base)
        };
        let m = limbs::to_u128(&mag, self.value_limit)?;
        let m = i128::try_from(m).ok()?;
        i64::try_from(if self.negative { -m } else { m }).ok()
    }

    // =====================================================================
    // Internal representation helpers
    // =====================================================================

    pub(crate) fn base(&self) -> LimbBase {
        LimbBase {
            radix: self.radix,
            digits: self.value_precision,
            limit: self.value_limit,
        }
    }

    pub(crate) fn limbs(&self) -> usize {
        self.mantissa.len()
    }

    /// Radix digits in the mantissa
    pub(crate) fn digits(&self) -> u32 {
        self.mantissa.len() as u32 * self.value_precision
    }

    /// Largest magnitude of a scientific exponent
    pub(crate) fn max_sci(&self) -> i64 {
        (self.radix as i64).pow(self.exponent_precision) - 1
    }

    /// Scientific exponent: the value lies in `[radix^sci, radix^(sci+1))`
    pub(crate) fn sci(&self) -> i64 {
        if self.is_zero() {
            return i64::MIN / 4;
        }
        self.exponent as i64 + self.digits() as i64 - 1
    }

    pub(crate) fn magnitude(&self) -> Vec<Limb> {
        let mut m = self.mantissa.clone();
        limbs::trim(&mut m);
        m
    }

    pub(crate) fn set_zero(&mut self) {
        self.mantissa.iter_mut().for_each(|l| *l = 0);
        self.exponent = 0;
        self.negative = false;
        self.user_point = 0;
    }

    pub(crate) fn invalidate(&mut self, reason: &'static str) {
        if self.valid {
            tracing::debug!(reason, radix = self.radix, "value became invalid");
        }
        self.set_zero();
        self.valid = false;
    }

    /// Store `(-1)^negative * mag * radix^exponent`, normalizing the
    /// magnitude to the full mantissa width and rounding half-up on the
    /// first digit that does not fit.
    pub(crate) fn pack(&mut self, negative: bool, mag: Vec<Limb>, exponent: i64) {
        let base = self.base();
        let width = self.digits();
        let mut mag = mag;
        limbs::trim(&mut mag);
        if mag.is_empty() {
            self.set_zero();
            return;
        }

        let len = limbs::digit_len(&mag, &base);
        let mut exponent = exponent;
        if len > width {
            let shift = len - width;
            let (mut m, round_up) = limbs::shr_digits_round(&mag, shift, &base);
            exponent = exponent.saturating_add(shift as i64);
            if round_up {
                m = limbs::add(&m, &[1], base.limit);
                if limbs::digit_len(&m, &base) > width {
                    m = limbs::shr_digits(&m, 1, &base);
                    exponent = exponent.saturating_add(1);
                }
            }
            mag = m;
        } else if len < width {
            mag = limbs::shl_digits(&mag, width - len, &base);
            exponent = exponent.saturating_sub((width - len) as i64);
        }

        let sci = exponent.saturating_add(width as i64 - 1);
        if sci > self.max_sci() {
            self.invalidate("exponent overflow");
            return;
        }
        if sci < -self.max_sci() {
            self.set_zero();
            return;
        }

        mag.resize(self.mantissa.len(), 0);
        self.mantissa = mag;
        self.exponent = exponent as i32;
        self.negative = negative;
        self.user_point = 0;
    }

    /// A small integer in this value's radix and precision
    pub(crate) fn like(&self, n: i64) -> RealValue {
        RealValue::from_i64_with_precision(n, self.radix, self.precision())
    }

    /// The same number re-rounded to another limb count
    pub(crate) fn with_limbs(&self, limbs: usize) -> RealValue {
        if limbs == self.limbs() {
            return self.clone();
        }
        let precision = Precision::new(limbs);
        if !self.valid {
            return RealValue::invalid_with_precision(self.radix, precision);
        }
        let mut v = RealValue::blank(self.radix, precision);
        v.pack(self.negative, self.magnitude(), self.exponent as i64);
        v
    }

    /// A copy carrying the guard limbs used by transcendental functions
    pub(crate) fn working(&self) -> RealValue {
        self.with_limbs(self.precision().guarded().limbs())
    }

    /// Replace this value with `result` rounded back to this value's limb count
    pub(crate) fn settle(&mut self, result: RealValue) {
        *self = result.with_limbs(self.limbs());
    }

    /// `other` expressed in this value's radix and precision
    pub(crate) fn conform<'a>(&self, other: &'a RealValue) -> Cow<'a, RealValue> {
        if other.radix == self.radix && other.limbs() == self.limbs() {
            return Cow::Borrowed(other);
        }
        let mut v = other.with_limbs(self.limbs());
        v.convert_to_radix(self.radix);
        Cow::Owned(v)
    }
}

impl TryFrom<RealParts> for RealValue {
    type Error = EngineError;

    fn try_from(parts: RealParts) -> Result<Self, Self::Error> {
        RealValue::from_parts(parts)
    }
}

impl From<RealValue> for RealParts {
    fn from(value: RealValue) -> Self {
        value.to_parts()
    }
}

impl Default for RealValue {
    fn default() -> Self {
        RealValue::zero(10)
    }
}

impl PartialEq for RealValue {
    fn eq(&self, other: &Self) -> bool {
        self.compare_with(other) == Ordering::Equal
    }
}

impl PartialOrd for RealValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare_with(other))
    }
}

macro_rules! real_binary_op {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $engine:ident) => {
        impl $op<&RealValue> for &RealValue {
            type Output = RealValue;

            fn $method(self, rhs: &RealValue) -> RealValue {
                let mut out = self.clone();
                RealValue::$engine(&mut out, rhs);
                out
            }
        }

        impl $op<RealValue> for RealValue {
            type Output = RealValue;

            fn $method(mut self, rhs: RealValue) -> RealValue {
                RealValue::$engine(&mut self, &rhs);
                self
            }
        }

        impl $assign<&RealValue> for RealValue {
            fn $assign_method(&mut self, rhs: &RealValue) {
                RealValue::$engine(self, rhs);
            }
        }
    };
}

real_binary_op!(Add, add, AddAssign, add_assign, add);
real_binary_op!(Sub, sub, SubAssign, sub_assign, subtract);
real_binary_op!(Mul, mul, MulAssign, mul_assign, multiply_by);
real_binary_op!(Div, div, DivAssign, div_assign, divide_by);
real_binary_op!(Rem, rem, RemAssign, rem_assign, modulo_by);

impl Neg for RealValue {
    type Output = RealValue;

    fn neg(mut self) -> RealValue {
        self.negate();
        self
    }
}

impl Neg for &RealValue {
    type Output = RealValue;

    fn neg(self) -> RealValue {
        let mut out = self.clone();
        out.negate();
        out
    }
}

impl Zero for RealValue {
    fn zero() -> Self {
        RealValue::zero(10)
    }

    fn is_zero(&self) -> bool {
        self.valid && RealValue::is_zero(self)
    }
}

impl One for RealValue {
    fn one() -> Self {
        RealValue::from_i64(1, 10)
    }
}

#[cfg(test)]
mod real_tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let v = RealValue::from_str_radix("FF", 16);
        assert!(v.is_valid());
        assert_eq!(v.to_i64(), Some(255));
        assert_eq!(v, RealValue::from_i64(255, 16));
    }

    #[test]
    fn test_parse_invalid_digit() {
        let v = RealValue::from_str_radix("102", 2);
        assert!(!v.is_valid());
        assert!(v.is_zero());
        assert!(RealValue::try_from_str_radix("102", 2).is_err());
    }

    #[test]
    fn test_normalized_layout() {
        let v = RealValue::from_i64_with_precision(5, 10, Precision::new(2));
        // 18 digits, left-justified
        assert_eq!(v.mantissa(), &[0, 500_000_000]);
        assert_eq!(v.exponent(), -17);
        assert_eq!(v.mantissa_length(), 18);
        assert!(v.is_integer());

        let z = RealValue::zero(10);
        assert!(z.is_zero());
        assert_eq!(z.exponent(), 0);
    }

    #[test]
    fn test_precision_parameters() {
        let v = RealValue::zero(10);
        assert_eq!(v.value_precision(), 9);
        assert_eq!(v.value_limit(), 1_000_000_000);
        assert_eq!(v.exponent_precision(), 4);
        assert_eq!(v.max_sci(), 9999);

        let v = RealValue::zero(2);
        assert_eq!(v.value_precision(), 32);
        assert_eq!(v.exponent_precision(), 16);
    }

    #[test]
    fn test_long_input_rounds() {
        let p = Precision::new(2);
        let v = RealValue::from_str_with_precision("123456789012345678.9", 10, p);
        assert_eq!(v.to_string(), "123456789012345679");
        let v = RealValue::from_str_with_precision("99999999999999999.99", 10, p);
        assert_eq!(v.to_string(), "100000000000000000");
    }

    #[test]
    fn test_conversions() {
        let v = RealValue::from_f64(0.1, 10);
        assert_eq!(v.to_string(), "0.1");
        assert_eq!(RealValue::from_f64(-2.5, 10).to_f64(), -2.5);
        assert!(!RealValue::from_f64(f64::NAN, 10).is_valid());
        assert_eq!(RealValue::from_i64(i64::MIN, 10).to_i64(), Some(i64::MIN));
        assert_eq!(RealValue::from_str_radix("2.5", 10).to_i64(), None);

        let half = RealValue::from_f64(0.5, 2);
        assert_eq!(half.to_string(), "0.1");
    }

    #[test]
    fn test_to_f64_out_of_range() {
        let mut big = RealValue::from_i64(2, 2);
        big.raise_to_int_power(40000);
        assert!(big.is_valid());
        assert_eq!(big.to_f64(), f64::INFINITY);
        big.negate();
        assert_eq!(big.to_f64(), f64::NEG_INFINITY);

        let mut small = RealValue::from_i64(2, 2);
        small.raise_to_int_power(-40000);
        assert!(small.is_valid() && !small.is_zero());
        assert_eq!(small.to_f64(), 0.0);

        let decimal = RealValue::from_str_radix("1.5e9000", 10);
        assert_eq!(decimal.to_f64(), f64::INFINITY);
        let decimal = RealValue::from_str_radix("-1.5e-9000", 10);
        assert_eq!(decimal.to_f64(), 0.0);
        assert!(decimal.to_f64().is_sign_negative());
    }

    #[test]
    fn test_parse_extreme_exponents() {
        let v = RealValue::from_str_radix("1e-9223372036854775807", 10);
        assert!(v.is_valid());
        assert!(v.is_zero());
        let v = RealValue::from_str_radix("0.55e-9223372036854775807", 10);
        assert!(v.is_valid());
        assert!(v.is_zero());
        let v = RealValue::from_str_radix("1e99999999999999999999", 10);
        assert!(!v.is_valid());
        let v = RealValue::from_str_radix("-1.5@ZZZZZZZZZZZZZZZZ", 36);
        assert!(!v.is_valid());
        assert!(RealValue::try_from_str_radix("1e9223372036854775807", 10).is_err());
    }

    #[test]
    fn test_parts_round_trip() {
        let v = RealValue::from_str_radix("-12.75", 10);
        let parts = v.to_parts();
        let back = RealValue::from_parts(parts.clone()).unwrap();
        assert_eq!(back.to_parts(), parts);

        let mut bad = parts.clone();
        bad.mantissa[0] = 2_000_000_000;
        assert!(matches!(
            RealValue::from_parts(bad),
            Err(EngineError::Deserialize(_))
        ));

        let mut bad = parts;
        bad.value_limit = 10;
        assert!(RealValue::from_parts(bad).is_err());
    }

    #[test]
    fn test_operator_traits() {
        let a = RealValue::from_i64(7, 10);
        let b = RealValue::from_i64(2, 10);
        assert_eq!(&a + &b, RealValue::from_i64(9, 10));
        assert_eq!(&a - &b, RealValue::from_i64(5, 10));
        assert_eq!(&a * &b, RealValue::from_i64(14, 10));
        assert_eq!(&a / &b, RealValue::from_str_radix("3.5", 10));
        assert_eq!(&a % &b, RealValue::from_i64(1, 10));
        assert_eq!(-&a, RealValue::from_i64(-7, 10));

        let mut c = a.clone();
        c += &b;
        c *= &b;
        assert_eq!(c, RealValue::from_i64(18, 10));

        assert_eq!(a.clone() + b.clone(), RealValue::from_i64(9, 10));
        assert_eq!(a.clone() - b.clone(), RealValue::from_i64(5, 10));
        assert_eq!(a.clone() * b.clone(), RealValue::from_i64(14, 10));
        assert_eq!(a.clone() / b.clone(), RealValue::from_str_radix("3.5", 10));
        assert_eq!(a % b, RealValue::from_i64(1, 10));
    }

    #[test]
    fn test_zero_one_traits() {
        let zero = <RealValue as Zero>::zero();
        assert!(Zero::is_zero(&zero));
        let one = RealValue::one();
        assert_eq!(one.to_i64(), Some(1));
        assert_eq!(zero + one, RealValue::from_i64(1, 10));
    }
}
