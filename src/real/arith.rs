use super::RealValue;
use crate::limbs;
use std::borrow::Cow;
use std::cmp::Ordering;

impl RealValue {
    /// Replace this value with `other`, expressed in this value's radix and precision
    pub fn assign(&mut self, other: &RealValue) {
        let other = self.conform(other).into_owned();
        *self = other;
    }

    /// Flip the sign; zero stays unsigned
    pub fn negate(&mut self) {
        if self.valid && !self.is_zero() {
            self.negative = !self.negative;
        }
    }

    /// Drop the sign
    pub fn abs(&mut self) {
        self.negative = false;
    }

    /// Add `other` to this value
    pub fn add(&mut self, other: &RealValue) {
        self.add_signed(other, false);
    }

    /// Subtract `other` from this value
    pub fn subtract(&mut self, other: &RealValue) {
        self.add_signed(other, true);
    }

    fn add_signed(&mut self, other: &RealValue, flip: bool) {
        if !self.valid {
            return;
        }
        let other = self.conform(other);
        if !other.valid {
            self.invalidate("invalid operand");
            return;
        }
        if other.is_zero() {
            return;
        }
        let other_negative = other.negative != flip;
        if self.is_zero() {
            let mag = other.magnitude();
            self.pack(other_negative, mag, other.exponent as i64);
            return;
        }

        // an operand entirely below the other's last digit cannot change it
        let reach = self.digits() as i64 + 2;
        if self.sci() - other.sci() > reach {
            return;
        }
        if other.sci() - self.sci() > reach {
            let mag = other.magnitude();
            self.pack(other_negative, mag, other.exponent as i64);
            return;
        }

        let base = self.base();
        let ea = self.exponent as i64;
        let eb = other.exponent as i64;
        let e = ea.min(eb);
        let a = limbs::shl_digits(&self.mantissa, (ea - e) as u32, &base);
        let b = limbs::shl_digits(&other.mantissa, (eb - e) as u32, &base);

        let (negative, mag) = if self.negative == other_negative {
            (self.negative, limbs::add(&a, &b, base.limit))
        } else {
            match limbs::cmp(&a, &b) {
                Ordering::Greater => (self.negative, limbs::sub(&a, &b, base.limit)),
                Ordering::Less => (other_negative, limbs::sub(&b, &a, base.limit)),
                Ordering::Equal => (false, Vec::new()),
            }
        };
        self.pack(negative, mag, e);
    }

    /// Multiply this value by `other`
    pub fn multiply_by(&mut self, other: &RealValue) {
        if !self.valid {
            return;
        }
        let other = self.conform(other);
        if !other.valid {
            self.invalidate("invalid operand");
            return;
        }
        if self.is_zero() || other.is_zero() {
            self.set_zero();
            return;
        }
        let mag = limbs::mul(&self.mantissa, &other.mantissa, self.value_limit);
        let exponent = self.exponent as i64 + other.exponent as i64;
        let negative = self.negative != other.negative;
        self.pack(negative, mag, exponent);
    }

    /// Divide this value by `other`; dividing by zero makes it invalid
    pub fn divide_by(&mut self, other: &RealValue) {
        if !self.valid {
            return;
        }
        let other = self.conform(other);
        if !other.valid {
            self.invalidate("invalid operand");
            return;
        }
        if other.is_zero() {
            self.invalidate("division by zero");
            return;
        }
        if self.is_zero() {
            return;
        }
        let base = self.base();
        let extra = self.digits() + 2;
        let dividend = limbs::shl_digits(&self.mantissa, extra, &base);
        let (quotient, _) = limbs::divrem(&dividend, &other.mantissa, base.limit);
        let exponent = self.exponent as i64 - other.exponent as i64 - extra as i64;
        let negative = self.negative != other.negative;
        self.pack(negative, quotient, exponent);
    }

    /// Remainder of truncated division: `self - trunc(self / other) * other`.
    ///
    /// The result keeps the dividend's sign. When the truncated quotient has
    /// more digits than the mantissa holds the remainder lies below this
    /// value's last digit and the result is zero.
    pub fn modulo_by(&mut self, other: &RealValue) {
        if !self.valid {
            return;
        }
        let other = self.conform(other);
        if !other.valid {
            self.invalidate("invalid operand");
            return;
        }
        if other.is_zero() {
            self.invalidate("modulo by zero");
            return;
        }
        if self.is_zero() || self.sci() < other.sci() {
            return;
        }
        if self.sci() - other.sci() >= self.digits() as i64 {
            self.set_zero();
            return;
        }
        let base = self.base();
        let ea = self.exponent as i64;
        let eb = other.exponent as i64;
        let e = ea.min(eb);
        let a = limbs::shl_digits(&self.mantissa, (ea - e) as u32, &base);
        let b = limbs::shl_digits(&other.mantissa, (eb - e) as u32, &base);
        let (_, rem) = limbs::divrem(&a, &b, base.limit);
        let negative = self.negative;
        self.pack(negative, rem, e);
    }

    /// Three-way comparison on sign, scientific exponent, then mantissa.
    ///
    /// Invalid values sort below every valid value and equal each other.
    pub fn compare_with(&self, other: &RealValue) -> Ordering {
        match (self.valid, other.valid) {
            (false, false) => return Ordering::Equal,
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            (true, true) => {}
        }
        let other = self.conform(other);
        if other.negative != self.negative {
            return if self.negative {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        let magnitude = match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .sci()
                .cmp(&other.sci())
                .then_with(|| limbs::cmp(&self.mantissa, &other.mantissa)),
        };
        if self.negative {
            magnitude.reverse()
        } else {
            magnitude
        }
    }

    /// Truncate toward zero
    pub fn whole_part(&mut self) {
        if !self.valid || self.is_zero() || self.exponent >= 0 {
            return;
        }
        if self.sci() < 0 {
            self.set_zero();
            return;
        }
        let base = self.base();
        let dropped = (-self.exponent) as u32;
        let mag = limbs::shr_digits(&self.mantissa, dropped, &base);
        let negative = self.negative;
        self.pack(negative, mag, 0);
    }

    /// The part removed by [`whole_part`](Self::whole_part); keeps the sign
    pub fn fractional_part(&mut self) {
        if !self.valid {
            return;
        }
        let mut whole = self.clone();
        whole.whole_part();
        self.subtract(&whole);
    }

    /// Round to the nearest integer, halves away from zero
    pub fn round_to_integer(&mut self) {
        if !self.valid || self.is_zero() || self.exponent >= 0 {
            return;
        }
        let base = self.base();
        let (mut mag, up) = limbs::shr_digits_round(&self.mantissa, (-self.exponent) as u32, &base);
        if up {
            mag = limbs::add(&mag, &[1], base.limit);
        }
        let negative = self.negative;
        self.pack(negative, mag, 0);
    }

    /// Re-express the value in another radix.
    ///
    /// The old limbs are evaluated in the new radix by repeated
    /// multiplication with the old limb base, then scaled by the old radix
    /// raised to the exponent, one bounded power at a time so a value near
    /// either end of the exponent range keeps its digits. The result is
    /// rounded to this value's limb count.
    pub fn convert_to_radix(&mut self, new_radix: u32) {
        if new_radix == self.radix {
            return;
        }
        let precision = self.precision();
        if !self.valid {
            *self = RealValue::invalid_with_precision(new_radix, precision);
            return;
        }
        let mut out = RealValue::zero_with_precision(new_radix, precision.guarded());
        if !self.is_zero() {
            let limb_base = RealValue::from_i64_with_precision(
                self.value_limit as i64,
                new_radix,
                precision.guarded(),
            );
            for &limb in self.mantissa.iter().rev() {
                out.multiply_by(&limb_base);
                let digit = out.like(limb as i64);
                out.add(&digit);
            }
            // each chunk of the scale stays within half the new exponent range
            let ratio = (new_radix as f64).ln() / (self.radix as f64).ln();
            let chunk = ((out.max_sci() / 2) as f64 * ratio).max(1.0) as u64;
            let mut remaining = self.exponent.unsigned_abs() as u64;
            let first = remaining.min(chunk);
            let mut full = out.like(self.radix as i64);
            full.raise_to_int_power(first as i64);
            while remaining > 0 && out.valid && !out.is_zero() {
                let step = remaining.min(first);
                let mut scale = Cow::Borrowed(&full);
                if step < first {
                    let mut tail = out.like(self.radix as i64);
                    tail.raise_to_int_power(step as i64);
                    scale = Cow::Owned(tail);
                }
                if self.exponent >= 0 {
                    out.multiply_by(&scale);
                } else {
                    out.divide_by(&scale);
                }
                remaining -= step;
            }
            if self.negative {
                out.negate();
            }
        }
        *self = out.with_limbs(precision.limbs());
    }
}

#[cfg(test)]
mod arith_tests {
    use super::*;
    use crate::consts::Precision;

    fn dec(text: &str) -> RealValue {
        RealValue::from_str_radix(text, 10)
    }

    #[test]
    fn test_add_subtract() {
        let mut a = dec("1.25");
        a.add(&dec("2.5"));
        assert_eq!(a, dec("3.75"));
        a.subtract(&dec("5"));
        assert_eq!(a, dec("-1.25"));
        a.add(&dec("1.25"));
        assert!(a.is_zero());
        assert!(!a.is_negative());
    }

    #[test]
    fn test_add_carry_across_limbs() {
        let mut a = dec("999999999999");
        a.add(&dec("1"));
        assert_eq!(a, dec("1000000000000"));
        a.subtract(&dec("0.000001"));
        assert_eq!(a, dec("999999999999.999999"));
    }

    #[test]
    fn test_add_negligible_operand() {
        let mut a = dec("1@50");
        a.add(&dec("1@-50"));
        assert_eq!(a, dec("1@50"));

        let mut b = dec("1@-50");
        b.add(&dec("-1@50"));
        assert_eq!(b, dec("-1@50"));
    }

    #[test]
    fn test_multiply() {
        let mut a = dec("-12.5");
        a.multiply_by(&dec("8"));
        assert_eq!(a, dec("-100"));
        a.multiply_by(&dec("-0.01"));
        assert_eq!(a, dec("1"));
        a.multiply_by(&RealValue::zero(10));
        assert!(a.is_zero());
    }

    #[test]
    fn test_divide() {
        let mut a = dec("1");
        a.divide_by(&dec("3"));
        let mut b = a.clone();
        b.multiply_by(&dec("3"));
        // 0.999...9 rounds to within one unit of the last digit
        let mut err = b.clone();
        err.subtract(&dec("1"));
        assert!(err.is_zero() || err.sci() < -(a.digits() as i64) + 2);

        let mut c = dec("22");
        c.divide_by(&dec("-8"));
        assert_eq!(c, dec("-2.75"));
    }

    #[test]
    fn test_divide_by_zero_is_sticky() {
        let mut a = dec("42");
        a.divide_by(&RealValue::zero(10));
        assert!(!a.is_valid());
        a.add(&dec("1"));
        assert!(!a.is_valid());
        a.sqrt();
        assert!(!a.is_valid());

        let mut b = dec("1");
        b.multiply_by(&a);
        assert!(!b.is_valid());
    }

    #[test]
    fn test_modulo_truncates() {
        let mut a = dec("17");
        a.modulo_by(&dec("5"));
        assert_eq!(a, dec("2"));

        let mut a = dec("-17");
        a.modulo_by(&dec("5"));
        assert_eq!(a, dec("-2"));

        let mut a = dec("5.5");
        a.modulo_by(&dec("2"));
        assert_eq!(a, dec("1.5"));

        let mut a = dec("0.3");
        a.modulo_by(&dec("7"));
        assert_eq!(a, dec("0.3"));

        let mut a = dec("1");
        a.modulo_by(&RealValue::zero(10));
        assert!(!a.is_valid());
    }

    #[test]
    fn test_compare() {
        assert_eq!(dec("2").compare_with(&dec("10")), Ordering::Less);
        assert_eq!(dec("-2").compare_with(&dec("-10")), Ordering::Greater);
        assert_eq!(dec("0").compare_with(&dec("-0.001")), Ordering::Greater);
        assert_eq!(dec("0").compare_with(&dec("0.001")), Ordering::Less);
        assert_eq!(dec("1.50").compare_with(&dec("1.5")), Ordering::Equal);

        let invalid = RealValue::from_str_radix("Z", 10);
        assert_eq!(invalid.compare_with(&dec("-1@100")), Ordering::Less);
        assert_eq!(invalid.compare_with(&invalid.duplicate()), Ordering::Equal);
    }

    #[test]
    fn test_whole_and_fractional_parts() {
        let mut w = dec("-7.75");
        w.whole_part();
        assert_eq!(w, dec("-7"));

        let mut f = dec("-7.75");
        f.fractional_part();
        assert_eq!(f, dec("-0.75"));

        let mut small = dec("0.5");
        small.whole_part();
        assert!(small.is_zero());
    }

    #[test]
    fn test_round_to_integer() {
        for (text, expected) in [("2.5", 3), ("-2.5", -3), ("2.49", 2), ("0.5", 1), ("0.04", 0)] {
            let mut v = dec(text);
            v.round_to_integer();
            assert_eq!(v.to_i64(), Some(expected), "{}", text);
        }
        let mut hex = RealValue::from_str_radix("1.8", 16);
        hex.round_to_integer();
        assert_eq!(hex.to_i64(), Some(2));
    }

    #[test]
    fn test_mixed_radix_operand() {
        let mut a = RealValue::from_i64(10, 10);
        a.add(&RealValue::from_str_radix("FF", 16));
        assert_eq!(a.radix(), 10);
        assert_eq!(a.to_i64(), Some(265));
    }

    #[test]
    fn test_mixed_precision_operand() {
        let mut a = RealValue::from_i64_with_precision(1, 10, Precision::new(2));
        a.add(&RealValue::from_i64_with_precision(2, 10, Precision::new(6)));
        assert_eq!(a.precision(), Precision::new(2));
        assert_eq!(a.to_i64(), Some(3));
    }

    #[test]
    fn test_convert_radix() {
        let mut v = RealValue::from_i64(255, 10);
        v.convert_to_radix(16);
        assert_eq!(v.to_string(), "FF");
        v.convert_to_radix(2);
        assert_eq!(v.to_string(), "11111111");

        let mut f = RealValue::from_str_radix("0.1", 2);
        f.convert_to_radix(10);
        assert_eq!(f.to_string(), "0.5");

        let mut third = RealValue::from_str_radix("0.1", 3);
        third.convert_to_radix(10);
        let expected = RealValue::from_i64(1, 10) / RealValue::from_i64(3, 10);
        let mut diff = third.clone();
        diff.subtract(&expected);
        assert!(diff.is_zero() || diff.sci() < -(third.digits() as i64) + 2);
    }

    #[test]
    fn test_convert_radix_near_exponent_limits() {
        let mut tiny = RealValue::from_i64(2, 2);
        tiny.raise_to_int_power(-33000);
        assert!(tiny.is_valid() && !tiny.is_zero());
        let mut d = tiny.clone();
        d.convert_to_radix(10);
        assert!(d.is_valid());
        assert!(!d.is_zero());
        assert_eq!(d.sci(), -9934);
        let mut back = RealValue::from_i64(2, 10);
        back.raise_to_int_power(33000);
        back.multiply_by(&d);
        assert!((back.to_f64() - 1.0).abs() < 1e-15);

        let mut big = RealValue::from_i64(2, 2);
        big.raise_to_int_power(33000);
        big.convert_to_radix(10);
        assert!(big.is_valid());
        assert_eq!(big.sci(), 9933);

        let mut huge = RealValue::from_i64(2, 2);
        huge.raise_to_int_power(40000);
        assert!(huge.is_valid());
        huge.convert_to_radix(10);
        assert!(!huge.is_valid());

        let mut vanishing = RealValue::from_i64(2, 2);
        vanishing.raise_to_int_power(-40000);
        vanishing.convert_to_radix(10);
        assert!(vanishing.is_valid());
        assert!(vanishing.is_zero());
    }

    #[test]
    fn test_self_aliasing() {
        let x = dec("21.5");
        let doubled = &x + &x;
        assert_eq!(doubled, dec("43"));

        let mut y = x.clone();
        y.add(&y.duplicate());
        assert_eq!(y, dec("43"));

        let mut z = x.clone();
        z.multiply_by(&z.duplicate());
        assert_eq!(z, dec("462.25"));
    }
}
