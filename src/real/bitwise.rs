use super::RealValue;
use crate::consts::MAX_COMPLEMENT;
use crate::enums::BitOp;
use crate::limbs;

/// Two's-complement image of an integer: 32-bit words, least significant
/// first, followed by an endless run of `fill` words.
#[derive(Clone, Debug, PartialEq)]
struct BitPattern {
    words: Vec<u32>,
    fill: u32,
}

impl BitPattern {
    fn word(&self, i: usize) -> u32 {
        self.words.get(i).copied().unwrap_or(self.fill)
    }

    fn combine(&self, op: BitOp, other: &BitPattern) -> BitPattern {
        let n = self.words.len().max(other.words.len());
        BitPattern {
            words: (0..n).map(|i| op.apply(self.word(i), other.word(i))).collect(),
            fill: op.apply(self.fill, other.fill),
        }
    }

    /// Keep the low `width` bits as an unsigned pattern
    fn truncate(&mut self, width: u32) {
        let n = width.div_ceil(32) as usize;
        self.words = (0..n).map(|i| self.word(i)).collect();
        let spare = n as u32 * 32 - width;
        if let Some(top) = self.words.last_mut() {
            *top &= u32::MAX >> spare;
        }
        self.fill = 0;
    }
}

/// Add one to a word sequence, growing it on carry out.
fn increment(words: &mut Vec<u32>) {
    for w in words.iter_mut() {
        let (v, carry) = w.overflowing_add(1);
        *w = v;
        if !carry {
            return;
        }
    }
    words.push(1);
}

/// Subtract one from a nonzero word sequence.
fn decrement(words: &mut [u32]) {
    for w in words.iter_mut() {
        let (v, borrow) = w.overflowing_sub(1);
        *w = v;
        if !borrow {
            return;
        }
    }
}

impl RealValue {
    fn bit_pattern(&self) -> BitPattern {
        let mut whole = self.clone();
        whole.whole_part();
        if whole.is_zero() {
            return BitPattern {
                words: Vec::new(),
                fill: 0,
            };
        }
        let base = whole.base();
        let mag = if whole.exponent >= 0 {
            limbs::shl_digits(&whole.mantissa, whole.exponent as u32, &base)
        } else {
            limbs::shr_digits(&whole.mantissa, (-whole.exponent) as u32, &base)
        };
        let mut words = limbs::to_words(&mag, base.limit);
        if !whole.negative {
            return BitPattern { words, fill: 0 };
        }
        // -m is !(m - 1)
        decrement(&mut words);
        words.iter_mut().for_each(|w| *w = !*w);
        BitPattern {
            words,
            fill: u32::MAX,
        }
    }

    fn from_pattern(&self, pattern: BitPattern) -> RealValue {
        let mut v = self.like(0);
        let BitPattern { mut words, fill } = pattern;
        let negative = fill != 0;
        if negative {
            words.iter_mut().for_each(|w| *w = !*w);
            increment(&mut words);
        }
        let mag = limbs::from_words(&words, self.value_limit);
        v.pack(negative, mag, 0);
        v
    }

    /// Apply a bitwise operation to the integer parts of this value and
    /// `other`.
    ///
    /// A `complement` of zero works on unbounded two's complement, so results
    /// may be negative. A positive width reduces both operands modulo
    /// `2^complement` and leaves the unsigned pattern. `BitOp::Not` ignores
    /// `other`.
    pub fn bitwise_with(&mut self, op: BitOp, other: &RealValue, complement: u32) {
        if !self.valid {
            return;
        }
        let other = self.conform(other);
        if !other.valid {
            self.invalidate("invalid operand");
            return;
        }
        if complement > MAX_COMPLEMENT {
            self.invalidate("complement width too large");
            return;
        }
        let mut pattern = self.bit_pattern().combine(op, &other.bit_pattern());
        if complement > 0 {
            pattern.truncate(complement);
        }
        *self = self.from_pattern(pattern);
    }

    pub fn bitnot_with_complement(&mut self, complement: u32) {
        let this = self.duplicate();
        self.bitwise_with(BitOp::Not, &this, complement);
    }

    pub fn and_with(&mut self, other: &RealValue, complement: u32) {
        self.bitwise_with(BitOp::And, other, complement);
    }

    pub fn or_with(&mut self, other: &RealValue, complement: u32) {
        self.bitwise_with(BitOp::Or, other, complement);
    }

    pub fn xor_with(&mut self, other: &RealValue, complement: u32) {
        self.bitwise_with(BitOp::Xor, other, complement);
    }

    pub fn nand_with(&mut self, other: &RealValue, complement: u32) {
        self.bitwise_with(BitOp::Nand, other, complement);
    }

    pub fn nor_with(&mut self, other: &RealValue, complement: u32) {
        self.bitwise_with(BitOp::Nor, other, complement);
    }

    pub fn xnor_with(&mut self, other: &RealValue, complement: u32) {
        self.bitwise_with(BitOp::Xnor, other, complement);
    }

    /// A negative integer as its unsigned `width`-bit pattern; anything else
    /// unchanged.
    pub(crate) fn as_complement(&self, width: u32) -> RealValue {
        if width == 0 || width > MAX_COMPLEMENT || !self.valid || !self.negative || !self.is_integer()
        {
            return self.clone();
        }
        let mut pattern = self.bit_pattern();
        pattern.truncate(width);
        self.from_pattern(pattern)
    }
}

#[cfg(test)]
mod bitwise_tests {
    use super::*;

    fn int(n: i64) -> RealValue {
        RealValue::from_i64(n, 10)
    }

    #[test]
    fn test_bitnot() {
        let mut v = int(0);
        v.bitnot_with_complement(8);
        assert_eq!(v, int(255));

        let mut v = int(5);
        v.bitnot_with_complement(0);
        assert_eq!(v, int(-6));

        let mut v = int(-1);
        v.bitnot_with_complement(0);
        assert!(v.is_zero());
    }

    #[test]
    fn test_binary_ops() {
        let mut v = int(12);
        v.and_with(&int(10), 0);
        assert_eq!(v, int(8));

        let mut v = int(-1);
        v.and_with(&int(255), 0);
        assert_eq!(v, int(255));

        let mut v = int(-8);
        v.or_with(&int(3), 0);
        assert_eq!(v, int(-5));

        let mut v = int(-1);
        v.xor_with(&int(0), 16);
        assert_eq!(v, int(65535));

        let mut v = int(6);
        v.nand_with(&int(3), 4);
        assert_eq!(v, int(13));

        let mut v = int(6);
        v.nor_with(&int(3), 0);
        assert_eq!(v, int(-8));

        let mut v = int(6);
        v.xnor_with(&int(3), 8);
        assert_eq!(v, int(250));
    }

    #[test]
    fn test_truncates_operands() {
        let mut v = RealValue::from_str_radix("7.9", 10);
        v.and_with(&RealValue::from_str_radix("-2.5", 10), 0);
        // 7 & -2
        assert_eq!(v, int(6));
    }

    #[test]
    fn test_wide_and_odd_widths() {
        let mut v = RealValue::from_str_radix("1@30", 10);
        v.or_with(&int(1), 0);
        assert_eq!(v, RealValue::from_str_radix("1000000000000000000000000000001", 10));

        let mut v = int(0);
        v.bitnot_with_complement(100);
        let mut expected = int(2);
        expected.raise_to_int_power(100);
        expected.subtract(&int(1));
        assert_eq!(v, expected);

        let mut v = int(-1);
        v.bitnot_with_complement(129);
        assert!(!v.is_valid());
    }

    #[test]
    fn test_hex_operands() {
        let mut v = RealValue::from_str_radix("FF", 16);
        v.and_with(&RealValue::from_str_radix("F0", 16), 0);
        assert_eq!(v.to_string(), "F0");
    }

    #[test]
    fn test_as_complement() {
        assert_eq!(int(-1).as_complement(8), int(255));
        assert_eq!(int(-128).as_complement(8), int(128));
        assert_eq!(int(42).as_complement(8), int(42));
        let frac = RealValue::from_str_radix("-1.5", 10);
        assert_eq!(frac.as_complement(8), frac);
    }
}
