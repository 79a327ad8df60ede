//! Magnitude arithmetic on little-endian limb sequences.
//!
//! A magnitude is a non-negative integer stored as `Vec<Limb>`, least
//! significant limb first, in base `LimbBase::limit = radix^digits`. Only the
//! low half-word of each `u64` limb is ever populated (`limit <= 2^32`), so the
//! product of two limbs plus a carry always fits in the native 64-bit word.
//! Leading zero limbs are allowed on input and trimmed on output.

use std::cmp::Ordering;

/// One element of a mantissa.
pub type Limb = u64;

/// Exclusive upper bound on the value held in a limb.
pub const HALF_WORD: u64 = 1 << 32;

/// Radix parameters shared by every limb operation on one value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LimbBase {
    /// Radix of a single digit
    pub radix: u32,
    /// Radix digits packed into one limb
    pub digits: u32,
    /// `radix^digits`, the limb base
    pub limit: u64,
}

impl LimbBase {
    /// Derive the packing for a radix: the most digits whose combined range
    /// still fits in a half-word.
    pub fn new(radix: u32) -> Self {
        debug_assert!(radix >= 2, "radix must be at least 2");
        let r = radix as u64;
        let mut digits = 0;
        let mut limit = 1u64;
        while limit * r <= HALF_WORD {
            limit *= r;
            digits += 1;
        }
        LimbBase {
            radix,
            digits,
            limit,
        }
    }

    /// `radix^k` for `k <= digits`
    pub fn pow(&self, k: u32) -> u64 {
        debug_assert!(k <= self.digits);
        (self.radix as u64).pow(k)
    }
}

/// Drop leading (most significant) zero limbs.
pub fn trim(v: &mut Vec<Limb>) {
    while v.last() == Some(&0) {
        v.pop();
    }
}

fn trimmed(v: &[Limb]) -> &[Limb] {
    let mut n = v.len();
    while n > 0 && v[n - 1] == 0 {
        n -= 1;
    }
    &v[..n]
}

pub fn is_zero(v: &[Limb]) -> bool {
    v.iter().all(|&l| l == 0)
}

/// Three-way comparison of two magnitudes.
pub fn cmp(a: &[Limb], b: &[Limb]) -> Ordering {
    let a = trimmed(a);
    let b = trimmed(b);
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    for i in (0..a.len()).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// `a + b`
pub fn add(a: &[Limb], b: &[Limb], limit: u64) -> Vec<Limb> {
    let n = a.len().max(b.len());
    let mut out = Vec::with_capacity(n + 1);
    let mut carry = 0u64;
    for i in 0..n {
        let s = a.get(i).copied().unwrap_or(0) + b.get(i).copied().unwrap_or(0) + carry;
        out.push(s % limit);
        carry = s / limit;
    }
    if carry > 0 {
        out.push(carry);
    }
    trim(&mut out);
    out
}

/// `a - b`, requires `a >= b`.
pub fn sub(a: &[Limb], b: &[Limb], limit: u64) -> Vec<Limb> {
    debug_assert!(cmp(a, b) != Ordering::Less, "magnitude subtraction underflow");
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0u64;
    for i in 0..a.len() {
        let rhs = b.get(i).copied().unwrap_or(0) + borrow;
        if a[i] >= rhs {
            out.push(a[i] - rhs);
            borrow = 0;
        } else {
            out.push(a[i] + limit - rhs);
            borrow = 1;
        }
    }
    trim(&mut out);
    out
}

/// Schoolbook product. Every partial product `a[i] * b[j] + out[i+j] + carry`
/// stays below `limit^2 + 2*limit`, well inside `u64` for `limit <= 2^32`
/// once the column is reduced after each step.
pub fn mul(a: &[Limb], b: &[Limb], limit: u64) -> Vec<Limb> {
    let a = trimmed(a);
    let b = trimmed(b);
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0u64; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (j, &y) in b.iter().enumerate() {
            let t = x * y + carry;
            let lo = t % limit + out[i + j];
            out[i + j] = lo % limit;
            carry = t / limit + lo / limit;
        }
        let mut k = i + b.len();
        while carry > 0 {
            let s = out[k] + carry;
            out[k] = s % limit;
            carry = s / limit;
            k += 1;
        }
    }
    trim(&mut out);
    out
}

/// `a * s` for a single word multiplier of any size up to `2^32`.
pub fn mul_small(a: &[Limb], s: u64, limit: u64) -> Vec<Limb> {
    let mut out = Vec::with_capacity(a.len() + 2);
    let mut carry = 0u128;
    for &x in a {
        let t = x as u128 * s as u128 + carry;
        out.push((t % limit as u128) as u64);
        carry = t / limit as u128;
    }
    while carry > 0 {
        out.push((carry % limit as u128) as u64);
        carry /= limit as u128;
    }
    trim(&mut out);
    out
}

/// `(a / s, a % s)` for a single nonzero word divisor.
pub fn divrem_small(a: &[Limb], s: u64, limit: u64) -> (Vec<Limb>, u64) {
    debug_assert!(s > 0, "division by zero word");
    let mut out = vec![0u64; a.len()];
    let mut rem = 0u128;
    for i in (0..a.len()).rev() {
        let cur = rem * limit as u128 + a[i] as u128;
        out[i] = (cur / s as u128) as u64;
        rem = cur % s as u128;
    }
    trim(&mut out);
    (out, rem as u64)
}

/// Long division `(u / v, u % v)` for a nonzero divisor.
///
/// Each quotient limb is estimated from the top two limbs of the running
/// remainder against the top limb of the normalized divisor, then corrected
/// by at most two trial subtractions.
pub fn divrem(u: &[Limb], v: &[Limb], limit: u64) -> (Vec<Limb>, Vec<Limb>) {
    let u = trimmed(u);
    let v = trimmed(v);
    debug_assert!(!v.is_empty(), "division by zero magnitude");
    if cmp(u, v) == Ordering::Less {
        return (Vec::new(), u.to_vec());
    }
    if v.len() == 1 {
        let (q, r) = divrem_small(u, v[0], limit);
        let mut r = vec![r];
        trim(&mut r);
        return (q, r);
    }

    let n = v.len();
    let m = u.len() - n;
    let d = limit / (v[n - 1] + 1);
    let mut vn = mul_small(v, d, limit);
    vn.resize(n, 0);
    let mut un = mul_small(u, d, limit);
    un.resize(m + n + 1, 0);

    let b = limit as u128;
    let v_top = vn[n - 1] as u128;
    let v_next = vn[n - 2] as u128;
    let mut q = vec![0u64; m + 1];

    for j in (0..=m).rev() {
        let num = un[j + n] as u128 * b + un[j + n - 1] as u128;
        let mut qhat = num / v_top;
        let mut rhat = num % v_top;
        while qhat >= b || (rhat < b && qhat * v_next > rhat * b + un[j + n - 2] as u128) {
            qhat -= 1;
            rhat += v_top;
        }

        // multiply and subtract
        let mut carry = 0u64;
        let mut borrow = 0i64;
        for i in 0..n {
            let p = qhat as u64 * vn[i] + carry;
            carry = p / limit;
            let t = un[i + j] as i64 - (p % limit) as i64 - borrow;
            if t < 0 {
                un[i + j] = (t + limit as i64) as u64;
                borrow = 1;
            } else {
                un[i + j] = t as u64;
                borrow = 0;
            }
        }
        let t = un[j + n] as i64 - carry as i64 - borrow;
        let overshoot = t < 0;
        un[j + n] = if overshoot {
            (t + limit as i64) as u64
        } else {
            t as u64
        };

        // estimate was one too large: add the divisor back
        if overshoot {
            qhat -= 1;
            let mut c = 0u64;
            for i in 0..n {
                let s = un[i + j] + vn[i] + c;
                un[i + j] = s % limit;
                c = s / limit;
            }
            un[j + n] = (un[j + n] + c) % limit;
        }
        q[j] = qhat as u64;
    }

    trim(&mut q);
    un.truncate(n);
    let (r, _) = divrem_small(&un, d, limit);
    (q, r)
}

/// Number of radix digits in a single limb value (0 for 0).
fn word_digits(mut x: u64, radix: u32) -> u32 {
    let mut n = 0;
    while x > 0 {
        x /= radix as u64;
        n += 1;
    }
    n
}

/// Number of radix digits in a magnitude (0 for zero).
pub fn digit_len(a: &[Limb], base: &LimbBase) -> u32 {
    let a = trimmed(a);
    match a.last() {
        None => 0,
        Some(&top) => (a.len() as u32 - 1) * base.digits + word_digits(top, base.radix),
    }
}

/// Multiply by `radix^k`.
pub fn shl_digits(a: &[Limb], k: u32, base: &LimbBase) -> Vec<Limb> {
    let limbs = (k / base.digits) as usize;
    let rest = k % base.digits;
    let mut out = vec![0u64; limbs];
    out.extend_from_slice(a);
    if rest == 0 {
        trim(&mut out);
        out
    } else {
        mul_small(&out, base.pow(rest), base.limit)
    }
}

/// Divide by `radix^k`, discarding the remainder.
pub fn shr_digits(a: &[Limb], k: u32, base: &LimbBase) -> Vec<Limb> {
    let limbs = (k / base.digits) as usize;
    if limbs >= a.len() {
        return Vec::new();
    }
    let rest = k % base.digits;
    let tail = &a[limbs..];
    if rest == 0 {
        let mut out = tail.to_vec();
        trim(&mut out);
        out
    } else {
        divrem_small(tail, base.pow(rest), base.limit).0
    }
}

/// Divide by `radix^k` and report whether the first discarded digit calls
/// for rounding the quotient up (half-up on that digit).
pub fn shr_digits_round(a: &[Limb], k: u32, base: &LimbBase) -> (Vec<Limb>, bool) {
    if k == 0 {
        let mut out = a.to_vec();
        trim(&mut out);
        return (out, false);
    }
    let partial = shr_digits(a, k - 1, base);
    let (q, first_dropped) = divrem_small(&partial, base.radix as u64, base.limit);
    (q, first_dropped * 2 >= base.radix as u64)
}

/// The digit at position `k` (0 = least significant).
pub fn digit_at(a: &[Limb], k: u32, base: &LimbBase) -> u8 {
    let limb = a.get((k / base.digits) as usize).copied().unwrap_or(0);
    ((limb / base.pow(k % base.digits)) % base.radix as u64) as u8
}

/// Digits, most significant first, without leading zeros.
pub fn to_digits(a: &[Limb], base: &LimbBase) -> Vec<u8> {
    let len = digit_len(a, base);
    (0..len).rev().map(|k| digit_at(a, k, base)).collect()
}

/// Build a magnitude from digits given most significant first.
pub fn from_digits(digits: &[u8], base: &LimbBase) -> Vec<Limb> {
    let mut out = Vec::with_capacity(digits.len() / base.digits as usize + 1);
    for chunk in digits.rchunks(base.digits as usize) {
        let limb = chunk
            .iter()
            .fold(0u64, |acc, &d| acc * base.radix as u64 + d as u64);
        out.push(limb);
    }
    trim(&mut out);
    out
}

pub fn from_u128(mut n: u128, limit: u64) -> Vec<Limb> {
    let mut out = Vec::new();
    while n > 0 {
        out.push((n % limit as u128) as u64);
        n /= limit as u128;
    }
    out
}

/// The magnitude as a `u128`, if it fits.
pub fn to_u128(a: &[Limb], limit: u64) -> Option<u128> {
    let mut acc = 0u128;
    for &l in trimmed(a).iter().rev() {
        acc = acc.checked_mul(limit as u128)?.checked_add(l as u128)?;
    }
    Some(acc)
}

/// Re-express a magnitude in base `2^32` words (least significant first).
pub fn to_words(a: &[Limb], limit: u64) -> Vec<u32> {
    let mut rest = trimmed(a).to_vec();
    let mut words = Vec::new();
    while !rest.is_empty() {
        let (q, r) = divrem_small(&rest, HALF_WORD, limit);
        words.push(r as u32);
        rest = q;
    }
    words
}

/// Inverse of [`to_words`].
pub fn from_words(words: &[u32], limit: u64) -> Vec<Limb> {
    let mut acc: Vec<Limb> = Vec::new();
    for &w in words.iter().rev() {
        acc = mul_small(&acc, HALF_WORD, limit);
        acc = add(&acc, &[w as u64], limit);
    }
    acc
}

#[cfg(test)]
mod limbs_tests {
    use super::*;

    fn dec() -> LimbBase {
        LimbBase::new(10)
    }

    #[test]
    fn test_packing() {
        let b = LimbBase::new(2);
        assert_eq!(b.digits, 32);
        assert_eq!(b.limit, HALF_WORD);

        let b = LimbBase::new(10);
        assert_eq!(b.digits, 9);
        assert_eq!(b.limit, 1_000_000_000);

        let b = LimbBase::new(16);
        assert_eq!(b.digits, 8);

        let b = LimbBase::new(36);
        assert_eq!(b.digits, 6);
        assert!(b.limit <= HALF_WORD);
    }

    #[test]
    fn test_add_sub_carry() {
        let b = dec();
        let a = from_u128(999_999_999_999_999_999, b.limit);
        let one = from_u128(1, b.limit);
        let s = add(&a, &one, b.limit);
        assert_eq!(to_u128(&s, b.limit), Some(1_000_000_000_000_000_000));
        let d = sub(&s, &one, b.limit);
        assert_eq!(to_u128(&d, b.limit), Some(999_999_999_999_999_999));
        assert_eq!(cmp(&s, &a), Ordering::Greater);
        assert_eq!(cmp(&d, &a), Ordering::Equal);
    }

    #[test]
    fn test_mul_matches_u128() {
        for radix in [2u32, 7, 10, 16, 36] {
            let b = LimbBase::new(radix);
            let x = 123_456_789_012_345u128;
            let y = 987_654_321_098u128;
            let p = mul(&from_u128(x, b.limit), &from_u128(y, b.limit), b.limit);
            assert_eq!(to_u128(&p, b.limit), Some(x * y), "radix {}", radix);
        }
    }

    #[test]
    fn test_divrem_matches_u128() {
        for radix in [2u32, 3, 10, 16, 36] {
            let b = LimbBase::new(radix);
            let cases = [
                (u128::MAX / 3, 1_000_000_007u128),
                (u128::MAX / 7, 123_456_789_123_456_789u128),
                (98_765_432_109_876_543_210u128, 12_345_678_901u128),
                (5, 7),
            ];
            for (x, y) in cases {
                let (q, r) = divrem(&from_u128(x, b.limit), &from_u128(y, b.limit), b.limit);
                assert_eq!(to_u128(&q, b.limit), Some(x / y), "radix {} {}/{}", radix, x, y);
                assert_eq!(to_u128(&r, b.limit), Some(x % y), "radix {} {}%{}", radix, x, y);
            }
        }
    }

    #[test]
    fn test_digit_shifts() {
        let b = dec();
        let a = from_u128(12345, b.limit);
        assert_eq!(digit_len(&a, &b), 5);
        let s = shl_digits(&a, 13, &b);
        assert_eq!(to_u128(&s, b.limit), Some(12345 * 10u128.pow(13)));
        assert_eq!(to_u128(&shr_digits(&s, 13, &b), b.limit), Some(12345));

        let (q, up) = shr_digits_round(&a, 2, &b);
        assert_eq!(to_u128(&q, b.limit), Some(123));
        assert!(!up);
        let (q, up) = shr_digits_round(&from_u128(12350, b.limit), 2, &b);
        assert_eq!(to_u128(&q, b.limit), Some(123));
        assert!(up);
    }

    #[test]
    fn test_digits_and_words() {
        let b = LimbBase::new(16);
        let a = from_digits(&[15, 15, 0, 1], &b);
        assert_eq!(to_u128(&a, b.limit), Some(0xFF01));
        assert_eq!(to_digits(&a, &b), vec![15, 15, 0, 1]);

        let d = dec();
        let big = from_u128(0x1234_5678_9ABC_DEF0_1122, d.limit);
        let words = to_words(&big, d.limit);
        assert_eq!(words, vec![0xDEF0_1122, 0x5678_9ABC, 0x1234]);
        assert_eq!(cmp(&from_words(&words, d.limit), &big), Ordering::Equal);
    }
}
