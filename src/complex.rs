//! Complex values built from two [`RealValue`]s.
//!
//! The imaginary part is created the first time an operation produces one
//! and stays present, possibly zero, until
//! [`reset_imaginary`](ComplexValue::reset_imaginary). Without it a value
//! behaves exactly like its real part. Real inputs that fall outside a real
//! function's domain are evaluated with the complex formula instead of
//! becoming invalid.

use crate::consts::{self, Constant, Precision};
use crate::enums::{BitOp, TrigMode};
use crate::error::EngineError;
use crate::real::RealValue;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

/// A complex number in a fixed radix and precision
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "ComplexParts", into = "ComplexParts")]
pub struct ComplexValue {
    real: RealValue,
    imaginary: Option<RealValue>,
}

/// Both parts of a [`ComplexValue`], as persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComplexParts {
    pub real: RealValue,
    pub imaginary: Option<RealValue>,
}

/// Rectangular parts at working precision
type Pair = (RealValue, RealValue);

fn apply(x: &RealValue, f: fn(&mut RealValue)) -> RealValue {
    let mut v = x.clone();
    f(&mut v);
    v
}

fn invalid_pair(like: &RealValue) -> Pair {
    let v = RealValue::invalid_with_precision(like.radix(), like.precision());
    (v.clone(), v)
}

fn add_pairs(x: &Pair, y: &Pair) -> Pair {
    (&x.0 + &y.0, &x.1 + &y.1)
}

fn sub_pairs(x: &Pair, y: &Pair) -> Pair {
    (&x.0 - &y.0, &x.1 - &y.1)
}

fn mul_pairs(x: &Pair, y: &Pair) -> Pair {
    let (a, b) = x;
    let (c, d) = y;
    (&(a * c) - &(b * d), &(a * d) + &(b * c))
}

/// Multiply by the conjugate and divide by `|y|^2`
fn div_pairs(x: &Pair, y: &Pair) -> Pair {
    let (a, b) = x;
    let (c, d) = y;
    let denom = &(c * c) + &(d * d);
    if denom.is_zero() {
        return invalid_pair(a);
    }
    let re = &(&(a * c) + &(b * d)) / &denom;
    let im = &(&(b * c) - &(a * d)) / &denom;
    (re, im)
}

/// `i * z`
fn times_i(z: &Pair) -> Pair {
    (-&z.1, z.0.clone())
}

/// `-i * z`
fn times_neg_i(z: &Pair) -> Pair {
    (z.1.clone(), -&z.0)
}

fn real_pair(x: RealValue) -> Pair {
    let zero = x.like(0);
    (x, zero)
}

fn one_pair(like: &RealValue) -> Pair {
    real_pair(like.like(1))
}

fn modulus(z: &Pair) -> RealValue {
    let mut m = &(&z.0 * &z.0) + &(&z.1 * &z.1);
    m.sqrt_core();
    m
}

/// `e^a (cos b + i sin b)`
fn exp_pair(z: &Pair) -> Pair {
    let ea = apply(&z.0, RealValue::exp_core);
    (&ea * &apply(&z.1, RealValue::cos_core), &ea * &apply(&z.1, RealValue::sin_core))
}

/// `ln|z| + i arg z`
fn ln_pair(z: &Pair) -> Pair {
    let (a, b) = z;
    let mut norm = &(a * a) + &(b * b);
    if norm.is_zero() {
        return invalid_pair(a);
    }
    norm.ln_core();
    norm.divide_by(&a.like(2));
    (norm, RealValue::atan2(b, a))
}

/// Principal square root: `sqrt((|z| + a)/2) + i sgn(b) sqrt((|z| - a)/2)`.
///
/// The larger component is taken from the half-angle form and the other is
/// `b` divided by twice it, so a zero `b` gives an exactly zero component.
fn sqrt_pair(z: &Pair) -> Pair {
    let (a, b) = z;
    if a.is_zero() && b.is_zero() {
        return z.clone();
    }
    let two = a.like(2);
    let mut abs_a = a.clone();
    abs_a.abs();
    let t = apply(&(&(&modulus(z) + &abs_a) / &two), RealValue::sqrt_core);
    let mut s = &(b / &t) / &two;
    if !a.is_negative() {
        return (t, s);
    }
    s.abs();
    let mut t = t;
    if b.is_negative() {
        t.negate();
    }
    (s, t)
}

/// Principal cube root in polar form
fn cbrt_pair(z: &Pair) -> Pair {
    let r = apply(&modulus(z), RealValue::cbrt_core);
    let theta = &RealValue::atan2(&z.1, &z.0) / &z.0.like(3);
    (&r * &apply(&theta, RealValue::cos_core), &r * &apply(&theta, RealValue::sin_core))
}

fn sin_pair(z: &Pair) -> Pair {
    let (a, b) = z;
    (
        &apply(a, RealValue::sin_core) * &apply(b, RealValue::cosh_core),
        &apply(a, RealValue::cos_core) * &apply(b, RealValue::sinh_core),
    )
}

fn cos_pair(z: &Pair) -> Pair {
    let (a, b) = z;
    (
        &apply(a, RealValue::cos_core) * &apply(b, RealValue::cosh_core),
        -&(&apply(a, RealValue::sin_core) * &apply(b, RealValue::sinh_core)),
    )
}

fn sinh_pair(z: &Pair) -> Pair {
    let (a, b) = z;
    (
        &apply(a, RealValue::sinh_core) * &apply(b, RealValue::cos_core),
        &apply(a, RealValue::cosh_core) * &apply(b, RealValue::sin_core),
    )
}

fn cosh_pair(z: &Pair) -> Pair {
    let (a, b) = z;
    (
        &apply(a, RealValue::cosh_core) * &apply(b, RealValue::cos_core),
        &apply(a, RealValue::sinh_core) * &apply(b, RealValue::sin_core),
    )
}

/// `sqrt(1 - z^2)`
fn cosine_of_arcsine(z: &Pair) -> Pair {
    sqrt_pair(&sub_pairs(&one_pair(&z.0), &mul_pairs(z, z)))
}

/// `asin z = -i ln(iz + sqrt(1 - z^2))`
fn asin_pair(z: &Pair) -> Pair {
    times_neg_i(&ln_pair(&add_pairs(&times_i(z), &cosine_of_arcsine(z))))
}

/// `acos z = -i ln(z + i sqrt(1 - z^2))`
fn acos_pair(z: &Pair) -> Pair {
    times_neg_i(&ln_pair(&add_pairs(z, &times_i(&cosine_of_arcsine(z)))))
}

/// `atan z = (i/2) ln((i + z) / (i - z))`
fn atan_pair(z: &Pair) -> Pair {
    let i = (z.0.like(0), z.0.like(1));
    let q = div_pairs(&add_pairs(&i, z), &sub_pairs(&i, z));
    let (re, im) = times_i(&ln_pair(&q));
    let two = z.0.like(2);
    (&re / &two, &im / &two)
}

/// `asinh z = ln(z + sqrt(z^2 + 1))`
fn asinh_pair(z: &Pair) -> Pair {
    let root = sqrt_pair(&add_pairs(&mul_pairs(z, z), &one_pair(&z.0)));
    ln_pair(&add_pairs(z, &root))
}

/// `acosh z = ln(z + sqrt(z + 1) sqrt(z - 1))`
fn acosh_pair(z: &Pair) -> Pair {
    let one = one_pair(&z.0);
    let root = mul_pairs(&sqrt_pair(&add_pairs(z, &one)), &sqrt_pair(&sub_pairs(z, &one)));
    ln_pair(&add_pairs(z, &root))
}

/// `atanh z = ln((1 + z) / (1 - z)) / 2`
fn atanh_pair(z: &Pair) -> Pair {
    let one = one_pair(&z.0);
    let (re, im) = ln_pair(&div_pairs(&add_pairs(&one, z), &sub_pairs(&one, z)));
    let two = z.0.like(2);
    (&re / &two, &im / &two)
}

/// Factor taking an angle in `mode` to radians, `None` for radians
fn radians_per_unit(like: &RealValue, mode: TrigMode) -> Option<RealValue> {
    mode.quarter_turn().map(|quarter| {
        let mut f = consts::constant(Constant::Pi, like.radix(), like.precision());
        f.divide_by(&like.like(2 * quarter));
        f
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TrigFamily {
    Sin,
    Cos,
    Tan,
}

impl ComplexValue {
    /// Wrap a real value with no imaginary part
    pub fn new(real: RealValue) -> Self {
        ComplexValue {
            real,
            imaginary: None,
        }
    }

    /// Create a value from rectangular parts; the imaginary part takes the
    /// real part's radix and precision
    pub fn from_parts(real: RealValue, imaginary: RealValue) -> Self {
        let imaginary = real.conform(&imaginary).into_owned();
        ComplexValue {
            real,
            imaginary: Some(imaginary),
        }
    }

    /// Create a value from a magnitude and an angle in radians
    pub fn from_polar(magnitude: &RealValue, angle: &RealValue) -> Self {
        let m = magnitude.working();
        let theta = m.conform(angle).into_owned();
        let re = &m * &apply(&theta, RealValue::cos_core);
        let im = &m * &apply(&theta, RealValue::sin_core);
        let limbs = magnitude.precision().limbs();
        ComplexValue::from_parts(re.with_limbs(limbs), im.with_limbs(limbs))
    }

    pub fn zero(radix: u32) -> Self {
        ComplexValue::new(RealValue::zero(radix))
    }

    pub fn from_i64(value: i64, radix: u32) -> Self {
        ComplexValue::new(RealValue::from_i64(value, radix))
    }

    pub fn from_f64(value: f64, radix: u32) -> Self {
        ComplexValue::new(RealValue::from_f64(value, radix))
    }

    /// Parse a real digit string, see [`RealValue::from_str_radix`]
    pub fn from_str_radix(text: &str, radix: u32) -> Self {
        ComplexValue::new(RealValue::from_str_radix(text, radix))
    }

    pub fn from_str_with_precision(text: &str, radix: u32, precision: Precision) -> Self {
        ComplexValue::new(RealValue::from_str_with_precision(text, radix, precision))
    }

    pub fn try_from_str_radix(text: &str, radix: u32) -> Result<Self, EngineError> {
        RealValue::try_from_str_radix(text, radix).map(ComplexValue::new)
    }

    pub fn pi(radix: u32) -> Self {
        ComplexValue::new(RealValue::pi(radix))
    }

    /// The imaginary unit
    pub fn i(radix: u32) -> Self {
        ComplexValue::from_parts(RealValue::zero(radix), RealValue::from_i64(1, radix))
    }

    pub fn real_part(&self) -> &RealValue {
        &self.real
    }

    /// The imaginary part, zero when absent
    pub fn imaginary_part(&self) -> RealValue {
        match &self.imaginary {
            Some(im) => im.clone(),
            None => self.real.like(0),
        }
    }

    /// The imaginary part if one has been produced
    pub fn imaginary(&self) -> Option<&RealValue> {
        self.imaginary.as_ref()
    }

    pub fn has_imaginary(&self) -> bool {
        self.imaginary.is_some()
    }

    pub fn imaginary_has_exponent(&self) -> bool {
        self.imaginary.as_ref().is_some_and(|im| im.has_exponent())
    }

    /// Drop the imaginary part, keeping only the real part
    pub fn reset_imaginary(&mut self) {
        self.imaginary = None;
    }

    pub fn radix(&self) -> u32 {
        self.real.radix()
    }

    pub fn precision(&self) -> Precision {
        self.real.precision()
    }

    pub fn is_valid(&self) -> bool {
        self.real.is_valid() && self.imaginary.as_ref().map_or(true, |im| im.is_valid())
    }

    pub fn is_zero(&self) -> bool {
        self.real.is_zero() && self.is_real()
    }

    /// Whether the imaginary part is absent or zero
    pub fn is_real(&self) -> bool {
        self.imaginary.as_ref().map_or(true, |im| im.is_zero())
    }

    pub fn has_exponent(&self) -> bool {
        self.real.has_exponent()
    }

    /// Get an independent copy to keep while the original is mutated
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// `sqrt(re^2 + im^2)`
    pub fn magnitude(&self) -> RealValue {
        if !self.is_valid() {
            return RealValue::invalid_with_precision(self.radix(), self.precision());
        }
        modulus(&self.working_pair()).with_limbs(self.limbs())
    }

    /// Argument in radians, in `(-pi, pi]`, zero for zero
    pub fn angle(&self) -> RealValue {
        if !self.is_valid() {
            return RealValue::invalid_with_precision(self.radix(), self.precision());
        }
        let (re, im) = self.working_pair();
        RealValue::atan2(&im, &re).with_limbs(self.limbs())
    }

    /// Argument expressed in `mode`; axis directions are exact
    pub fn angle_in_mode(&self, mode: TrigMode) -> RealValue {
        let quarter = match mode.quarter_turn() {
            Some(q) if self.is_valid() => q,
            _ => return self.angle(),
        };
        let im = self.imaginary_part();
        let axis = if im.is_zero() {
            Some(if self.real.is_negative() { 2 * quarter } else { 0 })
        } else if self.real.is_zero() {
            Some(if im.is_negative() { -quarter } else { quarter })
        } else {
            None
        };
        if let Some(turns) = axis {
            return self.real.like(turns);
        }
        let (re, im) = self.working_pair();
        let mut a = RealValue::atan2(&im, &re);
        if let Some(u) = radians_per_unit(&a, mode) {
            a.divide_by(&u);
        }
        a.with_limbs(self.limbs())
    }

    /// Negate the imaginary part in place
    pub fn conjugate(&mut self) {
        if let Some(im) = self.imaginary.as_mut() {
            im.negate();
        }
    }

    pub fn convert_to_radix(&mut self, new_radix: u32) {
        self.real.convert_to_radix(new_radix);
        if let Some(im) = self.imaginary.as_mut() {
            im.convert_to_radix(new_radix);
        }
    }

    /// Compare real parts, then imaginary parts
    pub fn compare_with(&self, other: &ComplexValue) -> Ordering {
        self.real
            .compare_with(&other.real)
            .then_with(|| self.imaginary_part().compare_with(&other.imaginary_part()))
    }

    /// Replace this value with `other` in this value's radix and precision
    pub fn assign(&mut self, other: &ComplexValue) {
        self.real.assign(&other.real);
        self.imaginary = other
            .imaginary
            .as_ref()
            .map(|im| self.real.conform(im).into_owned());
    }

    pub fn negate(&mut self) {
        self.real.negate();
        if let Some(im) = self.imaginary.as_mut() {
            im.negate();
        }
    }

    /// Replace the value with its magnitude
    pub fn abs(&mut self) {
        if self.is_real() {
            self.real.abs();
            return;
        }
        self.real = self.magnitude();
        self.imaginary = Some(self.real.like(0));
    }

    // =====================================================================
    // Internal helpers
    // =====================================================================

    fn limbs(&self) -> usize {
        self.real.precision().limbs()
    }

    fn zero_part(&self) -> RealValue {
        RealValue::zero_with_precision(self.radix(), self.precision())
    }

    fn imaginary_mut(&mut self) -> &mut RealValue {
        let zero = self.zero_part();
        self.imaginary.get_or_insert(zero)
    }

    fn invalidate(&mut self, reason: &'static str) {
        self.real.invalidate(reason);
        if let Some(im) = self.imaginary.as_mut() {
            im.invalidate(reason);
        }
    }

    /// Both parts with guard limbs
    fn working_pair(&self) -> Pair {
        let re = self.real.working();
        let im = match &self.imaginary {
            Some(im) => im.working(),
            None => re.like(0),
        };
        (re, im)
    }

    /// `other`'s parts in this value's radix, with guard limbs
    fn working_pair_of(&self, other: &ComplexValue) -> Pair {
        let w = self.real.working();
        let re = w.conform(&other.real).into_owned();
        let im = match &other.imaginary {
            Some(im) => w.conform(im).into_owned(),
            None => w.like(0),
        };
        (re, im)
    }

    /// Round a working result back into this value
    fn settle(&mut self, z: Pair) {
        let limbs = self.limbs();
        let (re, im) = z;
        let valid = re.is_valid() && im.is_valid();
        self.real = re.with_limbs(limbs);
        self.imaginary = Some(im.with_limbs(limbs));
        if !valid {
            self.invalidate("complex result out of range");
        }
    }

    fn escalate(&self, op: &'static str) -> Pair {
        tracing::trace!(op, radix = self.radix(), "evaluating in the complex domain");
        self.working_pair()
    }

    fn require_real(&mut self, op: &'static str) -> bool {
        if self.is_real() {
            return true;
        }
        tracing::debug!(op, "integer operation on a complex value");
        self.invalidate(op);
        false
    }

    // =====================================================================
    // Arithmetic
    // =====================================================================

    pub fn add(&mut self, other: &ComplexValue) {
        RealValue::add(&mut self.real, &other.real);
        if let Some(im) = &other.imaginary {
            self.imaginary_mut().add(im);
        }
    }

    pub fn subtract(&mut self, other: &ComplexValue) {
        self.real.subtract(&other.real);
        if let Some(im) = &other.imaginary {
            self.imaginary_mut().subtract(im);
        }
    }

    pub fn multiply_by(&mut self, other: &ComplexValue) {
        if !self.is_valid() {
            return;
        }
        if self.is_real() && other.is_real() {
            self.real.multiply_by(&other.real);
            if other.has_imaginary() {
                self.imaginary_mut();
            }
            if !other.is_valid() {
                self.invalidate("invalid operand");
            }
            return;
        }
        let z = mul_pairs(&self.working_pair(), &self.working_pair_of(other));
        self.settle(z);
    }

    pub fn divide_by(&mut self, other: &ComplexValue) {
        if !self.is_valid() {
            return;
        }
        if !other.is_valid() {
            self.invalidate("invalid operand");
            return;
        }
        if other.is_real() {
            self.real.divide_by(&other.real);
            let divisor = &other.real;
            if let Some(im) = self.imaginary.as_mut() {
                im.divide_by(divisor);
            }
            if other.has_imaginary() {
                self.imaginary_mut();
            }
            if !self.real.is_valid() {
                self.invalidate("division by zero");
            }
            return;
        }
        let z = div_pairs(&self.working_pair(), &self.working_pair_of(other));
        self.settle(z);
    }

    /// Remainder of truncated division; both operands must be real
    pub fn modulo_by(&mut self, other: &ComplexValue) {
        if !other.is_real() {
            self.invalidate("modulo by a complex value");
            return;
        }
        if self.require_real("modulo of a complex value") {
            self.real.modulo_by(&other.real);
        }
    }

    // =====================================================================
    // Transcendental functions
    // =====================================================================

    pub fn power_of_e(&mut self) {
        if !self.is_valid() {
            return;
        }
        if self.is_real() {
            self.real.power_of_e();
            return;
        }
        let z = exp_pair(&self.working_pair());
        self.settle(z);
    }

    /// Natural logarithm; negative reals give `ln|x| + i pi`
    pub fn ln(&mut self) {
        if !self.is_valid() {
            return;
        }
        if self.is_real() && !self.real.is_negative() {
            self.real.ln();
            return;
        }
        let z = ln_pair(&self.escalate("ln"));
        self.settle(z);
    }

    pub fn log_of_base(&mut self, base: &ComplexValue) {
        if !self.is_valid() {
            return;
        }
        let positive = |v: &ComplexValue| v.is_real() && !v.real.is_negative();
        if positive(self) && positive(base) {
            self.real.log_of_base(&base.real);
            return;
        }
        let num = ln_pair(&self.escalate("log"));
        let den = ln_pair(&self.working_pair_of(base));
        self.settle(div_pairs(&num, &den));
    }

    /// `x^y`, evaluated as `exp(y ln x)` off the real domain
    pub fn raise_to_power(&mut self, y: &ComplexValue) {
        if !self.is_valid() {
            return;
        }
        if !y.is_valid() {
            self.invalidate("invalid operand");
            return;
        }
        if self.is_real() && y.is_real() {
            let base = &self.real;
            if !base.is_negative() || base.is_zero() || y.real.is_integer() {
                self.real.raise_to_power(&y.real);
                return;
            }
        }
        if self.is_zero() {
            if y.real.is_negative() || y.real.is_zero() {
                self.invalidate("zero raised to a non-positive complex power");
            }
            return;
        }
        let lx = ln_pair(&self.escalate("power"));
        let z = exp_pair(&mul_pairs(&self.working_pair_of(y), &lx));
        self.settle(z);
    }

    /// Principal square root; `sqrt(-4)` is `2i`
    pub fn sqrt(&mut self) {
        if !self.is_valid() {
            return;
        }
        if self.is_real() && !self.real.is_negative() {
            self.real.sqrt();
            return;
        }
        let z = sqrt_pair(&self.escalate("sqrt"));
        self.settle(z);
    }

    /// Real cube root for real input, principal root otherwise
    pub fn cbrt(&mut self) {
        if !self.is_valid() {
            return;
        }
        if self.is_real() {
            self.real.cbrt();
            return;
        }
        let z = cbrt_pair(&self.working_pair());
        self.settle(z);
    }

    pub fn inverse(&mut self) {
        if !self.is_valid() {
            return;
        }
        if self.is_real() {
            self.real.inverse();
            return;
        }
        let w = self.working_pair();
        let z = div_pairs(&one_pair(&w.0), &w);
        self.settle(z);
    }

    pub fn sin_with_trig_mode(&mut self, mode: TrigMode, inv: bool, hyp: bool) {
        self.trig(TrigFamily::Sin, mode, inv, hyp);
    }

    pub fn cos_with_trig_mode(&mut self, mode: TrigMode, inv: bool, hyp: bool) {
        self.trig(TrigFamily::Cos, mode, inv, hyp);
    }

    pub fn tan_with_trig_mode(&mut self, mode: TrigMode, inv: bool, hyp: bool) {
        self.trig(TrigFamily::Tan, mode, inv, hyp);
    }

    /// Whether the real function is defined at this (real) value
    fn in_real_domain(&self, f: TrigFamily, inv: bool, hyp: bool) -> bool {
        if !self.is_real() {
            return false;
        }
        if !inv {
            return true;
        }
        let one = self.real.like(1);
        let mut m = self.real.clone();
        m.abs();
        match (f, hyp) {
            (TrigFamily::Tan, false) | (TrigFamily::Sin, true) => true,
            (_, false) => m <= one,
            (TrigFamily::Cos, true) => self.real >= one,
            (TrigFamily::Tan, true) => m < one,
        }
    }

    fn trig(&mut self, f: TrigFamily, mode: TrigMode, inv: bool, hyp: bool) {
        if !self.is_valid() {
            return;
        }
        if self.in_real_domain(f, inv, hyp) {
            match f {
                TrigFamily::Sin => self.real.sin_with_trig_mode(mode, inv, hyp),
                TrigFamily::Cos => self.real.cos_with_trig_mode(mode, inv, hyp),
                TrigFamily::Tan => self.real.tan_with_trig_mode(mode, inv, hyp),
            }
            return;
        }

        let mut z = self.escalate("trig");
        let unit = if hyp {
            None
        } else {
            radians_per_unit(&z.0, mode)
        };
        if let (false, Some(u)) = (inv, &unit) {
            z = (&z.0 * u, &z.1 * u);
        }
        let mut r = match (f, inv, hyp) {
            (TrigFamily::Sin, false, false) => sin_pair(&z),
            (TrigFamily::Cos, false, false) => cos_pair(&z),
            (TrigFamily::Tan, false, false) => div_pairs(&sin_pair(&z), &cos_pair(&z)),
            (TrigFamily::Sin, false, true) => sinh_pair(&z),
            (TrigFamily::Cos, false, true) => cosh_pair(&z),
            (TrigFamily::Tan, false, true) => div_pairs(&sinh_pair(&z), &cosh_pair(&z)),
            (TrigFamily::Sin, true, false) => asin_pair(&z),
            (TrigFamily::Cos, true, false) => acos_pair(&z),
            (TrigFamily::Tan, true, false) => atan_pair(&z),
            (TrigFamily::Sin, true, true) => asinh_pair(&z),
            (TrigFamily::Cos, true, true) => acosh_pair(&z),
            (TrigFamily::Tan, true, true) => atanh_pair(&z),
        };
        if let (true, Some(u)) = (inv, &unit) {
            r = (&r.0 / u, &r.1 / u);
        }
        self.settle(r);
    }

    // =====================================================================
    // Real-only operations
    // =====================================================================

    pub fn factorial(&mut self) {
        if self.require_real("factorial of a complex value") {
            self.real.factorial();
        }
    }

    pub fn sum(&mut self) {
        if self.require_real("sum of a complex value") {
            self.real.sum();
        }
    }

    pub fn n_pr(&mut self, r: &ComplexValue) {
        if !r.is_real() {
            self.invalidate("permutations of a complex value");
        } else if self.require_real("permutations of a complex value") {
            self.real.n_pr(&r.real);
        }
    }

    pub fn n_cr(&mut self, r: &ComplexValue) {
        if !r.is_real() {
            self.invalidate("combinations of a complex value");
        } else if self.require_real("combinations of a complex value") {
            self.real.n_cr(&r.real);
        }
    }

    /// Truncate both parts toward zero
    pub fn whole_part(&mut self) {
        self.real.whole_part();
        if let Some(im) = self.imaginary.as_mut() {
            im.whole_part();
        }
    }

    /// The parts removed by [`whole_part`](Self::whole_part)
    pub fn fractional_part(&mut self) {
        self.real.fractional_part();
        if let Some(im) = self.imaginary.as_mut() {
            im.fractional_part();
        }
    }

    /// Round both parts to the nearest integer
    pub fn round_to_integer(&mut self) {
        self.real.round_to_integer();
        if let Some(im) = self.imaginary.as_mut() {
            im.round_to_integer();
        }
    }

    pub fn bitwise_with(&mut self, op: BitOp, other: &ComplexValue, complement: u32) {
        if !other.is_real() {
            self.invalidate("bitwise operation on a complex value");
        } else if self.require_real("bitwise operation on a complex value") {
            self.real.bitwise_with(op, &other.real, complement);
        }
    }

    pub fn bitnot_with_complement(&mut self, complement: u32) {
        if self.require_real("bitwise operation on a complex value") {
            self.real.bitnot_with_complement(complement);
        }
    }

    pub fn and_with(&mut self, other: &ComplexValue, complement: u32) {
        self.bitwise_with(BitOp::And, other, complement);
    }

    pub fn or_with(&mut self, other: &ComplexValue, complement: u32) {
        self.bitwise_with(BitOp::Or, other, complement);
    }

    pub fn xor_with(&mut self, other: &ComplexValue, complement: u32) {
        self.bitwise_with(BitOp::Xor, other, complement);
    }

    pub fn nand_with(&mut self, other: &ComplexValue, complement: u32) {
        self.bitwise_with(BitOp::Nand, other, complement);
    }

    pub fn nor_with(&mut self, other: &ComplexValue, complement: u32) {
        self.bitwise_with(BitOp::Nor, other, complement);
    }

    pub fn xnor_with(&mut self, other: &ComplexValue, complement: u32) {
        self.bitwise_with(BitOp::Xnor, other, complement);
    }
}

impl TryFrom<ComplexParts> for ComplexValue {
    type Error = EngineError;

    fn try_from(parts: ComplexParts) -> Result<Self, Self::Error> {
        if let Some(im) = &parts.imaginary {
            if im.radix() != parts.real.radix() || im.precision() != parts.real.precision() {
                return Err(EngineError::Deserialize(
                    "real and imaginary parts differ in radix or precision".to_string(),
                ));
            }
        }
        Ok(ComplexValue {
            real: parts.real,
            imaginary: parts.imaginary,
        })
    }
}

impl From<ComplexValue> for ComplexParts {
    fn from(value: ComplexValue) -> Self {
        ComplexParts {
            real: value.real,
            imaginary: value.imaginary,
        }
    }
}

impl From<RealValue> for ComplexValue {
    fn from(real: RealValue) -> Self {
        ComplexValue::new(real)
    }
}

impl Default for ComplexValue {
    fn default() -> Self {
        ComplexValue::zero(10)
    }
}

impl PartialEq for ComplexValue {
    fn eq(&self, other: &Self) -> bool {
        self.compare_with(other) == Ordering::Equal
    }
}

impl fmt::Display for ComplexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() || self.is_real() {
            return write!(f, "{}", self.real);
        }
        let im = self.imaginary_part();
        let mut magnitude = im.clone();
        magnitude.abs();
        let unit = magnitude == im.like(1);

        if self.real.is_zero() {
            match (unit, im.is_negative()) {
                (true, false) => write!(f, "i"),
                (true, true) => write!(f, "-i"),
                (false, _) => write!(f, "{}i", im),
            }
        } else {
            let sign = if im.is_negative() { '-' } else { '+' };
            if unit {
                write!(f, "{} {} i", self.real, sign)
            } else {
                write!(f, "{} {} {}i", self.real, sign, magnitude)
            }
        }
    }
}

macro_rules! complex_binary_op {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $engine:ident) => {
        impl $op<&ComplexValue> for &ComplexValue {
            type Output = ComplexValue;

            fn $method(self, rhs: &ComplexValue) -> ComplexValue {
                let mut out = self.clone();
                ComplexValue::$engine(&mut out, rhs);
                out
            }
        }

        impl $op<ComplexValue> for ComplexValue {
            type Output = ComplexValue;

            fn $method(mut self, rhs: ComplexValue) -> ComplexValue {
                ComplexValue::$engine(&mut self, &rhs);
                self
            }
        }

        impl $assign<&ComplexValue> for ComplexValue {
            fn $assign_method(&mut self, rhs: &ComplexValue) {
                ComplexValue::$engine(self, rhs);
            }
        }
    };
}

complex_binary_op!(Add, add, AddAssign, add_assign, add);
complex_binary_op!(Sub, sub, SubAssign, sub_assign, subtract);
complex_binary_op!(Mul, mul, MulAssign, mul_assign, multiply_by);
complex_binary_op!(Div, div, DivAssign, div_assign, divide_by);
complex_binary_op!(Rem, rem, RemAssign, rem_assign, modulo_by);

impl Neg for ComplexValue {
    type Output = ComplexValue;

    fn neg(mut self) -> ComplexValue {
        self.negate();
        self
    }
}

impl Neg for &ComplexValue {
    type Output = ComplexValue;

    fn neg(self) -> ComplexValue {
        let mut out = self.clone();
        out.negate();
        out
    }
}

impl Zero for ComplexValue {
    fn zero() -> Self {
        ComplexValue::zero(10)
    }

    fn is_zero(&self) -> bool {
        self.is_valid() && ComplexValue::is_zero(self)
    }
}

impl One for ComplexValue {
    fn one() -> Self {
        ComplexValue::from_i64(1, 10)
    }
}
