use super::RealValue;
use crate::consts::{
    self, Constant, Precision, ATAN_HALVINGS, COMBINATORIC_LIMIT, EXP_HALVINGS, LN_ROOTS,
    NEWTON_LIMIT, SERIES_LIMIT,
};
use crate::enums::TrigMode;
use crate::limbs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Circular {
    Sin,
    Cos,
    Tan,
}

/// Whether adding `term` to `sum` can no longer change it.
fn negligible(term: &RealValue, sum: &RealValue) -> bool {
    if !term.valid || term.is_zero() {
        return true;
    }
    !sum.is_zero() && term.sci() < sum.sci() - sum.digits() as i64 - 1
}

/// Whether two successive Newton iterates agree to the last two digits.
fn settled(prev: &RealValue, next: &RealValue) -> bool {
    let diff = next - prev;
    !diff.valid || diff.is_zero() || diff.sci() < next.sci() - next.digits() as i64 + 2
}

/// Value of a circular function at a whole number of quarter turns.
fn exact_circular(f: Circular, quadrant: i64) -> Option<i64> {
    match (f, quadrant) {
        (Circular::Sin, 0) | (Circular::Sin, 2) => Some(0),
        (Circular::Sin, 1) => Some(1),
        (Circular::Sin, _) => Some(-1),
        (Circular::Cos, 1) | (Circular::Cos, 3) => Some(0),
        (Circular::Cos, 0) => Some(1),
        (Circular::Cos, _) => Some(-1),
        (Circular::Tan, 0) | (Circular::Tan, 2) => Some(0),
        (Circular::Tan, _) => None,
    }
}

impl RealValue {
    // =====================================================================
    // Exponential, logarithm, powers
    // =====================================================================

    /// Raise e to this value
    pub fn power_of_e(&mut self) {
        if !self.valid {
            return;
        }
        let mut w = self.working();
        w.exp_core();
        self.settle(w);
    }

    /// Natural logarithm; zero and negative values become invalid
    pub fn ln(&mut self) {
        if !self.valid {
            return;
        }
        if self.negative || self.is_zero() {
            self.invalidate("logarithm of a non-positive value");
            return;
        }
        let mut w = self.working();
        w.ln_core();
        self.settle(w);
    }

    /// Logarithm in an arbitrary base, `ln(self) / ln(base)`
    pub fn log_of_base(&mut self, base: &RealValue) {
        if !self.valid {
            return;
        }
        let base = self.conform(base);
        if !base.valid {
            self.invalidate("invalid operand");
            return;
        }
        let mut w = self.working();
        w.ln_core();
        let mut b = base.working();
        b.ln_core();
        w.divide_by(&b);
        self.settle(w);
    }

    /// Integer power by repeated squaring. `0^0` is one and zero to a
    /// negative power is invalid.
    pub fn raise_to_int_power(&mut self, n: i64) {
        if !self.valid {
            return;
        }
        if n == 0 {
            *self = self.like(1);
            return;
        }
        if self.is_zero() {
            if n < 0 {
                self.invalidate("zero raised to a negative power");
            }
            return;
        }

        let w = self.working();
        let mut base = w.duplicate();
        let mut acc = w.like(1);
        let mut e = n.unsigned_abs();
        while e > 0 {
            if e & 1 == 1 {
                acc.multiply_by(&base);
            }
            e >>= 1;
            if e > 0 {
                let b = base.duplicate();
                base.multiply_by(&b);
                if !base.valid {
                    acc.invalidate("power overflow");
                }
            }
            if !acc.valid {
                break;
            }
        }

        if n < 0 {
            if acc.valid {
                let mut inv = w.like(1);
                inv.divide_by(&acc);
                acc = inv;
            } else {
                acc = RealValue::zero_with_precision(w.radix, w.precision());
            }
        }
        self.settle(acc);
    }

    /// General power. Integral exponents that fit an `i64` go through
    /// [`raise_to_int_power`](Self::raise_to_int_power); the rest use
    /// `exp(y ln |x|)`. A negative base needs an integral exponent and
    /// takes its sign from the exponent's parity.
    pub fn raise_to_power(&mut self, y: &RealValue) {
        if !self.valid {
            return;
        }
        let y = self.conform(y);
        if !y.valid {
            self.invalidate("invalid operand");
            return;
        }
        let integral = y.is_integer();
        if integral {
            if let Some(n) = y.to_i64() {
                self.raise_to_int_power(n);
                return;
            }
        }
        if self.is_zero() {
            if y.negative {
                self.invalidate("zero raised to a negative power");
            }
            return;
        }
        if self.negative && !integral {
            self.invalidate("negative base with a fractional exponent");
            return;
        }
        let flip = self.negative && y.is_odd_integer();
        let mut w = self.working();
        w.negative = false;
        w.ln_core();
        w.multiply_by(&y);
        w.exp_core();
        if flip {
            w.negate();
        }
        self.settle(w);
    }

    /// Parity of an integral value, read from its digits
    fn is_odd_integer(&self) -> bool {
        let base = self.base();
        let units = (-(self.exponent as i64)).max(0) as u32;
        if self.radix % 2 == 0 {
            self.exponent <= 0 && limbs::digit_at(&self.mantissa, units, &base) % 2 == 1
        } else {
            // every power of an odd radix is odd
            (units..self.digits())
                .map(|k| limbs::digit_at(&self.mantissa, k, &base) as u32)
                .sum::<u32>()
                % 2
                == 1
        }
    }

    /// Square root; negative values become invalid
    pub fn sqrt(&mut self) {
        if !self.valid || self.is_zero() {
            return;
        }
        if self.negative {
            self.invalidate("square root of a negative value");
            return;
        }
        let mut w = self.working();
        w.sqrt_core();
        self.settle(w);
    }

    /// Real cube root, negative for negative values
    pub fn cbrt(&mut self) {
        if !self.valid || self.is_zero() {
            return;
        }
        let mut w = self.working();
        w.cbrt_core();
        self.settle(w);
    }

    /// Reciprocal; zero becomes invalid
    pub fn inverse(&mut self) {
        if !self.valid {
            return;
        }
        if self.is_zero() {
            self.invalidate("inverse of zero");
            return;
        }
        let mut one = self.like(1);
        one.divide_by(self);
        *self = one;
    }

    pub(crate) fn exp_core(&mut self) {
        if !self.valid {
            return;
        }
        if self.is_zero() {
            *self = self.like(1);
            return;
        }
        let mut whole = self.clone();
        whole.whole_part();
        let n = match whole.to_i64() {
            Some(n) => n,
            None => {
                if self.negative {
                    self.set_zero();
                } else {
                    self.invalidate("exponential overflow");
                }
                return;
            }
        };

        // e^f for |f| < 1, taken on f / 2^k and squared k times
        let mut f = self.clone();
        f.subtract(&whole);
        f.divide_by(&self.like(1 << EXP_HALVINGS));
        let mut sum = self.like(1);
        let mut term = self.like(1);
        for k in 1..SERIES_LIMIT as i64 {
            term.multiply_by(&f);
            term.divide_by(&self.like(k));
            if negligible(&term, &sum) {
                break;
            }
            sum.add(&term);
        }
        for _ in 0..EXP_HALVINGS {
            let s = sum.duplicate();
            sum.multiply_by(&s);
        }

        if n != 0 {
            let mut en = consts::constant(Constant::E, self.radix, self.precision());
            en.raise_to_int_power(n);
            sum.multiply_by(&en);
        }
        *self = sum;
    }

    pub(crate) fn ln_core(&mut self) {
        if !self.valid {
            return;
        }
        if self.negative || self.is_zero() {
            self.invalidate("logarithm of a non-positive value");
            return;
        }
        let k = self.sci();
        let mut m = self.scaled(-k);
        m.ln_reduced();
        if k != 0 {
            let mut shift = consts::constant(Constant::LnRadix, self.radix, self.precision());
            shift.multiply_by(&self.like(k));
            m.add(&shift);
        }
        *self = m;
    }

    /// `ln` of a value near `[1, radix]`: repeated square roots bring it
    /// close to one, then `ln m = 2 atanh((m - 1) / (m + 1))`.
    fn ln_reduced(&mut self) {
        for _ in 0..LN_ROOTS {
            self.sqrt_core();
        }
        let one = self.like(1);
        let mut t = self.clone();
        t.subtract(&one);
        let mut den = self.clone();
        den.add(&one);
        t.divide_by(&den);

        let t2 = &t * &t;
        let mut power = t.clone();
        let mut sum = t;
        for k in 1..SERIES_LIMIT as i64 {
            power.multiply_by(&t2);
            let mut term = power.clone();
            term.divide_by(&self.like(2 * k + 1));
            if negligible(&term, &sum) {
                break;
            }
            sum.add(&term);
        }
        sum.multiply_by(&self.like(1 << (LN_ROOTS + 1)));
        *self = sum;
    }

    pub(crate) fn sqrt_core(&mut self) {
        if !self.valid || self.is_zero() {
            return;
        }
        let (lead, sci) = self.leading();
        let (lead, sci) = if sci.rem_euclid(2) == 0 {
            (lead, sci)
        } else {
            (lead * self.radix as f64, sci - 1)
        };
        let mut x = self.seed(lead.sqrt(), sci / 2);
        let two = self.like(2);
        for _ in 0..NEWTON_LIMIT {
            let mut next = self.clone();
            next.divide_by(&x);
            next.add(&x);
            next.divide_by(&two);
            let done = settled(&x, &next);
            x = next;
            if done {
                break;
            }
        }
        *self = x;
    }

    pub(crate) fn cbrt_core(&mut self) {
        if !self.valid || self.is_zero() {
            return;
        }
        let negative = self.negative;
        self.negative = false;
        let (lead, sci) = self.leading();
        let shift = sci.rem_euclid(3);
        let lead = lead * (self.radix as f64).powi(shift as i32);
        let mut x = self.seed(lead.cbrt(), (sci - shift) / 3);
        let two = self.like(2);
        let three = self.like(3);
        for _ in 0..NEWTON_LIMIT {
            // x' = (2x + a / x^2) / 3
            let mut next = self.clone();
            next.divide_by(&x);
            next.divide_by(&x);
            let mut twice = x.clone();
            twice.multiply_by(&two);
            next.add(&twice);
            next.divide_by(&three);
            let done = settled(&x, &next);
            x = next;
            if done {
                break;
            }
        }
        if negative {
            x.negate();
        }
        *self = x;
    }

    /// Leading digits as `(f, sci)` with the value near `f * radix^sci` and
    /// `f` in `[1, radix)`.
    fn leading(&self) -> (f64, i64) {
        let n = self.mantissa.len();
        let limit = self.value_limit as f64;
        let top = self.mantissa[n - 1] as f64 + self.mantissa[n - 2] as f64 / limit;
        (top * self.radix as f64 / limit, self.sci())
    }

    /// A Newton starting point `f * radix^sci` in this value's layout.
    fn seed(&self, f: f64, sci: i64) -> RealValue {
        let p = self.value_precision - 1;
        let digits = (f * (self.radix as f64).powi(p as i32)) as u128;
        let mut v = self.like(0);
        v.pack(false, limbs::from_u128(digits, self.value_limit), sci - p as i64);
        v
    }

    /// This value times `radix^k`, exact.
    fn scaled(&self, k: i64) -> RealValue {
        let mut v = self.clone();
        if v.valid && !v.is_zero() {
            let negative = v.negative;
            let exponent = v.exponent as i64 + k;
            let mag = v.magnitude();
            v.pack(negative, mag, exponent);
        }
        v
    }

    // =====================================================================
    // Trigonometry
    // =====================================================================

    /// Sine, arcsine, hyperbolic sine or inverse hyperbolic sine.
    ///
    /// Circular functions read and write angles in `mode`; hyperbolic ones
    /// ignore it.
    pub fn sin_with_trig_mode(&mut self, mode: TrigMode, inv: bool, hyp: bool) {
        self.trig(Circular::Sin, mode, inv, hyp);
    }

    /// Cosine family, see [`sin_with_trig_mode`](Self::sin_with_trig_mode)
    pub fn cos_with_trig_mode(&mut self, mode: TrigMode, inv: bool, hyp: bool) {
        self.trig(Circular::Cos, mode, inv, hyp);
    }

    /// Tangent family, see [`sin_with_trig_mode`](Self::sin_with_trig_mode)
    pub fn tan_with_trig_mode(&mut self, mode: TrigMode, inv: bool, hyp: bool) {
        self.trig(Circular::Tan, mode, inv, hyp);
    }

    fn trig(&mut self, f: Circular, mode: TrigMode, inv: bool, hyp: bool) {
        if !self.valid {
            return;
        }
        let mut w = self.working();
        match (inv, hyp, f) {
            (false, false, _) => w.circular_in_mode(f, mode),
            (true, false, _) => w.arc_in_mode(f, mode),
            (false, true, Circular::Sin) => w.sinh_core(),
            (false, true, Circular::Cos) => w.cosh_core(),
            (false, true, Circular::Tan) => w.tanh_core(),
            (true, true, Circular::Sin) => w.asinh_core(),
            (true, true, Circular::Cos) => w.acosh_core(),
            (true, true, Circular::Tan) => w.atanh_core(),
        }
        self.settle(w);
    }

    fn beyond_precision(&self) -> bool {
        !self.is_zero() && self.sci() >= self.digits() as i64
    }

    pub(crate) fn half_pi(&self) -> RealValue {
        let mut v = consts::constant(Constant::Pi, self.radix, self.precision());
        v.divide_by(&self.like(2));
        v
    }

    fn circular_in_mode(&mut self, f: Circular, mode: TrigMode) {
        if self.beyond_precision() {
            self.invalidate("angle too large to reduce");
            return;
        }
        let quarter = match mode.quarter_turn() {
            Some(q) => q,
            None => {
                self.circular(f);
                return;
            }
        };

        let turn = self.like(4 * quarter);
        let mut a = self.clone();
        a.modulo_by(&turn);
        if a.negative {
            a.add(&turn);
        }
        let mut quarters = a.clone();
        quarters.divide_by(&self.like(quarter));
        if quarters.is_integer() {
            let quadrant = quarters.to_i64().unwrap_or(0).rem_euclid(4);
            match exact_circular(f, quadrant) {
                Some(v) => *self = self.like(v),
                None => self.invalidate("tangent of a right angle"),
            }
            return;
        }

        a.multiply_by(&consts::constant(Constant::Pi, self.radix, self.precision()));
        a.divide_by(&self.like(2 * quarter));
        a.circular(f);
        *self = a;
    }

    /// Sine of an angle in radians
    pub(crate) fn sin_core(&mut self) {
        self.circular(Circular::Sin);
    }

    /// Cosine of an angle in radians
    pub(crate) fn cos_core(&mut self) {
        self.circular(Circular::Cos);
    }

    /// Circular function of an angle in radians.
    fn circular(&mut self, f: Circular) {
        if !self.valid {
            return;
        }
        if self.beyond_precision() {
            self.invalidate("angle too large to reduce");
            return;
        }
        if f == Circular::Tan {
            let mut c = self.clone();
            c.circular(Circular::Cos);
            self.circular(Circular::Sin);
            if c.is_zero() {
                self.invalidate("tangent of a right angle");
                return;
            }
            self.divide_by(&c);
            return;
        }

        // x = q * pi/2 + r with r in [0, pi/2)
        let half_pi = self.half_pi();
        let mut q = self.clone();
        q.divide_by(&half_pi);
        q.floor();
        let mut r = self.clone();
        r.subtract(&(&q * &half_pi));
        q.modulo_by(&self.like(4));
        let mut quadrant = q.to_i64().unwrap_or(0).rem_euclid(4);
        if f == Circular::Cos {
            quadrant = (quadrant + 1) % 4;
        }

        // fold [pi/4, pi/2) onto [0, pi/4]
        let mut quarter_pi = half_pi.clone();
        quarter_pi.divide_by(&self.like(2));
        let folded = r > quarter_pi;
        if folded {
            r = &half_pi - &r;
        }
        let mut v = if (quadrant % 2 == 0) != folded {
            r.odd_series(true)
        } else {
            r.even_series(true)
        };
        if quadrant >= 2 {
            v.negate();
        }
        *self = v;
    }

    /// Round toward negative infinity
    fn floor(&mut self) {
        let below = self.negative && !self.is_integer();
        self.whole_part();
        if below {
            let one = self.like(1);
            self.subtract(&one);
        }
    }

    /// `x - x^3/3! + x^5/5! - ...`, or all terms positive for sinh
    fn odd_series(&self, alternating: bool) -> RealValue {
        let x2 = self * self;
        let mut term = self.clone();
        let mut sum = self.clone();
        for k in 1..SERIES_LIMIT as i64 {
            term.multiply_by(&x2);
            term.divide_by(&self.like((2 * k) * (2 * k + 1)));
            if alternating {
                term.negate();
            }
            if negligible(&term, &sum) {
                break;
            }
            sum.add(&term);
        }
        sum
    }

    /// `1 - x^2/2! + x^4/4! - ...`
    fn even_series(&self, alternating: bool) -> RealValue {
        let x2 = self * self;
        let mut term = self.like(1);
        let mut sum = self.like(1);
        for k in 1..SERIES_LIMIT as i64 {
            term.multiply_by(&x2);
            term.divide_by(&self.like((2 * k - 1) * (2 * k)));
            if alternating {
                term.negate();
            }
            if negligible(&term, &sum) {
                break;
            }
            sum.add(&term);
        }
        sum
    }

    fn arc_in_mode(&mut self, f: Circular, mode: TrigMode) {
        if f != Circular::Tan {
            let mut m = self.clone();
            m.abs();
            if m > self.like(1) {
                self.invalidate("inverse sine or cosine outside [-1, 1]");
                return;
            }
        }
        if let Some((num, den)) = self.special_angle(f) {
            *self = self.quarter_angle(mode, num, den);
            return;
        }
        match f {
            Circular::Sin => self.asin_core(),
            Circular::Cos => self.acos_core(),
            Circular::Tan => self.atan_core(),
        }
        if let Some(quarter) = mode.quarter_turn() {
            self.multiply_by(&self.like(2 * quarter));
            let pi = consts::constant(Constant::Pi, self.radix, self.precision());
            self.divide_by(&pi);
        }
    }

    /// Inverse circular results that are whole fractions of a quarter turn,
    /// as `(numerator, denominator)`.
    fn special_angle(&self, f: Circular) -> Option<(i64, i64)> {
        if !self.is_integer() {
            return None;
        }
        match (f, self.to_i64()?) {
            (Circular::Sin, 0) | (Circular::Cos, 1) | (Circular::Tan, 0) => Some((0, 1)),
            (Circular::Sin, 1) | (Circular::Cos, 0) => Some((1, 1)),
            (Circular::Sin, -1) => Some((-1, 1)),
            (Circular::Cos, -1) => Some((2, 1)),
            (Circular::Tan, 1) => Some((1, 2)),
            (Circular::Tan, -1) => Some((-1, 2)),
            _ => None,
        }
    }

    fn quarter_angle(&self, mode: TrigMode, num: i64, den: i64) -> RealValue {
        match mode.quarter_turn() {
            Some(quarter) => {
                let mut v = self.like(quarter * num);
                v.divide_by(&self.like(den));
                v
            }
            None => {
                let mut v = self.half_pi();
                v.multiply_by(&self.like(num));
                v.divide_by(&self.like(den));
                v
            }
        }
    }

    /// Arctangent in radians.
    pub(crate) fn atan_core(&mut self) {
        if !self.valid || self.is_zero() {
            return;
        }
        let negative = self.negative;
        let one = self.like(1);
        let mut x = self.clone();
        x.abs();

        let mut result = if x > one {
            // atan x = pi/2 - atan(1/x)
            let mut inv = one.clone();
            inv.divide_by(&x);
            inv.atan_core();
            let mut r = self.half_pi();
            r.subtract(&inv);
            r
        } else {
            // atan x = 2 atan(x / (1 + sqrt(1 + x^2)))
            for _ in 0..ATAN_HALVINGS {
                let mut d = &x * &x;
                d.add(&one);
                d.sqrt_core();
                d.add(&one);
                x.divide_by(&d);
            }
            let x2 = &x * &x;
            let mut power = x.clone();
            let mut sum = x.clone();
            for k in 1..SERIES_LIMIT as i64 {
                power.multiply_by(&x2);
                power.negate();
                let mut term = power.clone();
                term.divide_by(&self.like(2 * k + 1));
                if negligible(&term, &sum) {
                    break;
                }
                sum.add(&term);
            }
            sum.multiply_by(&self.like(1 << ATAN_HALVINGS));
            sum
        };
        if negative {
            result.negate();
        }
        *self = result;
    }

    /// Arcsine in radians, `atan(x / sqrt(1 - x^2))`.
    pub(crate) fn asin_core(&mut self) {
        if !self.valid || self.is_zero() {
            return;
        }
        let mut d = self.like(1);
        d.subtract(&(&*self * &*self));
        if d.negative {
            self.invalidate("inverse sine outside [-1, 1]");
            return;
        }
        if d.is_zero() {
            let negative = self.negative;
            *self = self.half_pi();
            if negative {
                self.negate();
            }
            return;
        }
        d.sqrt_core();
        self.divide_by(&d);
        self.atan_core();
    }

    /// Arccosine in radians, `pi/2 - asin x`.
    pub(crate) fn acos_core(&mut self) {
        if !self.valid {
            return;
        }
        self.asin_core();
        if !self.valid {
            return;
        }
        let mut r = self.half_pi();
        r.subtract(self);
        *self = r;
    }

    /// Angle of the point `(x, y)` in radians, in `(-pi, pi]`.
    pub(crate) fn atan2(y: &RealValue, x: &RealValue) -> RealValue {
        if !y.valid || !x.valid {
            return RealValue::invalid_with_precision(y.radix, y.precision());
        }
        let x = y.conform(x);
        if x.is_zero() {
            if y.is_zero() {
                return y.like(0);
            }
            let mut r = y.half_pi();
            if y.negative {
                r.negate();
            }
            return r;
        }
        let mut t = y.clone();
        t.divide_by(&x);
        t.atan_core();
        if x.negative {
            let pi = consts::constant(Constant::Pi, y.radix, y.precision());
            if y.negative {
                t.subtract(&pi);
            } else {
                t.add(&pi);
            }
        }
        t
    }

    /// `(e^x, e^-x)`
    fn exp_pair(&self) -> (RealValue, RealValue) {
        let mut e = self.clone();
        e.exp_core();
        let mut inv = self.like(1);
        if e.is_zero() {
            inv.invalidate("exponential overflow");
        } else {
            inv.divide_by(&e);
        }
        (e, inv)
    }

    pub(crate) fn sinh_core(&mut self) {
        if !self.valid || self.is_zero() {
            return;
        }
        if self.sci() < 0 {
            *self = self.odd_series(false);
            return;
        }
        let (mut e, inv) = self.exp_pair();
        e.subtract(&inv);
        e.divide_by(&self.like(2));
        *self = e;
    }

    pub(crate) fn cosh_core(&mut self) {
        if !self.valid {
            return;
        }
        let (mut e, inv) = self.exp_pair();
        e.add(&inv);
        e.divide_by(&self.like(2));
        *self = e;
    }

    pub(crate) fn tanh_core(&mut self) {
        if !self.valid || self.is_zero() {
            return;
        }
        if self.sci() < 0 {
            let mut c = self.clone();
            c.cosh_core();
            self.sinh_core();
            self.divide_by(&c);
            return;
        }
        // tanh |x| = (e^2|x| - 1) / (e^2|x| + 1), one once that overflows
        let negative = self.negative;
        let mut e2 = self.clone();
        e2.abs();
        e2.multiply_by(&self.like(2));
        e2.exp_core();
        let one = self.like(1);
        let mut r = if e2.valid {
            let mut num = e2.clone();
            num.subtract(&one);
            e2.add(&one);
            num.divide_by(&e2);
            num
        } else {
            one
        };
        if negative {
            r.negate();
        }
        *self = r;
    }

    /// Small enough that the first term of the odd series is exact
    fn negligible_square(&self) -> bool {
        self.sci() < -(self.digits() as i64) / 2 - 1
    }

    pub(crate) fn asinh_core(&mut self) {
        if !self.valid || self.is_zero() || self.negligible_square() {
            return;
        }
        // sign * ln(|x| + sqrt(x^2 + 1))
        let negative = self.negative;
        self.abs();
        let mut r = &*self * &*self;
        r.add(&self.like(1));
        r.sqrt_core();
        r.add(self);
        r.ln_core();
        if negative {
            r.negate();
        }
        *self = r;
    }

    pub(crate) fn acosh_core(&mut self) {
        if !self.valid {
            return;
        }
        if *self < self.like(1) {
            self.invalidate("inverse hyperbolic cosine below one");
            return;
        }
        // ln(x + sqrt(x^2 - 1))
        let mut r = &*self * &*self;
        r.subtract(&self.like(1));
        r.sqrt_core();
        r.add(self);
        r.ln_core();
        *self = r;
    }

    pub(crate) fn atanh_core(&mut self) {
        if !self.valid || self.is_zero() || self.negligible_square() {
            return;
        }
        let mut m = self.clone();
        m.abs();
        if m >= self.like(1) {
            self.invalidate("inverse hyperbolic tangent outside (-1, 1)");
            return;
        }
        // ln((1 + x) / (1 - x)) / 2
        let mut num = self.like(1);
        num.add(self);
        let mut den = self.like(1);
        den.subtract(self);
        num.divide_by(&den);
        num.ln_core();
        num.divide_by(&self.like(2));
        *self = num;
    }

    // =====================================================================
    // Integer functions
    // =====================================================================

    /// The value as a non-negative machine integer
    fn counting_number(&self) -> Option<i64> {
        if !self.valid || self.negative || !self.is_integer() {
            return None;
        }
        self.to_i64()
    }

    /// `n!` for non-negative integers
    pub fn factorial(&mut self) {
        if !self.valid {
            return;
        }
        let n = match self.counting_number() {
            Some(n) if n <= COMBINATORIC_LIMIT => n,
            _ => {
                self.invalidate("factorial of a value that is not a small non-negative integer");
                return;
            }
        };
        let w = self.working();
        let mut acc = w.like(1);
        for k in 2..=n {
            acc.multiply_by(&w.like(k));
            if !acc.valid {
                break;
            }
        }
        self.settle(acc);
    }

    /// Permutations of `r` items out of this value, `n! / (n - r)!`
    pub fn n_pr(&mut self, r: &RealValue) {
        if !self.valid {
            return;
        }
        let r = self.conform(r);
        let (n, r) = match (self.counting_number(), r.counting_number()) {
            (Some(n), Some(r)) => (n, r),
            _ => {
                self.invalidate("permutations of values that are not non-negative integers");
                return;
            }
        };
        if r > n {
            self.set_zero();
            return;
        }
        if r > COMBINATORIC_LIMIT {
            self.invalidate("permutation count too large");
            return;
        }
        let w = self.working();
        let mut acc = w.like(1);
        for k in (n - r + 1)..=n {
            acc.multiply_by(&w.like(k));
            if !acc.valid {
                break;
            }
        }
        self.settle(acc);
    }

    /// Combinations of `r` items out of this value, `n! / (r! (n - r)!)`
    pub fn n_cr(&mut self, r: &RealValue) {
        if !self.valid {
            return;
        }
        let r = self.conform(r);
        let (n, r) = match (self.counting_number(), r.counting_number()) {
            (Some(n), Some(r)) => (n, r),
            _ => {
                self.invalidate("combinations of values that are not non-negative integers");
                return;
            }
        };
        if r > n {
            self.set_zero();
            return;
        }
        let r = r.min(n - r);
        if r > COMBINATORIC_LIMIT {
            self.invalidate("combination count too large");
            return;
        }
        // every intermediate c * (n - r + i) / i is a whole number
        let w = self.working();
        let mut acc = w.like(1);
        for i in 1..=r {
            acc.multiply_by(&w.like(n - r + i));
            acc.divide_by(&w.like(i));
            if !acc.valid {
                break;
            }
        }
        self.settle(acc);
    }

    /// Triangular number `n (n + 1) / 2`
    pub fn sum(&mut self) {
        if !self.valid {
            return;
        }
        if self.negative || !self.is_integer() {
            self.invalidate("sum of a value that is not a non-negative integer");
            return;
        }
        let w = self.working();
        let mut acc = w.like(1);
        acc.add(&w);
        acc.multiply_by(&w);
        acc.divide_by(&w.like(2));
        self.settle(acc);
    }

    // =====================================================================
    // Constants
    // =====================================================================

    /// `arccot n = 1/n - 1/(3 n^3) + 1/(5 n^5) - ...`
    fn arccot(n: i64, radix: u32, precision: Precision) -> RealValue {
        let one = RealValue::from_i64_with_precision(1, radix, precision);
        let n2 = RealValue::from_i64_with_precision(n * n, radix, precision);
        let mut power = one.clone();
        power.divide_by(&one.like(n));
        let mut sum = power.clone();
        for k in 1..SERIES_LIMIT as i64 {
            power.divide_by(&n2);
            power.negate();
            let mut term = power.clone();
            term.divide_by(&one.like(2 * k + 1));
            if negligible(&term, &sum) {
                break;
            }
            sum.add(&term);
        }
        sum
    }

    /// Machin's formula, `pi = 16 arccot 5 - 4 arccot 239`
    pub(crate) fn compute_pi(radix: u32, precision: Precision) -> RealValue {
        let four = RealValue::from_i64_with_precision(4, radix, precision);
        let mut pi = Self::arccot(5, radix, precision);
        pi.multiply_by(&four);
        pi.subtract(&Self::arccot(239, radix, precision));
        pi.multiply_by(&four);
        pi
    }

    /// `e = 1 + 1/1! + 1/2! + ...`
    pub(crate) fn compute_e(radix: u32, precision: Precision) -> RealValue {
        let mut sum = RealValue::from_i64_with_precision(1, radix, precision);
        let mut term = sum.clone();
        for k in 1..SERIES_LIMIT as i64 {
            term.divide_by(&sum.like(k));
            if negligible(&term, &sum) {
                break;
            }
            sum.add(&term);
        }
        sum
    }

    pub(crate) fn compute_ln_radix(radix: u32, precision: Precision) -> RealValue {
        let mut v = RealValue::from_i64_with_precision(radix as i64, radix, precision);
        v.ln_reduced();
        v
    }
}
