use crate::real::RealValue;
use serde::{Deserialize, Serialize};
use simple_error::{bail, SimpleError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =========================================================================
// Radix and precision bounds
// =========================================================================

/// Smallest supported radix
pub const MIN_RADIX: u32 = 2;
/// Largest supported radix (digits are written `0-9A-Z`)
pub const MAX_RADIX: u32 = 36;
/// Fewest limbs a mantissa may have
pub const MIN_LIMBS: usize = 2;
/// Limb count used when no precision is given
pub const DEFAULT_LIMBS: usize = 8;
/// Extra limbs carried by transcendental working copies
pub const GUARD_LIMBS: usize = 2;
/// Upper bound on a displayed exponent, as a power of two
pub const EXPONENT_RANGE: u64 = 1 << 16;

// =========================================================================
// Iteration caps
// =========================================================================

/// Maximum terms summed by any series
pub const SERIES_LIMIT: usize = 2000;
/// Maximum Newton-Raphson steps
pub const NEWTON_LIMIT: usize = 64;
/// Halvings applied to the exponential's fractional argument
pub const EXP_HALVINGS: u32 = 8;
/// Square roots applied to the logarithm's reduced argument
pub const LN_ROOTS: u32 = 6;
/// Argument halvings allowed in the arctangent reduction
pub const ATAN_HALVINGS: u32 = 8;
/// Largest integer accepted by factorial and the combinatorial loops
pub const COMBINATORIC_LIMIT: i64 = 100_000;
/// Widest two's-complement word emulated by the bitwise operations
pub const MAX_COMPLEMENT: u32 = 128;

/// Number of limbs in every mantissa of a calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Precision(usize);

impl Precision {
    /// Configure a limb count; fewer than two limbs is a programming error.
    pub fn new(limbs: usize) -> Self {
        assert!(
            limbs >= MIN_LIMBS,
            "precision must be at least {} limbs",
            MIN_LIMBS
        );
        Precision(limbs)
    }

    pub fn limbs(&self) -> usize {
        self.0
    }

    /// The same precision widened by the guard limbs
    pub fn guarded(&self) -> Self {
        Precision(self.0 + GUARD_LIMBS)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Precision(DEFAULT_LIMBS)
    }
}

impl FromStr for Precision {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let limbs = match s.trim().parse::<usize>() {
            Ok(n) => n,
            Err(_) => bail!("precision is not a limb count"),
        };
        if limbs < MIN_LIMBS {
            bail!("precision needs at least {} limbs", MIN_LIMBS);
        }
        Ok(Precision(limbs))
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} limbs", self.0)
    }
}

// =========================================================================
// Memoized constants
// =========================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Constant {
    Pi,
    E,
    LnRadix,
}

thread_local! {
    static CONSTANTS: RefCell<HashMap<(Constant, u32, usize), RealValue>> =
        RefCell::new(HashMap::new());
}

/// A constant in the given radix and precision, computed once per thread.
pub(crate) fn constant(kind: Constant, radix: u32, precision: Precision) -> RealValue {
    let key = (kind, radix, precision.limbs());
    if let Some(v) = CONSTANTS.with(|c| c.borrow().get(&key).cloned()) {
        return v;
    }
    tracing::trace!(?kind, radix, limbs = precision.limbs(), "computing constant");
    let value = match kind {
        Constant::Pi => RealValue::compute_pi(radix, precision),
        Constant::E => RealValue::compute_e(radix, precision),
        Constant::LnRadix => RealValue::compute_ln_radix(radix, precision),
    };
    CONSTANTS.with(|c| c.borrow_mut().insert(key, value.clone()));
    value
}

#[cfg(test)]
mod consts_tests {
    use super::*;

    #[test]
    fn test_precision() {
        assert_eq!(Precision::default().limbs(), DEFAULT_LIMBS);
        assert_eq!(Precision::new(4).guarded().limbs(), 4 + GUARD_LIMBS);
        assert_eq!("12".parse::<Precision>().unwrap(), Precision::new(12));
        assert!("1".parse::<Precision>().is_err());
        assert!("many".parse::<Precision>().is_err());
        assert_eq!(Precision::new(3).to_string(), "3 limbs");
    }

    #[test]
    #[should_panic(expected = "precision must be at least")]
    fn test_precision_too_small() {
        let _ = Precision::new(1);
    }

    #[test]
    fn test_constant_cached() {
        let a = constant(Constant::Pi, 10, Precision::new(3));
        let b = constant(Constant::Pi, 10, Precision::new(3));
        assert_eq!(a.to_parts(), b.to_parts());
    }
}
