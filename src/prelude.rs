//! radixfloat prelude.
//!
//! This module contains the most used types and traits, so they can be
//! imported as a group.
//!
//! ```
//! use radixfloat::prelude::*;
//!
//! let x = RealValue::from_i64(2, 10);
//! assert!(!x.is_zero());
//! ```

#[doc(no_inline)]
pub use crate::complex::{ComplexParts, ComplexValue};
#[doc(no_inline)]
pub use crate::consts::Precision;
#[doc(no_inline)]
pub use crate::enums::{BitOp, TrigMode};
#[doc(no_inline)]
pub use crate::error::EngineError;
#[doc(no_inline)]
pub use crate::format::{ComplexLimitedString, FormatRules, LimitedString};
#[doc(no_inline)]
pub use crate::ops::{
    AdditiveOp, Arity, EvalContext, ExponentialOp, MultiplicativeOp, Operator, PostfixOp,
    Precedence, PrefixOp,
};
#[doc(no_inline)]
pub use crate::real::{RealParts, RealValue};
#[doc(no_inline)]
pub use num_traits::{One, Zero};
