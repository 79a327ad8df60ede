//! Arbitrary-radix, fixed-precision arithmetic for a scientific calculator.
//!
//! [`RealValue`] holds a sign, a radix between 2 and 36, an exponent and a
//! fixed-length mantissa of packed limbs. [`ComplexValue`] pairs two of them
//! and takes over whenever a real function leaves its real domain.
//!
//! ```
//! use radixfloat::prelude::*;
//!
//! let mut x = RealValue::from_str_radix("FF", 16);
//! assert_eq!(x.to_i64(), Some(255));
//! x.convert_to_radix(10);
//! assert_eq!(x.to_string(), "255");
//!
//! let mut y = ComplexValue::from_i64(-4, 10);
//! y.sqrt();
//! assert_eq!(y.to_string(), "2i");
//! ```

pub mod codec;
pub mod complex;
pub mod consts;
pub mod enums;
pub mod error;
pub mod format;
pub mod limbs;
pub mod ops;
pub mod prelude;
pub mod real;

pub use complex::ComplexValue;
pub use consts::Precision;
pub use error::EngineError;
pub use format::FormatRules;
pub use real::RealValue;
