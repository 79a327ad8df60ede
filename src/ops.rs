//! Calculator operators grouped by how tightly they bind.
//!
//! Each category is its own enum, so the arity of an operator follows from
//! its type: additive, multiplicative and exponential operators take two
//! operands, prefix and postfix operators take one. [`Operator`] wraps the
//! categories and orders them by [`Precedence`].

use crate::complex::ComplexValue;
use crate::enums::{BitOp, TrigMode};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use simple_error::{bail, SimpleError};
use std::fmt;
use std::str::FromStr;

/// Binding strength, weakest first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Additive,
    Multiplicative,
    Exponential,
    Prefix,
    Postfix,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

/// Settings an operator reads while it is applied
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalContext {
    pub trig_mode: TrigMode,
    /// Bit width for the bitwise operators, zero for unbounded
    pub complement: u32,
}

impl EvalContext {
    pub fn new(trig_mode: TrigMode, complement: u32) -> Self {
        EvalContext {
            trig_mode,
            complement,
        }
    }
}

// =========================================================================
// Binary categories
// =========================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdditiveOp {
    Plus,
    Minus,
}

impl AdditiveOp {
    pub fn to_str(&self) -> &str {
        match self {
            AdditiveOp::Plus => "+",
            AdditiveOp::Minus => "-",
        }
    }

    pub fn apply(&self, lhs: &mut ComplexValue, rhs: &ComplexValue) {
        match self {
            AdditiveOp::Plus => lhs.add(rhs),
            AdditiveOp::Minus => lhs.subtract(rhs),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MultiplicativeOp {
    Multiply,
    /// Juxtaposition, as in `2π`
    ImplicitMultiply,
    Divide,
    Modulo,
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
    Combinations,
    Permutations,
}

impl MultiplicativeOp {
    pub fn to_str(&self) -> &str {
        match self {
            MultiplicativeOp::Multiply => "*",
            MultiplicativeOp::ImplicitMultiply => "∙",
            MultiplicativeOp::Divide => "/",
            MultiplicativeOp::Modulo => "%",
            MultiplicativeOp::And => "and",
            MultiplicativeOp::Or => "or",
            MultiplicativeOp::Xor => "xor",
            MultiplicativeOp::Nand => "nand",
            MultiplicativeOp::Nor => "nor",
            MultiplicativeOp::Xnor => "xnor",
            MultiplicativeOp::Combinations => "nCr",
            MultiplicativeOp::Permutations => "nPr",
        }
    }

    fn bit_op(&self) -> Option<BitOp> {
        match self {
            MultiplicativeOp::And => Some(BitOp::And),
            MultiplicativeOp::Or => Some(BitOp::Or),
            MultiplicativeOp::Xor => Some(BitOp::Xor),
            MultiplicativeOp::Nand => Some(BitOp::Nand),
            MultiplicativeOp::Nor => Some(BitOp::Nor),
            MultiplicativeOp::Xnor => Some(BitOp::Xnor),
            _ => None,
        }
    }

    pub fn apply(&self, lhs: &mut ComplexValue, rhs: &ComplexValue, ctx: &EvalContext) {
        if let Some(op) = self.bit_op() {
            lhs.bitwise_with(op, rhs, ctx.complement);
            return;
        }
        match self {
            MultiplicativeOp::Multiply | MultiplicativeOp::ImplicitMultiply => lhs.multiply_by(rhs),
            MultiplicativeOp::Divide => lhs.divide_by(rhs),
            MultiplicativeOp::Modulo => lhs.modulo_by(rhs),
            MultiplicativeOp::Combinations => lhs.n_cr(rhs),
            MultiplicativeOp::Permutations => lhs.n_pr(rhs),
            _ => {}
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExponentialOp {
    /// `x ^ y`
    Power,
    /// `n root x`, the n-th root of x
    Root,
}

impl ExponentialOp {
    pub fn to_str(&self) -> &str {
        match self {
            ExponentialOp::Power => "^",
            ExponentialOp::Root => "root",
        }
    }

    pub fn apply(&self, lhs: &mut ComplexValue, rhs: &ComplexValue) {
        match self {
            ExponentialOp::Power => lhs.raise_to_power(rhs),
            ExponentialOp::Root => {
                let mut degree = lhs.duplicate();
                degree.inverse();
                lhs.assign(rhs);
                lhs.raise_to_power(&degree);
            }
        }
    }
}

// =========================================================================
// Unary categories
// =========================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrefixOp {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Re,
    Im,
    Abs,
    Arg,
    Not,
    Round,
    Log,
    Ln,
    Log2,
    Sqrt,
    Cbrt,
    /// Triangular number `n(n+1)/2`
    Sigma,
    TenTo,
    ETo,
    TwoTo,
}

impl PrefixOp {
    pub fn to_str(&self) -> &str {
        match self {
            PrefixOp::Sin => "sin",
            PrefixOp::Cos => "cos",
            PrefixOp::Tan => "tan",
            PrefixOp::Asin => "asin",
            PrefixOp::Acos => "acos",
            PrefixOp::Atan => "atan",
            PrefixOp::Sinh => "sinh",
            PrefixOp::Cosh => "cosh",
            PrefixOp::Tanh => "tanh",
            PrefixOp::Asinh => "asinh",
            PrefixOp::Acosh => "acosh",
            PrefixOp::Atanh => "atanh",
            PrefixOp::Re => "re",
            PrefixOp::Im => "im",
            PrefixOp::Abs => "abs",
            PrefixOp::Arg => "arg",
            PrefixOp::Not => "not",
            PrefixOp::Round => "rnd",
            PrefixOp::Log => "log",
            PrefixOp::Ln => "ln",
            PrefixOp::Log2 => "log2",
            PrefixOp::Sqrt => "√",
            PrefixOp::Cbrt => "∛",
            PrefixOp::Sigma => "Σ",
            PrefixOp::TenTo => "10^",
            PrefixOp::ETo => "e^",
            PrefixOp::TwoTo => "2^",
        }
    }

    pub fn apply(&self, x: &mut ComplexValue, ctx: &EvalContext) {
        let mode = ctx.trig_mode;
        match self {
            PrefixOp::Sin => x.sin_with_trig_mode(mode, false, false),
            PrefixOp::Cos => x.cos_with_trig_mode(mode, false, false),
            PrefixOp::Tan => x.tan_with_trig_mode(mode, false, false),
            PrefixOp::Asin => x.sin_with_trig_mode(mode, true, false),
            PrefixOp::Acos => x.cos_with_trig_mode(mode, true, false),
            PrefixOp::Atan => x.tan_with_trig_mode(mode, true, false),
            PrefixOp::Sinh => x.sin_with_trig_mode(mode, false, true),
            PrefixOp::Cosh => x.cos_with_trig_mode(mode, false, true),
            PrefixOp::Tanh => x.tan_with_trig_mode(mode, false, true),
            PrefixOp::Asinh => x.sin_with_trig_mode(mode, true, true),
            PrefixOp::Acosh => x.cos_with_trig_mode(mode, true, true),
            PrefixOp::Atanh => x.tan_with_trig_mode(mode, true, true),
            PrefixOp::Re => *x = ComplexValue::new(x.real_part().clone()),
            PrefixOp::Im => *x = ComplexValue::new(x.imaginary_part()),
            PrefixOp::Abs => x.abs(),
            PrefixOp::Arg => *x = ComplexValue::new(x.angle_in_mode(mode)),
            PrefixOp::Not => x.bitnot_with_complement(ctx.complement),
            PrefixOp::Round => x.round_to_integer(),
            PrefixOp::Log => x.log_of_base(&integer_like(x, 10)),
            PrefixOp::Ln => x.ln(),
            PrefixOp::Log2 => x.log_of_base(&integer_like(x, 2)),
            PrefixOp::Sqrt => x.sqrt(),
            PrefixOp::Cbrt => x.cbrt(),
            PrefixOp::Sigma => x.sum(),
            PrefixOp::TenTo => power_of(x, 10),
            PrefixOp::ETo => x.power_of_e(),
            PrefixOp::TwoTo => power_of(x, 2),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PostfixOp {
    Squared,
    Cubed,
    Factorial,
    Inverse,
}

impl PostfixOp {
    pub fn to_str(&self) -> &str {
        match self {
            PostfixOp::Squared => "²",
            PostfixOp::Cubed => "³",
            PostfixOp::Factorial => "!",
            PostfixOp::Inverse => "⁻¹",
        }
    }

    pub fn apply(&self, x: &mut ComplexValue) {
        match self {
            PostfixOp::Squared => {
                let y = x.duplicate();
                x.multiply_by(&y);
            }
            PostfixOp::Cubed => {
                let y = x.duplicate();
                x.multiply_by(&y);
                x.multiply_by(&y);
            }
            PostfixOp::Factorial => x.factorial(),
            PostfixOp::Inverse => x.inverse(),
        }
    }
}

/// `n` in the radix and precision of `x`
fn integer_like(x: &ComplexValue, n: i64) -> ComplexValue {
    ComplexValue::new(x.real_part().like(n))
}

/// Replace `x` with `base^x`
fn power_of(x: &mut ComplexValue, base: i64) {
    let exponent = x.duplicate();
    *x = integer_like(&exponent, base);
    x.raise_to_power(&exponent);
}

// =========================================================================
// Operator
// =========================================================================

/// Any calculator operator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Additive(AdditiveOp),
    Multiplicative(MultiplicativeOp),
    Exponential(ExponentialOp),
    Prefix(PrefixOp),
    Postfix(PostfixOp),
}

impl Operator {
    pub fn precedence(&self) -> Precedence {
        match self {
            Operator::Additive(_) => Precedence::Additive,
            Operator::Multiplicative(_) => Precedence::Multiplicative,
            Operator::Exponential(_) => Precedence::Exponential,
            Operator::Prefix(_) => Precedence::Prefix,
            Operator::Postfix(_) => Precedence::Postfix,
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Operator::Additive(_) | Operator::Multiplicative(_) | Operator::Exponential(_) => {
                Arity::Binary
            }
            Operator::Prefix(_) | Operator::Postfix(_) => Arity::Unary,
        }
    }

    /// Exponentials group to the right: `2^3^2` is `2^(3^2)`
    pub fn is_right_associative(&self) -> bool {
        matches!(self, Operator::Exponential(_))
    }

    /// Whether `self` must be applied before `next` when both compete for
    /// the operand between them
    pub fn binds_before(&self, next: &Operator) -> bool {
        match self.precedence().cmp(&next.precedence()) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => !self.is_right_associative(),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            Operator::Additive(op) => op.to_str(),
            Operator::Multiplicative(op) => op.to_str(),
            Operator::Exponential(op) => op.to_str(),
            Operator::Prefix(op) => op.to_str(),
            Operator::Postfix(op) => op.to_str(),
        }
    }

    /// Apply the operator to `lhs`, with `rhs` as the second operand of a
    /// binary operator.
    ///
    /// Numeric failures leave `lhs` invalid; an error is returned only when
    /// the operands do not match the operator's arity.
    pub fn apply(
        &self,
        lhs: &mut ComplexValue,
        rhs: Option<&ComplexValue>,
        ctx: &EvalContext,
    ) -> Result<(), EngineError> {
        match (self, rhs) {
            (Operator::Additive(op), Some(rhs)) => op.apply(lhs, rhs),
            (Operator::Multiplicative(op), Some(rhs)) => op.apply(lhs, rhs, ctx),
            (Operator::Exponential(op), Some(rhs)) => op.apply(lhs, rhs),
            (Operator::Prefix(op), None) => op.apply(lhs, ctx),
            (Operator::Postfix(op), None) => op.apply(lhs),
            (_, Some(_)) => return Err(EngineError::InvalidOperand("a unary operator")),
            (_, None) => return Err(EngineError::InvalidOperand("a binary operator")),
        }
        Ok(())
    }

    /// Apply a binary operator to a fresh value
    pub fn apply_binary(
        &self,
        lhs: &ComplexValue,
        rhs: &ComplexValue,
        ctx: &EvalContext,
    ) -> Result<ComplexValue, EngineError> {
        let mut out = lhs.duplicate();
        self.apply(&mut out, Some(rhs), ctx)?;
        Ok(out)
    }

    /// Apply a unary operator to a fresh value
    pub fn apply_unary(&self, x: &ComplexValue, ctx: &EvalContext) -> Result<ComplexValue, EngineError> {
        let mut out = x.duplicate();
        self.apply(&mut out, None, ctx)?;
        Ok(out)
    }
}

impl From<AdditiveOp> for Operator {
    fn from(op: AdditiveOp) -> Self {
        Operator::Additive(op)
    }
}

impl From<MultiplicativeOp> for Operator {
    fn from(op: MultiplicativeOp) -> Self {
        Operator::Multiplicative(op)
    }
}

impl From<ExponentialOp> for Operator {
    fn from(op: ExponentialOp) -> Self {
        Operator::Exponential(op)
    }
}

impl From<PrefixOp> for Operator {
    fn from(op: PrefixOp) -> Self {
        Operator::Prefix(op)
    }
}

impl From<PostfixOp> for Operator {
    fn from(op: PostfixOp) -> Self {
        Operator::Postfix(op)
    }
}

impl FromStr for Operator {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op: Operator = match s.trim() {
            "+" => AdditiveOp::Plus.into(),
            "-" | "−" => AdditiveOp::Minus.into(),
            "*" | "×" => MultiplicativeOp::Multiply.into(),
            "∙" => MultiplicativeOp::ImplicitMultiply.into(),
            "/" | "÷" => MultiplicativeOp::Divide.into(),
            "%" | "mod" => MultiplicativeOp::Modulo.into(),
            "and" => MultiplicativeOp::And.into(),
            "or" => MultiplicativeOp::Or.into(),
            "xor" => MultiplicativeOp::Xor.into(),
            "nand" => MultiplicativeOp::Nand.into(),
            "nor" => MultiplicativeOp::Nor.into(),
            "xnor" => MultiplicativeOp::Xnor.into(),
            "nCr" | "ncr" => MultiplicativeOp::Combinations.into(),
            "nPr" | "npr" => MultiplicativeOp::Permutations.into(),
            "^" => ExponentialOp::Power.into(),
            "root" => ExponentialOp::Root.into(),
            "sin" => PrefixOp::Sin.into(),
            "cos" => PrefixOp::Cos.into(),
            "tan" => PrefixOp::Tan.into(),
            "asin" | "arcsin" => PrefixOp::Asin.into(),
            "acos" | "arccos" => PrefixOp::Acos.into(),
            "atan" | "arctan" => PrefixOp::Atan.into(),
            "sinh" => PrefixOp::Sinh.into(),
            "cosh" => PrefixOp::Cosh.into(),
            "tanh" => PrefixOp::Tanh.into(),
            "asinh" | "arcsinh" => PrefixOp::Asinh.into(),
            "acosh" | "arccosh" => PrefixOp::Acosh.into(),
            "atanh" | "arctanh" => PrefixOp::Atanh.into(),
            "re" => PrefixOp::Re.into(),
            "im" => PrefixOp::Im.into(),
            "abs" => PrefixOp::Abs.into(),
            "arg" => PrefixOp::Arg.into(),
            "not" => PrefixOp::Not.into(),
            "rnd" | "round" => PrefixOp::Round.into(),
            "log" => PrefixOp::Log.into(),
            "ln" => PrefixOp::Ln.into(),
            "log2" => PrefixOp::Log2.into(),
            "√" | "sqrt" => PrefixOp::Sqrt.into(),
            "∛" | "cbrt" => PrefixOp::Cbrt.into(),
            "Σ" | "sigma" => PrefixOp::Sigma.into(),
            "10^" => PrefixOp::TenTo.into(),
            "e^" | "exp" => PrefixOp::ETo.into(),
            "2^" => PrefixOp::TwoTo.into(),
            "²" | "sq" => PostfixOp::Squared.into(),
            "³" | "cube" => PostfixOp::Cubed.into(),
            "!" => PostfixOp::Factorial.into(),
            "⁻¹" | "inv" => PostfixOp::Inverse.into(),
            _ => bail!("string not a valid operator"),
        };
        Ok(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[cfg(test)]
mod ops_tests {
    use super::*;
    use crate::real::RealValue;
    use float_cmp::{approx_eq, F64Margin};

    fn int(n: i64) -> ComplexValue {
        ComplexValue::from_i64(n, 10)
    }

    fn dec(text: &str) -> ComplexValue {
        ComplexValue::from_str_radix(text, 10)
    }

    fn op(s: &str) -> Operator {
        s.parse().unwrap()
    }

    fn unary(s: &str, x: ComplexValue, ctx: &EvalContext) -> ComplexValue {
        op(s).apply_unary(&x, ctx).unwrap()
    }

    fn binary(s: &str, a: ComplexValue, b: ComplexValue) -> ComplexValue {
        op(s).apply_binary(&a, &b, &EvalContext::default()).unwrap()
    }

    #[test]
    fn test_precedence_and_arity() {
        assert!(op("*").binds_before(&op("+")));
        assert!(!op("+").binds_before(&op("*")));
        assert!(op("-").binds_before(&op("+")));
        assert!(!op("^").binds_before(&op("^")));
        assert!(op("!").binds_before(&op("^")));
        assert_eq!(op("sin").arity(), Arity::Unary);
        assert_eq!(op("nCr").arity(), Arity::Binary);
        assert_eq!(op("nCr").precedence(), Precedence::Multiplicative);
        assert_eq!(Operator::from(PostfixOp::Inverse).to_string(), "⁻¹");
        assert!("frobnicate".parse::<Operator>().is_err());
    }

    #[test]
    fn test_arity_mismatch() {
        let ctx = EvalContext::default();
        let mut x = int(1);
        assert!(op("+").apply(&mut x, None, &ctx).is_err());
        assert!(op("!").apply(&mut x, Some(&int(2)), &ctx).is_err());
    }

    #[test]
    fn test_binary_dispatch() {
        assert_eq!(binary("+", int(2), int(3)), int(5));
        assert_eq!(binary("-", int(2), int(3)), int(-1));
        assert_eq!(binary("∙", int(2), int(3)), int(6));
        assert_eq!(binary("/", int(3), int(4)), dec("0.75"));
        assert_eq!(binary("%", int(7), int(3)), int(1));
        assert_eq!(binary("nCr", int(5), int(2)), int(10));
        assert_eq!(binary("nPr", int(5), int(2)), int(20));
        assert_eq!(binary("^", int(2), int(10)), int(1024));
        assert_eq!(binary("root", int(3), int(27)), int(3));
        assert_eq!(binary("xor", int(6), int(3)), int(5));

        let ctx = EvalContext::new(TrigMode::Degrees, 8);
        let nand = op("nand").apply_binary(&int(6), &int(3), &ctx).unwrap();
        assert_eq!(nand, int(253));
    }

    #[test]
    fn test_unary_dispatch() {
        let deg = EvalContext::default();
        assert_eq!(unary("sin", int(30), &deg), dec("0.5"));
        assert_eq!(unary("acos", int(0), &deg), int(90));
        assert_eq!(unary("√", int(16), &deg), int(4));
        assert_eq!(unary("log", int(1000), &deg), int(3));
        assert_eq!(unary("log2", int(1024), &deg), int(10));
        assert_eq!(unary("10^", int(3), &deg), int(1000));
        assert_eq!(unary("2^", int(8), &deg), int(256));
        assert_eq!(unary("Σ", int(4), &deg), int(10));
        assert_eq!(unary("rnd", dec("-2.5"), &deg), int(-3));
        assert_eq!(unary("²", int(-3), &deg), int(9));
        assert_eq!(unary("³", int(-3), &deg), int(-27));
        assert_eq!(unary("!", int(5), &deg), int(120));
        assert_eq!(unary("⁻¹", int(4), &deg), dec("0.25"));

        let byte = EvalContext::new(TrigMode::Degrees, 8);
        assert_eq!(unary("not", int(0), &byte), int(255));

        let e = unary("e^", int(1), &deg);
        assert!(approx_eq!(
            f64,
            e.real_part().to_f64(),
            std::f64::consts::E,
            F64Margin { epsilon: 1e-12, ulps: 4 }
        ));
    }

    #[test]
    fn test_complex_parts() {
        let deg = EvalContext::default();
        let z = ComplexValue::from_parts(RealValue::from_i64(-3, 10), RealValue::from_i64(4, 10));
        assert_eq!(unary("re", z.clone(), &deg), int(-3));
        assert_eq!(unary("im", z.clone(), &deg), int(4));
        assert_eq!(unary("abs", z.clone(), &deg).real_part(), &RealValue::from_i64(5, 10));
        assert_eq!(unary("arg", int(-1), &deg), int(180));
        assert_eq!(unary("arg", ComplexValue::i(10), &deg), int(90));

        let root = unary("√", int(-4), &deg);
        assert!(root.has_imaginary());
        assert_eq!(root.imaginary_part(), RealValue::from_i64(2, 10));
    }
}
