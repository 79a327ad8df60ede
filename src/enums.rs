use serde::{Deserialize, Serialize};
use simple_error::{bail, SimpleError};
use std::fmt;
use std::str::FromStr;

/// Angular unit used by the circular trigonometric functions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrigMode {
    #[default]
    Degrees,
    Radians,
    Gradians,
}

impl TrigMode {
    pub fn to_long_string(&self) -> String {
        match self {
            TrigMode::Degrees => "degrees".to_string(),
            TrigMode::Radians => "radians".to_string(),
            TrigMode::Gradians => "gradians".to_string(),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            TrigMode::Degrees => "deg",
            TrigMode::Radians => "rad",
            TrigMode::Gradians => "grad",
        }
    }

    /// Size of a right angle in this unit, or `None` for radians where it is
    /// not a rational number
    pub fn quarter_turn(&self) -> Option<i64> {
        match self {
            TrigMode::Degrees => Some(90),
            TrigMode::Radians => None,
            TrigMode::Gradians => Some(100),
        }
    }
}

impl FromStr for TrigMode {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deg" | "degree" | "degrees" | "°" => Ok(TrigMode::Degrees),
            "rad" | "radian" | "radians" => Ok(TrigMode::Radians),
            "grad" | "gradian" | "gradians" | "gon" => Ok(TrigMode::Gradians),
            _ => bail!("string not a valid trig mode"),
        }
    }
}

impl fmt::Display for TrigMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Bitwise operation applied on two's-complement patterns
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitOp {
    Not,
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
}

impl BitOp {
    pub fn apply(&self, a: u32, b: u32) -> u32 {
        match self {
            BitOp::Not => !a,
            BitOp::And => a & b,
            BitOp::Or => a | b,
            BitOp::Xor => a ^ b,
            BitOp::Nand => !(a & b),
            BitOp::Nor => !(a | b),
            BitOp::Xnor => !(a ^ b),
        }
    }
}

#[cfg(test)]
mod enums_tests {
    use super::*;

    #[test]
    fn test_trig_mode_parse() {
        assert_eq!("Degrees".parse::<TrigMode>().unwrap(), TrigMode::Degrees);
        assert_eq!("rad".parse::<TrigMode>().unwrap(), TrigMode::Radians);
        assert_eq!("gon".parse::<TrigMode>().unwrap(), TrigMode::Gradians);
        assert!("turns".parse::<TrigMode>().is_err());
        assert_eq!(TrigMode::default(), TrigMode::Degrees);
        assert_eq!(format!("{}", TrigMode::Gradians), "grad");
    }

    #[test]
    fn test_bit_op() {
        assert_eq!(BitOp::And.apply(0b1100, 0b1010), 0b1000);
        assert_eq!(BitOp::Or.apply(0b1100, 0b1010), 0b1110);
        assert_eq!(BitOp::Xor.apply(0b1100, 0b1010), 0b0110);
        assert_eq!(BitOp::Nand.apply(u32::MAX, u32::MAX), 0);
        assert_eq!(BitOp::Not.apply(0, 0), u32::MAX);
    }
}
