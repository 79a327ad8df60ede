use std::fmt;

/// Failures surfaced by the fallible constructors.
///
/// Numeric operations never return these: they mark the receiver invalid
/// instead. The variants exist so parsing and deserialization can say why a
/// value could not be built.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// Malformed digit string
    Parse(String),
    /// Operand outside the domain of an operation
    InvalidOperand(&'static str),
    /// Exponent or mantissa growth beyond the configured bounds
    PrecisionExhausted,
    /// Radix outside `[2, 36]`
    InvalidRadix(u32),
    /// Persisted record inconsistent with the value layout
    Deserialize(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Parse(msg) => write!(f, "Parse error: {}", msg),
            EngineError::InvalidOperand(op) => write!(f, "Invalid operand for {}", op),
            EngineError::PrecisionExhausted => {
                write!(f, "Result exceeds the configured precision")
            }
            EngineError::InvalidRadix(radix) => {
                write!(f, "Radix {} outside the supported range 2..=36", radix)
            }
            EngineError::Deserialize(msg) => write!(f, "Inconsistent value record: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            EngineError::Parse("digit 'G' not valid in radix 16".to_string()).to_string(),
            "Parse error: digit 'G' not valid in radix 16"
        );
        assert_eq!(
            EngineError::InvalidRadix(40).to_string(),
            "Radix 40 outside the supported range 2..=36"
        );
        assert_eq!(
            EngineError::InvalidOperand("factorial").to_string(),
            "Invalid operand for factorial"
        );
    }
}
