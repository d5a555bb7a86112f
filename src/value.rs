//! The [Value] type that flows through the register, the memory and the queues.

use std::fmt;
use std::str::FromStr;

/// A single box of data. Either a number or a letter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    /// A signed integer.
    Integer(i32),

    /// A single character symbol.
    Character(char),
}

/// Reasons why an arithmetic operation on two [Values](Value) failed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ArithmeticError {
    /// One of the operands is a character and the operation is not defined for it.
    Character,

    /// The result does not fit into a [Value::Integer].
    Overflow,
}

impl Value {
    /// Returns the integer if this is a [Value::Integer].
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Character(_) => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Value::Integer(0)
    }

    /// Characters are never negative.
    pub fn is_negative(&self) -> bool {
        match self {
            Value::Integer(n) => *n < 0,
            Value::Character(_) => false,
        }
    }

    /// Adds two integers. Adding anything to a character is an error.
    pub fn checked_add(self, other: Value) -> Result<Value, ArithmeticError> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.checked_add(b)
                .map(Value::Integer)
                .ok_or(ArithmeticError::Overflow),
            _ => Err(ArithmeticError::Character),
        }
    }

    /// Subtracts `other` from `self`.
    ///
    /// Two characters can be subtracted from each other, which results in the distance between
    /// them as an integer. Mixing a character with an integer is an error.
    pub fn checked_sub(self, other: Value) -> Result<Value, ArithmeticError> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.checked_sub(b)
                .map(Value::Integer)
                .ok_or(ArithmeticError::Overflow),
            (Value::Character(a), Value::Character(b)) =>
                Ok(Value::Integer(a as i32 - b as i32)),
            _ => Err(ArithmeticError::Character),
        }
    }

    pub fn increment(self) -> Result<Value, ArithmeticError> {
        self.checked_add(Value::Integer(1))
    }

    pub fn decrement(self) -> Result<Value, ArithmeticError> {
        self.checked_sub(Value::Integer(1))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Value {
        Value::Integer(n)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Value {
        Value::Character(c)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Character(c) => write!(f, "{}", c),
        }
    }
}

/// Error returned when a string is neither an integer nor a single character.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseValueError {
    pub input: String,
}

impl fmt::Display for ParseValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}' is neither an integer nor a single character", self.input)
    }
}

impl std::error::Error for ParseValueError {}

impl FromStr for Value {
    type Err = ParseValueError;

    fn from_str(input: &str) -> Result<Value, ParseValueError> {
        if let Ok(n) = input.parse() {
            return Ok(Value::Integer(n));
        }

        let mut chars = input.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_ascii_digit() && !c.is_whitespace() => Ok(Value::Character(c)),
            _ => Err(ParseValueError { input: input.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        assert_eq!("42".parse::<Value>(), Ok(Value::Integer(42)));
        assert_eq!("-7".parse::<Value>(), Ok(Value::Integer(-7)));
        assert_eq!("A".parse::<Value>(), Ok(Value::Character('A')));
        assert!("AB".parse::<Value>().is_err());
        assert!("".parse::<Value>().is_err());
    }

    #[test]
    fn test_character_arithmetic() {
        let a = Value::Character('A');
        let e = Value::Character('E');

        assert_eq!(e.checked_sub(a), Ok(Value::Integer(4)));
        assert_eq!(a.checked_add(e), Err(ArithmeticError::Character));
        assert_eq!(a.checked_sub(Value::Integer(1)), Err(ArithmeticError::Character));
        assert_eq!(a.increment(), Err(ArithmeticError::Character));
    }

    #[test]
    fn test_integer_overflow() {
        assert_eq!(Value::Integer(i32::MAX).increment(), Err(ArithmeticError::Overflow));
        assert_eq!(Value::Integer(i32::MIN).decrement(), Err(ArithmeticError::Overflow));
        assert_eq!(Value::Integer(3).checked_sub(Value::Integer(5)), Ok(Value::Integer(-2)));
    }

    #[test]
    fn test_sign_checks() {
        assert!(Value::Integer(0).is_zero());
        assert!(!Value::Character('0').is_zero());
        assert!(Value::Integer(-1).is_negative());
        assert!(!Value::Character('Z').is_negative());
    }
}
