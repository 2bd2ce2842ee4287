use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Binary operators applied between two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// Every key on the calculator keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// 0-9
    Digit(u8),
    Point,
    Operator(Operator),
    Equals,
    /// AC
    Clear,
    /// +/-
    Negate,
    Percent,
    Square,
    Cube,
    /// 10^X
    PowerOfTen,
    /// 1/X
    Reciprocal,
    /// π
    Pi,
}

impl Key {
    pub fn label(&self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            Self::Digit(d) => DIGITS.get(usize::from(*d)).copied().unwrap_or("?"),
            Self::Point => ".",
            Self::Operator(op) => op.label(),
            Self::Equals => "=",
            Self::Clear => "AC",
            Self::Negate => "+/-",
            Self::Percent => "%",
            Self::Square => "X^2",
            Self::Cube => "X^3",
            Self::PowerOfTen => "10^X",
            Self::Reciprocal => "1/X",
            Self::Pi => "π",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown calculator key: {0}")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    /// Accepts the keypad labels, case-insensitively, plus `pi` for π.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim().to_ascii_uppercase().as_str() {
            "." => Self::Point,
            "+" => Self::Operator(Operator::Add),
            "-" => Self::Operator(Operator::Subtract),
            "*" => Self::Operator(Operator::Multiply),
            "/" => Self::Operator(Operator::Divide),
            "=" => Self::Equals,
            "AC" => Self::Clear,
            "+/-" => Self::Negate,
            "%" => Self::Percent,
            "X^2" => Self::Square,
            "X^3" => Self::Cube,
            "10^X" => Self::PowerOfTen,
            "1/X" => Self::Reciprocal,
            "π" | "PI" => Self::Pi,
            other => match other.as_bytes() {
                [d @ b'0'..=b'9'] => Self::Digit(d - b'0'),
                _ => return Err(UnknownKey(s.to_string())),
            },
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("7".parse::<Key>().unwrap(), Key::Digit(7));
        assert_eq!("x^2".parse::<Key>().unwrap(), Key::Square);
        assert_eq!("ac".parse::<Key>().unwrap(), Key::Clear);
        assert_eq!("π".parse::<Key>().unwrap(), Key::Pi);
        assert_eq!("pi".parse::<Key>().unwrap(), Key::Pi);
        assert_eq!(
            "/".parse::<Key>().unwrap(),
            Key::Operator(Operator::Divide)
        );
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!("42".parse::<Key>(), Err(UnknownKey("42".into())));
        assert!("sin".parse::<Key>().is_err());
    }

    #[test]
    fn test_label_round_trips_through_parse() {
        for key in [Key::Digit(0), Key::Negate, Key::PowerOfTen, Key::Reciprocal] {
            assert_eq!(key.label().parse::<Key>().unwrap(), key);
        }
    }
}
