//! Calculator state machine.
//!
//! The display is text so that partially typed numbers ("3.", "-0.5") are
//! shown exactly as entered. Operators chain left to right with no
//! precedence.

use crate::keys::{Key, Operator};

/// Display text after an invalid operation
pub const ERROR_DISPLAY: &str = "Error";

#[derive(Debug, Clone)]
pub struct Calculator {
    display: String,
    operator: Operator,
    operand1: f64,
    new_operand: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            operator: Operator::Add,
            operand1: 0.0,
            new_operand: true,
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_error(&self) -> bool {
        self.display == ERROR_DISPLAY
    }

    /// Feed one key press. Any key after an error only clears it.
    pub fn press(&mut self, key: Key) {
        tracing::debug!("Key pressed: {}", key);

        if self.is_error() || key == Key::Clear {
            self.display = "0".to_string();
            self.reset();
            return;
        }

        match key {
            Key::Digit(_) | Key::Point => {
                if self.display == "0" || self.new_operand {
                    self.display = key.label().to_string();
                    self.new_operand = false;
                } else {
                    self.display.push_str(key.label());
                }
            }
            Key::Operator(op) => {
                let result = self
                    .value()
                    .and_then(|value| calculate(self.operand1, value, self.operator));
                self.display = format_result(result);
                self.operator = op;
                self.operand1 = result.unwrap_or(0.0);
                self.new_operand = true;
            }
            Key::Equals => {
                let result = self
                    .value()
                    .and_then(|value| calculate(self.operand1, value, self.operator));
                self.display = format_result(result);
                self.reset();
            }
            Key::Square => self.apply_unary(|x| Some(x.powi(2))),
            Key::Cube => self.apply_unary(|x| Some(x.powi(3))),
            Key::PowerOfTen => self.apply_unary(|x| Some(power_of_ten(x))),
            Key::Reciprocal => self.apply_unary(|x| (x != 0.0).then(|| 1.0 / x)),
            Key::Pi => self.apply_unary(|x| Some(x * std::f64::consts::PI)),
            Key::Percent => self.apply_unary(|x| Some(x / 100.0)),
            Key::Negate => match self.value() {
                Some(x) if x > 0.0 => self.display.insert(0, '-'),
                Some(x) if x < 0.0 => self.display = format_number(x.abs()),
                Some(_) => {}
                None => self.display = ERROR_DISPLAY.to_string(),
            },
            Key::Clear => {}
        }
    }

    /// Press a sequence of keys in order
    pub fn press_all<I: IntoIterator<Item = Key>>(&mut self, keys: I) {
        for key in keys {
            self.press(key);
        }
    }

    fn value(&self) -> Option<f64> {
        self.display.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn apply_unary(&mut self, f: impl FnOnce(f64) -> Option<f64>) {
        self.display = format_result(self.value().and_then(f));
        self.reset();
    }

    fn reset(&mut self) {
        self.operator = Operator::Add;
        self.operand1 = 0.0;
        self.new_operand = true;
    }
}

fn calculate(operand1: f64, operand2: f64, operator: Operator) -> Option<f64> {
    match operator {
        Operator::Add => Some(operand1 + operand2),
        Operator::Subtract => Some(operand1 - operand2),
        Operator::Multiply => Some(operand1 * operand2),
        Operator::Divide if operand2 == 0.0 => None,
        Operator::Divide => Some(operand1 / operand2),
    }
}

/// Integral exponents go through `powi` so whole powers stay exact
fn power_of_ten(exponent: f64) -> f64 {
    if exponent.fract() == 0.0 && exponent.abs() <= f64::from(i32::MAX) {
        10f64.powi(exponent as i32)
    } else {
        10f64.powf(exponent)
    }
}

fn format_result(result: Option<f64>) -> String {
    match result {
        Some(value) if value.is_finite() => format_number(value),
        _ => ERROR_DISPLAY.to_string(),
    }
}

/// Whole numbers print without a fractional part; `-0` prints as `0`.
fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn run(keys: &str) -> String {
        let mut calc = Calculator::new();
        calc.press_all(keys.split_whitespace().map(|k| k.parse::<Key>().unwrap()));
        calc.display().to_string()
    }

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(Calculator::new().display(), "0");
    }

    #[test]
    fn test_digits_accumulate() {
        assert_eq!(run("1 2 . 5"), "12.5");
        assert_eq!(run("0 0 7"), "7");
    }

    #[test]
    fn test_addition() {
        assert_eq!(run("1 + 2 ="), "3");
    }

    #[test]
    fn test_operators_chain_left_to_right() {
        assert_eq!(run("1 2 + 3 * 4 ="), "60");
    }

    #[test]
    fn test_fractional_result() {
        assert_eq!(run("7 / 2 ="), "3.5");
        assert_eq!(run(". 1 + . 2 ="), "0.30000000000000004");
    }

    #[test]
    fn test_division_by_zero_is_error() {
        assert_eq!(run("1 / 0 ="), ERROR_DISPLAY);
        assert_eq!(run("1 / 0 +"), ERROR_DISPLAY);
    }

    #[test]
    fn test_any_key_after_error_resets() {
        assert_eq!(run("1 / 0 = 5"), "0");
        assert_eq!(run("1 / 0 = 5 5"), "5");
    }

    #[test]
    fn test_clear() {
        assert_eq!(run("9 + 9 AC"), "0");
        assert_eq!(run("9 + AC 1 ="), "1");
    }

    #[test]
    fn test_unary_functions() {
        assert_eq!(run("2 X^2"), "4");
        assert_eq!(run("3 X^3"), "27");
        assert_eq!(run("3 10^X"), "1000");
        assert_eq!(run("4 1/X"), "0.25");
        assert_eq!(run("5 0 %"), "0.5");
        assert_eq!(run("2 π"), "6.283185307179586");
    }

    #[test]
    fn test_unary_starts_new_operand() {
        assert_eq!(run("2 X^2 3"), "3");
    }

    #[test]
    fn test_reciprocal_of_zero_is_error() {
        assert_eq!(run("0 1/X"), ERROR_DISPLAY);
    }

    #[test]
    fn test_negate() {
        assert_eq!(run("5 +/-"), "-5");
        assert_eq!(run("5 +/- +/-"), "5");
        assert_eq!(run("0 +/-"), "0");
        assert_eq!(run("5 +/- + 2 ="), "-3");
    }

    #[test]
    fn test_lone_point_is_error() {
        assert_eq!(run(". ="), ERROR_DISPLAY);
    }

    #[test]
    fn test_overflow_is_error() {
        assert_eq!(run("4 0 0 10^X"), ERROR_DISPLAY);
    }
}
