//! Keypad layout. Buttons differ only in the key they send, their styling
//! and how many columns they span.

use crate::keys::{Key, Operator};
use ButtonStyle::{Action, Digit, ExtraAction};

/// Visual variant of a keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    /// Light text on translucent white
    Digit,
    /// Light text on orange
    Action,
    /// Dark text on blue-grey
    ExtraAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub key: Key,
    pub style: ButtonStyle,
    /// Columns spanned in its row
    pub expand: u8,
}

impl Button {
    const fn new(key: Key, style: ButtonStyle) -> Self {
        Self { key, style, expand: 1 }
    }

    const fn wide(key: Key, style: ButtonStyle, expand: u8) -> Self {
        Self { key, style, expand }
    }

    pub fn label(&self) -> &'static str {
        self.key.label()
    }
}

/// Keypad rows, top to bottom
pub const KEYPAD: [&[Button]; 5] = [
    &[
        Button::new(Key::Square, Digit),
        Button::new(Key::Clear, ExtraAction),
        Button::new(Key::Negate, ExtraAction),
        Button::new(Key::Percent, ExtraAction),
        Button::new(Key::Operator(Operator::Divide), Action),
    ],
    &[
        Button::new(Key::Cube, Digit),
        Button::new(Key::Digit(7), Digit),
        Button::new(Key::Digit(8), Digit),
        Button::new(Key::Digit(9), Digit),
        Button::new(Key::Operator(Operator::Multiply), Action),
    ],
    &[
        Button::new(Key::PowerOfTen, Digit),
        Button::new(Key::Digit(4), Digit),
        Button::new(Key::Digit(5), Digit),
        Button::new(Key::Digit(6), Digit),
        Button::new(Key::Operator(Operator::Subtract), Action),
    ],
    &[
        Button::new(Key::Reciprocal, Digit),
        Button::new(Key::Digit(1), Digit),
        Button::new(Key::Digit(2), Digit),
        Button::new(Key::Digit(3), Digit),
        Button::new(Key::Operator(Operator::Add), Action),
    ],
    &[
        Button::new(Key::Pi, Digit),
        Button::wide(Key::Digit(0), Digit, 2),
        Button::new(Key::Point, Digit),
        Button::new(Key::Equals, Action),
    ],
];
