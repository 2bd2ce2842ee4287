//! Four-function calculator with a few extra keys (powers, reciprocal, π, %).

pub mod engine;
pub mod keypad;
pub mod keys;

pub use engine::{Calculator, ERROR_DISPLAY};
pub use keypad::{Button, ButtonStyle, KEYPAD};
pub use keys::{Key, Operator, UnknownKey};
