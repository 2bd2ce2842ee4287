//! Terminal front-end for Tenki: view states, navigation and rendering.

pub mod input;
pub mod navigator;
pub mod render;
pub mod view;

pub use input::{parse_input, Input};
pub use navigator::Navigator;
pub use render::{render, render_calculator};
pub use view::{Event, ForecastCard, View, ViewState};
