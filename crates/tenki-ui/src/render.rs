//! Plain-text rendering of view states and the calculator.

use tenki_calc::{Button, ButtonStyle, Calculator, KEYPAD};
use tenki_weather::REGION_GROUPS;

use crate::view::{View, ViewState, APP_TITLE, BACK_LABEL, SELECT_REGION_PROMPT};

const CELL_WIDTH: usize = 7;

pub fn render(state: &ViewState) -> String {
    let mut lines: Vec<String> = Vec::new();

    match &state.view {
        View::MainMenu => {
            lines.push(APP_TITLE.to_string());
            lines.push(String::new());
            lines.extend(
                REGION_GROUPS
                    .iter()
                    .enumerate()
                    .map(|(i, group)| format!("{:>2}. {}", i + 1, group.name)),
            );
            lines.push(String::new());
            lines.push("[q] quit".to_string());
        }
        View::Offices { group_name, offices, .. } => {
            lines.push(format!("{} ({})", SELECT_REGION_PROMPT, group_name));
            lines.push(String::new());
            lines.extend(
                offices
                    .iter()
                    .enumerate()
                    .map(|(i, office)| format!("{:>2}. {}", i + 1, office.name)),
            );
            lines.push(String::new());
            lines.push(format!("[b] {}  [q] quit", BACK_LABEL));
        }
        View::Forecast { region_name, cards } => {
            lines.push(format!("{}の天気予報", region_name));
            lines.push(String::new());
            for card in cards {
                lines.push(card.date.clone());
                lines.push(format!("  {}", card.icon_url));
                lines.push(format!("  {}", card.weather));
                if let Some(temperature) = &card.temperature {
                    lines.push(format!("  {}", temperature));
                }
                lines.push(String::new());
            }
            lines.push(format!("[b] {}  [q] quit", BACK_LABEL));
        }
    }

    if let Some(error) = &state.error {
        lines.push(String::new());
        lines.push(format!("! {}", error));
    }

    lines.join("\n") + "\n"
}

pub fn render_calculator(calc: &Calculator) -> String {
    let width = CELL_WIDTH * 5;
    let mut lines = vec![
        format!("{:>width$}", calc.display(), width = width),
        "-".repeat(width),
    ];
    lines.extend(KEYPAD.iter().map(|row| {
        let line: String = row.iter().map(render_button).collect();
        line.trim_end().to_string()
    }));
    lines.join("\n") + "\n"
}

fn render_button(button: &Button) -> String {
    let (open, close) = match button.style {
        ButtonStyle::Digit => ('[', ']'),
        ButtonStyle::Action => ('<', '>'),
        ButtonStyle::ExtraAction => ('(', ')'),
    };
    let inner = CELL_WIDTH * usize::from(button.expand) - 2;
    format!("{}{:^inner$}{}", open, button.label(), close, inner = inner)
}
