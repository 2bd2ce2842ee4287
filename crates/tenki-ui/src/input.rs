use tenki_weather::REGION_GROUPS;

use crate::view::{Event, View};

/// A line of terminal input interpreted against the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Event(Event),
    Quit,
    /// Not a valid choice on this screen
    Unknown,
}

/// Menu entries are numbered from 1; `b` goes back and `q` quits.
pub fn parse_input(view: &View, line: &str) -> Input {
    let line = line.trim();
    match line {
        "q" | "quit" => return Input::Quit,
        "b" | "back" | "戻る" => {
            return match view {
                View::MainMenu => Input::Unknown,
                _ => Input::Event(Event::Back),
            };
        }
        _ => {}
    }

    let Some(index) = line.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
        return Input::Unknown;
    };

    match view {
        View::MainMenu => REGION_GROUPS
            .get(index)
            .map(|g| Input::Event(Event::SelectGroup(g.code.to_string())))
            .unwrap_or(Input::Unknown),
        View::Offices { offices, .. } => offices
            .get(index)
            .map(|o| {
                Input::Event(Event::SelectOffice {
                    code: o.code.clone(),
                    name: o.name.clone(),
                })
            })
            .unwrap_or(Input::Unknown),
        View::Forecast { .. } => Input::Unknown,
    }
}
