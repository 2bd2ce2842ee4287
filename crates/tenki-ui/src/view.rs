//! Screen states. Each navigation produces a new `ViewState`; the renderer
//! only reads them.

use tenki_core::JmaConfig;
use tenki_weather::{OfficeEntry, StoredForecast};

pub const APP_TITLE: &str = "気象庁天気予報アプリ";
pub const SELECT_REGION_PROMPT: &str = "地域を選択してください";
pub const BACK_LABEL: &str = "戻る";
pub const FORECAST_UNAVAILABLE: &str = "天気情報を取得できません";
pub const DIRECTORY_UNAVAILABLE: &str = "地域情報の取得に失敗しました";

/// One day of a region's forecast as shown on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    pub date: String,
    pub icon_url: String,
    pub weather: String,
    /// `"{min}°C / {max}°C"`; absent unless both bounds are known
    pub temperature: Option<String>,
}

impl ForecastCard {
    pub fn from_stored(stored: &StoredForecast, jma: &JmaConfig) -> Self {
        Self {
            date: stored.row.date.clone(),
            icon_url: jma.icon_url(&stored.row.weather_code),
            weather: stored.row.weather.clone(),
            temperature: stored.row.temperature_range(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// The eleven region groups
    #[default]
    MainMenu,
    /// Offices under one region group
    Offices {
        group_code: String,
        group_name: String,
        offices: Vec<OfficeEntry>,
    },
    /// Forecast cards for one region; empty when nothing matched
    Forecast {
        region_name: String,
        cards: Vec<ForecastCard>,
    },
}

/// What is on screen: the current view plus an optional error line under it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub view: View,
    pub error: Option<String>,
}

/// User actions that change the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectGroup(String),
    SelectOffice { code: String, name: String },
    Back,
}
