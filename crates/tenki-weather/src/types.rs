use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::WeatherError;

/// One of the fixed region groups shown on the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionGroup {
    pub code: &'static str,
    pub name: &'static str,
}

/// The eleven JMA regional centers, in menu order
pub const REGION_GROUPS: [RegionGroup; 11] = [
    RegionGroup { code: "010100", name: "北海道地方" },
    RegionGroup { code: "010200", name: "東北地方" },
    RegionGroup { code: "010300", name: "関東甲信地方" },
    RegionGroup { code: "010400", name: "東海地方" },
    RegionGroup { code: "010500", name: "北陸地方" },
    RegionGroup { code: "010600", name: "近畿地方" },
    RegionGroup { code: "010700", name: "中国地方" },
    RegionGroup { code: "010800", name: "四国地方" },
    RegionGroup { code: "010900", name: "九州北部地方" },
    RegionGroup { code: "011000", name: "九州南部・奄美地方" },
    RegionGroup { code: "011100", name: "沖縄地方" },
];

/// Look up a region group by its center code
pub fn region_group(code: &str) -> Option<RegionGroup> {
    REGION_GROUPS.iter().copied().find(|g| g.code == code)
}

/// Decoded `area.json`: region groups and the offices below them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaDirectory {
    pub centers: BTreeMap<String, Center>,
    pub offices: BTreeMap<String, Office>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Center {
    pub name: String,
    #[serde(rename = "enName", default)]
    pub en_name: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Office {
    pub name: String,
    #[serde(rename = "enName", default)]
    pub en_name: Option<String>,
    #[serde(rename = "officeName", default)]
    pub office_name: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
}

/// An office listed under a region group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficeEntry {
    pub code: String,
    pub name: String,
}

impl AreaDirectory {
    /// Offices belonging to a region group, in the order the directory lists them.
    ///
    /// An unknown group or a child code with no office entry is a malformed
    /// directory, not an empty one.
    pub fn offices_in(&self, group_code: &str) -> Result<Vec<OfficeEntry>, WeatherError> {
        let center = self.centers.get(group_code).ok_or_else(|| {
            WeatherError::Malformed(format!("area directory has no center {}", group_code))
        })?;

        center
            .children
            .iter()
            .map(|code| {
                let office = self.offices.get(code).ok_or_else(|| {
                    WeatherError::Malformed(format!("area directory has no office {}", code))
                })?;
                Ok(OfficeEntry {
                    code: code.clone(),
                    name: office.name.clone(),
                })
            })
            .collect()
    }
}

/// One element of the forecast document array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    #[serde(rename = "publishingOffice", default)]
    pub publishing_office: Option<String>,
    #[serde(rename = "reportDatetime", default)]
    pub report_datetime: Option<String>,
    #[serde(rename = "timeSeries")]
    pub time_series: Vec<TimeSeries>,
}

/// Decoded forecast document; element 0 is the short-range report
pub type ForecastDocument = Vec<ForecastReport>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    #[serde(rename = "timeDefines")]
    pub time_defines: Vec<String>,
    pub areas: Vec<AreaForecast>,
}

/// Per-area forecast arrays, index-aligned with the owning series' time points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaForecast {
    pub area: AreaRef,
    #[serde(default)]
    pub weathers: Option<Vec<String>>,
    #[serde(rename = "tempsMax", default)]
    pub temps_max: Option<Vec<String>>,
    #[serde(rename = "tempsMin", default)]
    pub temps_min: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaRef {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// The area record a target name resolved to, with its series' time points
#[derive(Debug, Clone, Copy)]
pub struct MatchedArea<'a> {
    pub area: &'a AreaForecast,
    pub time_defines: &'a [String],
}

/// One forecast day ready to persist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub region_name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub weather: String,
    pub max_temp: String,
    pub min_temp: String,
    /// 3-digit icon code
    pub weather_code: String,
}

impl ForecastRow {
    /// `"{min}°C / {max}°C"`, only when both bounds are known
    pub fn temperature_range(&self) -> Option<String> {
        if self.min_temp.is_empty() || self.max_temp.is_empty() {
            return None;
        }
        Some(format!("{}°C / {}°C", self.min_temp, self.max_temp))
    }
}

/// A forecast row read back from the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredForecast {
    pub id: i64,
    #[serde(flatten)]
    pub row: ForecastRow,
    /// UTC, set by the store on insert
    pub fetched_at: NaiveDateTime,
}
