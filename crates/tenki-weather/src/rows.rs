use crate::classify;
use crate::types::{ForecastRow, MatchedArea};

/// Date part of an ISO-8601 time point (text before the first `T`)
pub fn forecast_date(time_define: &str) -> &str {
    time_define
        .split_once('T')
        .map_or(time_define, |(date, _)| date)
}

/// Build one row per time point that has a weather description.
///
/// Temperatures missing at an index become empty strings.
pub fn build_rows(region_name: &str, matched: &MatchedArea<'_>) -> Vec<ForecastRow> {
    let Some(weathers) = matched.area.weathers.as_deref() else {
        return Vec::new();
    };

    matched
        .time_defines
        .iter()
        .enumerate()
        .filter_map(|(index, time_define)| {
            let weather = weathers.get(index)?;
            Some(ForecastRow {
                region_name: region_name.to_string(),
                date: forecast_date(time_define).to_string(),
                weather: weather.clone(),
                max_temp: value_at(matched.area.temps_max.as_deref(), index),
                min_temp: value_at(matched.area.temps_min.as_deref(), index),
                weather_code: classify::weather_code(weather).to_string(),
            })
        })
        .collect()
}

fn value_at(values: Option<&[String]>, index: usize) -> String {
    values
        .and_then(|v| v.get(index))
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::types::AreaForecast;

    fn area(json: serde_json::Value) -> AreaForecast {
        serde_json::from_value(json).unwrap()
    }

    fn times(n: usize) -> Vec<String> {
        (1..=n)
            .map(|d| format!("2024-05-{:02}T00:00:00+09:00", d))
            .collect()
    }

    #[test]
    fn test_date_extraction() {
        assert_eq!(forecast_date("2024-05-01T00:00:00+09:00"), "2024-05-01");
        assert_eq!(forecast_date("2024-05-01"), "2024-05-01");
    }

    #[test]
    fn test_one_row_per_weather() {
        let area = area(serde_json::json!({
            "area": {"name": "東京地方"},
            "weathers": ["晴れ", "曇時々雨", "雪"],
            "tempsMax": ["24", "20", "5"],
            "tempsMin": ["15", "12", "-1"]
        }));
        let time_defines = times(3);
        let matched = MatchedArea { area: &area, time_defines: &time_defines };

        let rows = build_rows("東京地方", &matched);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].date, "2024-05-02");
        assert_eq!(rows[1].weather_code, "203");
        assert_eq!(rows[2].min_temp, "-1");
        assert!(rows.iter().all(|r| r.region_name == "東京地方"));
    }

    #[test]
    fn test_rows_stop_where_weathers_end() {
        let area = area(serde_json::json!({
            "area": {"name": "東京地方"},
            "weathers": ["晴れ", "雨"]
        }));
        let time_defines = times(4);
        let matched = MatchedArea { area: &area, time_defines: &time_defines };

        assert_eq!(build_rows("東京地方", &matched).len(), 2);
    }

    #[test]
    fn test_short_or_missing_temperatures_are_empty() {
        let area = area(serde_json::json!({
            "area": {"name": "東京地方"},
            "weathers": ["晴れ", "雨", "雪"],
            "tempsMax": ["24"]
        }));
        let time_defines = times(3);
        let matched = MatchedArea { area: &area, time_defines: &time_defines };

        let rows = build_rows("東京地方", &matched);
        assert_eq!(rows[0].max_temp, "24");
        assert_eq!(rows[1].max_temp, "");
        assert_eq!(rows[2].max_temp, "");
        assert!(rows.iter().all(|r| r.min_temp.is_empty()));
    }

    #[test]
    fn test_no_weathers_no_rows() {
        let area = area(serde_json::json!({
            "area": {"name": "東京"},
            "tempsMax": ["24"],
            "tempsMin": ["15"]
        }));
        let time_defines = times(1);
        let matched = MatchedArea { area: &area, time_defines: &time_defines };

        assert!(build_rows("東京", &matched).is_empty());
    }
}
