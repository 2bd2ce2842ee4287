//! Locate the forecast record for a named area.

use crate::error::WeatherError;
use crate::types::{AreaDirectory, ForecastReport, MatchedArea};

/// Find the first area in the short-range report whose name equals `target_name`.
///
/// Series are scanned in document order and the first one containing an
/// exact name match wins. Without a directory there is nothing to match
/// against and the result is `Ok(None)`, as it is for a report with no
/// series. A document with no report is malformed.
pub fn find_matching_area<'a>(
    directory: Option<&AreaDirectory>,
    forecast: &'a [ForecastReport],
    target_name: &str,
) -> Result<Option<MatchedArea<'a>>, WeatherError> {
    if directory.is_none() {
        tracing::debug!("No area directory, skipping match for {}", target_name);
        return Ok(None);
    }

    let report = forecast
        .first()
        .ok_or_else(|| WeatherError::Malformed("forecast document has no reports".into()))?;

    for (index, series) in report.time_series.iter().enumerate() {
        if let Some(area) = series.areas.iter().find(|a| a.area.name == target_name) {
            tracing::debug!("Matched {} in series {}", target_name, index);
            return Ok(Some(MatchedArea {
                area,
                time_defines: &series.time_defines,
            }));
        }
    }

    tracing::info!("No forecast area named {}", target_name);
    Ok(None)
}
