//! Fetch → match → store → read back, for one office.

use crate::client::JmaClient;
use crate::error::WeatherError;
use crate::matcher::find_matching_area;
use crate::rows::build_rows;
use crate::store::ForecastStore;
use crate::types::StoredForecast;

/// What a refresh produced
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The forecast document could not be fetched
    Unavailable,
    /// Stored rows for the region after the refresh; empty when nothing matched
    Ready(Vec<StoredForecast>),
}

/// Refresh the stored forecast for `region_name` from the office `office_code`.
///
/// When nothing matches, the region's stored rows are still replaced (with
/// nothing) and the result is an empty list.
pub async fn refresh_forecast(
    client: &JmaClient,
    store: &mut ForecastStore,
    office_code: &str,
    region_name: &str,
) -> Result<RefreshOutcome, WeatherError> {
    let Some(forecast) = client.fetch_forecast(office_code).await? else {
        return Ok(RefreshOutcome::Unavailable);
    };

    let directory = client.fetch_area_directory().await?;
    let rows = match find_matching_area(directory.as_ref(), &forecast, region_name)? {
        Some(matched) => build_rows(region_name, &matched),
        None => Vec::new(),
    };

    let inserted = store.replace(region_name, &rows)?;
    tracing::info!("Stored {} forecast rows for {}", inserted, region_name);

    if tracing::enabled!(tracing::Level::DEBUG) {
        for stored in store.dump(Some(region_name))? {
            tracing::debug!(
                "id={} region={} date={} weather={} max={} min={} code={} fetched_at={}",
                stored.id,
                stored.row.region_name,
                stored.row.date,
                stored.row.weather,
                stored.row.max_temp,
                stored.row.min_temp,
                stored.row.weather_code,
                stored.fetched_at
            );
        }
        tracing::debug!("Total stored rows: {}", store.count()?);
    }

    Ok(RefreshOutcome::Ready(store.read_back(region_name)?))
}
