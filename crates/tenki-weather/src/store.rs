//! SQLite store for fetched forecasts.
//!
//! One table, keyed by region name. Refreshing a region deletes its old rows
//! before inserting the new set.

use rusqlite::{params, Connection};
use std::path::Path;
use tenki_core::DatabaseError;

use crate::error::WeatherError;
use crate::types::{ForecastRow, StoredForecast};

const SELECT_COLUMNS: &str =
    "SELECT id, region_name, date, weather, max_temp, min_temp, weather_code, fetched_at FROM weather_forecasts";

/// Handle on the forecast database. Open it for one operation and drop it after.
pub struct ForecastStore {
    conn: Connection,
}

impl ForecastStore {
    /// Open (or create) the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, WeatherError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::ConnectionFailed(format!("{}: {}", parent.display(), e))
            })?;
        }

        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> Result<Self, WeatherError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), WeatherError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS weather_forecasts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                region_name TEXT,
                date TEXT,
                weather TEXT,
                max_temp TEXT,
                min_temp TEXT,
                weather_code TEXT,
                fetched_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;
        Ok(())
    }

    /// Delete every row for `region_name`, then insert `rows` under that name.
    ///
    /// An empty `rows` leaves the region with no forecasts.
    pub fn replace(&mut self, region_name: &str, rows: &[ForecastRow]) -> Result<usize, WeatherError> {
        let tx = self.conn.transaction()?;

        let deleted = tx.execute(
            "DELETE FROM weather_forecasts WHERE region_name = ?1",
            params![region_name],
        )?;

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO weather_forecasts
                (region_name, date, weather, max_temp, min_temp, weather_code)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;
            for row in rows {
                stmt.execute(params![
                    region_name,
                    row.date,
                    row.weather,
                    row.max_temp,
                    row.min_temp,
                    row.weather_code,
                ])?;
            }
        }

        tx.commit()?;

        tracing::debug!(
            "Replaced forecasts for {}: {} deleted, {} inserted",
            region_name,
            deleted,
            rows.len()
        );
        Ok(rows.len())
    }

    /// All rows for a region, oldest date first.
    pub fn read_back(&self, region_name: &str) -> Result<Vec<StoredForecast>, WeatherError> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE region_name = ?1 ORDER BY date ASC, id ASC",
            SELECT_COLUMNS
        ))?;

        let rows = stmt.query_map(params![region_name], Self::row_to_forecast)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Rows for debugging: one region by date, or everything newest fetch first.
    pub fn dump(&self, region_name: Option<&str>) -> Result<Vec<StoredForecast>, WeatherError> {
        match region_name {
            Some(name) => self.read_back(name),
            None => {
                let mut stmt = self.conn.prepare(&format!(
                    "{} ORDER BY fetched_at DESC, id DESC",
                    SELECT_COLUMNS
                ))?;
                let rows = stmt.query_map([], Self::row_to_forecast)?;
                Ok(rows.collect::<Result<Vec<_>, _>>()?)
            }
        }
    }

    /// Total number of stored rows across all regions.
    pub fn count(&self) -> Result<usize, WeatherError> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM weather_forecasts", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn row_to_forecast(row: &rusqlite::Row) -> rusqlite::Result<StoredForecast> {
        Ok(StoredForecast {
            id: row.get(0)?,
            row: ForecastRow {
                region_name: row.get(1)?,
                date: row.get(2)?,
                weather: row.get(3)?,
                max_temp: row.get(4)?,
                min_temp: row.get(5)?,
                weather_code: row.get(6)?,
            },
            fetched_at: row.get(7)?,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn row(region: &str, date: &str, weather: &str) -> ForecastRow {
        ForecastRow {
            region_name: region.to_string(),
            date: date.to_string(),
            weather: weather.to_string(),
            max_temp: "20".to_string(),
            min_temp: "10".to_string(),
            weather_code: crate::classify::weather_code(weather).to_string(),
        }
    }

    #[test]
    fn test_replace_and_read_back() {
        let mut store = ForecastStore::in_memory().unwrap();
        let inserted = store
            .replace(
                "Tokyo",
                &[row("Tokyo", "2024-05-02", "雨"), row("Tokyo", "2024-05-01", "晴れ")],
            )
            .unwrap();
        assert_eq!(inserted, 2);

        let rows = store.read_back("Tokyo").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row.date, "2024-05-01");
        assert_eq!(rows[0].row.weather_code, "100");
        assert_eq!(rows[1].row.weather_code, "300");
    }

    #[test]
    fn test_second_replace_overwrites_first() {
        let mut store = ForecastStore::in_memory().unwrap();
        store
            .replace("Tokyo", &[row("Tokyo", "2024-05-01", "晴れ"), row("Tokyo", "2024-05-02", "晴れ")])
            .unwrap();
        store
            .replace("Tokyo", &[row("Tokyo", "2024-05-03", "雪")])
            .unwrap();

        let rows = store.read_back("Tokyo").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row.date, "2024-05-03");
        assert_eq!(rows[0].row.weather, "雪");
    }

    #[test]
    fn test_replace_with_no_rows_empties_region() {
        let mut store = ForecastStore::in_memory().unwrap();
        store
            .replace("Tokyo", &[row("Tokyo", "2024-05-01", "晴れ")])
            .unwrap();

        store.replace("Tokyo", &[]).unwrap();
        assert!(store.read_back("Tokyo").unwrap().is_empty());
    }

    #[test]
    fn test_replace_leaves_other_regions_alone() {
        let mut store = ForecastStore::in_memory().unwrap();
        store.replace("Tokyo", &[row("Tokyo", "2024-05-01", "晴れ")]).unwrap();
        store.replace("Osaka", &[row("Osaka", "2024-05-01", "雨")]).unwrap();
        store.replace("Tokyo", &[]).unwrap();

        assert_eq!(store.read_back("Osaka").unwrap().len(), 1);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_rows_are_stored_under_replace_region() {
        let mut store = ForecastStore::in_memory().unwrap();
        store.replace("東京都", &[row("東京地方", "2024-05-01", "晴れ")]).unwrap();

        let rows = store.read_back("東京都").unwrap();
        assert_eq!(rows[0].row.region_name, "東京都");
    }

    #[test]
    fn test_dump_all_and_count() {
        let mut store = ForecastStore::in_memory().unwrap();
        store.replace("Tokyo", &[row("Tokyo", "2024-05-01", "晴れ")]).unwrap();
        store
            .replace("Osaka", &[row("Osaka", "2024-05-01", "雨"), row("Osaka", "2024-05-02", "雨")])
            .unwrap();

        let all = store.dump(None).unwrap();
        assert_eq!(all.len(), 3);
        // Osaka was inserted last
        assert_eq!(all[0].row.region_name, "Osaka");
        assert_eq!(store.dump(Some("Tokyo")).unwrap().len(), 1);
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_store_persists_between_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("weather_forecast.db");

        {
            let mut store = ForecastStore::open(&path).unwrap();
            store.replace("Tokyo", &[row("Tokyo", "2024-05-01", "晴れ")]).unwrap();
        }

        let store = ForecastStore::open(&path).unwrap();
        let rows = store.read_back("Tokyo").unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].id > 0);
    }
}
