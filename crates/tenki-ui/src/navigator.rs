//! Turns user events into new view states.
//!
//! Every event runs its whole fetch → store → render chain before the next
//! one is read, so there is never more than one request in flight.

use tenki_core::StorageConfig;
use tenki_weather::{refresh_forecast, ForecastStore, JmaClient, RefreshOutcome, WeatherError};

use crate::view::{Event, ForecastCard, View, ViewState, DIRECTORY_UNAVAILABLE, FORECAST_UNAVAILABLE};

pub struct Navigator {
    client: JmaClient,
    storage: StorageConfig,
    state: ViewState,
}

impl Navigator {
    pub fn new(client: JmaClient, storage: StorageConfig) -> Self {
        Self {
            client,
            storage,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Apply one event. A failed action keeps the previous view and sets the error line.
    pub async fn handle(&mut self, event: Event) -> &ViewState {
        self.state.error = None;

        let result = match event {
            Event::SelectGroup(code) => self.show_offices(&code).await,
            Event::SelectOffice { code, name } => self.show_forecast(&code, &name).await,
            Event::Back => {
                self.state.view = View::MainMenu;
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::error!("Navigation failed: {}", e);
            self.state.error = Some(e.user_message().to_string());
        }

        &self.state
    }

    async fn show_offices(&mut self, group_code: &str) -> Result<(), WeatherError> {
        let Some(directory) = self.client.fetch_area_directory().await? else {
            self.state.error = Some(DIRECTORY_UNAVAILABLE.to_string());
            return Ok(());
        };

        let offices = directory.offices_in(group_code)?;
        let group_name = directory
            .centers
            .get(group_code)
            .map(|c| c.name.clone())
            .unwrap_or_default();

        tracing::info!("Showing {} offices for {}", offices.len(), group_name);
        self.state.view = View::Offices {
            group_code: group_code.to_string(),
            group_name,
            offices,
        };
        Ok(())
    }

    async fn show_forecast(&mut self, office_code: &str, region_name: &str) -> Result<(), WeatherError> {
        let mut store = ForecastStore::open(self.storage.database_path())?;

        match refresh_forecast(&self.client, &mut store, office_code, region_name).await? {
            RefreshOutcome::Unavailable => {
                self.state.error = Some(FORECAST_UNAVAILABLE.to_string());
            }
            RefreshOutcome::Ready(rows) => {
                let cards = rows
                    .iter()
                    .map(|stored| ForecastCard::from_stored(stored, self.client.config()))
                    .collect();
                self.state.view = View::Forecast {
                    region_name: region_name.to_string(),
                    cards,
                };
            }
        }
        Ok(())
    }
}
