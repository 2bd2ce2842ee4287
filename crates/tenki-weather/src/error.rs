//! Weather pipeline error types.

use tenki_core::{DatabaseError, NetworkError, RusqliteErrorExt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// The body was not the JSON shape we expect (bad syntax or a missing key).
    #[error("Parse error: {0}")]
    Parse(String),

    /// The document decoded but lacks the structure the matcher relies on.
    #[error("Malformed forecast document: {0}")]
    Malformed(String),

    #[error("Store error: {0}")]
    Store(#[from] DatabaseError),
}

impl From<rusqlite::Error> for WeatherError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Store(e.into_database_error())
    }
}

impl WeatherError {
    /// Line shown under the current screen.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(e) => e.user_message(),
            Self::Parse(_) | Self::Malformed(_) => "気象庁から予期しない形式のデータを受信しました",
            Self::Store(e) => e.user_message(),
        }
    }
}
