//! Transport and storage failures shared by the Tenki crates.
//!
//! `user_message()` is the line shown under the current screen, so it is
//! written in the same language as the rest of the UI.

use thiserror::Error;

/// A request to the forecast service never produced a response.
///
/// Non-2xx responses are not errors here: the client reports them as "no
/// data".
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Could not reach the forecast service: {0}")]
    ConnectionFailed(String),

    #[error("Forecast request timed out")]
    Timeout,
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ConnectionFailed(_) => "気象庁に接続できません。ネットワークを確認してください",
            Self::Timeout => "気象庁からの応答がありません。しばらくしてから再試行してください",
        }
    }
}

/// The local forecast database could not be opened or queried.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Cannot open forecast database: {0}")]
    ConnectionFailed(String),

    #[error("Forecast database query failed: {0}")]
    QueryFailed(String),

    #[error("Forecast database is corrupt: {0}")]
    Corruption(String),
}

impl DatabaseError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ConnectionFailed(_) => "天気データベースを開けません",
            Self::QueryFailed(_) => "天気データの保存または読み込みに失敗しました",
            Self::Corruption(_) => "天気データベースが破損しています。ファイルを削除してください",
        }
    }
}

pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

pub trait RusqliteErrorExt {
    fn into_database_error(self) -> DatabaseError;
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_database_error(self) -> DatabaseError {
        let code = match &self {
            rusqlite::Error::SqliteFailure(err, _) => Some(err.code),
            _ => None,
        };
        match code {
            Some(rusqlite::ErrorCode::CannotOpen) => {
                DatabaseError::ConnectionFailed(self.to_string())
            }
            Some(rusqlite::ErrorCode::DatabaseCorrupt | rusqlite::ErrorCode::NotADatabase) => {
                DatabaseError::Corruption(self.to_string())
            }
            _ => DatabaseError::QueryFailed(self.to_string()),
        }
    }
}
