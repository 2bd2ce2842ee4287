use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Placeholder substituted with an office code in the forecast URL template
pub const AREA_CODE_PLACEHOLDER: &str = "{area_code}";

/// Placeholder substituted with a weather code in the icon URL template
pub const ICON_CODE_PLACEHOLDER: &str = "{code}";

const DEFAULT_AREA_URL: &str = "https://www.jma.go.jp/bosai/common/const/area.json";
const DEFAULT_FORECAST_URL_TEMPLATE: &str =
    "https://www.jma.go.jp/bosai/forecast/data/forecast/{area_code}.json";
const DEFAULT_ICON_URL_TEMPLATE: &str = "https://www.jma.go.jp/bosai/forecast/img/{code}.svg";
const DEFAULT_DATABASE_FILE: &str = "weather_forecast.db";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// JMA endpoints
    #[serde(default)]
    pub jma: JmaConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Local forecast store
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JmaConfig {
    /// Area directory document (centers and offices)
    pub area_url: String,

    /// Per-office forecast document, `{area_code}` is replaced by the office code
    pub forecast_url_template: String,

    /// Forecast icon image, `{code}` is replaced by the 3-digit weather code
    pub icon_url_template: String,
}

impl Default for JmaConfig {
    fn default() -> Self {
        Self {
            area_url: DEFAULT_AREA_URL.to_string(),
            forecast_url_template: DEFAULT_FORECAST_URL_TEMPLATE.to_string(),
            icon_url_template: DEFAULT_ICON_URL_TEMPLATE.to_string(),
        }
    }
}

impl JmaConfig {
    /// Forecast URL for one office code
    pub fn forecast_url(&self, area_code: &str) -> String {
        self.forecast_url_template
            .replace(AREA_CODE_PLACEHOLDER, area_code)
    }

    /// Icon URL for one weather code
    pub fn icon_url(&self, weather_code: &str) -> String {
        self.icon_url_template
            .replace(ICON_CODE_PLACEHOLDER, weather_code)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds. Unset means the HTTP client's default (none).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file holding the `weather_forecasts` table
    #[serde(default = "default_database_path_str")]
    pub database_path: String,
}

fn default_database_path_str() -> String {
    dirs::data_dir()
        .map(|d| d.join("tenki"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DATABASE_FILE)
        .to_string_lossy()
        .into_owned()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path_str(),
        }
    }
}

impl StorageConfig {
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.database_path)
    }
}

impl Config {
    /// Load configuration from the user config directory, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit file, creating default if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(config_path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match config_path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.jma.area_url, "jma.area_url", &mut result);

        if self.jma.forecast_url_template.contains(AREA_CODE_PLACEHOLDER) {
            self.validate_url(
                &self.jma.forecast_url("130000"),
                "jma.forecast_url_template",
                &mut result,
            );
        } else {
            result.add_error(
                "jma.forecast_url_template",
                format!("Template must contain {}", AREA_CODE_PLACEHOLDER),
            );
        }

        if self.jma.icon_url_template.contains(ICON_CODE_PLACEHOLDER) {
            self.validate_url(
                &self.jma.icon_url("100"),
                "jma.icon_url_template",
                &mut result,
            );
        } else {
            // Cards still render, every icon just points at the same image
            result.add_warning(
                "jma.icon_url_template",
                format!("Template has no {} placeholder", ICON_CODE_PLACEHOLDER),
            );
        }

        match self.http.timeout_secs {
            Some(0) => result.add_error("http.timeout_secs", "Timeout must be greater than 0"),
            Some(secs) if secs > 300 => {
                result.add_warning("http.timeout_secs", "Timeout is unusually long (>300s)")
            }
            _ => {}
        }

        if self.storage.database_path.trim().is_empty() {
            result.add_error("storage.database_path", "Database path must not be empty");
        } else if self.storage.database_path().is_dir() {
            result.add_error(
                "storage.database_path",
                format!(
                    "Path is a directory: {}",
                    self.storage.database_path().display()
                ),
            );
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("tenki");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_forecast_url_substitution() {
        let jma = JmaConfig::default();
        assert_eq!(
            jma.forecast_url("130000"),
            "https://www.jma.go.jp/bosai/forecast/data/forecast/130000.json"
        );
        assert_eq!(
            jma.icon_url("201"),
            "https://www.jma.go.jp/bosai/forecast/img/201.svg"
        );
    }

    #[test]
    fn test_invalid_area_url() {
        let mut config = Config::default();
        config.jma.area_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "jma.area_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.jma.area_url = "ftp://www.jma.go.jp/area.json".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_template_without_placeholder_is_error() {
        let mut config = Config::default();
        config.jma.forecast_url_template = "https://www.jma.go.jp/forecast.json".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "jma.forecast_url_template"));
    }

    #[test]
    fn test_icon_template_without_placeholder_is_warning() {
        let mut config = Config::default();
        config.jma.icon_url_template = "https://example.com/icon.svg".to_string();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "jma.icon_url_template"));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = Config::default();
        config.http.timeout_secs = Some(0);
        assert!(!config.validate().is_valid());

        config.http.timeout_secs = Some(30);
        assert!(config.validate().is_valid());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.jma.area_url, DEFAULT_AREA_URL);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\ndatabase_path = \"/tmp/forecast.db\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.storage.database_path, "/tmp/forecast.db");
        assert_eq!(config.jma.area_url, DEFAULT_AREA_URL);
        assert!(config.http.timeout_secs.is_none());
    }

    #[test]
    fn test_load_validated_rejects_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[http]\ntimeout_secs = 0\n").unwrap();

        let err = Config::load_validated(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("http.timeout_secs"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
