use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{APP_NAME, CONFIG_FILE_NAME, DEFAULT_FOLD_WIDTH};


#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Defaults applied when a caller does not name a version or compatibility
/// mode explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Protocol version string ("2.1", "3.0" or "4.0").
    pub version: String,
    /// Compatibility mode name (e.g. "rfc", "outlook").
    pub compatibility: String,
    /// Maximum content-line length in octets before folding.
    pub fold_width: usize,
}

impl OutputConfig {
    /// ## Summary
    /// Returns the fold width, or `None` when folding is disabled (width 0).
    #[must_use]
    pub fn fold_width(&self) -> Option<usize> {
        (self.fold_width > 0).then_some(self.fold_width)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            version: "4.0".to_string(),
            compatibility: "rfc".to_string(),
            fold_width: DEFAULT_FOLD_WIDTH,
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, environment variables and an optional
    /// `cardwire.toml`, in increasing order of precedence for the environment.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let defaults = OutputConfig::default();

        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("output.version", defaults.version)?
            .set_default("output.compatibility", defaults.compatibility)?
            .set_default("output.fold_width", i64::try_from(defaults.fold_width)?)?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            // Env file and process environment
            .add_source(
                config::Environment::with_prefix(APP_NAME)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    Settings::load()
}
