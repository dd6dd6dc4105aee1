//! Runtime settings for the interactive tool.

use std::path::PathBuf;

use clap::Parser;

/// Dataset file used when no path is given.
pub const DEFAULT_DATASET_FILE: &str = "paises_base.csv";

/// Default tracing filter. The shell already prints load diagnostics, so
/// warnings are left to opt-in.
pub const DEFAULT_LOG_LEVEL: &str = "error";

/// Manage a CSV dataset of countries from an interactive menu.
///
/// The dataset is loaded at startup and can be saved back on exit.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "countries", version)]
pub struct Settings {
    /// Dataset loaded at startup and used as the default save target
    #[arg(short, long, env = "COUNTRIES_FILE", default_value = DEFAULT_DATASET_FILE)]
    pub file: PathBuf,

    /// Tracing filter directive (e.g. "info", "countries_rs=debug")
    #[arg(long, env = "COUNTRIES_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_DATASET_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = file.into();
        self
    }
}
