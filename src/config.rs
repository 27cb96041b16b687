//! Configuration loading.
//!
//! Everything lives in one `config.toml` (default `~/.chatview/config.toml`).
//! Every section is optional and falls back to built-in defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::telemetry::{BuildVariant, ReportingFlags};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Build flavour.
    #[serde(default)]
    pub build: BuildConfig,

    /// Initial reporting preferences.
    #[serde(default)]
    pub reporting: ReportingConfig,

    /// Display preferences.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Chat server.
    #[serde(default)]
    pub server: ServerConfig,

    /// Store and license links used by the settings screen.
    #[serde(default)]
    pub links: LinksConfig,

    /// Support contact.
    #[serde(default)]
    pub support: SupportConfig,
}

/// Build flavour selection.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BuildConfig {
    /// `"standard"` or `"restricted"`.
    #[serde(default)]
    pub variant: BuildVariant,

    /// Target platform for share links.
    #[serde(default)]
    pub platform: Platform,
}

/// Mobile platform the client runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android.
    #[default]
    Android,
    /// iOS.
    Ios,
}

/// Initial values for the reporting flags.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReportingConfig {
    /// Collect crash reports.
    #[serde(default = "default_true")]
    pub crash_reports: bool,

    /// Collect analytics events.
    #[serde(default = "default_true")]
    pub analytics_events: bool,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            crash_reports: true,
            analytics_events: true,
        }
    }
}

impl ReportingConfig {
    /// Flags seeded from this section.
    pub fn flags(&self) -> ReportingFlags {
        ReportingFlags::new(self.crash_reports, self.analytics_events)
    }
}

/// Display preferences.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// strftime-style format for message times.
    #[serde(default = "default_time_format")]
    pub message_time_format: String,

    /// Show real names instead of usernames.
    #[serde(default)]
    pub use_real_name: bool,

    /// Tablet split view.
    #[serde(default)]
    pub master_detail: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            message_time_format: default_time_format(),
            use_real_name: false,
            master_detail: false,
        }
    }
}

/// Chat server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Base URL.
    #[serde(default = "default_server_url")]
    pub url: String,

    /// Server version shown in settings.
    #[serde(default)]
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            version: String::new(),
        }
    }
}

/// External links.
#[derive(Debug, Clone, Deserialize)]
pub struct LinksConfig {
    /// Google Play listing.
    #[serde(default = "default_play_store")]
    pub play_store: String,

    /// F-Droid listing, shared from restricted Android builds.
    #[serde(default = "default_fdroid")]
    pub fdroid: String,

    /// App Store listing.
    #[serde(default = "default_app_store")]
    pub app_store: String,

    /// License text.
    #[serde(default = "default_license")]
    pub license: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            play_store: default_play_store(),
            fdroid: default_fdroid(),
            app_store: default_app_store(),
            license: default_license(),
        }
    }
}

/// Support contact.
#[derive(Debug, Clone, Deserialize)]
pub struct SupportConfig {
    /// Address the "contact us" mail goes to.
    #[serde(default = "default_support_email")]
    pub email: String,

    /// Subject line of the support mail.
    #[serde(default = "default_support_subject")]
    pub subject: String,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            email: default_support_email(),
            subject: default_support_subject(),
        }
    }
}

// Default value functions for serde

fn default_true() -> bool {
    true
}
fn default_time_format() -> String {
    crate::preview::DEFAULT_TIME_FORMAT.to_owned()
}
fn default_server_url() -> String {
    "https://open.rocket.chat".to_owned()
}
fn default_play_store() -> String {
    "https://play.google.com/store/apps/details?id=chat.rocket.reactnative".to_owned()
}
fn default_fdroid() -> String {
    "https://f-droid.org/en/packages/chat.rocket.android".to_owned()
}
fn default_app_store() -> String {
    "https://itunes.apple.com/app/rocket-chat/id1148741252".to_owned()
}
fn default_license() -> String {
    "https://github.com/RocketChat/Rocket.Chat.ReactNative/blob/develop/LICENSE".to_owned()
}
fn default_support_email() -> String {
    "support@rocket.chat".to_owned()
}
fn default_support_subject() -> String {
    "React Native App Support".to_owned()
}

/// Load the config from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config at {}: {e}", path.display()))
}

/// Load the config, using defaults when the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_or_default(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no config file found, using defaults");
        return Ok(Config::default());
    }
    tracing::info!(path = %path.display(), "loading config from file");
    load_config(path)
}

/// Parse a TOML string into config.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or has wrongly typed values.
pub fn parse_config(toml_str: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(toml_str)?)
}

/// Resolve the default config directory (`~/.chatview/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".chatview"))
}

/// Default config file path (`~/.chatview/config.toml`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
