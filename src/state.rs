//! Application state slices read by the preview and settings code.
//!
//! The full client store has many more slices; only the ones this crate
//! consumes are typed here.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::preview::PreviewContext;

/// Root of the application state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    /// Authenticated session.
    #[serde(default)]
    pub login: LoginState,
    /// Server the client is connected to.
    #[serde(default)]
    pub server: ServerState,
    /// Display preferences synced from the server.
    #[serde(default)]
    pub settings: DisplaySettings,
    /// Layout flags.
    #[serde(default)]
    pub app: AppFlags,
}

/// Login slice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginState {
    /// Logged-in user, if any.
    pub user: Option<Credentials>,
}

/// User id and session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Server-side user id.
    #[serde(rename = "id")]
    pub user_id: String,
    /// Session token.
    pub token: String,
}

/// Server slice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerState {
    /// Base URL, e.g. `https://chat.example.com`.
    #[serde(rename = "server")]
    pub url: String,
    /// Server version string as reported on connect.
    pub version: String,
}

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// strftime-style format for message times.
    pub message_time_format: String,
    /// Show real names instead of usernames.
    pub use_real_name: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            message_time_format: crate::preview::DEFAULT_TIME_FORMAT.to_owned(),
            use_real_name: false,
        }
    }
}

/// Layout flags.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AppFlags {
    /// Tablet split view: settings embeds the sidebar.
    pub is_master_detail: bool,
}

impl AppState {
    /// Seed state from the config file. Login starts empty.
    pub fn from_config(config: &Config) -> Self {
        Self {
            login: LoginState::default(),
            server: ServerState {
                url: config.server.url.clone(),
                version: config.server.version.clone(),
            },
            settings: DisplaySettings {
                message_time_format: config.display.message_time_format.clone(),
                use_real_name: config.display.use_real_name,
            },
            app: AppFlags {
                is_master_detail: config.display.master_detail,
            },
        }
    }

    /// Logged-in user's credentials.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.login.user.as_ref()
    }

    /// Everything the reply preview needs from the store.
    pub fn preview_context(&self) -> PreviewContext<'_> {
        PreviewContext {
            base_url: &self.server.url,
            credentials: self.credentials(),
            time_format: &self.settings.message_time_format,
            use_real_name: self.settings.use_real_name,
            utc_offset: None,
        }
    }
}
