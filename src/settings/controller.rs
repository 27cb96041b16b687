//! Settings actions: record the analytics event, then hand off to the OS.

use serde_json::json;

use super::{server_subtitle, share_link, support_mail_url, visible_items, SettingsError};
use super::{ServiceError, SettingsItem, SettingsScreen};
use crate::config::Config;
use crate::state::AppState;
use crate::telemetry::{events, EventPayload, ReportingGate};

/// OS and app services the settings screen triggers.
pub trait SettingsServices {
    /// Push a view onto the settings stack.
    fn navigate(&self, view_name: &str);

    /// Put `content` on the clipboard and show the "copied" toast.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the clipboard is unavailable.
    fn copy_to_clipboard(&self, content: &str) -> Result<(), ServiceError>;

    /// Open the share sheet with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the share sheet cannot be shown.
    fn share(&self, message: &str) -> Result<(), ServiceError>;

    /// Open a URL (mail composer, browser).
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if no handler accepts the URL.
    fn open_url(&self, url: &str) -> Result<(), ServiceError>;

    /// Confirm with the user, clear web cookies if needed and log out.
    fn logout(&self);

    /// Confirm with the user, drop the local cache for `server` and reconnect.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the cache cannot be cleared.
    fn clear_cache(&self, server: &str) -> Result<(), ServiceError>;

    /// Show the store's in-app review prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if no store is available.
    fn request_review(&self) -> Result<(), ServiceError>;
}

/// Version and device strings of the running app.
#[derive(Debug, Clone)]
pub struct AppInfo {
    /// Human-readable app version.
    pub version: String,
    /// Device model.
    pub device_model: String,
}

/// Drives the settings screen.
pub struct SettingsController<'a, S> {
    gate: &'a ReportingGate,
    state: &'a AppState,
    config: &'a Config,
    app: &'a AppInfo,
    services: S,
}

impl<'a, S: SettingsServices> SettingsController<'a, S> {
    /// Wire a controller to the gate, the store and the OS services.
    pub fn new(
        gate: &'a ReportingGate,
        state: &'a AppState,
        config: &'a Config,
        app: &'a AppInfo,
        services: S,
    ) -> Self {
        Self {
            gate,
            state,
            config,
            app,
            services,
        }
    }

    /// Rows to render.
    pub fn items(&self) -> Vec<SettingsItem> {
        visible_items(self.config.build.variant, self.state.app.is_master_detail)
    }

    /// Subtitle of the server version row.
    pub fn server_subtitle(&self) -> &str {
        server_subtitle(&self.state.server.url)
    }

    /// Open a sub-screen.
    pub fn navigate(&self, screen: SettingsScreen) {
        self.gate.log_event(&screen.navigation_event(), None);
        self.services.navigate(screen.view_name());
    }

    /// Open the mail composer addressed to support.
    ///
    /// # Errors
    ///
    /// Returns an error if the mail URL is invalid or cannot be opened; the
    /// caller shows the "mail failed" alert.
    pub fn contact_us(&self) -> Result<(), SettingsError> {
        self.gate.log_event(events::SE_CONTACT_US, None);
        let result = support_mail_url(
            &self.config.support,
            &self.app.version,
            &self.app.device_model,
        )
        .and_then(|url| self.services.open_url(&url).map_err(SettingsError::from));

        if let Err(e) = &result {
            tracing::warn!(error = %e, "failed to open support mail");
            self.gate.log_event(events::SE_CONTACT_US_F, None);
        }
        result
    }

    /// Share the store link for this platform and build. Records no event.
    ///
    /// # Errors
    ///
    /// Returns an error if the share sheet fails.
    pub fn share_app(&self) -> Result<(), SettingsError> {
        let link = share_link(
            self.config.build.platform,
            self.config.build.variant,
            &self.config.links,
        );
        self.services.share(link)?;
        Ok(())
    }

    /// Ask for a store review. The row is hidden in the restricted build,
    /// so this does nothing there.
    ///
    /// # Errors
    ///
    /// Returns an error if the review prompt cannot be shown.
    pub fn review_app(&self) -> Result<(), SettingsError> {
        if !self.gate.capabilities().analytics_available {
            tracing::debug!("review prompt unavailable in this build");
            return Ok(());
        }
        self.services.request_review()?;
        Ok(())
    }

    /// Copy the server version.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard fails.
    pub fn copy_server_version(&self) -> Result<(), SettingsError> {
        let version = &self.state.server.version;
        let payload = payload(json!({ "serverVersion": version }));
        self.gate
            .log_event(events::SE_COPY_SERVER_VERSION, Some(&payload));
        self.services.copy_to_clipboard(version)?;
        Ok(())
    }

    /// Copy the app version.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard fails.
    pub fn copy_app_version(&self) -> Result<(), SettingsError> {
        let version = &self.app.version;
        let payload = payload(json!({ "appVersion": version }));
        self.gate.log_event(events::SE_COPY_APP_VERSION, Some(&payload));
        self.services.copy_to_clipboard(version)?;
        Ok(())
    }

    /// Open the license.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser cannot be opened.
    pub fn read_license(&self) -> Result<(), SettingsError> {
        self.gate.log_event(events::SE_READ_LICENSE, None);
        self.services.open_url(&self.config.links.license)?;
        Ok(())
    }

    /// Log out.
    pub fn logout(&self) {
        self.gate.log_event(events::SE_LOG_OUT, None);
        self.services.logout();
    }

    /// Clear the local cache of the current server.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be cleared.
    pub fn clear_cache(&self) -> Result<(), SettingsError> {
        self.gate
            .log_event(events::SE_CLEAR_LOCAL_SERVER_CACHE, None);
        self.services.clear_cache(&self.state.server.url)?;
        Ok(())
    }

    /// Toggle crash reporting. Returns the new value.
    pub fn toggle_crash_reports(&self, value: bool) -> bool {
        let payload = payload(json!({ "value": value }));
        self.gate
            .log_event(events::SE_TOGGLE_CRASH_REPORT, Some(&payload));
        self.gate.set_crash_reporting_enabled(value)
    }

    /// Toggle analytics events. Returns the new value.
    pub fn toggle_analytics_events(&self, value: bool) -> bool {
        let payload = payload(json!({ "value": value }));
        self.gate
            .log_event(events::SE_TOGGLE_ANALYTICS_EVENTS, Some(&payload));
        self.gate.set_analytics_reporting_enabled(value)
    }
}

fn payload(value: serde_json::Value) -> EventPayload {
    match value {
        serde_json::Value::Object(map) => map,
        _ => EventPayload::new(),
    }
}
