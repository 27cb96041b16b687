//! Settings screen logic.
//!
//! Rendering and the OS calls behind each item (clipboard, share sheet,
//! mail composer, cookie and cache clearing) are someone else's job and
//! sit behind [`SettingsServices`]. This module decides which items are
//! shown, what each one sends to the OS, and which analytics event it
//! records.

use url::Url;

use crate::config::{LinksConfig, Platform, SupportConfig};
use crate::telemetry::{events, BuildVariant};

pub mod controller;

pub use controller::{AppInfo, SettingsController, SettingsServices};

/// Errors surfaced by settings actions.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// An OS service failed.
    #[error("service call failed: {0}")]
    Service(#[from] ServiceError),
    /// A link could not be built.
    #[error("invalid link {url:?}: {source}")]
    InvalidLink {
        /// The link as it was being parsed.
        url: String,
        /// Underlying parse failure.
        source: url::ParseError,
    },
}

/// Failure reported by a [`SettingsServices`] implementation.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ServiceError(pub String);

/// Sub-screens reachable from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsScreen {
    /// Display preferences.
    DisplayPrefs,
    /// Own profile.
    Profile,
    /// Language picker.
    Language,
    /// Browser used for links.
    DefaultBrowser,
    /// Theme picker.
    Theme,
    /// Security and privacy, including the reporting toggles.
    SecurityPrivacy,
}

impl SettingsScreen {
    /// Route name in the navigation stack.
    pub fn view_name(self) -> &'static str {
        match self {
            Self::DisplayPrefs => "DisplayPrefsView",
            Self::Profile => "ProfileView",
            Self::Language => "LanguageView",
            Self::DefaultBrowser => "DefaultBrowserView",
            Self::Theme => "ThemeView",
            Self::SecurityPrivacy => "SecurityPrivacyView",
        }
    }

    /// Analytics event recorded when navigating here.
    pub fn navigation_event(self) -> String {
        events::navigation_event(self.view_name())
    }
}

/// Rows of the settings list, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsItem {
    /// Embedded sidebar (split view only).
    Sidebar,
    /// Open [`SettingsScreen::DisplayPrefs`] (split view only).
    Display,
    /// Open [`SettingsScreen::Profile`] (split view only).
    Profile,
    /// Compose a support mail.
    ContactUs,
    /// Open [`SettingsScreen::Language`].
    Language,
    /// Open the store review prompt.
    ReviewApp,
    /// Share the store link.
    ShareApp,
    /// Open [`SettingsScreen::DefaultBrowser`].
    DefaultBrowser,
    /// Open [`SettingsScreen::Theme`].
    Theme,
    /// Open [`SettingsScreen::SecurityPrivacy`].
    SecurityPrivacy,
    /// Open the license.
    License,
    /// Copy the app version.
    AppVersion,
    /// Copy the server version.
    ServerVersion,
    /// Clear the local server cache.
    ClearCache,
    /// Log out.
    Logout,
}

impl SettingsItem {
    /// Translation key of the row title.
    pub fn title_key(self) -> &'static str {
        match self {
            Self::Sidebar => "Sidebar",
            Self::Display => "Display",
            Self::Profile => "Profile",
            Self::ContactUs => "Contact_us",
            Self::Language => "Language",
            Self::ReviewApp => "Review_this_app",
            Self::ShareApp => "Share_this_app",
            Self::DefaultBrowser => "Default_browser",
            Self::Theme => "Theme",
            Self::SecurityPrivacy => "Security_and_privacy",
            Self::License => "License",
            Self::AppVersion => "Version_no",
            Self::ServerVersion => "Server_version",
            Self::ClearCache => "Clear_cache",
            Self::Logout => "Logout",
        }
    }

    /// Rendered in the danger colour.
    pub fn is_destructive(self) -> bool {
        matches!(self, Self::ClearCache | Self::Logout)
    }

    /// Sub-screen this row navigates to, if any.
    pub fn screen(self) -> Option<SettingsScreen> {
        match self {
            Self::Display => Some(SettingsScreen::DisplayPrefs),
            Self::Profile => Some(SettingsScreen::Profile),
            Self::Language => Some(SettingsScreen::Language),
            Self::DefaultBrowser => Some(SettingsScreen::DefaultBrowser),
            Self::Theme => Some(SettingsScreen::Theme),
            Self::SecurityPrivacy => Some(SettingsScreen::SecurityPrivacy),
            _ => None,
        }
    }
}

/// Rows shown for this build and layout.
///
/// Split view adds the sidebar, display and profile rows on top. The
/// review row needs a store and is hidden in the restricted build.
pub fn visible_items(variant: BuildVariant, is_master_detail: bool) -> Vec<SettingsItem> {
    let mut items = Vec::new();
    if is_master_detail {
        items.extend([
            SettingsItem::Sidebar,
            SettingsItem::Display,
            SettingsItem::Profile,
        ]);
    }
    items.extend([SettingsItem::ContactUs, SettingsItem::Language]);
    if variant.capabilities().analytics_available {
        items.push(SettingsItem::ReviewApp);
    }
    items.extend([
        SettingsItem::ShareApp,
        SettingsItem::DefaultBrowser,
        SettingsItem::Theme,
        SettingsItem::SecurityPrivacy,
        SettingsItem::License,
        SettingsItem::AppVersion,
        SettingsItem::ServerVersion,
        SettingsItem::ClearCache,
        SettingsItem::Logout,
    ]);
    items
}

/// Store link shared by "Share this app".
pub fn share_link(platform: Platform, variant: BuildVariant, links: &LinksConfig) -> &str {
    match (platform, variant) {
        (Platform::Android, BuildVariant::Restricted) => &links.fdroid,
        (Platform::Android, BuildVariant::Standard) => &links.play_store,
        (Platform::Ios, _) => &links.app_store,
    }
}

/// `mailto:` URL for the support mail, with version and device in the body.
///
/// # Errors
///
/// Returns [`SettingsError::InvalidLink`] if the address does not form a
/// valid URL.
pub fn support_mail_url(
    support: &SupportConfig,
    app_version: &str,
    device_model: &str,
) -> Result<String, SettingsError> {
    let body = format!("version: {app_version}\ndevice: {device_model}");
    let raw = format!(
        "mailto:{}?subject={}&body={}",
        support.email,
        encode_component(&support.subject),
        encode_component(&body),
    );
    let url = Url::parse(&raw).map_err(|source| SettingsError::InvalidLink {
        url: raw.clone(),
        source,
    })?;
    Ok(url.into())
}

/// Server URL without its scheme, shown under the server version row.
pub fn server_subtitle(server_url: &str) -> &str {
    server_url
        .split_once("//")
        .map_or(server_url, |(_, rest)| rest)
}

// Mail clients read `+` literally, so spaces must be `%20`. A literal `+`
// is already escaped to `%2B` by the form encoder.
fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
