//! Analytics event names.

/// User confirmed logout from settings.
pub const SE_LOG_OUT: &str = "se_log_out";
/// User cleared the local server cache.
pub const SE_CLEAR_LOCAL_SERVER_CACHE: &str = "se_clear_local_server_cache";
/// User opened the support mail composer.
pub const SE_CONTACT_US: &str = "se_contact_us";
/// The support mail composer could not be opened.
pub const SE_CONTACT_US_F: &str = "se_contact_us_f";
/// User copied the server version.
pub const SE_COPY_SERVER_VERSION: &str = "se_copy_server_version";
/// User copied the app version.
pub const SE_COPY_APP_VERSION: &str = "se_copy_app_version";
/// User opened the license.
pub const SE_READ_LICENSE: &str = "se_read_license";
/// User toggled crash reporting.
pub const SE_TOGGLE_CRASH_REPORT: &str = "se_toggle_crash_report";
/// User toggled analytics events.
pub const SE_TOGGLE_ANALYTICS_EVENTS: &str = "se_toggle_analytics_events";

/// Prefix of the per-screen navigation events (`se_go_language`, ...).
pub const SE_GO_PREFIX: &str = "se_go_";

/// Navigation event for a settings sub-screen, from its view name.
///
/// `"DisplayPrefsView"` becomes `"se_go_displayprefs"`.
pub fn navigation_event(view_name: &str) -> String {
    let screen = view_name.replacen("View", "", 1).to_lowercase();
    format!("{SE_GO_PREFIX}{screen}")
}
