//! Settings rows, links and event names.

use chatview::config::{LinksConfig, Platform, SupportConfig};
use chatview::settings::{
    server_subtitle, share_link, support_mail_url, visible_items, SettingsItem, SettingsScreen,
};
use chatview::telemetry::BuildVariant;

#[test]
fn phone_layout_starts_with_contact_and_ends_with_logout() {
    let items = visible_items(BuildVariant::Standard, false);
    assert_eq!(items.first(), Some(&SettingsItem::ContactUs));
    assert_eq!(items.last(), Some(&SettingsItem::Logout));
    assert!(items.contains(&SettingsItem::ReviewApp));
    assert!(!items.contains(&SettingsItem::Profile));
}

#[test]
fn split_view_adds_sidebar_display_and_profile() {
    let items = visible_items(BuildVariant::Standard, true);
    assert_eq!(
        &items[..3],
        &[
            SettingsItem::Sidebar,
            SettingsItem::Display,
            SettingsItem::Profile
        ]
    );
}

#[test]
fn restricted_build_hides_review() {
    let items = visible_items(BuildVariant::Restricted, false);
    assert!(!items.contains(&SettingsItem::ReviewApp));
    assert!(items.contains(&SettingsItem::ShareApp));
}

#[test]
fn only_cache_and_logout_are_destructive() {
    let destructive: Vec<SettingsItem> = visible_items(BuildVariant::Standard, true)
        .into_iter()
        .filter(|item| item.is_destructive())
        .collect();
    assert_eq!(destructive, vec![SettingsItem::ClearCache, SettingsItem::Logout]);
}

#[test]
fn navigation_events_follow_view_names() {
    assert_eq!(
        SettingsScreen::DisplayPrefs.navigation_event(),
        "se_go_displayprefs"
    );
    assert_eq!(
        SettingsScreen::DefaultBrowser.navigation_event(),
        "se_go_defaultbrowser"
    );
    assert_eq!(
        SettingsItem::Theme.screen().map(SettingsScreen::view_name),
        Some("ThemeView")
    );
    assert_eq!(SettingsItem::Logout.screen(), None);
}

#[test]
fn share_link_depends_on_platform_and_build() {
    let links = LinksConfig::default();
    assert_eq!(
        share_link(Platform::Android, BuildVariant::Standard, &links),
        links.play_store
    );
    assert_eq!(
        share_link(Platform::Android, BuildVariant::Restricted, &links),
        links.fdroid
    );
    assert_eq!(
        share_link(Platform::Ios, BuildVariant::Restricted, &links),
        links.app_store
    );
}

#[test]
fn support_mail_encodes_subject_and_body() {
    let support = SupportConfig {
        email: "help@example.com".to_owned(),
        subject: "App Support".to_owned(),
    };
    let url = support_mail_url(&support, "4.2.0", "Pixel 8").expect("valid mail url");
    assert_eq!(
        url,
        "mailto:help@example.com?subject=App%20Support&body=version%3A%204.2.0%0Adevice%3A%20Pixel%208"
    );
}

#[test]
fn server_subtitle_strips_scheme() {
    assert_eq!(server_subtitle("https://chat.example.com"), "chat.example.com");
    assert_eq!(server_subtitle("chat.example.com"), "chat.example.com");
}
