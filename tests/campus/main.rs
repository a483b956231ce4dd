//! End-to-end scenarios against an in-memory store.

mod fixtures;

use std::sync::{Arc, Mutex};

use campus_nav::kv::{FAVORITES_KEY, SETTINGS_KEY};
use campus_nav::{
    CampusApp, ColorScheme, FixedAppearance, FixedPermission, InMemoryKeyValueStore,
    KeyValueStore, LocationCatalog, Permission, SettingsPatch, SettingsRecord, ThemeMode,
};
use fixtures::{app, small_catalog};

#[test]
fn search_then_favorite_balme_library() {
    let (kv, app) = app();

    let results = app.search_index().search("balme");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "1");

    assert!(app.favorites().toggle("1").unwrap());
    assert_eq!(kv.get(FAVORITES_KEY).unwrap().as_deref(), Some(r#"["1"]"#));

    assert!(!app.favorites().toggle("1").unwrap());
    assert_eq!(kv.get(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn legacy_partial_settings_record_gets_defaults() {
    let kv = InMemoryKeyValueStore::new();
    kv.set(SETTINGS_KEY, r#"{"darkMode":true}"#).unwrap();
    let app = CampusApp::new(kv, small_catalog(), FixedAppearance(Some(ColorScheme::Light)));

    assert_eq!(
        app.settings().get().unwrap(),
        SettingsRecord {
            dark_mode: true,
            notifications_enabled: false,
            offline_mode: false,
        }
    );
    assert_eq!(app.theme().mode(), ThemeMode::Dark);
}

#[test]
fn clear_all_returns_to_fresh_install() {
    let (kv, app) = app();
    for id in ["1", "2"] {
        app.favorites().toggle(id).unwrap();
    }
    app.update_settings(SettingsPatch::new().notifications_enabled(true).offline_mode(true))
        .unwrap();
    app.submit_search("library");
    app.toggle_theme().unwrap();

    app.clear_all().unwrap();

    assert_eq!(app.settings().get().unwrap(), SettingsRecord::default());
    for id in ["1", "2"] {
        assert!(!app.favorites().is_favorite(id).unwrap());
    }
    assert!(app.history().recent(5).unwrap().is_empty());
    assert_eq!(app.theme().mode(), ThemeMode::Light);
    assert!(kv.is_empty());
}

#[test]
fn clear_all_failure_keeps_state() {
    let (kv, app) = app();
    app.favorites().toggle("1").unwrap();

    kv.fail_writes(true);
    assert!(app.clear_all().is_err());
    assert!(app.favorites().is_favorite("1").unwrap());
}

#[test]
fn theme_toggle_reaches_subscribers_and_settings() {
    let (_kv, app) = app();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let id = app
        .theme()
        .subscribe(move |theme| sink.lock().unwrap().push(theme.colors.background));

    app.toggle_theme().unwrap();
    assert!(app.settings().get().unwrap().dark_mode);

    assert!(app.theme().unsubscribe(id));
    app.toggle_theme().unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["#1C1C1E"]);
}

#[test]
fn device_appearance_followed_until_user_chooses() {
    let (_kv, app) = app();
    assert!(app.appearance_changed(ColorScheme::Dark).unwrap());
    assert!(app.theme().current().is_dark_mode);

    app.toggle_theme().unwrap();
    assert!(!app.appearance_changed(ColorScheme::Dark).unwrap());
    assert!(!app.theme().current().is_dark_mode);
}

#[test]
fn submitted_searches_land_in_history() {
    let (_kv, app) = app();
    let results = app.submit_search("  Hall ");
    assert_eq!(results.len(), 1);

    assert!(app.submit_search("   ").is_empty());

    let recent = app.history().recent(10).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].query, "Hall");
}

#[test]
fn favorites_screen_skips_removed_locations() {
    let (kv, app) = app();
    kv.set(FAVORITES_KEY, r#"["3","gone","1"]"#).unwrap();

    let names: Vec<&str> = app
        .favorites()
        .favorite_locations(app.catalog())
        .unwrap()
        .iter()
        .map(|l| l.name.as_str())
        .collect();
    assert_eq!(names, vec!["Sports Complex", "Balme Library"]);
}

#[test]
fn featured_follows_category_selection() {
    let kv = InMemoryKeyValueStore::new();
    let app = CampusApp::new(kv, LocationCatalog::campus(), FixedAppearance(None));

    assert_eq!(app.featured(None).len(), 5);
    let academic: Vec<&str> = app
        .featured(Some("academic"))
        .iter()
        .map(|l| l.id.as_str())
        .collect();
    assert_eq!(academic, vec!["balme-library", "great-hall", "computer-science"]);
}

#[test]
fn dark_mode_setting_drives_theme() {
    let (_kv, app) = app();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    app.theme()
        .subscribe(move |theme| sink.lock().unwrap().push(theme.is_dark_mode));

    let record = app.update_settings(SettingsPatch::new().dark_mode(true)).unwrap();
    assert!(record.dark_mode);
    assert_eq!(app.theme().mode(), ThemeMode::Dark);

    app.update_settings(SettingsPatch::new().dark_mode(false)).unwrap();
    assert_eq!(app.theme().mode(), ThemeMode::Light);
    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
}

#[test]
fn first_settings_write_keeps_device_theme() {
    let kv = InMemoryKeyValueStore::new();
    let app = CampusApp::new(kv, small_catalog(), FixedAppearance(Some(ColorScheme::Dark)));

    let record = app.update_settings(SettingsPatch::new().offline_mode(true)).unwrap();

    assert!(record.dark_mode);
    assert_eq!(app.theme().mode(), ThemeMode::Dark);
}

#[test]
fn malformed_settings_follow_device_appearance() {
    let kv = InMemoryKeyValueStore::new();
    kv.set(SETTINGS_KEY, "{corrupt").unwrap();
    let app = CampusApp::new(kv, small_catalog(), FixedAppearance(Some(ColorScheme::Dark)));

    assert_eq!(app.theme().mode(), ThemeMode::Dark);
    assert!(app.appearance_changed(ColorScheme::Light).unwrap());
    assert_eq!(app.theme().mode(), ThemeMode::Light);
}

#[test]
fn search_results_survive_history_write_failure() {
    let (kv, app) = app();
    kv.fail_writes(true);

    let results = app.submit_search("balme");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "1");
    assert!(app.history().recent(5).unwrap().is_empty());
}

#[test]
fn denied_notification_permission_keeps_flag_off() {
    let (kv, app) = app();
    let outcome = app
        .set_notifications(true, &FixedPermission(Permission::Denied))
        .unwrap();

    assert_eq!(outcome, Permission::Denied);
    assert!(!app.settings().get().unwrap().notifications_enabled);
    assert!(kv.get(SETTINGS_KEY).unwrap().is_none());
}

#[test]
fn granted_notification_permission_enables_flag() {
    let (_kv, app) = app();
    let outcome = app
        .set_notifications(true, &FixedPermission(Permission::Granted))
        .unwrap();

    assert_eq!(outcome, Permission::Granted);
    assert!(app.settings().get().unwrap().notifications_enabled);

    app.set_notifications(false, &FixedPermission(Permission::Denied))
        .unwrap();
    assert!(!app.settings().get().unwrap().notifications_enabled);
}
