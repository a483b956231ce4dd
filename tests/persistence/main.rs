//! Durability across restarts with file-backed storage.

use campus_nav::{
    CampusApp, CampusConfig, ColorScheme, FixedAppearance, SettingsPatch, ThemeMode,
};

fn config_for(dir: &std::path::Path) -> CampusConfig {
    CampusConfig::from_toml(&format!(
        "[storage]\ndir = {:?}\n\n[history]\ncap = 3\n",
        dir.display().to_string()
    ))
    .unwrap()
}

#[test]
fn state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    {
        let app = CampusApp::from_config(&config, FixedAppearance(None)).unwrap();
        app.favorites().toggle("great-hall").unwrap();
        app.update_settings(SettingsPatch::new().offline_mode(true))
            .unwrap();
        app.toggle_theme().unwrap();
        for q in ["a", "b", "c", "d"] {
            app.submit_search(q);
        }
    }

    let app = CampusApp::from_config(&config, FixedAppearance(Some(ColorScheme::Light))).unwrap();
    assert!(app.favorites().is_favorite("great-hall").unwrap());
    let settings = app.settings().get().unwrap();
    assert!(settings.offline_mode);
    assert!(settings.dark_mode);
    assert_eq!(app.theme().mode(), ThemeMode::Dark);

    let queries: Vec<String> = app
        .history()
        .recent(10)
        .unwrap()
        .into_iter()
        .map(|e| e.query)
        .collect();
    assert_eq!(queries, vec!["d", "c", "b"]);
}

#[test]
fn corrupt_files_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("favorites.json"), "not json").unwrap();
    std::fs::write(dir.path().join("settings.json"), "[]").unwrap();

    let app = CampusApp::from_config(&config_for(dir.path()), FixedAppearance(None)).unwrap();
    assert!(app.favorites().ids().unwrap().is_empty());
    assert!(!app.settings().get().unwrap().dark_mode);

    app.favorites().toggle("balme-library").unwrap();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("favorites.json")).unwrap(),
        r#"["balme-library"]"#
    );
}

#[test]
fn custom_catalog_file_replaces_bundled_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("locations.json");
    std::fs::write(
        &catalog_path,
        r#"[{"id":"1","name":"Balme Library","type":"academic","category":"academic",
            "description":"Main University Library","coordinates":[-0.1962,5.6502]}]"#,
    )
    .unwrap();

    let config = CampusConfig::from_toml(&format!(
        "[catalog]\npath = {:?}\n",
        catalog_path.display().to_string()
    ))
    .unwrap();
    let app = CampusApp::from_config(&config, FixedAppearance(None)).unwrap();

    assert_eq!(app.catalog().len(), 1);
    assert_eq!(app.search_index().search("BALME")[0].id, "1");
}

#[test]
fn clear_all_removes_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let app = CampusApp::from_config(&config, FixedAppearance(None)).unwrap();
    app.favorites().toggle("legon-hall").unwrap();
    app.submit_search("hall");

    app.clear_all().unwrap();

    assert!(!dir.path().join("favorites.json").exists());
    assert!(!dir.path().join("searchHistory.json").exists());
    let reopened = CampusApp::from_config(&config, FixedAppearance(None)).unwrap();
    assert!(!reopened.favorites().is_favorite("legon-hall").unwrap());
}
