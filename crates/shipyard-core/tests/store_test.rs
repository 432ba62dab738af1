use shipyard_core::{
    ApplicationConfig, ApplicationId, ApplicationState, ConfigStore, Error, FileDb, StateStore,
};
use tempfile::TempDir;

fn app(id: &str) -> ApplicationId {
    ApplicationId::new(id).unwrap()
}

// ── State ──

#[test]
fn missing_state_reads_as_idle() {
    let tmp = TempDir::new().unwrap();
    let db = FileDb::new(tmp.path());

    assert_eq!(db.get_state(&app("web")).unwrap(), ApplicationState::Idle);
}

#[test]
fn state_is_persisted_per_application() {
    let tmp = TempDir::new().unwrap();
    let db = FileDb::new(tmp.path());

    db.set_state(&app("web"), ApplicationState::Building).unwrap();
    db.set_state(&app("api"), ApplicationState::Failed).unwrap();

    assert_eq!(db.get_state(&app("web")).unwrap(), ApplicationState::Building);
    assert_eq!(db.get_state(&app("api")).unwrap(), ApplicationState::Failed);
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("web").join("state")).unwrap(),
        "building"
    );
}

#[test]
fn last_state_write_wins() {
    let tmp = TempDir::new().unwrap();
    let db = FileDb::new(tmp.path());

    db.set_state(&app("web"), ApplicationState::Building).unwrap();
    db.set_state(&app("web"), ApplicationState::Idle).unwrap();

    assert_eq!(db.get_state(&app("web")).unwrap(), ApplicationState::Idle);
}

#[test]
fn garbage_state_is_an_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("web")).unwrap();
    std::fs::write(tmp.path().join("web").join("state"), "exploded").unwrap();
    let db = FileDb::new(tmp.path());

    let err = db.get_state(&app("web")).unwrap_err();
    assert!(matches!(err, Error::UnknownState { ref value, .. } if value == "exploded"));
}

// ── Config ──

#[test]
fn app_dir_is_under_root() {
    let tmp = TempDir::new().unwrap();
    let db = FileDb::new(tmp.path());

    assert_eq!(db.root(), tmp.path());
    assert_eq!(db.app_dir(&app("web")), tmp.path().join("web"));
}

#[test]
fn load_config_reads_flat_string_table() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("web")).unwrap();
    let toml = r#"
git = "https://example.com/web.git"
deploy_base = "Web"
deploy_to = "/srv/web"
deploy_ignore = "*.log obj\\ web.config"
"#;
    std::fs::write(tmp.path().join("web").join("config.toml"), toml).unwrap();
    let db = FileDb::new(tmp.path());

    let config = db.load_config(&app("web")).unwrap();

    assert_eq!(
        config.get(ApplicationConfig::GIT),
        Some("https://example.com/web.git")
    );
    assert_eq!(config.get(ApplicationConfig::DEPLOY_BASE), Some("Web"));
    assert_eq!(config.get(ApplicationConfig::DEPLOY_TO), Some("/srv/web"));
    assert_eq!(
        config.get(ApplicationConfig::DEPLOY_IGNORE),
        Some("*.log obj\\ web.config")
    );
}

#[test]
fn load_config_for_unknown_app_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let db = FileDb::new(tmp.path());

    let err = db.load_config(&app("ghost")).unwrap_err();
    assert!(matches!(err, Error::AppNotFound { ref id, .. } if id == "ghost"));
}

#[test]
fn load_config_rejects_non_string_values() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("web")).unwrap();
    std::fs::write(tmp.path().join("web").join("config.toml"), "git = 42\n").unwrap();
    let db = FileDb::new(tmp.path());

    let err = db.load_config(&app("web")).unwrap_err();
    assert!(matches!(err, Error::AppConfigParse { .. }));
}
