use anyhow::Context;
use shipyard_core::{ConfigStore, Settings};
use shipyard_pipeline::context::LOG_FILE;

pub fn log(settings: &Settings, app: &str) -> anyhow::Result<()> {
    let (db, id, _config) = super::existing_app(settings, app)?;
    let path = db.app_dir(&id).join(LOG_FILE);

    if !path.exists() {
        eprintln!("No build log for {id} yet.");
        return Ok(());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read build log {}", path.display()))?;
    print!("{content}");
    Ok(())
}
