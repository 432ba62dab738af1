use std::path::PathBuf;

use serde::Serialize;
use shipyard_core::{
    ApplicationConfig, ApplicationId, ApplicationState, ConfigStore, Settings, StateStore,
};
use shipyard_pipeline::context::LOG_FILE;

#[derive(Serialize)]
struct StatusReport<'a> {
    app: &'a ApplicationId,
    state: ApplicationState,
    deploy_to: Option<&'a str>,
    log: PathBuf,
}

pub fn status(settings: &Settings, app: &str, json: bool) -> anyhow::Result<()> {
    let (db, id, config) = super::existing_app(settings, app)?;
    let report = StatusReport {
        app: &id,
        state: db.get_state(&id)?,
        deploy_to: config.get(ApplicationConfig::DEPLOY_TO),
        log: db.app_dir(&id).join(LOG_FILE),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}: {}", report.app, report.state);
    if let Some(dest) = report.deploy_to {
        println!("  deploys to: {dest}");
    }
    println!("  log:        {}", report.log.display());
    Ok(())
}
