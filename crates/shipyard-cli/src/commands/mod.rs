mod build;
mod excludes;
mod log;
mod status;

pub use build::build;
pub use excludes::excludes;
pub use log::log;
pub use status::status;

use shipyard_core::{ApplicationConfig, ApplicationId, ConfigStore, FileDb, Settings};

/// Validate `app` and make sure it has a config under the apps root.
pub(crate) fn existing_app(
    settings: &Settings,
    app: &str,
) -> anyhow::Result<(FileDb, ApplicationId, ApplicationConfig)> {
    let db = FileDb::new(&settings.apps_root);
    let id = ApplicationId::new(app)?;
    let config = db.load_config(&id)?;
    Ok((db, id, config))
}
