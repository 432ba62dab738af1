use anyhow::Context;
use shipyard_core::{ApplicationId, Settings};
use shipyard_pipeline::BuildOrchestrator;

/// Run one build of `app` and report where its log went.
pub async fn build(settings: &Settings, app: &str) -> anyhow::Result<()> {
    let id = ApplicationId::new(app)?;
    let orchestrator = BuildOrchestrator::new(settings);
    let log_path = orchestrator.log_path(&id);

    println!("Building {id}...");
    orchestrator
        .build(&id)
        .await
        .with_context(|| format!("build of '{id}' failed (log: {})", log_path.display()))?;

    println!("Build of {id} completed.");
    println!("Log: {}", log_path.display());
    Ok(())
}
