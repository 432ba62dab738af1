use shipyard_core::{ApplicationId, Settings};
use shipyard_pipeline::BuildOrchestrator;

pub async fn excludes(settings: &Settings, app: &str) -> anyhow::Result<()> {
    let id = ApplicationId::new(app)?;
    let orchestrator = BuildOrchestrator::new(settings);
    let set = orchestrator.preview_exclusions(&id).await?;

    if set.is_empty() {
        println!("No exclusions configured for {id}.");
        return Ok(());
    }

    println!("Files:");
    for name in &set.files {
        println!("  {name}");
    }
    println!("Directories:");
    for dir in &set.directories {
        println!("  {dir}");
    }
    Ok(())
}
