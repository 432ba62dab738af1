//! Build entry point: locking, lifecycle state, and the build log.

use std::path::PathBuf;
use std::sync::Arc;

use shipyard_core::{
    ApplicationId, ApplicationState, ConfigStore, FileDb, MirrorTool, Settings, StateStore,
};
use shipyard_deploy::{DirectoryScanner, ExclusionResolver, ExclusionSet, WalkDirScanner};
use shipyard_exec::{ProcessRunner, RealRunner, Toolchain};
use tracing::{error, info};

use crate::context::LOG_FILE;
use crate::steps::{DeployTarget, Pipeline};
use crate::{BuildContext, BuildError, LockRegistry};

/// Runs builds, one at a time per application.
///
/// A build holds its application's lock from the state check until the final
/// state is written, so a queued request for the same application only
/// proceeds once the previous build has fully finished. Builds of different
/// applications never wait on each other.
pub struct BuildOrchestrator<R: ProcessRunner = RealRunner, S: DirectoryScanner = WalkDirScanner> {
    tools: Toolchain<R>,
    resolver: ExclusionResolver<S>,
    mirror: MirrorTool,
    states: Arc<dyn StateStore>,
    configs: Arc<dyn ConfigStore>,
    locks: LockRegistry,
}

impl BuildOrchestrator<RealRunner, WalkDirScanner> {
    /// Real tools and scanner over a [`FileDb`] rooted at `settings.apps_root`.
    pub fn new(settings: &Settings) -> Self {
        let store = Arc::new(FileDb::new(&settings.apps_root));
        Self::with_parts(settings, RealRunner, WalkDirScanner, store)
    }
}

impl<R: ProcessRunner, S: DirectoryScanner> BuildOrchestrator<R, S> {
    pub fn with_parts<T>(settings: &Settings, runner: R, scanner: S, store: Arc<T>) -> Self
    where
        T: StateStore + ConfigStore + 'static,
    {
        Self {
            tools: Toolchain::with_runner(runner, settings),
            resolver: ExclusionResolver::with_scanner(scanner),
            mirror: settings.mirror.tool,
            states: store.clone(),
            configs: store,
            locks: LockRegistry::new(),
        }
    }

    pub fn tools(&self) -> &Toolchain<R> {
        &self.tools
    }

    pub fn locks(&self) -> &LockRegistry {
        &self.locks
    }

    pub fn state(&self, id: &ApplicationId) -> Result<ApplicationState, BuildError> {
        Ok(self.states.get_state(id)?)
    }

    pub fn log_path(&self, id: &ApplicationId) -> PathBuf {
        self.configs.app_dir(id).join(LOG_FILE)
    }

    /// Run the full pipeline for `id`.
    ///
    /// Fails with [`BuildError::StateConflict`] without touching state or log
    /// when the application is already building. Otherwise the state ends as
    /// `idle` on success or `failed` on error, and the error is returned.
    pub async fn build(&self, id: &ApplicationId) -> Result<(), BuildError> {
        let _guard = self.locks.acquire(id).await;

        let state = self.states.get_state(id)?;
        if !state.can_start_build() {
            return Err(BuildError::StateConflict {
                app: id.clone(),
                state,
            });
        }

        let ctx = self.prepare(id)?;
        match self.execute(&ctx).await {
            Ok(()) => {
                info!(app = %id, "build completed");
                Ok(())
            }
            Err(e) => {
                self.record_failure(&ctx, &e);
                Err(e)
            }
        }
    }

    /// Exclusions the next deploy of `id` would use, without building.
    /// Both the deploy source root and destination must already exist.
    pub async fn preview_exclusions(&self, id: &ApplicationId) -> Result<ExclusionSet, BuildError> {
        let _guard = self.locks.acquire(id).await;
        let ctx = self.prepare(id)?;
        let target = DeployTarget::from_context(&ctx)?;
        self.pipeline().exclusions(&target)
    }

    fn prepare(&self, id: &ApplicationId) -> Result<BuildContext, BuildError> {
        let config = self.configs.load_config(id)?;
        let app_dir = self.configs.app_dir(id);
        let app_dir = std::path::absolute(&app_dir).map_err(|e| BuildError::ResolvePath {
            path: app_dir,
            source: e,
        })?;
        Ok(BuildContext::new(id.clone(), app_dir, config))
    }

    /// Everything from the `building` write to the `idle` write. Any error
    /// here, including a failed state write, ends in [`Self::record_failure`].
    async fn execute(&self, ctx: &BuildContext) -> Result<(), BuildError> {
        ctx.log.truncate()?;
        self.states.set_state(&ctx.app, ApplicationState::Building)?;
        info!(app = %ctx.app, "build started");

        self.pipeline().run(ctx).await?;

        ctx.log.line("-> build completed")?;
        self.states.set_state(&ctx.app, ApplicationState::Idle)?;
        Ok(())
    }

    fn pipeline(&self) -> Pipeline<'_, R, S> {
        Pipeline {
            tools: &self.tools,
            resolver: &self.resolver,
            mirror: self.mirror,
        }
    }

    /// Log the failure and mark the application failed. Problems doing so
    /// are reported through tracing; the build error stays the one returned.
    fn record_failure(&self, ctx: &BuildContext, err: &BuildError) {
        error!(app = %ctx.app, error = %err.detail(), "build failed");

        for line in [format!("ERROR: {}", err.detail()), "-> build failed!".to_owned()] {
            if let Err(log_err) = ctx.log.line(&line) {
                error!(app = %ctx.app, error = %log_err, "could not write build log");
                break;
            }
        }

        if let Err(state_err) = self.states.set_state(&ctx.app, ApplicationState::Failed) {
            error!(app = %ctx.app, error = %state_err, "could not record failed state");
        }
    }
}
