use crate::runner::{ProcessRunner, RealRunner};
use crate::{CommandOutput, Invocation, RunnerError};
use shipyard_core::{CompileSettings, GitSettings, RestoreSettings, Settings};
use std::path::Path;

const MANIFEST_PLACEHOLDER: &str = "{manifest}";

/// Build tool operations, parameterized over the runner for testability.
///
/// Every checked operation requires exit code 0.
pub struct Toolchain<R: ProcessRunner = RealRunner> {
    runner: R,
    git: GitSettings,
    restore: RestoreSettings,
    compile: CompileSettings,
}

impl<R: ProcessRunner> Toolchain<R> {
    pub fn with_runner(runner: R, settings: &Settings) -> Self {
        Self {
            runner,
            git: settings.git.clone(),
            restore: settings.restore.clone(),
            compile: settings.compile.clone(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    // ── Source ──

    /// Fresh checkout of `url` into `<parent>/<dir_name>`.
    pub async fn git_clone(
        &self,
        url: &str,
        parent: &Path,
        dir_name: &str,
        log: &Path,
    ) -> Result<CommandOutput, RunnerError> {
        let invocation = Invocation::new(&self.git.program, parent)
            .args(["clone", url, dir_name])
            .log_to(log);
        self.run_checked(&invocation).await
    }

    /// Incremental update of an existing checkout.
    pub async fn git_pull(
        &self,
        url: &str,
        source_dir: &Path,
        log: &Path,
    ) -> Result<CommandOutput, RunnerError> {
        let invocation = Invocation::new(&self.git.program, source_dir)
            .args(["pull", url])
            .log_to(log);
        self.run_checked(&invocation).await
    }

    // ── Dependencies ──

    /// File name of the dependency manifest searched for under the source tree.
    pub fn manifest_name(&self) -> &str {
        &self.restore.manifest
    }

    /// Restore the packages listed in one manifest.
    pub async fn restore(
        &self,
        manifest: &Path,
        source_dir: &Path,
        log: &Path,
    ) -> Result<CommandOutput, RunnerError> {
        let manifest = manifest.display().to_string();
        let args = self
            .restore
            .args
            .iter()
            .map(|a| a.replace(MANIFEST_PLACEHOLDER, &manifest));
        let invocation = Invocation::new(&self.restore.program, source_dir)
            .args(args)
            .log_to(log);
        self.run_checked(&invocation).await
    }

    // ── Compile ──

    pub fn compile_tool(&self) -> &str {
        &self.compile.tool
    }

    pub async fn compile(
        &self,
        source_dir: &Path,
        log: &Path,
    ) -> Result<CommandOutput, RunnerError> {
        let invocation = Invocation::new(&self.compile.tool, source_dir)
            .args(&self.compile.args)
            .log_to(log);
        self.run_checked(&invocation).await
    }

    // ── Generic ──

    /// Run without checking the exit status.
    pub async fn run_unchecked(
        &self,
        invocation: &Invocation,
    ) -> Result<CommandOutput, RunnerError> {
        self.runner.run(invocation).await
    }

    async fn run_checked(&self, invocation: &Invocation) -> Result<CommandOutput, RunnerError> {
        self.runner.run(invocation).await?.ensure_code(0)
    }
}
