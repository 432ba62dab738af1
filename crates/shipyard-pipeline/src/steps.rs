//! The fixed build pipeline: source sync → dependency refresh → compile → deploy.

use std::fmt;
use std::path::{Path, PathBuf};

use shipyard_core::{ApplicationConfig, MirrorTool};
use shipyard_deploy::{DirectoryScanner, ExclusionResolver, ExclusionSet, mirror_invocation};
use shipyard_exec::{ProcessRunner, RunnerError, Toolchain};
use walkdir::WalkDir;

use crate::{BuildContext, BuildError, context::SOURCE_DIR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    SourceSync,
    DependencyRefresh,
    Compile,
    Deploy,
}

impl Step {
    /// Execution order.
    pub const ALL: [Step; 4] = [
        Step::SourceSync,
        Step::DependencyRefresh,
        Step::Compile,
        Step::Deploy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::SourceSync => "source sync",
            Self::DependencyRefresh => "dependency refresh",
            Self::Compile => "compile",
            Self::Deploy => "deploy",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Deploy source root and destination derived from an application's config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployTarget {
    pub source_root: PathBuf,
    pub dest: PathBuf,
    pub ignore: String,
}

impl DeployTarget {
    pub fn from_context(ctx: &BuildContext) -> Result<Self, BuildError> {
        let config = &ctx.config;
        let dest = config
            .get(ApplicationConfig::DEPLOY_TO)
            .ok_or(BuildError::MissingSetting {
                key: ApplicationConfig::DEPLOY_TO,
                what: "deploy destination",
            })?;
        let dest = absolute(Path::new(dest))?;

        // Same normalization the scanner applies to its roots.
        let source_root = absolute(&match config.get(ApplicationConfig::DEPLOY_BASE) {
            Some(base) => ctx.source_dir.join(base),
            None => ctx.source_dir.clone(),
        })?;

        Ok(Self {
            source_root,
            dest,
            ignore: config
                .get(ApplicationConfig::DEPLOY_IGNORE)
                .unwrap_or_default()
                .to_owned(),
        })
    }
}

/// Runs the steps against one [`BuildContext`], stopping at the first failure.
pub struct Pipeline<'a, R: ProcessRunner, S: DirectoryScanner> {
    pub tools: &'a Toolchain<R>,
    pub resolver: &'a ExclusionResolver<S>,
    pub mirror: MirrorTool,
}

impl<R: ProcessRunner, S: DirectoryScanner> Pipeline<'_, R, S> {
    pub async fn run(&self, ctx: &BuildContext) -> Result<(), BuildError> {
        for step in Step::ALL {
            tracing::info!(app = %ctx.app, %step, "step started");
            self.run_step(step, ctx).await?;
        }
        Ok(())
    }

    pub async fn run_step(&self, step: Step, ctx: &BuildContext) -> Result<(), BuildError> {
        match step {
            Step::SourceSync => self.source_sync(ctx).await,
            Step::DependencyRefresh => self.dependency_refresh(ctx).await,
            Step::Compile => self.compile(ctx).await,
            Step::Deploy => self.deploy(ctx).await,
        }
    }

    async fn source_sync(&self, ctx: &BuildContext) -> Result<(), BuildError> {
        let url = ctx
            .config
            .get(ApplicationConfig::GIT)
            .ok_or(BuildError::MissingSetting {
                key: ApplicationConfig::GIT,
                what: "source location",
            })?;

        if !ctx.source_dir.exists() {
            create_dir(&ctx.source_dir)?;
            ctx.log.line("-> doing git clone")?;
            self.tools
                .git_clone(url, &ctx.app_dir, SOURCE_DIR, ctx.log.path())
                .await
                .map_err(failed(Step::SourceSync))?;
        } else {
            ctx.log.line("-> doing git pull")?;
            self.tools
                .git_pull(url, &ctx.source_dir, ctx.log.path())
                .await
                .map_err(failed(Step::SourceSync))?;
        }
        Ok(())
    }

    async fn dependency_refresh(&self, ctx: &BuildContext) -> Result<(), BuildError> {
        ctx.log.line("-> doing dependency refresh")?;

        for manifest in find_manifests(&ctx.source_dir, self.tools.manifest_name())? {
            ctx.log.line(&format!("found {}", manifest.display()))?;
            self.tools
                .restore(&manifest, &ctx.source_dir, ctx.log.path())
                .await
                .map_err(failed(Step::DependencyRefresh))?;
        }
        Ok(())
    }

    async fn compile(&self, ctx: &BuildContext) -> Result<(), BuildError> {
        ctx.log
            .line(&format!("-> building with {}", self.tools.compile_tool()))?;
        self.tools
            .compile(&ctx.source_dir, ctx.log.path())
            .await
            .map_err(failed(Step::Compile))?;
        Ok(())
    }

    async fn deploy(&self, ctx: &BuildContext) -> Result<(), BuildError> {
        let target = DeployTarget::from_context(ctx)?;
        ctx.log
            .line(&format!("-> deploying to {}", target.dest.display()))?;

        if !target.dest.exists() {
            create_dir(&target.dest)?;
        }

        let exclusions = self.exclusions(&target)?;
        let invocation =
            mirror_invocation(self.mirror, &target.source_root, &target.dest, &exclusions)
                .log_to(ctx.log.path());

        // The copy tool's exit status is not a gate: a deploy that copied
        // with errors still completes the build.
        let output = self
            .tools
            .run_unchecked(&invocation)
            .await
            .map_err(failed(Step::Deploy))?;
        if !output.success() {
            tracing::warn!(
                app = %ctx.app,
                code = ?output.code,
                "copy tool reported a non-zero exit status"
            );
        }
        Ok(())
    }

    /// Exclusions for `target`, scanning both trees as they are right now.
    pub fn exclusions(&self, target: &DeployTarget) -> Result<ExclusionSet, BuildError> {
        Ok(self
            .resolver
            .resolve(&target.source_root, &target.dest, &target.ignore)?)
    }
}

fn failed(step: Step) -> impl Fn(RunnerError) -> BuildError {
    move |source| BuildError::Tool { step, source }
}

fn absolute(path: &Path) -> Result<PathBuf, BuildError> {
    std::path::absolute(path).map_err(|e| BuildError::ResolvePath {
        path: path.to_path_buf(),
        source: e,
    })
}

fn create_dir(path: &Path) -> Result<(), BuildError> {
    std::fs::create_dir_all(path).map_err(|e| BuildError::CreateDir {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Every file named `manifest` (ASCII case-insensitive) under `root`,
/// skipping version-control metadata.
fn find_manifests(root: &Path, manifest: &str) -> Result<Vec<PathBuf>, BuildError> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git");

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| BuildError::ManifestSearch {
            root: root.to_path_buf(),
            source: e,
        })?;
        let is_manifest = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.eq_ignore_ascii_case(manifest));
        if entry.file_type().is_file() && is_manifest {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn steps_run_in_fixed_order() {
        let names: Vec<_> = Step::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            ["source sync", "dependency refresh", "compile", "deploy"]
        );
    }

    #[test]
    fn find_manifests_searches_whole_tree() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("Web/Sub")).unwrap();
        std::fs::create_dir_all(tmp.path().join(".git")).unwrap();
        std::fs::write(tmp.path().join("Web/packages.config"), "").unwrap();
        std::fs::write(tmp.path().join("Web/Sub/Packages.Config"), "").unwrap();
        std::fs::write(tmp.path().join(".git/packages.config"), "").unwrap();
        std::fs::write(tmp.path().join("Web/other.config"), "").unwrap();

        let found = find_manifests(tmp.path(), "packages.config").unwrap();

        assert_eq!(
            found,
            vec![
                tmp.path().join("Web/Sub/Packages.Config"),
                tmp.path().join("Web/packages.config"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn deploy_target_applies_base_and_requires_destination() {
        let tmp = TempDir::new().unwrap();
        let config: ApplicationConfig = [
            ("deploy_base", "Web"),
            ("deploy_to", tmp.path().to_str().unwrap()),
            ("deploy_ignore", "*.log"),
        ]
        .into_iter()
        .collect();
        let ctx = BuildContext::new(
            shipyard_core::ApplicationId::new("web").unwrap(),
            PathBuf::from("/apps/web"),
            config,
        );

        let target = DeployTarget::from_context(&ctx).unwrap();
        assert_eq!(target.source_root, Path::new("/apps/web/source/Web"));
        assert_eq!(target.dest, tmp.path());
        assert_eq!(target.ignore, "*.log");

        let config: ApplicationConfig = [("deploy_base", "./Web"), ("deploy_to", "/srv/www")]
            .into_iter()
            .collect();
        let ctx = BuildContext::new(
            shipyard_core::ApplicationId::new("web").unwrap(),
            PathBuf::from("/apps/web"),
            config,
        );
        let target = DeployTarget::from_context(&ctx).unwrap();
        assert_eq!(
            target.source_root.to_str(),
            Some("/apps/web/source/Web"),
            "`.` segments are normalized away"
        );

        let ctx = BuildContext::new(
            shipyard_core::ApplicationId::new("web").unwrap(),
            PathBuf::from("/apps/web"),
            ApplicationConfig::default(),
        );
        assert!(matches!(
            DeployTarget::from_context(&ctx),
            Err(BuildError::MissingSetting {
                key: "deploy_to",
                ..
            })
        ));
    }
}
