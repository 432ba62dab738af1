use std::path::Path;

use crate::{CommandOutput, Invocation, RunnerError};

/// Abstraction over external process execution for testability.
///
/// Production code uses [`RealRunner`], tests use mockall-generated mocks.
/// A runner reports the exit status; deciding whether that status is a
/// failure is left to the caller (see [`CommandOutput::ensure_code`]).
#[allow(async_fn_in_trait)]
pub trait ProcessRunner: Send + Sync {
    /// Run the command to completion and capture its combined output.
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, RunnerError>;
}

/// Real process runner backed by `tokio::process`.
pub struct RealRunner;

impl ProcessRunner for RealRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, RunnerError> {
        use std::process::Stdio;

        let command = invocation.command_line();
        tracing::debug!(%command, cwd = %invocation.working_dir.display(), "running");

        let output = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| RunnerError::Spawn {
                program: invocation.program.clone(),
                working_dir: invocation.working_dir.clone(),
                source: e,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if let Some(log) = &invocation.log {
            append_output(log, &command, &combined).await?;
        }

        let code = output.status.code();
        tracing::debug!(%command, ?code, "finished");

        Ok(CommandOutput {
            command,
            code,
            output: combined,
        })
    }
}

async fn append_output(path: &Path, command: &str, output: &str) -> Result<(), RunnerError> {
    use tokio::io::AsyncWriteExt;

    let mut text = format!("> {command}\n");
    text.push_str(output);
    if !output.is_empty() && !output.ends_with('\n') {
        text.push('\n');
    }

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| RunnerError::LogWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    file.write_all(text.as_bytes())
        .await
        .map_err(|e| RunnerError::LogWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    file.flush().await.map_err(|e| RunnerError::LogWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
