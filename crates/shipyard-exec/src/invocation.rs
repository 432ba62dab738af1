use std::path::{Path, PathBuf};

use crate::RunnerError;

/// One external command: program, arguments, working directory and an
/// optional log file that receives the command line and its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub log: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
            log: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn log_to(mut self, path: &Path) -> Self {
        self.log = Some(path.to_path_buf());
        self
    }

    /// Human-readable command line; arguments with whitespace are quoted.
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|part| {
                if part.contains(char::is_whitespace) && !part.starts_with('"') {
                    format!("\"{part}\"")
                } else {
                    part.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Exit status and combined stdout/stderr of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub command: String,
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub output: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Fail unless the command exited with `expected`.
    pub fn ensure_code(self, expected: i32) -> Result<Self, RunnerError> {
        if self.code == Some(expected) {
            Ok(self)
        } else {
            Err(RunnerError::UnexpectedExit {
                command: self.command,
                expected,
                actual: self.code,
                output: self.output,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_quotes_whitespace_args() {
        let inv = Invocation::new("git", "/tmp")
            .arg("clone")
            .arg("/srv/My Repo")
            .arg("source");
        assert_eq!(inv.command_line(), "git clone \"/srv/My Repo\" source");
    }

    #[test]
    fn ensure_code_passes_matching_exit() {
        let out = CommandOutput {
            command: "git pull".to_owned(),
            code: Some(0),
            output: "Already up to date.\n".to_owned(),
        };
        assert!(out.ensure_code(0).is_ok());
    }

    #[test]
    fn ensure_code_rejects_other_exit() {
        let out = CommandOutput {
            command: "msbuild".to_owned(),
            code: Some(1),
            output: "error CS1002".to_owned(),
        };
        let err = out.ensure_code(0).unwrap_err();
        assert!(matches!(
            err,
            RunnerError::UnexpectedExit {
                actual: Some(1),
                expected: 0,
                ..
            }
        ));
        assert_eq!(err.to_string(), "`msbuild` exited with code 1, expected 0");
    }

    #[test]
    fn ensure_code_rejects_signal_termination() {
        let out = CommandOutput {
            command: "nuget".to_owned(),
            code: None,
            output: String::new(),
        };
        assert!(out.ensure_code(0).is_err());
    }
}
