use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("failed to start `{program}` in {working_dir}")]
    Spawn {
        program: String,
        working_dir: PathBuf,
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}, expected {expected}", describe_code(*actual))]
    UnexpectedExit {
        command: String,
        expected: i32,
        actual: Option<i32>,
        output: String,
    },

    #[error("failed to append tool output to {path}")]
    LogWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "no exit code (terminated by signal)".to_owned(),
    }
}
