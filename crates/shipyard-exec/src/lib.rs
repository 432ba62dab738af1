pub mod error;
pub mod invocation;
pub mod runner;
pub mod tools;

pub use error::RunnerError;
pub use invocation::{CommandOutput, Invocation};
pub use runner::{ProcessRunner, RealRunner};
pub use tools::Toolchain;
