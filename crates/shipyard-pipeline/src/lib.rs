//! Per-application build pipeline for shipyard.
//!
//! # Build lifecycle
//!
//! ```text
//! BuildOrchestrator::build(app)
//!   lock(app) ── held for the whole call
//!   state ∉ {idle, failed} → StateConflict (nothing written)
//!   truncate <app>/log.txt, state = building
//!   1. Source sync        ── git clone / git pull
//!   2. Dependency refresh ── restore every manifest under the source tree
//!   3. Compile            ── process-wide build tool
//!   4. Deploy             ── resolve exclusions, mirror copy (status ignored)
//!   ok  → "-> build completed", state = idle
//!   err → "ERROR: …", "-> build failed!", state = failed, error returned
//!         (covers a failed `building` or `idle` write too)
//! ```

pub mod context;
pub mod error;
pub mod lock;
pub mod log;
pub mod orchestrator;
pub mod steps;

pub use context::BuildContext;
pub use error::{BuildError, ErrorKind};
pub use lock::LockRegistry;
pub use log::BuildLog;
pub use orchestrator::BuildOrchestrator;
pub use steps::{DeployTarget, Step};
