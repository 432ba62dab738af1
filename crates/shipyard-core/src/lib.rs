//! Core types and configuration for shipyard.
//!
//! This crate defines the process-wide `shipyard.toml` schema ([`Settings`]),
//! the application model ([`ApplicationId`], [`ApplicationState`],
//! [`ApplicationConfig`]), the store seams ([`StateStore`], [`ConfigStore`])
//! with their file-backed implementation ([`FileDb`]), and shared error types.

pub mod app;
pub mod config;
pub mod error;
pub mod store;

pub use app::{ApplicationConfig, ApplicationId, ApplicationState};
pub use config::{
    CompileSettings, GitSettings, MirrorSettings, MirrorTool, RestoreSettings, SETTINGS_FILE,
    Settings,
};
pub use error::{Error, Result};
pub use store::{ConfigStore, FileDb, StateStore};
