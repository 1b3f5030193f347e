//! Foundation layer for pkgshim.
//!
//! Holds the pieces the dispatcher builds on: the error taxonomy and its exit
//! codes, the installed-package record, environment configuration, external
//! command execution and tracing setup.

pub mod command_stream;
pub mod config;
pub mod error;
pub mod package;
pub mod tracing_init;

pub use config::ShimConfig;
pub use error::{Result, ShimError};
pub use package::PackageRecord;
