//! pkgshim library.
//!
//! Parses the command line, looks up the package-management capability the
//! selected operation needs, and delegates to it. The binary in `main.rs` is
//! a thin wrapper that wires the pip-backed capabilities and the process
//! streams into a [`Dispatcher`].

pub mod capabilities;
pub mod cli;
pub mod dispatcher;
pub mod pip;

// Re-export key types for testing and external use
pub use capabilities::{PackageInstaller, PackageRegistry, PackageTools, PackageUninstaller};
pub use cli::{Args, Command};
pub use dispatcher::Dispatcher;
pub use pip::{PipBackend, PipTools};
