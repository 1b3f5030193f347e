//! pip-backed package capabilities.
//!
//! pip is driven as `<python> -m pip ...` so the packages listed, installed
//! and removed always belong to the interpreter that was selected, never to
//! whichever `pip` script happens to be first on `PATH`.

// Standard library
use std::path::{Path, PathBuf};

// External crates
use anyhow::Context;
use once_cell::unsync::OnceCell;
use pkgshim_core::command_stream::{find_first_tool, find_tool, probe, run_capture, run_status};
use pkgshim_core::error::Result;
use pkgshim_core::{PackageRecord, ShimConfig};
use tracing::{debug, warn};

// Internal imports
use crate::capabilities::{PackageInstaller, PackageRegistry, PackageTools, PackageUninstaller};

/// Interpreters tried, in order, when no override is configured.
const DEFAULT_INTERPRETERS: &[&str] = &["python3", "python"];

const PIP_VERSION_ARGS: &[&str] = &["-m", "pip", "--version"];
const PIP_LIST_ARGS: &[&str] = &[
    "-m",
    "pip",
    "list",
    "--format=json",
    "--verbose",
    "--disable-pip-version-check",
];

/// Parse the JSON array printed by `pip list --format=json --verbose`.
pub fn parse_listing(json: &str) -> Result<Vec<PackageRecord>> {
    let packages = serde_json::from_str(json.trim())
        .context("pip printed a package listing that is not a JSON array of packages")?;
    Ok(packages)
}

/// pip reached through one specific interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipBackend {
    python: PathBuf,
}

impl PipBackend {
    pub fn new(python: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// Find an interpreter and check that it can run pip.
    ///
    /// `python` overrides the default interpreter search. Returns `None` when
    /// no interpreter resolves or `python -m pip --version` fails.
    pub fn detect(python: Option<&str>) -> Option<Self> {
        let interpreter = match python {
            Some(name) => find_tool(name),
            None => find_first_tool(DEFAULT_INTERPRETERS),
        };

        let Some(interpreter) = interpreter else {
            warn!(requested = ?python, "no Python interpreter found");
            return None;
        };

        if !probe(&interpreter, PIP_VERSION_ARGS) {
            warn!(interpreter = %interpreter.display(), "interpreter cannot run pip");
            return None;
        }

        debug!(interpreter = %interpreter.display(), "pip is available");
        Some(Self::new(interpreter))
    }

    pub fn interpreter(&self) -> &Path {
        &self.python
    }

    fn install_args(package: &str, options: Option<&str>) -> Vec<String> {
        let mut args: Vec<String> = vec!["-m".into(), "pip".into(), "install".into()];
        args.push(package.to_string());
        if let Some(options) = options {
            args.push(options.to_string());
        }
        args
    }

    fn uninstall_args(package: &str, force_confirm: bool) -> Vec<String> {
        let mut args: Vec<String> = vec!["-m".into(), "pip".into(), "uninstall".into()];
        if force_confirm {
            args.push("-y".into());
        }
        args.push(package.to_string());
        args
    }
}

impl PackageRegistry for PipBackend {
    fn installed_packages(&self) -> Result<Vec<PackageRecord>> {
        let stdout = run_capture(&self.python, PIP_LIST_ARGS)?;
        let packages = parse_listing(&stdout)
            .with_context(|| format!("Failed to list packages via {}", self.python.display()))?;
        Ok(packages)
    }
}

impl PackageInstaller for PipBackend {
    fn install(&self, package: &str, options: Option<&str>) -> Result<i32> {
        run_status(&self.python, &Self::install_args(package, options))
    }
}

impl PackageUninstaller for PipBackend {
    fn uninstall(&self, package: &str, force_confirm: bool) -> Result<i32> {
        run_status(&self.python, &Self::uninstall_args(package, force_confirm))
    }
}

/// Capability provider backed by pip.
///
/// Detection is deferred to the first capability lookup and runs at most
/// once, so a usage error never spawns an interpreter.
#[derive(Debug, Default)]
pub struct PipTools {
    python: Option<String>,
    backend: OnceCell<Option<PipBackend>>,
}

impl PipTools {
    pub fn new(config: &ShimConfig) -> Self {
        Self {
            python: config.python.clone(),
            backend: OnceCell::new(),
        }
    }

    /// Provider with an already known backend, or none at all.
    pub fn with_backend(backend: Option<PipBackend>) -> Self {
        Self {
            python: None,
            backend: OnceCell::with_value(backend),
        }
    }

    pub fn backend(&self) -> Option<&PipBackend> {
        self.backend
            .get_or_init(|| PipBackend::detect(self.python.as_deref()))
            .as_ref()
    }
}

impl PackageTools for PipTools {
    fn registry(&self) -> Option<&dyn PackageRegistry> {
        self.backend().map(|b| b as &dyn PackageRegistry)
    }

    fn installer(&self) -> Option<&dyn PackageInstaller> {
        self.backend().map(|b| b as &dyn PackageInstaller)
    }

    fn uninstaller(&self) -> Option<&dyn PackageUninstaller> {
        self.backend().map(|b| b as &dyn PackageUninstaller)
    }
}
