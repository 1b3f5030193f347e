// Standard library
use std::ffi::OsString;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

// External crates
use pkgshim_core::error::{Result, ShimError, ERROR_EXCEPTION, EXIT_SUCCESS};
use tracing::{debug, error, info_span};

// Internal imports
use crate::capabilities::PackageTools;
use crate::cli::{self, Command, Parsed};

pub const NO_REGISTRY_MESSAGE: &str =
    "Python package management tools not found. Please install 'pip'";
pub const NO_PIP_MESSAGE: &str =
    "Python package management tool 'pip' not found. Please install 'pip'";

/// Runs one pkgshim invocation against an injected set of capabilities.
///
/// All user-visible output goes to the sinks passed to [`Dispatcher::run`];
/// the dispatcher never touches the process streams itself.
pub struct Dispatcher<'a> {
    tools: &'a dyn PackageTools,
}

impl<'a> Dispatcher<'a> {
    pub fn new(tools: &'a dyn PackageTools) -> Self {
        Self { tools }
    }

    /// Parse `args` (program name first), perform the selected operation and
    /// return the process exit code.
    ///
    /// Usage and missing-tool errors print a one-line message. Anything else,
    /// including a panic inside a delegate, prints a full diagnostic and
    /// yields [`ERROR_EXCEPTION`].
    pub fn run<I, T>(&self, args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<i32> {
            match cli::parse(args)? {
                Parsed::Info(text) => {
                    write!(out, "{}", text)?;
                    Ok(EXIT_SUCCESS)
                }
                Parsed::Run(command) => self.execute(command, out),
            }
        }));

        let code = match outcome {
            Ok(Ok(code)) => code,
            Ok(Err(e)) => report_error(e, err),
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic payload".to_string());
                error!(%message, "dispatch panicked");
                let _ = writeln!(err, "Internal error: panic during dispatch: {}", message);
                ERROR_EXCEPTION
            }
        };

        let _ = out.flush();
        let _ = err.flush();
        code
    }

    /// Perform an already parsed operation.
    ///
    /// Delegate status codes come back as `Ok`, untranslated.
    pub fn execute(&self, command: Command, out: &mut dyn Write) -> Result<i32> {
        let span = info_span!("dispatch", command = command.name());
        let _enter = span.enter();

        match command {
            Command::List => self.list(out),
            Command::Install { package, options } => {
                let options = options.as_deref().filter(|o| !o.is_empty());
                self.install(&package, options)
            }
            Command::Uninstall { package } => self.uninstall(&package),
        }
    }

    fn list(&self, out: &mut dyn Write) -> Result<i32> {
        let registry = self
            .tools
            .registry()
            .ok_or_else(|| ShimError::ToolMissing(NO_REGISTRY_MESSAGE.to_string()))?;

        let packages = registry.installed_packages()?;
        debug!(count = packages.len(), "listing installed packages");
        for package in &packages {
            writeln!(out, "{}", package)?;
        }
        Ok(EXIT_SUCCESS)
    }

    fn install(&self, package: &str, options: Option<&str>) -> Result<i32> {
        let installer = self
            .tools
            .installer()
            .ok_or_else(|| ShimError::ToolMissing(NO_PIP_MESSAGE.to_string()))?;

        debug!(package, ?options, "installing");
        installer.install(package, options)
    }

    fn uninstall(&self, package: &str) -> Result<i32> {
        let uninstaller = self
            .tools
            .uninstaller()
            .ok_or_else(|| ShimError::ToolMissing(NO_PIP_MESSAGE.to_string()))?;

        debug!(package, "uninstalling");
        uninstaller.uninstall(package, true)
    }
}

/// Write `e` to the error sink and return its exit code.
fn report_error(e: ShimError, err: &mut dyn Write) -> i32 {
    let code = e.exit_code();
    if e.is_expected() {
        let _ = write!(err, "{}", e);
        if !e.to_string().ends_with('\n') {
            let _ = writeln!(err);
        }
        return code;
    }

    error!(error = %e, "dispatch failed");
    // anyhow's debug form carries the cause chain, plus a backtrace when
    // RUST_BACKTRACE is set.
    let _ = writeln!(err, "{:?}", anyhow::Error::new(e));
    code
}
