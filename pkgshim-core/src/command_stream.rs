// Standard library
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

// External crates
use crate::error::{Result, ShimError};
use duct::cmd;
use tracing::debug;
use which::which;

/// Lines of stderr kept when a captured command fails.
const ERROR_CONTEXT_LINES: usize = 20;

fn render_command<A: AsRef<OsStr>>(program: &Path, args: &[A]) -> String {
    let mut rendered = program.display().to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&arg.as_ref().to_string_lossy());
    }
    rendered
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}

/// Resolve a tool through `PATH`. Names containing a path separator are
/// checked directly.
pub fn find_tool(tool_name: &str) -> Option<PathBuf> {
    which(tool_name).ok()
}

/// First of `candidates` that resolves through `PATH`.
pub fn find_first_tool(candidates: &[&str]) -> Option<PathBuf> {
    candidates.iter().find_map(|name| find_tool(name))
}

/// Run a command with inherited stdio and hand back its exit code untouched.
///
/// A child terminated by a signal has no exit code and is reported as a
/// [`ShimError::Command`].
pub fn run_status<A: AsRef<OsStr>>(program: &Path, args: &[A]) -> Result<i32> {
    let full_command = render_command(program, args);
    debug!(command = %full_command, "running delegate");

    let output = cmd(program, args).unchecked().run().map_err(|e| {
        ShimError::Command(format!("Failed to start '{}': {}", full_command, e))
    })?;

    let code = output.status.code().ok_or_else(|| {
        ShimError::Command(format!("'{}' was terminated by a signal", full_command))
    })?;
    debug!(command = %full_command, code, "delegate finished");
    Ok(code)
}

/// Run a command, capturing stdout and stderr, and return stdout.
///
/// A non-zero exit is an error carrying the last lines of stderr.
pub fn run_capture<A: AsRef<OsStr>>(program: &Path, args: &[A]) -> Result<String> {
    let full_command = render_command(program, args);
    debug!(command = %full_command, "capturing delegate output");

    let output = cmd(program, args)
        .stdout_capture()
        .stderr_capture()
        .unchecked()
        .run()
        .map_err(|e| {
            ShimError::Command(format!("Failed to start '{}': {}", full_command, e))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ShimError::Command(format!(
            "'{}' exited with code {:?}\n\nOutput (last {} lines):\n{}",
            full_command,
            output.status.code(),
            ERROR_CONTEXT_LINES,
            tail(&stderr, ERROR_CONTEXT_LINES)
        )));
    }

    String::from_utf8(output.stdout).map_err(|e| {
        ShimError::Internal(format!(
            "Invalid UTF-8 in output of '{}': {}",
            full_command, e
        ))
    })
}

/// Run a command with all output discarded and report whether it exited 0.
pub fn probe<A: AsRef<OsStr>>(program: &Path, args: &[A]) -> bool {
    let full_command = render_command(program, args);
    match cmd(program, args)
        .stdout_null()
        .stderr_null()
        .unchecked()
        .run()
    {
        Ok(output) => {
            debug!(command = %full_command, success = output.status.success(), "probe finished");
            output.status.success()
        }
        Err(e) => {
            debug!(command = %full_command, error = %e, "probe could not start");
            false
        }
    }
}
