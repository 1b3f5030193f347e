// Standard library
use std::ffi::OsString;

// External crates
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use pkgshim_core::error::{Result, ShimError};

/// Command-line arguments for pkgshim.
///
/// Exactly one operation is selected per run. Anything clap rejects is turned
/// into a [`ShimError::Usage`] so the caller can exit with the usage code.
#[derive(Parser, Debug)]
#[command(name = "pkgshim")]
#[command(about = "List, install and uninstall Python packages through pip")]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print installed packages as name<TAB>version<TAB>location lines
    #[command(disable_help_flag = true)]
    List,
    /// Install a package
    #[command(disable_help_flag = true)]
    Install {
        /// Package to install
        package: String,

        /// Extra installer options, forwarded as a single argument
        #[arg(allow_hyphen_values = true)]
        options: Option<String>,
    },
    /// Uninstall a package without asking for confirmation
    #[command(disable_help_flag = true)]
    Uninstall {
        /// Package to uninstall
        package: String,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::List => "list",
            Command::Install { .. } => "install",
            Command::Uninstall { .. } => "uninstall",
        }
    }
}

/// Result of reading the command line.
#[derive(Debug, PartialEq, Eq)]
pub enum Parsed {
    /// An operation to dispatch.
    Run(Command),
    /// `--help` or `--version` text to print before exiting successfully.
    Info(String),
}

/// Parse a full argv (program name first).
pub fn parse<I, T>(args: I) -> Result<Parsed>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(args) {
        Ok(args) => Ok(Parsed::Run(args.command)),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Ok(Parsed::Info(e.render().to_string()))
            }
            _ => Err(ShimError::Usage(e.render().to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Command {
        match parse(args.iter().copied()).unwrap() {
            Parsed::Run(command) => command,
            other => panic!("expected a command, got {:?}", other),
        }
    }

    fn usage(args: &[&str]) -> String {
        match parse(args.iter().copied()) {
            Err(ShimError::Usage(text)) => text,
            other => panic!("expected a usage error, got {:?}", other),
        }
    }

    #[test]
    fn test_list() {
        assert_eq!(run(&["pkgshim", "list"]), Command::List);
    }

    #[test]
    fn test_install_without_options() {
        assert_eq!(
            run(&["pkgshim", "install", "flask"]),
            Command::Install {
                package: "flask".to_string(),
                options: None,
            }
        );
    }

    #[test]
    fn test_install_with_hyphenated_options() {
        assert_eq!(
            run(&["pkgshim", "install", "flask", "--upgrade"]),
            Command::Install {
                package: "flask".to_string(),
                options: Some("--upgrade".to_string()),
            }
        );
    }

    #[test]
    fn test_install_forwards_help_flags_as_options() {
        for flag in ["--help", "-h"] {
            assert_eq!(
                run(&["pkgshim", "install", "flask", flag]),
                Command::Install {
                    package: "flask".to_string(),
                    options: Some(flag.to_string()),
                }
            );
        }
    }

    #[test]
    fn test_subcommand_help_flags_are_usage() {
        usage(&["pkgshim", "list", "--help"]);
        usage(&["pkgshim", "list", "-h"]);
        usage(&["pkgshim", "uninstall", "-h"]);
        usage(&["pkgshim", "install", "-h", "flask", "extra"]);
    }

    #[test]
    fn test_uninstall() {
        assert_eq!(
            run(&["pkgshim", "uninstall", "flask"]),
            Command::Uninstall {
                package: "flask".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_command_is_usage() {
        usage(&["pkgshim"]);
        usage(&[]);
    }

    #[test]
    fn test_unknown_command_is_usage() {
        let text = usage(&["pkgshim", "badcommand"]);
        assert!(text.contains("badcommand"));
        usage(&["pkgshim", "badcommand", "flask", "extra"]);
        usage(&["pkgshim", "help"]);
    }

    #[test]
    fn test_wrong_arity_is_usage() {
        usage(&["pkgshim", "list", "extra"]);
        usage(&["pkgshim", "install"]);
        usage(&["pkgshim", "install", "flask", "--upgrade", "--user"]);
        usage(&["pkgshim", "uninstall"]);
        usage(&["pkgshim", "uninstall", "flask", "requests"]);
    }

    #[test]
    fn test_help_and_version_are_informational() {
        match parse(["pkgshim", "--version"]).unwrap() {
            Parsed::Info(text) => assert!(text.contains(env!("CARGO_PKG_VERSION"))),
            other => panic!("expected version text, got {:?}", other),
        }
        match parse(["pkgshim", "--help"]).unwrap() {
            Parsed::Info(text) => {
                assert!(text.contains("list"));
                assert!(text.contains("install"));
                assert!(text.contains("uninstall"));
            }
            other => panic!("expected help text, got {:?}", other),
        }
    }

    #[test]
    fn test_command_names() {
        assert_eq!(Command::List.name(), "list");
        assert_eq!(run(&["pkgshim", "uninstall", "x"]).name(), "uninstall");
    }
}
