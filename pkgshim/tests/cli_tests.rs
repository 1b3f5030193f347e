use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;

/// pkgshim with an interpreter override that cannot resolve, so no test here
/// ever reaches a real pip.
fn pkgshim() -> Result<Command> {
    let mut cmd = Command::cargo_bin("pkgshim")?;
    cmd.env("PKGSHIM_PYTHON", "/nonexistent/pkgshim-test/python3")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn test_no_arguments_is_usage_error() -> Result<()> {
    pkgshim()?
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn test_unknown_command_is_usage_error() -> Result<()> {
    pkgshim()?
        .arg("badcommand")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("badcommand"));

    pkgshim()?
        .args(["badcommand", "flask", "--upgrade"])
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn test_wrong_arity_is_usage_error() -> Result<()> {
    for args in [
        &["install"][..],
        &["uninstall"][..],
        &["list", "extra"][..],
        &["list", "--help"][..],
        &["uninstall", "-h"][..],
        &["uninstall", "flask", "requests"][..],
    ] {
        pkgshim()?
            .args(args)
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty());
    }
    Ok(())
}

#[test]
fn test_missing_interpreter_is_missing_tools() -> Result<()> {
    pkgshim()?
        .arg("list")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Python package management tools not found",
        ));

    pkgshim()?
        .args(["install", "flask"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("'pip' not found"));

    pkgshim()?
        .args(["uninstall", "flask"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("'pip' not found"));
    Ok(())
}

#[test]
fn test_help_and_version() -> Result<()> {
    pkgshim()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("uninstall"));

    pkgshim()?
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}
