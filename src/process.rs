//! # External Process Execution
//!
//! Every external tool this crate drives (git, the manifest generator, the
//! statistics tools) is spawned through this module. Calls block until the
//! child exits; there is no timeout.
//!
//! Failures are classified into the typed variants of [`Error`]:
//! a missing program becomes `CommandNotFound`, a nonzero exit becomes
//! `CommandFailed` with captured stderr, and unusable stdout becomes
//! `UnexpectedOutput`.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Output};

use log::{debug, info};

use crate::error::{Error, Result};

/// Render a program and its arguments as a single display string.
pub fn display_command<I, S>(program: &str, args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut rendered = program.to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&arg.as_ref().to_string_lossy());
    }
    rendered
}

/// Run a program to completion and return its raw output.
///
/// Nonzero exit statuses are *not* turned into errors here; use [`run`] or
/// [`run_capture`] for that.
pub fn output<I, S>(program: &str, args: I, cwd: Option<&Path>) -> Result<(String, Output)>
where
    I: IntoIterator<Item = S> + Clone,
    S: AsRef<OsStr>,
{
    let command = display_command(program, args.clone());
    match cwd {
        Some(dir) => info!("Running [in directory {}] {}", dir.display(), command),
        None => info!("Running {}", command),
    }

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            Error::CommandNotFound {
                program: program.to_string(),
            }
        } else {
            Error::CommandSpawn {
                command: command.clone(),
                message: e.to_string(),
            }
        }
    })?;

    if !output.stderr.is_empty() {
        debug!(
            "{} stderr: {}",
            command,
            String::from_utf8_lossy(&output.stderr).trim_end()
        );
    }

    Ok((command, output))
}

fn check_status(command: String, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Err(Error::CommandFailed {
        command,
        code: output.status.code(),
        stderr,
    })
}

/// Run a program and fail unless it exits successfully.
pub fn run<I, S>(program: &str, args: I, cwd: Option<&Path>) -> Result<()>
where
    I: IntoIterator<Item = S> + Clone,
    S: AsRef<OsStr>,
{
    let (command, output) = output(program, args, cwd)?;
    check_status(command, &output)
}

/// Run a program, fail unless it exits successfully, and return its raw
/// stdout.
pub fn run_capture_bytes<I, S>(program: &str, args: I, cwd: Option<&Path>) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = S> + Clone,
    S: AsRef<OsStr>,
{
    let (command, output) = output(program, args, cwd)?;
    check_status(command, &output)?;
    Ok(output.stdout)
}

/// Like [`run_capture_bytes`], with stdout decoded as UTF-8.
pub fn run_capture<I, S>(program: &str, args: I, cwd: Option<&Path>) -> Result<String>
where
    I: IntoIterator<Item = S> + Clone,
    S: AsRef<OsStr>,
{
    let command = display_command(program, args.clone());
    let stdout = run_capture_bytes(program, args, cwd)?;
    String::from_utf8(stdout).map_err(|e| Error::UnexpectedOutput {
        command,
        message: format!("stdout is not valid UTF-8: {}", e),
    })
}
