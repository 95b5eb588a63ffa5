//! One-shot invocation of the external documentation-extraction tool.
//!
//! The tool runs exactly once at startup, before any reflection or emission.
//! Its absence is the single fatal error of the pipeline: we report it on
//! stderr and stop before producing any stub output.

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use colored::Colorize;
use thiserror::Error;
use tracing::debug;

pub const TOOL: &str = "doxygen";

#[derive(Debug, Error)]
pub enum DoxygenError {
    #[error("doxygen is not installed")]
    ToolMissing,
    #[error("doxygen exited with status {status}")]
    RunFailed { status: i32 },
}

/// Checks that the documentation tool is available, printing an installation
/// hint to stderr when it is not.
pub fn ensure_installed() -> Result<(), DoxygenError> {
    if locate_tool().is_some() {
        return Ok(());
    }

    eprintln!();
    eprintln!("{}", "-----------------------".red());
    eprintln!("{}", "WARNING: Doxygen is not installed".red().bold());
    eprintln!("{}", "         you should run: sudo apt install doxygen".red());
    eprintln!("{}", "-----------------------".red());
    eprintln!();

    Err(DoxygenError::ToolMissing)
}

/// Runs the documentation tool once, blocking, in `dir` (where the Doxyfile
/// lives). The tool's stdout is redirected to stderr so stdout stays reserved
/// for the stub stream.
pub fn run(dir: &Path) -> Result<(), DoxygenError> {
    debug!(dir = %dir.display(), "running doxygen");

    let output = Command::new(TOOL)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|_| DoxygenError::ToolMissing)?;

    // The tool chats on stdout; forward it to stderr to keep the stub stream
    // clean.
    eprint!("{}", String::from_utf8_lossy(&output.stdout));

    let status = output.status;
    if status.success() {
        Ok(())
    } else {
        Err(DoxygenError::RunFailed {
            status: status.code().unwrap_or(-1),
        })
    }
}

fn locate_tool() -> Option<PathBuf> {
    let fixed = Path::new("/usr/bin").join(TOOL);
    if fixed.exists() {
        return Some(fixed);
    }

    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|entry| entry.join(TOOL))
        .find(|candidate| candidate.exists())
}
