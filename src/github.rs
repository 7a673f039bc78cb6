//! GitHub Actions file commands
//!
//! The runner reads `GITHUB_PATH` and `GITHUB_OUTPUT` after the step ends:
//! each line of the former is prepended to `PATH` for later steps, each
//! `name=value` line of the latter becomes a step output.

use crate::verify::Verification;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

fn append_lines(file: &Path, lines: &[String]) -> Result<()> {
    let mut handle = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .with_context(|| format!("Could not open {}", file.display()))?;

    for line in lines {
        writeln!(handle, "{}", line)
            .with_context(|| format!("Could not write to {}", file.display()))?;
    }
    Ok(())
}

/// Add `dir` to `PATH` for subsequent steps. No deduplication is done.
pub fn append_path(github_path: &Path, dir: &Path) -> Result<()> {
    tracing::debug!("Appending {} to {}", dir.display(), github_path.display());
    append_lines(github_path, &[dir.display().to_string()])
}

pub fn write_outputs(github_output: &Path, dir: &Path, verification: Verification) -> Result<()> {
    append_lines(
        github_output,
        &[
            format!("install-dir={}", dir.display()),
            format!("verification={}", verification),
        ],
    )
}
