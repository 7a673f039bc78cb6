use crate::config::APP_NAME;
use crate::error::ActionError;
use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)
            .with_context(|| format!("Could not stat {}", path.display()))?
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)
            .with_context(|| format!("Could not make {} executable", path.display()))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Name for a fresh install directory, unique per second and process.
pub fn install_dir_name(timestamp: i64, pid: u32) -> String {
    format!("{}-{}-{}", APP_NAME, timestamp, pid)
}

/// Create the directory the installer writes its binaries to.
///
/// It deliberately outlives this process so later workflow steps can use it.
pub fn create_install_dir(base: &Path) -> Result<PathBuf> {
    let dir = base.join(install_dir_name(Utc::now().timestamp(), std::process::id()));
    fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create install directory {}", dir.display()))?;
    tracing::debug!("Install directory: {}", dir.display());
    Ok(dir)
}

fn installer_command(script: &Path, install_dir: &Path, version_args: &[String]) -> Command {
    let mut cmd = Command::new(script);
    cmd.arg("-b").arg(install_dir).args(version_args);
    cmd
}

/// Run the installer script as `<script> -b <install_dir> [version...]`.
pub async fn run_installer(script: &Path, install_dir: &Path, version_args: &[String]) -> Result<()> {
    make_executable(script)?;

    let mut cmd = installer_command(script, install_dir, version_args);
    tracing::debug!("Executing: {:?}", cmd.as_std());

    let status = cmd
        .status()
        .await
        .with_context(|| format!("Could not run installer script {}", script.display()))?;

    if !status.success() {
        return Err(ActionError::InstallerFailed { status }.into());
    }
    Ok(())
}
