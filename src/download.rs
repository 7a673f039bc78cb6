use crate::error::ActionError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// HTTP client used to fetch the installer script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Downloader {
    Curl(PathBuf),
    Wget(PathBuf),
}

impl Downloader {
    pub fn name(&self) -> &'static str {
        match self {
            Downloader::Curl(_) => "curl",
            Downloader::Wget(_) => "wget",
        }
    }

    fn command(&self, url: &str, dest: &Path) -> Command {
        match self {
            Downloader::Curl(bin) => {
                let mut cmd = Command::new(bin);
                cmd.args(["--fail", "--silent", "--show-error", "--location", "-o"])
                    .arg(dest)
                    .arg(url);
                cmd
            }
            Downloader::Wget(bin) => {
                let mut cmd = Command::new(bin);
                cmd.args(["--quiet", "-O"]).arg(dest).arg(url);
                cmd
            }
        }
    }

    /// Fetch `url` into `dest`, returning once the whole body is on disk.
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let mut cmd = self.command(url, dest);
        tracing::debug!("Executing: {:?}", cmd.as_std());

        let status = cmd
            .status()
            .await
            .with_context(|| format!("Could not run {}", self.name()))?;

        if !status.success() {
            return Err(ActionError::DownloadFailed {
                url: url.to_string(),
                tool: self.name(),
                status,
            }
            .into());
        }

        Ok(())
    }
}

pub async fn download_script(
    downloader: Option<&Downloader>,
    url: &str,
    dest: &Path,
) -> Result<()> {
    let downloader = downloader.ok_or(ActionError::NoDownloader)?;
    tracing::info!("Downloading {} with {}...", url, downloader.name());
    downloader.fetch(url, dest).await
}
