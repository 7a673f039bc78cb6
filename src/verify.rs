//! Installer script verification
//!
//! Three outcomes, tried in order:
//! 1. an expected SHA256 is configured: the digest must match, or the run
//!    aborts;
//! 2. otherwise, attestation flags are configured: `gh attestation verify`
//!    must pass, unless `gh` is not installed, in which case it is skipped;
//! 3. nothing verified the script: warn and carry on.

use crate::config::Config;
use crate::error::ActionError;
use crate::status;
use crate::tools::Toolbox;
use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Tool used to compute the SHA256 of the downloaded script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Digester {
    Sha256sum(PathBuf),
    Shasum(PathBuf),
}

/// The `gh` CLI, used for `gh attestation verify`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attestor(pub PathBuf);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Sha256,
    Attestation,
    Unverified,
}

impl Verification {
    pub fn is_verified(self) -> bool {
        self != Verification::Unverified
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verification::Sha256 => write!(f, "sha256"),
            Verification::Attestation => write!(f, "attestation"),
            Verification::Unverified => write!(f, "none"),
        }
    }
}

impl Digester {
    pub fn name(&self) -> &'static str {
        match self {
            Digester::Sha256sum(_) => "sha256sum",
            Digester::Shasum(_) => "shasum",
        }
    }

    fn command(&self, file: &Path) -> Command {
        match self {
            Digester::Sha256sum(bin) => {
                let mut cmd = Command::new(bin);
                cmd.arg(file);
                cmd
            }
            Digester::Shasum(bin) => {
                let mut cmd = Command::new(bin);
                cmd.args(["-a", "256"]).arg(file);
                cmd
            }
        }
    }

    /// Hex digest of `file`, exactly as the tool prints it.
    pub async fn digest(&self, file: &Path) -> Result<String> {
        let mut cmd = self.command(file);
        tracing::debug!("Executing: {:?}", cmd.as_std());

        let output = cmd
            .output()
            .await
            .with_context(|| format!("Could not run {}", self.name()))?;

        if !output.status.success() {
            return Err(ActionError::DigestFailed {
                tool: self.name(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_digest(&stdout).ok_or_else(|| {
            ActionError::DigestFailed {
                tool: self.name(),
                reason: "no digest in output".to_string(),
            }
            .into()
        })
    }
}

// Both tools print "<hex>  <file>"
fn parse_digest(output: &str) -> Option<String> {
    output.split_whitespace().next().map(str::to_string)
}

impl Attestor {
    fn command(&self, file: &Path, flags: &[String]) -> Command {
        let mut cmd = Command::new(&self.0);
        cmd.args(["attestation", "verify"]).arg(file).args(flags);
        cmd
    }

    pub async fn verify(&self, file: &Path, flags: &[String]) -> Result<()> {
        let mut cmd = self.command(file, flags);
        tracing::debug!("Executing: {:?}", cmd.as_std());

        let status = cmd
            .status()
            .await
            .context("Could not run gh attestation verify")?;

        if !status.success() {
            return Err(ActionError::AttestationFailed { status }.into());
        }
        Ok(())
    }
}

pub async fn verify_sha256(digester: Option<&Digester>, file: &Path, expected: &str) -> Result<()> {
    let digester = digester.ok_or(ActionError::NoDigester)?;
    let actual = digester.digest(file).await?;
    tracing::debug!("{} reported {}", digester.name(), actual);

    if actual != expected {
        return Err(ActionError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        }
        .into());
    }
    Ok(())
}

pub async fn verify_script(config: &Config, tools: &Toolbox, file: &Path) -> Result<Verification> {
    let mut verification = Verification::Unverified;

    if let Some(expected) = &config.expected_sha256 {
        status::info("Verifying SHA256 checksum...");
        verify_sha256(tools.digester.as_ref(), file, expected).await?;
        status::success("SHA256 checksum verified");
        verification = Verification::Sha256;
    }

    if !verification.is_verified() && config.attestation_flags.is_some() {
        match &tools.attestor {
            Some(gh) => {
                status::info("Verifying GitHub attestation...");
                gh.verify(file, &config.attestation_args()).await?;
                status::success("GitHub attestation verified");
                verification = Verification::Attestation;
            }
            None => {
                status::warn("gh CLI not found, skipping attestation verification");
            }
        }
    }

    if !verification.is_verified() {
        status::warn(
            "Installer script was not verified; set script-sha256 or \
             gh-attestations-verify-flags to verify it",
        );
    }

    Ok(verification)
}
