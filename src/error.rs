//! Failure modes of an installer run
//!
//! Every variant aborts the run with exit status 1. The only non-fatal
//! conditions (missing `gh`, unverified script) are warnings and never
//! become errors.

use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("required input '{name}' is not set")]
    MissingInput { name: &'static str },

    #[error("neither curl nor wget was found on PATH")]
    NoDownloader,

    #[error("failed to download {url}: {tool} reported {status}")]
    DownloadFailed {
        url: String,
        tool: &'static str,
        status: ExitStatus,
    },

    #[error("neither sha256sum nor shasum was found on PATH")]
    NoDigester,

    #[error("{tool} failed to hash the installer script: {reason}")]
    DigestFailed { tool: &'static str, reason: String },

    #[error("SHA256 mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("gh attestation verify failed: {status}")]
    AttestationFailed { status: ExitStatus },

    #[error("installer script failed: {status}")]
    InstallerFailed { status: ExitStatus },
}
