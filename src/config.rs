use crate::cli::Cli;
use crate::error::ActionError;
use std::path::PathBuf;

pub const APP_NAME: &str = "script-installer";
pub const SCRIPT_FILE_NAME: &str = "install.sh";

/// Inputs for one run, resolved once from flags and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub script_url: String,
    pub expected_sha256: Option<String>,
    pub attestation_flags: Option<String>,
    pub version: Option<String>,
    pub runner_temp: Option<PathBuf>,
    pub github_path: PathBuf,
    pub github_output: Option<PathBuf>,
}

// Actions passes unset optional inputs as empty strings
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, ActionError> {
        let script_url = non_empty(cli.script_url.clone())
            .ok_or(ActionError::MissingInput { name: "script-url" })?;
        let github_path = non_empty(cli.github_path.clone())
            .map(PathBuf::from)
            .ok_or(ActionError::MissingInput {
                name: "GITHUB_PATH",
            })?;

        let config = Config {
            script_url,
            expected_sha256: non_empty(cli.script_sha256.clone()),
            attestation_flags: non_empty(cli.gh_attestations_verify_flags.clone()),
            version: non_empty(cli.version_arg.clone()),
            runner_temp: non_empty(cli.runner_temp.clone()).map(PathBuf::from),
            github_path,
            github_output: non_empty(cli.github_output.clone()).map(PathBuf::from),
        };

        tracing::debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    /// Root under which the install directory is created.
    pub fn install_base(&self) -> PathBuf {
        self.runner_temp
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Version tokens appended after `-b <dir>`.
    ///
    /// The raw value is split on whitespace, so `"v1 extra"` becomes two
    /// arguments.
    pub fn version_args(&self) -> Vec<String> {
        split_words(self.version.as_deref())
    }

    /// Flags appended to `gh attestation verify <file>`, split on whitespace.
    pub fn attestation_args(&self) -> Vec<String> {
        split_words(self.attestation_flags.as_deref())
    }
}

fn split_words(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| v.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
