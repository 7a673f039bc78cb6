use clap::Parser;

fn get_version() -> &'static str {
    const BASE_VERSION: &str = env!("CARGO_PKG_VERSION");

    if let Some(tag) = option_env!("SCRIPT_INSTALLER_GIT_TAG") {
        return tag;
    }

    let commit = option_env!("SCRIPT_INSTALLER_GIT_COMMIT").unwrap_or("unknown");
    let branch = option_env!("SCRIPT_INSTALLER_GIT_BRANCH").unwrap_or("unknown");

    // Leaked once at startup so clap can hold a 'static str
    let version = format!("v{}-{} ({})", BASE_VERSION, commit, branch);
    Box::leak(version.into_boxed_str())
}

// Every input falls back to the environment variable GitHub Actions sets for
// it. Requiredness is checked by `Config`, not clap, so a missing input exits
// with status 1 rather than clap's usage error.
#[derive(Parser, Debug)]
#[command(name = "script-installer")]
#[command(about = "Download, verify and run an installer script, then add its bin dir to PATH")]
#[command(version = get_version())]
pub struct Cli {
    /// Increase verbosity (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Reduce output to errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// URL of the installer script to fetch
    #[arg(long, env = "INPUT_SCRIPT_URL")]
    pub script_url: Option<String>,

    /// Expected SHA256 hex digest of the installer script
    #[arg(long, env = "INPUT_SCRIPT_SHA256")]
    pub script_sha256: Option<String>,

    /// Flags passed verbatim to `gh attestation verify`
    #[arg(long, env = "INPUT_GH_ATTESTATIONS_VERIFY_FLAGS", allow_hyphen_values = true)]
    pub gh_attestations_verify_flags: Option<String>,

    /// Version passed to the installer after `-b <dir>`
    #[arg(long, env = "INPUT_VERSION")]
    pub version_arg: Option<String>,

    /// Base directory for the installation output
    #[arg(long, env = "RUNNER_TEMP")]
    pub runner_temp: Option<String>,

    /// File the install directory is appended to for PATH propagation
    #[arg(long, env = "GITHUB_PATH")]
    pub github_path: Option<String>,

    /// File step outputs are appended to
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<String>,
}
