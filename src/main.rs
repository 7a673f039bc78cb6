mod cli;
mod config;
mod download;
mod error;
mod github;
mod install;
mod status;
mod tools;
mod verify;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::{Config, SCRIPT_FILE_NAME};
use download::download_script;
use install::{create_install_dir, run_installer};
use tempfile::TempDir;
use tools::Toolbox;
use verify::verify_script;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    status::init();
    setup_logging(&cli);

    if let Err(e) = run(&cli).await {
        status::error(format!("{:#}", e));
        std::process::exit(1);
    }
}

fn setup_logging(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let runner_debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");

    let level = if cli.quiet {
        "error"
    } else if cli.verbose >= 2 || runner_debug {
        "debug"
    } else if cli.verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    let config = Config::from_cli(cli)?;
    let tools = Toolbox::probe();

    // Removed on every return path, including errors
    let download_dir = tempfile::Builder::new()
        .prefix(config::APP_NAME)
        .tempdir()
        .context("Could not create temporary download directory")?;

    install_from(&config, &tools, &download_dir).await
}

async fn install_from(config: &Config, tools: &Toolbox, download_dir: &TempDir) -> Result<()> {
    let script = download_dir.path().join(SCRIPT_FILE_NAME);

    status::info(format!("Downloading installer script from {}", config.script_url));
    download_script(tools.downloader.as_ref(), &config.script_url, &script).await?;

    let verification = verify_script(config, tools, &script).await?;

    let install_dir = create_install_dir(&config.install_base())?;
    status::info(format!("Running installer into {}", install_dir.display()));
    run_installer(&script, &install_dir, &config.version_args()).await?;

    github::append_path(&config.github_path, &install_dir)?;
    if let Some(github_output) = &config.github_output {
        github::write_outputs(github_output, &install_dir, verification)?;
    }

    status::success(format!("Installed to {} and added it to PATH", install_dir.display()));
    Ok(())
}
