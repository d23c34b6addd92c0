//! ocelli - run face scenarios headlessly

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ocelli_cli::config::CONFIG_FILE;
use ocelli_cli::{run_scenario, OcelliConfig, Scenario};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ocelli")]
#[command(about = "Animated two-eye face: headless scenario runner")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scenario file and print its report
    Run {
        /// Scenario JSON file
        scenario: PathBuf,
        /// Config file or directory holding ocelli.toml
        #[arg(long)]
        config: Option<PathBuf>,
        /// Also write the report to this file
        #[arg(long)]
        report: Option<PathBuf>,
        /// Override the logical frame delta
        #[arg(long)]
        frame_ms: Option<u64>,
    },

    /// Write a default ocelli.toml
    InitConfig {
        /// Where to write it
        #[arg(default_value = CONFIG_FILE)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            scenario,
            config,
            report,
            frame_ms,
        } => run(&scenario, config.as_deref(), report.as_deref(), frame_ms),
        Command::InitConfig { path, force } => {
            init_config(&path, force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run(
    scenario_path: &Path,
    config_path: Option<&Path>,
    report_path: Option<&Path>,
    frame_ms: Option<u64>,
) -> Result<ExitCode> {
    let mut config = match config_path {
        Some(path) => OcelliConfig::load_from_path(path)?,
        None if Path::new(CONFIG_FILE).exists() => {
            OcelliConfig::load_from_path(Path::new(CONFIG_FILE))?
        }
        None => OcelliConfig::default(),
    };
    if let Some(frame_ms) = frame_ms {
        if frame_ms == 0 {
            bail!("--frame-ms must be > 0");
        }
        config.run.frame_ms = frame_ms;
    }

    let scenario = Scenario::from_path(scenario_path)?;
    let report = run_scenario(&scenario, &config)?;

    report.write_to_writer(&mut std::io::stdout().lock())?;
    if let Some(path) = report_path {
        report
            .write_to_path(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    Ok(if report.is_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let content = OcelliConfig::default().to_toml()?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
