//! plagsweep: run JPlag over a submissions manifest and strip same-author
//! comparisons from its report.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ps_core::{load_manifest, Settings, SubmissionIndex};
use ps_report::ReportMinimizer;
use ps_runner::PlagRunner;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "plagsweep", version, about = "JPlag runner with same-author report filtering")]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the detector on a manifest of submissions
    Run(RunArgs),
    /// Strip same-author comparisons from an existing report
    Minimize(MinimizeArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Submission language, e.g. python3
    #[arg(short, long)]
    lang: String,
    /// JSON array of {id, author, lang, files}
    #[arg(short, long)]
    manifest: PathBuf,
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    report_dir: Option<PathBuf>,
    #[arg(long)]
    java: Option<String>,
    #[arg(long)]
    jar: Option<PathBuf>,
    #[arg(long)]
    no_clustering: bool,
    #[arg(long)]
    filter_by_author: bool,
    #[arg(long)]
    ignore_unsupported_language: bool,
}

impl RunArgs {
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(dir) = &self.report_dir {
            settings.report_dir = dir.clone();
        }
        if let Some(java) = &self.java {
            settings.java_cmd = java.clone();
        }
        if let Some(jar) = &self.jar {
            settings.jplag_jar = jar.clone();
        }
        settings.clustering &= !self.no_clustering;
        settings.filter_runs_by_author |= self.filter_by_author;
        settings.ignore_unsupported_language |= self.ignore_unsupported_language;
        Ok(settings)
    }
}

#[derive(Args, Debug)]
struct MinimizeArgs {
    /// JPlag report archive
    #[arg(short, long)]
    report: PathBuf,
    #[arg(short, long)]
    manifest: PathBuf,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn run(args: RunArgs) -> Result<i32> {
    let settings = args.settings()?;
    let submissions = load_manifest(&args.manifest)
        .with_context(|| format!("loading manifest {}", args.manifest.display()))?;
    let runner = PlagRunner::new(settings)?;
    let report = runner.run(&args.lang, &submissions)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.status)
}

fn minimize(args: MinimizeArgs) -> Result<i32> {
    let submissions = load_manifest(&args.manifest)
        .with_context(|| format!("loading manifest {}", args.manifest.display()))?;
    let index = SubmissionIndex::new(submissions)?;
    let result = ReportMinimizer::new(&index).minimize(&args.report)?;
    let summary = serde_json::json!({
        "report_path": result.report_path,
        "report_min_path": result.report_min_path,
        "stats": result.stats,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(0)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    info!("Starting plagsweep v{}", env!("CARGO_PKG_VERSION"));

    let outcome = match cli.command {
        Command::Run(args) => run(args),
        Command::Minimize(args) => minimize(args),
    };
    match outcome {
        Ok(0) => Ok(()),
        Ok(status) => {
            error!(status, "detector failed");
            std::process::exit(status);
        }
        Err(e) => {
            error!("{e:#}");
            Err(e)
        }
    }
}
