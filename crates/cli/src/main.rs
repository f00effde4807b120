use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use mta_rust_snapshot_core::{
    write_snapshot, ErrorPolicy, OutputFormat, ProjectScanner, SnapshotConfig, SummaryBuilder,
};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snapshot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Write a condensed structure snapshot of a TypeScript/React project")]
#[command(long_about = "A Rust-based tool that scans .ts/.tsx files and extracts functions, \
    React components and hooks, classes, interfaces, decorator factories and imports using \
    pattern matching. The nearest preceding /** */ comment becomes each entry's description.\n\n\
    Two files are written: a structured report (project_snapshot.json by default) and a \
    markdown rendering (project_snapshot.md).")]
pub struct Args {
    /// Project root directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Structured report format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Json)]
    pub format: OutputFormatArg,

    /// Directory for the snapshot files (defaults to the scanned root)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// TOML file overriding exclusion lists and classification keywords
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Additional ignore patterns (glob style)
    #[arg(long, action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Honor the root .gitignore
    #[arg(long)]
    pub gitignore: bool,

    /// Skip files that cannot be read as UTF-8 instead of aborting
    #[arg(long)]
    pub skip_unreadable: bool,

    /// Show verbose progress
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_config(root: PathBuf, args: &Args) -> Result<SnapshotConfig> {
    let mut config = SnapshotConfig::new(root);

    if let Some(ref path) = args.config {
        config = config
            .load_overrides(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
    }

    if !args.ignore.is_empty() {
        let mut patterns = config.ignore_patterns.clone();
        patterns.extend(args.ignore.iter().cloned());
        config = config.with_ignore_patterns(patterns);
    }
    if args.gitignore {
        config = config.with_respect_gitignore(true);
    }
    if args.skip_unreadable {
        config = config.with_error_policy(ErrorPolicy::Skip);
    }

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let root = fs::canonicalize(&args.path)
        .with_context(|| format!("Path does not exist: {}", args.path.display()))?;
    let config = build_config(root.clone(), &args)?;
    debug!(?config, "Resolved configuration");

    println!("Scanning project in: {}", root.display());

    let spinner = if args.verbose {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Invalid progress template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Scanning project...");
        Some(pb)
    } else {
        None
    };

    let builder = SummaryBuilder::new(&config);
    let scanner = ProjectScanner::new(config).context("Failed to create scanner")?;
    let scan = scanner.scan().context("Failed to scan project")?;
    let report = builder.build(&scan.files);

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Scanned {} files, kept {}, skipped {}; {} report entries",
            scan.stats.files_visited,
            scan.stats.files_retained,
            scan.stats.files_skipped,
            report.entry_count()
        ));
    }

    let output_dir = args.output_dir.clone().unwrap_or(root);
    let paths = write_snapshot(&report, &output_dir, args.format.clone().into())
        .context("Failed to write snapshot")?;

    println!("Project snapshot written to: {}", paths.report.display());
    println!("AI-friendly snapshot written to: {}", paths.markdown.display());

    Ok(())
}
