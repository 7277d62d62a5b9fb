use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tourguide::{ExpireDate, FileStorage, FixedClock, GuideConfig, Lang, Size, TourController};

use crate::error::{DemoError, Result};
use crate::page::PageLayout;
use crate::replay::Replay;
use crate::script::parse_script;

#[derive(Debug, Parser)]
#[command(
    name = "tourguide-demo",
    about = "Replay a guided tour against a static page layout and print what a presenter would draw",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a guide and replay a navigation script, one JSON line per action.
    Run(RunArgs),

    /// Check a guide file and list every problem found.
    Validate(ValidateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Guide definition (.toml or .json).
    #[arg(long)]
    pub guide: PathBuf,

    /// Page layout JSON. Without one, an empty 1280x800 page is used.
    #[arg(long)]
    pub page: Option<PathBuf>,

    /// Inline script, e.g. "start next next".
    #[arg(long, conflicts_with = "script_file")]
    pub script: Option<String>,

    /// Read the script from a file.
    #[arg(long)]
    pub script_file: Option<PathBuf>,

    /// Modal size the presenter measures, as WIDTHxHEIGHT.
    #[arg(long, default_value = "320x160", value_parser = parse_size)]
    pub modal: Size,

    /// Persist "seen" flags in this JSON file across runs.
    #[arg(long)]
    pub storage: Option<PathBuf>,

    /// Pretend the current time is this (RFC 3339 or YYYY-MM-DD).
    #[arg(long)]
    pub now: Option<String>,

    /// Override the guide's locale.
    #[arg(long)]
    pub lang: Option<String>,

    /// Write JSONL here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Guide definition (.toml or .json).
    #[arg(long)]
    pub guide: PathBuf,
}

fn parse_size(s: &str) -> std::result::Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let width: i32 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let height: i32 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    if width <= 0 || height <= 0 {
        return Err(format!("size must be positive, got {s:?}"));
    }
    Ok(Size::new(width, height))
}

fn load_guide(path: &Path) -> Result<GuideConfig> {
    if !path.exists() {
        return Err(DemoError::MissingPath {
            path: path.to_path_buf(),
        });
    }
    Ok(GuideConfig::from_file(path)?)
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => {
            let out: Box<dyn Write> = match &args.output {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(io::stdout().lock()),
            };
            run_replay(&args, out)
        }
        Commands::Validate(args) => run_validate(&args),
    }
}

pub fn run_replay<W: Write>(args: &RunArgs, mut out: W) -> Result<()> {
    let config = load_guide(&args.guide)?;
    let mut guide = config.to_guide()?;
    if let Some(lang) = &args.lang {
        guide.lang = lang.parse::<Lang>().map_err(DemoError::invalid)?;
    }

    let page = match &args.page {
        Some(path) => PageLayout::from_file(path)?,
        None => PageLayout::default(),
    };
    let host = page.build_host()?;

    let script = match (&args.script, &args.script_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => "start".to_string(),
    };
    let tokens = parse_script(&script)?;

    let mut tour = TourController::new(guide, host);
    if let Some(path) = &args.storage {
        tour = tour.with_storage(Arc::new(FileStorage::new(path)));
    }
    if let Some(now) = &args.now {
        let now = ExpireDate::parse(now).map_err(|e| DemoError::invalid(e.to_string()))?;
        tour = tour.with_clock(Arc::new(FixedClock(now.instant())));
    }

    tracing::info!(
        message = "demo.replay_start",
        guide = %args.guide.display(),
        steps = tour.guide().len(),
        actions = tokens.len()
    );
    Replay::new(tour, args.modal).run(&tokens, &mut out)?;
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    let config = load_guide(&args.guide)?;
    let problems = config.validate();
    if !problems.is_empty() {
        return Err(DemoError::Invalid { problems });
    }
    println!(
        "{}: ok ({} steps)",
        args.guide.display(),
        config.steps.len()
    );
    Ok(())
}
