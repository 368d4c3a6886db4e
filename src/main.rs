use anyhow::{Context, Result};
use clap::Parser;
use silhouette_classifier::classifiers::knn::{DEFAULT_CLASS_NEIGHBORS, DEFAULT_MAX_NEIGHBORS};
use silhouette_classifier::classifiers::random_trees::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_ERROR, DEFAULT_MAX_TREES, TermCriteria,
};
use silhouette_classifier::config::RunConfig;
use silhouette_classifier::features::FeatureMethod;
use silhouette_classifier::silhouette::{ColorMode, ThresholdType};
use silhouette_classifier::tasks::run_session;
use std::io;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "silhouette-classifier")]
#[command(
    version,
    about = "Train shape classifiers on silhouettes, then score queries read from stdin",
    long_about = None
)]
struct Cli {
    /// Directory with one subdirectory of image pairs per category
    #[arg(long)]
    path: Option<PathBuf>,

    /// Shape descriptor: hu (classical_moments) or granlund
    #[arg(long)]
    method: Option<FeatureMethod>,

    /// Foreground cutoff, or the statistic multiplier with --auto-threshold
    #[arg(long)]
    threshold: Option<f64>,

    /// 1 reads a threshold per sample instead of --threshold
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    optparam: u8,

    /// Pixel comparison: c (color) or g (gray)
    #[arg(long, default_value_t = ColorMode::Color)]
    approach: ColorMode,

    /// Statistic for automatic cutoffs: m (median) or a (mean)
    #[arg(long, default_value_t = ThresholdType::Median)]
    threshtype: ThresholdType,

    /// Derive the cutoff from the difference map statistic
    #[arg(long)]
    auto_threshold: bool,

    #[arg(long, default_value_t = DEFAULT_MAX_NEIGHBORS)]
    nmax: usize,

    /// Neighbours consulted by KNN, at most --nmax
    #[arg(long, default_value_t = DEFAULT_CLASS_NEIGHBORS)]
    nclass: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    maxdepth: usize,

    /// Forest stopping rule: 0 (iteration), 1 (epsilon) or 2 (both)
    #[arg(long, default_value_t = TermCriteria::Both)]
    criteria: TermCriteria,

    #[arg(long, default_value_t = DEFAULT_MAX_TREES)]
    maxtrees: usize,

    /// Out-of-bag error at which the forest stops growing
    #[arg(long, default_value_t = DEFAULT_MAX_ERROR)]
    maxerror: f64,

    /// Seed for the random trees
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Leave out training samples that fail instead of aborting
    #[arg(long)]
    skip_bad_samples: bool,

    /// Write the final accuracy report to this JSON file
    #[arg(long)]
    report: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            path: self.path.clone(),
            method: self.method,
            threshold: self.threshold,
            param_flag: self.optparam == 1,
            approach: self.approach,
            threshtype: self.threshtype,
            auto_threshold: self.auto_threshold,
            nmax: self.nmax,
            nclass: self.nclass,
            maxdepth: self.maxdepth,
            criteria: self.criteria,
            maxtrees: self.maxtrees,
            maxerror: self.maxerror,
            seed: self.seed,
            skip_bad_samples: self.skip_bad_samples,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let config = cli.run_config();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let report = run_session(&config, stdin.lock(), stdout.lock()).map_err(|e| {
        let stage = if e.is_config() {
            "invalid configuration"
        } else {
            "run failed"
        };
        anyhow::Error::new(e).context(stage)
    })?;

    if let Some(path) = &cli.report {
        report
            .export_json(path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install logger")
}
