mod groups;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod stats;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::groups::{Classifier, RuleClassifier};
use crate::input::{load_group_file, load_raw_table, require_file};
use crate::model::config::{
    AdjustPolicy, AnalysisConfig, CleaningPolicy, DEFAULT_ID_COLUMN, FailurePolicy,
    IterationDomain, ResponseVar,
};
use crate::pipeline::run_analysis;
use crate::pipeline::stage5_report::write_reports;
use crate::report::build_summary;

#[derive(Debug, Parser)]
#[command(name = "kira-partialcorr")]
#[command(version, about = "Group-aware Spearman partial correlations against an evolutionary response", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute partial correlations of every predictor with the response.
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
#[command(group(
    clap::ArgGroup::new("grouping")
        .required(true)
        .args(["groups", "builtin_groups"])
))]
struct RunArgs {
    /// Feature table (CSV, optionally .gz).
    #[arg(long)]
    input: PathBuf,
    #[arg(long, value_enum)]
    response: ResponseVar,
    /// Variable group table with `var` and `var_group` columns.
    #[arg(long)]
    groups: Option<PathBuf>,
    /// Classify variables with the built-in name rules instead of a group table.
    #[arg(long)]
    builtin_groups: bool,
    #[arg(long)]
    out: PathBuf,
    #[arg(long, default_value = DEFAULT_ID_COLUMN)]
    id_column: String,
    #[arg(long, value_enum, default_value_t = IterationDomain::Mapped)]
    domain: IterationDomain,
    #[arg(long, value_enum, default_value_t = CleaningPolicy::DropRows)]
    cleaning: CleaningPolicy,
    #[arg(long, value_enum, default_value_t = FailurePolicy::Record)]
    failure: FailurePolicy,
    /// Cap Bonferroni-adjusted p-values at 1.
    #[arg(long)]
    cap_padj: bool,
    #[arg(long)]
    threads: Option<usize>,
}

impl RunArgs {
    fn to_config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::new(self.response);
        config.id_column = self.id_column.clone();
        config.domain = self.domain;
        config.cleaning = self.cleaning;
        config.failure = self.failure;
        if self.cap_padj {
            config.adjust = AdjustPolicy::Capped;
        }
        config.threads = self.threads;
        config
    }
}

fn main() {
    logging::init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run(args) => run(&args),
    };
    if let Err(err) = result {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.to_config();
    if config.threads == Some(0) {
        return Err("--threads must be at least 1".into());
    }

    require_file(&args.input, "input table")?;
    let classifier: Box<dyn Classifier> = match &args.groups {
        Some(path) => {
            require_file(path, "group table")?;
            Box::new(load_group_file(path)?)
        }
        None => Box::new(RuleClassifier::builtin()),
    };
    let group_source = classifier.describe();
    tracing::info!("grouping variables with {group_source}");

    let raw = load_raw_table(&args.input)?;
    let output = run_analysis(&raw, &config, classifier.as_ref())?;

    let summary = build_summary(
        &output,
        &config,
        &args.input.display().to_string(),
        &group_source,
    );
    write_reports(&output.result, &summary, &args.out)?;

    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
