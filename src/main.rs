mod analyze;
mod model;
mod report;
mod utils;

use crate::analyze::{Analyzer, EngineerScore, ImpactAnalysis};
use crate::model::{NoisyPathFilter, PullRequest, Result, ScoreConfig};
use crate::report::{write_scores, MarkdownReport, RunMetadata};
use crate::utils::{MultiProgressNew, ProgressStyleTemplate};
use chrono::{DateTime, FixedOffset, Utc};
use clap::Parser;
use futures::future;
use indicatif::{MultiProgress, ProgressBar};
use std::fs;

#[derive(Parser, Debug, Clone)]
struct Args {
    #[arg(long = "raw", default_value = "data/raw/prs.json")]
    raw_path: String,
    #[arg(long = "out", default_value = "data/processed")]
    out_dir: String,
    #[arg(long = "report", default_value = "impact-report.md")]
    report_path: String,
    #[arg(long = "include-noisy")]
    include_noisy: bool,
    #[arg(long = "top", default_value_t = 10)]
    top: usize,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    run(&args).await.unwrap()
}

async fn run(args: &Args) -> Result<()> {
    let config = ScoreConfig::default();
    config.validate()?;
    let now = Utc::now().fixed_offset();

    let prs = tokio::spawn(parse_dump(args.clone(), config.clone(), now)).await??;
    let pr_count = prs.len();

    let scores = score(prs, config, now);
    let metadata = RunMetadata::new(&args.raw_path, now, pr_count, scores.len());

    fs::create_dir_all(&args.out_dir)?;
    let scores_path = format!(
        "{}/scores_{}.json",
        args.out_dir,
        now.format("%Y%m%dT%H%M%S")
    );

    let (json_written, report_written) = future::join(
        tokio::spawn(write_json(scores_path.clone(), scores.clone(), metadata)),
        tokio::spawn(write_report(args.report_path.clone(), scores.clone())),
    )
    .await;
    json_written??;
    report_written??;

    print_top(&scores, args.top, pr_count);
    Ok(())
}

async fn parse_dump(
    args: Args,
    config: ScoreConfig,
    now: DateTime<FixedOffset>,
) -> Result<Vec<PullRequest>> {
    let multi_progress = MultiProgress::default();
    let pb = multi_progress.add_with_style(
        ProgressBar::no_length(),
        ProgressStyleTemplate::only_message(),
    );
    pb.set_message(format!("Read dump `{}` ...", args.raw_path));

    let filter = if args.include_noisy {
        None
    } else {
        Some(NoisyPathFilter::new(&config.noisy_file_patterns)?)
    };
    let prs = PullRequest::from_dump(&args.raw_path, filter.as_ref(), &now)?;

    pb.finish_with_message(format!(
        "✅ Completed parsing dump `{}` (find {} pull requests)",
        args.raw_path,
        prs.len()
    ));
    Ok(prs)
}

fn score(
    prs: Vec<PullRequest>,
    config: ScoreConfig,
    now: DateTime<FixedOffset>,
) -> Vec<EngineerScore> {
    let multi_progress = MultiProgress::default();
    let pb = multi_progress.add_with_style(
        ProgressBar::no_length(),
        ProgressStyleTemplate::only_message(),
    );
    pb.set_message("Scoring engineers ...");

    let scores = ImpactAnalysis::new(prs, config, now).score_engineers();

    pb.finish_with_message(format!(
        "✅ Completed scoring (find {} engineers)",
        scores.len()
    ));
    scores
}

async fn write_json(
    path: String,
    scores: Vec<EngineerScore>,
    metadata: RunMetadata,
) -> Result<()> {
    write_scores(&path, &scores, &metadata)?;
    println!("Saved scores to `{path}`");
    Ok(())
}

async fn write_report(path: String, scores: Vec<EngineerScore>) -> Result<()> {
    scores.report_create(&path)?;
    println!("Saved report to `{path}`");
    Ok(())
}

fn print_top(scores: &[EngineerScore], top: usize, pr_count: usize) {
    println!(
        "\nTop {} engineers by final impact (from {} merged pull requests):\n",
        top.min(scores.len()),
        pr_count
    );
    for (index, score) in scores.iter().take(top).enumerate() {
        println!(
            "  {:2}. {:<25}  impact={:8.2}  ship={:.1}  rev={:.1}  core={:.2}  weeks={}",
            index + 1,
            score.login,
            score.final_impact,
            score.total_shipping,
            score.total_reviews,
            score.core_touch_ratio,
            score.active_weeks
        );
    }
}
