//! Headline Sentiment
//!
//! Classifies the current headlines of a subreddit as positive, negative or
//! neutral, keeps the confident non-neutral ones, and optionally writes a
//! report and prints a distribution chart.

use clap::Parser;
use headline_classifiers::{build_classifier, SentimentAdapter};
use headline_cli::cli::Cli;
use headline_cli::{validate_threshold, Pipeline, RunSummary, Settings};
use headline_core::Result;
use headline_source::RedditSource;
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    // Load .env before anything reads the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("configuration failed: could not start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(summary) => {
            info!(
                "Done: {} headlines fetched, {} kept",
                summary.fetched, summary.kept
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} failed: {}", e.stage(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunSummary> {
    validate_threshold(cli.confidence_threshold)?;

    let mut settings = Settings::load(&cli.config)?;
    cli.apply(&mut settings);

    let source = RedditSource::new(settings.reddit.clone())?;
    let classifier = build_classifier(&settings.classifier).await?;
    let pipeline = Pipeline::new(Box::new(source), SentimentAdapter::new(classifier));

    let request = cli.run_request(&settings);
    let mut stdout = std::io::stdout();
    pipeline.run(&request, &mut stdout).await
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("headline=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("headline=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
