use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dominant_color::ColorAnalyzer;
use wayback_aesthetics::survey::{
    DEFAULT_END_YEAR, DEFAULT_START_YEAR, DEFAULT_TARGET_URL,
};
use wayback_aesthetics::wayback::WAYBACK_AVAILABLE_URL;
use wayback_aesthetics::{run_survey, AcceptAll, HttpFetcher, SurveyConfig, ThreadPacer};

/// Track the dominant image colors of a website's archived snapshots year by year
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Website to survey
    #[arg(long, default_value = DEFAULT_TARGET_URL)]
    url: String,

    /// First year to survey
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    start_year: i32,

    /// Last year to survey (inclusive)
    #[arg(long, default_value_t = DEFAULT_END_YEAR)]
    end_year: i32,

    /// Archive availability endpoint
    #[arg(long, default_value = WAYBACK_AVAILABLE_URL)]
    index_endpoint: String,

    /// Timeout for every HTTP request, in seconds
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,

    /// Pause after each year, in seconds
    #[arg(long, default_value_t = 10)]
    pause_secs: u64,

    /// Also write the yearly results as JSON to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> SurveyConfig {
        SurveyConfig {
            target_url: self.url.clone(),
            start_year: self.start_year,
            end_year: self.end_year,
            index_endpoint: self.index_endpoint.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            pause: Duration::from_secs(self.pause_secs),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = cli.config();
    config.validate()?;

    let fetcher = HttpFetcher::new(config.request_timeout)?;
    let analyzer = ColorAnalyzer::default();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let reports = run_survey(
        &config,
        &fetcher,
        &analyzer,
        &AcceptAll,
        &mut ThreadPacer,
        &mut out,
    )?;

    if let Some(path) = &cli.report {
        let json =
            serde_json::to_string_pretty(&reports).context("Failed to serialize survey report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;
        println!("\nReport saved to {}", path.display());
    }

    Ok(())
}
