use std::io::{self, Write};
use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::{bail, Result};
use dominant_color::{Color, ColorAnalyzer, ColorTally};
use log::{debug, warn};
use serde::Serialize;

use crate::classify::ImageClassifier;
use crate::error::FetchError;
use crate::extract::{ImagePage, SourceKind};
use crate::fetch::{Fetch, DEFAULT_TIMEOUT};
use crate::pace::Pacer;
use crate::wayback::{resolve_snapshot, wayback_timestamp, SnapshotRef, WAYBACK_AVAILABLE_URL};

pub const DEFAULT_TARGET_URL: &str = "https://www.nike.com";
pub const DEFAULT_START_YEAR: i32 = 2020;
pub const DEFAULT_END_YEAR: i32 = 2023;
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct SurveyConfig {
    pub target_url: String,
    pub start_year: i32,
    pub end_year: i32,
    pub index_endpoint: String,
    pub request_timeout: Duration,
    /// Wait after every year, found or not.
    pub pause: Duration,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        SurveyConfig {
            target_url: DEFAULT_TARGET_URL.to_string(),
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            index_endpoint: WAYBACK_AVAILABLE_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            pause: DEFAULT_PAUSE,
        }
    }
}

impl SurveyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.target_url.trim().is_empty() {
            bail!("Target URL must not be empty");
        }
        if self.start_year > self.end_year {
            bail!(
                "Start year {} is after end year {}",
                self.start_year,
                self.end_year
            );
        }
        wayback_timestamp(self.start_year, 1, 1)?;
        wayback_timestamp(self.end_year, 1, 1)?;
        Ok(())
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorCount {
    pub rgb: [u8; 3],
    pub hex: String,
    pub count: usize,
}

impl ColorCount {
    pub fn new(color: Color, count: usize) -> Self {
        ColorCount {
            rgb: color.channels(),
            hex: color.to_hex(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearReport {
    pub year: i32,
    pub snapshot: SnapshotRef,
    /// Descending by count.
    pub colors: Vec<ColorCount>,
}

/// Dominant colors of the relevant images on one page.
pub fn analyze_page<F, C, W>(
    fetcher: &F,
    analyzer: &ColorAnalyzer,
    classifier: &C,
    html: &str,
    out: &mut W,
) -> io::Result<ColorTally>
where
    F: Fetch + ?Sized,
    C: ImageClassifier + ?Sized,
    W: Write,
{
    let page = ImagePage::parse(html);
    let mut tally = ColorTally::new();

    for image in page.images() {
        writeln!(out, "Alt text: {}", image.alt)?;
        if !classifier.is_relevant(&image) {
            debug!("Ignoring image {}", image.src);
            continue;
        }

        // Only absolute URLs are fetched
        match image.source_kind() {
            SourceKind::Remote => match fetcher.fetch(&image.src) {
                Ok(bytes) => match analyzer.dominant_color(&bytes) {
                    Ok(color) => {
                        debug!("Dominant color of {}: {}", image.src, color);
                        tally.add(color);
                    }
                    Err(e) => warn!("Error analyzing image {}: {}", image.src, e),
                },
                Err(FetchError::Status(code)) => {
                    writeln!(out, "Skipping image, HTTP status code: {}", code)?
                }
                Err(e) => warn!("Error fetching image {}: {}", image.src, e),
            },
            SourceKind::Inline => writeln!(out, "Skipping base64 encoded image")?,
            SourceKind::Unsupported => {
                writeln!(out, "Skipping unsupported image URL format: {}", image.src)?
            }
        }
    }

    Ok(tally)
}

/// Resolve, fetch and analyze the January 1 snapshot of `year`.
pub fn survey_year<F, C, W>(
    config: &SurveyConfig,
    fetcher: &F,
    analyzer: &ColorAnalyzer,
    classifier: &C,
    year: i32,
    out: &mut W,
) -> Result<YearReport>
where
    F: Fetch + ?Sized,
    C: ImageClassifier + ?Sized,
    W: Write,
{
    let url = &config.target_url;
    writeln!(out, "Processing {} for year {}...", url, year)?;

    // Ask the archive for the capture closest to January 1
    let timestamp = wayback_timestamp(year, 1, 1)?;
    let snapshot = resolve_snapshot(fetcher, &config.index_endpoint, url, &timestamp);
    let mut colors = Vec::new();

    match &snapshot.archive_url {
        Some(archive_url) => {
            match fetcher.fetch(archive_url) {
                Ok(body) => {
                    let html = String::from_utf8_lossy(&body);
                    let tally = analyze_page(fetcher, analyzer, classifier, &html, out)?;

                    // Most frequent colors first
                    for (color, count) in tally.most_common() {
                        writeln!(out, "Color: {}, Count: {}", color, count)?;
                        colors.push(ColorCount::new(color, count));
                    }
                }
                Err(FetchError::Status(code)) => writeln!(
                    out,
                    "Failed to retrieve website content, HTTP status code: {}",
                    code
                )?,
                Err(e) => writeln!(out, "Error retrieving website: {}", e)?,
            }
            writeln!(out, "Website snapshot for {} in {}: {}", url, year, archive_url)?;
        }
        None => writeln!(out, "No website snapshot found for {} in {}", url, year)?,
    }

    Ok(YearReport {
        year,
        snapshot,
        colors,
    })
}

/// Survey every configured year in ascending order, pausing after each one.
pub fn run_survey<F, C, P, W>(
    config: &SurveyConfig,
    fetcher: &F,
    analyzer: &ColorAnalyzer,
    classifier: &C,
    pacer: &mut P,
    out: &mut W,
) -> Result<Vec<YearReport>>
where
    F: Fetch + ?Sized,
    C: ImageClassifier + ?Sized,
    P: Pacer + ?Sized,
    W: Write,
{
    config.validate()?;

    let mut reports = Vec::new();
    for year in config.years() {
        let report = survey_year(config, fetcher, analyzer, classifier, year, out)?;
        reports.push(report);
        pacer.pause(config.pause);
    }
    Ok(reports)
}
