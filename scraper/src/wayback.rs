use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::{info, warn};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::fetch::Fetch;

pub const WAYBACK_AVAILABLE_URL: &str = "http://archive.org/wayback/available";

/// The outcome of asking the archive for the capture closest to a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotRef {
    pub url: String,
    pub timestamp: String,
    pub archive_url: Option<String>,
    /// Timestamp of the capture itself, as reported by the archive.
    pub captured_at: Option<String>,
    pub capture_status: Option<String>,
}

impl SnapshotRef {
    pub fn new(url: &str, timestamp: &str) -> Self {
        SnapshotRef {
            url: url.to_string(),
            timestamp: timestamp.to_string(),
            archive_url: None,
            captured_at: None,
            capture_status: None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.archive_url.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct Availability {
    archived_snapshots: Option<ArchivedSnapshots>,
}

#[derive(Debug, Deserialize)]
struct ArchivedSnapshots {
    closest: Option<ClosestSnapshot>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ClosestSnapshot {
    pub url: String,
    pub timestamp: Option<String>,
    pub status: Option<String>,
    pub available: Option<bool>,
}

/// `YYYYMMDD` for a calendar date.
pub fn wayback_timestamp(year: i32, month: u32, day: u32) -> Result<String> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("Invalid date: {}-{:02}-{:02}", year, month, day))?;
    Ok(date.format("%Y%m%d").to_string())
}

pub fn availability_query(endpoint: &str, url: &str, timestamp: &str) -> Result<Url> {
    Url::parse_with_params(endpoint, &[("url", url), ("timestamp", timestamp)])
        .map_err(|e| anyhow!("Invalid archive index endpoint {}: {}", endpoint, e))
}

/// Closest capture in an availability response, if the response has one.
pub fn parse_availability(body: &[u8]) -> Option<ClosestSnapshot> {
    match serde_json::from_slice::<Availability>(body) {
        Ok(availability) => availability.archived_snapshots.and_then(|s| s.closest),
        Err(e) => {
            warn!("Unexpected archive index response: {}", e);
            None
        }
    }
}

/// Ask the archive index at `endpoint` for the capture of `url` closest to
/// `timestamp`. Every failure yields a `SnapshotRef` without an archive URL.
pub fn resolve_snapshot<F: Fetch + ?Sized>(
    fetcher: &F,
    endpoint: &str,
    url: &str,
    timestamp: &str,
) -> SnapshotRef {
    let mut snapshot = SnapshotRef::new(url, timestamp);

    let query = match availability_query(endpoint, url, timestamp) {
        Ok(query) => query,
        Err(e) => {
            warn!("{}", e);
            return snapshot;
        }
    };

    let body = match fetcher.fetch(query.as_str()) {
        Ok(body) => body,
        Err(e) => {
            warn!("Failed to retrieve archive snapshot: {}", e);
            return snapshot;
        }
    };

    match parse_availability(&body) {
        Some(closest) => {
            info!("Closest capture of {} to {}: {}", url, timestamp, closest.url);
            snapshot.archive_url = Some(closest.url);
            snapshot.captured_at = closest.timestamp;
            snapshot.capture_status = closest.status;
        }
        None => info!("Archive has no capture of {} near {}", url, timestamp),
    }
    snapshot
}
