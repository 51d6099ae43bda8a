pub mod classify;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pace;
pub mod survey;
pub mod wayback;

#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::classify::{AcceptAll, ImageClassifier};
pub use crate::error::FetchError;
pub use crate::extract::{extract_images, ImagePage, ImageRef, SourceKind};
pub use crate::fetch::{Fetch, HttpFetcher};
pub use crate::pace::{Pacer, RecordingPacer, ThreadPacer};
pub use crate::survey::{
    analyze_page, run_survey, survey_year, ColorCount, SurveyConfig, YearReport,
};
pub use crate::wayback::{resolve_snapshot, wayback_timestamp, SnapshotRef};
