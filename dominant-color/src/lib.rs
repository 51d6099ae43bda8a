pub mod aggregate;
pub mod analyze;
pub mod color;
pub mod error;
pub mod kmeans;
pub mod persist;

pub use crate::aggregate::ColorTally;
pub use crate::analyze::{dominant_color, pixel_matrix, ColorAnalyzer};
pub use crate::color::Color;
pub use crate::error::{AnalysisError, PersistError};
pub use crate::kmeans::{Clustering, KMeans};
pub use crate::persist::{derive_file_name, ensure_dir, ImagePersister};
