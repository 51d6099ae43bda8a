use image::{DynamicImage, RgbImage};
use ndarray::Array2;
use rand::Rng;

use crate::color::Color;
use crate::error::AnalysisError;
use crate::kmeans::KMeans;

/// Reduces an image to a single representative color by clustering its pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorAnalyzer {
    kmeans: KMeans,
}

impl ColorAnalyzer {
    pub fn new(kmeans: KMeans) -> Self {
        ColorAnalyzer { kmeans }
    }

    /// Decode `bytes` and return the center of the most populated pixel cluster.
    pub fn dominant_color(&self, bytes: &[u8]) -> Result<Color, AnalysisError> {
        self.dominant_color_with(bytes, &mut rand::rng())
    }

    pub fn dominant_color_with<R: Rng + ?Sized>(
        &self,
        bytes: &[u8],
        rng: &mut R,
    ) -> Result<Color, AnalysisError> {
        let image = image::load_from_memory(bytes)?;
        self.dominant_color_of(&image, rng)
    }

    pub fn dominant_color_of<R: Rng + ?Sized>(
        &self,
        image: &DynamicImage,
        rng: &mut R,
    ) -> Result<Color, AnalysisError> {
        let pixels = pixel_matrix(&image.to_rgb8());
        let clustering = self
            .kmeans
            .fit(pixels.view(), rng)
            .ok_or(AnalysisError::Empty)?;
        let center = clustering.centers.row(clustering.largest_cluster());
        Ok(Color::from_center(center))
    }
}

/// Dominant color with the default k = 1 clustering.
pub fn dominant_color(bytes: &[u8]) -> Result<Color, AnalysisError> {
    ColorAnalyzer::default().dominant_color(bytes)
}

/// One row per pixel, one column per channel.
pub fn pixel_matrix(image: &RgbImage) -> Array2<f64> {
    let raw = image.as_raw();
    Array2::from_shape_fn((raw.len() / 3, 3), |(pixel, channel)| {
        f64::from(raw[pixel * 3 + channel])
    })
}
