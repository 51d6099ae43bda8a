use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{DynamicImage, ImageFormat};
use log::warn;

use crate::error::PersistError;

/// Recognized image extensions, matched case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// Saves fetched images into a directory and records each one in an info file.
#[derive(Debug, Clone)]
pub struct ImagePersister {
    output_dir: PathBuf,
    info_file: PathBuf,
}

impl ImagePersister {
    pub fn new<D: Into<PathBuf>, I: Into<PathBuf>>(output_dir: D, info_file: I) -> Self {
        ImagePersister {
            output_dir: output_dir.into(),
            info_file: info_file.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn info_file(&self) -> &Path {
        &self.info_file
    }

    /// Decode `bytes`, re-encode them under a name derived from `src` and
    /// append `<name>, <alt>` to the info file. Returns the file name used.
    pub fn save(&self, bytes: &[u8], src: &str, alt: &str) -> Result<String, PersistError> {
        let file_name = derive_file_name(src);
        let path = self.output_dir.join(&file_name);

        let image = image::load_from_memory(bytes)?;
        let format = match ImageFormat::from_path(&path) {
            Ok(format) => format,
            Err(_) => image::guess_format(bytes)?,
        };
        let image = if format == ImageFormat::Jpeg {
            DynamicImage::ImageRgb8(image.to_rgb8())
        } else {
            image
        };
        image.save_with_format(&path, format)?;

        let mut info = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.info_file)?;
        writeln!(info, "{}, {}", file_name, alt)?;

        println!("Saved {} with alt text: {}", file_name, alt);
        Ok(file_name)
    }

    /// Like [`ImagePersister::save`], but failures are logged instead of returned.
    pub fn save_logged(&self, bytes: &[u8], src: &str, alt: &str) -> Option<String> {
        match self.save(bytes, src, alt) {
            Ok(file_name) => Some(file_name),
            Err(e) => {
                warn!("Error saving image {}: {}", src, e);
                None
            }
        }
    }
}

pub fn derive_file_name(src: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    derive_file_name_at(src, now)
}

/// File name for `src`: its last path segment without the query string. A URL
/// without a usable segment gets `image_<unix_secs>.jpg`; a segment without
/// any extension gets `.jpg` appended.
pub fn derive_file_name_at(src: &str, unix_secs: u64) -> String {
    let segment = src.rsplit('/').next().unwrap_or("");
    let segment = segment.split('?').next().unwrap_or("");
    let name = sanitize_file_name(segment);

    if name.is_empty() || name == "." || name == ".." {
        return format!("image_{}{}", unix_secs, DEFAULT_EXTENSION);
    }
    // A bare ".png" has no extension as far as `Path` is concerned
    if has_image_extension(&name) || has_extension(&name) {
        name
    } else {
        format!("{}{}", name, DEFAULT_EXTENSION)
    }
}

pub fn has_image_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn has_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map_or(false, |ext| !ext.is_empty())
}

// URL segments may still carry characters that are awkward on some filesystems.
fn sanitize_file_name(input: &str) -> String {
    input
        .replace(&['\\', ':', '*', '"', '<', '>', '|', '\0'][..], "_")
        .trim()
        .to_string()
}

/// Create `path` and its parents when missing.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<(), PersistError> {
    fs::create_dir_all(path.as_ref())?;
    Ok(())
}
