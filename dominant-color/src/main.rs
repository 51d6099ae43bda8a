use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dominant_color::kmeans::{DEFAULT_ATTEMPTS, DEFAULT_EPSILON, DEFAULT_MAX_ITER};
use dominant_color::{Color, ColorAnalyzer, ColorTally, KMeans};
use log::warn;

/// Print the dominant color of local image files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Image files to analyze
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Number of clusters; the center of the largest one is reported
    #[arg(long, default_value_t = 1)]
    clusters: usize,

    /// Random restarts of the clustering
    #[arg(long, default_value_t = DEFAULT_ATTEMPTS)]
    attempts: usize,

    /// Iteration limit for each restart
    #[arg(long, default_value_t = DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// Stop iterating once no center moves further than this
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if cli.clusters == 0 {
        anyhow::bail!("--clusters must be greater than 0");
    }

    let analyzer = ColorAnalyzer::new(KMeans {
        k: cli.clusters,
        max_iter: cli.max_iter,
        epsilon: cli.epsilon,
        attempts: cli.attempts,
    });

    let mut tally = ColorTally::new();
    for path in &cli.images {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read image file: {}", path.display()))?;
        match analyzer.dominant_color(&bytes) {
            Ok(color) => {
                println!("{}: {} {}", path.display(), color, color.to_hex());
                tally.add(color);
            }
            Err(e) => warn!("Error analyzing image {}: {}", path.display(), e),
        }
    }

    write_ranking(&tally, &mut io::stdout().lock())?;
    Ok(())
}

/// Frequency ranking across all analyzed files, once there is more than one.
fn write_ranking<W: Write>(tally: &ColorTally, out: &mut W) -> io::Result<()> {
    if tally.total() > 1 {
        writeln!(out)?;
        for (color, count) in tally.most_common() {
            writeln!(out, "Color: {}, Count: {}", color, count)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking(colors: &[Color]) -> String {
        let mut tally = ColorTally::new();
        for &color in colors {
            tally.add(color);
        }
        let mut out = Vec::new();
        write_ranking(&tally, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_identical_files_still_ranked() {
        let red = Color::new(255, 0, 0);
        assert_eq!(ranking(&[red, red, red]), "\nColor: (255, 0, 0), Count: 3\n");
    }

    #[test]
    fn test_single_file_has_no_ranking() {
        assert_eq!(ranking(&[Color::new(1, 2, 3)]), "");
        assert_eq!(ranking(&[]), "");
    }

    #[test]
    fn test_ranking_most_frequent_first() {
        let red = Color::new(255, 0, 0);
        let blue = Color::new(0, 0, 255);
        assert_eq!(
            ranking(&[blue, red, red]),
            "\nColor: (255, 0, 0), Count: 2\nColor: (0, 0, 255), Count: 1\n"
        );
    }
}
