use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use dominant_color::{ensure_dir, ImagePersister};
use log::info;
use wayback_aesthetics::{AcceptAll, Fetch, HttpFetcher, ImageClassifier, ImagePage, SourceKind};

/// Download the images of one page and record their alt text
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Page whose images should be saved
    url: String,

    /// Directory for the saved images
    #[arg(long, default_value = "images")]
    output_dir: PathBuf,

    /// File that receives one "<file name>, <alt text>" line per image
    #[arg(long, default_value = "image_info.txt")]
    info_file: PathBuf,

    /// Timeout for every HTTP request, in seconds
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let fetcher = HttpFetcher::new(Duration::from_secs(cli.timeout_secs))?;
    ensure_dir(&cli.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", cli.output_dir.display())
    })?;
    let persister = ImagePersister::new(&cli.output_dir, &cli.info_file);

    println!("Navigating to {}...", cli.url);
    let body = fetcher
        .content(&cli.url)
        .ok_or_else(|| anyhow!("Failed to retrieve website content: {}", cli.url))?;
    let html = String::from_utf8_lossy(&body);
    let page = ImagePage::parse(&html);

    let mut found = 0;
    let mut saved = 0;
    for image in page.images() {
        found += 1;
        println!("Alt text: {}", image.alt);
        if !AcceptAll.is_relevant(&image) {
            continue;
        }
        if image.source_kind() != SourceKind::Remote {
            info!("Skipping image without a fetchable URL: {}", image.src);
            continue;
        }
        if let Some(bytes) = fetcher.content(&image.src) {
            if persister.save_logged(&bytes, &image.src, &image.alt).is_some() {
                saved += 1;
            }
        }
    }

    println!(
        "\nSaved {} of {} images to {}",
        saved,
        found,
        cli.output_dir.display()
    );
    println!("Image info appended to {}", persister.info_file().display());

    Ok(())
}
