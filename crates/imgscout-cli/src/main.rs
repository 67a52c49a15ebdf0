//! Command-line interface for downloading high-resolution search images.

mod logging;

use clap::{Parser, ValueEnum};
use imgscout_core::{DownloadRequest, DownloadStatus, ImageType, Settings};
use imgscout_downloader::ImageDownloader;
use std::path::PathBuf;
use std::process::ExitCode;

/// Download high-resolution images from an image search engine.
#[derive(Parser)]
#[command(name = "imgscout", version, about)]
struct Cli {
    /// Search query for images
    query: String,

    /// Number of images to download
    #[arg(short = 'n', long = "num", default_value_t = 5)]
    num: usize,

    /// Minimum file size in KB
    #[arg(short = 's', long = "size", default_value_t = 180)]
    size: u64,

    /// Image type filter
    #[arg(short = 't', long = "type", value_enum, default_value_t = CliImageType::Photo)]
    image_type: CliImageType,

    /// Output directory
    #[arg(short, long, default_value = "images")]
    output: PathBuf,

    /// Log directory
    #[arg(short, long, default_value = "logs")]
    logs: PathBuf,

    /// Optional TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CliImageType {
    All,
    Photo,
    Clipart,
    Lineart,
    Gif,
}

impl From<CliImageType> for ImageType {
    fn from(cli_type: CliImageType) -> Self {
        match cli_type {
            CliImageType::All => ImageType::All,
            CliImageType::Photo => ImageType::Photo,
            CliImageType::Clipart => ImageType::Clipart,
            CliImageType::Lineart => ImageType::Lineart,
            CliImageType::Gif => ImageType::Gif,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The guard owns the log-file writer for the duration of the run.
    let _guard = match logging::init(&cli.logs, cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to set up logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let settings = match Settings::load_with_env(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    let request = match DownloadRequest::new(
        cli.query,
        cli.num,
        cli.size * 1024,
        cli.image_type.into(),
    ) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let downloader = match ImageDownloader::new(&cli.output, settings) {
        Ok(downloader) => downloader,
        Err(e) => {
            tracing::error!("Failed to create downloader: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "[*] Searching for '{}' and downloading {} images...",
        request.query, request.target_count
    );

    let result = downloader.download_images(&request).await;

    match result.status {
        DownloadStatus::Success => {
            println!(
                "\n[+] Successfully downloaded {} images.",
                result.downloaded_count
            );
            for file in &result.files {
                println!("  - {}", file.display());
            }
            ExitCode::SUCCESS
        }
        DownloadStatus::Error => {
            println!(
                "\n[-] Error occurred: {}",
                result.error.as_deref().unwrap_or("unknown error")
            );
            ExitCode::FAILURE
        }
    }
}
