use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::{DEFAULT_SOURCE_DIR, MAN_ARCHIVE_URL};

#[derive(Parser)]
#[command(name = "man-processor")]
#[command(about = "Maritime Aerosol Network measurement archive processor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the MAN archive, normalize it and load the measurement store
    Ingest {
        #[arg(short, long, default_value = DEFAULT_SOURCE_DIR, help = "Unpacked archive directory")]
        source_dir: PathBuf,

        #[arg(long, default_value = MAN_ARCHIVE_URL, help = "Upstream archive URL")]
        url: String,

        #[arg(long, default_value = "false", help = "Never fetch, use the local source directory")]
        skip_download: bool,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, default_value = "false", help = "Memory-map raw files while parsing")]
        use_mmap: bool,

        #[arg(long, help = "Directory for the per-run failure log")]
        log_dir: Option<PathBuf>,
    },

    /// Export filtered measurements as a downloadable archive
    Export {
        #[arg(short, long, help = "JSON request file")]
        request: PathBuf,

        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        #[arg(short, long, default_value = DEFAULT_SOURCE_DIR, help = "Unpacked archive directory")]
        source_dir: PathBuf,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },

    /// List known sites with their date spans as JSON
    Sites {
        #[arg(short, long, default_value = DEFAULT_SOURCE_DIR, help = "Unpacked archive directory")]
        source_dir: PathBuf,

        #[arg(long, help = "Window start (YYYY-MM-DD)")]
        start_date: Option<NaiveDate>,

        #[arg(long, help = "Window end (YYYY-MM-DD)")]
        end_date: Option<NaiveDate>,

        #[arg(long)]
        min_lat: Option<f64>,

        #[arg(long)]
        min_lng: Option<f64>,

        #[arg(long)]
        max_lat: Option<f64>,

        #[arg(long)]
        max_lng: Option<f64>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },
}
