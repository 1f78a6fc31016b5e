use std::path::PathBuf;

use clap::Parser;

use crate::config::ModeSetting;
use crate::platform::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(
    name = "image-review",
    version,
    about = "Review images one at a time and record accept/deny decisions"
)]
pub struct Cli {
    #[arg(long, help = "RON config file; flags below override its values")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Rater name; starts the session right away")]
    pub rater: Option<String>,
    #[arg(long, help = "Use a generated session id instead of a name")]
    pub anonymous: bool,
    #[arg(long, value_enum)]
    pub mode: Option<ModeSetting>,
    #[arg(long, help = "Decision endpoint for remote mode")]
    pub endpoint: Option<String>,
    #[arg(long, help = "Metadata CSV (http(s) URL or file path)")]
    pub metadata: Option<String>,
    #[arg(long, help = "Prefix joined with metadata filenames to locate images")]
    pub image_base: Option<String>,
    #[arg(long, help = "Number of generated items when no metadata is used")]
    pub count: Option<usize>,
    #[arg(long, help = "Fixed shuffle seed for metadata items")]
    pub seed: Option<u64>,
    #[arg(long, help = "Directory for exported CSV files")]
    pub output_dir: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
    #[arg(short, long, help = "Log at debug level")]
    pub verbose: bool,
}
