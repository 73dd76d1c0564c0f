use clap::{Parser, Subcommand};
use ffbatch::engine::Preset;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ffbatch")]
#[command(about = "Batch convert a folder of videos to MP4 or MP3", long_about = None)]
pub struct Cli {
    /// Folder with videos to preselect in the dashboard
    #[arg(value_name = "DIRECTORY")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Encoder binary to use instead of the configured or bundled one
    #[arg(long, global = true, value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// Output preset (overrides config)
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Output size limit in MB, 0 = unlimited (overrides config)
    #[arg(long, value_name = "MB")]
    pub size: Option<u64>,
}

/// Options shared by the commands that build jobs
#[derive(clap::Args, Debug, Clone)]
pub struct JobArgs {
    /// Output preset (defaults to the configured one)
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Output size limit in MB, 0 = unlimited
    #[arg(long, value_name = "MB")]
    pub size: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the encoder can be executed and show its version
    CheckFfmpeg,

    /// List the files that would be converted and their output names
    Scan {
        /// Folder to scan (defaults to current directory)
        directory: Option<PathBuf>,

        #[command(flatten)]
        job: JobArgs,
    },

    /// Show encoder commands without executing them
    DryRun {
        /// Folder to scan (defaults to current directory)
        directory: Option<PathBuf>,

        #[command(flatten)]
        job: JobArgs,
    },

    /// Convert a folder without the dashboard, printing the log to stdout
    Convert {
        /// Folder with the videos
        directory: PathBuf,

        #[command(flatten)]
        job: JobArgs,

        /// Overwrite existing converted_* files
        #[arg(long)]
        overwrite: bool,
    },

    /// Show config status and location, or create default config if missing
    InitConfig,
}

pub fn parse() -> Cli {
    Cli::parse()
}
