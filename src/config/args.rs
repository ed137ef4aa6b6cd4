//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// simulcast - multi-platform stream launcher
///
/// Configure OBS to stream to YouTube and Facebook simultaneously
#[derive(Parser, Debug)]
#[command(name = "simulcast")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the simulcast.toml configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode - only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log output to file
    #[arg(long, global = true)]
    pub log: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List capture devices reported by the device-listing tool
    Devices {
        /// Show only video devices
        #[arg(long)]
        video_only: bool,

        /// Show only audio devices
        #[arg(long)]
        audio_only: bool,
    },

    /// Write broadcaster configuration and start streaming
    Start {
        /// YouTube stream key (falls back to the saved credentials file)
        #[arg(long)]
        youtube_key: Option<String>,

        /// Facebook stream key (falls back to the saved credentials file)
        #[arg(long)]
        facebook_key: Option<String>,

        /// Camera device name (defaults to the first enumerated camera)
        #[arg(long)]
        camera: Option<String>,

        /// Microphone device name (defaults to the first enumerated microphone)
        #[arg(long)]
        mic: Option<String>,

        /// Test mode: skip-spawn writes configs without launching the
        /// broadcaster, skip-all stops after validating keys
        #[arg(long, value_enum, default_value = "off")]
        test_mode: TestModeArg,
    },

    /// Print a sample configuration file
    Config {
        /// Write the sample to this path instead of stdout
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

/// Test-mode selector for the start command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestModeArg {
    /// Normal operation
    Off,
    /// Write all configuration but do not launch the broadcaster
    SkipSpawn,
    /// Validate credentials only; write nothing, launch nothing
    SkipAll,
}

impl Args {
    /// Get the log level based on verbose/quiet flags
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else {
            match self.verbose {
                0 => tracing::Level::INFO,
                1 => tracing::Level::DEBUG,
                _ => tracing::Level::TRACE,
            }
        }
    }
}

impl Default for Command {
    fn default() -> Self {
        Command::Devices {
            video_only: false,
            audio_only: false,
        }
    }
}
