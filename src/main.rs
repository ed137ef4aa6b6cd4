//! simulcast - multi-platform stream launcher CLI

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use simulcast::broadcast::Credentials;
use simulcast::config::{AppConfig, Args, Command, TestModeArg};
use simulcast::device::{DeviceEnumerator, DeviceSelection};
use simulcast::session::{StreamController, TestMode};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args)?;

    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_default()?,
    };

    // Execute command
    match args.command.unwrap_or_default() {
        Command::Devices {
            video_only,
            audio_only,
        } => cmd_devices(&config, video_only, audio_only),
        Command::Start {
            youtube_key,
            facebook_key,
            camera,
            mic,
            test_mode,
        } => cmd_start(config, youtube_key, facebook_key, camera, mic, test_mode),
        Command::Config { write } => cmd_config(write),
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let level = args.log_level();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if let Some(log_file) = &args.log {
        let file = std::fs::File::create(log_file)?;
        subscriber.with_writer(file).init();
    } else {
        subscriber.init();
    }

    Ok(())
}

/// List capture devices reported by the listing tool
fn cmd_devices(config: &AppConfig, video_only: bool, audio_only: bool) -> Result<()> {
    let devices = DeviceEnumerator::new(&config.ffmpeg_path).enumerate();

    if devices.is_empty() {
        println!("No capture devices found.");
        println!(
            "(device listing tool: {})",
            config.ffmpeg_path.display()
        );
        return Ok(());
    }

    if !audio_only {
        println!("Video devices:\n");
        for (i, name) in devices.video.iter().enumerate() {
            println!("  {}. {}", i + 1, name);
        }
        println!();
    }

    if !video_only {
        println!("Audio devices:\n");
        for (i, name) in devices.audio.iter().enumerate() {
            println!("  {}. {}", i + 1, name);
        }
        println!();
    }

    Ok(())
}

/// Write broadcaster configuration and run a streaming session
fn cmd_start(
    config: AppConfig,
    youtube_key: Option<String>,
    facebook_key: Option<String>,
    camera: Option<String>,
    mic: Option<String>,
    test_mode: TestModeArg,
) -> Result<()> {
    println!("simulcast - multi-platform stream launcher\n");

    let mut controller = StreamController::new(config.clone());
    controller.audit().append("App started")?;

    // Keys from the command line win; saved keys prefill the rest
    let saved = Credentials::load(&config.credentials_file);
    let credentials = Credentials {
        youtube: youtube_key.unwrap_or(saved.youtube),
        facebook: facebook_key.unwrap_or(saved.facebook),
    };

    // Unselected devices default to the first of each kind
    let devices = controller.load_devices()?;
    let selection = DeviceSelection {
        video: camera
            .or_else(|| devices.video.first().cloned())
            .unwrap_or_default(),
        audio: mic
            .or_else(|| devices.audio.first().cloned())
            .unwrap_or_default(),
    };

    let test_mode = match test_mode {
        TestModeArg::Off => TestMode::Off,
        TestModeArg::SkipSpawn => TestMode::SkipSpawn,
        TestModeArg::SkipAll => TestMode::SkipAll,
    };

    controller.start_stream(&credentials, &selection, test_mode)?;

    if test_mode == TestMode::SkipAll {
        println!("Test mode (skip-all): credentials validated, nothing written.");
        return Ok(());
    }

    if !selection.video.is_empty() || !selection.audio.is_empty() {
        println!("Camera:     {}", selection.video);
        println!("Microphone: {}", selection.audio);
    }
    if test_mode == TestMode::SkipSpawn {
        println!("\nTest mode: configuration written, broadcaster not launched.");
    }
    println!("\nStreaming. Press Ctrl+C to stop.\n");

    // Setup Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    let _ = ctrlc::set_handler(move || {
        println!("\nReceived Ctrl+C, stopping...");
        r.store(false, Ordering::SeqCst);
    });

    // Re-render elapsed time roughly once per second until stop is
    // requested or the broadcaster exits on its own
    while running.load(Ordering::SeqCst) && controller.is_streaming() {
        if let Some(elapsed) = controller.timer_display() {
            print!("\r  Elapsed: {} ", elapsed);
            let _ = std::io::stdout().flush();
        }
        std::thread::sleep(std::time::Duration::from_secs(1));
    }
    println!();

    controller.stop_stream()?;
    println!("Stopped.");

    Ok(())
}

/// Print or write a sample configuration file
fn cmd_config(write: Option<PathBuf>) -> Result<()> {
    let sample = AppConfig::sample_config();

    match write {
        Some(path) => {
            std::fs::write(&path, sample)
                .with_context(|| format!("failed to write sample config to {:?}", path))?;
            println!("Wrote sample config to {}", path.display());
        }
        None => print!("{}", sample),
    }

    Ok(())
}
