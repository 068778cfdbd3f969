//! sidblaster CLI: play a tune live, drive the chip hardware, or render to WAV.
//!
//! Usage:
//!   sidblaster                          play through the default audio device
//!   sidblaster --outfile song.wav       render `time` seconds to a WAV file
//!   sidblaster --hardware               step the chip directly in real time

use anyhow::{Context, Result};
use clap::Parser;
use sb_engine::{ToneEngine, TUNES};
use sb_master::{event_channel, run_session, CpalBackend, EventSender, PlayerConfig};
use std::io::BufRead;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments; each one overrides the matching config file key.
#[derive(Parser, Debug)]
#[command(name = "sidblaster")]
#[command(about = "Chiptune player with live, direct hardware and WAV output")]
#[command(version)]
struct Args {
    /// Preferences file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mono output
    #[arg(long, conflicts_with = "stereo")]
    mono: bool,

    /// Stereo output
    #[arg(long)]
    stereo: bool,

    /// Sample size in bits
    #[arg(long, value_parser = parse_bits)]
    bits: Option<u16>,

    /// Sample rate in Hz
    #[arg(long)]
    rate: Option<u32>,

    /// Length of a WAV render in seconds
    #[arg(long)]
    time: Option<u32>,

    /// Render to this WAV file instead of playing
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Drive the chip hardware directly
    #[arg(long)]
    hardware: bool,

    /// Tune number (1-based)
    #[arg(short, long, default_value_t = 1)]
    song: usize,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut PlayerConfig) {
        if self.mono {
            config.stereo = false;
        }
        if self.stereo {
            config.stereo = true;
        }
        if let Some(bits) = self.bits {
            config.audio16bit = bits == 16;
        }
        if let Some(rate) = self.rate {
            config.samplerate = rate;
        }
        if let Some(time) = self.time {
            config.time = time;
        }
        if let Some(outfile) = &self.outfile {
            config.outfile = Some(outfile.clone());
        }
        if self.hardware {
            config.hardware = true;
        }
    }
}

fn parse_bits(s: &str) -> Result<u16, String> {
    match s {
        "8" => Ok(8),
        "16" => Ok(16),
        _ => Err(format!("'{}' is not a supported sample size (8 or 16)", s)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    println!("sidblaster version {}\n", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => PlayerConfig::load(path)
            .with_context(|| format!("Couldn't load preferences from '{}'", path.display()))?,
        None => PlayerConfig::default(),
    };
    args.apply(&mut config);
    debug!(?config, "preferences");

    let format = config.audio_format().context("Invalid audio format")?;
    let song = args.song.clamp(1, TUNES.len());
    let tune = &TUNES[song - 1];

    println!("Tune       : {}", tune.name);
    let layout = if format.channels() == 2 { "stereo" } else { "mono" };
    println!(
        "Format     : {} Hz, {} bit, {}",
        format.sample_rate(),
        format.bits_per_sample(),
        layout
    );
    println!("Playing song {}/{}", song, TUNES.len());

    let (quit, events) = event_channel();
    if config.outfile.is_none() {
        watch_stdin(quit);
        println!("Press Enter to stop.");
    }

    let summary = run_session(&config, ToneEngine::new(format, tune), CpalBackend::new(), &events)
        .context("Output failed")?;

    if let Some(path) = &config.outfile {
        println!(
            "Output written to '{}' ({:.1}s of audio)",
            path.display(),
            summary.audio_seconds()
        );
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "sidblaster=debug,sb_master=debug,sb_audio=debug,sb_engine=info"
    } else {
        "sidblaster=info,sb_master=info,sb_audio=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Send a quit event when a line (or end of input) arrives on stdin.
fn watch_stdin(quit: EventSender) {
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().lock().read_line(&mut line);
        quit.quit();
    });
}
