mod date;
mod record;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use selene::ephemeris::{Ayanamsa, PositionProvider, ReplayProvider};
use selene::report;
use selene::scan::ScanDriver;
use selene_config::{load_settings, SeleneSettings};
use std::path::{Path, PathBuf};

use crate::record::Recorder;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One line per interval.
    Text,
    /// The whole report as JSON.
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "List the Moon's aspects to the planets over a trading day")]
struct Args {
    /// Date to scan, DD-MM-YYYY (YYYY-MM-DD also accepted).
    #[arg(long)]
    date: String,

    /// Config file (otherwise $SELENE_CONFIG, then configs/selene.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read longitudes from a recorded JSON file instead of the ephemeris.
    #[arg(long, conflicts_with = "ephemeris_path")]
    replay: Option<PathBuf>,

    /// Save every longitude looked up during the scan as a replay file.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Swiss Ephemeris data directory (overrides [ephemeris].path).
    #[arg(long)]
    ephemeris_path: Option<PathBuf>,

    /// Ayanamsa name (overrides [ephemeris].ayanamsa).
    #[arg(long)]
    ayanamsa: Option<String>,

    /// Orb in degrees (overrides [scan].orb).
    #[arg(long)]
    orb: Option<f64>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// List every minute's hits instead of merged intervals.
    #[arg(long)]
    minutes: bool,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn apply_overrides(settings: &mut SeleneSettings, args: &Args) -> anyhow::Result<()> {
    if let Some(orb) = args.orb {
        settings.scan.orb = orb;
    }
    if let Some(name) = &args.ayanamsa {
        settings.ephemeris.ayanamsa = Ayanamsa::from_name(name).with_context(|| {
            format!("Unknown ayanamsa {name:?} (valid: {})", Ayanamsa::names().join(", "))
        })?;
    }
    if let Some(path) = &args.ephemeris_path {
        settings.ephemeris.path = Some(path.clone());
    }
    Ok(())
}

#[cfg(feature = "swiss-ephemeris")]
fn ephemeris_provider(settings: &SeleneSettings) -> anyhow::Result<Box<dyn PositionProvider>> {
    let adapter = selene::ephemeris::SwissEphemerisAdapter::new(
        settings.ephemeris.path.clone(),
        settings.ephemeris.ayanamsa,
    )?;
    Ok(Box::new(adapter))
}

#[cfg(not(feature = "swiss-ephemeris"))]
fn ephemeris_provider(_settings: &SeleneSettings) -> anyhow::Result<Box<dyn PositionProvider>> {
    anyhow::bail!(
        "moon_scan was built without the swiss-ephemeris feature; pass --replay FILE or rebuild with --features swiss-ephemeris"
    )
}

fn open_provider(settings: &SeleneSettings, replay: Option<&Path>) -> anyhow::Result<Box<dyn PositionProvider>> {
    match replay {
        Some(path) => {
            let provider = ReplayProvider::from_path(path)
                .with_context(|| format!("Failed to load replay file {}", path.display()))?;
            if provider.is_empty() {
                anyhow::bail!("Replay file {} contains no samples", path.display());
            }
            log::info!("Replaying {} samples from {}", provider.len(), path.display());
            Ok(Box::new(provider))
        }
        None => ephemeris_provider(settings),
    }
}

fn scan<P: PositionProvider>(
    settings: SeleneSettings,
    provider: P,
    date: chrono::NaiveDate,
    args: &Args,
) -> anyhow::Result<String> {
    let driver = ScanDriver::new(settings.scan, provider)?;
    if args.minutes {
        let snapshots = driver.snapshots(date)?;
        return Ok(match args.format {
            Format::Text => report::render_minutes(&snapshots),
            Format::Json => serde_json::to_string_pretty(&snapshots)?,
        });
    }
    let result = driver.run(date)?;
    Ok(match args.format {
        Format::Text => report::render_text(&result),
        Format::Json => report::render_json(&result)?,
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let date = date::parse_scan_date(&args.date)?;
    let mut settings = load_settings(args.config.as_deref())?;
    apply_overrides(&mut settings, &args)?;

    let provider = open_provider(&settings, args.replay.as_deref())?;
    let output = match &args.record {
        Some(path) => {
            let recorder = Recorder::new(provider);
            let output = scan(settings, &recorder, date, &args)?;
            recorder.save(path)?;
            output
        }
        None => scan(settings, provider, date, &args)?,
    };

    print!("{output}");
    Ok(())
}
