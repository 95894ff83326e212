use anyhow::Context;
use chrono::{Duration, FixedOffset, NaiveTime};
use selene::aspects::Body;
use selene::ephemeris::{Ayanamsa, EphemerisError};
use selene::scan::ScanConfig;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SELENE_CONFIG";

const SEARCH_PATHS: [&str; 2] = ["configs/selene.toml", "../../configs/selene.toml"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EphemerisSettings {
    pub ayanamsa: Ayanamsa,
    /// Swiss Ephemeris data directory; `None` leaves the choice to the adapter
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeleneSettings {
    pub scan: ScanConfig,
    pub ephemeris: EphemerisSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScanToml {
    #[serde(default)]
    orb: Option<f64>,
    #[serde(default)]
    window_start: Option<String>,
    #[serde(default)]
    window_end: Option<String>,
    #[serde(default)]
    step_minutes: Option<i64>,
    #[serde(default)]
    utc_offset: Option<String>,
    #[serde(default)]
    bodies: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct EphemerisToml {
    #[serde(default = "default_ayanamsa")]
    ayanamsa: String,
    #[serde(default)]
    path: Option<PathBuf>,
}

fn default_ayanamsa() -> String {
    "lahiri".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    scan: Option<ScanToml>,
    #[serde(default)]
    ephemeris: Option<EphemerisToml>,
}

/// Parse a wall-clock time such as `09:15` or `09:15:30`.
pub fn parse_clock(text: &str) -> anyhow::Result<NaiveTime> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .with_context(|| format!("Invalid time of day {text:?}, expected HH:MM"))
}

/// Parse a UTC offset of the form `+05:30`, `-04:00` or `Z`.
pub fn parse_utc_offset(text: &str) -> anyhow::Result<FixedOffset> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("z") || text.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).context("UTC offset out of range");
    }
    text.parse::<FixedOffset>()
        .map_err(|e| anyhow::anyhow!("Invalid UTC offset {text:?}, expected +HH:MM or -HH:MM: {e}"))
}

fn parse_bodies(names: &[String]) -> anyhow::Result<Vec<Body>> {
    names
        .iter()
        .map(|name| {
            Body::from_name(name).with_context(|| {
                let valid: Vec<&str> = Body::ALL.iter().map(|body| body.name()).collect();
                format!("Unknown body {name:?} in [scan].bodies (valid: {})", valid.join(", "))
            })
        })
        .collect()
}

fn parse_ayanamsa(name: &str) -> Result<Ayanamsa, EphemerisError> {
    Ayanamsa::from_name(name).ok_or_else(|| EphemerisError::InvalidAyanamsa {
        ayanamsa: name.to_string(),
        valid: Ayanamsa::names(),
    })
}

/// Build settings from TOML text. Absent keys keep their defaults.
pub fn parse_settings(text: &str) -> anyhow::Result<SeleneSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse selene config: {e}"))?;
    let mut settings = SeleneSettings::default();

    if let Some(scan) = root.scan {
        let ScanToml {
            orb,
            window_start,
            window_end,
            step_minutes,
            utc_offset,
            bodies,
        } = scan;
        let config = &mut settings.scan;
        if let Some(orb) = orb {
            config.orb = orb;
        }
        if let Some(start) = window_start {
            config.window_start = parse_clock(&start).context("[scan].window_start")?;
        }
        if let Some(end) = window_end {
            config.window_end = parse_clock(&end).context("[scan].window_end")?;
        }
        if let Some(step) = step_minutes {
            config.step = Duration::try_minutes(step)
                .with_context(|| format!("[scan].step_minutes {step} is out of range"))?;
        }
        if let Some(offset) = utc_offset {
            config.utc_offset = parse_utc_offset(&offset).context("[scan].utc_offset")?;
        }
        if let Some(bodies) = bodies {
            config.bodies = parse_bodies(&bodies)?;
        }
    }

    if let Some(ephemeris) = root.ephemeris {
        settings.ephemeris = EphemerisSettings {
            ayanamsa: parse_ayanamsa(&ephemeris.ayanamsa)?,
            path: ephemeris.path,
        };
    }

    settings
        .scan
        .validate()
        .context("Invalid [scan] settings")?;
    Ok(settings)
}

/// Text of the first config file found, with the path it came from.
///
/// An explicit path (or `SELENE_CONFIG`) must exist; the default search
/// paths are optional and `None` means none of them is present.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
    if let Some(path) = explicit {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        return Ok(Some((path, text)));
    }
    for p in &SEARCH_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

/// Load settings from `explicit`, `SELENE_CONFIG` or the default search
/// paths, falling back to built-in defaults when no file exists.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<SeleneSettings> {
    match read_config_text(explicit)? {
        Some((path, text)) => {
            log::debug!("Loading settings from {}", path.display());
            parse_settings(&text).with_context(|| format!("In {}", path.display()))
        }
        None => {
            log::debug!("No config file found in {:?}, using defaults", SEARCH_PATHS);
            Ok(SeleneSettings::default())
        }
    }
}
