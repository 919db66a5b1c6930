//! Command line and config file
//!
//! Precedence is CLI, then the TOML file, then built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::api::{ApiConfig, DEFAULT_FORECAST_URL, DEFAULT_GEOCODING_URL};
use crate::state::{Coordinate, CoordinateError, Location, TempUnit};

const DEFAULT_REFRESH_SECS: u64 = 600;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Seven-day forecast in the terminal
#[derive(Parser, Debug, Default)]
#[command(name = "weather7day", version)]
#[command(about = "Seven-day weather forecast in the terminal (Open-Meteo)")]
pub struct Args {
    /// Latitude of the location to show first
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the location to show first
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Place name to look up; may be repeated
    #[arg(long = "place", short)]
    pub places: Vec<String>,

    /// Config file (default: <config dir>/weather7day/config.toml)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Refresh interval in seconds
    #[arg(long, short)]
    pub refresh_interval: Option<u64>,

    /// Show temperatures in Fahrenheit
    #[arg(long)]
    pub fahrenheit: bool,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("location {name:?}: {source}")]
    Coordinate {
        name: String,
        source: CoordinateError,
    },
    #[error("refresh interval must be at least one second")]
    InvalidRefresh,
    #[error("request timeout must be at least one second")]
    InvalidTimeout,
}

/// On-disk layout.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub refresh_interval_secs: Option<u64>,
    pub unit: Option<TempUnit>,
    pub forecast_url: Option<String>,
    pub geocoding_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub locations: Vec<LocationEntry>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LocationEntry {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl FileConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub refresh_interval: Duration,
    pub unit: TempUnit,
    pub api: ApiConfig,
    /// Coordinates known without geocoding, in display order
    pub locations: Vec<Location>,
    /// Names still to geocode; appended after `locations`
    pub places: Vec<String>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Read the config file (explicit, or the default one when it exists)
    /// and merge it with `args`.
    pub fn load(args: Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::read(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => FileConfig::read(&path)?,
                _ => FileConfig::default(),
            },
        };
        Self::from_parts(args, file)
    }

    pub fn from_parts(args: Args, file: FileConfig) -> Result<Self, ConfigError> {
        let refresh_secs = args
            .refresh_interval
            .or(file.refresh_interval_secs)
            .unwrap_or(DEFAULT_REFRESH_SECS);
        if refresh_secs == 0 {
            return Err(ConfigError::InvalidRefresh);
        }
        // reqwest treats a zero timeout as "fail every request"
        let timeout_secs = file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let unit = if args.fahrenheit {
            TempUnit::Fahrenheit
        } else {
            file.unit.unwrap_or_default()
        };

        let api = ApiConfig {
            forecast_url: file
                .forecast_url
                .unwrap_or_else(|| DEFAULT_FORECAST_URL.to_string()),
            geocoding_url: file
                .geocoding_url
                .unwrap_or_else(|| DEFAULT_GEOCODING_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        };

        let mut locations = Vec::new();
        if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
            let coordinate = Coordinate::new(lat, lng).map_err(|source| {
                ConfigError::Coordinate {
                    name: "--lat/--lng".into(),
                    source,
                }
            })?;
            locations.push(Location {
                name: format!("{}", coordinate),
                coordinate,
            });
        }
        for entry in file.locations {
            let coordinate = Coordinate::new(entry.lat, entry.lng).map_err(|source| {
                ConfigError::Coordinate {
                    name: entry.name.clone(),
                    source,
                }
            })?;
            locations.push(Location {
                name: entry.name,
                coordinate,
            });
        }

        Ok(Self {
            refresh_interval: Duration::from_secs(refresh_secs),
            unit,
            api,
            locations,
            places: args.places,
            log_file: args.log_file,
        })
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("weather7day").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> FileConfig {
        FileConfig::parse(text, Path::new("test.toml")).expect("valid config")
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_parts(Args::default(), FileConfig::default()).unwrap();
        assert_eq!(config.refresh_interval, Duration::from_secs(600));
        assert_eq!(config.unit, TempUnit::Celsius);
        assert_eq!(config.api, ApiConfig::default());
        assert!(config.locations.is_empty());
        assert!(config.places.is_empty());
    }

    #[test]
    fn test_file_values() {
        let file = parse(
            r#"
            refresh_interval_secs = 120
            unit = "fahrenheit"
            forecast_url = "http://localhost:8080/forecast"
            request_timeout_secs = 3

            [[locations]]
            name = "Yosemite"
            lat = 37.8651
            lng = -119.5383

            [[locations]]
            name = "Zion"
            lat = 37.2982
            lng = -113.0263
            "#,
        );

        let config = Config::from_parts(Args::default(), file).unwrap();
        assert_eq!(config.refresh_interval, Duration::from_secs(120));
        assert_eq!(config.unit, TempUnit::Fahrenheit);
        assert_eq!(config.api.forecast_url, "http://localhost:8080/forecast");
        assert_eq!(config.api.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(config.api.timeout, Duration::from_secs(3));
        let names: Vec<_> = config.locations.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Yosemite", "Zion"]);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = parse("refresh_interval_secs = 120\nunit = \"celsius\"");
        let args = Args::parse_from([
            "weather7day",
            "--lat",
            "-33.86",
            "--lng",
            "151.21",
            "--refresh-interval",
            "30",
            "--fahrenheit",
            "--place",
            "Moab",
            "--place",
            "Bend, Oregon",
        ]);

        let config = Config::from_parts(args, file).unwrap();
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.unit, TempUnit::Fahrenheit);
        assert_eq!(
            config.locations[0].coordinate,
            Coordinate {
                lat: -33.86,
                lng: 151.21
            }
        );
        assert_eq!(config.places, ["Moab", "Bend, Oregon"]);
    }

    #[test]
    fn test_lat_requires_lng() {
        let result = Args::try_parse_from(["weather7day", "--lat", "10"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_coordinate() {
        let file = parse("[[locations]]\nname = \"Nowhere\"\nlat = 95.0\nlng = 0.0");
        let err = Config::from_parts(Args::default(), file).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Coordinate { ref name, source: CoordinateError::Latitude(_) } if name == "Nowhere"
        ));
    }

    #[test]
    fn test_zero_refresh_rejected() {
        let args = Args {
            refresh_interval: Some(0),
            ..Args::default()
        };
        let err = Config::from_parts(args, FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRefresh));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let file = parse("request_timeout_secs = 0");
        let err = Config::from_parts(Args::default(), file).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout));
        assert_eq!(err.to_string(), "request timeout must be at least one second");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = FileConfig::parse("refresh = 5", Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().starts_with("invalid config bad.toml"));
    }

    #[test]
    fn test_missing_file() {
        let err = FileConfig::read(Path::new("/nonexistent/weather7day.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
