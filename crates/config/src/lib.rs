//! Configuration models and loaders for the navigation database and user settings.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Whole navigation database as stored on disk.
///
/// Entry order is significant: body resolution and waypoint tie-breaks both
/// follow it.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub containers: Vec<BodyConfig>,
    #[serde(default)]
    pub space_pois: Vec<PoiConfig>,
}

impl DatabaseConfig {
    fn merge(&mut self, other: DatabaseConfig) {
        self.containers.extend(other.containers);
        self.space_pois.extend(other.space_pois);
    }
}

/// Orbital body ("container") record. Coordinates are system-global kilometres.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default = "unit_w")]
    pub qw: f64,
    #[serde(default)]
    pub qx: f64,
    #[serde(default)]
    pub qy: f64,
    #[serde(default)]
    pub qz: f64,
    pub om_radius: f64,
    pub body_radius: f64,
    #[serde(default)]
    pub arrival_radius: f64,
    #[serde(default)]
    pub time_lines: f64,
    /// Hours per full rotation; zero marks a non-rotating body.
    #[serde(default)]
    pub rotation_speed: f64,
    /// Rotation phase in degrees at the reference epoch.
    #[serde(default)]
    pub rotation_adjust: f64,
    #[serde(default)]
    pub orbital_radius: f64,
    #[serde(default)]
    pub orbital_speed: f64,
    #[serde(default)]
    pub orbital_angle: f64,
    #[serde(default)]
    pub grid_radius: f64,
    #[serde(default)]
    pub adjustment_date: Option<f64>,
    #[serde(default)]
    pub pois: Vec<PoiConfig>,
}

/// Point of interest record. Coordinates are body-fixed kilometres for body
/// waypoints and system-global kilometres for space POIs.
#[derive(Debug, Deserialize, Clone)]
pub struct PoiConfig {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default = "unit_w")]
    pub qw: f64,
    #[serde(default)]
    pub qx: f64,
    #[serde(default)]
    pub qy: f64,
    #[serde(default)]
    pub qz: f64,
    #[serde(default)]
    pub qt_marker: bool,
}

fn unit_w() -> f64 {
    1.0
}

/// User settings for a navigation run. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct NavSettings {
    /// Name of the system star inside the database.
    pub star: String,
    pub logs_enabled: bool,
    pub log_path: PathBuf,
    /// System label written into logbook rows.
    pub system: String,
    /// Player label written into logbook rows.
    pub player: String,
    /// External clock correction in seconds, added to the wall clock.
    pub time_offset_s: f64,
    /// Fixed display offset from UTC; the host time zone is used when absent.
    pub utc_offset_minutes: Option<i32>,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            star: "Stanton".to_string(),
            logs_enabled: false,
            log_path: PathBuf::from("Logs/Logs.csv"),
            system: "Stanton".to_string(),
            player: String::new(),
            time_offset_s: 0.0,
            utc_offset_minutes: None,
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no database records found under {0}")]
    Empty(PathBuf),
}

/// Load the navigation database from a YAML/JSON/TOML file or a directory of
/// TOML fragments.
///
/// Directory fragments are merged in file-name order, each one contributing
/// its `containers` and `space_pois` entries.
pub fn load_database<P: AsRef<Path>>(path: P) -> Result<DatabaseConfig, ConfigError> {
    let path = path.as_ref();
    if path.is_dir() {
        let fragments: Vec<DatabaseConfig> = read_dir_records(path)?;
        if fragments.is_empty() {
            return Err(ConfigError::Empty(path.to_path_buf()));
        }
        let mut database = DatabaseConfig::default();
        for fragment in fragments {
            database.merge(fragment);
        }
        Ok(database)
    } else {
        load_record(path)
    }
}

/// Load user settings from a TOML, JSON, or YAML file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<NavSettings, ConfigError> {
    load_record(path.as_ref())
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().map(|e| e == ext).unwrap_or(false)
}

fn load_record<T>(path: &Path) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    if has_extension(path, "toml") {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else if has_extension(path, "json") {
        let reader = File::open(path)?;
        Ok(serde_json::from_reader(reader)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: DeserializeOwned,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| has_extension(path, "toml"))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
