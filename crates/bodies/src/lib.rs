//! Static celestial model: waypoints, orbital bodies, and the database that owns them.
//!
//! Everything here is built once from [`scnav_config::DatabaseConfig`] and is
//! read-only afterwards. Computations borrow bodies from the [`Database`].

use scnav_config::{BodyConfig, DatabaseConfig, PoiConfig};
use scnav_core::units::wrap_degrees;
use scnav_core::{Quaternion, Vector};
use thiserror::Error;

/// Degrees per second of body rotation for a rotation period of one hour.
///
/// Encodes the game's real-time to simulation-time calibration.
pub const ROTATION_CALIBRATION_DEG_PER_S: f64 = 0.1;

/// Names of the six fixed orbital markers every body carries.
pub const ORBITAL_MARKER_NAMES: [&str; 6] = ["OM-1", "OM-2", "OM-3", "OM-4", "OM-5", "OM-6"];

/// A named point: either a body waypoint (body-fixed coordinates, `parent`
/// set) or a free point in system-global coordinates (`parent` is `None`).
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub parent: Option<String>,
    pub coords: Vector,
    pub orientation: Quaternion,
    pub qt_marker: bool,
}

impl Location {
    /// Ad-hoc target in the frame of `parent` (or system-global when `None`).
    pub fn custom(name: impl Into<String>, parent: Option<String>, coords: Vector) -> Self {
        Self {
            name: name.into(),
            parent,
            coords,
            orientation: Quaternion::IDENTITY,
            qt_marker: false,
        }
    }

    fn from_config(config: &PoiConfig, parent: Option<&str>) -> Self {
        Self {
            name: config.name.clone(),
            parent: parent.map(str::to_string),
            coords: Vector::new(config.x, config.y, config.z),
            orientation: Quaternion::new(config.qw, config.qx, config.qy, config.qz),
            qt_marker: config.qt_marker,
        }
    }
}

/// A rotating celestial object with its own body-fixed frame and waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalBody {
    pub name: String,
    /// Centre in system-global kilometres.
    pub coords: Vector,
    pub orientation: Quaternion,
    pub qt_marker: bool,
    pub om_radius: f64,
    pub body_radius: f64,
    pub arrival_radius: f64,
    pub time_lines: f64,
    /// Hours per full rotation; zero means non-rotating.
    pub rotation_speed: f64,
    /// Rotation phase at the reference epoch, degrees.
    pub rotation_adjust: f64,
    pub orbital_radius: f64,
    pub orbital_speed: f64,
    pub orbital_angle: f64,
    pub grid_radius: f64,
    pub adjustment_date: Option<f64>,
    /// Waypoints in database order.
    pub waypoints: Vec<Location>,
}

impl OrbitalBody {
    /// Rotation rate in degrees per second; zero for a non-rotating body.
    pub fn rotation_rate_deg_per_s(&self) -> f64 {
        if self.rotation_speed == 0.0 {
            0.0
        } else {
            ROTATION_CALIBRATION_DEG_PER_S * (1.0 / self.rotation_speed)
        }
    }

    /// Rotation angle in degrees, in `[0, 360)`, after `elapsed_seconds`
    /// since the reference epoch.
    pub fn rotation_angle_at(&self, elapsed_seconds: f64) -> f64 {
        wrap_degrees(self.rotation_rate_deg_per_s() * elapsed_seconds + self.rotation_adjust)
    }

    /// Radius of the sphere of influence used for containment checks.
    pub fn influence_radius(&self) -> f64 {
        3.0 * self.om_radius
    }

    pub fn waypoint(&self, name: &str) -> Option<&Location> {
        self.waypoints.iter().find(|w| w.name == name)
    }

    fn from_config(config: &BodyConfig) -> Self {
        Self {
            name: config.name.clone(),
            coords: Vector::new(config.x, config.y, config.z),
            orientation: Quaternion::new(config.qw, config.qx, config.qy, config.qz),
            qt_marker: true,
            om_radius: config.om_radius,
            body_radius: config.body_radius,
            arrival_radius: config.arrival_radius,
            time_lines: config.time_lines,
            rotation_speed: config.rotation_speed,
            rotation_adjust: config.rotation_adjust,
            orbital_radius: config.orbital_radius,
            orbital_speed: config.orbital_speed,
            orbital_angle: config.orbital_angle,
            grid_radius: config.grid_radius,
            adjustment_date: config.adjustment_date,
            waypoints: config
                .pois
                .iter()
                .map(|poi| Location::from_config(poi, Some(&config.name)))
                .collect(),
        }
    }
}

/// Errors surfaced while turning a database configuration into runtime bodies.
#[derive(Debug, Error, PartialEq)]
pub enum DatabaseError {
    #[error("body '{0}' is defined more than once")]
    DuplicateBody(String),
    #[error("body '{body}' is missing orbital marker '{marker}'")]
    MissingOrbitalMarker { body: String, marker: &'static str },
}

/// Read-only lookup of orbital bodies and free space points of interest.
#[derive(Debug, Clone, Default)]
pub struct Database {
    bodies: Vec<OrbitalBody>,
    space_pois: Vec<Location>,
}

impl Database {
    /// Build a database from already-validated parts, keeping their order.
    pub fn new(bodies: Vec<OrbitalBody>, space_pois: Vec<Location>) -> Self {
        Self { bodies, space_pois }
    }

    /// Convert and validate a loaded configuration.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let mut bodies: Vec<OrbitalBody> = Vec::with_capacity(config.containers.len());
        for body_config in &config.containers {
            if bodies.iter().any(|b| b.name == body_config.name) {
                return Err(DatabaseError::DuplicateBody(body_config.name.clone()));
            }
            let body = OrbitalBody::from_config(body_config);
            if let Some(marker) = ORBITAL_MARKER_NAMES
                .into_iter()
                .find(|marker| body.waypoint(marker).is_none())
            {
                return Err(DatabaseError::MissingOrbitalMarker {
                    body: body.name,
                    marker,
                });
            }
            bodies.push(body);
        }
        let space_pois = config
            .space_pois
            .iter()
            .map(|poi| Location::from_config(poi, None))
            .collect();
        tracing::debug!(
            bodies = bodies.len(),
            space_pois = config.space_pois.len(),
            "navigation database ready"
        );
        Ok(Self { bodies, space_pois })
    }

    /// Bodies in database order.
    pub fn bodies(&self) -> &[OrbitalBody] {
        &self.bodies
    }

    pub fn body(&self, name: &str) -> Option<&OrbitalBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn space_pois(&self) -> &[Location] {
        &self.space_pois
    }

    pub fn space_poi(&self, name: &str) -> Option<&Location> {
        self.space_pois.iter().find(|p| p.name == name)
    }
}
