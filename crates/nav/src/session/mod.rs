//! Navigation session: the previous sample plus the static context every
//! update needs.
//!
//! Each mode lives in its own module and adds its entry point to
//! [`NavigationSession`]. An update reads the previous sample, derives every
//! output from it, and only then overwrites it. Failed updates leave it
//! untouched.

pub mod companion;
pub mod planetary;
pub mod space;

use scnav_bodies::Database;
use scnav_core::Vector;
use scnav_diurnal::DiurnalError;

use crate::format::DisplayZone;

/// Star used for day/night predictions unless told otherwise.
pub const DEFAULT_STAR: &str = "Stanton";

/// Errors surfaced by a navigation update.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum NavError {
    #[error("unknown body '{0}'")]
    UnknownBody(String),
    #[error("unknown waypoint '{name}' on '{body}'")]
    UnknownWaypoint { body: String, name: String },
    #[error("unknown space point of interest '{0}'")]
    UnknownSpacePoi(String),
    #[error("star '{0}' is not in the database")]
    UnknownStar(String),
    #[error("target '{0}' is not attached to a body")]
    DetachedTarget(String),
    #[error("body '{0}' is missing an orbital marker")]
    MissingOrbitalMarker(String),
    #[error("day/night prediction failed: {0}")]
    Diurnal(#[from] DiurnalError),
}

/// State carried from one update to the next.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreviousSample {
    pub global: Vector,
    /// Position in the frame of `container`; global when there is none.
    pub local: Vector,
    /// Vector from player to target at the last update.
    pub to_target: Vector,
    pub container: Option<String>,
    /// Unix seconds.
    pub timestamp: f64,
}

/// One logical navigation session. Keep one per concurrently running mode.
#[derive(Debug, Clone)]
pub struct NavigationSession<'db> {
    database: &'db Database,
    star: String,
    display: DisplayZone,
    previous: PreviousSample,
}

impl<'db> NavigationSession<'db> {
    /// Fresh session with a zeroed previous sample. The first update's
    /// deltas and ETA are therefore meaningless.
    pub fn new(database: &'db Database) -> Self {
        Self {
            database,
            star: DEFAULT_STAR.to_string(),
            display: DisplayZone::default(),
            previous: PreviousSample::default(),
        }
    }

    /// Seed the previous timestamp so the first elapsed time is realistic.
    pub fn starting_at(mut self, unix_timestamp: f64) -> Self {
        self.previous.timestamp = unix_timestamp;
        self
    }

    pub fn with_star(mut self, name: impl Into<String>) -> Self {
        self.star = name.into();
        self
    }

    pub fn with_display(mut self, display: DisplayZone) -> Self {
        self.display = display;
        self
    }

    pub fn previous(&self) -> &PreviousSample {
        &self.previous
    }
}

/// Seconds to arrival at the current closing rate.
///
/// Positive while closing, negative while opening, and exactly zero when the
/// distance did not change.
pub fn estimate_eta(elapsed_seconds: f64, remaining_km: f64, delta_km: f64) -> f64 {
    if delta_km == 0.0 {
        0.0
    } else {
        (elapsed_seconds * remaining_km) / -delta_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eta_is_zero_without_closing_rate() {
        assert_eq!(estimate_eta(20.0, 150.0, 0.0), 0.0);
        assert_eq!(estimate_eta(20.0, 150.0, -0.0), 0.0);
    }

    #[test]
    fn eta_sign_tracks_closing_and_opening() {
        assert_eq!(estimate_eta(20.0, 100.0, -4.0), 500.0);
        assert_eq!(estimate_eta(20.0, 100.0, 4.0), -500.0);
    }
}
