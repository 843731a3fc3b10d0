//! Proximity and bearing: nearest waypoints, orbital markers, great-circle
//! heading, and course deviation angles with their severity bands.

use scnav_bodies::{Location, OrbitalBody};
use scnav_core::Vector;

/// A waypoint paired with its distance from some reference position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointDistance<'a> {
    pub waypoint: &'a Location,
    pub distance: f64,
}

impl WaypointDistance<'_> {
    pub fn name(&self) -> &str {
        &self.waypoint.name
    }
}

/// Waypoints of `body` sorted by ascending distance from `reference`.
///
/// Equal distances keep database order.
pub fn closest_waypoints<'a>(
    reference: &Vector,
    body: &'a OrbitalBody,
    quantum_markers_only: bool,
) -> Vec<WaypointDistance<'a>> {
    let mut distances: Vec<WaypointDistance<'a>> = body
        .waypoints
        .iter()
        .filter(|waypoint| !quantum_markers_only || waypoint.qt_marker)
        .map(|waypoint| WaypointDistance {
            waypoint,
            distance: (*reference - waypoint.coords).magnitude(),
        })
        .collect();
    distances.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    distances
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Name of the orbital marker facing a coordinate of the given sign.
///
/// Keyed by `(axis, coordinate >= 0)`; zero counts as non-negative.
pub fn marker_for(axis: Axis, coordinate: f64) -> &'static str {
    match (axis, coordinate >= 0.0) {
        (Axis::X, true) => "OM-5",
        (Axis::X, false) => "OM-6",
        (Axis::Y, true) => "OM-3",
        (Axis::Y, false) => "OM-4",
        (Axis::Z, true) => "OM-1",
        (Axis::Z, false) => "OM-2",
    }
}

/// One orbital marker per principal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalMarkers<'a> {
    pub x: WaypointDistance<'a>,
    pub y: WaypointDistance<'a>,
    pub z: WaypointDistance<'a>,
}

impl<'a> OrbitalMarkers<'a> {
    pub fn get(&self, axis: Axis) -> &WaypointDistance<'a> {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

/// Orbital markers on the same side of the body as `reference`, one per axis.
///
/// This is an octant lookup, not a nearest-neighbour search. Returns `None`
/// when the body lacks one of the six markers.
pub fn closest_orbital_markers<'a>(
    reference: &Vector,
    body: &'a OrbitalBody,
) -> Option<OrbitalMarkers<'a>> {
    let pick = |axis: Axis, coordinate: f64| {
        body.waypoint(marker_for(axis, coordinate))
            .map(|waypoint| WaypointDistance {
                waypoint,
                distance: (*reference - waypoint.coords).magnitude(),
            })
    };
    Some(OrbitalMarkers {
        x: pick(Axis::X, reference.x)?,
        y: pick(Axis::Y, reference.y)?,
        z: pick(Axis::Z, reference.z)?,
    })
}

/// Great-circle initial bearing from player to target, degrees in `[0, 360)`.
pub fn bearing(player_lat: f64, player_lon: f64, target_lat: f64, target_lon: f64) -> f64 {
    let (player_lat, target_lat) = (player_lat.to_radians(), target_lat.to_radians());
    let delta_lon = target_lon.to_radians() - player_lon.to_radians();
    let bx = target_lat.cos() * delta_lon.sin();
    let by = player_lat.cos() * target_lat.sin()
        - player_lat.sin() * target_lat.cos() * delta_lon.cos();
    (bx.atan2(by).to_degrees() + 360.0).rem_euclid(360.0)
}

/// Angle in degrees between the latest motion and the direction to target.
pub fn course_deviation(previous: &Vector, current: &Vector, target: &Vector) -> f64 {
    (*current - *previous)
        .angle_between(&(*target - *current))
        .to_degrees()
}

/// Angle in degrees between the plane of recent travel (previous, current,
/// body centre) and the plane through current, body centre and target.
pub fn flat_deviation(previous: &Vector, current: &Vector, target: &Vector) -> f64 {
    let travelled = (*current - *previous).cross(&-*previous);
    let remaining = (*target - *current).cross(&-*current);
    travelled.angle_between(&remaining).to_degrees()
}

/// Three-tier display severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Good,
    Caution,
    Warning,
}

impl Severity {
    /// Display colour tag.
    pub fn color(self) -> &'static str {
        match self {
            Severity::Good => "#00ff00",
            Severity::Caution => "#ffd000",
            Severity::Warning => "#ff3700",
        }
    }

    /// Band a distance in kilometres.
    pub fn for_distance(km: f64) -> Self {
        Self::banded(km, 100.0, 1_000.0)
    }

    /// Band a deviation angle in degrees.
    pub fn for_deviation(degrees: f64) -> Self {
        Self::banded(degrees, 10.0, 20.0)
    }

    /// Closing or holding distance is good, opening distance is a warning.
    pub fn for_delta(delta_km: f64) -> Self {
        if delta_km <= 0.0 {
            Severity::Good
        } else {
            Severity::Warning
        }
    }

    fn banded(value: f64, good: f64, caution: f64) -> Self {
        if value <= good {
            Severity::Good
        } else if value <= caution {
            Severity::Caution
        } else {
            Severity::Warning
        }
    }
}
