//! Flat, display-ready records produced by each navigation mode.
//!
//! Field names are part of the output contract and are kept verbatim for
//! downstream consumers of the JSON lines.

use scnav_frames::LatLongHeight;
use serde::Serialize;

/// One planetary-mode update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetaryReport {
    pub updated: String,
    pub target: String,
    pub player_actual_container: String,
    pub target_container: String,
    pub player_x: f64,
    pub player_y: f64,
    pub player_z: f64,
    pub player_long: String,
    pub player_lat: String,
    pub player_height: String,
    #[serde(rename = "player_OM1")]
    pub player_om1: String,
    #[serde(rename = "player_OM2")]
    pub player_om2: String,
    #[serde(rename = "player_OM3")]
    pub player_om3: String,
    pub player_closest_poi: String,
    pub player_state_of_the_day: String,
    pub player_next_event: String,
    pub player_next_event_time: String,
    pub target_x: f64,
    pub target_y: f64,
    pub target_z: f64,
    pub target_long: String,
    pub target_lat: String,
    pub target_height: String,
    #[serde(rename = "target_OM1")]
    pub target_om1: String,
    #[serde(rename = "target_OM2")]
    pub target_om2: String,
    #[serde(rename = "target_OM3")]
    pub target_om3: String,
    #[serde(rename = "target_closest_QT_beacon")]
    pub target_closest_qt_beacon: String,
    pub target_state_of_the_day: String,
    pub target_next_event: String,
    pub target_next_event_time: String,
    pub distance_to_poi: String,
    pub distance_to_poi_color: String,
    pub delta_distance_to_poi: String,
    pub delta_distance_to_poi_color: String,
    pub total_deviation: String,
    pub total_deviation_color: String,
    pub horizontal_deviation: String,
    pub horizontal_deviation_color: String,
    pub heading: String,
    #[serde(rename = "ETA")]
    pub eta: String,
}

/// One space-mode update. Coordinates are system-global.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceReport {
    pub updated: String,
    pub target: String,
    pub player_x: f64,
    pub player_y: f64,
    pub player_z: f64,
    pub target_x: f64,
    pub target_y: f64,
    pub target_z: f64,
    pub distance_to_poi: String,
    pub distance_to_poi_color: String,
    pub delta_distance_to_poi: String,
    pub delta_distance_to_poi_color: String,
    pub total_deviation: String,
    pub total_deviation_color: String,
    #[serde(rename = "ETA")]
    pub eta: String,
}

/// One companion-mode status line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanionReport {
    pub updated: String,
    pub player_global_x: f64,
    pub player_global_y: f64,
    pub player_global_z: f64,
    /// Resolved body name, `"None"` in open space.
    pub player_actual_container: String,
    #[serde(flatten)]
    pub local: Option<CompanionLocal>,
}

/// Body-relative part of a companion report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanionLocal {
    pub player_x: f64,
    pub player_y: f64,
    pub player_z: f64,
    pub player_long: String,
    pub player_lat: String,
    pub player_height: String,
    #[serde(rename = "player_OM1")]
    pub player_om1: String,
    #[serde(rename = "player_OM2")]
    pub player_om2: String,
    #[serde(rename = "player_OM3")]
    pub player_om3: String,
    pub player_closest_poi: String,
    pub player_second_closest_poi: String,
    /// Unrounded spherical position, kept for the logbook.
    #[serde(skip)]
    pub surface: LatLongHeight,
}
