//! Body-agnostic position status for players without a destination.

use scnav_core::Vector;
use scnav_core::time::seconds_since_reference;
use scnav_frames::{lat_long_height, resolve_container, to_local_frame};
use scnav_guidance::{closest_orbital_markers, closest_waypoints};

use super::{NavError, NavigationSession};
use crate::format;
use crate::report::{CompanionLocal, CompanionReport};

/// Container label reported in open space.
pub const NO_CONTAINER: &str = "None";

impl NavigationSession<'_> {
    /// Companion-mode update. Body-relative fields are only filled in while
    /// the player is inside a sphere of influence.
    pub fn compute_companion(
        &mut self,
        position: Vector,
        timestamp: f64,
    ) -> Result<CompanionReport, NavError> {
        let database = self.database;
        let container = resolve_container(&position, database.bodies());

        let (local, details) = match container {
            None => (position, None),
            Some(body) => {
                let local = to_local_frame(&position, body, seconds_since_reference(timestamp));
                let surface = lat_long_height(&local, body);
                let markers = closest_orbital_markers(&local, body)
                    .ok_or_else(|| NavError::MissingOrbitalMarker(body.name.clone()))?;
                let nearest = closest_waypoints(&local, body, false);
                let nth = |index: usize| {
                    nearest
                        .get(index)
                        .map(|w| format::waypoint(w.name(), w.distance))
                        .unwrap_or_else(|| "N/A".to_string())
                };
                let details = CompanionLocal {
                    player_x: format::round_dp(local.x, 3),
                    player_y: format::round_dp(local.y, 3),
                    player_z: format::round_dp(local.z, 3),
                    player_long: format::degrees(surface.longitude, 2),
                    player_lat: format::degrees(surface.latitude, 2),
                    player_height: format::km(surface.height, 1),
                    player_om1: format::waypoint(markers.z.name(), markers.z.distance),
                    player_om2: format::waypoint(markers.y.name(), markers.y.distance),
                    player_om3: format::waypoint(markers.x.name(), markers.x.distance),
                    player_closest_poi: nth(0),
                    player_second_closest_poi: nth(1),
                    surface,
                };
                (local, Some(details))
            }
        };

        self.previous.global = position;
        self.previous.local = local;
        self.previous.container = container.map(|body| body.name.clone());
        self.previous.timestamp = timestamp;

        Ok(CompanionReport {
            updated: self.display.clock(timestamp),
            player_global_x: format::round_dp(position.x, 3),
            player_global_y: format::round_dp(position.y, 3),
            player_global_z: format::round_dp(position.z, 3),
            player_actual_container: container
                .map(|body| body.name.clone())
                .unwrap_or_else(|| NO_CONTAINER.to_string()),
            local: details,
        })
    }
}
