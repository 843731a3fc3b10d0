//! Surface navigation toward a waypoint on the body the player is orbiting.

use scnav_bodies::Location;
use scnav_core::Vector;
use scnav_core::time::{days_since_reference, seconds_since_reference};
use scnav_diurnal::{DiurnalOutlook, predict};
use scnav_frames::{LatLongHeight, lat_long_height, resolve_container, to_local_frame};
use scnav_guidance::{
    OrbitalMarkers, Severity, WaypointDistance, bearing, closest_orbital_markers, closest_waypoints,
    course_deviation, flat_deviation,
};
use tracing::{debug, warn};

use super::{NavError, NavigationSession, PreviousSample, estimate_eta};
use crate::format::{self, DisplayZone};
use crate::report::PlanetaryReport;

impl NavigationSession<'_> {
    /// Planetary-mode update for a player at `position` (global km) at
    /// `timestamp` (Unix seconds, offset-corrected).
    ///
    /// Returns `Ok(None)` when the player is not inside a body's sphere of
    /// influence or is orbiting a different body than the target's. Both
    /// cases are logged and leave the session untouched.
    pub fn compute_planetary(
        &mut self,
        position: Vector,
        target: &Location,
        timestamp: f64,
    ) -> Result<Option<PlanetaryReport>, NavError> {
        let database = self.database;
        let elapsed = seconds_since_reference(timestamp);

        let target_body_name = target
            .parent
            .as_deref()
            .ok_or_else(|| NavError::DetachedTarget(target.name.clone()))?;
        let target_body = database
            .body(target_body_name)
            .ok_or_else(|| NavError::UnknownBody(target_body_name.to_string()))?;

        let Some(container) = resolve_container(&position, database.bodies()) else {
            warn!(
                x = position.x,
                y = position.y,
                z = position.z,
                "player is outside every sphere of influence"
            );
            return Ok(None);
        };
        if container.name != target_body.name {
            warn!(
                player = %container.name,
                target = %target_body.name,
                "player and target are on different bodies"
            );
            return Ok(None);
        }

        let star = database
            .body(&self.star)
            .ok_or_else(|| NavError::UnknownStar(self.star.clone()))?;

        let local = to_local_frame(&position, container, elapsed);
        let player = lat_long_height(&local, container);
        let destination = lat_long_height(&target.coords, target_body);

        let to_target = target.coords - local;
        let distance = to_target.magnitude();
        let delta = distance - self.previous.to_target.magnitude();
        let eta = estimate_eta(timestamp - self.previous.timestamp, distance, delta);

        let beacon = if target.qt_marker {
            format::SELF_BEACON.to_string()
        } else {
            closest_waypoints(&target.coords, target_body, true)
                .first()
                .map(|nearest| format::waypoint(nearest.name(), nearest.distance))
                .unwrap_or_else(|| "N/A".to_string())
        };
        let player_closest = closest_waypoints(&local, container, false)
            .first()
            .map(|nearest| format::waypoint(nearest.name(), nearest.distance))
            .unwrap_or_else(|| "N/A".to_string());

        let player_markers = closest_orbital_markers(&local, container)
            .ok_or_else(|| NavError::MissingOrbitalMarker(container.name.clone()))?;
        let target_markers = closest_orbital_markers(&target.coords, target_body)
            .ok_or_else(|| NavError::MissingOrbitalMarker(target_body.name.clone()))?;

        let deviation = course_deviation(&self.previous.local, &local, &target.coords);
        let flat = flat_deviation(&self.previous.local, &local, &target.coords);
        let heading = bearing(
            player.latitude,
            player.longitude,
            destination.latitude,
            destination.longitude,
        );

        let julian_days = days_since_reference(timestamp);
        let player_day = predict(&player, container, star, julian_days)?;
        let target_day = predict(&destination, target_body, star, julian_days)?;

        debug!(
            body = %container.name,
            distance,
            delta,
            eta,
            deviation,
            flat,
            "planetary update"
        );

        self.previous = PreviousSample {
            global: position,
            local,
            to_target,
            container: Some(container.name.clone()),
            timestamp,
        };

        let clock = self.display;
        let player_side = Side::new(&player, &player_markers, &player_day, timestamp, clock);
        let target_side = Side::new(&destination, &target_markers, &target_day, timestamp, clock);

        Ok(Some(PlanetaryReport {
            updated: clock.clock(timestamp),
            target: target.name.clone(),
            player_actual_container: container.name.clone(),
            target_container: target_body.name.clone(),
            player_x: format::round_dp(local.x, 3),
            player_y: format::round_dp(local.y, 3),
            player_z: format::round_dp(local.z, 3),
            player_long: player_side.long,
            player_lat: player_side.lat,
            player_height: player_side.height,
            player_om1: player_side.om1,
            player_om2: player_side.om2,
            player_om3: player_side.om3,
            player_closest_poi: player_closest,
            player_state_of_the_day: player_side.state,
            player_next_event: player_side.next_event,
            player_next_event_time: player_side.next_event_time,
            target_x: target.coords.x,
            target_y: target.coords.y,
            target_z: target.coords.z,
            target_long: target_side.long,
            target_lat: target_side.lat,
            target_height: target_side.height,
            target_om1: target_side.om1,
            target_om2: target_side.om2,
            target_om3: target_side.om3,
            target_closest_qt_beacon: beacon,
            target_state_of_the_day: target_side.state,
            target_next_event: target_side.next_event,
            target_next_event_time: target_side.next_event_time,
            distance_to_poi: format::km(distance, 3),
            distance_to_poi_color: Severity::for_distance(distance).color().to_string(),
            delta_distance_to_poi: format::km(delta.abs(), 3),
            delta_distance_to_poi_color: Severity::for_delta(delta).color().to_string(),
            total_deviation: format::degrees(deviation, 1),
            total_deviation_color: Severity::for_deviation(deviation).color().to_string(),
            horizontal_deviation: format::degrees(flat, 1),
            horizontal_deviation_color: Severity::for_deviation(flat).color().to_string(),
            heading: format::degrees(heading, 1),
            eta: format::duration(eta),
        }))
    }
}

/// Display strings shared by the player and target halves of a report.
struct Side {
    long: String,
    lat: String,
    height: String,
    /// Z axis marker.
    om1: String,
    /// Y axis marker.
    om2: String,
    /// X axis marker.
    om3: String,
    state: String,
    next_event: String,
    next_event_time: String,
}

impl Side {
    fn new(
        position: &LatLongHeight,
        markers: &OrbitalMarkers<'_>,
        day: &DiurnalOutlook,
        timestamp: f64,
        clock: DisplayZone,
    ) -> Self {
        let marker = |m: &WaypointDistance<'_>| format::waypoint(m.name(), m.distance);
        Self {
            long: format::degrees(position.longitude, 2),
            lat: format::degrees(position.latitude, 2),
            height: format::km(position.height, 1),
            om1: marker(&markers.z),
            om2: marker(&markers.y),
            om3: marker(&markers.x),
            state: day.state_label().to_string(),
            next_event: day.next_event_label(),
            next_event_time: clock.clock(timestamp + day.minutes_to_event() * 60.0),
        }
    }
}
