//! Straight-line navigation in the system-global frame.

use scnav_bodies::Location;
use scnav_core::Vector;
use scnav_core::time::seconds_since_reference;
use scnav_frames::from_local_frame;
use scnav_guidance::{Severity, course_deviation};
use tracing::debug;

use super::{NavError, NavigationSession, PreviousSample, estimate_eta};
use crate::format;
use crate::report::SpaceReport;

impl NavigationSession<'_> {
    /// Space-mode update. Targets attached to a body are carried along with
    /// its rotation to their current global position.
    pub fn compute_space(
        &mut self,
        position: Vector,
        target: &Location,
        timestamp: f64,
    ) -> Result<SpaceReport, NavError> {
        let destination = self.global_position_of(target, timestamp)?;

        let to_target = destination - position;
        let distance = to_target.magnitude();
        let delta = distance - self.previous.to_target.magnitude();
        let eta = estimate_eta(timestamp - self.previous.timestamp, distance, delta);
        let deviation = course_deviation(&self.previous.global, &position, &destination);

        debug!(distance, delta, eta, deviation, "space update");

        self.previous = PreviousSample {
            global: position,
            local: position,
            to_target,
            container: None,
            timestamp,
        };

        Ok(SpaceReport {
            updated: self.display.clock(timestamp),
            target: target.name.clone(),
            player_x: format::round_dp(position.x, 3),
            player_y: format::round_dp(position.y, 3),
            player_z: format::round_dp(position.z, 3),
            target_x: destination.x,
            target_y: destination.y,
            target_z: destination.z,
            distance_to_poi: format::km(distance, 3),
            distance_to_poi_color: Severity::for_distance(distance).color().to_string(),
            delta_distance_to_poi: format::km(delta.abs(), 3),
            delta_distance_to_poi_color: Severity::for_delta(delta).color().to_string(),
            total_deviation: format::degrees(deviation, 1),
            total_deviation_color: Severity::for_deviation(deviation).color().to_string(),
            eta: format::duration(eta),
        })
    }

    fn global_position_of(&self, target: &Location, timestamp: f64) -> Result<Vector, NavError> {
        match target.parent.as_deref() {
            None => Ok(target.coords),
            Some(name) => {
                let body = self
                    .database
                    .body(name)
                    .ok_or_else(|| NavError::UnknownBody(name.to_string()))?;
                Ok(from_local_frame(
                    &target.coords,
                    body,
                    seconds_since_reference(timestamp),
                ))
            }
        }
    }
}
