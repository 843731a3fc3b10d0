//! Destination selection: database lookups or ad-hoc coordinates.

use scnav_bodies::{Database, Location};
use scnav_core::Vector;
use scnav_frames::{LatLongHeight, local_from_lat_long_height};

use crate::session::NavError;

/// Name given to every ad-hoc target.
pub const CUSTOM_TARGET_NAME: &str = "Custom POI";

/// How the player picked a destination.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetSpec {
    /// Named waypoint on a body.
    Known { container: String, name: String },
    /// Named free-floating point of interest.
    KnownSpace { name: String },
    /// Body-fixed coordinates in kilometres.
    Local { container: String, position: Vector },
    /// Latitude/longitude/height on a body.
    LatLonHeight {
        container: String,
        position: LatLongHeight,
    },
    /// System-global coordinates in kilometres.
    Global { position: Vector },
}

impl TargetSpec {
    pub fn resolve(&self, database: &Database) -> Result<Location, NavError> {
        let body_named = |name: &str| {
            database
                .body(name)
                .ok_or_else(|| NavError::UnknownBody(name.to_string()))
        };
        match self {
            TargetSpec::Known { container, name } => body_named(container)?
                .waypoint(name)
                .cloned()
                .ok_or_else(|| NavError::UnknownWaypoint {
                    body: container.clone(),
                    name: name.clone(),
                }),
            TargetSpec::KnownSpace { name } => database
                .space_poi(name)
                .cloned()
                .ok_or_else(|| NavError::UnknownSpacePoi(name.clone())),
            TargetSpec::Local {
                container,
                position,
            } => {
                body_named(container)?;
                Ok(Location::custom(
                    CUSTOM_TARGET_NAME,
                    Some(container.clone()),
                    *position,
                ))
            }
            TargetSpec::LatLonHeight {
                container,
                position,
            } => {
                let body = body_named(container)?;
                Ok(Location::custom(
                    CUSTOM_TARGET_NAME,
                    Some(container.clone()),
                    local_from_lat_long_height(position, body),
                ))
            }
            TargetSpec::Global { position } => {
                Ok(Location::custom(CUSTOM_TARGET_NAME, None, *position))
            }
        }
    }
}
