//! Conversions between the system-global frame and a body's rotating,
//! body-fixed frame, plus spherical coordinates on the body.

use scnav_bodies::OrbitalBody;
use scnav_core::Vector;

/// Find the body whose sphere of influence contains `position`.
///
/// Overlapping spheres resolve to the *last* qualifying body in database
/// order, not the nearest one.
pub fn resolve_container<'a>(
    position: &Vector,
    bodies: &'a [OrbitalBody],
) -> Option<&'a OrbitalBody> {
    bodies
        .iter()
        .rfind(|body| (body.coords - *position).magnitude() <= body.influence_radius())
}

/// Express a global position in the body's fixed frame at `elapsed_seconds`
/// after the reference epoch.
pub fn to_local_frame(global: &Vector, body: &OrbitalBody, elapsed_seconds: f64) -> Vector {
    let angle = body.rotation_angle_at(elapsed_seconds);
    (*global - body.coords).rotate_z((-angle).to_radians())
}

/// Inverse of [`to_local_frame`].
pub fn from_local_frame(local: &Vector, body: &OrbitalBody, elapsed_seconds: f64) -> Vector {
    let angle = body.rotation_angle_at(elapsed_seconds);
    local.rotate_z(angle.to_radians()) + body.coords
}

/// Spherical position on a body: degrees, degrees, kilometres above the
/// reference radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLongHeight {
    pub latitude: f64,
    /// East-positive.
    pub longitude: f64,
    pub height: f64,
}

/// Latitude, longitude and height of a body-fixed position.
///
/// A position at the body centre reports latitude and longitude 0.
pub fn lat_long_height(local: &Vector, body: &OrbitalBody) -> LatLongHeight {
    let radial = local.magnitude();
    let latitude = if radial == 0.0 {
        0.0
    } else {
        (local.z / radial).clamp(-1.0, 1.0).asin().to_degrees()
    };
    LatLongHeight {
        latitude,
        longitude: -local.x.atan2(local.y).to_degrees(),
        height: radial - body.body_radius,
    }
}

/// Body-fixed position for a latitude/longitude/height triple, using the
/// same axis and sign conventions as [`lat_long_height`].
pub fn local_from_lat_long_height(position: &LatLongHeight, body: &OrbitalBody) -> Vector {
    let lat = position.latitude.to_radians();
    let lon = (-position.longitude).to_radians();
    let radial = body.body_radius + position.height;
    Vector::new(
        radial * lat.cos() * lon.sin(),
        radial * lat.cos() * lon.cos(),
        radial * lat.sin(),
    )
}
