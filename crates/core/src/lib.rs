//! Core units, epoch constants, and shared primitives for the scnav workspace.

pub mod vector;

pub use vector::{Quaternion, Vector};

/// Constants shared by every navigation computation.
pub mod constants {
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    /// 2020-01-01T00:00:00 UTC expressed as seconds since the Unix epoch.
    ///
    /// Every rotation phase and day/night cycle is measured from this instant.
    pub const REFERENCE_EPOCH_UNIX_S: f64 = 1_577_836_800.0;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Wrap an angle in degrees into `[0, 360)` with the sign convention of a
    /// positive modulus.
    #[inline]
    pub fn wrap_degrees(angle: f64) -> f64 {
        angle.rem_euclid(360.0)
    }

    /// Fold an angle already in `[0, 360)` into `(-180, 180]`.
    #[inline]
    pub fn signed_degrees(angle: f64) -> f64 {
        if angle > 180.0 { angle - 360.0 } else { angle }
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::{REFERENCE_EPOCH_UNIX_S, SECONDS_PER_DAY};

    /// Seconds elapsed between the reference epoch and a Unix timestamp.
    #[inline]
    pub fn seconds_since_reference(unix_timestamp: f64) -> f64 {
        unix_timestamp - REFERENCE_EPOCH_UNIX_S
    }

    /// Fractional days elapsed since the reference epoch.
    #[inline]
    pub fn days_since_reference(unix_timestamp: f64) -> f64 {
        seconds_to_days(seconds_since_reference(unix_timestamp))
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }
}
