//! Display formatting shared by every report.

use chrono::{DateTime, FixedOffset, Local};

use scnav_core::constants::SECONDS_PER_DAY;

/// Round to `decimals` places, half-to-even on the exact decimal value.
pub fn round_dp(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Shortest round-tripping text for a float, always with a fractional part.
pub fn number(value: f64) -> String {
    format!("{value:?}")
}

/// `"<value>°"` rounded to `decimals`.
pub fn degrees(value: f64, decimals: usize) -> String {
    format!("{}°", number(round_dp(value, decimals)))
}

/// `"<value> km"` rounded to `decimals`.
pub fn km(value: f64, decimals: usize) -> String {
    format!("{} km", number(round_dp(value, decimals)))
}

/// `"<name> : <distance> km"` with the distance rounded to metres.
pub fn waypoint(name: &str, distance: f64) -> String {
    format!("{name} : {}", km(distance, 3))
}

/// Placeholder for a target that is itself a quantum marker.
pub const SELF_BEACON: &str = "POI itself : 0 km";

/// Signed duration in the `[-]D day[s], H:MM:SS` convention.
///
/// Seconds are rounded half-to-even first; the day count carries the sign
/// and the clock part is always positive, so -10 s reads `-1 day, 23:59:50`.
pub fn duration(seconds: f64) -> String {
    let total = seconds.round_ties_even() as i64;
    let day = SECONDS_PER_DAY as i64;
    let days = total.div_euclid(day);
    let rest = total.rem_euclid(day);
    let clock = format!("{}:{:02}:{:02}", rest / 3_600, rest % 3_600 / 60, rest % 60);
    match days {
        0 => clock,
        1 | -1 => format!("{days} day, {clock}"),
        _ => format!("{days} days, {clock}"),
    }
}

/// Time zone used for `HH:MM:SS` clock strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The host's local time zone.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Fixed offset east of UTC in minutes, or the host zone when absent or
    /// out of range.
    pub fn from_offset_minutes(minutes: Option<i32>) -> Self {
        minutes
            .and_then(|m| m.checked_mul(60))
            .and_then(FixedOffset::east_opt)
            .map(DisplayZone::Fixed)
            .unwrap_or_default()
    }

    /// Wall-clock `HH:MM:SS` for a Unix timestamp, truncated to the second.
    pub fn clock(&self, unix_timestamp: f64) -> String {
        let Some(utc) = DateTime::from_timestamp(unix_timestamp.floor() as i64, 0) else {
            return "--:--:--".to_string();
        };
        match self {
            DisplayZone::Local => utc.with_timezone(&Local).format("%H:%M:%S").to_string(),
            DisplayZone::Fixed(offset) => utc.with_timezone(offset).format("%H:%M:%S").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_prints_shortest_form() {
        assert_eq!(km(2.4599999, 3), "2.46 km");
        assert_eq!(km(0.00004, 3), "0.0 km");
        assert_eq!(degrees(141.97, 1), "142.0°");
        assert_eq!(degrees(-51.799, 2), "-51.8°");
        assert_eq!(waypoint("OM-3", 1376.1204), "OM-3 : 1376.12 km");
    }

    #[test]
    fn durations_follow_signed_day_convention() {
        assert_eq!(duration(107.4), "0:01:47");
        assert_eq!(duration(0.0), "0:00:00");
        assert_eq!(duration(2.5), "0:00:02");
        assert_eq!(duration(-10.0), "-1 day, 23:59:50");
        assert_eq!(duration(-70_558.0), "-1 day, 4:24:02");
        assert_eq!(duration(172_800.0), "2 days, 0:00:00");
        assert_eq!(duration(-172_800.0), "-2 days, 0:00:00");
    }

    #[test]
    fn fixed_zone_clock() {
        let pacific = DisplayZone::from_offset_minutes(Some(-480));
        assert_eq!(pacific.clock(1_674_962_588.713745), "19:23:08");
        assert_eq!(DisplayZone::from_offset_minutes(None), DisplayZone::Local);
        assert_eq!(
            DisplayZone::from_offset_minutes(Some(100_000)),
            DisplayZone::Local
        );
    }
}
