//! Day/night state and sunrise/sunset prediction for an observer standing on
//! a rotating body.
//!
//! The star is brought into the body frame once, which yields its declination
//! and the meridian it faces. The body's rotation phase at the requested day
//! count then gives the local hour angle, and the hour angle falls into one of
//! six bands around the rise/set angle:
//!
//! ```text
//!   180 ── After midnight ── RS+12 ── Morning Twilight ── RS ── Morning ── 0
//!     0 ── Afternoon ── -RS ── Evening Twilight ── -RS-12 ── Before midnight ── -180
//! ```
//!
//! Each band is half-open on its lower edge, so an hour angle exactly equal to
//! the rise/set angle is already "Morning".

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;

use scnav_bodies::OrbitalBody;
use scnav_core::Vector;
use scnav_core::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR};
use scnav_core::units::{signed_degrees, wrap_degrees};
use scnav_frames::LatLongHeight;
use thiserror::Error;

/// Hour-angle width of civil twilight, degrees.
pub const TWILIGHT_DEGREES: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    AfterMidnight,
    MorningTwilight,
    Morning,
    Afternoon,
    EveningTwilight,
    BeforeMidnight,
}

impl DayPhase {
    pub fn label(self) -> &'static str {
        match self {
            DayPhase::AfterMidnight => "After midnight",
            DayPhase::MorningTwilight => "Morning Twilight",
            DayPhase::Morning => "Morning",
            DayPhase::Afternoon => "Afternoon",
            DayPhase::EveningTwilight => "Evening Twilight",
            DayPhase::BeforeMidnight => "Before midnight",
        }
    }

    /// The event that ends this phase's half of the day.
    pub fn next_event(self) -> SolarEvent {
        match self {
            DayPhase::Morning | DayPhase::Afternoon => SolarEvent::Sunset,
            _ => SolarEvent::Sunrise,
        }
    }
}

impl fmt::Display for DayPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarEvent {
    Sunrise,
    Sunset,
}

impl fmt::Display for SolarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolarEvent::Sunrise => "Sunrise",
            SolarEvent::Sunset => "Sunset",
        })
    }
}

/// Outcome of a day/night prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiurnalOutlook {
    /// Regular day/night cycle with a predicted next event.
    Normal {
        phase: DayPhase,
        next_event: SolarEvent,
        minutes_to_event: f64,
        hour_angle: f64,
        rise_set_hour_angle: f64,
    },
    /// The star never sets at this latitude.
    PolarDay,
    /// The star never rises at this latitude.
    PolarNight,
    /// The body does not rotate, so there are no events to predict.
    NoRotation { phase: DayPhase },
}

impl DiurnalOutlook {
    /// Human-readable state of the day.
    pub fn state_label(&self) -> &'static str {
        match self {
            DiurnalOutlook::Normal { phase, .. } | DiurnalOutlook::NoRotation { phase } => {
                phase.label()
            }
            DiurnalOutlook::PolarDay => "Daytime",
            DiurnalOutlook::PolarNight => "Nighttime",
        }
    }

    /// The next event, if one will ever happen.
    pub fn next_event(&self) -> Option<SolarEvent> {
        match self {
            DiurnalOutlook::Normal { next_event, .. } => Some(*next_event),
            _ => None,
        }
    }

    /// Minutes until [`Self::next_event`], zero when there is none.
    pub fn minutes_to_event(&self) -> f64 {
        match self {
            DiurnalOutlook::Normal {
                minutes_to_event, ..
            } => *minutes_to_event,
            _ => 0.0,
        }
    }

    /// Next event label, `"N/A"` when there is none.
    pub fn next_event_label(&self) -> String {
        self.next_event()
            .map(|event| event.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DiurnalError {
    #[error("non-finite {quantity} while predicting day/night on {body}")]
    NonFinite { body: String, quantity: &'static str },
}

/// Position of the star as seen from a body, in that body's fixed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarGeometry {
    /// Star position relative to the body centre, body frame, km.
    pub direction: Vector,
    /// Degrees above (positive) or below the body's equatorial plane.
    pub declination: f64,
    /// Angular radius of the star disc, degrees.
    pub apparent_radius: f64,
    /// Longitude facing the star with the body at zero rotation, degrees in `[0, 360)`.
    pub meridian: f64,
}

/// Locate `star` in the fixed frame of `body`.
pub fn star_geometry(body: &OrbitalBody, star: &OrbitalBody) -> StarGeometry {
    let direction = body.orientation.rotate(&(star.coords - body.coords));
    let Vector { x, y, z } = direction;
    let distance = direction.magnitude();
    let projected = (x * x + y * y).sqrt();

    // Angle between the star vector and its equatorial projection, by the law of cosines.
    let elevation = if projected == 0.0 {
        90.0
    } else {
        let cos = (distance.powi(2) + projected.powi(2) - z * z) / (2.0 * distance * projected);
        cos.clamp(-1.0, 1.0).acos().to_degrees()
    };
    let declination = elevation * 1f64.copysign(z);

    StarGeometry {
        direction,
        declination,
        apparent_radius: (star.body_radius / distance).asin().to_degrees(),
        meridian: (y.atan2(x) - FRAC_PI_2).rem_euclid(TAU).to_degrees(),
    }
}

/// Day length as a fraction of a standard 24 h day.
pub fn length_of_day(body: &OrbitalBody) -> f64 {
    SECONDS_PER_HOUR * body.rotation_speed / SECONDS_PER_DAY
}

/// Degrees of rotation remaining in the current day/night cycle.
pub fn current_rotation(body: &OrbitalBody, julian_days: f64) -> f64 {
    let day = length_of_day(body);
    let cycle = if day == 0.0 { 1.0 } else { julian_days / day };
    wrap_degrees(360.0 - cycle.rem_euclid(1.0) * 360.0 - body.rotation_adjust)
}

/// Band an hour angle against the rise/set hour angle.
pub fn classify(hour_angle: f64, rise_set_hour_angle: f64) -> DayPhase {
    let rs = rise_set_hour_angle;
    if hour_angle > rs + TWILIGHT_DEGREES && hour_angle <= 180.0 {
        DayPhase::AfterMidnight
    } else if hour_angle > rs && hour_angle <= rs + TWILIGHT_DEGREES {
        DayPhase::MorningTwilight
    } else if hour_angle > 0.0 && hour_angle <= rs {
        DayPhase::Morning
    } else if hour_angle > -rs && hour_angle <= 0.0 {
        DayPhase::Afternoon
    } else if hour_angle > -rs - TWILIGHT_DEGREES && hour_angle <= -rs {
        DayPhase::EveningTwilight
    } else {
        DayPhase::BeforeMidnight
    }
}

/// Predict the day/night state at `observer` on `body`, lit by `star`,
/// `julian_days` after the reference epoch.
///
/// Polar day and night are checked before rotation, so a non-rotating body
/// can still report them. Which of the two applies follows the sign of the
/// horizon term `-tan(latitude) * tan(declination)`, so the observer's
/// hemisphere relative to the star's declination decides, not the
/// declination alone.
pub fn predict(
    observer: &LatLongHeight,
    body: &OrbitalBody,
    star: &OrbitalBody,
    julian_days: f64,
) -> Result<DiurnalOutlook, DiurnalError> {
    let non_finite = |quantity| DiurnalError::NonFinite {
        body: body.name.clone(),
        quantity,
    };

    let geometry = star_geometry(body, star);
    if !geometry.declination.is_finite() || !geometry.meridian.is_finite() {
        return Err(non_finite("star direction"));
    }
    if !geometry.apparent_radius.is_finite() {
        return Err(non_finite("apparent radius"));
    }

    let elevation_correction = if observer.height < 0.0 {
        0.0
    } else {
        (body.body_radius / (body.body_radius + observer.height))
            .acos()
            .to_degrees()
    };

    let horizon = -observer.latitude.to_radians().tan() * geometry.declination.to_radians().tan();
    if horizon < -1.0 {
        return Ok(DiurnalOutlook::PolarDay);
    }
    if horizon > 1.0 {
        return Ok(DiurnalOutlook::PolarNight);
    }
    let rise_set_hour_angle =
        horizon.acos().to_degrees() + geometry.apparent_radius + elevation_correction;
    if !rise_set_hour_angle.is_finite() {
        return Err(non_finite("rise/set hour angle"));
    }

    let rotation = current_rotation(body, julian_days);
    let local_meridian = wrap_degrees(wrap_degrees(observer.longitude) - geometry.meridian);
    let hour_angle = signed_degrees(wrap_degrees(rotation - local_meridian));
    if !hour_angle.is_finite() {
        return Err(non_finite("hour angle"));
    }

    let phase = classify(hour_angle, rise_set_hour_angle);
    if body.rotation_speed == 0.0 {
        return Ok(DiurnalOutlook::NoRotation { phase });
    }

    let rate = 6.0 / body.rotation_speed;
    let day_minutes = length_of_day(body) * 24.0 * 60.0;
    let minutes_until = |event_hour_angle: f64| {
        let minutes = (hour_angle - event_hour_angle) / rate;
        if hour_angle <= event_hour_angle {
            minutes + day_minutes
        } else {
            minutes
        }
    };

    let next_event = phase.next_event();
    let minutes_to_event = match next_event {
        SolarEvent::Sunrise => minutes_until(rise_set_hour_angle),
        SolarEvent::Sunset => minutes_until(-rise_set_hour_angle),
    };

    Ok(DiurnalOutlook::Normal {
        phase,
        next_event,
        minutes_to_event,
        hour_angle,
        rise_set_hour_angle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scnav_core::Quaternion;

    fn body(name: &str, coords: Vector, rotation_speed: f64, body_radius: f64) -> OrbitalBody {
        OrbitalBody {
            name: name.into(),
            coords,
            orientation: Quaternion::IDENTITY,
            qt_marker: true,
            om_radius: 1.0,
            body_radius,
            arrival_radius: 0.0,
            time_lines: 0.0,
            rotation_speed,
            rotation_adjust: 0.0,
            orbital_radius: 0.0,
            orbital_speed: 0.0,
            orbital_angle: 0.0,
            grid_radius: 0.0,
            adjustment_date: None,
            waypoints: Vec::new(),
        }
    }

    fn equator() -> LatLongHeight {
        LatLongHeight {
            latitude: 0.0,
            longitude: 0.0,
            height: 0.0,
        }
    }

    #[test]
    fn rise_set_angle_itself_is_morning() {
        assert_eq!(classify(95.0, 95.0), DayPhase::Morning);
        assert_eq!(classify(95.0 + 1e-9, 95.0), DayPhase::MorningTwilight);
        assert_eq!(classify(107.0, 95.0), DayPhase::MorningTwilight);
        assert_eq!(classify(107.5, 95.0), DayPhase::AfterMidnight);
        assert_eq!(classify(0.0, 95.0), DayPhase::Afternoon);
        assert_eq!(classify(-95.0, 95.0), DayPhase::EveningTwilight);
        assert_eq!(classify(-106.9, 95.0), DayPhase::EveningTwilight);
        assert_eq!(classify(-107.0, 95.0), DayPhase::BeforeMidnight);
        assert_eq!(classify(180.0, 95.0), DayPhase::AfterMidnight);
    }

    #[test]
    fn star_on_the_equator_has_zero_declination() {
        let star = body("Star", Vector::new(0.0, 1.0e6, 0.0), 0.0, 1_000.0);
        let planet = body("Planet", Vector::ZERO, 3.0, 100.0);
        let geometry = star_geometry(&planet, &star);
        assert_eq!(geometry.declination, 0.0);
        assert_relative_eq!(geometry.meridian, 0.0);
        assert_relative_eq!(geometry.apparent_radius, (1.0e-3_f64).asin().to_degrees());
    }

    #[test]
    fn non_rotating_body_never_predicts_an_event() {
        let star = body("Star", Vector::new(0.0, 1.0e6, 2.0e5), 0.0, 1_000.0);
        let planet = body("Tidal", Vector::ZERO, 0.0, 100.0);
        for (lat, lon) in [(0.0, 0.0), (30.0, 120.0), (-45.0, -170.0)] {
            let observer = LatLongHeight {
                latitude: lat,
                longitude: lon,
                height: 1.0,
            };
            let outlook = predict(&observer, &planet, &star, 1234.5).expect("prediction");
            assert!(matches!(outlook, DiurnalOutlook::NoRotation { .. }));
            assert_eq!(outlook.next_event_label(), "N/A");
            assert_eq!(outlook.minutes_to_event(), 0.0);
        }
    }

    #[test]
    fn polar_conditions_short_circuit() {
        // Star 45 degrees above the equator: 60N never sees night, 60S never sees day.
        let star = body("Star", Vector::new(0.0, 1.0e6, 1.0e6), 0.0, 1_000.0);
        let planet = body("Tilted", Vector::ZERO, 5.0, 100.0);
        let north = LatLongHeight {
            latitude: 60.0,
            ..equator()
        };
        let south = LatLongHeight {
            latitude: -60.0,
            ..equator()
        };
        let day = predict(&north, &planet, &star, 10.0).expect("prediction");
        let night = predict(&south, &planet, &star, 10.0).expect("prediction");
        assert_eq!(day, DiurnalOutlook::PolarDay);
        assert_eq!(day.state_label(), "Daytime");
        assert_eq!(night.state_label(), "Nighttime");
        assert_eq!(night.next_event_label(), "N/A");
    }

    #[test]
    fn equatorial_noon_counts_down_to_sunset() {
        // Star along +Y faces longitude 0 at zero rotation; day 0 puts noon at longitude 0.
        let star = body("Star", Vector::new(0.0, 1.0e9, 0.0), 0.0, 1.0);
        let planet = body("Planet", Vector::ZERO, 4.0, 100.0);
        let outlook = predict(&equator(), &planet, &star, 0.0).expect("prediction");
        match outlook {
            DiurnalOutlook::Normal {
                phase,
                next_event,
                minutes_to_event,
                hour_angle,
                rise_set_hour_angle,
            } => {
                assert_eq!(phase, DayPhase::Afternoon);
                assert_eq!(next_event, SolarEvent::Sunset);
                assert_relative_eq!(hour_angle, 0.0);
                assert_relative_eq!(rise_set_hour_angle, 90.0, epsilon = 1e-6);
                // 90 degrees at 1.5 deg/min.
                assert_relative_eq!(minutes_to_event, 60.0, epsilon = 1e-4);
            }
            other => panic!("unexpected outlook {other:?}"),
        }
    }

    #[test]
    fn star_at_body_centre_is_a_hard_failure() {
        let star = body("Star", Vector::ZERO, 0.0, 1_000.0);
        let planet = body("Inside", Vector::ZERO, 4.0, 100.0);
        let err = predict(&equator(), &planet, &star, 0.0).unwrap_err();
        assert!(matches!(err, DiurnalError::NonFinite { .. }));
    }
}
