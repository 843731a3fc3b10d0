use std::sync::LazyLock;

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use scnav::bodies::{Database, OrbitalBody};
use scnav::config::load_database;
use scnav::core::Vector;
use scnav::diurnal::{DayPhase, classify};
use scnav::frames::{
    LatLongHeight, from_local_frame, lat_long_height, local_from_lat_long_height, to_local_frame,
};
use scnav::guidance::{Axis, Severity, marker_for};
use scnav::nav::estimate_eta;

static DATABASE: LazyLock<Database> = LazyLock::new(|| {
    let config = load_database(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/microtech.yaml"
    ))
    .expect("fixture database");
    Database::from_config(&config).expect("valid database")
});

fn microtech() -> &'static OrbitalBody {
    DATABASE.body("microTech").expect("microTech")
}

fn component() -> impl Strategy<Value = f64> {
    -1.0e4..1.0e4
}

fn vector() -> impl Strategy<Value = Vector> {
    (component(), component(), component()).prop_map(|(x, y, z)| Vector::new(x, y, z))
}

/// Position of a phase in the daily sequence, starting at midnight.
fn rank(phase: DayPhase) -> u8 {
    match phase {
        DayPhase::AfterMidnight => 0,
        DayPhase::MorningTwilight => 1,
        DayPhase::Morning => 2,
        DayPhase::Afternoon => 3,
        DayPhase::EveningTwilight => 4,
        DayPhase::BeforeMidnight => 5,
    }
}

proptest! {
    #[test]
    fn cross_product_is_anticommutative(a in vector(), b in vector()) {
        prop_assert_eq!(a.cross(&b), -b.cross(&a));
    }

    #[test]
    fn dot_product_is_symmetric(a in vector(), b in vector()) {
        prop_assert_eq!(a.dot(&b), b.dot(&a));
    }

    #[test]
    fn angle_to_self_vanishes(a in vector()) {
        prop_assert!(a.angle_between(&a) < 1e-6);
        prop_assert_eq!(a.angle_between(&Vector::ZERO), 0.0);
        prop_assert_eq!(Vector::ZERO.angle_between(&a), 0.0);
    }

    #[test]
    fn angle_stays_in_range(a in vector(), b in vector()) {
        let angle = a.angle_between(&b);
        prop_assert!((0.0..=std::f64::consts::PI).contains(&angle));
    }

    #[test]
    fn local_frame_round_trips(offset in vector(), elapsed in 0.0..1.0e9_f64) {
        let body = microtech();
        let global = body.coords + offset;
        let local = to_local_frame(&global, body, elapsed);
        let back = from_local_frame(&local, body, elapsed);
        assert_abs_diff_eq!(back, global, epsilon = 1e-5);
        assert_abs_diff_eq!(local.magnitude(), offset.magnitude(), epsilon = 1e-5);
    }

    #[test]
    fn spherical_coordinates_round_trip(
        latitude in -89.0..89.0_f64,
        longitude in -179.0..179.0_f64,
        height in 0.0..500.0_f64,
    ) {
        let body = microtech();
        let surface = LatLongHeight { latitude, longitude, height };
        let local = local_from_lat_long_height(&surface, body);
        let back = lat_long_height(&local, body);
        assert_abs_diff_eq!(back.latitude, latitude, epsilon = 1e-9);
        assert_abs_diff_eq!(back.longitude, longitude, epsilon = 1e-9);
        assert_abs_diff_eq!(back.height, height, epsilon = 1e-9);
    }

    #[test]
    fn day_phases_follow_the_hour_angle(
        rise_set in 0.5..160.0_f64,
        a in -180.0..=180.0_f64,
        b in -180.0..=180.0_f64,
    ) {
        let (later, earlier) = if a >= b { (a, b) } else { (b, a) };
        prop_assert!(rank(classify(later, rise_set)) <= rank(classify(earlier, rise_set)));
    }

    #[test]
    fn daylight_spans_the_rise_set_window(rise_set in 0.5..160.0_f64, fraction in -0.999..=1.0_f64) {
        let hour_angle = rise_set * fraction;
        let phase = classify(hour_angle, rise_set);
        prop_assert!(matches!(phase, DayPhase::Morning | DayPhase::Afternoon), "{phase:?}");
    }

    #[test]
    fn orbital_marker_follows_coordinate_sign(value in 1e-9..1.0e4_f64) {
        prop_assert_eq!(marker_for(Axis::X, value), "OM-5");
        prop_assert_eq!(marker_for(Axis::X, -value), "OM-6");
        prop_assert_eq!(marker_for(Axis::Y, value), "OM-3");
        prop_assert_eq!(marker_for(Axis::Y, -value), "OM-4");
        prop_assert_eq!(marker_for(Axis::Z, value), "OM-1");
        prop_assert_eq!(marker_for(Axis::Z, -value), "OM-2");
    }

    #[test]
    fn distance_bands_are_monotone(a in 0.0..1.0e5_f64, b in 0.0..1.0e5_f64) {
        let tier = |km: f64| match Severity::for_distance(km) {
            Severity::Good => 0,
            Severity::Caution => 1,
            Severity::Warning => 2,
        };
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(tier(near) <= tier(far));
    }

    #[test]
    fn eta_without_closing_rate_is_zero(elapsed in 0.0..1.0e6_f64, remaining in 0.0..1.0e8_f64) {
        prop_assert_eq!(estimate_eta(elapsed, remaining, 0.0), 0.0);
    }
}

#[test]
fn zero_coordinates_face_the_positive_markers() {
    assert_eq!(marker_for(Axis::X, 0.0), "OM-5");
    assert_eq!(marker_for(Axis::Y, 0.0), "OM-3");
    assert_eq!(marker_for(Axis::Z, 0.0), "OM-1");
}

#[test]
fn distance_band_edges_belong_to_the_lower_tier() {
    assert_eq!(Severity::for_distance(100.0), Severity::Good);
    assert_eq!(Severity::for_distance(100.000001), Severity::Caution);
    assert_eq!(Severity::for_distance(1_000.0), Severity::Caution);
    assert_eq!(Severity::for_distance(1_000.000001), Severity::Warning);
}

#[test]
fn rotation_at_reference_epoch_is_the_adjustment() {
    let body = microtech();
    assert_abs_diff_eq!(body.rotation_angle_at(0.0), 217.380587, epsilon = 1e-12);
}
