use std::fs;

use approx::assert_abs_diff_eq;
use scnav::bodies::{Database, DatabaseError};
use scnav::config::{NavSettings, load_database, load_settings};
use scnav::core::Vector;
use scnav::export::logbook::{Entry, HEADER, Logbook, NEW_RUN, SurfaceFix};
use scnav::frames::{LatLongHeight, resolve_container};
use scnav::importer::parse_sample;
use scnav::nav::{CUSTOM_TARGET_NAME, DisplayZone, NavError, NavigationSession, TargetSpec};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/microtech.yaml");
const FIRST_SAMPLE: &str =
    "Coordinates: x:22462615339.086491 y:37186143497.515411 z:766202.569542 T:1674962568.3761563";

fn fixture_database() -> Database {
    Database::from_config(&load_database(FIXTURE).expect("fixture")).expect("valid database")
}

#[test]
fn fixture_keeps_body_order_and_waypoints() {
    let database = fixture_database();
    let names: Vec<&str> = database.bodies().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Stanton", "microTech"]);
    let microtech = database.body("microTech").expect("microTech");
    assert_eq!(microtech.waypoints.len(), 9);
    assert_eq!(microtech.influence_radius(), 3.0 * 1439.593);
    assert_eq!(database.space_pois().len(), 1);
}

#[test]
fn database_without_orbital_markers_is_rejected() {
    let mut config = load_database(FIXTURE).expect("fixture");
    config.containers[1].pois.retain(|poi| poi.name != "OM-4");
    assert_eq!(
        Database::from_config(&config).unwrap_err(),
        DatabaseError::MissingOrbitalMarker {
            body: "microTech".into(),
            marker: "OM-4",
        }
    );
}

#[test]
fn duplicate_bodies_are_rejected() {
    let mut config = load_database(FIXTURE).expect("fixture");
    let copy = config.containers[1].clone();
    config.containers.push(copy);
    assert_eq!(
        Database::from_config(&config).unwrap_err(),
        DatabaseError::DuplicateBody("microTech".into())
    );
}

#[test]
fn overlapping_spheres_resolve_to_the_later_body() {
    let mut config = load_database(FIXTURE).expect("fixture");
    config.containers[0].om_radius = 1.0e9;
    let database = Database::from_config(&config).expect("database");
    let sample = parse_sample(FIRST_SAMPLE, 0.0).expect("parse").expect("sample");
    let body = resolve_container(&sample.position, database.bodies()).expect("container");
    assert_eq!(body.name, "microTech");
}

#[test]
fn settings_load_from_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.toml");
    fs::write(
        &path,
        "star = \"Stanton\"\nlogs_enabled = true\nplayer = \"pilot\"\nutc_offset_minutes = -480\n",
    )
    .expect("write");

    let settings = load_settings(&path).expect("settings");
    assert!(settings.logs_enabled);
    assert_eq!(settings.player, "pilot");
    assert_eq!(settings.utc_offset_minutes, Some(-480));
    assert_eq!(settings.log_path, NavSettings::default().log_path);
}

#[test]
fn target_choices_resolve_against_the_database() {
    let database = fixture_database();

    let known = TargetSpec::Known {
        container: "microTech".into(),
        name: "New Babbage".into(),
    }
    .resolve(&database)
    .expect("known");
    assert_eq!(known.coords, Vector::new(520.723, 419.364, 743.655));

    let surface = TargetSpec::LatLonHeight {
        container: "microTech".into(),
        position: LatLongHeight {
            latitude: 0.0,
            longitude: 0.0,
            height: 0.0,
        },
    }
    .resolve(&database)
    .expect("lat/lon");
    assert_eq!(surface.name, CUSTOM_TARGET_NAME);
    assert_eq!(surface.parent.as_deref(), Some("microTech"));
    assert_abs_diff_eq!(surface.coords, Vector::new(0.0, 1000.0, 0.0), epsilon = 1e-9);

    let space = TargetSpec::KnownSpace {
        name: "Comm Array ST1-61".into(),
    }
    .resolve(&database)
    .expect("space poi");
    assert_eq!(space.parent, None);

    assert_eq!(
        TargetSpec::Known {
            container: "microTech".into(),
            name: "Lorville".into(),
        }
        .resolve(&database),
        Err(NavError::UnknownWaypoint {
            body: "microTech".into(),
            name: "Lorville".into(),
        })
    );
    assert_eq!(
        TargetSpec::Local {
            container: "Hurston".into(),
            position: Vector::ZERO,
        }
        .resolve(&database),
        Err(NavError::UnknownBody("Hurston".into()))
    );
}

#[test]
fn missing_star_is_reported_without_touching_the_session() {
    let database = fixture_database();
    let target = TargetSpec::Known {
        container: "microTech".into(),
        name: "New Babbage".into(),
    }
    .resolve(&database)
    .expect("target");
    let sample = parse_sample(FIRST_SAMPLE, 0.0).expect("parse").expect("sample");

    let mut session = NavigationSession::new(&database).with_star("Pyro");
    let err = session
        .compute_planetary(sample.position, &target, sample.timestamp)
        .unwrap_err();
    assert_eq!(err, NavError::UnknownStar("Pyro".into()));
    assert_eq!(session.previous().timestamp, 0.0);
}

#[test]
fn target_on_another_body_yields_nothing() {
    let mut config = load_database(FIXTURE).expect("fixture");
    config.containers[0].om_radius = 1.0e9;
    let database = Database::from_config(&config).expect("database");
    let target = TargetSpec::Local {
        container: "Stanton".into(),
        position: Vector::new(1_000.0, 0.0, 0.0),
    }
    .resolve(&database)
    .expect("target");
    let sample = parse_sample(FIRST_SAMPLE, 0.0).expect("parse").expect("sample");

    let mut session = NavigationSession::new(&database).starting_at(42.0);
    let before = session.previous().clone();
    let report = session
        .compute_planetary(sample.position, &target, sample.timestamp)
        .expect("no error");
    assert!(report.is_none());
    assert_eq!(session.previous(), &before);
}

#[test]
fn space_mode_follows_a_surface_target_around_the_body() {
    let database = fixture_database();
    let target = TargetSpec::Known {
        container: "microTech".into(),
        name: "New Babbage".into(),
    }
    .resolve(&database)
    .expect("target");
    let sample = parse_sample(FIRST_SAMPLE, 0.0).expect("parse").expect("sample");

    let report = NavigationSession::new(&database)
        .with_display(DisplayZone::from_offset_minutes(Some(-480)))
        .compute_space(sample.position, &target, sample.timestamp)
        .expect("report");

    assert_eq!(report.updated, "19:22:48");
    assert_eq!(report.target, "New Babbage");
    // Same geometry as the planetary report for this sample.
    assert_eq!(report.distance_to_poi, "25.215 km");
}

#[test]
fn companion_reports_position_inside_and_outside_a_body() {
    let database = fixture_database();
    let mut session = NavigationSession::new(&database)
        .with_display(DisplayZone::from_offset_minutes(Some(-480)));
    let sample = parse_sample(FIRST_SAMPLE, 0.0).expect("parse").expect("sample");

    let report = session
        .compute_companion(sample.position, sample.timestamp)
        .expect("report");
    assert_eq!(report.player_actual_container, "microTech");
    let local = report.local.as_ref().expect("local fields");
    assert_eq!(local.player_x, 522.646);
    assert_eq!(local.player_lat, "49.12°");
    assert_eq!(local.player_om1, "OM-1 : 945.132 km");
    assert_eq!(local.player_closest_poi, "Tears of Fire Painting : 20.456 km");
    assert!(local.player_second_closest_poi.starts_with("Chestnuts on an open fire : "));

    let json = serde_json::to_value(&report).expect("json");
    assert_eq!(json["player_OM1"], "OM-1 : 945.132 km");
    assert!(json.get("surface").is_none());

    let adrift = session
        .compute_companion(Vector::new(1.0e9, 1.0e9, 0.0), sample.timestamp + 10.0)
        .expect("report");
    assert_eq!(adrift.player_actual_container, "None");
    assert!(adrift.local.is_none());
    assert_eq!(session.previous().container, None);
}

#[test]
fn logbook_rows_read_back_with_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("Logs.csv");
    {
        let mut log = Logbook::open(&path).expect("open");
        let entry = Entry {
            system: "Stanton",
            global: Vector::new(22462615.339, 37186143.497, 766.202),
            surface: Some(SurfaceFix {
                container: "microTech",
                local: Vector::new(522.646, 408.242, 766.203),
                longitude: -52.01,
                latitude: 49.12,
                height: 13.4,
            }),
            time: 1674962568.5,
            readable_time: "19:22:48",
            player: "pilot",
            comment: "approach",
        };
        assert_eq!(log.append(&entry).expect("append"), 1);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(&path)
        .expect("reader");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), HEADER);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(&rows[0][0], NEW_RUN);
    assert_eq!(&rows[1][0], "1");
    assert_eq!(&rows[1][5], "microTech");
    assert_eq!(&rows[1][11], "13.4");
    assert_eq!(&rows[1][15], "approach");
}
