use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use scnav::bodies::Database;
use scnav::config::{NavSettings, load_database, load_settings};
use scnav::core::Vector;
use scnav::export::logbook::{Entry, Logbook, SurfaceFix};
use scnav::export::reports::{JsonLines, writer_for_path};
use scnav::importer::parse_sample;
use scnav::nav::frames::LatLongHeight;
use scnav::nav::{DisplayZone, Location, NavError, NavigationSession, TargetSpec};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Star system navigation from /showlocation readouts"
)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,

    /// Body database (YAML/JSON/TOML file or directory of TOML files)
    #[arg(long, global = true, default_value = "configs/database.yaml")]
    database: PathBuf,

    /// User settings file (defaults apply when omitted)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Sample lines to read ('-' for stdin)
    #[arg(long, global = true, default_value = "-")]
    input: PathBuf,

    /// Where to write JSON reports ('-' for stdout)
    #[arg(long, global = true, default_value = "-")]
    output: PathBuf,

    /// Clock correction in seconds (overrides the settings file)
    #[arg(long, global = true, allow_hyphen_values = true)]
    time_offset: Option<f64>,
}

#[derive(Subcommand)]
enum Mode {
    /// Guide to a destination on or around a planetary body
    PlanetaryNav(PlanetaryArgs),
    /// Guide to a destination in the system-global frame
    SpaceNav(SpaceArgs),
    /// Report position only, with no destination
    Companion,
}

#[derive(Args)]
struct PlanetaryArgs {
    /// Body holding the destination
    #[arg(long)]
    container: String,

    /// Named waypoint on the body; coordinates are used when omitted
    #[arg(long)]
    target: Option<String>,

    /// How custom coordinates are given
    #[arg(long, value_enum, default_value_t = EntryType::Xyz)]
    entry_type: EntryType,

    #[command(flatten)]
    xyz: XyzArgs,

    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    long: Option<f64>,

    /// Height above the surface in km
    #[arg(long, allow_hyphen_values = true)]
    height: Option<f64>,
}

#[derive(Args)]
struct SpaceArgs {
    /// Named space point of interest; coordinates are used when omitted
    #[arg(long)]
    target: Option<String>,

    #[command(flatten)]
    xyz: XyzArgs,
}

/// Custom coordinates in km.
#[derive(Args)]
struct XyzArgs {
    #[arg(long, allow_hyphen_values = true)]
    x: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    y: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    z: Option<f64>,
}

/// Selected mode with its resolved destination.
enum Run {
    Planetary(Location),
    Space(Location),
    Companion,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum EntryType {
    Xyz,
    LatLongHeight,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = match &cli.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => NavSettings::default(),
    };
    let config = load_database(&cli.database)
        .with_context(|| format!("loading database from {}", cli.database.display()))?;
    let database = Database::from_config(&config)?;
    info!(
        bodies = database.bodies().len(),
        space_pois = database.space_pois().len(),
        path = %cli.database.display(),
        "database loaded"
    );

    let run = match &cli.mode {
        Mode::PlanetaryNav(args) => Run::Planetary(planetary_target(args)?.resolve(&database)?),
        Mode::SpaceNav(args) => Run::Space(space_target(args)?.resolve(&database)?),
        Mode::Companion => Run::Companion,
    };
    if let Run::Planetary(target) | Run::Space(target) = &run {
        info!(target = %target.name, container = ?target.parent, "destination set");
    }

    let time_offset = cli.time_offset.unwrap_or(settings.time_offset_s);
    let clock = move || wall_clock() + time_offset;

    let mut session = NavigationSession::new(&database)
        .with_star(settings.star.clone())
        .with_display(DisplayZone::from_offset_minutes(settings.utc_offset_minutes))
        .starting_at(clock());

    let mut logbook = match (&run, settings.logs_enabled) {
        (Run::Companion, true) => Some(Logbook::open(&settings.log_path)?),
        _ => None,
    };

    let mut sink = JsonLines::new(writer_for_path(&cli.output)?);
    let mut last_line: Option<String> = None;
    for line in open_input(&cli.input)?.lines() {
        let line = line?;
        if last_line.as_deref() == Some(line.as_str()) {
            continue;
        }
        last_line = Some(line.clone());
        let sample = match parse_sample(&line, clock()) {
            Ok(Some(sample)) => sample,
            Ok(None) => continue,
            Err(err) => {
                warn!(%err, "skipping malformed readout");
                continue;
            }
        };

        match &run {
            Run::Companion => {
                let report = match session.compute_companion(sample.position, sample.timestamp) {
                    Ok(report) => report,
                    Err(err) => {
                        skip(&err);
                        continue;
                    }
                };
                if let Some(logbook) = logbook.as_mut() {
                    let surface = report.local.as_ref().map(|local| SurfaceFix {
                        container: &report.player_actual_container,
                        local: session.previous().local,
                        longitude: local.surface.longitude,
                        latitude: local.surface.latitude,
                        height: local.surface.height,
                    });
                    logbook.append(&Entry {
                        system: &settings.system,
                        global: sample.position,
                        surface,
                        time: sample.timestamp,
                        readable_time: &report.updated,
                        player: &settings.player,
                        comment: "",
                    })?;
                }
                sink.write(&report)?;
            }
            Run::Planetary(target) => {
                match session.compute_planetary(sample.position, target, sample.timestamp) {
                    Ok(Some(report)) => sink.write(&report)?,
                    Ok(None) => {}
                    Err(err) => skip(&err),
                }
            }
            Run::Space(target) => {
                match session.compute_space(sample.position, target, sample.timestamp) {
                    Ok(report) => sink.write(&report)?,
                    Err(err) => skip(&err),
                }
            }
        }
    }

    info!(reports = sink.written(), "input exhausted");
    Ok(())
}

fn planetary_target(args: &PlanetaryArgs) -> anyhow::Result<TargetSpec> {
    let container = args.container.clone();
    if let Some(name) = &args.target {
        return Ok(TargetSpec::Known {
            container,
            name: name.clone(),
        });
    }
    match args.entry_type {
        EntryType::Xyz => Ok(TargetSpec::Local {
            container,
            position: args.xyz.vector()?,
        }),
        EntryType::LatLongHeight => {
            let (Some(latitude), Some(longitude), Some(height)) =
                (args.lat, args.long, args.height)
            else {
                bail!("--lat, --long and --height are required without --target");
            };
            Ok(TargetSpec::LatLonHeight {
                container,
                position: LatLongHeight {
                    latitude,
                    longitude,
                    height,
                },
            })
        }
    }
}

fn space_target(args: &SpaceArgs) -> anyhow::Result<TargetSpec> {
    match &args.target {
        Some(name) => Ok(TargetSpec::KnownSpace { name: name.clone() }),
        None => Ok(TargetSpec::Global {
            position: args.xyz.vector()?,
        }),
    }
}

impl XyzArgs {
    fn vector(&self) -> anyhow::Result<Vector> {
        let (Some(x), Some(y), Some(z)) = (self.x, self.y, self.z) else {
            bail!("--x, --y and --z are required without --target");
        };
        Ok(Vector::new(x, y, z))
    }
}

fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    Ok(Box::new(BufReader::new(File::open(path)?)))
}

fn wall_clock() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or_default()
}

fn skip(err: &NavError) {
    warn!(%err, "no report for sample");
}

