//! Re-exported APIs for consumers of the navigation crate.

pub use crate::format::DisplayZone;
pub use crate::report::{CompanionLocal, CompanionReport, PlanetaryReport, SpaceReport};
pub use crate::session::{
    DEFAULT_STAR, NavError, NavigationSession, PreviousSample, estimate_eta,
};
pub use crate::target::{CUSTOM_TARGET_NAME, TargetSpec};
pub use scnav_bodies::{Database, Location, OrbitalBody};
