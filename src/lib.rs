//! Navigation engine for a rotating-body star system.
//!
//! The member crates each own one concern; this façade re-exports them under
//! short names so front-ends and integration tests need a single dependency.

pub use scnav_bodies as bodies;
pub use scnav_config as config;
pub use scnav_core as core;
pub use scnav_diurnal as diurnal;
pub use scnav_export as export;
pub use scnav_frames as frames;
pub use scnav_guidance as guidance;
pub use scnav_importer as importer;
pub use scnav_nav as nav;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
