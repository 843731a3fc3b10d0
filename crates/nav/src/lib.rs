//! Navigation façade: sessions for the three navigation modes, target
//! selection, and the display records they produce.

pub mod format;
pub mod report;
pub mod session;
pub mod target;

pub use facade::*;
pub use scnav_diurnal as diurnal;
pub use scnav_frames as frames;
pub use scnav_guidance as guidance;

mod facade;
