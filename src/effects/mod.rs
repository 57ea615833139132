//! Per-pixel effect stages.
//!
//! Every stage here is a pure function of (coordinate, time, texture,
//! parameters). Time-dependent terms are resolved once per frame by the plan
//! compiler so all pixels of a frame see one snapshot.

pub mod bloom;
pub mod chromatic;
pub mod distortion;
pub mod god_rays;
pub mod grade;
pub mod hue;
pub mod scanline;
pub mod vignette;
