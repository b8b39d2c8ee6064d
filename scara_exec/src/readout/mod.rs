//! # Readout module
//!
//! The readout folds machine status messages into display frames: per-axis
//! work and machine coordinates plus the cartesian pose of the arm tip,
//! recovered from the joint encoders by forward kinematics and mapped into
//! the operator's work frame by the active work offset.
//!
//! The module does not talk to the machine itself. Status messages and
//! offset table pushes arrive through the message processor, and frames
//! leave through the data store.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod fk;
mod params;
mod state;
mod work_frame;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use fk::*;
pub use params::*;
pub use state::*;
pub use work_frame::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur during Readout processing.
#[derive(Debug, thiserror::Error)]
pub enum ReadoutError {
    #[error("No work offset named \"{0}\" in the current table")]
    WorkOffsetNotFound(String),

    #[error("No tool offset named \"{0}\" in the current table")]
    ToolOffsetNotFound(String),

    #[error("Link lengths must be positive and finite, got theta = {0} mm, phi = {1} mm")]
    InvalidLinkGeometry(f64, f64),

    #[error("Joint angles must be finite, got theta = {0} deg, phi = {1} deg")]
    NonFiniteAngles(f64, f64),
}

/// Errors which can occur during Readout initialisation.
#[derive(Debug, thiserror::Error)]
pub enum ReadoutInitError {
    #[error("Failed to load readout parameters: {0}")]
    Params(#[from] util::params::LoadError),

    #[error("Initial offset configuration is unusable: {0}")]
    Offsets(#[from] ReadoutError),
}
