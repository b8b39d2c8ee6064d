//! # Work and tool offset records
//!
//! Offsets live in named tables owned by the machine backend. The backend
//! pushes whole tables to the panel whenever they change, and the panel only
//! ever asks the backend to edit them, so a table held by a panel module is
//! always a snapshot, never the authority.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// A work offset table keyed by offset name, for example "G54".
pub type WorkOffsetTable = HashMap<String, WorkOffset>;

/// A tool offset table keyed by offset name, for example "T1".
pub type ToolOffsetTable = HashMap<String, ToolOffset>;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A work coordinate offset, giving where a work origin sits in the machine
/// frame.
///
/// Fields the backend omits default to zero, matching how the panel treats
/// blank offset table cells.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Default)]
#[serde(default)]
pub struct WorkOffset {
    /// Work origin along machine X.
    ///
    /// Units: millimetres
    pub x: f64,

    /// Work origin along machine Y.
    ///
    /// Units: millimetres
    pub y: f64,

    /// Work origin along machine Z.
    ///
    /// Units: millimetres
    pub z: f64,

    /// Rotation of the work frame about the machine origin.
    ///
    /// Units: radians
    pub a: f64,
}

/// A per-tool geometric correction.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ToolOffset {
    /// Correction subtracted from the commanded Y (elbow) position.
    ///
    /// Units: millimetres
    pub p: f64,

    /// Effective second (elbow) link length with this tool fitted.
    ///
    /// Units: millimetres
    pub l: f64,

    /// Correction applied to the Z axis readout.
    ///
    /// Units: millimetres
    pub z: f64,
}
