//! # Parameters for the Readout module

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use panel_if::axis::Axis;
use panel_if::offset::{ToolOffsetTable, WorkOffsetTable};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Readout parameters.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Params {
    // ---- ARM GEOMETRY ----
    /// The length of the first (shoulder) arm link. The second link length
    /// comes from the active tool offset.
    ///
    /// Units: millimetres
    pub theta_len_mm: f64,

    // ---- AXES ----
    /// The axes fitted to this machine. Axes not listed here never appear in
    /// a display frame, even if the machine reports them.
    pub axes: Vec<Axis>,

    // ---- READOUT BEHAVIOUR ----
    /// Which formula corrects the Z axis readout, see [`ZCorrectionMode`].
    #[serde(default)]
    pub z_correction: ZCorrectionMode,

    // ---- INITIAL OFFSETS ----
    /// Work offset table active at startup, replaced wholesale by backend
    /// pushes.
    pub work_offsets: WorkOffsetTable,

    /// Name of the work offset active at startup.
    pub work_offset: String,

    /// Tool offset table active at startup, replaced wholesale by backend
    /// pushes.
    pub tool_offsets: ToolOffsetTable,

    /// Name of the tool offset active at startup.
    pub tool_offset: String,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Which formula corrects the Z axis readout.
///
/// Deployed panels compute the work Z as `z - work.z - -tool.z`. The doubled
/// sign adds the tool correction, while the matching Y handling subtracts its
/// own. Both formulas are available here and the parameter file picks one.
/// The legacy formula is the default so this readout agrees with what
/// operators already see in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZCorrectionMode {
    /// Deployed behaviour: `z - work.z + tool.z`.
    LegacyAdditiveTool,

    /// Fixed behaviour: `z - work.z - tool.z`.
    SubtractTool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ZCorrectionMode {
    fn default() -> Self {
        ZCorrectionMode::LegacyAdditiveTool
    }
}

impl ZCorrectionMode {
    /// Apply the correction to a raw Z axis reading.
    ///
    /// Units: all arguments and the result in millimetres
    pub fn apply(&self, z_raw_mm: f64, work_z_mm: f64, tool_z_mm: f64) -> f64 {
        match self {
            ZCorrectionMode::LegacyAdditiveTool => z_raw_mm - work_z_mm + tool_z_mm,
            ZCorrectionMode::SubtractTool => z_raw_mm - work_z_mm - tool_z_mm,
        }
    }
}
