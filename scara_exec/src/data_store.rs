//! # Data Store
//!
//! The data store holds all data passed between modules in the executable.
//! Modules themselves live here too, so the whole executable state is
//! reachable from one place.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::readout;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // ---- CYCLE MANAGEMENT ----
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1 Hz boundary
    pub is_1_hz_cycle: bool,

    // ---- READOUT ----
    pub readout: readout::Readout,
    pub readout_input: readout::InputData,
    pub readout_output: readout::DisplayFrame,
    pub readout_status_rpt: readout::StatusReport,

    // ---- MACHINE ----
    /// Runnable files last reported by the machine
    pub machine_files: Vec<String>,

    // ---- MONITORING COUNTERS ----
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl DataStore {
    /// Perform the actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, sets
    /// the 1 Hz cycle flag and stamps the readout input with the cycle start
    /// time.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        self.is_1_hz_cycle = self.num_cycles % (cycle_frequency_hz as u128) == 0;

        self.readout_input = readout::InputData {
            status: None,
            time_s: util::session::get_elapsed_seconds(),
        };
        self.readout_output = readout::DisplayFrame::default();
        self.readout_status_rpt = readout::StatusReport::default();
    }
}
