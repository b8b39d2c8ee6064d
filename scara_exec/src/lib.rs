//! # SCARA panel readout library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to
//! access items defined inside the readout executable.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Cycle-scoped data store shared by the executable's modules
pub mod data_store;

/// Readout module, folds machine status messages into display frames
pub mod readout;
