//! # Panel interface crate.
//!
//! Defines the JSON message contract between the machine backend and the
//! panel executables. Messages travel over the hermes bus, the transport
//! itself is not part of this crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Machine axis identifiers
pub mod axis;

/// Outbound commands, panel to backend
pub mod cmd;

/// Inbound messages, backend to panel
pub mod msg;

/// Work and tool offset records
pub mod offset;
