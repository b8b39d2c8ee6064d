//! # Machine axis identifiers

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The axes a machine can be fitted with.
///
/// Which of these a particular machine actually carries is configuration, and
/// a status message may report any subset of them. On a SCARA machine the `x`
/// and `y` axes are the shoulder and elbow joints.
#[derive(Debug, Serialize, Deserialize, Hash, Eq, PartialEq, Copy, Clone)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
    A,
    B,
    C,
}
