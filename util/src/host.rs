//! Host platform utility functions

use std::path::PathBuf;

/// Name of the environment variable holding the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "SCARA_SW_ROOT";

/// Retrieve the software root directory from the environment.
///
/// The root directory contains the `params` directory and is where session
/// directories are created.
pub fn get_scara_sw_root() -> Result<PathBuf, std::env::VarError> {
    std::env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
