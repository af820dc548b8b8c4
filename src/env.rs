// src/env.rs

//! Process-environment seam
//!
//! The pipeline reads two pieces of ambient state: the user's home
//! directory and the `TERMINFO_DIRS` search path. Both go through the
//! [`EnvProvider`] trait so tests can inject fixed values.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Read-only view of the process environment
pub trait EnvProvider {
    /// The current user's home directory
    fn home_dir(&self) -> Option<PathBuf>;

    /// Look up an environment variable
    fn var(&self, name: &OsStr) -> Option<OsString>;
}

/// Reads the real process environment
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn var(&self, name: &OsStr) -> Option<OsString> {
        std::env::var_os(name)
    }
}
