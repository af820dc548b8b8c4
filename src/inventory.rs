// src/inventory.rs

//! Package-manager inventory scanning for infocmp candidates
//!
//! Asks MacPorts and Homebrew which files the ncurses package installed
//! and keeps the paths that look like an infocmp binary. Both backends are
//! best-effort: a missing package manager or a failed query simply
//! contributes no candidates.

use crate::exec::{CommandRunner, RunRequest};
use std::path::PathBuf;
use tracing::debug;

/// Package whose inventory is scanned for infocmp binaries
pub const NCURSES_PACKAGE: &str = "ncurses";

/// Inventory paths must end with this suffix to count as a candidate
const INFOCMP_SUFFIX: &str = "/bin/infocmp";

/// Bare name resolved through the executable search path when no backend
/// finds anything
pub const INFOCMP_FALLBACK: &str = "infocmp";

/// Files installed by a package according to MacPorts
///
/// MacPorts does not signal "not installed" through its exit code, so the
/// header line is validated instead. File lines are indented by two spaces.
pub fn macports_files<R: CommandRunner + ?Sized>(runner: &R, package: &str) -> Vec<String> {
    let request = RunRequest::new("port").arg("contents").arg(package);
    let output = match runner.run(&request) {
        Ok(output) if output.success => output,
        Ok(_) | Err(_) => {
            debug!("port contents {} yielded nothing", package);
            return Vec::new();
        }
    };

    let expected_header = format!("Port {package} contains:");
    let text = String::from_utf8_lossy(&output.stdout);
    let mut lines = text.lines();
    if lines.next() != Some(expected_header.as_str()) {
        debug!("unexpected port contents header for {}", package);
        return Vec::new();
    }

    lines
        .filter_map(|line| line.strip_prefix("  "))
        .map(str::to_string)
        .collect()
}

/// Files installed by a package according to Homebrew
///
/// Color output is forced off for the child so the lines parse cleanly.
pub fn homebrew_files<R: CommandRunner + ?Sized>(runner: &R, package: &str) -> Vec<String> {
    let request = RunRequest::new("brew")
        .arg("ls")
        .arg("--verbose")
        .arg(package)
        .env_remove("HOMEBREW_COLOR")
        .env("HOMEBREW_NO_COLOR", "1")
        .discard_stderr();
    let output = match runner.run(&request) {
        Ok(output) if output.success => output,
        Ok(_) | Err(_) => {
            debug!("brew ls --verbose {} yielded nothing", package);
            return Vec::new();
        }
    };

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

/// All infocmp candidates worth probing
///
/// Scans every backend for the ncurses package and keeps paths ending in
/// `/bin/infocmp`. When every backend comes up empty, the result is exactly
/// one fallback candidate: the bare `infocmp` name.
pub fn infocmp_candidates<R: CommandRunner + ?Sized>(runner: &R) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = macports_files(runner, NCURSES_PACKAGE)
        .into_iter()
        .chain(homebrew_files(runner, NCURSES_PACKAGE))
        .filter(|path| path.ends_with(INFOCMP_SUFFIX))
        .map(PathBuf::from)
        .collect();

    if candidates.is_empty() {
        candidates.push(PathBuf::from(INFOCMP_FALLBACK));
    }
    candidates
}
