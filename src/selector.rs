// src/selector.rs

//! Selects the newest usable infocmp among the discovered candidates
//!
//! Each candidate answers a `-V` probe. Only candidates that identify
//! themselves as ncurses tools are considered; everything else (probe
//! failures, foreign version strings) is skipped without further
//! diagnostics.

use crate::exec::{CommandRunner, RunRequest};
use crate::version::VersionKey;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Version probes must report this product prefix
pub const NCURSES_VERSION_PREFIX: &str = "ncurses ";

/// An infocmp binary that answered its version probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCandidate {
    pub path: PathBuf,
    pub version: VersionKey,
}

/// Probe one candidate, returning its version when it is a usable ncurses
/// tool
fn probe_version<R: CommandRunner + ?Sized>(runner: &R, path: &Path) -> Option<VersionKey> {
    let request = RunRequest::new(path.as_os_str()).arg("-V");
    let output = match runner.run(&request) {
        Ok(output) if output.success => output,
        Ok(_) | Err(_) => {
            debug!("version probe failed for {}", path.display());
            return None;
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version_str = stdout.trim_end();
    let Some(rest) = version_str.strip_prefix(NCURSES_VERSION_PREFIX) else {
        debug!("not an ncurses tool: {} reported {:?}", path.display(), version_str);
        return None;
    };

    match VersionKey::parse(rest) {
        Ok(version) => Some(version),
        Err(_) => {
            debug!("unparseable version from {}: {:?}", path.display(), rest);
            None
        }
    }
}

/// Pick the highest-versioned viable candidate
///
/// Candidates are probed in order; a later candidate replaces the current
/// best only when its version is strictly greater, so the first candidate
/// wins ties.
pub fn select_decompiler<R: CommandRunner + ?Sized>(
    runner: &R,
    candidates: &[PathBuf],
) -> Option<ToolCandidate> {
    let mut best: Option<ToolCandidate> = None;

    for path in candidates {
        let Some(version) = probe_version(runner, path) else {
            continue;
        };

        println!("found {} {}", path.display(), version);
        if best.as_ref().map_or(true, |b| version > b.version) {
            best = Some(ToolCandidate {
                path: path.clone(),
                version,
            });
        }
    }

    match &best {
        Some(candidate) => {
            println!("selecting {} {}", candidate.path.display(), candidate.version);
        }
        None => println!("No infocmp found"),
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::{FakeRunner, exit_failure, not_found, ok};

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_highest_version_wins() {
        let runner = FakeRunner::new(|request| {
            if request.program == "/old/bin/infocmp" {
                ok(b"ncurses 6.2.20200212\n")
            } else {
                ok(b"ncurses 6.4.20230520\n")
            }
        });

        let selected =
            select_decompiler(&runner, &paths(&["/old/bin/infocmp", "/new/bin/infocmp"])).unwrap();
        assert_eq!(selected.path, PathBuf::from("/new/bin/infocmp"));
        assert_eq!(selected.version, VersionKey::parse("6.4.20230520").unwrap());
    }

    #[test]
    fn test_tie_goes_to_first_candidate() {
        let runner = FakeRunner::new(|_| ok(b"ncurses 6.4.20230520\n"));

        let selected =
            select_decompiler(&runner, &paths(&["/first/bin/infocmp", "/second/bin/infocmp"]))
                .unwrap();
        assert_eq!(selected.path, PathBuf::from("/first/bin/infocmp"));
    }

    #[test]
    fn test_foreign_version_string_is_not_viable() {
        let runner = FakeRunner::new(|request| {
            if request.program == "/fake/bin/infocmp" {
                ok(b"totally-not-ncurses 9.9\n")
            } else {
                ok(b"ncurses 6.2.20200212\n")
            }
        });

        let selected =
            select_decompiler(&runner, &paths(&["/fake/bin/infocmp", "/real/bin/infocmp"]))
                .unwrap();
        assert_eq!(selected.path, PathBuf::from("/real/bin/infocmp"));
    }

    #[test]
    fn test_unparseable_version_is_not_viable() {
        let runner = FakeRunner::new(|_| ok(b"ncurses 6.4-rc1\n"));
        assert!(select_decompiler(&runner, &paths(&["/bin/infocmp"])).is_none());
    }

    #[test]
    fn test_probe_failures_are_skipped() {
        let runner = FakeRunner::new(|request| {
            if request.program == "/gone/bin/infocmp" {
                not_found()
            } else if request.program == "/broken/bin/infocmp" {
                exit_failure()
            } else {
                ok(b"ncurses 6.1.20180127\n")
            }
        });

        let selected = select_decompiler(
            &runner,
            &paths(&["/gone/bin/infocmp", "/broken/bin/infocmp", "/ok/bin/infocmp"]),
        )
        .unwrap();
        assert_eq!(selected.path, PathBuf::from("/ok/bin/infocmp"));
    }

    #[test]
    fn test_every_candidate_is_probed_exactly_once() {
        let runner = FakeRunner::new(|_| not_found());
        assert!(select_decompiler(&runner, &paths(&["infocmp"])).is_none());

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "infocmp");
        assert_eq!(calls[0].args, vec!["-V"]);
    }

    #[test]
    fn test_empty_candidate_list_selects_nothing() {
        let runner = FakeRunner::new(|_| ok(b"ncurses 6.4.20230520\n"));
        assert!(select_decompiler(&runner, &[]).is_none());
        assert!(runner.calls.borrow().is_empty());
    }
}
