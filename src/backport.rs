// src/backport.rs

//! The backport pipeline
//!
//! Exports `tmux-256color` with the newest available infocmp, clamps
//! overflowing numeric capabilities, and recompiles the entry with the
//! stock tic into the user's terminfo directory. Each step is required and
//! fail-fast except the final search-path check, which only prints advice.

use crate::clamp::clamp_capability_values;
use crate::env::EnvProvider;
use crate::error::{Error, Result};
use crate::exec::{CommandRunner, RunOutput, RunRequest};
use crate::inventory::infocmp_candidates;
use crate::selector::select_decompiler;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The system compiler whose terminfo dialect the patch targets
pub const STOCK_TIC: &str = "/usr/bin/tic";

/// Exact version fingerprint the stock compiler must report
pub const STOCK_TIC_EXPECTED_VERSION: &str = "ncurses 5.7.20081102";

/// The terminfo entry being repaired
pub const TERMINFO_NAME: &str = "tmux-256color";

/// Environment variable listing extra terminfo search directories
pub const TERMINFO_DIRS_VAR: &str = "TERMINFO_DIRS";

/// The user-writable terminfo database the compiled entry lands in
pub fn user_terminfo_dir<E: EnvProvider + ?Sized>(env: &E) -> Result<PathBuf> {
    let home = env.home_dir().ok_or(Error::NoHomeDir)?;
    Ok(home.join(".local").join("share").join("terminfo"))
}

/// Run a pipeline-critical command, mapping every failure to a fatal error
fn run_required<R: CommandRunner + ?Sized>(runner: &R, request: &RunRequest) -> Result<RunOutput> {
    let output = runner
        .run(request)
        .map_err(|e| Error::CommandFailed(format!("failed to run {}: {e}", request.command_line())))?;
    if !output.success {
        return Err(Error::CommandFailed(format!(
            "{} exited with an error",
            request.command_line()
        )));
    }
    Ok(output)
}

/// Confirm the stock tic is exactly the release this tool was written for
///
/// The clamp compensates for that release's 16-bit capability fields;
/// applying it against an unverified compiler would be guesswork. Returns
/// the reported version string.
fn verify_stock_tic<R: CommandRunner + ?Sized>(runner: &R) -> Result<String> {
    let output = run_required(runner, &RunRequest::new(STOCK_TIC).arg("-V"))?;
    let version = String::from_utf8_lossy(&output.stdout)
        .trim_end()
        .to_string();

    if version != STOCK_TIC_EXPECTED_VERSION {
        println!("The version of tic at {STOCK_TIC} has an unexpected version");
        println!("string. This tool might need updating!");
        println!("  Expected: {STOCK_TIC_EXPECTED_VERSION:?}");
        println!("       Got: {version:?}");
        return Err(Error::VersionMismatch {
            tool: STOCK_TIC.to_string(),
        });
    }
    Ok(version)
}

/// Whether `dir` appears verbatim among the colon-separated entries
fn dir_in_search_path(dir: &Path, search_path: Option<&OsStr>) -> bool {
    let Some(search_path) = search_path else {
        return false;
    };
    std::env::split_paths(search_path).any(|entry| entry == dir)
}

/// Quote a path for copy-pasting into a POSIX shell
fn shell_quote(s: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c);
    if !s.is_empty() && s.chars().all(safe) {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

fn print_search_path_advice(out_dir: &Path) {
    println!();
    println!("Could not find the user terminfo directory in {TERMINFO_DIRS_VAR}");
    println!("  {}", out_dir.display());
    println!();
    println!("Ensure your shell startup script contains the following line:");
    println!("```");
    println!(
        "export {TERMINFO_DIRS_VAR}=\"${TERMINFO_DIRS_VAR}\":{}",
        shell_quote(&out_dir.display().to_string())
    );
    println!("```");
    println!("Then restart your shell.");
}

/// Run the whole pipeline
///
/// Verifies the stock compiler, selects a decompiler, exports and patches
/// the entry, compiles it into the user terminfo directory, and checks
/// search-path visibility. The scratch directory holding the patched source
/// is removed on every exit path.
pub fn run<R, E>(runner: &R, env: &E) -> Result<()>
where
    R: CommandRunner + ?Sized,
    E: EnvProvider + ?Sized,
{
    let tic_version = verify_stock_tic(runner)?;

    let candidates = infocmp_candidates(runner);
    let infocmp = select_decompiler(runner, &candidates)
        .ok_or_else(|| Error::ToolNotFound("couldn't find an infocmp executable".to_string()))?;

    println!("Exporting {TERMINFO_NAME}");
    let exported = run_required(
        runner,
        &RunRequest::new(infocmp.path.as_os_str())
            .arg("-x")
            .arg(TERMINFO_NAME),
    )?;

    // Exporting alone is not enough: decoders built against the old binary
    // format read 0x10000 back as zero, so overflowing values get clamped.
    let patched = clamp_capability_values(&exported.stdout);
    if patched == exported.stdout {
        println!("Warning: no patch was applied to terminfo source");
    }

    let out_dir = user_terminfo_dir(env)?;
    println!("Output dir is {}", out_dir.display());
    fs::create_dir_all(&out_dir)?;

    let scratch = tempfile::tempdir()?;
    let src_file = scratch.path().join(format!("{TERMINFO_NAME}.src"));
    fs::write(&src_file, &patched)?;
    debug!("patched source staged at {}", src_file.display());

    println!("Compiling terminfo source with {STOCK_TIC} ({tic_version})");
    run_required(
        runner,
        &RunRequest::new(STOCK_TIC)
            .arg("-x")
            .arg("-o")
            .arg(out_dir.as_os_str())
            .arg(src_file.as_os_str()),
    )?;
    scratch.close()?;

    println!("Complete");

    let search_path = env.var(OsStr::new(TERMINFO_DIRS_VAR));
    if !dir_in_search_path(&out_dir, search_path.as_deref()) {
        print_search_path_advice(&out_dir);
    }

    Ok(())
}
