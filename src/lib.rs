// src/lib.rs

//! Terminfo backport tool
//!
//! Repairs the `tmux-256color` terminfo entry on systems where tmux is
//! linked against a recent ncurses but runs applications linked against an
//! older one (typically the stock macOS toolchain). Symptoms of the
//! mismatch include backspace moving the cursor to the right and the
//! message "WARNING: terminal is not fully functional".
//!
//! The pipeline exports the entry with the newest `infocmp` found through
//! the MacPorts and Homebrew package inventories, clamps numeric
//! capabilities that overflow a signed 16-bit field, and recompiles the
//! result with the stock `tic` into `~/.local/share/terminfo`. The tool is
//! idempotent; running it again rewrites the same bytes.

pub mod backport;
pub mod clamp;
pub mod env;
mod error;
pub mod exec;
pub mod inventory;
pub mod selector;
pub mod version;

pub use backport::{STOCK_TIC, STOCK_TIC_EXPECTED_VERSION, TERMINFO_NAME};
pub use env::{EnvProvider, SystemEnv};
pub use error::{Error, Result};
pub use exec::{CommandRunner, RunOutput, RunRequest, SystemRunner};
pub use selector::ToolCandidate;
pub use version::VersionKey;
