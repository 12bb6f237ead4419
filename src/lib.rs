//! Crate entry point for **upcheck**.
//!
//! `upcheck` runs as a session-start hook. It compares the checkpoints in
//! `.claude/last-synced.json` with GitHub and, when something new was
//! published, prints one `{"systemMessage": ...}` payload for the host.
//! Every failure degrades to printing less; the hook never fails its caller.

mod check;
mod checkpoint;
mod diff;
mod error;
mod github;
mod notify;
mod paths;
mod settings;

pub use check::{cmd_check, cmd_preview, commit_check, release_check, run};
pub use checkpoint::{CheckpointRecord, InspirationRepo};
pub use error::{CheckError, CheckResult};
pub use github::{Commit, GitHub, Release};
pub use notify::{Payload, Section, compose};
pub use paths::{Paths, paths};
pub use settings::{Settings, load_settings};
