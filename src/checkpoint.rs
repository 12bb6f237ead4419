//! Read-only access to the last-synced checkpoint file.
//!
//! The two sub-records are kept as raw JSON and decoded on demand, so a
//! broken `changelog` entry never hides a usable `inspiration_repo` entry
//! (and the other way round).

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{CheckError, CheckResult};

/// Checkpoint record as stored in `.claude/last-synced.json`.
///
/// ```json
/// {
///   "changelog": { "last_version": "v2.1.42" },
///   "inspiration_repo": { "owner": "o", "repo": "r", "last_checked": "2026-02-13" }
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct CheckpointRecord {
    #[serde(default)]
    changelog: Option<Value>,
    #[serde(default)]
    inspiration_repo: Option<Value>,
}

/// Coordinates of the watched repository and its last check date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InspirationRepo {
    pub owner: String,
    pub repo: String,
    pub last_checked: String,
}

impl CheckpointRecord {
    /// Last release tag already summarized; empty counts as missing.
    pub fn last_version(&self) -> CheckResult<&str> {
        self.changelog
            .as_ref()
            .and_then(|c| c.get("last_version"))
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .ok_or(CheckError::MissingExpectedField("changelog.last_version"))
    }

    pub fn inspiration(&self) -> CheckResult<InspirationRepo> {
        let raw = self
            .inspiration_repo
            .as_ref()
            .ok_or(CheckError::MissingExpectedField("inspiration_repo"))?;
        let field = |key: &'static str, missing: &'static str| {
            raw.get(key)
                .and_then(Value::as_str)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(CheckError::MissingExpectedField(missing))
        };
        Ok(InspirationRepo {
            owner: field("owner", "inspiration_repo.owner")?,
            repo: field("repo", "inspiration_repo.repo")?,
            last_checked: field("last_checked", "inspiration_repo.last_checked")?,
        })
    }
}

/// Load the checkpoint record from `path`.
///
/// # Errors
/// - [`CheckError::MissingCheckpoint`] if the file does not exist.
/// - [`CheckError::MalformedCheckpoint`] if it cannot be read or is not a JSON object.
pub fn load(path: &Path) -> CheckResult<CheckpointRecord> {
    let malformed = |reason: String| CheckError::MalformedCheckpoint {
        path: path.to_path_buf(),
        reason,
    };
    let txt = match fs::read_to_string(path) {
        Ok(txt) => txt,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CheckError::MissingCheckpoint(path.to_path_buf()));
        }
        Err(e) => return Err(malformed(e.to_string())),
    };
    let value: Value = serde_json::from_str(&txt).map_err(|e| malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(malformed("top level is not an object".to_string()));
    }
    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}
