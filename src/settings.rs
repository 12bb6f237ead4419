use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

pub const GITHUB_API: &str = "https://api.github.com";

/// Optional settings loaded from `.claude/upcheck.toml`.
///
/// Every key has a default, so an absent file and an empty file behave the
/// same way.
///
/// Example TOML:
/// ```toml
/// timeout_secs = 5
///
/// [releases]
/// label = "Claude Code"
/// owner = "anthropics"
/// repo  = "claude-code"
/// per_page = 10
///
/// [commits]
/// per_page = 20
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub api_base: String,
    pub timeout_secs: u64,
    pub releases: ReleaseSource,
    pub commits: CommitSource,
}

/// The project whose release feed is watched.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReleaseSource {
    /// Display name used in the section header.
    pub label: String,
    pub owner: String,
    pub repo: String,
    pub per_page: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommitSource {
    pub per_page: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base: GITHUB_API.to_string(),
            timeout_secs: 8,
            releases: ReleaseSource::default(),
            commits: CommitSource::default(),
        }
    }
}

impl Default for ReleaseSource {
    fn default() -> Self {
        ReleaseSource {
            label: "Claude Code".to_string(),
            owner: "anthropics".to_string(),
            repo: "claude-code".to_string(),
            per_page: 10,
        }
    }
}

impl Default for CommitSource {
    fn default() -> Self {
        CommitSource { per_page: 20 }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Load settings from `path`.
///
/// # Errors
/// - Returns an error if the file exists but cannot be read.
/// - Returns an error if parsing the TOML fails.
///
/// A missing file is not an error and yields [`Settings::default`].
pub fn load_settings(path: &Path) -> Result<Settings> {
    let txt = match fs::read_to_string(path) {
        Ok(txt) => txt,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("cannot read {}", path.display()));
        }
    };
    let settings: Settings = toml::from_str(&txt)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(settings)
}

/// Like [`load_settings`], but never fails: problems are logged and the
/// defaults are used, so a bad settings file cannot block the hook.
pub fn load_settings_or_default(path: &Path) -> Settings {
    load_settings(path).unwrap_or_else(|e| {
        tracing::warn!("ignoring settings: {e:#}");
        Settings::default()
    })
}
