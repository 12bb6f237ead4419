use anyhow::{Context, Result};
use std::{
    env,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone)]
pub struct Paths {
    pub project: PathBuf,
    pub checkpoint: PathBuf,
    pub settings: PathBuf,
}

impl Paths {
    pub fn under(project: &Path) -> Self {
        let dot = project.join(".claude");
        Paths {
            project: project.to_path_buf(),
            checkpoint: dot.join("last-synced.json"),
            settings: dot.join("upcheck.toml"),
        }
    }
}

/// Resolve the project root.
///
/// `CLAUDE_PROJECT_DIR` wins when set and non-empty. Otherwise the binary is
/// assumed to live at `<project>/.claude/<dir>/upcheck`, and the root is two
/// levels above the directory holding the executable.
pub fn project_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("CLAUDE_PROJECT_DIR").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let exe = env::current_exe().context("cannot locate running executable")?;
    Ok(project_from_exe(&exe))
}

fn project_from_exe(exe: &Path) -> PathBuf {
    exe.parent()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn paths(override_dir: Option<&Path>) -> Result<Paths> {
    let project = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => project_dir()?,
    };
    Ok(Paths::under(&project))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn exe_fallback_walks_up_past_dot_claude() {
        let exe = Path::new("/work/proj/.claude/scripts/upcheck");
        assert_eq!(project_from_exe(exe), PathBuf::from("/work/proj"));
    }

    #[test]
    fn layout_lives_under_dot_claude() {
        let p = Paths::under(Path::new("/p"));
        assert_eq!(p.checkpoint, PathBuf::from("/p/.claude/last-synced.json"));
        assert_eq!(p.settings, PathBuf::from("/p/.claude/upcheck.toml"));
    }

    #[test]
    #[serial]
    fn env_var_takes_precedence() {
        unsafe { env::set_var("CLAUDE_PROJECT_DIR", "/from/env") };
        let got = project_dir().unwrap();
        unsafe { env::remove_var("CLAUDE_PROJECT_DIR") };
        assert_eq!(got, PathBuf::from("/from/env"));
    }

    #[test]
    #[serial]
    fn empty_env_var_falls_back_to_exe() {
        unsafe { env::set_var("CLAUDE_PROJECT_DIR", "") };
        let got = project_dir().unwrap();
        unsafe { env::remove_var("CLAUDE_PROJECT_DIR") };
        assert_ne!(got, PathBuf::from(""));
    }

    #[test]
    fn explicit_override_skips_env() {
        let p = paths(Some(Path::new("/explicit"))).unwrap();
        assert_eq!(p.project, PathBuf::from("/explicit"));
    }
}
