use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;

use crate::checkpoint::{self, CheckpointRecord};
use crate::diff::{commits, releases};
use crate::error::{CheckError, CheckResult};
use crate::github::GitHub;
use crate::notify::{Payload, Section, compose};
use crate::paths::paths;
use crate::settings::{Settings, load_settings_or_default};

/// Run one upstream check against the checkpoint at `checkpoint_path`.
///
/// Flow:
/// 1. Load the checkpoint. Failing here ends the run with `Err`; the caller
///    treats that as "nothing to check".
/// 2. Run the release check and the commit check. Each one is isolated: its
///    failure only drops its own section.
/// 3. Compose whatever sections survived.
///
/// Returns `Ok(None)` when nothing is new.
pub fn run(
    checkpoint_path: &Path,
    settings: &Settings,
    gh: &GitHub,
) -> CheckResult<Option<String>> {
    let record = checkpoint::load(checkpoint_path)?;

    let sections: Vec<Section> = [
        isolate("releases", release_check(&record, settings, gh)),
        isolate("commits", commit_check(&record, settings, gh)),
    ]
    .into_iter()
    .flatten()
    .collect();

    Ok(compose(&sections))
}

/// New releases of the watched project since `changelog.last_version`.
pub fn release_check(
    record: &CheckpointRecord,
    settings: &Settings,
    gh: &GitHub,
) -> CheckResult<Option<Section>> {
    let last = record.last_version()?;
    let src = &settings.releases;
    let page = gh.list_releases(&src.owner, &src.repo, src.per_page)?;
    let items = releases::new_since(&page, last);
    tracing::debug!("{} new release(s) since {last}", items.len());
    Ok(Section::releases(&src.label, last, items))
}

/// New commits in the inspiration repo since `inspiration_repo.last_checked`.
pub fn commit_check(
    record: &CheckpointRecord,
    settings: &Settings,
    gh: &GitHub,
) -> CheckResult<Option<Section>> {
    let repo = record.inspiration()?;
    let since = commits::since_param(&repo.last_checked);
    let per_page = settings.commits.per_page;
    let page = gh.list_commits(&repo.owner, &repo.repo, &since, per_page)?;
    let items = commits::summarize(&page, per_page as usize);
    tracing::debug!(
        "{} new commit(s) in {}/{} since {since}",
        items.len(),
        repo.owner,
        repo.repo
    );
    Ok(Section::commits(
        &repo.owner,
        &repo.repo,
        &repo.last_checked,
        items,
    ))
}

/// Collapse a failed check into "no section" so siblings are unaffected.
fn isolate(name: &str, res: CheckResult<Option<Section>>) -> Option<Section> {
    match res {
        Ok(section) => section,
        Err(e) => {
            tracing::warn!("{name} check skipped: {e}");
            None
        }
    }
}

/// Resolve paths and settings, build the client and run one check.
///
/// Every failure is logged and degraded to `None`.
fn detect(project_dir: Option<&Path>) -> Option<String> {
    let p = match paths(project_dir) {
        Ok(p) => p,
        Err(e) => {
            tracing::info!("cannot resolve project dir: {e:#}");
            return None;
        }
    };
    let settings = load_settings_or_default(&p.settings);
    let gh = match GitHub::from_settings(&settings) {
        Ok(gh) => gh,
        Err(e) => {
            tracing::warn!("{e}");
            return None;
        }
    };
    match run(&p.checkpoint, &settings, &gh) {
        Ok(msg) => msg,
        Err(e @ (CheckError::MissingCheckpoint(_) | CheckError::MalformedCheckpoint { .. })) => {
            tracing::info!("nothing to check: {e}");
            None
        }
        Err(e) => {
            tracing::warn!("{e}");
            None
        }
    }
}

/// Write the hook payload for `msg` to `out`.
fn emit(out: &mut impl Write, msg: &str) -> Result<()> {
    let json = Payload::new(msg).to_json()?;
    out.write_all(json.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Hook entry point: write `{"systemMessage": ...}` to stdout, or nothing.
///
/// Never fails: the host must always see exit code 0, so even a closed
/// stdout is only logged.
pub fn cmd_check(project_dir: Option<&Path>) -> Result<()> {
    deliver(&mut io::stdout().lock(), detect(project_dir).as_deref());
    Ok(())
}

fn deliver(out: &mut impl Write, msg: Option<&str>) {
    let Some(msg) = msg else {
        return;
    };
    if let Err(e) = emit(out, msg) {
        tracing::warn!("cannot write payload: {e:#}");
    }
}

fn render_preview(out: &mut impl Write, msg: Option<&str>) -> io::Result<()> {
    let Some(msg) = msg else {
        return writeln!(out, "{}", "no upstream changes".green());
    };
    for line in msg.lines() {
        if line.starts_with("## ") {
            writeln!(out, "{}", line.bold().cyan())?;
        } else if line.starts_with("### ") {
            writeln!(out, "{}", line.bold())?;
        } else if line.starts_with("  Upstream") {
            writeln!(out, "{}", line.yellow())?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

/// Human-readable variant of [`cmd_check`] for trying the setup by hand.
pub fn cmd_preview(project_dir: Option<&Path>) -> Result<()> {
    let msg = detect(project_dir);
    render_preview(&mut io::stdout().lock(), msg.as_deref())?;
    Ok(())
}
