use super::prefix;
use crate::github::Release;

pub const MAX_BODY_CHARS: usize = 800;

/// Summaries of every release strictly newer than `last_known_tag`.
///
/// `releases` must be newest-first, as GitHub returns them. The scan stops
/// at the first entry tagged `last_known_tag` and never looks past it. If
/// the tag is not on the fetched page at all, the whole page counts as new.
pub fn new_since(releases: &[Release], last_known_tag: &str) -> Vec<String> {
    releases
        .iter()
        .take_while(|rel| rel.tag_name != last_known_tag)
        .map(summarize)
        .collect()
}

fn summarize(rel: &Release) -> String {
    format!(
        "### {} ({})\n{}",
        rel.tag_name,
        prefix(&rel.published_at, 10),
        truncate_body(rel.body.trim())
    )
}

fn truncate_body(body: &str) -> String {
    let cut = prefix(body, MAX_BODY_CHARS);
    if cut.len() < body.len() {
        format!("{cut}...")
    } else {
        body.to_string()
    }
}
