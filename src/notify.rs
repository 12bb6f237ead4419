//! Composition of the single notification handed back to the host.

use serde::Serialize;

const BANNER: &str = "\n========================================\n  Upstream Updates Detected\n========================================\n\n";

const TRAILER: &str = "NOTE TO CLAUDE: If any new CC features above are relevant to the module the user is working on, \
mention them. If a new release introduces breaking changes or deprecations, warn the user. \
Do NOT overwhelm the user with raw changelogs \u{2014} summarize what matters for their current task.";

const RELEASE_INTRO: &str = "The following releases came out AFTER the content in context/changelog-cc.txt was last updated. \
Review these changes and factor them into any guidance you give the user \u{2014} especially if new CC \
features were added that should be incorporated into the project modules.";

const COMMIT_INTRO: &str = "The inspiration repo has new activity. Review for patterns, techniques, or examples \
that could improve our project guides.";

/// One independently computed block of the notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub header: String,
    pub intro: &'static str,
    pub items: Vec<String>,
    pub separator: &'static str,
}

impl Section {
    /// Release summaries; `None` when nothing is new.
    pub fn releases(label: &str, last_version: &str, items: Vec<String>) -> Option<Self> {
        (!items.is_empty()).then(|| Section {
            header: format!("## New {label} Releases (since {last_version})"),
            intro: RELEASE_INTRO,
            items,
            separator: "\n\n",
        })
    }

    /// Commit summaries; `None` when nothing is new.
    pub fn commits(owner: &str, repo: &str, since: &str, items: Vec<String>) -> Option<Self> {
        (!items.is_empty()).then(|| Section {
            header: format!("## New Commits in {owner}/{repo} (since {since})"),
            intro: COMMIT_INTRO,
            items,
            separator: "\n",
        })
    }

    fn render(&self) -> String {
        format!(
            "{}\n\n{}\n\n{}",
            self.header,
            self.intro,
            self.items.join(self.separator)
        )
    }
}

/// Wrap the non-empty sections in the banner and trailing note.
///
/// Returns `None` when there is nothing to say; the caller must then emit
/// nothing at all rather than an empty message.
pub fn compose(sections: &[Section]) -> Option<String> {
    let rendered: Vec<String> = sections
        .iter()
        .filter(|s| !s.items.is_empty())
        .map(Section::render)
        .collect();
    if rendered.is_empty() {
        return None;
    }
    Some(format!("{BANNER}{}\n\n{TRAILER}", rendered.join("\n\n")))
}

/// Wire form expected by the host: `{"systemMessage": "..."}`.
#[derive(Debug, Serialize)]
pub struct Payload<'a> {
    #[serde(rename = "systemMessage")]
    pub system_message: &'a str,
}

impl<'a> Payload<'a> {
    pub fn new(message: &'a str) -> Self {
        Payload {
            system_message: message,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release_section() -> Section {
        Section::releases("Claude Code", "v2.0.0", vec!["### v2.1.0 (2026-03-01)\nnotes".into()]).unwrap()
    }

    fn commit_section() -> Section {
        Section::commits(
            "o",
            "r",
            "2026-02-13",
            vec!["- `aaaaaaa` (2026-02-14) one".into(), "- `bbbbbbb` (2026-02-15) two".into()],
        )
        .unwrap()
    }

    #[test]
    fn nothing_new_means_no_message() {
        assert_eq!(compose(&[]), None);
        assert!(Section::releases("Claude Code", "v1", vec![]).is_none());
        assert!(Section::commits("o", "r", "2026-01-01", vec![]).is_none());
    }

    #[test]
    fn sections_with_no_items_are_skipped() {
        let empty = Section {
            items: vec![],
            ..release_section()
        };
        assert_eq!(compose(&[empty.clone(), empty]), None);
    }

    #[test]
    fn compose_is_deterministic() {
        let sections = [release_section(), commit_section()];
        assert_eq!(compose(&sections), compose(&sections));
    }

    #[test]
    fn layout_wraps_sections_in_banner_and_note() {
        let msg = compose(&[release_section(), commit_section()]).unwrap();
        assert!(msg.starts_with(BANNER));
        assert!(msg.ends_with(TRAILER));

        let rel = msg.find("## New Claude Code Releases (since v2.0.0)").unwrap();
        let com = msg.find("## New Commits in o/r (since 2026-02-13)").unwrap();
        assert!(rel < com);
        assert!(msg.contains("- `aaaaaaa` (2026-02-14) one\n- `bbbbbbb` (2026-02-15) two\n\nNOTE TO CLAUDE"));
    }

    #[test]
    fn single_section_layout() {
        let msg = compose(&[commit_section()]).unwrap();
        let expected = format!(
            "{BANNER}## New Commits in o/r (since 2026-02-13)\n\n{COMMIT_INTRO}\n\n\
             - `aaaaaaa` (2026-02-14) one\n- `bbbbbbb` (2026-02-15) two\n\n{TRAILER}"
        );
        assert_eq!(msg, expected);
        assert!(!msg.contains("Releases"));
    }

    #[test]
    fn payload_uses_host_field_name() {
        let json = Payload::new("hi \"there\"").to_json().unwrap();
        assert_eq!(json, r#"{"systemMessage":"hi \"there\""}"#);
    }
}
