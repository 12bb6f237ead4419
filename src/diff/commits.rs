use super::prefix;
use crate::github::Commit;

/// Turn a checkpoint date into the `since` query value.
///
/// Full timestamps pass through. A bare date means "checked during that
/// day", so the query starts at the end of it.
pub fn since_param(last_checked: &str) -> String {
    if last_checked.contains('T') {
        last_checked.to_string()
    } else {
        format!("{last_checked}T23:59:59Z")
    }
}

/// One summary line per commit, in the order received, at most `max` lines.
///
/// The server already applied `since`; no date filtering happens here.
pub fn summarize(commits: &[Commit], max: usize) -> Vec<String> {
    commits
        .iter()
        .take(max)
        .map(|c| {
            let subject = c.message().lines().next().unwrap_or("");
            format!(
                "- `{}` ({}) {}",
                prefix(&c.sha, 7),
                prefix(c.committer_date(), 10),
                subject
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{CommitDetail, Signature};

    fn commit(sha: &str, msg: &str, date: &str) -> Commit {
        Commit {
            sha: sha.to_string(),
            commit: CommitDetail {
                message: msg.to_string(),
                committer: Some(Signature {
                    date: date.to_string(),
                }),
            },
        }
    }

    #[test]
    fn since_handles_date_and_timestamp() {
        assert_eq!(since_param("2026-02-13"), "2026-02-13T23:59:59Z");
        assert_eq!(since_param("2026-02-13T08:00:00Z"), "2026-02-13T08:00:00Z");
    }

    #[test]
    fn formats_first_line_short_sha_and_date() {
        let out = summarize(
            &[commit(
                "0123456789abcdef",
                "Add hooks guide\n\nLonger explanation",
                "2026-02-14T09:30:00Z",
            )],
            20,
        );
        assert_eq!(out, vec!["- `0123456` (2026-02-14) Add hooks guide".to_string()]);
    }

    #[test]
    fn preserves_input_order() {
        let input = vec![
            commit("ccccccc1", "third", "2026-02-16T00:00:00Z"),
            commit("aaaaaaa1", "first", "2026-02-14T00:00:00Z"),
            commit("bbbbbbb1", "second", "2026-02-15T00:00:00Z"),
        ];
        let out = summarize(&input, 20);
        let subjects: Vec<&str> = out.iter().map(|l| l.rsplit(' ').next().unwrap()).collect();
        assert_eq!(subjects, vec!["third", "first", "second"]);
    }

    #[test]
    fn truncates_to_page_size() {
        let input: Vec<Commit> = (0..5)
            .map(|i| commit(&format!("sha{i}xxxx"), &format!("c{i}"), "2026-01-01"))
            .collect();
        assert_eq!(summarize(&input, 3).len(), 3);
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(summarize(&[], 20).is_empty());
    }

    #[test]
    fn missing_committer_leaves_date_blank() {
        let c = Commit {
            sha: "abc".to_string(),
            commit: CommitDetail {
                message: String::new(),
                committer: None,
            },
        };
        assert_eq!(summarize(&[c], 20), vec!["- `abc` () ".to_string()]);
    }
}
