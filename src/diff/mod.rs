//! "New since checkpoint" filters.
//!
//! Both filters turn raw API entries into ready-to-print summary lines;
//! the composer only joins them.

pub mod commits;
pub mod releases;

/// First `n` characters of `s`, or all of `s` when shorter.
fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::prefix;

    #[test]
    fn prefix_counts_chars_not_bytes() {
        assert_eq!(prefix("2026-03-01T10:00:00Z", 10), "2026-03-01");
        assert_eq!(prefix("short", 10), "short");
        assert_eq!(prefix("", 7), "");
        assert_eq!(prefix("ééé", 2), "éé");
    }
}
