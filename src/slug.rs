//! Branch names derived from free-text titles.

use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("valid regex"));
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9/-]").expect("valid regex"));

/// Lowercase `title`, turn whitespace and underscores into `-`, and drop
/// anything that isn't `[a-z0-9/-]`. Slashes survive so prefixes like
/// `alice/` stay intact.
pub fn slugify_title(title: &str) -> String {
    let slug = title.to_lowercase();
    let slug = SEPARATORS.replace_all(&slug, "-");
    let slug = DISALLOWED.replace_all(&slug, "");
    slug.trim_matches('-').to_string()
}

/// Full branch name for a new branch: `branch-prefix` plus the slug.
///
/// The prefix is not slugified. When the title already starts with it
/// (in any case) it is not added twice, and the configured spelling wins.
pub fn branch_name_for(title: &str, prefix: Option<&str>) -> String {
    let slug = slugify_title(title);
    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => {
            let rest = slug.strip_prefix(&prefix.to_lowercase()).unwrap_or(&slug);
            format!("{}{}", prefix, rest)
        }
        None => slug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_keeps_forward_slashes() {
        assert_eq!(
            slugify_title("peterbe/CAP-123 Bla bla"),
            "peterbe/cap-123-bla-bla"
        );
    }

    #[test]
    fn test_slugify_strips_punctuation_and_edges() {
        assert_eq!(slugify_title("  Fix: the (login) bug!  "), "fix-the-login-bug");
        assert_eq!(slugify_title("snake_case_title"), "snake-case-title");
        assert_eq!(slugify_title("---"), "");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify_title("Café déjà vu"), "caf-dj-vu");
    }

    #[test]
    fn test_branch_name_with_prefix() {
        assert_eq!(branch_name_for("Add X", Some("alice/")), "alice/add-x");
        assert_eq!(branch_name_for("alice/Add X", Some("alice/")), "alice/add-x");
    }

    #[test]
    fn test_branch_name_mixed_case_prefix_not_doubled() {
        assert_eq!(branch_name_for("Alice/Fix x", Some("Alice/")), "Alice/fix-x");
        assert_eq!(branch_name_for("Fix x", Some("Alice/")), "Alice/fix-x");
        assert_eq!(branch_name_for("ALICE/Fix x", Some("Alice/")), "Alice/fix-x");
        assert_eq!(branch_name_for("Add X", Some("")), "add-x");
        assert_eq!(branch_name_for("Add X", None), "add-x");
    }
}
