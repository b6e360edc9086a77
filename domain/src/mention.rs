//! Comment mention scanning and resolution.
//!
//! A mention is an `@FirstName LastName` token inside comment text: two
//! whitespace-separated words following `@`. Candidates are resolved against
//! the known user directory by exact, case-sensitive display name; a name
//! shared by several users is ambiguous and stays unresolved rather than
//! guessing the wrong person.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::UserRef;

// The pattern is a literal; compilation cannot fail.
#[allow(clippy::expect_used)]
static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+\s\w+)").expect("mention pattern is valid"));

/// Extract mention candidates from comment text.
///
/// `"Great! @Jane Developer can you check?"` yields `["Jane Developer"]`.
#[must_use]
pub fn mention_candidates(text: &str) -> Vec<&str> {
    MENTION
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Resolve mention candidates against a user directory.
///
/// Returns the uniquely resolved users, deduplicated, in candidate order.
/// Candidates that match no directory entry, or more than one distinct user,
/// are skipped with a warning.
#[must_use]
pub fn resolve_mentions<'a>(candidates: &[&str], directory: &'a [UserRef]) -> Vec<&'a UserRef> {
    let mut resolved: Vec<&UserRef> = Vec::new();

    for candidate in candidates {
        let mut matches = directory.iter().filter(|u| u.username == *candidate);

        let Some(first) = matches.next() else {
            tracing::warn!(mention = candidate, "Unresolved mention: no such user");
            continue;
        };

        if matches.any(|u| u.id != first.id) {
            tracing::warn!(mention = candidate, "Unresolved mention: name is ambiguous");
            continue;
        }

        if !resolved.iter().any(|u| u.id == first.id) {
            resolved.push(first);
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;
    use taskhive_session::Role;

    fn user(id: i64, name: &str) -> UserRef {
        UserRef {
            id: UserId(id),
            username: name.to_string(),
            role: Some(Role::Developer),
        }
    }

    #[test]
    fn extracts_two_word_mentions() {
        let candidates = mention_candidates("Great! @Jane Developer can you check?");
        assert_eq!(candidates, vec!["Jane Developer"]);
    }

    #[test]
    fn extracts_multiple_mentions() {
        let candidates =
            mention_candidates("@Jane Developer and @Mark Tester please sync up");
        assert_eq!(candidates, vec!["Jane Developer", "Mark Tester"]);
    }

    #[test]
    fn ignores_text_without_mentions() {
        assert!(mention_candidates("No mentions here").is_empty());
        assert!(mention_candidates("half @Jane").is_empty());
    }

    #[test]
    fn matching_is_case_sensitive() {
        let directory = vec![user(2, "Jane Developer")];
        let resolved = resolve_mentions(&["jane developer"], &directory);
        assert!(resolved.is_empty());
    }

    #[test]
    fn resolves_unique_names() {
        let directory = vec![user(2, "Jane Developer"), user(3, "Mark Tester")];
        let resolved = resolve_mentions(&["Mark Tester"], &directory);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, UserId(3));
    }

    #[test]
    fn ambiguous_names_stay_unresolved() {
        // Two distinct users sharing a display name
        let directory = vec![user(2, "Jane Developer"), user(9, "Jane Developer")];
        let resolved = resolve_mentions(&["Jane Developer"], &directory);
        assert!(resolved.is_empty());
    }

    #[test]
    fn duplicate_directory_rows_for_same_user_are_fine() {
        // The same user can appear both in the directory and as a task participant
        let directory = vec![user(2, "Jane Developer"), user(2, "Jane Developer")];
        let resolved = resolve_mentions(&["Jane Developer"], &directory);
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn repeated_mentions_resolve_once() {
        let directory = vec![user(2, "Jane Developer")];
        let resolved = resolve_mentions(&["Jane Developer", "Jane Developer"], &directory);
        assert_eq!(resolved.len(), 1);
    }
}
