//! Element id generation and id-list helpers.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a process-unique element id with the given prefix.
pub fn generate_id(prefix: &str) -> String {
    let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{n}")
}

/// Join ids into a space-separated id list, skipping missing and empty ids.
///
/// Returns `None` when nothing remains.
pub fn join_ids<'a>(ids: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    let joined = ids
        .into_iter()
        .flatten()
        .filter(|id| !id.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate_id("select");
        let b = generate_id("select");
        assert_ne!(a, b);
        assert!(a.starts_with("select-"));
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(
            join_ids([Some("a"), None, Some(""), Some("b")]),
            Some("a b".to_string())
        );
        assert_eq!(join_ids([None, Some("")]), None);
    }
}
