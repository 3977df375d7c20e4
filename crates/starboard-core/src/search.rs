//! Pure search and suggestion functions over the proposal list.
//!
//! Both functions are deterministic and total: results follow corpus order,
//! and an empty query means "match everything" for [`search`] and "suggest
//! nothing" for [`suggestions`].

use serde::{Deserialize, Serialize};

use crate::proposal::EnrichedProposal;

/// Maximum number of suggestions produced for one query.
pub const MAX_SUGGESTIONS: usize = 10;

/// A single search suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Text shown in the suggestion list
    pub label: String,
    /// Text that replaces the query when the suggestion is picked
    pub completion: String,
}

/// Returns the items matching `query`, preserving corpus order.
///
/// Matching is a case-insensitive substring test over each item's
/// searchable text fields. A query that is empty or whitespace-only
/// matches every item.
pub fn search(items: &[EnrichedProposal], query: &str) -> Vec<EnrichedProposal> {
    let query = query.trim();
    if query.is_empty() {
        return items.to_vec();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| matches(item, &needle))
        .cloned()
        .collect()
}

/// Derives up to [`MAX_SUGGESTIONS`] suggestions for `query`.
///
/// Suggestions are the titles of matching items, deduplicated, in corpus
/// order. An empty query yields no suggestions.
pub fn suggestions(items: &[EnrichedProposal], query: &str) -> Vec<Suggestion> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let mut seen = Vec::new();
    let mut result = Vec::new();
    for item in items {
        if result.len() == MAX_SUGGESTIONS {
            break;
        }
        if !matches(item, &needle) {
            continue;
        }
        let title = &item.proposal.title;
        if seen.contains(title) {
            continue;
        }
        seen.push(title.clone());
        result.push(Suggestion {
            label: title.clone(),
            completion: title.clone(),
        });
    }
    result
}

fn matches(item: &EnrichedProposal, needle: &str) -> bool {
    item.proposal
        .searchable_text()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::Proposal;

    fn item(id: &str, title: &str, status: &str) -> EnrichedProposal {
        EnrichedProposal::new(
            Proposal {
                id: id.to_string(),
                title: title.to_string(),
                status: status.to_string(),
                link: None,
            },
            false,
        )
    }

    fn corpus() -> Vec<EnrichedProposal> {
        vec![
            item("SB-0001", "Async sequences", "Implemented"),
            item("SB-0002", "Typed throws", "Accepted"),
            item("SB-0003", "Async streams", "In review"),
        ]
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let items = corpus();
        assert_eq!(search(&items, ""), items);
        assert_eq!(search(&items, "   "), items);
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_fields() {
        let items = corpus();

        let by_title = search(&items, "ASYNC");
        assert_eq!(by_title.len(), 2);
        assert_eq!(by_title[0].id(), "SB-0001");
        assert_eq!(by_title[1].id(), "SB-0003");

        let by_id = search(&items, "sb-0002");
        assert_eq!(by_id.len(), 1);

        let by_status = search(&items, "review");
        assert_eq!(by_status.len(), 1);
        assert_eq!(by_status[0].id(), "SB-0003");
    }

    #[test]
    fn test_no_match_yields_empty() {
        assert!(search(&corpus(), "borrow checker").is_empty());
    }

    #[test]
    fn test_suggestions_empty_for_empty_query() {
        assert!(suggestions(&corpus(), "").is_empty());
    }

    #[test]
    fn test_suggestions_are_matching_titles_in_corpus_order() {
        let suggested = suggestions(&corpus(), "async");
        let labels: Vec<_> = suggested.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Async sequences", "Async streams"]);
        assert_eq!(suggested[0].completion, "Async sequences");
    }

    #[test]
    fn test_suggestions_deduplicate_and_cap() {
        let mut items = Vec::new();
        for n in 0..30 {
            items.push(item(&format!("SB-{n:04}"), &format!("Macro {n}"), ""));
        }
        items.push(item("SB-9999", "Macro 0", ""));

        let suggested = suggestions(&items, "macro");
        assert_eq!(suggested.len(), MAX_SUGGESTIONS);
        let labels: Vec<_> = suggested.iter().map(|s| s.label.as_str()).collect();
        let mut deduped = labels.clone();
        deduped.dedup();
        assert_eq!(labels, deduped);
    }
}
