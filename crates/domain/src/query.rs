//! The filter/search/paging tuple sent to `{resource}/list` endpoints.

use serde::Serialize;

/// Minimum settled search length that may reach the server.
pub const SEARCH_MIN_LENGTH: usize = 3;

/// Body of one list request: pagination plus the applied search term plus
/// resource-specific filter fields flattened alongside them.
///
/// Constructed fresh for every load; the last-sent snapshot is only kept by
/// the caller for its "has active filters" affordance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery<F> {
    /// 1-indexed page to fetch.
    pub current_page: u32,
    /// Rows per page.
    pub page_size: u32,
    /// Settled search term; omitted entirely when no search is applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    /// Resource-specific filter fields.
    #[serde(flatten)]
    pub filters: F,
}

/// Filter shape for resources with no extra filter fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoFilter {}

/// Outcome of evaluating settled search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvaluation {
    /// Input is long enough: apply the trimmed term as the query.
    Apply(String),
    /// Input is empty: clear any applied query.
    Reset,
    /// Input is a 1-2 character fragment: never sent to the server, and any
    /// applied query is cleared as if the search had been reset.
    Fragment,
}

/// Classifies settled search input.
///
/// Fragments shorter than [`SEARCH_MIN_LENGTH`] must never produce a server
/// round-trip; they behave as a reset instead so the list falls back to the
/// unfiltered first page.
#[must_use]
pub fn evaluate_search_input(raw: &str) -> SearchEvaluation {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        SearchEvaluation::Reset
    } else if trimmed.chars().count() >= SEARCH_MIN_LENGTH {
        SearchEvaluation::Apply(trimmed.to_owned())
    } else {
        SearchEvaluation::Fragment
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ListQuery, NoFilter, SearchEvaluation, evaluate_search_input};

    #[test]
    fn empty_and_whitespace_input_resets() {
        assert_eq!(evaluate_search_input(""), SearchEvaluation::Reset);
        assert_eq!(evaluate_search_input("   "), SearchEvaluation::Reset);
    }

    #[test]
    fn one_and_two_character_fragments_never_apply() {
        assert_eq!(evaluate_search_input("a"), SearchEvaluation::Fragment);
        assert_eq!(evaluate_search_input(" ab "), SearchEvaluation::Fragment);
    }

    #[test]
    fn three_characters_apply_trimmed() {
        assert_eq!(
            evaluate_search_input("  abc  "),
            SearchEvaluation::Apply("abc".to_owned())
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert_eq!(
            evaluate_search_input("äöü"),
            SearchEvaluation::Apply("äöü".to_owned())
        );
    }

    #[test]
    fn query_without_search_omits_the_field() {
        let query = ListQuery {
            current_page: 1,
            page_size: 10,
            search_query: None,
            filters: NoFilter {},
        };
        let body = serde_json::to_value(&query).unwrap_or_else(|_| panic!("test"));
        assert_eq!(body, json!({"currentPage": 1, "pageSize": 10}));
    }

    #[test]
    fn filters_are_flattened_into_the_body() {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct TypeFilter {
            contact_type: &'static str,
        }

        let query = ListQuery {
            current_page: 2,
            page_size: 25,
            search_query: Some("smith".to_owned()),
            filters: TypeFilter {
                contact_type: "tenant",
            },
        };
        let body = serde_json::to_value(&query).unwrap_or_else(|_| panic!("test"));
        assert_eq!(
            body,
            json!({
                "currentPage": 2,
                "pageSize": 25,
                "searchQuery": "smith",
                "contactType": "tenant",
            })
        );
    }
}
