//! Member matching engine.
//!
//! Resolves a free-text query into two disjoint groups: members matched by
//! name or handle, and members matched only through one of their hobby ids.
//! Both groups keep directory order.

mod index;

pub use index::DirectoryIndex;

use crate::errors::AppError;
use crate::models::Member;

/// Number of recommendations shown next to the feed.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 4;

/// Normalized search input: trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    normalized: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            normalized: raw.trim().to_lowercase(),
        }
    }

    /// Empty and whitespace-only queries match nothing.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Whether `haystack`, lowercased, contains the query.
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.normalized)
    }
}

impl TryFrom<&serde_json::Value> for SearchQuery {
    type Error = AppError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        value.as_str().map(SearchQuery::new).ok_or_else(|| {
            AppError::InvalidArgument(format!("Search query must be a string, got {}", value))
        })
    }
}

/// Two disjoint, directory-ordered groups of matching members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult<'a> {
    pub name_matches: Vec<&'a Member>,
    pub hobby_matches: Vec<&'a Member>,
}

impl SearchResult<'_> {
    pub fn is_empty(&self) -> bool {
        self.name_matches.is_empty() && self.hobby_matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.name_matches.len() + self.hobby_matches.len()
    }
}

/// Search `directory` for `query`.
///
/// The requester's hobbies do not influence matching or ordering yet; the
/// parameter keeps the call shape stable for relevance weighting.
pub fn search<'a>(query: &str, _requester: &Member, directory: &'a [Member]) -> SearchResult<'a> {
    search_members(&SearchQuery::new(query), directory)
}

/// Linear scan over the directory.
pub fn search_members<'a>(query: &SearchQuery, directory: &'a [Member]) -> SearchResult<'a> {
    if query.is_empty() {
        return SearchResult::default();
    }

    let named: Vec<bool> = directory
        .iter()
        .map(|m| query.matches(&m.name) || query.matches(&m.handle))
        .collect();

    let name_matches: Vec<&Member> = directory
        .iter()
        .zip(&named)
        .filter(|(_, hit)| **hit)
        .map(|(m, _)| m)
        .collect();

    let hobby_matches: Vec<&Member> = directory
        .iter()
        .zip(&named)
        .filter(|(m, hit)| !**hit && m.hobbies.iter().any(|h| query.matches(&h.hobby_id)))
        .map(|(m, _)| m)
        .collect();

    tracing::debug!(
        query = query.as_str(),
        name_matches = name_matches.len(),
        hobby_matches = hobby_matches.len(),
        "Search completed"
    );

    SearchResult {
        name_matches,
        hobby_matches,
    }
}

/// Members sharing at least one hobby with `requester`, in directory order.
pub fn recommend<'a>(requester: &Member, directory: &'a [Member], limit: usize) -> Vec<&'a Member> {
    directory
        .iter()
        .filter(|m| m.id != requester.id && requester.shares_hobby_with(m))
        .take(limit)
        .collect()
}
