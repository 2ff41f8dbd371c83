//! Precomputed lookup structure for large directories.
//!
//! Names and handles are lowercased once at build time. Hobby ids are folded
//! into a map from each distinct lowercased id to the ascending directory
//! positions of the members that hold it, so a query scans distinct hobby ids
//! rather than every member's hobby list. Results are identical to
//! [`search_members`](super::search_members), ordering included.

use std::collections::{BTreeMap, BTreeSet};

use super::{SearchQuery, SearchResult};
use crate::models::Member;

pub struct DirectoryIndex<'a> {
    directory: &'a [Member],
    names: Vec<(String, String)>,
    hobbies: BTreeMap<String, Vec<usize>>,
}

impl<'a> DirectoryIndex<'a> {
    pub fn build(directory: &'a [Member]) -> Self {
        let mut names = Vec::with_capacity(directory.len());
        let mut hobbies: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (position, member) in directory.iter().enumerate() {
            names.push((member.name.to_lowercase(), member.handle.to_lowercase()));

            for hobby in &member.hobbies {
                let positions = hobbies.entry(hobby.hobby_id.to_lowercase()).or_default();
                // Ids differing only by case fold onto one key
                if positions.last() != Some(&position) {
                    positions.push(position);
                }
            }
        }

        tracing::debug!(
            members = directory.len(),
            hobby_keys = hobbies.len(),
            "Directory index built"
        );

        Self {
            directory,
            names,
            hobbies,
        }
    }

    pub fn len(&self) -> usize {
        self.directory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directory.is_empty()
    }

    pub fn search(&self, query: &str) -> SearchResult<'a> {
        self.search_query(&SearchQuery::new(query))
    }

    pub fn search_query(&self, query: &SearchQuery) -> SearchResult<'a> {
        if query.is_empty() {
            return SearchResult::default();
        }
        let needle = query.as_str();

        let mut named = vec![false; self.directory.len()];
        let mut name_matches = Vec::new();
        for ((name, handle), (member, flag)) in self
            .names
            .iter()
            .zip(self.directory.iter().zip(named.iter_mut()))
        {
            if name.contains(needle) || handle.contains(needle) {
                *flag = true;
                name_matches.push(member);
            }
        }

        let mut hobby_positions = BTreeSet::new();
        for (hobby_id, positions) in &self.hobbies {
            if hobby_id.contains(needle) {
                hobby_positions.extend(
                    positions
                        .iter()
                        .copied()
                        .filter(|p| !named.get(*p).copied().unwrap_or(true)),
                );
            }
        }

        let hobby_matches = hobby_positions
            .into_iter()
            .filter_map(|p| self.directory.get(p))
            .collect();

        SearchResult {
            name_matches,
            hobby_matches,
        }
    }
}
