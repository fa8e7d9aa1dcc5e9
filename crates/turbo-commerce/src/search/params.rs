//! Filter state codec for the listing view's query string.
//!
//! The query string is the single source of truth for filter state: the
//! listing decodes a [`FilterState`] from it on every render, and every
//! interaction is expressed as a [`FilterUpdate`] that is encoded back into
//! a new query string.

use crate::search::{FilterState, SortOption};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::form_urlencoded;

/// Query parameter holding the search text.
pub const SEARCH_KEY: &str = "search";
/// Query parameter holding comma-joined tags.
pub const TAGS_KEY: &str = "tags";
/// Query parameter holding the sort option.
pub const SORT_KEY: &str = "sort";
/// Query parameter holding the page number.
pub const PAGE_KEY: &str = "page";

/// Path of the listing view.
pub const LISTING_PATH: &str = "/products";

const TAG_SEPARATOR: char = ',';

/// Ordered query parameters.
///
/// Mirrors the browser's `URLSearchParams`: duplicate keys are kept on
/// parse, [`get`](Self::get) returns the first value, [`set`](Self::set)
/// replaces the first occurrence and drops the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self { pairs }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key` to `value`, keeping the position of its first occurrence.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut seen = 0;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Remove every value for `key`.
    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Check whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Check if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over key/value pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize as a form-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A change to the filter state; absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterUpdate {
    pub search: Option<String>,
    pub tags: Option<Vec<String>>,
    pub sort: Option<SortOption>,
    pub page: Option<i64>,
}

impl FilterUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the search text.
    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Self::default()
        }
    }

    /// Change the selected tags.
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(tags.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Change the sort option.
    pub fn sort(sort: SortOption) -> Self {
        Self {
            sort: Some(sort),
            ..Self::default()
        }
    }

    /// Change the page only.
    pub fn page(page: i64) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    /// Clear search text and tags, returning to the first page.
    pub fn clear_filters() -> Self {
        Self {
            search: Some(String::new()),
            tags: Some(Vec::new()),
            sort: None,
            page: Some(1),
        }
    }

    /// An update that writes every field of `state`.
    pub fn from_state(state: &FilterState) -> Self {
        Self {
            search: Some(state.search.clone()),
            tags: Some(state.tags.clone()),
            sort: Some(state.sort),
            page: Some(state.page),
        }
    }

    /// Whether a field other than the page changes.
    pub fn changes_filters(&self) -> bool {
        self.search.is_some() || self.tags.is_some() || self.sort.is_some()
    }
}

/// Apply `update` to `current`, returning the new query parameters.
///
/// Empty search text or an empty tag list removes its key. Any change
/// other than the page forces `page=1`, even when the update also names a
/// page. Keys the codec does not own are preserved.
pub fn encode(update: &FilterUpdate, current: &QueryParams) -> QueryParams {
    let mut params = current.clone();

    if let Some(search) = &update.search {
        if search.is_empty() {
            params.delete(SEARCH_KEY);
        } else {
            params.set(SEARCH_KEY, search.as_str());
        }
    }

    if let Some(tags) = &update.tags {
        let joined = join_tags(tags);
        if joined.is_empty() {
            params.delete(TAGS_KEY);
        } else {
            params.set(TAGS_KEY, joined);
        }
    }

    if let Some(sort) = update.sort {
        params.set(SORT_KEY, sort.as_str());
    }

    if let Some(page) = update.page {
        params.set(PAGE_KEY, page.to_string());
    }

    if update.changes_filters() {
        params.set(PAGE_KEY, "1");
    }

    params
}

/// Encode a complete state on top of `current`; the page becomes 1.
pub fn encode_state(state: &FilterState, current: &QueryParams) -> QueryParams {
    encode(&FilterUpdate::from_state(state), current)
}

/// Read the filter state from query parameters, defaulting what is
/// missing or malformed.
pub fn decode(params: &QueryParams) -> FilterState {
    decode_with_sort(params, SortOption::DEFAULT)
}

/// Like [`decode`], with `default_sort` used when the sort is missing or
/// not recognized.
pub fn decode_with_sort(params: &QueryParams, default_sort: SortOption) -> FilterState {
    let search = params.get(SEARCH_KEY).unwrap_or_default().to_string();

    let tags = params
        .get(TAGS_KEY)
        .map(split_tags)
        .unwrap_or_default();

    let sort = params
        .get(SORT_KEY)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default_sort);

    let page = params.get(PAGE_KEY).and_then(parse_int).unwrap_or(1);

    FilterState {
        search,
        tags,
        sort,
        page,
    }
}

/// Link back to the listing that keeps the current filters.
pub fn back_link(params: &QueryParams) -> String {
    if params.is_empty() {
        LISTING_PATH.to_string()
    } else {
        format!("{}?{}", LISTING_PATH, params)
    }
}

fn join_tags(tags: &[String]) -> String {
    tags.iter()
        .map(String::as_str)
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

fn split_tags(value: &str) -> Vec<String> {
    value
        .split(TAG_SEPARATOR)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a leading base-10 integer the way browsers' `parseInt` does:
/// optional leading whitespace and sign, then digits; trailing text is
/// ignored. Values beyond `i64` saturate, keeping their sign.
fn parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, sign_len) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    let number = &trimmed[..sign_len + digits_len];
    Some(number.parse().unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}
