//! Query-string normalization.
//!
//! # Responsibilities
//! - Parse loosely typed browser input into bounded, typed values
//! - Fall back to defaults instead of failing on bad numbers
//! - Reject malformed id lists and too-short search terms
//!
//! # Rules
//! - `limit`: default 10, clamped to [1, 50]
//! - `page`: default 1, clamped to [1, 100]
//! - `ids`: comma separated, whitespace trimmed, empty segments skipped
//! - `q`: trimmed, at least 2 characters unless `ids` is given
//! - repeated keys: the first value wins

use std::collections::HashMap;
use thiserror::Error;
use url::form_urlencoded;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 50;

pub const DEFAULT_PAGE: i64 = 1;
pub const MIN_PAGE: i64 = 1;
pub const MAX_PAGE: i64 = 100;

/// Shortest accepted team search term, in characters.
pub const MIN_QUERY_CHARS: usize = 2;

/// Client input the proxy refuses to forward.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("Invalid team IDs")]
    InvalidIds { segment: String },

    #[error("query too short")]
    QueryTooShort,
}

/// Parse an integer, returning `default` for missing, empty or non-numeric input.
pub fn parse_int_or(raw: Option<&str>, default: i64) -> i64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

pub fn normalize_limit(raw: Option<&str>) -> u32 {
    parse_int_or(raw, DEFAULT_LIMIT).clamp(MIN_LIMIT, MAX_LIMIT) as u32
}

pub fn normalize_page(raw: Option<&str>) -> u32 {
    parse_int_or(raw, DEFAULT_PAGE).clamp(MIN_PAGE, MAX_PAGE) as u32
}

/// Parse a comma separated id list, keeping order.
pub fn parse_ids(raw: &str) -> Result<Vec<i64>, ParamError> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment.parse::<i64>().map_err(|_| ParamError::InvalidIds {
                segment: segment.to_string(),
            })
        })
        .collect()
}

/// Parse `ids` when present. An absent or blank value yields an empty list.
fn optional_ids(raw: Option<&str>) -> Result<Vec<i64>, ParamError> {
    match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => parse_ids(raw),
        _ => Ok(Vec::new()),
    }
}

fn trimmed(raw: Option<&str>) -> String {
    raw.map(str::trim).unwrap_or_default().to_string()
}

/// Decode a raw query string, keeping the first value of each key.
fn first_values(raw: Option<&str>) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        values
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    values
}

/// Raw `/api/teams` query string.
#[derive(Debug, Clone, Default)]
pub struct TeamsQuery {
    pub q: Option<String>,
    pub game: Option<String>,
    pub ids: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

/// What `/api/teams` should ask upstream for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamsLookup {
    /// Explicit id filter; `q`, `limit` and `page` are ignored.
    ByIds { game: String, ids: Vec<i64> },
    /// Name search, one page.
    Search {
        game: String,
        name: String,
        limit: u32,
        page: u32,
    },
}

impl TeamsQuery {
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut values = first_values(raw);
        Self {
            q: values.remove("q"),
            game: values.remove("game"),
            ids: values.remove("ids"),
            limit: values.remove("limit"),
            page: values.remove("page"),
        }
    }

    pub fn normalize(&self) -> Result<TeamsLookup, ParamError> {
        let game = trimmed(self.game.as_deref());

        let ids = optional_ids(self.ids.as_deref())?;
        if !ids.is_empty() {
            return Ok(TeamsLookup::ByIds { game, ids });
        }

        let name = trimmed(self.q.as_deref());
        if name.chars().count() < MIN_QUERY_CHARS {
            return Err(ParamError::QueryTooShort);
        }

        Ok(TeamsLookup::Search {
            game,
            name,
            limit: normalize_limit(self.limit.as_deref()),
            page: normalize_page(self.page.as_deref()),
        })
    }
}

/// Raw `/api/upcoming-matches` query string.
#[derive(Debug, Clone, Default)]
pub struct MatchesQuery {
    pub game: Option<String>,
    pub ids: Option<String>,
}

/// What `/api/upcoming-matches` should ask upstream for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchesLookup {
    pub game: String,
    /// Empty means no opponent filter.
    pub team_ids: Vec<i64>,
}

impl MatchesQuery {
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut values = first_values(raw);
        Self {
            game: values.remove("game"),
            ids: values.remove("ids"),
        }
    }

    pub fn normalize(&self) -> Result<MatchesLookup, ParamError> {
        Ok(MatchesLookup {
            game: trimmed(self.game.as_deref()),
            team_ids: optional_ids(self.ids.as_deref())?,
        })
    }
}
