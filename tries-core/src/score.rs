//! Fuzzy ranking of catalog entries.
//!
//! A score combines a subsequence match of the query against the entry name
//! with bonuses for the `YYYY-MM-DD-` naming convention and for recent use.
//! Highlighting walks the name with the same matcher, so the characters shown
//! as matched are exactly the ones that earned points.

use crate::catalog::CatalogEntry;
use regex::Regex;
use std::sync::LazyLock;
use std::time::{Duration, SystemTime};

static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}-").expect("valid regex"));

const DATE_PREFIX_BONUS: f64 = 2.0;
const CREATED_WEIGHT: f64 = 2.0;
const ACCESSED_WEIGHT: f64 = 3.0;
const LENGTH_PENALTY_BASE: f64 = 10.0;

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Char indices in `name` matched by `query`, scanning left to right and taking
/// the first occurrence of each query character. `None` if some query character
/// is left unmatched.
fn match_positions(name: &str, query: &str) -> Option<Vec<usize>> {
    let mut wanted = query.chars().map(fold).peekable();
    let mut positions = Vec::new();

    for (pos, c) in name.chars().enumerate() {
        let Some(&next) = wanted.peek() else {
            break;
        };
        if fold(c) == next {
            positions.push(pos);
            wanted.next();
        }
    }

    if wanted.peek().is_some() {
        None
    } else {
        Some(positions)
    }
}

/// Characters of `name` to highlight for `query`.
pub fn highlight_positions(name: &str, query: &str) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    match_positions(name, query).unwrap_or_default()
}

/// True when `name` starts with `YYYY-MM-DD-`.
pub fn has_date_prefix(name: &str) -> bool {
    DATE_PREFIX.is_match(name)
}

#[allow(clippy::cast_precision_loss)]
fn elapsed_hours(since: SystemTime, now: SystemTime) -> f64 {
    now.duration_since(since)
        .unwrap_or(Duration::ZERO)
        .as_secs_f64()
        / 3600.0
}

/// Relevance of `entry` for `query` at time `now`.
///
/// Always zero when a non-empty query is not a subsequence of the name
/// (case-insensitively). With an empty query only the naming and recency
/// bonuses apply.
#[allow(clippy::cast_precision_loss)]
pub fn score(entry: &CatalogEntry, query: &str, now: SystemTime) -> f64 {
    let mut total = 0.0;

    if has_date_prefix(&entry.name) {
        total += DATE_PREFIX_BONUS;
    }

    if !query.is_empty() {
        let Some(positions) = match_positions(&entry.name, query) else {
            return 0.0;
        };
        let chars: Vec<char> = entry.name.chars().collect();

        let mut previous: Option<usize> = None;
        for &pos in &positions {
            total += 1.0;
            if pos == 0 || !chars[pos - 1].is_alphanumeric() {
                total += 1.0;
            }
            if let Some(prev) = previous {
                let gap = pos - prev - 1;
                total += 1.0 / ((gap + 1) as f64).sqrt();
            }
            previous = Some(pos);
        }

        if let Some(last) = previous {
            total *= positions.len() as f64 / (last + 1) as f64;
        }
        total *= LENGTH_PENALTY_BASE / (chars.len() as f64 + LENGTH_PENALTY_BASE);
    }

    let days_since_created = elapsed_hours(entry.created_at, now) / 24.0;
    total += CREATED_WEIGHT / (days_since_created + 1.0).sqrt();

    let hours_since_accessed = elapsed_hours(entry.accessed_at, now);
    total += ACCESSED_WEIGHT / (hours_since_accessed + 1.0).sqrt();

    total
}

/// Score every entry, drop non-matches when `query` is non-empty and sort by
/// descending score. Equal scores keep their scan order.
pub fn rank(entries: &[CatalogEntry], query: &str, now: SystemTime) -> Vec<CatalogEntry> {
    let mut ranked: Vec<CatalogEntry> = entries
        .iter()
        .map(|entry| CatalogEntry {
            score: score(entry, query, now),
            ..entry.clone()
        })
        .filter(|entry| query.is_empty() || entry.score > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
