use crate::constants::DIR_DEDUP_MAX_ATTEMPTS;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Today's date as `YYYY-MM-DD`, in local time when the offset is known.
pub fn today() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_date(now)
}

pub fn format_date(at: OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        at.year(),
        u8::from(at.month()),
        at.day()
    )
}

/// Turn free text into a single path component: whitespace and path separators
/// become `-`, `..` is removed and leading/trailing dashes are trimmed.
pub fn slugify(text: &str) -> String {
    let mut slug: String = text
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '-'
            } else {
                c
            }
        })
        .collect();
    while slug.contains("..") {
        slug = slug.replace("..", "");
    }
    slug.trim_matches('-').to_string()
}

/// `{date}-{slug}`, or `None` when nothing usable is left of `text`.
pub fn dated_name(date: &str, text: &str) -> Option<String> {
    let slug = slugify(text);
    if slug.is_empty() {
        None
    } else {
        Some(format!("{date}-{slug}"))
    }
}

/// First of `base/name`, `base/name-2`, `base/name-3`, ... that does not exist yet.
pub fn unique_dir(base: &Path, name: &str) -> anyhow::Result<PathBuf> {
    let candidate = base.join(name);
    if !candidate.exists() {
        return Ok(candidate);
    }
    for i in 2..DIR_DEDUP_MAX_ATTEMPTS {
        let candidate = base.join(format!("{name}-{i}"));
        if !candidate.exists() {
            return Ok(candidate);
        }
    }
    anyhow::bail!(
        "Could not find an available directory name for '{name}' after {DIR_DEDUP_MAX_ATTEMPTS} attempts"
    )
}
