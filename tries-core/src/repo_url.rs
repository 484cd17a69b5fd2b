use crate::constants::FALLBACK_REPO_DIR_NAME;
use regex::Regex;
use std::sync::LazyLock;

/// Supported hosts and their short aliases (`gh:owner/repo`).
const KNOWN_HOSTS: &[(&str, &str)] = &[
    ("github.com", "gh"),
    ("gitlab.com", "gl"),
    ("codeberg.org", "cb"),
    ("bitbucket.org", "bb"),
];

struct HostPatterns {
    host: &'static str,
    shapes: Vec<Regex>,
}

static PATTERNS: LazyLock<Vec<HostPatterns>> = LazyLock::new(|| {
    KNOWN_HOSTS
        .iter()
        .map(|&(host, alias)| {
            let host_re = regex::escape(host);
            let alias_re = regex::escape(alias);
            let shapes = [
                format!(r"^https?://{host_re}/([\w-]+)/([\w.-]+?)(?:\.git)?/?$"),
                format!(r"^{host_re}/([\w-]+)/([\w.-]+?)(?:\.git)?/?$"),
                format!(r"^git@{host_re}:([\w-]+)/([\w.-]+?)(?:\.git)?$"),
                format!(r"^{alias_re}:([\w-]+)/([\w.-]+?)(?:\.git)?$"),
            ]
            .iter()
            .map(|pattern| Regex::new(pattern).expect("valid regex"))
            .collect();
            HostPatterns { host, shapes }
        })
        .collect()
});

/// Recognise a repository reference and return its canonical
/// `https://host/owner/repo.git` clone URL.
///
/// Accepts `https://host/owner/repo[.git][/]`, `host/owner/repo`,
/// `git@host:owner/repo[.git]` and `alias:owner/repo` for every known host.
/// Anything else yields `None`.
pub fn recognize(text: &str) -> Option<String> {
    let text = text.trim();
    PATTERNS.iter().find_map(|patterns| {
        patterns.shapes.iter().find_map(|re| {
            let caps = re.captures(text)?;
            let owner = caps.get(1)?.as_str();
            let repo = caps.get(2)?.as_str();
            if repo.chars().all(|c| c == '.') {
                return None;
            }
            Some(format!("https://{}/{owner}/{repo}.git", patterns.host))
        })
    })
}

/// Directory name for a clone of `url`: the last path segment without `.git`,
/// with traversal sequences removed and separators replaced by `-`.
pub fn derive_folder_name(url: &str) -> String {
    let trimmed = url.trim();
    let without_suffix = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    let last = without_suffix.rsplit('/').next().unwrap_or_default();

    let mut name = last.replace('\\', "-");
    while name.contains("..") {
        name = name.replace("..", "");
    }

    if name.is_empty() || name == "." {
        FALLBACK_REPO_DIR_NAME.to_string()
    } else {
        name
    }
}
