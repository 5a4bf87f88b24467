//! URL and text helpers.

use crate::constants::REGEXPS;
use tracing::debug;
use url::Url;

/// The parts of the page URL used to absolutize links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    pub scheme: String,
    /// Host with an explicit port, if the URL carried one
    pub host: String,
    pub path: String,
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: String::new(),
            path: String::new(),
        }
    }
}

impl BaseUrl {
    /// Parses `url`, falling back to `http` with an empty host when it is
    /// missing or unparseable.
    pub fn parse(url: Option<&str>) -> Self {
        let Some(parsed) = url.map(str::trim).and_then(|u| Url::parse(u).ok()) else {
            debug!(?url, "unusable base url, resolving against http://");
            return Self::default();
        };

        let host = match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };

        Self {
            scheme: parsed.scheme().to_string(),
            host,
            path: parsed.path().to_string(),
        }
    }
}

/// Makes `url` absolute against `base`.
///
/// Already absolute `http(s)` URLs are returned unchanged. Relative paths are
/// appended to the base path as-is: dot segments are not resolved and the last
/// base path segment is not replaced.
pub fn to_absolute_uri(url: &str, base: &BaseUrl) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }

    if url.starts_with("//") {
        format!("{}:{}", base.scheme, url)
    } else if url.starts_with('/') {
        format!("{}://{}{}", base.scheme, base.host, url)
    } else {
        format!("{}://{}{}{}", base.scheme, base.host, base.path, url)
    }
}

/// Whether `url` has the strict absolute shape accepted for cover images.
pub fn is_url(url: &str) -> bool {
    REGEXPS.valid_url.is_match(url)
}

pub fn is_data_uri(url: &str) -> bool {
    url.trim_start()
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Length in characters, not bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
