//! Keyword tables, tag sets and tuned thresholds used by the pipeline.

use once_cell::sync::Lazy;
use regex::Regex;

/// Compiled patterns shared by every extraction.
pub struct Regexps {
    /// id/class keywords that mark an element as boilerplate
    pub unlikely_candidates: Regex,
    /// id/class keywords that veto `unlikely_candidates`
    pub ok_maybe_its_a_candidate: Regex,
    pub positive: Regex,
    pub negative: Regex,
    /// Known video hosts
    pub videos: Regex,
    /// `.com/...video...` style paths
    pub videos_in_path: Regex,
    /// A run of `<br>` tags in serialized output
    pub kill_breaks: Regex,
    /// Text ending like a sentence
    pub sentence_end: Regex,
    /// Strict absolute URL shape accepted for cover images
    pub valid_url: Regex,
}

pub static REGEXPS: Lazy<Regexps> = Lazy::new(|| Regexps {
    unlikely_candidates: Regex::new(
        r"(?i)combx|comment|community|disqus|extra|foot|header|menu|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|tweet|twitter|location",
    )
    .expect("unlikely_candidates pattern"),
    ok_maybe_its_a_candidate: Regex::new(r"(?im)and|article|body|column|main|shadow|story|entry|^post")
        .expect("ok_maybe_its_a_candidate pattern"),
    positive: Regex::new(
        r"(?i)article|body|content|entry|hentry|main|page|pagination|post|text|blog|story",
    )
    .expect("positive pattern"),
    negative: Regex::new(
        r"(?i)combx|comment|com|contact|foot|footer|footnote|masthead|media|meta|outbrain|promo|related|scroll|shoutbox|sidebar|sponsor|shopping|tags|tool|widget",
    )
    .expect("negative pattern"),
    videos: Regex::new(
        r"(?i)(?:https?:)?//(www\.|v\.)?(qq|youtube|vimeo|youku|tudou|56|yinyuetai)\.com",
    )
    .expect("videos pattern"),
    videos_in_path: Regex::new(r"(?i)\.com/\w*video\w*").expect("videos_in_path pattern"),
    kill_breaks: Regex::new(r"(?i)(<br\s*/?>(\s|&nbsp;?)*)+").expect("kill_breaks pattern"),
    sentence_end: Regex::new(r"\. ?$").expect("sentence_end pattern"),
    valid_url: Regex::new(
        r"^(https?)?://(www\.)?[a-z0-9]+([\-\.]{1}[a-z0-9]+)*\.[a-z]{2,5}(:[0-9]{1,5})?(/.*)?$",
    )
    .expect("valid_url pattern"),
});

/// Subtrees removed before anything else looks at the document.
pub const NON_CONTENT_TAGS: [&str; 4] = ["script", "style", "link", "noscript"];

/// Form-ish elements never worth keeping.
pub const UNLIKELY_TAGS: [&str; 3] = ["input", "time", "button"];

/// Elements that are never dropped by the id/class heuristic.
pub const PROTECTED_TAGS: [&str; 2] = ["body", "html"];

/// A `<div>` containing any of these keeps its tag.
pub const DIV_TO_P_ELEMS: [&str; 10] = [
    "a",
    "blockquote",
    "dl",
    "div",
    "img",
    "ol",
    "p",
    "pre",
    "table",
    "ul",
];

/// Elements that end a paragraph opened by a `<br>` run.
pub const BLOCK_TAGS: [&str; 26] = [
    "address",
    "article",
    "aside",
    "blockquote",
    "div",
    "dl",
    "fieldset",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

/// Tags the conditional cleaner visits, in order.
pub const CONDITIONALLY_CLEANED_TAGS: [&str; 4] = ["form", "table", "ul", "div"];

/// Presentational and inline-handler attributes stripped from the article.
pub const PRESENTATIONAL_ATTRIBUTES: [&str; 5] =
    ["width", "height", "onclick", "onmouseover", "border"];

pub const DEFAULT_MIN_PARAGRAPH_LENGTH: usize = 25;
pub const CLASS_WEIGHT_STEP: f64 = 25.0;
pub const SIBLING_SCORE_FLOOR: f64 = 10.0;
pub const SIBLING_SCORE_RATIO: f64 = 0.2;
pub const SIBLING_TEXT_LENGTH: usize = 80;
pub const SIBLING_LINK_DENSITY: f64 = 0.25;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_requires_leading_post() {
        assert!(REGEXPS.ok_maybe_its_a_candidate.is_match("post-body"));
        assert!(REGEXPS.ok_maybe_its_a_candidate.is_match("x\npostal"));
        assert!(!REGEXPS.ok_maybe_its_a_candidate.is_match("repost"));
    }

    #[test]
    fn video_allowlist() {
        assert!(REGEXPS.videos.is_match("https://www.youtube.com/embed/abc"));
        assert!(REGEXPS.videos.is_match("http://v.qq.com/x/page"));
        assert!(REGEXPS.videos.is_match("//www.youtube.com/embed/abc"));
        assert!(REGEXPS.videos_in_path.is_match("//player.vimeo.com/video/1"));
        assert!(REGEXPS.videos_in_path.is_match("http://example.com/myvideo/1"));
        assert!(!REGEXPS.videos.is_match("https://ads.example.com/frame"));
    }

    #[test]
    fn valid_url_shape() {
        assert!(REGEXPS.valid_url.is_match("http://example.com/cover.jpg"));
        assert!(REGEXPS.valid_url.is_match("https://www.example.co.uk:8080/a.png"));
        assert!(!REGEXPS.valid_url.is_match("/relative/cover.jpg"));
        assert!(!REGEXPS.valid_url.is_match("data:image/png;base64,AAAA"));
    }
}
