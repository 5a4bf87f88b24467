//! End-to-end extraction tests over small hand-written pages.

use readability_extract::{extract, ExtractError, ExtractionResult, ExtractorOptions, Readability};

const BASE: &str = "http://example.com/x/";

fn prose() -> String {
    "Plain readable prose with a comma, written to look like an article. ".repeat(2)
}

fn page(head: &str, body: &str) -> String {
    format!("<html><head>{head}</head><body>{body}</body></html>")
}

fn run(html: &str) -> ExtractionResult {
    extract(html, BASE).expect("extraction should succeed")
}

#[test]
fn test_nested_paragraph_becomes_content() {
    let text = "word ".repeat(40);
    let html = page(
        "<title>Scenario A</title>",
        &format!("<div><div><div><p>{text}</p></div></div></div>"),
    );

    let result = run(&html);
    assert_eq!(result.title, "Scenario A");
    assert_eq!(result.content, format!("<div><p>{text}</p></div>"));
    assert_eq!(result.summary, text.trim());
    assert!(result.image_list.is_empty());
}

#[test]
fn test_link_only_sidebar_is_excluded() {
    let text = prose();
    let anchor = "Another related story you might enjoy reading";
    let links: String = (1..=3)
        .map(|i| format!(r#"<p><a href="/related/{i}">{anchor}</a></p>"#))
        .collect();
    let body = format!(
        r#"<div class="article"><p>{text}</p><p>{text}</p></div>
<div class="sidebar-widget">{links}</div>"#
    );
    let html = page("", &body);

    let result = run(&html);
    assert!(result.has_content());
    assert!(!result.content.contains("related"));

    // Without the keyword filter the sidebar is still dropped by link density.
    let options = ExtractorOptions::builder()
        .strip_unlikely_candidates(false)
        .build();
    let result = Readability::new(&html, Some(BASE), Some(options))
        .unwrap()
        .parse()
        .unwrap();
    assert!(result.has_content());
    assert!(!result.content.contains("related"));
    assert!(!result.summary.contains("Another related story"));
}

#[test]
fn test_image_urls_are_resolved() {
    let text = prose();
    let body = format!(
        r#"<div><p>{text}<img src="/a.png"></p><p>{text}<img src="b.png"></p></div>"#
    );

    let result = run(&page("", &body));
    assert_eq!(
        result.image_list,
        vec!["http://example.com/a.png", "http://example.com/x/b.png"]
    );
    assert!(result.content.contains(r#"src="http://example.com/a.png""#));
    assert!(result.content.contains(r#"src="http://example.com/x/b.png""#));
}

#[test]
fn test_lone_heading_is_removed() {
    let text = prose();
    let single = page("", &format!("<div><h1>Title</h1><p>{text}</p><p>{text}</p></div>"));
    let result = run(&single);
    assert!(result.has_content());
    assert!(!result.content.contains("<h1>"));

    let double = page(
        "",
        &format!("<div><h1>One</h1><p>{text}</p><h1>Two</h1><p>{text}</p></div>"),
    );
    let result = run(&double);
    assert!(result.content.contains("<h1>One</h1>"));
    assert!(result.content.contains("<h1>Two</h1>"));
}

#[test]
fn test_short_paragraphs_yield_no_article() {
    let html = page(
        "<title> Short Page </title>",
        "<div><p>Too short.</p><p>Also short.</p></div>",
    );
    let result = run(&html);
    assert_eq!(result.title, "Short Page");
    assert_eq!(result.content, "");
    assert_eq!(result.summary, "");
}

#[test]
fn test_empty_input_is_an_error() {
    assert!(matches!(extract("", BASE), Err(ExtractError::EmptyDocument)));
    assert!(matches!(extract("   \n\t", BASE), Err(ExtractError::EmptyDocument)));
}

#[test]
fn test_cover_is_read_from_meta() {
    let html = page(
        r#"<meta itemprop="image" content="http://example.com/fallback.png">
           <meta property="og:image" content="https://cdn.example.com/cover.jpg">"#,
        &format!("<div><p>{}</p></div>", prose()),
    );
    assert_eq!(run(&html).cover, "https://cdn.example.com/cover.jpg");
}

#[test]
fn test_scripts_and_foreign_embeds_are_dropped() {
    let text = prose();
    let body = format!(
        r#"<div>
<script>var tracking = true;</script>
<noscript>Enable JavaScript</noscript>
<!-- comment -->
<p>{text}</p>
<iframe src="https://www.youtube.com/embed/abc"></iframe>
<iframe src="https://ads.example.net/frame"></iframe>
<p>{text}</p>
</div>"#
    );

    let result = run(&page("", &body));
    assert!(!result.content.contains("tracking"));
    assert!(!result.content.contains("Enable JavaScript"));
    assert!(!result.content.contains("comment"));
    assert!(result.content.contains("https://www.youtube.com/embed/abc"));
    assert!(!result.content.contains("ads.example.net"));
}

#[test]
fn test_break_runs_are_collapsed() {
    let text = prose();
    let body =
        format!("<div><p>{text}</p><p>{text}<br>first line<br><br><br>second part</p></div>");
    let result = run(&page("", &body));
    assert!(!result.content.contains("<br><br>"));
    assert!(result.summary.contains("second part"));
}

#[test]
fn test_result_serializes_to_json() {
    let text = "word ".repeat(40);
    let html = page(
        "<title>Json</title>",
        &format!(r#"<div><p>{text}<img src="/pic.jpg"></p></div>"#),
    );
    let result = run(&html);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["title"], "Json");
    assert_eq!(json["image_list"][0], "http://example.com/pic.jpg");

    let back: ExtractionResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_article_with_inline_links_is_kept() {
    let paragraph = concat!(
        r#"<p>Plain readable prose keeps going here, <a href="/a">an inline link</a>"#,
        r#" then more words <a href="/b">another link</a> and a final clause.</p>"#,
    );
    let html = page("", &format!("<div>{}</div>", paragraph.repeat(4)));

    let result = run(&html);
    assert!(result.has_content());
    assert_eq!(result.content.matches("<p>").count(), 4);
    assert_eq!(result.summary.lines().count(), 4);
    assert!(result.content.contains(r#"href="http://example.com/a""#));
}

#[test]
fn test_photo_story_keeps_its_images() {
    let text = prose();
    let images = r#"<img src="/1.jpg"><img src="/2.jpg"><img src="3.jpg">"#;
    let body = format!("<div><p>{text}</p>{images}<p>{text}</p></div>");

    let result = run(&page("", &body));
    assert!(result.has_content());
    assert_eq!(
        result.image_list,
        vec![
            "http://example.com/1.jpg",
            "http://example.com/2.jpg",
            "http://example.com/x/3.jpg",
        ]
    );
    assert_eq!(result.summary.lines().count(), 2);
}
