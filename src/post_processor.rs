//! Turns the cleaned article container into output.

use crate::constants::REGEXPS;
use crate::dom::{Document, NodeId};
use crate::utils::{is_data_uri, to_absolute_uri, BaseUrl};
use std::io;
use tracing::{debug, trace};

/// Tag and attribute pairs rewritten to absolute URLs.
const URL_ATTRIBUTES: [(&str, &str); 4] = [
    ("a", "href"),
    ("iframe", "src"),
    ("embed", "src"),
    ("object", "data"),
];

/// Rewrites every resource URL in `container` to absolute form.
///
/// Elements whose URL resolves to nothing are removed. Returns the image
/// URLs in document order.
pub fn fix_relative_uris(doc: &mut Document, container: NodeId, base: &BaseUrl) -> Vec<String> {
    let image_list = fix_images(doc, container, base);

    for (tag, attr) in URL_ATTRIBUTES {
        for node in doc.elements_by_tag(container, tag) {
            if doc.is_alive(node) {
                rewrite_or_remove(doc, node, attr, base);
            }
        }
    }

    for video in doc.elements_by_tag(container, "video") {
        if !doc.is_alive(video) {
            continue;
        }
        for source in doc.elements_by_tag(video, "source") {
            rewrite_or_remove(doc, source, "src", base);
        }
        if doc.has_attr(video, "src") {
            rewrite_or_remove(doc, video, "src", base);
        }
    }

    debug!(images = image_list.len(), "resolved resource urls");
    image_list
}

fn fix_images(doc: &mut Document, container: NodeId, base: &BaseUrl) -> Vec<String> {
    let mut image_list = Vec::new();

    for img in doc.elements_by_tag(container, "img") {
        if !doc.is_alive(img) {
            continue;
        }
        let source = ["file", "data-src", "src"]
            .into_iter()
            .map(|name| doc.attr(img, name).trim())
            .find(|value| !value.is_empty())
            .unwrap_or_default();

        if source.is_empty() || is_data_uri(source) {
            trace!(source, "dropping image without a usable source");
            doc.remove(img);
            continue;
        }

        let src = to_absolute_uri(source, base);
        doc.set_attr(img, "src", &src);
        image_list.push(src);
    }

    image_list
}

fn rewrite_or_remove(doc: &mut Document, node: NodeId, attr: &str, base: &BaseUrl) {
    let resolved = to_absolute_uri(doc.attr(node, attr), base);
    if resolved.is_empty() {
        trace!(tag = doc.tag_name(node), attr, "removing element with empty url");
        doc.remove(node);
    } else {
        doc.set_attr(node, attr, &resolved);
    }
}

/// Inner HTML of the container with each `<br>` run collapsed to one `<br />`.
pub fn get_content(doc: &Document, container: NodeId) -> io::Result<String> {
    let html = doc.inner_html(container)?;
    Ok(REGEXPS.kill_breaks.replace_all(&html, "<br />").into_owned())
}

/// Text of the outermost paragraphs, one per line.
pub fn get_summary(doc: &Document, container: NodeId) -> String {
    doc.elements_by_tag(container, "p")
        .into_iter()
        .filter(|&p| !doc.has_ancestor_tag(p, "p", container))
        .map(|p| doc.text(p).trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(doc: &Document) -> NodeId {
        doc.elements_by_tag(doc.root(), "body")[0]
    }

    fn fixed(html: &str, base: &str) -> (Document, Vec<String>) {
        let mut doc = Document::parse(html).unwrap();
        let body = body(&doc);
        let images = fix_relative_uris(&mut doc, body, &BaseUrl::parse(Some(base)));
        (doc, images)
    }

    #[test]
    fn images_prefer_file_then_data_src() {
        let (doc, images) = fixed(
            concat!(
                r#"<img file="/f.png" data-src="/d.png" src="/s.png">"#,
                r#"<img data-src="d.png" src="s.png"><img src="//cdn.example.com/s.png">"#,
            ),
            "https://example.com/news/",
        );
        assert_eq!(
            images,
            vec![
                "https://example.com/f.png",
                "https://example.com/news/d.png",
                "https://cdn.example.com/s.png",
            ]
        );
        let first = doc.elements_by_tag(doc.root(), "img")[0];
        assert_eq!(doc.attr(first, "src"), "https://example.com/f.png");
    }

    #[test]
    fn drops_images_without_usable_source() {
        let (doc, images) = fixed(
            r#"<img src="data:image/png;base64,AAAA"><img alt="none"><img src="/ok.png">"#,
            "http://example.com/",
        );
        assert_eq!(images, vec!["http://example.com/ok.png"]);
        assert_eq!(doc.elements_by_tag(doc.root(), "img").len(), 1);
    }

    #[test]
    fn rewrites_links_and_removes_empty_ones() {
        let (doc, _) = fixed(
            concat!(
                r#"<a href="/one">one</a><a href="">two</a>"#,
                r#"<a>three</a><a href="https://other.org/">four</a>"#,
            ),
            "http://example.com/",
        );
        let hrefs: Vec<&str> = doc
            .elements_by_tag(doc.root(), "a")
            .into_iter()
            .map(|a| doc.attr(a, "href"))
            .collect();
        assert_eq!(hrefs, vec!["http://example.com/one", "https://other.org/"]);
    }

    #[test]
    fn rewrites_embedded_media() {
        let (doc, _) = fixed(
            concat!(
                r#"<iframe src="//player.vimeo.com/video/1"></iframe>"#,
                r#"<object data="/movie.swf"></object>"#,
                r#"<video><source src="/clip.mp4"></video><video src="/v.mp4"></video>"#,
            ),
            "https://example.com/",
        );
        let root = doc.root();
        let iframe = doc.elements_by_tag(root, "iframe")[0];
        let object = doc.elements_by_tag(root, "object")[0];
        let source = doc.elements_by_tag(root, "source")[0];
        let video = doc.elements_by_tag(root, "video")[1];
        assert_eq!(doc.attr(iframe, "src"), "https://player.vimeo.com/video/1");
        assert_eq!(doc.attr(object, "data"), "https://example.com/movie.swf");
        assert_eq!(doc.attr(source, "src"), "https://example.com/clip.mp4");
        assert_eq!(doc.attr(video, "src"), "https://example.com/v.mp4");
    }

    #[test]
    fn video_without_src_is_kept_untouched() {
        let (doc, _) = fixed("<video><source src=\"/a.mp4\"></video>", "http://example.com/");
        let video = doc.elements_by_tag(doc.root(), "video")[0];
        assert!(!doc.has_attr(video, "src"));
    }

    #[test]
    fn content_collapses_break_runs() {
        let doc = Document::parse("<div><p>a</p>one<br><br> <br>two</div>").unwrap();
        let div = doc.elements_by_tag(doc.root(), "div")[0];
        assert_eq!(get_content(&doc, div).unwrap(), "<p>a</p>one<br />two");
    }

    #[test]
    fn summary_uses_outermost_paragraphs() {
        let doc = Document::parse(concat!(
            "<div><p>  First paragraph. </p>",
            "<section><p>Second<b> bold</b></p></section><p></p></div>",
        ))
        .unwrap();
        let div = doc.elements_by_tag(doc.root(), "div")[0];
        assert_eq!(get_summary(&doc, div), "First paragraph.\nSecond bold");
    }
}
