//! Measurements over document subtrees shared by the scorer and the cleaner.

use crate::dom::{Document, NodeId};

/// Fraction of the node's text that sits inside real links.
///
/// Anchors without an `href`, or whose `href` is a `#fragment`, do not count.
/// A node without text has a density of exactly 0.
pub fn get_link_density(doc: &Document, node: NodeId) -> f64 {
    let text_length = doc.text_len(node);
    if text_length == 0 {
        return 0.0;
    }

    let link_length: usize = doc
        .elements_by_tag(node, "a")
        .into_iter()
        .filter(|&link| {
            let href = doc.attr(link, "href");
            !href.is_empty() && !href.starts_with('#')
        })
        .map(|link| doc.text_len(link))
        .sum();

    link_length as f64 / text_length as f64
}

/// Counts descendant elements with each tag.
pub fn count_tags<const N: usize>(doc: &Document, node: NodeId, tags: [&str; N]) -> [usize; N] {
    let mut counts = [0; N];
    for descendant in doc.descendants(node) {
        let tag = doc.tag_name(descendant);
        if let Some(index) = tags.iter().position(|&t| t == tag) {
            counts[index] += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(doc: &Document, tag: &str) -> NodeId {
        doc.elements_by_tag(doc.root(), tag)[0]
    }

    #[test]
    fn link_density_counts_real_links_only() {
        let doc = Document::parse(
            "<div><a href=\"/x\">link</a><a href=\"#top\">frag</a><a>none</a>text</div>",
        )
        .unwrap();
        let div = first(&doc, "div");
        let density = get_link_density(&doc, div);
        assert!((density - 4.0 / 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_node_has_zero_density() {
        let doc = Document::parse("<div><a href=\"/x\"></a></div>").unwrap();
        assert_eq!(get_link_density(&doc, first(&doc, "div")), 0.0);
    }

    #[test]
    fn all_link_text_has_density_one() {
        let html = "<div><a href=\"/a\">one</a><a href=\"/b\">two</a></div>";
        let doc = Document::parse(html).unwrap();
        assert_eq!(get_link_density(&doc, first(&doc, "div")), 1.0);
    }

    #[test]
    fn counts_requested_tags() {
        let doc = Document::parse("<div><p><img></p><p></p><ul><li></li></ul></div>").unwrap();
        let [p, img, li, input] = count_tags(&doc, first(&doc, "div"), ["p", "img", "li", "input"]);
        assert_eq!((p, img, li, input), (2, 1, 1, 0));
    }
}
