//! Title and cover extraction from the untouched document.

use crate::dom::{Document, NodeId};
use crate::utils::{is_url, to_absolute_uri, BaseUrl};

/// Trimmed text of the first `<title>`, or the `og:title` meta value when the
/// title is missing or blank.
pub fn get_title(doc: &Document) -> String {
    let title = doc
        .elements_by_tag(doc.root(), "title")
        .first()
        .map(|&node| doc.text(node).trim().to_string())
        .unwrap_or_default();
    if !title.is_empty() {
        return title;
    }

    metas(doc)
        .into_iter()
        .find(|&meta| doc.attr(meta, "property") == "og:title")
        .map(|meta| doc.attr(meta, "content").trim().to_string())
        .unwrap_or_default()
}

/// Absolute cover image URL from `og:image`, falling back to `itemprop="image"`.
///
/// When several tags of one kind are present the last one wins. Values that
/// are not absolute `http(s)` URLs yield an empty string.
pub fn get_cover(doc: &Document, base: &BaseUrl) -> String {
    let mut og_image = "";
    let mut itemprop_image = "";

    for meta in metas(doc) {
        if doc.attr(meta, "property") == "og:image" {
            og_image = doc.attr(meta, "content");
        }
        if doc.attr(meta, "itemprop") == "image" {
            itemprop_image = doc.attr(meta, "content");
        }
    }

    let cover = if og_image.is_empty() { itemprop_image } else { og_image };
    if is_url(cover) {
        to_absolute_uri(cover, base)
    } else {
        String::new()
    }
}

fn metas(doc: &Document) -> Vec<NodeId> {
    doc.elements_by_tag(doc.root(), "meta")
}
