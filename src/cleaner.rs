//! Document preprocessing and article cleaning.
//!
//! [`prep_document`] runs on the whole document before scoring: it drops
//! non-content subtrees, turns `<br>` runs into paragraphs, removes unlikely
//! boilerplate and normalizes loose `<div>`s. [`clean_article`] runs on the
//! assembled article container and removes embeds, redundant headings,
//! low-value nested structures and empty paragraphs.

use crate::constants::{
    BLOCK_TAGS, CONDITIONALLY_CLEANED_TAGS, DIV_TO_P_ELEMS, NON_CONTENT_TAGS,
    PRESENTATIONAL_ATTRIBUTES, PROTECTED_TAGS, REGEXPS, UNLIKELY_TAGS,
};
use crate::content_extractor::ArticleContainer;
use crate::dom::{Document, NodeId};
use crate::dom_utils::{count_tags, get_link_density};
use crate::options::ExtractorOptions;
use crate::scoring::get_class_weight;
use tracing::{debug, trace};

/// Prepares the document for scoring.
pub fn prep_document(doc: &mut Document, options: &ExtractorOptions) {
    let root = doc.root();

    remove_non_content(doc, root);
    replace_brs(doc, root);

    let mut removed = 0usize;
    for node in doc.descendant_elements(root) {
        if !doc.is_alive(node) {
            continue;
        }
        if is_unlikely_candidate(doc, node, options) {
            trace!(
                tag = doc.tag_name(node),
                id = doc.attr(node, "id"),
                class = doc.attr(node, "class"),
                "removing unlikely candidate"
            );
            doc.remove(node);
            removed += 1;
            continue;
        }
        if doc.tag_name(node) == "div" {
            transform_div(doc, node);
        }
    }

    debug!(removed, "prepped document");
}

fn remove_non_content(doc: &mut Document, root: NodeId) {
    let doomed: Vec<NodeId> = doc
        .descendants(root)
        .filter(|&node| doc.is_comment(node) || NON_CONTENT_TAGS.contains(&doc.tag_name(node)))
        .collect();
    for node in doomed {
        if doc.is_alive(node) {
            doc.remove(node);
        }
    }
}

/// The `<br>`s (and whitespace between them) chained after `br`. Empty when
/// `br` does not start a run.
fn br_run_tail(doc: &Document, br: NodeId) -> Vec<NodeId> {
    let mut tail = Vec::new();
    let mut pending = Vec::new();
    let mut cursor = doc.next_sibling(br);

    while let Some(node) = cursor {
        if doc.is_whitespace_text(node) {
            pending.push(node);
        } else if doc.tag_name(node) == "br" {
            tail.append(&mut pending);
            tail.push(node);
        } else {
            break;
        }
        cursor = doc.next_sibling(node);
    }

    tail
}

fn starts_br_run(doc: &Document, node: NodeId) -> bool {
    doc.tag_name(node) == "br" && !br_run_tail(doc, node).is_empty()
}

/// Turns every run of two or more `<br>`s into a paragraph boundary.
///
/// Inside a `<p>` the paragraph is split in two. Elsewhere the run becomes a
/// new `<p>` holding the inline content that follows it.
fn replace_brs(doc: &mut Document, root: NodeId) {
    for br in doc.elements_by_tag(root, "br") {
        if !doc.is_alive(br) {
            continue;
        }
        let tail = br_run_tail(doc, br);
        if tail.is_empty() {
            continue;
        }
        for node in tail {
            doc.remove(node);
        }

        let paragraph = doc.create_element("p");
        match doc.parent(br) {
            Some(parent) if doc.tag_name(parent) == "p" => {
                doc.insert_after(parent, paragraph);
                while let Some(next) = doc.next_sibling(br) {
                    doc.append_child(paragraph, next);
                }
            }
            _ => {
                doc.insert_after(br, paragraph);
                while let Some(next) = doc.next_sibling(paragraph) {
                    if BLOCK_TAGS.contains(&doc.tag_name(next)) || starts_br_run(doc, next) {
                        break;
                    }
                    doc.append_child(paragraph, next);
                }
            }
        }
        doc.remove(br);
    }
}

fn is_unlikely_candidate(doc: &Document, node: NodeId, options: &ExtractorOptions) -> bool {
    let tag = doc.tag_name(node);
    if UNLIKELY_TAGS.contains(&tag) {
        return true;
    }
    if !options.strip_unlikely_candidates || PROTECTED_TAGS.contains(&tag) {
        return false;
    }

    let match_string = [doc.attr(node, "id"), doc.attr(node, "class")]
        .into_iter()
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    REGEXPS.unlikely_candidates.is_match(&match_string)
        && !REGEXPS.ok_maybe_its_a_candidate.is_match(&match_string)
}

/// Relabels a block-free `<div>` to `<p>`, or wraps its loose text.
fn transform_div(doc: &mut Document, div: NodeId) {
    let has_block_child = doc
        .descendants(div)
        .any(|node| DIV_TO_P_ELEMS.contains(&doc.tag_name(node)));

    if !has_block_child {
        doc.rename(div, "p");
        return;
    }

    let texts: Vec<NodeId> = doc.children(div).filter(|&node| doc.is_text(node)).collect();
    for text in texts {
        match doc.next_sibling(text) {
            Some(next) if doc.tag_name(next) == "br" => {
                doc.remove(next);
                doc.wrap(text, "p");
            }
            _ => {
                doc.wrap(text, "span");
            }
        }
    }
}

/// Cleans the assembled article in place.
///
/// Every rule looks strictly below the article root and skips the top
/// candidate, so the chosen article node itself always survives.
pub fn clean_article(doc: &mut Document, article: &ArticleContainer, options: &ExtractorOptions) {
    if options.strip_presentational_attributes {
        clean_styles(doc, article.root);
    }

    for tag in ["object", "iframe"] {
        clean_embeds(doc, article, tag, options);
    }

    for tag in ["h1", "h2", "h3"] {
        let headings = article_elements(doc, article, tag);
        if let &[only] = headings.as_slice() {
            trace!(tag, "removing lone heading");
            doc.remove(only);
        }
    }

    for tag in CONDITIONALLY_CLEANED_TAGS {
        clean_conditionally(doc, article, tag, options);
    }

    clean_empty_paragraphs(doc, article);
}

/// Elements with `tag` below the article root, without the top candidate.
fn article_elements(doc: &Document, article: &ArticleContainer, tag: &str) -> Vec<NodeId> {
    doc.elements_by_tag(article.root, tag)
        .into_iter()
        .filter(|&node| node != article.top_candidate)
        .collect()
}

fn clean_styles(doc: &mut Document, root: NodeId) {
    for node in std::iter::once(root).chain(doc.descendant_elements(root)) {
        for attr in PRESENTATIONAL_ATTRIBUTES {
            doc.remove_attr(node, attr);
        }
    }
}

pub(crate) fn is_video_url(url: &str, options: &ExtractorOptions) -> bool {
    match &options.allowed_video_regex {
        Some(regex) => regex.is_match(url),
        None => REGEXPS.videos.is_match(url) || REGEXPS.videos_in_path.is_match(url),
    }
}

/// Whether any attribute in the element's subtree points at an allowed video.
fn embeds_allowed_video(doc: &Document, node: NodeId, options: &ExtractorOptions) -> bool {
    std::iter::once(node)
        .chain(doc.descendants(node))
        .flat_map(|n| doc.attrs(n).iter())
        .any(|(_, value)| is_video_url(value, options))
}

fn clean_embeds(
    doc: &mut Document,
    article: &ArticleContainer,
    tag: &str,
    options: &ExtractorOptions,
) {
    for node in article_elements(doc, article, tag) {
        if !doc.is_alive(node) || embeds_allowed_video(doc, node, options) {
            continue;
        }
        trace!(tag, src = doc.attr(node, "src"), "removing embed");
        doc.remove(node);
    }
}

/// Removes `tag` elements inside the article that look like boilerplate.
pub fn clean_conditionally(
    doc: &mut Document,
    article: &ArticleContainer,
    tag: &str,
    options: &ExtractorOptions,
) {
    for node in article_elements(doc, article, tag) {
        if !doc.is_alive(node) {
            continue;
        }
        if should_remove_conditionally(doc, node, tag, options) {
            trace!(tag, class = doc.attr(node, "class"), "conditionally removing");
            doc.remove(node);
        }
    }
}

fn should_remove_conditionally(
    doc: &Document,
    node: NodeId,
    tag: &str,
    options: &ExtractorOptions,
) -> bool {
    let weight = get_class_weight(doc, node);
    if weight < 0.0 {
        return true;
    }

    let [p, img, li, input] = count_tags(doc, node, ["p", "img", "li", "input"]);
    let (p, img, input) = (p as i64, img as i64, input as i64);
    let li = li as i64 - 100;

    let embed_count = doc
        .elements_by_tag(node, "embed")
        .into_iter()
        .filter(|&embed| !is_video_url(doc.attr(embed, "src"), options))
        .count();

    let link_density = get_link_density(doc, node);
    let content_length = doc.text_len(node);

    (img > p && img > 1)
        || (li > p && tag != "ul" && tag != "ol")
        || input > p / 3
        || (content_length < 25 && (img == 0 || img > 2))
        || (weight < 25.0 && link_density > 0.2)
        || (weight >= 25.0 && link_density > 0.5)
        || (embed_count == 1 && content_length < 35)
        || embed_count > 1
}

fn clean_empty_paragraphs(doc: &mut Document, article: &ArticleContainer) {
    for paragraph in article_elements(doc, article, "p") {
        if !doc.is_alive(paragraph) {
            continue;
        }
        let [img, embed, object] = count_tags(doc, paragraph, ["img", "embed", "object"]);
        if img == 0 && embed == 0 && object == 0 && doc.text(paragraph).trim().is_empty() {
            doc.remove(paragraph);
        }
    }
}
