//! Top-candidate selection and sibling expansion.

use crate::constants::{
    REGEXPS, SIBLING_LINK_DENSITY, SIBLING_SCORE_FLOOR, SIBLING_SCORE_RATIO, SIBLING_TEXT_LENGTH,
};
use crate::dom::{Document, NodeId};
use crate::dom_utils::get_link_density;
use crate::options::ExtractorOptions;
use crate::scoring::{score_paragraphs, CandidateItem, ScoreTable};
use tracing::debug;

/// The assembled article: a detached `<div>` holding the top candidate and
/// the siblings kept with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleContainer {
    pub root: NodeId,
    /// Cleaning only ever works below this node, never on it.
    pub top_candidate: NodeId,
}

/// Locates the article and moves it into a new detached `<div>` container.
///
/// Returns `None` when no paragraph qualified for scoring.
pub fn grab_article(doc: &mut Document, options: &ExtractorOptions) -> Option<ArticleContainer> {
    let mut candidates = score_paragraphs(doc, options);
    if candidates.is_empty() {
        debug!("no paragraph long enough to score");
        return None;
    }
    let top = select_top_candidate(doc, &mut candidates)?;

    debug!(
        tag = doc.tag_name(top.node),
        class = doc.attr(top.node, "class"),
        score = top.score,
        "selected top candidate"
    );

    let siblings = collect_siblings(doc, &top, &candidates);
    debug!(included = siblings.len(), "expanded siblings");

    let root = doc.create_element("div");
    for node in siblings {
        doc.append_child(root, node);
    }
    Some(ArticleContainer {
        root,
        top_candidate: top.node,
    })
}

/// Scales every score by `1 - link density` and returns the highest.
///
/// The adjusted scores are written back to the table. On a tie the candidate
/// seen first during scoring wins.
pub fn select_top_candidate(doc: &Document, candidates: &mut ScoreTable) -> Option<CandidateItem> {
    let mut top: Option<CandidateItem> = None;

    for candidate in candidates.iter_mut() {
        candidate.score *= 1.0 - get_link_density(doc, candidate.node);
        if top.map_or(true, |best| candidate.score > best.score) {
            top = Some(*candidate);
        }
    }

    top
}

/// The top candidate and its qualifying siblings, in document order.
fn collect_siblings(doc: &Document, top: &CandidateItem, candidates: &ScoreTable) -> Vec<NodeId> {
    let threshold = SIBLING_SCORE_FLOOR.max(top.score * SIBLING_SCORE_RATIO);

    let Some(parent) = doc.parent(top.node) else {
        return vec![top.node];
    };

    doc.child_elements(parent)
        .filter(|&sibling| {
            sibling == top.node || should_include_sibling(doc, sibling, threshold, candidates)
        })
        .collect()
}

fn should_include_sibling(
    doc: &Document,
    sibling: NodeId,
    threshold: f64,
    candidates: &ScoreTable,
) -> bool {
    if candidates.score(sibling).is_some_and(|score| score > threshold) {
        return true;
    }

    let text = doc.text(sibling);
    let length = text.chars().count();
    let link_density = get_link_density(doc, sibling);

    if length > SIBLING_TEXT_LENGTH && link_density < SIBLING_LINK_DENSITY {
        return true;
    }
    length < SIBLING_TEXT_LENGTH
        && link_density == 0.0
        && REGEXPS.sentence_end.is_match(text.trim_end())
}
