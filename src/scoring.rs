//! Candidate scoring.
//!
//! Every paragraph long enough to look like prose adds a score to its parent
//! and half of it to its grandparent. Containers start from a base score
//! derived from their tag and from keyword matches in `class` and `id`.

use crate::constants::{CLASS_WEIGHT_STEP, REGEXPS};
use crate::dom::{Document, NodeId};
use crate::options::ExtractorOptions;
use crate::utils::char_len;
use std::collections::HashMap;
use tracing::debug;

/// A container accumulating score during one extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateItem {
    pub node: NodeId,
    pub score: f64,
}

/// Candidates keyed by node, kept in the order they were first seen.
#[derive(Debug, Default)]
pub struct ScoreTable {
    entries: Vec<CandidateItem>,
    index: HashMap<NodeId, usize>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, node: NodeId) -> Option<&CandidateItem> {
        self.index.get(&node).map(|&i| &self.entries[i])
    }

    pub fn score(&self, node: NodeId) -> Option<f64> {
        self.get(node).map(|candidate| candidate.score)
    }

    /// Adds `amount` to the node's score, initializing it first if needed.
    pub fn add(&mut self, doc: &Document, node: NodeId, amount: f64) {
        let i = match self.index.get(&node) {
            Some(&i) => i,
            None => {
                self.entries.push(CandidateItem {
                    node,
                    score: initialize_node(doc, node),
                });
                self.index.insert(node, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[i].score += amount;
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &CandidateItem> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CandidateItem> {
        self.entries.iter_mut()
    }
}

/// Base score of a container before any paragraph contributes.
pub fn initialize_node(doc: &Document, node: NodeId) -> f64 {
    let base = match doc.tag_name(node) {
        "article" => 10.0,
        "section" => 8.0,
        "div" => 5.0,
        "pre" | "blockquote" | "td" => 3.0,
        "form" | "ul" | "ol" | "dl" | "dd" | "dt" | "li" | "address" => -3.0,
        "th" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => -5.0,
        _ => 0.0,
    };
    base + get_class_weight(doc, node)
}

/// ±25 for each of `class` and `id`, applied independently.
///
/// The result is always one of -50, -25, 0, 25 or 50.
pub fn get_class_weight(doc: &Document, node: NodeId) -> f64 {
    ["class", "id"]
        .into_iter()
        .map(|name| doc.attr(node, name))
        .filter(|value| !value.is_empty())
        .map(|value| {
            let mut weight = 0.0;
            if REGEXPS.negative.is_match(value) {
                weight -= CLASS_WEIGHT_STEP;
            }
            if REGEXPS.positive.is_match(value) {
                weight += CLASS_WEIGHT_STEP;
            }
            weight
        })
        .sum()
}

/// Score contributed by one paragraph's text.
pub fn content_score(text: &str) -> f64 {
    let commas = text.matches(',').count() + text.matches('，').count();
    let length_bonus = (char_len(text) / 100).min(3);
    1.0 + commas as f64 + length_bonus as f64
}

/// Scores the parents and grandparents of every qualifying `<p>`.
pub fn score_paragraphs(doc: &Document, options: &ExtractorOptions) -> ScoreTable {
    let mut table = ScoreTable::new();

    for paragraph in doc.elements_by_tag(doc.root(), "p") {
        let text = doc.text(paragraph);
        if char_len(&text) < options.min_paragraph_length {
            continue;
        }
        let Some(parent) = doc.parent_element(paragraph) else {
            continue;
        };

        let score = content_score(&text);
        table.add(doc, parent, score);
        if let Some(grandparent) = doc.parent_element(parent) {
            table.add(doc, grandparent, score / 2.0);
        }
    }

    debug!(candidates = table.len(), "scored paragraphs");
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(doc: &Document, tag: &str) -> NodeId {
        doc.elements_by_tag(doc.root(), tag)[0]
    }

    #[test]
    fn content_score_counts_commas_and_length() {
        assert_eq!(content_score("short"), 1.0);
        assert_eq!(content_score("a, b，c"), 3.0);
        assert_eq!(content_score(&"x".repeat(250)), 3.0);
        assert_eq!(content_score(&"x".repeat(1000)), 4.0);
    }

    #[test]
    fn class_weight_is_additive_per_attribute() {
        let doc = Document::parse(
            r#"<div class="article-body" id="main"></div>
               <div class="sidebar"></div>
               <div class="comment" id="footer"></div>
               <div class="post-comments"></div>"#,
        )
        .unwrap();
        let divs = doc.elements_by_tag(doc.root(), "div");
        assert_eq!(get_class_weight(&doc, divs[0]), 50.0);
        assert_eq!(get_class_weight(&doc, divs[1]), -25.0);
        assert_eq!(get_class_weight(&doc, divs[2]), -50.0);
        assert_eq!(get_class_weight(&doc, divs[3]), 0.0);
    }

    #[test]
    fn initialize_node_uses_tag_and_class() {
        let doc = Document::parse(
            r#"<article></article><section class="content"></section><h2></h2><li></li>"#,
        )
        .unwrap();
        assert_eq!(initialize_node(&doc, first(&doc, "article")), 10.0);
        assert_eq!(initialize_node(&doc, first(&doc, "section")), 33.0);
        assert_eq!(initialize_node(&doc, first(&doc, "h2")), -5.0);
        assert_eq!(initialize_node(&doc, first(&doc, "li")), -3.0);
    }

    #[test]
    fn scores_parent_fully_and_grandparent_half() {
        let text = "word ".repeat(40);
        let html = format!("<body><section><div><p>{text}</p></div></section></body>");
        let doc = Document::parse(&html).unwrap();
        let table = score_paragraphs(&doc, &ExtractorOptions::default());

        assert_eq!(table.len(), 2);
        assert_eq!(table.score(first(&doc, "div")), Some(5.0 + 3.0));
        assert_eq!(table.score(first(&doc, "section")), Some(8.0 + 1.5));
    }

    #[test]
    fn short_paragraphs_create_no_candidates() {
        let doc = Document::parse("<body><div><p>too short to count</p></div></body>").unwrap();
        let table = score_paragraphs(&doc, &ExtractorOptions::default());
        assert!(table.is_empty());
    }

    #[test]
    fn table_keeps_first_seen_order() {
        let long = "a".repeat(30);
        let html = format!(
            "<body><div id=\"one\"><p>{long}</p></div><div id=\"two\"><p>{long}</p></div></body>"
        );
        let doc = Document::parse(&html).unwrap();
        let table = score_paragraphs(&doc, &ExtractorOptions::default());
        let ids: Vec<&str> = table.iter().map(|c| doc.attr(c.node, "id")).collect();
        assert_eq!(ids, vec!["one", "", "two"]);
    }
}
