// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML content extraction
//!
//! Turns raw markup into a bounded plain-text excerpt. Two policies exist
//! and are selected by configuration; they are never mixed.

use scraper::{ElementRef, Html, Node, Selector};
use std::fmt;
use std::str::FromStr;

/// Elements whose whole subtree never contributes text
const REMOVED_ELEMENTS: &[&str] = &["script", "style", "nav", "footer", "header", "form", "svg"];

/// Content roots in order of preference
const CONTENT_ROOTS: &[&str] = &["main", "article", "body"];

/// Lines of this many characters or fewer are dropped as noise
const MIN_LINE_CHARS: usize = 20;

/// Paragraphs must be longer than this to be kept by `LongParagraphs`
const MIN_PARAGRAPH_CHARS: usize = 80;

/// Strategy used to pick the text worth keeping from a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionPolicy {
    /// `<main>`, then `<article>`, then `<body>`, with a 20-character line filter
    #[default]
    ContentRoot,
    /// Every `<p>` whose text is longer than 80 characters
    LongParagraphs,
}

impl FromStr for ExtractionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "content-root" | "content_root" | "root" => Ok(Self::ContentRoot),
            "long-paragraphs" | "long_paragraphs" | "paragraphs" => Ok(Self::LongParagraphs),
            other => Err(format!("unknown extraction policy: {}", other)),
        }
    }
}

impl fmt::Display for ExtractionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContentRoot => write!(f, "content-root"),
            Self::LongParagraphs => write!(f, "long-paragraphs"),
        }
    }
}

/// Extract a cleaned excerpt of at most `max_chars` characters
///
/// An empty string means nothing on the page was worth keeping; it is not
/// an error.
pub fn extract(html: &str, max_chars: usize, policy: ExtractionPolicy) -> String {
    let document = Html::parse_document(html);

    let text = match policy {
        ExtractionPolicy::ContentRoot => {
            let root = content_root(&document);
            filter_noise_lines(&visible_text(root, " "))
        }
        ExtractionPolicy::LongParagraphs => long_paragraphs(&document),
    };

    truncate_chars(&text, max_chars)
}

fn is_removed(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|el| REMOVED_ELEMENTS.contains(&el.name()))
}

fn is_hidden(element: ElementRef<'_>) -> bool {
    REMOVED_ELEMENTS.contains(&element.value().name()) || element.ancestors().any(|a| is_removed(a.value()))
}

/// First preferred root outside a removed subtree, else the whole document
fn content_root(document: &Html) -> ElementRef<'_> {
    for tag in CONTENT_ROOTS {
        let Ok(selector) = Selector::parse(tag) else {
            continue;
        };
        if let Some(element) = document.select(&selector).find(|el| !is_hidden(*el)) {
            return element;
        }
    }
    document.root_element()
}

/// Concatenate the text nodes under `root` that are not inside removed elements
fn visible_text(root: ElementRef<'_>, separator: &str) -> String {
    root.descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|a| is_removed(a.value()));
            (!hidden).then_some(&**text)
        })
        .collect::<Vec<&str>>()
        .join(separator)
}

/// Trim every line and drop the short ones, rejoining with single spaces
fn filter_noise_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_LINE_CHARS)
        .collect::<Vec<_>>()
        .join(" ")
}

fn long_paragraphs(document: &Html) -> String {
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    document
        .select(&selector)
        .filter(|p| !is_hidden(*p))
        .map(|p| visible_text(p, ""))
        .map(|text| text.trim().to_string())
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cut `text` to at most `max_chars` characters on a char boundary
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}
