//! Table of contents rendering

use crate::context::HeaderEntry;
use crate::escape::Escaper;
use std::collections::{HashMap, HashSet};

/// First line of a generated table of contents
pub const TOC_TITLE: &str = "**Table of Contents**";

/// Anchor a Markdown renderer derives from heading text
///
/// Lowercased; letters, digits and `_` kept; whitespace and punctuation
/// become single hyphens; hyphens at either end dropped.
pub fn anchor(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() || ch == '_' {
            slug.push(ch);
        } else if (ch.is_whitespace() || ch.is_ascii_punctuation()) && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// One list line per heading, without line terminators
///
/// Items are indented two spaces per level below the shallowest heading.
/// Repeated anchors get the lowest `-1`, `-2`, ... suffix not already taken,
/// so every anchor in the list is distinct.
pub fn render(headers: &[HeaderEntry], escaper: Escaper) -> Vec<String> {
    let shallowest = headers.iter().map(|h| h.level).min().unwrap_or(1);
    let mut anchors = Anchors::default();

    headers
        .iter()
        .map(|header| {
            let target = anchors.claim(anchor(&header.text));
            format!(
                "{}- [{}](#{})",
                "  ".repeat(header.level - shallowest),
                escaper(&header.text),
                target
            )
        })
        .collect()
}

/// Anchors handed out so far, with the last suffix tried per base slug
#[derive(Default)]
struct Anchors {
    taken: HashSet<String>,
    suffixes: HashMap<String, usize>,
}

impl Anchors {
    fn claim(&mut self, base: String) -> String {
        let target = if self.taken.contains(&base) {
            let suffix = self.suffixes.entry(base.clone()).or_insert(0);
            loop {
                *suffix += 1;
                let candidate = format!("{}-{}", base, suffix);
                if !self.taken.contains(&candidate) {
                    break candidate;
                }
            }
        } else {
            base
        };
        self.taken.insert(target.clone());
        target
    }
}
