use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::types::{Segment, SegmentKind};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Primary boundaries. The captured group is the cut: whitespace that is
/// dropped, or an empty group right after a newline. The surrounding context
/// characters stay with their pieces.
///
/// 1. `.`/`!`/`?`, whitespace, upper-case letter
/// 2. `.`, whitespace, `-` | `**` | `###`
/// 3. newline followed by `###` | `-`
static BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?](\s+)[A-Z]|\.(\s+)(?:-|\*\*|###)|\n()(?:###|-)").unwrap()
});

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"###[^\S\n]+[^\n]+").unwrap());

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"-\s+[^\n-]+").unwrap());

/// Splits model output into sentence, heading and list-item segments.
///
/// Segments are trimmed and never empty. Their concatenation usually, but not
/// always, covers the whole text.
pub fn segment_text(text: &str) -> Vec<Segment> {
    let normalized = normalize_whitespace(text);
    let mut segments = Vec::new();

    for piece in split_on_boundaries(&normalized) {
        for (text, is_heading) in extract_headings(piece) {
            if is_heading {
                tracing::debug!(heading = text, "segmentation: heading extracted");
                segments.push(Segment::new(text, SegmentKind::Heading));
            } else {
                extract_list_items(text, &mut segments);
            }
        }
    }

    segments
}

/// Collapses each whitespace run to one char: `\n` when the run contains a
/// line break, a space otherwise. Ends are trimmed.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(text, |caps: &Captures<'_>| {
            if caps[0].contains('\n') {
                "\n"
            } else {
                " "
            }
        })
        .trim()
        .to_string()
}

fn split_on_boundaries(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut last = 0usize;
    for caps in BOUNDARY.captures_iter(text) {
        let Some(cut) = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)) else {
            continue;
        };
        pieces.push(&text[last..cut.start()]);
        last = cut.end();
    }
    pieces.push(&text[last..]);
    pieces
}

/// Yields `(text, is_heading)` parts of one piece in order, trimmed, with
/// empty plain parts dropped.
fn extract_headings(piece: &str) -> Vec<(&str, bool)> {
    let mut parts = Vec::new();
    let mut last = 0usize;
    for heading in HEADING.find_iter(piece) {
        let before = piece[last..heading.start()].trim();
        if !before.is_empty() {
            parts.push((before, false));
        }
        parts.push((heading.as_str().trim(), true));
        last = heading.end();
    }
    let rest = piece[last..].trim();
    if !rest.is_empty() {
        parts.push((rest, false));
    }
    parts
}

fn extract_list_items(text: &str, out: &mut Vec<Segment>) {
    if text.starts_with('-') {
        out.push(Segment::new(text, SegmentKind::ListItem));
        return;
    }

    let mut last = 0usize;
    for item in LIST_ITEM.find_iter(text) {
        let before = text[last..item.start()].trim();
        if !before.is_empty() {
            out.push(Segment::new(before, SegmentKind::Sentence));
        }
        let item_text = item.as_str().trim();
        tracing::debug!(item = item_text, "segmentation: list item extracted");
        out.push(Segment::new(item_text, SegmentKind::ListItem));
        last = item.end();
    }
    let rest = text[last..].trim();
    if !rest.is_empty() {
        out.push(Segment::new(rest, SegmentKind::Sentence));
    }
}
