use std::ops::Range;

use crate::types::TokenLogprob;

/// Char offset of the first occurrence of `needle` in `haystack`.
pub fn find_char_offset(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_idx| haystack[..byte_idx].chars().count())
}

/// First occurrence of `needle` in `haystack` at or after char index `from`.
pub(crate) fn find_chars_from(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return (from <= haystack.len()).then_some(from);
    }
    if from >= haystack.len() || needle.len() > haystack.len() - from {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| from + pos)
}

/// Char spans of every token in the reconstructed text, built once per
/// request from running sums of token lengths.
///
/// Both `starts` and `ends` are non-decreasing, so overlap queries are two
/// binary searches instead of a walk from the first token.
#[derive(Debug, Clone, Default)]
pub struct TokenOffsets {
    starts: Vec<usize>,
    ends: Vec<usize>,
}

impl TokenOffsets {
    pub fn new<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        let mut pos = 0usize;
        for text in texts {
            starts.push(pos);
            pos += text.chars().count();
            ends.push(pos);
        }
        Self { starts, ends }
    }

    pub fn from_tokens(tokens: &[TokenLogprob]) -> Self {
        Self::new(tokens.iter().map(|token| token.text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// `[start, end)` char span of token `idx`.
    pub fn span(&self, idx: usize) -> Option<(usize, usize)> {
        Some((*self.starts.get(idx)?, *self.ends.get(idx)?))
    }

    pub fn total_chars(&self) -> usize {
        self.ends.last().copied().unwrap_or(0)
    }

    /// Indices of the tokens that touch the closed interval `[start, end]`,
    /// i.e. `token_start <= end && token_end >= start`.
    ///
    /// Both ends are inclusive, so a token that begins exactly at `end` or
    /// finishes exactly at `start` is counted.
    pub fn overlapping(&self, start: usize, end: usize) -> Range<usize> {
        let first = self.ends.partition_point(|&token_end| token_end < start);
        let last = self.starts.partition_point(|&token_start| token_start <= end);
        first..last.max(first)
    }
}
