use crate::alignment::offsets::find_char_offset;
use crate::scoring::logprob_to_confidence;
use crate::types::{ScoredToken, Segment, TokenLogprob};

mod sentence;
mod token;
mod word;

pub use sentence::group_by_sentence;
pub use token::group_by_token;
pub use word::group_by_word;

/// `[start, end)` char span of a segment, taken from the first occurrence of
/// its text in `full_text`. Repeated segment text therefore always maps to
/// the earliest copy.
fn segment_span(full_text: &str, segment: &Segment) -> Option<(usize, usize)> {
    let start = find_char_offset(full_text, &segment.text)?;
    Some((start, start + segment.text.chars().count()))
}

fn score_token(token: &TokenLogprob) -> ScoredToken {
    ScoredToken {
        text: token.text.clone(),
        logprob: token.logprob,
        confidence: logprob_to_confidence(token.logprob),
    }
}
