use super::segment_span;
use crate::alignment::offsets::TokenOffsets;
use crate::scoring::mean_logprob_confidence;
use crate::types::{Segment, SentenceSegment, TokenLogprob};

/// One confidence per segment: `exp(mean(logprob)) * 100` over every token
/// that touches the segment's first-occurrence span (bounds inclusive).
/// Segments that cannot be found or touch no token are left out.
pub fn group_by_sentence(
    full_text: &str,
    segments: &[Segment],
    tokens: &[TokenLogprob],
) -> Vec<SentenceSegment> {
    let offsets = TokenOffsets::from_tokens(tokens);
    let mut grouped = Vec::new();

    for segment in segments {
        let Some((start, end)) = segment_span(full_text, segment) else {
            tracing::debug!(
                segment = segment.text.as_str(),
                "grouping: segment dropped, text not found"
            );
            continue;
        };
        let overlapping = offsets.overlapping(start, end);
        let token_count = overlapping.len();
        let Some(confidence) =
            mean_logprob_confidence(tokens[overlapping].iter().map(|t| t.logprob))
        else {
            tracing::debug!(
                segment = segment.text.as_str(),
                "grouping: segment dropped, no overlapping tokens"
            );
            continue;
        };

        tracing::debug!(
            segment = segment.text.as_str(),
            start,
            end,
            token_count,
            confidence = format!("{confidence:.2}"),
            "grouping: segment scored"
        );
        grouped.push(SentenceSegment {
            text: segment.text.clone(),
            kind: segment.kind,
            confidence,
        });
    }

    grouped
}
