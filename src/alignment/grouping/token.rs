use super::score_token;
use crate::types::{Segment, TokenLogprob, TokenSegment};

/// Hands out tokens to segments by length, with one cursor that never
/// rewinds.
///
/// Each segment takes tokens until the summed token length reaches or passes
/// the segment length; the token that crosses the line stays with the
/// current segment even when it spills into the next one. A miscount shifts
/// every later boundary. Segments that get no token are left out.
pub fn group_by_token(segments: &[Segment], tokens: &[TokenLogprob]) -> Vec<TokenSegment> {
    let mut grouped = Vec::new();
    let mut cursor = 0usize;

    for segment in segments {
        let segment_len = segment.text.chars().count();
        let mut consumed_len = 0usize;
        let first = cursor;

        while cursor < tokens.len() && consumed_len < segment_len {
            consumed_len += tokens[cursor].text.chars().count();
            cursor += 1;
        }

        if cursor == first {
            tracing::debug!(
                segment = segment.text.as_str(),
                "grouping: segment dropped, tokens exhausted"
            );
            continue;
        }

        tracing::debug!(
            segment = segment.text.as_str(),
            first_token = first,
            token_count = cursor - first,
            segment_len,
            consumed_len,
            "grouping: tokens assigned to segment"
        );
        grouped.push(TokenSegment {
            text: segment.text.clone(),
            kind: segment.kind,
            tokens: tokens[first..cursor].iter().map(score_token).collect(),
        });
    }

    grouped
}
