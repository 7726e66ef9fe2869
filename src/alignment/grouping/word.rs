use super::segment_span;
use crate::alignment::offsets::TokenOffsets;
use crate::alignment::words::locate_words;
use crate::scoring::mean_logprob_confidence;
use crate::types::{Segment, TokenLogprob, WordConfidence, WordSegment};

/// Scores every extracted word from the tokens that touch it and files the
/// words under the segments that contain them.
///
/// - A word's span comes from the forward scan in [`locate_words`].
/// - Its confidence is `exp(mean(logprob)) * 100` over every token with
///   `token_start <= word_end && token_end >= word_start`. Words with no such
///   token are dropped.
/// - A word belongs to a segment when it lies fully inside the segment's
///   first-occurrence span. Words inside no segment are dropped, and so are
///   segments that end up with no words or that cannot be found in the text.
pub fn group_by_word(
    full_text: &str,
    segments: &[Segment],
    words: &[String],
    tokens: &[TokenLogprob],
) -> Vec<WordSegment> {
    let offsets = TokenOffsets::from_tokens(tokens);

    let scored: Vec<WordConfidence> = locate_words(full_text, words)
        .into_iter()
        .filter_map(|word| {
            let overlapping = offsets.overlapping(word.start, word.end);
            let Some(confidence) =
                mean_logprob_confidence(tokens[overlapping].iter().map(|t| t.logprob))
            else {
                tracing::debug!(
                    word = word.text.as_str(),
                    start = word.start,
                    end = word.end,
                    "grouping: word dropped, no overlapping tokens"
                );
                return None;
            };
            Some(WordConfidence {
                text: word.text,
                confidence,
                start: word.start,
                end: word.end,
            })
        })
        .collect();

    let mut grouped = Vec::new();
    for segment in segments {
        let Some((segment_start, segment_end)) = segment_span(full_text, segment) else {
            tracing::debug!(
                segment = segment.text.as_str(),
                "grouping: segment dropped, text not found"
            );
            continue;
        };

        let contained: Vec<WordConfidence> = scored
            .iter()
            .filter(|word| word.start >= segment_start && word.end <= segment_end)
            .cloned()
            .collect();
        if contained.is_empty() {
            tracing::debug!(
                segment = segment.text.as_str(),
                "grouping: segment dropped, no contained words"
            );
            continue;
        }

        grouped.push(WordSegment {
            text: segment.text.clone(),
            kind: segment.kind,
            words: contained,
        });
    }

    grouped
}
