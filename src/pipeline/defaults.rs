use crate::alignment::segmentation::segment_text;
use crate::alignment::words::extract_words;
use crate::pipeline::traits::{Segmenter, WordExtractor};
use crate::types::Segment;

/// Sentence/heading/list-item segmentation for markdown-flavoured output.
pub struct MarkdownSegmenter;

impl Segmenter for MarkdownSegmenter {
    fn segment(&self, text: &str) -> Vec<Segment> {
        segment_text(text)
    }
}

pub struct PunctuationWordExtractor;

impl WordExtractor for PunctuationWordExtractor {
    fn extract_words(&self, text: &str) -> Vec<String> {
        extract_words(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SegmentKind;

    #[test]
    fn markdown_segmenter_segment() {
        let segments = MarkdownSegmenter.segment("### Plan\nStep one. Step two.");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].kind, SegmentKind::Heading);
        assert_eq!(segments, segment_text("### Plan\nStep one. Step two."));
    }

    #[test]
    fn punctuation_word_extractor_extract_words() {
        let extractor = PunctuationWordExtractor;
        assert_eq!(
            extractor.extract_words("Well-known, isn't it?"),
            ["Well-known", "isn", "t", "it"]
        );
    }
}
