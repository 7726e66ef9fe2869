use crate::config::AnalyzerConfig;
use crate::pipeline::defaults::{MarkdownSegmenter, PunctuationWordExtractor};
use crate::pipeline::runtime::{ConfidenceAnalyzer, ConfidenceAnalyzerParts};
use crate::pipeline::traits::{Segmenter, WordExtractor};

pub struct ConfidenceAnalyzerBuilder {
    config: AnalyzerConfig,
    segmenter: Option<Box<dyn Segmenter>>,
    word_extractor: Option<Box<dyn WordExtractor>>,
}

impl ConfidenceAnalyzerBuilder {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            segmenter: None,
            word_extractor: None,
        }
    }

    pub fn with_segmenter(mut self, segmenter: Box<dyn Segmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    pub fn with_word_extractor(mut self, word_extractor: Box<dyn WordExtractor>) -> Self {
        self.word_extractor = Some(word_extractor);
        self
    }

    pub fn build(self) -> ConfidenceAnalyzer {
        ConfidenceAnalyzer::from_parts(ConfidenceAnalyzerParts {
            config: self.config,
            segmenter: self
                .segmenter
                .unwrap_or_else(|| Box::new(MarkdownSegmenter)),
            word_extractor: self
                .word_extractor
                .unwrap_or_else(|| Box::new(PunctuationWordExtractor)),
        })
    }
}

impl Default for ConfidenceAnalyzer {
    fn default() -> Self {
        ConfidenceAnalyzerBuilder::new(AnalyzerConfig::default()).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AnalysisInput, AnalysisResult, Granularity, Segment, SegmentKind, TokenLogprob,
    };

    /// Treats the whole text as one segment.
    struct WholeTextSegmenter;

    impl Segmenter for WholeTextSegmenter {
        fn segment(&self, text: &str) -> Vec<Segment> {
            vec![Segment::new(text.trim(), SegmentKind::Sentence)]
        }
    }

    /// Splits on spaces only, keeping punctuation.
    struct SpaceWordExtractor;

    impl WordExtractor for SpaceWordExtractor {
        fn extract_words(&self, text: &str) -> Vec<String> {
            text.split(' ').map(str::to_string).collect()
        }
    }

    fn input() -> AnalysisInput {
        AnalysisInput {
            text: None,
            tokens: vec![
                TokenLogprob::new("One", -0.1),
                TokenLogprob::new(".", -0.1),
                TokenLogprob::new(" Two", -0.5),
                TokenLogprob::new(".", -0.1),
            ],
        }
    }

    #[test]
    fn builder_defaults_to_markdown_segmentation() {
        let analyzer = ConfidenceAnalyzerBuilder::new(AnalyzerConfig::default()).build();
        let result = analyzer.analyze(&input()).expect("analyze");
        assert_eq!(result.segment_count(), 2);
        assert_eq!(analyzer.config().granularity, Granularity::Sentence);
    }

    #[test]
    fn builder_segmenter_can_be_overridden() {
        let analyzer = ConfidenceAnalyzerBuilder::new(AnalyzerConfig::default())
            .with_segmenter(Box::new(WholeTextSegmenter))
            .build();
        let result = analyzer.analyze(&input()).expect("analyze");
        assert_eq!(result.segment_count(), 1);
    }

    #[test]
    fn builder_word_extractor_can_be_overridden() {
        let analyzer = ConfidenceAnalyzerBuilder::new(AnalyzerConfig::default())
            .with_segmenter(Box::new(WholeTextSegmenter))
            .with_word_extractor(Box::new(SpaceWordExtractor))
            .build();
        let result = analyzer
            .analyze_with(&input(), Granularity::Word)
            .expect("analyze");
        let AnalysisResult::Word { segments, .. } = result else {
            panic!("expected word result");
        };
        let words: Vec<&str> = segments[0].words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(words, ["One.", "Two."]);
    }

    #[test]
    fn default_analyzer_matches_default_builder() {
        let from_default = ConfidenceAnalyzer::default()
            .analyze(&input())
            .expect("analyze");
        let from_builder = ConfidenceAnalyzerBuilder::new(AnalyzerConfig::default())
            .build()
            .analyze(&input())
            .expect("analyze");
        assert_eq!(from_default, from_builder);
    }
}
