use crate::alignment::grouping::{group_by_sentence, group_by_token, group_by_word};
use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::pipeline::traits::{Segmenter, WordExtractor};
use crate::types::{AnalysisInput, AnalysisResult, Granularity};

/// Turns one response's tokens into a confidence map.
///
/// Holds no per-request state; a single analyzer can serve concurrent calls.
pub struct ConfidenceAnalyzer {
    config: AnalyzerConfig,
    segmenter: Box<dyn Segmenter>,
    word_extractor: Box<dyn WordExtractor>,
}

pub(crate) struct ConfidenceAnalyzerParts {
    pub config: AnalyzerConfig,
    pub segmenter: Box<dyn Segmenter>,
    pub word_extractor: Box<dyn WordExtractor>,
}

impl ConfidenceAnalyzer {
    pub(crate) fn from_parts(parts: ConfidenceAnalyzerParts) -> Self {
        Self {
            config: parts.config,
            segmenter: parts.segmenter,
            word_extractor: parts.word_extractor,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes at the configured granularity.
    pub fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_with(input, self.config.granularity)
    }

    pub fn analyze_with(
        &self,
        input: &AnalysisInput,
        granularity: Granularity,
    ) -> Result<AnalysisResult, AnalysisError> {
        if input.tokens.is_empty() {
            return Err(AnalysisError::missing_input("tokens"));
        }
        if let Some((idx, token)) = input
            .tokens
            .iter()
            .enumerate()
            .find(|(_, token)| token.logprob.is_nan())
        {
            return Err(AnalysisError::invalid_input(format!(
                "token {idx} ({:?}) has a NaN logprob",
                token.text
            )));
        }

        let full_text = input.reconstructed_text();
        self.check_decoded_text(input.text.as_deref(), &full_text)?;

        let segments = self.segmenter.segment(&full_text);
        tracing::debug!(
            granularity = granularity.as_str(),
            token_count = input.tokens.len(),
            segment_count = segments.len(),
            "analysis: text segmented"
        );

        let result = match granularity {
            Granularity::Token => AnalysisResult::Token {
                segments: group_by_token(&segments, &input.tokens),
                text: full_text,
            },
            Granularity::Word => {
                let words = self.word_extractor.extract_words(&full_text);
                tracing::debug!(word_count = words.len(), "analysis: words extracted");
                AnalysisResult::Word {
                    segments: group_by_word(&full_text, &segments, &words, &input.tokens),
                    text: full_text,
                }
            }
            Granularity::Sentence => AnalysisResult::Sentence {
                segments: group_by_sentence(&full_text, &segments, &input.tokens),
                text: full_text,
            },
        };

        if result.segment_count() < segments.len() {
            tracing::debug!(
                emitted = result.segment_count(),
                segmented = segments.len(),
                "analysis: some segments had nothing aligned to them"
            );
        }
        Ok(result)
    }

    fn check_decoded_text(
        &self,
        decoded: Option<&str>,
        reconstructed: &str,
    ) -> Result<(), AnalysisError> {
        let Some(decoded) = decoded else {
            return Ok(());
        };
        if decoded == reconstructed {
            return Ok(());
        }

        let expected_chars = decoded.chars().count();
        let reconstructed_chars = reconstructed.chars().count();
        if self.config.strict_text_check {
            return Err(AnalysisError::TextMismatch {
                expected_chars,
                reconstructed_chars,
            });
        }
        tracing::warn!(
            expected_chars,
            reconstructed_chars,
            "analysis: decoded text differs from token concatenation; offsets follow the tokens"
        );
        Ok(())
    }
}
