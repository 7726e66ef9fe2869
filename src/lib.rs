//! Per-token, per-word and per-sentence confidence maps for LLM responses,
//! computed from the token log-probabilities the provider returns.

pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod response;
pub mod scoring;
pub mod types;

pub use alignment::report::{summarize, ConfidenceReport, LabelCount, LowConfidenceUnit};
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, ErrorResult};
pub use pipeline::builder::ConfidenceAnalyzerBuilder;
pub use pipeline::runtime::ConfidenceAnalyzer;
pub use pipeline::traits::{Segmenter, WordExtractor};
pub use scoring::{confidence_color, logprob_to_confidence, ConfidenceLabel, Rgb};
pub use types::{
    AnalysisInput, AnalysisResponse, AnalysisResult, Granularity, ScoredToken, Segment,
    SegmentKind, SentenceSegment, TokenLogprob, TokenSegment, WordConfidence, WordSegment,
};

/// Analyzes a token stream with the default pipeline.
pub fn create_confidence_analysis(
    tokens: &[TokenLogprob],
    granularity: Granularity,
) -> Result<AnalysisResult, AnalysisError> {
    let input = AnalysisInput {
        text: None,
        tokens: tokens.to_vec(),
    };
    ConfidenceAnalyzer::default().analyze_with(&input, granularity)
}
