use std::cmp::Ordering;

use serde::Serialize;

use crate::config::AnalyzerConfig;
use crate::scoring::ConfidenceLabel;
use crate::types::{AnalysisResult, Granularity};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceReport {
    pub granularity: Granularity,
    pub unit_count: usize,
    pub mean_confidence: Option<f64>,
    pub min_confidence: Option<f64>,
    pub max_confidence: Option<f64>,
    pub label_counts: Vec<LabelCount>,
    pub low_confidence: Vec<LowConfidenceUnit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub label: ConfidenceLabel,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowConfidenceUnit {
    pub segment_index: usize,
    pub text: String,
    pub confidence: f64,
    pub label: ConfidenceLabel,
}

struct Unit<'a> {
    segment_index: usize,
    text: &'a str,
    confidence: f64,
}

/// Summarizes the scored units of a result: tokens, words or segments
/// depending on its granularity.
pub fn summarize(result: &AnalysisResult, config: &AnalyzerConfig) -> ConfidenceReport {
    let units = collect_units(result);
    let confidences: Vec<f64> = units.iter().map(|unit| unit.confidence).collect();

    let label_counts = ConfidenceLabel::ALL
        .iter()
        .map(|&label| LabelCount {
            label,
            count: confidences
                .iter()
                .filter(|&&c| ConfidenceLabel::from_confidence(c) == label)
                .count(),
        })
        .collect();

    let low_confidence = lowest_units(
        &units,
        config.low_confidence_threshold,
        config.report_top_n,
    );
    tracing::debug!(
        granularity = result.granularity().as_str(),
        unit_count = units.len(),
        low_confidence_count = low_confidence.len(),
        "report: summary computed"
    );

    ConfidenceReport {
        granularity: result.granularity(),
        unit_count: units.len(),
        mean_confidence: mean(&confidences),
        min_confidence: confidences.iter().copied().reduce(f64::min),
        max_confidence: confidences.iter().copied().reduce(f64::max),
        label_counts,
        low_confidence,
    }
}

fn collect_units(result: &AnalysisResult) -> Vec<Unit<'_>> {
    match result {
        AnalysisResult::Token { segments, .. } => segments
            .iter()
            .enumerate()
            .flat_map(|(segment_index, segment)| {
                segment.tokens.iter().map(move |token| Unit {
                    segment_index,
                    text: &token.text,
                    confidence: token.confidence,
                })
            })
            .collect(),
        AnalysisResult::Word { segments, .. } => segments
            .iter()
            .enumerate()
            .flat_map(|(segment_index, segment)| {
                segment.words.iter().map(move |word| Unit {
                    segment_index,
                    text: &word.text,
                    confidence: word.confidence,
                })
            })
            .collect(),
        AnalysisResult::Sentence { segments, .. } => segments
            .iter()
            .enumerate()
            .map(|(segment_index, segment)| Unit {
                segment_index,
                text: &segment.text,
                confidence: segment.confidence,
            })
            .collect(),
    }
}

// Ascending by confidence; ties keep output order.
fn lowest_units(units: &[Unit<'_>], threshold: f64, top_n: usize) -> Vec<LowConfidenceUnit> {
    let mut ranked: Vec<&Unit<'_>> = units
        .iter()
        .filter(|unit| unit.confidence <= threshold)
        .collect();
    ranked.sort_by(|a, b| {
        a.confidence
            .partial_cmp(&b.confidence)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(top_n);
    ranked
        .into_iter()
        .map(|unit| LowConfidenceUnit {
            segment_index: unit.segment_index,
            text: unit.text.to_string(),
            confidence: unit.confidence,
            label: ConfidenceLabel::from_confidence(unit.confidence),
        })
        .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScoredToken, SegmentKind, SentenceSegment, TokenSegment};

    fn sentence(text: &str, confidence: f64) -> SentenceSegment {
        SentenceSegment {
            text: text.to_string(),
            kind: SegmentKind::Sentence,
            confidence,
        }
    }

    fn scored(text: &str, confidence: f64) -> ScoredToken {
        ScoredToken {
            text: text.to_string(),
            logprob: (confidence / 100.0).ln(),
            confidence,
        }
    }

    #[test]
    fn summarize_sentence_result() {
        let result = AnalysisResult::Sentence {
            text: "A. B. C.".to_string(),
            segments: vec![sentence("A.", 98.0), sentence("B.", 40.0), sentence("C.", 50.0)],
        };
        let report = summarize(&result, &AnalyzerConfig::default());

        assert_eq!(report.granularity, Granularity::Sentence);
        assert_eq!(report.unit_count, 3);
        assert_eq!(report.min_confidence, Some(40.0));
        assert_eq!(report.max_confidence, Some(98.0));
        let mean = report.mean_confidence.expect("mean");
        assert!((mean - 62.666_666).abs() < 1e-3);

        let texts: Vec<&str> = report.low_confidence.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(texts, ["B.", "C."]);
        assert_eq!(report.low_confidence[1].label, ConfidenceLabel::VeryLow);

        let very_high = report
            .label_counts
            .iter()
            .find(|c| c.label == ConfidenceLabel::VeryHigh)
            .expect("very high count");
        assert_eq!(very_high.count, 1);
        let total: usize = report.label_counts.iter().map(|c| c.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn summarize_token_result_respects_top_n() {
        let result = AnalysisResult::Token {
            text: "abcd".to_string(),
            segments: vec![
                TokenSegment {
                    text: "ab".to_string(),
                    kind: SegmentKind::Sentence,
                    tokens: vec![scored("a", 10.0), scored("b", 30.0)],
                },
                TokenSegment {
                    text: "cd".to_string(),
                    kind: SegmentKind::Sentence,
                    tokens: vec![scored("c", 20.0), scored("d", 90.0)],
                },
            ],
        };
        let config = AnalyzerConfig {
            report_top_n: 2,
            ..AnalyzerConfig::default()
        };
        let report = summarize(&result, &config);

        assert_eq!(report.unit_count, 4);
        let lowest: Vec<(&str, usize)> = report
            .low_confidence
            .iter()
            .map(|u| (u.text.as_str(), u.segment_index))
            .collect();
        assert_eq!(lowest, [("a", 0), ("c", 1)]);
    }

    #[test]
    fn summarize_empty_result() {
        let result = AnalysisResult::Word {
            text: String::new(),
            segments: Vec::new(),
        };
        let report = summarize(&result, &AnalyzerConfig::default());
        assert_eq!(report.unit_count, 0);
        assert_eq!(report.mean_confidence, None);
        assert_eq!(report.min_confidence, None);
        assert!(report.low_confidence.is_empty());
        assert!(report.label_counts.iter().all(|c| c.count == 0));
    }
}
