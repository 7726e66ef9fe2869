use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alignment::offsets::find_char_offset;
use crate::error::{AnalysisError, ErrorResult};

/// One generated token and the natural-log probability the model gave it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLogprob {
    #[serde(alias = "token")]
    pub text: String,
    pub logprob: f64,
}

impl TokenLogprob {
    pub fn new(text: impl Into<String>, logprob: f64) -> Self {
        Self {
            text: text.into(),
            logprob,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredToken {
    pub text: String,
    pub logprob: f64,
    /// `exp(logprob) * 100`, not clamped.
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Sentence,
    Heading,
    ListItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn new(text: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    /// Char interval is [start, end), i.e. start inclusive/end exclusive.
    pub start: usize,
    /// Char interval is [start, end), i.e. start inclusive/end exclusive.
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordConfidence {
    pub text: String,
    pub confidence: f64,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Granularity {
    Token,
    Word,
    #[default]
    Sentence,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Word => "word",
            Self::Sentence => "sentence",
        }
    }
}

/// Unrecognized selectors fall back to sentence level; this never fails.
impl From<&str> for Granularity {
    fn from(value: &str) -> Self {
        match value {
            "token" => Self::Token,
            "word" => Self::Word,
            "sentence" => Self::Sentence,
            other => {
                tracing::debug!(
                    granularity = other,
                    "analysis: unrecognized granularity, using sentence"
                );
                Self::Sentence
            }
        }
    }
}

impl From<String> for Granularity {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tokens of one model response plus, when available, the decoded text the
/// provider reported for it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalysisInput {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub tokens: Vec<TokenLogprob>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenSegment {
    pub text: String,
    pub kind: SegmentKind,
    pub tokens: Vec<ScoredToken>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordSegment {
    pub text: String,
    pub kind: SegmentKind,
    pub words: Vec<WordConfidence>,
}

impl WordSegment {
    /// Words keyed by their char offset relative to the segment start, sorted
    /// by offset. Words that fall outside the segment text are skipped.
    pub fn word_offsets(&self, full_text: &str) -> Vec<(usize, &WordConfidence)> {
        let Some(segment_start) = find_char_offset(full_text, &self.text) else {
            return Vec::new();
        };
        let segment_len = self.text.chars().count();
        let mut offsets: Vec<(usize, &WordConfidence)> = self
            .words
            .iter()
            .filter_map(|word| {
                let relative = word.start.checked_sub(segment_start)?;
                (relative < segment_len).then_some((relative, word))
            })
            .collect();
        offsets.sort_by_key(|(offset, _)| *offset);
        debug_assert!(
            offsets.windows(2).all(|pair| pair[0].0 < pair[1].0),
            "word offsets must be unique within a segment"
        );
        offsets
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceSegment {
    pub text: String,
    pub kind: SegmentKind,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "granularity", rename_all = "lowercase")]
pub enum AnalysisResult {
    Token {
        text: String,
        segments: Vec<TokenSegment>,
    },
    Word {
        text: String,
        segments: Vec<WordSegment>,
    },
    Sentence {
        text: String,
        segments: Vec<SentenceSegment>,
    },
}

impl AnalysisResult {
    pub fn granularity(&self) -> Granularity {
        match self {
            Self::Token { .. } => Granularity::Token,
            Self::Word { .. } => Granularity::Word,
            Self::Sentence { .. } => Granularity::Sentence,
        }
    }

    /// Reconstructed full text the result was aligned against.
    pub fn text(&self) -> &str {
        match self {
            Self::Token { text, .. } | Self::Word { text, .. } | Self::Sentence { text, .. } => {
                text
            }
        }
    }

    pub fn segment_count(&self) -> usize {
        match self {
            Self::Token { segments, .. } => segments.len(),
            Self::Word { segments, .. } => segments.len(),
            Self::Sentence { segments, .. } => segments.len(),
        }
    }
}

/// Result-or-error value as it crosses to the rendering side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Ok(AnalysisResult),
    Err(ErrorResult),
}

impl From<Result<AnalysisResult, AnalysisError>> for AnalysisResponse {
    fn from(result: Result<AnalysisResult, AnalysisError>) -> Self {
        match result {
            Ok(result) => Self::Ok(result),
            Err(err) => Self::Err(ErrorResult::from(&err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granularity_parses_known_values() {
        assert_eq!(Granularity::from("token"), Granularity::Token);
        assert_eq!(Granularity::from("word"), Granularity::Word);
        assert_eq!(Granularity::from("sentence"), Granularity::Sentence);
    }

    #[test]
    fn unknown_granularity_falls_back_to_sentence() {
        assert_eq!(Granularity::from("paragraph"), Granularity::Sentence);
        assert_eq!(Granularity::from(""), Granularity::Sentence);
        assert_eq!(Granularity::from("Token"), Granularity::Sentence);
    }

    #[test]
    fn granularity_deserializes_leniently() {
        let parsed: Granularity = serde_json::from_str("\"paragraph\"").expect("deserialize");
        assert_eq!(parsed, Granularity::Sentence);
        let parsed: Granularity = serde_json::from_str("\"word\"").expect("deserialize");
        assert_eq!(parsed, Granularity::Word);
    }

    #[test]
    fn token_logprob_accepts_provider_field_name() {
        let token: TokenLogprob =
            serde_json::from_str(r#"{"token": "Hi", "logprob": -0.5, "bytes": [72, 105]}"#)
                .expect("deserialize");
        assert_eq!(token, TokenLogprob::new("Hi", -0.5));
    }

    #[test]
    fn result_serializes_with_granularity_tag() {
        let result = AnalysisResult::Sentence {
            text: "Hi.".to_string(),
            segments: vec![SentenceSegment {
                text: "Hi.".to_string(),
                kind: SegmentKind::Sentence,
                confidence: 100.0,
            }],
        };
        let value = serde_json::to_value(&result).expect("serialize");
        assert_eq!(value["granularity"], "sentence");
        assert_eq!(value["text"], "Hi.");
        assert_eq!(value["segments"][0]["kind"], "sentence");
        assert_eq!(value["segments"][0]["confidence"], 100.0);
    }

    #[test]
    fn response_wraps_errors_as_error_object() {
        let response = AnalysisResponse::from(Err(AnalysisError::missing_input("tokens")));
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(value, serde_json::json!({ "error": "missing input: tokens" }));
    }

    #[test]
    fn word_offsets_are_relative_and_sorted() {
        let full_text = "Intro. Hello big world.";
        let word = |text: &str, start: usize| WordConfidence {
            text: text.to_string(),
            confidence: 90.0,
            start,
            end: start + text.chars().count(),
        };
        let segment = WordSegment {
            text: "Hello big world.".to_string(),
            kind: SegmentKind::Sentence,
            words: vec![word("world", 17), word("Hello", 7), word("big", 13)],
        };

        let offsets = segment.word_offsets(full_text);
        let positions: Vec<usize> = offsets.iter().map(|(offset, _)| *offset).collect();
        assert_eq!(positions, vec![0, 6, 10]);
        assert_eq!(offsets[0].1.text, "Hello");
        assert_eq!(offsets[2].1.text, "world");
    }

    #[test]
    fn word_offsets_empty_when_segment_absent() {
        let segment = WordSegment {
            text: "missing".to_string(),
            kind: SegmentKind::Sentence,
            words: Vec::new(),
        };
        assert!(segment.word_offsets("something else").is_empty());
    }
}
