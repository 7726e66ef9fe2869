use std::path::Path;

use serde::Deserialize;

use crate::error::AnalysisError;
use crate::types::Granularity;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub granularity: Granularity,
    /// Fail instead of warning when the provider's decoded text differs from
    /// the token concatenation.
    pub strict_text_check: bool,
    /// Units at or below this confidence are listed in the report.
    pub low_confidence_threshold: f64,
    pub report_top_n: usize,
}

impl AnalyzerConfig {
    pub const DEFAULT_LOW_CONFIDENCE_THRESHOLD: f64 = 50.0;
    pub const DEFAULT_REPORT_TOP_N: usize = 20;

    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::io("read analyzer config", e))?;
        serde_json::from_str(&data).map_err(|e| AnalysisError::json("parse analyzer config", e))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Sentence,
            strict_text_check: false,
            low_confidence_threshold: Self::DEFAULT_LOW_CONFIDENCE_THRESHOLD,
            report_top_n: Self::DEFAULT_REPORT_TOP_N,
        }
    }
}
