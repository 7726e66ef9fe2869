use std::fmt;

use serde::Serialize;

/// Converts a natural-log probability into a percentage.
///
/// Not clamped: a positive logprob yields a value above 100.
pub fn logprob_to_confidence(logprob: f64) -> f64 {
    logprob.exp() * 100.0
}

/// Confidence of a group of tokens: the arithmetic mean of their logprobs,
/// exponentiated. This is the geometric mean of the token probabilities, not
/// the mean of per-token confidences.
///
/// Returns `None` for an empty group.
pub fn mean_logprob_confidence<I>(logprobs: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for logprob in logprobs {
        sum += logprob;
        count += 1;
    }
    (count > 0).then(|| logprob_to_confidence(sum / count as f64))
}

/// Qualitative confidence band. Ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLabel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceLabel {
    pub const ALL: [Self; 5] = [
        Self::VeryHigh,
        Self::High,
        Self::Medium,
        Self::Low,
        Self::VeryLow,
    ];

    /// Bands are upper-exclusive: exactly 95 is `High`, exactly 50 is `VeryLow`.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 95.0 {
            Self::VeryHigh
        } else if confidence > 85.0 {
            Self::High
        } else if confidence > 70.0 {
            Self::Medium
        } else if confidence > 50.0 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::VeryLow => "Very Low",
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Linear red (0%) to green (100%) ramp. Out-of-range confidence saturates.
pub fn confidence_color(confidence: f64) -> Rgb {
    let fraction = confidence / 100.0;
    Rgb {
        r: channel(255.0 * (1.0 - fraction)),
        g: channel(255.0 * fraction),
        b: 0,
    }
}

// Ties round to even.
fn channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}
