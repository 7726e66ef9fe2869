//! Decoding of provider payloads into [`AnalysisInput`].
//!
//! Only the shape of a chat-completion response is handled here; making the
//! request is the caller's job.

use serde::Deserialize;

use crate::error::AnalysisError;
use crate::types::{AnalysisInput, TokenLogprob};

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<Message>,
    #[serde(default)]
    logprobs: Option<ChoiceLogprobs>,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceLogprobs {
    #[serde(default)]
    content: Option<Vec<TokenLogprob>>,
}

impl AnalysisInput {
    /// Reads `choices[0].message.content` and `choices[0].logprobs.content`.
    pub fn from_chat_completion_json(json: &str) -> Result<Self, AnalysisError> {
        let completion: ChatCompletion = serde_json::from_str(json)
            .map_err(|e| AnalysisError::json("parse chat completion", e))?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::missing_input("choices"))?;
        let text = choice
            .message
            .and_then(|message| message.content)
            .ok_or_else(|| AnalysisError::missing_input("message.content"))?;
        let tokens = choice
            .logprobs
            .and_then(|logprobs| logprobs.content)
            .ok_or_else(|| AnalysisError::missing_input("logprobs.content"))?;

        Ok(Self {
            text: Some(text),
            tokens,
        })
    }

    /// Reads the plain `{ "text": ..., "tokens": [...] }` form.
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(json).map_err(|e| AnalysisError::json("parse analysis input", e))
    }

    /// Concatenation of token texts in order. All offsets refer to this string.
    pub fn reconstructed_text(&self) -> String {
        self.tokens.iter().map(|token| token.text.as_str()).collect()
    }
}
