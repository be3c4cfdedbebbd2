use crate::core::envelope::is_truthy;
use crate::domain::model::InputFormat;
use crate::utils::error::{Result, ScanError};
use serde::Deserialize;
use serde_json::Value;

/// The parts of a chat-completion response body that carry the answer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub content: Value,
}

impl ChatCompletion {
    /// Content of the first choice, if there is any worth normalizing.
    pub fn content(&self) -> Option<&Value> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .map(|message| &message.content)
            .filter(|content| is_truthy(content))
    }

    pub fn into_content(self) -> Result<Value> {
        if let Some(reason) = self.choices.first().and_then(|c| c.finish_reason.as_deref()) {
            if reason != "stop" {
                tracing::debug!("Completion finished with reason: {}", reason);
            }
        }

        self.content().cloned().ok_or(ScanError::MissingContent)
    }
}

/// Turn captured response text into the value handed to the normalizer.
pub fn raw_response_from_text(text: &str, format: InputFormat) -> Result<Value> {
    match format {
        InputFormat::Raw => Ok(raw_value(text)),
        InputFormat::Completion => {
            let completion: ChatCompletion = serde_json::from_str(text)?;
            completion.into_content()
        }
        InputFormat::Auto => {
            let value = raw_value(text);
            if value.get("choices").is_some() {
                let completion: ChatCompletion = serde_json::from_value(value)?;
                tracing::debug!(
                    "Reading chat completion from model {}",
                    completion.model.as_deref().unwrap_or("unknown")
                );
                completion.into_content()
            } else {
                Ok(value)
            }
        }
    }
}

fn raw_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
