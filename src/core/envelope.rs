//! Shapes a raw model response can arrive in, and how candidate text is
//! pulled out of each.

use serde_json::{Number, Value};
use std::borrow::Cow;

/// A raw response classified by which known fields it exposes.
///
/// Variants are checked in declaration order; the first match wins.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope<'a> {
    /// Object with a flattened, non-empty `output_text` string.
    OutputText(&'a str),
    /// Object with an `output` array of items carrying `content` parts.
    OutputItems(&'a [Value]),
    /// A bare string.
    Text(&'a str),
    /// `output_text` is present and truthy but is not a string.
    Unreadable,
    /// Anything else; its JSON serialization becomes the candidate text.
    Other(&'a Value),
}

impl<'a> ResponseEnvelope<'a> {
    pub fn classify(raw: &'a Value) -> Self {
        if let Some(output_text) = raw.get("output_text").filter(|v| is_truthy(v)) {
            return match output_text.as_str() {
                Some(text) => ResponseEnvelope::OutputText(text),
                None => ResponseEnvelope::Unreadable,
            };
        }

        if let Some(Value::Array(items)) = raw.get("output") {
            return ResponseEnvelope::OutputItems(items);
        }

        match raw {
            Value::String(text) => ResponseEnvelope::Text(text),
            other => ResponseEnvelope::Other(other),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ResponseEnvelope::OutputText(_) => "output_text",
            ResponseEnvelope::OutputItems(_) => "output",
            ResponseEnvelope::Text(_) => "text",
            ResponseEnvelope::Unreadable => "unreadable",
            ResponseEnvelope::Other(_) => "other",
        }
    }

    /// Text believed to hold the JSON payload, or `None` if the envelope
    /// cannot be read at all.
    ///
    /// An `output` array is unreadable when an item or a part is not an
    /// object, or when an item's `content` is neither absent, null, nor an
    /// array.
    pub fn candidate_text(&self) -> Option<Cow<'a, str>> {
        match self {
            ResponseEnvelope::OutputText(text) | ResponseEnvelope::Text(text) => {
                Some(Cow::Borrowed(*text))
            }
            ResponseEnvelope::OutputItems(items) => join_output_items(items).map(Cow::Owned),
            ResponseEnvelope::Unreadable => None,
            ResponseEnvelope::Other(value) => Some(Cow::Owned(value.to_string())),
        }
    }
}

fn join_output_items(items: &[Value]) -> Option<String> {
    let mut joined = String::new();
    for item in items {
        let parts = match item.as_object()?.get("content") {
            None | Some(Value::Null) => continue,
            Some(Value::Array(parts)) => parts,
            Some(_) => return None,
        };
        for part in parts {
            joined.push_str(&part_text(part)?);
        }
    }
    Some(joined)
}

fn part_text(part: &Value) -> Option<Cow<'_, str>> {
    let text = match part.as_object()?.get("text") {
        Some(Value::String(text)) => Cow::Borrowed(text.as_str()),
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(other) => Cow::Owned(other.to_string()),
    };
    Some(text)
}

/// Numeric value of a JSON number read from its literal text, so values
/// beyond `f64` range become infinities instead of being lost.
pub fn number_as_f64(number: &Number) -> Option<f64> {
    number.to_string().parse::<f64>().ok()
}

/// Loose truthiness: `null`, `false`, `0`, and `""` are falsy; every other
/// value, including empty arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => number_as_f64(n).is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
