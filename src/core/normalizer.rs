//! Response normalizer: turns whatever the vision model sent back into a
//! [`HealthAnalysis`].
//!
//! Extraction runs first (envelope → candidate text → fence stripping →
//! JSON parse, falling back to the widest `{ ... }` window), then every
//! field is validated and clamped on its own. [`normalize`] never fails.

use crate::core::envelope::{is_truthy, number_as_f64, ResponseEnvelope};
use crate::domain::model::{HealthAnalysis, DEFAULT_SCORE, MAX_BULLETS, MAX_SCORE, MIN_SCORE};
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::LazyLock;
use thiserror::Error;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\s*").expect("json fence pattern is valid"));
static BARE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\s*").expect("bare fence pattern is valid"));

pub const NO_PROS: &str = "No pros available";
pub const NO_CONS: &str = "No cons available";

/// Why no payload could be pulled out of a response.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("response envelope is unreadable")]
    UnreadableEnvelope,

    #[error("No valid JSON found")]
    NoJsonFound,

    #[error("embedded JSON object is invalid: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("payload is null")]
    NullPayload,
}

/// Normalize any raw response into a health analysis.
///
/// Irrecoverable input yields [`HealthAnalysis::fallback`].
pub fn normalize(raw: &Value) -> HealthAnalysis {
    try_normalize(raw).unwrap_or_else(|e| {
        tracing::warn!("Failed to parse health analysis: {}", e);
        HealthAnalysis::fallback()
    })
}

/// Same as [`normalize`] but reports whether the fallback was needed.
pub fn try_normalize(raw: &Value) -> Result<HealthAnalysis, ExtractionError> {
    let payload = extract_payload(raw)?;
    Ok(validate_and_clamp(&payload))
}

/// Normalize a plain completion string.
pub fn normalize_text(text: &str) -> HealthAnalysis {
    parse_candidate(text)
        .map(|payload| validate_and_clamp(&payload))
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to parse health analysis: {}", e);
            HealthAnalysis::fallback()
        })
}

pub fn extract_payload(raw: &Value) -> Result<Value, ExtractionError> {
    let envelope = ResponseEnvelope::classify(raw);
    tracing::debug!("Response envelope: {}", envelope.kind());

    let candidate = envelope
        .candidate_text()
        .ok_or(ExtractionError::UnreadableEnvelope)?;
    parse_candidate(&candidate)
}

fn parse_candidate(candidate: &str) -> Result<Value, ExtractionError> {
    let stripped = strip_code_fences(candidate);
    let cleaned = replace_lone_surrogates(&stripped);

    let payload = match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Direct parse failed ({}), trying embedded object", e);
            let window = brace_window(&cleaned).ok_or(ExtractionError::NoJsonFound)?;
            serde_json::from_str::<Value>(window)?
        }
    };

    if payload.is_null() {
        return Err(ExtractionError::NullPayload);
    }
    Ok(payload)
}

/// Remove ```` ```json ```` and bare ```` ``` ```` markers together with the
/// whitespace that follows each of them.
pub fn strip_code_fences(text: &str) -> String {
    let without_tagged = JSON_FENCE.replace_all(text, "");
    BARE_FENCE.replace_all(&without_tagged, "").into_owned()
}

/// Rewrite `\uXXXX` escapes naming an unpaired surrogate as `\ufffd`, which
/// the JSON parser would otherwise reject outright.
fn replace_lone_surrogates(text: &str) -> Cow<'_, str> {
    if !text.contains("\\u") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut replaced = false;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match escaped_surrogate(rest) {
            Some(0xD800..=0xDBFF)
                if matches!(escaped_surrogate(&rest[6..]), Some(0xDC00..=0xDFFF)) =>
            {
                out.push_str(&rest[..12]);
                rest = &rest[12..];
            }
            Some(_) => {
                out.push_str("\\ufffd");
                rest = &rest[6..];
                replaced = true;
            }
            None => {
                // Any other escape, including `\\`, is copied as a pair.
                let len = rest[1..].chars().next().map_or(1, |c| 1 + c.len_utf8());
                out.push_str(&rest[..len]);
                rest = &rest[len..];
            }
        }
    }
    out.push_str(rest);

    if replaced {
        tracing::debug!("Replaced unpaired surrogate escapes in candidate text");
        Cow::Owned(out)
    } else {
        Cow::Borrowed(text)
    }
}

/// Code unit of a leading `\uXXXX` escape when it falls in the surrogate range.
fn escaped_surrogate(text: &str) -> Option<u32> {
    let hex = text.strip_prefix("\\u")?.get(..4)?;
    let unit = u32::from_str_radix(hex, 16).ok()?;
    (0xD800..=0xDFFF).contains(&unit).then_some(unit)
}

/// First `{` through last `}`. A single greedy window, not a balanced match:
/// text holding two separate objects yields a window that fails to parse.
pub fn brace_window(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Build the final record from a parsed payload of unknown shape.
pub fn validate_and_clamp(data: &Value) -> HealthAnalysis {
    HealthAnalysis {
        score: clamp_score(data.get("score")),
        pros: bullets(data.get("pros"), NO_PROS),
        cons: bullets(data.get("cons"), NO_CONS),
    }
}

fn clamp_score(value: Option<&Value>) -> i64 {
    let raw = value
        .filter(|v| is_truthy(v))
        .and_then(numeric_score)
        .unwrap_or(DEFAULT_SCORE as f64);

    (raw.floor() as i64).clamp(MIN_SCORE, MAX_SCORE)
}

// Numbers beyond f64 range arrive as infinities and saturate at the clamp.
// Numeric strings must be finite; any other non-number counts as absent.
fn numeric_score(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => number_as_f64(n),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }?;
    (!number.is_nan()).then_some(number)
}

fn bullets(value: Option<&Value>, fallback: &str) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().take(MAX_BULLETS).map(bullet_text).collect(),
        _ => vec![fallback.to_string()],
    }
}

fn bullet_text(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
