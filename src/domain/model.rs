use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 10;
pub const DEFAULT_SCORE: i64 = 5;
pub const MAX_BULLETS: usize = 5;

/// Normalized health verdict for one analyzed frame.
///
/// Always satisfies `1 <= score <= 10` and at most five bullets per list
/// when produced by [`crate::core::normalizer::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthAnalysis {
    pub score: i64,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

impl HealthAnalysis {
    /// Neutral record returned when nothing usable could be extracted.
    pub fn fallback() -> Self {
        Self {
            score: DEFAULT_SCORE,
            pros: vec!["Unable to analyze".to_string()],
            cons: vec!["Please try again".to_string()],
        }
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Rubric bands the model is asked to score against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    /// 1-3: highly processed or sugary/salty, low nutrient density.
    Poor,
    /// 4-6: acceptable in moderation.
    Moderate,
    /// 7-9: generally healthy, limited additives.
    Healthy,
    /// 10: minimally processed, whole ingredients.
    Excellent,
}

impl ScoreBand {
    pub fn from_score(score: i64) -> Self {
        match score {
            s if s >= MAX_SCORE => ScoreBand::Excellent,
            7..=9 => ScoreBand::Healthy,
            4..=6 => ScoreBand::Moderate,
            _ => ScoreBand::Poor,
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScoreBand::Poor => "poor",
            ScoreBand::Moderate => "moderate",
            ScoreBand::Healthy => "healthy",
            ScoreBand::Excellent => "excellent",
        };
        f.write_str(label)
    }
}

/// One raw model response as it was captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedResponse {
    pub source: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub source: String,
    pub analysis: HealthAnalysis,
    pub band: ScoreBand,
    pub fallback: bool,
}

impl ScanOutcome {
    pub fn analyzed(source: impl Into<String>, analysis: HealthAnalysis) -> Self {
        Self {
            source: source.into(),
            band: analysis.band(),
            fallback: false,
            analysis,
        }
    }

    /// Outcome for a capture that yielded nothing usable.
    pub fn fallback(source: impl Into<String>) -> Self {
        let analysis = HealthAnalysis::fallback();
        Self {
            source: source.into(),
            band: analysis.band(),
            fallback: true,
            analysis,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub outcomes: Vec<ScanOutcome>,
    pub fallback_count: usize,
}

impl ScanReport {
    pub fn new(outcomes: Vec<ScanOutcome>) -> Self {
        let fallback_count = outcomes.iter().filter(|o| o.fallback).count();
        Self {
            generated_at: chrono::Utc::now(),
            outcomes,
            fallback_count,
        }
    }
}

/// How captured text is turned into the value handed to the normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum InputFormat {
    /// Chat-completion bodies are unwrapped, anything else is taken raw.
    #[default]
    Auto,
    /// JSON text becomes its value, other text a plain string.
    Raw,
    /// A chat-completion response body.
    Completion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "analyses.json",
            OutputFormat::Csv => "analyses.csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Csv => f.write_str("csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_record() {
        let fallback = HealthAnalysis::fallback();
        assert_eq!(fallback.score, 5);
        assert_eq!(fallback.pros, vec!["Unable to analyze"]);
        assert_eq!(fallback.cons, vec!["Please try again"]);
        assert_eq!(fallback.band(), ScoreBand::Moderate);
    }

    #[test]
    fn test_score_bands_follow_rubric() {
        assert_eq!(ScoreBand::from_score(1), ScoreBand::Poor);
        assert_eq!(ScoreBand::from_score(3), ScoreBand::Poor);
        assert_eq!(ScoreBand::from_score(4), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(6), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(7), ScoreBand::Healthy);
        assert_eq!(ScoreBand::from_score(9), ScoreBand::Healthy);
        assert_eq!(ScoreBand::from_score(10), ScoreBand::Excellent);
    }

    #[test]
    fn test_health_analysis_serializes_flat() {
        let analysis = HealthAnalysis {
            score: 8,
            pros: vec!["Low sugar".to_string()],
            cons: vec![],
        };
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"score": 8, "pros": ["Low sugar"], "cons": []})
        );
    }

    #[test]
    fn test_report_counts_fallbacks() {
        let report = ScanReport::new(vec![
            ScanOutcome::fallback("a.json"),
            ScanOutcome::analyzed(
                "b.json",
                HealthAnalysis {
                    score: 9,
                    pros: vec![],
                    cons: vec![],
                },
            ),
        ]);
        assert_eq!(report.fallback_count, 1);
        assert_eq!(report.outcomes[1].band, ScoreBand::Healthy);
    }
}
