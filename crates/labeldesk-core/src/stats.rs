//! Session statistics, distributions and the QA report.
//!
//! Everything here is derived from the recorded annotations; drafts never
//! contribute.

use crate::error::{LabelDeskError, Result};
use crate::schema::LabelSchema;
use crate::session::Annotation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Count of recorded annotations per value of one dimension.
pub type Distribution = BTreeMap<String, usize>;

/// Quality figures supplied by an injected scorer, as percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub accuracy: Option<f64>,
    pub quality_score: Option<f64>,
    pub consistency: Option<f64>,
}

/// Hook for accuracy/quality scoring.
///
/// The engine defines no scoring of its own; without a scorer the quality
/// figures are simply absent.
pub trait QualityScorer: Send + Sync {
    fn score(&self, annotations: &[Annotation]) -> Option<QualityMetrics>;
}

/// Scorer returning configured constants.
///
/// Useful for demos and UI layout; the figures are placeholders, not
/// measurements. Returns nothing for an empty log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedScorer {
    pub accuracy: Option<f64>,
    pub quality_score: Option<f64>,
    pub consistency: Option<f64>,
}

impl QualityScorer for FixedScorer {
    fn score(&self, annotations: &[Annotation]) -> Option<QualityMetrics> {
        if annotations.is_empty() {
            return None;
        }
        Some(QualityMetrics {
            accuracy: self.accuracy,
            quality_score: self.quality_score,
            consistency: self.consistency,
        })
    }
}

/// Running session statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub count: usize,
    pub total_time_seconds: u64,
    pub average_time_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityMetrics>,
}

/// Rounded mean, zero for an empty log.
pub fn average_seconds(total: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    let count = count as u64;
    (total + count / 2) / count
}

/// Completion count against a session target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub target: u32,
    /// Capped at 100.
    pub percent: f64,
}

impl Progress {
    pub fn new(completed: usize, target: u32) -> Self {
        let percent = if target == 0 {
            100.0
        } else {
            (completed as f64 / target as f64 * 100.0).min(100.0)
        };
        Self {
            completed,
            target,
            percent,
        }
    }

    pub fn is_reached(&self) -> bool {
        self.completed >= self.target as usize
    }
}

/// Counts the selected values of `dimension` across `annotations`.
pub fn distribution(
    schema: &LabelSchema,
    annotations: &[Annotation],
    dimension: &str,
) -> Result<Distribution> {
    if schema.dimension(dimension).is_none() {
        return Err(LabelDeskError::UnknownDimension(dimension.to_string()));
    }

    let mut counts = Distribution::new();
    for annotation in annotations {
        if let Some(value) = annotation.labels.get(dimension) {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

/// Distribution of one dimension inside a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionDistribution {
    pub dimension: String,
    pub counts: Distribution,
}

/// Read-only QA summary of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub session_id: String,
    pub total_annotations: usize,
    pub average_time_seconds: u64,
    /// One entry per schema dimension, in schema order.
    pub distributions: Vec<DimensionDistribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityMetrics>,
    #[serde(with = "crate::session::iso_millis")]
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Builds a report over a non-empty log.
    pub fn build(
        session_id: &str,
        schema: &LabelSchema,
        annotations: &[Annotation],
        stats: &SessionStats,
        generated_at: DateTime<Utc>,
    ) -> Result<Self> {
        if annotations.is_empty() {
            return Err(LabelDeskError::NoData);
        }

        let distributions = schema
            .keys()
            .map(|key| {
                Ok(DimensionDistribution {
                    dimension: key.to_string(),
                    counts: distribution(schema, annotations, key)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            session_id: session_id.to_string(),
            total_annotations: annotations.len(),
            average_time_seconds: stats.average_time_seconds,
            distributions,
            quality: stats.quality.clone(),
            generated_at,
        })
    }

    pub fn distribution(&self, dimension: &str) -> Option<&Distribution> {
        self.distributions
            .iter()
            .find(|d| d.dimension == dimension)
            .map(|d| &d.counts)
    }

    /// Plain-text rendering for dialogs and terminals.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "QA REPORT\n\nTotal Annotations: {}\nAverage Time: {}s\n",
            self.total_annotations, self.average_time_seconds
        );
        if let Some(quality) = &self.quality {
            for (name, value) in [
                ("Accuracy", quality.accuracy),
                ("Quality Score", quality.quality_score),
                ("Consistency", quality.consistency),
            ] {
                if let Some(value) = value {
                    out.push_str(&format!("{}: {:.1}%\n", name, value));
                }
            }
        }
        out.push('\n');
        for dist in &self.distributions {
            let counts = dist
                .counts
                .iter()
                .map(|(value, count)| format!("{}: {}", value, count))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("{}: {{{}}}\n", dist.dimension, counts));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Dimension;
    use crate::session::Labels;
    use chrono::TimeZone;

    fn annotation(item_id: u32, color: &str, secs: u64) -> Annotation {
        Annotation {
            item_id,
            text: format!("item {}", item_id),
            labels: Labels::from([("color".to_string(), color.to_string())]),
            time_spent_seconds: secs,
            timestamp: Utc::now(),
        }
    }

    fn color_schema() -> LabelSchema {
        LabelSchema::new(vec![Dimension::new("color", ["red", "blue"])]).unwrap()
    }

    #[test]
    fn test_average_rounds_and_handles_empty() {
        assert_eq!(average_seconds(0, 0), 0);
        assert_eq!(average_seconds(5, 2), 3);
        assert_eq!(average_seconds(4, 3), 1);
    }

    #[test]
    fn test_distribution_sums_to_count() {
        let schema = color_schema();
        let annotations = vec![
            annotation(1, "red", 2),
            annotation(2, "blue", 3),
            annotation(1, "red", 4),
        ];

        let dist = distribution(&schema, &annotations, "color").unwrap();
        assert_eq!(dist.get("red"), Some(&2));
        assert_eq!(dist.get("blue"), Some(&1));
        assert_eq!(dist.values().sum::<usize>(), annotations.len());
    }

    #[test]
    fn test_distribution_unknown_dimension() {
        let err = distribution(&color_schema(), &[], "size").unwrap_err();
        assert_eq!(err, LabelDeskError::UnknownDimension("size".into()));
    }

    #[test]
    fn test_report_requires_data() {
        let err = Report::build(
            "s",
            &color_schema(),
            &[],
            &SessionStats::default(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(err.is_no_data());
    }

    #[test]
    fn test_report_summary_mentions_distributions() {
        let annotations = vec![annotation(1, "red", 2)];
        let stats = SessionStats {
            count: 1,
            total_time_seconds: 2,
            average_time_seconds: 2,
            quality: None,
        };
        let report = Report::build("s", &color_schema(), &annotations, &stats, Utc::now()).unwrap();

        let summary = report.summary();
        assert!(summary.contains("Total Annotations: 1"));
        assert!(summary.contains("color: {red: 1}"));
        assert!(!summary.contains("Accuracy"));
    }

    #[test]
    fn test_report_timestamp_uses_millisecond_utc_form() {
        let generated_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let report = Report::build(
            "s",
            &color_schema(),
            &[annotation(1, "red", 2)],
            &SessionStats::default(),
            generated_at,
        )
        .unwrap();

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["generatedAt"], "2024-05-01T09:00:00.123Z");
    }

    #[test]
    fn test_fixed_scorer_is_silent_without_data() {
        let scorer = FixedScorer {
            accuracy: Some(97.0),
            ..FixedScorer::default()
        };
        assert!(scorer.score(&[]).is_none());
        let metrics = scorer.score(&[annotation(1, "red", 1)]).unwrap();
        assert_eq!(metrics.accuracy, Some(97.0));
        assert_eq!(metrics.consistency, None);
    }

    #[test]
    fn test_progress_caps_at_hundred() {
        assert_eq!(Progress::new(25, 50).percent, 50.0);
        assert_eq!(Progress::new(80, 50).percent, 100.0);
        assert!(Progress::new(0, 0).is_reached());
    }
}
