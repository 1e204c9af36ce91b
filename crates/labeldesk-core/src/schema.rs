//! Label schema: the fixed set of labeling dimensions and their legal values.

use crate::error::{LabelDeskError, Result};
use crate::session::LabelSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One labeling axis with a closed value domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Token used in label sets and exports (e.g. `sentiment`).
    pub key: String,
    /// Column header in the tabular export. Defaults to the capitalized key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Legal values, in presentation order.
    pub values: Vec<String>,
}

impl Dimension {
    pub fn new<V, S>(key: impl Into<String>, values: V) -> Self
    where
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            title: None,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Header text for this dimension's export column.
    pub fn title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => capitalize(&self.key),
        }
    }

    pub fn allows(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result of validating a draft against the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Dimension keys without a selection, in schema order.
    pub missing: Vec<String>,
}

impl Validation {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// The exhaustively enumerated set of label dimensions.
///
/// Dimension order is significant: selection UIs, exporters and reports all
/// iterate in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Dimension>", into = "Vec<Dimension>")]
pub struct LabelSchema {
    dimensions: Vec<Dimension>,
}

impl LabelSchema {
    /// Builds a schema, rejecting empty schemas, duplicate keys and empty
    /// value domains.
    pub fn new(dimensions: Vec<Dimension>) -> Result<Self> {
        if dimensions.is_empty() {
            return Err(LabelDeskError::config("label schema has no dimensions"));
        }

        let mut seen = HashSet::new();
        for dimension in &dimensions {
            if dimension.key.trim().is_empty() {
                return Err(LabelDeskError::config("dimension key must not be empty"));
            }
            if !seen.insert(dimension.key.as_str()) {
                return Err(LabelDeskError::config(format!(
                    "duplicate dimension '{}'",
                    dimension.key
                )));
            }
            if dimension.values.is_empty() {
                return Err(LabelDeskError::config(format!(
                    "dimension '{}' has no values",
                    dimension.key
                )));
            }
            if dimension.values.iter().any(|v| v.trim().is_empty()) {
                return Err(LabelDeskError::config(format!(
                    "dimension '{}' has an empty value token",
                    dimension.key
                )));
            }
        }

        Ok(Self { dimensions })
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Dimension keys in schema order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.dimensions.iter().map(|d| d.key.as_str())
    }

    pub fn dimension(&self, key: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.key == key)
    }

    /// Checks that `value` is a legal selection for `key`.
    pub fn check(&self, key: &str, value: &str) -> Result<()> {
        let dimension = self
            .dimension(key)
            .ok_or_else(|| LabelDeskError::UnknownDimension(key.to_string()))?;
        if !dimension.allows(value) {
            return Err(LabelDeskError::invalid_value(key, value));
        }
        Ok(())
    }

    /// Reports which dimensions of `draft` still lack a selection.
    pub fn validate(&self, draft: &LabelSet) -> Validation {
        let missing = self
            .keys()
            .filter(|key| draft.selected(key).is_none())
            .map(str::to_string)
            .collect();
        Validation { missing }
    }

    /// An all-null draft over exactly this schema's dimensions.
    pub fn empty_draft(&self) -> LabelSet {
        LabelSet::empty(self.keys())
    }
}

impl Default for LabelSchema {
    fn default() -> Self {
        Self {
            dimensions: vec![
                Dimension::new("sentiment", ["positive", "negative", "neutral"]),
                Dimension::new(
                    "category",
                    ["product", "service", "delivery", "spam", "other"],
                ),
                Dimension::new("priority", ["high", "medium", "low"]),
                Dimension::new("quality", ["excellent", "good", "fair", "poor"]),
            ],
        }
    }
}

impl TryFrom<Vec<Dimension>> for LabelSchema {
    type Error = LabelDeskError;

    fn try_from(dimensions: Vec<Dimension>) -> Result<Self> {
        Self::new(dimensions)
    }
}

impl From<LabelSchema> for Vec<Dimension> {
    fn from(schema: LabelSchema) -> Self {
        schema.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_order() {
        let schema = LabelSchema::default();
        let keys: Vec<&str> = schema.keys().collect();
        assert_eq!(keys, vec!["sentiment", "category", "priority", "quality"]);
        assert_eq!(schema.dimensions()[0].title(), "Sentiment");
    }

    #[test]
    fn test_validate_reports_missing_in_schema_order() {
        let schema = LabelSchema::default();
        let mut draft = schema.empty_draft();
        draft.set("category", "spam");

        let validation = schema.validate(&draft);
        assert!(!validation.is_complete());
        assert_eq!(validation.missing, vec!["sentiment", "priority", "quality"]);
    }

    #[test]
    fn test_validate_complete_draft() {
        let schema = LabelSchema::new(vec![Dimension::new("color", ["red", "blue"])]).unwrap();
        let mut draft = schema.empty_draft();
        draft.set("color", "blue");
        assert!(schema.validate(&draft).is_complete());
    }

    #[test]
    fn test_check_rejects_unknown_dimension_and_value() {
        let schema = LabelSchema::default();
        assert!(schema.check("sentiment", "positive").is_ok());
        assert_eq!(
            schema.check("mood", "happy"),
            Err(LabelDeskError::UnknownDimension("mood".into()))
        );
        assert_eq!(
            schema.check("priority", "urgent"),
            Err(LabelDeskError::invalid_value("priority", "urgent"))
        );
    }

    #[test]
    fn test_new_rejects_bad_schemas() {
        assert!(LabelSchema::new(vec![]).unwrap_err().is_config());
        assert!(
            LabelSchema::new(vec![
                Dimension::new("a", ["x"]),
                Dimension::new("a", ["y"]),
            ])
            .unwrap_err()
            .is_config()
        );
        assert!(
            LabelSchema::new(vec![Dimension::new("a", Vec::<String>::new())])
                .unwrap_err()
                .is_config()
        );
    }

    #[test]
    fn test_explicit_title_overrides_key() {
        let dimension = Dimension::new("prio", ["high"]).with_title("Priority Level");
        assert_eq!(dimension.title(), "Priority Level");
    }
}
