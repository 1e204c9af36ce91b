//! Export encodings for the annotation log.
//!
//! The tabular encoding is CSV with one column per schema dimension; the
//! structured encoding is an indented JSON array of annotation records.

use crate::error::Result;
use crate::schema::LabelSchema;
use crate::session::Annotation;
use chrono::SecondsFormat;

/// Export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Tabular,
    Structured,
}

impl ExportFormat {
    /// Conventional file name for the encoding.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Tabular => "ai_annotations.csv",
            ExportFormat::Structured => "ai_annotations.json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Tabular => "text/csv",
            ExportFormat::Structured => "application/json",
        }
    }

    /// Short name used in activity details.
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Tabular => "CSV",
            ExportFormat::Structured => "JSON",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" | "tabular" => Ok(ExportFormat::Tabular),
            "json" | "structured" => Ok(ExportFormat::Structured),
            other => Err(format!("unknown export format '{}'", other)),
        }
    }
}

/// Encloses a text field in double quotes, doubling inner quotes.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Quotes a header or label field only when it holds a delimiter, quote or
/// line break.
fn field(text: &str) -> String {
    if text.contains([',', '"', '\r', '\n']) {
        quote(text)
    } else {
        text.to_string()
    }
}

/// Renders the header plus one row per annotation, in log order.
pub fn to_tabular(schema: &LabelSchema, annotations: &[Annotation]) -> String {
    let mut header = vec!["Item ID".to_string(), "Text".to_string()];
    header.extend(schema.dimensions().iter().map(|d| field(&d.title())));
    header.push("Time Spent (s)".to_string());
    header.push("Timestamp".to_string());

    let mut out = header.join(",");
    out.push('\n');

    for annotation in annotations {
        let mut row = vec![annotation.item_id.to_string(), quote(&annotation.text)];
        row.extend(schema.keys().map(|key| {
            annotation
                .labels
                .get(key)
                .map(|value| field(value))
                .unwrap_or_default()
        }));
        row.push(annotation.time_spent_seconds.to_string());
        row.push(
            annotation
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        );
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Renders the annotation log as an indented JSON array.
pub fn to_structured(annotations: &[Annotation]) -> Result<String> {
    Ok(serde_json::to_string_pretty(annotations)?)
}

/// Parses a structured export back into annotation records.
pub fn parse_structured(raw: &str) -> Result<Vec<Annotation>> {
    Ok(serde_json::from_str(raw)?)
}
