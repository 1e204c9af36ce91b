//! Session domain model.
//!
//! Drafts, recorded annotations and the status types the engine moves
//! between. Everything here is plain data; transitions live in the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete labels of a recorded annotation, keyed by dimension.
pub type Labels = BTreeMap<String, String>;

/// The in-progress, possibly incomplete label selection for one item.
///
/// Holds exactly the dimensions it was created with; selecting a key that
/// was not part of the draft adds it, but the engine only does so after the
/// schema has accepted the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet {
    selections: BTreeMap<String, Option<String>>,
}

impl LabelSet {
    /// An all-null draft over the given dimension keys.
    pub fn empty<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            selections: keys.into_iter().map(|k| (k.to_string(), None)).collect(),
        }
    }

    /// Overwrites the selection for one dimension only.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.selections.insert(key.into(), Some(value.into()));
    }

    pub fn selected(&self, key: &str) -> Option<&str> {
        self.selections.get(key).and_then(|v| v.as_deref())
    }

    /// Clears every selection without forgetting the dimensions.
    pub fn clear(&mut self) {
        for value in self.selections.values_mut() {
            *value = None;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.selections.values().all(Option::is_some)
    }

    pub fn is_untouched(&self) -> bool {
        self.selections.values().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.selections
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Snapshot of the selected values. Unselected dimensions are dropped,
    /// so callers validate completeness first.
    pub fn to_labels(&self) -> Labels {
        self.selections
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.clone())))
            .collect()
    }
}

/// An immutable, fully-labeled record produced by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// 1-based display id of the annotated item.
    pub item_id: u32,
    /// Snapshot of the item text at submission time.
    pub text: String,
    pub labels: Labels,
    pub time_spent_seconds: u64,
    /// Submission instant, millisecond precision.
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// Status of the item currently presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    Pending,
    Completed,
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemStatus::Pending => write!(f, "Pending"),
            ItemStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// Engine-level state.
///
/// `Advancing` covers the window between a successful submission and the
/// deferred load of the next item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Pending,
    Advancing,
}

/// Read view of the item currently presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentItem {
    pub id: u32,
    pub text: String,
    pub status: ItemStatus,
}

/// Handle for the deferred post-submit advancement.
///
/// Only the ticket issued by the latest submission is honoured; clearing the
/// session or navigating explicitly invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket(pub(crate) u64);

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub annotation: Annotation,
    pub ticket: AdvanceTicket,
}

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix.
pub(crate) mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
