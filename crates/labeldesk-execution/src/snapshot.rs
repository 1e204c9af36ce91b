//! Serializable view of a session for presentation layers.

use labeldesk_core::AnnotationEngine;
use labeldesk_core::session::{ActivityEntry, CurrentItem, EngineState};
use labeldesk_core::stats::{Progress, SessionStats};
use serde::Serialize;

/// Selection state of one dimension, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftSelection {
    pub dimension: String,
    pub title: String,
    pub values: Vec<String>,
    pub selected: Option<String>,
}

/// Everything a UI needs to render the session at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: String,
    pub current_item: CurrentItem,
    pub state: EngineState,
    pub draft: Vec<DraftSelection>,
    pub stats: SessionStats,
    pub progress: Progress,
    /// Newest first.
    pub activity: Vec<ActivityEntry>,
}

impl SessionSnapshot {
    pub fn capture(engine: &AnnotationEngine) -> Self {
        let draft = engine
            .schema()
            .dimensions()
            .iter()
            .map(|dimension| DraftSelection {
                dimension: dimension.key.clone(),
                title: dimension.title(),
                values: dimension.values.clone(),
                selected: engine.draft().selected(&dimension.key).map(str::to_string),
            })
            .collect();

        Self {
            session_id: engine.session_id().to_string(),
            current_item: engine.current_item(),
            state: engine.state(),
            draft,
            stats: engine.stats(),
            progress: engine.progress(),
            activity: engine.activity().to_vec(),
        }
    }

    /// Number of dimensions still lacking a selection.
    pub fn missing_count(&self) -> usize {
        self.draft.iter().filter(|d| d.selected.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labeldesk_core::{LabelSchema, SampleSource};

    #[test]
    fn test_capture_lists_dimensions_in_schema_order() {
        let mut engine = AnnotationEngine::new(SampleSource::demo(), LabelSchema::default());
        engine.select_label("priority", "high").unwrap();

        let snapshot = SessionSnapshot::capture(&engine);
        let keys: Vec<&str> = snapshot.draft.iter().map(|d| d.dimension.as_str()).collect();
        assert_eq!(keys, vec!["sentiment", "category", "priority", "quality"]);
        assert_eq!(snapshot.draft[2].selected.as_deref(), Some("high"));
        assert_eq!(snapshot.missing_count(), 3);
        assert_eq!(snapshot.current_item.id, 1);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let engine = AnnotationEngine::new(SampleSource::demo(), LabelSchema::default());
        let value = serde_json::to_value(SessionSnapshot::capture(&engine)).unwrap();
        assert!(value.get("currentItem").is_some());
        assert_eq!(value["state"], "Pending");
        assert_eq!(value["stats"]["count"], 0);
    }
}
