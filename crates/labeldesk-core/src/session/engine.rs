use super::activity::{ActivityAction, ActivityEntry, ActivityLog, DEFAULT_ACTIVITY_CAPACITY};
use super::clock::{Clock, SystemClock, elapsed_seconds};
use super::model::{
    AdvanceTicket, Annotation, CurrentItem, EngineState, ItemStatus, LabelSet, Submission,
};
use crate::config::{DEFAULT_PROGRESS_TARGET, SessionConfig};
use crate::error::{LabelDeskError, Result};
use crate::export::{self, ExportFormat};
use crate::sample::SampleSource;
use crate::schema::LabelSchema;
use crate::stats::{self, Distribution, Progress, QualityScorer, Report, SessionStats};
use chrono::{DateTime, Local, SubsecRound, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Display text of the synthetic entry left behind by a clear.
const CLEARED_TIMESTAMP: &str = "System Reset";

/// Drives a single labeling session.
///
/// `AnnotationEngine` is responsible for:
/// - Presenting one item at a time with a cyclic cursor
/// - Holding the draft labels of the current item
/// - Validating and recording submissions
/// - Keeping running statistics and the bounded activity log
/// - Producing reports and export strings
///
/// All mutation goes through the methods below; there is no shared state.
/// A successful [`submit`](Self::submit) leaves the engine in
/// [`EngineState::Advancing`] until the returned ticket is passed to
/// [`complete_advance`](Self::complete_advance), which lets a presentation
/// layer show the completed item for a moment before moving on.
pub struct AnnotationEngine {
    session_id: String,
    source: SampleSource,
    schema: LabelSchema,
    cursor: usize,
    draft: LabelSet,
    item_status: ItemStatus,
    item_started_at: DateTime<Utc>,
    annotations: Vec<Annotation>,
    total_time_seconds: u64,
    activity: ActivityLog,
    pending_advance: Option<AdvanceTicket>,
    next_ticket: u64,
    progress_target: u32,
    clock: Arc<dyn Clock>,
    scorer: Option<Arc<dyn QualityScorer>>,
}

impl AnnotationEngine {
    /// Creates an engine positioned on the first item.
    pub fn new(source: SampleSource, schema: LabelSchema) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let mut engine = Self {
            session_id: Uuid::new_v4().to_string(),
            draft: schema.empty_draft(),
            source,
            schema,
            cursor: 0,
            item_status: ItemStatus::Pending,
            item_started_at: clock.now(),
            annotations: Vec::new(),
            total_time_seconds: 0,
            activity: ActivityLog::new(DEFAULT_ACTIVITY_CAPACITY),
            pending_advance: None,
            next_ticket: 0,
            progress_target: DEFAULT_PROGRESS_TARGET,
            clock,
            scorer: None,
        };
        engine.load_item(0);
        engine
    }

    /// Creates an engine with schema, log capacity, progress target and
    /// placeholder scorer taken from `config`.
    pub fn with_config(source: SampleSource, config: &SessionConfig) -> Result<Self> {
        let mut engine = Self::new(source, config.schema()?);
        engine.activity = ActivityLog::new(config.activity_capacity);
        engine.progress_target = config.progress_target;
        if let Some(scorer) = &config.placeholder_scores {
            engine.scorer = Some(Arc::new(scorer.clone()));
        }
        Ok(engine)
    }

    /// Replaces the time source and restarts the current item's timer.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.item_started_at = clock.now();
        self.clock = clock;
        self
    }

    /// Installs a quality scorer.
    pub fn with_scorer(mut self, scorer: Arc<dyn QualityScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    // ============================================================================
    // Commands
    // ============================================================================

    /// Presents the item at `index` (wrapped onto the source) with an empty
    /// draft and a fresh timer.
    ///
    /// Explicit navigation supersedes any outstanding advancement.
    pub fn load_item(&mut self, index: usize) {
        self.cursor = self.source.wrap(index);
        self.draft = self.schema.empty_draft();
        self.item_status = ItemStatus::Pending;
        self.item_started_at = self.clock.now();
        self.pending_advance = None;
        tracing::debug!(
            session_id = %self.session_id,
            item_id = self.current_id(),
            "item loaded"
        );
    }

    /// Sets the draft value of one dimension, leaving the others untouched.
    ///
    /// # Errors
    ///
    /// - `SessionBusy` while advancing
    /// - `UnknownDimension` / `InvalidLabelValue` for selections outside the schema
    pub fn select_label(&mut self, dimension: &str, value: &str) -> Result<()> {
        self.ensure_ready("select_label")?;
        self.schema.check(dimension, value)?;
        self.draft.set(dimension, value);
        tracing::debug!(dimension, value, "label selected");
        Ok(())
    }

    /// Clears every draft selection. The cursor and timer are kept.
    pub fn reset_draft(&mut self) -> Result<()> {
        self.ensure_ready("reset_draft")?;
        self.draft.clear();
        Ok(())
    }

    /// Records the current draft as an annotation.
    ///
    /// On success the item becomes `Completed` and the engine waits in
    /// `Advancing` for the returned ticket.
    ///
    /// # Errors
    ///
    /// - `SessionBusy` while a previous submission is still advancing
    /// - `IncompleteLabels` if any dimension lacks a selection; nothing is
    ///   recorded and the cursor stays put
    pub fn submit(&mut self) -> Result<Submission> {
        self.ensure_ready("submit")?;

        let validation = self.schema.validate(&self.draft);
        if !validation.is_complete() {
            tracing::warn!(missing = ?validation.missing, "submission rejected");
            return Err(LabelDeskError::incomplete(validation.missing));
        }

        let now = self.clock.now();
        let time_spent_seconds = elapsed_seconds(self.item_started_at, now);
        let annotation = Annotation {
            item_id: self.current_id(),
            text: self.source.text(self.cursor).to_string(),
            labels: self.draft.to_labels(),
            time_spent_seconds,
            timestamp: now.trunc_subsecs(3),
        };

        self.annotations.push(annotation.clone());
        self.total_time_seconds += time_spent_seconds;
        self.item_status = ItemStatus::Completed;
        self.log(
            ActivityAction::Submitted,
            format!(
                "Item #{} annotated ({}s)",
                annotation.item_id, time_spent_seconds
            ),
        );

        let ticket = AdvanceTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_advance = Some(ticket);

        tracing::info!(
            session_id = %self.session_id,
            item_id = annotation.item_id,
            time_spent_seconds,
            total = self.annotations.len(),
            "annotation recorded"
        );

        Ok(Submission { annotation, ticket })
    }

    /// Loads the next item if `ticket` is the outstanding advancement.
    ///
    /// Returns `false` for a stale ticket, i.e. one superseded by a clear or
    /// an explicit `load_item`.
    pub fn complete_advance(&mut self, ticket: AdvanceTicket) -> bool {
        if self.pending_advance != Some(ticket) {
            tracing::debug!(?ticket, "stale advance ignored");
            return false;
        }
        self.load_item(self.cursor + 1);
        true
    }

    /// Completes the outstanding advancement immediately, if any.
    pub fn advance_now(&mut self) -> bool {
        match self.pending_advance {
            Some(ticket) => self.complete_advance(ticket),
            None => false,
        }
    }

    /// Moves to the next item without recording anything.
    pub fn skip(&mut self) -> Result<()> {
        self.ensure_ready("skip")?;
        let item_id = self.current_id();
        self.log(ActivityAction::Skipped, format!("Item #{} skipped", item_id));
        self.load_item(self.cursor + 1);
        Ok(())
    }

    /// Empties the annotation log and restarts at the first item.
    ///
    /// Destructive and irreversible; callers confirm with the user first.
    /// Any outstanding advancement is cancelled.
    pub fn clear_session(&mut self) {
        let discarded = self.annotations.len();
        self.annotations.clear();
        self.total_time_seconds = 0;
        self.load_item(0);
        self.activity.reset_to(ActivityEntry {
            timestamp_display: CLEARED_TIMESTAMP.to_string(),
            action: ActivityAction::Cleared,
            details: "All data cleared".to_string(),
        });
        tracing::info!(session_id = %self.session_id, discarded, "session cleared");
    }

    // ============================================================================
    // Statistics, reports and exports
    // ============================================================================

    pub fn stats(&self) -> SessionStats {
        let count = self.annotations.len();
        SessionStats {
            count,
            total_time_seconds: self.total_time_seconds,
            average_time_seconds: stats::average_seconds(self.total_time_seconds, count),
            quality: self
                .scorer
                .as_ref()
                .and_then(|scorer| scorer.score(&self.annotations)),
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.annotations.len(), self.progress_target)
    }

    /// Value counts of `dimension` over recorded annotations.
    pub fn distribution(&self, dimension: &str) -> Result<Distribution> {
        stats::distribution(&self.schema, &self.annotations, dimension)
    }

    /// Builds the QA report.
    ///
    /// # Errors
    ///
    /// `NoData` when nothing has been recorded yet.
    pub fn generate_report(&mut self) -> Result<Report> {
        let report = Report::build(
            &self.session_id,
            &self.schema,
            &self.annotations,
            &self.stats(),
            self.clock.now(),
        )?;
        self.log(ActivityAction::ReportGenerated, "QA report generated");
        Ok(report)
    }

    pub fn export_tabular(&mut self) -> Result<String> {
        self.export(ExportFormat::Tabular)
    }

    pub fn export_structured(&mut self) -> Result<String> {
        self.export(ExportFormat::Structured)
    }

    /// Serializes the annotation log.
    ///
    /// # Errors
    ///
    /// `NoData` when nothing has been recorded yet.
    pub fn export(&mut self, format: ExportFormat) -> Result<String> {
        if self.annotations.is_empty() {
            tracing::warn!(format = format.label(), "export requested with no data");
            return Err(LabelDeskError::NoData);
        }
        let content = match format {
            ExportFormat::Tabular => export::to_tabular(&self.schema, &self.annotations),
            ExportFormat::Structured => export::to_structured(&self.annotations)?,
        };
        self.log(
            ActivityAction::Exported,
            format!("Data exported to {} format", format.label()),
        );
        Ok(content)
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn current_item(&self) -> CurrentItem {
        CurrentItem {
            id: self.current_id(),
            text: self.source.text(self.cursor).to_string(),
            status: self.item_status,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn draft(&self) -> &LabelSet {
        &self.draft
    }

    pub fn item_status(&self) -> ItemStatus {
        self.item_status
    }

    pub fn state(&self) -> EngineState {
        if self.pending_advance.is_some() {
            EngineState::Advancing
        } else {
            EngineState::Pending
        }
    }

    pub fn pending_advance(&self) -> Option<AdvanceTicket> {
        self.pending_advance
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn schema(&self) -> &LabelSchema {
        &self.schema
    }

    pub fn source(&self) -> &SampleSource {
        &self.source
    }

    // ============================================================================
    // Internal helpers
    // ============================================================================

    fn current_id(&self) -> u32 {
        self.source.display_id(self.cursor)
    }

    fn ensure_ready(&self, operation: &'static str) -> Result<()> {
        if self.pending_advance.is_some() {
            tracing::warn!(operation, "rejected while advancing");
            return Err(LabelDeskError::SessionBusy);
        }
        Ok(())
    }

    fn log(&mut self, action: ActivityAction, details: impl Into<String>) {
        let timestamp_display = self
            .clock
            .now()
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string();
        self.activity.push(ActivityEntry {
            timestamp_display,
            action,
            details: details.into(),
        });
    }
}
