use crate::snapshot::SessionSnapshot;
use labeldesk_core::session::Annotation;
use labeldesk_core::stats::{Distribution, Report, SessionStats};
use labeldesk_core::{AnnotationEngine, ExportFormat, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Runs an [`AnnotationEngine`] behind an async mutex.
///
/// `SessionDriver` is responsible for:
/// - Serializing commands from any number of async callers
/// - Scheduling the deferred advancement after each submission
/// - Cancelling that advancement on clear or explicit navigation
///
/// The engine itself already ignores stale advancement tickets, so a
/// cancellation that loses the race against the timer is harmless.
pub struct SessionDriver {
    engine: Arc<Mutex<AnnotationEngine>>,
    advance_delay: Duration,
    pending_advance: Mutex<Option<CancellationToken>>,
}

impl SessionDriver {
    /// Creates a driver. A zero `advance_delay` advances inline on submit.
    pub fn new(engine: AnnotationEngine, advance_delay: Duration) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            advance_delay,
            pending_advance: Mutex::new(None),
        }
    }

    pub fn advance_delay(&self) -> Duration {
        self.advance_delay
    }

    /// Runs `f` against the engine under the lock.
    pub async fn with_engine<R>(&self, f: impl FnOnce(&AnnotationEngine) -> R) -> R {
        let engine = self.engine.lock().await;
        f(&engine)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.with_engine(SessionSnapshot::capture).await
    }

    pub async fn select_label(&self, dimension: &str, value: &str) -> Result<()> {
        self.engine.lock().await.select_label(dimension, value)
    }

    pub async fn reset_draft(&self) -> Result<()> {
        self.engine.lock().await.reset_draft()
    }

    /// Records the current draft and schedules the move to the next item.
    pub async fn submit(&self) -> Result<Annotation> {
        let mut engine = self.engine.lock().await;
        let submission = engine.submit()?;

        if self.advance_delay.is_zero() {
            engine.complete_advance(submission.ticket);
            return Ok(submission.annotation);
        }
        drop(engine);

        let token = CancellationToken::new();
        if let Some(previous) = self.pending_advance.lock().await.replace(token.clone()) {
            previous.cancel();
        }

        let engine = Arc::clone(&self.engine);
        let delay = self.advance_delay;
        let ticket = submission.ticket;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(?ticket, "deferred advance cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    engine.lock().await.complete_advance(ticket);
                }
            }
        });

        Ok(submission.annotation)
    }

    pub async fn skip(&self) -> Result<()> {
        self.engine.lock().await.skip()
    }

    /// Jumps to `index`, superseding any pending advancement.
    pub async fn load_item(&self, index: usize) {
        self.cancel_pending().await;
        self.engine.lock().await.load_item(index);
    }

    pub async fn stats(&self) -> SessionStats {
        self.engine.lock().await.stats()
    }

    pub async fn distribution(&self, dimension: &str) -> Result<Distribution> {
        self.engine.lock().await.distribution(dimension)
    }

    pub async fn export(&self, format: ExportFormat) -> Result<String> {
        self.engine.lock().await.export(format)
    }

    pub async fn export_tabular(&self) -> Result<String> {
        self.export(ExportFormat::Tabular).await
    }

    pub async fn export_structured(&self) -> Result<String> {
        self.export(ExportFormat::Structured).await
    }

    pub async fn generate_report(&self) -> Result<Report> {
        self.engine.lock().await.generate_report()
    }

    /// Clears the session and cancels any pending advancement.
    ///
    /// Callers are expected to have confirmed with the user.
    pub async fn clear_session(&self) {
        self.cancel_pending().await;
        self.engine.lock().await.clear_session();
    }

    async fn cancel_pending(&self) {
        if let Some(token) = self.pending_advance.lock().await.take() {
            token.cancel();
        }
    }
}
