//! Form state and submission.
//!
//! A `FormState` belongs to one mounted form (the fallback page form or one
//! form section). It only ever moves forward: `Idle -> Submitting ->
//! Submitted`, with `Failed` as a recoverable detour back to another attempt.
//! Field values survive failures.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use log::{debug, info, warn};
use serde::Serialize;

use crate::{Error, Result};

/// Field id -> current value
pub type FormValues = BTreeMap<String, String>;

/// Which mounted form a piece of state belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "form", content = "id", rename_all = "lowercase")]
pub enum FormScope {
    /// The single form shown when the page has no sections
    Fallback,
    /// A `form` section, by section id
    Section(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
    /// The sink failed; the message is shown inline next to the form
    Failed(String),
}

/// Receives submitted values. Implementations decide what delivery means
/// (logging, an HTTP call, a queue).
#[allow(async_fn_in_trait)]
pub trait SubmissionSink: Send + Sync {
    async fn deliver(&self, values: &FormValues) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: FormValues,
    status: SubmitStatus,
}

impl FormState {
    pub const fn new() -> Self {
        FormState {
            values: BTreeMap::new(),
            status: SubmitStatus::Idle,
        }
    }

    /// Upsert a field value. Always accepted, in any status.
    pub fn set_field(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(id.into(), value.into());
    }

    /// Current value, empty when the field was never edited
    pub fn value(&self, id: &str) -> &str {
        self.values.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.status == SubmitStatus::Submitted
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SubmitStatus::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Enter `Submitting` and snapshot the values to deliver. Returns `None`
    /// while a submission is in flight or after one has succeeded.
    pub fn begin_submit(&mut self) -> Option<FormValues> {
        match self.status {
            SubmitStatus::Idle | SubmitStatus::Failed(_) => {
                self.status = SubmitStatus::Submitting;
                Some(self.values.clone())
            }
            SubmitStatus::Submitting | SubmitStatus::Submitted => None,
        }
    }

    /// Settle an in-flight submission. Ignored unless `Submitting`.
    pub fn finish_submit(&mut self, outcome: &Result<()>) {
        if !self.is_submitting() {
            debug!("finish_submit called with status {:?}; ignoring", self.status);
            return;
        }
        self.status = match outcome {
            Ok(()) => SubmitStatus::Submitted,
            Err(e) => {
                warn!("form submission failed: {}", e);
                SubmitStatus::Failed(e.to_string())
            }
        };
    }

    /// Deliver the current values to `sink` and record the outcome.
    ///
    /// A form that is already submitting or submitted is left alone and
    /// `Ok(())` is returned.
    pub async fn submit<S: SubmissionSink>(&mut self, sink: &S) -> Result<()> {
        let Some(values) = self.begin_submit() else {
            debug!("submit ignored; status is {:?}", self.status);
            return Ok(());
        };
        let outcome = sink.deliver(&values).await;
        self.finish_submit(&outcome);
        outcome
    }
}

/// Stand-in for a real backend: waits a fixed latency, then logs the values.
#[derive(Debug, Clone)]
pub struct LogSink {
    latency: Duration,
}

impl LogSink {
    pub fn new(latency: Duration) -> Self {
        LogSink { latency }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::DEFAULT_SUBMIT_LATENCY_MS))
    }
}

impl SubmissionSink for LogSink {
    async fn deliver(&self, values: &FormValues) -> Result<()> {
        tokio::time::sleep(self.latency).await;
        info!("Form submitted: {:?}", values);
        Ok(())
    }
}

/// Records every delivery in memory. Optionally fails every delivery with a
/// fixed message.
#[derive(Debug, Default)]
pub struct MemorySink {
    deliveries: Mutex<Vec<FormValues>>,
    fail_with: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        MemorySink {
            deliveries: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    /// Successful deliveries, oldest first
    pub fn deliveries(&self) -> Vec<FormValues> {
        self.deliveries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl SubmissionSink for MemorySink {
    async fn deliver(&self, values: &FormValues) -> Result<()> {
        if let Some(msg) = &self.fail_with {
            return Err(Error::SubmissionError(msg.clone()));
        }
        self.deliveries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(values.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_field_overwrites_and_is_idempotent() {
        let mut f = FormState::new();
        f.set_field("name", "Ada");
        let snapshot = f.values().clone();
        f.set_field("name", "Ada");
        assert_eq!(f.values(), &snapshot);

        f.set_field("name", "Grace");
        assert_eq!(f.value("name"), "Grace");
        assert_eq!(f.values().len(), 1);
        assert_eq!(f.value("email"), "");
    }

    #[test]
    fn begin_submit_blocks_double_submission() {
        let mut f = FormState::new();
        assert!(f.begin_submit().is_some());
        assert!(f.is_submitting());
        assert!(f.begin_submit().is_none());
        f.finish_submit(&Ok(()));
        assert!(f.is_submitted());
        assert!(f.begin_submit().is_none());
    }

    #[test]
    fn finish_without_begin_is_ignored() {
        let mut f = FormState::new();
        f.finish_submit(&Ok(()));
        assert_eq!(f.status(), &SubmitStatus::Idle);
    }

    #[tokio::test]
    async fn submit_round_trip_delivers_once() {
        let sink = MemorySink::new();
        let mut f = FormState::new();
        f.set_field("name", "Ada");
        f.set_field("email", "ada@example.com");

        f.submit(&sink).await.unwrap();
        f.submit(&sink).await.unwrap();

        assert!(f.is_submitted());
        let deliveries = sink.deliveries();
        assert_eq!(deliveries.len(), 1);
        let expected: FormValues = [("name", "Ada"), ("email", "ada@example.com")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(deliveries[0], expected);
    }

    #[tokio::test]
    async fn failure_keeps_values_and_allows_retry() {
        let mut f = FormState::new();
        f.set_field("email", "ada@example.com");

        let err = f.submit(&MemorySink::failing("backend down")).await.unwrap_err();
        assert!(matches!(err, Error::SubmissionError(_)));
        assert!(!f.is_submitting());
        assert!(!f.is_submitted());
        assert_eq!(f.error(), Some("Submission failed: backend down"));
        assert_eq!(f.value("email"), "ada@example.com");

        let ok = MemorySink::new();
        f.submit(&ok).await.unwrap();
        assert!(f.is_submitted());
        assert_eq!(f.error(), None);
        assert_eq!(ok.deliveries().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn log_sink_waits_its_latency() {
        let sink = LogSink::new(Duration::from_millis(1000));
        let start = tokio::time::Instant::now();
        sink.deliver(&FormValues::new()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }
}
