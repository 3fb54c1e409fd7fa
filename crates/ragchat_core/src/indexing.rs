use std::time::Duration;

use crate::lifecycle::{
    settle, IdSequence, Outcome, RequestSlot, INDEXING_FAILURE_TEXT, INDEXING_IN_PROGRESS_TEXT,
    INDEXING_SUCCESS_PREFIX,
};
use crate::{CoreTiming, Effect, IndexingAck, JobId, RequestFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexingStatus {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl IndexingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, IndexingStatus::Succeeded | IndexingStatus::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexingJob {
    id: JobId,
    target_url: String,
    status: IndexingStatus,
    status_message: Option<String>,
}

impl IndexingJob {
    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn status(&self) -> IndexingStatus {
        self.status
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

/// Indexing controller state: the latest job and the URL input buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexingState {
    job: Option<IndexingJob>,
    slot: RequestSlot<JobId>,
    ids: IdSequence,
    input: String,
    status_display: Duration,
    navigate_delay: Duration,
}

impl IndexingState {
    pub fn new(timing: CoreTiming) -> Self {
        Self {
            status_display: timing.status_display,
            navigate_delay: timing.navigate_delay,
            ..Self::default()
        }
    }

    pub fn job(&self) -> Option<&IndexingJob> {
        self.job.as_ref()
    }

    pub fn status(&self) -> IndexingStatus {
        self.job
            .as_ref()
            .map_or(IndexingStatus::Idle, IndexingJob::status)
    }

    pub fn is_running(&self) -> bool {
        self.slot.is_pending()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Starts a new job for the trimmed `url`, replacing the previous one.
    ///
    /// Blank URLs and submissions while a job is running are ignored.
    pub fn submit_indexing_url(&mut self, url: &str) -> Vec<Effect> {
        let url = url.trim();
        if url.is_empty() || self.slot.is_pending() {
            return Vec::new();
        }
        let job_id = self.ids.next_id();
        self.slot.begin(job_id);
        self.job = Some(IndexingJob {
            id: job_id,
            target_url: url.to_string(),
            status: IndexingStatus::Running,
            status_message: Some(INDEXING_IN_PROGRESS_TEXT.to_string()),
        });
        vec![
            Effect::CancelStatusClear,
            Effect::IndexUrl {
                job_id,
                url: url.to_string(),
            },
        ]
    }

    /// Moves the running job to its terminal state.
    ///
    /// Returns `None` when `job_id` is not the running job.
    pub fn resolve_indexing(
        &mut self,
        job_id: JobId,
        result: Result<IndexingAck, RequestFailure>,
    ) -> Option<Vec<Effect>> {
        if !self.slot.complete(job_id) {
            return None;
        }
        let job = self.job.as_mut().filter(|job| job.id == job_id)?;

        let settled = settle(
            result,
            |ack| format!("{INDEXING_SUCCESS_PREFIX}{}", ack.message),
            INDEXING_FAILURE_TEXT,
        );
        job.status_message = Some(settled.text);

        let mut effects = Vec::with_capacity(2);
        match settled.outcome {
            Outcome::Succeeded => {
                job.status = IndexingStatus::Succeeded;
                self.input.clear();
                effects.push(Effect::IndexingCompleted {
                    job_id,
                    navigate_after: self.navigate_delay,
                });
            }
            Outcome::Failed => {
                // Input is kept so the user can retry without retyping.
                job.status = IndexingStatus::Failed;
            }
        }
        effects.push(Effect::ScheduleStatusClear {
            job_id,
            delay: self.status_display,
        });
        Some(effects)
    }

    /// Clears the status message of a finished job. Timers scheduled for a
    /// job that has since been replaced are ignored.
    pub fn status_clear_elapsed(&mut self, job_id: JobId) -> bool {
        match self.job.as_mut() {
            Some(job)
                if job.id == job_id && job.status.is_terminal() && job.status_message.is_some() =>
            {
                job.status_message = None;
                true
            }
            _ => false,
        }
    }

    pub fn set_input(&mut self, text: String) -> bool {
        if self.input == text {
            return false;
        }
        self.input = text;
        true
    }
}
