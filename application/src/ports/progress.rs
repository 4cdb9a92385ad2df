//! Progress notification port
//!
//! Defines the interface for reporting progress during a pipeline run.

use crate::use_cases::run_pipeline::RunPipelineError;
use crate::use_cases::shared::AttemptError;
use arena_domain::Stage;

/// Callback for progress updates during a pipeline run
///
/// Implementations live in the presentation layer and write to a channel
/// separate from the primary payload (stderr for the CLI).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: &Stage, total_tasks: usize);

    /// Called when a task completes within a stage.
    ///
    /// `label` is the persona id for per-persona calls, the model otherwise.
    fn on_task_complete(&self, stage: &Stage, label: &str, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: &Stage);

    /// Called after a failed attempt, before any backoff
    fn on_attempt_failed(&self, _attempt: usize, _max_attempts: usize, _error: &AttemptError) {}

    /// Called when the fallback result replaces generated output
    fn on_fallback(&self, _reason: &RunPipelineError) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: &Stage, _total_tasks: usize) {}
    fn on_task_complete(&self, _stage: &Stage, _label: &str, _success: bool) {}
    fn on_stage_complete(&self, _stage: &Stage) {}
}
