//! Progress reporting for pipeline runs
//!
//! Everything here writes to stderr; stdout is reserved for the result.

use arena_application::{AttemptError, ProgressNotifier, RunPipelineError};
use arena_domain::Stage;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with indicatif bars
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::stderr()),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn println(&self, line: String) {
        if self.multi.println(&line).is_err() {
            eprintln!("{}", line);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: &Stage, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage.display_name().to_string());
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.stage_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _stage: &Stage, label: &str, success: bool) {
        if let Ok(slot) = self.stage_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), label)
            } else {
                format!("{} {}", "x".red(), label)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: &Stage) {
        if let Ok(mut slot) = self.stage_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{} done", stage.as_str().green()));
        }
    }

    fn on_attempt_failed(&self, attempt: usize, max_attempts: usize, error: &AttemptError) {
        // A failed stage never reaches on_stage_complete
        if let Ok(mut slot) = self.stage_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.abandon_with_message("failed".red().to_string());
        }
        self.println(format!(
            "{} Attempt {}/{} failed: {}",
            "!".yellow().bold(),
            attempt,
            max_attempts,
            error
        ));
    }

    fn on_fallback(&self, reason: &RunPipelineError) {
        self.println(format!(
            "{} Using fallback result ({})",
            "!".yellow().bold(),
            reason
        ));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: &Stage, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            stage.display_name().bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _stage: &Stage, label: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), label);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), label);
        }
    }

    fn on_stage_complete(&self, _stage: &Stage) {}

    fn on_attempt_failed(&self, attempt: usize, max_attempts: usize, error: &AttemptError) {
        eprintln!(
            "{} attempt {}/{} failed ({}): {}",
            "!".yellow(),
            attempt,
            max_attempts,
            error.kind().as_str(),
            error
        );
    }

    fn on_fallback(&self, reason: &RunPipelineError) {
        eprintln!("{} using fallback result: {}", "!".yellow(), reason);
    }
}
