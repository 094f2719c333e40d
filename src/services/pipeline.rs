//! Processing simulation — the scripted multi-stage "analysis" pipeline.
//!
//! DESIGN
//! ======
//! The demo fakes a four-stage pipeline (acquire → preprocess → process →
//! finalize) with a deterministic total duration. The machine here is pure
//! and tick-driven: callers advance it with elapsed wall time and receive
//! the events that occurred in that interval. All scheduling lives in the
//! async runner (`routes::demo`), which owns the interval timer and is
//! aborted on disconnect — there are no nested timeouts to leak.
//!
//! INVARIANTS
//! ==========
//! - Steps run strictly in order; none are skipped.
//! - `progress()` is monotonically non-decreasing and clamped to 100.
//! - `Completed` is emitted exactly once per run, with progress at 100.
//! - `reset()` restores every counter to its initial value.

use std::time::Duration;

/// One stage of the simulated pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineStep {
    pub label: &'static str,
    pub duration: Duration,
}

/// The fixed demo schedule. Total runtime is the sum of the durations.
pub const DEFAULT_STEPS: [PipelineStep; 4] = [
    PipelineStep { label: "Acquiring satellite imagery", duration: Duration::from_secs(3) },
    PipelineStep { label: "Preprocessing scenes", duration: Duration::from_secs(4) },
    PipelineStep { label: "Running analysis model", duration: Duration::from_secs(5) },
    PipelineStep { label: "Finalizing results", duration: Duration::from_secs(3) },
];

/// Where the machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running(usize),
    Done,
}

/// Events produced by advancing the machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineEvent {
    StepStarted { index: usize, label: &'static str },
    StepCompleted { index: usize },
    Completed,
}

/// Tick-driven simulation state machine.
#[derive(Clone, Debug)]
pub struct Pipeline {
    steps: Vec<PipelineStep>,
    total: Duration,
    elapsed: Duration,
    phase: Phase,
    completed_fired: bool,
}

impl Pipeline {
    #[must_use]
    pub fn new(steps: Vec<PipelineStep>) -> Self {
        let total = steps.iter().map(|s| s.duration).sum();
        Self { steps, total, elapsed: Duration::ZERO, phase: Phase::Idle, completed_fired: false }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Elapsed time within the whole sequence divided by total duration,
    /// as a percentage. Clamped to `[0, 100]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total.is_zero() {
            return if matches!(self.phase, Phase::Done) { 100.0 } else { 0.0 };
        }
        (self.elapsed.as_secs_f64() / self.total.as_secs_f64() * 100.0).min(100.0)
    }

    /// Begin a run. Emits the first `StepStarted`. No-op when already
    /// running or done — callers must `reset()` first.
    pub fn start(&mut self) -> Vec<PipelineEvent> {
        if !matches!(self.phase, Phase::Idle) || self.steps.is_empty() {
            return Vec::new();
        }
        self.phase = Phase::Running(0);
        vec![PipelineEvent::StepStarted { index: 0, label: self.steps[0].label }]
    }

    /// Advance the clock by `dt` and return events that occurred, in order.
    /// Ticking while idle or after completion is a no-op.
    pub fn tick(&mut self, dt: Duration) -> Vec<PipelineEvent> {
        let Phase::Running(mut current) = self.phase else {
            return Vec::new();
        };

        self.elapsed = (self.elapsed + dt).min(self.total);
        let mut events = Vec::new();

        // Complete every step whose cumulative boundary the clock has passed.
        while self.elapsed >= self.boundary(current) {
            events.push(PipelineEvent::StepCompleted { index: current });
            current += 1;
            if current == self.steps.len() {
                self.phase = Phase::Done;
                if !self.completed_fired {
                    self.completed_fired = true;
                    events.push(PipelineEvent::Completed);
                }
                return events;
            }
            events.push(PipelineEvent::StepStarted { index: current, label: self.steps[current].label });
        }

        self.phase = Phase::Running(current);
        events
    }

    /// Restore progress, active step, and completion state to initial values.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.phase = Phase::Idle;
        self.completed_fired = false;
    }

    /// Cumulative end time of step `index`.
    fn boundary(&self, index: usize) -> Duration {
        self.steps[..=index].iter().map(|s| s.duration).sum()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(DEFAULT_STEPS.to_vec())
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
