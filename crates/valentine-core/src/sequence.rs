//! Timed text script and the runner that plays it through a [`Scheduler`].

use std::time::Duration;

use crate::error::ScriptError;
use crate::scheduler::{RunId, Scheduler, SequenceTick, TimerId};

/// The countdown played when the recipient still wants to think about it.
/// Each entry is (text, milliseconds from the start of the run).
pub const THINK_IT_OVER_STEPS: &[(&str, u64)] = &[
    ("Okay, here you go...", 0),
    ("3...", 1500),
    ("2...", 2500),
    ("1...", 3500),
    ("How about now?", 4500),
];

/// One line of a timed script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    pub text: String,
    /// Delay measured from the start of the run, not from the previous step.
    pub at: Duration,
}

impl ScriptStep {
    pub fn new(text: impl Into<String>, at: Duration) -> Self {
        Self {
            text: text.into(),
            at,
        }
    }
}

/// An ordered, non-empty list of steps whose delays never decrease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

impl Script {
    /// Validates and builds a script.
    pub fn new(steps: Vec<ScriptStep>) -> Result<Self, ScriptError> {
        if steps.is_empty() {
            return Err(ScriptError::Empty);
        }

        for (index, pair) in steps.windows(2).enumerate() {
            if pair[1].at < pair[0].at {
                return Err(ScriptError::OutOfOrder {
                    index: index + 1,
                    at_ms: pair[1].at.as_millis(),
                    previous_ms: pair[0].at.as_millis(),
                });
            }
        }

        Ok(Self { steps })
    }

    /// The built-in countdown script.
    pub fn think_it_over() -> Self {
        Self {
            steps: THINK_IT_OVER_STEPS
                .iter()
                .map(|(text, ms)| ScriptStep::new(*text, Duration::from_millis(*ms)))
                .collect(),
        }
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a validated script.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the step at `index`, if any.
    pub fn step(&self, index: usize) -> Option<&ScriptStep> {
        self.steps.get(index)
    }

    /// Whether `index` is the step that ends the run.
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.steps.len()
    }

    /// Total time from start to the final step.
    pub fn duration(&self) -> Duration {
        self.steps.last().map(|s| s.at).unwrap_or_default()
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::think_it_over()
    }
}

/// Handle to the timers of one in-flight run.
#[derive(Debug)]
#[must_use = "dropping a SequenceRun leaves its timers scheduled"]
pub struct SequenceRun {
    id: RunId,
    timers: Vec<TimerId>,
}

impl SequenceRun {
    pub fn id(&self) -> RunId {
        self.id
    }

    /// Cancels every timer of this run that has not fired yet.
    pub fn cancel<S: Scheduler + ?Sized>(self, scheduler: &mut S) {
        tracing::debug!(
            "Cancelling sequence run {} ({} timers)",
            self.id.0,
            self.timers.len()
        );
        for timer in self.timers {
            scheduler.cancel(timer);
        }
    }
}

/// Hands out run ids and schedules one tick per script step.
#[derive(Debug, Default)]
pub struct SequenceRunner {
    next_run: u64,
}

impl SequenceRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules every step of `script` and returns the run handle.
    pub fn start<S: Scheduler + ?Sized>(&mut self, script: &Script, scheduler: &mut S) -> SequenceRun {
        self.next_run += 1;
        let id = RunId(self.next_run);

        let timers = script
            .steps()
            .iter()
            .enumerate()
            .map(|(step, s)| scheduler.schedule(s.at, SequenceTick { run: id, step }))
            .collect();

        tracing::debug!(
            "Started sequence run {} with {} steps over {:?}",
            id.0,
            script.len(),
            script.duration()
        );

        SequenceRun { id, timers }
    }
}
