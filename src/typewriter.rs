use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::TextAnimation;
use crate::error::{require_positive_ms, ConfigurationError, Result};
use crate::scheduler::TimerScheduler;

pub const DEFAULT_PHRASES: [&str; 5] = [
    "Software Engineer",
    "AI Specialist",
    "Full-Stack Developer",
    "Systems Programmer",
    "Tech Innovator",
];

/// Where the typewriter is within one cycle of a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Typing,
    PausedAtFull,
    Deleting,
    PausedAtEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterTimings {
    pub type_ms: u64,
    pub delete_ms: u64,
    pub hold_full_ms: u64,
    pub hold_empty_ms: u64,
}

impl Default for TypewriterTimings {
    fn default() -> Self {
        Self {
            type_ms: 100,
            delete_ms: 50,
            hold_full_ms: 1500,
            hold_empty_ms: 300,
        }
    }
}

impl TypewriterTimings {
    pub fn validate(&self) -> Result<()> {
        require_positive_ms("type_ms", self.type_ms)?;
        require_positive_ms("delete_ms", self.delete_ms)?;
        require_positive_ms("hold_full_ms", self.hold_full_ms)?;
        require_positive_ms("hold_empty_ms", self.hold_empty_ms)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Type,
    Delete,
    BeginDelete,
    NextPhrase,
}

/// Types and deletes a list of phrases forever, one character at a time.
///
/// A full phrase is held for `hold_full_ms` before deleting starts, and the
/// empty line is held for `hold_empty_ms` before the next phrase is typed.
#[derive(Debug)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    timings: TypewriterTimings,
    active_index: usize,
    char_index: usize,
    is_deleting: bool,
    cycles: u64,
    session: u64,
    scheduler: TimerScheduler<(u64, Step)>,
    output: String,
}

impl Typewriter {
    pub fn new<I, S>(phrases: I, timings: TypewriterTimings) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<Vec<char>> = phrases
            .into_iter()
            .map(|p| p.as_ref().chars().collect())
            .collect();
        if phrases.is_empty() {
            return Err(ConfigurationError::EmptyPhrases);
        }
        timings.validate()?;

        Ok(Self {
            phrases,
            timings,
            active_index: 0,
            char_index: 0,
            is_deleting: false,
            cycles: 0,
            session: 0,
            scheduler: TimerScheduler::new(),
            output: String::new(),
        })
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn is_deleting(&self) -> bool {
        self.is_deleting
    }

    /// Number of phrases fully typed, deleted and moved past.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles
    }

    fn active_len(&self) -> usize {
        self.phrases[self.active_index].len()
    }

    pub fn phase(&self) -> Phase {
        match (self.is_deleting, self.char_index) {
            (false, i) if i < self.active_len() => Phase::Typing,
            (false, _) => Phase::PausedAtFull,
            (true, 0) => Phase::PausedAtEmpty,
            (true, _) => Phase::Deleting,
        }
    }

    /// Resets to an empty first phrase and schedules the first keystroke.
    pub fn start(&mut self, now: Duration) {
        self.scheduler.cancel();
        self.session += 1;
        self.active_index = 0;
        self.char_index = 0;
        self.is_deleting = false;
        self.cycles = 0;
        self.render();
        tracing::debug!(phrases = self.phrases.len(), "typewriter started");
        self.plan(now);
    }

    fn plan(&mut self, now: Duration) {
        let t = self.timings;
        let (delay_ms, step) = match self.phase() {
            Phase::Typing => (t.type_ms, Step::Type),
            Phase::PausedAtFull => (t.hold_full_ms, Step::BeginDelete),
            Phase::Deleting => (t.delete_ms, Step::Delete),
            Phase::PausedAtEmpty => (t.hold_empty_ms, Step::NextPhrase),
        };
        self.scheduler
            .schedule(now, Duration::from_millis(delay_ms), (self.session, step));
    }

    fn apply(&mut self, step: Step) {
        match step {
            Step::Type if self.char_index < self.active_len() => self.char_index += 1,
            Step::Delete if self.char_index > 0 => self.char_index -= 1,
            Step::BeginDelete => self.is_deleting = true,
            Step::NextPhrase => {
                self.is_deleting = false;
                self.active_index = (self.active_index + 1) % self.phrases.len();
                self.cycles += 1;
                tracing::trace!(index = self.active_index, "next phrase");
            }
            Step::Type | Step::Delete => {}
        }
        self.render();
    }

    fn render(&mut self) {
        self.output.clear();
        self.output
            .extend(&self.phrases[self.active_index][..self.char_index]);
    }
}

impl TextAnimation for Typewriter {
    fn output(&self) -> &str {
        &self.output
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    fn advance(&mut self, now: Duration) -> bool {
        let mut ticked = false;
        while let Some((due, (session, step))) = self.scheduler.poll(now) {
            if session != self.session {
                tracing::trace!(session, "dropping stale typewriter tick");
                continue;
            }
            self.apply(step);
            self.plan(due);
            ticked = true;
        }
        ticked
    }

    fn teardown(&mut self) {
        self.scheduler.cancel();
        tracing::debug!(cycles = self.cycles, "typewriter torn down");
    }
}
