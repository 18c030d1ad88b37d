use std::time::Duration;

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::animation::TextAnimation;
use crate::error::{require_positive_ms, ConfigurationError, Result};
use crate::filler::{filler_chars, FillerSource, RngFiller};
use crate::scheduler::TimerScheduler;

/// Timing knobs for a scramble reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrambleConfig {
    /// Milliseconds between ticks.
    pub interval_ms: u64,
    /// Frames needed per revealed character.
    pub step: u32,
    /// When false the target is shown at once without animating.
    pub play: bool,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            interval_ms: 12,
            step: 2,
            play: true,
        }
    }
}

impl ScrambleConfig {
    pub fn validate(&self) -> Result<()> {
        require_positive_ms("interval_ms", self.interval_ms)?;
        if self.step == 0 {
            return Err(ConfigurationError::ZeroStep);
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SessionId(u64);

#[derive(Debug)]
struct RevealSession {
    id: SessionId,
    target: Vec<char>,
    frame: u64,
    reveal_count: usize,
}

impl RevealSession {
    fn is_complete(&self) -> bool {
        self.reveal_count == self.target.len()
    }
}

/// Reveals a string left to right, masking the rest with random filler.
///
/// Every tick advances the frame counter, reveals `frame / step` leading
/// characters and re-rolls the filler for the positions still hidden.
/// Spaces always render as spaces. Once everything is revealed no further
/// ticks are scheduled. Changing any input starts a fresh session and the
/// old session's pending tick is dropped.
#[derive(Debug)]
pub struct ScrambleReveal<F: FillerSource = RngFiller<SmallRng>> {
    target: String,
    config: ScrambleConfig,
    session: Option<RevealSession>,
    sessions_started: u64,
    scheduler: TimerScheduler<SessionId>,
    filler: F,
    alphabet: Vec<char>,
    output: String,
}

impl ScrambleReveal {
    pub fn new(target: impl Into<String>, config: ScrambleConfig) -> Result<Self> {
        Self::with_filler(target, config, RngFiller::from_entropy())
    }
}

impl<F: FillerSource> ScrambleReveal<F> {
    pub fn with_filler(
        target: impl Into<String>,
        config: ScrambleConfig,
        filler: F,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            target: target.into(),
            config,
            session: None,
            sessions_started: 0,
            scheduler: TimerScheduler::new(),
            filler,
            alphabet: filler_chars(),
            output: String::new(),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn config(&self) -> ScrambleConfig {
        self.config
    }

    pub fn frame(&self) -> u64 {
        self.session.as_ref().map_or(0, |s| s.frame)
    }

    pub fn reveal_count(&self) -> usize {
        match &self.session {
            Some(s) => s.reveal_count,
            None if self.sessions_started > 0 => self.target.chars().count(),
            None => 0,
        }
    }

    /// True once a started session shows its whole target. A reveal torn
    /// down halfway stays unfinished.
    pub fn is_finished(&self) -> bool {
        self.sessions_started > 0 && self.session.as_ref().map_or(true, RevealSession::is_complete)
    }

    /// Starts a new session from frame zero, superseding any running one.
    ///
    /// The first tick runs immediately. In bypass mode (`play == false`) the
    /// target is emitted as is and nothing is scheduled.
    #[tracing::instrument(level = "debug", skip(self), fields(text = %self.target))]
    pub fn start(&mut self, now: Duration) {
        self.scheduler.cancel();
        self.sessions_started += 1;
        let id = SessionId(self.sessions_started);

        if !self.config.play {
            self.session = None;
            self.output.clone_from(&self.target);
            tracing::debug!("bypass mode, showing target as is");
            return;
        }

        self.session = Some(RevealSession {
            id,
            target: self.target.chars().collect(),
            frame: 0,
            reveal_count: 0,
        });
        self.output.clear();
        self.tick(now);
    }

    /// Applies new inputs. A session is restarted only if something
    /// actually changed; returns whether that happened.
    pub fn update(
        &mut self,
        target: &str,
        config: ScrambleConfig,
        now: Duration,
    ) -> Result<bool> {
        config.validate()?;
        if self.sessions_started > 0 && target == self.target && config == self.config {
            return Ok(false);
        }
        if self.session.is_some() {
            tracing::debug!(old = %self.target, new = %target, "superseding reveal session");
        }
        self.target = target.to_string();
        self.config = config;
        self.start(now);
        Ok(true)
    }

    fn tick(&mut self, now: Duration) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        session.frame += 1;
        let unlocked =
            usize::try_from(session.frame / u64::from(self.config.step)).unwrap_or(usize::MAX);
        // never shrinks, so revealed positions stay put
        session.reveal_count = session.reveal_count.max(unlocked.min(session.target.len()));

        self.output.clear();
        for (i, &ch) in session.target.iter().enumerate() {
            if i < session.reveal_count || ch == ' ' {
                self.output.push(ch);
            } else {
                self.output.push(self.filler.pick(&self.alphabet));
            }
        }

        if session.is_complete() {
            tracing::debug!(frames = session.frame, "reveal complete");
        } else {
            self.scheduler.schedule(now, self.config.interval(), session.id);
        }
    }
}

impl<F: FillerSource> TextAnimation for ScrambleReveal<F> {
    fn output(&self) -> &str {
        &self.output
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    fn advance(&mut self, now: Duration) -> bool {
        let mut ticked = false;
        while let Some((due, id)) = self.scheduler.poll(now) {
            if self.session.as_ref().map(|s| s.id) != Some(id) {
                tracing::trace!(?id, "dropping tick from a superseded session");
                continue;
            }
            self.tick(due);
            ticked = true;
        }
        ticked
    }

    fn teardown(&mut self) {
        if self.scheduler.is_pending() {
            tracing::debug!(text = %self.target, frame = self.frame(), "tearing down mid-reveal");
        }
        self.scheduler.cancel();
    }
}
