use std::time::Duration;

use rand::rngs::SmallRng;

use crate::animation::{earliest_deadline, TextAnimation};
use crate::config::{Config, Section};
use crate::error::Result;
use crate::filler::{FillerSource, RngFiller};
use crate::scramble::{ScrambleConfig, ScrambleReveal};
use crate::typewriter::{Phase, Typewriter};

/// The landing page: a revealed headline, a cycling subtitle and one
/// section at a time whose title and paragraphs are revealed on entry.
///
/// Each piece of text owns its own engine. Switching sections retargets the
/// section engines, which drops whatever reveal was still in flight.
#[derive(Debug)]
pub struct Page<F: FillerSource = RngFiller<SmallRng>> {
    name: ScrambleReveal<F>,
    typewriter: Typewriter,
    title: ScrambleReveal<F>,
    paragraphs: Vec<ScrambleReveal<F>>,
    sections: Vec<Section>,
    section_index: usize,
    hero_config: ScrambleConfig,
    reveal_config: ScrambleConfig,
    paused: bool,
    make_filler: fn() -> F,
}

impl Page {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_filler(config, RngFiller::from_entropy)
    }
}

impl<F: FillerSource> Page<F> {
    pub fn with_filler(config: &Config, make_filler: fn() -> F) -> Result<Self> {
        config.reveal.validate()?;
        let name = ScrambleReveal::with_filler(config.name.clone(), config.hero, make_filler())?;
        let typewriter = Typewriter::new(&config.typewriter.phrases, config.typewriter.timings)?;
        let title_text = config.sections.first().map_or("", |s| s.title.as_str());
        let title = ScrambleReveal::with_filler(title_text, config.reveal, make_filler())?;

        Ok(Self {
            name,
            typewriter,
            title,
            paragraphs: Vec::new(),
            sections: config.sections.clone(),
            section_index: 0,
            hero_config: config.hero,
            reveal_config: config.reveal,
            paused: false,
            make_filler,
        })
    }

    pub fn start(&mut self, now: Duration) -> Result<()> {
        self.name.start(now);
        self.typewriter.start(now);
        self.title.start(now);
        self.paragraphs.clear();
        self.show_section(now)
    }

    /// Runs every tick due by `now`. Returns true if anything changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        let mut changed = self.name.advance(now);
        changed |= self.typewriter.advance(now);
        changed |= self.title.advance(now);
        for paragraph in &mut self.paragraphs {
            changed |= paragraph.advance(now);
        }
        changed
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        earliest_deadline(self.animations())
    }

    pub fn next_section(&mut self, now: Duration) -> Result<()> {
        if self.sections.is_empty() {
            return Ok(());
        }
        self.section_index = (self.section_index + 1) % self.sections.len();
        self.show_section(now)
    }

    pub fn previous_section(&mut self, now: Duration) -> Result<()> {
        if self.sections.is_empty() {
            return Ok(());
        }
        self.section_index = (self.section_index + self.sections.len() - 1) % self.sections.len();
        self.show_section(now)
    }

    /// Reveals the headline and the current section again from scratch.
    pub fn replay(&mut self, now: Duration) {
        self.name.start(now);
        self.title.start(now);
        for paragraph in &mut self.paragraphs {
            paragraph.start(now);
        }
    }

    /// Pauses or resumes the reveal animations. Returns the new setting.
    ///
    /// Pausing shows every text statically. Resuming restores the configured
    /// `play` flags of the headline and the sections independently; only when
    /// neither was configured to animate are both switched on.
    pub fn toggle_play(&mut self, now: Duration) -> Result<bool> {
        if self.is_playing() {
            self.paused = true;
        } else {
            self.paused = false;
            if !self.hero_config.play && !self.reveal_config.play {
                self.hero_config.play = true;
                self.reveal_config.play = true;
            }
        }

        let hero = self.effective(self.hero_config);
        let reveal = self.effective(self.reveal_config);
        let name = self.name.target().to_string();
        self.name.update(&name, hero, now)?;
        let title = self.title.target().to_string();
        self.title.update(&title, reveal, now)?;
        for paragraph in &mut self.paragraphs {
            let text = paragraph.target().to_string();
            paragraph.update(&text, reveal, now)?;
        }

        let play = self.is_playing();
        tracing::info!(play, "toggled reveal animation");
        Ok(play)
    }

    fn effective(&self, config: ScrambleConfig) -> ScrambleConfig {
        ScrambleConfig {
            play: config.play && !self.paused,
            ..config
        }
    }

    pub fn teardown(&mut self) {
        self.name.teardown();
        self.typewriter.teardown();
        self.title.teardown();
        for paragraph in &mut self.paragraphs {
            paragraph.teardown();
        }
    }

    fn show_section(&mut self, now: Duration) -> Result<()> {
        let Some(section) = self.sections.get(self.section_index) else {
            return Ok(());
        };
        tracing::debug!(index = self.section_index, title = %section.title, "showing section");
        let reveal = self.effective(self.reveal_config);
        self.title.update(&section.title, reveal, now)?;

        for extra in self.paragraphs.iter_mut().skip(section.paragraphs.len()) {
            extra.teardown();
        }
        self.paragraphs.truncate(section.paragraphs.len());

        for (i, text) in section.paragraphs.iter().enumerate() {
            match self.paragraphs.get_mut(i) {
                Some(engine) => {
                    engine.update(text, reveal, now)?;
                }
                None => {
                    let mut engine = ScrambleReveal::with_filler(
                        text.as_str(),
                        reveal,
                        (self.make_filler)(),
                    )?;
                    engine.start(now);
                    self.paragraphs.push(engine);
                }
            }
        }
        Ok(())
    }

    fn animations(&self) -> Vec<&dyn TextAnimation> {
        let mut all: Vec<&dyn TextAnimation> = Vec::with_capacity(3 + self.paragraphs.len());
        all.push(&self.name);
        all.push(&self.typewriter);
        all.push(&self.title);
        for paragraph in &self.paragraphs {
            all.push(paragraph);
        }
        all
    }

    pub fn name_text(&self) -> &str {
        self.name.output()
    }

    pub fn typed_text(&self) -> &str {
        self.typewriter.output()
    }

    pub fn typewriter_phase(&self) -> Phase {
        self.typewriter.phase()
    }

    pub fn section_title(&self) -> &str {
        self.title.output()
    }

    pub fn paragraph_texts(&self) -> impl Iterator<Item = &str> {
        self.paragraphs.iter().map(|p| p.output())
    }

    pub fn section_index(&self) -> usize {
        self.section_index
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// True while at least one reveal is set to animate.
    pub fn is_playing(&self) -> bool {
        !self.paused && (self.hero_config.play || self.reveal_config.play)
    }

    /// True once the headline and the current section are fully revealed.
    pub fn is_settled(&self) -> bool {
        self.name.is_finished()
            && self.title.is_finished()
            && self.paragraphs.iter().all(|p| p.is_finished())
    }
}
