use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::scramble::ScrambleConfig;
use crate::typewriter::{TypewriterTimings, DEFAULT_PHRASES};

/// A titled block of text revealed with the scramble effect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

impl Section {
    pub fn new(title: impl Into<String>, paragraphs: &[&str]) -> Self {
        Self {
            title: title.into(),
            paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypewriterSettings {
    pub phrases: Vec<String>,
    #[serde(flatten)]
    pub timings: TypewriterTimings,
}

impl Default for TypewriterSettings {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
            timings: TypewriterTimings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub name: String,
    /// Reveal used for the headline.
    pub hero: ScrambleConfig,
    /// Reveal used for section titles and paragraphs. Fields left out of
    /// the file fall back to [`section_reveal`], not the headline timing.
    #[serde(deserialize_with = "deserialize_section_reveal")]
    pub reveal: ScrambleConfig,
    pub typewriter: TypewriterSettings,
    pub sections: Vec<Section>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "qwantum".to_string(),
            hero: ScrambleConfig::default(),
            reveal: section_reveal(),
            typewriter: TypewriterSettings::default(),
            sections: default_sections(),
        }
    }
}

/// Faster reveal used for section content.
pub fn section_reveal() -> ScrambleConfig {
    ScrambleConfig {
        interval_ms: 8,
        step: 1,
        play: true,
    }
}

fn deserialize_section_reveal<'de, D>(deserializer: D) -> Result<ScrambleConfig, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct PartialReveal {
        interval_ms: Option<u64>,
        step: Option<u32>,
        play: Option<bool>,
    }

    let partial = PartialReveal::deserialize(deserializer)?;
    let base = section_reveal();
    Ok(ScrambleConfig {
        interval_ms: partial.interval_ms.unwrap_or(base.interval_ms),
        step: partial.step.unwrap_or(base.step),
        play: partial.play.unwrap_or(base.play),
    })
}

fn default_sections() -> Vec<Section> {
    vec![
        Section::new(
            "About Me",
            &[
                "I'm a middle-level software engineer with deep expertise in full-stack development, AI architectures, and system administration. Currently working on cutting-edge projects in fintech, AI, and mobile development.",
                "My passion lies in creating scalable, efficient solutions using modern technologies and architectural patterns. I'm particularly interested in AI/ML, cryptography, and low-level programming.",
            ],
        ),
        Section::new(
            "Technical Arsenal",
            &[
                "Python: NumPy & PyTorch, Django & FastAPI, AI/ML Development",
                "Web: React & React Native, TS/JS, 50+ JS Libraries",
                "C, Rust, ASM: C (OpenGL, Vulkan), Rust (Rocket, Burn), Assembly Language",
            ],
        ),
        Section::new(
            "Professional Journey",
            &["Creating performant, secure, optimized, and scalable software with Rust and NextJS. Planning enormous, high-load architectures for modern systems."],
        ),
    ]
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path =
            AppDirs::config_path().unwrap_or_else(|| PathBuf::from("herotext_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "no config file, using defaults");
                return Config::default();
            }
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }
}
