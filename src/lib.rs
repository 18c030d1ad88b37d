// Library surface for the binary, headless integration tests and reuse.
pub mod animation;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod filler;
pub mod page;
pub mod runtime;
pub mod scheduler;
pub mod scramble;
pub mod typewriter;
pub mod ui;

pub use animation::TextAnimation;
pub use error::ConfigurationError;
pub use scramble::{ScrambleConfig, ScrambleReveal};
pub use typewriter::{Phase, Typewriter, TypewriterTimings};
