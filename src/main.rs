use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use herotext::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    page::Page,
    runtime::{Clock, CrosstermEventSource, FixedTicker, HeroEvent, MonotonicClock, Runner},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::EnvFilter;

const TICK_RATE_MS: u64 = 100;
const LOG_ENV: &str = "HEROTEXT_LOG";

/// scramble-reveal and typewriter text animations in your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Renders a landing page whose headline and sections decrypt themselves while a typewriter cycles through your titles."
)]
pub struct Cli {
    /// headline to reveal
    #[clap(short = 'n', long)]
    name: Option<String>,

    /// subtitle phrase for the typewriter (repeat for several)
    #[clap(short = 'p', long = "phrase")]
    phrases: Vec<String>,

    /// milliseconds between section reveal ticks
    #[clap(short = 'i', long)]
    interval_ms: Option<u64>,

    /// frames per revealed character in sections
    #[clap(short = 's', long)]
    step: Option<u32>,

    /// show all text at once instead of animating the reveals
    #[clap(long)]
    no_play: bool,

    /// read settings from this file instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Layer command line overrides on top of the loaded configuration
    fn apply(&self, mut config: Config) -> Config {
        if let Some(name) = &self.name {
            config.name.clone_from(name);
        }
        if !self.phrases.is_empty() {
            config.typewriter.phrases.clone_from(&self.phrases);
        }
        if let Some(interval_ms) = self.interval_ms {
            config.reveal.interval_ms = interval_ms;
        }
        if let Some(step) = self.step {
            config.reveal.step = step;
        }
        if self.no_play {
            config.hero.play = false;
            config.reveal.play = false;
        }
        config
    }
}

fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging();

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    tracing::info!(path = %store.path().display(), "loading config");
    let config = cli.apply(store.load());

    let mut page = match Page::new(&config) {
        Ok(page) => page,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, err).exit();
        }
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut page);
    page.teardown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

enum Action {
    Redraw,
    Ignore,
    Quit,
}

fn handle_key(page: &mut Page, key: KeyEvent, now: Duration) -> Result<Action, Box<dyn Error>> {
    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Right => {
            page.next_section(now)?;
            Action::Redraw
        }
        KeyCode::Left => {
            page.previous_section(now)?;
            Action::Redraw
        }
        KeyCode::Char('r') => {
            page.replay(now);
            Action::Redraw
        }
        KeyCode::Char('p') => {
            page.toggle_play(now)?;
            Action::Redraw
        }
        _ => Action::Ignore,
    };
    Ok(action)
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    page: &mut Page,
) -> Result<(), Box<dyn Error>> {
    let clock = MonotonicClock::new();
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    page.start(clock.now())?;
    terminal.draw(|f| f.render_widget(&*page, f.area()))?;

    loop {
        let due_in = page
            .next_deadline()
            .map(|due| due.saturating_sub(clock.now()));

        let mut dirty = match runner.step_within(due_in) {
            HeroEvent::Tick => false,
            HeroEvent::Resize => true,
            HeroEvent::Key(key) => match handle_key(page, key, clock.now())? {
                Action::Quit => break,
                Action::Redraw => true,
                Action::Ignore => false,
            },
        };

        // keys must not starve the animations, so always catch up
        dirty |= page.advance(clock.now());
        if dirty {
            terminal.draw(|f| f.render_widget(&*page, f.area()))?;
        }
    }

    Ok(())
}
