use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use liga_dashboard::config::Config;
use liga_dashboard::logging;
use liga_dashboard::provider::spawn_provider;
use liga_dashboard::schedule::RefreshPolicy;
use liga_dashboard::slideshow::Advance;
use liga_dashboard::state::{AppState, Delta, ProviderCommand, apply_delta};

mod ui;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
    refresh: RefreshPolicy,
    last_refresh: Instant,
}

impl App {
    fn new(config: &Config, cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        Self {
            state: AppState::new(config.screen_duration, config.profile, config.force_periods),
            should_quit: false,
            cmd_tx,
            refresh: config.refresh,
            last_refresh: Instant::now(),
        }
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Right | KeyCode::Char('l') => {
                let step = self.state.slideshow.next(now);
                self.after_step(step);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.state.slideshow.prev(now);
            }
            KeyCode::Char(' ') | KeyCode::Char('p') => {
                self.state.slideshow.toggle_pause(now);
                let msg = if self.state.slideshow.is_paused() {
                    "[INFO] Slideshow paused"
                } else {
                    "[INFO] Slideshow resumed"
                };
                self.state.push_log(msg);
            }
            KeyCode::Char('r') => self.request_refresh(false),
            KeyCode::Char('?') => self.state.toggle_help(),
            KeyCode::Esc if self.state.help_overlay => self.state.toggle_help(),
            _ => {}
        }
    }

    fn tick(&mut self, now: Instant) {
        let step = self.state.slideshow.tick(now);
        self.after_step(step);
    }

    // A completed cycle refetches in the background.
    fn after_step(&mut self, step: Option<Advance>) {
        if step == Some(Advance::Wrapped) {
            self.request_refresh(true);
        }
    }

    fn request_refresh(&mut self, silent: bool) {
        self.last_refresh = Instant::now();
        if !self.state.begin_refresh() {
            if !silent {
                self.state.push_log("[INFO] Refresh already running");
            }
            return;
        }
        if self
            .cmd_tx
            .send(ProviderCommand::Refresh { silent })
            .is_err()
        {
            self.state.push_log("[WARN] Refresh request failed");
            self.state.slideshow.keep_current(Instant::now());
        } else if !silent {
            self.state.push_log("[INFO] Refresh requested");
        }
    }

    fn maybe_refresh(&mut self) {
        let local = Local::now().naive_local();
        if self.refresh.is_due(self.last_refresh.elapsed(), local) {
            tracing::debug!(
                interval_secs = self.refresh.interval_at(local).as_secs(),
                "periodic refresh"
            );
            self.request_refresh(true);
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = Config::from_env().context("invalid configuration")?;
    let _log_guard = logging::init_file_logging(&config.log_dir);
    tracing::info!(source = ?config.source, "starting liga_dashboard");

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    // Not joined on exit: a fetch in flight may sit on the request timeout.
    let _provider = spawn_provider(config.source.clone(), tx, cmd_rx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(&config, cmd_tx);
    let size = terminal.size()?;
    app.state.resize(size.width, size.height, Instant::now());
    app.request_refresh(false);

    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let _ = app.cmd_tx.send(ProviderCommand::Shutdown);
    tracing::info!("shutting down");
    res.context("terminal loop failed")
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta, Instant::now());
        }

        app.tick(Instant::now());
        app.maybe_refresh();

        let now = Instant::now();
        terminal.draw(|f| ui::draw(f, &app.state, now))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.on_key(key, Instant::now());
                }
                Event::Resize(width, height) => {
                    if app.state.resize(width, height, Instant::now()) {
                        app.state.push_log("[INFO] Layout changed");
                    }
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
