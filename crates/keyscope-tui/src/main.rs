mod keymap;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, KeyModifiers};
use keyscope_core::engine::{Engine, ENGINE};
use keyscope_core::types::{HighlightCommand, KeyIdentity, Platform};
use ratatui::DefaultTerminal;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Interactive keyboard hardware tester.
#[derive(Parser)]
#[command(name = "keyscope", version)]
struct Args {
    /// Start with the full layout expanded.
    #[arg(long)]
    full: bool,
    /// Treat the machine as a desktop even on a Mac laptop. Disables
    /// completion detection.
    #[arg(long)]
    desktop: bool,
    /// Append logs to this file. The filter comes from RUST_LOG.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Redraw cadence when no confirmation or sweep step is due.
const IDLE_POLL: Duration = Duration::from_millis(250);

struct App {
    /// Reset sweep steps still waiting for their redraw instant.
    sweep: Vec<(Instant, KeyIdentity)>,
    unknown_text: Option<String>,
    status: String,
    completed: Arc<AtomicBool>,
}

impl App {
    fn new(completed: Arc<AtomicBool>) -> Self {
        Self {
            sweep: Vec::new(),
            unknown_text: None,
            status: "Press any key to begin".to_string(),
            completed,
        }
    }

    /// Returns false when the app should exit.
    fn handle_key(&mut self, engine: &mut Engine, key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                event::KeyCode::Char('q') | event::KeyCode::Char('c') => return false,
                event::KeyCode::Char('r') => {
                    let now = Instant::now();
                    self.sweep = engine
                        .on_reset_requested()
                        .into_iter()
                        .map(|step| (now + step.delay, step.identity))
                        .collect();
                    self.unknown_text = None;
                    self.status = "Reset".to_string();
                    return true;
                }
                event::KeyCode::Char('f') => {
                    engine.toggle_full_layout();
                    return true;
                }
                _ => {}
            }
        }

        let Some(raw) = keymap::raw_event_from(engine.platform(), key) else {
            return true;
        };
        match engine.on_raw_key_event(&raw, Instant::now()) {
            HighlightCommand::Matched { identity, expand_layout } => {
                self.status = format!("Pressed: {identity}");
                if expand_layout {
                    self.status.push_str("  (full layout shown)");
                }
            }
            HighlightCommand::Unresolved { display_text } => {
                self.unknown_text = Some(display_text);
            }
            HighlightCommand::Suppressed => {}
        }
        true
    }

    fn poll_timeout(&self, engine: &Engine, now: Instant) -> Duration {
        let mut deadline = now + IDLE_POLL;
        if let Some(due) = engine.next_deadline() {
            deadline = deadline.min(due);
        }
        if let Some(&(due, _)) = self.sweep.iter().min_by_key(|&&(due, _)| due) {
            deadline = deadline.min(due);
        }
        deadline.saturating_duration_since(now)
    }
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        let now = Instant::now();
        {
            let mut engine = ENGINE.lock();
            engine.tick(now);
            app.sweep.retain(|&(due, _)| due > now);
            if app.completed.swap(false, Ordering::SeqCst) {
                app.status = "All keys tested, congratulations".to_string();
            }

            let sweeping: HashSet<KeyIdentity> =
                app.sweep.iter().map(|&(_, id)| id).collect();
            let view = ui::ViewState {
                status: &app.status,
                unknown_text: app.unknown_text.as_deref(),
                sweeping: &sweeping,
            };
            terminal.draw(|frame| ui::render(frame, &engine, &view))?;
        }

        let timeout = {
            let engine = ENGINE.lock();
            app.poll_timeout(&engine, Instant::now())
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let mut engine = ENGINE.lock();
                    if !app.handle_key(&mut engine, &key) {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let completed = Arc::new(AtomicBool::new(false));
    {
        let mut engine = ENGINE.lock();
        if args.desktop {
            *engine = Engine::new(Platform::current(), false)?;
        }
        if args.full && !engine.full_layout_shown() {
            engine.toggle_full_layout();
        }
        let flag = completed.clone();
        engine.set_on_completion(Box::new(move || {
            info!("keyboard test complete");
            flag.store(true, Ordering::SeqCst);
        }));
    }

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut App::new(completed));
    ratatui::restore();
    result
}
