mod app;
mod ui;

use std::{
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use bluehour::{
    Engine, Settings,
    alarm::{AlarmPlayer, SilentAlarm, SystemAlarm},
    chart,
    clock::LocalClock,
    prefs::{UiPrefs, normalize_theme},
    settings::{AlarmKind, LONG_BOUNDS, POMODORO_BOUNDS, SHORT_BOUNDS, parse_minutes_input},
    store::{self, JsonFileStore, MemoryStore, SharedStore, StoreKey},
};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::app::{AppState, handle_input};

// ============================================================================
// Type Aliases & Constants
// ============================================================================

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
const TICK_RATE: Duration = Duration::from_millis(50);
const LOG_FILE: &str = "bluehour.log";

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "🌌 bluehour - a terminal focus timer with weekly analytics")]
struct Args {
    /// Focus length in minutes for this run (1-120)
    #[arg(short, long)]
    pomodoro: Option<String>,
    /// Short break in minutes for this run (1-60)
    #[arg(short, long)]
    short: Option<String>,
    /// Long break in minutes for this run (1-90)
    #[arg(short, long)]
    long: Option<String>,
    /// Alarm sound: soft, bell, digital or none
    #[arg(short, long)]
    alarm: Option<String>,
    /// Start the next session automatically
    #[arg(long)]
    auto_next: Option<bool>,
    #[arg(short = 't', long)]
    theme: Option<String>,
    #[arg(long)]
    no_sound: bool,
    /// Where settings, analytics and logs live
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Keep settings and analytics in memory only
    #[arg(long)]
    ephemeral: bool,
    /// Print the last 7 days and exit
    #[arg(long)]
    report: bool,
}

impl Args {
    /// Overrides last for this run only; they are not written back.
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(p) = &self.pomodoro {
            settings.pomodoro_minutes = parse_minutes_input(p, POMODORO_BOUNDS);
        }
        if let Some(s) = &self.short {
            settings.short_minutes = parse_minutes_input(s, SHORT_BOUNDS);
        }
        if let Some(l) = &self.long {
            settings.long_minutes = parse_minutes_input(l, LONG_BOUNDS);
        }
        if let Some(a) = &self.alarm {
            settings.alarm = AlarmKind::from_str_lossy(a);
        }
        if let Some(auto) = self.auto_next {
            settings.auto_next = auto;
        }
        if self.no_sound {
            settings.alarm = AlarmKind::None;
        }
    }
}

// ============================================================================
// Setup
// ============================================================================

fn init_logging(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();
    Ok(())
}

fn open_store(args: &Args, dir: &Path) -> Result<SharedStore> {
    if args.ephemeral {
        return Ok(Arc::new(MemoryStore::new()));
    }
    Ok(Arc::new(JsonFileStore::open(dir)?))
}

fn print_report(engine: &Engine) {
    let days = engine.last_7_days();
    let bars = chart::project(&days);
    let summary = engine.week_summary();

    println!("🌌 bluehour - last 7 days\n");
    for (day, bar) in days.iter().zip(&bars) {
        let width = (bar.ratio * 30.0).round() as usize;
        println!(
            "  {} {}  {:<30} {:>4} min  {:>2} sessions{}",
            bar.label,
            day.key(),
            "█".repeat(width),
            bar.minutes,
            day.record.completed_sessions,
            if bar.is_today { "  ← today" } else { "" }
        );
    }
    println!(
        "\n  Week: {} min, {} sessions  •  Today: {} min",
        summary.week_minutes, summary.week_sessions, summary.today_minutes
    );
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();
    let data_dir = match &args.data_dir {
        Some(dir) => dir.clone(),
        None => store::default_data_dir()?,
    };
    init_logging(&data_dir)?;

    let store = open_store(&args, &data_dir)?;
    let mut settings: Settings = store::load_or_default(store.as_ref(), StoreKey::Settings);
    args.apply_overrides(&mut settings);

    let alarm: Box<dyn AlarmPlayer> = if args.no_sound {
        Box::new(SilentAlarm)
    } else {
        Box::new(SystemAlarm::new(data_dir.join("sounds")))
    };
    let engine = Engine::with_settings(settings, store.clone(), Arc::new(LocalClock), alarm);

    if args.report {
        print_report(&engine);
        return Ok(());
    }

    let mut prefs = UiPrefs::load(store.as_ref());
    if let Some(theme) = &args.theme {
        prefs.theme = normalize_theme(theme);
    }
    tracing::info!(dir = %data_dir.display(), ephemeral = args.ephemeral, "starting");

    let mut app = AppState::new(engine, prefs, store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        tracing::error!(error = %e, "terminal loop failed");
    }
    tracing::info!("exiting");
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::render_ui(f, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_input(key, app, Instant::now()) {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.update(Instant::now());
            last_tick = Instant::now();
        }
    }
}
