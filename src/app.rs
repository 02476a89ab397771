use std::time::Instant;

use bluehour::{
    engine::{Engine, RenderSink},
    prefs::{Theme, UiPrefs, get_theme},
    quotes::{Quote, random_quote},
    settings::{AlarmKind, Mode, Settings, bounds_for, parse_minutes_input, seconds_for},
    store::SharedStore,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ============================================================================
// Views
// ============================================================================

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum View {
    Timer,
    Analytics,
    Settings,
    Help,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SettingsField {
    Pomodoro,
    Short,
    Long,
    Alarm,
    AutoNext,
}

impl SettingsField {
    pub const ALL: [SettingsField; 5] = [
        Self::Pomodoro,
        Self::Short,
        Self::Long,
        Self::Alarm,
        Self::AutoNext,
    ];

    fn next(self) -> Self {
        match self {
            Self::Pomodoro => Self::Short,
            Self::Short => Self::Long,
            Self::Long => Self::Alarm,
            Self::Alarm => Self::AutoNext,
            Self::AutoNext => Self::Pomodoro,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Pomodoro => Self::AutoNext,
            Self::Short => Self::Pomodoro,
            Self::Long => Self::Short,
            Self::Alarm => Self::Long,
            Self::AutoNext => Self::Alarm,
        }
    }

    pub fn mode(self) -> Option<Mode> {
        match self {
            Self::Pomodoro => Some(Mode::Pomodoro),
            Self::Short => Some(Mode::Short),
            Self::Long => Some(Mode::Long),
            Self::Alarm | Self::AutoNext => None,
        }
    }
}

// ============================================================================
// Display
// ============================================================================

/// What the timer view shows, fed only by engine events.
pub struct Display {
    pub minutes: u32,
    pub seconds: u32,
    pub status: String,
    pub highlighted: Mode,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            minutes: 0,
            seconds: 0,
            status: String::new(),
            highlighted: Mode::Pomodoro,
        }
    }
}

impl Display {
    pub fn time_str(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }
}

impl RenderSink for Display {
    fn render_time(&mut self, minutes: u32, seconds: u32) {
        self.minutes = minutes;
        self.seconds = seconds;
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    fn highlight_mode(&mut self, mode: Mode) {
        self.highlighted = mode;
    }
}

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    pub engine: Engine,
    pub display: Display,
    pub prefs: UiPrefs,
    pub theme: Theme,
    pub store: SharedStore,
    pub current_view: View,
    pub draft: Settings,
    pub settings_field: SettingsField,
    pub settings_editing: bool,
    pub settings_input: String,
    pub confirm_clear: bool,
    pub quote: Quote,
    pub animation_frame: u8,
}

impl AppState {
    pub fn new(engine: Engine, prefs: UiPrefs, store: SharedStore) -> Self {
        let draft = engine.settings().clone();
        let mut app = Self {
            engine,
            display: Display::default(),
            theme: get_theme(&prefs.theme),
            prefs,
            store,
            current_view: View::Timer,
            draft,
            settings_field: SettingsField::Pomodoro,
            settings_editing: false,
            settings_input: String::new(),
            confirm_clear: false,
            quote: random_quote(),
            animation_frame: 0,
        };
        app.sync_display();
        app
    }

    pub fn update(&mut self, now: Instant) {
        self.engine.poll(now);
        self.sync_display();
        self.animation_frame = self.animation_frame.wrapping_add(1) % 20;
    }

    pub fn sync_display(&mut self) {
        for event in self.engine.drain_events() {
            event.dispatch(&mut self.display);
        }
    }

    pub fn progress_ratio(&self) -> f64 {
        let state = self.engine.state();
        let total = seconds_for(state.mode, self.engine.settings()) as f64;
        if total == 0.0 {
            return 0.0;
        }
        (1.0 - state.remaining_seconds as f64 / total).clamp(0.0, 1.0)
    }

    fn open_settings(&mut self) {
        self.draft = self.engine.settings().clone();
        self.settings_field = SettingsField::Pomodoro;
        self.settings_editing = false;
        self.settings_input.clear();
        self.current_view = View::Settings;
    }

    fn cycle_theme(&mut self, forward: bool) {
        self.prefs.cycle_theme(forward);
        self.theme = get_theme(&self.prefs.theme);
        self.prefs.save(self.store.as_ref());
    }
}

// ============================================================================
// Event Handlers
// ============================================================================

/// Returns `true` when the app should quit.
pub fn handle_input(key: KeyEvent, app: &mut AppState, now: Instant) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if app.settings_editing {
        match key.code {
            KeyCode::Char(c) => app.settings_input.push(c),
            KeyCode::Backspace => {
                app.settings_input.pop();
            }
            KeyCode::Enter => apply_setting_input(app),
            KeyCode::Esc => {
                app.settings_editing = false;
                app.settings_input.clear();
            }
            _ => {}
        }
        return false;
    }

    let quit = match app.current_view {
        View::Timer => handle_timer_view(key, app, now),
        View::Analytics => {
            handle_analytics_view(key, app);
            false
        }
        View::Settings => {
            handle_settings_view(key, app);
            false
        }
        View::Help => {
            app.current_view = View::Timer;
            false
        }
    };
    app.sync_display();
    quit
}

fn handle_timer_view(key: KeyEvent, app: &mut AppState, now: Instant) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char(' ') => {
            if app.engine.state().is_running() {
                app.engine.pause();
            } else {
                app.engine.start(now);
            }
        }
        KeyCode::Char('r') => app.engine.reset(),
        KeyCode::Char('1') => {
            app.engine.set_mode(Mode::Pomodoro);
        }
        KeyCode::Char('2') => {
            app.engine.set_mode(Mode::Short);
        }
        KeyCode::Char('3') => {
            app.engine.set_mode(Mode::Long);
        }
        KeyCode::Char('a') => {
            app.confirm_clear = false;
            app.current_view = View::Analytics;
        }
        KeyCode::Char('s') => app.open_settings(),
        KeyCode::Char('t') => app.cycle_theme(true),
        KeyCode::Char('T') => app.cycle_theme(false),
        KeyCode::Char('h') | KeyCode::Char('?') => app.current_view = View::Help,
        _ => {}
    }
    false
}

fn handle_analytics_view(key: KeyEvent, app: &mut AppState) {
    if app.confirm_clear {
        if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            app.engine.clear_analytics();
        }
        app.confirm_clear = false;
        return;
    }

    match key.code {
        KeyCode::Char('c') => app.confirm_clear = true,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('a') => app.current_view = View::Timer,
        _ => {}
    }
}

fn handle_settings_view(key: KeyEvent, app: &mut AppState) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.draft = app.engine.settings().clone();
            app.current_view = View::Timer;
        }
        KeyCode::Char('w') => {
            app.engine.apply_settings(app.draft.clone());
            app.current_view = View::Timer;
        }
        KeyCode::Down | KeyCode::Char('j') => app.settings_field = app.settings_field.next(),
        KeyCode::Up | KeyCode::Char('k') => app.settings_field = app.settings_field.prev(),
        KeyCode::Enter | KeyCode::Char('e') => {
            if let Some(mode) = app.settings_field.mode() {
                app.settings_input = app.draft.minutes_for(mode).to_string();
                app.settings_editing = true;
            }
        }
        KeyCode::Char(' ') => match app.settings_field {
            SettingsField::AutoNext => app.draft.auto_next = !app.draft.auto_next,
            SettingsField::Alarm => app.draft.alarm = app.draft.alarm.cycle(true),
            _ => {}
        },
        KeyCode::Left | KeyCode::Char('h') => {
            if app.settings_field == SettingsField::Alarm {
                app.draft.alarm = app.draft.alarm.cycle(false);
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.settings_field == SettingsField::Alarm {
                app.draft.alarm = app.draft.alarm.cycle(true);
            }
        }
        _ => {}
    }
}

fn apply_setting_input(app: &mut AppState) {
    if let Some(mode) = app.settings_field.mode() {
        let minutes = parse_minutes_input(&app.settings_input, bounds_for(mode));
        app.draft.set_minutes(mode, minutes);
    }
    app.settings_editing = false;
    app.settings_input.clear();
}

pub fn alarm_label(kind: AlarmKind) -> &'static str {
    match kind {
        AlarmKind::Soft => "🔔 Soft",
        AlarmKind::Bell => "🛎  Bell",
        AlarmKind::Digital => "📟 Digital",
        AlarmKind::None => "🔕 None",
    }
}
