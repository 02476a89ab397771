use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Modes & Alarm Kinds
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Pomodoro,
    Short,
    Long,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Pomodoro, Mode::Short, Mode::Long];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pomodoro => "🎯 FOCUS",
            Self::Short => "☕ SHORT BREAK",
            Self::Long => "🌴 LONG BREAK",
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Pomodoro => "pomodoro",
            Self::Short => "short",
            Self::Long => "long",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Self::Pomodoro)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlarmKind {
    #[default]
    Soft,
    Bell,
    Digital,
    None,
}

impl AlarmKind {
    pub const ALL: [AlarmKind; 4] = [
        AlarmKind::Soft,
        AlarmKind::Bell,
        AlarmKind::Digital,
        AlarmKind::None,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Soft => "soft",
            Self::Bell => "bell",
            Self::Digital => "digital",
            Self::None => "none",
        }
    }

    /// Unknown names resolve to `Soft`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "bell" => Self::Bell,
            "digital" => Self::Digital,
            "none" => Self::None,
            _ => Self::Soft,
        }
    }

    pub fn cycle(self, forward: bool) -> Self {
        let idx = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        let len = Self::ALL.len();
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        Self::ALL[next]
    }
}

// ============================================================================
// Bounds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteBounds {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl MinuteBounds {
    pub fn clamp(&self, minutes: f64) -> u32 {
        if !minutes.is_finite() {
            return self.default;
        }
        minutes.round().clamp(self.min as f64, self.max as f64) as u32
    }
}

pub const POMODORO_BOUNDS: MinuteBounds = MinuteBounds { min: 1, max: 120, default: 25 };
pub const SHORT_BOUNDS: MinuteBounds = MinuteBounds { min: 1, max: 60, default: 5 };
pub const LONG_BOUNDS: MinuteBounds = MinuteBounds { min: 1, max: 90, default: 15 };

pub fn bounds_for(mode: Mode) -> MinuteBounds {
    match mode {
        Mode::Pomodoro => POMODORO_BOUNDS,
        Mode::Short => SHORT_BOUNDS,
        Mode::Long => LONG_BOUNDS,
    }
}

/// Parses a minutes value typed by the user. Out-of-range numbers are
/// clamped; text that is not a number takes the field's default.
pub fn parse_minutes_input(input: &str, bounds: MinuteBounds) -> u32 {
    match input.trim().parse::<f64>() {
        Ok(m) => bounds.clamp(m),
        Err(_) => bounds.default,
    }
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "Value")]
pub struct Settings {
    pub pomodoro_minutes: u32,
    pub short_minutes: u32,
    pub long_minutes: u32,
    pub alarm: AlarmKind,
    pub auto_next: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pomodoro_minutes: POMODORO_BOUNDS.default,
            short_minutes: SHORT_BOUNDS.default,
            long_minutes: LONG_BOUNDS.default,
            alarm: AlarmKind::Soft,
            auto_next: false,
        }
    }
}

impl Settings {
    pub fn minutes_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Pomodoro => self.pomodoro_minutes,
            Mode::Short => self.short_minutes,
            Mode::Long => self.long_minutes,
        }
    }

    pub fn set_minutes(&mut self, mode: Mode, minutes: u32) {
        let minutes = bounds_for(mode).clamp(minutes as f64);
        match mode {
            Mode::Pomodoro => self.pomodoro_minutes = minutes,
            Mode::Short => self.short_minutes = minutes,
            Mode::Long => self.long_minutes = minutes,
        }
    }
}

/// Session length of `mode` in seconds.
pub fn seconds_for(mode: Mode, settings: &Settings) -> u32 {
    settings.minutes_for(mode) * 60
}

// Stored records are read field by field so one bad value never discards
// the rest of the user's settings.
impl From<Value> for Settings {
    fn from(value: Value) -> Self {
        let defaults = Settings::default();
        let field = |name: &str| value.get(name);

        Self {
            pomodoro_minutes: stored_minutes(field("pomodoro_minutes"), POMODORO_BOUNDS),
            short_minutes: stored_minutes(field("short_minutes"), SHORT_BOUNDS),
            long_minutes: stored_minutes(field("long_minutes"), LONG_BOUNDS),
            alarm: field("alarm")
                .and_then(Value::as_str)
                .map(AlarmKind::from_str_lossy)
                .unwrap_or(defaults.alarm),
            auto_next: field("auto_next").map(truthy).unwrap_or(defaults.auto_next),
        }
    }
}

fn stored_minutes(value: Option<&Value>, bounds: MinuteBounds) -> u32 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number.filter(|n| n.is_finite() && *n != 0.0) {
        Some(n) => bounds.clamp(n),
        None => {
            if let Some(bad) = value {
                tracing::warn!(value = %bad, default = bounds.default, "invalid stored minutes");
            }
            bounds.default
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}
