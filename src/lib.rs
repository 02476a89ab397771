//! Focus-timer engine: a Pomodoro countdown with automatic cycling and
//! per-day focus analytics, plus the collaborators the terminal host needs.

pub mod advance;
pub mod alarm;
pub mod analytics;
pub mod chart;
pub mod clock;
pub mod engine;
pub mod error;
pub mod prefs;
pub mod quotes;
pub mod settings;
pub mod store;
pub mod synth;

pub use engine::{Engine, RenderSink, TimerEvent, TimerState, TimerStatus};
pub use error::{Error, Result};
pub use settings::{AlarmKind, Mode, Settings};
