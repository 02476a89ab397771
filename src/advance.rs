use std::time::Duration;

use crate::settings::Mode;

pub const LONG_BREAK_EVERY: u32 = 4;

/// Pause between the automatic mode switch and the automatic start.
pub const AUTO_START_DELAY: Duration = Duration::from_millis(600);

/// Picks the mode that follows a completed session. `sessions_today` is
/// today's completed focus count after the session just finished was
/// recorded.
pub fn next_mode(completed: Mode, sessions_today: u32) -> Mode {
    match completed {
        Mode::Pomodoro if sessions_today > 0 && sessions_today % LONG_BREAK_EVERY == 0 => Mode::Long,
        Mode::Pomodoro => Mode::Short,
        Mode::Short | Mode::Long => Mode::Pomodoro,
    }
}
