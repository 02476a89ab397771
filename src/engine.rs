//! Countdown state machine and the controller that ties it to analytics,
//! the alarm and auto-advance.
//!
//! The engine never reads the wall clock on its own. The host passes the
//! current [`Instant`] to [`Engine::start`] and [`Engine::poll`]; each
//! logical tick is scheduled exactly one second after the previous one's
//! deadline, so slow or throttled polling catches up instead of drifting.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::{
    advance::{self, AUTO_START_DELAY},
    alarm::{self, AlarmPlayer},
    analytics::{Aggregator, DayEntry, WeekSummary},
    clock::Clock,
    settings::{Mode, Settings, seconds_for},
    store::{self, SharedStore, StoreKey},
};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub const STATUS_READY: &str = "Ready.";
pub const STATUS_FOCUSING: &str = "Focusing…";
pub const STATUS_BREAK: &str = "Break…";
pub const STATUS_PAUSED: &str = "Paused.";
pub const STATUS_COMPLETE: &str = "Session complete.";

// ============================================================================
// State & Events
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Ready,
    Running,
    Paused,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub mode: Mode,
    pub remaining_seconds: u32,
    pub status: TimerStatus,
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn minutes(&self) -> u32 {
        self.remaining_seconds / 60
    }

    pub fn seconds(&self) -> u32 {
        self.remaining_seconds % 60
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    Time { minutes: u32, seconds: u32 },
    Status(&'static str),
    HighlightMode(Mode),
    Completed { mode: Mode },
    AutoAdvanced { next: Mode },
}

/// Whatever shows the timer to the user.
pub trait RenderSink {
    fn render_time(&mut self, minutes: u32, seconds: u32);
    fn set_status(&mut self, status: &str);
    fn highlight_mode(&mut self, mode: Mode);
}

impl TimerEvent {
    pub fn dispatch(&self, sink: &mut dyn RenderSink) {
        match *self {
            Self::Time { minutes, seconds } => sink.render_time(minutes, seconds),
            Self::Status(text) => sink.set_status(text),
            Self::HighlightMode(mode) => sink.highlight_mode(mode),
            Self::Completed { .. } | Self::AutoAdvanced { .. } => {}
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Work accumulated while one `poll` replays overdue ticks.
#[derive(Default)]
struct PollBatch {
    focus_seconds: u64,
    alarm_played: bool,
}

pub struct Engine {
    settings: Settings,
    state: TimerState,
    analytics: Aggregator,
    alarm: Box<dyn AlarmPlayer>,
    storage: SharedStore,
    // Deadline of the next logical tick. Present exactly while running.
    next_tick: Option<Instant>,
    pending_start: Option<Instant>,
    events: Vec<TimerEvent>,
}

impl Engine {
    /// Builds an engine from the persisted settings record.
    pub fn new(storage: SharedStore, clock: Arc<dyn Clock>, alarm: Box<dyn AlarmPlayer>) -> Self {
        let settings = store::load_or_default(storage.as_ref(), StoreKey::Settings);
        Self::with_settings(settings, storage, clock, alarm)
    }

    pub fn with_settings(
        settings: Settings,
        storage: SharedStore,
        clock: Arc<dyn Clock>,
        alarm: Box<dyn AlarmPlayer>,
    ) -> Self {
        let analytics = Aggregator::load(storage.clone(), clock);
        let state = TimerState {
            mode: Mode::Pomodoro,
            remaining_seconds: seconds_for(Mode::Pomodoro, &settings),
            status: TimerStatus::Ready,
        };

        let mut engine = Self {
            settings,
            state,
            analytics,
            alarm,
            storage,
            next_tick: None,
            pending_start: None,
            events: Vec::new(),
        };
        engine.emit_time();
        engine.events.push(TimerEvent::Status(STATUS_READY));
        engine.events.push(TimerEvent::HighlightMode(Mode::Pomodoro));
        engine
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn analytics(&self) -> &Aggregator {
        &self.analytics
    }

    pub fn is_auto_start_pending(&self) -> bool {
        self.pending_start.is_some()
    }

    pub fn drain_events(&mut self) -> Vec<TimerEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    pub fn start(&mut self, now: Instant) {
        if self.state.is_running() {
            return;
        }
        self.pending_start = None;

        if self.state.remaining_seconds == 0 {
            self.state.remaining_seconds = seconds_for(self.state.mode, &self.settings);
            self.emit_time();
        }

        self.state.status = TimerStatus::Running;
        self.next_tick = Some(now + TICK_INTERVAL);
        self.events.push(TimerEvent::Status(if self.state.mode.is_break() {
            STATUS_BREAK
        } else {
            STATUS_FOCUSING
        }));
        tracing::debug!(
            mode = self.state.mode.to_str(),
            remaining = self.state.remaining_seconds,
            "countdown started"
        );
    }

    pub fn pause(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.next_tick = None;
        self.state.status = TimerStatus::Paused;
        self.events.push(TimerEvent::Status(STATUS_PAUSED));
        tracing::debug!(remaining = self.state.remaining_seconds, "countdown paused");
    }

    pub fn reset(&mut self) {
        self.next_tick = None;
        self.pending_start = None;
        self.state.remaining_seconds = seconds_for(self.state.mode, &self.settings);
        self.state.status = TimerStatus::Ready;
        self.emit_time();
        self.events.push(TimerEvent::Status(STATUS_READY));
    }

    /// Switches mode. Ignored while the countdown runs; returns whether
    /// the switch happened.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.state.is_running() {
            tracing::debug!(mode = mode.to_str(), "mode switch ignored while running");
            return false;
        }
        self.pending_start = None;
        self.state.mode = mode;
        self.state.remaining_seconds = seconds_for(mode, &self.settings);
        self.state.status = TimerStatus::Ready;
        self.emit_time();
        self.events.push(TimerEvent::Status(STATUS_READY));
        self.events.push(TimerEvent::HighlightMode(mode));
        true
    }

    /// Fires every tick whose deadline is at or before `now`, then a due
    /// automatic start, in deadline order. Focus seconds from one poll are
    /// credited in a single write, and at most one alarm sounds per poll.
    pub fn poll(&mut self, now: Instant) {
        let mut batch = PollBatch::default();
        loop {
            if let Some(due) = self.next_tick.filter(|due| *due <= now) {
                self.next_tick = Some(due + TICK_INTERVAL);
                self.tick(due, &mut batch);
                continue;
            }
            if let Some(at) = self.pending_start.filter(|at| *at <= now) {
                self.start(at);
                continue;
            }
            break;
        }
        self.flush_focus(&mut batch);
    }

    fn tick(&mut self, at: Instant, batch: &mut PollBatch) {
        if !self.state.is_running() {
            return;
        }
        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.mode == Mode::Pomodoro {
            batch.focus_seconds += 1;
        }
        self.emit_time();

        if self.state.remaining_seconds == 0 {
            self.complete(at, batch);
        }
    }

    fn flush_focus(&mut self, batch: &mut PollBatch) {
        self.analytics.add_focus_seconds(std::mem::take(&mut batch.focus_seconds));
    }

    fn complete(&mut self, at: Instant, batch: &mut PollBatch) {
        let finished = self.state.mode;
        self.next_tick = None;
        self.state.status = TimerStatus::Completed;
        self.events.push(TimerEvent::Status(STATUS_COMPLETE));
        self.events.push(TimerEvent::Completed { mode: finished });
        tracing::info!(mode = finished.to_str(), "countdown finished");

        if batch.alarm_played {
            tracing::debug!(mode = finished.to_str(), "alarm already played during catch-up");
        } else {
            alarm::notify_completion(self.alarm.as_ref(), self.settings.alarm);
            batch.alarm_played = true;
        }

        let sessions_today = match finished {
            Mode::Pomodoro => {
                self.flush_focus(batch);
                self.analytics.record_session_completed()
            }
            Mode::Short | Mode::Long => 0,
        };

        if !self.settings.auto_next {
            return;
        }

        let next = advance::next_mode(finished, sessions_today);
        self.set_mode(next);
        self.events.push(TimerEvent::AutoAdvanced { next });
        self.pending_start = Some(at + AUTO_START_DELAY);
        tracing::info!(next = next.to_str(), sessions_today, "auto-advancing");
    }

    // ------------------------------------------------------------------------
    // Settings & analytics
    // ------------------------------------------------------------------------

    /// Explicit save action: persists `settings` and, unless a countdown is
    /// running, reloads the current mode's full length.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        if let Err(e) = store::save(self.storage.as_ref(), StoreKey::Settings, &self.settings) {
            tracing::warn!(error = %e, "could not persist settings");
        }

        if !self.state.is_running() {
            self.state.remaining_seconds = seconds_for(self.state.mode, &self.settings);
            self.state.status = TimerStatus::Ready;
            self.emit_time();
            self.events.push(TimerEvent::Status(STATUS_READY));
        }
    }

    pub fn last_7_days(&self) -> Vec<DayEntry> {
        self.analytics.last_7_days()
    }

    pub fn week_summary(&self) -> WeekSummary {
        self.analytics.week_summary()
    }

    pub fn clear_analytics(&mut self) {
        self.analytics.clear_all();
    }

    fn emit_time(&mut self) {
        self.events.push(TimerEvent::Time {
            minutes: self.state.minutes(),
            seconds: self.state.seconds(),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{
        alarm::testing::RecordingAlarm,
        clock::testing::{ManualClock, ymd},
        settings::AlarmKind,
        store::{KeyValueStore, MemoryStore},
    };

    struct Harness {
        engine: Engine,
        clock: Arc<ManualClock>,
        storage: Arc<MemoryStore>,
        alarm: RecordingAlarm,
        now: Instant,
    }

    impl Harness {
        fn new(settings: Settings) -> Self {
            let clock = Arc::new(ManualClock::new(ymd(2026, 10, 16)));
            let storage = Arc::new(MemoryStore::new());
            let alarm = RecordingAlarm::default();
            let engine = Engine::with_settings(
                settings,
                storage.clone(),
                clock.clone(),
                Box::new(alarm.clone()),
            );
            Self {
                engine,
                clock,
                storage,
                alarm,
                now: Instant::now(),
            }
        }

        fn start(&mut self) {
            self.engine.start(self.now);
        }

        /// Polls once per second for `secs` seconds.
        fn advance(&mut self, secs: u64) {
            for _ in 0..secs {
                self.now += Duration::from_secs(1);
                self.engine.poll(self.now);
            }
        }

        fn advance_ms(&mut self, ms: u64) {
            self.now += Duration::from_millis(ms);
            self.engine.poll(self.now);
        }
    }

    fn minutes(pomodoro: u32, short: u32, long: u32, auto_next: bool) -> Settings {
        Settings {
            pomodoro_minutes: pomodoro,
            short_minutes: short,
            long_minutes: long,
            alarm: AlarmKind::Bell,
            auto_next,
        }
    }

    fn time_events(events: &[TimerEvent]) -> Vec<u32> {
        events
            .iter()
            .filter_map(|e| match e {
                TimerEvent::Time { minutes, seconds } => Some(minutes * 60 + seconds),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_initial_state_is_ready_pomodoro() {
        let mut h = Harness::new(minutes(25, 5, 15, false));
        let state = h.engine.state();
        assert_eq!(state.mode, Mode::Pomodoro);
        assert_eq!(state.remaining_seconds, 1500);
        assert_eq!(state.status, TimerStatus::Ready);
        assert!(h.engine.drain_events().contains(&TimerEvent::Status(STATUS_READY)));
    }

    #[test]
    fn test_start_while_running_is_a_no_op() {
        let mut h = Harness::new(minutes(25, 5, 15, false));
        h.start();
        h.advance(3);
        let before = h.engine.state();
        h.engine.drain_events();

        h.engine.start(h.now);
        assert_eq!(h.engine.state(), before);
        assert!(h.engine.drain_events().is_empty());

        // the existing tick schedule is untouched
        h.advance_ms(1000);
        assert_eq!(h.engine.state().remaining_seconds, before.remaining_seconds - 1);
    }

    #[test]
    fn test_full_countdown_is_exactly_n_ticks() {
        let mut h = Harness::new(minutes(1, 5, 15, false));
        h.start();
        h.engine.drain_events();

        h.advance(60);
        let times = time_events(&h.engine.drain_events());
        assert_eq!(times, (0..60).rev().collect::<Vec<u32>>());

        let state = h.engine.state();
        assert_eq!(state.remaining_seconds, 0);
        assert!(!state.is_running());
        assert_eq!(state.status, TimerStatus::Completed);

        h.advance(5);
        assert!(time_events(&h.engine.drain_events()).is_empty());
        assert_eq!(h.alarm.played(), vec![AlarmKind::Bell]);
    }

    #[test]
    fn test_uneven_polling_gives_one_tick_per_second() {
        let mut h = Harness::new(minutes(25, 5, 15, false));
        h.start();
        for _ in 0..30 {
            h.advance_ms(300);
        }
        // 9 s elapsed
        assert_eq!(h.engine.state().remaining_seconds, 1500 - 9);

        h.advance_ms(10_500);
        assert_eq!(h.engine.state().remaining_seconds, 1500 - 19);
        assert_eq!(h.engine.analytics().today().focus_seconds, 19);
    }

    #[test]
    fn test_late_poll_catches_up_through_completion() {
        let mut h = Harness::new(minutes(1, 1, 1, false));
        h.start();
        h.advance_ms(3_600_000);
        let state = h.engine.state();
        assert_eq!(state.status, TimerStatus::Completed);
        assert_eq!(state.remaining_seconds, 0);
        assert_eq!(h.engine.analytics().today().focus_seconds, 60);
        assert_eq!(h.engine.analytics().today().completed_sessions, 1);
    }

    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: AtomicUsize,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: StoreKey) -> crate::Result<Option<String>> {
            self.inner.get(key)
        }
        fn set(&self, key: StoreKey, value: &str) -> crate::Result<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value)
        }
        fn remove(&self, key: StoreKey) -> crate::Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_stalled_poll_writes_focus_once() {
        let storage = Arc::new(CountingStore::default());
        let mut engine = Engine::with_settings(
            minutes(25, 5, 15, false),
            storage.clone(),
            Arc::new(ManualClock::new(ymd(2026, 10, 16))),
            Box::new(RecordingAlarm::default()),
        );
        let t0 = Instant::now();
        engine.start(t0);
        engine.poll(t0 + Duration::from_secs(600));

        assert_eq!(engine.state().remaining_seconds, 900);
        assert_eq!(engine.analytics().today().focus_seconds, 600);
        assert_eq!(storage.writes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stalled_poll_sounds_one_alarm() {
        let mut h = Harness::new(minutes(1, 1, 1, true));
        h.start();
        // 5 pomodoros, 3 short breaks and a long break fit in 600 s
        h.advance_ms(600_000);

        let today = h.engine.analytics().today();
        assert_eq!(today.completed_sessions, 5);
        assert_eq!(today.focus_seconds, 300);
        assert_eq!(h.alarm.played(), vec![AlarmKind::Bell]);

        let reloaded = Aggregator::load(h.storage.clone(), h.clock.clone());
        assert_eq!(reloaded.today().focus_seconds, 300);
    }

    #[test]
    fn test_pause_preserves_remaining_and_cancels_ticks() {
        let mut h = Harness::new(minutes(25, 5, 15, false));
        h.start();
        h.advance(10);
        h.engine.pause();
        assert_eq!(h.engine.state().status, TimerStatus::Paused);

        h.advance(30);
        assert_eq!(h.engine.state().remaining_seconds, 1490);

        h.start();
        assert_eq!(h.engine.state().remaining_seconds, 1490);
        h.advance(1);
        assert_eq!(h.engine.state().remaining_seconds, 1489);
    }

    #[test]
    fn test_reset_cancels_pending_tick() {
        let mut h = Harness::new(minutes(25, 5, 15, false));
        h.start();
        h.advance(5);
        h.advance_ms(900);
        h.engine.reset();

        h.advance_ms(200);
        let state = h.engine.state();
        assert_eq!(state.remaining_seconds, 1500);
        assert_eq!(state.status, TimerStatus::Ready);
        assert_eq!(h.engine.analytics().today().focus_seconds, 5);
    }

    #[test]
    fn test_set_mode_rejected_while_running() {
        let mut h = Harness::new(minutes(25, 5, 15, false));
        h.start();
        h.advance(2);
        assert!(!h.engine.set_mode(Mode::Long));
        assert_eq!(h.engine.state().mode, Mode::Pomodoro);
        assert_eq!(h.engine.state().remaining_seconds, 1498);

        h.engine.pause();
        assert!(h.engine.set_mode(Mode::Long));
        let state = h.engine.state();
        assert_eq!(state.mode, Mode::Long);
        assert_eq!(state.remaining_seconds, 900);
        assert_eq!(state.status, TimerStatus::Ready);
    }

    #[test]
    fn test_breaks_never_count_focus_time() {
        let mut h = Harness::new(minutes(25, 1, 15, false));
        h.engine.set_mode(Mode::Short);
        h.start();
        h.advance(60);

        let today = h.engine.analytics().today();
        assert_eq!(h.engine.state().status, TimerStatus::Completed);
        assert_eq!(today.focus_seconds, 0);
        assert_eq!(today.completed_sessions, 0);
        assert_eq!(h.storage.get(StoreKey::Analytics).unwrap(), None);
    }

    #[test]
    fn test_end_to_end_auto_next_pomodoro() {
        let mut h = Harness::new(minutes(25, 5, 15, true));
        h.start();
        h.advance(1500);

        let events = h.engine.drain_events();
        assert!(events.contains(&TimerEvent::Completed { mode: Mode::Pomodoro }));
        assert!(events.contains(&TimerEvent::AutoAdvanced { next: Mode::Short }));
        assert!(events.contains(&TimerEvent::HighlightMode(Mode::Short)));

        let today = h.engine.analytics().today();
        assert_eq!(today.completed_sessions, 1);
        assert_eq!(today.minutes(), 25);

        let state = h.engine.state();
        assert_eq!(state.mode, Mode::Short);
        assert_eq!(state.remaining_seconds, 300);
        assert!(!state.is_running());
        assert!(h.engine.is_auto_start_pending());

        h.advance_ms(599);
        assert!(!h.engine.state().is_running());
        h.advance_ms(1);
        let state = h.engine.state();
        assert!(state.is_running());
        assert_eq!(state.remaining_seconds, 300);
        assert!(!h.engine.is_auto_start_pending());
    }

    #[test]
    fn test_auto_next_cycle_reaches_long_on_fourth() {
        let mut h = Harness::new(minutes(1, 1, 1, true));
        h.start();

        let expected = [
            Mode::Short,
            Mode::Pomodoro,
            Mode::Short,
            Mode::Pomodoro,
            Mode::Short,
            Mode::Pomodoro,
            Mode::Long,
            Mode::Pomodoro,
        ];
        for next in expected {
            h.advance(60);
            assert_eq!(h.engine.state().mode, next);
            h.advance_ms(600);
            assert!(h.engine.state().is_running());
        }
        assert_eq!(h.engine.analytics().today().completed_sessions, 4);
        assert_eq!(h.engine.analytics().today().minutes(), 4);
    }

    #[test]
    fn test_without_auto_next_stays_at_zero() {
        let mut h = Harness::new(minutes(1, 5, 15, false));
        h.start();
        h.advance(60);
        h.advance(10);

        let state = h.engine.state();
        assert_eq!(state.mode, Mode::Pomodoro);
        assert_eq!(state.remaining_seconds, 0);
        assert_eq!(state.status, TimerStatus::Completed);
        assert!(!h.engine.is_auto_start_pending());
        assert_eq!(h.engine.analytics().today().completed_sessions, 1);

        h.start();
        assert_eq!(h.engine.state().remaining_seconds, 60);
        assert!(h.engine.state().is_running());
    }

    #[test]
    fn test_manual_mode_switch_cancels_auto_start() {
        let mut h = Harness::new(minutes(1, 5, 15, true));
        h.start();
        h.advance(60);
        assert!(h.engine.is_auto_start_pending());

        h.engine.set_mode(Mode::Long);
        h.advance(2);
        assert!(!h.engine.state().is_running());
        assert_eq!(h.engine.state().mode, Mode::Long);
    }

    #[test]
    fn test_failing_alarm_does_not_disturb_countdown() {
        let clock = Arc::new(ManualClock::new(ymd(2026, 10, 16)));
        let alarm = RecordingAlarm::failing();
        let mut engine = Engine::with_settings(
            minutes(1, 1, 1, true),
            Arc::new(MemoryStore::new()),
            clock,
            Box::new(alarm.clone()),
        );
        let t0 = Instant::now();
        engine.start(t0);
        engine.poll(t0 + Duration::from_secs(60));
        engine.poll(t0 + Duration::from_millis(60_600));

        assert_eq!(alarm.played(), vec![AlarmKind::Bell]);
        assert_eq!(engine.state().mode, Mode::Short);
        assert!(engine.state().is_running());
    }

    #[test]
    fn test_midnight_split_through_engine() {
        let mut h = Harness::new(minutes(25, 5, 15, false));
        h.start();
        h.advance(120);
        h.clock.set(ymd(2026, 10, 17));
        h.advance(180);

        let days = &h.engine.analytics().data().days;
        assert_eq!(days["2026-10-16"].focus_seconds, 120);
        assert_eq!(days["2026-10-17"].focus_seconds, 180);
    }

    #[test]
    fn test_apply_settings_refreshes_idle_countdown() {
        let mut h = Harness::new(minutes(25, 5, 15, false));
        h.engine.apply_settings(minutes(50, 10, 30, true));
        assert_eq!(h.engine.state().remaining_seconds, 3000);

        let reloaded: Settings = store::load_or_default(&*h.storage, StoreKey::Settings);
        assert_eq!(reloaded.pomodoro_minutes, 50);
        assert!(reloaded.auto_next);
    }

    #[test]
    fn test_apply_settings_leaves_running_countdown() {
        let mut h = Harness::new(minutes(25, 5, 15, false));
        h.start();
        h.advance(10);
        h.engine.apply_settings(minutes(50, 10, 30, false));
        assert_eq!(h.engine.state().remaining_seconds, 1490);
        assert!(h.engine.state().is_running());
    }

    #[test]
    fn test_engine_new_reads_persisted_settings() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(StoreKey::Settings, r#"{"pomodoro_minutes": 40, "alarm": "digital"}"#)
            .unwrap();
        let engine = Engine::new(
            storage,
            Arc::new(ManualClock::new(ymd(2026, 10, 16))),
            Box::new(RecordingAlarm::default()),
        );
        assert_eq!(engine.state().remaining_seconds, 2400);
        assert_eq!(engine.settings().alarm, AlarmKind::Digital);
        assert_eq!(engine.settings().short_minutes, 5);
    }

    #[test]
    fn test_clear_analytics_zeroes_week() {
        let mut h = Harness::new(minutes(1, 5, 15, false));
        h.start();
        h.advance(60);
        assert_eq!(h.engine.week_summary().week_sessions, 1);

        h.engine.clear_analytics();
        assert!(h.engine.last_7_days().iter().all(|d| d.record.focus_seconds == 0));
        assert_eq!(h.engine.week_summary().week_minutes, 0);
    }

    #[derive(Default)]
    struct Screen {
        time: Option<(u32, u32)>,
        status: String,
        highlighted: Option<Mode>,
    }

    impl RenderSink for Screen {
        fn render_time(&mut self, minutes: u32, seconds: u32) {
            self.time = Some((minutes, seconds));
        }
        fn set_status(&mut self, status: &str) {
            self.status = status.to_string();
        }
        fn highlight_mode(&mut self, mode: Mode) {
            self.highlighted = Some(mode);
        }
    }

    #[test]
    fn test_events_drive_render_sink() {
        let mut h = Harness::new(minutes(25, 5, 15, false));
        h.engine.set_mode(Mode::Short);
        h.start();
        h.advance(1);

        let mut screen = Screen::default();
        for event in h.engine.drain_events() {
            event.dispatch(&mut screen);
        }
        assert_eq!(screen.time, Some((4, 59)));
        assert_eq!(screen.status, STATUS_BREAK);
        assert_eq!(screen.highlighted, Some(Mode::Short));
    }
}
