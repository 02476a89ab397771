use std::{
    fs,
    path::PathBuf,
    process::{Command, Stdio},
};

use notify_rust::{Notification, Urgency};

use crate::{
    error::{Error, Result},
    settings::AlarmKind,
    synth::{self, Tone},
};

const SOFT: &[Tone] = &[Tone::new(0, 660.0, 120, 0.08), Tone::new(160, 880.0, 100, 0.06)];
const BELL: &[Tone] = &[
    Tone::new(0, 880.0, 180, 0.10),
    Tone::new(220, 660.0, 160, 0.08),
    Tone::new(460, 990.0, 120, 0.06),
];
const DIGITAL: &[Tone] = &[
    Tone::new(0, 1046.0, 80, 0.10),
    Tone::new(100, 1046.0, 80, 0.10),
    Tone::new(220, 1318.0, 100, 0.08),
];

const PLAYERS: &[&str] = &["paplay", "aplay", "afplay"];

impl AlarmKind {
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            Self::Soft => SOFT,
            Self::Bell => BELL,
            Self::Digital => DIGITAL,
            Self::None => &[],
        }
    }
}

/// Audio collaborator. Playback is fire-and-forget; implementations
/// must not block the caller.
pub trait AlarmPlayer: Send {
    fn play_alarm(&self, kind: AlarmKind) -> Result<()>;
}

/// Plays the alarm for a finished countdown. Failures never reach the
/// state machine.
pub fn notify_completion(player: &dyn AlarmPlayer, kind: AlarmKind) {
    if kind == AlarmKind::None {
        return;
    }
    if let Err(e) = player.play_alarm(kind) {
        tracing::warn!(alarm = kind.to_str(), error = %e, "alarm playback failed");
    }
}

// ============================================================================
// Implementations
// ============================================================================

pub struct SilentAlarm;

impl AlarmPlayer for SilentAlarm {
    fn play_alarm(&self, _kind: AlarmKind) -> Result<()> {
        Ok(())
    }
}

/// Desktop notification plus the synthesized tone through whichever
/// command-line player the system has.
pub struct SystemAlarm {
    cache_dir: PathBuf,
}

impl SystemAlarm {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    fn wav_path(&self, kind: AlarmKind) -> Result<PathBuf> {
        let path = self.cache_dir.join(format!("alarm-{}.wav", kind.to_str()));
        if !path.exists() {
            fs::create_dir_all(&self.cache_dir).map_err(|e| Error::io(&self.cache_dir, e))?;
            synth::write_wav(&path, kind.tones())?;
        }
        Ok(path)
    }
}

impl AlarmPlayer for SystemAlarm {
    fn play_alarm(&self, kind: AlarmKind) -> Result<()> {
        if let Err(e) = Notification::new()
            .summary("Session complete ⏰")
            .body("Time is up.")
            .appname("bluehour")
            .icon("alarm-clock")
            .urgency(Urgency::Critical)
            .show()
        {
            tracing::debug!(error = %e, "desktop notification unavailable");
        }

        let path = self.wav_path(kind)?;
        for player in PLAYERS {
            let spawned = Command::new(player)
                .arg(&path)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();
            if let Ok(mut child) = spawned {
                std::thread::spawn(move || {
                    let _ = child.wait();
                });
                return Ok(());
            }
        }
        Err(Error::Audio("no audio player found".into()))
    }
}
