//! Renders alarm tone patterns into a mono 16-bit PCM WAV.

use std::{f64::consts::TAU, path::Path};

use crate::error::{Error, Result};

pub const SAMPLE_RATE: u32 = 22_050;
const FADE_MS: f64 = 5.0;
const TAIL_MS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub offset_ms: u32,
    pub freq_hz: f64,
    pub duration_ms: u32,
    pub gain: f64,
}

impl Tone {
    pub const fn new(offset_ms: u32, freq_hz: f64, duration_ms: u32, gain: f64) -> Self {
        Self {
            offset_ms,
            freq_hz,
            duration_ms,
            gain,
        }
    }

    fn end_ms(&self) -> u32 {
        self.offset_ms + self.duration_ms
    }
}

fn ms_to_samples(ms: f64) -> usize {
    (ms * SAMPLE_RATE as f64 / 1000.0).round() as usize
}

pub fn render_samples(tones: &[Tone]) -> Vec<i16> {
    let total_ms = tones.iter().map(Tone::end_ms).max().unwrap_or(0) + TAIL_MS;
    let mut mix = vec![0.0f64; ms_to_samples(total_ms as f64)];
    let fade = ms_to_samples(FADE_MS).max(1);

    for tone in tones {
        let start = ms_to_samples(tone.offset_ms as f64);
        let len = ms_to_samples(tone.duration_ms as f64);
        for i in 0..len {
            let Some(slot) = mix.get_mut(start + i) else {
                break;
            };
            let envelope = (i.min(len - 1 - i) as f64 / fade as f64).min(1.0);
            let t = i as f64 / SAMPLE_RATE as f64;
            *slot += (TAU * tone.freq_hz * t).sin() * tone.gain * envelope;
        }
    }

    mix.into_iter()
        .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f64) as i16)
        .collect()
}

/// Writes the rendered pattern to `path` as a mono 16-bit PCM WAV.
pub fn write_wav(path: &Path, tones: &[Tone]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| Error::Audio(format!("failed to create {}: {}", path.display(), e)))?;
    for sample in render_samples(tones) {
        writer
            .write_sample(sample)
            .map_err(|e| Error::Audio(format!("failed to write sample: {}", e)))?;
    }
    writer
        .finalize()
        .map_err(|e| Error::Audio(format!("failed to finalize {}: {}", path.display(), e)))
}
