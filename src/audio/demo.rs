//! Synthetic stereo signal shown before any file is loaded.

use std::f64::consts::TAU;
use wavescope_core::{SampleBuffer, WaveformError};

pub const DEMO_SAMPLE_RATE: u32 = 44_100;

/// Left: a linear chirp from 110 Hz to 3.5 kHz under a slow tremolo.
/// Right: 440 Hz tone bursts, a quarter second on and a quarter off.
pub fn demo_buffer(sample_rate: u32, seconds: f64) -> Result<SampleBuffer, WaveformError> {
    let rate = sample_rate as f64;
    let frames = (rate * seconds.max(0.0)).round() as usize;
    let (f0, f1) = (110.0, 3_500.0);
    let sweep = (f1 - f0) / seconds.max(f64::EPSILON);

    let left = (0..frames)
        .map(|n| {
            let t = n as f64 / rate;
            let phase = TAU * (f0 * t + 0.5 * sweep * t * t);
            let tremolo = 0.55 + 0.35 * (TAU * 0.5 * t).cos();
            (phase.sin() * tremolo) as f32
        })
        .collect();

    let burst = (rate * 0.25) as usize;
    let right = (0..frames)
        .map(|n| {
            if burst == 0 || (n / burst) % 2 == 1 {
                return 0.0;
            }
            let t = n as f64 / rate;
            // short fade keeps the burst edges from clicking
            let pos = (n % burst) as f64 / burst as f64;
            let fade = (pos * 20.0).min((1.0 - pos) * 20.0).min(1.0);
            (0.8 * fade * (TAU * 440.0 * t).sin()) as f32
        })
        .collect();

    SampleBuffer::from_channels(vec![left, right])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavescope_core::{SampleSource, MIN_SAMPLES_IN_VIEWPORT};

    #[test]
    fn test_demo_shape() {
        let buf = demo_buffer(DEMO_SAMPLE_RATE, 2.0).unwrap();
        assert_eq!(buf.channel_count(), 2);
        assert_eq!(buf.len(), 88_200);
        assert!(buf.len() > MIN_SAMPLES_IN_VIEWPORT);
    }

    #[test]
    fn test_demo_amplitudes_in_range() {
        let buf = demo_buffer(8_000, 1.0).unwrap();
        for ch in 0..buf.channel_count() {
            assert!(buf.channel(ch).iter().all(|s| s.abs() <= 1.0));
        }
    }

    #[test]
    fn test_right_channel_gaps_are_silent() {
        let buf = demo_buffer(8_000, 1.0).unwrap();
        let right = buf.channel(1);
        // second quarter second is an off period
        assert!(right[2_000..4_000].iter().all(|&s| s == 0.0));
        assert!(right[..2_000].iter().any(|&s| s.abs() > 0.5));
    }
}
