//! Deterministic test sources: a sine oscillator and a unit impulse.

use super::Signal;
use std::f64::consts::PI;

/// A sine wave oscillator.
///
/// Keeps phase continuity across calls to `next_sample()`, so consecutive blocks
/// filled from the same oscillator form one continuous waveform.
#[derive(Debug, Clone)]
pub struct SineOscillator {
    /// Current phase of the oscillator (0.0 to 1.0)
    phase: f64,
    /// Phase increment per sample (frequency / sample_rate)
    phase_increment: f64,
}

impl SineOscillator {
    /// Creates a new sine oscillator.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Frequency of the sine wave in Hz
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Examples
    ///
    /// ```
    /// use audio_biquad::{Signal, SineOscillator};
    ///
    /// let mut osc = SineOscillator::new(440.0, 44100.0);
    /// assert_eq!(osc.next_sample(), 0.0);
    /// ```
    pub fn new(frequency: f64, sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            phase_increment: frequency / sample_rate,
        }
    }
}

impl Signal for SineOscillator {
    fn next_sample(&mut self) -> f64 {
        let sample = (self.phase * 2.0 * PI).sin();

        // Wrap to [0.0, 1.0)
        self.phase += self.phase_increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        sample
    }
}

/// A unit impulse: `1.0` on the first sample, `0.0` afterwards.
#[derive(Debug, Clone, Default)]
pub struct Impulse {
    fired: bool,
}

impl Impulse {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Signal for Impulse {
    fn next_sample(&mut self) -> f64 {
        if self.fired {
            0.0
        } else {
            self.fired = true;
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_quarter_period() {
        let mut osc = SineOscillator::new(1.0, 4.0);
        let samples: Vec<f64> = (0..4).map(|_| osc.next_sample()).collect();
        assert!(samples[0].abs() < 1e-12);
        assert!((samples[1] - 1.0).abs() < 1e-12);
        assert!(samples[2].abs() < 1e-12);
        assert!((samples[3] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sine_is_continuous_across_buffers() {
        let mut whole = SineOscillator::new(440.0, 44100.0);
        let mut split = SineOscillator::new(440.0, 44100.0);

        let mut expected = vec![0.0; 64];
        whole.process(&mut expected);

        let mut first = vec![0.0; 20];
        let mut second = vec![0.0; 44];
        split.process(&mut first);
        split.process(&mut second);

        first.extend(second);
        assert_eq!(first, expected);
    }

    #[test]
    fn test_impulse_fires_once() {
        let mut impulse = Impulse::new();
        let mut buffer = vec![9.0; 5];
        impulse.process(&mut buffer);
        assert_eq!(buffer, vec![1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(impulse.next_sample(), 0.0);
    }
}
