//! Streaming biquad filter.
//!
//! The filter keeps one set of delay lines per channel and applies the direct-form-I
//! difference equation to each block in place. Coefficients are resolved at the start
//! of every block, so frequency, detune, Q and gain may all change over time.

use super::{Coefficients, FilterOptions, FilterType, MAX_GAIN_DB, MAX_RESONANCE_DB, design};
use crate::{AudioBlock, FilterError, Param, Processor, StreamContext, StreamFormat};
use log::{debug, trace, warn};

/// Delay lines for one channel: the last two inputs and the last two outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelState {
    pub x1: f64, // Input at t-1
    pub x2: f64, // Input at t-2
    pub y1: f64, // Output at t-1
    pub y2: f64, // Output at t-2
}

impl ChannelState {
    /// Filters `samples` in place.
    ///
    /// The state is copied into locals for the loop and written back once at the end,
    /// so the loop always works from one consistent snapshot.
    pub fn run(&mut self, c: &Coefficients, samples: &mut [f64]) {
        let Coefficients { b0, b1, b2, a1, a2 } = *c;
        let ChannelState {
            mut x1,
            mut x2,
            mut y1,
            mut y2,
        } = *self;

        for sample in samples.iter_mut() {
            let x = *sample;

            // y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
            let y = b0 * x + b1 * x1 + b2 * x2 - a1 * y1 - a2 * y2;
            *sample = y;

            x2 = x1;
            x1 = x;
            y2 = y1;
            y1 = y;
        }

        *self = ChannelState { x1, x2, y1, y2 };
    }
}

/// Parameter values resolved for one block, after normalization and clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Resolved {
    filter_type: FilterType,
    frequency: f64,
    q: f64,
    gain: f64,
}

/// A multi-channel biquad filter driven one block at a time.
///
/// Each parameter is a [`Param`]: a fixed number or a function of elapsed stream time.
/// Time-varying parameters are sampled once per block at the block's start time.
///
/// Channel state is allocated once for the channel count in the [`StreamFormat`].
/// Blocks with more channels than that have the extra channels left untouched.
///
/// # Examples
///
/// ```
/// use audio_biquad::{AudioBuffer, BiquadFilter, Param, StreamContext, StreamFormat};
///
/// let format = StreamFormat::new(44100.0, 2).unwrap();
/// let mut filter = BiquadFilter::lowpass(format, 1000.0, 0.0)
///     .unwrap()
///     .with_frequency(Param::time_varying(|t| 500.0 + 1000.0 * t));
///
/// let mut block = AudioBuffer::new(2, 512);
/// filter.process(&mut block, &StreamContext::new(format)).unwrap();
/// ```
pub struct BiquadFilter {
    filter_type: FilterType,
    frequency: Param,
    detune: Param,
    q: Param,
    gain: Param,

    format: StreamFormat,
    coefficients: Coefficients,

    // Skips redesign when nothing changed since the last block
    last_resolved: Option<Resolved>,

    state: Box<[ChannelState]>,
}

impl BiquadFilter {
    /// Creates a filter with fixed parameters taken from `options`.
    ///
    /// Coefficients are computed immediately for time zero.
    ///
    /// # Errors
    ///
    /// Fails with [`FilterError::NonFiniteParameter`] if any option is NaN or infinite.
    pub fn new(options: FilterOptions, format: StreamFormat) -> Result<Self, FilterError> {
        let mut filter = Self {
            filter_type: options.filter_type,
            frequency: options.frequency.into(),
            detune: options.detune.into(),
            q: options.q.into(),
            gain: options.gain.into(),
            format,
            coefficients: Coefficients::IDENTITY,
            last_resolved: None,
            state: vec![ChannelState::default(); format.channels()].into_boxed_slice(),
        };

        debug!(
            "biquad: {} filter for {} channel(s) at {} Hz",
            filter.filter_type,
            format.channels(),
            format.sample_rate()
        );

        filter.update(0.0)?;
        Ok(filter)
    }

    /// Creates a resonant low-pass filter.
    ///
    /// # Arguments
    ///
    /// * `format` - Stream sample rate and channel count
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `resonance` - Height of the resonance peak in dB (0 = no peak)
    pub fn lowpass(format: StreamFormat, cutoff: f64, resonance: f64) -> Result<Self, FilterError> {
        Self::with_settings(FilterType::LowPass, format, cutoff, resonance, 0.0)
    }

    /// Creates a resonant high-pass filter.
    ///
    /// # Arguments
    ///
    /// * `format` - Stream sample rate and channel count
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `resonance` - Height of the resonance peak in dB (0 = no peak)
    pub fn highpass(
        format: StreamFormat,
        cutoff: f64,
        resonance: f64,
    ) -> Result<Self, FilterError> {
        Self::with_settings(FilterType::HighPass, format, cutoff, resonance, 0.0)
    }

    /// Creates a low-shelf filter boosting or cutting below `frequency` by `gain` dB.
    pub fn lowshelf(format: StreamFormat, frequency: f64, gain: f64) -> Result<Self, FilterError> {
        Self::with_settings(FilterType::LowShelf, format, frequency, 1.0, gain)
    }

    /// Creates a high-shelf filter boosting or cutting above `frequency` by `gain` dB.
    pub fn highshelf(format: StreamFormat, frequency: f64, gain: f64) -> Result<Self, FilterError> {
        Self::with_settings(FilterType::HighShelf, format, frequency, 1.0, gain)
    }

    /// Creates a peaking EQ band.
    ///
    /// # Arguments
    ///
    /// * `format` - Stream sample rate and channel count
    /// * `center` - Center frequency in Hz
    /// * `q` - Bandwidth control; higher = narrower
    /// * `gain` - Boost (positive) or cut (negative) in dB
    pub fn peaking(
        format: StreamFormat,
        center: f64,
        q: f64,
        gain: f64,
    ) -> Result<Self, FilterError> {
        Self::with_settings(FilterType::Peaking, format, center, q, gain)
    }

    /// Creates a notch (band-reject) filter.
    pub fn notch(format: StreamFormat, center: f64, q: f64) -> Result<Self, FilterError> {
        Self::with_settings(FilterType::Notch, format, center, q, 0.0)
    }

    /// Creates an all-pass filter. Useful for phaser effects.
    pub fn allpass(format: StreamFormat, frequency: f64, q: f64) -> Result<Self, FilterError> {
        Self::with_settings(FilterType::AllPass, format, frequency, q, 0.0)
    }

    /// Creates a band-pass filter with unity gain at the center.
    pub fn bandpass(format: StreamFormat, center: f64, q: f64) -> Result<Self, FilterError> {
        Self::with_settings(FilterType::BandPass, format, center, q, 0.0)
    }

    fn with_settings(
        filter_type: FilterType,
        format: StreamFormat,
        frequency: f64,
        q: f64,
        gain: f64,
    ) -> Result<Self, FilterError> {
        let options = FilterOptions {
            filter_type,
            frequency,
            q,
            gain,
            ..FilterOptions::default()
        };
        Self::new(options, format)
    }

    /// Replaces the frequency (Hz). Takes effect at the next block.
    pub fn with_frequency(mut self, frequency: impl Into<Param>) -> Self {
        self.set_frequency(frequency);
        self
    }

    /// Replaces the detune (cents). Takes effect at the next block.
    pub fn with_detune(mut self, detune: impl Into<Param>) -> Self {
        self.set_detune(detune);
        self
    }

    /// Replaces Q. Takes effect at the next block.
    pub fn with_q(mut self, q: impl Into<Param>) -> Self {
        self.set_q(q);
        self
    }

    /// Replaces the gain (dB). Takes effect at the next block.
    pub fn with_gain(mut self, gain: impl Into<Param>) -> Self {
        self.set_gain(gain);
        self
    }

    pub fn set_frequency(&mut self, frequency: impl Into<Param>) {
        self.frequency = frequency.into();
    }

    pub fn set_detune(&mut self, detune: impl Into<Param>) {
        self.detune = detune.into();
    }

    pub fn set_q(&mut self, q: impl Into<Param>) {
        self.q = q.into();
    }

    pub fn set_gain(&mut self, gain: impl Into<Param>) {
        self.gain = gain.into();
    }

    /// Switches the response. Channel state is kept, so the switch is click-free only
    /// as far as the two responses agree.
    pub fn set_type(&mut self, filter_type: FilterType) {
        if filter_type != self.filter_type {
            debug!("biquad: type {} -> {}", self.filter_type, filter_type);
            self.filter_type = filter_type;
        }
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn format(&self) -> StreamFormat {
        self.format
    }

    /// Coefficients used for the most recent block.
    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    /// Delay-line state of one channel.
    pub fn channel_state(&self, channel: usize) -> Option<ChannelState> {
        self.state.get(channel).copied()
    }

    /// Clears every channel's delay lines.
    pub fn reset(&mut self) {
        self.state.fill(ChannelState::default());
    }

    /// Resolves all parameters at `elapsed` seconds and recomputes the coefficients.
    ///
    /// Called automatically at the start of every block; call it directly to inspect
    /// the coefficients at a given time.
    ///
    /// # Errors
    ///
    /// Fails with [`FilterError::NonFiniteParameter`] if a parameter resolves to NaN or
    /// infinity, and with [`FilterError::NonFiniteCoefficients`] if finite settings
    /// still overflow the design. The previous coefficients are kept in both cases.
    pub fn update(&mut self, elapsed: f64) -> Result<(), FilterError> {
        let frequency = resolve("frequency", &self.frequency, elapsed)?;
        let detune = resolve("detune", &self.detune, elapsed)?;
        let q = resolve("Q", &self.q, elapsed)?;
        let gain = resolve("gain", &self.gain, elapsed)?;

        let mut normalized = frequency / self.format.nyquist();
        if detune != 0.0 {
            normalized *= 2.0_f64.powf(detune / 1200.0);
        }

        let resolved = Resolved {
            filter_type: self.filter_type,
            frequency: normalized.clamp(0.0, 1.0),
            q: q.max(0.0),
            gain,
        };

        if self.last_resolved == Some(resolved) {
            return Ok(());
        }

        if !(0.0..=1.0).contains(&normalized) {
            warn!(
                "biquad: frequency {:.1} Hz (detune {} cents) is outside [0, {}] Hz; clamped",
                frequency,
                detune,
                self.format.nyquist()
            );
        }

        if resolved.filter_type.uses_gain() && gain.abs() > MAX_GAIN_DB {
            warn!("biquad: gain {gain} dB is outside ±{MAX_GAIN_DB} dB; clamped");
        }
        if matches!(resolved.filter_type, FilterType::LowPass | FilterType::HighPass)
            && resolved.q > MAX_RESONANCE_DB
        {
            warn!("biquad: resonance {q} dB is above {MAX_RESONANCE_DB} dB; clamped");
        }

        let coefficients = design(
            resolved.filter_type,
            resolved.frequency,
            resolved.q,
            resolved.gain,
        );
        if !coefficients.is_finite() {
            return Err(FilterError::NonFiniteCoefficients {
                filter_type: resolved.filter_type,
                frequency: resolved.frequency,
                q: resolved.q,
                gain: resolved.gain,
            });
        }
        self.coefficients = coefficients;
        self.last_resolved = Some(resolved);

        trace!("biquad: t={elapsed:.4}s {resolved:?} -> {:?}", self.coefficients);
        Ok(())
    }

    /// Filters one block in place.
    ///
    /// Coefficients are first resolved at `ctx.elapsed()`. Then every channel below
    /// `min(block.channel_count(), format.channels())` is filtered with its own state;
    /// any further channels are left untouched.
    ///
    /// # Errors
    ///
    /// * [`FilterError::NonFiniteParameter`] or [`FilterError::NonFiniteCoefficients`]
    ///   if the coefficients cannot be resolved; the block is not modified.
    /// * [`FilterError::MissingChannel`] if the block has no data for a channel it
    ///   reports. Channels before it have already been filtered.
    pub fn process<B: AudioBlock + ?Sized>(
        &mut self,
        block: &mut B,
        ctx: &StreamContext,
    ) -> Result<(), FilterError> {
        self.update(ctx.elapsed())?;

        let channels = block.channel_count().min(self.state.len());
        let coefficients = self.coefficients;

        for (index, state) in self.state.iter_mut().enumerate().take(channels) {
            let samples = block
                .channel_mut(index)
                .ok_or(FilterError::MissingChannel { index })?;
            state.run(&coefficients, samples);
        }

        Ok(())
    }
}

impl Processor for BiquadFilter {
    fn process(
        &mut self,
        block: &mut dyn AudioBlock,
        ctx: &StreamContext,
    ) -> Result<(), FilterError> {
        BiquadFilter::process(self, block, ctx)
    }
}

impl std::fmt::Debug for BiquadFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiquadFilter")
            .field("filter_type", &self.filter_type)
            .field("frequency", &self.frequency)
            .field("detune", &self.detune)
            .field("q", &self.q)
            .field("gain", &self.gain)
            .field("format", &self.format)
            .field("coefficients", &self.coefficients)
            .finish_non_exhaustive()
    }
}

fn resolve(name: &'static str, param: &Param, elapsed: f64) -> Result<f64, FilterError> {
    let value = param.value_at(elapsed);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FilterError::NonFiniteParameter { name, value })
    }
}
