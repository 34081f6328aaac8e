//! Block-at-a-time stream driver.
//!
//! A [`Stream`] owns the running sample count and hands each block, together with a
//! [`StreamContext`], to every [`Processor`] in order. Processors never track time
//! themselves; they read it from the context.

use crate::{AudioBlock, FilterError};

/// Sample rate and channel layout of a stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamFormat {
    sample_rate: f64,
    channels: usize,
}

impl StreamFormat {
    /// Creates a format.
    ///
    /// # Errors
    ///
    /// Fails with [`FilterError::InvalidFormat`] when the sample rate is not a positive
    /// finite number or the channel count is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use audio_biquad::StreamFormat;
    ///
    /// let format = StreamFormat::new(48000.0, 2).unwrap();
    /// assert_eq!(format.nyquist(), 24000.0);
    /// assert!(StreamFormat::new(0.0, 2).is_err());
    /// ```
    pub fn new(sample_rate: f64, channels: usize) -> Result<Self, FilterError> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) || channels == 0 {
            return Err(FilterError::InvalidFormat {
                sample_rate,
                channels,
            });
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Half the sample rate.
    pub fn nyquist(&self) -> f64 {
        0.5 * self.sample_rate
    }
}

/// Timing information for the block being processed.
///
/// Built from a validated [`StreamFormat`], so the sample rate is always positive and
/// `elapsed()` is always finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamContext {
    sample_rate: f64,
    frames_processed: u64,
}

impl StreamContext {
    /// A context positioned at the start of a stream in `format`.
    pub fn new(format: StreamFormat) -> Self {
        Self {
            sample_rate: format.sample_rate(),
            frames_processed: 0,
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Frames processed before the current block.
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Elapsed stream time in seconds at the first sample of the current block.
    pub fn elapsed(&self) -> f64 {
        self.frames_processed as f64 / self.sample_rate
    }

    /// Moves the clock forward by `frames`.
    pub fn advance(&mut self, frames: usize) {
        self.frames_processed += frames as u64;
    }
}

/// Anything that transforms one block of audio in place.
pub trait Processor: Send {
    fn process(
        &mut self,
        block: &mut dyn AudioBlock,
        ctx: &StreamContext,
    ) -> Result<(), FilterError>;
}

/// Drives a chain of processors over consecutive blocks.
///
/// # Examples
///
/// ```
/// use audio_biquad::{
///     AudioBuffer, BiquadFilter, FilterOptions, FilterType, Stream, StreamFormat,
/// };
///
/// let format = StreamFormat::new(44100.0, 1).unwrap();
/// let options = FilterOptions {
///     filter_type: FilterType::HighPass,
///     frequency: 200.0,
///     ..Default::default()
/// };
///
/// let filter = BiquadFilter::new(options, format).unwrap();
/// let mut stream = Stream::new(format).with(filter);
///
/// let mut block = AudioBuffer::new(1, 256);
/// stream.process_block(&mut block).unwrap();
/// assert_eq!(stream.context().frames_processed(), 256);
/// ```
pub struct Stream {
    format: StreamFormat,
    context: StreamContext,
    processors: Vec<Box<dyn Processor>>,
}

impl Stream {
    pub fn new(format: StreamFormat) -> Self {
        Self {
            format,
            context: StreamContext::new(format),
            processors: Vec::new(),
        }
    }

    /// Appends a processor to the end of the chain.
    pub fn push(&mut self, processor: impl Processor + 'static) {
        self.processors.push(Box::new(processor));
    }

    /// Builder form of [`Stream::push`].
    pub fn with(mut self, processor: impl Processor + 'static) -> Self {
        self.push(processor);
        self
    }

    /// Runs every processor over `block`, then advances the clock by its length.
    ///
    /// All processors see the same context, positioned at the block's first frame.
    /// The clock does not advance when a processor fails.
    pub fn process_block(&mut self, block: &mut dyn AudioBlock) -> Result<(), FilterError> {
        for processor in &mut self.processors {
            processor.process(block, &self.context)?;
        }
        self.context.advance(block.frames());
        Ok(())
    }

    pub fn context(&self) -> &StreamContext {
        &self.context
    }

    pub fn format(&self) -> StreamFormat {
        self.format
    }

    /// Sets the sample count back to zero.
    pub fn reset_clock(&mut self) {
        self.context.frames_processed = 0;
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AudioBuffer;
    use std::sync::{Arc, Mutex};

    /// Records the elapsed time it was called with and scales the block.
    struct Probe {
        seen: Arc<Mutex<Vec<f64>>>,
        factor: f64,
    }

    impl Processor for Probe {
        fn process(
            &mut self,
            block: &mut dyn AudioBlock,
            ctx: &StreamContext,
        ) -> Result<(), FilterError> {
            self.seen.lock().unwrap().push(ctx.elapsed());
            for ch in 0..block.channel_count() {
                let data = block
                    .channel_mut(ch)
                    .ok_or(FilterError::MissingChannel { index: ch })?;
                data.iter_mut().for_each(|s| *s *= self.factor);
            }
            Ok(())
        }
    }

    #[test]
    fn test_format_validation() {
        assert!(StreamFormat::new(44100.0, 1).is_ok());
        assert!(StreamFormat::new(-1.0, 1).is_err());
        assert!(StreamFormat::new(f64::NAN, 1).is_err());
        assert!(StreamFormat::new(f64::INFINITY, 1).is_err());
        assert_eq!(
            StreamFormat::new(44100.0, 0),
            Err(FilterError::InvalidFormat {
                sample_rate: 44100.0,
                channels: 0
            })
        );
    }

    #[test]
    fn test_context_elapsed() {
        let mut ctx = StreamContext::new(StreamFormat::new(100.0, 1).unwrap());
        assert_eq!(ctx.sample_rate(), 100.0);
        assert_eq!(ctx.elapsed(), 0.0);
        ctx.advance(50);
        assert_eq!(ctx.elapsed(), 0.5);
        assert_eq!(ctx.frames_processed(), 50);
    }

    #[test]
    fn test_processors_run_in_order_with_pre_block_time() {
        let format = StreamFormat::new(10.0, 1).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut stream = Stream::new(format)
            .with(Probe {
                seen: seen.clone(),
                factor: 2.0,
            })
            .with(Probe {
                seen: seen.clone(),
                factor: 3.0,
            });
        assert_eq!(stream.len(), 2);

        let mut block = AudioBuffer::from_channels(vec![vec![1.0; 5]]).unwrap();
        stream.process_block(&mut block).unwrap();
        stream.process_block(&mut block).unwrap();

        assert_eq!(block.channel(0).unwrap(), &[36.0; 5]);
        assert_eq!(*seen.lock().unwrap(), vec![0.0, 0.0, 0.5, 0.5]);
        assert_eq!(stream.context().frames_processed(), 10);

        stream.reset_clock();
        assert_eq!(stream.context().frames_processed(), 0);
    }
}
