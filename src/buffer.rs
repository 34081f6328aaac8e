//! Audio blocks: the boundary between a stream and the processors it drives.

use crate::{FilterError, Signal};

/// A block of audio handed to a processor.
///
/// Processors mutate the block's samples in place. A block reports how many channels
/// it has and gives mutable access to each one; returning `None` for an index below
/// `channel_count()` breaks the contract and is reported as
/// [`FilterError::MissingChannel`].
pub trait AudioBlock {
    /// Number of channels in the block.
    fn channel_count(&self) -> usize;

    /// Number of sample frames in the block.
    fn frames(&self) -> usize;

    /// Mutable access to one channel's samples.
    fn channel_mut(&mut self, index: usize) -> Option<&mut [f64]>;
}

/// Planar (one `Vec` per channel) audio storage.
///
/// # Examples
///
/// ```
/// use audio_biquad::AudioBuffer;
///
/// let buffer = AudioBuffer::from_interleaved(&[1.0, -1.0, 2.0, -2.0], 2).unwrap();
/// assert_eq!(buffer.channel(0), Some(&[1.0, 2.0][..]));
/// assert_eq!(buffer.channel(1), Some(&[-1.0, -2.0][..]));
/// assert_eq!(buffer.to_interleaved(), vec![1.0, -1.0, 2.0, -2.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    data: Vec<Vec<f64>>,
    frames: usize,
}

impl AudioBuffer {
    /// Creates a silent buffer.
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            data: vec![vec![0.0; frames]; channels],
            frames,
        }
    }

    /// Wraps existing per-channel sample vectors. All channels must have the same length.
    pub fn from_channels(data: Vec<Vec<f64>>) -> Result<Self, FilterError> {
        let frames = data.first().map_or(0, Vec::len);
        if let Some(bad) = data.iter().find(|ch| ch.len() != frames) {
            return Err(FilterError::LengthMismatch {
                expected: frames,
                actual: bad.len(),
            });
        }
        Ok(Self { data, frames })
    }

    /// De-interleaves `samples` (`L R L R ...`) into `channels` planar channels.
    pub fn from_interleaved(samples: &[f64], channels: usize) -> Result<Self, FilterError> {
        if channels == 0 || samples.len() % channels != 0 {
            return Err(FilterError::LengthMismatch {
                expected: samples.len().next_multiple_of(channels.max(1)),
                actual: samples.len(),
            });
        }

        let frames = samples.len() / channels;
        let mut buffer = Self::new(channels, frames);
        for (i, frame) in samples.chunks_exact(channels).enumerate() {
            for (ch, &sample) in frame.iter().enumerate() {
                buffer.data[ch][i] = sample;
            }
        }
        Ok(buffer)
    }

    /// Interleaves the channels back into a single vector.
    pub fn to_interleaved(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.frames * self.data.len());
        for i in 0..self.frames {
            out.extend(self.data.iter().map(|ch| ch[i]));
        }
        out
    }

    pub fn channels(&self) -> usize {
        self.data.len()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn channel(&self, index: usize) -> Option<&[f64]> {
        self.data.get(index).map(Vec::as_slice)
    }

    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [f64]> {
        self.data.get_mut(index).map(Vec::as_mut_slice)
    }

    /// Fills every channel with the same samples pulled from `signal`.
    pub fn fill_from(&mut self, signal: &mut impl Signal) {
        let Some((first, rest)) = self.data.split_first_mut() else {
            return;
        };
        signal.process(first);
        for ch in rest {
            ch.copy_from_slice(first);
        }
    }

    /// Fills one channel from `signal`; other channels are left as they are.
    pub fn fill_channel_from(
        &mut self,
        index: usize,
        signal: &mut impl Signal,
    ) -> Result<(), FilterError> {
        let channel = self
            .data
            .get_mut(index)
            .ok_or(FilterError::MissingChannel { index })?;
        signal.process(channel);
        Ok(())
    }

    /// Consumes the buffer, returning the per-channel vectors.
    pub fn into_channels(self) -> Vec<Vec<f64>> {
        self.data
    }
}

impl AudioBlock for AudioBuffer {
    fn channel_count(&self) -> usize {
        self.data.len()
    }

    fn frames(&self) -> usize {
        self.frames
    }

    fn channel_mut(&mut self, index: usize) -> Option<&mut [f64]> {
        AudioBuffer::channel_mut(self, index)
    }
}

impl AudioBlock for Vec<Vec<f64>> {
    fn channel_count(&self) -> usize {
        self.len()
    }

    fn frames(&self) -> usize {
        self.first().map_or(0, Vec::len)
    }

    fn channel_mut(&mut self, index: usize) -> Option<&mut [f64]> {
        self.get_mut(index).map(Vec::as_mut_slice)
    }
}
