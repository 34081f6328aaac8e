//! audio-biquad - A streaming biquad filter for block-based audio
//!
//! This library designs second-order IIR filters (lowpass, highpass, shelves, peaking,
//! notch, allpass, bandpass) and applies them to audio blocks while carrying per-channel
//! state across block boundaries. Filter settings may be fixed or functions of time.

mod buffer;
mod error;
pub mod filters;
pub mod signals;
pub mod stream;

// Re-export commonly used types at the crate root
pub use buffer::{AudioBlock, AudioBuffer};
pub use error::FilterError;
pub use filters::{
    BiquadFilter, ChannelState, Coefficients, FilterOptions, FilterType, MAX_GAIN_DB,
    MAX_RESONANCE_DB, design, normalize,
};
#[cfg(feature = "noise")]
pub use signals::WhiteNoise;
pub use signals::{Impulse, Param, Signal, SineOscillator};
pub use stream::{Processor, Stream, StreamContext, StreamFormat};
