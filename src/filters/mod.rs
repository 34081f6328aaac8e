//! Biquad filter design and streaming application.
//!
//! - [`design`] turns a filter type and its settings into [`Coefficients`]
//! - [`BiquadFilter`] applies those coefficients to multi-channel blocks, keeping
//!   per-channel state between blocks

mod biquad;
mod coefficients;
mod kind;
mod options;

pub use biquad::{BiquadFilter, ChannelState};
pub use coefficients::{Coefficients, MAX_GAIN_DB, MAX_RESONANCE_DB, design, normalize};
pub use kind::FilterType;
pub use options::FilterOptions;
