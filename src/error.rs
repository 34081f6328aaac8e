//! Error type shared by the whole crate.

use crate::FilterType;
use thiserror::Error;

/// Errors raised while configuring a filter or processing a block.
///
/// Configuration problems (an unknown filter type, an unusable stream format) are
/// reported at construction time. Problems with an individual block are reported by
/// the `process` call that received it; nothing is deferred into the sample loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("unknown filter type: {0:?}")]
    UnknownFilterType(String),

    #[error("invalid stream format: sample rate {sample_rate}, {channels} channel(s)")]
    InvalidFormat { sample_rate: f64, channels: usize },

    #[error("block reports channel {index} but has no data for it")]
    MissingChannel { index: usize },

    #[error("parameter `{name}` resolved to a non-finite value ({value})")]
    NonFiniteParameter { name: &'static str, value: f64 },

    #[error("{filter_type} design at frequency {frequency}, Q {q}, gain {gain} dB is not finite")]
    NonFiniteCoefficients {
        filter_type: FilterType,
        frequency: f64,
        q: f64,
        gain: f64,
    },

    #[error("buffer length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
