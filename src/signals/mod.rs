//! Signal sources and parameter types.
//!
//! This module provides:
//! - `Signal` trait for pull-based sample sources used to fill blocks
//! - `Param` type for fixed or time-varying filter parameters
//! - A few deterministic and random sources for driving filters in tests and demos

mod core;
#[cfg(feature = "noise")]
mod noise;
mod sources;

pub use self::core::{Param, Signal};
#[cfg(feature = "noise")]
pub use noise::WhiteNoise;
pub use sources::{Impulse, SineOscillator};
