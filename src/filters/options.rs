//! Serializable filter configuration.

use super::FilterType;
use serde::{Deserialize, Serialize};

/// Plain-number filter configuration, loadable from a config file.
///
/// Field names follow the Web Audio option keys (`type`, `frequency`, `detune`, `Q`,
/// `gain`); missing fields take their defaults. For time-varying settings build the
/// filter from options and then call the `with_*` methods on it.
///
/// # Examples
///
/// ```
/// use audio_biquad::{FilterOptions, FilterType};
///
/// let options: FilterOptions =
///     serde_json::from_str(r#"{ "type": "bandpass", "Q": 1000, "frequency": 440 }"#).unwrap();
/// assert_eq!(options.filter_type, FilterType::BandPass);
/// assert_eq!(options.q, 1000.0);
/// assert_eq!(options.gain, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    /// Cutoff or center frequency in Hz
    pub frequency: f64,
    /// Frequency offset in cents
    pub detune: f64,
    /// Quality factor; resonance in dB for lowpass/highpass
    #[serde(rename = "Q", alias = "q")]
    pub q: f64,
    /// Gain in dB (shelf and peaking types only)
    pub gain: f64,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            filter_type: FilterType::LowPass,
            frequency: 350.0,
            detune: 0.0,
            q: 1.0,
            gain: 0.0,
        }
    }
}

impl FilterOptions {
    /// Default options with the given type.
    pub fn of_type(filter_type: FilterType) -> Self {
        Self {
            filter_type,
            ..Self::default()
        }
    }
}
