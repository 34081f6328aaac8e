//! The closed set of filter responses.

use crate::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The type of filter to apply.
///
/// Names follow the Web Audio `BiquadFilterNode` vocabulary and parse from the same
/// lowercase strings (`"lowpass"`, `"highshelf"`, ...).
///
/// # Examples
///
/// ```
/// use audio_biquad::FilterType;
///
/// let kind: FilterType = "peaking".parse().unwrap();
/// assert_eq!(kind, FilterType::Peaking);
/// assert_eq!(kind.to_string(), "peaking");
/// assert!("comb".parse::<FilterType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Low-pass filter with a resonance peak at the cutoff
    #[default]
    LowPass,
    /// High-pass filter with a resonance peak at the cutoff
    HighPass,
    /// Boosts or cuts everything below the corner frequency
    LowShelf,
    /// Boosts or cuts everything above the corner frequency
    HighShelf,
    /// Boosts or cuts a band around the center frequency
    Peaking,
    /// Band-reject filter - attenuates frequencies near the center
    Notch,
    /// All-pass filter - passes all frequencies but shifts phase
    AllPass,
    /// Band-pass filter - passes frequencies near the center, attenuates others
    BandPass,
}

impl FilterType {
    /// Every filter type, in declaration order.
    pub const ALL: [FilterType; 8] = [
        FilterType::LowPass,
        FilterType::HighPass,
        FilterType::LowShelf,
        FilterType::HighShelf,
        FilterType::Peaking,
        FilterType::Notch,
        FilterType::AllPass,
        FilterType::BandPass,
    ];

    /// The lowercase name used for parsing and display.
    pub fn name(self) -> &'static str {
        match self {
            FilterType::LowPass => "lowpass",
            FilterType::HighPass => "highpass",
            FilterType::LowShelf => "lowshelf",
            FilterType::HighShelf => "highshelf",
            FilterType::Peaking => "peaking",
            FilterType::Notch => "notch",
            FilterType::AllPass => "allpass",
            FilterType::BandPass => "bandpass",
        }
    }

    /// Whether the `gain` parameter affects this response.
    pub fn uses_gain(self) -> bool {
        matches!(
            self,
            FilterType::LowShelf | FilterType::HighShelf | FilterType::Peaking
        )
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for FilterType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterType::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| FilterError::UnknownFilterType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in FilterType::ALL {
            assert_eq!(kind.name().parse::<FilterType>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert_eq!(
            "LowPass".parse::<FilterType>(),
            Err(FilterError::UnknownFilterType("LowPass".into()))
        );
        assert!("".parse::<FilterType>().is_err());
    }

    #[test]
    fn test_default_is_lowpass() {
        assert_eq!(FilterType::default(), FilterType::LowPass);
    }

    #[test]
    fn test_gain_only_matters_for_shelves_and_peaking() {
        let with_gain: Vec<_> = FilterType::ALL
            .into_iter()
            .filter(|k| k.uses_gain())
            .collect();
        assert_eq!(
            with_gain,
            vec![
                FilterType::LowShelf,
                FilterType::HighShelf,
                FilterType::Peaking
            ]
        );
    }
}
