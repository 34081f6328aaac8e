//! Core signal trait and the parameter type used by every filter setting.

use std::fmt;

/// Common interface for pull-based sample sources.
///
/// Sources are used to fill audio blocks before they are handed to a processor.
pub trait Signal {
    /// Generates the next sample from the signal.
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

impl Signal for f64 {
    fn next_sample(&mut self) -> f64 {
        *self
    }

    fn process(&mut self, buffer: &mut [f64]) {
        buffer.fill(*self);
    }
}

/// A filter parameter that is either a fixed value or a function of elapsed time.
///
/// Time-varying parameters are evaluated once per block, at the time of the block's
/// first sample, so modulation is block-granular.
///
/// # Examples
///
/// ```
/// use audio_biquad::Param;
///
/// // Fixed parameter
/// let fixed: Param = 440.0.into();
/// assert_eq!(fixed.value_at(12.0), 440.0);
///
/// // One-second linear sweep from 200 Hz to 2200 Hz
/// let sweep = Param::time_varying(|t| 200.0 + 2000.0 * t.min(1.0));
/// assert_eq!(sweep.value_at(0.5), 1200.0);
/// ```
pub enum Param {
    /// A constant value
    Fixed(f64),
    /// A value computed from the elapsed stream time in seconds
    TimeVarying(Box<dyn Fn(f64) -> f64 + Send>),
}

impl Param {
    /// Resolves the parameter at `seconds` of elapsed stream time.
    pub fn value_at(&self, seconds: f64) -> f64 {
        match self {
            Param::Fixed(v) => *v,
            Param::TimeVarying(f) => f(seconds),
        }
    }

    /// Creates a fixed parameter with the given value.
    pub fn fixed(value: f64) -> Self {
        Param::Fixed(value)
    }

    /// Creates a parameter driven by a function of elapsed time in seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use audio_biquad::Param;
    ///
    /// let wobble = Param::time_varying(|t| 1000.0 + 500.0 * (t * 2.0).sin());
    /// assert!(!wobble.is_fixed());
    /// ```
    pub fn time_varying(f: impl Fn(f64) -> f64 + Send + 'static) -> Self {
        Param::TimeVarying(Box::new(f))
    }

    /// Returns true if this parameter is fixed.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Param::Fixed(_))
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Param::TimeVarying(_) => f.write_str("TimeVarying(..)"),
        }
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Fixed(value)
    }
}

impl From<f32> for Param {
    fn from(value: f32) -> Self {
        Param::Fixed(value as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_to_param() {
        let param: Param = 0.5.into();
        match param {
            Param::Fixed(v) => assert_eq!(v, 0.5),
            Param::TimeVarying(_) => panic!("Expected Fixed, got TimeVarying"),
        }
    }

    #[test]
    fn test_fixed_ignores_time() {
        let param = Param::fixed(3.0);
        assert!(param.is_fixed());
        assert_eq!(param.value_at(0.0), 3.0);
        assert_eq!(param.value_at(1e6), 3.0);
    }

    #[test]
    fn test_time_varying_evaluates_function() {
        let param = Param::time_varying(|t| t * 10.0);
        assert!(!param.is_fixed());
        assert_eq!(param.value_at(0.0), 0.0);
        assert_eq!(param.value_at(2.5), 25.0);
    }

    #[test]
    fn test_debug_hides_closure() {
        assert_eq!(format!("{:?}", Param::fixed(1.0)), "Fixed(1.0)");
        assert_eq!(
            format!("{:?}", Param::time_varying(|t| t)),
            "TimeVarying(..)"
        );
    }

    #[test]
    fn test_constant_signal_fills_buffer() {
        let mut constant = 0.25_f64;
        let mut buffer = vec![0.0; 4];
        constant.process(&mut buffer);
        assert_eq!(buffer, vec![0.25; 4]);
    }
}
