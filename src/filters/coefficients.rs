//! Biquad coefficient design.
//!
//! Maps a filter type, a Nyquist-normalized frequency, a Q value and a gain in dB to
//! five coefficients already divided by `a0`. The Q-based responses use Robert
//! Bristow-Johnson's Audio EQ Cookbook formulas; lowpass and highpass use the
//! resonance-in-dB design found in WebKit's `Biquad.cpp`, so for those two types the
//! `q` argument is read as a resonance peak in dB rather than a quality factor.
//!
//! Every branch where the general formula has a removable singularity (frequency at
//! 0 or Nyquist, Q at 0) substitutes the closed-form limit instead.

use super::FilterType;
use std::f64::consts::PI;

/// Largest gain magnitude in dB accepted by the shelf and peaking designs.
///
/// `40 * log10(f32::MAX)`, the nominal range of a Web Audio gain parameter. Larger
/// values are clamped; well beyond it the shelf coefficients overflow.
pub const MAX_GAIN_DB: f64 = 1541.0;

/// Largest lowpass/highpass resonance in dB.
///
/// Past roughly 150 dB the resonance design loses the `16 / g²` term to rounding and
/// puts the poles on the unit circle. Larger values are clamped.
pub const MAX_RESONANCE_DB: f64 = 100.0;

/// Normalized biquad coefficients (`a0 == 1`).
///
/// The filter computes
/// `y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl Coefficients {
    /// Passes the input through unchanged.
    pub const IDENTITY: Coefficients = Coefficients::gain(1.0);

    /// Outputs silence.
    pub const ZERO: Coefficients = Coefficients::gain(0.0);

    /// A memoryless constant gain.
    pub const fn gain(k: f64) -> Self {
        Self {
            b0: k,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
        }
    }

    /// `(b0, b1, b2, a1, a2)`
    pub fn as_tuple(&self) -> (f64, f64, f64, f64, f64) {
        (self.b0, self.b1, self.b2, self.a1, self.a2)
    }

    pub fn is_finite(&self) -> bool {
        self.b0.is_finite()
            && self.b1.is_finite()
            && self.b2.is_finite()
            && self.a1.is_finite()
            && self.a2.is_finite()
    }

    /// Largest pole radius, i.e. the largest `|z|` solving `z² + a1·z + a2 = 0`.
    ///
    /// The filter is stable when this is strictly below 1.
    pub fn pole_magnitude(&self) -> f64 {
        let disc = self.a1 * self.a1 - 4.0 * self.a2;
        if disc < 0.0 {
            // Complex conjugate pair: |z|² is the product of the roots
            self.a2.sqrt()
        } else {
            let root = disc.sqrt();
            let r1 = (-self.a1 + root) * 0.5;
            let r2 = (-self.a1 - root) * 0.5;
            r1.abs().max(r2.abs())
        }
    }
}

impl Default for Coefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Divides all coefficients by `a0`.
///
/// `a0` is never zero for inputs produced by [`design`]; a zero here is a bug in the
/// caller, not a recoverable condition.
pub fn normalize(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Coefficients {
    debug_assert!(a0 != 0.0, "biquad a0 must be non-zero");
    let a0_inverse = 1.0 / a0;
    Coefficients {
        b0: b0 * a0_inverse,
        b1: b1 * a0_inverse,
        b2: b2 * a0_inverse,
        a1: a1 * a0_inverse,
        a2: a2 * a0_inverse,
    }
}

/// Computes coefficients for one filter response.
///
/// # Arguments
///
/// * `filter_type` - Which response to design
/// * `frequency` - Cutoff/center frequency divided by Nyquist; clamped to `[0, 1]`
/// * `q` - Quality factor (resonance in dB for lowpass/highpass); clamped to `>= 0`,
///   and to [`MAX_RESONANCE_DB`] for lowpass/highpass
/// * `gain_db` - Gain in dB, only used by the shelf and peaking types; clamped to
///   `±`[`MAX_GAIN_DB`]
///
/// # Examples
///
/// ```
/// use audio_biquad::{Coefficients, FilterType, design};
///
/// // Allpass with Q = 0 degenerates to a sign flip
/// let c = design(FilterType::AllPass, 0.25, 0.0, 0.0);
/// assert_eq!(c, Coefficients::gain(-1.0));
///
/// // Lowpass at Nyquist lets everything through
/// let c = design(FilterType::LowPass, 1.0, 3.0, 0.0);
/// assert_eq!(c, Coefficients::IDENTITY);
/// ```
pub fn design(filter_type: FilterType, frequency: f64, q: f64, gain_db: f64) -> Coefficients {
    let frequency = frequency.clamp(0.0, 1.0);
    // Negative Q gives an unstable filter
    let q = q.max(0.0);
    let gain_db = gain_db.clamp(-MAX_GAIN_DB, MAX_GAIN_DB);

    match filter_type {
        FilterType::LowPass => lowpass(frequency, q.min(MAX_RESONANCE_DB)),
        FilterType::HighPass => highpass(frequency, q.min(MAX_RESONANCE_DB)),
        FilterType::LowShelf => lowshelf(frequency, gain_db),
        FilterType::HighShelf => highshelf(frequency, gain_db),
        FilterType::Peaking => peaking(frequency, q, gain_db),
        FilterType::Notch => notch(frequency, q),
        FilterType::AllPass => allpass(frequency, q),
        FilterType::BandPass => bandpass(frequency, q),
    }
}

/// Shared terms of the resonant lowpass/highpass design: `(beta, gamma)`.
fn resonant_terms(cutoff: f64, resonance: f64) -> (f64, f64) {
    let g = 10.0_f64.powf(0.05 * resonance);
    let d = ((4.0 - (16.0 - 16.0 / (g * g)).sqrt()) / 2.0).sqrt();

    let theta = PI * cutoff;
    let sn = 0.5 * d * theta.sin();
    let beta = 0.5 * (1.0 - sn) / (1.0 + sn);
    let gamma = (0.5 + beta) * theta.cos();
    (beta, gamma)
}

fn lowpass(cutoff: f64, resonance: f64) -> Coefficients {
    if cutoff == 1.0 {
        return Coefficients::IDENTITY;
    }
    if cutoff == 0.0 {
        // Nothing gets through
        return Coefficients::ZERO;
    }

    let (beta, gamma) = resonant_terms(cutoff, resonance);
    let alpha = 0.25 * (0.5 + beta - gamma);

    normalize(
        2.0 * alpha,
        4.0 * alpha,
        2.0 * alpha,
        1.0,
        -2.0 * gamma,
        2.0 * beta,
    )
}

fn highpass(cutoff: f64, resonance: f64) -> Coefficients {
    if cutoff == 1.0 {
        return Coefficients::ZERO;
    }
    if cutoff == 0.0 {
        // The general formula cancels poles and zeros on the unit circle here
        return Coefficients::IDENTITY;
    }

    let (beta, gamma) = resonant_terms(cutoff, resonance);
    let alpha = 0.25 * (0.5 + beta + gamma);

    normalize(
        2.0 * alpha,
        -4.0 * alpha,
        2.0 * alpha,
        1.0,
        -2.0 * gamma,
        2.0 * beta,
    )
}

/// Amplitude factor `A = 10^(gain/40)`; the response gain is `A²`.
fn shelf_amplitude(gain_db: f64) -> f64 {
    10.0_f64.powf(gain_db / 40.0)
}

/// Shared shelf terms: `(k, k2)` with slope fixed at 1.
fn shelf_terms(frequency: f64, a: f64) -> (f64, f64) {
    const SLOPE: f64 = 1.0;
    let w0 = PI * frequency;
    let alpha = 0.5 * w0.sin() * ((a + 1.0 / a) * (1.0 / SLOPE - 1.0) + 2.0).sqrt();
    let k = w0.cos();
    let k2 = 2.0 * a.sqrt() * alpha;
    (k, k2)
}

fn lowshelf(frequency: f64, gain_db: f64) -> Coefficients {
    let a = shelf_amplitude(gain_db);

    if frequency == 1.0 {
        return Coefficients::gain(a * a);
    }
    if frequency == 0.0 {
        return Coefficients::IDENTITY;
    }

    let (k, k2) = shelf_terms(frequency, a);
    let a_plus_one = a + 1.0;
    let a_minus_one = a - 1.0;

    normalize(
        a * (a_plus_one - a_minus_one * k + k2),
        2.0 * a * (a_minus_one - a_plus_one * k),
        a * (a_plus_one - a_minus_one * k - k2),
        a_plus_one + a_minus_one * k + k2,
        -2.0 * (a_minus_one + a_plus_one * k),
        a_plus_one + a_minus_one * k - k2,
    )
}

fn highshelf(frequency: f64, gain_db: f64) -> Coefficients {
    let a = shelf_amplitude(gain_db);

    if frequency == 1.0 {
        return Coefficients::IDENTITY;
    }
    if frequency == 0.0 {
        return Coefficients::gain(a * a);
    }

    let (k, k2) = shelf_terms(frequency, a);
    let a_plus_one = a + 1.0;
    let a_minus_one = a - 1.0;

    normalize(
        a * (a_plus_one + a_minus_one * k + k2),
        -2.0 * a * (a_minus_one + a_plus_one * k),
        a * (a_plus_one + a_minus_one * k - k2),
        a_plus_one - a_minus_one * k + k2,
        2.0 * (a_minus_one - a_plus_one * k),
        a_plus_one - a_minus_one * k - k2,
    )
}

/// `(alpha, cos w0)` for the cookbook designs. Requires `q > 0`.
fn cookbook_terms(frequency: f64, q: f64) -> (f64, f64) {
    let w0 = PI * frequency;
    (w0.sin() / (2.0 * q), w0.cos())
}

fn is_interior(frequency: f64) -> bool {
    frequency > 0.0 && frequency < 1.0
}

fn peaking(frequency: f64, q: f64, gain_db: f64) -> Coefficients {
    let a = shelf_amplitude(gain_db);

    if !is_interior(frequency) {
        return Coefficients::IDENTITY;
    }
    if q == 0.0 {
        // Limit as Q -> 0 is the constant gain A²
        return Coefficients::gain(a * a);
    }

    let (alpha, k) = cookbook_terms(frequency, q);
    normalize(
        1.0 + alpha * a,
        -2.0 * k,
        1.0 - alpha * a,
        1.0 + alpha / a,
        -2.0 * k,
        1.0 - alpha / a,
    )
}

fn notch(frequency: f64, q: f64) -> Coefficients {
    if !is_interior(frequency) {
        return Coefficients::IDENTITY;
    }
    if q == 0.0 {
        return Coefficients::ZERO;
    }

    let (alpha, k) = cookbook_terms(frequency, q);
    normalize(1.0, -2.0 * k, 1.0, 1.0 + alpha, -2.0 * k, 1.0 - alpha)
}

fn allpass(frequency: f64, q: f64) -> Coefficients {
    if !is_interior(frequency) {
        return Coefficients::IDENTITY;
    }
    if q == 0.0 {
        // Limit as Q -> 0 is -1, not 1
        return Coefficients::gain(-1.0);
    }

    let (alpha, k) = cookbook_terms(frequency, q);
    normalize(
        1.0 - alpha,
        -2.0 * k,
        1.0 + alpha,
        1.0 + alpha,
        -2.0 * k,
        1.0 - alpha,
    )
}

fn bandpass(frequency: f64, q: f64) -> Coefficients {
    if !is_interior(frequency) {
        // Approaches 0 at both ends when Q > 0; with Q = 0 as well the limit is
        // undefined and silence is chosen.
        return Coefficients::ZERO;
    }
    if q == 0.0 {
        return Coefficients::IDENTITY;
    }

    // Constant skirt gain
    let (alpha, k) = cookbook_terms(frequency, q);
    normalize(alpha, 0.0, -alpha, 1.0 + alpha, -2.0 * k, 1.0 - alpha)
}
