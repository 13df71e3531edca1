//! The drawing primitive behind every generator.
//!
//! All randomness flows through an explicit [`DrawSource`] handle, so a fixed
//! seed replays the exact same sequence of values. Nothing here caches or
//! memoizes across calls; replay determinism depends on it.

use crate::width::FloatWidth;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Errors surfaced by draws and range adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawError {
    /// The effective window is empty or inverted, or a bound is NaN.
    InvalidRange,
    /// A safety factor below 1, or non-finite.
    InvalidFactor,
    /// A choice over zero options.
    EmptyChoice,
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::InvalidRange => write!(f, "Invalid range: min_value > max_value"),
            DrawError::InvalidFactor => write!(f, "Safety factor must be finite and >= 1"),
            DrawError::EmptyChoice => write!(f, "Cannot choose from zero options"),
        }
    }
}

impl std::error::Error for DrawError {}

/// Constraints for a single float draw.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatConstraints {
    pub min_value: f64,
    pub max_value: f64,
    /// Width the returned value must be representable at.
    pub width: FloatWidth,
    pub allow_nan: bool,
    pub allow_inf: bool,
    pub allow_subnormal: bool,
    pub exclude_min: bool,
    pub exclude_max: bool,
}

impl Default for FloatConstraints {
    fn default() -> Self {
        FloatConstraints {
            min_value: f64::NEG_INFINITY,
            max_value: f64::INFINITY,
            width: FloatWidth::Width64,
            allow_nan: false,
            allow_inf: false,
            allow_subnormal: false,
            exclude_min: false,
            exclude_max: false,
        }
    }
}

/// The pseudorandom primitive consumed by the generators.
///
/// Implementations must be deterministic under a fixed seed and must never
/// return a value outside the requested window, modulo the exclusivity flags
/// and explicitly allowed NaN.
pub trait DrawSource {
    /// Draw a float inside the constraint window, representable at the
    /// constraint width.
    fn draw_float(&mut self, constraints: &FloatConstraints) -> Result<f64, DrawError>;

    /// Draw an integer from the inclusive window.
    fn draw_int(&mut self, min_value: i128, max_value: i128) -> Result<i128, DrawError>;

    /// Draw a uniform index in `0..options`.
    fn choose(&mut self, options: usize) -> Result<usize, DrawError>;
}

/// ChaCha8-backed draw source. Identical seeds replay identical sequences.
#[derive(Debug, Clone)]
pub struct RngSource {
    rng: ChaCha8Rng,
}

impl RngSource {
    pub fn from_seed(seed: u64) -> Self {
        RngSource {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        RngSource {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    // gen_range needs a finite span; a window wider than f64::MAX is sampled
    // by halving at the midpoint.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if lo == hi {
            return lo;
        }
        if hi - lo == f64::INFINITY {
            let mid = lo / 2.0 + hi / 2.0;
            if self.rng.gen_bool(0.5) {
                self.rng.gen_range(lo..=mid)
            } else {
                self.rng.gen_range(mid..=hi)
            }
        } else {
            self.rng.gen_range(lo..=hi)
        }
    }
}

impl DrawSource for RngSource {
    fn draw_float(&mut self, c: &FloatConstraints) -> Result<f64, DrawError> {
        if c.min_value.is_nan() || c.max_value.is_nan() || c.min_value > c.max_value {
            return Err(DrawError::InvalidRange);
        }
        let width = c.width;

        // Tighten the window to values representable at the draw width, and
        // step past excluded endpoints.
        let mut lo = width.round_up(c.min_value);
        let mut hi = width.round_down(c.max_value);
        if c.exclude_min {
            lo = width.next_up(lo);
        }
        if c.exclude_max {
            hi = width.next_down(hi);
        }
        if !c.allow_inf {
            if lo == f64::NEG_INFINITY {
                lo = -width.max_finite();
            }
            if hi == f64::INFINITY {
                hi = width.max_finite();
            }
            if lo.is_infinite() || hi.is_infinite() {
                // The window holds nothing but a disallowed infinity.
                return Err(DrawError::InvalidRange);
            }
        }
        if lo > hi {
            return Err(DrawError::InvalidRange);
        }

        if c.allow_nan && self.rng.gen_bool(0.01) {
            return Ok(f64::NAN);
        }
        if c.allow_inf {
            if hi == f64::INFINITY && self.rng.gen_bool(0.01) {
                return Ok(f64::INFINITY);
            }
            if lo == f64::NEG_INFINITY && self.rng.gen_bool(0.01) {
                return Ok(f64::NEG_INFINITY);
            }
        }

        let lo_finite = lo.max(-width.max_finite());
        let hi_finite = hi.min(width.max_finite());
        if lo_finite > hi_finite {
            // Only the allowed infinite endpoints remain.
            return Ok(if hi == f64::INFINITY {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            });
        }

        let mut value = width.round(self.uniform(lo_finite, hi_finite));
        // Rounding to the width can escape the window by one step.
        if value < lo_finite {
            value = lo_finite;
        }
        if value > hi_finite {
            value = hi_finite;
        }

        if !c.allow_subnormal && width.is_subnormal(value) {
            let normal = width.smallest_normal();
            value = if value.abs() < normal / 2.0 {
                0.0
            } else {
                normal.copysign(value)
            };
            if value < lo_finite {
                value = lo_finite;
            }
            if value > hi_finite {
                value = hi_finite;
            }
            if width.is_subnormal(value) {
                // The window holds nothing but subnormals.
                return Err(DrawError::InvalidRange);
            }
        }
        Ok(value)
    }

    fn draw_int(&mut self, min_value: i128, max_value: i128) -> Result<i128, DrawError> {
        if min_value > max_value {
            return Err(DrawError::InvalidRange);
        }
        if min_value == max_value {
            return Ok(min_value);
        }
        Ok(self.rng.gen_range(min_value..=max_value))
    }

    fn choose(&mut self, options: usize) -> Result<usize, DrawError> {
        if options == 0 {
            return Err(DrawError::EmptyChoice);
        }
        Ok(self.rng.gen_range(0..options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_int_stays_in_window() {
        let mut source = RngSource::from_seed(42);
        for _ in 0..200 {
            let value = source.draw_int(-7, 13).unwrap();
            assert!(value >= -7 && value <= 13, "drew {} outside [-7, 13]", value);
        }
    }

    #[test]
    fn test_draw_int_inverted_window_fails() {
        let mut source = RngSource::from_seed(42);
        assert_eq!(source.draw_int(10, 5), Err(DrawError::InvalidRange));
    }

    #[test]
    fn test_draw_int_degenerate_window() {
        let mut source = RngSource::from_seed(42);
        assert_eq!(source.draw_int(3, 3), Ok(3));
    }

    #[test]
    fn test_draw_float_stays_in_window_at_every_width() {
        for width in [FloatWidth::Width16, FloatWidth::Width32, FloatWidth::Width64] {
            let mut source = RngSource::from_seed(7);
            let constraints = FloatConstraints {
                min_value: -100.0,
                max_value: 100.0,
                width,
                ..FloatConstraints::default()
            };
            for _ in 0..200 {
                let value = source.draw_float(&constraints).unwrap();
                assert!(
                    value >= -100.0 && value <= 100.0,
                    "drew {} outside [-100, 100] at {:?}",
                    value,
                    width
                );
                assert_eq!(
                    value,
                    width.round(value),
                    "{} not representable at {:?}",
                    value,
                    width
                );
            }
        }
    }

    #[test]
    fn test_draw_float_respects_exclusive_endpoints() {
        let mut source = RngSource::from_seed(9);
        let constraints = FloatConstraints {
            min_value: 0.0,
            max_value: 1.0,
            exclude_min: true,
            exclude_max: true,
            allow_subnormal: true,
            ..FloatConstraints::default()
        };
        for _ in 0..200 {
            let value = source.draw_float(&constraints).unwrap();
            assert!(value > 0.0 && value < 1.0, "drew excluded endpoint: {}", value);
        }
    }

    #[test]
    fn test_draw_float_never_yields_nan_unless_allowed() {
        let mut source = RngSource::from_seed(11);
        let constraints = FloatConstraints {
            min_value: -1e300,
            max_value: 1e300,
            ..FloatConstraints::default()
        };
        for _ in 0..500 {
            let value = source.draw_float(&constraints).unwrap();
            assert!(!value.is_nan());
            assert!(value.is_finite());
        }
    }

    #[test]
    fn test_draw_float_yields_nan_when_allowed() {
        let mut source = RngSource::from_seed(13);
        let constraints = FloatConstraints {
            allow_nan: true,
            allow_inf: true,
            ..FloatConstraints::default()
        };
        let mut saw_nan = false;
        for _ in 0..1000 {
            if source.draw_float(&constraints).unwrap().is_nan() {
                saw_nan = true;
                break;
            }
        }
        assert!(saw_nan, "no NaN in 1000 draws with allow_nan");
    }

    #[test]
    fn test_draw_float_snaps_subnormals() {
        let mut source = RngSource::from_seed(17);
        let constraints = FloatConstraints {
            min_value: 0.0,
            max_value: f64::MIN_POSITIVE,
            ..FloatConstraints::default()
        };
        for _ in 0..200 {
            let value = source.draw_float(&constraints).unwrap();
            assert!(
                value == 0.0 || value == f64::MIN_POSITIVE,
                "subnormal {} leaked through",
                value
            );
        }
    }

    #[test]
    fn test_draw_float_inverted_window_fails() {
        let mut source = RngSource::from_seed(19);
        let constraints = FloatConstraints {
            min_value: 1.0,
            max_value: -1.0,
            ..FloatConstraints::default()
        };
        assert_eq!(source.draw_float(&constraints), Err(DrawError::InvalidRange));
    }

    #[test]
    fn test_draw_float_nan_bound_fails() {
        let mut source = RngSource::from_seed(19);
        let constraints = FloatConstraints {
            min_value: f64::NAN,
            ..FloatConstraints::default()
        };
        assert_eq!(source.draw_float(&constraints), Err(DrawError::InvalidRange));
    }

    #[test]
    fn test_choose_uniform_index() {
        let mut source = RngSource::from_seed(23);
        for _ in 0..100 {
            assert!(source.choose(4).unwrap() < 4);
        }
        assert_eq!(source.choose(0), Err(DrawError::EmptyChoice));
    }

    #[test]
    fn test_identical_seeds_replay_identical_draws() {
        let mut a = RngSource::from_seed(99);
        let mut b = RngSource::from_seed(99);
        let constraints = FloatConstraints {
            min_value: -1e6,
            max_value: 1e6,
            ..FloatConstraints::default()
        };
        for _ in 0..50 {
            assert_eq!(a.draw_int(0, 1000), b.draw_int(0, 1000));
            assert_eq!(a.draw_float(&constraints), b.draw_float(&constraints));
            assert_eq!(a.choose(8), b.choose(8));
        }
    }
}
