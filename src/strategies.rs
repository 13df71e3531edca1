//! The generators: [`floats`], [`ints`], and [`number`].
//!
//! Each call resolves a concrete numeric domain at random, shrinks the
//! requested window away from the domain's limits by the safety factors, and
//! draws one value through the caller's source. Option structs with
//! [`Default`] stand in for optional parameters:
//!
//! ```
//! use numgen::{floats, FloatOptions, RngSource};
//!
//! let mut source = RngSource::from_seed(42);
//! let value = floats(&mut source, &FloatOptions {
//!     min_value: Some(-1e3),
//!     max_value: Some(1e3),
//!     ..FloatOptions::default()
//! }).unwrap();
//! assert!(value.abs() <= 1e3);
//! ```

use crate::data::{DrawError, DrawSource, FloatConstraints};
use crate::domain::{FloatDomain, IntDomain};
use crate::scaling::{self, SafetyScale, SplitRange};

/// Options for [`floats`].
///
/// A large factor of 1 keeps the whole magnitude range; linear factor `k`
/// keeps only the `1/k` fraction nearest zero, and log factor `k` divides
/// the edge exponents by `k`. The small factor pushes the excluded
/// near-zero boundary farther out instead.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatOptions {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    /// Boundary of the excluded band around zero; defaults to the resolved
    /// domain's smallest normal magnitude.
    pub abs_smallest_val: Option<f64>,
    pub allow_nan: bool,
    pub allow_inf: bool,
    pub allow_subnormal: bool,
    pub exclude_min: bool,
    pub exclude_max: bool,
    pub large_abs_safety_factor: f64,
    pub small_abs_safety_factor: f64,
    pub safety_factor_scale: SafetyScale,
}

impl Default for FloatOptions {
    fn default() -> Self {
        FloatOptions {
            min_value: None,
            max_value: None,
            abs_smallest_val: None,
            allow_nan: false,
            allow_inf: false,
            allow_subnormal: false,
            exclude_min: true,
            exclude_max: true,
            large_abs_safety_factor: 1.1,
            small_abs_safety_factor: 1.1,
            safety_factor_scale: SafetyScale::Linear,
        }
    }
}

/// Draw one float from a randomly resolved float domain, a safety margin
/// inside its limits and outside the near-zero band.
pub fn floats<S: DrawSource>(source: &mut S, options: &FloatOptions) -> Result<f64, DrawError> {
    let domain = FloatDomain::resolve(source)?;
    let (min_value, max_value, abs_smallest_val) = scaling::apply_safety_factor_float(
        &domain,
        options.min_value,
        options.max_value,
        options.abs_smallest_val,
        options.large_abs_safety_factor,
        options.small_abs_safety_factor,
        options.safety_factor_scale,
    )?;
    // Pin the working values to the draw width, as the final value will be.
    let min_value = domain.width.round(min_value);
    let max_value = domain.width.round(max_value);
    let abs_smallest_val = domain.width.round(abs_smallest_val);

    let (min_value, max_value) =
        match scaling::split_at_zero(min_value, max_value, abs_smallest_val) {
            SplitRange::Whole {
                min_value,
                max_value,
            } => (min_value, max_value),
            SplitRange::Split { low, high } => {
                if source.choose(2)? == 0 {
                    low
                } else {
                    high
                }
            }
        };

    source.draw_float(&FloatConstraints {
        min_value,
        max_value,
        width: domain.width,
        allow_nan: options.allow_nan,
        allow_inf: options.allow_inf,
        allow_subnormal: options.allow_subnormal,
        exclude_min: options.exclude_min,
        exclude_max: options.exclude_max,
    })
}

/// Options for [`ints`].
#[derive(Debug, Clone, PartialEq)]
pub struct IntOptions {
    pub min_value: Option<i128>,
    pub max_value: Option<i128>,
    pub safety_factor: f64,
    /// `None` skips scaling, except that a fully unbounded request always
    /// scales linearly.
    pub safety_factor_scale: Option<SafetyScale>,
}

impl Default for IntOptions {
    fn default() -> Self {
        IntOptions {
            min_value: None,
            max_value: None,
            safety_factor: 1.1,
            safety_factor_scale: None,
        }
    }
}

/// Draw one integer from a randomly resolved integer domain. Integers carry
/// no near-zero precision band, so there is no splitting.
pub fn ints<S: DrawSource>(source: &mut S, options: &IntOptions) -> Result<i128, DrawError> {
    let domain = IntDomain::resolve(source)?;
    let scale = if options.min_value.is_none() && options.max_value.is_none() {
        // An unbounded request always gets a safety margin.
        Some(SafetyScale::Linear)
    } else {
        options.safety_factor_scale
    };
    let (min_value, max_value) = match scale {
        Some(scale) => scaling::apply_safety_factor_int(
            &domain,
            options.min_value,
            options.max_value,
            options.safety_factor,
            scale,
        )?,
        None => {
            let min_value = options.min_value.unwrap_or(domain.min_value).max(domain.min_value);
            let max_value = options.max_value.unwrap_or(domain.max_value).min(domain.max_value);
            if min_value > max_value {
                return Err(DrawError::InvalidRange);
            }
            (min_value, max_value)
        }
    };
    source.draw_int(min_value, max_value)
}

/// A value drawn by [`number`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(value) => value as f64,
            Number::Float(value) => value,
        }
    }

    pub fn is_int(self) -> bool {
        matches!(self, Number::Int(_))
    }
}

/// Options for [`number`].
#[derive(Debug, Clone, PartialEq)]
pub struct NumberOptions {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub large_abs_safety_factor: f64,
    /// No effect on the integer branch.
    pub small_abs_safety_factor: f64,
    pub safety_factor_scale: SafetyScale,
}

impl Default for NumberOptions {
    fn default() -> Self {
        NumberOptions {
            min_value: None,
            max_value: None,
            large_abs_safety_factor: 1.1,
            small_abs_safety_factor: 1.1,
            safety_factor_scale: SafetyScale::Linear,
        }
    }
}

/// Draw an integer or a float, chosen 50/50, with the same bound and
/// safety-factor semantics in both branches.
pub fn number<S: DrawSource>(source: &mut S, options: &NumberOptions) -> Result<Number, DrawError> {
    if options.min_value.map_or(false, f64::is_nan) || options.max_value.map_or(false, f64::is_nan)
    {
        return Err(DrawError::InvalidRange);
    }
    if source.choose(2)? == 0 {
        // Fractional bounds tighten inward for the integer branch.
        let min_value = options.min_value.map(|v| v.ceil() as i128);
        let max_value = options.max_value.map(|v| v.floor() as i128);
        ints(
            source,
            &IntOptions {
                min_value,
                max_value,
                safety_factor: options.large_abs_safety_factor,
                safety_factor_scale: Some(options.safety_factor_scale),
            },
        )
        .map(Number::Int)
    } else {
        floats(
            source,
            &FloatOptions {
                min_value: options.min_value,
                max_value: options.max_value,
                large_abs_safety_factor: options.large_abs_safety_factor,
                small_abs_safety_factor: options.small_abs_safety_factor,
                safety_factor_scale: options.safety_factor_scale,
                ..FloatOptions::default()
            },
        )
        .map(Number::Float)
    }
}
