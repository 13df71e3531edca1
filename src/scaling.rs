// Range adjustment: safety-factor scaling away from a domain's limits, and
// the zero-band split for float windows.
//
// A large factor shrinks the far-from-zero edges; a small factor pushes the
// excluded near-zero boundary farther out. In log mode both divide the
// exponent, which shrinks magnitudes toward 1 in either direction.

use crate::data::DrawError;
use crate::domain::{FloatDomain, IntDomain};

/// How a safety factor is applied to a window edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyScale {
    /// Divide the edge magnitude by the factor.
    Linear,
    /// Divide the edge exponent by the factor.
    Log,
}

fn check_factor(factor: f64) -> Result<(), DrawError> {
    if factor.is_finite() && factor >= 1.0 {
        Ok(())
    } else {
        Err(DrawError::InvalidFactor)
    }
}

// Exact mantissa/exponent decomposition: value = m * 2^e with m in [0.5, 1).
fn frexp(value: f64) -> (f64, i32) {
    if value == 0.0 || value.is_nan() || value.is_infinite() {
        return (value, 0);
    }
    let bits = value.to_bits();
    let exp_field = ((bits >> 52) & 0x7ff) as i32;
    if exp_field == 0 {
        // Subnormal: renormalize first.
        let (m, e) = frexp(value * 2f64.powi(64));
        return (m, e - 64);
    }
    let mantissa = f64::from_bits((bits & !(0x7ffu64 << 52)) | (1022u64 << 52));
    (mantissa, exp_field - 1022)
}

fn scale_edge(value: f64, factor: f64, scale: SafetyScale) -> f64 {
    match scale {
        SafetyScale::Linear => value / factor,
        SafetyScale::Log => value.abs().powf(1.0 / factor).copysign(value),
    }
}

/// Adjust a float window and its excluded-zero-band boundary.
///
/// Unstated bounds default to the domain limits; an unstated band boundary
/// defaults to the domain's smallest normal magnitude. The scaled window is
/// clamped into the domain (the type's own limits always win); a window that
/// comes out empty or inverted is surfaced, never swapped.
pub fn apply_safety_factor_float(
    domain: &FloatDomain,
    min_value: Option<f64>,
    max_value: Option<f64>,
    abs_smallest_val: Option<f64>,
    large_factor: f64,
    small_factor: f64,
    scale: SafetyScale,
) -> Result<(f64, f64, f64), DrawError> {
    check_factor(large_factor)?;
    check_factor(small_factor)?;
    let min_value = min_value.unwrap_or(domain.min_value);
    let max_value = max_value.unwrap_or(domain.max_value);
    let abs_smallest_val = abs_smallest_val.unwrap_or(domain.smallest_normal);
    if min_value.is_nan() || max_value.is_nan() || !(abs_smallest_val >= 0.0) {
        return Err(DrawError::InvalidRange);
    }

    let min_scaled = scale_edge(min_value, large_factor, scale);
    let max_scaled = scale_edge(max_value, large_factor, scale);
    let abs_smallest = match scale {
        SafetyScale::Linear => abs_smallest_val * small_factor,
        SafetyScale::Log => {
            let (m, e) = frexp(abs_smallest_val);
            m * 2f64.powf(f64::from(e) / small_factor)
        }
    };

    let min_clamped = min_scaled.max(domain.min_value);
    let max_clamped = max_scaled.min(domain.max_value);
    if min_clamped > max_clamped {
        log::trace!(
            "scaled window inverted: [{}, {}] from [{}, {}]",
            min_clamped,
            max_clamped,
            min_value,
            max_value
        );
        return Err(DrawError::InvalidRange);
    }
    Ok((min_clamped, max_clamped, abs_smallest))
}

/// Adjust an integer window. Integers carry no near-zero band, so only the
/// large factor applies. Scaled edges truncate toward zero, as the original
/// integral conversion does, then clamp into the domain.
pub fn apply_safety_factor_int(
    domain: &IntDomain,
    min_value: Option<i128>,
    max_value: Option<i128>,
    factor: f64,
    scale: SafetyScale,
) -> Result<(i128, i128), DrawError> {
    check_factor(factor)?;
    let min_scaled = scale_edge(min_value.unwrap_or(domain.min_value) as f64, factor, scale);
    let max_scaled = scale_edge(max_value.unwrap_or(domain.max_value) as f64, factor, scale);
    let min_clamped = clamp_to_domain(min_scaled.trunc(), domain);
    let max_clamped = clamp_to_domain(max_scaled.trunc(), domain);
    if min_clamped > max_clamped {
        return Err(DrawError::InvalidRange);
    }
    Ok((min_clamped, max_clamped))
}

fn clamp_to_domain(value: f64, domain: &IntDomain) -> i128 {
    // The saturating cast pins values beyond i128 before the domain clamp.
    (value as i128).max(domain.min_value).min(domain.max_value)
}

/// A float window after the excluded-zero-band decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitRange {
    /// The window does not straddle the excluded band.
    Whole { min_value: f64, max_value: f64 },
    /// The window straddles zero: draw from one side, chosen 50/50.
    Split { low: (f64, f64), high: (f64, f64) },
}

/// Decide whether a window must be split around the excluded zero band.
pub fn split_at_zero(min_value: f64, max_value: f64, abs_smallest_val: f64) -> SplitRange {
    if min_value > -abs_smallest_val || max_value < abs_smallest_val {
        SplitRange::Whole {
            min_value,
            max_value,
        }
    } else {
        SplitRange::Split {
            low: (min_value, -abs_smallest_val),
            high: (abs_smallest_val, max_value),
        }
    }
}
