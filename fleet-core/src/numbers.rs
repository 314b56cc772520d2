//! Numeric helpers centralizing clamping and percentage math.

use num_traits::{Float, cast::cast};

/// Clamp a value into `[min, max]`. NaN maps to `min`; infinities saturate.
#[must_use]
pub fn clamp_finite<T: Float>(value: T, min: T, max: T) -> T {
    if value.is_nan() {
        return min;
    }
    if value == T::infinity() {
        return max;
    }
    value.max(min).min(max)
}

/// Express `part` as a percentage of `whole`, returning zero when `whole` is not positive.
#[must_use]
pub fn percent_of<T: Float>(part: T, whole: T) -> T {
    if !whole.is_finite() || whole <= T::zero() {
        return T::zero();
    }
    let hundred = cast::<f64, T>(100.0).unwrap_or_else(T::zero);
    let percent = part * hundred / whole;
    if percent.is_finite() {
        percent
    } else {
        // `part * 100` overflowed; divide first for near-max magnitudes.
        part / whole * hundred
    }
}

/// True for amounts an action may apply: finite and not negative.
#[must_use]
pub fn is_valid_amount<T: Float>(amount: T) -> bool {
    amount.is_finite() && amount >= T::zero()
}

/// True for capacities a vehicle may be built with: finite and strictly positive.
#[must_use]
pub fn is_valid_capacity<T: Float>(capacity: T) -> bool {
    capacity.is_finite() && capacity > T::zero()
}
