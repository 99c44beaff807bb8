/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use tea::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Converts an `f64` to `i64` by truncating toward zero.
///
/// Unlike a plain `as` cast this refuses values that would saturate:
/// non-finite values and values outside the `i64` range.
///
/// ## Errors
/// Returns `Err(error)` for `NaN`, infinities and out-of-range values.
///
/// ## Example
/// ```
/// use tea::util::num::f64_to_i64_truncated;
///
/// assert_eq!(f64_to_i64_truncated(3.7, ()), Ok(3));
/// assert_eq!(f64_to_i64_truncated(-3.7, ()), Ok(-3));
/// assert!(f64_to_i64_truncated(f64::NAN, ()).is_err());
/// assert!(f64_to_i64_truncated(1e20, ()).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_truncated<E>(value: f64, error: E) -> Result<i64, E> {
    if !value.is_finite() {
        return Err(error);
    }
    let truncated = value.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(error);
    }
    Ok(truncated as i64)
}
