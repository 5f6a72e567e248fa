//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into the inclusive range `[min, max]`.
///
/// Returns the clamped value and whether or not clamping was applied.
pub fn clamp<T>(value: T, min: T, max: T) -> (T, bool)
where
    T: Float
{
    if value > max {
        (max, true)
    }
    else if value < min {
        (min, true)
    }
    else {
        (value, false)
    }
}

/// Arithmetic mean of the values, or `None` if there are none.
pub fn mean<T, I>(values: I) -> Option<T>
where
    T: Float,
    I: IntoIterator<Item = T>
{
    let mut sum = T::zero();
    let mut count = 0usize;

    for v in values {
        sum = sum + v;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    T::from(count).map(|n| sum / n)
}

/// Move `current` a fraction `alpha` of the way towards `target`.
///
/// Applied once per cycle this is a first order exponential filter, after `k` applications the
/// remaining error is `(target - current) * (1 - alpha)^k`.
pub fn approach<T>(current: T, target: T, alpha: T) -> T
where
    T: Float
{
    current + (target - current) * alpha
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(10.0, -9.0, 9.0), (9.0, true));
        assert_eq!(clamp(-10.0, -9.0, 9.0), (-9.0, true));
        assert_eq!(clamp(3.0, -9.0, 9.0), (3.0, false));
        assert_eq!(clamp(9.0, -9.0, 9.0), (9.0, false));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(vec![1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
        assert_eq!(mean(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_approach() {
        let mut v = 0f64;
        for _ in 0..10 {
            v = approach(v, 1.0, 0.05);
        }
        assert!(((1.0 - v) - 0.95f64.powi(10)).abs() < 1e-12);
    }
}
