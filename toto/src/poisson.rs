//! The Poisson probability mass function.

use crate::factorial::Factorial;

/// Probability of exactly `k` events given a mean rate of `lambda`.
#[inline]
pub fn univariate(k: u8, lambda: f64, factorial: &impl Factorial) -> f64 {
    lambda.powi(k as i32) * f64::exp(-lambda) / factorial.get(k) as f64
}

/// Populates `probs[k]` with the mass at `k` for every `k` in `0..probs.len()`. Mass beyond the
/// end of the slice is not accounted for; the slice will generally sum to slightly less than 1.
pub fn fill_univariate(lambda: f64, factorial: &impl Factorial, probs: &mut [f64]) {
    for (k, prob) in probs.iter_mut().enumerate() {
        *prob = univariate(k as u8, lambda, factorial);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factorial::Lookup;
    use crate::probs::SliceExt;
    use assert_float_eq::*;

    #[test]
    pub fn test_univariate() {
        assert_float_relative_eq!(
            0.36787944117144233,
            univariate(0, 1.0, &Lookup::default())
        );
        assert_float_relative_eq!(
            0.36787944117144233,
            univariate(1, 1.0, &Lookup::default())
        );
        assert_float_relative_eq!(
            0.18393972058572117,
            univariate(2, 1.0, &Lookup::default())
        );
        assert_float_relative_eq!(
            0.0820849986238988,
            univariate(0, 2.5, &Lookup::default())
        );
        assert_float_relative_eq!(
            0.205212496559747,
            univariate(1, 2.5, &Lookup::default())
        );
        assert_float_relative_eq!(
            0.25651562069968376,
            univariate(2, 2.5, &Lookup::default())
        );
    }

    #[test]
    pub fn zero_rate_puts_all_mass_on_nil() {
        assert_eq!(1.0, univariate(0, 0.0, &Lookup::default()));
        assert_eq!(0.0, univariate(3, 0.0, &Lookup::default()));
    }

    #[test]
    pub fn fill_truncates_tail() {
        let mut probs = [0.0; 10];
        fill_univariate(1.5, &Lookup::default(), &mut probs);
        assert_float_relative_eq!(univariate(4, 1.5, &Lookup::default()), probs[4]);
        let sum = probs.sum();
        assert!(sum < 1.0, "sum {sum} should fall short of 1");
        assert!(1.0 - sum < 1e-5, "tail {} too large", 1.0 - sum);
    }

    #[test]
    pub fn fill_empty_slice() {
        let mut probs: [f64; 0] = [];
        fill_univariate(1.5, &Lookup::default(), &mut probs);
        assert_eq!(0.0, probs.sum());
    }
}
