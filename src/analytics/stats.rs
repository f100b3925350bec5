//! Shared numeric kernels for the analytics module

use statrs::statistics::Statistics;

/// An ordinary least-squares line fit over `(index, value)` pairs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    /// Change in value per index step
    pub slope: f64,

    /// Fitted value at index 0
    pub intercept: f64,

    /// Coefficient of determination in [0, 1]; a zero-variance series
    /// is defined as 0 (no explainable variance)
    pub r_squared: f64,
}

impl LineFit {
    /// Fitted value at an arbitrary (possibly fractional or future) index
    #[must_use]
    pub fn value_at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Arithmetic mean; 0 for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().mean()
}

/// Population standard deviation; 0 for fewer than two values
#[must_use]
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.iter().population_std_dev()
}

/// Fit a least-squares line through `(0, values[0]) .. (n-1, values[n-1])`.
///
/// Returns `None` for fewer than two points, where a slope is undefined.
#[must_use]
pub fn fit_line(values: &[f64]) -> Option<LineFit> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let n_f64 = n as f64;
    let sum_x: f64 = (0..n).map(|x| x as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(x, y)| x as f64 * y).sum();
    let sum_x2: f64 = (0..n).map(|x| (x as f64) * (x as f64)).sum();

    // The x values are distinct indices, so the denominator is nonzero
    let slope = (n_f64 * sum_xy - sum_x * sum_y) / (n_f64 * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n_f64;

    let mean_y = sum_y / n_f64;
    let ss_tot: f64 = values.iter().map(|y| (y - mean_y).powi(2)).sum();
    let ss_res: f64 = values
        .iter()
        .enumerate()
        .map(|(x, y)| {
            let fitted = intercept + slope * x as f64;
            (y - fitted).powi(2)
        })
        .sum();

    let r_squared = if ss_tot > f64::EPSILON {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Some(LineFit {
        slope,
        intercept,
        r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean() {
        assert!((mean(&[70.0, 72.0, 74.0]) - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_population_std_dev() {
        // Alternating +-20 around a mean of 50
        let values = [30.0, 70.0, 30.0, 70.0];
        assert!((population_std_dev(&values) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_std_dev_single_point_is_zero() {
        assert_eq!(population_std_dev(&[42.0]), 0.0);
    }

    #[test]
    fn test_fit_line_exact() {
        let fit = fit_line(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
        assert!((fit.slope - 10.0).abs() < 1e-9);
        assert!((fit.intercept - 10.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
        assert!((fit.value_at(6.0) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_line_flat_has_zero_r_squared() {
        let fit = fit_line(&[50.0, 50.0, 50.0, 50.0]).unwrap();
        assert!(fit.slope.abs() < 1e-9);
        assert_eq!(fit.r_squared, 0.0);
    }

    #[test]
    fn test_fit_line_insufficient_points() {
        assert!(fit_line(&[]).is_none());
        assert!(fit_line(&[1.0]).is_none());
    }

    #[test]
    fn test_fit_line_noisy_has_partial_r_squared() {
        let fit = fit_line(&[10.0, 30.0, 15.0, 40.0, 25.0]).unwrap();
        assert!(fit.r_squared > 0.0);
        assert!(fit.r_squared < 1.0);
    }
}
