use crate::types::{FitResult, Sample};

/// 拟合失败的原因
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("no samples to fit")]
    EmptyBuffer,
    #[error("need at least 2 samples to fit a line, got {samples}")]
    TooFewPoints { samples: usize },
    #[error("sample buffer contains non-finite coordinates")]
    NonFinite,
    #[error("regression is degenerate (x values have no spread)")]
    Degenerate,
}

/// Ordinary least-squares fit of `y = slope * x + intercept`.
///
/// Sums are taken around the means so large screen coordinates do not eat
/// the precision of the slope.
pub fn fit_line(samples: &[Sample]) -> Result<(f64, f64), EstimateError> {
    if samples.is_empty() {
        return Err(EstimateError::EmptyBuffer);
    }
    if samples.len() < 2 {
        return Err(EstimateError::TooFewPoints { samples: samples.len() });
    }
    if !samples.iter().all(Sample::is_finite) {
        return Err(EstimateError::NonFinite);
    }

    let n = samples.len() as f64;
    let mean_x = samples.iter().map(|s| s.x).sum::<f64>() / n;
    let mean_y = samples.iter().map(|s| s.y).sum::<f64>() / n;

    let (sxx, sxy, sum_x2) = samples.iter().fold((0.0, 0.0, 0.0), |(sxx, sxy, sum_x2), s| {
        let dx = s.x - mean_x;
        (sxx + dx * dx, sxy + dx * (s.y - mean_y), sum_x2 + s.x * s.x)
    });

    // x 方差相对于量级可以忽略时视为奇异：Σ(x-x̄)² 必须大于 ε·Σx²，
    // 即 x 的离散度要高于坐标本身的舍入误差。屏幕像素坐标远在此界限之内。
    if !(sxx > f64::EPSILON * sum_x2) {
        return Err(EstimateError::Degenerate);
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(EstimateError::Degenerate);
    }

    Ok((slope, intercept))
}

pub fn estimate(samples: &[Sample]) -> Result<FitResult, EstimateError> {
    let (slope, intercept) = fit_line(samples)?;
    Ok(FitResult::new(slope, intercept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Verdict;
    use rand::Rng;

    fn line(slope: f64, intercept: f64, count: usize) -> Vec<Sample> {
        (0..count)
            .map(|i| {
                let x = i as f64 * 7.0 - 30.0;
                Sample::new(x, slope * x + intercept)
            })
            .collect()
    }

    #[test]
    fn collinear_points_recover_slope_and_intercept() {
        for &(m, b) in &[(0.1, 0.0), (-2.5, 40.0), (0.0, 300.0), (13.0, -7.5)] {
            let fit = estimate(&line(m, b, 20)).unwrap();
            assert!((fit.slope - m).abs() < 1e-9, "slope {} vs {}", fit.slope, m);
            assert!((fit.intercept - b).abs() < 1e-7, "intercept {} vs {}", fit.intercept, b);
        }
    }

    #[test]
    fn angle_sign_matches_slope_sign() {
        assert!(estimate(&line(0.03, 1.0, 12)).unwrap().angle_degrees > 0.0);
        assert!(estimate(&line(-0.03, 1.0, 12)).unwrap().angle_degrees < 0.0);

        let flat = estimate(&line(0.0, 512.0, 12)).unwrap();
        assert_eq!(flat.angle_degrees, 0.0);
        assert_eq!(flat.verdict(), Verdict::Horizontal);
    }

    #[test]
    fn twelve_point_gesture_reads_five_point_seven_degrees() {
        let samples: Vec<Sample> = (0..12).map(|i| Sample::new(i as f64 * 10.0, i as f64)).collect();
        let fit = estimate(&samples).unwrap();

        assert!((fit.slope - 0.1).abs() < 1e-12);
        assert!((fit.angle_degrees - 5.7106).abs() < 1e-3);
        assert_eq!(fit.verdict(), Verdict::Clockwise);
        assert!((fit.correction_degrees() + 5.71).abs() < 1e-2);
    }

    #[test]
    fn large_screen_offsets_keep_precision() {
        let samples: Vec<Sample> = (0..50)
            .map(|i| Sample::new(1.0e6 + i as f64, 2.0e6 - 0.5 * i as f64))
            .collect();
        let fit = estimate(&samples).unwrap();
        assert!((fit.slope + 0.5).abs() < 1e-6);
    }

    #[test]
    fn noisy_horizontal_swipe_stays_close_to_true_angle() {
        let mut rng = rand::rng();
        let true_slope = (2.0f64).to_radians().tan();
        let samples: Vec<Sample> = (0..400)
            .map(|i| {
                let x = 200.0 + i as f64 * 2.0;
                let jitter: f64 = rng.random_range(-1.0..1.0);
                Sample::new(x, 300.0 + true_slope * x + jitter)
            })
            .collect();

        let fit = estimate(&samples).unwrap();
        assert!((fit.angle_degrees - 2.0).abs() < 0.2, "angle {}", fit.angle_degrees);
    }

    #[test]
    fn spread_below_rounding_of_coordinates_is_degenerate() {
        // x ≈ 1e9 时 ε·Σx² ≈ 2.7e3，0.1 像素的间隔只有 Σ(x-x̄)² ≈ 1.43
        let samples: Vec<Sample> = (0..12).map(|i| Sample::new(1.0e9 + i as f64 * 0.1, 0.0)).collect();
        assert_eq!(estimate(&samples), Err(EstimateError::Degenerate));
    }

    #[test]
    fn spread_above_rounding_of_coordinates_fits() {
        // 同样的量级，100 像素间隔时 Σ(x-x̄)² ≈ 1.43e6，远大于界限
        let samples: Vec<Sample> = (0..12)
            .map(|i| Sample::new(1.0e9 + i as f64 * 100.0, i as f64))
            .collect();
        let fit = estimate(&samples).unwrap();
        assert!((fit.slope - 0.01).abs() < 1e-9);
    }

    #[test]
    fn identical_points_are_degenerate() {
        let samples = vec![Sample::new(640.0, 360.0); 15];
        assert_eq!(estimate(&samples), Err(EstimateError::Degenerate));
    }

    #[test]
    fn vertical_gesture_is_degenerate() {
        let samples: Vec<Sample> = (0..15).map(|i| Sample::new(100.0, i as f64)).collect();
        assert_eq!(estimate(&samples), Err(EstimateError::Degenerate));
    }

    #[test]
    fn empty_and_tiny_buffers_are_rejected() {
        assert_eq!(estimate(&[]), Err(EstimateError::EmptyBuffer));
        assert_eq!(
            estimate(&[Sample::new(1.0, 1.0)]),
            Err(EstimateError::TooFewPoints { samples: 1 })
        );
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let mut samples = line(1.0, 0.0, 12);
        samples[4].y = f64::NAN;
        assert_eq!(estimate(&samples), Err(EstimateError::NonFinite));
    }
}
