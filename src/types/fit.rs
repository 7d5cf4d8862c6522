use super::Sample;

/// 最小二乘拟合结果，每次采集重新计算，不做持久化
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    pub angle_degrees: f64,
}

impl FitResult {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self {
            slope,
            intercept,
            angle_degrees: slope.atan().to_degrees(),
        }
    }

    /// 建议在驱动中设置的旋转角度（与偏转角相反）
    pub fn correction_degrees(&self) -> f64 {
        -self.angle_degrees
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_angle(self.angle_degrees)
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Direction the sensor axis is rotated, judged from the sign of the angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// 顺时针歪了（右边偏低），需要负向修正
    Clockwise,
    /// 逆时针歪了（右边偏高），需要正向修正
    CounterClockwise,
    Horizontal,
}

impl Verdict {
    pub fn from_angle(angle_degrees: f64) -> Self {
        if angle_degrees > 0.0 {
            Verdict::Clockwise
        } else if angle_degrees < 0.0 {
            Verdict::CounterClockwise
        } else {
            Verdict::Horizontal
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Verdict::Clockwise => "sensor is rotated clockwise (right side sits lower)",
            Verdict::CounterClockwise => "sensor is rotated counter-clockwise (right side sits higher)",
            Verdict::Horizontal => "perfectly horizontal, no correction needed",
        }
    }
}

/// Everything the trace viewer needs to draw one session.
///
/// Screen coordinates grow downward, so every y value here is negated to
/// show the gesture the way the user saw it.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPayload {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<[f64; 2]>,
    pub fit_line: Vec<[f64; 2]>,
}

impl RenderPayload {
    pub fn new(samples: &[Sample], fit: &FitResult) -> Self {
        let points: Vec<[f64; 2]> = samples.iter().map(|s| [s.x, -s.y]).collect();

        let (x_min, x_max) = samples.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), s| (min.min(s.x), max.max(s.x)),
        );

        let fit_line = if x_min.is_finite() && x_max.is_finite() {
            vec![[x_min, -fit.evaluate(x_min)], [x_max, -fit.evaluate(x_max)]]
        } else {
            Vec::new()
        };

        Self {
            title: format!("Mouse Trace (Correction: {:.2} deg)", fit.correction_degrees()),
            x_label: "X Pixels".to_string(),
            y_label: "Y Pixels (Inverted)".to_string(),
            points,
            fit_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_follows_angle_sign() {
        assert_eq!(Verdict::from_angle(3.2), Verdict::Clockwise);
        assert_eq!(Verdict::from_angle(-0.01), Verdict::CounterClockwise);
        assert_eq!(Verdict::from_angle(0.0), Verdict::Horizontal);
    }

    #[test]
    fn correction_is_negated_angle() {
        let fit = FitResult::new(-0.25, 4.0);
        assert!(fit.angle_degrees < 0.0);
        assert_eq!(fit.correction_degrees(), -fit.angle_degrees);
        assert_eq!(fit.verdict(), Verdict::CounterClockwise);
    }

    #[test]
    fn payload_inverts_y_and_spans_x_range() {
        let samples = vec![Sample::new(5.0, 2.0), Sample::new(-5.0, 0.0), Sample::new(15.0, 4.0)];
        let fit = FitResult::new(0.2, 1.0);
        let payload = RenderPayload::new(&samples, &fit);

        assert_eq!(payload.points[0], [5.0, -2.0]);
        assert_eq!(payload.fit_line.len(), 2);
        assert_eq!(payload.fit_line[0][0], -5.0);
        assert_eq!(payload.fit_line[1][0], 15.0);
        assert!((payload.fit_line[1][1] - (-4.0)).abs() < 1e-12);
        assert_eq!(payload.y_label, "Y Pixels (Inverted)");
    }

    #[test]
    fn payload_title_carries_correction() {
        let fit = FitResult::new(0.1, 0.0);
        let payload = RenderPayload::new(&[Sample::new(0.0, 0.0), Sample::new(1.0, 0.1)], &fit);
        assert_eq!(payload.title, "Mouse Trace (Correction: -5.71 deg)");
    }
}
