use crate::types::{FitResult, Verdict};
use crate::utils::{format_degrees, format_signed_degrees};

/// 启动时的操作说明
pub fn banner(min_samples: usize, single_shot: bool) -> Vec<String> {
    let mut lines = vec![
        "=== Mouse Sensor Angle Calibration (left button) ===".to_string(),
        "How to use:".to_string(),
        "1. Press and hold the LEFT mouse button.".to_string(),
        "2. Using muscle memory, swipe the mouse left and right as horizontally as you can.".to_string(),
        "3. Release the LEFT mouse button.".to_string(),
        format!("4. If more than {} samples were captured, the angle is computed and the trace is shown.", min_samples),
    ];
    if single_shot {
        lines.push("5. Closing the trace window ends the program.".to_string());
    } else {
        lines.push("5. Close the trace window to run another test. Press Ctrl+C to quit.".to_string());
    }
    lines.push("-".repeat(50));
    lines
}

pub fn recording_started() -> String {
    "[Recording] Move the mouse left and right...".to_string()
}

pub fn too_short(samples: usize, min_samples: usize) -> String {
    format!(
        "Capture too short: {} samples (need more than {}). Hold the left button and try again.",
        samples, min_samples
    )
}

pub fn computation_error(reason: &str) -> String {
    format!("Computation error, the captured data looks unusable: {}", reason)
}

/// 拟合结果与修正建议
pub fn fit_summary(fit: &FitResult, samples: usize) -> Vec<String> {
    let mut lines = vec![
        "-".repeat(30),
        format!("Samples: {}", samples),
        format!("Fitted slope: {:.5}", fit.slope),
        format!("Detected deviation: {}", format_degrees(fit.angle_degrees, 2)),
    ];

    let verdict = fit.verdict();
    lines.push(format!("Verdict: {}.", verdict.describe()));
    match verdict {
        Verdict::Clockwise => lines.push(format!(
            "Suggestion: rotate the angle by {} in the driver (counter-clockwise correction).",
            format_signed_degrees(fit.correction_degrees(), 1)
        )),
        Verdict::CounterClockwise => lines.push(format!(
            "Suggestion: rotate the angle by {} in the driver (clockwise correction).",
            format_signed_degrees(fit.correction_degrees(), 1)
        )),
        Verdict::Horizontal => {}
    }
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clockwise_summary_suggests_negative_correction() {
        let lines = fit_summary(&FitResult::new(0.1, 0.0), 12);
        assert!(lines.iter().any(|l| l == "Fitted slope: 0.10000"));
        assert!(lines.iter().any(|l| l == "Detected deviation: 5.71°"));
        assert!(lines.iter().any(|l| l.contains("clockwise") && l.starts_with("Verdict")));
        assert!(lines.iter().any(|l| l.contains("-5.7°")));
    }

    #[test]
    fn counter_clockwise_summary_suggests_positive_correction() {
        let lines = fit_summary(&FitResult::new(-0.1, 0.0), 12);
        assert!(lines.iter().any(|l| l.contains("counter-clockwise")));
        assert!(lines.iter().any(|l| l.contains("+5.7°")));
    }

    #[test]
    fn horizontal_summary_has_no_suggestion() {
        let lines = fit_summary(&FitResult::new(0.0, 10.0), 30);
        assert!(lines.iter().any(|l| l.contains("perfectly horizontal")));
        assert!(!lines.iter().any(|l| l.starts_with("Suggestion")));
    }

    #[test]
    fn banner_mentions_mode_specific_exit() {
        assert!(banner(10, true).iter().any(|l| l.contains("ends the program")));
        assert!(banner(10, false).iter().any(|l| l.contains("Ctrl+C")));
    }

    #[test]
    fn too_short_notice_names_threshold() {
        assert!(too_short(5, 10).contains("5 samples (need more than 10)"));
    }
}
