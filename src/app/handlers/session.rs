use log::{debug, error, info, warn};

use crate::app::calibrator::Calibrator;
use crate::config::ShortCapturePolicy;
use crate::estimator::{self, EstimateError};
use crate::plotter::TraceSink;
use crate::report;
use crate::types::{RenderPayload, Sample};

pub struct SessionHandler;

impl SessionHandler {
    pub fn handle_started<S: TraceSink>(app: &mut Calibrator<S>) {
        println!("\n{}", report::recording_started());
        app.log_session("recording");
    }

    pub fn handle_too_short<S: TraceSink>(app: &mut Calibrator<S>, samples: usize) {
        match app.config.short_capture {
            ShortCapturePolicy::Warn => {
                println!("{}", report::too_short(samples, app.config.min_samples));
                warn!("Discarded short capture with {} samples", samples);
            }
            ShortCapturePolicy::Silent => {
                debug!("Silently discarded short capture with {} samples", samples);
            }
        }
    }

    /// 计算角度并显示轨迹，显示期间暂停监听
    pub fn handle_ready<S: TraceSink>(app: &mut Calibrator<S>, samples: Vec<Sample>) {
        let fit = match estimator::estimate(&samples) {
            Ok(fit) => fit,
            Err(EstimateError::EmptyBuffer) => {
                app.log_session("empty buffer, nothing to estimate");
                return;
            }
            Err(e) => {
                println!("{}", report::computation_error(&e.to_string()));
                warn!("Session #{} fit failed: {}", app.sessions, e);
                return;
            }
        };

        info!(
            "Session #{}: {} samples, slope {:.5}, angle {:.3} deg",
            app.sessions,
            samples.len(),
            fit.slope,
            fit.angle_degrees
        );
        report::print_lines(&report::fit_summary(&fit, samples.len()));

        let payload = RenderPayload::new(&samples, &fit);

        // 防止关闭窗口时的点击触发新的采集
        app.gate.pause();
        if let Err(e) = app.sink.show(&payload) {
            error!("Failed to display trace: {}", e);
        }
        app.gate.resume();
        app.log_session("trace closed");
    }
}
