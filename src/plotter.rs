use eframe::{egui, Frame};
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::config::{PlotConfig, WindowConfig};
use crate::types::RenderPayload;

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("trace viewer failed: {0}")]
    Viewer(String),
    #[error("nothing to draw")]
    EmptyPayload,
}

/// Output side of a calibration session. `show` blocks until the user is
/// done looking at the trace.
pub trait TraceSink {
    fn show(&mut self, payload: &RenderPayload) -> Result<(), DisplayError>;
}

fn color(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// 轨迹散点与拟合直线的绘制
pub struct TraceViewer {
    payload: RenderPayload,
    config: PlotConfig,
}

impl TraceViewer {
    pub fn new(payload: RenderPayload, config: PlotConfig) -> Self {
        Self { payload, config }
    }

    pub fn ui(&self, ui: &mut egui::Ui) {
        ui.heading(&self.payload.title);
        ui.add_space(6.0);

        let mut plot = Plot::new("mouse_trace")
            .legend(Legend::default())
            .x_axis_label(self.payload.x_label.clone())
            .y_axis_label(self.payload.y_label.clone())
            .show_grid(self.config.show_grid);
        if self.config.equal_aspect {
            plot = plot.data_aspect(1.0);
        }

        plot.show(ui, |plot_ui| {
            plot_ui.points(
                Points::new("Mouse Movement", PlotPoints::from(self.payload.points.clone()))
                    .radius(self.config.point_radius)
                    .color(color(self.config.colors.trace)),
            );

            if !self.payload.fit_line.is_empty() {
                plot_ui.line(
                    Line::new("Fitted Line", PlotPoints::from(self.payload.fit_line.clone()))
                        .color(color(self.config.colors.fit))
                        .width(self.config.line_width),
                );
            }
        });
    }
}

impl eframe::App for TraceViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 设置明亮模式主题
        ctx.set_visuals(egui::Visuals::light());

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}

/// 每次采集打开一个阻塞的 eframe 窗口，关闭后返回
pub struct PlotWindow {
    window: WindowConfig,
    plot: PlotConfig,
}

impl PlotWindow {
    pub fn new(window: WindowConfig, plot: PlotConfig) -> Self {
        Self { window, plot }
    }

    fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            vsync: true,
            renderer: eframe::Renderer::Glow,
            // 同一线程上可以多次打开窗口
            run_and_return: true,
            viewport: egui::ViewportBuilder::default()
                .with_title(self.window.title.clone())
                .with_inner_size([self.window.width, self.window.height])
                .with_resizable(true),
            ..Default::default()
        }
    }
}

impl TraceSink for PlotWindow {
    fn show(&mut self, payload: &RenderPayload) -> Result<(), DisplayError> {
        if payload.points.is_empty() {
            return Err(DisplayError::EmptyPayload);
        }

        let viewer = TraceViewer::new(payload.clone(), self.plot.clone());
        eframe::run_native(
            &self.window.title,
            self.native_options(),
            Box::new(|_cc| Ok(Box::new(viewer))),
        )
        .map_err(|e| DisplayError::Viewer(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FitResult, Sample};

    #[test]
    fn empty_payload_is_refused_before_opening_window() {
        let mut window = PlotWindow::new(WindowConfig::default(), PlotConfig::default());
        let payload = RenderPayload::new(&[], &FitResult::new(0.0, 0.0));
        assert!(matches!(window.show(&payload), Err(DisplayError::EmptyPayload)));
    }

    #[test]
    fn native_options_follow_window_config() {
        let window = PlotWindow::new(
            WindowConfig { width: 640.0, height: 480.0, title: "Trace".to_string() },
            PlotConfig::default(),
        );
        let options = window.native_options();
        assert!(options.run_and_return);
        assert_eq!(options.viewport.inner_size, Some(egui::vec2(640.0, 480.0)));
    }

    #[test]
    fn viewer_keeps_payload_for_drawing() {
        let samples: Vec<Sample> = (0..12).map(|i| Sample::new(i as f64, 0.5 * i as f64)).collect();
        let payload = RenderPayload::new(&samples, &FitResult::new(0.5, 0.0));
        let viewer = TraceViewer::new(payload.clone(), PlotConfig::default());
        assert_eq!(viewer.payload, payload);
        assert!(viewer.config.equal_aspect);
    }
}
