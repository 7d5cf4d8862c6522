mod app;
mod config;
mod estimator;
mod listener;
mod logger;
mod plotter;
mod report;
mod types;
mod utils;

use crossbeam_channel::bounded;
use log::{error, info, warn};
use std::sync::Arc;

use app::{Calibrator, RunOutcome};
use config::{CaptureMode, ConfigManager};
use listener::ListenerGate;
use plotter::PlotWindow;

fn main() {
    logger::init_logger();
    info!("Application starting");

    let config = match ConfigManager::from_env() {
        Ok(manager) => {
            if let Some(path) = manager.config_path() {
                info!("Loaded configuration from {}", path.display());
            }
            manager.get_config().clone()
        }
        Err(e) => {
            warn!("Failed to load configuration, using defaults: {}", e);
            ConfigManager::new().get_config().clone()
        }
    };

    let (event_sender, event_receiver) = bounded(config.channels.event_channel_capacity);
    let (shutdown_sender, shutdown_receiver) = bounded(1);
    let gate = ListenerGate::new();

    if let Err(e) = ctrlc::set_handler(move || {
        let _ = shutdown_sender.try_send(());
    }) {
        warn!("Failed to install Ctrl+C handler: {}", e);
    }

    // 监听线程无法被回收，退出时只关闭闸门
    if let Err(e) = listener::spawn_listener(event_sender, Arc::clone(&gate)) {
        error!("{}", e);
        return;
    }

    let single_shot = config.capture.mode == CaptureMode::SingleShot;
    report::print_lines(&report::banner(config.capture.min_samples, single_shot));

    let sink = PlotWindow::new(config.window.clone(), config.plot.clone());
    let mut calibrator = Calibrator::new(
        config.capture.clone(),
        event_receiver,
        shutdown_receiver,
        Arc::clone(&gate),
        sink,
    );

    let outcome = calibrator.run();
    gate.stop();

    match outcome {
        RunOutcome::Interrupted => println!("\nProgram exited."),
        RunOutcome::Completed => println!("Calibration finished."),
        RunOutcome::SourceClosed => {
            println!("Mouse input is no longer available, exiting.");
            warn!("Input listener stopped; check input-monitoring permissions");
        }
    }
    info!("Application exiting after {} session(s)", calibrator.sessions);
}
