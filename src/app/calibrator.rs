use crossbeam_channel::{select, Receiver};
use log::{debug, info};
use std::sync::Arc;

use crate::config::{CaptureConfig, CaptureMode};
use crate::listener::ListenerGate;
use crate::plotter::TraceSink;
use crate::types::InputEvent;
use super::handlers::SessionHandler;
use super::state::{CaptureMachine, CaptureOutcome};

/// 控制循环结束的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// 收到 Ctrl+C
    Interrupted,
    /// 单次模式下完成了一次采集
    Completed,
    /// 输入源已关闭（监听线程退出）
    SourceClosed,
}

/// Single-threaded owner of the capture state machine.
///
/// Waits on the event channel and the shutdown channel at the same time, so
/// nothing is polled and a session is acted on exactly once.
pub struct Calibrator<S: TraceSink> {
    pub machine: CaptureMachine,
    pub config: CaptureConfig,
    pub gate: Arc<ListenerGate>,
    pub sink: S,
    pub sessions: usize,
    events: Receiver<InputEvent>,
    shutdown: Receiver<()>,
}

impl<S: TraceSink> Calibrator<S> {
    pub fn new(
        config: CaptureConfig,
        events: Receiver<InputEvent>,
        shutdown: Receiver<()>,
        gate: Arc<ListenerGate>,
        sink: S,
    ) -> Self {
        Self {
            machine: CaptureMachine::new(config.min_samples),
            config,
            gate,
            sink,
            sessions: 0,
            events,
            shutdown,
        }
    }

    pub fn run(&mut self) -> RunOutcome {
        info!("Waiting for a left-button gesture ({:?} mode)", self.config.mode);

        // select! 持有接收端的借用，这里先克隆出来
        let events = self.events.clone();
        let shutdown = self.shutdown.clone();

        loop {
            select! {
                recv(shutdown) -> _ => {
                    info!("Shutdown requested");
                    if self.machine.is_recording() {
                        info!("Discarding capture in progress ({} samples)", self.machine.sample_count());
                    }
                    return RunOutcome::Interrupted;
                }
                recv(events) -> message => match message {
                    Ok(event) => {
                        if self.handle_event(event) {
                            return RunOutcome::Completed;
                        }
                    }
                    Err(_) => {
                        info!("Input source closed");
                        return RunOutcome::SourceClosed;
                    }
                },
            }
        }
    }

    /// 处理单个事件，单次模式下完成采集时返回 true
    fn handle_event(&mut self, event: InputEvent) -> bool {
        let was_recording = self.machine.is_recording();

        match self.machine.handle(event) {
            Some(CaptureOutcome::Ready(samples)) => {
                self.sessions += 1;
                SessionHandler::handle_ready(self, samples);
                self.config.mode == CaptureMode::SingleShot
            }
            Some(CaptureOutcome::TooShort { samples }) => {
                SessionHandler::handle_too_short(self, samples);
                false
            }
            None => {
                if !was_recording && self.machine.is_recording() {
                    SessionHandler::handle_started(self);
                }
                false
            }
        }
    }

    pub(crate) fn log_session(&self, message: &str) {
        debug!("session #{}: {}", self.sessions, message);
    }
}
