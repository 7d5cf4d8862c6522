use crossbeam_channel::{Sender, TrySendError};
use log::{debug, error, info, warn};
use rdev::{Button, EventType};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::types::{InputEvent, MouseButton};

#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("input hook failed: {0}")]
    Hook(String),
    #[error("failed to spawn listener thread: {0}")]
    Spawn(std::io::Error),
}

/// Shared switch between the controller and the hook thread.
///
/// The platform hook cannot be torn down once installed, so pausing and
/// stopping both work by dropping events at the source.
#[derive(Debug, Default)]
pub struct ListenerGate {
    paused: AtomicBool,
    stopped: AtomicBool,
}

impl ListenerGate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn is_open(&self) -> bool {
        !self.is_paused() && !self.is_stopped()
    }
}

/// 把 rdev 的原始事件转换为 InputEvent
///
/// 按键事件本身不带坐标，所以记住最后一次移动的位置
#[derive(Debug, Default)]
pub struct EventTranslator {
    last_x: f64,
    last_y: f64,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event_type: &EventType) -> Option<InputEvent> {
        match *event_type {
            EventType::MouseMove { x, y } => {
                self.last_x = x;
                self.last_y = y;
                Some(InputEvent::Move { x, y })
            }
            EventType::ButtonPress(button) => Some(self.click(button, true)),
            EventType::ButtonRelease(button) => Some(self.click(button, false)),
            _ => None,
        }
    }

    fn click(&self, button: Button, pressed: bool) -> InputEvent {
        InputEvent::Click {
            x: self.last_x,
            y: self.last_y,
            button: map_button(button),
            pressed,
        }
    }
}

fn map_button(button: Button) -> MouseButton {
    match button {
        Button::Left => MouseButton::Left,
        Button::Right => MouseButton::Right,
        Button::Middle => MouseButton::Middle,
        Button::Unknown(code) => MouseButton::Other(code),
    }
}

/// Installs the global hook on its own thread.
///
/// When the hook fails the thread ends and drops `sender`, which the
/// controller observes as a closed event source.
pub fn spawn_listener(
    sender: Sender<InputEvent>,
    gate: Arc<ListenerGate>,
) -> Result<JoinHandle<()>, ListenerError> {
    thread::Builder::new()
        .name("input-listener".to_string())
        .spawn(move || {
            info!("Input listener started");
            if let Err(e) = run_hook(sender, gate) {
                error!("{}", e);
            }
        })
        .map_err(ListenerError::Spawn)
}

/// 单个钩子事件的转发结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forwarded {
    Sent,
    /// 不是鼠标事件，或者闸门已关闭
    Skipped,
    /// 通道已满，事件被丢弃
    Dropped,
    /// 接收端已关闭，闸门随之关闭
    Closed,
}

/// Pushes one hook event to the controller without ever blocking.
///
/// Runs inside the OS hook, so a full channel drops the event instead of
/// stalling system pointer input.
pub fn forward(
    translator: &mut EventTranslator,
    gate: &ListenerGate,
    sender: &Sender<InputEvent>,
    event_type: &EventType,
) -> Forwarded {
    // 位置要一直跟踪，暂停期间也不例外
    let Some(input) = translator.translate(event_type) else {
        return Forwarded::Skipped;
    };
    if !gate.is_open() {
        return Forwarded::Skipped;
    }

    match sender.try_send(input) {
        Ok(()) => Forwarded::Sent,
        Err(TrySendError::Full(_)) => {
            warn!("Event channel full, dropping {:?}", input);
            Forwarded::Dropped
        }
        Err(TrySendError::Disconnected(_)) => {
            // 接收端已关闭，说明控制循环已退出
            debug!("Event channel closed, stopping listener gate");
            gate.stop();
            Forwarded::Closed
        }
    }
}

fn run_hook(sender: Sender<InputEvent>, gate: Arc<ListenerGate>) -> Result<(), ListenerError> {
    let mut translator = EventTranslator::new();

    rdev::listen(move |event| {
        forward(&mut translator, &gate, &sender, &event.event_type);
    })
    .map_err(|e| ListenerError::Hook(format!("{:?}", e)))
}
