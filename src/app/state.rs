use crate::types::{InputEvent, MouseButton, Sample};

/// 采集状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Recording,
}

/// 一次按下-移动-松开手势结束时的结果
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// 数据点足够，缓冲区所有权交给下游
    Ready(Vec<Sample>),
    /// 数据点太少，缓冲区已丢弃
    TooShort { samples: usize },
}

/// Press/move/release accumulator for one capture session at a time.
///
/// Only left-button transitions matter. Moves outside a session are
/// ignored so stray pointer motion never lands in a buffer.
#[derive(Debug)]
pub struct CaptureMachine {
    state: CaptureState,
    buffer: Vec<Sample>,
    min_samples: usize,
}

impl CaptureMachine {
    pub fn new(min_samples: usize) -> Self {
        Self {
            state: CaptureState::Idle,
            buffer: Vec::new(),
            min_samples,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Recording
    }

    pub fn sample_count(&self) -> usize {
        self.buffer.len()
    }

    /// Feeds one event; returns an outcome only when a session ends.
    pub fn handle(&mut self, event: InputEvent) -> Option<CaptureOutcome> {
        match event {
            InputEvent::Move { x, y } => {
                if self.is_recording() {
                    self.buffer.push(Sample::new(x, y));
                }
                None
            }
            InputEvent::Click { button: MouseButton::Left, pressed: true, .. } => {
                self.start();
                None
            }
            InputEvent::Click { button: MouseButton::Left, pressed: false, .. } => self.finish(),
            InputEvent::Click { .. } => None,
        }
    }

    fn start(&mut self) {
        // 清空旧数据，重复按下也视为重新开始
        self.buffer.clear();
        self.state = CaptureState::Recording;
    }

    fn finish(&mut self) -> Option<CaptureOutcome> {
        if !self.is_recording() {
            return None;
        }
        self.state = CaptureState::Idle;

        if self.buffer.len() > self.min_samples {
            Some(CaptureOutcome::Ready(std::mem::take(&mut self.buffer)))
        } else {
            let samples = self.buffer.len();
            self.buffer.clear();
            Some(CaptureOutcome::TooShort { samples })
        }
    }
}
