// Touch screen adapter
//
// The first finger on the screen steers: left half walks left, right half
// walks right. A vertical swipe longer than the swipe distance counts as a
// jump press on the frame the touch begins and as a jump release on the frame
// it ends.

use super::{FrameInput, InputAdapter};
use glam::Vec2;
use std::collections::VecDeque;

/// Vertical distance in pixels a finger must travel to count as a swipe
pub const DEFAULT_SWIPE_DISTANCE: f32 = 50.0;

/// Touch events held for upcoming frames before the oldest is dropped
pub const MAX_PENDING_TOUCHES: usize = 16;

/// Phase of the tracked touch as seen by one simulation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    /// Finger down, no new event this frame
    Stationary,
    Ended,
    Cancelled,
}

impl From<winit::event::TouchPhase> for TouchPhase {
    fn from(phase: winit::event::TouchPhase) -> Self {
        match phase {
            winit::event::TouchPhase::Started => Self::Began,
            winit::event::TouchPhase::Moved => Self::Moved,
            winit::event::TouchPhase::Ended => Self::Ended,
            winit::event::TouchPhase::Cancelled => Self::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TouchSample {
    phase: TouchPhase,
    position: Vec2,
}

/// Turns touch events into `FrameInput`.
///
/// Positions are in pixels with the origin at the bottom-left corner of the
/// screen. `process_winit_touch` converts from winit's top-left origin.
#[derive(Debug)]
pub struct SwipeInputAdapter {
    screen_width: u32,
    screen_height: u32,
    swipe_distance: f32,

    finger_start: Vec2,
    finger_end: Vec2,

    /// Id of the finger being followed
    tracked_touch: Option<u64>,

    /// Where the followed finger rests between events
    active_position: Option<Vec2>,

    /// Touch events not yet seen by a frame, one consumed per sample.
    /// Consecutive moves collapse into the latest one.
    pending: VecDeque<TouchSample>,
}

impl SwipeInputAdapter {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            swipe_distance: DEFAULT_SWIPE_DISTANCE,
            finger_start: Vec2::ZERO,
            finger_end: Vec2::ZERO,
            tracked_touch: None,
            active_position: None,
            pending: VecDeque::new(),
        }
    }

    /// Set the vertical swipe threshold in pixels
    pub fn with_swipe_distance(mut self, distance: f32) -> Self {
        self.swipe_distance = distance;
        self
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    pub fn swipe_distance(&self) -> f32 {
        self.swipe_distance
    }

    /// Record a touch event. Only the first finger down is followed.
    pub fn process_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        match self.tracked_touch {
            None if phase == TouchPhase::Began => self.tracked_touch = Some(id),
            Some(tracked) if tracked == id => {}
            _ => return,
        }

        if matches!(phase, TouchPhase::Ended | TouchPhase::Cancelled) {
            self.tracked_touch = None;
        }

        let sample = TouchSample { phase, position };
        if phase == TouchPhase::Moved {
            if let Some(last) = self.pending.back_mut() {
                if last.phase == TouchPhase::Moved {
                    *last = sample;
                    return;
                }
            }
        }

        if self.pending.len() >= MAX_PENDING_TOUCHES {
            self.pending.pop_front();
            log::warn!(
                "Touch backlog full ({} events), dropping oldest",
                MAX_PENDING_TOUCHES
            );
        }
        self.pending.push_back(sample);
    }

    /// Record a touch event straight from winit
    pub fn process_winit_touch(&mut self, touch: &winit::event::Touch) {
        let position = Vec2::new(
            touch.location.x as f32,
            self.screen_height as f32 - touch.location.y as f32,
        );
        self.process_touch(touch.id, touch.phase.into(), position);
    }

    fn next_sample(&mut self) -> Option<TouchSample> {
        self.pending.pop_front().or_else(|| {
            self.active_position.map(|position| TouchSample {
                phase: TouchPhase::Stationary,
                position,
            })
        })
    }

    fn steering(&self, x: f32) -> f32 {
        // Integer half width, so odd widths round the midpoint down
        let middle = (self.screen_width / 2) as f32;
        if x < middle {
            -1.0
        } else if x > middle {
            1.0
        } else {
            0.0
        }
    }
}

impl InputAdapter for SwipeInputAdapter {
    fn sample(&mut self) -> FrameInput {
        let Some(touch) = self.next_sample() else {
            return FrameInput::NEUTRAL;
        };

        let mut input = FrameInput::moving(self.steering(touch.position.x));

        match touch.phase {
            TouchPhase::Began => {
                self.finger_start = touch.position;
                self.active_position = Some(touch.position);
            }
            TouchPhase::Moved => {
                self.finger_end = touch.position;
                self.active_position = Some(touch.position);
            }
            TouchPhase::Ended => {
                self.finger_end = touch.position;
                self.active_position = None;
            }
            TouchPhase::Cancelled => self.active_position = None,
            TouchPhase::Stationary => {}
        }

        let swipe_magnitude = (self.finger_end.y - self.finger_start.y).abs();
        if swipe_magnitude > self.swipe_distance {
            match touch.phase {
                TouchPhase::Began => input.jump_pressed = true,
                TouchPhase::Ended => {
                    input.jump_released = true;
                    self.finger_start = Vec2::ZERO;
                    self.finger_end = Vec2::ZERO;
                }
                _ => {}
            }
            log::trace!("Swipe of {:.1}px during {:?}", swipe_magnitude, touch.phase);
        }

        input
    }

    fn reset(&mut self) {
        self.finger_start = Vec2::ZERO;
        self.finger_end = Vec2::ZERO;
        self.tracked_touch = None;
        self.active_position = None;
        self.pending.clear();
    }
}
