//! Pointer tracking for the cursor body.
//!
//! Mirrors the host's listener juggling: mouse tracking and touch tracking
//! are mutually exclusive, and only the touch that initiated touch tracking
//! is followed until it ends.

use glam::Vec2;

use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackingMode {
    Mouse,
    /// Following one captured touch by id.
    Touch(u64),
}

/// A pointer event from the host. Mouse positions are viewport-local;
/// touch positions are client-space and get offset by the viewport origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    MouseMove(Vec2),
    MouseOut,
    TouchStart { id: u64, pos: Vec2 },
    TouchMove { id: u64, pos: Vec2 },
    TouchEnd { id: u64 },
}

/// Folds pointer events into a cursor position and an on-screen flag.
#[derive(Debug)]
pub struct PointerTracker {
    mode: TrackingMode,
    pos: Vec2,
    on_screen: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            mode: TrackingMode::Mouse,
            pos: Vec2::ZERO,
            on_screen: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn on_screen(&self) -> bool {
        self.on_screen
    }

    pub fn handle(&mut self, event: PointerEvent, viewport: &Viewport) {
        match (self.mode, event) {
            (TrackingMode::Mouse, PointerEvent::MouseMove(pos)) => {
                self.pos = pos;
                self.on_screen = true;
            }
            (TrackingMode::Mouse, PointerEvent::MouseOut) => {
                self.on_screen = false;
            }
            (TrackingMode::Mouse, PointerEvent::TouchStart { id, pos }) => {
                self.mode = TrackingMode::Touch(id);
                self.pos = viewport.to_local(pos);
                self.on_screen = true;
            }
            (TrackingMode::Touch(captured), PointerEvent::TouchMove { id, pos })
                if id == captured =>
            {
                self.pos = viewport.to_local(pos);
            }
            (TrackingMode::Touch(captured), PointerEvent::TouchEnd { id }) if id == captured => {
                self.mode = TrackingMode::Mouse;
                self.on_screen = false;
            }
            // Mouse events while touch-tracking, and touches other than the
            // captured one, are ignored.
            _ => {}
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}
