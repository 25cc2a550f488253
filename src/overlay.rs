//! Drag handling for the floating overlay window.
//!
//! The window is positioned by its center's offset from the screen center.
//! A drag gesture is: one pointer-down that anchors the gesture, then any
//! number of pointer-moves that each recompute the offset from the anchors.
//! Anything else (up, cancel) is ignored; the next pointer-down simply
//! starts a fresh session.

use crate::traits::LayoutHost;

/// Screen and overlay-window dimensions in pixels.
///
/// Callers must keep the window no larger than the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub screen_width: i32,
    pub screen_height: i32,
    pub window_width: i32,
    pub window_height: i32,
}

impl WindowBounds {
    pub fn new(screen_width: i32, screen_height: i32, window_width: i32, window_height: i32) -> Self {
        debug_assert!(window_width <= screen_width && window_height <= screen_height);
        Self {
            screen_width,
            screen_height,
            window_width,
            window_height,
        }
    }

    /// Overlay sized as a fraction of the screen, e.g. 0.55 for the default
    /// floating window
    pub fn scaled(screen_width: i32, screen_height: i32, fraction: f64) -> Self {
        Self::new(
            screen_width,
            screen_height,
            (screen_width as f64 * fraction) as i32,
            (screen_height as f64 * fraction) as i32,
        )
    }
}

/// Current center offset of the overlay window from the screen center
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowOffset {
    pub x: i32,
    pub y: i32,
}

/// Per-gesture anchors captured at pointer-down
#[derive(Debug, Clone, Copy)]
struct DragSession {
    x0: f32,
    y0: f32,
    px0: f64,
    py0: f64,
}

/// Translates raw pointer events into clamped window-position updates.
///
/// The clamp pins the offset to `-screen/2` when the window's leading edge
/// reaches the screen edge and to `+screen/2` on the trailing edge. That is
/// asymmetric on purpose (it matches the shipped behavior, overshoot
/// included); do not replace it with true edge containment.
pub struct DragController {
    bounds: WindowBounds,
    offset: WindowOffset,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(bounds: WindowBounds) -> Self {
        Self {
            bounds,
            offset: WindowOffset::default(),
            session: None,
        }
    }

    pub fn offset(&self) -> WindowOffset {
        self.offset
    }

    pub fn bounds(&self) -> WindowBounds {
        self.bounds
    }

    /// Start a drag session at the given pointer position. No position
    /// side effect.
    pub fn pointer_down(&mut self, pointer_x: f64, pointer_y: f64) {
        self.session = Some(DragSession {
            x0: self.offset.x as f32,
            y0: self.offset.y as f32,
            px0: pointer_x,
            py0: pointer_y,
        });
    }

    /// Move the window by the pointer delta since the session anchor,
    /// clamped to the screen, and push the result to the layout host.
    /// Ignored when no session is active.
    pub fn pointer_move(&mut self, pointer_x: f64, pointer_y: f64, host: &mut dyn LayoutHost) {
        let Some(session) = self.session else {
            return;
        };

        let mut temp_x = (session.x0 as f64 + pointer_x - session.px0) as i32;
        let mut temp_y = (session.y0 as f64 + pointer_y - session.py0) as i32;

        let WindowBounds {
            screen_width,
            screen_height,
            window_width,
            window_height,
        } = self.bounds;

        // Width check to keep the window from leaving the screen
        if temp_x - window_width / 2 <= -(screen_width / 2) {
            temp_x = -(screen_width / 2);
        }
        if temp_x + window_width / 2 > screen_width / 2 {
            temp_x = screen_width / 2;
        }

        // Height check
        if temp_y - window_height / 2 <= -(screen_height / 2) {
            temp_y = -(screen_height / 2);
        }
        if temp_y + window_height / 2 > screen_height / 2 {
            temp_y = screen_height / 2;
        }

        self.offset = WindowOffset { x: temp_x, y: temp_y };
        host.update_position(temp_x, temp_y);
    }
}
