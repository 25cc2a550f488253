//! Bridges between winit and the viewer's trait seams.

use std::sync::Arc;

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::window::Window;

use crate::overlay::DragController;
use crate::traits::{FrameScheduler, LayoutHost};

/// [`FrameScheduler`] over winit's redraw requests.
///
/// winit has no way to withdraw a requested redraw, so `cancel_frame` is a
/// no-op here; stopping relies on the session not re-requesting, and any
/// already-queued redraw is ignored by the paused session.
pub struct RedrawScheduler {
    window: Arc<Window>,
}

impl RedrawScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }

    fn cancel_frame(&mut self) {}
}

/// Converts a center-anchored offset to a top-left outer position
pub fn center_offset_to_outer(
    screen: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
    x: i32,
    y: i32,
) -> (i32, i32) {
    (
        (screen.width as i32 - window.width as i32) / 2 + x,
        (screen.height as i32 - window.height as i32) / 2 + y,
    )
}

/// [`LayoutHost`] that repositions a winit window
pub struct WinitLayoutHost {
    window: Arc<Window>,
    screen: PhysicalSize<u32>,
}

impl WinitLayoutHost {
    pub fn new(window: Arc<Window>, screen: PhysicalSize<u32>) -> Self {
        Self { window, screen }
    }
}

impl LayoutHost for WinitLayoutHost {
    fn update_position(&mut self, x: i32, y: i32) {
        let (ox, oy) = center_offset_to_outer(self.screen, self.window.outer_size(), x, y);
        self.window.set_outer_position(PhysicalPosition::new(ox, oy));
    }
}

/// Feeds window pointer events into a [`DragController`], translating
/// window-relative cursor positions into screen coordinates so the anchors
/// stay stable while the window itself moves.
#[derive(Default)]
pub struct PointerBridge {
    dragging: bool,
    cursor: Option<(f64, f64)>,
}

impl PointerBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(
        &mut self,
        window: &Window,
        event: &WindowEvent,
        controller: &mut DragController,
        host: &mut dyn LayoutHost,
    ) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let origin = window
                    .outer_position()
                    .unwrap_or(PhysicalPosition::new(0, 0));
                let global = (
                    origin.x as f64 + position.x,
                    origin.y as f64 + position.y,
                );
                self.cursor = Some(global);
                if self.dragging {
                    controller.pointer_move(global.0, global.1, host);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    if let Some((px, py)) = self.cursor {
                        self.dragging = true;
                        controller.pointer_down(px, py);
                    }
                }
                ElementState::Released => {
                    self.dragging = false;
                }
            },
            _ => {}
        }
    }
}
