/// Window/layout host for an existing overlay window.
///
/// Coordinates are the window center's offset from the screen center, in
/// pixels. Repeated position updates during a drag are the only side effect
/// the drag controller has on this interface.
pub trait LayoutHost {
    fn update_position(&mut self, x: i32, y: i32);
}
