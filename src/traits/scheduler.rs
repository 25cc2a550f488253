/// Frame-timing service running at the display's refresh cadence.
///
/// The session keeps itself rendering by re-requesting a frame from inside
/// each frame callback; stopping is simply not re-requesting. `cancel_frame`
/// must be safe to call with nothing pending.
pub trait FrameScheduler {
    /// Ask the host to deliver one frame callback at the next vsync
    fn request_frame(&mut self);

    /// Withdraw any pending frame request
    fn cancel_frame(&mut self);
}
