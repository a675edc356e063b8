use crate::shared::frame::Frame;

/// What the viewer asked for after a frame was shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderControl {
    Continue,
    Stop,
}

/// Domain interface for showing annotated frames to the user.
pub trait RenderSink: Send {
    fn render(&mut self, frame: &Frame) -> Result<RenderControl, Box<dyn std::error::Error>>;
}
