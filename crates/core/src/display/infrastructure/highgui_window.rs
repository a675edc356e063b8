use opencv::core::Mat;
use opencv::prelude::*;
use opencv::{highgui, imgproc};

use crate::display::domain::render_sink::{RenderControl, RenderSink};
use crate::shared::frame::Frame;

const KEY_ESCAPE: i32 = 27;
const KEY_QUIT: i32 = 'q' as i32;

/// Named OpenCV HighGUI window.
///
/// Frames are converted from RGB to the window's BGR layout. Pressing ESC or
/// `q` while the window has focus requests a stop.
pub struct HighguiWindow {
    name: String,
}

impl HighguiWindow {
    pub fn open(name: &str) -> opencv::Result<Self> {
        highgui::named_window(name, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            name: name.to_string(),
        })
    }
}

impl Drop for HighguiWindow {
    fn drop(&mut self) {
        let _ = highgui::destroy_window(&self.name);
    }
}

impl RenderSink for HighguiWindow {
    fn render(&mut self, frame: &Frame) -> Result<RenderControl, Box<dyn std::error::Error>> {
        let code = match frame.channels() {
            1 => imgproc::COLOR_GRAY2BGR,
            3 => imgproc::COLOR_RGB2BGR,
            other => return Err(format!("cannot display a {other}-channel frame").into()),
        };

        let flat = Mat::from_slice(frame.data())?;
        let shaped = flat.reshape(frame.channels() as i32, frame.height() as i32)?;
        let mut bgr = Mat::default();
        imgproc::cvt_color_def(&*shaped, &mut bgr, code)?;

        highgui::imshow(&self.name, &bgr)?;
        match highgui::wait_key(1)? {
            KEY_ESCAPE | KEY_QUIT => Ok(RenderControl::Stop),
            _ => Ok(RenderControl::Continue),
        }
    }
}
