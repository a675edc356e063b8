use ndarray::{aview1, s, Axis};

use crate::normalization::domain::crop::CropRect;
use crate::recognition::domain::confidence_tracker::ConfidenceLevel;
use crate::shared::frame::Frame;

pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];
pub const RED: Rgb = [255, 0, 0];
pub const YELLOW: Rgb = [255, 255, 0];
pub const GREEN: Rgb = [0, 255, 0];

pub fn level_color(level: ConfidenceLevel) -> Rgb {
    match level {
        ConfidenceLevel::None => RED,
        ConfidenceLevel::Partial => YELLOW,
        ConfidenceLevel::Full => GREEN,
    }
}

/// Widths (in pixels, measured inward from the frame edge) of the nested
/// bands making up the status border.
///
/// Painted widest first: a black outline, the status color, then a thin
/// black rim at the very edge. With the defaults that leaves 1 px black,
/// 3 px color, 1 px black.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusBorder {
    pub outline: u32,
    pub band: u32,
    pub rim: u32,
}

impl Default for StatusBorder {
    fn default() -> Self {
        Self {
            outline: 5,
            band: 4,
            rim: 1,
        }
    }
}

impl StatusBorder {
    /// Builds the frame shown to the user: the crop region of `frame`,
    /// mirrored so it reads like a mirror, framed in the level's color.
    pub fn compose(&self, frame: &Frame, crop: CropRect, level: ConfidenceLevel) -> Frame {
        let cropped = frame.crop(crop.x, crop.y, crop.width, crop.height);
        let mut view = mirror(&cropped);
        self.paint(&mut view, level_color(level));
        view
    }

    pub fn paint(&self, frame: &mut Frame, color: Rgb) {
        paint_ring(frame, self.outline, BLACK);
        paint_ring(frame, self.band, color);
        paint_ring(frame, self.rim, BLACK);
    }
}

/// Flips a frame left to right.
pub fn mirror(frame: &Frame) -> Frame {
    let data = frame
        .as_ndarray()
        .slice(s![.., ..;-1, ..])
        .iter()
        .copied()
        .collect();
    Frame::new(
        data,
        frame.width(),
        frame.height(),
        frame.channels(),
        frame.index(),
    )
}

/// Fills every pixel within `inset` pixels of the frame edge with `color`.
pub fn paint_ring(frame: &mut Frame, inset: u32, color: Rgb) {
    let pixel = pixel_for(color, frame.channels());
    let height = frame.height() as usize;
    let width = frame.width() as usize;
    let ty = (inset as usize).min(height);
    let tx = (inset as usize).min(width);
    if ty == 0 || tx == 0 {
        return;
    }

    let mut arr = frame.as_ndarray_mut();
    let sides = [
        s![..ty, .., ..],
        s![height - ty.., .., ..],
        s![.., ..tx, ..],
        s![.., width - tx.., ..],
    ];
    for side in sides {
        for mut px in arr.slice_mut(side).lanes_mut(Axis(2)) {
            px.assign(&aview1(pixel.as_slice()));
        }
    }
}

fn pixel_for(color: Rgb, channels: u8) -> Vec<u8> {
    if channels == 1 {
        let [r, g, b] = color.map(u32::from);
        return vec![((r * 2126 + g * 7152 + b * 722) / 10000) as u8];
    }
    color.iter().copied().cycle().take(channels as usize).collect()
}
