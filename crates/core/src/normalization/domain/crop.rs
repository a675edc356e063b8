/// Axis-aligned crop rectangle in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Largest rectangle of aspect `target_aspect` (width / height) centered in a
/// `width x height` frame.
///
/// A frame wider than the target keeps its full height; otherwise it keeps
/// its full width. The shrunk side is rounded to the nearest pixel and never
/// exceeds the frame or drops below one pixel, so the rectangle always lies
/// within frame bounds. Because of the rounding, a frame whose aspect is
/// within half a pixel of the target (e.g. 10x10 at 0.96) is kept whole.
/// A frame with no pixels yields an empty rectangle.
pub fn centered_crop(width: u32, height: u32, target_aspect: f64) -> CropRect {
    if width == 0 || height == 0 {
        return CropRect {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        };
    }

    let actual_aspect = width as f64 / height as f64;

    let (crop_width, crop_height) = if actual_aspect > target_aspect {
        let w = (height as f64 * target_aspect).round() as u32;
        (w.clamp(1, width), height)
    } else {
        let h = (width as f64 / target_aspect).round() as u32;
        (width, h.clamp(1, height))
    };

    CropRect {
        x: width / 2 - crop_width / 2,
        y: height / 2 - crop_height / 2,
        width: crop_width,
        height: crop_height,
    }
}
