use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};
use thiserror::Error;

use super::crop::{centered_crop, CropRect};
use crate::shared::constants::{FACE_HEIGHT, FACE_WIDTH};
use crate::shared::frame::Frame;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("frame has no pixels ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
    #[error("frames must have 1 or 3 channels, got {0}")]
    UnsupportedChannels(u8),
    #[error("frame buffer does not match its dimensions")]
    InvalidBuffer,
}

/// Fixed-size grayscale image fed to the recognizer.
pub type NormalizedFrame = GrayImage;

/// Center-crops a frame to `target_aspect`, converts it to gray and resizes it
/// to exactly `target_size` (width, height).
///
/// The result owns its pixels, so the source frame can be reused afterwards.
pub fn normalize(
    frame: &Frame,
    target_aspect: f64,
    target_size: (u32, u32),
) -> Result<NormalizedFrame, NormalizeError> {
    let (width, height) = (frame.width(), frame.height());
    if width == 0 || height == 0 {
        return Err(NormalizeError::EmptyFrame { width, height });
    }

    let rect = centered_crop(width, height, target_aspect);
    let gray = cropped_gray(frame, rect)?;
    let (target_w, target_h) = target_size;

    if gray.dimensions() == (target_w, target_h) {
        return Ok(gray);
    }
    Ok(imageops::resize(&gray, target_w, target_h, FilterType::Triangle))
}

/// Crops out `rect` and converts it to a single channel.
fn cropped_gray(frame: &Frame, rect: CropRect) -> Result<GrayImage, NormalizeError> {
    let CropRect {
        x,
        y,
        width,
        height,
    } = rect;

    match frame.channels() {
        1 => {
            let gray = GrayImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
                .ok_or(NormalizeError::InvalidBuffer)?;
            Ok(imageops::crop_imm(&gray, x, y, width, height).to_image())
        }
        3 => {
            let rgb = RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
                .ok_or(NormalizeError::InvalidBuffer)?;
            let cropped = imageops::crop_imm(&rgb, x, y, width, height).to_image();
            Ok(imageops::grayscale(&cropped))
        }
        other => Err(NormalizeError::UnsupportedChannels(other)),
    }
}

/// Normalizer bound to one aspect ratio and output size.
#[derive(Clone, Copy, Debug)]
pub struct FrameNormalizer {
    target_width: u32,
    target_height: u32,
}

impl FrameNormalizer {
    pub fn new(target_width: u32, target_height: u32) -> Self {
        Self {
            target_width,
            target_height,
        }
    }

    pub fn target_aspect(&self) -> f64 {
        self.target_width as f64 / self.target_height as f64
    }

    pub fn target_size(&self) -> (u32, u32) {
        (self.target_width, self.target_height)
    }

    /// Crop rectangle this normalizer would use for a frame of the given size.
    pub fn crop_for(&self, width: u32, height: u32) -> CropRect {
        centered_crop(width, height, self.target_aspect())
    }

    pub fn normalize(&self, frame: &Frame) -> Result<NormalizedFrame, NormalizeError> {
        normalize(frame, self.target_aspect(), self.target_size())
    }
}

impl Default for FrameNormalizer {
    fn default() -> Self {
        Self::new(FACE_WIDTH, FACE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        Frame::new(data, width, height, 3, 0)
    }

    #[test]
    fn test_default_targets_face_size() {
        let normalizer = FrameNormalizer::default();
        assert_eq!(normalizer.target_size(), (92, 112));
        assert_relative_eq!(normalizer.target_aspect(), 92.0 / 112.0);
    }

    #[rstest]
    #[case(640, 480)]
    #[case(1920, 1080)]
    #[case(100, 100)]
    #[case(50, 200)]
    #[case(1, 1)]
    #[case(2, 1)]
    fn test_output_is_always_target_size(#[case] width: u32, #[case] height: u32) {
        let frame = solid_frame(width, height, [40, 80, 120]);
        let out = normalize(&frame, 92.0 / 112.0, (92, 112)).unwrap();
        assert_eq!(out.dimensions(), (92, 112));
    }

    #[test]
    fn test_normalizing_normalized_size_is_stable() {
        let normalizer = FrameNormalizer::default();
        let frame = solid_frame(92, 112, [10, 200, 30]);
        let first = normalizer.normalize(&frame).unwrap();

        let gray_frame = Frame::new(first.as_raw().clone(), 92, 112, 1, 0);
        let second = normalizer.normalize(&gray_frame).unwrap();

        assert_eq!(second.dimensions(), (92, 112));
        assert_eq!(second, first);
    }

    #[test]
    fn test_white_stays_white_and_black_stays_black() {
        let white = normalize(&solid_frame(64, 48, [255, 255, 255]), 0.5, (8, 16)).unwrap();
        assert!(white.pixels().all(|p| p.0 == [255]));

        let black = normalize(&solid_frame(64, 48, [0, 0, 0]), 0.5, (8, 16)).unwrap();
        assert!(black.pixels().all(|p| p.0 == [0]));
    }

    #[test]
    fn test_luma_weights_green_over_blue() {
        let green = normalize(&solid_frame(20, 20, [0, 255, 0]), 1.0, (4, 4)).unwrap();
        let blue = normalize(&solid_frame(20, 20, [0, 0, 255]), 1.0, (4, 4)).unwrap();
        assert!(green.get_pixel(0, 0).0[0] > blue.get_pixel(0, 0).0[0]);
    }

    #[test]
    fn test_crop_discards_frame_edges() {
        // 300x100 frame: white band in the middle third, black sides.
        let mut img = RgbImage::from_pixel(300, 100, image::Rgb([0, 0, 0]));
        for y in 0..100 {
            for x in 100..200 {
                img.put_pixel(x, y, image::Rgb([255, 255, 255]));
            }
        }
        let frame = Frame::from_rgb(img, 0);

        // Square target keeps exactly the middle 100x100.
        let out = normalize(&frame, 1.0, (10, 10)).unwrap();
        assert!(out.pixels().all(|p| p.0 == [255]));
    }

    #[test]
    fn test_result_independent_of_source() {
        let mut frame = solid_frame(50, 50, [100, 100, 100]);
        let out = normalize(&frame, 1.0, (5, 5)).unwrap();
        frame.data_mut().fill(0);
        assert!(out.pixels().all(|p| p.0[0] > 0));
    }

    #[test]
    fn test_resize_is_deterministic() {
        let mut img = RgbImage::new(160, 120);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
        }
        let frame = Frame::from_rgb(img, 0);
        let normalizer = FrameNormalizer::default();
        assert_eq!(
            normalizer.normalize(&frame).unwrap(),
            normalizer.normalize(&frame).unwrap()
        );
    }

    #[test]
    fn test_empty_frame_rejected() {
        let frame = Frame::new(Vec::new(), 0, 10, 3, 0);
        assert_eq!(
            normalize(&frame, 1.0, (4, 4)),
            Err(NormalizeError::EmptyFrame {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn test_unsupported_channels_rejected() {
        let frame = Frame::new(vec![0; 16], 2, 2, 4, 0);
        assert_eq!(
            normalize(&frame, 1.0, (4, 4)),
            Err(NormalizeError::UnsupportedChannels(4))
        );
    }

    #[test]
    fn test_crop_for_matches_free_function() {
        let normalizer = FrameNormalizer::default();
        assert_eq!(
            normalizer.crop_for(640, 480),
            centered_crop(640, 480, 92.0 / 112.0)
        );
    }
}
