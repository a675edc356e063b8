use ndarray::{s, ArrayView3, ArrayViewMut3};

/// A single camera frame: contiguous RGB (or gray) bytes in row-major order.
///
/// Color order conversion happens at the capture/display boundaries only;
/// everything in between works on RGB.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// Wraps an RGB image as a frame with the given sequence number.
    pub fn from_rgb(image: image::RgbImage, index: usize) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, 3, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Sequence number assigned by the capture source.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Copies out the `width x height` block whose top-left corner is
    /// (`x`, `y`). The block must lie within the frame.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Frame {
        let (x, y) = (x as usize, y as usize);
        let (w, h) = (width as usize, height as usize);
        let data = self
            .as_ndarray()
            .slice(s![y..y + h, x..x + w, ..])
            .iter()
            .copied()
            .collect();
        Frame::new(data, width, height, self.channels, self.index)
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
