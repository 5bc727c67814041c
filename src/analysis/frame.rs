//! Captured frame buffer
//!
//! A still frame is the flattened RGBA byte buffer a 2D canvas hands back from
//! `getImageData`: row-major, four bytes per pixel.

use serde::Deserialize;

use super::error::AnalysisError;
use super::landmarks::Point;

/// Bytes per RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// What to do with a sample point that falls outside the frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Clamp each coordinate to the nearest edge pixel
    #[default]
    Clamp,
    /// Fail with `PointOutOfBounds`
    Reject,
}

/// RGBA still frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap an RGBA buffer, checking its length against the dimensions
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AnalysisError> {
        let expected = buffer_len(width, height);
        if width == 0 || height == 0 || expected != Some(data.len()) {
            return Err(AnalysisError::InvalidFrame {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Frame filled with a single colour (alpha 255)
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, AnalysisError> {
        let Some(len) = buffer_len(width, height) else {
            return Err(AnalysisError::InvalidFrame {
                width,
                height,
                expected: usize::MAX,
                actual: 0,
            });
        };
        let data = std::iter::repeat([rgb[0], rgb[1], rgb[2], 255])
            .take(len / BYTES_PER_PIXEL)
            .flatten()
            .collect();
        Self::new(width, height, data)
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Overwrite one pixel; out-of-range coordinates are ignored
    pub fn put_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        self.data[index..index + 3].copy_from_slice(&rgb);
    }

    /// Byte offset of the pixel under `point`
    ///
    /// The offset is `round(y) * width * 4 + round(x) * 4`, rounding half up.
    pub fn pixel_index(&self, point: Point, policy: BoundsPolicy) -> Result<usize, AnalysisError> {
        let x = round_half_up(point.x);
        let y = round_half_up(point.y);
        let max_x = f64::from(self.width - 1);
        let max_y = f64::from(self.height - 1);

        let in_bounds = (0.0..=max_x).contains(&x) && (0.0..=max_y).contains(&y);
        let (x, y) = match policy {
            _ if in_bounds => (x, y),
            BoundsPolicy::Clamp => (clamp_axis(x, max_x), clamp_axis(y, max_y)),
            BoundsPolicy::Reject => {
                return Err(AnalysisError::PointOutOfBounds {
                    x: point.x,
                    y: point.y,
                    width: self.width,
                    height: self.height,
                })
            }
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (col, row) = (x as usize, y as usize);
        Ok(row * self.width as usize * BYTES_PER_PIXEL + col * BYTES_PER_PIXEL)
    }

    /// RGB channels of the pixel under `point`
    pub fn rgb_at(&self, point: Point, policy: BoundsPolicy) -> Result<[u8; 3], AnalysisError> {
        let index = self.pixel_index(point, policy)?;
        Ok([self.data[index], self.data[index + 1], self.data[index + 2]])
    }
}

/// RGBA byte length for the dimensions, `None` if it does not fit in `usize`
fn buffer_len(width: u32, height: u32) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?
        .checked_mul(BYTES_PER_PIXEL)
}

/// Round half up, matching browser `Math.round` for negative halves too
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// NaN lands on the first pixel rather than poisoning the index
fn clamp_axis(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}
