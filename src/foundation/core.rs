use crate::foundation::error::{PostfxError, PostfxResult};

/// Output surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Create a validated resolution with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> PostfxResult<Self> {
        if width == 0 || height == 0 {
            return Err(PostfxError::validation(
                "resolution dimensions must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    /// Total pixel count.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Working color for the per-pixel pipeline, linear f32 per channel.
///
/// Values are nominally in `[0, 1]` but intermediate stages may overshoot
/// (additive glow); the final conversion to bytes clamps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Construct from channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// All three channels set to `v`.
    pub const fn splat(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Maximum of the three channels (the pipeline's brightness proxy).
    pub fn max_channel(self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    /// Component-wise addition.
    pub fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }

    /// Scale all channels.
    pub fn scale(self, s: f32) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s)
    }

    /// Linear interpolation toward `other`.
    pub fn mix(self, other: Self, t: f32) -> Self {
        self.scale(1.0 - t).add(other.scale(t))
    }

    /// Clamp channels to `[0, 1]` and quantize to bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn q(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b), 255]
    }

    /// Dequantize bytes into linear channels.
    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Self::new(
            f32::from(px[0]) / 255.0,
            f32::from(px[1]) / 255.0,
            f32::from(px[2]) / 255.0,
        )
    }
}

/// A composited output frame as RGBA8 pixels.
///
/// Pixels are straight-alpha and fully opaque; the pipeline writes each pixel
/// exactly once per frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRgba {
    /// Read back one pixel as bytes. Debug/test helper.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "pixel out of bounds: ({x}, {y}) on a {}x{} frame",
            self.width,
            self.height
        );
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}
