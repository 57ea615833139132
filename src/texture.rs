//! Read-only base scene texture with a defined addressing policy.

use crate::foundation::core::{Resolution, Rgb};
use crate::foundation::error::{PostfxError, PostfxResult};
use crate::foundation::math::Vec2;

/// Policy for sampling coordinates outside `[0, 1]^2`.
///
/// Distorted or offset coordinates routinely leave the unit square; this is
/// resolved here rather than treated as an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressMode {
    /// Clamp to the edge texel. Avoids wraparound seams on warped sampling.
    #[default]
    ClampToEdge,
    /// Tile the texture.
    Repeat,
}

/// The fully-rendered scene for one frame, RGBA8 row-major.
///
/// Shared read-only across all pixel workers during a frame; sampling is
/// nearest-texel by normalized UV with the configured [`AddressMode`].
#[derive(Clone, Debug)]
pub struct SceneTexture {
    width: u32,
    height: u32,
    data: Vec<u8>,
    address: AddressMode,
}

impl SceneTexture {
    /// Wrap a tightly packed RGBA8 buffer.
    ///
    /// Rejects zero dimensions and buffers that do not match
    /// `width * height * 4` so malformed input never reaches pixel dispatch.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> PostfxResult<Self> {
        let res = Resolution::new(width, height)?;
        let expected = res
            .pixel_count()
            .checked_mul(4)
            .ok_or_else(|| PostfxError::validation("texture size overflow"))?;
        if data.len() != expected {
            return Err(PostfxError::validation(format!(
                "texture buffer length {} does not match {}x{} rgba8 ({} bytes)",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            address: AddressMode::default(),
        })
    }

    /// Wrap a decoded image.
    pub fn from_image(img: &image::RgbaImage) -> PostfxResult<Self> {
        Self::from_rgba8(img.width(), img.height(), img.as_raw().clone())
    }

    /// Uniform single-color texture.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PostfxResult<Self> {
        let res = Resolution::new(width, height)?;
        let mut data = Vec::with_capacity(res.pixel_count() * 4);
        for _ in 0..res.pixel_count() {
            data.extend_from_slice(&rgba);
        }
        Self::from_rgba8(width, height, data)
    }

    /// Replace the addressing policy.
    pub fn with_address_mode(mut self, mode: AddressMode) -> Self {
        self.address = mode;
        self
    }

    /// Write one texel. Test/fixture helper; the pipeline itself never
    /// mutates the base texture.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        assert!(
            x < self.width && y < self.height,
            "put_pixel out of bounds: ({x}, {y}) on a {}x{} texture",
            self.width,
            self.height
        );
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Texture dimensions.
    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }

    /// Nearest-texel sample at a normalized coordinate.
    pub fn sample(&self, uv: Vec2) -> Rgb {
        let x = self.resolve_axis(uv.x, self.width);
        let y = self.resolve_axis(uv.y, self.height);
        let i = (y * self.width as usize + x) * 4;
        Rgb::from_rgba8([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    fn resolve_axis(&self, coord: f32, n: u32) -> usize {
        // float -> int casts saturate (and map NaN to 0), so even a
        // pathological coordinate resolves to a valid texel.
        let t = (coord * n as f32).floor() as i64;
        let n = i64::from(n);
        let t = match self.address {
            AddressMode::ClampToEdge => t.clamp(0, n - 1),
            AddressMode::Repeat => t.rem_euclid(n),
        };
        t as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_one() -> SceneTexture {
        // Left texel red, right texel green.
        SceneTexture::from_rgba8(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap()
    }

    #[test]
    fn rejects_zero_dimensions_and_bad_length() {
        assert!(SceneTexture::from_rgba8(0, 4, vec![]).is_err());
        assert!(SceneTexture::from_rgba8(4, 0, vec![]).is_err());
        assert!(SceneTexture::from_rgba8(2, 1, vec![0; 7]).is_err());
    }

    #[test]
    fn samples_nearest_texel() {
        let tex = two_by_one();
        assert_eq!(tex.sample(Vec2::new(0.25, 0.5)), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(Vec2::new(0.75, 0.5)), Rgb::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn clamp_to_edge_holds_border_texel() {
        let tex = two_by_one();
        assert_eq!(tex.sample(Vec2::new(-3.0, 0.5)), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(Vec2::new(4.5, 0.5)), Rgb::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn repeat_tiles_the_texture() {
        let tex = two_by_one().with_address_mode(AddressMode::Repeat);
        assert_eq!(tex.sample(Vec2::new(1.25, 0.5)), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(Vec2::new(-0.25, 0.5)), Rgb::new(0.0, 1.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "put_pixel out of bounds")]
    fn put_pixel_rejects_out_of_range_coordinates() {
        let mut tex = two_by_one();
        tex.put_pixel(2, 0, [0, 0, 0, 255]);
    }

    #[test]
    fn non_finite_coordinates_still_resolve() {
        let tex = two_by_one();
        let _ = tex.sample(Vec2::new(f32::NAN, f32::INFINITY));
    }
}
