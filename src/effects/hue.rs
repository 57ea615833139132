//! Procedural hue sweep and HSV -> RGB conversion.

use crate::foundation::core::Rgb;
use crate::foundation::error::{PostfxError, PostfxResult};
use crate::foundation::math::{Vec2, fract};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HueRotateParams {
    /// Hue revolutions per second.
    pub speed: f32,
    /// Saturation of the generated color, `[0, 1]`.
    pub saturation: f32,
    /// Value of the generated color, `[0, 1]`.
    pub value: f32,
    /// Blend factor of the hue color into the pipeline color, `[0, 1]`.
    pub mix: f32,
}

impl Default for HueRotateParams {
    fn default() -> Self {
        Self {
            speed: 0.1,
            saturation: 0.6,
            value: 1.0,
            mix: 0.25,
        }
    }
}

impl HueRotateParams {
    pub(crate) fn validate(&self) -> PostfxResult<()> {
        if !self.speed.is_finite() {
            return Err(PostfxError::validation("hue_rotate.speed must be finite"));
        }
        for (name, v) in [
            ("saturation", self.saturation),
            ("value", self.value),
            ("mix", self.mix),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(PostfxError::validation(format!(
                    "hue_rotate.{name} must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Standard HSV -> RGB. Hue wraps modulo 1; saturation and value in `[0, 1]`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let h = fract(h) * 6.0;
    let sector = h.floor();
    let f = h - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as i32 {
        0 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}

/// Hue-swept color for one pixel.
///
/// `base_hue` is the time term (`time * speed`), resolved once per frame; the
/// spatial term (`uv.x + uv.y`) varies the sweep across the frame instead of
/// tinting the whole screen uniformly.
pub fn hue_color(uv: Vec2, base_hue: f32, params: &HueRotateParams) -> Rgb {
    let h = fract(base_hue + uv.x + uv.y);
    hsv_to_rgb(h, params.saturation, params.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgb, b: Rgb) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn primary_and_secondary_hues_convert_exactly() {
        assert!(close(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(1.0, 0.0, 0.0)));
        assert!(close(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), Rgb::new(0.0, 1.0, 0.0)));
        assert!(close(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), Rgb::new(0.0, 0.0, 1.0)));
        assert!(close(hsv_to_rgb(0.5, 1.0, 1.0), Rgb::new(0.0, 1.0, 1.0)));
    }

    #[test]
    fn hue_wraps_modulo_one() {
        assert!(close(hsv_to_rgb(1.25, 1.0, 1.0), hsv_to_rgb(0.25, 1.0, 1.0)));
        assert!(close(hsv_to_rgb(-0.75, 1.0, 1.0), hsv_to_rgb(0.25, 1.0, 1.0)));
    }

    #[test]
    fn zero_saturation_is_greyscale() {
        let c = hsv_to_rgb(0.37, 0.0, 0.8);
        assert!(close(c, Rgb::splat(0.8)));
    }

    #[test]
    fn origin_at_time_zero_is_hue_zero() {
        let p = HueRotateParams {
            saturation: 1.0,
            value: 1.0,
            ..HueRotateParams::default()
        };
        let c = hue_color(Vec2::ZERO, 0.0, &p);
        assert!(close(c, Rgb::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn sweep_varies_spatially() {
        let p = HueRotateParams::default();
        let a = hue_color(Vec2::new(0.1, 0.1), 0.0, &p);
        let b = hue_color(Vec2::new(0.6, 0.6), 0.0, &p);
        assert_ne!(a, b);
    }

    #[test]
    fn validate_bounds_unit_params() {
        assert!(
            HueRotateParams {
                mix: 1.5,
                ..HueRotateParams::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            HueRotateParams {
                saturation: -0.1,
                ..HueRotateParams::default()
            }
            .validate()
            .is_err()
        );
    }
}
