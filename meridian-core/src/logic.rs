//! Pure colour math
//!
//! Functions without hardware dependencies (testable!)

use rgb::RGB8;

use crate::types::Hsv;

/// Converts a hue/saturation/value triple into an RGB colour
///
/// The hue wheel is split into six 43-step regions, same as the
/// `rgblight` colour math, so fixed hues land on the familiar colours.
///
/// # Examples
///
/// ```
/// # use rgb::RGB8;
/// # use meridian_core::{Hsv, hsv_to_rgb};
/// assert_eq!(hsv_to_rgb(Hsv::new(0, 255, 255)), RGB8 { r: 255, g: 0, b: 0 });
/// ```
pub fn hsv_to_rgb(hsv: Hsv) -> RGB8 {
    let v = hsv.val as u16;
    if hsv.sat == 0 {
        return RGB8 {
            r: hsv.val,
            g: hsv.val,
            b: hsv.val,
        };
    }

    let h = hsv.hue as u16;
    let s = hsv.sat as u16;
    let region = h * 6 / 255;
    let remainder = (h * 2 - region * 85) * 3;

    let p = ((v * (255 - s)) >> 8) as u8;
    let q = ((v * (255 - ((s * remainder) >> 8))) >> 8) as u8;
    let t = ((v * (255 - ((s * (255 - remainder)) >> 8))) >> 8) as u8;
    let v = hsv.val;

    let (r, g, b) = match region {
        0 | 6 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    RGB8 { r, g, b }
}

/// Triangle wave over one 256-step breathing period, 0 at the ends
pub fn breathe_level(phase: u8) -> u8 {
    if phase < 128 {
        phase * 2
    } else {
        (255 - phase) * 2
    }
}

/// Scales `value` by `level / 255`
pub fn scale(value: u8, level: u8) -> u8 {
    (value as u16 * level as u16 / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_to_rgb_primary_red() {
        assert_eq!(
            hsv_to_rgb(Hsv::new(0, 255, 255)),
            RGB8 { r: 255, g: 0, b: 0 }
        );
    }

    #[test]
    fn test_hsv_to_rgb_zero_saturation_is_grey() {
        assert_eq!(
            hsv_to_rgb(Hsv::new(130, 0, 200)),
            RGB8 {
                r: 200,
                g: 200,
                b: 200
            }
        );
    }

    #[test]
    fn test_hsv_to_rgb_zero_value_is_off() {
        assert_eq!(hsv_to_rgb(Hsv::new(212, 255, 0)), RGB8 { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn test_hsv_to_rgb_layer_hues_are_distinct() {
        let layer1 = hsv_to_rgb(Hsv::new(130, 255, 255));
        let layer2 = hsv_to_rgb(Hsv::new(212, 255, 255));
        assert_ne!(layer1, layer2);
        // 130 sits in the cyan/blue region, no red component
        assert_eq!(layer1.r, 0);
        // 212 sits in the magenta region, full blue with a strong red
        assert_eq!(layer2.b, 255);
        assert!(layer2.r > 200);
    }

    #[test]
    fn test_breathe_level_shape() {
        assert_eq!(breathe_level(0), 0);
        assert_eq!(breathe_level(64), 128);
        assert_eq!(breathe_level(127), 254);
        assert_eq!(breathe_level(128), 254);
        assert_eq!(breathe_level(255), 0);
    }

    #[test]
    fn test_scale_bounds() {
        assert_eq!(scale(200, 255), 200);
        assert_eq!(scale(200, 0), 0);
        assert_eq!(scale(255, 128), 128);
    }
}
