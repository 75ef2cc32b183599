//! The Color Mapper.  Turns the iteration at which a sample escaped
//! into a pixel, according to the chosen scheme.  Samples that never
//! escape are painted by the renderer, not here.

use crate::config::{ChannelOverflow, HueNarrowing, RenderConfig};
use image::Rgba;

/// The closed set of colorings.  Integer selectors coming from the
/// outside world are resolved with `from_selector`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    /// Every escaped sample is white.
    Mono,
    /// Gray ramp darkening with the escape iteration.
    GrayScale,
    /// Hue rotating with the escape iteration.
    MultiHue,
    /// Gray ramp carried on the red channel.
    RedScale,
    /// Gray ramp carried on the green channel.
    GreenScale,
    /// Gray ramp carried on the blue channel.
    BlueScale,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::MultiHue
    }
}

impl ColorScheme {
    /// Maps 0 through 5 onto Mono, GrayScale, MultiHue, RedScale,
    /// GreenScale and BlueScale.  Anything else is MultiHue.
    pub fn from_selector(selector: i64) -> ColorScheme {
        match selector {
            0 => ColorScheme::Mono,
            1 => ColorScheme::GrayScale,
            2 => ColorScheme::MultiHue,
            3 => ColorScheme::RedScale,
            4 => ColorScheme::GreenScale,
            5 => ColorScheme::BlueScale,
            _ => ColorScheme::default(),
        }
    }
}

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Converts hue (degrees, wrapped into 0..360), saturation and value
/// (both 0-255) into red, green, blue and alpha.  Channels come back on
/// the 0..=65025 scale that `value * 255` produces; alpha is always
/// 0xffff.
///
/// The hue circle is cut into six 60 degree segments.  In each one,
/// one channel sits at the maximum, one at the minimum, and the third
/// is interpolated between them by the offset into the segment.
pub fn hsv_to_rgba(h: u16, s: u8, v: u8) -> Rgba<u16> {
    let max = u32::from(v) * 255;
    let min = u32::from(v) * (255 - u32::from(s));

    let h = h % 360;
    let segment = h / 60;
    let offset = u32::from(h % 60);
    let mid = ((max - min) * offset) / 60;

    let (r, g, b) = match segment {
        0 => (max, min + mid, min),
        1 => (max - mid, max, min),
        2 => (min, max, min + mid),
        3 => (min, max - mid, max),
        4 => (min + mid, min, max),
        _ => (max, min, max - mid),
    };
    Rgba([r as u16, g as u16, b as u16, 0xffff])
}

/// Brings a channel from the 0..=65025 scale back to 0..=255.
pub fn narrow(channel: u16, narrowing: HueNarrowing) -> u8 {
    match narrowing {
        HueNarrowing::Truncate => channel as u8,
        HueNarrowing::Scale => (u32::from(channel) / 255) as u8,
    }
}

/// The gray level `255 - contrast * n` under the configured overflow
/// policy.
pub fn gray_level(n: u32, config: &RenderConfig) -> u8 {
    match config.overflow {
        ChannelOverflow::Wrap => 255u32.wrapping_sub(config.contrast.wrapping_mul(n)) as u8,
        ChannelOverflow::Clamp => 255u32.saturating_sub(config.contrast.saturating_mul(n)) as u8,
    }
}

/// The color of a sample that escaped at iteration `n`.
pub fn color_for(n: u32, scheme: ColorScheme, config: &RenderConfig) -> Rgba<u8> {
    let floor = config.tint_floor;
    match scheme {
        ColorScheme::Mono => WHITE,
        ColorScheme::GrayScale => {
            let g = gray_level(n, config);
            Rgba([g, g, g, 255])
        }
        ColorScheme::RedScale => Rgba([gray_level(n, config), floor, floor, 255]),
        ColorScheme::GreenScale => Rgba([floor, gray_level(n, config), floor, 255]),
        ColorScheme::BlueScale => Rgba([floor, floor, gray_level(n, config), 255]),
        ColorScheme::MultiHue => {
            let hue = (n.wrapping_add(config.hue_offset) % 360) as u16;
            let wide = hsv_to_rgba(hue, config.saturation, config.value);
            let way = config.narrowing;
            Rgba([
                narrow(wide[0], way),
                narrow(wide[1], way),
                narrow(wide[2], way),
                255,
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_map_onto_schemes() {
        assert_eq!(ColorScheme::from_selector(0), ColorScheme::Mono);
        assert_eq!(ColorScheme::from_selector(1), ColorScheme::GrayScale);
        assert_eq!(ColorScheme::from_selector(2), ColorScheme::MultiHue);
        assert_eq!(ColorScheme::from_selector(3), ColorScheme::RedScale);
        assert_eq!(ColorScheme::from_selector(4), ColorScheme::GreenScale);
        assert_eq!(ColorScheme::from_selector(5), ColorScheme::BlueScale);
    }

    #[test]
    fn unknown_selectors_fall_back_to_multihue() {
        for s in &[-1, 6, 42, i64::max_value(), i64::min_value()] {
            assert_eq!(ColorScheme::from_selector(*s), ColorScheme::MultiHue);
        }
    }

    #[test]
    fn hsv_pure_red() {
        assert_eq!(hsv_to_rgba(0, 255, 255), Rgba([65025, 0, 0, 0xffff]));
    }

    #[test]
    fn hsv_half_turn_lands_in_segment_three() {
        // min, max - mid, max with mid == 0
        assert_eq!(hsv_to_rgba(180, 255, 255), Rgba([0, 65025, 65025, 0xffff]));
        // 30 degrees in: mid is half the span
        assert_eq!(hsv_to_rgba(210, 255, 255), Rgba([0, 32513, 65025, 0xffff]));
    }

    fn wide(r: u32, g: u32, b: u32) -> Rgba<u16> {
        Rgba([r as u16, g as u16, b as u16, 0xffff])
    }

    #[test]
    fn hsv_interpolates_within_each_segment() {
        let (max, min): (u32, u32) = (160 * 255, 160 * 75);
        let mid = ((max - min) * 15) / 60;
        assert_eq!(hsv_to_rgba(15, 180, 160), wide(max, min + mid, min));
        assert_eq!(hsv_to_rgba(75, 180, 160), wide(max - mid, max, min));
        assert_eq!(hsv_to_rgba(135, 180, 160), wide(min, max, min + mid));
        assert_eq!(hsv_to_rgba(195, 180, 160), wide(min, max - mid, max));
        assert_eq!(hsv_to_rgba(255, 180, 160), wide(min + mid, min, max));
        assert_eq!(hsv_to_rgba(315, 180, 160), wide(max, min, max - mid));
    }

    #[test]
    fn hsv_wraps_hue() {
        assert_eq!(hsv_to_rgba(390, 200, 100), hsv_to_rgba(30, 200, 100));
        assert_eq!(hsv_to_rgba(360, 200, 100), hsv_to_rgba(0, 200, 100));
    }

    #[test]
    fn hsv_zero_saturation_is_gray() {
        assert_eq!(hsv_to_rgba(123, 0, 100), Rgba([25500, 25500, 25500, 0xffff]));
    }

    #[test]
    fn mono_is_white() {
        let config = RenderConfig::default();
        for n in 0..config.iteration_limit {
            assert_eq!(color_for(n, ColorScheme::Mono, &config), WHITE);
        }
    }

    #[test]
    fn grayscale_starts_white() {
        let config = RenderConfig::default();
        assert_eq!(
            color_for(0, ColorScheme::GrayScale, &config),
            Rgba([255, 255, 255, 255])
        );
        assert_eq!(
            color_for(2, ColorScheme::GrayScale, &config),
            Rgba([225, 225, 225, 255])
        );
    }

    #[test]
    fn grayscale_wraps_past_zero() {
        let config = RenderConfig::default();
        assert_eq!(gray_level(17, &config), 0);
        assert_eq!(gray_level(18, &config), 241);
    }

    #[test]
    fn grayscale_clamps_when_asked() {
        let config = RenderConfig {
            overflow: ChannelOverflow::Clamp,
            ..RenderConfig::default()
        };
        assert_eq!(gray_level(16, &config), 15);
        assert_eq!(gray_level(17, &config), 0);
        assert_eq!(gray_level(18, &config), 0);
        assert_eq!(gray_level(199, &config), 0);
    }

    #[test]
    fn tints_put_the_ramp_on_one_channel() {
        let config = RenderConfig::default();
        assert_eq!(
            color_for(1, ColorScheme::RedScale, &config),
            Rgba([240, 20, 20, 255])
        );
        assert_eq!(
            color_for(1, ColorScheme::GreenScale, &config),
            Rgba([20, 240, 20, 255])
        );
        assert_eq!(
            color_for(1, ColorScheme::BlueScale, &config),
            Rgba([20, 20, 240, 255])
        );
    }

    #[test]
    fn multihue_keeps_low_bytes_by_default() {
        let config = RenderConfig::default();
        // hue 15, s 180, v 160: 40800, 19200, 12000 on the wide scale
        assert_eq!(
            color_for(0, ColorScheme::MultiHue, &config),
            Rgba([96, 0, 224, 255])
        );
        // hue 195 is in segment 3: 12000, 33600, 40800
        assert_eq!(
            color_for(180, ColorScheme::MultiHue, &config),
            Rgba([224, 64, 96, 255])
        );
    }

    #[test]
    fn multihue_scales_when_asked() {
        let config = RenderConfig {
            narrowing: HueNarrowing::Scale,
            ..RenderConfig::default()
        };
        assert_eq!(
            color_for(0, ColorScheme::MultiHue, &config),
            Rgba([160, 75, 47, 255])
        );
        assert_eq!(
            color_for(180, ColorScheme::MultiHue, &config),
            Rgba([47, 131, 160, 255])
        );
    }

    #[test]
    fn narrowing_full_scale() {
        assert_eq!(narrow(65025, HueNarrowing::Scale), 255);
        assert_eq!(narrow(65025, HueNarrowing::Truncate), 1);
        assert_eq!(narrow(0, HueNarrowing::Truncate), 0);
    }
}
