//! The knobs and dials of a render.  Everything the iteration and the
//! color mapper need is carried here rather than in module-level
//! constants, so a render depends only on its arguments.

use image::Rgba;

/// What to do when `255 - contrast * n` drops below zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChannelOverflow {
    /// Modulo-256 arithmetic.  High iteration counts wrap back round to
    /// bright values and produce visible bands.
    Wrap,
    /// Saturate at zero.
    Clamp,
}

/// How MultiHue brings the 0..=65025 channels of the HSV conversion
/// down to 8 bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HueNarrowing {
    /// Keep the low byte of each channel.  This is what the palette has
    /// always looked like.
    Truncate,
    /// Divide by 255, the inverse of the `value * 255` scale, so the
    /// brightest channel equals the configured value.
    Scale,
}

/// Parameters shared by the Field Renderer and the Color Mapper.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Iterations after which a sample is considered inside the set.
    pub iteration_limit: u32,
    /// Gray levels lost per iteration in the gray and tinted schemes.
    pub contrast: u32,
    /// Added to the iteration count to obtain the MultiHue hue.
    pub hue_offset: u32,
    /// MultiHue saturation, 0-255.
    pub saturation: u8,
    /// MultiHue value, 0-255.
    pub value: u8,
    /// Level of the two minor channels of the tinted schemes.
    pub tint_floor: u8,
    /// Color of samples that never escape.
    pub interior: Rgba<u8>,
    /// Behaviour of the gray ramp past zero.
    pub overflow: ChannelOverflow,
    /// How MultiHue channels are brought down to 8 bits.
    pub narrowing: HueNarrowing,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            iteration_limit: 200,
            contrast: 15,
            hue_offset: 15,
            saturation: 180,
            value: 160,
            tint_floor: 20,
            interior: Rgba([0, 0, 0, 255]),
            overflow: ChannelOverflow::Wrap,
            narrowing: HueNarrowing::Truncate,
        }
    }
}
