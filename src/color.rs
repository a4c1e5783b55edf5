use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// RGB triplets for the static plots
// ---------------------------------------------------------------------------

/// 8-bit sRGB colour, independent of any drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Convert an HSL triple (hue in degrees) to 8-bit sRGB.
pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Rgb {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Histogram bar fill.
pub fn histogram_fill() -> Rgb {
    from_hsl(240.0, 1.0, 0.5)
}

/// Scatter colour for a binary target: red for the positive class, blue
/// otherwise.
pub fn target_color(target: usize) -> Rgb {
    if target == 1 {
        from_hsl(0.0, 1.0, 0.5)
    } else {
        from_hsl(240.0, 1.0, 0.5)
    }
}
