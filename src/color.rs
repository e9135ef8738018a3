use palette::{Hsl, IntoColor, Lighten, Srgb};

/// 8-bit sRGB colour as used in chart output.
pub type Rgb8 = Srgb<u8>;

/// Peak marker colour.
pub const PEAK_COLOR: Rgb8 = Srgb::new(0xff, 0x00, 0x00);

/// Ten-colour categorical palette, cycled in order.
const CATEGORICAL: [Rgb8; 10] = [
    Srgb::new(0x30, 0x79, 0xae),
    Srgb::new(0xff, 0x7f, 0x0e),
    Srgb::new(0x2c, 0xa0, 0x2c),
    Srgb::new(0xd6, 0x27, 0x28),
    Srgb::new(0x94, 0x67, 0xbd),
    Srgb::new(0x8c, 0x56, 0x4b),
    Srgb::new(0xe3, 0x77, 0xc2),
    Srgb::new(0x7f, 0x7f, 0x7f),
    Srgb::new(0xbc, 0xbd, 0x22),
    Srgb::new(0x17, 0xbe, 0xcf),
];

// ---------------------------------------------------------------------------
// Colour cycle
// ---------------------------------------------------------------------------

/// Hands out palette colours in order, wrapping after the last one.
#[derive(Debug, Clone, Default)]
pub struct ColorCycle {
    next: usize,
}

impl ColorCycle {
    pub fn next_color(&mut self) -> Rgb8 {
        let color = CATEGORICAL[self.next % CATEGORICAL.len()];
        self.next += 1;
        color
    }
}

/// `#rrggbb` notation.
pub fn to_hex(color: Rgb8) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Raise the HSL lightness by `amount` (0–1) of the remaining headroom.
pub fn lighten(color: Rgb8, amount: f32) -> Rgb8 {
    let hsl: Hsl = color.into_format::<f32>().into_color();
    let rgb: Srgb = hsl.lighten(amount).into_color();
    rgb.into_format()
}
