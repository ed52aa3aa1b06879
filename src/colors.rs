//! Integer color conversion helpers.
//!
//! Scripts pass colors as plain integers, either packed `0xRRGGBB` or the
//! 16-bit RGB565 format common on small panels. These helpers turn them into
//! `palette::Srgb` for [`crate::TextDisplay`] implementations.

use palette::Srgb;

/// Display background after a clear.
pub const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);

/// Creates an RGB color from a packed `0xRRGGBB` integer.
///
/// Bits above the low 24 are ignored.
#[inline]
pub fn rgb888(packed: u32) -> Srgb {
    let r = (packed >> 16) as u8;
    let g = (packed >> 8) as u8;
    let b = packed as u8;
    Srgb::<u8>::new(r, g, b).into_format()
}

/// Creates an RGB color from a 16-bit RGB565 value.
#[inline]
pub fn rgb565(packed: u16) -> Srgb {
    let r5 = ((packed >> 11) & 0x1f) as u8;
    let g6 = ((packed >> 5) & 0x3f) as u8;
    let b5 = (packed & 0x1f) as u8;
    Srgb::<u8>::new(
        (r5 << 3) | (r5 >> 2),
        (g6 << 2) | (g6 >> 4),
        (b5 << 3) | (b5 >> 2),
    )
    .into_format()
}

/// Packs a color back into `0xRRGGBB`.
#[inline]
pub fn to_rgb888(color: Srgb) -> u32 {
    let c: Srgb<u8> = color.into_format();
    ((c.red as u32) << 16) | ((c.green as u32) << 8) | c.blue as u32
}
