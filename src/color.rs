//! Packed ARGB colors
//!
//! A [`Pixel`] is a `u32` laid out as alpha in byte 3, then red, green and
//! blue down to byte 0. This is the same layout as SDL's `ARGB8888`.

use crate::math2d::{floor_to_index, lerp};

pub type Pixel = u32;

pub const CORNFLOWER_BLUE: Pixel = 0x006495ED;
pub const BLACK: Pixel = 0xFF000000;
pub const WHITE: Pixel = 0xFFFFFFFF;
pub const RED: Pixel = 0xFFFF0000;
pub const GREEN: Pixel = 0xFF00FF00;
pub const BLUE: Pixel = 0xFF0000FF;
pub const YELLOW: Pixel = 0xFFFFFF00;
pub const PURPLE: Pixel = 0xFFFF00FF;
pub const CYAN: Pixel = 0xFF00FFFF;

/// Pack four channels into a pixel
#[inline]
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Pixel {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Opaque pixel from red, green and blue
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Pixel {
    argb(0xFF, r, g, b)
}

/// Split a pixel into (a, r, g, b)
#[inline]
pub const fn channels(p: Pixel) -> (u8, u8, u8, u8) {
    ((p >> 24) as u8, (p >> 16) as u8, (p >> 8) as u8, p as u8)
}

/// Blend `incoming` over `existing`.
///
/// The alpha is normalized with integer division, so only a fully opaque
/// alpha (255) blends; anything lower counts as transparent. A transparent
/// draw does not leave the cell alone, it XORs it with `clear_color`, so
/// drawing the same transparent pixel twice restores the original value.
#[inline]
pub fn blend(existing: Pixel, incoming: Pixel, clear_color: Pixel) -> Pixel {
    let (alpha, r, g, b) = channels(incoming);
    let normalized = u32::from(alpha) / 255;
    if normalized == 0 {
        return existing ^ clear_color;
    }

    let t = f64::from(normalized);
    let (_, er, eg, eb) = channels(existing);
    let mix = |from: u8, to: u8| floor_to_index(lerp(f64::from(from), f64::from(to), t)) as u8;

    argb(alpha, mix(er, r), mix(eg, g), mix(eb, b))
}

/// Parse `#AARRGGBB`, `0xAARRGGBB` or bare hex. Six digits mean opaque RGB.
pub fn parse_hex(text: &str) -> Option<Pixel> {
    let text = text.trim();
    let digits = text
        .strip_prefix('#')
        .or_else(|| text.strip_prefix("0x"))
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    let value = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
        8 => Some(value),
        6 => Some(0xFF000000 | value),
        _ => None,
    }
}

/// Format as `#AARRGGBB`
pub fn to_hex(p: Pixel) -> String {
    format!("#{:08X}", p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_byte_order() {
        assert_eq!(argb(0x11, 0x22, 0x33, 0x44), 0x11223344);
        assert_eq!(channels(0x11223344), (0x11, 0x22, 0x33, 0x44));
        assert_eq!(rgb(0x64, 0x95, 0xED), 0xFF6495ED);
    }

    #[test]
    fn test_opaque_blend_replaces_color() {
        assert_eq!(blend(0xFF123456, RED, CORNFLOWER_BLUE), RED);
        assert_eq!(blend(CORNFLOWER_BLUE, 0xFFABCDEF, CORNFLOWER_BLUE), 0xFFABCDEF);
    }

    #[test]
    fn test_transparent_blend_toggles_against_clear_color() {
        let existing = 0xFF00FF00;
        let once = blend(existing, 0x00FFFFFF, CORNFLOWER_BLUE);
        assert_eq!(once, existing ^ CORNFLOWER_BLUE);
        let twice = blend(once, 0x00FFFFFF, CORNFLOWER_BLUE);
        assert_eq!(twice, existing);
    }

    #[test]
    fn test_partial_alpha_counts_as_transparent() {
        // 254 / 255 truncates to zero
        let existing = 0xFF101010;
        assert_eq!(blend(existing, 0xFEFFFFFF, BLACK), existing ^ BLACK);
        assert_eq!(blend(existing, 0x80FFFFFF, 0), existing);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#006495ED"), Some(CORNFLOWER_BLUE));
        assert_eq!(parse_hex("0xFF00FF00"), Some(GREEN));
        assert_eq!(parse_hex("ff0000"), Some(RED));
        assert_eq!(parse_hex(" #FFFFFFFF "), Some(WHITE));
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("not a color"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(CORNFLOWER_BLUE), "#006495ED");
        assert_eq!(parse_hex(&to_hex(PURPLE)), Some(PURPLE));
    }
}
