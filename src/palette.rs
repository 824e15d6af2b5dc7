use crate::traits::Color;

const ENTRIES: usize = 16;

const fn hex(rgb: u32) -> Color {
    Color::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Sixteen-stop cyclic gradient, sampled by a position in 0..=255.
///
/// The built-in palettes keep every stop lit so a tail cell never reads as
/// a free one, whatever the dial says.
///
/// Positions between stops blend linearly; the last stop blends back into
/// the first so the gradient has no seam when the position wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    stops: [Color; ENTRIES],
}

impl Palette {
    pub const RAINBOW: Palette = Palette::from_hex([
        0xFF0000, 0xD52A00, 0xAB5500, 0xAB7F00, 0xABAB00, 0x56D500, 0x00FF00, 0x00D52A,
        0x00AB55, 0x0056AA, 0x0000FF, 0x2A00D5, 0x5500AB, 0x7F0081, 0xAB0055, 0xD5002B,
    ]);

    pub const LAVA: Palette = Palette::from_hex([
        0x400000, 0x800000, 0x400000, 0x800000, 0x8B0000, 0x800000, 0x8B0000, 0x8B0000,
        0x8B0000, 0xFF0000, 0xFFA500, 0xFFFFFF, 0xFFA500, 0xFF0000, 0x8B0000, 0x400000,
    ]);

    pub const OCEAN: Palette = Palette::from_hex([
        0x191970, 0x00008B, 0x191970, 0x000080, 0x00008B, 0x0000CD, 0x2E8B57, 0x008080,
        0x5F9EA0, 0x0000FF, 0x008B8B, 0x6495ED, 0x7FFFD4, 0x2E8B57, 0x00FFFF, 0x87CEFA,
    ]);

    pub const FOREST: Palette = Palette::from_hex([
        0x006400, 0x006400, 0x556B2F, 0x006400, 0x008000, 0x228B22, 0x6B8E23, 0x008000,
        0x2E8B57, 0x66CDAA, 0x32CD32, 0x9ACD32, 0x90EE90, 0x7CFC00, 0x66CDAA, 0x228B22,
    ]);

    pub const fn new(stops: [Color; ENTRIES]) -> Self {
        Self { stops }
    }

    const fn from_hex(codes: [u32; ENTRIES]) -> Self {
        let mut stops = [Color::BLACK; ENTRIES];
        let mut i = 0;
        while i < ENTRIES {
            stops[i] = hex(codes[i]);
            i += 1;
        }
        Self { stops }
    }

    /// A single-color palette.
    pub const fn solid(color: Color) -> Self {
        Self { stops: [color; ENTRIES] }
    }

    pub fn color_at(&self, position: u8) -> Color {
        let stop = (position >> 4) as usize;
        let blend = (position & 0x0F) << 4;
        let from = self.stops[stop];
        if blend == 0 {
            return from;
        }
        let to = self.stops[(stop + 1) % ENTRIES];
        from.lerp(to, blend)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::RAINBOW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_are_exact() {
        let p = Palette::RAINBOW;
        assert_eq!(p.color_at(0), Color::new(0xFF, 0, 0));
        assert_eq!(p.color_at(0x60), Color::new(0, 0xFF, 0));
        assert_eq!(p.color_at(0xA0), Color::new(0, 0, 0xFF));
    }

    #[test]
    fn test_blend_between_stops() {
        let p = Palette::new({
            let mut stops = [Color::BLACK; 16];
            stops[1] = Color::new(160, 160, 160);
            stops
        });
        let mid = p.color_at(0x08);
        assert_eq!(mid, Color::new(80, 80, 80));
    }

    #[test]
    fn test_last_stop_wraps_to_first() {
        let mut stops = [Color::BLACK; 16];
        stops[0] = Color::new(0, 0, 200);
        let p = Palette::new(stops);
        let near_end = p.color_at(0xF8);
        assert_eq!(near_end, Color::new(0, 0, 100));
    }

    #[test]
    fn test_solid() {
        let p = Palette::solid(Color::GREEN);
        for pos in [0u8, 17, 128, 255] {
            assert_eq!(p.color_at(pos), Color::GREEN);
        }
    }

    #[test]
    fn test_builtin_palettes_never_go_dark() {
        for palette in [Palette::RAINBOW, Palette::LAVA, Palette::OCEAN, Palette::FOREST] {
            for position in 0..=255u8 {
                assert!(!palette.color_at(position).is_black(), "dark at {}", position);
            }
        }
    }
}
