//! Color utility functions shared across the application.
//!
//! Features get a display color from a small fixed palette. Picks are
//! pseudo-random but driven by an explicit seed so tests can pin them.

/// Palette of feature display colors.
pub const PALETTE: [&str; 7] = [
    "#ef4444", "#f59e0b", "#10b981", "#3b82f6", "#8b5cf6", "#ec4899", "#06b6d4",
];

/// Pick a palette color for a seed.
///
/// Different seeds may map to the same color.
pub fn assign_color(seed: u64) -> &'static str {
    let index = (mix(seed) % PALETTE.len() as u64) as usize;
    PALETTE[index]
}

/// Parse a `#rrggbb` string into an RGB triple.
pub fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// SplitMix64 finalizer, spreads nearby seeds across the palette.
fn mix(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seeded sequence of palette picks.
#[derive(Debug, Clone)]
pub struct ColorPicker {
    state: u64,
}

impl ColorPicker {
    /// Create a picker starting from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Create a picker seeded from the current time.
    pub fn from_time() -> Self {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self::new(nanos as u64)
    }

    /// Pick the next color.
    pub fn next_color(&mut self) -> &'static str {
        let color = assign_color(self.state);
        self.state = self.state.wrapping_add(1);
        color
    }
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::from_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_color_is_deterministic() {
        for seed in [0, 1, 42, u64::MAX] {
            assert_eq!(assign_color(seed), assign_color(seed));
            assert!(PALETTE.contains(&assign_color(seed)));
        }
    }

    #[test]
    fn test_picker_covers_palette() {
        let mut picker = ColorPicker::new(7);
        let picked: std::collections::HashSet<_> = (0..200).map(|_| picker.next_color()).collect();
        assert_eq!(picked.len(), PALETTE.len());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = ColorPicker::new(99);
        let mut b = ColorPicker::new(99);
        for _ in 0..10 {
            assert_eq!(a.next_color(), b.next_color());
        }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#ef4444"), Some([0xef, 0x44, 0x44]));
        assert_eq!(parse_hex("#06B6D4"), Some([0x06, 0xb6, 0xd4]));
        assert_eq!(parse_hex("ef4444"), None);
        assert_eq!(parse_hex("#ef44"), None);
        assert_eq!(parse_hex("#gg4444"), None);
        assert!(PALETTE.iter().all(|c| parse_hex(c).is_some()));
    }

    #[test]
    fn test_parse_hex_rejects_signs() {
        assert_eq!(parse_hex("#+f+f+f"), None);
        assert_eq!(parse_hex("#-10000"), None);
    }
}
