use std::fmt;

/// Display colour of a trajectory, kept as 8-bit RGB and shown as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const FALLBACK: Color = Color::rgb(0xFF, 0x00, 0x00);

const PALETTE: [Color; 8] = [
    Color::rgb(0xE6, 0x19, 0x4B),
    Color::rgb(0x3C, 0xB4, 0x4B),
    Color::rgb(0xFF, 0xE1, 0x19),
    Color::rgb(0x43, 0x63, 0xD8),
    Color::rgb(0xF5, 0x82, 0x31),
    Color::rgb(0x91, 0x1E, 0xB4),
    Color::rgb(0x42, 0xD4, 0xF4),
    Color::rgb(0xF0, 0x32, 0xE6),
];

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RGB`, `#RRGGBB`, or the same without the leading `#`.
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let full: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_owned(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(&full[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Like [`Color::from_hex`], falling back to pure red for unparsable input.
    #[must_use]
    pub fn normalize(s: &str) -> Self {
        Self::from_hex(s).unwrap_or(FALLBACK)
    }

    /// Picks a colour from a fixed rotation, for newly created trajectories.
    #[must_use]
    pub fn from_palette(index: usize) -> Self {
        PALETTE[index % PALETTE.len()]
    }
}

impl Default for Color {
    fn default() -> Self {
        FALLBACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_form_is_expanded() {
        assert_eq!(Color::normalize("#0af").to_string(), "#00AAFF");
    }

    #[test]
    fn missing_hash_is_accepted() {
        assert_eq!(Color::from_hex("12ab9C"), Some(Color::rgb(0x12, 0xAB, 0x9C)));
    }

    #[test]
    fn invalid_input_falls_back_to_red() {
        assert_eq!(Color::normalize("not a colour").to_string(), "#FF0000");
        assert_eq!(Color::normalize("#12345").to_string(), "#FF0000");
        assert!(Color::from_hex("#ééé").is_none());
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(Color::from_palette(0), Color::from_palette(8));
    }
}
