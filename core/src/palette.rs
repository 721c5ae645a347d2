use serde::{Deserialize, Serialize};

/// Cell color, drawn uniformly from a fixed six-entry palette.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Red,
    Green,
    Blue,
    Orange,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Self::White,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Orange,
        Self::Yellow,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Wraps around the palette for out-of-range values.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    pub const fn hex(self) -> &'static str {
        use Color::*;
        match self {
            White => "#FFFFFF",
            Red => "#FF0000",
            Green => "#00FF00",
            Blue => "#0000FF",
            Orange => "#FFA500",
            Yellow => "#FFFF00",
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        use Color::*;
        match self {
            White => (0xFF, 0xFF, 0xFF),
            Red => (0xFF, 0x00, 0x00),
            Green => (0x00, 0xFF, 0x00),
            Blue => (0x00, 0x00, 0xFF),
            Orange => (0xFF, 0xA5, 0x00),
            Yellow => (0xFF, 0xFF, 0x00),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::White
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_rgb_agree() {
        for color in Color::ALL {
            let (r, g, b) = color.rgb();
            let hex = alloc::format!("#{r:02X}{g:02X}{b:02X}");
            assert_eq!(hex, color.hex());
        }
    }

    #[test]
    fn from_index_wraps() {
        assert_eq!(Color::from_index(0), Color::White);
        assert_eq!(Color::from_index(5), Color::Yellow);
        assert_eq!(Color::from_index(6), Color::White);
    }
}
