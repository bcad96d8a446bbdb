/// One of the four button/LED pairs of the console
///
/// The discriminant is the color id used everywhere else (sequence entries,
/// button scan order, LED index).
///
/// Examples:
/// ```
/// use tig00::Color;
///
/// assert_eq!(Color::from_index(2), Some(Color::Green));
/// assert_eq!(Color::Green.index(), 2);
/// assert_eq!(Color::from_index(4), None);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Blue = 0,
    Yellow = 1,
    Green = 2,
    Red = 3,
}

/// Number of colors, buttons and LEDs
pub const COLORS: usize = 4;

impl Color {
    /// All colors in button scan order
    pub const ALL: [Color; COLORS] = [Color::Blue, Color::Yellow, Color::Green, Color::Red];

    pub fn from_index(n: usize) -> Option<Self> {
        Self::ALL.get(n).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Label shown on the display while the color is lit
    pub fn label(self) -> &'static str {
        match self {
            Color::Blue => "BLUE",
            Color::Yellow => "YELLOW",
            Color::Green => "GREEN",
            Color::Red => "RED",
        }
    }

    /// Buzzer frequency in hertz
    pub fn tone(self) -> u32 {
        match self {
            Color::Blue => 300,
            Color::Yellow => 600,
            Color::Green => 900,
            Color::Red => 1200,
        }
    }
}

impl From<u8> for Color {
    /// Folds any byte onto a color, keeping a uniform byte uniform
    fn from(byte: u8) -> Self {
        Self::ALL[(byte % COLORS as u8) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_folding_covers_every_color_evenly() {
        let mut hits = [0usize; COLORS];
        for byte in 0..=255u8 {
            hits[Color::from(byte).index()] += 1;
        }
        assert_eq!(hits, [64; COLORS]);
    }

    #[test]
    fn tones_rise_with_index() {
        let tones: [u32; COLORS] = [
            Color::Blue.tone(),
            Color::Yellow.tone(),
            Color::Green.tone(),
            Color::Red.tone(),
        ];
        assert!(tones.windows(2).all(|w| w[0] < w[1]));
    }
}
