use heapless::Vec;

use crate::color::Color;

/// Longest sequence a run can reach
pub const MAX_SEQUENCE: usize = 64;

/// Raised when a sequence would grow past `MAX_SEQUENCE`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SequenceFull;

/// The color sequence of the current run
///
/// Entries are drawn once and never changed afterwards, so each level
/// replays the previous one as a prefix. Positions past the current length
/// read as `None`, the "no color" terminator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence(Vec<Color, MAX_SEQUENCE>);

impl Sequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, n: usize) -> Option<Color> {
        self.0.get(n).copied()
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.0
    }

    /// Append freshly drawn colors until the sequence holds `level` entries
    ///
    /// `draw` is called once per appended entry. Nothing is appended when the
    /// level does not fit.
    pub fn extend_to<F>(&mut self, level: usize, mut draw: F) -> Result<(), SequenceFull>
    where
        F: FnMut() -> u8,
    {
        if level > MAX_SEQUENCE {
            return Err(SequenceFull);
        }
        while self.0.len() < level {
            self.0.push(Color::from(draw())).map_err(|_| SequenceFull)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
