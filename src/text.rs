//! Text rendering on monochrome `embedded-graphics` targets.

use embedded_graphics::{
    fonts::{Font6x8, Text},
    pixelcolor::BinaryColor,
    prelude::*,
    style::TextStyle,
};

/// Vertical distance between consecutive rows
pub const ROW_HEIGHT: i32 = 10;

/// Rows of text drawn on a `BinaryColor` target, cleared before every draw
pub struct TextDisplay<D> {
    target: D,
}

impl<D: DrawTarget<BinaryColor>> TextDisplay<D> {
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    /// Access the target, e.g. to flush a buffered display
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Rows that fit on the target
    pub fn rows(&self) -> usize {
        (self.target.size().height as i32 / ROW_HEIGHT) as usize
    }

    pub fn clear(&mut self) -> Result<(), D::Error> {
        self.target.clear(BinaryColor::Off)
    }

    /// Replace the screen content with `lines`, one per row
    ///
    /// Lines past the last row are dropped.
    pub fn show(&mut self, lines: &[&str]) -> Result<(), D::Error> {
        self.clear()?;
        let style = TextStyle::new(Font6x8, BinaryColor::On);
        for (row, text) in lines.iter().take(self.rows()).enumerate() {
            Text::new(text, Point::new(0, row as i32 * ROW_HEIGHT))
                .into_styled(style)
                .draw(&mut self.target)?;
        }
        Ok(())
    }
}
