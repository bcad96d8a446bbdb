//! One-shot edge detection for the four colored buttons.
//!
//! Each raw line is sampled once per tick. A press is reported on the tick
//! the line reads pressed while the button is armed, after which the button
//! stays disarmed until the line is seen released again. There is no delay
//! based debounce: re-arming happens only on an observed release.

use crate::color::{Color, COLORS};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Button {
    color: Color,
    is_ready: bool,
    is_pressed: bool,
    level: bool,
}

impl Button {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            is_ready: true,
            is_pressed: false,
            level: false,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Armed for a new press
    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    /// Pressed on this tick, true for exactly one tick per physical press
    pub fn is_pressed(&self) -> bool {
        self.is_pressed
    }

    /// Raw line level sampled on this tick
    pub fn is_held(&self) -> bool {
        self.level
    }

    /// Feed the raw level sampled on this tick
    pub fn update(&mut self, level: bool) {
        self.level = level;
        self.is_pressed = level && self.is_ready;
        self.is_ready = !level;
    }

    /// Drop the pending event and wait for a release before the next one
    pub fn reset(&mut self) {
        self.is_pressed = false;
        self.is_ready = false;
    }
}

/// The four buttons in scan order
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Buttons([Button; COLORS]);

impl Buttons {
    pub fn new() -> Self {
        Self([
            Button::new(Color::Blue),
            Button::new(Color::Yellow),
            Button::new(Color::Green),
            Button::new(Color::Red),
        ])
    }

    /// Update every button from one snapshot of raw levels, indexed by color
    pub fn read(&mut self, levels: &[bool; COLORS]) {
        self.0
            .iter_mut()
            .zip(levels.iter())
            .for_each(|(button, &level)| button.update(level));
    }

    pub fn get(&self, color: Color) -> &Button {
        &self.0[color.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Button> {
        self.0.iter()
    }

    pub fn any_button_pressed(&self) -> bool {
        self.0.iter().any(Button::is_pressed)
    }

    /// Four button chord, sensed on raw levels rather than press events
    pub fn are_all_buttons_pressed(&self) -> bool {
        self.0.iter().all(Button::is_held)
    }

    /// First button pressed on this tick in scan order
    ///
    /// Simultaneous presses resolve to the lowest color id.
    pub fn first_pressed(&self) -> Option<Color> {
        self.0.iter().find(|b| b.is_pressed()).map(Button::color)
    }

    pub fn reset(&mut self) {
        self.0.iter_mut().for_each(Button::reset);
    }
}

impl Default for Buttons {
    fn default() -> Self {
        Self::new()
    }
}
