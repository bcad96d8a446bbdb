//! Context for accessing the hardware of the console `Tig00` runs on.
//!
//! The controller owns its context exclusively and only ever calls it from
//! `tick`, so implementors need no interior locking.

use crate::color::{Color, COLORS};
use crate::error::Error;

/// Trait aggregating console functionalities
pub trait Context {
    /// Clear the screen and draw `lines` on consecutive rows from the top
    ///
    /// Called on every state transition and whenever the shown text changes
    fn display(&mut self, lines: &[&str]) -> Result<(), Error>;
    /// Blank the screen
    fn clear(&mut self) -> Result<(), Error>;
    /// Start sounding `frequency` hertz until `stop_tone`
    ///
    /// Never called while sound is switched off in the options menu
    fn tone(&mut self, frequency: u32) -> Result<(), Error>;
    /// Silence the buzzer
    fn stop_tone(&mut self) -> Result<(), Error>;
    /// Switch the LED of `color`
    fn set_led(&mut self, color: Color, on: bool) -> Result<(), Error>;
    /// Raw level of each button line, `true` when held down, indexed by color
    ///
    /// Called by `tick` exactly once per tick
    fn get_buttons(&mut self) -> [bool; COLORS];
    /// Monotonic milliseconds, allowed to wrap
    fn now_ms(&mut self) -> u32;
    /// Busy wait, used only for short fixed feedback animations
    fn delay_ms(&mut self, ms: u32);
    /// Generate random 8-bit number
    ///
    /// Called once for every color appended to the sequence
    fn gen_random(&mut self) -> u8;
}
