use stm32f3xx_hal as stm32f303;

use stm32f303::hal::digital::v2::{InputPin, OutputPin};

use core::convert::Infallible;

/// Number of button/LED pairs on the panel
pub const PAIRS: usize = 4;

/// Four push buttons wired to ground with internal pull-ups, each with an LED
pub struct Panel<'a> {
    leds: [&'a mut dyn OutputPin<Error = Infallible>; PAIRS],
    buttons: [&'a dyn InputPin<Error = Infallible>; PAIRS],
}

impl<'a> Panel<'a> {
    pub fn new(
        leds: [&'a mut dyn OutputPin<Error = Infallible>; PAIRS],
        buttons: [&'a dyn InputPin<Error = Infallible>; PAIRS],
    ) -> Self {
        Self { leds, buttons }
    }

    /// Level of every button, `true` while held down
    pub fn read(&self) -> [bool; PAIRS] {
        let mut res = [false; PAIRS];
        for (held, button) in res.iter_mut().zip(self.buttons.iter()) {
            // pulled up, a press shorts the line low
            *held = button.is_low().unwrap_or(false);
        }
        res
    }

    pub fn set_led(&mut self, n: usize, on: bool) -> Result<(), Infallible> {
        match self.leds.get_mut(n) {
            Some(led) if on => led.set_high(),
            Some(led) => led.set_low(),
            None => Ok(()),
        }
    }
}
