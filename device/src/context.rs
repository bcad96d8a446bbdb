use cortex_m::peripheral::DWT;
use nanorand::{rand::pcg64::Pcg64 as Rng, RNG};
use ssd1306::prelude::*;
use stm32f3xx_hal::{delay::Delay, prelude::*};

use peripherals::{Buzzer, Millis, Panel};
use tig00::{Color, Context, Error, TextDisplay, COLORS};

pub(crate) struct DiscoveryContext<'a, T: WriteOnlyDataCommand> {
    pub display: TextDisplay<GraphicsMode<T>>,
    pub panel: Panel<'a>,
    pub buzzer: Buzzer,
    pub clock: Millis,
    pub delay: Delay,
    /// seeded from the cycle counter on first use, i.e. when a player starts a run
    rng: Option<Rng>,
}

impl<'a, T: WriteOnlyDataCommand> DiscoveryContext<'a, T> {
    pub fn new(
        display: GraphicsMode<T>,
        panel: Panel<'a>,
        buzzer: Buzzer,
        clock: Millis,
        delay: Delay,
    ) -> Self {
        Self {
            display: TextDisplay::new(display),
            panel,
            buzzer,
            clock,
            delay,
            rng: None,
        }
    }
}

impl<'a, T: WriteOnlyDataCommand> Context for DiscoveryContext<'a, T> {
    fn display(&mut self, lines: &[&str]) -> Result<(), Error> {
        self.display.show(lines).map_err(|_| Error::Display)?;
        self.display
            .target_mut()
            .flush()
            .map_err(|_| Error::Display)
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.display.clear().map_err(|_| Error::Display)?;
        self.display
            .target_mut()
            .flush()
            .map_err(|_| Error::Display)
    }

    fn tone(&mut self, frequency: u32) -> Result<(), Error> {
        self.buzzer.tone(frequency);
        Ok(())
    }

    fn stop_tone(&mut self) -> Result<(), Error> {
        self.buzzer.stop();
        Ok(())
    }

    fn set_led(&mut self, color: Color, on: bool) -> Result<(), Error> {
        self.panel
            .set_led(color.index(), on)
            .map_err(|_| Error::Gpio)
    }

    fn get_buttons(&mut self) -> [bool; COLORS] {
        self.panel.read()
    }

    fn now_ms(&mut self) -> u32 {
        self.clock.now()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn gen_random(&mut self) -> u8 {
        self.rng
            .get_or_insert_with(|| Rng::new_seed(u128::from(DWT::get_cycle_count())))
            .generate::<u8>()
    }
}
