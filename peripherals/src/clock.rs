use stm32f3xx_hal as stm32f303;

use stm32f303::{pac::TIM2, prelude::*, rcc, timer::Timer};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// Free running millisecond counter on the 32-bit TIM2
///
/// Wraps after about 49 days.
pub struct Millis {
    tim2: TIM2,
}

impl Millis {
    /// Timer clock over 1kHz must fit the 16-bit prescaler, so sysclk up to 64MHz
    pub fn new(tim2: TIM2, clocks: rcc::Clocks, apb1: &mut rcc::APB1) -> Self {
        info!("configuring timer2 as millisecond clock");
        let timer_clock = match clocks.ppre1() {
            1 => clocks.pclk1().0,
            _ => clocks.pclk1().0 * 2,
        };
        let psc = timer_clock / 1_000 - 1;
        debug_assert!(psc <= u32::from(core::u16::MAX));
        debug!("timer2 clock: {}hz, prescaler: {}", timer_clock, psc);

        // the hal enables the peripheral clock, the counter is set up by hand
        let tim2 = Timer::tim2(tim2, 1.hz(), clocks, apb1).release();
        unsafe {
            tim2.psc.write(|w| w.bits(psc));
            tim2.arr.write(|w| w.bits(u32::max_value()));
            tim2.cnt.write(|w| w.bits(0));
            tim2.egr.write(|w| w.bits(1));
            tim2.cr1.write(|w| w.bits(1));
        }
        Self { tim2 }
    }

    pub fn now(&self) -> u32 {
        self.tim2.cnt.read().bits()
    }
}
