#![no_std]

use stm32f3xx_hal as stm32f303;

use cortex_m::peripheral::TPIU;
use stm32f303::{flash, rcc, time::MegaHertz};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

pub mod clock;
pub mod logger;
pub mod panel;
pub mod ppu;
pub mod spu;

pub use clock::Millis;
pub use panel::Panel;
pub use spu::Buzzer;

/// Baud rate of the ITM's SWO pin
pub const SWO_BAUD_RATE: MegaHertz = MegaHertz(2);

/// tpiu is a bridge for ITM, it's asynchronous clock prescaller
/// has to be updated, otherwise logging through ITM won't work
pub trait ClocksExt {
    fn set_tpiu_async_cpr(self, baud_rate: MegaHertz) -> Self;
}

impl ClocksExt for rcc::Clocks {
    fn set_tpiu_async_cpr(self, baud_rate: MegaHertz) -> Self {
        let tpiu_async_presc = self.hclk().0 / (baud_rate.0 * 1_000_000) - 1;
        unsafe { (*TPIU::ptr()).acpr.write(tpiu_async_presc) }
        trace!("HCLK set to: {}hz", self.hclk().0);
        trace!("setting tpiu baud rate to: {}mhz", baud_rate.0);
        trace!("setting async clock prescaller: {}", tpiu_async_presc);
        self
    }
}

/// Run the core at `sysclk` with APB1 at its 36MHz limit and keep ITM in sync
pub fn freeze_clocks(sysclk: MegaHertz, cfgr: rcc::CFGR, flash: &mut flash::Parts) -> rcc::Clocks {
    let pclk1 = MegaHertz(sysclk.0.min(36));
    cfgr.sysclk(sysclk)
        .pclk1(pclk1)
        .freeze(&mut flash.acr)
        .set_tpiu_async_cpr(SWO_BAUD_RATE)
}
