use stm32f3xx_hal as stm32f303;

use ssd1306::{prelude::*, Builder};
use stm32f303::{
    delay::Delay,
    hal::digital::v2::OutputPin,
    rcc,
    pac::SPI2,
    spi::{MisoPin, Mode, MosiPin, Phase, Polarity, SckPin, Spi},
    time::Hertz,
};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// Bring up a 128x64 ssd1306 in buffered graphics mode
///
/// `delay` is only borrowed for the reset pulse.
pub fn init_ssd1306_on_spi2<H, SCK, MISO, MOSI, CS, DC, RST>(
    freq: H,
    spi2: SPI2,
    (sck, miso, mosi): (SCK, MISO, MOSI),
    (cs, dc, mut rst): (CS, DC, RST),
    apb1: &mut rcc::APB1,
    delay: &mut Delay,
    clocks: rcc::Clocks,
) -> GraphicsMode<impl WriteOnlyDataCommand>
where
    H: Into<Hertz>,
    SCK: SckPin<SPI2>,
    MISO: MisoPin<SPI2>,
    MOSI: MosiPin<SPI2>,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    let spi_mode = Mode {
        polarity: Polarity::IdleLow,
        phase: Phase::CaptureOnFirstTransition,
    };

    let spi = Spi::spi2(spi2, (sck, miso, mosi), spi_mode, freq.into(), clocks, apb1);

    let interface = SPIInterface::new(spi, dc, cs);
    let mut disp: GraphicsMode<_> = Builder::new().connect(interface).into();

    if disp.reset(&mut rst, delay).is_err() {
        warn!("ssd1306 reset line failed");
    }
    if disp.init().is_err() {
        error!("ssd1306 did not accept init sequence");
    }
    info!("ssd1306 ready");
    disp
}
