#![no_main]
#![no_std]

// sets default panic handler
#[allow(unused_imports)]
use panic_itm;

// provides _start symbol
use cortex_m_rt::entry;

use core::convert::Infallible;

use stm32f3xx_hal as stm32f303;

use stm32f303::{
    delay::Delay,
    hal::digital::v2::{InputPin, OutputPin},
    pac,
    prelude::*,
};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use peripherals::{freeze_clocks, logger::*, ppu, Buzzer, Millis, Panel};

use tig00::{timer::Stopwatch, Builder, Context, Tig00};

mod context;
use context::DiscoveryContext;

/// Period of the game loop
const TICK_MS: u32 = 5;

#[entry]
fn main() -> ! {
    let mut cp = cortex_m::Peripherals::take().expect("Failed requesting peripherals");
    let dp = pac::Peripherals::take().expect("Failed requesting peripherals");

    let logger = create_itm_logger::<InterruptFree>(LevelFilter::Info, cp.ITM);
    unsafe { init(&logger) };
    info!("init process started");

    info!("configuring clocks");
    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = freeze_clocks(36.mhz(), rcc.cfgr, &mut flash);

    cp.DCB.enable_trace();
    cp.DWT.enable_cycle_counter();
    let mut delay = Delay::new(cp.SYST, clocks);

    let mut gpiob = dp.GPIOB.split(&mut rcc.ahb);
    let mut gpiod = dp.GPIOD.split(&mut rcc.ahb);
    let mut gpioe = dp.GPIOE.split(&mut rcc.ahb);

    info!("configuring buzzer with tim3 ch2 on pb5");
    let pb5 = gpiob.pb5.into_af2(&mut gpiob.moder, &mut gpiob.afrl);
    let buzzer = Buzzer::new(dp.TIM3, pb5, &clocks);

    info!("configuring ssd1306 display via spi2");
    let rst = gpiob
        .pb0
        .into_push_pull_output(&mut gpiob.moder, &mut gpiob.otyper);
    let dc = gpiob
        .pb1
        .into_push_pull_output(&mut gpiob.moder, &mut gpiob.otyper);
    let cs = gpiob
        .pb11
        .into_push_pull_output(&mut gpiob.moder, &mut gpiob.otyper);

    let sck = gpiob.pb13.into_af5(&mut gpiob.moder, &mut gpiob.afrh);
    let miso = gpiob.pb14.into_af5(&mut gpiob.moder, &mut gpiob.afrh);
    let mosi = gpiob.pb15.into_af5(&mut gpiob.moder, &mut gpiob.afrh);

    let display = ppu::init_ssd1306_on_spi2(
        8.mhz(),
        dp.SPI2,
        (sck, miso, mosi),
        (cs, dc, rst),
        &mut rcc.apb1,
        &mut delay,
        clocks,
    );

    info!("configuring panel: leds on pe8-pe11, buttons on pd8-pd11");
    let mut blue_led = gpioe
        .pe8
        .into_push_pull_output(&mut gpioe.moder, &mut gpioe.otyper);
    let mut red_led = gpioe
        .pe9
        .into_push_pull_output(&mut gpioe.moder, &mut gpioe.otyper);
    let mut yellow_led = gpioe
        .pe10
        .into_push_pull_output(&mut gpioe.moder, &mut gpioe.otyper);
    let mut green_led = gpioe
        .pe11
        .into_push_pull_output(&mut gpioe.moder, &mut gpioe.otyper);

    let blue_button = gpiod
        .pd8
        .into_pull_up_input(&mut gpiod.moder, &mut gpiod.pupdr);
    let yellow_button = gpiod
        .pd9
        .into_pull_up_input(&mut gpiod.moder, &mut gpiod.pupdr);
    let green_button = gpiod
        .pd10
        .into_pull_up_input(&mut gpiod.moder, &mut gpiod.pupdr);
    let red_button = gpiod
        .pd11
        .into_pull_up_input(&mut gpiod.moder, &mut gpiod.pupdr);

    // indexed by color
    let leds: [&mut dyn OutputPin<Error = Infallible>; 4] =
        [&mut blue_led, &mut yellow_led, &mut green_led, &mut red_led];
    let buttons: [&dyn InputPin<Error = Infallible>; 4] =
        [&blue_button, &yellow_button, &green_button, &red_button];
    let panel = Panel::new(leds, buttons);

    let clock = Millis::new(dp.TIM2, clocks, &mut rcc.apb1);

    // no network on this board and no flash driver, the record lives in RAM
    // TODO: persist the record in the last flash page through `tig00::Blob`
    let ctx = DiscoveryContext::new(display, panel, buzzer, clock, delay);
    let mut game: Tig00<_> = Builder::new()
        .with_context(ctx)
        .build()
        .expect("TIG-00 failed to boot");
    info!("init process finished");

    let mut pace = Stopwatch::new();
    pace.start(game.context_mut().now_ms());
    loop {
        let now = game.context_mut().now_ms();
        if pace.wait(now, TICK_MS).is_ok() {
            pace.start(now);
            game.tick();
        }
    }
}
