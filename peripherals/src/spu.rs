use stm32f3xx_hal as stm32f303;

use stm32f303::{
    gpio::{gpiob, AF2},
    hal::PwmPin,
    pac,
    pwm::{self, PwmChannel, WithPins, TIM3_CH2},
    pac::TIM3,
    rcc,
    time::Hertz,
};

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// Lowest pitch the 16-bit prescaler and reload can reach at 72MHz timer clock
pub const MIN_FREQUENCY: u32 = 20;

pub fn init_tim3_pwm_on_pb5(
    freq: Hertz,
    tim3: TIM3,
    pb5: gpiob::PB5<AF2>,
    clocks: &rcc::Clocks,
) -> PwmChannel<TIM3_CH2, WithPins> {
    info!("configuring timer3 in pwm mode");
    let resolution = core::u16::MAX;
    debug!("resolution: {}, frequency: {}hz", resolution, freq.0);
    debug!("using channels: 2");
    let (_, tim3_ch2, ..) = pwm::tim3(tim3, resolution, freq, &clocks);
    let mut tim3_ch2 = tim3_ch2.output_to_pb5(pb5);
    tim3_ch2.disable();
    tim3_ch2
}

/// Square wave buzzer on TIM3 channel 2
pub struct Buzzer {
    channel: PwmChannel<TIM3_CH2, WithPins>,
    timer_clock: u32,
    frequency: Option<u32>,
}

impl Buzzer {
    pub fn new(tim3: TIM3, pb5: gpiob::PB5<AF2>, clocks: &rcc::Clocks) -> Self {
        // APB1 timers run at twice the bus clock once it is divided
        let timer_clock = match clocks.ppre1() {
            1 => clocks.pclk1().0,
            _ => clocks.pclk1().0 * 2,
        };
        trace!("timer3 clock: {}hz", timer_clock);
        let channel = init_tim3_pwm_on_pb5(Hertz(1_000), tim3, pb5, clocks);
        Self {
            channel,
            timer_clock,
            frequency: None,
        }
    }

    pub fn frequency(&self) -> Option<u32> {
        self.frequency
    }

    /// Sound `frequency` hertz at half duty until `stop`
    pub fn tone(&mut self, frequency: u32) {
        let frequency = frequency.max(MIN_FREQUENCY);
        let ticks = self.timer_clock / frequency;
        let psc = (ticks - 1) >> 16;
        let arr = ticks / (psc + 1) - 1;
        debug!("tone {}hz: psc {}, arr {}", frequency, psc, arr);

        // the hal fixes the period at construction, retune it in place
        unsafe {
            let tim3 = &*pac::TIM3::ptr();
            tim3.psc.write(|w| w.bits(psc));
            tim3.arr.write(|w| w.bits(arr));
            tim3.ccr2.write(|w| w.bits(arr / 2));
            tim3.egr.write(|w| w.bits(1));
        }
        self.channel.enable();
        self.frequency = Some(frequency);
    }

    pub fn stop(&mut self) {
        self.channel.disable();
        self.frequency = None;
    }
}
