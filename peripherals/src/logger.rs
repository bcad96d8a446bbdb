//! ITM backed logging for the `log` facade.
//!
//! # Examples
//!
//! ```no_run
//! # use peripherals::logger::*;
//! # use log::info;
//! let p = cortex_m::Peripherals::take().unwrap();
//!
//! let logger = create_itm_logger::<InterruptFree>(LevelFilter::Info, p.ITM);
//! unsafe {
//!     init(&logger);
//! }
//!
//! info!("console up");
//! ```
//!
//! Reading the trace requires enabling ITM in openocd:
//!
//! ```gdb
//! monitor tpiu config internal itm.out uart off 8000000
//! monitor itm port 0 on
//! ```

use core::marker::{Send, Sync};
use cortex_m::peripheral::ITM;
use cortex_m_log::{
    destination,
    log::{trick_init, Logger},
    modes::InterruptModer,
    printer::{itm::ItmSync, Printer},
};

pub use log::LevelFilter;

pub use cortex_m_log::modes::{InterruptFree, InterruptOk};

/// Create new logger instance with ITM backend
pub fn create_itm_logger<M>(level: LevelFilter, itm_reg: ITM) -> Logger<ItmSync<M>>
where
    M: InterruptModer + Send + Sync + 'static,
{
    Logger {
        level,
        inner: ItmSync::<M>::new(destination::Itm::new(itm_reg)),
    }
}

/// Install `logger` behind the log facade
///
/// Returns `false` when a logger was already installed.
///
/// # Safety
///
/// The logger's lifetime is extended to `'static`. It must stay alive, and
/// in place, for as long as anything logs.
pub unsafe fn init<P>(logger: &Logger<P>) -> bool
where
    P: Printer + Send + Sync + 'static,
{
    trick_init(logger).is_ok()
}
