#![cfg_attr(not(test), no_std)]
//! TIG-00, a four color memory game for small consoles.
//!
//! The game logic is platform agnostic: it drives its console through the
//! `Context` trait and is advanced by calling `Tig00::tick` in a loop.
//!
//! ```ignore
//! let mut game = Builder::new().with_context(ctx).build()?;
//! loop {
//!     game.tick();
//! }
//! ```

pub mod builder;
pub mod button;
pub mod color;
pub mod config;
pub mod context;
pub mod difficulty;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod name;
pub mod records;
pub mod sequence;
#[cfg(feature = "embedded-graphics")]
pub mod text;
pub mod timer;

#[cfg(feature = "embedded-graphics")]
pub use embedded_graphics;
pub use heapless;

pub use builder::Builder;
pub use button::{Button, Buttons};
pub use color::{Color, COLORS};
pub use config::Config;
pub use context::Context;
pub use error::Error;
pub use game::{GameState, RunEnd, Tig00};
pub use leaderboard::{GameId, HttpClient, HttpLeaderboard, Leaderboard, Offline, TopScore};
pub use records::{Blob, JsonRecordStore, MemoryRecordStore, Record, RecordKeeper, RecordStore};
#[cfg(feature = "embedded-graphics")]
pub use text::TextDisplay;
