use crate::config::Config;
use crate::context::Context;
use crate::game::Tig00;
use crate::leaderboard::{Leaderboard, Offline};
use crate::records::{MemoryRecordStore, RecordKeeper, RecordStore};

/// Assembles a booted `Tig00`
///
/// Without `with_leaderboard` the console runs offline, without `with_store`
/// the record is kept in RAM.
pub struct Builder<C: Context, L: Leaderboard = Offline, S: RecordStore = MemoryRecordStore> {
    context: Option<C>,
    leaderboard: Option<L>,
    store: S,
    config: Config,
}

impl<C: Context> Builder<C> {
    pub fn new() -> Self {
        Self {
            context: None,
            leaderboard: None,
            store: MemoryRecordStore::default(),
            config: Config::default(),
        }
    }
}

impl<C: Context, L: Leaderboard, S: RecordStore> Builder<C, L, S> {
    pub fn with_context(mut self, ctx: C) -> Self {
        self.context = Some(ctx);
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Go online, reporting runs to `leaderboard`
    pub fn with_leaderboard<L2: Leaderboard>(self, leaderboard: L2) -> Builder<C, L2, S> {
        Builder {
            context: self.context,
            leaderboard: Some(leaderboard),
            store: self.store,
            config: self.config,
        }
    }

    pub fn with_store<S2: RecordStore>(self, store: S2) -> Builder<C, L, S2> {
        Builder {
            context: self.context,
            leaderboard: self.leaderboard,
            store,
            config: self.config,
        }
    }

    pub fn build(self) -> Result<Tig00<C, L, S>, &'static str> {
        let context = self.context.ok_or("Context not provided")?;
        if self.config.player_timeout_ms == 0 {
            return Err("Player timeout must not be zero");
        }
        let records = RecordKeeper::new(self.leaderboard, self.store);
        let mut game = Tig00::new(context, records, self.config);
        game.boot();
        Ok(game)
    }
}

impl<C: Context> Default for Builder<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::TestingContext;
    use crate::game::GameState;
    use crate::leaderboard::testing::ScriptedLeaderboard;
    use crate::records::Record;

    #[test]
    fn with_context() {
        let result = Builder::new().with_context(TestingContext::new(0)).build();
        assert!(result.is_ok());
        let game = result.unwrap();
        assert_eq!(game.state(), GameState::Lobby);
        assert!(!game.is_online());
    }

    #[test]
    fn without_context() {
        let result = Builder::<TestingContext>::new().build();
        assert!(result.is_err());
    }

    #[test]
    fn with_zero_timeout() {
        let config = Config {
            player_timeout_ms: 0,
            ..Config::default()
        };
        let result = Builder::new()
            .with_context(TestingContext::new(0))
            .with_config(config)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn with_leaderboard_boots_online() {
        let board = ScriptedLeaderboard::new();
        let calls = board.calls.clone();
        let game = Builder::new()
            .with_context(TestingContext::new(0))
            .with_leaderboard(board)
            .build()
            .unwrap();
        assert!(game.is_online());
        assert_eq!(calls.borrow().top_queries, 1);
    }

    #[test]
    fn with_store_loads_record() {
        let mut store = MemoryRecordStore::default();
        let mut name = crate::records::Name::new();
        name.push_str("MAX").unwrap();
        let record = Record { level: 7, name };
        store.save(&record).unwrap();

        let game = Builder::new()
            .with_context(TestingContext::new(0))
            .with_store(store)
            .build()
            .unwrap();
        assert_eq!(game.record(), &record);
        assert!(game.context().shows("RECORD 7 MAX"));
    }

    #[test]
    fn sound_follows_config() {
        let config = Config {
            sound: false,
            ..Config::default()
        };
        let game = Builder::new()
            .with_context(TestingContext::new(0))
            .with_config(config)
            .build()
            .unwrap();
        assert!(!game.is_sound_on());
    }
}
