//! Best score bookkeeping, online or offline.
//!
//! With a leaderboard, the server is the authority on records and the local
//! store is left alone. Without one, records live only in the local store.
//! Every remote failure is logged and answered with the offline default, so
//! a flaky network can cost a record claim but never a run.

use heapless::String;
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::leaderboard::{GameId, Leaderboard};

/// Player initials, up to three uppercase letters
pub type Name = String<3>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "record_level")]
    pub level: u16,
    #[serde(rename = "record_name")]
    pub name: Name,
}

/// Local persistence of the record
pub trait RecordStore {
    /// Stored record, the default one when nothing was stored yet
    fn load(&mut self) -> Result<Record, Error>;
    fn save(&mut self, record: &Record) -> Result<(), Error>;
}

/// Record kept in RAM, lost on power cycle
#[derive(Clone, Debug, Default)]
pub struct MemoryRecordStore(Record);

impl RecordStore for MemoryRecordStore {
    fn load(&mut self) -> Result<Record, Error> {
        Ok(self.0.clone())
    }

    fn save(&mut self, record: &Record) -> Result<(), Error> {
        self.0 = record.clone();
        Ok(())
    }
}

/// Raw persistent bytes, e.g. a flash page or an EEPROM
pub trait Blob {
    /// Copy the stored bytes into `buf`, returning how many there are, 0 if none
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error>;
    /// Replace the stored bytes
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

const RECORD_JSON_LEN: usize = 64;

/// Record stored as `{"record_level":N,"record_name":"ABC"}`
pub struct JsonRecordStore<B> {
    blob: B,
}

impl<B: Blob> JsonRecordStore<B> {
    pub fn new(blob: B) -> Self {
        Self { blob }
    }

    pub fn blob(&self) -> &B {
        &self.blob
    }
}

impl<B: Blob> RecordStore for JsonRecordStore<B> {
    fn load(&mut self) -> Result<Record, Error> {
        let mut buf = [0u8; RECORD_JSON_LEN];
        let len = self.blob.read(&mut buf)?;
        if len == 0 {
            return Ok(Record::default());
        }
        let (record, _) = serde_json_core::from_slice::<Record>(&buf[..len.min(buf.len())])
            .map_err(|_| Error::Codec)?;
        if record.name.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(record)
        } else {
            Err(Error::Codec)
        }
    }

    fn save(&mut self, record: &Record) -> Result<(), Error> {
        let mut buf = [0u8; RECORD_JSON_LEN];
        let len = serde_json_core::to_slice(record, &mut buf).map_err(|_| Error::Codec)?;
        self.blob.write(&buf[..len])
    }
}

/// Decides where sessions, scores and names go
pub struct RecordKeeper<L, S> {
    remote: Option<L>,
    store: S,
}

impl<L: Leaderboard, S: RecordStore> RecordKeeper<L, S> {
    /// `remote` is `None` on a console that booted offline
    pub fn new(remote: Option<L>, store: S) -> Self {
        Self { remote, store }
    }

    pub fn is_online(&self) -> bool {
        self.remote.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn leaderboard(&self) -> Option<&L> {
        self.remote.as_ref()
    }

    /// Open a remote session for a new run, `None` offline or on failure
    pub fn begin_session(&mut self) -> Option<GameId> {
        let remote = self.remote.as_mut()?;
        match remote.start_game() {
            Ok(id) => {
                debug!("remote session {} opened", id);
                Some(id)
            }
            Err(e) => {
                warn!("could not open remote session: {}", e);
                None
            }
        }
    }

    /// Close the session with `level`, `true` only if the server calls it a top record
    pub fn end_session(&mut self, session: Option<&GameId>, level: u16) -> bool {
        let (remote, session) = match (self.remote.as_mut(), session) {
            (Some(remote), Some(session)) => (remote, session),
            _ => return false,
        };
        match remote.end_game(session, level) {
            Ok(is_top) => {
                info!("session {} closed at level {}, top record: {}", session, level, is_top);
                is_top
            }
            Err(e) => {
                warn!("could not close session {}: {}", session, e);
                false
            }
        }
    }

    /// Publish the record holder's name
    ///
    /// Goes to the server when a session is open, otherwise the record is
    /// persisted locally. Returns whether it was accepted.
    pub fn submit_name(&mut self, session: Option<&GameId>, record: &Record) -> bool {
        if let (Some(remote), Some(session)) = (self.remote.as_mut(), session) {
            return match remote.submit_name(session, &record.name) {
                Ok(()) => {
                    info!("name {} submitted for session {}", record.name, session);
                    true
                }
                Err(e) => {
                    warn!("could not submit name for session {}: {}", session, e);
                    false
                }
            };
        }
        match self.store.save(record) {
            Ok(()) => {
                info!("record {} by {} saved locally", record.level, record.name);
                true
            }
            Err(e) => {
                error!("could not save record: {}", e);
                false
            }
        }
    }

    /// Current best, from the server when online, falling back to the local store
    pub fn top_score(&mut self) -> Record {
        if let Some(remote) = self.remote.as_mut() {
            match remote.top_score() {
                Ok(Some(top)) => {
                    let mut name = Name::new();
                    top.player_name
                        .chars()
                        .take(name.capacity())
                        .for_each(|c| {
                            let _ = name.push(c);
                        });
                    return Record {
                        level: top.score,
                        name,
                    };
                }
                Ok(None) => return Record::default(),
                Err(e) => warn!("could not fetch top score: {}", e),
            }
        }
        self.load_local()
    }

    /// Forget the local record
    pub fn reset(&mut self) -> Record {
        let record = Record::default();
        if let Err(e) = self.store.save(&record) {
            error!("could not reset record: {}", e);
        }
        record
    }

    fn load_local(&mut self) -> Record {
        self.store.load().unwrap_or_else(|e| {
            warn!("stored record unreadable, starting from scratch: {}", e);
            Record::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::testing::ScriptedLeaderboard;
    use crate::leaderboard::{Offline, TopScore};

    use std::string::ToString;
    use std::vec::Vec;

    #[derive(Default)]
    struct VecBlob {
        bytes: Vec<u8>,
        broken: bool,
    }

    impl Blob for VecBlob {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
            if self.broken {
                return Err(Error::Storage);
            }
            let len = self.bytes.len().min(buf.len());
            buf[..len].copy_from_slice(&self.bytes[..len]);
            Ok(len)
        }

        fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
            if self.broken {
                return Err(Error::Storage);
            }
            self.bytes = bytes.to_vec();
            Ok(())
        }
    }

    fn record(level: u16, name: &str) -> Record {
        let mut initials = Name::new();
        initials.push_str(name).unwrap();
        Record {
            level,
            name: initials,
        }
    }

    fn offline() -> RecordKeeper<Offline, MemoryRecordStore> {
        RecordKeeper::new(None, MemoryRecordStore::default())
    }

    #[test]
    fn json_store_writes_flat_object() {
        let mut store = JsonRecordStore::new(VecBlob::default());
        store.save(&record(9, "ABC")).unwrap();
        assert_eq!(
            store.blob().bytes,
            br#"{"record_level":9,"record_name":"ABC"}"#.to_vec()
        );
        assert_eq!(store.load(), Ok(record(9, "ABC")));
    }

    #[test]
    fn json_store_defaults_when_empty() {
        let mut store = JsonRecordStore::new(VecBlob::default());
        assert_eq!(store.load(), Ok(Record::default()));
    }

    #[test]
    fn corrupt_store_loads_default_record() {
        let blob = VecBlob {
            bytes: br#"{"record_level":"#.to_vec(),
            broken: false,
        };
        let mut store = JsonRecordStore::new(blob);
        assert_eq!(store.load(), Err(Error::Codec));

        let mut keeper = RecordKeeper::<Offline, _>::new(None, store);
        assert_eq!(keeper.top_score(), Record::default());

        let blob = VecBlob {
            bytes: br#"{"record_level":3,"record_name":"a!"}"#.to_vec(),
            broken: false,
        };
        let mut keeper = RecordKeeper::<Offline, _>::new(None, JsonRecordStore::new(blob));
        assert_eq!(keeper.top_score(), Record::default());
    }

    #[test]
    fn offline_never_claims_records() {
        let mut keeper = offline();
        assert!(!keeper.is_online());
        let session = keeper.begin_session();
        assert_eq!(session, None);
        assert!(!keeper.end_session(session.as_ref(), 50));
    }

    #[test]
    fn offline_names_are_saved_locally() {
        let mut keeper = offline();
        assert!(keeper.submit_name(None, &record(4, "BOB")));
        assert_eq!(keeper.top_score(), record(4, "BOB"));
        assert_eq!(keeper.reset(), Record::default());
        assert_eq!(keeper.top_score(), Record::default());
    }

    #[test]
    fn failed_local_save_is_reported() {
        let blob = VecBlob {
            bytes: Vec::new(),
            broken: true,
        };
        let mut keeper = RecordKeeper::<Offline, _>::new(None, JsonRecordStore::new(blob));
        assert!(!keeper.submit_name(None, &record(4, "BOB")));
        assert_eq!(keeper.top_score(), Record::default());
    }

    #[test]
    fn online_round_trip_follows_server() {
        let mut board = ScriptedLeaderboard::new();
        board.is_top = true;
        let mut player_name = heapless::String::new();
        player_name.push_str("ZEDD").unwrap();
        board.top = Some(TopScore {
            player_name,
            score: 11,
        });
        let calls = board.calls.clone();
        let mut keeper = RecordKeeper::new(Some(board), MemoryRecordStore::default());

        let session = keeper.begin_session();
        assert_eq!(session.as_ref().map(|s| s.as_str()), Some("game-1"));
        assert!(keeper.end_session(session.as_ref(), 12));
        assert!(keeper.submit_name(session.as_ref(), &record(12, "AMY")));
        assert_eq!(keeper.top_score(), record(11, "ZED"));

        let calls = calls.borrow();
        assert_eq!(calls.started, 1);
        assert_eq!(calls.ended, vec![("game-1".to_string(), 12)]);
        assert_eq!(calls.names, vec![("game-1".to_string(), "AMY".to_string())]);
        // the local store is not touched while online
        assert_eq!(keeper.store().0, Record::default());
    }

    #[test]
    fn unreachable_server_degrades_to_offline_answers() {
        let mut keeper =
            RecordKeeper::new(Some(ScriptedLeaderboard::unreachable()), MemoryRecordStore::default());
        let mut fake_session = GameId::new();
        fake_session.push_str("game-9").unwrap();

        assert_eq!(keeper.begin_session(), None);
        assert!(!keeper.end_session(Some(&fake_session), 30));
        assert!(!keeper.submit_name(Some(&fake_session), &record(30, "AMY")));
        assert_eq!(keeper.top_score(), Record::default());
    }

    #[test]
    fn online_without_session_saves_locally() {
        let board = ScriptedLeaderboard::new();
        let calls = board.calls.clone();
        let mut keeper = RecordKeeper::new(Some(board), MemoryRecordStore::default());
        assert!(!keeper.end_session(None, 8));
        assert!(keeper.submit_name(None, &record(8, "KIM")));
        assert_eq!(keeper.store().0, record(8, "KIM"));
        assert!(calls.borrow().ended.is_empty());
        assert!(calls.borrow().names.is_empty());
    }
}
