//! Remote leaderboard.
//!
//! `Leaderboard` is what the record policy talks to. `HttpLeaderboard`
//! implements it on top of any byte level `HttpClient`, speaking the JSON
//! API of the TIG-00 score server:
//!
//! | request                                     | answer                                   |
//! |---------------------------------------------|------------------------------------------|
//! | `POST /start-game`                          | `{"game_id": ".."}`                      |
//! | `POST /end-game {"game_id", "score"}`       | `{"is_top_record": bool}`                |
//! | `POST /submit-name {"game_id", "player_name"}` | status 200                            |
//! | `GET /get-top-score`                        | `{"topScore": {"player_name", "score"}}` |
//!
//! Every request carries the static API key as a bearer token. Any status
//! other than 200 is an error.

use heapless::String;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::Error;

/// Opaque identifier of a remote game session
pub type GameId = String<40>;

/// Player name as accepted by the server
pub type PlayerName = String<5>;

/// Best score known to the server
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TopScore {
    pub player_name: PlayerName,
    pub score: u16,
}

pub trait Leaderboard {
    /// Open a session for a new run
    fn start_game(&mut self) -> Result<GameId, Error>;
    /// Close a session with its final score, `true` if the server ranks it as the new top record
    fn end_game(&mut self, game_id: &str, score: u16) -> Result<bool, Error>;
    /// Attach a name to a finished session
    fn submit_name(&mut self, game_id: &str, player_name: &str) -> Result<(), Error>;
    /// Best score so far, `None` on an empty board
    fn top_score(&mut self) -> Result<Option<TopScore>, Error>;
}

/// Leaderboard of a console with no network
///
/// Cannot be constructed, which makes every online code path unreachable.
#[derive(Debug)]
pub enum Offline {}

impl Leaderboard for Offline {
    fn start_game(&mut self) -> Result<GameId, Error> {
        match *self {}
    }

    fn end_game(&mut self, _: &str, _: u16) -> Result<bool, Error> {
        match *self {}
    }

    fn submit_name(&mut self, _: &str, _: &str) -> Result<(), Error> {
        match *self {}
    }

    fn top_score(&mut self) -> Result<Option<TopScore>, Error> {
        match *self {}
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Request<'a> {
    pub method: Method,
    pub path: &'a str,
    /// Value of the `Authorization: Bearer` header
    pub bearer: &'a str,
    /// JSON body, empty for bodyless requests
    pub body: &'a [u8],
}

/// Blocking HTTP transport
pub trait HttpClient {
    /// Send `request` and copy the response body into `response`
    ///
    /// Returns the status code and the number of body bytes written.
    fn send(&mut self, request: &Request<'_>, response: &mut [u8]) -> Result<(u16, usize), Error>;
}

pub const START_GAME: &str = "/start-game";
pub const END_GAME: &str = "/end-game";
pub const SUBMIT_NAME: &str = "/submit-name";
pub const GET_TOP_SCORE: &str = "/get-top-score";

const BODY_LEN: usize = 128;

#[derive(Deserialize)]
struct StartGameResponse {
    game_id: GameId,
}

#[derive(Serialize)]
struct EndGameRequest<'a> {
    game_id: &'a str,
    score: u16,
}

#[derive(Deserialize)]
struct EndGameResponse {
    is_top_record: bool,
}

#[derive(Serialize)]
struct SubmitNameRequest<'a> {
    game_id: &'a str,
    player_name: &'a str,
}

#[derive(Deserialize)]
struct TopScoreResponse {
    #[serde(rename = "topScore")]
    top_score: Option<TopScore>,
}

pub struct HttpLeaderboard<C> {
    client: C,
    api_key: &'static str,
}

impl<C: HttpClient> HttpLeaderboard<C> {
    pub fn new(client: C, api_key: &'static str) -> Self {
        Self { client, api_key }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn exchange(
        &mut self,
        method: Method,
        path: &str,
        body: &[u8],
        response: &mut [u8],
    ) -> Result<usize, Error> {
        let request = Request {
            method,
            path,
            bearer: self.api_key,
            body,
        };
        match self.client.send(&request, response)? {
            (200, len) => Ok(len),
            (status, _) => Err(Error::Status(status)),
        }
    }

    fn call<Req, Resp>(&mut self, method: Method, path: &str, body: Option<&Req>) -> Result<Resp, Error>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let mut request = [0u8; BODY_LEN];
        let request_len = match body {
            Some(body) => serde_json_core::to_slice(body, &mut request).map_err(|_| Error::Codec)?,
            None => 0,
        };
        let mut response = [0u8; BODY_LEN];
        let len = self.exchange(method, path, &request[..request_len], &mut response)?;
        serde_json_core::from_slice::<Resp>(&response[..len])
            .map(|(resp, _)| resp)
            .map_err(|_| Error::Codec)
    }
}

impl<C: HttpClient> Leaderboard for HttpLeaderboard<C> {
    fn start_game(&mut self) -> Result<GameId, Error> {
        self.call::<(), StartGameResponse>(Method::Post, START_GAME, None)
            .map(|resp| resp.game_id)
    }

    fn end_game(&mut self, game_id: &str, score: u16) -> Result<bool, Error> {
        let body = EndGameRequest { game_id, score };
        self.call::<_, EndGameResponse>(Method::Post, END_GAME, Some(&body))
            .map(|resp| resp.is_top_record)
    }

    fn submit_name(&mut self, game_id: &str, player_name: &str) -> Result<(), Error> {
        if player_name.len() > 5 {
            return Err(Error::Codec);
        }
        let mut request = [0u8; BODY_LEN];
        let body = SubmitNameRequest {
            game_id,
            player_name,
        };
        let len = serde_json_core::to_slice(&body, &mut request).map_err(|_| Error::Codec)?;
        let mut response = [0u8; BODY_LEN];
        self.exchange(Method::Post, SUBMIT_NAME, &request[..len], &mut response)
            .map(|_| ())
    }

    fn top_score(&mut self) -> Result<Option<TopScore>, Error> {
        self.call::<(), TopScoreResponse>(Method::Get, GET_TOP_SCORE, None)
            .map(|resp| resp.top_score)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::string::{String as StdString, ToString};
    use std::vec::Vec;

    /// What a `ScriptedLeaderboard` was asked, shared with the test body
    #[derive(Default, Debug)]
    pub struct Calls {
        pub started: usize,
        pub ended: Vec<(StdString, u16)>,
        pub names: Vec<(StdString, StdString)>,
        pub top_queries: usize,
    }

    /// In-memory leaderboard answering from a script
    pub struct ScriptedLeaderboard {
        pub calls: Rc<RefCell<Calls>>,
        pub reachable: bool,
        pub is_top: bool,
        pub top: Option<TopScore>,
    }

    impl ScriptedLeaderboard {
        pub fn new() -> Self {
            Self {
                calls: Rc::new(RefCell::new(Calls::default())),
                reachable: true,
                is_top: false,
                top: None,
            }
        }

        pub fn unreachable() -> Self {
            Self {
                reachable: false,
                ..Self::new()
            }
        }

        fn online(&self) -> Result<(), Error> {
            if self.reachable {
                Ok(())
            } else {
                Err(Error::Transport)
            }
        }
    }

    impl Leaderboard for ScriptedLeaderboard {
        fn start_game(&mut self) -> Result<GameId, Error> {
            self.online()?;
            let mut calls = self.calls.borrow_mut();
            calls.started += 1;
            let mut id = GameId::new();
            id.push_str("game-").map_err(|_| Error::Codec)?;
            id.push_str(&calls.started.to_string()).map_err(|_| Error::Codec)?;
            Ok(id)
        }

        fn end_game(&mut self, game_id: &str, score: u16) -> Result<bool, Error> {
            self.online()?;
            self.calls
                .borrow_mut()
                .ended
                .push((game_id.to_string(), score));
            Ok(self.is_top)
        }

        fn submit_name(&mut self, game_id: &str, player_name: &str) -> Result<(), Error> {
            self.online()?;
            self.calls
                .borrow_mut()
                .names
                .push((game_id.to_string(), player_name.to_string()));
            Ok(())
        }

        fn top_score(&mut self) -> Result<Option<TopScore>, Error> {
            self.online()?;
            self.calls.borrow_mut().top_queries += 1;
            Ok(self.top.clone())
        }
    }
}
