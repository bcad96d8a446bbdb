use core::fmt;

/// Failure reported by one of the collaborators driven by the game.
///
/// None of these stop the game loop. The controller logs them and carries on
/// with the affected subsystem treated as a no-op (or, for the leaderboard,
/// with the offline answer).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Display did not accept the frame
    Display,
    /// LED or button line could not be driven/read
    Gpio,
    /// Buzzer could not be configured
    Tone,
    /// Request never reached the leaderboard or no response arrived
    Transport,
    /// Leaderboard answered with a status other than 200
    Status(u16),
    /// Body could not be encoded or decoded
    Codec,
    /// Persistent storage failed to read or write
    Storage,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Display => write!(f, "display unavailable"),
            Error::Gpio => write!(f, "gpio failure"),
            Error::Tone => write!(f, "buzzer failure"),
            Error::Transport => write!(f, "leaderboard unreachable"),
            Error::Status(code) => write!(f, "leaderboard answered {}", code),
            Error::Codec => write!(f, "malformed json"),
            Error::Storage => write!(f, "storage failure"),
        }
    }
}
