use core::fmt::{self, Write};

use heapless::String;
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use crate::button::Buttons;
use crate::color::Color;
use crate::config::Config;
use crate::context::Context;
use crate::difficulty::{pause_ms, presentation_ms};
use crate::leaderboard::{GameId, Leaderboard, Offline};
use crate::name::{Confirm, NameEntry};
use crate::records::{MemoryRecordStore, Record, RecordKeeper, RecordStore};
use crate::sequence::Sequence;
use crate::timer::Timers;

/// Frequency of the game over beeps
const GAME_OVER_TONE: u32 = 200;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Waiting for any button to start a run
    Lobby,
    /// Growing the sequence to the current level
    SequenceCreateUpdate,
    /// Playing the sequence back to the player
    SequencePresenting,
    /// Judging the player's replay
    PlayerWaiting,
    GameOver,
    Options,
    OptionsAskReset,
    OptionsAskSound,
    /// Typing initials for a new record
    InsertName,
}

impl GameState {
    /// One of the menu states the chord does not interrupt
    pub fn is_options(self) -> bool {
        match self {
            GameState::Options | GameState::OptionsAskReset | GameState::OptionsAskSound => true,
            _ => false,
        }
    }
}

/// Why the last run stopped
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunEnd {
    Mismatch,
    Timeout,
    /// Sequence capacity reached
    Completed,
}

/// One display row, longer text is cut as rows do not wrap
type Line = String<21>;

fn line(args: fmt::Arguments<'_>) -> Line {
    let mut out = Line::new();
    let _ = out.write_fmt(args);
    out
}

/// The TIG-00 controller
///
/// Call `tick` on a short fixed cadence. Each tick samples the buttons once
/// and runs the handler of the current state; nothing it calls can fail the
/// loop.
pub struct Tig00<C: Context, L: Leaderboard = Offline, S: RecordStore = MemoryRecordStore> {
    ctx: C,
    config: Config,
    records: RecordKeeper<L, S>,
    state: GameState,
    buttons: Buttons,
    timers: Timers,
    sequence: Sequence,
    level: u16,
    presenting_index: Option<usize>,
    lit: Option<Color>,
    player_playing_index: usize,
    game_session_id: Option<GameId>,
    record: Record,
    name: NameEntry,
    run_end: Option<RunEnd>,
    sound: bool,
}

impl<C: Context, L: Leaderboard, S: RecordStore> Tig00<C, L, S> {
    pub fn new(ctx: C, records: RecordKeeper<L, S>, config: Config) -> Self {
        Self {
            ctx,
            sound: config.sound,
            config,
            records,
            state: GameState::Lobby,
            buttons: Buttons::new(),
            timers: Timers::default(),
            sequence: Sequence::new(),
            level: 1,
            presenting_index: None,
            lit: None,
            player_playing_index: 0,
            game_session_id: None,
            record: Record::default(),
            name: NameEntry::new(),
            run_end: None,
        }
    }

    /// Darken the console, load the top score and show the lobby
    pub fn boot(&mut self) {
        info!(
            "booting {}",
            if self.records.is_online() { "online" } else { "offline" }
        );
        self.lights_out();
        // blank while the top score loads, it may be a network round trip
        if let Err(e) = self.ctx.clear() {
            warn!("display: {}", e);
        }
        self.record = self.records.top_score();
        info!("top score: level {} by {:?}", self.record.level, self.record.name);
        self.transition(GameState::Lobby);
    }

    /// Advance the game by one step
    pub fn tick(&mut self) {
        let levels = self.ctx.get_buttons();
        self.buttons.read(&levels);

        if !self.state.is_options() && self.buttons.are_all_buttons_pressed() {
            info!("chord held in {:?}, opening options", self.state);
            self.buttons.reset();
            self.lights_out();
            self.transition(GameState::Options);
            return;
        }

        match self.state {
            GameState::Lobby => self.lobby(),
            GameState::SequenceCreateUpdate => self.sequence_create_update(),
            GameState::SequencePresenting => self.sequence_presenting(),
            GameState::PlayerWaiting => self.player_waiting(),
            GameState::GameOver => self.game_over(),
            GameState::Options => self.options(),
            GameState::OptionsAskReset => self.options_ask_reset(),
            GameState::OptionsAskSound => self.options_ask_sound(),
            GameState::InsertName => self.insert_name(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn buttons(&self) -> &Buttons {
        &self.buttons
    }

    pub fn player_playing_index(&self) -> usize {
        self.player_playing_index
    }

    pub fn presenting_index(&self) -> Option<usize> {
        self.presenting_index
    }

    pub fn game_session_id(&self) -> Option<&GameId> {
        self.game_session_id.as_ref()
    }

    pub fn last_run_end(&self) -> Option<RunEnd> {
        self.run_end
    }

    pub fn is_sound_on(&self) -> bool {
        self.sound
    }

    pub fn is_online(&self) -> bool {
        self.records.is_online()
    }

    pub fn records(&self) -> &RecordKeeper<L, S> {
        &self.records
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    /// Switch state and run its entry actions
    fn transition(&mut self, next: GameState) {
        debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
        let now = self.ctx.now_ms();

        match next {
            GameState::Lobby => {
                self.game_session_id = None;
                let record = if self.record.level == 0 {
                    line(format_args!("NO RECORD YET"))
                } else {
                    line(format_args!("RECORD {} {}", self.record.level, self.record.name))
                };
                self.show(&["TIG-00", &record, "PRESS TO START"]);
            }
            GameState::SequenceCreateUpdate => {}
            GameState::SequencePresenting => {
                self.presenting_index = None;
                self.lit = None;
                self.timers.pause.start(now);
                if self.level > 1 {
                    // shown through the lead-in of every level after the first
                    let level = line(format_args!("LEVEL {}", self.level));
                    self.show(&["CORRECT", &level]);
                } else {
                    self.show_level("WATCH!");
                }
            }
            GameState::PlayerWaiting => {
                self.player_playing_index = 0;
                self.timers.player_waiting.start(now);
                self.show_progress();
            }
            GameState::GameOver => {
                let level = line(format_args!("LEVEL {}", self.level));
                match self.run_end {
                    Some(RunEnd::Timeout) => self.show(&["TIMEOUT", "GAME OVER!", &level]),
                    Some(RunEnd::Completed) => self.show(&["YOU WIN!", &level]),
                    _ => self.show(&["GAME OVER!", &level]),
                }
            }
            GameState::Options => {
                let sound = line(format_args!(
                    "Y: SOUND {}",
                    if self.sound { "ON" } else { "OFF" }
                ));
                self.show(&["OPTIONS", "B: RESET RECORD", &sound, "R: EXIT"]);
            }
            GameState::OptionsAskReset => {
                self.show(&["RESET RECORD?", "G: YES  R: NO"]);
            }
            GameState::OptionsAskSound => {
                if self.sound {
                    self.show(&["SOUND IS ON", "G: TURN OFF  R: BACK"]);
                } else {
                    self.show(&["SOUND IS OFF", "G: TURN ON  R: BACK"]);
                }
            }
            GameState::InsertName => {
                self.name = NameEntry::new();
                self.show_name();
            }
        }
    }
}

// State handlers
impl<C: Context, L: Leaderboard, S: RecordStore> Tig00<C, L, S> {
    fn lobby(&mut self) {
        if !self.buttons.any_button_pressed() {
            return;
        }
        self.level = 1;
        self.sequence.clear();
        self.run_end = None;
        self.game_session_id = self.records.begin_session();
        info!("run started, session {:?}", self.game_session_id);
        self.start_animation();
        let now = self.ctx.now_ms();
        self.timers.sequence_end.start(now);
        self.transition(GameState::SequenceCreateUpdate);
    }

    fn sequence_create_update(&mut self) {
        let level = usize::from(self.level);
        let ctx = &mut self.ctx;
        let extended = self.sequence.extend_to(level, || ctx.gen_random());
        match extended {
            Ok(()) => {
                trace!("sequence {:?}", self.sequence.as_slice());
                self.transition(GameState::SequencePresenting);
            }
            Err(_) => {
                warn!("sequence is full at level {}", level);
                self.end_run(RunEnd::Completed);
            }
        }
    }

    fn sequence_presenting(&mut self) {
        let now = self.ctx.now_ms();

        if let Some(color) = self.lit {
            let lit_for = presentation_ms(&self.config, self.level);
            if self.timers.playing.elapsed_at_least(now, lit_for) {
                self.light(color, false);
                self.silence();
                self.lit = None;
                self.timers.pause.start(now);
                self.show_level("WATCH!");
            }
            return;
        }

        if !self.timers.pause.elapsed_at_least(now, pause_ms(&self.config, self.level)) {
            return;
        }
        if self.presenting_index.is_none()
            && !self
                .timers
                .sequence_end
                .elapsed_at_least(now, self.config.level_intro_ms)
        {
            return;
        }

        let next = self.presenting_index.map_or(0, |n| n + 1);
        self.presenting_index = Some(next);
        match self.sequence.get(next) {
            Some(color) => {
                trace!("presenting #{} {:?}", next, color);
                self.light(color, true);
                self.sound_on(color.tone());
                self.show_level(color.label());
                self.timers.playing.start(now);
                self.lit = Some(color);
            }
            None => self.transition(GameState::PlayerWaiting),
        }
    }

    fn player_waiting(&mut self) {
        let now = self.ctx.now_ms();
        if self
            .timers
            .player_waiting
            .elapsed_at_least(now, self.config.player_timeout_ms)
        {
            info!("player timed out at level {}", self.level);
            self.end_run(RunEnd::Timeout);
            return;
        }

        let pressed = match self.buttons.first_pressed() {
            Some(color) => color,
            None => return,
        };
        let expected = self.sequence.get(self.player_playing_index);
        if Some(pressed) != expected {
            info!(
                "mismatch at #{}: pressed {:?}, expected {:?}",
                self.player_playing_index, pressed, expected
            );
            self.end_run(RunEnd::Mismatch);
            return;
        }

        self.feedback(pressed);
        self.player_playing_index += 1;
        let now = self.ctx.now_ms();
        self.timers.player_waiting.start(now);

        if self.player_playing_index >= usize::from(self.level) {
            info!("level {} cleared", self.level);
            self.level += 1;
            self.timers.sequence_end.start(now);
            self.transition(GameState::SequenceCreateUpdate);
        } else {
            self.show_progress();
        }
    }

    fn game_over(&mut self) {
        for _ in 0..3 {
            self.play(GAME_OVER_TONE, 2 * self.config.animation_step_ms);
            self.ctx.delay_ms(self.config.animation_step_ms);
        }
        self.transition(GameState::Lobby);
    }

    fn options(&mut self) {
        match self.buttons.first_pressed() {
            Some(Color::Blue) => self.transition(GameState::OptionsAskReset),
            Some(Color::Yellow) => self.transition(GameState::OptionsAskSound),
            Some(Color::Red) => self.transition(GameState::Lobby),
            Some(Color::Green) | None => {}
        }
    }

    fn options_ask_reset(&mut self) {
        match self.buttons.first_pressed() {
            Some(Color::Green) => {
                info!("record reset");
                self.record = self.records.reset();
                self.transition(GameState::Lobby);
            }
            Some(Color::Red) => self.transition(GameState::Options),
            _ => {}
        }
    }

    fn options_ask_sound(&mut self) {
        match self.buttons.first_pressed() {
            Some(Color::Green) => {
                self.sound = !self.sound;
                info!("sound {}", if self.sound { "on" } else { "off" });
                self.transition(GameState::Lobby);
            }
            Some(Color::Red) => self.transition(GameState::Options),
            _ => {}
        }
    }

    fn insert_name(&mut self) {
        match self.buttons.first_pressed() {
            Some(Color::Blue) => self.name.previous_letter(),
            Some(Color::Yellow) => self.name.next_letter(),
            Some(Color::Red) => self.name.backspace(),
            Some(Color::Green) => {
                if let Confirm::Done(name) = self.name.confirm() {
                    let record = Record {
                        level: self.level,
                        name,
                    };
                    if !self
                        .records
                        .submit_name(self.game_session_id.as_ref(), &record)
                    {
                        warn!("record of {} was not stored", record.name);
                    }
                    self.record = self.records.top_score();
                    self.transition(GameState::Lobby);
                    return;
                }
            }
            None => return,
        }
        self.show_name();
    }

    /// Close the run and route to name entry or game over
    ///
    /// Offline runs never claim a record. Online, the server decides whether
    /// a level above the known record is a new top. When the session could
    /// not be opened the known record is the only judge, and the name then
    /// goes to the local store.
    fn end_run(&mut self, reason: RunEnd) {
        self.lights_out();
        self.run_end = Some(reason);
        let level = self.level;
        let beats_record = level > self.record.level;

        let next = if !self.records.is_online() {
            GameState::GameOver
        } else if self.game_session_id.is_some() {
            let is_top = self
                .records
                .end_session(self.game_session_id.as_ref(), level);
            if beats_record && is_top {
                GameState::InsertName
            } else {
                GameState::GameOver
            }
        } else if beats_record {
            warn!("no remote session, judging level {} locally", level);
            GameState::InsertName
        } else {
            GameState::GameOver
        };

        info!("run over at level {} ({:?})", level, reason);
        self.transition(next);
    }
}

// Side effects
impl<C: Context, L: Leaderboard, S: RecordStore> Tig00<C, L, S> {
    fn show(&mut self, lines: &[&str]) {
        if let Err(e) = self.ctx.display(lines) {
            warn!("display: {}", e);
        }
    }

    fn show_level(&mut self, text: &str) {
        let level = line(format_args!("LEVEL {}", self.level));
        self.show(&[&level, text]);
    }

    fn show_progress(&mut self) {
        let progress = line(format_args!(
            "{}/{}",
            self.player_playing_index, self.level
        ));
        self.show(&["YOUR TURN!", &progress]);
    }

    fn show_name(&mut self) {
        let level = line(format_args!("LEVEL {}", self.level));
        let name = line(format_args!("NAME: {}", self.name.render()));
        self.show(&["NEW RECORD!", &level, &name, "B/Y: LETTER G: OK"]);
    }

    fn light(&mut self, color: Color, on: bool) {
        if let Err(e) = self.ctx.set_led(color, on) {
            warn!("led {:?}: {}", color, e);
        }
    }

    fn sound_on(&mut self, frequency: u32) {
        if !self.sound {
            return;
        }
        if let Err(e) = self.ctx.tone(frequency) {
            warn!("tone {}hz: {}", frequency, e);
        }
    }

    fn silence(&mut self) {
        if let Err(e) = self.ctx.stop_tone() {
            warn!("stop tone: {}", e);
        }
    }

    /// Sound `frequency` for `duration` ms, the delay runs even when muted
    fn play(&mut self, frequency: u32, duration: u32) {
        self.sound_on(frequency);
        self.ctx.delay_ms(duration);
        self.silence();
    }

    fn lights_out(&mut self) {
        for &color in Color::ALL.iter() {
            self.light(color, false);
        }
        self.silence();
        self.lit = None;
    }

    fn feedback(&mut self, color: Color) {
        self.light(color, true);
        self.play(color.tone(), self.config.feedback_ms);
        self.light(color, false);
    }

    fn start_animation(&mut self) {
        for &color in Color::ALL.iter() {
            self.light(color, true);
            self.play(color.tone(), self.config.animation_step_ms);
            self.light(color, false);
        }
    }
}
