//! Core game controller and phase state machine
//!
//! This module contains the aggregate session state and the controller
//! that owns it. All mutation funnels through the controller's
//! operations: periodic clock ticks and discrete user actions both arrive
//! here, run to completion, and never interleave partially. The other
//! modules are pure state containers the controller sequences.

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    FeedbackEvent,
    challenge::{PendingChallenge, Verdict},
    clock::{Clock, TickOutcome},
    constants,
    presenter::Presenter,
    questions::{self, Question, QuestionRotator},
    report::ReportSnapshot,
    teams::{self, Team, TurnTracker},
    units::{self, UnitRegistry, UnitState},
};

/// Top-level session phase
///
/// A session moves setup → play → result, may restart (result → play),
/// and may reset back to setup from anywhere.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
pub enum Phase {
    /// Roster, timer, and content editing before the mission starts
    #[display("setup")]
    Setup,
    /// The countdown is live and challenges can be opened
    #[display("play")]
    Play,
    /// The session ended in success or failure
    #[display("result")]
    Result,
}

type ValidationResult = garde::Result;

/// Validates that a requested team count is one of the supported sizes
fn validate_team_count(val: &usize, _context: &()) -> ValidationResult {
    if teams::is_allowed_count(*val) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "team count {val} is not one of {:?}",
            constants::teams::ALLOWED_COUNTS
        )))
    }
}

/// Setup-phase configuration for a session
///
/// Applied through [`Game::configure`], which is only honored while the
/// session is in setup.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetupConfig {
    /// Number of competing teams
    #[garde(custom(validate_team_count))]
    pub team_count: usize,
    /// Team names; empty means use the presets, otherwise one per team
    #[garde(inner(length(min = 1, max = constants::teams::MAX_NAME_LENGTH)))]
    pub team_names: Vec<String>,
    /// Countdown length in minutes
    #[garde(range(
        min = constants::session::MIN_MINUTES,
        max = constants::session::MAX_MINUTES
    ))]
    pub minutes: u32,
}

/// Errors reported back from [`Game::configure`]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field failed validation
    #[error(transparent)]
    Invalid(#[from] garde::Report),
    /// Team names were provided but their count does not match
    #[error("expected {expected} team names, got {got}")]
    RosterMismatch {
        /// Configured team count
        expected: usize,
        /// Number of names supplied
        got: usize,
    },
}

/// Keyboard commands the presentation layer forwards to the core
///
/// Each maps 1:1 onto a controller operation and is a no-op when that
/// operation's preconditions are unmet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum KeyCommand {
    /// Toggle the help overlay
    ToggleHelp,
    /// Request exclusive full-viewport presentation mode
    RequestFullscreen,
    /// Pause or resume the countdown
    TogglePause,
    /// Open a challenge for the first unit still local
    OpenNextChallenge,
    /// Select an answer choice by its 1-based digit
    SelectChoice(u8),
    /// Resolve the pending challenge with the selected choice
    Resolve,
    /// Skip the pending challenge, forfeiting the turn
    Skip,
}

/// A transient message with a tick-driven lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Banner {
    text: String,
    ticks_left: u8,
}

/// The aggregate session and its controller
///
/// The game owns every piece of session state exclusively; collaborators
/// read through the accessors and mutate only through the operations
/// below. The whole session serializes, so a host process can checkpoint
/// it between events.
#[derive(Debug, Serialize, Deserialize)]
pub struct Game {
    phase: Phase,
    turns: TurnTracker,
    clock: Clock,
    units: UnitRegistry,
    questions: QuestionRotator,
    pending: Option<PendingChallenge>,
    banner: Option<Banner>,
    result_message: String,
    minutes: u32,
    show_help: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

// Accessors
impl Game {
    /// Creates a session in setup with the default roster, units, pool,
    /// and countdown length
    pub fn new() -> Self {
        Self {
            phase: Phase::Setup,
            turns: TurnTracker::default(),
            clock: Clock::new(constants::session::DEFAULT_MINUTES * 60),
            units: UnitRegistry::default(),
            questions: QuestionRotator::default(),
            pending: None,
            banner: None,
            result_message: String::new(),
            minutes: constants::session::DEFAULT_MINUTES,
            show_help: false,
        }
    }

    /// Current session phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Configured countdown length in minutes
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// The countdown clock
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// The data units and their lifecycle states
    pub fn units(&self) -> &UnitRegistry {
        &self.units
    }

    /// The teams and turn order
    pub fn turns(&self) -> &TurnTracker {
        &self.turns
    }

    /// The question pool
    pub fn questions(&self) -> &QuestionRotator {
        &self.questions
    }

    /// The open challenge, if one is pending
    pub fn pending(&self) -> Option<&PendingChallenge> {
        self.pending.as_ref()
    }

    /// The transient banner message, if one is showing
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_ref().map(|banner| banner.text.as_str())
    }

    /// The fixed ending message once the session reached result
    pub fn result_message(&self) -> &str {
        &self.result_message
    }

    /// Whether the help overlay is showing
    pub fn help_visible(&self) -> bool {
        self.show_help
    }

    /// Takes a read-only snapshot for the report collaborator
    pub fn report_snapshot(&self) -> ReportSnapshot {
        ReportSnapshot::new(
            self.turns.teams().to_vec(),
            self.units.iter().cloned().collect(),
            self.minutes,
        )
    }
}

// Phase transitions
impl Game {
    /// Applies a setup configuration
    ///
    /// Honored only while the session is in setup; outside of it the call
    /// is a silent no-op. Changing the minutes re-bases the countdown
    /// immediately. Supplying team names overrides the presets and must
    /// match the team count.
    pub fn configure(&mut self, config: &SetupConfig) -> Result<(), ConfigError> {
        if self.phase != Phase::Setup {
            return Ok(());
        }

        config.validate()?;

        if !config.team_names.is_empty() && config.team_names.len() != config.team_count {
            return Err(ConfigError::RosterMismatch {
                expected: config.team_count,
                got: config.team_names.len(),
            });
        }

        self.turns = if config.team_names.is_empty() {
            TurnTracker::new(config.team_count)
        } else {
            TurnTracker::with_roster(
                config
                    .team_names
                    .iter()
                    .map(|name| Team {
                        name: name.clone(),
                        score: 0,
                    })
                    .collect(),
            )
        };

        self.minutes = config.minutes;
        self.clock.reset(self.minutes * 60);

        Ok(())
    }

    /// Renames one team during setup
    ///
    /// Silently ignored outside setup or with an out-of-range index.
    pub fn rename_team(&mut self, index: usize, name: impl Into<String>) {
        if self.phase == Phase::Setup {
            self.turns.set_name(index, name);
        }
    }

    /// Starts the mission from setup, or restarts it from result
    ///
    /// Zeroes all scores, hands the turn to the first team, brings every
    /// unit back as local, shuffles the question pool, rewinds the
    /// countdown, and requests full-viewport presentation best-effort.
    pub fn start(&mut self, presenter: &mut impl Presenter) {
        if !matches!(self.phase, Phase::Setup | Phase::Result) {
            return;
        }

        self.turns.reset_scores();
        self.units.restore_local();
        self.questions.shuffle();
        self.clock.reset(self.minutes * 60);
        self.pending = None;
        self.banner = None;
        self.result_message.clear();
        self.phase = Phase::Play;

        presenter.enter_fullscreen();
    }

    /// Returns the session to setup with all defaults restored
    pub fn reset(&mut self, presenter: &mut impl Presenter) {
        let team_count = self.turns.len();

        self.phase = Phase::Setup;
        self.turns = TurnTracker::new(team_count);
        self.units = UnitRegistry::default();
        self.questions = QuestionRotator::default();
        self.pending = None;
        self.banner = None;
        self.result_message.clear();
        self.minutes = constants::session::DEFAULT_MINUTES;
        self.clock.reset(self.minutes * 60);
        self.show_help = false;

        presenter.exit_fullscreen();
    }

    /// Advances the session by one timer interval
    ///
    /// Only the play phase ticks. The success condition is evaluated
    /// before the clock so that a session where everything migrated on the
    /// final second ends in success, never in a simultaneous failure. On
    /// expiry every remaining local unit is destroyed in one atomic batch.
    pub fn tick(&mut self, presenter: &mut impl Presenter) {
        if self.phase != Phase::Play {
            return;
        }

        if let Some(banner) = &mut self.banner {
            if banner.ticks_left <= 1 {
                self.banner = None;
            } else {
                banner.ticks_left -= 1;
            }
        }

        if self.units.all_cloud() {
            self.finish(constants::copy::SUCCESS);
            return;
        }

        let outcome = self.clock.tick(&mut |event| presenter.feedback(event));

        if outcome == TickOutcome::Expired {
            self.units
                .batch_transition(UnitState::Local, UnitState::Destroyed);
            self.finish(constants::copy::FAILURE);
        }
    }

    /// Ends the session with a fixed message
    fn finish(&mut self, message: &str) {
        self.phase = Phase::Result;
        self.result_message = message.to_owned();
        self.pending = None;
    }
}

// Clock control
impl Game {
    /// Suspends the countdown; a pending challenge stays answerable
    pub fn pause(&mut self) {
        if self.phase == Phase::Play {
            self.clock.pause();
        }
    }

    /// Resumes the countdown from where it was suspended
    pub fn resume(&mut self) {
        if self.phase == Phase::Play {
            self.clock.resume();
        }
    }

    /// Flips the countdown between paused and running
    pub fn toggle_pause(&mut self) {
        if self.phase == Phase::Play {
            self.clock.toggle_pause();
        }
    }
}

// Answer resolution
impl Game {
    /// Opens a challenge targeting the unit at `unit_id`
    ///
    /// Draws the next question from the rotation. Silently ignored unless
    /// the session is in play, the unit is local, and no challenge is
    /// already pending (single-challenge invariant).
    pub fn open_challenge(&mut self, unit_id: u32) {
        if self.phase != Phase::Play || self.pending.is_some() {
            return;
        }

        match self.units.get(unit_id) {
            Some(unit) if unit.state == UnitState::Local => {}
            _ => return,
        }

        let question = self.questions.next();
        self.pending = Some(PendingChallenge::new(question, unit_id));
    }

    /// Records an answer selection on the pending challenge
    ///
    /// Silently ignored without a pending challenge or with an
    /// out-of-range index.
    pub fn select_choice(&mut self, index: usize) {
        if let Some(pending) = &mut self.pending {
            pending.select(index);
        }
    }

    /// Resolves the pending challenge against its selected choice
    ///
    /// Requires a pending challenge with a selection; otherwise a silent
    /// no-op. A correct answer migrates the target unit, awards a point
    /// to the team that answered, and may end the session in success; an
    /// incorrect one leaves the unit local for a later attempt. Either
    /// way the turn passes on and a transient banner is posted.
    pub fn resolve(&mut self, presenter: &mut impl Presenter) {
        let Some(pending) = &self.pending else {
            return;
        };
        let Some(verdict) = pending.verdict() else {
            return;
        };
        let target = pending.target_unit_id();
        self.pending = None;

        match verdict {
            Verdict::Correct => {
                self.units.transition(target, UnitState::Cloud);
                self.turns.award(1);
                presenter.feedback(FeedbackEvent::Correct);
                presenter.feedback(FeedbackEvent::Celebrate);
                self.post_banner(constants::copy::CORRECT);
                self.turns.advance();
            }
            Verdict::Incorrect => {
                presenter.feedback(FeedbackEvent::Wrong);
                self.post_banner(constants::copy::WRONG);
                self.turns.advance();
            }
        }

        // Ending check after the unit mutation: a final migration wins
        // immediately, regardless of time left on the clock.
        if self.units.all_cloud() {
            self.finish(constants::copy::SUCCESS);
        }
    }

    /// Abandons the pending challenge, forfeiting the turn
    ///
    /// No unit or score changes, but the turn still passes on so a team
    /// cannot hoard its turn by skipping. Silently ignored without a
    /// pending challenge.
    pub fn skip(&mut self) {
        if self.pending.take().is_some() {
            self.turns.advance();
        }
    }

    fn post_banner(&mut self, text: &str) {
        self.banner = Some(Banner {
            text: text.to_owned(),
            ticks_left: constants::session::BANNER_TICKS,
        });
    }
}

// Content editing and import/export
impl Game {
    /// Appends a validated question to the pool
    pub fn add_question(&mut self, question: Question) -> Result<(), questions::Error> {
        self.questions.add(question)
    }

    /// Removes the question at `index` from the pool
    pub fn remove_question(&mut self, index: usize) -> Option<Question> {
        self.questions.remove(index)
    }

    /// Replaces the question pool from its JSON import shape
    ///
    /// Honored only during setup; a malformed payload is reported and
    /// leaves the pool unchanged.
    pub fn import_questions(&mut self, payload: &str) -> Result<(), questions::Error> {
        if self.phase != Phase::Setup {
            return Ok(());
        }
        self.questions.import_json(payload)
    }

    /// Serializes the question pool into its JSON export shape
    pub fn export_questions(&self) -> String {
        self.questions.export_json()
    }

    /// Replaces the unit registry from its JSON import shape
    ///
    /// Honored only during setup; fresh sequential ids are assigned and
    /// every unit starts local. A malformed or empty payload is reported
    /// and leaves the registry unchanged.
    pub fn import_units(&mut self, payload: &str) -> Result<(), units::Error> {
        if self.phase != Phase::Setup {
            return Ok(());
        }
        self.units = UnitRegistry::import_json(payload)?;
        Ok(())
    }

    /// Serializes the unit registry into its JSON export shape
    pub fn export_units(&self) -> String {
        self.units.export_json()
    }
}

// Keyboard surface
impl Game {
    /// Dispatches a forwarded keyboard command
    ///
    /// Every command maps onto exactly one operation above and inherits
    /// its preconditions, so mistyped or mistimed keys fall through as
    /// no-ops.
    pub fn handle_key(&mut self, command: KeyCommand, presenter: &mut impl Presenter) {
        match command {
            KeyCommand::ToggleHelp => self.show_help = !self.show_help,
            KeyCommand::RequestFullscreen => presenter.enter_fullscreen(),
            KeyCommand::TogglePause => self.toggle_pause(),
            KeyCommand::OpenNextChallenge => {
                if let Some(id) = self.units.first_local().map(|unit| unit.id) {
                    self.open_challenge(id);
                }
            }
            KeyCommand::SelectChoice(digit) => {
                if digit >= 1 {
                    self.select_choice(usize::from(digit) - 1);
                }
            }
            KeyCommand::Resolve => self.resolve(presenter),
            KeyCommand::Skip => self.skip(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::presenter::NullPresenter;

    #[derive(Default)]
    struct RecordingPresenter {
        events: Vec<FeedbackEvent>,
        fullscreen_entered: usize,
        fullscreen_exited: usize,
    }

    impl Presenter for RecordingPresenter {
        fn feedback(&mut self, event: FeedbackEvent) {
            self.events.push(event);
        }

        fn enter_fullscreen(&mut self) {
            self.fullscreen_entered += 1;
        }

        fn exit_fullscreen(&mut self) {
            self.fullscreen_exited += 1;
        }
    }

    const TWO_UNITS: &str = r#"[{"name":"A"},{"name":"B"}]"#;
    const ONE_QUESTION: &str =
        r#"[{"text":"Pick b","choices":["a","b","c","d"],"correctIndex":1}]"#;

    /// One team, two units named A and B, one question, one minute.
    fn scenario_game() -> Game {
        let mut game = Game::new();
        game.configure(&SetupConfig {
            team_count: 1,
            team_names: vec![],
            minutes: 1,
        })
        .unwrap();
        game.import_units(TWO_UNITS).unwrap();
        game.import_questions(ONE_QUESTION).unwrap();
        game
    }

    #[test]
    fn test_start_initial_state() {
        let mut game = scenario_game();
        let mut presenter = RecordingPresenter::default();
        game.start(&mut presenter);

        assert_eq!(game.phase(), Phase::Play);
        assert_eq!(game.clock().seconds_remaining(), 60);
        assert!(game.units().iter().all(|u| u.state == UnitState::Local));
        assert!(game.turns().teams().iter().all(|t| t.score == 0));
        assert_eq!(game.turns().active_index(), 0);
        assert_eq!(presenter.fullscreen_entered, 1);
    }

    #[test]
    fn test_start_from_play_is_noop() {
        let mut game = scenario_game();
        game.start(&mut NullPresenter);
        game.tick(&mut NullPresenter);
        let remaining = game.clock().seconds_remaining();

        game.start(&mut NullPresenter);
        assert_eq!(game.clock().seconds_remaining(), remaining);
    }

    #[test]
    fn test_full_scenario_wrong_answer_then_expiry() {
        let mut game = scenario_game();
        let mut presenter = RecordingPresenter::default();
        game.start(&mut presenter);

        // Correct answer migrates A and scores for the only team.
        game.open_challenge(1);
        game.select_choice(1);
        game.resolve(&mut presenter);

        assert_eq!(game.units().get(1).unwrap().state, UnitState::Cloud);
        assert_eq!(game.turns().teams()[0].score, 1);
        assert_eq!(game.turns().active_index(), 0);

        // Wrong answer leaves B local and the score untouched.
        game.open_challenge(2);
        game.select_choice(0);
        game.resolve(&mut presenter);

        assert_eq!(game.units().get(2).unwrap().state, UnitState::Local);
        assert_eq!(game.turns().teams()[0].score, 1);
        assert_eq!(game.phase(), Phase::Play);

        // Running the clock out wipes B in one step and ends in failure.
        for _ in 0..60 {
            game.tick(&mut presenter);
        }

        assert_eq!(game.units().get(2).unwrap().state, UnitState::Destroyed);
        assert_eq!(game.phase(), Phase::Result);
        assert_eq!(game.result_message(), constants::copy::FAILURE);

        assert!(presenter.events.contains(&FeedbackEvent::Correct));
        assert!(presenter.events.contains(&FeedbackEvent::Wrong));
        assert!(presenter.events.contains(&FeedbackEvent::Alarm));
        assert!(presenter.events.contains(&FeedbackEvent::Tick));
    }

    #[test]
    fn test_last_migration_wins_with_time_remaining() {
        let mut game = scenario_game();
        game.import_units(r#"[{"name":"Only"}]"#).unwrap();
        game.start(&mut NullPresenter);

        game.open_challenge(1);
        game.select_choice(1);
        game.resolve(&mut NullPresenter);

        assert_eq!(game.phase(), Phase::Result);
        assert_eq!(game.result_message(), constants::copy::SUCCESS);
        assert!(game.clock().seconds_remaining() > 0);
    }

    #[test]
    fn test_tick_checks_success_before_expiry() {
        let mut game = scenario_game();
        game.start(&mut NullPresenter);

        // Everything migrated just as the clock is about to run out: the
        // success check must win the tick, leaving the clock untouched.
        game.units.transition(1, UnitState::Cloud);
        game.units.transition(2, UnitState::Cloud);
        game.clock = Clock::new(1);

        game.tick(&mut NullPresenter);

        assert_eq!(game.phase(), Phase::Result);
        assert_eq!(game.result_message(), constants::copy::SUCCESS);
        assert_eq!(game.clock().seconds_remaining(), 1);
    }

    #[test]
    fn test_unit_conservation_through_wipe() {
        let mut game = scenario_game();
        game.start(&mut NullPresenter);
        game.open_challenge(1);
        game.select_choice(1);
        game.resolve(&mut NullPresenter);

        for _ in 0..60 {
            game.tick(&mut NullPresenter);
        }

        let counts = game.units().counts();
        assert_eq!(
            counts[UnitState::Local] + counts[UnitState::Cloud] + counts[UnitState::Destroyed],
            game.units().len()
        );
    }

    #[test]
    fn test_skip_advances_turn_without_mutation() {
        let mut game = Game::new();
        game.configure(&SetupConfig {
            team_count: 3,
            team_names: vec![],
            minutes: 1,
        })
        .unwrap();
        game.import_units(TWO_UNITS).unwrap();
        game.start(&mut NullPresenter);

        game.open_challenge(1);
        game.skip();

        assert_eq!(game.turns().active_index(), 1);
        assert!(game.pending().is_none());
        assert_eq!(game.units().get(1).unwrap().state, UnitState::Local);
        assert!(game.turns().teams().iter().all(|t| t.score == 0));
    }

    #[test]
    fn test_skip_without_pending_is_noop() {
        let mut game = scenario_game();
        game.start(&mut NullPresenter);
        game.skip();
        assert_eq!(game.turns().active_index(), 0);
    }

    #[test]
    fn test_open_challenge_preconditions() {
        let mut game = scenario_game();

        // Not in play yet.
        game.open_challenge(1);
        assert!(game.pending().is_none());

        game.start(&mut NullPresenter);
        game.open_challenge(1);
        game.select_choice(1);
        game.resolve(&mut NullPresenter);

        // Unit 1 is in the cloud now; it cannot be challenged again.
        game.open_challenge(1);
        assert!(game.pending().is_none());

        // Single-challenge invariant: a second open is ignored.
        game.open_challenge(2);
        let first_target = game.pending().unwrap().target_unit_id();
        game.open_challenge(2);
        assert_eq!(game.pending().unwrap().target_unit_id(), first_target);
    }

    #[test]
    fn test_resolve_without_selection_is_noop() {
        let mut game = scenario_game();
        game.start(&mut NullPresenter);
        game.open_challenge(1);
        game.resolve(&mut NullPresenter);

        assert!(game.pending().is_some());
        assert_eq!(game.units().get(1).unwrap().state, UnitState::Local);
    }

    #[test]
    fn test_wrong_answer_allows_retry_by_any_team() {
        let mut game = scenario_game();
        game.start(&mut NullPresenter);

        game.open_challenge(2);
        game.select_choice(3);
        game.resolve(&mut NullPresenter);
        assert_eq!(game.banner(), Some(constants::copy::WRONG));

        game.open_challenge(2);
        assert_eq!(game.pending().unwrap().target_unit_id(), 2);
    }

    #[test]
    fn test_banner_expires_after_ttl() {
        let mut game = scenario_game();
        game.start(&mut NullPresenter);
        game.open_challenge(1);
        game.select_choice(1);
        game.resolve(&mut NullPresenter);

        assert_eq!(game.banner(), Some(constants::copy::CORRECT));

        for _ in 0..constants::session::BANNER_TICKS {
            game.tick(&mut NullPresenter);
        }
        assert_eq!(game.banner(), None);
    }

    #[test]
    fn test_pending_challenge_survives_pause() {
        let mut game = scenario_game();
        game.start(&mut NullPresenter);
        game.open_challenge(1);
        game.pause();

        let remaining = game.clock().seconds_remaining();
        game.tick(&mut NullPresenter);
        assert_eq!(game.clock().seconds_remaining(), remaining);

        game.select_choice(1);
        game.resolve(&mut NullPresenter);
        assert_eq!(game.units().get(1).unwrap().state, UnitState::Cloud);
    }

    #[test]
    fn test_configure_outside_setup_is_noop() {
        let mut game = scenario_game();
        game.start(&mut NullPresenter);

        game.configure(&SetupConfig {
            team_count: 5,
            team_names: vec![],
            minutes: 99,
        })
        .unwrap();

        assert_eq!(game.minutes(), 1);
        assert_eq!(game.turns().len(), 1);
    }

    #[test]
    fn test_configure_rejects_unsupported_team_count() {
        let mut game = Game::new();
        let result = game.configure(&SetupConfig {
            team_count: 2,
            team_names: vec![],
            minutes: 6,
        });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        assert_eq!(game.turns().len(), 3);
    }

    #[test]
    fn test_configure_rejects_roster_mismatch() {
        let mut game = Game::new();
        let result = game.configure(&SetupConfig {
            team_count: 3,
            team_names: vec!["Solo".to_owned()],
            minutes: 6,
        });
        assert!(matches!(
            result,
            Err(ConfigError::RosterMismatch {
                expected: 3,
                got: 1
            })
        ));
    }

    #[test]
    fn test_rename_team_only_in_setup() {
        let mut game = Game::new();
        game.rename_team(0, "Pioneers");
        assert_eq!(game.turns().teams()[0].name, "Pioneers");

        game.start(&mut NullPresenter);
        game.rename_team(0, "Cheaters");
        assert_eq!(game.turns().teams()[0].name, "Pioneers");
    }

    #[test]
    fn test_configure_rebases_clock_in_setup() {
        let mut game = Game::new();
        game.configure(&SetupConfig {
            team_count: 3,
            team_names: vec![],
            minutes: 2,
        })
        .unwrap();
        assert_eq!(game.clock().seconds_remaining(), 120);
    }

    #[test]
    fn test_reset_restores_defaults_and_exits_fullscreen() {
        let mut game = scenario_game();
        let mut presenter = RecordingPresenter::default();
        game.start(&mut presenter);
        game.open_challenge(1);

        game.reset(&mut presenter);

        assert_eq!(game.phase(), Phase::Setup);
        assert_eq!(game.minutes(), constants::session::DEFAULT_MINUTES);
        assert_eq!(
            game.units().len(),
            constants::units::DEFAULT_NAMES.len()
        );
        assert!(game.pending().is_none());
        assert_eq!(game.result_message(), "");
        assert_eq!(presenter.fullscreen_exited, 1);
    }

    #[test]
    fn test_restart_from_result() {
        let mut game = scenario_game();
        game.import_units(r#"[{"name":"Only"}]"#).unwrap();
        game.start(&mut NullPresenter);
        game.open_challenge(1);
        game.select_choice(1);
        game.resolve(&mut NullPresenter);
        assert_eq!(game.phase(), Phase::Result);

        game.start(&mut NullPresenter);

        assert_eq!(game.phase(), Phase::Play);
        assert!(game.units().iter().all(|u| u.state == UnitState::Local));
        assert_eq!(game.turns().teams()[0].score, 0);
        assert_eq!(game.clock().seconds_remaining(), 60);
        assert_eq!(game.result_message(), "");
    }

    #[test]
    fn test_import_outside_setup_is_noop() {
        let mut game = scenario_game();
        game.start(&mut NullPresenter);

        game.import_units(r#"[{"name":"Sneaky"}]"#).unwrap();
        game.import_questions("[]").unwrap();

        assert_eq!(game.units().len(), 2);
        assert_eq!(game.questions().len(), 1);
    }

    #[test]
    fn test_keyboard_surface() {
        let mut game = scenario_game();
        let mut presenter = RecordingPresenter::default();
        game.start(&mut presenter);

        game.handle_key(KeyCommand::ToggleHelp, &mut presenter);
        assert!(game.help_visible());

        game.handle_key(KeyCommand::OpenNextChallenge, &mut presenter);
        assert_eq!(game.pending().unwrap().target_unit_id(), 1);

        // Digits outside 1..=4 fall through.
        game.handle_key(KeyCommand::SelectChoice(0), &mut presenter);
        game.handle_key(KeyCommand::SelectChoice(5), &mut presenter);
        assert_eq!(game.pending().unwrap().selected(), None);

        game.handle_key(KeyCommand::SelectChoice(2), &mut presenter);
        game.handle_key(KeyCommand::Resolve, &mut presenter);
        assert_eq!(game.units().get(1).unwrap().state, UnitState::Cloud);

        game.handle_key(KeyCommand::TogglePause, &mut presenter);
        assert!(game.clock().is_paused());

        game.handle_key(KeyCommand::RequestFullscreen, &mut presenter);
        assert_eq!(presenter.fullscreen_entered, 2);
    }

    #[test]
    fn test_report_snapshot_reflects_session() {
        let mut game = scenario_game();
        game.start(&mut NullPresenter);
        game.open_challenge(1);
        game.select_choice(1);
        game.resolve(&mut NullPresenter);

        let snapshot = game.report_snapshot();
        assert_eq!(snapshot.migrated(), 1);
        assert_eq!(snapshot.total(), 2);
        assert_eq!(snapshot.minutes, 1);
        assert_eq!(snapshot.teams[0].score, 1);
    }

    #[test]
    fn test_session_serde_round_trip() {
        let mut game = scenario_game();
        game.start(&mut NullPresenter);
        game.open_challenge(1);
        game.select_choice(1);

        let json = serde_json::to_string(&game).unwrap();
        let restored: Game = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.phase(), Phase::Play);
        assert_eq!(restored.clock().seconds_remaining(), 60);
        assert_eq!(restored.pending().unwrap().selected(), Some(1));
        assert_eq!(restored.units().len(), 2);
    }

    #[test]
    fn test_turn_rotates_between_teams() {
        let mut game = Game::new();
        game.configure(&SetupConfig {
            team_count: 3,
            team_names: vec![
                "Alpha".to_owned(),
                "Beta".to_owned(),
                "Gamma".to_owned(),
            ],
            minutes: 1,
        })
        .unwrap();
        game.import_units(TWO_UNITS).unwrap();
        game.import_questions(ONE_QUESTION).unwrap();
        game.start(&mut NullPresenter);

        game.open_challenge(1);
        game.select_choice(1);
        game.resolve(&mut NullPresenter);

        // Alpha scored; Beta is up next.
        assert_eq!(game.turns().teams()[0].name, "Alpha");
        assert_eq!(game.turns().teams()[0].score, 1);
        assert_eq!(game.turns().current().name, "Beta");
    }
}
