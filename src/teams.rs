//! Team roster and turn rotation
//!
//! This module manages the competing teams of a session: the preset roster,
//! whose turn it is, and the scores earned through the answer resolver.
//! Scores only ever increase, and only while the session is in play.

use serde::{Deserialize, Serialize};

use crate::constants;

/// One competing team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Display name, editable during setup
    pub name: String,
    /// Points earned through correct answers
    pub score: u64,
}

/// Builds a zero-score roster of `count` preset-named teams
pub fn preset_roster(count: usize) -> Vec<Team> {
    (0..count)
        .map(|index| Team {
            name: constants::teams::PRESET_NAMES
                .get(index)
                .map_or_else(|| format!("Team {}", index + 1), ToString::to_string),
            score: 0,
        })
        .collect()
}

/// Whether `count` is one of the supported roster sizes
pub fn is_allowed_count(count: usize) -> bool {
    constants::teams::ALLOWED_COUNTS.contains(&count)
}

/// Tracks which team acts next and their cumulative scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnTracker {
    teams: Vec<Team>,
    active: usize,
}

impl Default for TurnTracker {
    /// The default tracker carries three preset teams
    fn default() -> Self {
        Self::new(3)
    }
}

impl TurnTracker {
    /// Creates a tracker with `count` preset teams, first team active
    ///
    /// The caller is responsible for only passing a supported count; see
    /// [`is_allowed_count`].
    pub fn new(count: usize) -> Self {
        Self {
            teams: preset_roster(count),
            active: 0,
        }
    }

    /// Creates a tracker over an explicit roster, first team active
    pub fn with_roster(teams: Vec<Team>) -> Self {
        Self { teams, active: 0 }
    }

    /// All teams in roster order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Number of teams in the roster
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether the roster is empty (never true for a constructed tracker)
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Index of the team whose turn it is
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The team whose turn it is
    pub fn current(&self) -> &Team {
        &self.teams[self.active]
    }

    /// Moves the turn to the next team in roster order, wrapping around
    ///
    /// Called exactly once per resolved or skipped challenge, never on an
    /// invalid interaction.
    pub fn advance(&mut self) {
        self.active = (self.active + 1) % self.teams.len();
    }

    /// Awards points to the currently active team
    ///
    /// The award goes to the active team at the moment it is applied, so
    /// the resolver must award before advancing the turn.
    pub fn award(&mut self, points: u64) {
        self.teams[self.active].score += points;
    }

    /// Renames the team at `index`, no-op if out of range
    pub fn set_name(&mut self, index: usize, name: impl Into<String>) {
        if let Some(team) = self.teams.get_mut(index) {
            team.name = name.into();
        }
    }

    /// Zeroes every score and hands the turn back to the first team
    pub fn reset_scores(&mut self) {
        for team in &mut self.teams {
            team.score = 0;
        }
        self.active = 0;
    }
}
