//! Data-unit lifecycle registry
//!
//! This module tracks the data units that teams race to migrate during a
//! session. Every unit starts local, moves to the cloud on a correct answer,
//! or is destroyed in bulk when the countdown expires. Cloud and destroyed
//! are terminal states; the registry is only ever recreated wholesale by a
//! session start, a reset, or a unit import.

use enum_map::{Enum, EnumMap};
use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

/// Lifecycle state of a single data unit
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum, derive_more::Display,
)]
pub enum UnitState {
    /// Stored only on the volatile local side, at risk of destruction
    #[display("local")]
    Local,
    /// Safely migrated to the cloud (terminal)
    #[display("cloud")]
    Cloud,
    /// Wiped when the countdown expired (terminal)
    #[display("destroyed")]
    Destroyed,
}

impl UnitState {
    /// Whether a unit in this state may move to `next`
    ///
    /// Only local units move, and only to one of the two terminal states.
    fn allows(self, next: UnitState) -> bool {
        matches!(
            (self, next),
            (UnitState::Local, UnitState::Cloud) | (UnitState::Local, UnitState::Destroyed)
        )
    }
}

/// One migratable data item tracked through its lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Identifier unique and stable for the session
    pub id: u32,
    /// Display name of the data item
    pub name: String,
    /// Current lifecycle state
    pub state: UnitState,
}

/// Import/export shape for a unit: only the name travels
///
/// Ids and states never cross the boundary; import assigns fresh sequential
/// ids and marks every entry local.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UnitSeed {
    /// Display name of the data item
    #[garde(length(min = 1, max = constants::units::MAX_NAME_LENGTH))]
    pub name: String,
}

/// Errors that can occur while importing a unit list
#[derive(Error, Debug)]
pub enum Error {
    /// The payload is not a JSON array of `{ "name": string }` objects
    #[error("invalid unit JSON: {0}")]
    Json(String),
    /// A unit entry failed the shape check
    #[error("unit {index} is malformed: {reason}")]
    Shape {
        /// Index of the offending entry in the imported array
        index: usize,
        /// Validation failure description
        reason: String,
    },
    /// The imported list contains no units
    #[error("unit list cannot be empty")]
    Empty,
}

/// The set of data units for one session, keyed by unit id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitRegistry {
    units: Vec<Unit>,
}

impl Default for UnitRegistry {
    /// The default registry holds the built-in seed names, all local
    fn default() -> Self {
        Self::from_names(constants::units::DEFAULT_NAMES)
    }
}

impl UnitRegistry {
    /// Creates a registry from an ordered list of names
    ///
    /// Units receive sequential ids starting at 1 and start out local.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            units: names
                .into_iter()
                .enumerate()
                .map(|(index, name)| Unit {
                    id: index as u32 + 1,
                    name: name.into(),
                    state: UnitState::Local,
                })
                .collect(),
        }
    }

    /// Rebuilds this registry with the same names, fresh ids, all local
    ///
    /// Used by a session start so previously migrated or destroyed units
    /// come back into play.
    pub fn restore_local(&mut self) {
        *self = Self::from_names(self.units.iter().map(|unit| unit.name.clone()));
    }

    /// Returns all units in id order
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    /// Number of units in the registry
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the registry holds no units
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Looks up a unit by id
    pub fn get(&self, id: u32) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    /// Returns the units currently in `state`, in id order
    pub fn list_by_state(&self, state: UnitState) -> Vec<&Unit> {
        self.units.iter().filter(|unit| unit.state == state).collect()
    }

    /// The first unit still local, if any
    ///
    /// This is the target of the open-next-challenge keyboard command.
    pub fn first_local(&self) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.state == UnitState::Local)
    }

    /// Moves one unit to a new state
    ///
    /// Fails silently (no-op) if the id is unknown or the move is illegal,
    /// such as resurrecting a destroyed unit. Returns whether a state
    /// actually changed so the caller knows to re-check ending conditions.
    pub fn transition(&mut self, id: u32, new_state: UnitState) -> bool {
        match self.units.iter_mut().find(|unit| unit.id == id) {
            Some(unit) if unit.state.allows(new_state) => {
                unit.state = new_state;
                true
            }
            _ => false,
        }
    }

    /// Moves every unit in `from` to `to` as one logical step
    ///
    /// Observers never see a partial batch: the registry is mutated in a
    /// single pass under the run-to-completion model. Returns how many
    /// units moved.
    pub fn batch_transition(&mut self, from: UnitState, to: UnitState) -> usize {
        if !from.allows(to) {
            return 0;
        }

        let mut moved = 0;
        for unit in self.units.iter_mut().filter(|unit| unit.state == from) {
            unit.state = to;
            moved += 1;
        }
        moved
    }

    /// Per-state unit tallies
    pub fn counts(&self) -> EnumMap<UnitState, usize> {
        let mut counts = EnumMap::default();
        for unit in &self.units {
            counts[unit.state] += 1;
        }
        counts
    }

    /// Whether every unit reached the cloud
    pub fn all_cloud(&self) -> bool {
        self.units.iter().all(|unit| unit.state == UnitState::Cloud)
    }

    /// Exports the registry as its import shape, in id order
    pub fn seeds(&self) -> Vec<UnitSeed> {
        self.units
            .iter()
            .map(|unit| UnitSeed {
                name: unit.name.clone(),
            })
            .collect()
    }

    /// Parses and validates a JSON unit list into a fresh registry
    ///
    /// The payload must be a non-empty array of `{ "name": string }`
    /// objects. Any failure rejects the whole import; the caller's
    /// existing registry is untouched since this is a constructor.
    pub fn import_json(payload: &str) -> Result<Self, Error> {
        let seeds: Vec<UnitSeed> =
            serde_json::from_str(payload).map_err(|e| Error::Json(e.to_string()))?;

        if seeds.is_empty() {
            return Err(Error::Empty);
        }

        for (index, seed) in seeds.iter().enumerate() {
            seed.validate().map_err(|report| Error::Shape {
                index,
                reason: report.to_string(),
            })?;
        }

        Ok(Self::from_names(seeds.into_iter().map(|seed| seed.name)))
    }

    /// Serializes the registry into its JSON export shape
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn export_json(&self) -> String {
        serde_json::to_string(&self.seeds()).expect("default serializer cannot fail")
    }
}
