//! Read-only session report snapshot
//!
//! The printable-report collaborator consumes this snapshot and renders it
//! however it likes; the core has no dependency on its output. Everything
//! here is a copy taken at the moment of the request.

use enum_map::EnumMap;
use serde::Serialize;

use crate::{
    teams::Team,
    units::{Unit, UnitState},
};

/// A point-in-time copy of the session for reporting
#[derive(Debug, Clone, Serialize)]
pub struct ReportSnapshot {
    /// Final or current standings in roster order
    pub teams: Vec<Team>,
    /// Every unit with its lifecycle state, in id order
    pub units: Vec<Unit>,
    /// Configured countdown length in minutes
    pub minutes: u32,
    /// Per-state unit tallies
    pub tallies: EnumMap<UnitState, usize>,
}

impl ReportSnapshot {
    /// Builds a snapshot from copies of the session parts
    pub fn new(teams: Vec<Team>, units: Vec<Unit>, minutes: u32) -> Self {
        let mut tallies = EnumMap::default();
        for unit in &units {
            tallies[unit.state] += 1;
        }
        Self {
            teams,
            units,
            minutes,
            tallies,
        }
    }

    /// Units that reached the cloud
    pub fn migrated(&self) -> usize {
        self.tallies[UnitState::Cloud]
    }

    /// Units wiped by the expiry
    pub fn destroyed(&self) -> usize {
        self.tallies[UnitState::Destroyed]
    }

    /// Total units in the session
    pub fn total(&self) -> usize {
        self.units.len()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{teams::preset_roster, units::UnitRegistry};

    #[test]
    fn test_snapshot_tallies() {
        let mut registry = UnitRegistry::from_names(["A", "B", "C"]);
        registry.transition(1, UnitState::Cloud);
        registry.transition(2, UnitState::Destroyed);

        let snapshot = ReportSnapshot::new(
            preset_roster(3),
            registry.iter().cloned().collect(),
            6,
        );

        assert_eq!(snapshot.migrated(), 1);
        assert_eq!(snapshot.destroyed(), 1);
        assert_eq!(snapshot.total(), 3);
        assert_eq!(snapshot.minutes, 6);
        assert_eq!(snapshot.teams.len(), 3);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = ReportSnapshot::new(preset_roster(1), vec![], 1);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("Red Team"));
    }
}
