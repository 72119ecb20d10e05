//! # CloudRush Game Library
//!
//! This library provides the core game logic for CloudRush, a timed,
//! turn-based educational quiz game. Teams answer multiple-choice
//! questions to migrate data units from a volatile local store to a safe
//! cloud store before the countdown expires; whatever is still local when
//! the clock hits zero is wiped. The crate covers the phase state
//! machine, the countdown clock, the unit lifecycle, question rotation,
//! turn rotation, and answer resolution. Rendering, audio, and file I/O
//! live behind the presentation seam and are not part of this crate.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};

pub mod constants;

pub mod challenge;
pub mod clock;
pub mod game;
pub mod presenter;
pub mod questions;
pub mod report;
pub mod teams;
pub mod units;

/// Discrete named events emitted by the core at defined transition points
///
/// Audio and visual feedback collaborators consume these fire-and-forget;
/// they never gate core logic and must tolerate being dropped on the
/// floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackEvent {
    /// A challenge was answered correctly
    Correct,
    /// A challenge was answered incorrectly
    Wrong,
    /// The countdown is in its final stretch
    Tick,
    /// The countdown crossed the warning threshold
    Alarm,
    /// A data unit reached the cloud
    Celebrate,
}

impl FeedbackEvent {
    /// Converts the event to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}
