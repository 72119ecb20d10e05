//! Configuration constants for the CloudRush game system
//!
//! This module contains all the configuration limits, defaults, and
//! fixed copy used throughout the game system to ensure data integrity
//! and provide consistent boundaries for different game components.

/// Session-level configuration constants
pub mod session {
    /// Default countdown length in minutes for a fresh session
    pub const DEFAULT_MINUTES: u32 = 6;
    /// Minimum countdown length in minutes
    pub const MIN_MINUTES: u32 = 1;
    /// Maximum countdown length in minutes
    pub const MAX_MINUTES: u32 = 180;
    /// Number of ticks a transient banner message stays visible
    pub const BANNER_TICKS: u8 = 2;
}

/// Countdown clock configuration constants
pub mod clock {
    /// Wall-clock interval between consecutive clock ticks
    pub const TICK_INTERVAL: web_time::Duration = web_time::Duration::from_secs(1);
    /// Remaining-seconds value at which the one-shot alarm fires
    pub const ALARM_AT: u32 = 10;
    /// Remaining-seconds value at and below which the repeating tick fires
    pub const TICK_UNDER: u32 = 5;
}

/// Team roster configuration constants
pub mod teams {
    /// Team counts a session may be configured with
    pub const ALLOWED_COUNTS: [usize; 3] = [1, 3, 5];
    /// Maximum length of a team name in characters
    pub const MAX_NAME_LENGTH: usize = 50;
    /// Preset team names used for default rosters
    pub const PRESET_NAMES: [&str; 5] = [
        "Red Team",
        "Blue Team",
        "Yellow Team",
        "Green Team",
        "Purple Team",
    ];
}

/// Data-unit configuration constants
pub mod units {
    /// Maximum length of a unit name in characters
    pub const MAX_NAME_LENGTH: usize = 100;
    /// Names of the data units seeded into a default session
    pub const DEFAULT_NAMES: [&str; 10] = [
        "Photos",
        "Contacts",
        "Invoices",
        "Payroll",
        "Inventory",
        "Email Archive",
        "Customer Records",
        "Design Files",
        "Backups",
        "Analytics",
    ];
}

/// Question configuration constants
pub mod questions {
    /// Exact number of answer choices every question carries
    pub const CHOICE_COUNT: usize = 4;
    /// Maximum length of the question text in characters
    pub const MAX_TEXT_LENGTH: usize = 200;
    /// Maximum length of a single answer choice in characters
    pub const MAX_CHOICE_LENGTH: usize = 200;
    /// Maximum length of the optional tip in characters
    pub const MAX_TIP_LENGTH: usize = 200;
}

/// Fixed user-facing copy emitted by the game core
pub mod copy {
    /// Ending message when every unit reached the cloud in time
    pub const SUCCESS: &str = "All data made it to the cloud in time. Migration complete!";
    /// Ending message when the countdown expired with units still local
    pub const FAILURE: &str = "Time ran out! Everything still stored locally has been wiped.";
    /// Transient banner after a correct answer
    pub const CORRECT: &str = "Correct! Data migrated to the cloud.";
    /// Transient banner after an incorrect answer
    pub const WRONG: &str = "Not quite. The data stays local for now.";
}
