//! Question pool and rotation
//!
//! This module implements the multiple-choice question supply for the game.
//! The pool is logically circular and never exhausts: questions are handed
//! out in round-robin order, and an emptied pool falls back to a built-in
//! bank of cloud-literacy questions. Rotation is implemented with an index
//! cursor over the stored sequence, so `next()` is O(1) and editor changes
//! are reflected immediately.

use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::constants;

type ValidationResult = garde::Result;

/// Validates that a correct-answer index points at an existing choice
fn validate_correct_index(val: &usize, _context: &()) -> ValidationResult {
    if *val < constants::questions::CHOICE_COUNT {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "correct_index {val} is outside of the bounds [0,{}]",
            constants::questions::CHOICE_COUNT - 1
        )))
    }
}

/// A single multiple-choice question
///
/// Immutable once created; the mutable thing is the pool it sits in. The
/// validation rules enforce the wire shape: exactly four choices and a
/// correct index that points at one of them.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The question text shown to the active team
    #[garde(length(min = 1, max = constants::questions::MAX_TEXT_LENGTH))]
    pub text: String,
    /// The four answer choices, in display order
    #[garde(
        length(min = constants::questions::CHOICE_COUNT, max = constants::questions::CHOICE_COUNT),
        inner(length(min = 1, max = constants::questions::MAX_CHOICE_LENGTH))
    )]
    pub choices: Vec<String>,
    /// Index of the correct choice
    #[garde(custom(validate_correct_index))]
    pub correct_index: usize,
    /// Optional hint displayed alongside the question
    #[garde(inner(length(max = constants::questions::MAX_TIP_LENGTH)))]
    pub tip: Option<String>,
}

/// Errors that can occur while importing or editing questions
#[derive(Error, Debug)]
pub enum Error {
    /// The payload is not a JSON array of question objects
    #[error("invalid question JSON: {0}")]
    Json(String),
    /// A question in an imported list failed the shape check
    #[error("question {index} is malformed: {reason}")]
    Shape {
        /// Index of the offending question in the imported array
        index: usize,
        /// Validation failure description
        reason: String,
    },
    /// A single question handed to the editor failed validation
    #[error("malformed question: {0}")]
    Invalid(String),
}

/// The built-in question bank
///
/// Used as the default pool and as the fallback supply when the editor has
/// emptied the pool.
pub fn built_in_bank() -> Vec<Question> {
    fn question(
        text: &str,
        choices: [&str; constants::questions::CHOICE_COUNT],
        correct_index: usize,
        tip: &str,
    ) -> Question {
        Question {
            text: text.to_owned(),
            choices: choices.iter().map(|&choice| choice.to_owned()).collect(),
            correct_index,
            tip: Some(tip.to_owned()),
        }
    }

    vec![
        question(
            "What is cloud computing?",
            [
                "An offline application installed on one PC",
                "Servers on the internet providing storage, processing, and apps on demand",
                "A special cable connecting two computers",
                "A kind of corporate antivirus",
            ],
            1,
            "Cloud means resources delivered over the internet, scalable and reachable anywhere.",
        ),
        question(
            "Which of these is a cloud application?",
            [
                "Windows Notepad",
                "Google Drive",
                "An offline calculator",
                "The USB device manager",
            ],
            1,
            "Google Drive, OneDrive, iCloud, Spotify, and YouTube are everyday examples.",
        ),
        question(
            "What is an advantage of saving to the cloud instead of only one computer?",
            [
                "The files become unreachable away from home",
                "It only works while that computer is switched on",
                "Access from anywhere plus backup against device loss",
                "It uses more space on the local disk",
            ],
            2,
            "Availability, backup copies, and collaboration.",
        ),
        question(
            "What is a datacenter?",
            [
                "An oversized USB stick",
                "A facility full of servers that store and process data",
                "A smart power outlet",
                "An email application",
            ],
            1,
            "Think of a building with thousands of professional machines.",
        ),
        question(
            "What happens to a file stored only on a phone if the phone breaks?",
            [
                "The file is lost with the device",
                "The file repairs the phone",
                "The file moves to the cloud by itself",
                "Nothing, files cannot be lost",
            ],
            0,
            "Data kept on a single device shares that device's fate.",
        ),
        question(
            "Why do companies prefer scaling resources in the cloud?",
            [
                "Cloud servers never need electricity",
                "Capacity can grow or shrink on demand without buying hardware",
                "It makes their offices larger",
                "Local disks are illegal for businesses",
            ],
            1,
            "Elasticity: pay for what is used, grow when needed.",
        ),
    ]
}

/// A cyclic, never-exhausting supply of questions
///
/// The rotation cursor walks the stored pool; handing out a question
/// advances the cursor instead of moving elements, so the pool order the
/// editor sees is stable and `next()` is O(1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRotator {
    pool: Vec<Question>,
    cursor: usize,
}

impl Default for QuestionRotator {
    /// The default rotator starts on the built-in bank
    fn default() -> Self {
        Self::with_pool(built_in_bank())
    }
}

impl QuestionRotator {
    /// Creates a rotator over the given pool, cursor at the front
    pub fn with_pool(pool: Vec<Question>) -> Self {
        Self { pool, cursor: 0 }
    }

    /// Number of questions currently in the pool
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Whether the editor has emptied the pool
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// The pool in stored (editor) order
    pub fn questions(&self) -> &[Question] {
        &self.pool
    }

    /// Draws the next question in round-robin order
    ///
    /// The drawn question stays in the pool and will come around again once
    /// the rotation wraps. An empty pool falls back to a uniform random
    /// draw from the built-in bank rather than failing.
    pub fn next(&mut self) -> Question {
        if self.pool.is_empty() {
            let bank = built_in_bank();
            return bank[fastrand::usize(..bank.len())].clone();
        }

        let question = self.pool[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.pool.len();
        question
    }

    /// Uniformly shuffles the pool and rewinds the rotation
    pub fn shuffle(&mut self) {
        fastrand::shuffle(&mut self.pool);
        self.cursor = 0;
    }

    /// Appends a validated question to the pool
    pub fn add(&mut self, question: Question) -> Result<(), Error> {
        question
            .validate()
            .map_err(|report| Error::Invalid(report.to_string()))?;
        self.pool.push(question);
        Ok(())
    }

    /// Removes the question at `index` from the pool
    ///
    /// Returns the removed question, or `None` if the index is out of
    /// range. The cursor is adjusted so rotation continues from the same
    /// logical position.
    pub fn remove(&mut self, index: usize) -> Option<Question> {
        if index >= self.pool.len() {
            return None;
        }

        let removed = self.pool.remove(index);

        if index < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.pool.len() {
            self.cursor = 0;
        }

        Some(removed)
    }

    /// The pool in rotation order, starting at the cursor
    ///
    /// This is the order `next()` would hand questions out in, and the
    /// order exports use.
    pub fn rotation(&self) -> Vec<&Question> {
        self.pool[self.cursor..]
            .iter()
            .chain(self.pool[..self.cursor].iter())
            .collect()
    }

    /// Parses and validates a JSON question list, replacing the pool
    ///
    /// A single malformed element rejects the whole import and leaves the
    /// current pool and cursor unchanged. An empty array is accepted: the
    /// rotator then serves from the built-in bank.
    pub fn import_json(&mut self, payload: &str) -> Result<(), Error> {
        let imported: Vec<Question> =
            serde_json::from_str(payload).map_err(|e| Error::Json(e.to_string()))?;

        for (index, question) in imported.iter().enumerate() {
            question.validate().map_err(|report| Error::Shape {
                index,
                reason: report.to_string(),
            })?;
        }

        self.pool = imported;
        self.cursor = 0;
        Ok(())
    }

    /// Serializes the pool into its JSON export shape, in rotation order
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn export_json(&self) -> String {
        serde_json::to_string(&self.rotation()).expect("default serializer cannot fail")
    }
}
