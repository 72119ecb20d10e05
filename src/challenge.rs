//! Pending challenge state
//!
//! A challenge ties one drawn question to one target unit while the active
//! team deliberates. At most one challenge exists at any time; the game
//! controller enforces that single-challenge invariant, this module holds
//! the ephemeral state and judges the submitted answer.

use serde::{Deserialize, Serialize};

use crate::questions::Question;

/// How a resolved challenge turned out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The selected choice matched the question's correct index
    Correct,
    /// The selected choice did not match
    Incorrect,
}

/// One open question awaiting an answer for one target unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingChallenge {
    question: Question,
    target_unit_id: u32,
    selected: Option<usize>,
}

impl PendingChallenge {
    /// Opens a challenge for `target_unit_id` with nothing selected yet
    pub fn new(question: Question, target_unit_id: u32) -> Self {
        Self {
            question,
            target_unit_id,
            selected: None,
        }
    }

    /// The question being asked
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Id of the unit that migrates if the answer is correct
    pub fn target_unit_id(&self) -> u32 {
        self.target_unit_id
    }

    /// The currently selected choice, if any
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Records a choice selection
    ///
    /// Out-of-range indices are ignored; a later selection overwrites an
    /// earlier one until the challenge is resolved.
    pub fn select(&mut self, index: usize) {
        if index < self.question.choices.len() {
            self.selected = Some(index);
        }
    }

    /// Judges the selected choice against the correct index
    ///
    /// Returns `None` while nothing has been selected; resolution requires
    /// a selection.
    pub fn verdict(&self) -> Option<Verdict> {
        self.selected.map(|selected| {
            if selected == self.question.correct_index {
                Verdict::Correct
            } else {
                Verdict::Incorrect
            }
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn challenge() -> PendingChallenge {
        PendingChallenge::new(
            Question {
                text: "Which one?".to_owned(),
                choices: vec![
                    "a".to_owned(),
                    "b".to_owned(),
                    "c".to_owned(),
                    "d".to_owned(),
                ],
                correct_index: 2,
                tip: None,
            },
            7,
        )
    }

    #[test]
    fn test_no_verdict_without_selection() {
        assert_eq!(challenge().verdict(), None);
    }

    #[test]
    fn test_out_of_range_selection_ignored() {
        let mut pending = challenge();
        pending.select(4);
        assert_eq!(pending.selected(), None);
    }

    #[test]
    fn test_selection_overwrite_and_verdict() {
        let mut pending = challenge();
        pending.select(0);
        assert_eq!(pending.verdict(), Some(Verdict::Incorrect));

        pending.select(2);
        assert_eq!(pending.selected(), Some(2));
        assert_eq!(pending.verdict(), Some(Verdict::Correct));
    }

    #[test]
    fn test_target_unit_is_kept() {
        assert_eq!(challenge().target_unit_id(), 7);
    }
}
