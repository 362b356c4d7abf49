//! Weighted-vote scoring.
//!
//! Algorithm:
//! 1. Start every label at zero.
//! 2. For each answer, resolve the question by id and the option by position or key,
//!    then add the option's weight vector elementwise. Answers that do not resolve
//!    contribute nothing and are recorded as skipped.
//! 3. The winner is the label with the strictly highest total. Ties go to the label
//!    defined first in the catalog, so an empty submission yields the first label.
//!
//! Accumulation is a commutative sum, so answer order never affects the result.

use serde::{Deserialize, Serialize};

use crate::assessment::catalog::{AnswerOption, Catalog};

/// How an answer picks its option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based position in the question's option list. Legacy encoding: its
    /// meaning changes if the catalog reorders options.
    Index(i64),
    /// Stable option key.
    Key(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question_id: i64,
    pub selection: Selection,
}

impl Answer {
    pub fn at_index(question_id: i64, index: i64) -> Self {
        Self {
            question_id,
            selection: Selection::Index(index),
        }
    }

    pub fn with_key(question_id: i64, key: impl Into<String>) -> Self {
        Self {
            question_id,
            selection: Selection::Key(key.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnknownQuestion,
    OptionOutOfRange,
    UnknownOptionKey,
    /// The submitted item lacked a question id or a selection.
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedAnswer {
    pub position: usize,
    pub question_id: Option<i64>,
    pub reason: SkipReason,
}

/// Per-call accumulator, one total per label in catalog order. Totals are
/// widened to `u64` so sums of `u32` weights stay exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreVector {
    totals: Vec<u64>,
}

impl ScoreVector {
    pub fn zeroed(label_count: usize) -> Self {
        Self {
            totals: vec![0; label_count],
        }
    }

    fn add(&mut self, weights: &[u32]) {
        for (total, weight) in self.totals.iter_mut().zip(weights) {
            *total = total.saturating_add(u64::from(*weight));
        }
    }

    pub fn totals(&self) -> &[u64] {
        &self.totals
    }

    /// Position of the strictly highest total; the earliest position wins ties.
    pub fn winner(&self) -> usize {
        let mut best = 0;
        for (i, &total) in self.totals.iter().enumerate().skip(1) {
            if total > self.totals[best] {
                best = i;
            }
        }
        best
    }
}

#[derive(Debug, Clone)]
pub struct Tally {
    pub scores: ScoreVector,
    pub winner: usize,
    pub skipped: Vec<SkippedAnswer>,
}

pub fn tally(catalog: &Catalog, answers: &[Answer]) -> Tally {
    let mut scores = ScoreVector::zeroed(catalog.labels().len());
    let mut skipped = Vec::new();

    for (position, answer) in answers.iter().enumerate() {
        match resolve(catalog, answer) {
            Ok(option) => scores.add(option.weights()),
            Err(reason) => skipped.push(SkippedAnswer {
                position,
                question_id: Some(answer.question_id),
                reason,
            }),
        }
    }

    let winner = scores.winner();
    Tally {
        scores,
        winner,
        skipped,
    }
}

/// Resolves an answer to the option it selects.
pub fn resolve<'c>(catalog: &'c Catalog, answer: &Answer) -> Result<&'c AnswerOption, SkipReason> {
    let question = catalog
        .question(answer.question_id)
        .ok_or(SkipReason::UnknownQuestion)?;
    match &answer.selection {
        Selection::Index(i) => question.option_at(*i).ok_or(SkipReason::OptionOutOfRange),
        Selection::Key(k) => question.option_by_key(k).ok_or(SkipReason::UnknownOptionKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::reference::reference_catalog;
    use serde_json::json;

    fn all_at(index: i64) -> Vec<Answer> {
        (1..=8).map(|q| Answer::at_index(q, index)).collect()
    }

    #[test]
    fn test_all_first_option_totals() {
        let catalog = reference_catalog().unwrap();
        let t = tally(&catalog, &all_at(0));
        assert_eq!(t.scores.totals(), &[24, 6, 2]);
        assert_eq!(t.winner, 0);
        assert!(t.skipped.is_empty());
    }

    #[test]
    fn test_all_third_option_favors_collaborator() {
        let catalog = reference_catalog().unwrap();
        let t = tally(&catalog, &all_at(2));
        assert_eq!(t.scores.totals(), &[5, 8, 24]);
        assert_eq!(t.winner, 2);
    }

    #[test]
    fn test_empty_submission_is_all_zero_and_first_label() {
        let catalog = reference_catalog().unwrap();
        let t = tally(&catalog, &[]);
        assert_eq!(t.scores.totals(), &[0, 0, 0]);
        assert_eq!(t.winner, 0);
    }

    #[test]
    fn test_large_weights_keep_exact_totals() {
        let label = |name: &str| {
            json!({
                "label": name, "name": name, "description": "",
                "characteristics": [], "career_matches": [],
                "strengths": [], "development_areas": []
            })
        };
        let doc = json!({
            "revision": "wide",
            "labels": [label("A"), label("B")],
            "questions": [{
                "id": 1,
                "prompt": "Pick",
                "options": [{
                    "key": "x",
                    "text": "X",
                    "weights": {"A": 3_000_000_000u32, "B": 4_000_000_000u32}
                }]
            }]
        });
        let catalog = Catalog::from_json(&doc.to_string()).unwrap();

        let t = tally(&catalog, &[Answer::with_key(1, "x"), Answer::at_index(1, 0)]);
        assert_eq!(t.scores.totals(), &[6_000_000_000, 8_000_000_000]);
        assert_eq!(t.winner, 1);
    }

    #[test]
    fn test_winner_prefers_earliest_on_tie() {
        let v = ScoreVector {
            totals: vec![2, 5, 5],
        };
        assert_eq!(v.winner(), 1);
        let v = ScoreVector {
            totals: vec![4, 4, 4],
        };
        assert_eq!(v.winner(), 0);
    }

    #[test]
    fn test_tie_between_two_labels_resolves_to_earlier() {
        let catalog = reference_catalog().unwrap();
        // Q4 "results" = [0,3,1], Q4 "relationships" = [0,1,3] → Leader 4, Collaborator 4
        let answers = vec![Answer::at_index(4, 1), Answer::at_index(4, 2)];
        for _ in 0..5 {
            let t = tally(&catalog, &answers);
            assert_eq!(t.scores.totals(), &[0, 4, 4]);
            assert_eq!(t.winner, 1);
        }
    }

    #[test]
    fn test_unknown_question_skipped_like_omission() {
        let catalog = reference_catalog().unwrap();
        let base = vec![Answer::at_index(1, 1), Answer::at_index(2, 2)];
        let mut with_unknown = base.clone();
        with_unknown.insert(1, Answer::at_index(99, 0));

        let a = tally(&catalog, &base);
        let b = tally(&catalog, &with_unknown);
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.winner, b.winner);
        assert_eq!(
            b.skipped,
            vec![SkippedAnswer {
                position: 1,
                question_id: Some(99),
                reason: SkipReason::UnknownQuestion,
            }]
        );
    }

    #[test]
    fn test_out_of_range_and_negative_index_skipped() {
        let catalog = reference_catalog().unwrap();
        let t = tally(
            &catalog,
            &[Answer::at_index(1, 3), Answer::at_index(1, -1)],
        );
        assert_eq!(t.scores.totals(), &[0, 0, 0]);
        assert_eq!(t.skipped.len(), 2);
        assert!(t
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::OptionOutOfRange));
    }

    #[test]
    fn test_key_selection_matches_index_selection() {
        let catalog = reference_catalog().unwrap();
        let by_index = tally(&catalog, &[Answer::at_index(3, 1)]);
        let by_key = tally(&catalog, &[Answer::with_key(3, "take-charge")]);
        assert_eq!(by_index.scores, by_key.scores);

        let unknown = tally(&catalog, &[Answer::with_key(3, "nap")]);
        assert_eq!(unknown.skipped[0].reason, SkipReason::UnknownOptionKey);
    }

    #[test]
    fn test_duplicate_answers_both_count() {
        let catalog = reference_catalog().unwrap();
        let t = tally(
            &catalog,
            &[Answer::at_index(4, 0), Answer::at_index(4, 0)],
        );
        assert_eq!(t.scores.totals(), &[6, 0, 0]);
    }

    #[test]
    fn test_order_independence() {
        let catalog = reference_catalog().unwrap();
        let answers = vec![
            Answer::at_index(1, 0),
            Answer::at_index(2, 1),
            Answer::at_index(3, 2),
            Answer::at_index(5, 1),
            Answer::with_key(7, "mentoring"),
        ];
        let mut reversed = answers.clone();
        reversed.reverse();
        let mut rotated = answers.clone();
        rotated.rotate_left(2);

        let expected = tally(&catalog, &answers);
        for variant in [reversed, rotated] {
            let t = tally(&catalog, &variant);
            assert_eq!(t.scores, expected.scores);
            assert_eq!(t.winner, expected.winner);
        }
    }

    #[test]
    fn test_adding_favoring_answer_never_lowers_rank() {
        let catalog = reference_catalog().unwrap();
        // Q4 "puzzles" = [3,0,0] strictly favors Analyst.
        let bases = vec![
            vec![],
            all_at(1),
            all_at(2),
            vec![Answer::at_index(2, 1), Answer::at_index(6, 2)],
        ];
        for base in bases {
            let before = tally(&catalog, &base);
            let mut extended = base.clone();
            extended.push(Answer::at_index(4, 0));
            let after = tally(&catalog, &extended);

            let rank = |v: &ScoreVector| v.totals().iter().filter(|&&t| t > v.totals()[0]).count();
            assert!(rank(&after.scores) <= rank(&before.scores));
            if before.winner == 0 {
                assert_eq!(after.winner, 0);
            }
        }
    }
}
