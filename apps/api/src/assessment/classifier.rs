//! Classifier: the assessment engine's public surface.
//!
//! Owns an injected, immutable `Catalog` behind an `Arc`, so clones are cheap and
//! any number of classifications can run concurrently without coordination.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::assessment::catalog::{Catalog, Label, LabelProfile};
use crate::assessment::scoring::{resolve, tally, Answer, Selection, SkippedAnswer};

/// Question as shown to the answering party. Carries no weights.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub text: String,
    /// Zero-based position; the legacy `option_index` selection.
    pub index: usize,
    /// Stable identifier; the preferred `option_key` selection.
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelScore {
    pub label: Label,
    pub score: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub label: Label,
    /// Final totals in catalog label order.
    pub scores: Vec<LabelScore>,
    pub skipped: Vec<SkippedAnswer>,
}

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("{} answer(s) did not resolve against catalog revision '{revision}'", skipped.len())]
    Unresolved {
        revision: String,
        skipped: Vec<SkippedAnswer>,
    },
}

#[derive(Clone)]
pub struct Classifier {
    catalog: Arc<Catalog>,
}

impl Classifier {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn list_questions(&self) -> Vec<QuestionView> {
        self.catalog
            .questions()
            .iter()
            .map(|q| QuestionView {
                id: q.id(),
                prompt: q.prompt().to_string(),
                options: q
                    .options()
                    .iter()
                    .enumerate()
                    .map(|(index, o)| OptionView {
                        text: o.text().to_string(),
                        index,
                        key: o.key().to_string(),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Lenient classification. Never fails; unresolvable answers are ignored.
    pub fn classify(&self, answers: &[Answer]) -> Label {
        let t = tally(&self.catalog, answers);
        self.winning_label(t.winner)
    }

    /// Lenient classification with totals and the list of skipped answers.
    pub fn classify_detailed(&self, answers: &[Answer]) -> Classification {
        let t = tally(&self.catalog, answers);
        let scores = self
            .catalog
            .labels()
            .iter()
            .zip(t.scores.totals())
            .map(|(label, &score)| LabelScore {
                label: label.clone(),
                score,
            })
            .collect();

        Classification {
            label: self.winning_label(t.winner),
            scores,
            skipped: t.skipped,
        }
    }

    /// Strict classification: any answer that does not resolve is an error.
    pub fn classify_strict(&self, answers: &[Answer]) -> Result<Classification, ScoringError> {
        let classification = self.classify_detailed(answers);
        if classification.skipped.is_empty() {
            Ok(classification)
        } else {
            Err(ScoringError::Unresolved {
                revision: self.catalog.revision().to_string(),
                skipped: classification.skipped,
            })
        }
    }

    /// Metadata for a label, or `None` for labels this catalog does not define.
    pub fn get_results(&self, label: &str) -> Option<&LabelProfile> {
        self.catalog.profile(label)
    }

    /// Tally winners index into this catalog's label list, which is never empty.
    fn winning_label(&self, winner: usize) -> Label {
        self.catalog
            .label_at(winner)
            .cloned()
            .expect("tally winner is a catalog label position")
    }

    /// Rewrites positional selections to stable option keys. Answers that do not
    /// resolve are returned unchanged.
    pub fn pin(&self, answers: &[Answer]) -> Vec<Answer> {
        answers
            .iter()
            .map(|answer| match (&answer.selection, resolve(&self.catalog, answer)) {
                (Selection::Index(_), Ok(option)) => {
                    Answer::with_key(answer.question_id, option.key())
                }
                _ => answer.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::{
        CatalogDefinition, LabelDefinition, OptionDefinition, QuestionDefinition,
    };
    use crate::assessment::reference::{reference_catalog, ANALYST, COLLABORATOR, LEADER};
    use crate::assessment::scoring::SkipReason;
    use std::collections::BTreeMap;

    fn reference() -> Classifier {
        Classifier::new(reference_catalog().unwrap())
    }

    #[test]
    fn test_list_questions_exposes_positions_and_keys() {
        let questions = reference().list_questions();
        assert_eq!(questions.len(), 8);
        assert_eq!(questions[0].id, 1);
        assert_eq!(questions[0].prompt, "When working on a project, you prefer to:");
        let indexes: Vec<usize> = questions[0].options.iter().map(|o| o.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(questions[0].options[1].key, "lead-team");
    }

    #[test]
    fn test_list_questions_never_serializes_weights() {
        let json = serde_json::to_string(&reference().list_questions()).unwrap();
        assert!(!json.contains("weights"));
        assert!(!json.contains(ANALYST));
    }

    #[test]
    fn test_all_first_option_classifies_analyst() {
        let answers: Vec<Answer> = (1..=8).map(|q| Answer::at_index(q, 0)).collect();
        let classifier = reference();
        assert_eq!(classifier.classify(&answers).as_str(), ANALYST);
        let detailed = classifier.classify_detailed(&answers);
        assert_eq!(
            detailed.scores[0],
            LabelScore {
                label: ANALYST.into(),
                score: 24
            }
        );
    }

    #[test]
    fn test_all_third_option_classifies_collaborator() {
        let answers: Vec<Answer> = (1..=8).map(|q| Answer::at_index(q, 2)).collect();
        assert_eq!(reference().classify(&answers).as_str(), COLLABORATOR);
    }

    #[test]
    fn test_mostly_second_option_classifies_leader() {
        let answers: Vec<Answer> = (1..=8).map(|q| Answer::at_index(q, 1)).collect();
        assert_eq!(reference().classify(&answers).as_str(), LEADER);
    }

    #[test]
    fn test_zero_answers_yields_first_label_with_full_metadata() {
        let classifier = reference();
        let label = classifier.classify(&[]);
        assert_eq!(label.as_str(), ANALYST);

        let catalog = reference_catalog().unwrap();
        assert_eq!(
            classifier.get_results(label.as_str()),
            catalog.profile(ANALYST)
        );
        assert_eq!(
            classifier.get_results(label.as_str()).unwrap().name,
            "The Strategic Analyst"
        );
    }

    #[test]
    fn test_get_results_unknown_label_is_absent() {
        let classifier = reference();
        assert!(classifier.get_results("Wizard").is_none());
        assert!(classifier.get_results("").is_none());
        assert!(classifier.get_results("analyst").is_none());
    }

    #[test]
    fn test_classify_always_returns_defined_label() {
        let classifier = reference();
        let submissions = vec![
            vec![],
            vec![Answer::at_index(0, 0)],
            vec![Answer::at_index(1, 42), Answer::with_key(2, "?")],
            vec![Answer::at_index(i64::MAX, i64::MIN)],
        ];
        for answers in submissions {
            let label = classifier.classify(&answers);
            assert!(classifier.catalog().labels().contains(&label));
        }
    }

    #[test]
    fn test_strict_mode_reports_skipped_answers() {
        let classifier = reference();
        let ok = classifier.classify_strict(&[Answer::at_index(1, 0)]).unwrap();
        assert_eq!(ok.label.as_str(), ANALYST);

        let err = classifier
            .classify_strict(&[Answer::at_index(1, 0), Answer::at_index(12, 0)])
            .unwrap_err();
        let ScoringError::Unresolved { revision, skipped } = err;
        assert_eq!(revision, "reference-v1");
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].reason, SkipReason::UnknownQuestion);
    }

    #[test]
    fn test_pin_rewrites_positions_to_keys() {
        let classifier = reference();
        let pinned = classifier.pin(&[
            Answer::at_index(1, 2),
            Answer::with_key(2, "quiet-office"),
            Answer::at_index(3, 9),
        ]);
        assert_eq!(
            pinned,
            vec![
                Answer::with_key(1, "collaborate"),
                Answer::with_key(2, "quiet-office"),
                Answer::at_index(3, 9),
            ]
        );
    }

    #[test]
    fn test_pinned_answers_survive_option_reordering() {
        let classifier = reference();
        let original = vec![Answer::at_index(4, 0), Answer::at_index(5, 0)];
        let pinned = classifier.pin(&original);

        let mut definition = crate::assessment::reference::reference_definition();
        for q in &mut definition.questions {
            q.options.reverse();
        }
        let reordered = Classifier::new(Catalog::new(definition).unwrap());

        assert_eq!(reordered.classify(&pinned).as_str(), ANALYST);
        assert_eq!(reordered.classify(&original).as_str(), COLLABORATOR);
    }

    #[test]
    fn test_independent_catalogs_coexist() {
        let custom = CatalogDefinition {
            revision: "two-label".to_string(),
            labels: ["Owl", "Lark"]
                .into_iter()
                .map(|name| LabelDefinition {
                    label: name.into(),
                    profile: LabelProfile {
                        name: name.to_string(),
                        description: String::new(),
                        characteristics: vec!["t".to_string()],
                        career_matches: vec!["c".to_string()],
                        strengths: vec![],
                        development_areas: vec![],
                    },
                })
                .collect(),
            questions: vec![QuestionDefinition {
                id: 1,
                prompt: "When do you work best?".to_string(),
                options: vec![
                    OptionDefinition {
                        key: "night".to_string(),
                        text: "Night".to_string(),
                        weights: BTreeMap::from([("Owl".into(), 2), ("Lark".into(), 0)]),
                    },
                    OptionDefinition {
                        key: "morning".to_string(),
                        text: "Morning".to_string(),
                        weights: BTreeMap::from([("Owl".into(), 0), ("Lark".into(), 2)]),
                    },
                ],
            }],
        };
        let custom = Classifier::new(Catalog::new(custom).unwrap());
        let reference = reference();

        let answers = [Answer::at_index(1, 1)];
        assert_eq!(custom.classify(&answers).as_str(), "Lark");
        assert_eq!(reference.classify(&answers).as_str(), LEADER);
        assert!(custom.get_results(ANALYST).is_none());
    }

    #[test]
    fn test_concurrent_classification_shares_catalog() {
        let classifier = reference();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let c = classifier.clone();
                std::thread::spawn(move || {
                    let answers: Vec<Answer> =
                        (1..=8).map(|q| Answer::at_index(q, i % 3)).collect();
                    c.classify(&answers)
                })
            })
            .collect();
        let labels: Vec<Label> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(labels[0].as_str(), ANALYST);
        assert_eq!(labels[1].as_str(), LEADER);
        assert_eq!(labels[2].as_str(), COLLABORATOR);
        assert_eq!(labels[3].as_str(), ANALYST);
    }
}
