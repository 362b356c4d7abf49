//! Assessment catalog: questions, options, and label metadata.
//!
//! A `Catalog` is built once from a `CatalogDefinition` and is immutable afterwards.
//! Construction enforces the weight-vector invariant: every option carries an
//! explicit weight for every defined label and for nothing else. Weights are
//! stored densely, indexed by label position, so scoring never deals with
//! partial vectors.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Labels
// ────────────────────────────────────────────────────────────────────────────

/// A classification outcome. The closed set of labels is fixed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Display metadata attached to a label. Never touched by scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelProfile {
    pub name: String,
    pub description: String,
    pub characteristics: Vec<String>,
    pub career_matches: Vec<String>,
    pub strengths: Vec<String>,
    pub development_areas: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Definition (serde shape, unvalidated)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDefinition {
    pub revision: String,
    /// Definition order is the tie-break order.
    pub labels: Vec<LabelDefinition>,
    pub questions: Vec<QuestionDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelDefinition {
    pub label: Label,
    #[serde(flatten)]
    pub profile: LabelProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDefinition {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<OptionDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDefinition {
    /// Stable identifier, independent of the option's position.
    pub key: String,
    pub text: String,
    pub weights: BTreeMap<Label, u32>,
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("catalog defines no labels")]
    NoLabels,

    #[error("label '{0}' is defined more than once")]
    DuplicateLabel(Label),

    #[error("question ids must be positive integers")]
    ZeroQuestionId,

    #[error("question {0} is defined more than once")]
    DuplicateQuestion(u32),

    #[error("question {0} has no options")]
    EmptyQuestion(u32),

    #[error("question {question_id} defines option key '{key}' more than once")]
    DuplicateOptionKey { question_id: u32, key: String },

    #[error("question {question_id} option '{key}' has no weight for label '{label}'")]
    MissingWeight {
        question_id: u32,
        key: String,
        label: Label,
    },

    #[error("question {question_id} option '{key}' weights undefined label '{label}'")]
    UndefinedLabel {
        question_id: u32,
        key: String,
        label: Label,
    },

    #[error("invalid catalog document: {0}")]
    Parse(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Validated catalog
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AnswerOption {
    key: String,
    text: String,
    weights: Vec<u32>,
}

impl AnswerOption {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Dense weight vector, one entry per label in catalog order.
    pub(crate) fn weights(&self) -> &[u32] {
        &self.weights
    }
}

#[derive(Debug, Clone)]
pub struct Question {
    id: u32,
    prompt: String,
    options: Vec<AnswerOption>,
}

impl Question {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    /// Resolves a positional selection. Negative and past-the-end indices miss.
    pub fn option_at(&self, index: i64) -> Option<&AnswerOption> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.options.get(i))
    }

    pub fn option_by_key(&self, key: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.key == key)
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    revision: String,
    labels: Vec<Label>,
    profiles: Vec<LabelProfile>,
    questions: Vec<Question>,
    question_index: HashMap<u32, usize>,
}

impl Catalog {
    pub fn new(definition: CatalogDefinition) -> Result<Self, CatalogError> {
        if definition.labels.is_empty() {
            return Err(CatalogError::NoLabels);
        }

        let mut labels = Vec::with_capacity(definition.labels.len());
        let mut profiles = Vec::with_capacity(definition.labels.len());
        for def in definition.labels {
            if labels.contains(&def.label) {
                return Err(CatalogError::DuplicateLabel(def.label));
            }
            labels.push(def.label);
            profiles.push(def.profile);
        }

        let mut questions = Vec::with_capacity(definition.questions.len());
        let mut question_index = HashMap::new();
        for q in definition.questions {
            if q.id == 0 {
                return Err(CatalogError::ZeroQuestionId);
            }
            if question_index.contains_key(&q.id) {
                return Err(CatalogError::DuplicateQuestion(q.id));
            }
            if q.options.is_empty() {
                return Err(CatalogError::EmptyQuestion(q.id));
            }

            let mut seen_keys = HashSet::new();
            let mut options = Vec::with_capacity(q.options.len());
            for opt in q.options {
                if !seen_keys.insert(opt.key.clone()) {
                    return Err(CatalogError::DuplicateOptionKey {
                        question_id: q.id,
                        key: opt.key,
                    });
                }
                let weights = dense_weights(q.id, &opt, &labels)?;
                options.push(AnswerOption {
                    key: opt.key,
                    text: opt.text,
                    weights,
                });
            }

            question_index.insert(q.id, questions.len());
            questions.push(Question {
                id: q.id,
                prompt: q.prompt,
                options,
            });
        }

        Ok(Self {
            revision: definition.revision,
            labels,
            profiles,
            questions,
            question_index,
        })
    }

    /// Parses and validates a JSON catalog document.
    pub fn from_json(document: &str) -> Result<Self, CatalogError> {
        let definition: CatalogDefinition =
            serde_json::from_str(document).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(definition)
    }

    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// Labels in definition order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn label_at(&self, position: usize) -> Option<&Label> {
        self.labels.get(position)
    }

    pub fn profile(&self, label: &str) -> Option<&LabelProfile> {
        self.labels
            .iter()
            .position(|l| l.as_str() == label)
            .map(|i| &self.profiles[i])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: i64) -> Option<&Question> {
        let id = u32::try_from(id).ok()?;
        self.question_index.get(&id).map(|&i| &self.questions[i])
    }
}

fn dense_weights(
    question_id: u32,
    option: &OptionDefinition,
    labels: &[Label],
) -> Result<Vec<u32>, CatalogError> {
    if let Some(stray) = option.weights.keys().find(|l| !labels.contains(*l)) {
        return Err(CatalogError::UndefinedLabel {
            question_id,
            key: option.key.clone(),
            label: stray.clone(),
        });
    }

    labels
        .iter()
        .map(|label| {
            option
                .weights
                .get(label)
                .copied()
                .ok_or_else(|| CatalogError::MissingWeight {
                    question_id,
                    key: option.key.clone(),
                    label: label.clone(),
                })
        })
        .collect()
}
