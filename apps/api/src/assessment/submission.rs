//! Submission evaluation: turns wire payloads into a classification.
//!
//! Wire answers may be malformed (missing question id or selection). Those are
//! reported as skipped alongside the engine's own unresolved answers, with
//! positions referring to the submitted list.

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::assessment::catalog::LabelProfile;
use crate::assessment::classifier::{Classification, Classifier, ScoringError};
use crate::assessment::scoring::{Answer, Selection, SkipReason, SkippedAnswer};
use crate::errors::AppError;

/// One submitted answer, as sent by clients and as stored in history.
/// `option_key` wins over `option_index` when both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPayload {
    #[serde(default)]
    pub question_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_key: Option<String>,
}

impl AnswerPayload {
    pub fn to_answer(&self) -> Option<Answer> {
        let question_id = self.question_id?;
        match (&self.option_key, self.option_index) {
            (Some(key), _) => Some(Answer::with_key(question_id, key.clone())),
            (None, Some(index)) => Some(Answer::at_index(question_id, index)),
            (None, None) => None,
        }
    }
}

impl From<&Answer> for AnswerPayload {
    fn from(answer: &Answer) -> Self {
        let (option_index, option_key) = match &answer.selection {
            Selection::Index(i) => (Some(*i), None),
            Selection::Key(k) => (None, Some(k.clone())),
        };
        Self {
            question_id: Some(answer.question_id),
            option_index,
            option_key,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitAssessmentRequest {
    pub session_id: Option<String>,
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub answers: Vec<AnswerPayload>,
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmitAssessmentResponse {
    pub assessment_id: Uuid,
    pub personality_type: String,
    pub results: Option<LabelProfile>,
    #[serde(flatten)]
    pub classification: Classification,
}

#[derive(Debug)]
pub struct EvaluatedSubmission {
    pub classification: Classification,
    /// Submitted items in order, with resolvable positional selections pinned to
    /// option keys. Malformed items are kept as sent.
    pub pinned: Vec<AnswerPayload>,
}

pub fn evaluate(
    classifier: &Classifier,
    payloads: &[AnswerPayload],
    strict: bool,
) -> Result<EvaluatedSubmission, AppError> {
    let mut answers = Vec::with_capacity(payloads.len());
    let mut positions = Vec::with_capacity(payloads.len());
    let mut malformed = Vec::new();

    for (position, payload) in payloads.iter().enumerate() {
        match payload.to_answer() {
            Some(answer) => {
                answers.push(answer);
                positions.push(position);
            }
            None => malformed.push(SkippedAnswer {
                position,
                question_id: payload.question_id,
                reason: SkipReason::Malformed,
            }),
        }
    }

    let mut classification = if strict {
        if !malformed.is_empty() {
            return Err(unresolved(malformed));
        }
        classifier.classify_strict(&answers).map_err(|e| match e {
            ScoringError::Unresolved { skipped, .. } => {
                unresolved(remap_positions(skipped, &positions))
            }
        })?
    } else {
        classifier.classify_detailed(&answers)
    };

    let mut skipped = malformed;
    skipped.extend(remap_positions(
        std::mem::take(&mut classification.skipped),
        &positions,
    ));
    skipped.sort_by_key(|s| s.position);
    for s in &skipped {
        warn!(
            "Skipped answer #{} (question {:?}) against catalog {}: {:?}",
            s.position,
            s.question_id,
            classifier.catalog().revision(),
            s.reason
        );
    }
    classification.skipped = skipped;

    // One stored slot per submitted item, so skip positions index the stored list.
    let mut pinned = payloads.to_vec();
    for (answer, &position) in classifier.pin(&answers).iter().zip(&positions) {
        pinned[position] = AnswerPayload::from(answer);
    }

    Ok(EvaluatedSubmission {
        classification,
        pinned,
    })
}

fn remap_positions(skipped: Vec<SkippedAnswer>, positions: &[usize]) -> Vec<SkippedAnswer> {
    skipped
        .into_iter()
        .map(|s| SkippedAnswer {
            position: positions[s.position],
            ..s
        })
        .collect()
}

fn unresolved(skipped: Vec<SkippedAnswer>) -> AppError {
    AppError::UnprocessableEntity(
        serde_json::json!({ "skipped": skipped }).to_string(),
    )
}
