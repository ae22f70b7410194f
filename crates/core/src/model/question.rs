use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::activity::InteractionRecord;

/// Per-question response data for one activity.
///
/// Opaque to the report: whatever the provider builds is forwarded to the
/// client untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionData(Value);

impl QuestionData {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Payload used when an activity has no tracked interactions.
    #[must_use]
    pub fn empty() -> Self {
        Self(Value::Array(Vec::new()))
    }

    /// Wrap a list of question tallies.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if a tally cannot be represented as JSON.
    pub fn from_summaries(summaries: &[QuestionSummary]) -> Result<Self, serde_json::Error> {
        serde_json::to_value(summaries).map(Self)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTally {
    pub response: String,
    pub count: u32,
    pub correct: bool,
}

/// How learners answered a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub question_id: String,
    pub description: String,
    pub answered: u32,
    pub correct: u32,
    pub responses: Vec<ResponseTally>,
}

/// Group interactions by question and count identical responses.
///
/// Questions come out ordered by id and responses by text. The description is
/// taken from the first interaction that carries a non-empty one. A response
/// is marked correct if any learner giving it was marked correct.
#[must_use]
pub fn tally_interactions(interactions: &[InteractionRecord]) -> Vec<QuestionSummary> {
    #[derive(Default)]
    struct Acc {
        description: String,
        answered: u32,
        correct: u32,
        responses: BTreeMap<String, (u32, bool)>,
    }

    let mut questions: BTreeMap<&str, Acc> = BTreeMap::new();
    for interaction in interactions {
        let acc = questions.entry(interaction.question_id.as_str()).or_default();
        if acc.description.is_empty() && !interaction.description.is_empty() {
            acc.description.clone_from(&interaction.description);
        }
        acc.answered += 1;
        if interaction.correct {
            acc.correct += 1;
        }
        let slot = acc
            .responses
            .entry(interaction.response.clone())
            .or_insert((0, false));
        slot.0 += 1;
        slot.1 |= interaction.correct;
    }

    questions
        .into_iter()
        .map(|(question_id, acc)| QuestionSummary {
            question_id: question_id.to_string(),
            description: acc.description,
            answered: acc.answered,
            correct: acc.correct,
            responses: acc
                .responses
                .into_iter()
                .map(|(response, (count, correct))| ResponseTally {
                    response,
                    count,
                    correct,
                })
                .collect(),
        })
        .collect()
}
