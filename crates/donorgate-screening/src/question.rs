use std::collections::BTreeMap;

use donorgate_core::domain::{AnswerDomain, AnswerValue, Sex};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Who a question is asked of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Audience {
    Everyone,
    Women,
}

/// One selectable answer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionOption {
    pub label: String,
    pub value: AnswerValue,
}

/// A screening question. Defined once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    /// 1-based ordinal.
    pub id: u8,
    pub prompt: String,
    pub options: Vec<QuestionOption>,
    pub audience: Audience,
    pub help: Option<String>,
}

impl Question {
    /// Whether `value` is one of this question's options.
    pub fn accepts(&self, value: AnswerValue) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Whether the question should be put to a respondent. Unknown sex means yes.
    pub fn applies_to(&self, sex: Option<Sex>) -> bool {
        match self.audience {
            Audience::Everyone => true,
            Audience::Women => sex != Some(Sex::Male),
        }
    }

    pub fn accepted_values(&self) -> Vec<AnswerValue> {
        self.options.iter().map(|o| o.value).collect()
    }
}

/// Answers keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ScreeningAnswers(BTreeMap<u8, AnswerValue>);

impl ScreeningAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: u8) -> Option<AnswerValue> {
        self.0.get(&question_id).copied()
    }

    /// Record an answer, replacing any earlier one for the same question.
    pub fn insert(&mut self, question_id: u8, value: AnswerValue) {
        self.0.insert(question_id, value);
    }

    pub fn remove(&mut self, question_id: u8) -> Option<AnswerValue> {
        self.0.remove(&question_id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, AnswerValue)> + '_ {
        self.0.iter().map(|(id, value)| (*id, *value))
    }

    /// Raw codes, as stored in drafts.
    pub fn to_codes(&self) -> BTreeMap<u8, String> {
        self.iter()
            .map(|(id, value)| (id, value.code().to_string()))
            .collect()
    }
}

impl FromIterator<(u8, AnswerValue)> for ScreeningAnswers {
    fn from_iter<I: IntoIterator<Item = (u8, AnswerValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub question_id: u8,
    /// The rejected answer code.
    pub value: String,
    /// What the question accepts. Empty when the question does not exist.
    pub expected: Vec<AnswerValue>,
    pub message: String,
}
