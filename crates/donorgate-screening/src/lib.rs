//! donorgate-screening
//!
//! The anonymous donor self-check: questionnaire definitions, the verdict
//! evaluator and the session state machine that walks a respondent through
//! the questions one at a time. No I/O apart from best-effort drafts.

pub mod error;
pub mod question;
pub mod questionnaires;
pub mod session;
pub mod verdict;

use std::collections::BTreeMap;

use donorgate_core::domain::{AnswerDomain, AnswerValue};

use error::ScreeningError;
use question::{Question, ScreeningAnswers, ValidationError};

pub use session::{ScreeningSession, SessionState};
pub use verdict::{evaluate, evaluate_screening, Evaluation, Verdict};

/// Trait implemented by each screening questionnaire.
///
/// The last question is the final, audience-restricted one; every earlier
/// question is a general-health question.
pub trait Questionnaire: Send + Sync {
    /// Unique identifier (e.g., "donor_self_check").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Questions in the order they are asked.
    fn questions(&self) -> &[Question];

    fn question(&self, id: u8) -> Option<&Question> {
        self.questions().iter().find(|q| q.id == id)
    }

    /// Check one answer against the question's options.
    fn validate_answer(&self, question_id: u8, value: AnswerValue) -> Result<(), ValidationError> {
        match self.question(question_id) {
            Some(question) if question.accepts(value) => Ok(()),
            Some(question) => Err(ValidationError {
                question_id,
                value: value.code().to_string(),
                expected: question.accepted_values(),
                message: format!(
                    "{}: question {} does not offer '{}'",
                    self.name(),
                    question_id,
                    value
                ),
            }),
            None => Err(ValidationError {
                question_id,
                value: value.code().to_string(),
                expected: Vec::new(),
                message: format!("{}: no question {}", self.name(), question_id),
            }),
        }
    }

    /// Validate a full answer set against this questionnaire.
    fn validate_answers(&self, answers: &ScreeningAnswers) -> Vec<ValidationError> {
        answers
            .iter()
            .filter_map(|(id, value)| self.validate_answer(id, value).err())
            .collect()
    }

    /// Turn raw stored codes back into answers. Unknown questions, unknown
    /// codes and values a question does not offer are dropped.
    fn parse_answers(&self, raw: &BTreeMap<u8, String>) -> ScreeningAnswers {
        raw.iter()
            .filter_map(|(id, code)| {
                let Some(value) = AnswerValue::from_code(code) else {
                    tracing::warn!(question_id = id, code = %code, "dropping unknown answer code");
                    return None;
                };
                match self.validate_answer(*id, value) {
                    Ok(()) => Some((*id, value)),
                    Err(e) => {
                        tracing::warn!(question_id = id, error = %e, "dropping stored answer");
                        None
                    }
                }
            })
            .collect()
    }
}

impl<T: Questionnaire + ?Sized> Questionnaire for Box<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn questions(&self) -> &[Question] {
        (**self).questions()
    }
}

/// Return all registered questionnaires.
pub fn all_questionnaires() -> Vec<Box<dyn Questionnaire>> {
    vec![Box::new(questionnaires::donor_self_check::DonorSelfCheck)]
}

/// Look up a questionnaire by ID.
pub fn get_questionnaire(id: &str) -> Option<Box<dyn Questionnaire>> {
    all_questionnaires().into_iter().find(|q| q.id() == id)
}

pub fn require_questionnaire(id: &str) -> Result<Box<dyn Questionnaire>, ScreeningError> {
    get_questionnaire(id).ok_or_else(|| ScreeningError::UnknownQuestionnaire(id.to_string()))
}
