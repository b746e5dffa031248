use donorgate_core::config::UncertainPolicy;
use donorgate_core::domain::AnswerValue;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::question::{Question, ScreeningAnswers};
use crate::Questionnaire;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Verdict {
    Eligible,
    Ineligible,
    NeedsConsultation,
}

/// A verdict and the question that settled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub decided_by: u8,
}

impl Evaluation {
    fn new(verdict: Verdict, decided_by: u8) -> Self {
        Self {
            verdict,
            decided_by,
        }
    }
}

/// Reduce an answer set to a verdict, walking questions in order.
///
/// Every question but the last is a general-health question: the first
/// "yes" among them is disqualifying and nothing after it is looked at.
/// The last question is audience-restricted; skipping it counts as
/// not-applicable.
///
/// Returns `None` while a general question is unanswered and no earlier
/// answer settled the outcome. Answers a question does not offer are ignored.
pub fn evaluate(
    questions: &[Question],
    answers: &ScreeningAnswers,
    policy: UncertainPolicy,
) -> Option<Evaluation> {
    let (last, general) = questions.split_last()?;
    let answer_for = |question: &Question| {
        answers
            .get(question.id)
            .filter(|value| question.accepts(*value))
    };

    let mut first_uncertain = None;
    for question in general {
        match answer_for(question)? {
            AnswerValue::Affirmative => {
                return Some(Evaluation::new(Verdict::Ineligible, question.id));
            }
            AnswerValue::Uncertain => {
                first_uncertain.get_or_insert(question.id);
            }
            AnswerValue::Negative | AnswerValue::NotApplicable => {}
        }
    }

    let final_answer = match answer_for(last) {
        Some(value) => value,
        None if last.accepts(AnswerValue::NotApplicable) => AnswerValue::NotApplicable,
        None => return None,
    };

    let evaluation = match final_answer {
        AnswerValue::Affirmative => Evaluation::new(Verdict::Ineligible, last.id),
        AnswerValue::Uncertain => Evaluation::new(Verdict::NeedsConsultation, last.id),
        AnswerValue::Negative | AnswerValue::NotApplicable => match (policy, first_uncertain) {
            (UncertainPolicy::Consult, Some(id)) => Evaluation::new(Verdict::NeedsConsultation, id),
            _ => Evaluation::new(Verdict::Eligible, last.id),
        },
    };
    Some(evaluation)
}

/// Verdict under the default policy. `None` while the outcome is still open.
pub fn evaluate_screening(
    questionnaire: &dyn Questionnaire,
    answers: &ScreeningAnswers,
) -> Option<Verdict> {
    evaluate(questionnaire.questions(), answers, UncertainPolicy::default()).map(|e| e.verdict)
}
