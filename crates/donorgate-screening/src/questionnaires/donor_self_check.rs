use donorgate_core::domain::AnswerValue;

use crate::question::{Audience, Question, QuestionOption};
use crate::Questionnaire;

/// Donor self-check: six quick questions shown before a donor books.
/// Questions 1–5 are general health; question 6 applies to women only.
#[derive(Debug, Clone, Copy, Default)]
pub struct DonorSelfCheck;

pub const ID: &str = "donor_self_check";

impl Questionnaire for DonorSelfCheck {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        "Donor self-check"
    }

    fn questions(&self) -> &[Question] {
        static QUESTIONS: std::sync::LazyLock<Vec<Question>> = std::sync::LazyLock::new(|| {
            let general = [
                (
                    "Have you ever been diagnosed with hepatitis B or C, HIV, syphilis or another blood-borne infection?",
                    None,
                ),
                (
                    "In the last 12 months, have you had surgery, a tattoo, a piercing or a blood transfusion?",
                    None,
                ),
                (
                    "Are you currently ill, under medical treatment, or taking antibiotics?",
                    None,
                ),
                (
                    "In the last 14 days, have you had a fever, cough, sore throat or other flu-like symptoms?",
                    None,
                ),
                (
                    "Have you donated whole blood in the last 12 weeks?",
                    Some("Platelet and plasma donations do not count."),
                ),
            ];

            let mut questions: Vec<Question> = general
                .iter()
                .zip(1u8..)
                .map(|((prompt, help), id)| Question {
                    id,
                    prompt: prompt.to_string(),
                    options: options(&[
                        ("Yes", AnswerValue::Affirmative),
                        ("No", AnswerValue::Negative),
                        ("Not sure", AnswerValue::Uncertain),
                    ]),
                    audience: Audience::Everyone,
                    help: help.map(str::to_string),
                })
                .collect();

            questions.push(Question {
                id: 6,
                prompt: "Are you pregnant or breastfeeding, or have you given birth or ended a pregnancy in the last 12 months?".to_string(),
                options: options(&[
                    ("Yes", AnswerValue::Affirmative),
                    ("No", AnswerValue::Negative),
                    ("Not sure", AnswerValue::Uncertain),
                    ("Not applicable", AnswerValue::NotApplicable),
                ]),
                audience: Audience::Women,
                help: None,
            });

            questions
        });
        &QUESTIONS
    }
}

fn options(items: &[(&str, AnswerValue)]) -> Vec<QuestionOption> {
    items
        .iter()
        .map(|(label, value)| QuestionOption {
            label: label.to_string(),
            value: *value,
        })
        .collect()
}
