use thiserror::Error;

use crate::question::ValidationError;

#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("unknown questionnaire: {0}")]
    UnknownQuestionnaire(String),

    #[error("unknown question: {0}")]
    UnknownQuestion(u8),

    #[error("question {got} answered while question {expected} is current")]
    NotCurrentQuestion { expected: u8, got: u8 },

    #[error("screening session already has a verdict")]
    SessionFinished,

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}
