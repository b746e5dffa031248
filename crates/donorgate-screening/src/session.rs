use donorgate_audit::events::{action, AuditEvent};
use donorgate_core::config::UncertainPolicy;
use donorgate_core::domain::{AnswerValue, Sex};
use donorgate_core::models::draft::{ScreeningDraft, DRAFT_VERSION};
use donorgate_storage::DraftStore;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ScreeningError;
use crate::question::{Question, ScreeningAnswers};
use crate::verdict::{evaluate, Evaluation, Verdict};
use crate::Questionnaire;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export)]
pub enum SessionState {
    /// Waiting for the answer to the question at `index` (0-based).
    InProgress { index: usize },
    Finished { evaluation: Evaluation },
}

/// One respondent's walk through a questionnaire.
///
/// ```text
/// in_progress(i) --answer, not decisive--> in_progress(i + 1)
/// in_progress(i) --answer, decisive------> finished(verdict)
/// in_progress(i) --back------------------> in_progress(max(i - 1, 0))
/// any            --restart---------------> in_progress(0)
/// ```
#[derive(Debug, Clone)]
pub struct ScreeningSession<Q: Questionnaire> {
    questionnaire: Q,
    policy: UncertainPolicy,
    respondent_sex: Option<Sex>,
    answers: ScreeningAnswers,
    state: SessionState,
    /// Set while [`ScreeningSession::restore`] replays a draft.
    replaying: bool,
    /// The verdict was reached by replaying a draft, not by a new answer.
    verdict_restored: bool,
}

impl<Q: Questionnaire> ScreeningSession<Q> {
    pub fn new(questionnaire: Q) -> Self {
        Self {
            questionnaire,
            policy: UncertainPolicy::default(),
            respondent_sex: None,
            answers: ScreeningAnswers::new(),
            state: SessionState::InProgress { index: 0 },
            replaying: false,
            verdict_restored: false,
        }
    }

    pub fn with_policy(mut self, policy: UncertainPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Questions that do not apply to `sex` are answered "not applicable"
    /// automatically and never shown.
    pub fn with_respondent_sex(mut self, sex: Sex) -> Self {
        self.respondent_sex = Some(sex);
        self.skip_inapplicable();
        self
    }

    pub fn questionnaire(&self) -> &Q {
        &self.questionnaire
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn answers(&self) -> &ScreeningAnswers {
        &self.answers
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::InProgress { index } => Some(index),
            SessionState::Finished { .. } => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index()
            .and_then(|index| self.questionnaire.questions().get(index))
    }

    pub fn evaluation(&self) -> Option<Evaluation> {
        match self.state {
            SessionState::Finished { evaluation } => Some(evaluation),
            SessionState::InProgress { .. } => None,
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.evaluation().map(|e| e.verdict)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished { .. })
    }

    /// Whether the verdict came out of a resumed draft rather than an
    /// answer given in this session.
    pub fn is_verdict_restored(&self) -> bool {
        self.is_finished() && self.verdict_restored
    }

    /// Answer the current question.
    ///
    /// Re-sending the answer already recorded for an earlier question is a
    /// no-op, so a double-submitted click cannot skip a question. This holds
    /// after the verdict too: repeating the deciding answer returns the
    /// finished state unchanged.
    pub fn answer(
        &mut self,
        question_id: u8,
        value: AnswerValue,
    ) -> Result<SessionState, ScreeningError> {
        let SessionState::InProgress { index } = self.state else {
            if self.answers.get(question_id) == Some(value) {
                return Ok(self.state);
            }
            return Err(ScreeningError::SessionFinished);
        };
        let questions = self.questionnaire.questions();
        let current = questions
            .get(index)
            .ok_or(ScreeningError::UnknownQuestion(question_id))?;

        if current.id != question_id {
            let position = questions
                .iter()
                .position(|q| q.id == question_id)
                .ok_or(ScreeningError::UnknownQuestion(question_id))?;
            if position < index && self.answers.get(question_id) == Some(value) {
                return Ok(self.state);
            }
            return Err(ScreeningError::NotCurrentQuestion {
                expected: current.id,
                got: question_id,
            });
        }

        self.questionnaire.validate_answer(question_id, value)?;
        self.record(index, value);
        Ok(self.state)
    }

    /// Step back one question. Returns whether the index moved; a finished
    /// session stays finished (use [`ScreeningSession::restart`]).
    pub fn back(&mut self) -> bool {
        let SessionState::InProgress { index } = self.state else {
            return false;
        };
        let questions = self.questionnaire.questions();
        let mut target = index;
        while target > 0 {
            target -= 1;
            if questions[target].applies_to(self.respondent_sex) {
                self.state = SessionState::InProgress { index: target };
                return true;
            }
        }
        false
    }

    /// Forget every answer and start again at the first question.
    pub fn restart(&mut self) {
        self.answers.clear();
        self.verdict_restored = false;
        self.state = SessionState::InProgress { index: 0 };
        self.skip_inapplicable();
    }

    /// Store `value` for the question at `index` and move on.
    fn record(&mut self, index: usize, value: AnswerValue) {
        let questions = self.questionnaire.questions();
        let question_id = questions[index].id;
        self.answers.insert(question_id, value);

        let is_last = index + 1 == questions.len();
        if value != AnswerValue::Affirmative && !is_last {
            self.state = SessionState::InProgress { index: index + 1 };
            self.skip_inapplicable();
            return;
        }

        match evaluate(questions, &self.answers, self.policy) {
            Some(evaluation) => self.finish(evaluation),
            None => {
                // Only reachable when earlier answers went missing (e.g. a
                // partially restored draft): go back to the first gap.
                let gap = questions
                    .iter()
                    .position(|q| self.answers.get(q.id).is_none())
                    .unwrap_or(0);
                self.state = SessionState::InProgress { index: gap };
            }
        }
    }

    fn skip_inapplicable(&mut self) {
        while let SessionState::InProgress { index } = self.state {
            let Some(question) = self.questionnaire.questions().get(index) else {
                return;
            };
            if question.applies_to(self.respondent_sex)
                || !question.accepts(AnswerValue::NotApplicable)
            {
                return;
            }
            tracing::debug!(question_id = question.id, "skipping question for respondent");
            self.record(index, AnswerValue::NotApplicable);
        }
    }

    fn finish(&mut self, evaluation: Evaluation) {
        self.state = SessionState::Finished { evaluation };
        self.verdict_restored = self.replaying;
        tracing::info!(
            questionnaire = self.questionnaire.id(),
            verdict = ?evaluation.verdict,
            decided_by = evaluation.decided_by,
            restored = self.verdict_restored,
            "screening finished"
        );
        AuditEvent::new(action::SCREENING_VERDICT, "screening", self.questionnaire.id())
            .with_details(serde_json::json!({
                "verdict": evaluation.verdict,
                "decided_by": evaluation.decided_by,
                "restored": self.verdict_restored,
            }))
            .emit();
    }

    /// Snapshot for draft persistence. `None` once finished.
    pub fn to_draft(&self) -> Option<ScreeningDraft> {
        let index = self.current_index()?;
        Some(ScreeningDraft {
            version: DRAFT_VERSION,
            questionnaire_id: self.questionnaire.id().to_string(),
            current_index: index,
            answers: self.answers.to_codes(),
            saved_at: jiff::Timestamp::now(),
        })
    }

    /// Rebuild progress from a draft by replaying its answers in order.
    ///
    /// Anything unusable (other questionnaire, other schema version, codes
    /// outside a question's options) is dropped; in the worst case the
    /// session simply starts at the first question.
    pub fn restore(mut self, draft: ScreeningDraft) -> Self {
        self.restart();
        if draft.version != DRAFT_VERSION {
            tracing::warn!(version = draft.version, "ignoring draft with unknown version");
            return self;
        }
        if draft.questionnaire_id != self.questionnaire.id() {
            tracing::warn!(
                draft = %draft.questionnaire_id,
                questionnaire = self.questionnaire.id(),
                "ignoring draft for another questionnaire"
            );
            return self;
        }

        let saved = self.questionnaire.parse_answers(&draft.answers);
        let ids: Vec<u8> = self.questionnaire.questions().iter().map(|q| q.id).collect();
        let target = draft.current_index.min(ids.len().saturating_sub(1));

        self.replaying = true;
        while let SessionState::InProgress { index } = self.state {
            if index >= target {
                break;
            }
            let Some(value) = saved.get(ids[index]) else {
                break;
            };
            let stalled = self.answer(ids[index], value).is_err()
                || self.state == (SessionState::InProgress { index });
            if stalled {
                break;
            }
        }
        self.replaying = false;

        // Keep answers past the resume point as pre-filled choices.
        if let SessionState::InProgress { index } = self.state {
            for id in &ids[index..] {
                if let Some(value) = saved.get(*id) {
                    self.answers.insert(*id, value);
                }
            }
        }
        self
    }

    /// Pick up saved progress, or start fresh if there is none.
    pub fn resume(self, drafts: &DraftStore) -> Self {
        match drafts.load::<ScreeningDraft>() {
            Some(draft) => self.restore(draft),
            None => self,
        }
    }

    /// Save progress while in progress; drop the draft once finished.
    pub fn persist(&self, drafts: &DraftStore) {
        match self.to_draft() {
            Some(draft) => drafts.save(&draft),
            None => drafts.clear(),
        }
    }
}
