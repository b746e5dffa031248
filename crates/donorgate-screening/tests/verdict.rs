use donorgate_core::config::UncertainPolicy;
use donorgate_core::domain::AnswerValue::{self, *};
use donorgate_screening::question::ScreeningAnswers;
use donorgate_screening::questionnaires::donor_self_check::DonorSelfCheck;
use donorgate_screening::{evaluate, evaluate_screening, Questionnaire, Verdict};

const GENERAL: [AnswerValue; 3] = [Affirmative, Negative, Uncertain];
const FINAL: [AnswerValue; 4] = [Affirmative, Negative, Uncertain, NotApplicable];

fn answers(values: &[AnswerValue]) -> ScreeningAnswers {
    values.iter().copied().zip(1u8..).map(|(v, id)| (id, v)).collect()
}

/// Every combination of answers to the five general questions.
fn general_sequences() -> Vec<Vec<AnswerValue>> {
    let mut sequences = vec![Vec::new()];
    for _ in 0..5 {
        sequences = sequences
            .into_iter()
            .flat_map(|seq| {
                GENERAL.into_iter().map(move |v| {
                    let mut next = seq.clone();
                    next.push(v);
                    next
                })
            })
            .collect();
    }
    sequences
}

#[test]
fn scenario_a_all_negative_and_not_applicable_is_eligible() {
    let a = answers(&[Negative, Negative, Negative, Negative, Negative, NotApplicable]);
    assert_eq!(evaluate_screening(&DonorSelfCheck, &a), Some(Verdict::Eligible));
}

#[test]
fn scenario_b_first_question_yes_is_ineligible_regardless_of_rest() {
    for tail in general_sequences() {
        for last in FINAL {
            let mut values = vec![Affirmative];
            values.extend_from_slice(&tail[..4]);
            values.push(last);
            let evaluation =
                evaluate(DonorSelfCheck.questions(), &answers(&values), UncertainPolicy::PassThrough)
                    .unwrap();
            assert_eq!(evaluation.verdict, Verdict::Ineligible);
            assert_eq!(evaluation.decided_by, 1);
        }
    }
}

#[test]
fn scenario_c_final_unsure_needs_consultation() {
    let c = answers(&[Negative, Negative, Negative, Negative, Negative, Uncertain]);
    assert_eq!(evaluate_screening(&DonorSelfCheck, &c), Some(Verdict::NeedsConsultation));
}

#[test]
fn later_answers_never_change_an_early_exit() {
    for seq in general_sequences() {
        let Some(first_yes) = seq.iter().position(|v| *v == Affirmative) else {
            continue;
        };
        for last in FINAL {
            let mut values = seq.clone();
            values.push(last);
            let evaluation =
                evaluate(DonorSelfCheck.questions(), &answers(&values), UncertainPolicy::PassThrough)
                    .unwrap();
            assert_eq!(evaluation.verdict, Verdict::Ineligible, "{values:?}");
            assert_eq!(evaluation.decided_by as usize, first_yes + 1);
        }
    }
}

#[test]
fn no_or_unsure_then_not_applicable_is_always_eligible() {
    for seq in general_sequences() {
        if seq.contains(&Affirmative) {
            continue;
        }
        let mut values = seq.clone();
        values.push(NotApplicable);
        assert_eq!(
            evaluate_screening(&DonorSelfCheck, &answers(&values)),
            Some(Verdict::Eligible),
            "{values:?}"
        );
    }
}

#[test]
fn final_question_decides_when_general_questions_pass() {
    let base = [Negative, Uncertain, Negative, Negative, Uncertain];
    let expected = [
        (Affirmative, Verdict::Ineligible),
        (Negative, Verdict::Eligible),
        (Uncertain, Verdict::NeedsConsultation),
        (NotApplicable, Verdict::Eligible),
    ];
    for (last, verdict) in expected {
        let mut values = base.to_vec();
        values.push(last);
        assert_eq!(evaluate_screening(&DonorSelfCheck, &answers(&values)), Some(verdict));
    }
}

#[test]
fn skipped_final_question_counts_as_not_applicable() {
    let a = answers(&[Negative, Negative, Negative, Negative, Negative]);
    assert_eq!(evaluate_screening(&DonorSelfCheck, &a), Some(Verdict::Eligible));
}

#[test]
fn unanswered_general_question_leaves_outcome_open() {
    let mut partial = answers(&[Negative, Negative]);
    assert_eq!(evaluate_screening(&DonorSelfCheck, &partial), None);

    partial.insert(4, Affirmative);
    assert_eq!(evaluate_screening(&DonorSelfCheck, &partial), None);

    assert_eq!(evaluate_screening(&DonorSelfCheck, &ScreeningAnswers::new()), None);
}

#[test]
fn answers_outside_a_questions_options_are_ignored() {
    // Question 1 does not offer "not applicable".
    let values = answers(&[NotApplicable, Negative, Negative, Negative, Negative, Negative]);
    assert_eq!(evaluate_screening(&DonorSelfCheck, &values), None);
}

#[test]
fn evaluation_is_idempotent() {
    let values = answers(&[Uncertain, Negative, Negative, Uncertain, Negative, Uncertain]);
    let first = evaluate(DonorSelfCheck.questions(), &values, UncertainPolicy::PassThrough);
    let second = evaluate(DonorSelfCheck.questions(), &values, UncertainPolicy::PassThrough);
    assert_eq!(first, second);
}

#[test]
fn consult_policy_routes_early_unsure_to_consultation() {
    let values = answers(&[Negative, Negative, Uncertain, Negative, Negative, Negative]);
    let pass = evaluate(DonorSelfCheck.questions(), &values, UncertainPolicy::PassThrough).unwrap();
    assert_eq!(pass.verdict, Verdict::Eligible);

    let consult = evaluate(DonorSelfCheck.questions(), &values, UncertainPolicy::Consult).unwrap();
    assert_eq!(consult.verdict, Verdict::NeedsConsultation);
    assert_eq!(consult.decided_by, 3);
}

#[test]
fn consult_policy_keeps_early_exit_and_final_yes() {
    let early = answers(&[Uncertain, Affirmative]);
    let evaluation = evaluate(DonorSelfCheck.questions(), &early, UncertainPolicy::Consult).unwrap();
    assert_eq!(evaluation.verdict, Verdict::Ineligible);

    let final_yes = answers(&[Uncertain, Negative, Negative, Negative, Negative, Affirmative]);
    let evaluation =
        evaluate(DonorSelfCheck.questions(), &final_yes, UncertainPolicy::Consult).unwrap();
    assert_eq!(evaluation.verdict, Verdict::Ineligible);
}

#[test]
fn empty_questionnaire_has_no_verdict() {
    assert_eq!(evaluate(&[], &ScreeningAnswers::new(), UncertainPolicy::PassThrough), None);
}
