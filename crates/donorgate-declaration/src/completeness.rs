use donorgate_core::domain::{TriState, YesNo};
use donorgate_core::models::declaration::HealthDeclarationForm;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A requirement the form can fail. Reported to the UI so it can point at
/// the unanswered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DeclarationField {
    HasDonatedBefore,
    HasCurrentDisease,
    CurrentDiseaseDetails,
    PriorSeriousDisease,
    PriorSeriousDiseaseDetails,
    LastMonth,
    #[serde(rename = "last_14_days")]
    Last14Days,
    #[serde(rename = "last_14_days_details")]
    Last14DaysDetails,
    #[serde(rename = "last_7_days")]
    Last7Days,
    #[serde(rename = "last_7_days_details")]
    Last7DaysDetails,
}

impl DeclarationField {
    /// Every requirement, in form order. The multi-select blocks and the
    /// women-specific question are deliberately absent: leaving them empty
    /// means "nothing applies".
    pub const REQUIRED: [DeclarationField; 10] = [
        DeclarationField::HasDonatedBefore,
        DeclarationField::HasCurrentDisease,
        DeclarationField::CurrentDiseaseDetails,
        DeclarationField::PriorSeriousDisease,
        DeclarationField::PriorSeriousDiseaseDetails,
        DeclarationField::LastMonth,
        DeclarationField::Last14Days,
        DeclarationField::Last14DaysDetails,
        DeclarationField::Last7Days,
        DeclarationField::Last7DaysDetails,
    ];

    pub fn is_satisfied_by(self, form: &HealthDeclarationForm) -> bool {
        match self {
            DeclarationField::HasDonatedBefore => form.has_donated_before.is_some(),
            DeclarationField::HasCurrentDisease => form.has_current_disease.is_some(),
            DeclarationField::CurrentDiseaseDetails => {
                form.has_current_disease != Some(YesNo::Yes)
                    || has_text(&form.current_disease_details)
            }
            DeclarationField::PriorSeriousDisease => form.prior_serious_disease.is_some(),
            DeclarationField::PriorSeriousDiseaseDetails => {
                other_has_text(form.prior_serious_disease, &form.prior_serious_disease_details)
            }
            DeclarationField::LastMonth => form.last_month.is_some(),
            DeclarationField::Last14Days => form.last_14_days.is_some(),
            DeclarationField::Last14DaysDetails => {
                other_has_text(form.last_14_days, &form.last_14_days_details)
            }
            DeclarationField::Last7Days => form.last_7_days.is_some(),
            DeclarationField::Last7DaysDetails => {
                other_has_text(form.last_7_days, &form.last_7_days_details)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeclarationField::HasDonatedBefore => "Have you donated blood before?",
            DeclarationField::HasCurrentDisease => "Do you currently have any illness?",
            DeclarationField::CurrentDiseaseDetails => "Describe your current illness",
            DeclarationField::PriorSeriousDisease => "Have you ever had a serious disease?",
            DeclarationField::PriorSeriousDiseaseDetails => "Describe the disease",
            DeclarationField::LastMonth => "In the last month",
            DeclarationField::Last14Days => "In the last 14 days",
            DeclarationField::Last14DaysDetails => "Describe what happened in the last 14 days",
            DeclarationField::Last7Days => "In the last 7 days",
            DeclarationField::Last7DaysDetails => "Describe what happened in the last 7 days",
        }
    }
}

fn has_text(text: &str) -> bool {
    !text.trim().is_empty()
}

fn other_has_text(answer: Option<TriState>, details: &str) -> bool {
    answer != Some(TriState::Other) || has_text(details)
}

/// Unmet requirements in form order, evaluated lazily.
pub fn unmet_requirements(
    form: &HealthDeclarationForm,
) -> impl Iterator<Item = DeclarationField> + '_ {
    DeclarationField::REQUIRED
        .into_iter()
        .filter(move |field| !field.is_satisfied_by(form))
}

pub fn missing_fields(form: &HealthDeclarationForm) -> Vec<DeclarationField> {
    unmet_requirements(form).collect()
}

pub fn first_missing_field(form: &HealthDeclarationForm) -> Option<DeclarationField> {
    unmet_requirements(form).next()
}

/// Whether the form is well-formed enough to submit. Risk factors never make
/// a form incomplete.
pub fn is_declaration_complete(form: &HealthDeclarationForm) -> bool {
    first_missing_field(form).is_none()
}
