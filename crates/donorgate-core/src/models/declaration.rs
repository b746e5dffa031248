use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::{lenient, lenient_flag, lenient_text, TriState, WomenStatus, YesNo};

/// The health declaration a donor completes before an appointment is accepted.
///
/// Every answer starts out unanswered. Deserialization is lenient: values
/// outside a field's domain come back as unanswered instead of failing the
/// whole form, so a stale draft never blocks the donor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct HealthDeclarationForm {
    #[serde(deserialize_with = "lenient")]
    pub has_donated_before: Option<YesNo>,

    #[serde(deserialize_with = "lenient")]
    pub has_current_disease: Option<YesNo>,
    #[serde(deserialize_with = "lenient_text")]
    pub current_disease_details: String,

    /// Hepatitis B/C, HIV, cirrhosis, cancer, epilepsy, heart disease and similar.
    #[serde(deserialize_with = "lenient")]
    pub prior_serious_disease: Option<TriState>,
    #[serde(deserialize_with = "lenient_text")]
    pub prior_serious_disease_details: String,

    pub last_12_months: Last12Months,
    pub last_6_months: Last6Months,

    /// Recovered from a urinary, skin or respiratory infection, measles,
    /// dengue and similar, or travelled to an epidemic area.
    #[serde(deserialize_with = "lenient")]
    pub last_month: Option<YesNo>,

    /// Flu, cold, cough, headache, fever or sore throat.
    #[serde(deserialize_with = "lenient")]
    pub last_14_days: Option<TriState>,
    #[serde(deserialize_with = "lenient_text")]
    pub last_14_days_details: String,

    /// Antibiotics, anti-inflammatories, aspirin or corticosteroids.
    #[serde(deserialize_with = "lenient")]
    pub last_7_days: Option<TriState>,
    #[serde(deserialize_with = "lenient_text")]
    pub last_7_days_details: String,

    #[serde(deserialize_with = "lenient")]
    pub women_status: Option<WomenStatus>,
}

/// A group of independent sub-flags plus a mutually exclusive "none of the above".
///
/// The empty block (nothing selected) means "none of the above" without
/// the flag having been set explicitly.
pub trait MultiSelect: Clone {
    type Flag: Copy + Eq + std::fmt::Debug + 'static;

    /// The "none of the above" flag.
    const NONE: Self::Flag;

    /// Every flag except [`MultiSelect::NONE`].
    fn options() -> &'static [Self::Flag];

    fn is_selected(&self, flag: Self::Flag) -> bool;

    /// Raw write of one flag. Does not maintain exclusivity.
    fn set(&mut self, flag: Self::Flag, selected: bool);

    fn any_option_selected(&self) -> bool {
        Self::options().iter().any(|flag| self.is_selected(*flag))
    }

    /// Whether "none of the above" holds, explicitly or because nothing is selected.
    fn effective_none(&self) -> bool {
        self.is_selected(Self::NONE) || !self.any_option_selected()
    }
}

answer_domain! {
    /// Sub-flags of the "last 12 months" block.
    Last12MonthsFlag as "last_12_months" {
        /// Malaria, syphilis, tuberculosis, encephalitis, or surgery.
        RecoveredFromDisease => "recovered_from_disease",
        ReceivedTransfusion => "received_transfusion",
        ReceivedVaccine => "received_vaccine",
        NoneOfTheAbove => "none",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Last12Months {
    #[serde(deserialize_with = "lenient_flag")]
    pub recovered_from_disease: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub received_transfusion: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub received_vaccine: bool,
    /// Which vaccine. Cleared whenever `received_vaccine` is cleared.
    #[serde(deserialize_with = "lenient_text")]
    pub vaccine_details: String,
    #[serde(deserialize_with = "lenient_flag")]
    pub none: bool,
}

impl MultiSelect for Last12Months {
    type Flag = Last12MonthsFlag;

    const NONE: Last12MonthsFlag = Last12MonthsFlag::NoneOfTheAbove;

    fn options() -> &'static [Last12MonthsFlag] {
        &[
            Last12MonthsFlag::RecoveredFromDisease,
            Last12MonthsFlag::ReceivedTransfusion,
            Last12MonthsFlag::ReceivedVaccine,
        ]
    }

    fn is_selected(&self, flag: Last12MonthsFlag) -> bool {
        match flag {
            Last12MonthsFlag::RecoveredFromDisease => self.recovered_from_disease,
            Last12MonthsFlag::ReceivedTransfusion => self.received_transfusion,
            Last12MonthsFlag::ReceivedVaccine => self.received_vaccine,
            Last12MonthsFlag::NoneOfTheAbove => self.none,
        }
    }

    fn set(&mut self, flag: Last12MonthsFlag, selected: bool) {
        match flag {
            Last12MonthsFlag::RecoveredFromDisease => self.recovered_from_disease = selected,
            Last12MonthsFlag::ReceivedTransfusion => self.received_transfusion = selected,
            Last12MonthsFlag::ReceivedVaccine => {
                self.received_vaccine = selected;
                if !selected {
                    self.vaccine_details.clear();
                }
            }
            Last12MonthsFlag::NoneOfTheAbove => self.none = selected,
        }
    }
}

answer_domain! {
    /// Sub-flags of the "last 6 months" block.
    Last6MonthsFlag as "last_6_months" {
        /// Typhoid, septicaemia, snake bite, thrombophlebitis, pancreatitis, osteomyelitis.
        RecoveredFromSeriousInfection => "recovered_from_serious_infection",
        UnexplainedWeightLoss => "unexplained_weight_loss",
        PersistentSwollenLymphNodes => "persistent_swollen_lymph_nodes",
        /// Dental work, acupuncture, endoscopy and similar.
        InvasiveMedicalProcedure => "invasive_medical_procedure",
        TattooOrPiercing => "tattoo_or_piercing",
        DrugUse => "drug_use",
        ExposureToBloodOrNeedlestick => "exposure_to_blood_or_needlestick",
        LivesWithHepatitisBCarrier => "lives_with_hepatitis_b_carrier",
        SexualContactWithInfectedPerson => "sexual_contact_with_infected_person",
        SameSexSexualContact => "same_sex_sexual_contact",
        NoneOfTheAbove => "none",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Last6Months {
    #[serde(deserialize_with = "lenient_flag")]
    pub recovered_from_serious_infection: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub unexplained_weight_loss: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub persistent_swollen_lymph_nodes: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub invasive_medical_procedure: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub tattoo_or_piercing: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub drug_use: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub exposure_to_blood_or_needlestick: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub lives_with_hepatitis_b_carrier: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub sexual_contact_with_infected_person: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub same_sex_sexual_contact: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub none: bool,
}

impl MultiSelect for Last6Months {
    type Flag = Last6MonthsFlag;

    const NONE: Last6MonthsFlag = Last6MonthsFlag::NoneOfTheAbove;

    fn options() -> &'static [Last6MonthsFlag] {
        use Last6MonthsFlag::*;
        &[
            RecoveredFromSeriousInfection,
            UnexplainedWeightLoss,
            PersistentSwollenLymphNodes,
            InvasiveMedicalProcedure,
            TattooOrPiercing,
            DrugUse,
            ExposureToBloodOrNeedlestick,
            LivesWithHepatitisBCarrier,
            SexualContactWithInfectedPerson,
            SameSexSexualContact,
        ]
    }

    fn is_selected(&self, flag: Last6MonthsFlag) -> bool {
        use Last6MonthsFlag::*;
        match flag {
            RecoveredFromSeriousInfection => self.recovered_from_serious_infection,
            UnexplainedWeightLoss => self.unexplained_weight_loss,
            PersistentSwollenLymphNodes => self.persistent_swollen_lymph_nodes,
            InvasiveMedicalProcedure => self.invasive_medical_procedure,
            TattooOrPiercing => self.tattoo_or_piercing,
            DrugUse => self.drug_use,
            ExposureToBloodOrNeedlestick => self.exposure_to_blood_or_needlestick,
            LivesWithHepatitisBCarrier => self.lives_with_hepatitis_b_carrier,
            SexualContactWithInfectedPerson => self.sexual_contact_with_infected_person,
            SameSexSexualContact => self.same_sex_sexual_contact,
            NoneOfTheAbove => self.none,
        }
    }

    fn set(&mut self, flag: Last6MonthsFlag, selected: bool) {
        use Last6MonthsFlag::*;
        let slot = match flag {
            RecoveredFromSeriousInfection => &mut self.recovered_from_serious_infection,
            UnexplainedWeightLoss => &mut self.unexplained_weight_loss,
            PersistentSwollenLymphNodes => &mut self.persistent_swollen_lymph_nodes,
            InvasiveMedicalProcedure => &mut self.invasive_medical_procedure,
            TattooOrPiercing => &mut self.tattoo_or_piercing,
            DrugUse => &mut self.drug_use,
            ExposureToBloodOrNeedlestick => &mut self.exposure_to_blood_or_needlestick,
            LivesWithHepatitisBCarrier => &mut self.lives_with_hepatitis_b_carrier,
            SexualContactWithInfectedPerson => &mut self.sexual_contact_with_infected_person,
            SameSexSexualContact => &mut self.same_sex_sexual_contact,
            NoneOfTheAbove => &mut self.none,
        };
        *slot = selected;
    }
}
