use donorgate_core::models::declaration::{
    HealthDeclarationForm, Last12Months, Last12MonthsFlag, MultiSelect,
};

/// Apply one checkbox change to a multi-select block.
///
/// Selecting "none of the above" clears every other flag; selecting any other
/// flag clears "none of the above". Deselecting only touches the flag itself.
/// Applying the same change twice yields the same block.
pub fn apply_multi_select<B: MultiSelect>(block: B, flag: B::Flag, selected: bool) -> B {
    let mut next = block;
    if flag == B::NONE {
        if selected {
            for option in B::options() {
                next.set(*option, false);
            }
        }
        next.set(B::NONE, selected);
    } else {
        next.set(flag, selected);
        if selected {
            next.set(B::NONE, false);
        }
    }
    next
}

/// Repair a block that violates exclusivity (e.g. loaded from an old draft).
/// Selected risk flags win over a stale "none of the above".
pub fn normalize<B: MultiSelect>(block: B) -> B {
    if block.is_selected(B::NONE) && block.any_option_selected() {
        tracing::debug!("clearing 'none' on a block with selected options");
        let mut next = block;
        next.set(B::NONE, false);
        return next;
    }
    block
}

/// Set the vaccine name. Non-empty text also ticks "received vaccine".
pub fn with_vaccine_details(block: Last12Months, details: &str) -> Last12Months {
    let details = details.trim();
    if details.is_empty() {
        let mut next = block;
        next.vaccine_details.clear();
        return next;
    }
    let mut next = apply_multi_select(block, Last12MonthsFlag::ReceivedVaccine, true);
    next.vaccine_details = details.to_string();
    next
}

/// Normalize both blocks of a form.
pub fn normalize_form(form: HealthDeclarationForm) -> HealthDeclarationForm {
    HealthDeclarationForm {
        last_12_months: normalize(form.last_12_months.clone()),
        last_6_months: normalize(form.last_6_months.clone()),
        ..form
    }
}
