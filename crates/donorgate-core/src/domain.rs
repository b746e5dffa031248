//! Closed answer domains shared by the screening and declaration engines.
//!
//! Every answer a donor can give belongs to one of the enumerations below.
//! Persisted answers travel as their string codes and are only turned back
//! into typed values through [`AnswerDomain::from_code`]; an unknown code is
//! treated as "not answered", never coerced into a neighbouring value.

use serde::{Deserialize, Deserializer};

/// A closed set of answer values with stable string codes.
pub trait AnswerDomain: Copy + Eq + 'static {
    /// Domain name used in log fields and validation messages.
    const NAME: &'static str;

    /// Every member of the domain, in presentation order.
    fn members() -> &'static [Self];

    /// The stable code stored in drafts and records.
    fn code(self) -> &'static str;

    /// Look up a member by code. `None` for anything outside the domain.
    fn from_code(code: &str) -> Option<Self> {
        Self::members().iter().copied().find(|m| m.code() == code)
    }

    /// The validation primitive: is `code` a member of this domain?
    fn is_member(code: &str) -> bool {
        Self::from_code(code).is_some()
    }
}

macro_rules! answer_domain {
    (
        $(#[$meta:meta])*
        $name:ident as $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::ts_rs::TS,
        )]
        #[ts(export)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $code)] $variant, )+
        }

        impl $crate::domain::AnswerDomain for $name {
            const NAME: &'static str = $label;

            fn members() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::domain::AnswerDomain::code(*self))
            }
        }
    };
}

answer_domain! {
    /// Answer to a screening question.
    AnswerValue as "answer_value" {
        Affirmative => "yes",
        Negative => "no",
        /// "Not sure". Never disqualifying on its own.
        Uncertain => "unsure",
        /// Only offered on audience-restricted questions.
        NotApplicable => "not_applicable",
    }
}

answer_domain! {
    /// Binary declaration answer.
    YesNo as "yes_no" {
        Yes => "yes",
        No => "no",
    }
}

answer_domain! {
    /// Tri-state declaration answer. `Other` requires accompanying text.
    TriState as "tri_state" {
        Yes => "yes",
        No => "no",
        Other => "other",
    }
}

answer_domain! {
    /// Women-specific declaration answer. Never required.
    WomenStatus as "women_status" {
        Pregnant => "pregnant",
        Breastfeeding => "breastfeeding",
        /// Gave birth or terminated a pregnancy in the last 12 months.
        TerminatedPregnancy => "terminated_pregnancy",
        NotApplicable => "not_applicable",
    }
}

answer_domain! {
    /// Respondent's stated sex, used only to skip audience-restricted questions.
    Sex as "sex" {
        Female => "female",
        Male => "male",
    }
}

impl YesNo {
    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }
}

impl TriState {
    pub fn is_other(self) -> bool {
        self == TriState::Other
    }
}

/// Deserialize an optional domain value, treating anything outside the domain
/// as absent.
///
/// Use with `#[serde(default, deserialize_with = "lenient")]`.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: AnswerDomain,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(code)) => {
            let value = T::from_code(&code);
            if value.is_none() {
                tracing::warn!(domain = T::NAME, code = %code, "dropping out-of-domain answer");
            }
            value
        }
        Some(other) => {
            tracing::warn!(domain = T::NAME, value = %other, "dropping non-string answer");
            None
        }
    })
}

/// Deserialize a multi-select sub-flag. Anything but a JSON boolean is unset.
pub fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Bool(flag)) => flag,
        None | Some(serde_json::Value::Null) => false,
        Some(other) => {
            tracing::warn!(value = %other, "dropping non-boolean flag");
            false
        }
    })
}

/// Deserialize free text. Anything but a JSON string is empty.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(text)) => text,
        _ => String::new(),
    })
}
