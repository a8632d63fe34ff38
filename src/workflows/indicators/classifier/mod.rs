//! Decides the field shape for one indicator from its free text.

mod rules;
mod tier;

pub use tier::classify_tier;

use super::domain::Field;
use serde::Serialize;
use tracing::debug;

/// Identifies which classification rule produced a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRule {
    Turnover,
    FundingRatio,
    MultiPart,
    BenefitChecklist,
    YesNo,
    Checklist,
    Difficulty,
    Satisfaction,
    BoardCompensation,
    Collaboration,
    Count,
    Percentage,
    FreeText,
}

impl FieldRule {
    /// Rules in evaluation order; the first match wins.
    pub const fn ordered() -> [Self; 13] {
        [
            Self::Turnover,
            Self::FundingRatio,
            Self::MultiPart,
            Self::BenefitChecklist,
            Self::YesNo,
            Self::Checklist,
            Self::Difficulty,
            Self::Satisfaction,
            Self::BoardCompensation,
            Self::Collaboration,
            Self::Count,
            Self::Percentage,
            Self::FreeText,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Turnover => "turnover",
            Self::FundingRatio => "funding_ratio",
            Self::MultiPart => "multi_part",
            Self::BenefitChecklist => "benefit_checklist",
            Self::YesNo => "yes_no",
            Self::Checklist => "checklist",
            Self::Difficulty => "difficulty",
            Self::Satisfaction => "satisfaction",
            Self::BoardCompensation => "board_compensation",
            Self::Collaboration => "collaboration",
            Self::Count => "count",
            Self::Percentage => "percentage",
            Self::FreeText => "free_text",
        }
    }

    /// Whether this rule alone accepts the given texts, ignoring precedence.
    pub fn matches(self, indicator_text: &str, method_text: &str) -> bool {
        let input = ClassifierInput::new(indicator_text, method_text);
        rules::rule_for(self)
            .map(|rule| (rule.matches)(&input))
            .unwrap_or(false)
    }
}

/// Raw and lower-cased views of one indicator's text.
pub(crate) struct ClassifierInput<'a> {
    pub(crate) indicator: String,
    pub(crate) method: String,
    pub(crate) raw_indicator: &'a str,
    pub(crate) raw_method: &'a str,
}

impl<'a> ClassifierInput<'a> {
    pub(crate) fn new(indicator_text: &'a str, method_text: &'a str) -> Self {
        Self {
            indicator: indicator_text.to_lowercase(),
            method: method_text.to_lowercase(),
            raw_indicator: indicator_text,
            raw_method: method_text,
        }
    }
}

/// How one indicator expands into fields. Field ids are relative until the compiler prefixes
/// them with the indicator id.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape {
    /// One primary field; the compiler supplies its label and description from the row.
    Simple(Field),
    /// Raw inputs plus fields derived from them.
    CalculatedGroup { inputs: Vec<Field>, derived: Vec<Field> },
    /// A primary question and a follow-up gated on the primary's answer.
    MultiPart { primary: Field, dependent: Field },
}

impl FieldShape {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Simple(_) => "simple",
            Self::CalculatedGroup { .. } => "calculated_group",
            Self::MultiPart { .. } => "multi_part",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    rule: FieldRule,
    shape: FieldShape,
}

impl FieldConfig {
    pub fn rule(&self) -> FieldRule {
        self.rule
    }

    pub fn shape(&self) -> &FieldShape {
        &self.shape
    }

    pub fn into_shape(self) -> FieldShape {
        self.shape
    }
}

/// Maps an indicator and its measurement method to a field configuration.
///
/// Total: unmatched text falls through to a short free-text field carrying an advisory warning.
pub fn classify(indicator_text: &str, method_text: &str) -> FieldConfig {
    let input = ClassifierInput::new(indicator_text, method_text);
    let rule = rules::RULES
        .iter()
        .find(|rule| (rule.matches)(&input))
        .unwrap_or(&rules::FREE_TEXT);

    debug!(rule = rule.kind.label(), "classified indicator");

    FieldConfig {
        rule: rule.kind,
        shape: (rule.build)(&input),
    }
}
