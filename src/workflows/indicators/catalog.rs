//! Standardized choice sets offered instead of free text.

use super::domain::{FieldOption, OptionValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    YesNo,
    YesNoNotApplicable,
    Satisfaction,
    Difficulty,
    EmployeeBenefits,
    BoardCompensation,
    CollaborationTypes,
}

const YES_NO: &[(&str, &str)] = &[("yes", "Yes"), ("no", "No")];

const YES_NO_NOT_APPLICABLE: &[(&str, &str)] = &[
    ("yes", "Yes"),
    ("no", "No"),
    ("not_applicable", "Not applicable"),
];

const SATISFACTION: &[(i64, &str)] = &[
    (1, "Very dissatisfied"),
    (2, "Dissatisfied"),
    (3, "Neutral"),
    (4, "Satisfied"),
    (5, "Very satisfied"),
];

const DIFFICULTY: &[(&str, &str)] = &[
    ("very_easy", "Very easy"),
    ("easy", "Easy"),
    ("neutral", "Neither easy nor difficult"),
    ("difficult", "Difficult"),
    ("very_difficult", "Very difficult"),
];

const EMPLOYEE_BENEFITS: &[(&str, &str)] = &[
    ("extended_health", "Extended health and dental"),
    ("employee_assistance", "Employee assistance program"),
    ("wellness_spending", "Wellness spending account"),
    ("flexible_work", "Flexible or remote work"),
    ("paid_sick_leave", "Paid sick leave beyond statutory minimum"),
    ("mental_health_days", "Mental health days"),
    ("professional_development", "Professional development funding"),
    ("retirement", "Pension or RRSP matching"),
    ("other", "Other (specify)"),
];

const BOARD_COMPENSATION: &[(&str, &str)] = &[
    ("none", "No compensation"),
    ("expense_reimbursement", "Expense reimbursement"),
    ("meeting_honorarium", "Per-meeting honorarium"),
    ("annual_stipend", "Annual stipend"),
    ("training", "Paid training or conference costs"),
    ("other", "Other (specify)"),
];

const COLLABORATION_TYPES: &[(&str, &str)] = &[
    ("information_sharing", "Information sharing"),
    ("referrals", "Client referrals"),
    ("joint_programming", "Joint programming"),
    ("shared_resources", "Shared staff, space or resources"),
    ("joint_funding", "Joint funding applications"),
    ("coalition_membership", "Coalition or network membership"),
    ("joint_advocacy", "Joint advocacy"),
    ("other", "Other (specify)"),
];

impl Catalog {
    pub fn options(self) -> Vec<FieldOption> {
        match self {
            Catalog::Satisfaction => SATISFACTION
                .iter()
                .map(|(value, label)| FieldOption::new(OptionValue::Number(*value), *label))
                .collect(),
            other => other
                .text_entries()
                .iter()
                .map(|(value, label)| FieldOption::new(OptionValue::text(*value), *label))
                .collect(),
        }
    }

    fn text_entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Catalog::YesNo => YES_NO,
            Catalog::YesNoNotApplicable => YES_NO_NOT_APPLICABLE,
            Catalog::Difficulty => DIFFICULTY,
            Catalog::EmployeeBenefits => EMPLOYEE_BENEFITS,
            Catalog::BoardCompensation => BOARD_COMPENSATION,
            Catalog::CollaborationTypes => COLLABORATION_TYPES,
            Catalog::Satisfaction => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: [Catalog; 7] = [
        Catalog::YesNo,
        Catalog::YesNoNotApplicable,
        Catalog::Satisfaction,
        Catalog::Difficulty,
        Catalog::EmployeeBenefits,
        Catalog::BoardCompensation,
        Catalog::CollaborationTypes,
    ];

    #[test]
    fn catalogs_are_non_empty_with_unique_values() {
        for catalog in ALL {
            let options = catalog.options();
            assert!(!options.is_empty(), "{catalog:?} has no options");
            let values: HashSet<_> = options.iter().map(|option| &option.value).collect();
            assert_eq!(values.len(), options.len(), "{catalog:?} repeats a value");
        }
    }

    #[test]
    fn yes_no_has_no_not_applicable_choice() {
        let values: Vec<_> = Catalog::YesNo
            .options()
            .into_iter()
            .map(|option| option.value)
            .collect();
        assert_eq!(values, vec![OptionValue::text("yes"), OptionValue::text("no")]);
    }

    #[test]
    fn not_applicable_variant_extends_yes_no() {
        let options = Catalog::YesNoNotApplicable.options();
        assert_eq!(options[..2], Catalog::YesNo.options()[..]);
        assert_eq!(options[2].value, OptionValue::text("not_applicable"));
        assert_eq!(options[2].label, "Not applicable");
    }

    #[test]
    fn satisfaction_scale_runs_one_to_five() {
        let options = Catalog::Satisfaction.options();
        assert_eq!(options.first().map(|o| &o.value), Some(&OptionValue::Number(1)));
        assert_eq!(options.last().map(|o| &o.value), Some(&OptionValue::Number(5)));
    }
}
