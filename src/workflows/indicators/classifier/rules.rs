use super::{ClassifierInput, FieldRule, FieldShape};
use crate::workflows::indicators::calculations::Formula;
use crate::workflows::indicators::catalog::Catalog;
use crate::workflows::indicators::domain::{Field, FieldOption, FieldType, ValueFormat};
use crate::workflows::indicators::extraction::{
    after_yes_no_marker, checkbox_question, contains_checkbox_glyph, extract_checkbox_options,
    yes_no_question,
};
use crate::workflows::indicators::validation::Validator;

const CHECK_ALL: &str = "check all that apply";
const FREE_TEXT_LIMIT: usize = 100;
const FREE_TEXT_WARNING: &str = "Free-text answers cannot be compared across organizations. \
Consider converting this indicator to a number, a yes/no question or a list of choices.";

pub(crate) struct ClassificationRule {
    pub(crate) kind: FieldRule,
    pub(crate) matches: fn(&ClassifierInput<'_>) -> bool,
    pub(crate) build: fn(&ClassifierInput<'_>) -> FieldShape,
}

pub(crate) const FREE_TEXT: ClassificationRule = ClassificationRule {
    kind: FieldRule::FreeText,
    matches: |_| true,
    build: free_text,
};

/// Ordered rule table. Patterns overlap, so position is precedence.
pub(crate) const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        kind: FieldRule::Turnover,
        matches: |input| mentions(&input.indicator, &["turnover", "retention"]),
        build: turnover_group,
    },
    ClassificationRule {
        kind: FieldRule::FundingRatio,
        matches: |input| {
            input.indicator.contains("funding") && mentions(&input.indicator, &["ratio", "core"])
        },
        build: funding_group,
    },
    ClassificationRule {
        kind: FieldRule::MultiPart,
        matches: |input| input.method.contains("(yes/no)") && input.method.contains(CHECK_ALL),
        build: multi_part,
    },
    ClassificationRule {
        kind: FieldRule::BenefitChecklist,
        matches: |input| {
            mentions(&input.indicator, &["wellness", "benefit"]) && input.method.contains(CHECK_ALL)
        },
        build: |_| checklist(Catalog::EmployeeBenefits.options()),
    },
    ClassificationRule {
        kind: FieldRule::YesNo,
        matches: |input| mentions(&input.method, &["yes/no", "yes / no"]),
        build: |_| single_choice(FieldType::Radio, Catalog::YesNo.options()),
    },
    ClassificationRule {
        kind: FieldRule::Checklist,
        matches: |input| input.method.contains(CHECK_ALL) || contains_checkbox_glyph(&input.method),
        build: |input| checklist(extracted_or_collaboration(input.raw_method)),
    },
    ClassificationRule {
        kind: FieldRule::Difficulty,
        matches: |input| input.method.contains("difficult") && input.method.contains("options:"),
        build: |_| single_choice(FieldType::Radio, Catalog::Difficulty.options()),
    },
    ClassificationRule {
        kind: FieldRule::Satisfaction,
        matches: |input| {
            input.indicator.contains("satisfaction") || input.method.contains("satisfied")
        },
        build: |_| single_choice(FieldType::Scale, Catalog::Satisfaction.options()),
    },
    ClassificationRule {
        kind: FieldRule::BoardCompensation,
        matches: |input| input.indicator.contains("board") && input.indicator.contains("compensation"),
        build: |_| checklist(Catalog::BoardCompensation.options()),
    },
    ClassificationRule {
        kind: FieldRule::Collaboration,
        matches: |input| mentions(&input.indicator, &["collaboration", "coalition"]),
        build: |input| {
            if input.method.contains("how many") {
                FieldShape::Simple(count_field("value", ""))
            } else {
                checklist(Catalog::CollaborationTypes.options())
            }
        },
    },
    ClassificationRule {
        kind: FieldRule::Count,
        matches: |input| mentions(&input.method, &["how many", "number of"]),
        build: |_| FieldShape::Simple(count_field("value", "")),
    },
    ClassificationRule {
        kind: FieldRule::Percentage,
        matches: |input| mentions(&input.method, &["percentage", "%"]),
        build: |_| FieldShape::Simple(percentage_field()),
    },
    FREE_TEXT,
];

pub(crate) fn rule_for(kind: FieldRule) -> Option<&'static ClassificationRule> {
    RULES.iter().find(|rule| rule.kind == kind)
}

fn mentions(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

fn count_field(id: &str, label: &str) -> Field {
    Field::new(id, FieldType::Number, label)
        .required()
        .with_validation(&[Validator::Number, Validator::Integer, Validator::NonNegative])
        .with_placeholder("Enter a whole number")
}

fn currency_field(id: &str, label: &str) -> Field {
    Field::new(id, FieldType::Currency, label)
        .required()
        .with_validation(&[Validator::Number, Validator::Currency])
        .with_placeholder("0.00")
        .with_format(ValueFormat::Currency)
}

fn percentage_field() -> Field {
    Field::new("value", FieldType::Percentage, "")
        .required()
        .with_validation(&[Validator::Number, Validator::Percentage])
        .with_placeholder("0-100")
        .with_format(ValueFormat::Percentage)
        .with_unit("%")
}

fn single_choice(field_type: FieldType, options: Vec<FieldOption>) -> FieldShape {
    FieldShape::Simple(Field::new("value", field_type, "").required().with_options(options))
}

fn checklist(options: Vec<FieldOption>) -> FieldShape {
    FieldShape::Simple(
        Field::new("value", FieldType::Checkbox, "")
            .required()
            .with_options(options),
    )
}

fn extracted_or_collaboration(method: &str) -> Vec<FieldOption> {
    let options = extract_checkbox_options(method);
    if options.is_empty() {
        Catalog::CollaborationTypes.options()
    } else {
        options
    }
}

fn turnover_group(_: &ClassifierInput<'_>) -> FieldShape {
    FieldShape::CalculatedGroup {
        inputs: vec![
            count_field("staffAtStart", "Staff at start of period"),
            count_field("staffAtEnd", "Staff at end of period"),
            count_field("staffLeft", "Staff who left during period"),
        ],
        derived: vec![
            Field::calculated(
                "averageStaff",
                "Average staff",
                Formula::AverageStaff {
                    staff_at_start: "staffAtStart".into(),
                    staff_at_end: "staffAtEnd".into(),
                },
            )
            .with_unit("staff"),
            Field::calculated(
                "turnoverRate",
                "Turnover rate",
                Formula::TurnoverRate {
                    staff_left: "staffLeft".into(),
                    staff_at_start: "staffAtStart".into(),
                    staff_at_end: "staffAtEnd".into(),
                },
            )
            .with_format(ValueFormat::Percentage)
            .with_unit("%"),
        ],
    }
}

fn funding_group(_: &ClassifierInput<'_>) -> FieldShape {
    let core = || "coreFunding".to_string();
    let project = || "projectFunding".to_string();

    FieldShape::CalculatedGroup {
        inputs: vec![
            currency_field("coreFunding", "Core (unrestricted) funding"),
            currency_field("projectFunding", "Project (restricted) funding"),
        ],
        derived: vec![
            Field::calculated(
                "totalFunding",
                "Total funding",
                Formula::TotalFunding {
                    core_funding: core(),
                    project_funding: project(),
                },
            )
            .with_format(ValueFormat::Currency),
            Field::calculated(
                "corePercentage",
                "Core funding share",
                Formula::CorePercentage {
                    core_funding: core(),
                    project_funding: project(),
                },
            )
            .with_format(ValueFormat::Percentage)
            .with_unit("%"),
            Field::calculated(
                "fundingRatio",
                "Project-to-core funding ratio",
                Formula::FundingRatio {
                    core_funding: core(),
                    project_funding: project(),
                },
            )
            .with_format(ValueFormat::Ratio),
        ],
    }
}

fn multi_part(input: &ClassifierInput<'_>) -> FieldShape {
    let question = yes_no_question(input.raw_method)
        .unwrap_or_else(|| input.raw_indicator.trim().to_string());
    let details = checkbox_question(after_yes_no_marker(input.raw_method))
        .unwrap_or_else(|| "Which of the following apply?".to_string());

    FieldShape::MultiPart {
        primary: Field::new("question", FieldType::Radio, question)
            .required()
            .with_options(Catalog::YesNo.options()),
        dependent: Field::new("details", FieldType::Checkbox, details)
            .with_options(extracted_or_collaboration(input.raw_method))
            .depends_on("question", "yes"),
    }
}

fn free_text(_: &ClassifierInput<'_>) -> FieldShape {
    FieldShape::Simple(
        Field::new("value", FieldType::TextShort, "")
            .with_max_length(FREE_TEXT_LIMIT)
            .with_placeholder("Brief answer")
            .with_warning(FREE_TEXT_WARNING),
    )
}
