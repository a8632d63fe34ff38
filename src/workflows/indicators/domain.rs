use super::calculations::Formula;
use super::responses::ResponseStore;
use super::validation::Validator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Number,
    Currency,
    Percentage,
    Scale,
    Radio,
    Checkbox,
    Dropdown,
    Calculated,
    Ratio,
    TextShort,
    Date,
    Period,
}

impl FieldType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::Currency => "Currency",
            Self::Percentage => "Percentage",
            Self::Scale => "Scale",
            Self::Radio => "Single choice",
            Self::Checkbox => "Multiple choice",
            Self::Dropdown => "Dropdown",
            Self::Calculated => "Calculated",
            Self::Ratio => "Ratio",
            Self::TextShort => "Short text",
            Self::Date => "Date",
            Self::Period => "Reporting period",
        }
    }

    /// Types whose answers are already structured data for quality scoring.
    pub const fn is_standardized(self) -> bool {
        matches!(
            self,
            Self::Number
                | Self::Currency
                | Self::Radio
                | Self::Checkbox
                | Self::Scale
                | Self::Calculated
        )
    }
}

/// Importance tier assigned to an indicator. Serialized as its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tier {
    Foundational = 1,
    Operational = 2,
    Strategic = 3,
}

impl Tier {
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Foundational => "Tier 1 (Foundational)",
            Self::Operational => "Tier 2 (Operational)",
            Self::Strategic => "Tier 3 (Strategic)",
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Self::Operational
    }
}

impl From<Tier> for u8 {
    fn from(value: Tier) -> Self {
        value.number()
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Foundational),
            2 => Ok(Self::Operational),
            3 => Ok(Self::Strategic),
            other => Err(format!("tier must be 1, 2 or 3, found {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Number(i64),
    Text(String),
}

impl OptionValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: OptionValue,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: OptionValue, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Rendering hint for numeric and calculated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    Percentage,
    Currency,
    Ratio,
}

/// Visibility predicate: the field is only active when `field_id` holds `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependsOn {
    #[serde(rename = "dependsOn")]
    pub field_id: String,
    #[serde(rename = "dependsOnValue")]
    pub value: String,
}

impl DependsOn {
    /// Evaluated by the presentation layer; compilation only declares the dependency.
    pub fn is_satisfied_by(&self, responses: &ResponseStore) -> bool {
        responses
            .get(&self.field_id)
            .map(|answer| answer.matches_choice(&self.value))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub validation: Vec<Validator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<Formula>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(flatten)]
    pub depends_on: Option<DependsOn>,
}

impl Field {
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            description: None,
            options: None,
            required: false,
            placeholder: None,
            validation: Vec::new(),
            max_length: None,
            warning: None,
            formula: None,
            format: None,
            unit: None,
            depends_on: None,
        }
    }

    /// A calculated field; never required and never user-fillable.
    pub fn calculated(id: impl Into<String>, label: impl Into<String>, formula: Formula) -> Self {
        let mut field = Self::new(id, FieldType::Calculated, label);
        field.formula = Some(formula);
        field
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        if !self.validation.contains(&Validator::Required) {
            self.validation.insert(0, Validator::Required);
        }
        self
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_validation(mut self, rules: &[Validator]) -> Self {
        for rule in rules {
            if !self.validation.contains(rule) {
                self.validation.push(*rule);
            }
        }
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self.with_validation(&[Validator::MaxLength(max_length)])
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn depends_on(mut self, field_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.depends_on = Some(DependsOn {
            field_id: field_id.into(),
            value: value.into(),
        });
        self
    }

    pub fn is_calculated(&self) -> bool {
        self.field_type == FieldType::Calculated
    }

    /// Prefixes this field's id and every id it references with `prefix`.
    pub(crate) fn qualify(mut self, prefix: &str) -> Self {
        self.id = format!("{prefix}_{}", self.id);
        self.formula = self.formula.map(|formula| formula.qualify(prefix));
        if let Some(dependency) = self.depends_on.as_mut() {
            dependency.field_id = format!("{prefix}_{}", dependency.field_id);
        }
        self
    }

    /// Runs every validation rule in order and returns the messages of those that fail.
    pub fn validate(&self, responses: &ResponseStore) -> Vec<String> {
        let answer = responses.get(&self.id);
        self.validation
            .iter()
            .filter_map(|rule| rule.check(answer))
            .collect()
    }

    /// Value of a calculated field, or `None` until every input it reads has been answered.
    pub fn computed_value(&self, responses: &ResponseStore) -> Option<f64> {
        let formula = self.formula.as_ref()?;
        if formula
            .inputs()
            .into_iter()
            .all(|input| responses.is_answered(input))
        {
            Some(formula.evaluate(responses))
        } else {
            None
        }
    }
}

/// One compiled reporting line item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicator {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tier: Tier,
    pub fields: Vec<Field>,
}

impl Indicator {
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Fields a respondent is expected to fill in.
    pub fn input_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| !field.is_calculated())
    }
}
