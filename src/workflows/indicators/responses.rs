use super::domain::OptionValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw answer captured by the presentation layer. Shapes the form never produces, such as a
/// fractional number inside a selection, are kept as [`ResponseValue::Other`] so one odd answer
/// does not reject the whole store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Choices(Vec<OptionValue>),
    Other(serde_json::Value),
}

impl ResponseValue {
    /// Present and not an empty string. `0`, `false` and `"0"` all count as answers.
    pub fn is_answered(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Text(text) => !text.is_empty(),
            Self::Bool(_) | Self::Number(_) | Self::Choices(_) | Self::Other(_) => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
            Self::Null | Self::Bool(_) | Self::Choices(_) | Self::Other(_) => None,
        };
        number.filter(|value| value.is_finite())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// True when the answer selects `choice`, either as a single value or within a selection.
    pub fn matches_choice(&self, choice: &str) -> bool {
        let option_matches = |option: &OptionValue| match option {
            OptionValue::Text(text) => text == choice,
            OptionValue::Number(number) => number.to_string() == choice,
        };

        match self {
            Self::Text(text) => text == choice,
            Self::Number(number) => number.to_string() == choice,
            Self::Bool(flag) => flag.to_string() == choice,
            Self::Choices(options) => options.iter().any(option_matches),
            Self::Null | Self::Other(_) => false,
        }
    }
}

/// Field id to answer. Owned by the presentation layer; compilation and scoring only read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseStore(BTreeMap<String, ResponseValue>);

impl ResponseStore {
    pub fn get(&self, field_id: &str) -> Option<&ResponseValue> {
        self.0.get(field_id)
    }

    pub fn insert(&mut self, field_id: impl Into<String>, value: ResponseValue) {
        self.0.insert(field_id.into(), value);
    }

    pub fn number(&self, field_id: &str) -> Option<f64> {
        self.get(field_id).and_then(ResponseValue::as_number)
    }

    pub fn is_answered(&self, field_id: &str) -> bool {
        self.get(field_id)
            .map(ResponseValue::is_answered)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ResponseValue)> for ResponseStore {
    fn from_iter<I: IntoIterator<Item = (K, ResponseValue)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }
}
