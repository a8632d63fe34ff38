use super::responses::ResponseValue;
use chrono::NaiveDate;
use serde::Serialize;

/// Validation rules attached to fields. Each check yields a user-facing message or nothing;
/// enforcement is left to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    Required,
    Number,
    Integer,
    NonNegative,
    Percentage,
    Currency,
    MaxLength(usize),
    Date,
}

impl Validator {
    /// Only `Required` reports a missing answer; every other rule passes on blanks.
    pub fn check(&self, answer: Option<&ResponseValue>) -> Option<String> {
        let answer = match answer.filter(|value| value.is_answered()) {
            Some(answer) => answer,
            None if *self == Validator::Required => {
                return Some("This field is required".to_string())
            }
            None => return None,
        };

        match self {
            Validator::Required => None,
            Validator::Number => match answer.as_number() {
                Some(_) => None,
                None => Some("Please enter a valid number".to_string()),
            },
            Validator::Integer => match answer.as_number() {
                Some(value) if value.fract() == 0.0 => None,
                _ => Some("Please enter a whole number".to_string()),
            },
            Validator::NonNegative => match answer.as_number() {
                Some(value) if value < 0.0 => Some("Value cannot be negative".to_string()),
                _ => None,
            },
            Validator::Percentage => match answer.as_number() {
                Some(value) if (0.0..=100.0).contains(&value) => None,
                _ => Some("Percentage must be between 0 and 100".to_string()),
            },
            Validator::Currency => match answer.as_number() {
                Some(value) if value >= 0.0 => None,
                _ => Some("Amount must be zero or a positive number".to_string()),
            },
            Validator::MaxLength(limit) => {
                let length = answer.as_text().map(|text| text.chars().count())?;
                (length > *limit).then(|| format!("Maximum {limit} characters"))
            }
            Validator::Date => {
                let text = answer.as_text().unwrap_or_default().trim();
                match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                    Ok(_) => None,
                    Err(_) => Some("Please enter a valid date (YYYY-MM-DD)".to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64) -> ResponseValue {
        ResponseValue::Number(value)
    }

    fn text(value: &str) -> ResponseValue {
        ResponseValue::Text(value.to_string())
    }

    #[test]
    fn required_flags_missing_and_empty_answers() {
        assert!(Validator::Required.check(None).is_some());
        assert!(Validator::Required.check(Some(&text(""))).is_some());
        assert!(Validator::Required.check(Some(&ResponseValue::Null)).is_some());
        assert!(Validator::Required.check(Some(&number(0.0))).is_none());
    }

    #[test]
    fn non_required_rules_ignore_blank_answers() {
        assert!(Validator::Percentage.check(None).is_none());
        assert!(Validator::Integer.check(Some(&text(""))).is_none());
    }

    #[test]
    fn percentage_is_bounded() {
        assert!(Validator::Percentage.check(Some(&number(0.0))).is_none());
        assert!(Validator::Percentage.check(Some(&number(100.0))).is_none());
        assert!(Validator::Percentage.check(Some(&number(100.5))).is_some());
        assert!(Validator::Percentage.check(Some(&number(-1.0))).is_some());
        assert!(Validator::Percentage.check(Some(&text("50"))).is_none());
    }

    #[test]
    fn currency_and_counts_reject_invalid_numbers() {
        assert!(Validator::Currency.check(Some(&number(-0.01))).is_some());
        assert!(Validator::Currency.check(Some(&number(1500.25))).is_none());
        assert!(Validator::Integer.check(Some(&number(3.5))).is_some());
        assert!(Validator::Integer.check(Some(&number(3.0))).is_none());
        assert!(Validator::NonNegative.check(Some(&number(-2.0))).is_some());
        assert!(Validator::Number.check(Some(&text("twelve"))).is_some());
    }

    #[test]
    fn max_length_counts_characters() {
        assert!(Validator::MaxLength(3).check(Some(&text("abc"))).is_none());
        assert_eq!(
            Validator::MaxLength(3).check(Some(&text("abcd"))),
            Some("Maximum 3 characters".to_string())
        );
    }

    #[test]
    fn dates_use_iso_format() {
        assert!(Validator::Date.check(Some(&text("2025-03-31"))).is_none());
        assert!(Validator::Date.check(Some(&text("31/03/2025"))).is_some());
    }
}
