//! Numeric transforms behind calculated fields.
//!
//! Every function accepts possibly-missing inputs and returns `0.0` instead of an undefined or
//! infinite value when a denominator is zero or absent, or when finite inputs overflow. Rounding is half away from zero, which
//! is what [`f64::round`] does.

use super::responses::ResponseStore;
use serde::Serialize;

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|number| number.is_finite())
}

fn defined(result: f64) -> f64 {
    if result.is_finite() {
        result
    } else {
        0.0
    }
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    usable(value).filter(|number| *number != 0.0)
}

/// `round(staff_left / average_staff * 100)`.
pub fn turnover_rate(staff_left: Option<f64>, average_staff: Option<f64>) -> f64 {
    match nonzero(average_staff) {
        Some(average) => defined((usable(staff_left).unwrap_or(0.0) / average * 100.0).round()),
        None => 0.0,
    }
}

/// Project-to-core ratio rounded to two decimals.
pub fn funding_ratio(project_funding: Option<f64>, core_funding: Option<f64>) -> f64 {
    match nonzero(core_funding) {
        Some(core) => defined((usable(project_funding).unwrap_or(0.0) / core * 100.0).round() / 100.0),
        None => 0.0,
    }
}

/// Share of total funding that is core funding, as a whole percentage.
pub fn core_percentage(core_funding: Option<f64>, total_funding: Option<f64>) -> f64 {
    match nonzero(total_funding) {
        Some(total) => defined((usable(core_funding).unwrap_or(0.0) / total * 100.0).round()),
        None => 0.0,
    }
}

/// Mean of the usable entries; missing and NaN values are ignored.
pub fn average(values: &[Option<f64>]) -> f64 {
    let valid: Vec<f64> = values.iter().filter_map(|value| usable(*value)).collect();
    if valid.is_empty() {
        return 0.0;
    }
    defined(valid.iter().sum::<f64>() / valid.len() as f64)
}

/// Period-over-period change as a whole percentage.
pub fn growth_rate(previous: Option<f64>, current: Option<f64>) -> f64 {
    match nonzero(previous) {
        Some(previous) => {
            defined(((usable(current).unwrap_or(0.0) - previous) / previous * 100.0).round())
        }
        None => 0.0,
    }
}

/// Named calculation applied to sibling responses. Field references are field ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    AverageStaff {
        staff_at_start: String,
        staff_at_end: String,
    },
    TurnoverRate {
        staff_left: String,
        staff_at_start: String,
        staff_at_end: String,
    },
    TotalFunding {
        core_funding: String,
        project_funding: String,
    },
    CorePercentage {
        core_funding: String,
        project_funding: String,
    },
    FundingRatio {
        core_funding: String,
        project_funding: String,
    },
}

impl Formula {
    pub fn evaluate(&self, responses: &ResponseStore) -> f64 {
        match self {
            Formula::AverageStaff {
                staff_at_start,
                staff_at_end,
            } => average_staff(responses, staff_at_start, staff_at_end),
            Formula::TurnoverRate {
                staff_left,
                staff_at_start,
                staff_at_end,
            } => turnover_rate(
                responses.number(staff_left),
                Some(average_staff(responses, staff_at_start, staff_at_end)),
            ),
            Formula::TotalFunding {
                core_funding,
                project_funding,
            } => total_funding(responses, core_funding, project_funding),
            Formula::CorePercentage {
                core_funding,
                project_funding,
            } => core_percentage(
                responses.number(core_funding),
                Some(total_funding(responses, core_funding, project_funding)),
            ),
            Formula::FundingRatio {
                core_funding,
                project_funding,
            } => funding_ratio(
                responses.number(project_funding),
                responses.number(core_funding),
            ),
        }
    }

    /// Field ids this formula reads.
    pub fn inputs(&self) -> Vec<&str> {
        match self {
            Formula::AverageStaff {
                staff_at_start,
                staff_at_end,
            } => vec![staff_at_start.as_str(), staff_at_end.as_str()],
            Formula::TurnoverRate {
                staff_left,
                staff_at_start,
                staff_at_end,
            } => vec![
                staff_left.as_str(),
                staff_at_start.as_str(),
                staff_at_end.as_str(),
            ],
            Formula::TotalFunding {
                core_funding,
                project_funding,
            }
            | Formula::CorePercentage {
                core_funding,
                project_funding,
            }
            | Formula::FundingRatio {
                core_funding,
                project_funding,
            } => vec![core_funding.as_str(), project_funding.as_str()],
        }
    }

    pub(crate) fn qualify(self, prefix: &str) -> Self {
        let q = |id: String| format!("{prefix}_{id}");
        match self {
            Formula::AverageStaff {
                staff_at_start,
                staff_at_end,
            } => Formula::AverageStaff {
                staff_at_start: q(staff_at_start),
                staff_at_end: q(staff_at_end),
            },
            Formula::TurnoverRate {
                staff_left,
                staff_at_start,
                staff_at_end,
            } => Formula::TurnoverRate {
                staff_left: q(staff_left),
                staff_at_start: q(staff_at_start),
                staff_at_end: q(staff_at_end),
            },
            Formula::TotalFunding {
                core_funding,
                project_funding,
            } => Formula::TotalFunding {
                core_funding: q(core_funding),
                project_funding: q(project_funding),
            },
            Formula::CorePercentage {
                core_funding,
                project_funding,
            } => Formula::CorePercentage {
                core_funding: q(core_funding),
                project_funding: q(project_funding),
            },
            Formula::FundingRatio {
                core_funding,
                project_funding,
            } => Formula::FundingRatio {
                core_funding: q(core_funding),
                project_funding: q(project_funding),
            },
        }
    }
}

fn average_staff(responses: &ResponseStore, start: &str, end: &str) -> f64 {
    average(&[responses.number(start), responses.number(end)]).round()
}

fn total_funding(responses: &ResponseStore, core: &str, project: &str) -> f64 {
    defined(responses.number(core).unwrap_or(0.0) + responses.number(project).unwrap_or(0.0))
}
