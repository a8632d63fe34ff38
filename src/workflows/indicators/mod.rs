//! Indicator compilation: classifies free-text indicator rows into typed input fields, assigns
//! tiers, and scores the responses collected against them.
//!
//! Everything here is synchronous and pure. The response store belongs to the caller; nothing
//! in this module writes to it.

pub mod calculations;
pub mod catalog;
pub mod classifier;
mod compiler;
pub mod domain;
pub mod extraction;
mod form;
pub mod organization;
pub mod report;
pub mod responses;
pub mod router;
pub mod validation;

pub use classifier::{classify, classify_tier, FieldConfig, FieldRule, FieldShape};
pub use compiler::{compile, ColumnRoles, IndicatorCompiler, MissingColumnError};
pub use domain::{
    DependsOn, Field, FieldOption, FieldType, Indicator, OptionValue, Tier, ValueFormat,
};
pub use form::CompiledForm;
pub use organization::{detect, Organization};
pub use report::{
    data_quality, quality_records, read_responses, score, CompletionScore, DataQuality,
    QualityRecord, ReportError, SubmissionReport,
};
pub use responses::{ResponseStore, ResponseValue};
pub use router::indicator_router;
pub use validation::Validator;
