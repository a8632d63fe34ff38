//! Recognizes which member organization a spreadsheet belongs to.

use crate::workflows::spreadsheet::RowSet;
use serde::Serialize;
use tracing::{debug, warn};

/// Known organizations as `(code, name)`, in match priority order.
const KNOWN_ORGANIZATIONS: &[(&str, &str)] = &[
    ("VFWC", "Victoria Family Works Centre"),
    ("CSSC", "Community Social Services Coalition"),
    ("YFRN", "Youth & Family Resource Network"),
    ("NHCS", "Neighbourhood House Community Services"),
];

const FALLBACK_NAME: &str = "Organization";
const FALLBACK_CODE: &str = "ORG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub name: String,
    pub code: String,
}

impl Organization {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    pub fn fallback() -> Self {
        Self::new(FALLBACK_NAME, FALLBACK_CODE)
    }

    /// Catalog entry for `code`, matched exactly.
    pub fn known(code: &str) -> Option<Self> {
        KNOWN_ORGANIZATIONS
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(code, name)| Self::new(*name, *code))
    }
}

/// `None` only for an empty row set; otherwise a catalog match or the generic placeholder.
pub fn detect(rows: &RowSet) -> Option<Organization> {
    if rows.is_empty() {
        return None;
    }

    let haystack = match serde_json::to_string(rows.rows()) {
        Ok(serialized) => serialized.to_lowercase(),
        Err(err) => {
            warn!(error = %err, "could not serialize rows for organization detection");
            String::new()
        }
    };

    let from_content = KNOWN_ORGANIZATIONS
        .iter()
        .find(|(code, _)| haystack.contains(&code.to_lowercase()));
    if let Some((code, name)) = from_content {
        debug!(code, "organization detected from row content");
        return Some(Organization::new(*name, *code));
    }

    let from_headers = rows
        .headers()
        .iter()
        .find_map(|header| Organization::known(header.trim()));
    if let Some(organization) = from_headers {
        debug!(code = %organization.code, "organization detected from headers");
        return Some(organization);
    }

    Some(Organization::fallback())
}
