//! Helpers that pull structured content out of free-text measurement methods.

use super::domain::{FieldOption, OptionValue};
use std::collections::HashSet;

/// Glyphs spreadsheet authors use to mark checkbox choices.
pub const CHECKBOX_GLYPHS: [char; 2] = ['\u{2610}', '\u{25a1}'];

const YES_NO_MARKER: &str = "(yes/no)";
const OTHER_SLUGS: [&str; 3] = ["other", "other_please_specify", "other_specify"];

pub fn contains_checkbox_glyph(text: &str) -> bool {
    text.contains(CHECKBOX_GLYPHS)
}

/// Machine value for an option label: lower-cased alphanumerics, in any script, joined by
/// single underscores.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    for ch in label.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_matches('_').to_string()
}

/// Options listed after checkbox glyphs. Text before the first glyph is the question prose and
/// never becomes an option. "Other" entries are folded into a single trailing
/// `other` option, and labels that slug to an already-seen value are dropped. A label with no
/// alphanumerics at all is kept under a positional `option_<n>` value.
pub fn extract_checkbox_options(text: &str) -> Vec<FieldOption> {
    let mut seen = HashSet::new();
    let mut options = Vec::new();

    for segment in text.split(CHECKBOX_GLYPHS).skip(1) {
        let label = segment.trim();
        if label.is_empty() {
            continue;
        }

        let value = match slugify(label) {
            slug if slug.is_empty() => format!("option_{}", options.len() + 1),
            slug if OTHER_SLUGS.contains(&slug.as_str()) => continue,
            slug => slug,
        };
        if !seen.insert(value.clone()) {
            continue;
        }

        options.push(FieldOption::new(OptionValue::Text(value), label));
    }

    if !options.is_empty() {
        options.push(FieldOption::new(OptionValue::text("other"), "Other (specify)"));
    }

    options
}

/// The question sentence immediately preceding a "(Yes/No)" marker.
pub fn yes_no_question(text: &str) -> Option<String> {
    let marker = find_ignore_ascii_case(text, YES_NO_MARKER)?;
    let line = text[..marker]
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())?;

    let body = line.trim_end_matches(['?', '.', ':', '!']);
    let start = body
        .rfind(['.', '?', '!'])
        .map(|index| index + 1)
        .unwrap_or(0);
    let sentence = line[start..].trim();

    (!sentence.is_empty()).then(|| sentence.to_string())
}

/// Everything after the "(Yes/No)" marker, or the whole text when there is none.
pub fn after_yes_no_marker(text: &str) -> &str {
    match find_ignore_ascii_case(text, YES_NO_MARKER) {
        Some(index) => &text[index + YES_NO_MARKER.len()..],
        None => text,
    }
}

/// A "Which of the following ...?" question, falling back to the first "What ...?" question.
pub fn checkbox_question(text: &str) -> Option<String> {
    ["which of the following", "what"]
        .into_iter()
        .find_map(|opening| question_starting_with(text, opening))
}

fn question_starting_with(text: &str, opening: &str) -> Option<String> {
    let lowered = text.to_ascii_lowercase();
    let start = lowered.match_indices(opening).map(|(index, _)| index).find(|&index| {
        lowered[..index]
            .chars()
            .next_back()
            .map_or(true, |before| !before.is_alphanumeric())
    })?;
    let end = text[start..].find('?')? + start + 1;
    let question = text[start..end].split_whitespace().collect::<Vec<_>>().join(" ");
    Some(question)
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}
