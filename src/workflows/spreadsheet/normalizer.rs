/// Strips byte-order marks and zero-width spaces and collapses inner whitespace.
pub fn clean_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_header_removes_markers_and_extra_whitespace() {
        assert_eq!(
            clean_header("\u{feff}Measurement   Method\u{200b} "),
            "Measurement Method"
        );
    }
}
