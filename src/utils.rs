/// Shared label helpers for the statistics readers
use regex::Regex;
use std::sync::LazyLock;

/// Footnote markers the publisher appends to labels, e.g. "2016 1)" or "Erdgas*)"
static FOOTNOTE_SUFFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\s+\d{1,2}\)|\s*\*+\)?)+$").ok());

/// Collapse runs of whitespace and trim both ends
///
/// The workbook pads labels with leading spaces for indentation and is not
/// consistent about inner spacing between editions, so every label lookup
/// goes through this normalization before an exact comparison.
///
/// # Examples
///
/// ```
/// use energy_figures::utils::normalize_label;
///
/// assert_eq!(normalize_label("1 Mio. t  Steinkohleeinheit (SKE)"), "1 Mio. t Steinkohleeinheit (SKE)");
/// assert_eq!(normalize_label("   zusammen"), "zusammen");
/// ```
pub fn normalize_label(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a header label and drop a trailing footnote marker
///
/// # Examples
///
/// ```
/// use energy_figures::utils::clean_header;
///
/// assert_eq!(clean_header("2016 1)"), "2016");
/// assert_eq!(clean_header(" 2015*"), "2015");
/// assert_eq!(clean_header("Einheit"), "Einheit");
/// ```
pub fn clean_header(value: &str) -> String {
    let normalized = normalize_label(value);
    match FOOTNOTE_SUFFIX.as_ref() {
        Some(re) => re.replace(&normalized, "").into_owned(),
        None => normalized,
    }
}

/// Parse a header label as a calendar year
pub fn parse_year(label: &str) -> Option<i32> {
    if label.len() != 4 || !label.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    label.parse::<i32>().ok()
}

/// Render a number the way a header cell reads: integral values without decimals
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1.0e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label_collapses_inner_spaces() {
        assert_eq!(
            normalize_label("1 Mio. t  Steinkohleeinheit (SKE)"),
            "1 Mio. t Steinkohleeinheit (SKE)"
        );
    }

    #[test]
    fn test_normalize_label_strips_indent() {
        assert_eq!(normalize_label("  - Rohöl"), "- Rohöl");
    }

    #[test]
    fn test_clean_header_footnote_number() {
        assert_eq!(clean_header("2016 1)"), "2016");
    }

    #[test]
    fn test_clean_header_star() {
        assert_eq!(clean_header("2015*"), "2015");
        assert_eq!(clean_header("2015 *)"), "2015");
    }

    #[test]
    fn test_clean_header_keeps_plain_text() {
        assert_eq!(clean_header("Unnamed: 0"), "Unnamed: 0");
        assert_eq!(clean_header("PJ"), "PJ");
    }

    #[test]
    fn test_parse_year_valid() {
        assert_eq!(parse_year("2014"), Some(2014));
    }

    #[test]
    fn test_parse_year_rejects_text() {
        assert_eq!(parse_year("Einheit"), None);
        assert_eq!(parse_year("201"), None);
        assert_eq!(parse_year("20145"), None);
    }

    #[test]
    fn test_format_number_integral() {
        assert_eq!(format_number(2014.0), "2014");
    }

    #[test]
    fn test_format_number_fractional() {
        assert_eq!(format_number(0.75), "0.75");
    }
}
