use std::collections::HashMap;
use std::sync::OnceLock;

static DEPARTMENT_SYNONYMS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

/// Keys are compared against the title-cased department name, so acronyms
/// that title casing mangles are restored here.
pub(crate) fn canonical_department(title_cased: String) -> String {
    match department_synonyms().get(title_cased.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => title_cased,
    }
}

fn department_synonyms() -> &'static HashMap<&'static str, &'static str> {
    DEPARTMENT_SYNONYMS.get_or_init(|| {
        const SYNONYMS: &[(&str, &str)] = &[
            ("It", "IT"),
            ("Hr", "HR"),
            ("R&D", "R&D"),
            ("Research & Development", "R&D"),
        ];

        SYNONYMS.iter().copied().collect()
    })
}

/// Yes/No style flags. Expects a capitalized value.
pub(crate) fn parse_flag(capitalized: &str) -> Option<bool> {
    match capitalized {
        "Yes" | "Y" | "True" | "1" => Some(true),
        "No" | "N" | "False" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_department_acronyms() {
        assert_eq!(canonical_department("It".to_string()), "IT");
        assert_eq!(canonical_department("Hr".to_string()), "HR");
        assert_eq!(
            canonical_department("Research & Development".to_string()),
            "R&D"
        );
    }

    #[test]
    fn unmapped_departments_pass_through() {
        assert_eq!(canonical_department("Sales".to_string()), "Sales");
        assert_eq!(canonical_department("IT".to_string()), "IT");
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("Yes"), Some(true));
        assert_eq!(parse_flag("False"), Some(false));
        assert_eq!(parse_flag("Sometimes"), None);
    }
}
