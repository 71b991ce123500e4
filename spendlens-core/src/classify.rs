//! Keyword tagging of spend records as discretionary vs essential.

/// Substrings that mark a purchase as discretionary.
pub const DISCRETIONARY_KEYWORDS: &[&str] = &[
    "coffee",
    "starbucks",
    "amazon",
    "restaurant",
    "dining",
    "uber",
    "entertainment",
    "clothing",
    "retail",
    "bar",
    "movie",
    "apple",
    "netflix",
    "swiggy",
    "zomato",
    "blinkit",
    "ola",
    "myntra",
];

/// Substrings that mark a purchase as essential. A single hit here vetoes
/// any number of discretionary matches.
pub const ESSENTIAL_KEYWORDS: &[&str] = &[
    "rent",
    "mortgage",
    "utility",
    "grocery",
    "groceries",
    "insurance",
    "medical",
    "bill",
    "gas",
    "fuel",
    "internet",
    "phone",
    "electricity",
    "tuition",
];

/// Tag free text (a record's category, optionally joined with its
/// merchant) as discretionary. Matching is lower-cased substring
/// containment; no weighting, no partial scores.
pub fn is_discretionary(text: &str) -> bool {
    let text = text.to_lowercase();
    DISCRETIONARY_KEYWORDS.iter().any(|k| text.contains(k))
        && !ESSENTIAL_KEYWORDS.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_essential_alone_is_not_discretionary() {
        assert!(!is_discretionary("grocery run"));
    }

    #[test]
    fn test_essential_keyword_vetoes_discretionary_match() {
        assert!(!is_discretionary("starbucks grocery"));
    }

    #[test]
    fn test_discretionary_keyword_matches() {
        assert!(is_discretionary("starbucks"));
        assert!(is_discretionary("dinner at a restaurant"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert!(is_discretionary("STARBUCKS #1234"));
        assert!(!is_discretionary("RENT PAYMENT"));
    }

    #[test]
    fn test_unknown_text_defaults_to_essential() {
        assert!(!is_discretionary(""));
        assert!(!is_discretionary("misc transfer"));
    }
}
