//! Event name matching for duplicate detection

use chrono::NaiveDate;

/// Names at least this similar (after normalisation) are duplicate candidates
pub const SIMILARITY_THRESHOLD: f64 = 0.80;

/// Trimmed, lower-cased, inner whitespace collapsed to single spaces
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Edit distance over chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// `1 - distance / max_len` of the normalised names, in `0.0..=1.0`
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a = normalize_name(a);
    let b = normalize_name(b);
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / max_len as f64
}

/// `(start_date, end_date)` of an event
pub type DateRange = (NaiveDate, NaiveDate);

/// Same start and end dates and equal or similar enough names
pub fn is_duplicate(name_a: &str, dates_a: DateRange, name_b: &str, dates_b: DateRange) -> bool {
    if dates_a != dates_b {
        return false;
    }
    normalize_name(name_a) == normalize_name(name_b)
        || similarity_ratio(name_a, name_b) >= SIMILARITY_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("žluť", "zluť"), 1);
    }

    fn day(s: &str) -> DateRange {
        (date(s), date(s))
    }

    #[test]
    fn test_trailing_space_is_duplicate() {
        let d = day("2025-06-12");
        assert!(is_duplicate("DevConf 2025", d, "DevConf 2025 ", d));
        assert!(is_duplicate("devconf  2025", d, "DevConf 2025", d));
    }

    #[test]
    fn test_similar_names_over_threshold() {
        let d = day("2025-09-01");
        // one deletion in 18 chars
        assert!(is_duplicate("Open Source Summit", d, "Open Source Sumit", d));
        assert!(!is_duplicate("KubeCon EU", d, "PyCon US", d));
    }

    #[test]
    fn test_different_dates_never_match() {
        assert!(!is_duplicate(
            "DevConf 2025",
            day("2025-06-12"),
            "DevConf 2025",
            day("2025-06-13")
        ));
    }

    #[test]
    fn test_different_end_date_is_not_duplicate() {
        let stored = (date("2025-06-12"), date("2025-06-14"));
        let extended = (date("2025-06-12"), date("2025-06-15"));
        assert!(!is_duplicate("DevConf 2025", stored, "DevConf 2025", extended));
        assert!(is_duplicate("DevConf 2025", stored, "devconf 2025", stored));
    }
}
