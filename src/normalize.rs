use unicode_normalization::UnicodeNormalization;

/// Canonical form for every identifier the engine compares: skills,
/// industries, languages, regions, timezones.
///
/// NFKC fold, lowercase, and separator stripping, so that "Middle-East",
/// "middle east" and "ＭｉｄｄｌｅＥａｓｔ" all collapse to "middleeast".
/// Defined once and reused by every scorer; ad hoc per-call-site comparisons
/// are what this function exists to prevent.
pub fn normalize_identifier(input: &str) -> String {
    input
        .nfkc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '　' | '.' | '-' | '_' | '/' | '・' | ','))
        .collect()
}

/// Equality on normalized identifiers.
pub fn identifier_eq(a: &str, b: &str) -> bool {
    let na = normalize_identifier(a);
    na == normalize_identifier(b) && !na.is_empty()
}

/// Containment-tolerant comparison used where one side may be broader than
/// the other (e.g. candidate industry "Technology" vs category "tech").
/// The shorter side must be at least 3 characters to count as contained,
/// otherwise single letters would match almost anything.
pub fn identifier_matches(a: &str, b: &str) -> bool {
    let na = normalize_identifier(a);
    let nb = normalize_identifier(b);
    if na.is_empty() || nb.is_empty() {
        return false;
    }
    if na == nb {
        return true;
    }
    let (short, long) = if na.len() <= nb.len() { (&na, &nb) } else { (&nb, &na) };
    short.len() >= 3 && long.contains(short.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_case_and_separators() {
        assert_eq!(normalize_identifier("Middle East"), "middleeast");
        assert_eq!(normalize_identifier("middle-east"), "middleeast");
        assert_eq!(normalize_identifier("Node.js"), "nodejs");
        assert_eq!(normalize_identifier("ＡＷＳ"), "aws");
    }

    #[test]
    fn identifier_eq_ignores_formatting() {
        assert!(identifier_eq("Customer Support", "customer-support"));
        assert!(identifier_eq("Asia-Pacific", "asia pacific"));
        assert!(!identifier_eq("europe", "asia"));
        assert!(!identifier_eq("", ""));
    }

    #[test]
    fn containment_requires_three_chars() {
        assert!(identifier_matches("Technology", "tech"));
        assert!(identifier_matches("tech", "Technology"));
        assert!(!identifier_matches("t", "Technology"));
        assert!(!identifier_matches("it", "fitness"));
    }
}
