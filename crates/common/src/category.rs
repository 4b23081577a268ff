/// Fixed (code, label) table, in the API's documented order.
const CATEGORIES: [(&str, &str); 18] = [
    ("MT1", "대형마트"),
    ("CS2", "편의점"),
    ("PS3", "어린이집, 유치원"),
    ("SC4", "학교"),
    ("AC5", "학원"),
    ("PK6", "주차장"),
    ("OL7", "주유소, 충전소"),
    ("SW8", "지하철역"),
    ("BK9", "은행"),
    ("CT1", "문화시설"),
    ("AG2", "중개업소"),
    ("PO3", "공공기관"),
    ("AT4", "관광명소"),
    ("AD5", "숙박"),
    ("FD6", "음식점"),
    ("CE7", "카페"),
    ("HP8", "병원"),
    ("PM9", "약국"),
];

/// A single category group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Category {
    pub code: &'static str,
    pub label: &'static str,
}

/// Resolve a human-readable category label to its category group code.
///
/// Matching is exact and case-sensitive. A label with no entry is returned
/// unchanged, so callers may pass a raw code such as `"HP8"` directly.
pub fn resolve(label: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|(_, l)| *l == label)
        .map(|(code, _)| *code)
        .unwrap_or(label)
}

/// Reverse lookup: the label registered for a category group code.
pub fn label_for(code: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

/// All categories in table order.
pub fn all() -> impl Iterator<Item = Category> {
    CATEGORIES
        .iter()
        .map(|&(code, label)| Category { code, label })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resolve_known_labels() {
        assert_eq!(resolve("병원"), "HP8");
        assert_eq!(resolve("편의점"), "CS2");
        assert_eq!(resolve("주유소, 충전소"), "OL7");
        assert_eq!(resolve("어린이집, 유치원"), "PS3");
    }

    #[test]
    fn test_resolve_every_entry() {
        for category in all() {
            assert_eq!(resolve(category.label), category.code);
        }
    }

    #[test]
    fn test_unknown_label_passes_through() {
        assert_eq!(resolve("HP8"), "HP8");
        assert_eq!(resolve("동물병원"), "동물병원");
        assert_eq!(resolve(""), "");
    }

    #[test]
    fn test_no_normalization() {
        // Partial labels and surrounding whitespace are not matched.
        assert_eq!(resolve("주유소"), "주유소");
        assert_eq!(resolve(" 병원"), " 병원");
    }

    #[test]
    fn test_codes_and_labels_unique() {
        let codes: HashSet<_> = all().map(|c| c.code).collect();
        let labels: HashSet<_> = all().map(|c| c.label).collect();
        assert_eq!(codes.len(), 18);
        assert_eq!(labels.len(), 18);
    }

    #[test]
    fn test_label_for() {
        assert_eq!(label_for("CE7"), Some("카페"));
        assert_eq!(label_for("XX0"), None);
    }
}
