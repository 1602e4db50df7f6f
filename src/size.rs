
pub const SIZE_ORDER: [&str; 8] = ["XXS", "XS", "S", "M", "L", "XL", "2XL", "3XL"];

const SIZE_SYNONYMS: &[(&str, &str)] = &[
    ("XXL", "2XL"),
    ("XXXL", "3XL"),
    ("XSS", "XS"),
    ("SMALL", "S"),
    ("MEDIUM", "M"),
    ("LARGE", "L"),
    ("EXTRA SMALL", "XS"),
    ("EXTRA LARGE", "XL"),
    ("EXTRA EXTRA LARGE", "2XL"),
    ("EXTRA EXTRA EXTRA LARGE", "3XL"),
    ("CHICO", "S"),
    ("MEDIANO", "M"),
    ("GRANDE", "L"),
];

const CANADA_LABELS: &[(&str, &str)] = &[
    ("S", "S/P"),
    ("M", "M/M"),
    ("L", "L/G"),
    ("XL", "XL/TG"),
    ("2XL", "2XL/TTG"),
    ("3XL", "3XL/TTTG"),
];

const BRAZIL_LABELS: &[(&str, &str)] = &[
    ("XS", "XS/PP"),
    ("S", "S/P"),
    ("M", "M/M"),
    ("L", "L/G"),
    ("XL", "XL/GG"),
    ("2XL", "XXL/XGG"),
];

pub fn normalize(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if SIZE_ORDER.contains(&upper.as_str()) {
        return upper;
    }
    SIZE_SYNONYMS
        .iter()
        .find(|(from, _)| *from == upper)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or(upper)
}

pub fn is_size_token(token: &str) -> bool {
    let upper = token.trim().to_uppercase();
    SIZE_ORDER.contains(&upper.as_str())
        || SIZE_SYNONYMS.iter().any(|(from, _)| *from == upper)
}

pub fn sort_rank(size: &str) -> usize {
    SIZE_ORDER
        .iter()
        .position(|candidate| *candidate == size)
        .unwrap_or(SIZE_ORDER.len())
}

pub fn relabel(size: &str, labels: &[(&str, &str)]) -> String {
    let upper = size.trim().to_uppercase();
    labels
        .iter()
        .find(|(from, _)| *from == upper)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or(upper)
}

pub fn canada_label(size: &str) -> String {
    relabel(size, CANADA_LABELS)
}

pub fn brazil_label(size: &str) -> String {
    relabel(size, BRAZIL_LABELS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_synonyms_to_canonical_tokens() {
        assert_eq!(normalize("Extra Large"), "XL");
        assert_eq!(normalize("XXL"), "2XL");
        assert_eq!(normalize(" small "), "S");
        assert_eq!(normalize("GRANDE"), "L");
    }

    #[test]
    fn normalize_passes_unknown_sizes_through_upper_cased() {
        assert_eq!(normalize("freeform-size"), "FREEFORM-SIZE");
        assert_eq!(normalize("28/30"), "28/30");
    }

    #[test]
    fn sort_rank_orders_canonical_sizes_and_pushes_unknowns_last() {
        assert!(sort_rank("XXS") < sort_rank("XS"));
        assert!(sort_rank("XL") < sort_rank("2XL"));
        assert!(sort_rank("2XL") < sort_rank("ONE SIZE"));
        assert_eq!(sort_rank("ONE SIZE"), SIZE_ORDER.len());
    }

    #[test]
    fn size_tokens_cover_synonyms_but_not_arbitrary_headers() {
        assert!(is_size_token("2XL"));
        assert!(is_size_token("xxl"));
        assert!(is_size_token("MEDIANO"));
        assert!(!is_size_token("DESTINO"));
    }

    #[test]
    fn regional_labels_apply_only_where_defined() {
        assert_eq!(canada_label("S"), "S/P");
        assert_eq!(canada_label("XXS"), "XXS");
        assert_eq!(brazil_label("XL"), "XL/GG");
        assert_eq!(brazil_label("2XL"), "XXL/XGG");
    }
}
