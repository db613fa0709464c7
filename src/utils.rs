// Utility functions
use once_cell::sync::Lazy;
use regex::Regex;

static TRADEMARK_GLYPHS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[®™©]").unwrap());
static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

/// Преобразует отображаемое имя в slug: "Sinkral G-8300" → "sinkral-g-8300".
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = TRADEMARK_GLYPHS.replace_all(&lower, "");
    let cleaned = NON_SLUG_CHARS.replace_all(&stripped, "");
    let hyphenated = WHITESPACE_RUN.replace_all(cleaned.trim(), "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Разбирает числовую ячейку. Пустые ячейки и маркеры "-"/"—" дают `None`.
pub fn parse_num(val: &str) -> Option<f64> {
    let v = val.trim();
    if v.is_empty() || v == "-" || v == "—" {
        return None;
    }
    let num: f64 = v.parse().ok()?;
    // Excel date serials land in the ~40000+ range; every real measurement
    // in this catalog is below 1000.
    if num > 1000.0 {
        return None;
    }
    Some(num)
}

/// Извлекает имя бренда из заголовка секции:
/// "Styrenics / ABS / Sinkral®" → "Sinkral".
pub fn extract_brand_name(header: &str) -> String {
    let brand = header
        .split('/')
        .map(str::trim)
        .rev()
        .find(|s| !s.is_empty())
        .unwrap_or(header);
    TRADEMARK_GLYPHS.replace_all(brand, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_strips_trademark_glyphs() {
        assert_eq!(slugify("Sinkral®"), "sinkral");
        assert_eq!(slugify("Extir©"), "extir");
        assert_eq!(slugify("Edistir™"), "edistir");
    }

    #[test]
    fn test_slugify_product_name() {
        assert_eq!(slugify("Sinkral G-8300"), "sinkral-g-8300");
        assert_eq!(slugify("Versalis Revive® PS"), "versalis-revive-ps");
    }

    #[test]
    fn test_slugify_collapses_runs_and_trims() {
        assert_eq!(slugify("  Foo   Bar  "), "foo-bar");
        assert_eq!(slugify("a--b---c"), "a-b-c");
        assert_eq!(slugify("- leading and trailing -"), "leading-and-trailing");
    }

    #[test]
    fn test_slugify_drops_punctuation() {
        assert_eq!(slugify("EPS & EPS MC"), "eps-eps-mc");
        assert_eq!(slugify("Koblend® (PC-ABS)"), "koblend-pc-abs");
    }

    #[test]
    fn test_parse_num_sentinels() {
        assert_eq!(parse_num(""), None);
        assert_eq!(parse_num("   "), None);
        assert_eq!(parse_num("-"), None);
        assert_eq!(parse_num("—"), None);
    }

    #[test]
    fn test_parse_num_plain_values() {
        assert_eq!(parse_num("98"), Some(98.0));
        assert_eq!(parse_num("12.5"), Some(12.5));
        assert_eq!(parse_num(" 3.2 "), Some(3.2));
    }

    #[test]
    fn test_parse_num_rejects_unparsable() {
        assert_eq!(parse_num("Injection"), None);
        assert_eq!(parse_num("12 kJ"), None);
    }

    #[test]
    fn test_parse_num_rejects_date_serials() {
        // 45779 is what an accidentally date-formatted cell exports as
        assert_eq!(parse_num("45779"), None);
        assert_eq!(parse_num("1000.5"), None);
        // the ceiling is exclusive
        assert_eq!(parse_num("1000"), Some(1000.0));
    }

    #[test]
    fn test_extract_brand_name() {
        assert_eq!(extract_brand_name("Styrenics / ABS / Sinkral®"), "Sinkral");
        assert_eq!(
            extract_brand_name("Styrenics / GPPS-HIPS / Versalis Revive® PS"),
            "Versalis Revive PS"
        );
        assert_eq!(extract_brand_name("Styrenics / EPS & EPS MC / Extir®"), "Extir");
    }

    #[test]
    fn test_extract_brand_name_trailing_separator() {
        // a trailing "/" leaves an empty last segment, the brand is the one before it
        assert_eq!(extract_brand_name("Styrenics / SAN / Kostil® /"), "Kostil");
    }
}
