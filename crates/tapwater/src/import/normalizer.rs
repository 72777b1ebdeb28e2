/// Strip byte-order marks and zero-width spaces that spreadsheet exports leave behind,
/// then collapse runs of whitespace.
pub(crate) fn clean_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `"St. Louis Park"` becomes `"st-louis-park"`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for ch in clean_text(value).chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if ch == '.' || ch == '\'' {
            continue;
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

pub(crate) fn state_code(value: &str) -> String {
    clean_text(value).to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_removes_invisible_characters() {
        assert_eq!(clean_text("\u{feff}Salt  Lake\u{200b} City "), "Salt Lake City");
    }

    #[test]
    fn slugify_builds_url_slugs() {
        assert_eq!(slugify("St. Louis Park"), "st-louis-park");
        assert_eq!(slugify("Coeur d'Alene"), "coeur-dalene");
        assert_eq!(slugify("  WINSTON-SALEM  "), "winston-salem");
        assert_eq!(slugify("Town / Village of Ossining"), "town-village-of-ossining");
    }

    #[test]
    fn state_codes_are_upper_cased() {
        assert_eq!(state_code(" tx "), "TX");
    }
}
