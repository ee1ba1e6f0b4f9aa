//! Slug derivation for catalog identifiers.
//!
//! Product and category ids are slugs derived from their display names:
//! lowercase, Portuguese accents folded to ASCII, whitespace collapsed to
//! single dashes, everything else dropped.

/// Derive a slug from a display name.
///
/// `"Bolha de Sabão"` becomes `"bolha-de-sabao"`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        let c = fold_accent(c);
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
        // Any other punctuation is dropped without producing a dash.
    }

    slug
}

/// Fold common Latin accented characters to their ASCII base.
const fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_portuguese_accents() {
        assert_eq!(slugify("Bolha de Sabão"), "bolha-de-sabao");
        assert_eq!(slugify("Cofrinho Unicórnio"), "cofrinho-unicornio");
        assert_eq!(slugify("Coração"), "coracao");
    }

    #[test]
    fn test_collapses_and_trims_separators() {
        assert_eq!(slugify("  Kit   Festa -- Completo  "), "kit-festa-completo");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_drops_punctuation_without_dash() {
        assert_eq!(slugify("Pula-Pula!"), "pula-pula");
        assert_eq!(slugify("Mega (Promo) 50%"), "mega-promo-50");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
