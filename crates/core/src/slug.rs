use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalises text for loose matching: accents stripped, lowercase, spaces
/// turned into hyphens.
///
/// ```
/// use menucon_core::slug::slug;
///
/// assert_eq!(slug("Configuração Geral"), "configuracao-geral");
/// ```
#[must_use]
pub fn slug(text: &str) -> String {
    let stripped: String = text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect();
    stripped.to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_lowercases_and_hyphenates() {
        assert_eq!(slug("Alpha Beta"), "alpha-beta");
    }

    #[test]
    fn test_slug_strips_accents() {
        assert_eq!(slug("Ação Rápida"), "acao-rapida");
        assert_eq!(slug("Über naïve"), "uber-naive");
    }

    #[test]
    fn test_slug_keeps_other_characters() {
        assert_eq!(slug("a_b-c.d"), "a_b-c.d");
        assert_eq!(slug(""), "");
    }
}
