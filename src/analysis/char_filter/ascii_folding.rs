use deunicode::deunicode_with_tofu;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::CharFilter;

/// A char filter that transliterates text to ASCII.
///
/// The input is decomposed (NFKD) and combining marks are dropped, which turns
/// `é` into `e` and `ç` into `c`. Whatever is still outside ASCII is
/// transliterated (`œ` to `oe`, `Ω` to `O`, `’` to `'`); characters without a
/// transliteration are removed. The output is always ASCII.
#[derive(Clone, Debug, Default)]
pub struct AsciiFoldingCharFilter;

impl AsciiFoldingCharFilter {
    pub fn new() -> Self {
        AsciiFoldingCharFilter
    }
}

impl CharFilter for AsciiFoldingCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            return input.to_string();
        }

        let stripped: String = input.nfkd().filter(|&c| !is_combining_mark(c)).collect();
        if stripped.is_ascii() {
            return stripped;
        }
        deunicode_with_tofu(&stripped, "")
    }

    fn name(&self) -> &'static str {
        "ascii_folding"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_french_diacritics() {
        let filter = AsciiFoldingCharFilter::new();
        assert_eq!(filter.filter("éèêëàâîïôûùüÿç"), "eeeeaaiiouuuyc");
        assert_eq!(filter.filter("ÉCOLE"), "ECOLE");
    }

    #[test]
    fn test_decomposed_input() {
        let filter = AsciiFoldingCharFilter::new();
        assert_eq!(filter.filter("e\u{0301}te\u{0301}"), "ete");
    }

    #[test]
    fn test_ligatures() {
        let filter = AsciiFoldingCharFilter::new();
        assert_eq!(filter.filter("cœur"), "coeur");
        assert_eq!(filter.filter("Æsop"), "AEsop");
        assert_eq!(filter.filter("straße"), "strasse");
    }

    #[test]
    fn test_output_is_ascii() {
        let filter = AsciiFoldingCharFilter::new();
        for input in ["aujourd’hui", "Ωméga", "ŀlama", "naïve«", "漢字", "łódź", "🙂"] {
            let output = filter.filter(input);
            assert!(output.is_ascii(), "{input:?} folded to {output:?}");
        }
        assert_eq!(filter.filter("aujourd’hui"), "aujourd'hui");
    }

    #[test]
    fn test_ascii_unchanged() {
        let filter = AsciiFoldingCharFilter::new();
        assert_eq!(filter.filter("kilo-123"), "kilo-123");
        assert_eq!(filter.filter(""), "");
    }
}
