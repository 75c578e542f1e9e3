use std::fmt::Write;

use super::CharFilter;

/// A char filter that keeps Latin-1 characters and escapes everything else.
///
/// Characters above U+00FF are replaced by a decimal character reference
/// (`&#8217;` for `’`), so no information is lost and the output vocabulary
/// stays small.
#[derive(Clone, Debug, Default)]
pub struct Latin1EscapeCharFilter;

impl Latin1EscapeCharFilter {
    pub fn new() -> Self {
        Latin1EscapeCharFilter
    }
}

impl CharFilter for Latin1EscapeCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());

        for c in input.chars() {
            if (c as u32) <= 0xFF {
                output.push(c);
            } else {
                // Writing to a String cannot fail.
                let _ = write!(output, "&#{};", c as u32);
            }
        }

        output
    }

    fn name(&self) -> &'static str {
        "latin1_escape"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_passthrough() {
        let filter = Latin1EscapeCharFilter::new();
        assert_eq!(filter.filter("déjà vu, garçon"), "déjà vu, garçon");
    }

    #[test]
    fn test_escapes_outside_latin1() {
        let filter = Latin1EscapeCharFilter::new();
        assert_eq!(filter.filter("l’eau"), "l&#8217;eau");
        assert_eq!(filter.filter("cœur"), "c&#339;ur");
        assert_eq!(filter.filter("漢"), "&#28450;");
    }

    #[test]
    fn test_empty() {
        assert_eq!(Latin1EscapeCharFilter::new().filter(""), "");
    }
}
