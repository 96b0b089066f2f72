//! Escaping applied to text flagged as escapable

use std::borrow::Cow;

/// Function used to encode text before it enters the document
pub type Escaper = fn(&str) -> Cow<'_, str>;

/// Escape `&`, `<`, `>`, `"` and `'` as HTML entities
pub fn html(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// Leave text untouched
pub fn none(text: &str) -> Cow<'_, str> {
    Cow::Borrowed(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escapes_markup() {
        assert_eq!(html("<b>a & b</b>"), "&lt;b&gt;a &amp; b&lt;/b&gt;");
        assert_eq!(html("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn test_html_borrows_clean_text() {
        assert!(matches!(html("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_none_is_verbatim() {
        assert_eq!(none("<raw>"), "<raw>");
    }
}
