use regex::Regex;

/// Plain-text view of a document, derived once per file and immutable
/// thereafter. Both the word-count and keyword-density criteria read from it.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub plain_text: String,
    pub word_count: usize,
}

/// Derive plain text and a word count from raw document content.
///
/// Tag removal is a best-effort `<...>` deletion, not a parse; malformed
/// markup degrades gracefully instead of failing. Content inside comments
/// and scripts may be mis-detected as text. Empty or tag-only input yields
/// a word count of 0 without error.
pub fn extract_text(content: &str) -> ExtractedText {
    // Remove HTML tags
    let tag_regex = Regex::new(r"<[^>]*>").unwrap();
    let mut text = tag_regex.replace_all(content, " ").to_string();

    // Decode the common entities so they count as ordinary text
    text = text.replace("&nbsp;", " ");
    text = text.replace("&amp;", "&");
    text = text.replace("&lt;", "<");
    text = text.replace("&gt;", ">");
    text = text.replace("&quot;", "\"");

    // Normalize whitespace
    let ws_regex = Regex::new(r"\s+").unwrap();
    let plain_text = ws_regex.replace_all(&text, " ").trim().to_string();

    let word_regex = Regex::new(r"[\w'-]+").unwrap();
    let word_count = word_regex.find_iter(&plain_text).count();

    ExtractedText {
        plain_text,
        word_count,
    }
}

/// Non-overlapping, case-insensitive occurrences of `keyword` in `text`.
pub fn count_keyword(text: &str, keyword: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }
    let haystack = text.to_lowercase();
    let needle = keyword.to_lowercase();
    haystack.matches(&needle).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_counts_words() {
        let extracted = extract_text("<html><body><p>hello wonderful world</p></body></html>");
        assert_eq!(extracted.plain_text, "hello wonderful world");
        assert_eq!(extracted.word_count, 3);
    }

    #[test]
    fn empty_content_yields_zero_words() {
        let extracted = extract_text("");
        assert_eq!(extracted.word_count, 0);
        assert!(extracted.plain_text.is_empty());
    }

    #[test]
    fn tag_only_content_yields_zero_words() {
        let extracted = extract_text("<html><head></head><body><div></div></body></html>");
        assert_eq!(extracted.word_count, 0);
    }

    #[test]
    fn malformed_markup_does_not_fail() {
        let extracted = extract_text("<p>open tag only <b>bold text");
        assert_eq!(extracted.word_count, 5);
    }

    #[test]
    fn entities_decode_before_tokenizing() {
        let extracted = extract_text("<p>fish&nbsp;&amp;&nbsp;chips</p>");
        assert_eq!(extracted.plain_text, "fish & chips");
        assert_eq!(extracted.word_count, 2);
    }

    #[test]
    fn keyword_count_is_case_insensitive() {
        assert_eq!(count_keyword("SEO tips for seo beginners, SeO!", "seo"), 3);
    }

    #[test]
    fn keyword_count_on_empty_text_is_zero() {
        assert_eq!(count_keyword("", "seo"), 0);
        assert_eq!(count_keyword("some text", ""), 0);
    }
}
