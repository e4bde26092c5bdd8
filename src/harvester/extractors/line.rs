// Line extractor - pairs each URL with the text before it on the same line
//
// Example line:
//     site for google: http://www.google.com
// yields { text: "site for google:", link: "http://www.google.com" }.
//
// Lines are scanned independently, so a URL broken across a newline is not
// detected. Text after the last URL of a line is dropped.

use lazy_static::lazy_static;
use regex::Regex;

use super::traits::LinkExtractor;
use crate::harvester::models::LinkEntry;

lazy_static! {
    /// Scheme followed by the longest run of non-whitespace characters
    pub(crate) static ref URL_RE: Regex = Regex::new(r"https?://\S+").unwrap();
}

/// Canonical extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct LineExtractor;

impl LineExtractor {
    fn extract_line(line: &str, out: &mut Vec<LinkEntry>) {
        let mut cursor = 0;
        for m in URL_RE.find_iter(line) {
            out.push(LinkEntry::new(line[cursor..m.start()].trim(), m.as_str()));
            cursor = m.end();
        }
    }
}

impl LinkExtractor for LineExtractor {
    fn name(&self) -> &'static str {
        "line"
    }

    fn extract(&self, description: &str) -> Vec<LinkEntry> {
        let mut links = Vec::new();
        for line in description.split('\n') {
            Self::extract_line(line, &mut links);
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<(String, String)> {
        LineExtractor
            .extract(text)
            .into_iter()
            .map(|e| (e.text, e.link))
            .collect()
    }

    fn pair(text: &str, link: &str) -> (String, String) {
        (text.to_string(), link.to_string())
    }

    #[test]
    fn test_text_precedes_each_link() {
        let text = "Check this out: https://a.example/x\nAlso https://b.example/y and https://c.example/z";
        assert_eq!(
            extract(text),
            vec![
                pair("Check this out:", "https://a.example/x"),
                pair("Also", "https://b.example/y"),
                pair("and", "https://c.example/z"),
            ]
        );
    }

    #[test]
    fn test_url_only_line_has_empty_text() {
        assert_eq!(
            extract("http://www.google.com"),
            vec![pair("", "http://www.google.com")]
        );
    }

    #[test]
    fn test_adjacent_urls() {
        assert_eq!(
            extract("links: https://one.example   https://two.example"),
            vec![pair("links:", "https://one.example"), pair("", "https://two.example")]
        );
    }

    #[test]
    fn test_trailing_text_dropped() {
        assert_eq!(
            extract("Please visit http://example1.com or http://example2.com today!"),
            vec![
                pair("Please visit", "http://example1.com"),
                pair("or", "http://example2.com"),
            ]
        );
    }

    #[test]
    fn test_trailing_punctuation_kept() {
        assert_eq!(
            extract("(see https://example.com/page)."),
            vec![pair("(see", "https://example.com/page).")]
        );
    }

    #[test]
    fn test_no_links() {
        assert!(extract("").is_empty());
        assert!(extract("no links here\nnor here: www.example.com\nftp://files.example").is_empty());
    }

    #[test]
    fn test_url_split_across_lines_not_joined() {
        assert_eq!(
            extract("broken https://exa\nmple.com/path"),
            vec![pair("broken", "https://exa")]
        );
    }

    #[test]
    fn test_crlf_and_unicode() {
        assert_eq!(
            extract("Музыка: https://music.example/трек\r\n\tTwitter →  https://x.example\r\n"),
            vec![
                pair("Музыка:", "https://music.example/трек"),
                pair("Twitter →", "https://x.example"),
            ]
        );
    }

    #[test]
    fn test_scheme_inside_word_still_matches() {
        // No word boundary is required before the scheme
        assert_eq!(
            extract("mirror:https://m.example"),
            vec![pair("mirror:", "https://m.example")]
        );
    }

    #[test]
    fn test_count_matches_line_scan() {
        let text = "a https://1 b https://2\n\nhttp://3\nnothing\nx http://4 y http://5 z https://6";
        let expected: usize = text.split('\n').map(|l| URL_RE.find_iter(l).count()).sum();
        assert_eq!(extract(text).len(), expected);
        assert_eq!(expected, 6);
    }

    #[test]
    fn test_idempotent() {
        let text = "one https://a\ntwo https://b https://c";
        assert_eq!(extract(text), extract(text));
    }
}
