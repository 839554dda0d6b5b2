//! Share links for a single message.

use reqwest::Url;

const TWEET_INTENT: &str = "https://twitter.com/intent/tweet";
const TWEET_MAX_CHARS: usize = 280;

/// X/Twitter intent URL carrying the first 280 characters of `content`.
pub fn tweet_url(content: &str) -> String {
    let text: String = content.chars().take(TWEET_MAX_CHARS).collect();
    match Url::parse_with_params(TWEET_INTENT, &[("text", text.as_str())]) {
        Ok(url) => url.to_string(),
        Err(_) => TWEET_INTENT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_text() {
        let url = tweet_url("R135,000 & more");
        assert!(url.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(!url.contains(' '));
        assert!(url.contains("%26"));
    }

    #[test]
    fn truncates_on_char_boundary() {
        let long = "é".repeat(400);
        let url = Url::parse(&tweet_url(&long)).unwrap();
        let text = url
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(text.chars().count(), 280);
    }
}
