use std::borrow::Cow;

use crate::core::config::PluginConfig;

/// Decides whether shared content is a link this plugin should summarize.
///
/// Matching is plain string-prefix matching on the trimmed content, not URL parsing:
/// 1. the content must start with `http://` or `https://`
/// 2. a non-empty `white_url_list` must contain a prefix of it
/// 3. no entry of `black_url_list` may be a prefix of it
#[must_use]
pub fn check_url(candidate: &str, config: &PluginConfig) -> bool {
    let stripped = candidate.trim();
    if !(stripped.starts_with("http://") || stripped.starts_with("https://")) {
        return false;
    }

    if !config.white_url_list.is_empty()
        && !config
            .white_url_list
            .iter()
            .any(|white| stripped.starts_with(white.as_str()))
    {
        return false;
    }

    !config
        .black_url_list
        .iter()
        .any(|black| stripped.starts_with(black.as_str()))
}

/// Jina Reader takes the target URL as a raw path suffix, so it is appended verbatim
/// with no percent-encoding. Query strings and fragments go along unchanged.
#[must_use]
pub fn build_reader_url(target_url: &str, reader_base: &str) -> String {
    format!("{reader_base}/{target_url}")
}

/// Recovers the literal URL from message content that the chat client HTML-escaped
/// (`&amp;` back to `&` and so on).
#[must_use]
pub fn unescape_shared_url(content: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(content.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let config = PluginConfig::default();
        assert!(check_url("  https://example.com/post\n", &config));
    }

    #[test]
    fn empty_deny_list_accepts_any_http_link() {
        let config = PluginConfig {
            black_url_list: Vec::new(),
            ..PluginConfig::default()
        };
        assert!(check_url("http://support.weixin.qq.com/x", &config));
    }

    #[test]
    fn unescape_leaves_plain_urls_borrowed() {
        let url = unescape_shared_url("https://example.com/a");
        assert!(matches!(url, Cow::Borrowed(_)));
    }
}
