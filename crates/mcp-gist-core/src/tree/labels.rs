//! Localized tree view text

/// Text shown by the tree view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLabels {
    /// Single node shown when no URL is configured
    pub no_urls: String,
    /// Prefix of a per-URL error node
    pub error_prefix: String,
    /// Placeholder for a missing record field in tooltips
    pub unknown: String,
}

impl Default for TreeLabels {
    fn default() -> Self {
        Self::english()
    }
}

impl TreeLabels {
    pub fn english() -> Self {
        Self {
            no_urls: "No MCP URLs configured".to_string(),
            error_prefix: "Error".to_string(),
            unknown: "unknown".to_string(),
        }
    }

    pub fn japanese() -> Self {
        Self {
            no_urls: "MCP URLが設定されていません".to_string(),
            error_prefix: "エラー".to_string(),
            unknown: "unknown".to_string(),
        }
    }

    /// Pick labels for a host locale tag such as `en-US` or `ja`
    pub fn for_locale(locale: &str) -> Self {
        let language = locale.split(['-', '_']).next().unwrap_or_default();
        if language.eq_ignore_ascii_case("ja") {
            Self::japanese()
        } else {
            Self::english()
        }
    }

    /// Text of an error node
    pub fn error(&self, message: &str) -> String {
        format!("{}: {}", self.error_prefix, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_locale() {
        assert_eq!(TreeLabels::for_locale("ja"), TreeLabels::japanese());
        assert_eq!(TreeLabels::for_locale("ja-JP"), TreeLabels::japanese());
        assert_eq!(TreeLabels::for_locale("en-US"), TreeLabels::english());
        assert_eq!(TreeLabels::for_locale(""), TreeLabels::english());
    }

    #[test]
    fn test_error_text() {
        assert_eq!(TreeLabels::english().error("boom"), "Error: boom");
        assert_eq!(TreeLabels::japanese().error("boom"), "エラー: boom");
    }
}
