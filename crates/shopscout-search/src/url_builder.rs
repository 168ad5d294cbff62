use crate::error::{Result, ScrapeError};
use shopscout_core::{SearchQuery, SiteConfig};

/// Build the storefront search URL for a query.
///
/// The query is percent-encoded, so spaces become `%20`.
pub fn build_search_url(site: &SiteConfig, query: &SearchQuery) -> Result<String> {
    let base = url::Url::parse(&site.base_url).map_err(|e| ScrapeError::InvalidSite {
        reason: format!("base_url '{}': {e}", site.base_url),
    })?;

    if base.host_str().is_none() {
        return Err(ScrapeError::InvalidSite {
            reason: format!("base_url '{}' has no host", site.base_url),
        });
    }

    let path = if site.search_path.starts_with('/') {
        site.search_path.clone()
    } else {
        format!("/{}", site.search_path)
    };

    Ok(format!(
        "{}{}?{}={}",
        site.base_url.trim_end_matches('/'),
        path,
        site.query_param,
        urlencoding::encode(query.as_str())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(q: &str) -> SearchQuery {
        SearchQuery::new(q).expect("valid query")
    }

    #[test]
    fn test_build_url_encodes_spaces() {
        let url = build_search_url(&SiteConfig::default(), &query("linen shirt"))
            .expect("should build URL");
        assert_eq!(url, "https://www.westside.com/pages/search?q=linen%20shirt");
    }

    #[test]
    fn test_build_url_encodes_reserved_characters() {
        let url = build_search_url(&SiteConfig::default(), &query("tops & tees"))
            .expect("should build URL");
        assert_eq!(
            url,
            "https://www.westside.com/pages/search?q=tops%20%26%20tees"
        );
    }

    #[test]
    fn test_build_url_normalizes_slashes() {
        let site = SiteConfig {
            base_url: "https://example.com/".to_string(),
            search_path: "search".to_string(),
            ..SiteConfig::default()
        };
        let url = build_search_url(&site, &query("kurta")).expect("should build URL");
        assert_eq!(url, "https://example.com/search?q=kurta");
    }

    #[test]
    fn test_build_url_rejects_bad_base() {
        let site = SiteConfig {
            base_url: "westside".to_string(),
            ..SiteConfig::default()
        };
        let err = build_search_url(&site, &query("kurta")).expect_err("relative base must fail");
        assert!(matches!(err, ScrapeError::InvalidSite { .. }));
    }
}
