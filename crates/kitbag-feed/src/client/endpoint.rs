//! URL helpers for the feed and product API endpoints.

use crate::error::FeedError;

/// Parses `url` as an absolute http(s) URL.
pub(super) fn parse_http_url(url: &str) -> Result<reqwest::Url, FeedError> {
    let parsed = reqwest::Url::parse(url.trim()).map_err(|e| FeedError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FeedError::InvalidUrl {
            url: url.to_owned(),
            reason: format!("unsupported scheme \"{other}\""),
        }),
    }
}

/// Builds `{api_url}/products`, tolerating a trailing slash on the base.
pub(super) fn products_url(api_url: &str) -> Result<String, FeedError> {
    let base = parse_http_url(api_url)?;
    let path = base.path().trim_end_matches('/');
    let mut url = base.clone();
    url.set_path(&format!("{path}/products"));
    url.set_query(None);
    Ok(url.to_string())
}

/// Host portion of `url`, used to label rate-limit errors.
pub(super) fn host_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
