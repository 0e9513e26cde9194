use crate::UrlError;
use url::Url;

/// List of tracking query parameters to remove during normalization
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "mc_eid",
    "ref",
    "source",
    "m",
    "sid",
];

/// Canonicalizes a review-site URL so the same restaurant page always maps
/// to the same stored record
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Enforce HTTPS: Convert http:// to https://
/// 3. Lowercase the host and remove a leading www.
/// 4. Normalize path (dot segments, duplicate and trailing slashes)
/// 5. Remove fragment, tracking query parameters, and sort the rest
///
/// # Examples
///
/// ```
/// use dinescout::url::normalize_url;
///
/// let url = normalize_url(
///     "http://WWW.TRIPADVISOR.COM/Restaurant_Review-g187147-d718469-Reviews-Le_Cinq-Paris.html#REVIEWS",
/// )
/// .unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://tripadvisor.com/Restaurant_Review-g187147-d718469-Reviews-Le_Cinq-Paris.html"
/// );
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.scheme() == "http" {
        url.set_scheme("https")
            .map_err(|_| UrlError::Parse(format!("Cannot upgrade {} to https", url_str)))?;
    }

    let host = url.host_str().ok_or(UrlError::MissingDomain)?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    url.set_host(Some(&host))
        .map_err(|e| UrlError::Parse(format!("Failed to set host: {}", e)))?;

    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    url.set_fragment(None);

    if url.query().is_some() {
        let filtered_params = filter_and_sort_query_params(&url);

        if filtered_params.is_empty() {
            url.set_query(None);
        } else {
            let query_string = filtered_params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&query_string));
        }
    }

    Ok(url)
}

/// Normalizes a URL path by removing dot segments and trailing slashes
fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    // Split path into segments and normalize
    let segments: Vec<&str> = path.split('/').collect();
    let mut normalized_segments: Vec<&str> = Vec::new();

    for segment in segments {
        match segment {
            // Skip empty segments (from multiple slashes) and current directory markers
            "" | "." => continue,
            // Parent directory - pop the last segment if possible
            ".." => {
                if !normalized_segments.is_empty() {
                    normalized_segments.pop();
                }
            }
            // Regular segment
            _ => normalized_segments.push(segment),
        }
    }

    // Reconstruct path
    if normalized_segments.is_empty() {
        return "/".to_string();
    }

    let result = format!("/{}", normalized_segments.join("/"));

    // Remove trailing slash unless it's the root
    if result.len() > 1 && result.ends_with('/') {
        result[..result.len() - 1].to_string()
    } else {
        result
    }
}

/// Filters out tracking parameters and sorts remaining query parameters
fn filter_and_sort_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    // Sort by key
    params.sort_by(|a, b| a.0.cmp(&b.0));

    params
}

/// Checks if a query parameter is a tracking parameter
fn is_tracking_param(key: &str) -> bool {
    // Check exact matches
    if TRACKING_PARAMS.contains(&key) {
        return true;
    }

    // Check for utm_* prefix (catches any utm parameter)
    if key.starts_with("utm_") {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "Restaurant_Review-g187147-d718469-Reviews-Le_Cinq-Paris.html";

    #[test]
    fn test_http_upgraded_and_www_removed() {
        let result = normalize_url(&format!("http://www.tripadvisor.com/{}", PAGE)).unwrap();
        assert_eq!(
            result.as_str(),
            format!("https://tripadvisor.com/{}", PAGE)
        );
    }

    #[test]
    fn test_regional_domain_kept() {
        let result = normalize_url(&format!("https://www.tripadvisor.co.uk/{}", PAGE)).unwrap();
        assert_eq!(result.host_str(), Some("tripadvisor.co.uk"));
    }

    #[test]
    fn test_remove_fragment_and_trailing_slash() {
        let result =
            normalize_url("https://tripadvisor.com/Restaurants-g187147-Paris/#EATERY_LIST").unwrap();
        assert_eq!(
            result.as_str(),
            "https://tripadvisor.com/Restaurants-g187147-Paris"
        );
    }

    #[test]
    fn test_remove_tracking_params() {
        let result = normalize_url(&format!(
            "https://tripadvisor.com/{}?utm_source=share&m=19905&fbclid=abc",
            PAGE
        ))
        .unwrap();
        assert_eq!(result.as_str(), format!("https://tripadvisor.com/{}", PAGE));
    }

    #[test]
    fn test_sort_query_params() {
        let result = normalize_url("https://tripadvisor.com/Search?q=bistro&geo=187147").unwrap();
        assert_eq!(
            result.as_str(),
            "https://tripadvisor.com/Search?geo=187147&q=bistro"
        );
    }

    #[test]
    fn test_path_case_preserved() {
        let result = normalize_url(&format!("https://TRIPADVISOR.COM/{}", PAGE)).unwrap();
        assert!(result.path().contains("Le_Cinq"));
    }

    #[test]
    fn test_normalize_path_with_dots() {
        let result = normalize_url("https://tripadvisor.com/a/../b/./c").unwrap();
        assert_eq!(result.as_str(), "https://tripadvisor.com/b/c");
    }

    #[test]
    fn test_invalid_scheme() {
        let result = normalize_url("ftp://tripadvisor.com/page");
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_malformed_url() {
        assert!(matches!(normalize_url("not a url"), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_empty_path_becomes_root() {
        let result = normalize_url("https://tripadvisor.com").unwrap();
        assert_eq!(result.as_str(), "https://tripadvisor.com/");
    }
}
