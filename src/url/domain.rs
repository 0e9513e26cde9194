use url::Url;

/// Extracts the lowercase host from a URL
///
/// Returns `None` for URLs without a host (e.g. `mailto:`).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use dinescout::url::extract_domain;
///
/// let url = Url::parse("https://WWW.TripAdvisor.com/Restaurants-g187147").unwrap();
/// assert_eq!(extract_domain(&url), Some("www.tripadvisor.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_review_site_host() {
        let url = Url::parse("https://www.tripadvisor.com/Restaurant_Review-g1-d2.html").unwrap();
        assert_eq!(extract_domain(&url), Some("www.tripadvisor.com".to_string()));
    }

    #[test]
    fn test_extract_regional_host() {
        let url = Url::parse("https://www.tripadvisor.co.uk/").unwrap();
        assert_eq!(extract_domain(&url), Some("www.tripadvisor.co.uk".to_string()));
    }

    #[test]
    fn test_extract_ignores_port() {
        let url = Url::parse("http://localhost:3001/api/health").unwrap();
        assert_eq!(extract_domain(&url), Some("localhost".to_string()));
    }

    #[test]
    fn test_extract_mixed_case() {
        let url = Url::parse("https://TripAdvisor.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("tripadvisor.com".to_string()));
    }

    #[test]
    fn test_no_host() {
        let url = Url::parse("mailto:owner@restaurant.example").unwrap();
        assert_eq!(extract_domain(&url), None);
    }
}
