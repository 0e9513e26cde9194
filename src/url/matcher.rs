/// Checks if a domain matches a wildcard pattern
///
/// Two kinds of pattern are supported:
/// 1. Exact match: "tripadvisor.com" matches only "tripadvisor.com"
/// 2. Wildcard match: "*.tripadvisor.com" matches the bare domain and any
///    subdomain ("www.tripadvisor.com", "m.tripadvisor.com", ...)
///
/// Both sides are expected to be lowercase already.
///
/// # Examples
///
/// ```
/// use dinescout::url::matches_wildcard;
///
/// assert!(matches_wildcard("tripadvisor.com", "tripadvisor.com"));
/// assert!(matches_wildcard("*.tripadvisor.com", "www.tripadvisor.com"));
/// assert!(!matches_wildcard("*.tripadvisor.com", "tripadvisor.co.uk"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    if let Some(base) = pattern.strip_prefix("*.") {
        candidate == base || candidate.ends_with(&format!(".{}", base))
    } else {
        candidate == pattern
    }
}
